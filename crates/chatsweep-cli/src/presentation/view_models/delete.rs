use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteKind {
    Project,
    Workspace,
    Session,
}

impl DeleteKind {
    pub fn noun(&self, count: usize) -> &'static str {
        match (self, count == 1) {
            (DeleteKind::Project, true) => "project",
            (DeleteKind::Project, false) => "projects",
            (DeleteKind::Workspace, true) => "workspace",
            (DeleteKind::Workspace, false) => "workspaces",
            (DeleteKind::Session, true) => "session",
            (DeleteKind::Session, false) => "sessions",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteTargetViewModel {
    pub id: String,
    pub label: String,
    /// Sessions the target holds, when the snapshot knows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryViewModel {
    pub succeeded: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteViewModel {
    pub kind: DeleteKind,
    pub dry_run: bool,
    pub targets: Vec<DeleteTargetViewModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryViewModel>,
    /// Sessions removed by a single delete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<u64>,
}
