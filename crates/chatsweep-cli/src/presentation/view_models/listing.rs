use serde::Serialize;

/// One page of a listing. Flattened into the list view models so JSON
/// output reads `{ items, page, total_pages, total_filtered, ... }`.
#[derive(Debug, Serialize)]
pub struct PageViewModel<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_filtered: usize,
}

#[derive(Debug, Serialize)]
pub struct ProjectRowViewModel {
    pub name: String,
    pub path: String,
    pub chat_count: u64,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub files_changed: u64,
}

#[derive(Debug, Serialize)]
pub struct ProjectListViewModel {
    pub sort: String,
    #[serde(flatten)]
    pub page: PageViewModel<ProjectRowViewModel>,
}

#[derive(Debug, Serialize)]
pub struct WorkspaceRowViewModel {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub projects: Vec<String>,
    pub is_multi_project: bool,
    pub chat_count: u64,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub files_changed: u64,
}

#[derive(Debug, Serialize)]
pub struct WorkspaceListViewModel {
    #[serde(flatten)]
    pub page: PageViewModel<WorkspaceRowViewModel>,
}

#[derive(Debug, Serialize)]
pub struct SessionRowViewModel {
    pub id: String,
    pub name: String,
    pub mode: String,
    pub updated_at: Option<String>,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub net_lines: i64,
    pub files_changed: u64,
    pub context_usage: Option<f64>,
    pub branch: String,
    pub is_archived: bool,
    pub subtitle: String,
}

#[derive(Debug, Serialize)]
pub struct SessionListViewModel {
    /// Project path or workspace id the sessions belong to.
    pub owner: String,
    pub owner_label: String,
    /// Sessions in the owner before filtering.
    pub total_sessions: usize,
    pub sort: String,
    pub order: String,
    #[serde(flatten)]
    pub page: PageViewModel<SessionRowViewModel>,
}
