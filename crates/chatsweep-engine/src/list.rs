use std::fmt;
use std::str::FromStr;

use chatsweep_types::{ProjectStats, WorkspaceInfo};
use serde::Serialize;

use crate::query::{paginate, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSortField {
    #[default]
    LinesAdded,
    LinesRemoved,
    ChatCount,
    FilesChanged,
    Name,
}

impl ProjectSortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectSortField::LinesAdded => "lines_added",
            ProjectSortField::LinesRemoved => "lines_removed",
            ProjectSortField::ChatCount => "chat_count",
            ProjectSortField::FilesChanged => "files_changed",
            ProjectSortField::Name => "name",
        }
    }
}

impl fmt::Display for ProjectSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lines_added" => Ok(ProjectSortField::LinesAdded),
            "lines_removed" => Ok(ProjectSortField::LinesRemoved),
            "chat_count" => Ok(ProjectSortField::ChatCount),
            "files_changed" => Ok(ProjectSortField::FilesChanged),
            "name" => Ok(ProjectSortField::Name),
            _ => Err(format!(
                "unknown project sort field '{}' (expected lines_added, lines_removed, chat_count, files_changed or name)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectListCriteria {
    pub sort_field: ProjectSortField,
    pub page: usize,
}

impl Default for ProjectListCriteria {
    fn default() -> Self {
        Self {
            sort_field: ProjectSortField::default(),
            page: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceListCriteria {
    pub page: usize,
}

impl Default for WorkspaceListCriteria {
    fn default() -> Self {
        Self { page: 1 }
    }
}

/// Numeric fields sort descending, `name` ascending. Stable.
pub fn sort_projects(projects: &[ProjectStats], field: ProjectSortField) -> Vec<&ProjectStats> {
    let mut rows: Vec<&ProjectStats> = projects.iter().collect();
    match field {
        ProjectSortField::LinesAdded => rows.sort_by(|a, b| b.lines_added.cmp(&a.lines_added)),
        ProjectSortField::LinesRemoved => {
            rows.sort_by(|a, b| b.lines_removed.cmp(&a.lines_removed))
        }
        ProjectSortField::ChatCount => rows.sort_by(|a, b| b.chat_count.cmp(&a.chat_count)),
        ProjectSortField::FilesChanged => {
            rows.sort_by(|a, b| b.files_changed.cmp(&a.files_changed))
        }
        ProjectSortField::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
    }
    rows
}

pub fn list_projects<'a>(
    projects: &'a [ProjectStats],
    criteria: &ProjectListCriteria,
) -> Page<&'a ProjectStats> {
    paginate(sort_projects(projects, criteria.sort_field), criteria.page)
}

/// Workspaces that still hold sessions, most lines added first.
pub fn visible_workspaces(workspaces: &[WorkspaceInfo]) -> Vec<&WorkspaceInfo> {
    let mut rows: Vec<&WorkspaceInfo> = workspaces.iter().filter(|w| w.chat_count > 0).collect();
    rows.sort_by(|a, b| b.lines_added.cmp(&a.lines_added));
    rows
}

pub fn list_workspaces<'a>(
    workspaces: &'a [WorkspaceInfo],
    criteria: &WorkspaceListCriteria,
) -> Page<&'a WorkspaceInfo> {
    paginate(visible_workspaces(workspaces), criteria.page)
}
