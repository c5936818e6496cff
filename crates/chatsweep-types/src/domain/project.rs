use serde::{Deserialize, Serialize};

use super::session::ChatSession;
use crate::util::{last_path_segment, short_id};

/// A single-folder project and its sessions.
///
/// Counters arrive pre-aggregated from the scanner and describe the snapshot
/// the project was read from. `path` is the external identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub name: String,
    pub path: String,
    pub chat_count: u64,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub files_changed: u64,
    pub chats: Vec<ChatSession>,
}

impl ProjectStats {
    pub fn find_chat(&self, chat_id: &str) -> Option<&ChatSession> {
        self.chats.iter().find(|c| c.id == chat_id)
    }

    /// Label used when the project is named in progress output.
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        last_path_segment(&self.path)
            .unwrap_or("Unknown")
            .to_string()
    }
}

/// A workspace storage entry: one folder or a multi-root workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    pub id: String,
    /// Creation time label, empty when the IDE did not encode one.
    #[serde(default)]
    pub created_at: String,
    pub projects: Vec<String>,
    pub chat_count: u64,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub files_changed: u64,
    pub recent_chats: Vec<ChatSession>,
    pub is_multi_project: bool,
}

impl WorkspaceInfo {
    pub fn find_chat(&self, chat_id: &str) -> Option<&ChatSession> {
        self.recent_chats.iter().find(|c| c.id == chat_id)
    }

    /// Last segment of the first project path, or the shortened id.
    pub fn display_name(&self) -> String {
        self.projects
            .first()
            .and_then(|p| last_path_segment(p))
            .map(str::to_string)
            .unwrap_or_else(|| short_id(&self.id).to_string())
    }
}
