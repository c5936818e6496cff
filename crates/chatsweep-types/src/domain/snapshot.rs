use serde::{Deserialize, Serialize};

use super::project::{ProjectStats, WorkspaceInfo};

/// Sizes of the IDE's storage directories, in bytes with human labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    pub total_size: u64,
    pub total_size_human: String,
    pub global_storage_size: u64,
    pub global_storage_size_human: String,
    pub history_size: u64,
    pub history_size_human: String,
    pub workspace_storage_size: u64,
    pub workspace_storage_size_human: String,
    pub state_vscdb_size: u64,
    pub state_vscdb_backup_size: u64,
}

/// Row counts and value sizes per key family of the global state database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub item_table_count: u64,
    pub item_table_size: u64,
    pub cursor_disk_kv_count: u64,
    pub cursor_disk_kv_size: u64,
    pub bubble_count: u64,
    pub bubble_size: u64,
    pub composer_count: u64,
    pub composer_size: u64,
    pub checkpoint_count: u64,
    pub checkpoint_size: u64,
    pub agent_kv_count: u64,
    pub agent_kv_size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewStats {
    pub total_projects: u64,
    pub total_chats: u64,
    pub total_lines_added: u64,
    pub total_lines_removed: u64,
    pub net_lines: i64,
    pub total_files_changed: u64,
    pub agent_mode_count: u64,
    pub chat_mode_count: u64,
}

impl OverviewStats {
    /// Totals over the project list. Sessions in any mode other than `agent`
    /// count towards `chat_mode_count`.
    pub fn from_projects(projects: &[ProjectStats]) -> Self {
        let mut stats = OverviewStats {
            total_projects: projects.len() as u64,
            ..Default::default()
        };

        for project in projects {
            stats.total_chats += project.chat_count;
            stats.total_lines_added += project.lines_added;
            stats.total_lines_removed += project.lines_removed;
            stats.total_files_changed += project.files_changed;

            for chat in &project.chats {
                if chat.mode.is_agent() {
                    stats.agent_mode_count += 1;
                } else {
                    stats.chat_mode_count += 1;
                }
            }
        }

        stats.net_lines = stats.total_lines_added as i64 - stats.total_lines_removed as i64;
        stats
    }
}

/// Immutable point-in-time aggregate produced by the scanner.
///
/// Nothing mutates a snapshot in place; after any deletion callers load a
/// fresh one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub storage: StorageInfo,
    pub overview: OverviewStats,
    pub database: DatabaseStats,
    pub projects: Vec<ProjectStats>,
    pub workspaces: Vec<WorkspaceInfo>,
}

impl AnalysisResult {
    pub fn find_project(&self, path: &str) -> Option<&ProjectStats> {
        self.projects.iter().find(|p| p.path == path)
    }

    pub fn find_workspace(&self, id: &str) -> Option<&WorkspaceInfo> {
        self.workspaces.iter().find(|w| w.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChatMode, ChatSession};

    fn chat(id: &str, mode: ChatMode, added: u64, removed: u64) -> ChatSession {
        ChatSession {
            id: id.to_string(),
            name: id.to_string(),
            mode,
            created_at: None,
            updated_at: None,
            lines_added: added,
            lines_removed: removed,
            files_changed: 1,
            context_usage: None,
            branch: String::new(),
            is_archived: false,
            subtitle: String::new(),
        }
    }

    fn project(path: &str, chats: Vec<ChatSession>) -> ProjectStats {
        ProjectStats {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            chat_count: chats.len() as u64,
            lines_added: chats.iter().map(|c| c.lines_added).sum(),
            lines_removed: chats.iter().map(|c| c.lines_removed).sum(),
            files_changed: chats.iter().map(|c| c.files_changed).sum(),
            chats,
        }
    }

    #[test]
    fn test_overview_totals_and_mode_split() {
        let projects = vec![
            project(
                "/p/a",
                vec![
                    chat("1", ChatMode::Agent, 10, 50),
                    chat("2", ChatMode::Chat, 5, 0),
                ],
            ),
            project("/p/b", vec![chat("3", ChatMode::from("edit"), 1, 1)]),
        ];

        let stats = OverviewStats::from_projects(&projects);

        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.total_chats, 3);
        assert_eq!(stats.total_lines_added, 16);
        assert_eq!(stats.total_lines_removed, 51);
        assert_eq!(stats.net_lines, -35);
        assert_eq!(stats.total_files_changed, 3);
        assert_eq!(stats.agent_mode_count, 1);
        assert_eq!(stats.chat_mode_count, 2);
    }

    #[test]
    fn test_lookup_by_identifier() {
        let snapshot = AnalysisResult {
            projects: vec![project("/p/a", vec![chat("1", ChatMode::Agent, 1, 0)])],
            ..Default::default()
        };

        assert!(snapshot.find_project("/p/a").is_some());
        assert!(snapshot.find_project("/p/missing").is_none());
        assert!(snapshot.find_workspace("ws").is_none());
        assert_eq!(
            snapshot.find_project("/p/a").and_then(|p| p.find_chat("1")).map(|c| c.lines_added),
            Some(1)
        );
    }
}
