use chatsweep_core::format_size;
use chatsweep_types::{
    last_path_segment, AnalysisResult, ChatSession, DatabaseStats, OverviewStats, ProjectStats,
    StorageInfo, WorkspaceInfo,
};
use rusqlite::{Connection, OpenFlags};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::composer::sessions_from_doc;
use crate::state_db::StateDb;
use crate::workspace::{read_entries, WorkspaceEntry, STATE_DB_FILE};
use crate::Result;

/// Builds snapshots from an IDE `User` directory.
pub struct Scanner {
    user_dir: PathBuf,
}

impl Scanner {
    pub fn new(user_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_dir: user_dir.into(),
        }
    }

    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    pub fn workspace_storage(&self) -> PathBuf {
        self.user_dir.join("workspaceStorage")
    }

    fn global_db(&self) -> PathBuf {
        self.user_dir.join("globalStorage").join(STATE_DB_FILE)
    }

    pub fn entries(&self) -> Result<Vec<WorkspaceEntry>> {
        read_entries(&self.workspace_storage())
    }

    pub fn storage_info(&self) -> StorageInfo {
        let global_storage = self.user_dir.join("globalStorage");
        let global_storage_size = dir_size(&global_storage);
        let history_size = dir_size(&self.user_dir.join("History"));
        let workspace_storage_size = dir_size(&self.workspace_storage());
        let total_size = global_storage_size + history_size + workspace_storage_size;

        let file_size = |name: &str| {
            fs::metadata(global_storage.join(name))
                .map(|m| m.len())
                .unwrap_or(0)
        };

        StorageInfo {
            total_size,
            total_size_human: format_size(total_size),
            global_storage_size,
            global_storage_size_human: format_size(global_storage_size),
            history_size,
            history_size_human: format_size(history_size),
            workspace_storage_size,
            workspace_storage_size_human: format_size(workspace_storage_size),
            state_vscdb_size: file_size(STATE_DB_FILE),
            state_vscdb_backup_size: file_size("state.vscdb.backup"),
        }
    }

    /// Row counts and value sizes of the global state database. A missing
    /// database or table counts as empty.
    pub fn database_stats(&self) -> Result<DatabaseStats> {
        let path = self.global_db();
        if !path.is_file() {
            return Ok(DatabaseStats::default());
        }

        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

        let (item_table_count, item_table_size) = table_usage(&conn, "ItemTable", None)?;
        let (cursor_disk_kv_count, cursor_disk_kv_size) = table_usage(&conn, "cursorDiskKV", None)?;
        let (bubble_count, bubble_size) = table_usage(&conn, "cursorDiskKV", Some("bubbleId:"))?;
        let (composer_count, composer_size) =
            table_usage(&conn, "cursorDiskKV", Some("composerData:"))?;
        let (checkpoint_count, checkpoint_size) =
            table_usage(&conn, "cursorDiskKV", Some("checkpointId:"))?;
        let (agent_kv_count, agent_kv_size) = table_usage(&conn, "cursorDiskKV", Some("agentKv:"))?;

        Ok(DatabaseStats {
            item_table_count,
            item_table_size,
            cursor_disk_kv_count,
            cursor_disk_kv_size,
            bubble_count,
            bubble_size,
            composer_count,
            composer_size,
            checkpoint_count,
            checkpoint_size,
            agent_kv_count,
            agent_kv_size,
        })
    }

    /// Sessions stored for one workspace entry. Unreadable databases are
    /// skipped with a warning.
    fn entry_sessions(&self, entry: &WorkspaceEntry) -> Vec<ChatSession> {
        if !entry.has_state_db() {
            return Vec::new();
        }

        let read = StateDb::open_read_only(&entry.state_db())
            .and_then(|db| db.read_composer_doc());
        match read {
            Ok(Some(doc)) => sessions_from_doc(&doc),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(workspace = %entry.id, error = %err, "skipping unreadable state database");
                Vec::new()
            }
        }
    }

    /// Full snapshot: storage, overview, database stats, projects, workspaces.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        let entries = self.entries()?;
        let scanned: Vec<(&WorkspaceEntry, Vec<ChatSession>)> = entries
            .iter()
            .map(|entry| (entry, self.entry_sessions(entry)))
            .collect();

        let projects = build_projects(&scanned);
        let workspaces = build_workspaces(&scanned);
        let overview = OverviewStats::from_projects(&projects);

        tracing::debug!(
            projects = projects.len(),
            workspaces = workspaces.len(),
            "scan complete"
        );

        Ok(AnalysisResult {
            storage: self.storage_info(),
            overview,
            database: self.database_stats()?,
            projects,
            workspaces,
        })
    }
}

/// Single-folder entries grouped by path. Entries sharing a path merge.
fn build_projects(scanned: &[(&WorkspaceEntry, Vec<ChatSession>)]) -> Vec<ProjectStats> {
    let mut order: Vec<String> = Vec::new();
    let mut by_path: HashMap<String, ProjectStats> = HashMap::new();

    for (entry, sessions) in scanned {
        let Some(path) = entry.folder() else {
            continue;
        };

        let project = by_path.entry(path.to_string()).or_insert_with(|| {
            order.push(path.to_string());
            ProjectStats {
                name: last_path_segment(path).unwrap_or(path).to_string(),
                path: path.to_string(),
                chat_count: 0,
                lines_added: 0,
                lines_removed: 0,
                files_changed: 0,
                chats: Vec::new(),
            }
        });

        project.chat_count += sessions.len() as u64;
        project.lines_added += sessions.iter().map(|s| s.lines_added).sum::<u64>();
        project.lines_removed += sessions.iter().map(|s| s.lines_removed).sum::<u64>();
        project.files_changed += sessions.iter().map(|s| s.files_changed).sum::<u64>();
        project.chats.extend(sessions.iter().cloned());
    }

    let mut projects: Vec<ProjectStats> = order
        .into_iter()
        .filter_map(|path| by_path.remove(&path))
        .filter(|p| p.chat_count > 0)
        .collect();
    projects.sort_by(|a, b| b.lines_added.cmp(&a.lines_added));
    projects
}

fn build_workspaces(scanned: &[(&WorkspaceEntry, Vec<ChatSession>)]) -> Vec<WorkspaceInfo> {
    let mut workspaces: Vec<WorkspaceInfo> = scanned
        .iter()
        .filter(|(_, sessions)| !sessions.is_empty())
        .map(|(entry, sessions)| WorkspaceInfo {
            id: entry.id.clone(),
            created_at: entry.created_at().to_string(),
            projects: entry.projects(),
            chat_count: sessions.len() as u64,
            lines_added: sessions.iter().map(|s| s.lines_added).sum(),
            lines_removed: sessions.iter().map(|s| s.lines_removed).sum(),
            files_changed: sessions.iter().map(|s| s.files_changed).sum(),
            recent_chats: sessions.clone(),
            is_multi_project: entry.is_multi_project(),
        })
        .collect();
    workspaces.sort_by(|a, b| b.lines_added.cmp(&a.lines_added));
    workspaces
}

fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.metadata().ok())
        .filter(|m| m.is_file())
        .map(|m| m.len())
        .sum()
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// `(rows, total value bytes)` of a table, optionally restricted to a key prefix.
fn table_usage(conn: &Connection, table: &str, key_prefix: Option<&str>) -> Result<(u64, u64)> {
    if !table_exists(conn, table)? {
        return Ok((0, 0));
    }

    // Table names come from the fixed list above, never from input
    let (count, size): (i64, i64) = match key_prefix {
        Some(prefix) => conn.query_row(
            &format!(
                "SELECT COUNT(*), COALESCE(SUM(LENGTH(value)), 0) FROM {} WHERE key LIKE ?1",
                table
            ),
            [format!("{}%", prefix)],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?,
        None => conn.query_row(
            &format!(
                "SELECT COUNT(*), COALESCE(SUM(LENGTH(value)), 0) FROM {}",
                table
            ),
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?,
    };

    Ok((count.max(0) as u64, size.max(0) as u64))
}
