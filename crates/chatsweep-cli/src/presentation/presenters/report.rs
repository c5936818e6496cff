use chatsweep_core::format_size;
use chatsweep_types::{AnalysisResult, DatabaseStats, StorageInfo};

use crate::args::hints::cmd;
use crate::presentation::view_models::{
    CommandResultViewModel, DatabaseViewModel, Guidance, OverviewViewModel, SizeEntry,
    StatusBadge, StorageViewModel, TableStat, VersionViewModel,
};

pub fn present_overview(snapshot: &AnalysisResult) -> CommandResultViewModel<OverviewViewModel> {
    let o = &snapshot.overview;
    let content = OverviewViewModel {
        total_projects: o.total_projects,
        total_workspaces: snapshot.workspaces.len(),
        total_chats: o.total_chats,
        total_lines_added: o.total_lines_added,
        total_lines_removed: o.total_lines_removed,
        net_lines: o.net_lines,
        total_files_changed: o.total_files_changed,
        agent_mode_count: o.agent_mode_count,
        chat_mode_count: o.chat_mode_count,
    };

    let result = CommandResultViewModel::new(content);
    if snapshot.projects.is_empty() && snapshot.workspaces.is_empty() {
        result
            .with_badge(StatusBadge::info("No sessions found"))
            .with_suggestion(
                Guidance::new("Point chatsweep at the Cursor `User` directory")
                    .with_command("chatsweep --cursor-dir <PATH> overview"),
            )
    } else {
        result
            .with_badge(StatusBadge::success("Session overview"))
            .with_suggestion(Guidance::new("Browse projects").with_command(cmd::PROJECT_LIST))
    }
}

fn size(label: &str, bytes: u64) -> SizeEntry {
    SizeEntry {
        label: label.to_string(),
        bytes,
        human: format_size(bytes),
    }
}

pub fn present_storage(user_dir: &str, info: &StorageInfo) -> CommandResultViewModel<StorageViewModel> {
    let content = StorageViewModel {
        user_dir: user_dir.to_string(),
        total: size("Total", info.total_size),
        entries: vec![
            size("globalStorage", info.global_storage_size),
            size("  state.vscdb", info.state_vscdb_size),
            size("  state.vscdb.backup", info.state_vscdb_backup_size),
            size("History", info.history_size),
            size("workspaceStorage", info.workspace_storage_size),
        ],
    };

    CommandResultViewModel::new(content).with_badge(StatusBadge::info("Storage usage"))
}

pub fn present_database(stats: &DatabaseStats) -> CommandResultViewModel<DatabaseViewModel> {
    let table = |name: &str, rows: u64, bytes: u64| TableStat {
        name: name.to_string(),
        rows,
        bytes,
        human: format_size(bytes),
    };

    let content = DatabaseViewModel {
        tables: vec![
            table("ItemTable", stats.item_table_count, stats.item_table_size),
            table("cursorDiskKV", stats.cursor_disk_kv_count, stats.cursor_disk_kv_size),
            table("bubbleId", stats.bubble_count, stats.bubble_size),
            table("composerData", stats.composer_count, stats.composer_size),
            table("checkpointId", stats.checkpoint_count, stats.checkpoint_size),
            table("agentKv", stats.agent_kv_count, stats.agent_kv_size),
        ],
    };

    CommandResultViewModel::new(content).with_badge(StatusBadge::info("Global state database"))
}

pub fn present_version(version: String) -> CommandResultViewModel<VersionViewModel> {
    CommandResultViewModel::new(VersionViewModel {
        name: "chatsweep".to_string(),
        version,
    })
}
