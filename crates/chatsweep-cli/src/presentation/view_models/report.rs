use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OverviewViewModel {
    pub total_projects: u64,
    pub total_workspaces: usize,
    pub total_chats: u64,
    pub total_lines_added: u64,
    pub total_lines_removed: u64,
    pub net_lines: i64,
    pub total_files_changed: u64,
    pub agent_mode_count: u64,
    pub chat_mode_count: u64,
}

#[derive(Debug, Serialize)]
pub struct SizeEntry {
    pub label: String,
    pub bytes: u64,
    pub human: String,
}

#[derive(Debug, Serialize)]
pub struct StorageViewModel {
    pub user_dir: String,
    pub total: SizeEntry,
    pub entries: Vec<SizeEntry>,
}

#[derive(Debug, Serialize)]
pub struct TableStat {
    pub name: String,
    pub rows: u64,
    pub bytes: u64,
    pub human: String,
}

#[derive(Debug, Serialize)]
pub struct DatabaseViewModel {
    pub tables: Vec<TableStat>,
}

#[derive(Debug, Serialize)]
pub struct VersionViewModel {
    pub name: String,
    pub version: String,
}
