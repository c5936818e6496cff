use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TrashEntryViewModel {
    pub id: i64,
    pub chat_id: String,
    pub chat_name: String,
    pub project_path: String,
    pub mode: String,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub files_changed: u64,
    pub deleted_at: String,
}

#[derive(Debug, Serialize)]
pub struct TrashListViewModel {
    pub items: Vec<TrashEntryViewModel>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct TrashPurgeViewModel {
    pub dry_run: bool,
    /// The single entry targeted, or `None` for the whole trash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    pub removed: u64,
}
