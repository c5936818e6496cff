use serde::{Deserialize, Serialize};

/// A deleted session retained by the trash store.
///
/// `id` is assigned by the store and is the only handle for purging.
/// `original_data` is the record exactly as the IDE stored it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashItem {
    pub id: i64,
    pub chat_id: String,
    pub chat_name: String,
    pub project_path: String,
    pub mode: String,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub files_changed: u64,
    pub deleted_at: String,
    pub original_data: String,
}
