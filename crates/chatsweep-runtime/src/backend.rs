use chatsweep_store::CursorStore;
use chatsweep_types::{AnalysisResult, TrashItem};

use crate::config::ResolvedPaths;
use crate::Result;

/// Request/response surface the session services drive.
///
/// Every call may fail; callers treat failures as opaque. Counts are the
/// number of sessions actually removed, so an absent id is `Ok(0)`.
pub trait SessionBackend {
    fn snapshot(&self) -> Result<AnalysisResult>;

    fn app_version(&self) -> Result<String>;

    fn list_trash(&self) -> Result<Vec<TrashItem>>;

    fn delete_session(&self, project_path: &str, session_id: &str) -> Result<u64>;

    /// Not assumed to be atomic.
    fn delete_sessions(&self, project_path: &str, session_ids: &[String]) -> Result<u64>;

    fn delete_project_sessions(&self, project_path: &str) -> Result<u64>;

    fn delete_workspace_sessions(&self, workspace_id: &str) -> Result<u64>;

    /// Remove sessions stored in one workspace, addressed by its id.
    fn delete_workspace_session_ids(&self, workspace_id: &str, session_ids: &[String])
    -> Result<u64>;

    fn clear_trash(&self) -> Result<u64>;

    /// `false` when no row had that id.
    fn delete_trash_item(&self, trash_id: i64) -> Result<bool>;

    /// Whether `delete_sessions` is handled in one call. When it is not, the
    /// services loop over `delete_session` instead.
    fn supports_native_batch(&self) -> bool {
        false
    }
}

/// Backend over the IDE's on-disk storage.
pub struct StoreBackend {
    store: CursorStore,
    native_batch: bool,
}

impl StoreBackend {
    pub fn new(store: CursorStore) -> Self {
        Self {
            store,
            native_batch: true,
        }
    }

    pub fn open(paths: &ResolvedPaths) -> Result<Self> {
        let store = CursorStore::open(&paths.cursor_user_dir, &paths.trash_db)?;
        Ok(Self::new(store))
    }

    pub fn with_native_batch(mut self, enabled: bool) -> Self {
        self.native_batch = enabled;
        self
    }

    pub fn store(&self) -> &CursorStore {
        &self.store
    }
}

impl SessionBackend for StoreBackend {
    fn snapshot(&self) -> Result<AnalysisResult> {
        Ok(self.store.snapshot()?)
    }

    fn app_version(&self) -> Result<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }

    fn list_trash(&self) -> Result<Vec<TrashItem>> {
        Ok(self.store.list_trash()?)
    }

    fn delete_session(&self, project_path: &str, session_id: &str) -> Result<u64> {
        Ok(self.store.delete_session(project_path, session_id)?)
    }

    fn delete_sessions(&self, project_path: &str, session_ids: &[String]) -> Result<u64> {
        Ok(self.store.delete_sessions(project_path, session_ids)?)
    }

    fn delete_project_sessions(&self, project_path: &str) -> Result<u64> {
        Ok(self.store.delete_project_sessions(project_path)?)
    }

    fn delete_workspace_sessions(&self, workspace_id: &str) -> Result<u64> {
        Ok(self.store.delete_workspace_sessions(workspace_id)?)
    }

    fn delete_workspace_session_ids(
        &self,
        workspace_id: &str,
        session_ids: &[String],
    ) -> Result<u64> {
        Ok(self
            .store
            .delete_workspace_session_ids(workspace_id, session_ids)?)
    }

    fn clear_trash(&self) -> Result<u64> {
        Ok(self.store.clear_trash()?)
    }

    fn delete_trash_item(&self, trash_id: i64) -> Result<bool> {
        Ok(self.store.delete_trash_item(trash_id)?)
    }

    fn supports_native_batch(&self) -> bool {
        self.native_batch
    }
}
