use chatsweep_types::{AnalysisResult, TrashItem};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::composer::{composer_id, is_head};
use crate::scanner::Scanner;
use crate::state_db::StateDb;
use crate::trash::TrashDatabase;
use crate::workspace::WorkspaceEntry;
use crate::{Error, Result};

/// Which composers a delete removes from a state database.
enum Removal<'a> {
    Ids(&'a HashSet<&'a str>),
    All,
}

/// Read and soft-delete access to the IDE's session storage.
///
/// Every removed composer is written to the trash before its state database
/// is rewritten.
pub struct CursorStore {
    scanner: Scanner,
    trash: TrashDatabase,
}

impl CursorStore {
    pub fn open(user_dir: impl Into<PathBuf>, trash_db: &Path) -> Result<Self> {
        Ok(Self::with_trash(user_dir, TrashDatabase::open(trash_db)?))
    }

    pub fn with_trash(user_dir: impl Into<PathBuf>, trash: TrashDatabase) -> Self {
        Self {
            scanner: Scanner::new(user_dir),
            trash,
        }
    }

    pub fn user_dir(&self) -> &Path {
        self.scanner.user_dir()
    }

    pub fn snapshot(&self) -> Result<AnalysisResult> {
        self.scanner.analyze()
    }

    pub fn list_trash(&self) -> Result<Vec<TrashItem>> {
        self.trash.list()
    }

    pub fn clear_trash(&self) -> Result<u64> {
        self.trash.clear()
    }

    pub fn delete_trash_item(&self, trash_id: i64) -> Result<bool> {
        self.trash.delete(trash_id)
    }

    /// Remove one session. An id that is no longer stored removes nothing.
    pub fn delete_session(&self, project_path: &str, session_id: &str) -> Result<u64> {
        self.delete_sessions(project_path, &[session_id.to_string()])
    }

    /// Remove sessions from whichever of the project's entries holds them.
    pub fn delete_sessions(&self, project_path: &str, session_ids: &[String]) -> Result<u64> {
        if session_ids.is_empty() {
            return Ok(0);
        }

        let mut remaining: HashSet<&str> = session_ids.iter().map(String::as_str).collect();
        let mut removed = 0;
        for entry in self.project_entries(project_path)? {
            if remaining.is_empty() {
                break;
            }
            let trashed =
                self.remove_composers(&entry.state_db(), project_path, Removal::Ids(&remaining))?;
            for id in &trashed {
                remaining.remove(id.as_str());
            }
            removed += trashed.len() as u64;
        }
        Ok(removed)
    }

    /// Empty every single-folder entry of the project. A path only known
    /// through multi-root workspaces empties those instead.
    pub fn delete_project_sessions(&self, project_path: &str) -> Result<u64> {
        let entries = self.project_entries(project_path)?;
        let own: Vec<&WorkspaceEntry> = entries
            .iter()
            .filter(|entry| entry.folder() == Some(project_path))
            .collect();
        let targets = if own.is_empty() {
            entries.iter().collect()
        } else {
            own
        };

        let mut removed = 0;
        for entry in targets {
            removed += self
                .remove_composers(&entry.state_db(), project_path, Removal::All)?
                .len() as u64;
        }
        Ok(removed)
    }

    pub fn delete_workspace_sessions(&self, workspace_id: &str) -> Result<u64> {
        let entry = self.workspace_entry(workspace_id)?;
        let trashed = self.remove_composers(&entry.state_db(), &entry.trash_label(), Removal::All)?;
        Ok(trashed.len() as u64)
    }

    /// Remove sessions stored in one workspace entry, addressed by its id.
    pub fn delete_workspace_session_ids(
        &self,
        workspace_id: &str,
        session_ids: &[String],
    ) -> Result<u64> {
        if session_ids.is_empty() {
            return Ok(0);
        }

        let entry = self.workspace_entry(workspace_id)?;
        let ids: HashSet<&str> = session_ids.iter().map(String::as_str).collect();
        let trashed =
            self.remove_composers(&entry.state_db(), &entry.trash_label(), Removal::Ids(&ids))?;
        Ok(trashed.len() as u64)
    }

    fn workspace_entry(&self, workspace_id: &str) -> Result<WorkspaceEntry> {
        let entry = WorkspaceEntry::load(&self.scanner.workspace_storage().join(workspace_id));
        if !entry.has_state_db() {
            return Err(Error::NotFound(format!(
                "no state database for workspace {}",
                workspace_id
            )));
        }
        Ok(entry)
    }

    /// Every entry holding sessions of the project: folders opened on that
    /// path, then multi-root workspaces listing it.
    fn project_entries(&self, project_path: &str) -> Result<Vec<WorkspaceEntry>> {
        let mut entries: Vec<WorkspaceEntry> = self
            .scanner
            .entries()?
            .into_iter()
            .filter(|entry| entry.covers(project_path) && entry.has_state_db())
            .collect();
        if entries.is_empty() {
            return Err(Error::NotFound(format!(
                "no state database for project {}",
                project_path
            )));
        }
        entries.sort_by_key(|entry| entry.folder().is_none());
        Ok(entries)
    }

    /// Ids of the composers moved to the trash.
    fn remove_composers(
        &self,
        db_path: &Path,
        trash_path: &str,
        removal: Removal<'_>,
    ) -> Result<Vec<String>> {
        let db = StateDb::open(db_path)?;
        let Some(mut doc) = db.read_composer_doc()? else {
            return Ok(Vec::new());
        };
        let Some(composers) = doc.get_mut("allComposers").and_then(Value::as_array_mut) else {
            return Ok(Vec::new());
        };

        let selected = |c: &Value| match &removal {
            Removal::Ids(ids) => composer_id(c).is_some_and(|id| ids.contains(id)),
            Removal::All => true,
        };

        let to_trash: Vec<&Value> = composers
            .iter()
            .filter(|c| selected(c))
            .filter(|c| matches!(removal, Removal::Ids(_)) || is_head(c))
            .collect();
        let removed_ids: Vec<String> = to_trash
            .iter()
            .map(|c| composer_id(c).unwrap_or_default().to_string())
            .collect();

        if to_trash.is_empty() && (composers.is_empty() || matches!(removal, Removal::Ids(_))) {
            tracing::debug!(path = %trash_path, "no matching sessions, nothing to delete");
            return Ok(Vec::new());
        }

        self.trash.insert_composers(&to_trash, trash_path)?;
        let removed = removed_ids.len();

        composers.retain(|c| !selected(c));
        db.write_composer_doc(&doc)?;

        for id in removed_ids.iter().filter(|id| !id.is_empty()) {
            if let Err(err) = db.purge_conversation(id) {
                tracing::warn!(session = %id, error = %err, "failed to purge conversation rows");
            }
        }

        tracing::info!(path = %trash_path, removed, "sessions moved to trash");
        Ok(removed_ids)
    }
}
