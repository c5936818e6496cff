use std::collections::BTreeMap;
use std::sync::Arc;

use chatsweep_engine::{Criteria, ListState, Selection, SelectionScope};
use chatsweep_types::{last_path_segment, short_id, AnalysisResult, ChatSession, TrashItem};
use tracing::warn;

use crate::backend::SessionBackend;
use crate::batch::{BatchOrchestrator, BatchSummary};
use crate::events::{emit, AppEvent, EventSender};
use crate::{Error, Result};

/// Which sessions `select_sessions` picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectTarget {
    /// The current page under the criteria.
    Page,
    /// Every session passing the criteria, across pages.
    Filtered,
}

/// Application state shared by every command: the latest snapshot, one
/// selection per list and the delete state machine.
///
/// Session lists also keep their criteria, so a criteria change clears the
/// selection made under the old view.
///
/// Batch deletes take `&mut self`, so nothing can change a selection while a
/// batch runs.
pub struct Workbench<B> {
    backend: B,
    orchestrator: BatchOrchestrator,
    events: Option<EventSender>,
    snapshot: Option<Arc<AnalysisResult>>,
    selections: BTreeMap<SelectionScope, Selection>,
    session_lists: BTreeMap<SelectionScope, ListState<Criteria>>,
}

impl<B: SessionBackend> Workbench<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            orchestrator: BatchOrchestrator::new(None),
            events: None,
            snapshot: None,
            selections: BTreeMap::new(),
            session_lists: BTreeMap::new(),
        }
    }

    pub fn with_events(backend: B, events: EventSender) -> Self {
        Self {
            backend,
            orchestrator: BatchOrchestrator::new(Some(events.clone())),
            events: Some(events),
            snapshot: None,
            selections: BTreeMap::new(),
            session_lists: BTreeMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn orchestrator(&self) -> &BatchOrchestrator {
        &self.orchestrator
    }

    // ------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------

    /// Read a fresh snapshot from the backend.
    pub fn load_data(&mut self) -> Result<Arc<AnalysisResult>> {
        let snapshot = Arc::new(self.backend.snapshot()?);
        emit(
            &self.events,
            AppEvent::SnapshotLoaded {
                projects: snapshot.projects.len(),
                workspaces: snapshot.workspaces.len(),
            },
        );
        self.snapshot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// The current snapshot, loading one if the last delete invalidated it.
    pub fn snapshot(&mut self) -> Result<Arc<AnalysisResult>> {
        match &self.snapshot {
            Some(snapshot) => Ok(Arc::clone(snapshot)),
            None => self.load_data(),
        }
    }

    pub fn cached_snapshot(&self) -> Option<&Arc<AnalysisResult>> {
        self.snapshot.as_ref()
    }

    pub fn app_version(&self) -> Result<String> {
        self.backend.app_version()
    }

    // ------------------------------------------------------------------
    // Selections
    // ------------------------------------------------------------------

    pub fn selection(&self, scope: &SelectionScope) -> Option<&Selection> {
        if is_session_scope(scope) {
            self.session_lists.get(scope).map(ListState::selection)
        } else {
            self.selections.get(scope)
        }
    }

    pub fn selection_mut(&mut self, scope: &SelectionScope) -> &mut Selection {
        if is_session_scope(scope) {
            self.session_lists
                .entry(scope.clone())
                .or_default()
                .selection_mut()
        } else {
            self.selections.entry(scope.clone()).or_default()
        }
    }

    /// Clear the selection of one list. A session list keeps its criteria.
    pub fn clear_selection(&mut self, scope: &SelectionScope) {
        if let Some(list) = self.session_lists.get_mut(scope) {
            list.selection_mut().clear();
        }
        self.selections.remove(scope);
    }

    /// Criteria last applied to a session list.
    pub fn criteria(&self, scope: &SelectionScope) -> Option<&Criteria> {
        self.session_lists.get(scope).map(ListState::criteria)
    }

    /// Apply criteria to a session list. Anything beyond a page change clears
    /// its selection.
    pub fn set_criteria(&mut self, scope: &SelectionScope, criteria: Criteria) -> Result<()> {
        self.session_list(scope)?.set_criteria(criteria);
        Ok(())
    }

    /// Select the page or the whole filtered set of a session list under
    /// `criteria`. Returns how many ids are now selected.
    pub fn select_sessions(
        &mut self,
        scope: &SelectionScope,
        criteria: &Criteria,
        target: SelectTarget,
    ) -> Result<usize> {
        let snapshot = self.snapshot()?;
        let sessions = sessions_in(&snapshot, scope)?;

        let list = self.session_list(scope)?;
        list.set_criteria(criteria.clone());
        list.set_page(criteria.page);
        match target {
            SelectTarget::Page => list.select_page(sessions),
            SelectTarget::Filtered => list.select_all_filtered(sessions),
        }
        Ok(list.selection().len())
    }

    fn session_list(&mut self, scope: &SelectionScope) -> Result<&mut ListState<Criteria>> {
        if !is_session_scope(scope) {
            return Err(Error::NotFound(
                "session list for a project or workspace list".to_string(),
            ));
        }
        Ok(self.session_lists.entry(scope.clone()).or_default())
    }

    // ------------------------------------------------------------------
    // Single deletes
    // ------------------------------------------------------------------

    pub fn delete_session(&mut self, project_path: &str, session_id: &str) -> Result<u64> {
        let backend = &self.backend;
        let removed = self
            .orchestrator
            .run_single(|| backend.delete_session(project_path, session_id))?;
        self.refresh();
        Ok(removed)
    }

    /// Delete one session of a session list, in the storage that list reads.
    pub fn delete_session_in(&mut self, scope: &SelectionScope, session_id: &str) -> Result<u64> {
        let owner = SessionOwner::of(scope)?;
        let backend = &self.backend;
        let removed = self
            .orchestrator
            .run_single(|| owner.delete_one(backend, session_id))?;
        self.refresh();
        Ok(removed)
    }

    pub fn delete_project(&mut self, project_path: &str) -> Result<u64> {
        let backend = &self.backend;
        let removed = self
            .orchestrator
            .run_single(|| backend.delete_project_sessions(project_path))?;
        self.refresh();
        Ok(removed)
    }

    pub fn delete_workspace(&mut self, workspace_id: &str) -> Result<u64> {
        let backend = &self.backend;
        let removed = self
            .orchestrator
            .run_single(|| backend.delete_workspace_sessions(workspace_id))?;
        self.refresh();
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Batches
    // ------------------------------------------------------------------

    pub async fn delete_sessions(
        &mut self,
        project_path: &str,
        session_ids: &[String],
    ) -> BatchSummary {
        let scope = SelectionScope::ProjectSessions(project_path.to_string());
        self.delete_sessions_in(&scope, SessionOwner::Project(project_path), session_ids)
            .await
    }

    pub async fn delete_projects(&mut self, project_paths: &[String]) -> BatchSummary {
        let snapshot = self.snapshot.clone();
        let backend = &self.backend;

        let summary = self
            .orchestrator
            .run_batch(
                project_paths,
                |path| project_label(snapshot.as_deref(), path),
                |path| backend.delete_project_sessions(path),
            )
            .await;

        self.finish_batch(&SelectionScope::ProjectList);
        summary
    }

    pub async fn delete_workspaces(&mut self, workspace_ids: &[String]) -> BatchSummary {
        let snapshot = self.snapshot.clone();
        let backend = &self.backend;

        let summary = self
            .orchestrator
            .run_batch(
                workspace_ids,
                |id| workspace_label(snapshot.as_deref(), id),
                |id| backend.delete_workspace_sessions(id),
            )
            .await;

        self.finish_batch(&SelectionScope::WorkspaceList);
        summary
    }

    /// Delete whatever is selected in `scope`. An empty selection deletes
    /// nothing.
    pub async fn delete_selected(&mut self, scope: &SelectionScope) -> Result<BatchSummary> {
        let ids = self
            .selection(scope)
            .map(Selection::to_vec)
            .unwrap_or_default();
        if ids.is_empty() {
            return Ok(BatchSummary::default());
        }

        let summary = match scope {
            SelectionScope::ProjectSessions(_) | SelectionScope::WorkspaceSessions(_) => {
                let owner = SessionOwner::of(scope)?;
                self.delete_sessions_in(scope, owner, &ids).await
            }
            SelectionScope::ProjectList => self.delete_projects(&ids).await,
            SelectionScope::WorkspaceList => self.delete_workspaces(&ids).await,
        };

        Ok(summary)
    }

    async fn delete_sessions_in(
        &mut self,
        scope: &SelectionScope,
        owner: SessionOwner<'_>,
        session_ids: &[String],
    ) -> BatchSummary {
        let summary = if self.backend.supports_native_batch() {
            self.native_delete(owner, session_ids)
        } else {
            let snapshot = self.snapshot.clone();
            let backend = &self.backend;
            self.orchestrator
                .run_batch(
                    session_ids,
                    |id| session_label(snapshot.as_deref(), scope, id),
                    |id| owner.delete_one(backend, id),
                )
                .await
        };

        self.finish_batch(scope);
        summary
    }

    /// One backend call for all ids. The call is opaque, so the whole set
    /// succeeds or fails together.
    fn native_delete(&self, owner: SessionOwner<'_>, session_ids: &[String]) -> BatchSummary {
        if session_ids.is_empty() {
            return BatchSummary::default();
        }

        let total = session_ids.len();
        emit(&self.events, AppEvent::DeleteStarted { total });

        let backend = &self.backend;
        let summary = match self
            .orchestrator
            .run_single(|| owner.delete_many(backend, session_ids))
        {
            Ok(_) => BatchSummary {
                succeeded: total,
                failed: 0,
            },
            Err(err) => {
                warn!(owner = ?owner, error = %err, "batch session delete failed");
                BatchSummary {
                    succeeded: 0,
                    failed: total,
                }
            }
        };

        emit(&self.events, AppEvent::DeleteFinished(summary));
        summary
    }

    // ------------------------------------------------------------------
    // Trash
    // ------------------------------------------------------------------

    pub fn list_trash(&self) -> Result<Vec<TrashItem>> {
        self.backend.list_trash()
    }

    pub fn clear_trash(&mut self) -> Result<u64> {
        self.backend.clear_trash()
    }

    pub fn delete_trash_item(&mut self, trash_id: i64) -> Result<bool> {
        self.backend.delete_trash_item(trash_id)
    }

    // ------------------------------------------------------------------

    fn finish_batch(&mut self, scope: &SelectionScope) {
        self.clear_selection(scope);
        self.refresh();
    }

    /// Drop the snapshot and every selection, then read a new snapshot. A
    /// failed reload leaves the snapshot empty so the next access retries.
    fn refresh(&mut self) {
        self.snapshot = None;
        self.selections.clear();
        for list in self.session_lists.values_mut() {
            list.selection_mut().clear();
        }
        emit(&self.events, AppEvent::SnapshotInvalidated);

        if let Err(err) = self.load_data() {
            warn!(error = %err, "snapshot reload after delete failed");
            emit(&self.events, AppEvent::Error(err.to_string()));
        }
    }
}

/// Storage holding the sessions of a session list.
#[derive(Debug, Clone, Copy)]
enum SessionOwner<'a> {
    Project(&'a str),
    Workspace(&'a str),
}

impl<'a> SessionOwner<'a> {
    fn of(scope: &'a SelectionScope) -> Result<Self> {
        match scope {
            SelectionScope::ProjectSessions(path) => Ok(SessionOwner::Project(path)),
            SelectionScope::WorkspaceSessions(id) => Ok(SessionOwner::Workspace(id)),
            SelectionScope::ProjectList | SelectionScope::WorkspaceList => Err(Error::NotFound(
                "session owner for a project or workspace list".to_string(),
            )),
        }
    }

    fn delete_one<B: SessionBackend>(self, backend: &B, session_id: &str) -> Result<u64> {
        match self {
            SessionOwner::Project(path) => backend.delete_session(path, session_id),
            SessionOwner::Workspace(id) => {
                backend.delete_workspace_session_ids(id, &[session_id.to_string()])
            }
        }
    }

    fn delete_many<B: SessionBackend>(self, backend: &B, session_ids: &[String]) -> Result<u64> {
        match self {
            SessionOwner::Project(path) => backend.delete_sessions(path, session_ids),
            SessionOwner::Workspace(id) => backend.delete_workspace_session_ids(id, session_ids),
        }
    }
}

fn is_session_scope(scope: &SelectionScope) -> bool {
    matches!(
        scope,
        SelectionScope::ProjectSessions(_) | SelectionScope::WorkspaceSessions(_)
    )
}

/// Sessions listed under a session scope of the snapshot.
pub fn sessions_in<'a>(
    snapshot: &'a AnalysisResult,
    scope: &SelectionScope,
) -> Result<&'a [ChatSession]> {
    match scope {
        SelectionScope::ProjectSessions(path) => snapshot
            .find_project(path)
            .map(|p| p.chats.as_slice())
            .ok_or_else(|| Error::NotFound(format!("project {}", path))),
        SelectionScope::WorkspaceSessions(id) => snapshot
            .find_workspace(id)
            .map(|w| w.recent_chats.as_slice())
            .ok_or_else(|| Error::NotFound(format!("workspace {}", id))),
        SelectionScope::ProjectList | SelectionScope::WorkspaceList => Err(Error::NotFound(
            "session list for a project or workspace list".to_string(),
        )),
    }
}

fn project_label(snapshot: Option<&AnalysisResult>, path: &str) -> String {
    snapshot
        .and_then(|s| s.find_project(path))
        .map(|p| p.display_name())
        .unwrap_or_else(|| last_path_segment(path).unwrap_or("Unknown").to_string())
}

fn workspace_label(snapshot: Option<&AnalysisResult>, id: &str) -> String {
    snapshot
        .and_then(|s| s.find_workspace(id))
        .map(|w| w.display_name())
        .unwrap_or_else(|| short_id(id).to_string())
}

fn session_label(snapshot: Option<&AnalysisResult>, scope: &SelectionScope, id: &str) -> String {
    let name = snapshot.and_then(|s| match scope {
        SelectionScope::ProjectSessions(path) => s.find_project(path)?.find_chat(id),
        SelectionScope::WorkspaceSessions(ws) => s.find_workspace(ws)?.find_chat(id),
        SelectionScope::ProjectList | SelectionScope::WorkspaceList => None,
    });

    name.map(|chat| chat.name.clone())
        .unwrap_or_else(|| short_id(id).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_fall_back_without_snapshot() {
        assert_eq!(project_label(None, "/home/me/api"), "api");
        assert_eq!(project_label(None, "/"), "Unknown");
        assert_eq!(workspace_label(None, "0123456789abcdef"), "01234567");

        let scope = SelectionScope::ProjectSessions("/p".to_string());
        assert_eq!(session_label(None, &scope, "abcdefghijkl"), "abcdefgh");
    }

    #[test]
    fn test_sessions_in_list_scope_is_not_found() {
        let snapshot = AnalysisResult::default();
        let err = sessions_in(&snapshot, &SelectionScope::ProjectList).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
