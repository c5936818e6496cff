use std::cell::RefCell;
use std::sync::{Arc, Mutex};

use chatsweep_engine::{Criteria, Selection, SelectionScope};
use chatsweep_runtime::{
    events, AppEvent, BatchSummary, Error, Result, SelectTarget, SessionBackend, Workbench,
};
use chatsweep_types::{AnalysisResult, ChatMode, ChatSession, ProjectStats, TrashItem, WorkspaceInfo};

fn chat(id: &str, name: &str, files: u64) -> ChatSession {
    ChatSession {
        id: id.to_string(),
        name: name.to_string(),
        mode: ChatMode::Agent,
        created_at: None,
        updated_at: None,
        lines_added: files * 10,
        lines_removed: 0,
        files_changed: files,
        context_usage: None,
        branch: String::new(),
        is_archived: false,
        subtitle: String::new(),
    }
}

fn project(path: &str, chats: Vec<ChatSession>) -> ProjectStats {
    ProjectStats {
        name: path.rsplit('/').next().unwrap_or_default().to_string(),
        path: path.to_string(),
        chat_count: chats.len() as u64,
        lines_added: chats.iter().map(|c| c.lines_added).sum(),
        lines_removed: 0,
        files_changed: chats.iter().map(|c| c.files_changed).sum(),
        chats,
    }
}

fn workspace(id: &str, projects: &[&str], chats: Vec<ChatSession>) -> WorkspaceInfo {
    WorkspaceInfo {
        id: id.to_string(),
        created_at: String::new(),
        projects: projects.iter().map(|p| p.to_string()).collect(),
        chat_count: chats.len() as u64,
        lines_added: 0,
        lines_removed: 0,
        files_changed: 0,
        recent_chats: chats,
        is_multi_project: projects.len() > 1,
    }
}

fn sample_snapshot() -> AnalysisResult {
    AnalysisResult {
        projects: vec![
            project(
                "/src/app",
                vec![
                    chat("p1", "First", 1),
                    chat("p2", "Second", 2),
                    chat("p3", "Third", 3),
                    chat("z0", "Nothing", 0),
                ],
            ),
            project("/src/lib", vec![chat("l1", "Lib", 1)]),
        ],
        workspaces: vec![workspace(
            "ws-multi-0001",
            &["/src/api", "/src/web"],
            vec![chat("m1", "Multi", 4)],
        )],
        ..Default::default()
    }
}

/// Records every call; fails any call whose target is listed in `failing`.
#[derive(Default)]
struct MockBackend {
    snapshot: AnalysisResult,
    failing: Vec<String>,
    native: bool,
    calls: RefCell<Vec<String>>,
    trash: RefCell<Vec<TrashItem>>,
    observed: Option<Arc<Mutex<Vec<usize>>>>,
    seen_at_call: RefCell<Vec<usize>>,
}

impl MockBackend {
    fn new() -> Self {
        Self {
            snapshot: sample_snapshot(),
            ..Default::default()
        }
    }

    fn failing(mut self, target: &str) -> Self {
        self.failing.push(target.to_string());
        self
    }

    fn native(mut self) -> Self {
        self.native = true;
        self
    }

    fn record(&self, call: String, target: &str) -> Result<u64> {
        if let Some(observed) = &self.observed {
            let seen = observed.lock().unwrap().len();
            self.seen_at_call.borrow_mut().push(seen);
        }
        self.calls.borrow_mut().push(call);
        if self.failing.iter().any(|f| f == target) {
            return Err(Error::Backend(format!("cannot delete {}", target)));
        }
        Ok(1)
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SessionBackend for MockBackend {
    fn snapshot(&self) -> Result<AnalysisResult> {
        self.calls.borrow_mut().push("snapshot".to_string());
        Ok(self.snapshot.clone())
    }

    fn app_version(&self) -> Result<String> {
        Ok("0.0.0-test".to_string())
    }

    fn list_trash(&self) -> Result<Vec<TrashItem>> {
        Ok(self.trash.borrow().clone())
    }

    fn delete_session(&self, project_path: &str, session_id: &str) -> Result<u64> {
        self.record(format!("session {} {}", project_path, session_id), session_id)
    }

    fn delete_sessions(&self, project_path: &str, session_ids: &[String]) -> Result<u64> {
        self.record(
            format!("sessions {} {}", project_path, session_ids.join(",")),
            project_path,
        )
        .map(|_| session_ids.len() as u64)
    }

    fn delete_project_sessions(&self, project_path: &str) -> Result<u64> {
        self.record(format!("project {}", project_path), project_path)
    }

    fn delete_workspace_sessions(&self, workspace_id: &str) -> Result<u64> {
        self.record(format!("workspace {}", workspace_id), workspace_id)
    }

    fn delete_workspace_session_ids(
        &self,
        workspace_id: &str,
        session_ids: &[String],
    ) -> Result<u64> {
        let target = session_ids
            .iter()
            .find(|id| self.failing.contains(id))
            .map_or(workspace_id, String::as_str);
        self.record(
            format!("workspace-sessions {} {}", workspace_id, session_ids.join(",")),
            target,
        )
        .map(|_| session_ids.len() as u64)
    }

    fn clear_trash(&self) -> Result<u64> {
        Ok(self.trash.borrow_mut().drain(..).count() as u64)
    }

    fn delete_trash_item(&self, trash_id: i64) -> Result<bool> {
        let mut trash = self.trash.borrow_mut();
        let before = trash.len();
        trash.retain(|t| t.id != trash_id);
        Ok(trash.len() != before)
    }

    fn supports_native_batch(&self) -> bool {
        self.native
    }
}

fn deletes(calls: &[String]) -> Vec<&str> {
    calls
        .iter()
        .map(String::as_str)
        .filter(|c| *c != "snapshot")
        .collect()
}

#[tokio::test]
async fn test_project_batch_counts_failures_and_reports_progress() {
    let (tx, mut rx) = events::channel();
    let mut bench = Workbench::with_events(MockBackend::new().failing("/src/p2"), tx);
    bench.load_data().unwrap();

    let targets: Vec<String> = ["/src/p1", "/src/p2", "/src/p3"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let summary = bench.delete_projects(&targets).await;

    assert_eq!(summary, BatchSummary { succeeded: 2, failed: 1 });
    assert_eq!(
        deletes(&bench.backend().calls()),
        vec!["project /src/p1", "project /src/p2", "project /src/p3"]
    );

    let mut progress = Vec::new();
    let mut invalidated = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            AppEvent::Progress(p) => progress.push((p.current, p.label)),
            AppEvent::SnapshotInvalidated => invalidated = true,
            _ => {}
        }
    }
    assert_eq!(
        progress,
        vec![
            (1, "p1".to_string()),
            (2, "p2".to_string()),
            (3, "p3".to_string())
        ]
    );
    assert!(invalidated);
}

#[tokio::test]
async fn test_progress_is_observable_between_items() {
    let observed = Arc::new(Mutex::new(Vec::new()));
    let backend = MockBackend {
        observed: Some(Arc::clone(&observed)),
        ..MockBackend::new()
    };

    let (tx, mut rx) = events::channel();
    let consumer_log = Arc::clone(&observed);
    let consumer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                AppEvent::Progress(p) => consumer_log.lock().unwrap().push(p.current),
                AppEvent::DeleteFinished(_) => break,
                _ => {}
            }
        }
    });

    let mut bench = Workbench::with_events(backend, tx);
    let targets: Vec<String> = (1..=4).map(|i| format!("/src/p{}", i)).collect();
    let summary = bench.delete_projects(&targets).await;
    consumer.await.unwrap();

    assert_eq!(summary.succeeded, 4);
    assert_eq!(*observed.lock().unwrap(), vec![1, 2, 3, 4]);

    // By the time item k is deleted, the consumer has handled item k-1.
    let seen = bench.backend().seen_at_call.borrow().clone();
    for (index, seen) in seen.iter().enumerate() {
        assert!(*seen >= index, "item {} saw {} progress events", index + 1, seen);
    }
}

#[tokio::test]
async fn test_looped_session_delete_uses_snapshot_labels() {
    let (tx, mut rx) = events::channel();
    let mut bench = Workbench::with_events(MockBackend::new(), tx);
    bench.load_data().unwrap();

    let ids = vec!["p1".to_string(), "unknown-session-id".to_string()];
    let summary = bench.delete_sessions("/src/app", &ids).await;

    assert_eq!(summary.succeeded, 2);
    let labels: Vec<String> = std::iter::from_fn(|| rx.try_recv().ok())
        .filter_map(|e| match e {
            AppEvent::Progress(p) => Some(p.label),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["First", "unknown-"]);
}

#[tokio::test]
async fn test_native_batch_is_one_call() {
    let mut bench = Workbench::new(MockBackend::new().native());

    let ids = vec!["p1".to_string(), "p2".to_string()];
    let summary = bench.delete_sessions("/src/app", &ids).await;

    assert_eq!(summary, BatchSummary { succeeded: 2, failed: 0 });
    assert_eq!(deletes(&bench.backend().calls()), vec!["sessions /src/app p1,p2"]);
}

#[tokio::test]
async fn test_native_batch_failure_counts_every_id() {
    let mut bench = Workbench::new(MockBackend::new().native().failing("/src/app"));

    let ids = vec!["p1".to_string(), "p2".to_string()];
    let summary = bench.delete_sessions("/src/app", &ids).await;

    assert_eq!(summary, BatchSummary { succeeded: 0, failed: 2 });
}

#[tokio::test]
async fn test_select_filtered_then_delete_selected() {
    let mut bench = Workbench::new(MockBackend::new());
    let scope = SelectionScope::ProjectSessions("/src/app".to_string());

    // Zero-change sessions are hidden by default.
    let count = bench
        .select_sessions(&scope, &Criteria::default(), SelectTarget::Filtered)
        .unwrap();
    assert_eq!(count, 3);

    let summary = bench.delete_selected(&scope).await.unwrap();

    assert_eq!(summary.succeeded, 3);
    assert_eq!(
        deletes(&bench.backend().calls()),
        vec![
            "session /src/app p1",
            "session /src/app p2",
            "session /src/app p3"
        ]
    );
    assert!(bench.selection(&scope).is_none_or(Selection::is_empty));
}

#[tokio::test]
async fn test_workspace_sessions_delete_in_their_workspace() {
    let mut bench = Workbench::new(MockBackend::new());
    let scope = SelectionScope::WorkspaceSessions("ws-multi-0001".to_string());
    bench.selection_mut(&scope).toggle("m1");

    let summary = bench.delete_selected(&scope).await.unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(
        deletes(&bench.backend().calls()),
        vec!["workspace-sessions ws-multi-0001 m1"]
    );
}

#[tokio::test]
async fn test_workspace_native_batch_is_one_call() {
    let mut bench = Workbench::new(MockBackend::new().native());
    let scope = SelectionScope::WorkspaceSessions("ws-multi-0001".to_string());
    bench.selection_mut(&scope).toggle("m1");
    bench.selection_mut(&scope).toggle("m2");

    let summary = bench.delete_selected(&scope).await.unwrap();

    assert_eq!(summary, BatchSummary { succeeded: 2, failed: 0 });
    assert_eq!(
        deletes(&bench.backend().calls()),
        vec!["workspace-sessions ws-multi-0001 m1,m2"]
    );
}

#[test]
fn test_single_session_delete_routes_by_scope() {
    let mut bench = Workbench::new(MockBackend::new());

    let project = SelectionScope::ProjectSessions("/src/app".to_string());
    let workspace = SelectionScope::WorkspaceSessions("ws-multi-0001".to_string());
    assert_eq!(bench.delete_session_in(&project, "p1").unwrap(), 1);
    assert_eq!(bench.delete_session_in(&workspace, "m1").unwrap(), 1);

    assert_eq!(
        deletes(&bench.backend().calls()),
        vec!["session /src/app p1", "workspace-sessions ws-multi-0001 m1"]
    );

    let err = bench
        .delete_session_in(&SelectionScope::ProjectList, "p1")
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_criteria_change_clears_session_selection() {
    let mut bench = Workbench::new(MockBackend::new());
    let scope = SelectionScope::ProjectSessions("/src/app".to_string());

    bench
        .select_sessions(&scope, &Criteria::default(), SelectTarget::Filtered)
        .unwrap();
    assert_eq!(bench.selection(&scope).unwrap().len(), 3);

    // Page changes keep the selection
    let next_page = Criteria {
        page: 2,
        ..Default::default()
    };
    bench.set_criteria(&scope, next_page).unwrap();
    assert_eq!(bench.selection(&scope).unwrap().len(), 3);
    assert_eq!(bench.criteria(&scope).unwrap().page, 2);

    let searched = Criteria {
        search_term: "first".to_string(),
        ..Default::default()
    };
    bench.set_criteria(&scope, searched).unwrap();
    assert!(bench.selection(&scope).unwrap().is_empty());
    assert_eq!(bench.criteria(&scope).unwrap().page, 1);

    bench.selection_mut(&scope).toggle("p1");
    assert_eq!(bench.selection(&scope).unwrap().to_vec(), vec!["p1"]);

    let err = bench
        .set_criteria(&SelectionScope::ProjectList, Criteria::default())
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_delete_reload_clears_other_selections() {
    let mut bench = Workbench::new(MockBackend::new());
    let sessions = SelectionScope::ProjectSessions("/src/app".to_string());
    bench.selection_mut(&sessions).toggle("p2");
    bench.selection_mut(&SelectionScope::ProjectList).toggle("/src/lib");

    bench.delete_project("/src/other").unwrap();

    assert!(bench.selection(&sessions).unwrap().is_empty());
    assert!(bench.selection(&SelectionScope::ProjectList).is_none());
}

#[tokio::test]
async fn test_empty_selection_deletes_nothing() {
    let mut bench = Workbench::new(MockBackend::new());

    let summary = bench
        .delete_selected(&SelectionScope::ProjectList)
        .await
        .unwrap();

    assert_eq!(summary, BatchSummary::default());
    assert!(bench.backend().calls().is_empty());
}

#[tokio::test]
async fn test_workspace_list_selection_uses_labels() {
    let (tx, mut rx) = events::channel();
    let mut bench = Workbench::with_events(MockBackend::new(), tx);
    bench.load_data().unwrap();

    let scope = SelectionScope::WorkspaceList;
    bench.selection_mut(&scope).toggle("ws-multi-0001");
    bench.selection_mut(&scope).toggle("ws-gone-123456");
    bench.delete_selected(&scope).await.unwrap();

    let labels: Vec<String> = std::iter::from_fn(|| rx.try_recv().ok())
        .filter_map(|e| match e {
            AppEvent::Progress(p) => Some(p.label),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["ws-gone-", "api"]);
}

#[test]
fn test_single_delete_surfaces_error_and_reloads_on_success() {
    let mut bench = Workbench::new(MockBackend::new().failing("/src/lib"));

    let err = bench.delete_project("/src/lib").unwrap_err();
    assert_eq!(err.to_string(), "Backend error: cannot delete /src/lib");
    assert!(bench.cached_snapshot().is_none());

    assert_eq!(bench.delete_project("/src/app").unwrap(), 1);
    assert!(bench.cached_snapshot().is_some());
}

#[test]
fn test_deleting_trash_id_on_empty_trash_is_noop() {
    let mut bench = Workbench::new(MockBackend::new());

    assert!(!bench.delete_trash_item(42).unwrap());
    assert_eq!(bench.clear_trash().unwrap(), 0);
    assert!(bench.list_trash().unwrap().is_empty());
}

#[test]
fn test_select_page_on_unknown_project_is_not_found() {
    let mut bench = Workbench::new(MockBackend::new());
    let scope = SelectionScope::ProjectSessions("/nowhere".to_string());

    let err = bench
        .select_sessions(&scope, &Criteria::default(), SelectTarget::Page)
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
