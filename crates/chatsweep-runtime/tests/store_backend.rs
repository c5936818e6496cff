use chatsweep_engine::{Criteria, SelectionScope};
use chatsweep_runtime::{BatchSummary, Config, SelectTarget, StoreBackend, Workbench};
use chatsweep_testing::{ComposerSpec, CursorFixture};
use tempfile::TempDir;

struct Setup {
    _dir: TempDir,
    fx: CursorFixture,
    bench: Workbench<StoreBackend>,
}

fn setup(native_batch: bool) -> Setup {
    let dir = TempDir::new().unwrap();
    let fx = CursorFixture::new(dir.path().join("Cursor").join("User")).unwrap();
    fx.add_folder_workspace(
        "ws-app",
        "/src/app",
        &[
            ComposerSpec::new("a").lines(10, 1).files(1),
            ComposerSpec::new("b").lines(3, 0).files(2),
            ComposerSpec::new("idle"),
        ],
    )
    .unwrap();
    fx.add_folder_workspace("ws-lib", "/src/lib", &[ComposerSpec::new("l").lines(1, 0)])
        .unwrap();

    let data_dir = dir.path().join("data");
    let config = Config {
        native_batch,
        ..Default::default()
    };
    let paths = config
        .resolve_paths(&data_dir, Some(fx.user_dir()))
        .unwrap();
    let backend = StoreBackend::open(&paths)
        .unwrap()
        .with_native_batch(config.native_batch);

    Setup {
        _dir: dir,
        fx,
        bench: Workbench::new(backend),
    }
}

#[tokio::test]
async fn test_project_batch_with_missing_project() {
    let mut s = setup(true);
    s.bench.load_data().unwrap();

    let targets = vec![
        "/src/app".to_string(),
        "/src/missing".to_string(),
        "/src/lib".to_string(),
    ];
    let summary = s.bench.delete_projects(&targets).await;

    assert_eq!(summary, BatchSummary { succeeded: 2, failed: 1 });
    assert!(s.fx.composer_ids("ws-app").unwrap().is_empty());
    assert_eq!(s.bench.list_trash().unwrap().len(), 4);

    let snapshot = s.bench.snapshot().unwrap();
    assert!(snapshot.projects.is_empty());
}

#[tokio::test]
async fn test_selected_sessions_land_in_trash() {
    for native in [true, false] {
        let mut s = setup(native);
        let scope = SelectionScope::ProjectSessions("/src/app".to_string());

        let selected = s
            .bench
            .select_sessions(&scope, &Criteria::default(), SelectTarget::Page)
            .unwrap();
        assert_eq!(selected, 2);

        let summary = s.bench.delete_selected(&scope).await.unwrap();
        assert_eq!(summary.succeeded, 2, "native={}", native);

        assert_eq!(s.fx.composer_ids("ws-app").unwrap(), vec!["idle"]);
        let mut trashed: Vec<String> = s
            .bench
            .list_trash()
            .unwrap()
            .into_iter()
            .map(|t| t.chat_id)
            .collect();
        trashed.sort();
        assert_eq!(trashed, vec!["a", "b"]);
    }
}

#[test]
fn test_trash_lives_in_data_dir() {
    let mut s = setup(true);

    s.bench.delete_session("/src/lib", "l").unwrap();

    let trash = s.bench.list_trash().unwrap();
    assert_eq!(trash.len(), 1);
    assert!(s.bench.delete_trash_item(trash[0].id).unwrap());
    assert!(!s.bench.delete_trash_item(trash[0].id).unwrap());
    assert!(!s.fx.user_dir().join("trash.db").exists());
}

#[test]
fn test_app_version_is_crate_version() {
    let s = setup(true);
    assert_eq!(s.bench.app_version().unwrap(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_workspace_session_delete_reaches_multi_root_db() {
    for native in [true, false] {
        let mut s = setup(native);
        s.fx.add_folder_workspace("ws-api", "/src/api", &[ComposerSpec::new("s1")])
            .unwrap();
        s.fx.add_multi_root_workspace(
            "ws-multi",
            1735725600000,
            &["/src/api", "/src/web"],
            &[ComposerSpec::new("s2"), ComposerSpec::new("s3")],
        )
        .unwrap();

        let scope = SelectionScope::WorkspaceSessions("ws-multi".to_string());
        s.bench.selection_mut(&scope).toggle("s2");
        let summary = s.bench.delete_selected(&scope).await.unwrap();

        assert_eq!(summary, BatchSummary { succeeded: 1, failed: 0 });
        assert_eq!(s.fx.composer_ids("ws-multi").unwrap(), vec!["s3"], "native={}", native);
        assert_eq!(s.fx.composer_ids("ws-api").unwrap(), vec!["s1"]);

        assert_eq!(s.bench.delete_session_in(&scope, "s3").unwrap(), 1);
        assert!(s.fx.composer_ids("ws-multi").unwrap().is_empty());
    }
}
