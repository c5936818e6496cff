use chatsweep_store::Scanner;
use chatsweep_testing::{ComposerSpec, CursorFixture};
use tempfile::TempDir;

fn fixture() -> (TempDir, CursorFixture) {
    let dir = TempDir::new().unwrap();
    let fixture = CursorFixture::new(dir.path().join("User")).unwrap();
    (dir, fixture)
}

#[test]
fn test_projects_merge_by_path_and_skip_empty() {
    let (_dir, fx) = fixture();
    fx.add_folder_workspace("ws-a1", "/src/app", &[ComposerSpec::new("a1").lines(10, 2).files(1)])
        .unwrap();
    fx.add_folder_workspace("ws-a2", "/src/app", &[ComposerSpec::new("a2").lines(5, 0).files(3)])
        .unwrap();
    fx.add_folder_workspace("ws-big", "/src/big", &[ComposerSpec::new("b1").lines(100, 0)])
        .unwrap();
    fx.add_folder_workspace("ws-empty", "/src/empty", &[]).unwrap();

    let snapshot = Scanner::new(fx.user_dir()).analyze().unwrap();

    let paths: Vec<&str> = snapshot.projects.iter().map(|p| p.path.as_str()).collect();
    assert_eq!(paths, vec!["/src/big", "/src/app"]);

    let app = snapshot.find_project("/src/app").unwrap();
    assert_eq!(app.name, "app");
    assert_eq!(app.chat_count, 2);
    assert_eq!(app.lines_added, 15);
    assert_eq!(app.lines_removed, 2);
    assert_eq!(app.files_changed, 4);
    assert_eq!(app.chats.len() as u64, app.chat_count);
}

#[test]
fn test_workspaces_include_multi_root() {
    let (_dir, fx) = fixture();
    fx.add_folder_workspace("single", "/src/app", &[ComposerSpec::new("a").lines(1, 0)])
        .unwrap();
    fx.add_multi_root_workspace(
        "multi",
        1735725600000,
        &["/src/api", "/src/web"],
        &[ComposerSpec::new("m1").lines(50, 5), ComposerSpec::new("m2")],
    )
    .unwrap();

    let snapshot = Scanner::new(fx.user_dir()).analyze().unwrap();

    assert_eq!(snapshot.workspaces.len(), 2);
    let multi = snapshot.find_workspace("multi").unwrap();
    assert!(multi.is_multi_project);
    assert_eq!(multi.projects, vec!["/src/api", "/src/web"]);
    assert_eq!(multi.created_at, "2025-01-01 10:00");
    assert_eq!(multi.chat_count, 2);
    assert_eq!(multi.recent_chats.len(), 2);
    assert_eq!(snapshot.workspaces[0].id, "multi");

    // Multi-root workspaces are not projects
    assert!(snapshot.find_project("/src/api").is_none());
}

#[test]
fn test_overview_counts_modes() {
    let (_dir, fx) = fixture();
    fx.add_folder_workspace(
        "ws",
        "/src/app",
        &[
            ComposerSpec::new("a").lines(10, 30),
            ComposerSpec::new("b").mode("chat"),
            ComposerSpec::new("c").unnamed().mode("edit"),
            ComposerSpec::new("sub").kind("subComposer"),
        ],
    )
    .unwrap();

    let snapshot = Scanner::new(fx.user_dir()).analyze().unwrap();

    assert_eq!(snapshot.overview.total_projects, 1);
    assert_eq!(snapshot.overview.total_chats, 3);
    assert_eq!(snapshot.overview.net_lines, -20);
    assert_eq!(snapshot.overview.agent_mode_count, 1);
    assert_eq!(snapshot.overview.chat_mode_count, 2);
}

#[test]
fn test_storage_and_database_stats() {
    let (_dir, fx) = fixture();
    fx.write_global_db().unwrap();
    fx.write_file("History/abc/entry.txt", 2048).unwrap();
    fx.write_file("globalStorage/state.vscdb.backup", 10).unwrap();

    let scanner = Scanner::new(fx.user_dir());
    let storage = scanner.storage_info();

    assert_eq!(storage.history_size, 2048);
    assert_eq!(storage.history_size_human, "2.00 KB");
    assert_eq!(storage.state_vscdb_backup_size, 10);
    assert!(storage.state_vscdb_size > 0);
    assert_eq!(
        storage.total_size,
        storage.global_storage_size + storage.history_size + storage.workspace_storage_size
    );

    let db = scanner.database_stats().unwrap();
    assert_eq!(db.item_table_count, 1);
    assert_eq!(db.cursor_disk_kv_count, 5);
    assert_eq!(db.bubble_count, 2);
    assert_eq!(db.bubble_size, 15);
    assert_eq!(db.composer_count, 1);
    assert_eq!(db.checkpoint_count, 1);
    assert_eq!(db.agent_kv_count, 1);
    assert_eq!(db.agent_kv_size, 6);
}

#[test]
fn test_missing_directories_yield_empty_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = Scanner::new(dir.path().join("nowhere")).analyze().unwrap();

    assert!(snapshot.projects.is_empty());
    assert!(snapshot.workspaces.is_empty());
    assert_eq!(snapshot.storage.total_size, 0);
    assert_eq!(snapshot.database.item_table_count, 0);
}
