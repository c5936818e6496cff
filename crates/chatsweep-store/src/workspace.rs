use chatsweep_core::uri_to_path;
use chrono::{TimeZone, Utc};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::Result;

pub(crate) const STATE_DB_FILE: &str = "state.vscdb";
const WORKSPACE_JSON: &str = "workspace.json";

// Multi-root workspace files live under a directory named by creation time (epoch ms)
static TIMESTAMP_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{11,}$").expect("valid timestamp regex"));

/// What a workspaceStorage entry was opened on.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceTarget {
    /// A single folder, by path.
    Folder(String),
    /// A multi-root `.code-workspace` file and the folders it lists.
    MultiRoot {
        file: PathBuf,
        projects: Vec<String>,
        created_at: String,
    },
    /// No readable `workspace.json`, or neither key present.
    Unknown,
}

/// One `workspaceStorage/<id>` directory.
#[derive(Debug, Clone)]
pub struct WorkspaceEntry {
    pub id: String,
    pub dir: PathBuf,
    pub target: WorkspaceTarget,
}

#[derive(Deserialize)]
struct WorkspaceJson {
    folder: Option<String>,
    workspace: Option<String>,
}

#[derive(Deserialize)]
struct CodeWorkspace {
    #[serde(default)]
    folders: Vec<CodeWorkspaceFolder>,
}

#[derive(Deserialize)]
struct CodeWorkspaceFolder {
    path: Option<String>,
    uri: Option<String>,
}

impl WorkspaceEntry {
    pub fn load(dir: &Path) -> Self {
        let id = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let target = match read_json::<WorkspaceJson>(&dir.join(WORKSPACE_JSON)) {
            Some(WorkspaceJson {
                folder: Some(folder),
                ..
            }) => WorkspaceTarget::Folder(uri_to_path(&folder)),
            Some(WorkspaceJson {
                workspace: Some(workspace),
                ..
            }) => {
                let file = PathBuf::from(uri_to_path(&workspace));
                let created_at = creation_label(&file);
                let projects = read_multi_root_folders(&file);
                WorkspaceTarget::MultiRoot {
                    file,
                    projects,
                    created_at,
                }
            }
            _ => WorkspaceTarget::Unknown,
        };

        Self {
            id,
            dir: dir.to_path_buf(),
            target,
        }
    }

    pub fn state_db(&self) -> PathBuf {
        self.dir.join(STATE_DB_FILE)
    }

    pub fn has_state_db(&self) -> bool {
        self.state_db().is_file()
    }

    pub fn folder(&self) -> Option<&str> {
        match &self.target {
            WorkspaceTarget::Folder(path) => Some(path),
            _ => None,
        }
    }

    pub fn projects(&self) -> Vec<String> {
        match &self.target {
            WorkspaceTarget::Folder(path) => vec![path.clone()],
            WorkspaceTarget::MultiRoot { projects, .. } => projects.clone(),
            WorkspaceTarget::Unknown => Vec::new(),
        }
    }

    pub fn is_multi_project(&self) -> bool {
        matches!(self.target, WorkspaceTarget::MultiRoot { .. })
    }

    pub fn created_at(&self) -> &str {
        match &self.target {
            WorkspaceTarget::MultiRoot { created_at, .. } => created_at,
            _ => "",
        }
    }

    /// Whether sessions of `project_path` live in this entry's database.
    pub fn covers(&self, project_path: &str) -> bool {
        match &self.target {
            WorkspaceTarget::Folder(path) => path == project_path,
            WorkspaceTarget::MultiRoot { projects, .. } => projects.iter().any(|p| p == project_path),
            WorkspaceTarget::Unknown => false,
        }
    }

    /// Project path recorded on trash rows for sessions removed from this entry.
    pub fn trash_label(&self) -> String {
        match self.folder() {
            Some(path) => path.to_string(),
            None => format!("[workspace] {}", self.id),
        }
    }
}

/// Every entry directory under `workspaceStorage`, ordered by id.
pub(crate) fn read_entries(workspace_storage: &Path) -> Result<Vec<WorkspaceEntry>> {
    if !workspace_storage.is_dir() {
        tracing::debug!(path = %workspace_storage.display(), "workspaceStorage missing");
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(workspace_storage)? {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable workspace entry");
                continue;
            }
        };
        if path.is_dir() {
            entries.push(WorkspaceEntry::load(&path));
        }
    }
    entries.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(entries)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Option<T> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "skipping malformed JSON");
            None
        }
    }
}

fn read_multi_root_folders(file: &Path) -> Vec<String> {
    read_json::<CodeWorkspace>(file)
        .map(|ws| {
            ws.folders
                .into_iter()
                .filter_map(|f| f.path.or(f.uri))
                .map(|p| uri_to_path(&p))
                .collect()
        })
        .unwrap_or_default()
}

fn creation_label(file: &Path) -> String {
    let path = file.to_string_lossy();
    path.split('/')
        .find(|segment| TIMESTAMP_SEGMENT.is_match(segment))
        .and_then(|segment| segment.parse::<i64>().ok())
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatsweep_testing::{ComposerSpec, CursorFixture};
    use tempfile::TempDir;

    #[test]
    fn test_folder_entry() {
        let dir = TempDir::new().unwrap();
        let fixture = CursorFixture::new(dir.path().join("User")).unwrap();
        fixture
            .add_folder_workspace("ws1", "/home/me/My Project", &[ComposerSpec::new("a")])
            .unwrap();

        let entry = WorkspaceEntry::load(&fixture.workspace_dir("ws1"));

        assert_eq!(entry.id, "ws1");
        assert_eq!(entry.folder(), Some("/home/me/My Project"));
        assert!(entry.covers("/home/me/My Project"));
        assert!(entry.has_state_db());
        assert_eq!(entry.trash_label(), "/home/me/My Project");
    }

    #[test]
    fn test_multi_root_entry() {
        let dir = TempDir::new().unwrap();
        let fixture = CursorFixture::new(dir.path().join("User")).unwrap();
        fixture
            .add_multi_root_workspace("ws2", 1735725600000, &["/src/api", "/src/web"], &[])
            .unwrap();

        let entry = WorkspaceEntry::load(&fixture.workspace_dir("ws2"));

        assert!(entry.is_multi_project());
        assert_eq!(entry.projects(), vec!["/src/api", "/src/web"]);
        assert_eq!(entry.created_at(), "2025-01-01 10:00");
        assert!(entry.covers("/src/web"));
        assert_eq!(entry.trash_label(), "[workspace] ws2");
    }

    #[test]
    fn test_missing_workspace_json_is_unknown() {
        let dir = TempDir::new().unwrap();
        let ws = dir.path().join("orphan");
        fs::create_dir_all(&ws).unwrap();

        let entry = WorkspaceEntry::load(&ws);

        assert_eq!(entry.target, WorkspaceTarget::Unknown);
        assert!(entry.projects().is_empty());
        assert!(!entry.covers(""));
    }

    #[test]
    fn test_read_entries_on_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(read_entries(&dir.path().join("absent")).unwrap().is_empty());
    }
}
