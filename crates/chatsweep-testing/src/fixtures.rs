//! Fixtures for fake IDE storage.
//!
//! Provides utilities to:
//! - Lay out `workspaceStorage/<id>/{workspace.json,state.vscdb}` entries
//! - Write composer lists in the shape the IDE stores them
//! - Seed `cursorDiskKV` bubble and checkpoint rows
//! - Create the global state database and multi-root workspace files

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

const COMPOSER_KEY: &str = "composer.composerData";

/// One composer entry as the IDE writes it into `allComposers`.
#[derive(Debug, Clone)]
pub struct ComposerSpec {
    pub id: String,
    pub kind: String,
    pub name: Option<String>,
    pub mode: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub files_changed: u64,
    pub context_usage: Option<f64>,
    pub branch: Option<String>,
    pub archived: bool,
    pub subtitle: Option<String>,
    pub overrides: Vec<(String, Value)>,
}

impl ComposerSpec {
    /// A `head` agent composer with no changes.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: "head".to_string(),
            name: Some(format!("Session {}", id)),
            mode: Some("agent".to_string()),
            created_at_ms: 1_735_725_600_000,
            updated_at_ms: 1_735_729_200_000,
            lines_added: 0,
            lines_removed: 0,
            files_changed: 0,
            context_usage: None,
            branch: None,
            archived: false,
            subtitle: None,
            overrides: Vec::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn unnamed(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn lines(mut self, added: u64, removed: u64) -> Self {
        self.lines_added = added;
        self.lines_removed = removed;
        self
    }

    pub fn files(mut self, files_changed: u64) -> Self {
        self.files_changed = files_changed;
        self
    }

    pub fn updated_at(mut self, ms: i64) -> Self {
        self.updated_at_ms = ms;
        self
    }

    pub fn created_at(mut self, ms: i64) -> Self {
        self.created_at_ms = ms;
        self
    }

    /// Fraction of the context window, as the IDE stores it.
    pub fn context_usage(mut self, fraction: f64) -> Self {
        self.context_usage = Some(fraction);
        self
    }

    pub fn branch(mut self, branch: &str) -> Self {
        self.branch = Some(branch.to_string());
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    pub fn subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    /// Store `value` under `key` verbatim, replacing the generated field.
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.overrides.push((key.to_string(), value));
        self
    }

    pub fn to_json(&self) -> Value {
        let mut value = json!({
            "type": self.kind,
            "composerId": self.id,
            "createdAt": self.created_at_ms,
            "lastUpdatedAt": self.updated_at_ms,
            "totalLinesAdded": self.lines_added,
            "totalLinesRemoved": self.lines_removed,
            "filesChangedCount": self.files_changed,
            "isArchived": self.archived,
        });

        let object = value
            .as_object_mut()
            .expect("composer literal is an object");
        if let Some(name) = &self.name {
            object.insert("name".to_string(), json!(name));
        }
        if let Some(mode) = &self.mode {
            object.insert("unifiedMode".to_string(), json!(mode));
        }
        if let Some(fraction) = self.context_usage {
            object.insert("contextUsagePercent".to_string(), json!(fraction));
        }
        if let Some(branch) = &self.branch {
            object.insert("createdOnBranch".to_string(), json!(branch));
        }
        if let Some(subtitle) = &self.subtitle {
            object.insert("subtitle".to_string(), json!(subtitle));
        }
        for (key, field) in &self.overrides {
            object.insert(key.clone(), field.clone());
        }
        value
    }
}

/// Fake IDE `User` directory.
pub struct CursorFixture {
    user_dir: PathBuf,
}

impl CursorFixture {
    /// Create the directory skeleton under `user_dir`.
    pub fn new(user_dir: impl Into<PathBuf>) -> Result<Self> {
        let user_dir = user_dir.into();
        for sub in ["workspaceStorage", "globalStorage", "History"] {
            fs::create_dir_all(user_dir.join(sub))
                .with_context(|| format!("Failed to create {}", sub))?;
        }
        Ok(Self { user_dir })
    }

    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    pub fn workspace_dir(&self, ws_id: &str) -> PathBuf {
        self.user_dir.join("workspaceStorage").join(ws_id)
    }

    pub fn state_db(&self, ws_id: &str) -> PathBuf {
        self.workspace_dir(ws_id).join("state.vscdb")
    }

    /// Single-folder workspace holding the given composers.
    pub fn add_folder_workspace(
        &self,
        ws_id: &str,
        project_path: &str,
        composers: &[ComposerSpec],
    ) -> Result<PathBuf> {
        let folder_uri = format!("file://{}", project_path.replace(' ', "%20"));
        self.write_workspace_json(ws_id, &json!({ "folder": folder_uri }))?;
        self.write_state_db(ws_id, composers)
    }

    /// Multi-root workspace. The `.code-workspace` file is placed under
    /// `<user dir>/../Workspaces/<created_ms>/workspace.json`.
    pub fn add_multi_root_workspace(
        &self,
        ws_id: &str,
        created_ms: i64,
        folders: &[&str],
        composers: &[ComposerSpec],
    ) -> Result<PathBuf> {
        let root = self
            .user_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.user_dir.clone());
        let ws_file_dir = root.join("Workspaces").join(created_ms.to_string());
        fs::create_dir_all(&ws_file_dir)?;
        let ws_file = ws_file_dir.join("workspace.json");

        let entries: Vec<Value> = folders
            .iter()
            .enumerate()
            .map(|(i, folder)| {
                // Mix both spellings the IDE uses
                if i % 2 == 0 {
                    json!({ "path": folder })
                } else {
                    json!({ "uri": format!("file://{}", folder) })
                }
            })
            .collect();
        fs::write(&ws_file, serde_json::to_string_pretty(&json!({ "folders": entries }))?)?;

        let ws_uri = format!("file://{}", ws_file.display());
        self.write_workspace_json(ws_id, &json!({ "workspace": ws_uri }))?;
        self.write_state_db(ws_id, composers)
    }

    /// Workspace entry with a `workspace.json` but no state database.
    pub fn add_workspace_without_db(&self, ws_id: &str, project_path: &str) -> Result<()> {
        let folder_uri = format!("file://{}", project_path);
        self.write_workspace_json(ws_id, &json!({ "folder": folder_uri }))
    }

    /// Seed `cursorDiskKV` with bubble and checkpoint rows for a composer.
    pub fn add_conversation_rows(&self, ws_id: &str, composer_id: &str, count: usize) -> Result<()> {
        let conn = Connection::open(self.state_db(ws_id))?;
        for i in 0..count {
            conn.execute(
                "INSERT INTO cursorDiskKV (key, value) VALUES (?1, ?2)",
                params![format!("bubbleId:{}:{}", composer_id, i), "{}"],
            )?;
            conn.execute(
                "INSERT INTO cursorDiskKV (key, value) VALUES (?1, ?2)",
                params![format!("checkpointId:{}:{}", composer_id, i), "{}"],
            )?;
        }
        Ok(())
    }

    /// Global state database with a few rows per key family.
    pub fn write_global_db(&self) -> Result<PathBuf> {
        let path = self.user_dir.join("globalStorage/state.vscdb");
        let conn = Connection::open(&path)?;
        create_tables(&conn)?;

        conn.execute(
            "INSERT INTO ItemTable (key, value) VALUES ('workbench.theme', 'dark')",
            [],
        )?;
        let kv_rows = [
            ("bubbleId:c1:0", "0123456789"),
            ("bubbleId:c1:1", "01234"),
            ("composerData:c1", "{}"),
            ("checkpointId:c1:0", "ab"),
            ("agentKv:blob", "abcdef"),
        ];
        for (key, value) in kv_rows {
            conn.execute(
                "INSERT INTO cursorDiskKV (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        Ok(path)
    }

    /// Write a file of `size` bytes relative to the user directory.
    pub fn write_file(&self, relative: &str, size: usize) -> Result<()> {
        let path = self.user_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, vec![b'x'; size])?;
        Ok(())
    }

    /// Composer ids currently stored for a workspace, in stored order.
    pub fn composer_ids(&self, ws_id: &str) -> Result<Vec<String>> {
        let conn = Connection::open(self.state_db(ws_id))?;
        let raw: String = conn.query_row(
            "SELECT value FROM ItemTable WHERE key = ?1",
            [COMPOSER_KEY],
            |row| row.get(0),
        )?;
        let data: Value = serde_json::from_str(&raw)?;
        Ok(data["allComposers"]
            .as_array()
            .map(|list| {
                list.iter()
                    .filter_map(|c| c["composerId"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// All `cursorDiskKV` keys of a workspace database, sorted.
    pub fn disk_kv_keys(&self, ws_id: &str) -> Result<Vec<String>> {
        let conn = Connection::open(self.state_db(ws_id))?;
        let mut stmt = conn.prepare("SELECT key FROM cursorDiskKV ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(keys)
    }

    fn write_workspace_json(&self, ws_id: &str, value: &Value) -> Result<()> {
        let dir = self.workspace_dir(ws_id);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("workspace.json"), serde_json::to_string(value)?)?;
        Ok(())
    }

    fn write_state_db(&self, ws_id: &str, composers: &[ComposerSpec]) -> Result<PathBuf> {
        let path = self.state_db(ws_id);
        let conn = Connection::open(&path)?;
        create_tables(&conn)?;

        let all: Vec<Value> = composers.iter().map(ComposerSpec::to_json).collect();
        let data = json!({ "allComposers": all, "selectedComposerIds": [] });
        conn.execute(
            "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)",
            params![COMPOSER_KEY, serde_json::to_string(&data)?],
        )?;
        Ok(path)
    }
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB);
        CREATE TABLE IF NOT EXISTS cursorDiskKV (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB);
        "#,
    )?;
    Ok(())
}
