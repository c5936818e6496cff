use chatsweep_types::TrashItem;
use chrono::Utc;
use rusqlite::{params, Connection};
use serde_json::Value;
use std::path::Path;

use crate::composer::{composer_id, RawComposer};
use crate::Result;

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

/// Soft-deleted sessions, kept until purged.
///
/// Row ids come from `AUTOINCREMENT`, so they are never reused after a purge.
pub struct TrashDatabase {
    conn: Connection,
}

impl TrashDatabase {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;

        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS trash (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                chat_id TEXT NOT NULL,
                chat_name TEXT,
                project_path TEXT,
                mode TEXT,
                lines_added INTEGER DEFAULT 0,
                lines_removed INTEGER DEFAULT 0,
                files_changed INTEGER DEFAULT 0,
                deleted_at TEXT NOT NULL,
                original_data TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_trash_deleted_at ON trash(deleted_at DESC);
            "#,
        )?;

        self.conn
            .execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

        Ok(())
    }

    /// Record composers in one transaction. Returns the number of rows written.
    pub fn insert_composers(&self, composers: &[&Value], project_path: &str) -> Result<usize> {
        let deleted_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let tx = self.conn.unchecked_transaction()?;

        for composer in composers {
            let raw = RawComposer::from_value(composer).unwrap_or_default();
            tx.execute(
                r#"
                INSERT INTO trash (chat_id, chat_name, project_path, mode, lines_added,
                                   lines_removed, files_changed, deleted_at, original_data)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    composer_id(composer).unwrap_or_default(),
                    raw.name(),
                    project_path,
                    raw.mode(),
                    raw.lines_added() as i64,
                    raw.lines_removed() as i64,
                    raw.files_changed() as i64,
                    &deleted_at,
                    serde_json::to_string(composer)?,
                ],
            )?;
        }

        tx.commit()?;
        Ok(composers.len())
    }

    /// Newest first; rows deleted in the same second keep insertion order reversed.
    pub fn list(&self) -> Result<Vec<TrashItem>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, chat_id, chat_name, project_path, mode, lines_added, lines_removed,
                   files_changed, deleted_at, original_data
            FROM trash
            ORDER BY deleted_at DESC, id DESC
            "#,
        )?;

        let items = stmt
            .query_map([], |row| {
                Ok(TrashItem {
                    id: row.get(0)?,
                    chat_id: row.get(1)?,
                    chat_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    project_path: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    mode: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    lines_added: row.get::<_, i64>(5)?.max(0) as u64,
                    lines_removed: row.get::<_, i64>(6)?.max(0) as u64,
                    files_changed: row.get::<_, i64>(7)?.max(0) as u64,
                    deleted_at: row.get(8)?,
                    original_data: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(items)
    }

    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM trash", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Purge everything. Returns the number of rows removed.
    pub fn clear(&self) -> Result<u64> {
        let removed = self.conn.execute("DELETE FROM trash", [])?;
        tracing::info!(removed, "trash cleared");
        Ok(removed as u64)
    }

    /// Purge one row. A missing id is not an error and returns `false`.
    pub fn delete(&self, trash_id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM trash WHERE id = ?1", [trash_id])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn composer(id: &str) -> Value {
        json!({
            "type": "head",
            "composerId": id,
            "name": format!("Session {}", id),
            "unifiedMode": "chat",
            "totalLinesAdded": 5,
            "totalLinesRemoved": 1,
            "filesChangedCount": 2
        })
    }

    #[test]
    fn test_insert_and_list() {
        let db = TrashDatabase::open_in_memory().unwrap();
        let a = composer("a");
        let b = composer("b");

        assert_eq!(db.insert_composers(&[&a, &b], "/p/app").unwrap(), 2);

        let items = db.list().unwrap();
        assert_eq!(items.len(), 2);
        // Same second: higher id first
        assert_eq!(items[0].chat_id, "b");
        assert_eq!(items[1].chat_id, "a");
        assert_eq!(items[1].chat_name, "Session a");
        assert_eq!(items[1].mode, "chat");
        assert_eq!(items[1].lines_added, 5);
        assert_eq!(items[1].project_path, "/p/app");

        let original: Value = serde_json::from_str(&items[1].original_data).unwrap();
        assert_eq!(original, a);
    }

    #[test]
    fn test_off_type_counter_keeps_identity() {
        let db = TrashDatabase::open_in_memory().unwrap();
        let composer = json!({
            "type": "head",
            "composerId": "real-id-123",
            "name": "Big refactor",
            "unifiedMode": "agent",
            "totalLinesAdded": 12.0,
            "filesChangedCount": 3
        });

        db.insert_composers(&[&composer], "/p/app").unwrap();

        let item = &db.list().unwrap()[0];
        assert_eq!(item.chat_id, "real-id-123");
        assert_eq!(item.chat_name, "Big refactor");
        assert_eq!(item.mode, "agent");
        assert_eq!(item.lines_added, 12);
        assert_eq!(item.files_changed, 3);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let db = TrashDatabase::open_in_memory().unwrap();
        let a = composer("a");
        db.insert_composers(&[&a], "/p").unwrap();
        let first = db.list().unwrap()[0].id;

        db.clear().unwrap();
        db.insert_composers(&[&a], "/p").unwrap();
        let second = db.list().unwrap()[0].id;

        assert!(second > first);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let db = TrashDatabase::open_in_memory().unwrap();
        assert!(!db.delete(42).unwrap());
        assert_eq!(db.clear().unwrap(), 0);
    }

    #[test]
    fn test_delete_and_clear() {
        let db = TrashDatabase::open_in_memory().unwrap();
        let a = composer("a");
        let b = composer("b");
        db.insert_composers(&[&a, &b], "/p").unwrap();

        let id = db.list().unwrap()[0].id;
        assert!(db.delete(id).unwrap());
        assert!(!db.delete(id).unwrap());
        assert_eq!(db.count().unwrap(), 1);

        assert_eq!(db.clear().unwrap(), 1);
        assert!(db.list().unwrap().is_empty());
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested/trash.db");

        let db = TrashDatabase::open(&path).unwrap();
        db.init_schema().unwrap();

        assert!(path.exists());
    }
}
