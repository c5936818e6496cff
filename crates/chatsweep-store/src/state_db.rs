use rusqlite::{Connection, OpenFlags, OptionalExtension};
use serde_json::Value;
use std::path::Path;

use crate::composer::COMPOSER_DATA_KEY;
use crate::Result;

/// A workspace `state.vscdb` opened for reading or rewriting its composer list.
pub(crate) struct StateDb {
    conn: Connection,
}

impl StateDb {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        Ok(Self { conn })
    }

    pub fn open_read_only(db_path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    /// The stored composer document, or `None` when the key is absent.
    pub fn read_composer_doc(&self) -> Result<Option<Value>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM ItemTable WHERE key = ?1",
                [COMPOSER_DATA_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn write_composer_doc(&self, doc: &Value) -> Result<()> {
        self.conn.execute(
            "UPDATE ItemTable SET value = ?1 WHERE key = ?2",
            [serde_json::to_string(doc)?.as_str(), COMPOSER_DATA_KEY],
        )?;
        Ok(())
    }

    /// Drop the bubble and checkpoint rows of one composer. Returns rows removed.
    pub fn purge_conversation(&self, composer_id: &str) -> Result<usize> {
        let mut removed = 0;
        for family in ["bubbleId", "checkpointId"] {
            removed += self.conn.execute(
                "DELETE FROM cursorDiskKV WHERE key LIKE ?1",
                [format!("{}:{}:%", family, composer_id)],
            )?;
        }
        Ok(removed)
    }
}
