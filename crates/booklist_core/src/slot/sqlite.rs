//! SQLite-backed durable slot.
//!
//! # Invariants
//! - Values live in the `kv_slots` table created by migration 1.
//! - `write` is a single upsert statement, so readers never see a torn value.

use super::{PersistenceSlot, SlotError, SlotResult};
use rusqlite::{params, Connection, OptionalExtension};

const SLOT_TABLE: &str = "kv_slots";

/// Slot storage on a migrated SQLite connection.
pub struct SqliteSlot<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlot<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the connection was not migrated.
    pub fn try_new(conn: &'conn Connection) -> SlotResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [SLOT_TABLE],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(SlotError::MissingRequiredTable(SLOT_TABLE));
        }
        Ok(Self { conn })
    }
}

impl PersistenceSlot for SqliteSlot<'_> {
    fn read(&self, key: &str) -> SlotResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> SlotResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear(&self, key: &str) -> SlotResult<()> {
        self.conn
            .execute("DELETE FROM kv_slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}
