//! Slot database layout migrations.
//!
//! # Responsibility
//! - List the `kv_slots` layout steps in the order they were introduced.
//! - Bring an older file up to date inside one transaction.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly one.
//! - The highest applied step is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SlotMigration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SLOT_MIGRATIONS: &[SlotMigration] = &[SlotMigration {
    version: 1,
    name: "kv_slots",
    sql: include_str!("0001_kv_slots.sql"),
}];

/// Layout version this binary writes.
pub fn latest_version() -> u32 {
    SLOT_MIGRATIONS.len() as u32
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer binary.
/// - `Sqlite` when any step fails; nothing from this call is kept.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let to = latest_version();
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let pending = pending_after(from);
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;
    Ok(())
}

fn pending_after(version: u32) -> &'static [SlotMigration] {
    let applied = (version as usize).min(SLOT_MIGRATIONS.len());
    &SLOT_MIGRATIONS[applied..]
}

#[cfg(test)]
mod tests {
    use super::{latest_version, pending_after, SLOT_MIGRATIONS};

    #[test]
    fn versions_are_contiguous_from_one() {
        for (index, step) in SLOT_MIGRATIONS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "step {}", step.name);
        }
        assert_eq!(latest_version(), SLOT_MIGRATIONS.len() as u32);
    }

    #[test]
    fn pending_steps_skip_applied_versions() {
        assert_eq!(pending_after(0).len(), SLOT_MIGRATIONS.len());
        assert!(pending_after(latest_version()).is_empty());
        assert!(pending_after(latest_version() + 5).is_empty());
    }
}
