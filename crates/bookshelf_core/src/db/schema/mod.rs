//! Catalog schema declaration and idempotent creation.
//!
//! # Responsibility
//! - Declare `author`, `book` and the `author_book` association relation.
//! - Create missing structures without touching existing ones.
//!
//! # Invariants
//! - Steps are additive (`CREATE ... IF NOT EXISTS`) and strictly ordered by
//!   `version`; nothing here drops or alters a table.
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - `author_book` holds at most one row per `(author_id, book_id)` pair.

use crate::db::{ConnectionError, ConnectionResult};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

/// Tables the query engine relies on.
pub const CATALOG_TABLES: [&str; 3] = ["author", "book", "author_book"];

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_catalog.sql"),
}];

/// Returns the schema version this binary creates.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Creates every missing catalog structure on `conn`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the store was written by a newer binary.
/// - `Sqlite` when a creation statement fails; nothing is committed then.
pub fn ensure_schema(conn: &mut Connection) -> ConnectionResult<()> {
    let started_at = Instant::now();
    match apply_pending_steps(conn) {
        Ok(applied) => {
            info!(
                "event=schema_ensure module=db status=ok applied_steps={} version={} duration_ms={}",
                applied,
                latest_version(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=schema_ensure module=db status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn apply_pending_steps(conn: &mut Connection) -> ConnectionResult<usize> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(ConnectionError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > current_version)
        .collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", step.version))?;
    }
    tx.commit()?;

    Ok(pending.len())
}

fn current_user_version(conn: &Connection) -> ConnectionResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
