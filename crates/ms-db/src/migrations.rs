//! Embedded SQL migrations and runner.
//!
//! Migrations are stored as `&str` constants and executed in order.  A
//! `schema_migrations` table tracks which versions have been applied.

use ms_core::{Error, Result};
use rusqlite::Connection;

/// V1: initial schema -- users with segment preferences, segment creators,
/// and the segments table keyed by (item, type, type index).
const V1_INITIAL: &str = r#"
-- Users and their per-type segment preferences
CREATE TABLE users (
    id                       TEXT PRIMARY KEY,
    username                 TEXT UNIQUE NOT NULL,
    segment_intro_action     TEXT NOT NULL DEFAULT 'auto',
    segment_outro_action     TEXT NOT NULL DEFAULT 'auto',
    segment_recap_action     TEXT NOT NULL DEFAULT 'auto',
    segment_preview_action   TEXT NOT NULL DEFAULT 'auto',
    segment_commercial_action TEXT NOT NULL DEFAULT 'auto',
    created_at               TEXT NOT NULL
);

-- Producers that are allowed to write segments
CREATE TABLE segment_creators (
    id         TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Timeline annotations
CREATE TABLE segments (
    item_id      TEXT NOT NULL,
    segment_type TEXT NOT NULL,
    type_index   INTEGER NOT NULL CHECK (type_index >= 0),
    creator_id   TEXT NOT NULL REFERENCES segment_creators(id) ON DELETE CASCADE,
    start_secs   REAL NOT NULL,
    end_secs     REAL NOT NULL,
    action       TEXT NOT NULL DEFAULT 'auto',
    CHECK (start_secs < end_secs),
    PRIMARY KEY (item_id, segment_type, type_index)
);

CREATE INDEX idx_segments_item    ON segments(item_id);
CREATE INDEX idx_segments_creator ON segments(creator_id);
"#;

/// Ordered list of (version, sql) pairs.
const MIGRATIONS: &[(i64, &str)] = &[(1, V1_INITIAL)];

/// Run all pending migrations on `conn`.
///
/// Creates the `schema_migrations` tracking table if it does not exist,
/// then applies each outstanding migration inside a transaction.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .map_err(|e| Error::database(format!("Failed to create schema_migrations: {e}")))?;

    for &(version, sql) in MIGRATIONS {
        let already: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?1",
                [version],
                |row| row.get(0),
            )
            .map_err(|e| Error::database(e.to_string()))?;

        if already {
            continue;
        }

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| Error::database(e.to_string()))?;

        tx.execute_batch(sql)
            .map_err(|e| Error::database(format!("Migration V{version} failed: {e}")))?;

        tx.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| Error::database(e.to_string()))?;

        tx.commit().map_err(|e| Error::database(e.to_string()))?;

        tracing::debug!(version, "Applied migration");
    }

    Ok(())
}
