//! Segment creator registration.
//!
//! A creator must be registered before segments referencing it can be
//! stored. Removing a creator cascades to all of its segments through the
//! `segments.creator_id` foreign key.

use chrono::Utc;
use ms_core::{CreatorId, Error, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::models::SegmentCreator;

const COLS: &str = "id, name, created_at";

/// Register a creator under a caller-chosen ID.
///
/// Registration is idempotent: if the ID is already known the existing
/// record is returned unchanged.
pub fn register_creator(conn: &Connection, id: CreatorId, name: &str) -> Result<SegmentCreator> {
    let now = Utc::now().to_rfc3339();
    let inserted = conn
        .execute(
            "INSERT INTO segment_creators (id, name, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO NOTHING",
            rusqlite::params![id.to_string(), name, &now],
        )
        .map_err(|e| Error::database(e.to_string()))?;

    if inserted > 0 {
        tracing::info!(creator_id = %id, name, "Registered segment creator");
    }

    get_creator(conn, id)?.ok_or_else(|| Error::not_found("creator", id))
}

/// Get a creator by ID.
pub fn get_creator(conn: &Connection, id: CreatorId) -> Result<Option<SegmentCreator>> {
    let q = format!("SELECT {COLS} FROM segment_creators WHERE id = ?1");
    let result = conn.query_row(&q, [id.to_string()], SegmentCreator::from_row);
    match result {
        Ok(c) => Ok(Some(c)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all registered creators ordered by name.
pub fn list_creators(conn: &Connection) -> Result<Vec<SegmentCreator>> {
    let q = format!("SELECT {COLS} FROM segment_creators ORDER BY name ASC, id ASC");
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], SegmentCreator::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Delete a creator and, by cascade, every segment it produced.
/// Returns true if the creator existed.
pub fn delete_creator(conn: &Connection, id: CreatorId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM segment_creators WHERE id = ?1", [id.to_string()])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Delete a creator and report how many segments the cascade removed.
/// Returns `None` if the creator did not exist.
///
/// Counting and deleting share one write transaction so the count matches
/// what was actually removed.
pub fn remove_creator(conn: &Connection, id: CreatorId) -> Result<Option<i64>> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| Error::database(e.to_string()))?;

    let owned: i64 = tx
        .query_row(
            "SELECT COUNT(*) FROM segments WHERE creator_id = ?1",
            [id.to_string()],
            |row| row.get(0),
        )
        .map_err(|e| Error::database(e.to_string()))?;

    if !delete_creator(&tx, id)? {
        return Ok(None);
    }

    tx.commit().map_err(|e| Error::database(e.to_string()))?;
    Ok(Some(owned))
}
