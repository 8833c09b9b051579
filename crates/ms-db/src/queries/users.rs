//! User records and their per-type segment preferences.

use chrono::Utc;
use ms_core::{Error, Result, SegmentPreferences, UserId};
use rusqlite::Connection;

use crate::models::{preferences_from_row, User};
use crate::queries::is_constraint;

const COLS: &str = "id, username, segment_intro_action, segment_outro_action, \
                    segment_recap_action, segment_preview_action, \
                    segment_commercial_action, created_at";

/// Create a new user with all segment preferences set to `auto`.
pub fn create_user(conn: &Connection, username: &str) -> Result<User> {
    let id = UserId::new();
    let created_at = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![id.to_string(), username, created_at],
    )
    .map_err(|e| {
        if is_constraint(&e, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) {
            Error::Conflict(format!("Username '{username}' already exists"))
        } else {
            Error::database(e.to_string())
        }
    })?;

    Ok(User {
        id,
        username: username.to_string(),
        segment_preferences: SegmentPreferences::default(),
        created_at,
    })
}

/// Get a user by primary key.
pub fn get_user_by_id(conn: &Connection, id: UserId) -> Result<Option<User>> {
    let q = format!("SELECT {COLS} FROM users WHERE id = ?1");
    let result = conn.query_row(&q, [id.to_string()], User::from_row);
    match result {
        Ok(u) => Ok(Some(u)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Read only the segment preferences of a user. `None` if the user does
/// not exist.
pub fn get_segment_preferences(
    conn: &Connection,
    id: UserId,
) -> Result<Option<SegmentPreferences>> {
    let result = conn.query_row(
        "SELECT segment_intro_action, segment_outro_action, segment_recap_action,
                segment_preview_action, segment_commercial_action
         FROM users WHERE id = ?1",
        [id.to_string()],
        |row| preferences_from_row(row, 0),
    );
    match result {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Replace all five segment preferences of a user. Returns true if the user
/// exists.
pub fn update_segment_preferences(
    conn: &Connection,
    id: UserId,
    prefs: &SegmentPreferences,
) -> Result<bool> {
    let n = conn
        .execute(
            "UPDATE users SET
                segment_intro_action = ?1,
                segment_outro_action = ?2,
                segment_recap_action = ?3,
                segment_preview_action = ?4,
                segment_commercial_action = ?5
             WHERE id = ?6",
            rusqlite::params![
                prefs.intro.as_str(),
                prefs.outro.as_str(),
                prefs.recap.as_str(),
                prefs.preview.as_str(),
                prefs.commercial.as_str(),
                id.to_string(),
            ],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Delete a user by ID. Returns true if a row was deleted.
pub fn delete_user(conn: &Connection, id: UserId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM users WHERE id = ?1", [id.to_string()])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}
