//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`.

use std::str::FromStr;

use ms_core::{CreatorId, ItemId, SegmentAction, SegmentPreferences, SegmentType, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

/// Parse a UUID-based ID from a text column.
fn parse_id<T: From<Uuid>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    let uuid = Uuid::parse_str(&s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(T::from(uuid))
}

/// Parse a lowercase enum (segment type or action) from a text column.
fn parse_enum<T>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = ms_core::Error>,
{
    let s: String = row.get(idx)?;
    s.parse().map_err(|e: ms_core::Error| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// A timed annotation on a media item.
///
/// `(item_id, segment_type, type_index)` is the natural key; `action` is the
/// creator's recommendation, not what a given user will see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub item_id: ItemId,
    pub creator_id: CreatorId,
    pub segment_type: SegmentType,
    #[serde(default)]
    pub type_index: u32,
    pub start_secs: f64,
    pub end_secs: f64,
    #[serde(default)]
    pub action: SegmentAction,
}

impl Segment {
    /// Build from a row selected as:
    /// item_id, creator_id, segment_type, type_index, start_secs, end_secs, action
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            item_id: parse_id(row, 0)?,
            creator_id: parse_id(row, 1)?,
            segment_type: parse_enum(row, 2)?,
            type_index: row.get(3)?,
            start_secs: row.get(4)?,
            end_secs: row.get(5)?,
            action: parse_enum(row, 6)?,
        })
    }
}

// ---------------------------------------------------------------------------
// SegmentCreator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentCreator {
    pub id: CreatorId,
    pub name: String,
    pub created_at: String,
}

impl SegmentCreator {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
        })
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub segment_preferences: SegmentPreferences,
    pub created_at: String,
}

impl User {
    /// Build from a row selected as:
    /// id, username, segment_intro_action, segment_outro_action,
    /// segment_recap_action, segment_preview_action,
    /// segment_commercial_action, created_at
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            username: row.get(1)?,
            segment_preferences: preferences_from_row(row, 2)?,
            created_at: row.get(7)?,
        })
    }
}

/// Read the five per-type action columns starting at `first`, in
/// intro, outro, recap, preview, commercial order.
pub(crate) fn preferences_from_row(
    row: &rusqlite::Row,
    first: usize,
) -> rusqlite::Result<SegmentPreferences> {
    Ok(SegmentPreferences {
        intro: parse_enum(row, first)?,
        outro: parse_enum(row, first + 1)?,
        recap: parse_enum(row, first + 2)?,
        preview: parse_enum(row, first + 3)?,
        commercial: parse_enum(row, first + 4)?,
    })
}
