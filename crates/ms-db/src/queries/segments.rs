//! Segment store: upsert by natural key, filtered lookup, scoped delete.

use ms_core::{CreatorId, Error, ItemId, Result, SegmentType};
use rusqlite::types::ToSql;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::models::Segment;
use crate::queries::is_constraint;

const COLS: &str = "item_id, creator_id, segment_type, type_index, start_secs, end_secs, action";

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Conjunction of optional predicates over segments.
///
/// An absent field is not applied. `slot` matches type and type index
/// together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentFilter {
    pub item: Option<ItemId>,
    pub creator: Option<CreatorId>,
    pub slot: Option<(SegmentType, u32)>,
}

impl SegmentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_item(item: ItemId) -> Self {
        Self::new().item(item)
    }

    pub fn for_creator(creator: CreatorId) -> Self {
        Self::new().creator(creator)
    }

    #[must_use]
    pub fn item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }

    #[must_use]
    pub fn creator(mut self, creator: CreatorId) -> Self {
        self.creator = Some(creator);
        self
    }

    #[must_use]
    pub fn slot(mut self, segment_type: SegmentType, type_index: u32) -> Self {
        self.slot = Some((segment_type, type_index));
        self
    }

    /// Whether the filter is narrow enough for a delete: it must name an
    /// item or a creator.
    pub fn is_scoped(&self) -> bool {
        self.item.is_some() || self.creator.is_some()
    }

    /// Render the `WHERE` clause (empty when nothing is applied) and its
    /// positional parameters.
    fn where_clause(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(item) = self.item {
            params.push(Box::new(item.to_string()));
            conditions.push(format!("item_id = ?{}", params.len()));
        }
        if let Some(creator) = self.creator {
            params.push(Box::new(creator.to_string()));
            conditions.push(format!("creator_id = ?{}", params.len()));
        }
        if let Some((segment_type, type_index)) = self.slot {
            params.push(Box::new(segment_type.as_str()));
            let type_param = params.len();
            params.push(Box::new(type_index));
            conditions.push(format!(
                "(segment_type = ?{type_param} AND type_index = ?{})",
                params.len()
            ));
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), params)
        }
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert a segment, or update `start_secs`, `end_secs` and `action` of the
/// segment already stored under the same `(item, type, type_index)` key.
///
/// The key columns and `creator_id` of an existing row are never changed.
/// Fails with `NotFound` if the creator is not registered, on the update
/// path as well as on insert.
pub fn upsert_segment(conn: &Connection, segment: &Segment) -> Result<Segment> {
    // The conflict branch never inserts, so the foreign key alone does not
    // guard updates. The EXISTS check covers both branches in one statement.
    let q = format!(
        "INSERT INTO segments ({COLS})
         SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7
         WHERE EXISTS (SELECT 1 FROM segment_creators WHERE id = ?2)
         ON CONFLICT(item_id, segment_type, type_index) DO UPDATE SET
            start_secs = excluded.start_secs,
            end_secs = excluded.end_secs,
            action = excluded.action
         RETURNING {COLS}"
    );

    let stored = conn
        .query_row(
            &q,
            rusqlite::params![
                segment.item_id.to_string(),
                segment.creator_id.to_string(),
                segment.segment_type.as_str(),
                segment.type_index,
                segment.start_secs,
                segment.end_secs,
                segment.action.as_str(),
            ],
            Segment::from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Error::not_found("creator", segment.creator_id),
            e if is_constraint(&e, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
                Error::not_found("creator", segment.creator_id)
            }
            e => Error::database(e.to_string()),
        })?;

    tracing::debug!(
        item_id = %stored.item_id,
        segment_type = %stored.segment_type,
        type_index = stored.type_index,
        "Upserted segment"
    );

    Ok(stored)
}

/// Upsert every segment in input order inside one transaction.
///
/// Either all rows are committed or, on the first failure, none are.
pub fn upsert_segments(conn: &Connection, segments: &[Segment]) -> Result<Vec<Segment>> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| Error::database(e.to_string()))?;

    let mut stored = Vec::with_capacity(segments.len());
    for segment in segments {
        stored.push(upsert_segment(&tx, segment)?);
    }

    tx.commit().map_err(|e| Error::database(e.to_string()))?;
    Ok(stored)
}

/// Delete every segment matching `filter` and return the removed rows.
///
/// The filter must name an item or a creator; a bare type/index filter or an
/// empty filter is rejected with `Error::Scope` and nothing is deleted.
pub fn delete_segments(conn: &Connection, filter: &SegmentFilter) -> Result<Vec<Segment>> {
    if !filter.is_scoped() {
        return Err(Error::Scope("unscoped delete".into()));
    }

    let (where_sql, params) = filter.where_clause();
    let q = format!("DELETE FROM segments{where_sql} RETURNING {COLS}");
    let mut deleted = collect(conn, &q, &params)?;
    deleted.sort_by_key(sort_key);
    Ok(deleted)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Return all segments matching `filter`, ordered by natural key.
pub fn query_segments(conn: &Connection, filter: &SegmentFilter) -> Result<Vec<Segment>> {
    let (where_sql, params) = filter.where_clause();
    let q = format!(
        "SELECT {COLS} FROM segments{where_sql}
         ORDER BY item_id ASC, segment_type ASC, type_index ASC"
    );
    collect(conn, &q, &params)
}

/// Count segments matching `filter`.
pub fn count_segments(conn: &Connection, filter: &SegmentFilter) -> Result<i64> {
    let (where_sql, params) = filter.where_clause();
    let q = format!("SELECT COUNT(*) FROM segments{where_sql}");
    let refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
    conn.query_row(&q, refs.as_slice(), |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))
}

fn collect(conn: &Connection, sql: &str, params: &[Box<dyn ToSql>]) -> Result<Vec<Segment>> {
    let refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(sql).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map(refs.as_slice(), Segment::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Same ordering as the `ORDER BY` used by [`query_segments`].
fn sort_key(segment: &Segment) -> (String, &'static str, u32) {
    (
        segment.item_id.to_string(),
        segment.segment_type.as_str(),
        segment.type_index,
    )
}
