//! The segment service: validation and storage for writes, per-user action
//! resolution for the player-facing read path.
//!
//! [`SegmentService`] is cheaply cloneable (a pool handle and an `Arc`) and
//! meant to be shared by concurrent request handlers. Each operation takes
//! its own pooled connection; every write runs as a single statement or a
//! single transaction.

use std::sync::Arc;

use ms_core::{CreatorId, Error, ItemId, Result, UserId};
use ms_db::models::{Segment, SegmentCreator};
use ms_db::pool::{get_conn, DbPool};
use ms_db::queries::{creators, segments};
use ms_db::SegmentFilter;

use crate::directory::UserDirectory;
use crate::resolve::ResolvedSegment;
use crate::validate::{validate, validate_all};

#[derive(Clone)]
pub struct SegmentService {
    db: DbPool,
    users: Arc<dyn UserDirectory>,
}

impl SegmentService {
    pub fn new(db: DbPool, users: Arc<dyn UserDirectory>) -> Self {
        Self { db, users }
    }

    /// Validate and upsert one segment, returning the stored record.
    pub fn create_or_update(&self, segment: &Segment) -> Result<Segment> {
        validate(segment).inspect_err(|e| {
            tracing::warn!(item_id = %segment.item_id, error = %e, "Rejected segment");
        })?;

        let conn = get_conn(&self.db)?;
        segments::upsert_segment(&conn, segment)
    }

    /// Validate every segment, then upsert them all in one transaction.
    ///
    /// Nothing is written unless every element is valid and every upsert
    /// succeeds.
    pub fn create_or_update_batch(&self, batch: &[Segment]) -> Result<Vec<Segment>> {
        validate_all(batch).inspect_err(|e| {
            tracing::warn!(count = batch.len(), error = %e, "Rejected segment batch");
        })?;

        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let conn = get_conn(&self.db)?;
        let stored = segments::upsert_segments(&conn, batch)?;
        tracing::info!(count = stored.len(), "Stored segment batch");
        Ok(stored)
    }

    /// Raw segments matching `filter`, with the creators' recommended
    /// actions untouched. Not for players; see
    /// [`SegmentService::list_with_resolved_action`].
    pub fn list(&self, filter: &SegmentFilter) -> Result<Vec<Segment>> {
        let conn = get_conn(&self.db)?;
        segments::query_segments(&conn, filter)
    }

    /// Segments of `item` with each action resolved for `user`.
    ///
    /// Fails with `NotFound` if the user is unknown.
    pub fn list_with_resolved_action(
        &self,
        user: UserId,
        item: ItemId,
    ) -> Result<Vec<ResolvedSegment>> {
        let prefs = self.users.segment_preferences(user)?.ok_or_else(|| {
            tracing::warn!(user_id = %user, "Segment preferences requested for unknown user");
            Error::not_found("user", user)
        })?;

        let conn = get_conn(&self.db)?;
        let found = segments::query_segments(&conn, &SegmentFilter::for_item(item))?;

        Ok(found
            .into_iter()
            .map(|segment| ResolvedSegment::new(segment, &prefs))
            .collect())
    }

    /// Delete segments matching `filter` and return what was removed.
    ///
    /// The filter must name an item or a creator.
    pub fn delete(&self, filter: &SegmentFilter) -> Result<Vec<Segment>> {
        if !filter.is_scoped() {
            tracing::warn!(?filter, "Refusing unscoped segment delete");
            return Err(Error::Scope("unscoped delete".into()));
        }

        let conn = get_conn(&self.db)?;
        let deleted = segments::delete_segments(&conn, filter)?;
        tracing::info!(?filter, count = deleted.len(), "Deleted segments");
        Ok(deleted)
    }

    /// Register a segment producer so its segments are accepted.
    /// Re-registering a known ID returns the existing record.
    pub fn register_creator(&self, id: CreatorId, name: &str) -> Result<SegmentCreator> {
        if id.is_nil() {
            return Err(Error::Validation("missing identity: creator_id is nil".into()));
        }
        if name.trim().is_empty() {
            return Err(Error::Validation("creator name is empty".into()));
        }

        let conn = get_conn(&self.db)?;
        creators::register_creator(&conn, id, name.trim())
    }

    pub fn list_creators(&self) -> Result<Vec<SegmentCreator>> {
        let conn = get_conn(&self.db)?;
        creators::list_creators(&conn)
    }

    /// Remove a creator together with all of its segments.
    /// Returns how many segments went with it.
    pub fn remove_creator(&self, id: CreatorId) -> Result<i64> {
        let conn = get_conn(&self.db)?;
        let owned = creators::remove_creator(&conn, id)?
            .ok_or_else(|| Error::not_found("creator", id))?;

        tracing::info!(creator_id = %id, segments = owned, "Removed segment creator");
        Ok(owned)
    }
}
