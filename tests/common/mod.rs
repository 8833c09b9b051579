//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB, a registered
//! creator, and a [`SegmentService`] whose user preferences are read from
//! the same database.

#![allow(dead_code)]

use std::sync::Arc;

use ms_core::{CreatorId, ItemId, SegmentAction, SegmentPreferences, SegmentType, UserId};
use ms_db::pool::{init_memory_pool, DbPool};
use ms_db::queries::users;
use mediaseg::{DbUserDirectory, Segment, SegmentService};

pub struct TestHarness {
    pub service: SegmentService,
    pub db: DbPool,
    pub creator: CreatorId,
}

impl TestHarness {
    /// Create a new harness with one registered creator.
    pub fn new() -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        let service = SegmentService::new(db.clone(), Arc::new(DbUserDirectory::new(db.clone())));
        let creator = service
            .register_creator(CreatorId::new(), "test-detector")
            .expect("failed to register creator")
            .id;
        Self {
            service,
            db,
            creator,
        }
    }

    /// Insert a user with the given preferences directly into the DB.
    pub fn create_user(&self, username: &str, prefs: SegmentPreferences) -> UserId {
        let conn = self.db.get().expect("failed to get connection");
        let user = users::create_user(&conn, username).expect("failed to create user");
        users::update_segment_preferences(&conn, user.id, &prefs)
            .expect("failed to set preferences");
        user.id
    }

    /// A valid segment owned by the harness creator.
    pub fn segment(&self, item: ItemId, t: SegmentType, index: u32, start: f64, end: f64) -> Segment {
        Segment {
            item_id: item,
            creator_id: self.creator,
            segment_type: t,
            type_index: index,
            start_secs: start,
            end_secs: end,
            action: SegmentAction::Auto,
        }
    }
}
