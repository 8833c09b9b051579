//! The [`UserDirectory`] trait: where per-user segment preferences come from.

use ms_core::{Result, SegmentPreferences, UserId};
use ms_db::pool::{get_conn, DbPool};
use ms_db::queries::users;

/// Read-only source of per-type segment preferences.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
pub trait UserDirectory: Send + Sync {
    /// Preferences of `user`, or `None` if the user is unknown.
    fn segment_preferences(&self, user: UserId) -> Result<Option<SegmentPreferences>>;
}

/// [`UserDirectory`] backed by the `users` table.
#[derive(Clone)]
pub struct DbUserDirectory {
    db: DbPool,
}

impl DbUserDirectory {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

impl UserDirectory for DbUserDirectory {
    fn segment_preferences(&self, user: UserId) -> Result<Option<SegmentPreferences>> {
        let conn = get_conn(&self.db)?;
        users::get_segment_preferences(&conn, user)
    }
}
