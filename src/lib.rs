//! mediaseg - media segment store and playback action resolution
//!
//! This library crate re-exports the member crates and wires logging and
//! configuration together for embedding applications and integration tests.

pub mod telemetry;

pub use ms_core::config::Config;
pub use ms_core::{Error, Result};
pub use ms_db::models::{Segment, SegmentCreator};
pub use ms_db::SegmentFilter;
pub use ms_segments::{DbUserDirectory, ResolvedSegment, SegmentService, UserDirectory};

use std::sync::Arc;

/// Open the configured database and build a [`SegmentService`] whose user
/// preferences come from the same database.
pub fn open_service(config: &Config) -> Result<SegmentService> {
    for warning in config.validate() {
        tracing::warn!("config: {warning}");
    }

    let pool = ms_db::pool::init_pool(&config.database)?;
    let users = Arc::new(DbUserDirectory::new(pool.clone()));
    Ok(SegmentService::new(pool, users))
}
