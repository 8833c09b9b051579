//! Segment validation, run before every write.

use ms_core::{Error, Result};
use ms_db::models::Segment;

/// Check a segment before it is written.
///
/// Rules, first failure wins:
/// 1. `start_secs < end_secs` (NaN on either side fails this too)
/// 2. neither `item_id` nor `creator_id` is the nil ID
pub fn validate(segment: &Segment) -> Result<()> {
    if !(segment.start_secs < segment.end_secs) {
        return Err(Error::Validation(format!(
            "start>=end: {}>={} for segment item_id={} type={}.{}",
            segment.start_secs,
            segment.end_secs,
            segment.item_id,
            segment.segment_type,
            segment.type_index
        )));
    }

    if segment.item_id.is_nil() || segment.creator_id.is_nil() {
        return Err(Error::Validation(format!(
            "missing identity: item_id={} creator_id={} for segment type={}.{}",
            segment.item_id, segment.creator_id, segment.segment_type, segment.type_index
        )));
    }

    Ok(())
}

/// Validate every segment of a batch, failing on the first invalid one.
pub fn validate_all(segments: &[Segment]) -> Result<()> {
    for (position, segment) in segments.iter().enumerate() {
        validate(segment).map_err(|e| match e {
            Error::Validation(reason) => {
                Error::Validation(format!("{reason} (batch position {position})"))
            }
            other => other,
        })?;
    }
    Ok(())
}
