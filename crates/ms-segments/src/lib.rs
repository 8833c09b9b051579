//! ms-segments: validation, per-user action resolution, and the segment
//! service that ties them to the store.
//!
//! [`SegmentService`] is the entry point for callers; [`validate`] and
//! [`resolve_action`] are pure and usable on their own.

pub mod directory;
pub mod resolve;
pub mod service;
pub mod validate;

pub use directory::{DbUserDirectory, UserDirectory};
pub use resolve::{resolve, resolve_action, ResolvedSegment};
pub use service::SegmentService;
pub use validate::{validate, validate_all};
