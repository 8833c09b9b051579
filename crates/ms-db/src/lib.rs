//! ms-db: database access and persistence layer.
//!
//! This crate provides SQLite-backed storage with connection pooling,
//! embedded migrations, typed models, and query modules for segment
//! creators, segments, and users.

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;

pub use queries::segments::SegmentFilter;
