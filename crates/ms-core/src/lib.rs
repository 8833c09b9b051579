//! ms-core: shared types, IDs, errors, and configuration.
//!
//! This crate is the foundational dependency for all other ms-* crates,
//! providing type-safe identifiers, a unified error type, the segment-domain
//! enums, and application configuration.

pub mod config;
pub mod error;
pub mod ids;
pub mod segment;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::*;
pub use segment::*;
