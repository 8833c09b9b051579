//! Database query modules.

pub mod creators;
pub mod segments;
pub mod users;

use std::os::raw::c_int;

/// Whether `err` is a SQLite constraint failure with the given extended
/// result code (e.g. `SQLITE_CONSTRAINT_FOREIGNKEY`).
pub(crate) fn is_constraint(err: &rusqlite::Error, extended_code: c_int) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.extended_code == extended_code)
}
