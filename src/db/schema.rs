//! SQL DDL for initializing the credential table.

/// SQLite schema with:
/// - `usernames` UNIQUE (duplicate inserts fail with a constraint violation)
/// - `passwords` stored verbatim
///
/// Both columns use the default `BINARY` collation, so matching is case-sensitive.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS LogIns (
    usernames TEXT NOT NULL UNIQUE,
    passwords TEXT NOT NULL
)
"#;
