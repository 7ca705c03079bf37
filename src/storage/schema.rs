//! Database schema for the archive.
//!
//! Two tables: `info` holds named store-wide values (currently only the
//! revision counter), `resources` holds one row per identifier.

use rusqlite::{Connection, Result};

/// Name of the `info` row holding the revision counter.
pub const INFO_REVISION: &str = "Revision";

/// The complete SQL schema.
///
/// The revision is stored as TEXT to keep `info` a plain name/value table;
/// `value + 1` coerces it numerically and the TEXT affinity stores the result
/// back as text.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS info (
    name TEXT PRIMARY KEY,
    value TEXT
);

CREATE TABLE IF NOT EXISTS resources (
    id TEXT PRIMARY KEY,
    attributes TEXT NOT NULL DEFAULT '',
    data BLOB
);
";

/// Apply the schema and seed the revision row.
///
/// Idempotent: safe to call on every open.
///
/// # Errors
///
/// Returns an error if a pragma or DDL statement fails.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    conn.execute_batch(SCHEMA_SQL)?;

    conn.execute(
        "INSERT OR IGNORE INTO info (name, value) VALUES (?1, '0')",
        [INFO_REVISION],
    )?;

    Ok(())
}
