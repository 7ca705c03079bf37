//! SQLite-backed resource archive.
//!
//! Every mutation runs as one IMMEDIATE transaction that changes the resource
//! row and bumps the revision counter together, under a store-wide lock.
//! Reads go straight to the connection.

use crate::error::{Error, Result};
use crate::model::attributes::{ATTRIBUTE_LAST_MODIFIED, ATTRIBUTE_LENGTH};
use crate::model::{Attributes, Descriptor, Resource};
use crate::storage::schema::{apply_schema, INFO_REVISION};
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Default busy timeout for file-backed archives.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A persistent mapping from identifiers to resources.
#[derive(Debug)]
pub struct Archive {
    conn: Connection,
    /// Held across the whole `store`/`delete` transaction.
    ///
    /// `Connection` is `!Sync`, so one handle is never shared between
    /// threads and this lock is uncontended. Cross-handle writers are
    /// ordered by SQLite's IMMEDIATE transactions instead.
    write_lock: Mutex<()>,
}

impl Archive {
    /// Open an archive at the given path.
    ///
    /// Creates the file, tables and revision row if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, None)
    }

    /// Open an archive with an optional busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open_with_timeout(path: &Path, timeout_ms: Option<u64>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(timeout_ms.map_or(DEFAULT_BUSY_TIMEOUT, Duration::from_millis))?;
        apply_schema(&conn)?;
        debug!(path = %path.display(), "Opened archive");
        Ok(Self::from_connection(conn))
    }

    /// Open an in-memory archive (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            write_lock: Mutex::new(()),
        }
    }

    /// Current revision.
    ///
    /// 0 for a fresh archive. A failed read also yields 0.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.conn
            .query_row(
                "SELECT CAST(value AS INTEGER) FROM info WHERE name = ?1",
                [INFO_REVISION],
                |row| row.get::<_, i64>(0),
            )
            .map_or_else(
                |e| {
                    debug!(error = %e, "Revision read failed");
                    0
                },
                |v| u64::try_from(v).unwrap_or(0),
            )
    }

    /// All descriptors, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self) -> Result<Vec<Descriptor>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, attributes FROM resources ORDER BY id")?;
        let rows = stmt.query_map([], map_descriptor_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    /// Descriptors whose identifier starts with `prefix`, ordered by identifier.
    ///
    /// The match is exact and case-sensitive; `%` and `_` have no special
    /// meaning.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_with_prefix(&self, prefix: &str) -> Result<Vec<Descriptor>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, attributes FROM resources
             WHERE substr(id, 1, length(?1)) = ?1
             ORDER BY id",
        )?;
        let rows = stmt.query_map([prefix], map_descriptor_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    /// Attributes of a resource, without fetching its payload.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no row matches `id`.
    pub fn attributes(&self, id: &str) -> Result<Attributes> {
        let text: Option<String> = self
            .conn
            .query_row(
                "SELECT attributes FROM resources WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()?;

        text.map(|t| Attributes::parse(&t))
            .ok_or_else(|| Error::ResourceNotFound { id: id.to_string() })
    }

    /// Load a resource with its payload.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no row matches `id`.
    pub fn load(&self, id: &str) -> Result<Resource> {
        let row: Option<(String, Option<Vec<u8>>)> = self
            .conn
            .query_row(
                "SELECT attributes, data FROM resources WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (text, data) = row.ok_or_else(|| Error::ResourceNotFound { id: id.to_string() })?;
        Ok(Resource {
            id: id.to_string(),
            attributes: Attributes::parse(&text),
            data: Some(data.unwrap_or_default()),
        })
    }

    /// Create or fully replace a resource.
    ///
    /// The persisted attributes are the caller's with `Length` and
    /// `Last-Modified` overwritten. The revision is bumped even when the
    /// content is unchanged. Returns the descriptor as persisted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty identifier, or a database error
    /// if the transaction fails. The revision is unchanged on failure.
    pub fn store(&self, resource: &Resource) -> Result<Descriptor> {
        if resource.id.is_empty() {
            return Err(Error::InvalidArgument(
                "resource id must not be empty".to_string(),
            ));
        }

        let data = resource.data();
        let mut attributes = resource.attributes.clone();
        attributes.insert(ATTRIBUTE_LENGTH, data.len().to_string());
        attributes.insert(ATTRIBUTE_LAST_MODIFIED, last_modified_now());
        let text = attributes.to_string();

        self.mutate("store", |tx| {
            tx.execute(
                "INSERT INTO resources (id, attributes, data) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET
                   attributes = excluded.attributes,
                   data = excluded.data",
                rusqlite::params![resource.id, text, data],
            )?;
            bump_revision(tx)
        })?;

        debug!(id = %resource.id, length = data.len(), "Stored resource");
        Ok(Descriptor {
            id: resource.id.clone(),
            attributes,
        })
    }

    /// Delete a resource.
    ///
    /// Returns whether a row was removed. Deleting a missing identifier is
    /// not an error and leaves the revision unchanged.
    ///
    /// # Errors
    ///
    /// Returns a database error if the transaction fails.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.mutate("delete", |tx| {
            let affected = tx.execute("DELETE FROM resources WHERE id = ?1", [id])?;
            if affected > 0 {
                bump_revision(tx)?;
            }
            Ok(affected > 0)
        })?;

        debug!(id, removed, "Deleted resource");
        Ok(removed)
    }

    /// Close the underlying connection.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite refuses to close (e.g. unfinalized statements).
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Database(e))
    }

    /// Run `f` inside one IMMEDIATE transaction while holding the write lock.
    ///
    /// The transaction rolls back when `f` or the commit fails; the guard is
    /// released on every path.
    fn mutate<F, R>(&self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        // The guarded state lives in SQLite, so a panic in another holder
        // leaves nothing to repair.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        let result = f(&tx)?;
        tx.commit()?;

        debug!(op, "Committed mutation");
        Ok(result)
    }
}

/// Relative update so concurrent writers serialize on the row.
fn bump_revision(tx: &Transaction) -> Result<()> {
    tx.execute(
        "UPDATE info SET value = value + 1 WHERE name = ?1",
        [INFO_REVISION],
    )?;
    Ok(())
}

/// UTC timestamp in RFC 3339 with second precision, e.g. `2024-05-01T12:00:00Z`.
fn last_modified_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn map_descriptor_row(row: &rusqlite::Row) -> rusqlite::Result<Descriptor> {
    let id: String = row.get(0)?;
    let text: String = row.get(1)?;
    Ok(Descriptor {
        id,
        attributes: Attributes::parse(&text),
    })
}
