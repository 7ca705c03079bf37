//! Delete command implementation.

use crate::cli::commands::open_archive;
use crate::error::Result;
use std::path::PathBuf;

/// Delete a resource. Deleting a missing identifier succeeds.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or the delete fails.
pub fn execute(id: &str, archive_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let archive = open_archive(archive_path)?;
    let deleted = archive.delete(id)?;
    let revision = archive.revision();

    if json {
        let output = serde_json::json!({
            "id": id,
            "deleted": deleted,
            "revision": revision,
        });
        println!("{output}");
    } else if deleted {
        println!("Deleted {id} (revision {revision})");
    } else {
        println!("Nothing to delete: {id}");
    }

    archive.close()
}
