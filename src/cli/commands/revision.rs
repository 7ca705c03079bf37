//! Revision command implementation.

use crate::cli::commands::open_archive;
use crate::error::Result;
use std::path::PathBuf;

/// Print the archive revision.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened.
pub fn execute(archive_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let archive = open_archive(archive_path)?;
    let revision = archive.revision();

    if json {
        println!("{}", serde_json::json!({ "revision": revision }));
    } else {
        println!("{revision}");
    }

    archive.close()
}
