//! Load command implementation.

use crate::cli::commands::{open_archive, with_suggestions};
use crate::error::Result;
use crate::transfer::export_file;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Output for load.
#[derive(Serialize)]
struct LoadOutput<'a> {
    id: &'a str,
    file: String,
    bytes: usize,
}

/// Export a resource's payload to a file.
///
/// # Errors
///
/// Returns a not-found error (with suggestions) if `id` is missing, or an
/// I/O error if the file cannot be written.
pub fn execute(id: &str, file: &Path, archive_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let archive = open_archive(archive_path)?;
    let bytes = match export_file(&archive, id, file) {
        Ok(bytes) => bytes,
        Err(e) => return Err(with_suggestions(&archive, e)),
    };

    if json {
        let output = LoadOutput {
            id,
            file: file.display().to_string(),
            bytes,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Wrote {id} to {} ({bytes} bytes)", file.display());
    }

    archive.close()
}
