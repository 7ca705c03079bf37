//! Command implementations.

pub mod completions;
pub mod delete;
pub mod list;
pub mod load;
pub mod revision;
pub mod show;
pub mod store;

use crate::config::prepare_archive_path;
use crate::error::{Error, Result};
use crate::storage::Archive;
use crate::validate::find_similar_ids;
use std::path::PathBuf;

/// Open (creating if needed) the archive selected by `--archive` or config.
pub(crate) fn open_archive(archive_path: Option<&PathBuf>) -> Result<Archive> {
    let path = prepare_archive_path(archive_path.map(PathBuf::as_path))?;
    Archive::open(&path)
}

/// Upgrade a not-found error with similar identifiers, if any exist.
pub(crate) fn with_suggestions(archive: &Archive, err: Error) -> Error {
    let id = match err {
        Error::ResourceNotFound { id } => id,
        other => return other,
    };

    let existing: Vec<String> = match archive.list() {
        Ok(descriptors) => descriptors.into_iter().map(|d| d.id).collect(),
        Err(_) => return Error::ResourceNotFound { id },
    };

    let similar = find_similar_ids(&id, &existing, 3);
    if similar.is_empty() {
        Error::ResourceNotFound { id }
    } else {
        Error::ResourceNotFoundSimilar { id, similar }
    }
}
