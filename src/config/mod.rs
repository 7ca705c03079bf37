//! Configuration management.
//!
//! Resolves where the archive file lives. The CLI always works on a single
//! archive file; by default it is the global one under `~/.archive/`.

use crate::error::{Error, Result};

use std::path::{Path, PathBuf};

/// Environment variable naming the archive file.
pub const ARCHIVE_PATH_ENV: &str = "ARCHIVE_PATH";

/// Environment variable enabling the isolated test archive.
pub const ARCHIVE_TEST_ENV: &str = "ARCHIVE_TEST_DB";

/// Get the global archive directory location (`~/.archive/`).
#[must_use]
pub fn global_archive_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".archive"))
}

/// Check if test mode is enabled.
///
/// Test mode is enabled by setting `ARCHIVE_TEST_DB=1` (or any non-empty value
/// other than `0`/`false`).
#[must_use]
pub fn is_test_mode() -> bool {
    std::env::var(ARCHIVE_TEST_ENV).is_ok_and(|v| is_truthy(&v))
}

fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

/// Get the test archive path (`~/.archive/test/archive.db`).
#[must_use]
pub fn test_archive_path() -> Option<PathBuf> {
    global_archive_dir().map(|dir| dir.join("test").join("archive.db"))
}

/// Resolve the archive path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly
/// 2. `ARCHIVE_TEST_DB` environment variable → uses test archive
/// 3. `ARCHIVE_PATH` environment variable
/// 4. Global location: `~/.archive/data/archive.db`
#[must_use]
pub fn resolve_archive_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if is_test_mode() {
        return test_archive_path();
    }

    if let Ok(path) = std::env::var(ARCHIVE_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    global_archive_dir().map(|dir| dir.join("data").join("archive.db"))
}

/// Resolve the archive path and make sure its parent directory exists.
///
/// Used by commands that may create the archive.
///
/// # Errors
///
/// Returns `Config` if no location can be determined, or an I/O error if the
/// parent directory cannot be created.
pub fn prepare_archive_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    let path = resolve_archive_path(explicit_path)
        .ok_or_else(|| Error::Config("could not determine archive location".to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    Ok(path)
}
