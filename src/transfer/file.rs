//! File import and export.
//!
//! Imports read a whole file into one resource; exports write a resource's
//! payload atomically (temp file, fsync, rename) so a failed export never
//! leaves a truncated file behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::content_type::guess_from_path;
use crate::error::Result;
use crate::model::attributes::{ATTRIBUTE_ETAG, ATTRIBUTE_TYPE};
use crate::model::{Attributes, Descriptor, Resource};
use crate::storage::Archive;
use crate::transfer::hash::etag;

/// Write bytes to a file atomically.
///
/// This function:
/// 1. Writes content to a temporary file next to the target
/// 2. Calls `fsync` to ensure data is on disk
/// 3. Atomically renames the temp file to the target path
///
/// If any step fails, the original file (if any) remains untouched.
///
/// # Errors
///
/// Returns an error if any file operation fails.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    Ok(())
}

/// `dir/name.ext` → `dir/name.ext.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("export"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

/// Store the contents of `file` under `id`.
///
/// `attributes` are taken as given; when they carry no `Type`, one is guessed
/// from the file extension, and when they carry no `ETag`, the payload's
/// SHA-256 is used.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the store fails.
pub fn import_file(
    archive: &Archive,
    id: &str,
    file: &Path,
    mut attributes: Attributes,
) -> Result<Descriptor> {
    let data = fs::read(file)?;

    if !attributes.contains_key(ATTRIBUTE_TYPE) {
        if let Some(content_type) = guess_from_path(file) {
            attributes.insert(ATTRIBUTE_TYPE, content_type);
        }
    }
    if !attributes.contains_key(ATTRIBUTE_ETAG) {
        attributes.insert(ATTRIBUTE_ETAG, etag(&data));
    }

    let descriptor = archive.store(&Resource::new(id, attributes, data))?;
    info!(id, file = %file.display(), "Imported file");
    Ok(descriptor)
}

/// Write the payload of `id` to `file`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns `ResourceNotFound` if `id` is missing, or an I/O error.
pub fn export_file(archive: &Archive, id: &str, file: &Path) -> Result<usize> {
    let resource = archive.load(id)?;
    let data = resource.data();
    atomic_write(file, data)?;
    info!(id, file = %file.display(), bytes = data.len(), "Exported file");
    Ok(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_type::{TYPE_IMAGE_PNG, TYPE_TEXT_CSV, TYPE_TEXT_PLAIN};
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.bin");

        atomic_write(&path, b"\x00\x01payload").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"\x00\x01payload");
        assert!(!temp_dir.path().join("out.bin.tmp").exists());
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        fs::write(&path, "old content that is longer").unwrap();

        atomic_write(&path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_import_guesses_type_and_sets_etag() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("report.csv");
        fs::write(&file, "a,b\n1,2\n").unwrap();

        let archive = Archive::open_memory().unwrap();
        let stored = import_file(&archive, "/reports/1", &file, Attributes::new()).unwrap();

        assert_eq!(stored.attributes.content_type(), Some(TYPE_TEXT_CSV));
        assert_eq!(stored.attributes.get(ATTRIBUTE_ETAG), Some(etag(b"a,b\n1,2\n").as_str()));
        assert_eq!(archive.load("/reports/1").unwrap().data(), b"a,b\n1,2\n");
        assert_eq!(archive.revision(), 1);
    }

    #[test]
    fn test_import_keeps_explicit_type() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("image.bin");
        fs::write(&file, [0x89, b'P', b'N', b'G']).unwrap();

        let archive = Archive::open_memory().unwrap();
        let attributes = Attributes::from([(ATTRIBUTE_TYPE, TYPE_IMAGE_PNG)]);
        import_file(&archive, "/img", &file, attributes).unwrap();

        let attributes = archive.attributes("/img").unwrap();
        assert_eq!(attributes.content_type(), Some(TYPE_IMAGE_PNG));
    }

    #[test]
    fn test_import_unknown_extension_has_no_type() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("blob.xyz");
        fs::write(&file, b"?").unwrap();

        let archive = Archive::open_memory().unwrap();
        let stored = import_file(&archive, "/blob", &file, Attributes::new()).unwrap();
        assert_eq!(stored.attributes.content_type(), None);
    }

    #[test]
    fn test_import_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let archive = Archive::open_memory().unwrap();

        let err = import_file(&archive, "/x", &temp_dir.path().join("nope.txt"), Attributes::new())
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(archive.revision(), 0);
    }

    #[test]
    fn test_export_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let archive = Archive::open_memory().unwrap();
        archive.store(&Resource::text_plain("/", "exported text")).unwrap();

        let target = temp_dir.path().join("sub").join("out.txt");
        let written = export_file(&archive, "/", &target).unwrap();

        assert_eq!(written, 13);
        assert_eq!(fs::read_to_string(&target).unwrap(), "exported text");
        assert_eq!(
            archive.attributes("/").unwrap().content_type(),
            Some(TYPE_TEXT_PLAIN)
        );
    }

    #[test]
    fn test_export_missing_resource_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let archive = Archive::open_memory().unwrap();
        let target = temp_dir.path().join("out.txt");

        let err = export_file(&archive, "/missing", &target).unwrap_err();
        assert!(err.is_not_found());
        assert!(!target.exists());
    }
}
