//! Store command implementation.

use crate::cli::commands::open_archive;
use crate::error::Result;
use crate::model::attributes::{ATTRIBUTE_LABEL, ATTRIBUTE_LENGTH, ATTRIBUTE_TYPE};
use crate::model::{Attributes, Descriptor};
use crate::transfer::import_file;
use crate::validate::{parse_attribute_arg, validate_attribute};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Output for store.
#[derive(Serialize)]
struct StoreOutput {
    #[serde(flatten)]
    descriptor: Descriptor,
    revision: u64,
}

/// Arguments of the store command.
pub struct StoreArgs<'a> {
    pub id: &'a str,
    pub file: &'a Path,
    pub content_type: Option<&'a str>,
    pub label: Option<&'a str>,
    pub attributes: &'a [String],
}

/// Import a file into the archive.
///
/// # Errors
///
/// Returns an error if an attribute is malformed, the file cannot be read,
/// or the store fails.
pub fn execute(args: &StoreArgs<'_>, archive_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let attributes = build_attributes(args)?;

    let archive = open_archive(archive_path)?;
    let descriptor = import_file(&archive, args.id, args.file, attributes)?;
    let revision = archive.revision();

    if json {
        let output = StoreOutput {
            descriptor,
            revision,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "Stored {} ({} bytes, {}) at revision {revision}",
            descriptor.id,
            descriptor.attributes.get(ATTRIBUTE_LENGTH).unwrap_or("0"),
            descriptor.attributes.content_type().unwrap_or("no type"),
        );
    }

    archive.close()
}

fn build_attributes(args: &StoreArgs<'_>) -> Result<Attributes> {
    let mut attributes = Attributes::new();
    for arg in args.attributes {
        let (key, value) = parse_attribute_arg(arg)?;
        attributes.insert(key, value);
    }
    if let Some(content_type) = args.content_type {
        validate_attribute(ATTRIBUTE_TYPE, content_type)?;
        attributes.insert(ATTRIBUTE_TYPE, content_type);
    }
    if let Some(label) = args.label {
        validate_attribute(ATTRIBUTE_LABEL, label)?;
        attributes.insert(ATTRIBUTE_LABEL, label);
    }
    Ok(attributes)
}
