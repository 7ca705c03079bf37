//! List command implementation.

use crate::cli::OutputFormat;
use crate::cli::commands::open_archive;
use crate::csv_escape;
use crate::error::Result;
use crate::model::Descriptor;
use crate::model::attributes::{ATTRIBUTE_LAST_MODIFIED, ATTRIBUTE_LENGTH};
use serde::Serialize;
use std::path::PathBuf;

/// Output for list.
#[derive(Serialize)]
struct ListOutput {
    items: Vec<Descriptor>,
    count: usize,
    revision: u64,
}

/// List resources, optionally restricted to an identifier prefix.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or queried.
pub fn execute(
    prefix: Option<&str>,
    archive_path: Option<&PathBuf>,
    format: &OutputFormat,
    json: bool,
) -> Result<()> {
    let archive = open_archive(archive_path)?;
    let descriptors = match prefix {
        Some(prefix) => archive.list_with_prefix(prefix)?,
        None => archive.list()?,
    };

    if *format == OutputFormat::Csv {
        println!("id,type,length,last_modified");
        for d in &descriptors {
            println!(
                "{},{},{},{}",
                csv_escape(&d.id),
                csv_escape(d.attributes.content_type().unwrap_or_default()),
                d.attributes.get(ATTRIBUTE_LENGTH).unwrap_or_default(),
                d.attributes.get(ATTRIBUTE_LAST_MODIFIED).unwrap_or_default(),
            );
        }
    } else if json {
        let output = ListOutput {
            count: descriptors.len(),
            revision: archive.revision(),
            items: descriptors,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if descriptors.is_empty() {
        println!("No resources found.");
    } else {
        println!("Resources ({} found):", descriptors.len());
        println!();
        for d in &descriptors {
            println!(
                "  {:<40} {:>10}  {:<20} {}",
                d.id,
                d.attributes.get(ATTRIBUTE_LENGTH).unwrap_or("-"),
                d.attributes.content_type().unwrap_or("-"),
                d.attributes.get(ATTRIBUTE_LAST_MODIFIED).unwrap_or("-"),
            );
        }
    }

    archive.close()
}
