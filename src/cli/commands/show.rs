//! Show command implementation.

use crate::cli::commands::{open_archive, with_suggestions};
use crate::content_type::TYPE_TEXT_PLAIN;
use crate::error::Result;
use crate::model::{Attributes, Resource};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Payloads longer than this are elided in the human view.
const PREVIEW_LIMIT: usize = 2048;

/// Output for show.
#[derive(Serialize)]
struct ShowOutput<'a> {
    id: &'a str,
    attributes: &'a Attributes,
    /// Present only for `text/plain` payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Print a resource (or only its attributes).
///
/// # Errors
///
/// Returns a not-found error (with suggestions) if `id` is missing.
pub fn execute(
    id: &str,
    attributes_only: bool,
    archive_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let archive = open_archive(archive_path)?;

    let resource = if attributes_only {
        archive.attributes(id).map(|attributes| Resource {
            id: id.to_string(),
            attributes,
            data: None,
        })
    } else {
        archive.load(id)
    };
    let resource = resource.map_err(|e| with_suggestions(&archive, e))?;

    if json {
        let text = resource
            .render_payload()
            .filter(|_| resource.attributes.content_type() == Some(TYPE_TEXT_PLAIN));
        let output = ShowOutput {
            id,
            attributes: &resource.attributes,
            text,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if attributes_only {
        print!("{}", resource.attributes);
    } else {
        print_resource(&resource);
    }

    archive.close()
}

fn print_resource(resource: &Resource) {
    println!("{} {}", "RESOURCE".cyan().bold(), resource.id.bold());
    for entry in resource.attributes.entries() {
        println!("{}: {}", entry.key.dimmed(), entry.value);
    }

    let data = resource.data();
    if data.len() > PREVIEW_LIMIT {
        println!();
        println!("{}", format!("({} bytes, not shown)", data.len()).dimmed());
    } else if let Some(payload) = resource.render_payload() {
        println!();
        println!("{payload}");
    }
}
