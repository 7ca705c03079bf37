//! Resource archive - an embedded store of identified payloads.
//!
//! Each resource is an identifier, a set of textual attributes and an opaque
//! payload. The archive keeps a store-wide revision counter that increases by
//! one with every successful mutation, so callers can detect external changes
//! without diffing content.
//!
//! # Architecture
//!
//! - [`model`] - Attributes (canonical text format), Resource, Descriptor
//! - [`storage`] - SQLite-backed archive and revision tracking
//! - [`transfer`] - File import/export and JSON helpers
//! - [`content_type`] - Well-known content types and extension guessing
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Archive path resolution
//! - [`error`] - Error types and handling
//!
//! # Example
//!
//! ```no_run
//! use archive::{Archive, Resource};
//!
//! # fn main() -> archive::Result<()> {
//! let archive = Archive::open(std::path::Path::new("archive.db"))?;
//! archive.store(&Resource::text_plain("/", "this is a plain text"))?;
//! assert_eq!(archive.load("/")?.data(), b"this is a plain text");
//! println!("revision {}", archive.revision());
//! archive.close()?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod content_type;
pub mod error;
pub mod model;
pub mod storage;
pub mod transfer;
pub mod validate;

pub use error::{Error, Result};
pub use model::{Attributes, Descriptor, Resource};
pub use storage::Archive;

/// Escape a value for CSV output (wrap in quotes if it contains a comma, quote or line break).
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("/plain"), "/plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("/a\nb"), "\"/a\nb\"");
        assert_eq!(csv_escape("/a\rb"), "\"/a\rb\"");
    }
}
