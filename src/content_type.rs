//! Well-known content types and extension-based guessing.
//!
//! The archive itself never looks at `Type`; these are used by the
//! convenience constructors and the file import path.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

pub const TYPE_APPLICATION_JSON: &str = "application/json";
pub const TYPE_APPLICATION_PDF: &str = "application/pdf";
pub const TYPE_APPLICATION_XML: &str = "application/xml";
pub const TYPE_IMAGE_JPEG: &str = "image/jpeg";
pub const TYPE_IMAGE_PNG: &str = "image/png";
pub const TYPE_IMAGE_SVG: &str = "image/svg+xml";
pub const TYPE_TEXT_CSV: &str = "text/csv";
pub const TYPE_TEXT_HTML: &str = "text/html";
pub const TYPE_TEXT_PLAIN: &str = "text/plain";

/// Lowercase extension (no dot) → content type.
pub static EXTENSION_TYPES: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("json", TYPE_APPLICATION_JSON),
        ("pdf", TYPE_APPLICATION_PDF),
        ("xml", TYPE_APPLICATION_XML),
        ("jpg", TYPE_IMAGE_JPEG),
        ("jpeg", TYPE_IMAGE_JPEG),
        ("png", TYPE_IMAGE_PNG),
        ("svg", TYPE_IMAGE_SVG),
        ("csv", TYPE_TEXT_CSV),
        ("htm", TYPE_TEXT_HTML),
        ("html", TYPE_TEXT_HTML),
        ("txt", TYPE_TEXT_PLAIN),
        ("text", TYPE_TEXT_PLAIN),
    ]
    .into_iter()
    .collect()
});

/// Guess a content type from a file name's extension.
///
/// Matching is case-insensitive. Returns `None` for unknown or missing
/// extensions.
#[must_use]
pub fn guess_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    EXTENSION_TYPES.get(ext.as_str()).copied()
}
