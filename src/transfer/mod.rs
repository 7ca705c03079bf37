//! Moving payloads between the archive and the outside world.
//!
//! Everything here is built on the public [`Archive`](crate::storage::Archive)
//! operations only:
//!
//! - **Files**: import a file as a resource, export a payload to a file
//! - **JSON**: store and load serde values as `application/json`
//! - **XML**: the same for `application/xml`
//! - **Hashing**: SHA-256 `ETag` values for payloads

mod file;
mod hash;
mod json;
mod xml;

pub use file::{atomic_write, export_file, import_file};
pub use hash::etag;
pub use json::{load_json, store_json};
pub use xml::{load_xml, store_xml};
