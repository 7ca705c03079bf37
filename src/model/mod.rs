//! Data models for the archive.
//!
//! - Attributes (and their canonical text format)
//! - Resource
//! - Descriptor

pub mod attributes;
pub mod resource;

pub use attributes::{Attributes, Entry};
pub use resource::{Descriptor, Resource};
