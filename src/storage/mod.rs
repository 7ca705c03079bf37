//! SQLite storage layer for the archive.
//!
//! This module provides the persistence layer using SQLite with:
//! - WAL mode for concurrent reads
//! - One IMMEDIATE transaction per mutation
//! - A store-wide revision counter bumped inside each mutation
//!
//! # Submodules
//!
//! - [`archive`] - The resource archive
//! - [`schema`] - Database schema definitions

pub mod archive;
pub mod schema;

pub use archive::Archive;
