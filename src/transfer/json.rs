//! JSON payload helpers.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::model::{Descriptor, Resource};
use crate::storage::Archive;

/// Serialize `value` and store it as `application/json`.
///
/// # Errors
///
/// Returns an error if serialization or the store fails.
pub fn store_json<T: Serialize + ?Sized>(archive: &Archive, id: &str, value: &T) -> Result<Descriptor> {
    archive.store(&Resource::generic_json(id, value)?)
}

/// Load `id` and deserialize its payload.
///
/// The `Type` attribute is not checked.
///
/// # Errors
///
/// Returns `ResourceNotFound` if `id` is missing, or a JSON error if the
/// payload does not deserialize into `T`.
pub fn load_json<T: DeserializeOwned>(archive: &Archive, id: &str) -> Result<T> {
    let resource = archive.load(id)?;
    Ok(serde_json::from_slice(resource.data())?)
}
