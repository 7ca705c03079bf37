//! XML payload helpers.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::model::{Descriptor, Resource};
use crate::storage::Archive;

/// Serialize `value` and store it as `application/xml`.
///
/// # Errors
///
/// Returns an error if serialization or the store fails.
pub fn store_xml<T: Serialize + ?Sized>(archive: &Archive, id: &str, value: &T) -> Result<Descriptor> {
    archive.store(&Resource::generic_xml(id, value)?)
}

/// Load `id` and deserialize its XML payload.
///
/// Like [`load_json`](super::load_json), the `Type` attribute is not checked.
///
/// # Errors
///
/// Returns `ResourceNotFound` if `id` is missing, or an XML error if the
/// payload does not deserialize into `T`.
pub fn load_xml<T: DeserializeOwned>(archive: &Archive, id: &str) -> Result<T> {
    let resource = archive.load(id)?;
    Ok(quick_xml::de::from_reader(resource.data())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_type::TYPE_APPLICATION_XML;
    use crate::error::Error;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        name: String,
        retries: u32,
        tags: Vec<String>,
    }

    #[test]
    fn test_store_and_load_xml() {
        let archive = Archive::open_memory().unwrap();
        let settings = Settings {
            name: "primary".into(),
            retries: 3,
            tags: vec!["a".into(), "b".into()],
        };

        let stored = store_xml(&archive, "/settings.xml", &settings).unwrap();
        assert_eq!(stored.attributes.content_type(), Some(TYPE_APPLICATION_XML));
        assert_eq!(archive.revision(), 1);

        let loaded: Settings = load_xml(&archive, "/settings.xml").unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_xml_wrong_shape() {
        let archive = Archive::open_memory().unwrap();
        archive.store(&Resource::text_plain("/text", "not xml")).unwrap();

        let err = load_xml::<Settings>(&archive, "/text").unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
    }

    #[test]
    fn test_load_xml_missing() {
        let archive = Archive::open_memory().unwrap();
        let err = load_xml::<Settings>(&archive, "/nope").unwrap_err();
        assert!(err.is_not_found());
    }
}
