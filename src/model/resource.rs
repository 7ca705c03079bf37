//! Resource and descriptor value types.

use crate::content_type::{
    TYPE_APPLICATION_JSON, TYPE_APPLICATION_XML, TYPE_IMAGE_JPEG, TYPE_TEXT_PLAIN,
};
use crate::error::Result;
use crate::model::attributes::{Attributes, ATTRIBUTE_TYPE};
use serde::Serialize;
use std::fmt;

/// An identifier with its attributes and payload.
///
/// A `None` payload and an empty payload render differently but are stored
/// the same way; a loaded resource always carries `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    pub id: String,
    pub attributes: Attributes,
    pub data: Option<Vec<u8>>,
}

/// Identifier and attributes without the payload, as returned by listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    pub id: String,
    pub attributes: Attributes,
}

impl Resource {
    #[must_use]
    pub fn new(id: impl Into<String>, attributes: Attributes, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            attributes,
            data: Some(data),
        }
    }

    /// A `text/plain` resource.
    #[must_use]
    pub fn text_plain(id: impl Into<String>, text: &str) -> Self {
        Self::new(
            id,
            Attributes::from([(ATTRIBUTE_TYPE, TYPE_TEXT_PLAIN)]),
            text.as_bytes().to_vec(),
        )
    }

    /// An `image/jpeg` resource.
    #[must_use]
    pub fn jpeg(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new(id, Attributes::from([(ATTRIBUTE_TYPE, TYPE_IMAGE_JPEG)]), data)
    }

    /// Serialize `value` as JSON with the given content type.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(
        id: impl Into<String>,
        content_type: &str,
        value: &T,
    ) -> Result<Self> {
        let data = serde_json::to_vec(value)?;
        Ok(Self::new(id, Attributes::from([(ATTRIBUTE_TYPE, content_type)]), data))
    }

    /// Serialize `value` as `application/json`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn generic_json<T: Serialize + ?Sized>(id: impl Into<String>, value: &T) -> Result<Self> {
        Self::json(id, TYPE_APPLICATION_JSON, value)
    }

    /// Serialize `value` as XML with the given content type.
    ///
    /// The root element is named after the serialized type.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized as an XML document.
    pub fn xml<T: Serialize + ?Sized>(
        id: impl Into<String>,
        content_type: &str,
        value: &T,
    ) -> Result<Self> {
        let data = quick_xml::se::to_string(value)?.into_bytes();
        Ok(Self::new(id, Attributes::from([(ATTRIBUTE_TYPE, content_type)]), data))
    }

    /// Serialize `value` as `application/xml`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized as an XML document.
    pub fn generic_xml<T: Serialize + ?Sized>(id: impl Into<String>, value: &T) -> Result<Self> {
        Self::xml(id, TYPE_APPLICATION_XML, value)
    }

    /// Payload bytes, empty when absent.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.as_deref().unwrap_or_default()
    }

    /// Payload as shown by the diagnostic rendering.
    ///
    /// UTF-8 text (lossy) for `text/plain`, the byte list otherwise, `None`
    /// when there is no payload.
    #[must_use]
    pub fn render_payload(&self) -> Option<String> {
        let data = self.data.as_deref()?;
        if self.attributes.content_type() == Some(TYPE_TEXT_PLAIN) {
            Some(String::from_utf8_lossy(data).into_owned())
        } else {
            Some(format!("{data:?}"))
        }
    }

    /// Drop the payload.
    #[must_use]
    pub fn descriptor(&self) -> Descriptor {
        Descriptor {
            id: self.id.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

/// Diagnostic rendering. Not parseable.
///
/// A resource with an empty id renders as the empty string.
impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id.is_empty() {
            return Ok(());
        }
        write!(f, "RESOURCE {}\r\n{}", self.id, self.attributes)?;
        if let Some(payload) = self.render_payload() {
            write!(f, "\r\n{payload}\r\n")?;
        }
        Ok(())
    }
}
