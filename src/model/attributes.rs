//! Resource attributes and their canonical text encoding.
//!
//! Attributes are stored as a block of `Key: Value\r\n` lines sorted by key.
//! The stored text is re-parsed on every read, so serialization must be
//! deterministic regardless of the in-memory map's iteration order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::collections::hash_map;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const ATTRIBUTE_ENCODING: &str = "Encoding";
pub const ATTRIBUTE_ETAG: &str = "ETag";
pub const ATTRIBUTE_EXPIRES: &str = "Expires";
pub const ATTRIBUTE_LAST_MODIFIED: &str = "Last-Modified";
pub const ATTRIBUTE_LABEL: &str = "Label";
pub const ATTRIBUTE_LENGTH: &str = "Length";
pub const ATTRIBUTE_TYPE: &str = "Type";

pub const ENCODING_IDENTITY: &str = "identity";
pub const ENCODING_GZIP: &str = "gzip";

/// Line terminator of the canonical format.
const TERMINATOR: &str = "\r\n";

/// Separator between key and value.
const SEPARATOR: &str = ": ";

/// A single attribute, as emitted by [`Attributes::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// Named string metadata attached to a resource.
///
/// Keys are case-sensitive and unique. Iteration order of the map itself is
/// unspecified; use [`Attributes::entries`] for the canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(HashMap<String, String>);

impl Attributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the canonical text format.
    ///
    /// `\r\n` and bare `\n` both terminate lines. A line is an entry only if
    /// it contains `": "` after a non-empty key; anything else is skipped.
    /// When a key repeats, the last occurrence wins.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let normalized = text.replace(TERMINATOR, "\n");
        let mut attributes = Self::new();
        for line in normalized.split('\n') {
            match line.find(SEPARATOR) {
                Some(idx) if idx > 0 => {
                    let (key, rest) = line.split_at(idx);
                    attributes.insert(key, &rest[SEPARATOR.len()..]);
                }
                _ => {}
            }
        }
        attributes
    }

    /// All entries sorted by key (byte-wise ascending).
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .0
            .iter()
            .map(|(key, value)| Entry {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in unspecified order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Content type (`Type` attribute), if set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.get(ATTRIBUTE_TYPE)
    }
}

/// Serializes to the canonical text format.
impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries() {
            write!(f, "{}{SEPARATOR}{}{TERMINATOR}", entry.key, entry.value)?;
        }
        Ok(())
    }
}

impl FromStr for Attributes {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// JSON objects are emitted in key order, same as the text format.
impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for entry in &entries {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_single() {
        let attributes = Attributes::from([("Foo", "Bar")]);
        assert_eq!(attributes.to_string(), "Foo: Bar\r\n");
    }

    #[test]
    fn test_serialize_sorted() {
        let attributes = Attributes::from([("Foo", "Bar"), ("Azimo", "Sony")]);
        assert_eq!(attributes.to_string(), "Azimo: Sony\r\nFoo: Bar\r\n");
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(Attributes::new().to_string(), "");
    }

    #[test]
    fn test_serialize_orders_bytewise() {
        // Uppercase sorts before lowercase
        let attributes = Attributes::from([("type", "a"), ("Type", "b"), ("ETag", "c")]);
        assert_eq!(attributes.to_string(), "ETag: c\r\nType: b\r\ntype: a\r\n");
    }

    #[test]
    fn test_parse_single() {
        let parsed = Attributes::parse("Foo: Bar\r\n");
        assert_eq!(parsed, Attributes::from([("Foo", "Bar")]));
    }

    #[test]
    fn test_parse_ignores_input_order() {
        let parsed = Attributes::parse("Azimo: Sony\r\nFoo: Bar\r\n");
        assert_eq!(parsed, Attributes::from([("Foo", "Bar"), ("Azimo", "Sony")]));
    }

    #[test]
    fn test_parse_skips_invalid_lines() {
        let parsed = Attributes::parse("Azimo: Sony\r\n: Smoo\r\nBazz\r\nFoo: Bar\r\n");
        assert_eq!(parsed, Attributes::from([("Foo", "Bar"), ("Azimo", "Sony")]));
    }

    #[test]
    fn test_parse_value_keeps_extra_separators() {
        let parsed = Attributes::parse("Expires: Mon, 01 Jan 2024 10:00:00 GMT\nLabel: \n");
        assert_eq!(parsed.get(ATTRIBUTE_EXPIRES), Some("Mon, 01 Jan 2024 10:00:00 GMT"));
        assert_eq!(parsed.get(ATTRIBUTE_LABEL), Some(""));
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_parse_colon_without_space_is_skipped() {
        let parsed = Attributes::parse("Type:text/plain\r\n");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let parsed = Attributes::parse("Label: first\r\nLabel: second\r\n");
        assert_eq!(parsed.get(ATTRIBUTE_LABEL), Some("second"));
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(Attributes::parse("").is_empty());
    }

    #[test]
    fn test_round_trip() {
        let attributes = Attributes::from([
            (ATTRIBUTE_TYPE, "text/plain"),
            (ATTRIBUTE_LENGTH, "20"),
            (ATTRIBUTE_LAST_MODIFIED, "2024-01-01T10:00:00Z"),
            (ATTRIBUTE_LABEL, "a: b: c"),
        ]);
        let parsed: Attributes = attributes.to_string().parse().unwrap();
        assert_eq!(parsed, attributes);
    }

    #[test]
    fn test_entries_sorted() {
        let attributes = Attributes::from([("b", "2"), ("c", "3"), ("a", "1")]);
        let keys: Vec<String> = attributes.entries().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_json_is_key_ordered() {
        let attributes = Attributes::from([("Type", "text/plain"), ("Length", "3")]);
        let json = serde_json::to_string(&attributes).unwrap();
        assert_eq!(json, r#"{"Length":"3","Type":"text/plain"}"#);
    }
}
