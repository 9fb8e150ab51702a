//! core::types
//!
//! Value types for front-matter metadata.
//!
//! # Types
//!
//! - [`MetaValue`] - A single metadata value (null, scalar, or list)
//! - [`Metadata`] - Ordered key/value mapping with map semantics
//!
//! # Ordering
//!
//! [`Metadata`] keeps keys in first-insertion order. Inserting a key that
//! already exists replaces its value in place, so the key keeps the position
//! it was first seen at. Serialization walks the mapping in this order.
//!
//! # Examples
//!
//! ```
//! use frontmeta::core::types::{Metadata, MetaValue};
//!
//! let mut meta = Metadata::new();
//! meta.insert("title", "Hello");
//! meta.insert("tags", vec!["a", "b"]);
//! meta.insert("title", "Bye");
//!
//! assert_eq!(meta.keys().collect::<Vec<_>>(), vec!["title", "tags"]);
//! assert_eq!(meta.get("title"), Some(&MetaValue::scalar("Bye")));
//! ```

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A metadata value.
///
/// Serializes as JSON `null`, a string, or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum MetaValue {
    /// Key present without a value (`key:`).
    #[default]
    Null,
    /// Single inline value (`key: value`).
    Scalar(String),
    /// Block list (`key:` followed by `- item` lines).
    List(Vec<String>),
}

impl MetaValue {
    /// Create a scalar value.
    pub fn scalar(value: impl Into<String>) -> Self {
        MetaValue::Scalar(value.into())
    }

    /// Create a list value.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MetaValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Check if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, MetaValue::Null)
    }

    /// Get the scalar text, if this is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Get the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Single-line rendering: null is empty, lists are comma-joined.
impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Null => Ok(()),
            MetaValue::Scalar(s) => write!(f, "{}", s),
            MetaValue::List(items) => write!(f, "{}", items.join(",")),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Scalar(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Scalar(value)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(items: Vec<String>) -> Self {
        MetaValue::List(items)
    }
}

impl From<Vec<&str>> for MetaValue {
    fn from(items: Vec<&str>) -> Self {
        MetaValue::list(items)
    }
}

impl<T: Into<MetaValue>> From<Option<T>> for MetaValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(MetaValue::Null, Into::into)
    }
}

/// Ordered key/value mapping of front-matter entries.
///
/// Lookups are linear; front-matter blocks hold a handful of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Insert or replace a value.
    ///
    /// New keys are appended; existing keys keep their position. Returns
    /// the previous value if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Option<MetaValue> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>, V: Into<MetaValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut meta = Metadata::new();
        for (k, v) in iter {
            meta.insert(k, v);
        }
        meta
    }
}

impl IntoIterator for Metadata {
    type Item = (String, MetaValue);
    type IntoIter = std::vec::IntoIter<(String, MetaValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Serializes as an ordered map.
impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
