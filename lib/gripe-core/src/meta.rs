//! Insertion-ordered string metadata.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Free-form metadata attached to a status or a field error.
///
/// Entries keep their insertion order, so rendering a status twice produces
/// the same text. Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    entries: Vec<(String, String)>,
}

impl Meta {
    /// Creates an empty metadata map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Inserts an entry, replacing the value in place if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Meta
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut meta = Self::new();
        meta.extend(iter);
        meta
    }
}

impl<K, V> Extend<(K, V)> for Meta
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl Serialize for Meta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Meta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MetaVisitor;

        impl<'de> Visitor<'de> for MetaVisitor {
            type Value = Meta;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of string keys to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Meta, A::Error> {
                let mut meta = Meta::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    meta.insert(key, value);
                }
                Ok(meta)
            }
        }

        deserializer.deserialize_map(MetaVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_keeps_insertion_order() {
        let mut meta = Meta::new();
        meta.insert("Zone", "eu-west");
        meta.insert("Attempt", "2");
        meta.insert("Backend", "primary");

        let keys: Vec<_> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Zone", "Attempt", "Backend"]);
    }

    #[test]
    fn meta_insert_replaces_in_place() {
        let mut meta = Meta::new();
        meta.insert("Attempt", "1");
        meta.insert("Backend", "primary");
        meta.insert("Attempt", "2");

        assert_eq!(meta.len(), 2);
        assert_eq!(meta.get("Attempt"), Some("2"));
        let keys: Vec<_> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Attempt", "Backend"]);
    }

    #[test]
    fn meta_get_missing() {
        let meta = Meta::new();
        assert!(meta.is_empty());
        assert_eq!(meta.get("Anything"), None);
    }

    #[test]
    fn meta_serde_round_trip() {
        let meta: Meta = [("Zone", "eu-west"), ("Attempt", "2")].into_iter().collect();

        let text = serde_json::to_string(&meta).expect("serialize");
        assert_eq!(text, r#"{"Zone":"eu-west","Attempt":"2"}"#);

        let back: Meta = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, meta);
    }

    #[test]
    fn meta_deserialize_keeps_document_order() {
        let meta: Meta =
            serde_json::from_str(r#"{"Zulu":"1","Alpha":"2","Mike":"3"}"#).expect("deserialize");

        let keys: Vec<_> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Zulu", "Alpha", "Mike"]);
    }
}
