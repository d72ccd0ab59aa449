//! Indexed property store.

use crate::{LegacyError, LegacyResult, properties};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Key of the `index`-th entry of an indexed family, e.g. `chartTitle[2]`.
pub fn indexed_key(base_key: &str, index: usize) -> String {
    format!("{}[{}]", base_key, index)
}

/// Flat string-to-string mapping loaded from a legacy properties file.
///
/// Values are kept as raw strings; interpretation is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedPropertyStore {
    entries: BTreeMap<String, String>,
}

impl IndexedPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties text. Later duplicates of a key win.
    pub fn parse(text: &str) -> Self {
        let mut store = Self::new();
        for (key, value) in properties::parse_entries(text) {
            store.insert(key, value);
        }
        store
    }

    /// Load a properties file.
    ///
    /// Content that is not valid UTF-8 is decoded as ISO-8859-1, the historical
    /// encoding of properties files.
    pub fn load(path: &Path) -> LegacyResult<Self> {
        let bytes = fs::read(path).map_err(|source| LegacyError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
        };

        let store = Self::parse(&text);
        tracing::debug!(
            path = %path.display(),
            entries = store.len(),
            "loaded legacy configuration"
        );
        Ok(store)
    }

    /// Load `relative_path` resolved against `resource_root`.
    pub fn load_resource(resource_root: &Path, relative_path: &Path) -> LegacyResult<Self> {
        Self::load(&resource_root.join(relative_path))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of contiguous entries `base_key[1]`, `base_key[2]`, ... before
    /// the first missing index.
    pub fn count_items(&self, base_key: &str) -> usize {
        (1..)
            .take_while(|&i| self.contains_key(&indexed_key(base_key, i)))
            .count()
    }

    /// Values of the contiguous run counted by [`Self::count_items`].
    pub fn indexed_values(&self, base_key: &str) -> Vec<&str> {
        (1..)
            .map_while(|i| self.get(&indexed_key(base_key, i)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for IndexedPropertyStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_stops_at_first_gap() {
        let store: IndexedPropertyStore = [
            ("x[1]", "a"),
            ("x[2]", "b"),
            ("x[3]", "c"),
            ("x[5]", "e"),
            ("y[1]", "unrelated"),
            ("x", "bare"),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.count_items("x"), 3);
        assert_eq!(store.indexed_values("x"), vec!["a", "b", "c"]);
    }

    #[test]
    fn count_of_absent_family_is_zero() {
        let store: IndexedPropertyStore = [("x[2]", "b"), ("chartTitle", "t")]
            .into_iter()
            .collect();

        assert_eq!(store.count_items("x"), 0);
        assert_eq!(store.count_items("chartTitle"), 0);
        assert!(store.indexed_values("x").is_empty());
    }

    #[test]
    fn missing_key_is_absent_not_placeholder() {
        let store = IndexedPropertyStore::parse("statePanel=\n");
        assert_eq!(store.get("statePanel"), Some(""));
        assert_eq!(store.get("serialPanel"), None);
    }

    #[test]
    fn iter_yields_entries_sorted_by_key() {
        let store = IndexedPropertyStore::parse("statePanel=true\nGNSS3dView=false\nx[1]=t\n");
        let entries: Vec<(&str, &str)> = store.iter().collect();
        assert_eq!(
            entries,
            vec![("GNSS3dView", "false"), ("statePanel", "true"), ("x[1]", "t")]
        );
        assert!(store.contains_key("x[1]"));
        assert!(!store.contains_key("x[2]"));
    }

    #[test]
    fn later_duplicate_wins() {
        let store = IndexedPropertyStore::parse("a=1\na=2\n");
        assert_eq!(store.get("a"), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("mc_legacy_definitely_missing.properties");
        let _ = fs::remove_file(&path);

        let err = IndexedPropertyStore::load(&path).unwrap_err();
        match err {
            LegacyError::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
        }
    }

    #[test]
    fn load_latin1_fallback() {
        let path = std::env::temp_dir().join("mc_legacy_latin1.properties");
        fs::write(&path, b"unit=\xb0C\n").unwrap();

        let store = IndexedPropertyStore::load(&path).unwrap();
        assert_eq!(store.get("unit"), Some("\u{00b0}C"));

        let _ = fs::remove_file(&path);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn count_equals_contiguous_prefix(
            present in prop::collection::btree_set(1_usize..20, 0..15),
            noise in prop::collection::vec("[a-z]{1,6}", 0..5),
        ) {
            let mut store = IndexedPropertyStore::new();
            for i in &present {
                store.insert(indexed_key("chartTitle", *i), format!("t{}", i));
            }
            for key in &noise {
                store.insert(key.clone(), "noise");
            }

            let expected = (1..).take_while(|i| present.contains(i)).count();
            prop_assert_eq!(store.count_items("chartTitle"), expected);
        }
    }
}
