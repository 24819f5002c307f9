//! Ordered frequency maps.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered map of string keys to optional counts.
///
/// Entries keep their insertion order, which is also their on-wire order.
/// A `None` count models a null entry; such entries are dropped when the map
/// is encoded.
///
/// # Example
///
/// ```
/// use strand_core::FreqMap;
///
/// let mut map = FreqMap::new();
/// map.insert("x", 10);
/// map.insert("y", 5);
/// map.increment("x", 2);
///
/// assert_eq!(map.get("x"), Some(12));
/// assert_eq!(map.keys().collect::<Vec<_>>(), vec!["x", "y"]);
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(String, Option<i64>)>", into = "Vec<(String, Option<i64>)>")]
pub struct FreqMap {
    entries: Vec<(String, Option<i64>)>,
    positions: HashMap<String, usize>,
}

impl FreqMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity), positions: HashMap::with_capacity(capacity) }
    }

    /// Set the count for `key`, keeping its position if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, count: i64) {
        self.put(key.into(), Some(count));
    }

    /// Record `key` with a null count.
    pub fn insert_null(&mut self, key: impl Into<String>) {
        self.put(key.into(), None);
    }

    /// Add `by` to the count for `key`, starting from zero for new or null keys.
    pub fn increment(&mut self, key: impl Into<String>, by: i64) {
        let key = key.into();
        let current = self.get(&key).unwrap_or(0);
        self.put(key, Some(current.saturating_add(by)));
    }

    fn put(&mut self, key: String, count: Option<i64>) {
        if let Some(&i) = self.positions.get(&key) {
            self.entries[i].1 = count;
        } else {
            self.positions.insert(key.clone(), self.entries.len());
            self.entries.push((key, count));
        }
    }

    /// Get the count for `key`. Null entries return `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<i64> {
        self.positions.get(key).and_then(|&i| self.entries[i].1)
    }

    /// Returns `true` if `key` has an entry, even a null one.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Number of entries, including null ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<i64>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl PartialEq for FreqMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for FreqMap {}

impl fmt::Debug for FreqMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
    }
}

impl From<Vec<(String, Option<i64>)>> for FreqMap {
    fn from(entries: Vec<(String, Option<i64>)>) -> Self {
        let mut map = Self::with_capacity(entries.len());
        for (key, count) in entries {
            map.put(key, count);
        }
        map
    }
}

impl From<FreqMap> for Vec<(String, Option<i64>)> {
    fn from(map: FreqMap) -> Self {
        map.entries
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for FreqMap {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
