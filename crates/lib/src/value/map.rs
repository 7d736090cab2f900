//! Associative collection type.

use std::fmt;

use indexmap::IndexMap;

use super::Value;

/// An associative collection mapping string keys to values.
///
/// Keys are unique. Iteration follows insertion order and removal preserves the order of the
/// remaining entries, but callers must not treat that order as part of any traversal contract:
/// traversal over maps is documented as unordered.
///
/// # Examples
///
/// ```
/// # use dynpath::value::{Map, Value};
/// let mut map = Map::new();
/// map.insert("name", "Alice");
/// map.insert("age", 30);
///
/// assert_eq!(map.len(), 2);
/// assert!(map.get("name").is_some_and(|v| *v == "Alice"));
/// assert_eq!(map.remove("age"), Some(Value::Int(30)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    entries: IndexMap<String, Value>,
}

impl Map {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the map contains the given key
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Gets the value stored under a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Gets a mutable reference to the value stored under a key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Inserts a value, returning the previous value under that key if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes a key, preserving the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the keys
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Returns an iterator over the values
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Returns an iterator over all key-value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Returns a mutable iterator over all key-value pairs
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.entries.iter_mut()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
