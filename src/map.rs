//! Ordered map type for MSON object slots.
//!
//! This module provides [`MsonMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order for object slots. Order matters in MSON: values
//! are paired to schema fields strictly by ordinal index, so the order in
//! which slots are enumerated is the order they hit the wire.
//!
//! ## Why IndexMap?
//!
//! MSON uses `IndexMap` instead of `HashMap` to ensure:
//!
//! - **Positional fidelity**: slots enumerate in the same order the host type
//!   declared them
//! - **Deterministic output**: the same value always serializes to the same
//!   text
//!
//! ## Examples
//!
//! ```rust
//! use mson::{MsonMap, Value};
//!
//! let mut map = MsonMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of slot names to MSON values.
///
/// This is a thin wrapper around [`IndexMap`] that maintains insertion order,
/// which is what makes positional pairing against a schema deterministic.
///
/// # Examples
///
/// ```rust
/// use mson::{MsonMap, Value};
///
/// let mut map = MsonMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MsonMap(IndexMap<String, crate::Value>);

impl MsonMap {
    /// Creates an empty `MsonMap`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mson::MsonMap;
    ///
    /// let map = MsonMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        MsonMap(IndexMap::new())
    }

    /// Creates an empty `MsonMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        MsonMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a slot into the map.
    ///
    /// If the map already contained this slot, the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mson::{MsonMap, Value};
    ///
    /// let mut map = MsonMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value of the named slot.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Removes the named slot and returns its value, preserving the order of
    /// the remaining slots.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of slots in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the slot names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the slot values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the slots, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for MsonMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        MsonMap(map.into_iter().collect())
    }
}

impl From<MsonMap> for HashMap<String, crate::Value> {
    fn from(map: MsonMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for MsonMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, crate::Value)> for MsonMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        MsonMap(IndexMap::from_iter(iter))
    }
}
