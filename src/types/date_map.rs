//! An insertion-ordered map keyed by calendar-day strings (`YYYY-MM-DD`).
//!
//! Joining, shifting and encoding all depend on the chronological order in which dates
//! were first seen, so every date-keyed collection in this crate uses [`DateMap`]
//! instead of a bare `HashMap`. Keys are kept in a vector next to a hash index,
//! giving O(1) lookups and deterministic iteration.

use std::collections::HashMap;

/// A date-keyed map that iterates in insertion order.
///
/// Re-inserting an existing date replaces its value but keeps its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct DateMap<V> {
    keys: Vec<String>,
    values: Vec<V>,
    index: HashMap<String, usize>,
}

impl<V> Default for DateMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> DateMap<V> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts `value` under `date`, returning the previous value if the date was present.
    pub fn insert(&mut self, date: impl Into<String>, value: V) -> Option<V> {
        let date = date.into();
        match self.index.get(&date) {
            Some(&pos) => Some(std::mem::replace(&mut self.values[pos], value)),
            None => {
                self.index.insert(date.clone(), self.keys.len());
                self.keys.push(date);
                self.values.push(value);
                None
            }
        }
    }

    pub fn get(&self, date: &str) -> Option<&V> {
        self.index.get(date).map(|&pos| &self.values[pos])
    }

    pub fn get_mut(&mut self, date: &str) -> Option<&mut V> {
        match self.index.get(date) {
            Some(&pos) => Some(&mut self.values[pos]),
            None => None,
        }
    }

    pub fn contains_key(&self, date: &str) -> bool {
        self.index.contains_key(date)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Dates in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.values.iter()
    }

    /// `(date, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.keys.iter().map(String::as_str).zip(self.values.iter())
    }

    /// Builds a new map with the same dates (and order) by transforming every value.
    pub fn map_values<U>(&self, mut f: impl FnMut(&V) -> U) -> DateMap<U> {
        DateMap {
            keys: self.keys.clone(),
            values: self.values.iter().map(&mut f).collect(),
            index: self.index.clone(),
        }
    }
}

impl<V> FromIterator<(String, V)> for DateMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = DateMap::new();
        for (date, value) in iter {
            map.insert(date, value);
        }
        map
    }
}

impl<V> IntoIterator for DateMap<V> {
    type Item = (String, V);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<String>, std::vec::IntoIter<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter().zip(self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut map = DateMap::new();
        map.insert("2020-01-03", 3);
        map.insert("2020-01-01", 1);
        map.insert("2020-01-02", 2);

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["2020-01-03", "2020-01-01", "2020-01-02"]);
    }

    #[test]
    fn test_reinsert_replaces_value_in_place() {
        let mut map = DateMap::new();
        map.insert("2020-01-01", "a");
        map.insert("2020-01-02", "b");

        let previous = map.insert("2020-01-01", "c");

        assert_eq!(previous, Some("a"));
        assert_eq!(map.len(), 2);
        let pairs: Vec<(&str, &&str)> = map.iter().collect();
        assert_eq!(pairs, vec![("2020-01-01", &"c"), ("2020-01-02", &"b")]);
    }

    #[test]
    fn test_get_mut_and_missing_keys() {
        let mut map: DateMap<i32> = [("2021-05-05".to_string(), 10)].into_iter().collect();
        if let Some(v) = map.get_mut("2021-05-05") {
            *v += 5;
        }
        assert_eq!(map.get("2021-05-05"), Some(&15));
        assert!(map.get("2021-05-06").is_none());
        assert!(!map.contains_key("2021-05-06"));
    }

    #[test]
    fn test_map_values_keeps_order() {
        let map: DateMap<i32> = vec![("b".to_string(), 2), ("a".to_string(), 1)]
            .into_iter()
            .collect();
        let doubled = map.map_values(|v| v * 2);
        let pairs: Vec<(String, i32)> = doubled.into_iter().collect();
        assert_eq!(pairs, vec![("b".to_string(), 4), ("a".to_string(), 2)]);
    }
}
