//! Ordered name/value lists backing element attributes and rule declarations.

use serde::{Deserialize, Serialize};

/// Value stored for attributes written without a value (`<input disabled>`).
pub const BOOLEAN_ATTRIBUTE: &str = "true";

/// Ordered list of uniquely named values.
///
/// Iteration follows insertion order, which keeps diffs deterministic, while
/// equality ignores order: two lists are equal when they hold the same
/// name/value pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct PropertyList {
    entries: Vec<(String, String)>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.entries
            .get(index)
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<(&str, &mut String)> {
        self.entries
            .get_mut(index)
            .map(|(n, v)| (n.as_str(), v))
    }

    /// Set `name` to `value`, appending when the name is new.
    /// Returns the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let len = self.entries.len();
        self.insert_at(len, name, value)
    }

    /// Set `name` to `value`. An existing entry keeps its position; a new one
    /// is placed at `index` (clamped to the list length).
    pub fn insert_at(
        &mut self,
        index: usize,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                let index = index.min(self.entries.len());
                self.entries.insert(index, (name, value));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.position(name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl PartialEq for PropertyList {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(name, value)| other.get(name) == Some(value.as_str()))
    }
}

impl Eq for PropertyList {}

impl From<Vec<(String, String)>> for PropertyList {
    fn from(entries: Vec<(String, String)>) -> Self {
        let mut list = PropertyList::new();
        for (name, value) in entries {
            list.insert(name, value);
        }
        list
    }
}

impl From<PropertyList> for Vec<(String, String)> {
    fn from(list: PropertyList) -> Self {
        list.entries
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for PropertyList {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut list = PropertyList::new();
        for (name, value) in iter {
            list.insert(name, value);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut list = PropertyList::new();
        list.insert("a", "1");
        list.insert("b", "2");
        assert_eq!(list.insert("a", "3"), Some("1".to_string()));
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(list.get("a"), Some("3"));
    }

    #[test]
    fn test_insert_at_clamps() {
        let mut list: PropertyList = [("a", "1")].into_iter().collect();
        list.insert_at(0, "b", "2");
        list.insert_at(10, "c", "3");
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: PropertyList = [("a", "1"), ("b", "2")].into_iter().collect();
        let b: PropertyList = [("b", "2"), ("a", "1")].into_iter().collect();
        let c: PropertyList = [("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_deserialize_dedupes_names() {
        let list: PropertyList = serde_json::from_str(r#"[["a","1"],["a","2"]]"#).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("a"), Some("2"));
    }
}
