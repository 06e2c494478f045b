use std::collections::HashMap;

/// Header map with case-insensitive keys.
///
/// Keys are lower-cased on both insertion and lookup, so `get("Host")`
/// and `get("host")` read the same entry. Inserting an existing key
/// replaces the previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    map: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Inserts a header, replacing any previous value under the same
    /// (case-insensitive) key.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.map
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Looks up a header value by name (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(&key.to_ascii_lowercase())
    }

    /// Iterates over `(name, value)` pairs. Order is not significant.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
