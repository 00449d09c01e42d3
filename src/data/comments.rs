use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::path::Path;

/// Sparse map from path string to a human-readable field description.
///
/// Absence means "no description"; callers supply their own fallback text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentMap {
    map: HashMap<String, String>,
}

impl CommentMap {
    /// An empty comment map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of descriptions.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map holds no descriptions.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Add or replace the description for a path.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.map.insert(path.into(), text.into());
    }

    /// The description for a path, if present.
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.map.get(&path.to_string()).map(String::as_str)
    }

    /// The description for a path, or `fallback` when absent.
    pub fn get_or<'a>(&'a self, path: &Path, fallback: &'a str) -> &'a str {
        self.get(path).unwrap_or(fallback)
    }
}

impl From<HashMap<String, String>> for CommentMap {
    fn from(map: HashMap<String, String>) -> Self {
        Self { map }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_with_fallback() {
        let mut comments = CommentMap::new();
        comments.insert("nop.timeout", "Seconds to wait for the portal");

        let hit = Path::parse("nop.timeout");
        let miss = Path::parse("nop.retries");
        assert_eq!(comments.get(&hit), Some("Seconds to wait for the portal"));
        assert_eq!(comments.get(&miss), None);
        assert_eq!(comments.get_or(&miss, "Configure retries"), "Configure retries");
    }

    #[test]
    fn deserializes_from_flat_json_object() {
        let comments: CommentMap =
            serde_json::from_str(r#"{ "a.b": "first", "a.c.0": "second" }"#).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments.get(&Path::parse("a.c.0")), Some("second"));
    }
}
