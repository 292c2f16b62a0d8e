use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::api::error::SceneError;

static BUILTIN_CONTENT: &str = include_str!("../../data/content.json");

/// Descriptive text shown in the info panel for one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub title: String,
    pub description: String,
    /// Ordered feature bullet points.
    pub features: Vec<String>,
}

#[derive(Deserialize)]
struct KeyedEntry {
    key: String,
    #[serde(flatten)]
    entry: ContentEntry,
}

/// Read-only lookup table keyed by `category-name` (service objects) or by
/// name alone (logo badges).
#[derive(Debug, Clone, Default)]
pub struct DescriptiveContent {
    entries: HashMap<String, ContentEntry>,
}

impl DescriptiveContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of `{ key, title, description, features }`.
    /// Duplicate keys are a configuration error.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let keyed: Vec<KeyedEntry> = serde_json::from_str(json).map_err(SceneError::ContentParse)?;
        let mut entries = HashMap::with_capacity(keyed.len());
        for KeyedEntry { key, entry } in keyed {
            if entries.contains_key(&key) {
                return Err(SceneError::DuplicateContentKey(key));
            }
            entries.insert(key, entry);
        }
        Ok(Self { entries })
    }

    /// The content shipped with the crate.
    pub fn builtin() -> Result<Self, SceneError> {
        Self::from_json(BUILTIN_CONTENT)
    }

    /// Look up an entry. Returns None if not found.
    pub fn get(&self, key: &str) -> Option<&ContentEntry> {
        self.entries.get(key)
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
