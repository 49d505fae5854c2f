use serde_json::{Map, Value};

use super::convert::{split_list, value_to_string};

/// Entries of a key-value map field, in user order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueState {
    entries: Vec<KeyValueEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueEntry {
    pub key: String,
    pub value: String,
}

impl KeyValueEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl KeyValueState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<KeyValueEntry>) -> Self {
        Self { entries }
    }

    /// One entry per key, in the object's own order. List values collapse
    /// into a comma-joined string and are re-split on collect.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            if !value.is_null() {
                tracing::debug!("non-object value cannot seed a key-value map, recording empty");
            }
            return Self::default();
        };
        let entries = map
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::Object(_) => value.to_string(),
                    other => value_to_string(other),
                };
                KeyValueEntry::new(key.clone(), text)
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[KeyValueEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&KeyValueEntry> {
        self.entries.get(index)
    }

    pub fn add_entry(&mut self) -> usize {
        self.entries.push(KeyValueEntry::default());
        self.entries.len() - 1
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> usize {
        self.entries.push(KeyValueEntry::new(key, value));
        self.entries.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<KeyValueEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn set_key(&mut self, index: usize, key: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.key = key.into();
                true
            }
            None => false,
        }
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key.trim() == key)
    }

    /// Trimmed pairs with empty keys or values dropped. A repeated key keeps
    /// its first position and takes the last value.
    pub fn build_map(&self, value_is_array: bool) -> Map<String, Value> {
        let mut map = Map::new();
        for entry in &self.entries {
            let key = entry.key.trim();
            let value = entry.value.trim();
            if key.is_empty() || value.is_empty() {
                continue;
            }
            let value = if value_is_array {
                let items = split_list(value);
                if items.is_empty() {
                    continue;
                }
                Value::Array(items.into_iter().map(Value::String).collect())
            } else {
                Value::String(value.to_string())
            };
            if map.insert(key.to_string(), value).is_some() {
                tracing::debug!(key, "duplicate map key, last value wins");
            }
        }
        map
    }
}
