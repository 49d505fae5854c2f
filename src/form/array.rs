use serde_json::Value;

use super::convert::value_to_string;

/// Items of an `array` field. Items are always string-rendered; the
/// position in `items` is the item index, so removal re-sequences for free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarArrayState {
    items: Vec<String>,
}

impl ScalarArrayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Tolerant seed: lists map item-by-item, strings are comma-split,
    /// other scalars become a single item, anything else is empty.
    pub fn from_value(value: &Value) -> Self {
        let items = match value {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Object(_) | Value::Null => {
                        tracing::debug!("array item has no scalar form, recording empty");
                        String::new()
                    }
                    other => value_to_string(other),
                })
                .collect(),
            Value::String(text) => super::convert::split_list(text),
            Value::Number(_) | Value::Bool(_) => vec![value_to_string(value)],
            Value::Null => Vec::new(),
            Value::Object(_) => {
                tracing::debug!("object value cannot seed an array, recording empty");
                Vec::new()
            }
        };
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn push(&mut self, value: impl Into<String>) -> usize {
        self.items.push(value.into());
        self.items.len() - 1
    }

    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn move_item(&mut self, index: usize, delta: i32) -> bool {
        if self.items.len() < 2 || index >= self.items.len() {
            return false;
        }
        let target = index as i64 + delta as i64;
        if target < 0 || target >= self.items.len() as i64 {
            return false;
        }
        self.items.swap(index, target as usize);
        true
    }

    /// Trimmed, non-empty items in order.
    pub fn values(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn removing_resequences_without_gaps() {
        let mut array = ScalarArrayState::from_items(
            ["a", "b", "c", "d"].into_iter().map(String::from).collect(),
        );
        assert_eq!(array.remove(1).as_deref(), Some("b"));
        assert_eq!(array.items(), ["a", "c", "d"]);
        assert_eq!(array.get(1), Some("c"));
        assert_eq!(array.get(2), Some("d"));
        assert!(array.remove(3).is_none());
    }

    #[test]
    fn seeds_from_comma_separated_text() {
        let array = ScalarArrayState::from_value(&json!("1.1.1.1, 8.8.8.8,"));
        assert_eq!(array.items(), ["1.1.1.1", "8.8.8.8"]);
    }

    #[test]
    fn seeds_scalars_as_single_item() {
        assert_eq!(ScalarArrayState::from_value(&json!(53)).items(), ["53"]);
        assert!(ScalarArrayState::from_value(&json!({"a": 1})).is_empty());
    }

    #[test]
    fn move_item_swaps_neighbours() {
        let mut array =
            ScalarArrayState::from_items(["x", "y"].into_iter().map(String::from).collect());
        assert!(array.move_item(0, 1));
        assert_eq!(array.items(), ["y", "x"]);
        assert!(!array.move_item(1, 1));
    }
}
