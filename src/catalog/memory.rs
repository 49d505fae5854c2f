use indexmap::IndexMap;
use serde_json::Value;

use crate::domain::{AppSchema, SchemaRef, parse_app_schema};

use super::{CatalogError, SchemaCatalog};

/// Raw schema documents held in memory, listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    documents: IndexMap<SchemaRef, Value>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, reference: impl Into<String>, document: Value) -> Self {
        self.insert(reference, document);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, document: Value) {
        self.documents.insert(SchemaRef::new(reference), document);
    }

    pub fn remove(&mut self, reference: &SchemaRef) -> Option<Value> {
        self.documents.shift_remove(reference)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl SchemaCatalog for MemoryCatalog {
    fn list_schemas(&self) -> Result<Vec<SchemaRef>, CatalogError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn load_schema(&self, reference: &SchemaRef) -> Result<AppSchema, CatalogError> {
        let document = self
            .documents
            .get(reference)
            .ok_or_else(|| CatalogError::UnknownRef(reference.clone()))?;
        parse_app_schema(document).map_err(|source| CatalogError::Schema {
            reference: reference.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lists_in_insertion_order() {
        let catalog = MemoryCatalog::new()
            .with_schema("b.json", json!({"id": "b", "name": "B"}))
            .with_schema("a.json", json!({"id": "a", "name": "A"}));
        assert_eq!(
            catalog.list_schemas().unwrap(),
            vec![SchemaRef::new("b.json"), SchemaRef::new("a.json")]
        );
    }

    #[test]
    fn unknown_reference_is_reported() {
        let catalog = MemoryCatalog::new();
        assert!(matches!(
            catalog.load_schema(&SchemaRef::new("gone.json")),
            Err(CatalogError::UnknownRef(_))
        ));
    }
}
