use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{AppSchema, SchemaRef, parse_app_schema};

use super::{CatalogError, SchemaCatalog};

pub const DEFAULT_INDEX_FILE: &str = "config-files.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogIndex {
    #[serde(default)]
    config_files: Vec<String>,
}

/// Schemas stored as JSON files in one directory, listed by an index file
/// (`{"configFiles": ["dns.json", ...]}`).
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: PathBuf,
    index_file: String,
}

impl DirectoryCatalog {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }

    pub fn with_index_file(mut self, name: impl Into<String>) -> Self {
        self.index_file = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_json(&self, name: &str) -> Result<Value, CatalogError> {
        let path = self.root.join(name);
        let contents = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
            reference: name.to_string(),
            source,
        })
    }
}

impl SchemaCatalog for DirectoryCatalog {
    fn list_schemas(&self) -> Result<Vec<SchemaRef>, CatalogError> {
        let document = self.read_json(&self.index_file)?;
        let index = CatalogIndex::deserialize(&document).map_err(|source| CatalogError::Parse {
            reference: self.index_file.clone(),
            source,
        })?;
        tracing::debug!(
            root = %self.root.display(),
            files = index.config_files.len(),
            "read catalog index"
        );
        Ok(index.config_files.into_iter().map(SchemaRef::new).collect())
    }

    fn load_schema(&self, reference: &SchemaRef) -> Result<AppSchema, CatalogError> {
        let document = self.read_json(reference.as_str())?;
        parse_app_schema(&document).map_err(|source| CatalogError::Schema {
            reference: reference.clone(),
            source,
        })
    }
}
