//! Sources of loadable schemas.

mod directory;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{AppSchema, SchemaParseError, SchemaRef};

pub use directory::{DEFAULT_INDEX_FILE, DirectoryCatalog};
pub use memory::MemoryCatalog;

/// Lists schema references and loads the schema behind each one.
pub trait SchemaCatalog {
    fn list_schemas(&self) -> Result<Vec<SchemaRef>, CatalogError>;

    fn load_schema(&self, reference: &SchemaRef) -> Result<AppSchema, CatalogError>;
}

impl<C: SchemaCatalog + ?Sized> SchemaCatalog for &C {
    fn list_schemas(&self) -> Result<Vec<SchemaRef>, CatalogError> {
        (**self).list_schemas()
    }

    fn load_schema(&self, reference: &SchemaRef) -> Result<AppSchema, CatalogError> {
        (**self).load_schema(reference)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {reference}")]
    Parse {
        reference: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid schema {reference}")]
    Schema {
        reference: SchemaRef,
        #[source]
        source: SchemaParseError,
    },
    #[error("unknown schema reference '{0}'")]
    UnknownRef(SchemaRef),
}
