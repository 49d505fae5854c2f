#![deny(rust_2018_idioms)]

//! Schema-driven configuration forms: render a form from a declarative
//! field schema, edit it, collect it back into JSON and import JSON into it.

pub mod app;
pub mod catalog;
pub mod domain;
pub mod form;
pub mod io;
pub mod presentation;

pub use app::{AppSession, Configurator, FormOptions};
pub use catalog::{DirectoryCatalog, MemoryCatalog, SchemaCatalog};
pub use form::{FormState, collect, populate, render};

pub mod prelude {
    pub use super::{
        app::{AppSession, Configurator, ConfiguratorError, FormOptions, SelectionTicket, StatusLine},
        catalog::{CatalogError, DirectoryCatalog, MemoryCatalog, SchemaCatalog},
        domain::{AppDescriptor, AppSchema, FieldKind, FieldSchema, parse_app_schema, parse_fields},
        form::{FieldPath, FormCommand, FormState, apply_command, collect, import_json, populate, render},
        io::{DocumentFormat, OutputDestination, OutputOptions},
        presentation::{FormView, ViewState, form_lines},
    };
}
