mod parser;
mod schema;

pub use parser::{SchemaParseError, parse_app_schema, parse_fields};
pub use schema::{
    AppDescriptor, AppSchema, ArrayField, FieldKind, FieldSchema, KeyValueField, ObjectField,
    ObjectListField, SchemaRef, SelectOption,
};
