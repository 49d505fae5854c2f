mod actions;
mod array;
mod collect;
mod composite;
mod convert;
mod error;
mod input;
mod key_value;
mod node;
mod path;
mod populate;
mod reducers;
mod render;
mod state;

pub use actions::FormCommand;
pub use array::ScalarArrayState;
pub use collect::collect;
pub use composite::{ObjectListState, ObjectState};
pub use error::{FormError, ImportParseError};
pub use input::handle_key;
pub use key_value::{KeyValueEntry, KeyValueState};
pub use node::{FormNode, LeafValue};
pub use path::{FieldPath, Segment};
pub use populate::{import_json, populate};
pub use reducers::apply_command;
pub use render::render;
pub use state::{FormState, field_at};
