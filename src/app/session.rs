use crossterm::event::KeyEvent;
use serde_json::Value;

use crate::{
    domain::{AppDescriptor, AppSchema, FieldSchema},
    form::{
        self, FieldPath, FormCommand, FormError, FormState, ImportParseError, apply_command,
        collect, render,
    },
};

/// Everything tied to one selected app. Dropped and rebuilt whenever the
/// selection changes.
#[derive(Debug, Clone)]
pub struct AppSession {
    descriptor: AppDescriptor,
    schema: AppSchema,
    state: FormState,
}

impl AppSession {
    /// Start a session from a freshly loaded schema. The schema's own name
    /// and description take precedence over the catalog entry.
    pub fn new(mut descriptor: AppDescriptor, schema: AppSchema) -> Self {
        if !schema.name.is_empty() {
            descriptor.name = schema.name.clone();
        }
        if !schema.description.is_empty() {
            descriptor.description = schema.description.clone();
        }
        let state = render(&schema.fields, None);
        Self {
            descriptor,
            schema,
            state,
        }
    }

    pub fn descriptor(&self) -> &AppDescriptor {
        &self.descriptor
    }

    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn description(&self) -> &str {
        &self.descriptor.description
    }

    pub fn schema(&self) -> &AppSchema {
        &self.schema
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.schema.fields
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn collect(&self) -> Value {
        collect(&self.state, &self.schema.fields)
    }

    pub fn apply(&mut self, command: FormCommand) -> Result<(), FormError> {
        apply_command(&mut self.state, &self.schema.fields, command)
    }

    pub fn handle_key(&mut self, path: &FieldPath, key: &KeyEvent, step: f64) -> Result<bool, FormError> {
        form::handle_key(&mut self.state, &self.schema.fields, path, key, step)
    }

    pub fn populate(&mut self, data: &Value) {
        form::populate(&mut self.state, &self.schema.fields, data);
    }

    pub fn import_json(&mut self, text: &str) -> Result<(), ImportParseError> {
        form::import_json(&mut self.state, &self.schema.fields, text)
    }

    /// Throw away edits and rebuild from schema defaults.
    pub fn reset(&mut self) {
        self.state = render(&self.schema.fields, None);
    }
}
