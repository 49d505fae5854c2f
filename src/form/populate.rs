//! Writes plain JSON back into an existing form tree.

use serde_json::{Map, Value};

use crate::domain::{FieldKind, FieldSchema, ObjectField};

use super::{
    composite::ObjectState,
    error::ImportParseError,
    node::FormNode,
    render::{build_node, json_type},
    state::FormState,
};

/// Overwrite the fields named in `data`. Lists and maps are replaced,
/// plain objects merge, unknown keys are ignored.
pub fn populate(state: &mut FormState, schema: &[FieldSchema], data: &Value) {
    let Value::Object(map) = data else {
        tracing::debug!(found = json_type(data), "populate data is not an object, ignoring");
        return;
    };
    populate_fields(schema, state.root_mut(), map);
}

/// Parse `text` and populate from it. Nothing is written unless the whole
/// document parses to a JSON object.
pub fn import_json(
    state: &mut FormState,
    schema: &[FieldSchema],
    text: &str,
) -> Result<(), ImportParseError> {
    let data: Value = serde_json::from_str(text.trim())?;
    if !data.is_object() {
        return Err(ImportParseError::NotAnObject {
            found: json_type(&data),
        });
    }
    populate(state, schema, &data);
    Ok(())
}

fn populate_fields(fields: &[FieldSchema], object: &mut ObjectState, data: &Map<String, Value>) {
    for (key, value) in data {
        let Some(field) = FieldSchema::find_property(fields, key) else {
            tracing::trace!(key = %key, "ignoring value with no matching field");
            continue;
        };
        match object.get_mut(key) {
            Some(node) => populate_node(field, node, value),
            None => {
                object
                    .children_mut()
                    .insert(key.clone(), build_node(field, Some(value)));
            }
        }
    }
}

fn populate_node(field: &FieldSchema, node: &mut FormNode, value: &Value) {
    if let FieldKind::Object(ObjectField::Properties(properties)) = &field.kind {
        match (node, value) {
            (FormNode::Object(inner), Value::Object(map)) => populate_fields(properties, inner, map),
            (node, Value::Object(_)) => *node = build_node(field, Some(value)),
            (_, other) => {
                tracing::debug!(field = %field.name, found = json_type(other), "object field given a non-object value, keeping current values");
            }
        }
        return;
    }
    *node = build_node(field, Some(value));
}
