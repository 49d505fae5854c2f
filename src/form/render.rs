//! Builds a fresh form tree from field schemas and optional seed values.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::domain::{FieldKind, FieldSchema, ObjectField, ObjectListField};

use super::{
    array::ScalarArrayState,
    composite::{ObjectListState, ObjectState},
    convert::{value_to_bool, value_to_string},
    key_value::KeyValueState,
    node::{FormNode, LeafValue},
    state::FormState,
};

/// Render a form for `schema`. Values in `initial` (matched by field name)
/// take precedence over schema defaults.
pub fn render(schema: &[FieldSchema], initial: Option<&Value>) -> FormState {
    let seed = match initial {
        Some(Value::Object(map)) => Some(map),
        Some(Value::Null) | None => None,
        Some(other) => {
            tracing::debug!(found = %json_type(other), "initial values are not an object, ignoring");
            None
        }
    };
    let state = FormState::from_root(build_object(schema, seed));
    tracing::debug!(fields = schema.len(), seeded = seed.is_some(), "rendered form");
    state
}

pub(crate) fn build_object(fields: &[FieldSchema], seed: Option<&Map<String, Value>>) -> ObjectState {
    let children = fields
        .iter()
        .map(|field| {
            let value = seed.and_then(|map| map.get(&field.name));
            (field.name.clone(), build_node(field, value))
        })
        .collect::<IndexMap<_, _>>();
    ObjectState::new(children)
}

/// Build one node. `seed` wins over the field default; both absent gives
/// the empty value for the kind.
pub(crate) fn build_node(field: &FieldSchema, seed: Option<&Value>) -> FormNode {
    let source = seed.or(field.default.as_ref());
    match &field.kind {
        FieldKind::Boolean => FormNode::Leaf(LeafValue::Bool(source.is_some_and(value_to_bool))),
        FieldKind::Number { .. } | FieldKind::String | FieldKind::Url | FieldKind::Textarea { .. } => {
            FormNode::Leaf(LeafValue::Text(source.map(value_to_string).unwrap_or_default()))
        }
        FieldKind::Select(options) => {
            let text = match source {
                Some(value) => value_to_string(value),
                None => options
                    .first()
                    .map(|option| option.value.clone())
                    .unwrap_or_default(),
            };
            FormNode::Leaf(LeafValue::Text(text))
        }
        FieldKind::Array(_) => FormNode::Array(
            source
                .map(ScalarArrayState::from_value)
                .unwrap_or_default(),
        ),
        FieldKind::Object(ObjectField::KeyValue(_)) => FormNode::KeyValue(
            source.map(KeyValueState::from_value).unwrap_or_default(),
        ),
        FieldKind::Object(ObjectField::Properties(properties)) => {
            let map = match source {
                Some(Value::Object(map)) => Some(map),
                Some(Value::Null) | None => None,
                Some(other) => {
                    tracing::debug!(field = %field.name, found = %json_type(other), "object seed is not an object, using property defaults");
                    None
                }
            };
            FormNode::Object(build_object(properties, map))
        }
        FieldKind::ArrayOfObjects(list) => FormNode::ObjectList(
            source
                .map(|value| build_object_list(field, list, value))
                .unwrap_or_default(),
        ),
    }
}

/// Fresh item for an array-of-objects field, seeded only by item defaults.
pub(crate) fn build_item(list: &ObjectListField) -> ObjectState {
    build_object(&list.item_properties, None)
}

fn build_object_list(field: &FieldSchema, list: &ObjectListField, value: &Value) -> ObjectListState {
    let items = match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => build_object(&list.item_properties, Some(map)),
                other => {
                    tracing::debug!(field = %field.name, found = %json_type(other), "list item is not an object, using item defaults");
                    build_item(list)
                }
            })
            .collect(),
        Value::Object(map) => vec![build_object(&list.item_properties, Some(map))],
        Value::Null => Vec::new(),
        other => {
            tracing::debug!(field = %field.name, found = %json_type(other), "value cannot seed a list of objects, recording empty");
            Vec::new()
        }
    };
    ObjectListState::from_items(items)
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_fields;
    use serde_json::json;

    fn fields(raw: Value) -> Vec<FieldSchema> {
        parse_fields(&raw).unwrap()
    }

    #[test]
    fn defaults_seed_leaves_and_select_starts_at_first_option() {
        let schema = fields(json!([
            {"name": "port", "type": "number", "default": 53},
            {"name": "enabled", "type": "boolean"},
            {"name": "mode", "type": "select", "options": [{"value": "a"}, {"value": "b"}]},
            {"name": "note", "type": "textarea"}
        ]));
        let state = render(&schema, None);
        assert_eq!(state.get("port"), Some(&FormNode::Leaf(LeafValue::Text("53".into()))));
        assert_eq!(state.get("enabled"), Some(&FormNode::Leaf(LeafValue::Bool(false))));
        assert_eq!(state.get("mode"), Some(&FormNode::Leaf(LeafValue::Text("a".into()))));
        assert_eq!(state.get("note"), Some(&FormNode::Leaf(LeafValue::Text(String::new()))));
    }

    #[test]
    fn initial_values_override_defaults() {
        let schema = fields(json!([{"name": "port", "type": "number", "default": 53}]));
        let state = render(&schema, Some(&json!({"port": 5353})));
        assert_eq!(state.get("port"), Some(&FormNode::Leaf(LeafValue::Text("5353".into()))));
    }

    #[test]
    fn plain_object_properties_fall_back_to_their_defaults() {
        let schema = fields(json!([{
            "name": "upstream",
            "type": "object",
            "properties": [
                {"name": "host", "type": "string"},
                {"name": "port", "type": "number", "default": 53}
            ]
        }]));
        let state = render(&schema, Some(&json!({"upstream": {"host": "9.9.9.9"}})));
        let object = state.get("upstream").and_then(FormNode::as_object).unwrap();
        assert_eq!(object.get("host"), Some(&FormNode::Leaf(LeafValue::Text("9.9.9.9".into()))));
        assert_eq!(object.get("port"), Some(&FormNode::Leaf(LeafValue::Text("53".into()))));
    }

    #[test]
    fn mismatched_shapes_render_empty() {
        let schema = fields(json!([
            {"name": "servers", "type": "array"},
            {"name": "labels", "type": "object", "isKeyValueMap": true},
            {"name": "rules", "type": "array-of-objects", "itemProperties": []}
        ]));
        let state = render(
            &schema,
            Some(&json!({"servers": {"a": 1}, "labels": [1, 2], "rules": "nope"})),
        );
        assert!(state.get("servers").and_then(FormNode::as_array).unwrap().is_empty());
        assert!(state.get("labels").and_then(FormNode::as_key_value).unwrap().is_empty());
        assert!(state.get("rules").and_then(FormNode::as_object_list).unwrap().is_empty());
    }

    #[test]
    fn array_of_objects_items_follow_default_positions() {
        let schema = fields(json!([{
            "name": "groups",
            "type": "array-of-objects",
            "default": [{"name": "home"}, {"name": "work"}],
            "itemProperties": [
                {"name": "name", "type": "string"},
                {"name": "enabled", "type": "boolean", "default": true}
            ]
        }]));
        let state = render(&schema, None);
        let list = state.get("groups").and_then(FormNode::as_object_list).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.get(1).and_then(|item| item.get("name")),
            Some(&FormNode::Leaf(LeafValue::Text("work".into())))
        );
        assert_eq!(
            list.get(0).and_then(|item| item.get("enabled")),
            Some(&FormNode::Leaf(LeafValue::Bool(true)))
        );
    }
}
