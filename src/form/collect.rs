//! Serializes a form tree back into the JSON shape its schema describes.

use serde_json::{Map, Value};

use crate::domain::{FieldKind, FieldSchema, ObjectField, ObjectListField};

use super::{
    composite::{ObjectListState, ObjectState},
    convert::{number_value, string_value, value_to_bool, value_to_string},
    node::{FormNode, LeafValue},
    state::FormState,
};

/// Collect the form into a JSON object. Empty values are left out; booleans
/// are always present.
pub fn collect(state: &FormState, schema: &[FieldSchema]) -> Value {
    Value::Object(collect_fields(schema, state.root()))
}

pub(crate) fn collect_fields(fields: &[FieldSchema], object: &ObjectState) -> Map<String, Value> {
    let mut map = Map::new();
    for field in fields {
        let Some(node) = object.get(&field.name) else {
            continue;
        };
        if let Some(value) = collect_node(field, node) {
            map.insert(field.name.clone(), value);
        }
    }
    map
}

/// Resolved value of one node, or `None` when it is empty.
pub(crate) fn collect_node(field: &FieldSchema, node: &FormNode) -> Option<Value> {
    match (&field.kind, node) {
        (FieldKind::Boolean, FormNode::Leaf(leaf)) => Some(Value::Bool(leaf_bool(leaf))),
        (FieldKind::Number { .. }, FormNode::Leaf(leaf)) => leaf.as_text().and_then(number_value),
        (
            FieldKind::String | FieldKind::Url | FieldKind::Textarea { .. } | FieldKind::Select(_),
            FormNode::Leaf(leaf),
        ) => leaf.as_text().and_then(string_value),
        (FieldKind::Array(_), FormNode::Array(array)) => {
            let values = array.values();
            (!values.is_empty()).then(|| Value::Array(values.into_iter().map(Value::String).collect()))
        }
        (FieldKind::Object(ObjectField::KeyValue(kv)), FormNode::KeyValue(map)) => {
            let map = map.build_map(kv.value_is_array);
            (!map.is_empty()).then_some(Value::Object(map))
        }
        (FieldKind::Object(ObjectField::Properties(properties)), FormNode::Object(object)) => {
            let map = collect_fields(properties, object);
            (!map.is_empty()).then_some(Value::Object(map))
        }
        (FieldKind::ArrayOfObjects(list_field), FormNode::ObjectList(list)) => {
            let items = collect_list(list_field, list);
            (!items.is_empty()).then_some(Value::Array(items))
        }
        (kind, node) => {
            tracing::debug!(
                field = %field.name,
                expected = kind.type_name(),
                found = node.kind_name(),
                "node does not match its field kind, skipping"
            );
            None
        }
    }
}

fn leaf_bool(leaf: &LeafValue) -> bool {
    match leaf {
        LeafValue::Bool(flag) => *flag,
        LeafValue::Text(text) => value_to_bool(&Value::String(text.clone())),
    }
}

/// Retained items of an array-of-objects field, in order.
pub(crate) fn collect_list(list_field: &ObjectListField, list: &ObjectListState) -> Vec<Value> {
    list.items()
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let collected = collect_item(&list_field.item_properties, item);
            if collected.is_none() {
                tracing::debug!(index, "dropping list item with no populated properties");
            }
            collected.map(Value::Object)
        })
        .collect()
}

/// One list item. Properties left empty fall back to their schema default.
/// The item survives only if some property differs from what a fresh item
/// starts with (its default, a `false` flag, the first select option, an
/// empty list) or it carries a `name` entry.
fn collect_item(properties: &[FieldSchema], item: &ObjectState) -> Option<Map<String, Value>> {
    let mut map = Map::new();
    let mut populated = false;
    for property in properties {
        let Some(node) = item.get(&property.name) else {
            continue;
        };
        match (&property.kind, node) {
            (FieldKind::Boolean, FormNode::Leaf(leaf)) => {
                let flag = leaf_bool(leaf);
                let baseline = property.meaningful_default().is_some_and(value_to_bool);
                populated |= flag != baseline;
                map.insert(property.name.clone(), Value::Bool(flag));
            }
            (FieldKind::Array(_), FormNode::Array(array)) => {
                let value = Value::Array(array.values().into_iter().map(Value::String).collect());
                populated |= !array_is_empty(&value) && differs_from_default(property, &value);
                map.insert(property.name.clone(), value);
            }
            (FieldKind::ArrayOfObjects(nested), FormNode::ObjectList(list)) => {
                let items = collect_list(nested, list);
                populated |= !items.is_empty();
                map.insert(property.name.clone(), Value::Array(items));
            }
            _ => match collect_node(property, node) {
                Some(value) => {
                    populated |= differs_from_default(property, &value);
                    map.insert(property.name.clone(), value);
                }
                None => {
                    if let Some(default) = property.meaningful_default() {
                        map.insert(property.name.clone(), default.clone());
                    }
                }
            },
        }
    }
    (populated || map.contains_key("name")).then_some(map)
}

fn array_is_empty(value: &Value) -> bool {
    value.as_array().is_some_and(Vec::is_empty)
}

/// Whether a collected value is something other than what a fresh item
/// starts with. Scalars compare by their text form, so `"30"` matches `30`.
fn differs_from_default(property: &FieldSchema, value: &Value) -> bool {
    let baseline = match (property.meaningful_default(), &property.kind) {
        (Some(default), _) => default.clone(),
        (None, FieldKind::Select(options)) => match options.first() {
            Some(first) => Value::String(first.value.clone()),
            None => return true,
        },
        (None, _) => return true,
    };
    match (value, &baseline) {
        (Value::Object(_), _) | (_, Value::Object(_)) => *value != baseline,
        _ => value_to_string(value) != value_to_string(&baseline),
    }
}
