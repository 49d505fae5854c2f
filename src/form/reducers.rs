use crate::domain::{FieldKind, FieldSchema};

use super::{
    actions::FormCommand,
    error::FormError,
    node::{FormNode, LeafValue},
    path::FieldPath,
    render::build_item,
    state::FormState,
};

/// Apply one user action. On error the form is left exactly as it was.
pub fn apply_command(
    state: &mut FormState,
    schema: &[FieldSchema],
    command: FormCommand,
) -> Result<(), FormError> {
    let action = command.name();
    let result = reduce(state, schema, command);
    if let Err(err) = &result {
        tracing::debug!(action, error = %err, "form command rejected");
    }
    result
}

fn reduce(state: &mut FormState, schema: &[FieldSchema], command: FormCommand) -> Result<(), FormError> {
    let path = command.path().clone();
    let action = command.name();
    let target = state.resolve_mut(schema, &path)?;
    let node = target.node;

    match command {
        FormCommand::SetValue { value, .. } => match (target.index, node) {
            (None, FormNode::Leaf(LeafValue::Text(text))) => {
                *text = value;
                Ok(())
            }
            (Some(index), FormNode::Array(array)) => {
                let len = array.len();
                array
                    .set(index, value)
                    .then_some(())
                    .ok_or_else(|| out_of_range(&path, index, len))
            }
            (_, node) => Err(unsupported(&path, node, action)),
        },
        FormCommand::SetBool { value, .. } => match (target.index, node) {
            (None, FormNode::Leaf(LeafValue::Bool(flag))) => {
                *flag = value;
                Ok(())
            }
            (_, node) => Err(unsupported(&path, node, action)),
        },
        FormCommand::AddItem { .. } => match (target.index, node) {
            (None, FormNode::Array(array)) => {
                array.push(String::new());
                Ok(())
            }
            (None, FormNode::ObjectList(list)) => {
                let FieldKind::ArrayOfObjects(list_field) = &target.field.kind else {
                    return Err(FormError::UnknownPath(path.to_string()));
                };
                list.push(build_item(list_field));
                Ok(())
            }
            (None, FormNode::KeyValue(map)) => {
                map.add_entry();
                Ok(())
            }
            (_, node) => Err(unsupported(&path, node, action)),
        },
        FormCommand::RemoveItem { .. } => match (target.index, node) {
            (Some(index), FormNode::Array(array)) => {
                let len = array.len();
                array
                    .remove(index)
                    .map(drop)
                    .ok_or_else(|| out_of_range(&path, index, len))
            }
            (Some(index), FormNode::ObjectList(list)) => {
                let len = list.len();
                list.remove(index)
                    .map(drop)
                    .ok_or_else(|| out_of_range(&path, index, len))
            }
            (Some(index), FormNode::KeyValue(map)) => {
                let len = map.len();
                map.remove(index)
                    .map(drop)
                    .ok_or_else(|| out_of_range(&path, index, len))
            }
            (_, node) => Err(unsupported(&path, node, action)),
        },
        FormCommand::MoveItem { delta, .. } => match (target.index, node) {
            (Some(index), FormNode::Array(array)) => {
                check_move(&path, index, delta, array.len())?;
                array.move_item(index, delta);
                Ok(())
            }
            (Some(index), FormNode::ObjectList(list)) => {
                check_move(&path, index, delta, list.len())?;
                list.move_item(index, delta);
                Ok(())
            }
            (_, node) => Err(unsupported(&path, node, action)),
        },
        FormCommand::AddEntry { .. } => match (target.index, node) {
            (None, FormNode::KeyValue(map)) => {
                map.add_entry();
                Ok(())
            }
            (_, node) => Err(unsupported(&path, node, action)),
        },
        FormCommand::RemoveEntry { .. } => match (target.index, node) {
            (Some(index), FormNode::KeyValue(map)) => {
                let len = map.len();
                map.remove(index)
                    .map(drop)
                    .ok_or_else(|| out_of_range(&path, index, len))
            }
            (_, node) => Err(unsupported(&path, node, action)),
        },
        FormCommand::SetEntryKey { key, .. } => match (target.index, node) {
            (Some(index), FormNode::KeyValue(map)) => {
                let len = map.len();
                map.set_key(index, key)
                    .then_some(())
                    .ok_or_else(|| out_of_range(&path, index, len))
            }
            (_, node) => Err(unsupported(&path, node, action)),
        },
        FormCommand::SetEntryValue { value, .. } => match (target.index, node) {
            (Some(index), FormNode::KeyValue(map)) => {
                let len = map.len();
                map.set_value(index, value)
                    .then_some(())
                    .ok_or_else(|| out_of_range(&path, index, len))
            }
            (_, node) => Err(unsupported(&path, node, action)),
        },
    }
}

fn unsupported(path: &FieldPath, node: &FormNode, action: &'static str) -> FormError {
    FormError::Unsupported {
        path: path.to_string(),
        kind: node.kind_name(),
        action,
    }
}

fn check_index(path: &FieldPath, index: usize, len: usize) -> Result<(), FormError> {
    if index < len {
        Ok(())
    } else {
        Err(out_of_range(path, index, len))
    }
}

/// A move must start on an existing item and land on another one.
fn check_move(path: &FieldPath, index: usize, delta: i32, len: usize) -> Result<(), FormError> {
    check_index(path, index, len)?;
    let target = isize::try_from(delta)
        .ok()
        .and_then(|delta| index.checked_add_signed(delta));
    match target {
        Some(target) if target < len && target != index => Ok(()),
        _ => Err(FormError::MoveOutOfRange {
            path: path.to_string(),
            delta,
            len,
        }),
    }
}

fn out_of_range(path: &FieldPath, index: usize, len: usize) -> FormError {
    FormError::IndexOutOfRange {
        path: path.to_string(),
        index,
        len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::parse_fields,
        form::{collect::collect, render::render},
    };
    use serde_json::json;

    fn schema() -> Vec<FieldSchema> {
        parse_fields(&json!([
            {"name": "port", "type": "number", "default": 53},
            {"name": "enabled", "type": "boolean"},
            {"name": "servers", "type": "array", "default": ["a", "b", "c", "d"]},
            {"name": "labels", "type": "object", "isKeyValueMap": true,
             "default": {"env": "prod", "region": "us"}},
            {"name": "rules", "type": "array-of-objects", "itemProperties": [
                {"name": "domain", "type": "string"},
                {"name": "action", "type": "select", "options": [{"value": "block"}, {"value": "allow"}]},
                {"name": "tags", "type": "array"}
            ]}
        ]))
        .unwrap()
    }

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    #[test]
    fn removing_an_array_item_shifts_later_items_down() {
        let schema = schema();
        let mut state = render(&schema, None);
        apply_command(&mut state, &schema, FormCommand::RemoveItem { path: path("servers[1]") }).unwrap();
        assert_eq!(collect(&state, &schema)["servers"], json!(["a", "c", "d"]));
    }

    #[test]
    fn removing_a_map_entry_drops_it_from_output() {
        let schema = schema();
        let mut state = render(&schema, None);
        apply_command(&mut state, &schema, FormCommand::RemoveEntry { path: path("labels[1]") }).unwrap();
        assert_eq!(collect(&state, &schema)["labels"], json!({"env": "prod"}));
    }

    #[test]
    fn new_list_items_start_from_item_defaults() {
        let schema = schema();
        let mut state = render(&schema, None);
        apply_command(&mut state, &schema, FormCommand::AddItem { path: path("rules") }).unwrap();
        apply_command(
            &mut state,
            &schema,
            FormCommand::SetValue {
                path: path("rules[0].domain"),
                value: "ads.example".into(),
            },
        )
        .unwrap();
        apply_command(&mut state, &schema, FormCommand::AddItem { path: path("rules[0].tags") }).unwrap();
        apply_command(
            &mut state,
            &schema,
            FormCommand::SetValue {
                path: path("rules[0].tags[0]"),
                value: "ads".into(),
            },
        )
        .unwrap();
        assert_eq!(
            collect(&state, &schema)["rules"],
            json!([{"domain": "ads.example", "action": "block", "tags": ["ads"]}])
        );
    }

    #[test]
    fn rejected_commands_leave_the_form_untouched() {
        let schema = schema();
        let mut state = render(&schema, None);
        let before = state.clone();
        let err = apply_command(&mut state, &schema, FormCommand::RemoveItem { path: path("servers[9]") });
        assert_eq!(
            err,
            Err(FormError::IndexOutOfRange {
                path: "servers[9]".into(),
                index: 9,
                len: 4
            })
        );
        let err = apply_command(
            &mut state,
            &schema,
            FormCommand::SetBool {
                path: path("port"),
                value: true,
            },
        );
        assert!(matches!(err, Err(FormError::Unsupported { kind: "text", .. })));
        assert_eq!(state, before);
    }

    #[test]
    fn entries_can_be_renamed_and_edited() {
        let schema = schema();
        let mut state = render(&schema, None);
        apply_command(&mut state, &schema, FormCommand::AddEntry { path: path("labels") }).unwrap();
        apply_command(
            &mut state,
            &schema,
            FormCommand::SetEntryKey {
                path: path("labels[2]"),
                key: "tier".into(),
            },
        )
        .unwrap();
        apply_command(
            &mut state,
            &schema,
            FormCommand::SetEntryValue {
                path: path("labels[2]"),
                value: " gold ".into(),
            },
        )
        .unwrap();
        assert_eq!(
            collect(&state, &schema)["labels"],
            json!({"env": "prod", "region": "us", "tier": "gold"})
        );
    }

    #[test]
    fn moving_items_swaps_neighbours() {
        let schema = schema();
        let mut state = render(&schema, None);
        apply_command(
            &mut state,
            &schema,
            FormCommand::MoveItem {
                path: path("servers[0]"),
                delta: 1,
            },
        )
        .unwrap();
        assert_eq!(collect(&state, &schema)["servers"], json!(["b", "a", "c", "d"]));
    }

    #[test]
    fn moves_past_either_end_are_rejected() {
        let schema = schema();
        let mut state = render(&schema, Some(&json!({"servers": ["a", "b"]})));
        let before = state.clone();
        let err = apply_command(
            &mut state,
            &schema,
            FormCommand::MoveItem {
                path: path("servers[1]"),
                delta: 5,
            },
        );
        assert_eq!(
            err,
            Err(FormError::MoveOutOfRange {
                path: "servers[1]".into(),
                delta: 5,
                len: 2
            })
        );
        let err = apply_command(
            &mut state,
            &schema,
            FormCommand::MoveItem {
                path: path("servers[0]"),
                delta: -1,
            },
        );
        assert!(matches!(err, Err(FormError::MoveOutOfRange { delta: -1, .. })));
        assert_eq!(state, before);
    }
}
