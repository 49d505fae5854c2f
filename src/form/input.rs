use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::{FieldKind, FieldSchema};

use super::{
    convert::adjust_numeric_value,
    error::FormError,
    node::{FormNode, LeafValue},
    path::FieldPath,
    state::FormState,
};

/// Edit the leaf (or scalar array item) at `path` with one key press.
/// Returns `Ok(true)` when the value changed, `Ok(false)` for keys the
/// field ignores.
pub fn handle_key(
    state: &mut FormState,
    schema: &[FieldSchema],
    path: &FieldPath,
    key: &KeyEvent,
    step: f64,
) -> Result<bool, FormError> {
    let target = state.resolve_mut(schema, path)?;
    let field = target.field;
    match (target.index, target.node) {
        (None, FormNode::Leaf(LeafValue::Bool(flag))) => Ok(toggle(flag, key)),
        (None, FormNode::Leaf(LeafValue::Text(buffer))) => Ok(match &field.kind {
            FieldKind::Select(options) => {
                let values: Vec<&str> = options.iter().map(|option| option.value.as_str()).collect();
                cycle(buffer, &values, key)
            }
            FieldKind::Number { .. } => match key.code {
                KeyCode::Left => adjust_numeric_value(buffer, &field.kind, -step),
                KeyCode::Right => adjust_numeric_value(buffer, &field.kind, step),
                _ => edit_text(buffer, key, false),
            },
            FieldKind::Textarea { .. } => edit_text(buffer, key, true),
            _ => edit_text(buffer, key, false),
        }),
        (Some(index), FormNode::Array(array)) => {
            let len = array.len();
            let Some(current) = array.get(index) else {
                return Err(FormError::IndexOutOfRange {
                    path: path.to_string(),
                    index,
                    len,
                });
            };
            let mut buffer = current.to_string();
            let changed = edit_text(&mut buffer, key, false);
            if changed {
                array.set(index, buffer);
            }
            Ok(changed)
        }
        (_, node) => Err(FormError::Unsupported {
            path: path.to_string(),
            kind: node.kind_name(),
            action: "be edited with keys",
        }),
    }
}

fn toggle(flag: &mut bool, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
            *flag = !*flag;
            true
        }
        _ => false,
    }
}

fn cycle(buffer: &mut String, options: &[&str], key: &KeyEvent) -> bool {
    if options.is_empty() {
        return false;
    }
    let current = options.iter().position(|option| *option == buffer.as_str());
    let next = match (key.code, current) {
        (KeyCode::Down, Some(index)) => (index + 1) % options.len(),
        (KeyCode::Up, Some(0)) => options.len() - 1,
        (KeyCode::Up, Some(index)) => index - 1,
        (KeyCode::Down | KeyCode::Up, None) => 0,
        _ => return false,
    };
    *buffer = options[next].to_string();
    true
}

fn edit_text(buffer: &mut String, key: &KeyEvent, multiline: bool) -> bool {
    match key.code {
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return false;
            }
            buffer.push(ch);
            true
        }
        KeyCode::Enter if multiline => {
            buffer.push('\n');
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Delete => {
            let changed = !buffer.is_empty();
            buffer.clear();
            changed
        }
        _ => false,
    }
}
