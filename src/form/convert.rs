use serde_json::{Number, Value};

use crate::domain::FieldKind;

/// Text a leaf shows for an arbitrary JSON value. Objects have no scalar
/// rendering and come back empty.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(num) => num.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(items) => array_to_string(items),
        Value::Null => String::new(),
        Value::Object(_) => {
            tracing::debug!("object value has no scalar form, recording empty");
            String::new()
        }
    }
}

pub(crate) fn array_to_string(items: &[Value]) -> String {
    items
        .iter()
        .map(value_to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Truthiness used when a non-boolean lands in a checkbox.
pub(crate) fn value_to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(num) => num.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => {
            let trimmed = text.trim();
            !(trimmed.is_empty() || trimmed.eq_ignore_ascii_case("false") || trimmed == "0")
        }
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn split_list(contents: &str) -> Vec<String> {
    contents
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn string_value(contents: &str) -> Option<Value> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(Value::String(trimmed.to_string()))
}

/// Numeric parse that never fails: unparsable input is kept as the raw string.
pub(crate) fn number_value(contents: &str) -> Option<Value> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Value::from(int));
    }
    if let Ok(uint) = trimmed.parse::<u64>() {
        return Some(Value::from(uint));
    }
    let parsed = trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number);
    Some(parsed.unwrap_or_else(|| Value::String(trimmed.to_string())))
}

/// Step a number buffer by `step`, staying within the field's `min`/`max`.
/// Returns whether the text changed; non-number kinds are left alone.
pub(crate) fn adjust_numeric_value(buffer: &mut String, kind: &FieldKind, step: f64) -> bool {
    let FieldKind::Number { min, max } = kind else {
        return false;
    };
    let trimmed = buffer.trim();
    let next = match trimmed.parse::<i64>() {
        Ok(current) if step.fract() == 0.0 => {
            let next = current.saturating_add(step as i64);
            match crossed_bound(next as f64, *min, *max) {
                Some(bound) => bound.to_string(),
                None => next.to_string(),
            }
        }
        _ => {
            let next = trimmed.parse::<f64>().unwrap_or(0.0) + step;
            crossed_bound(next, *min, *max).unwrap_or(next).to_string()
        }
    };
    if next == *buffer {
        return false;
    }
    *buffer = next;
    true
}

fn crossed_bound(value: f64, min: Option<f64>, max: Option<f64>) -> Option<f64> {
    match (min, max) {
        (_, Some(max)) if value > max => Some(max),
        (Some(min), _) if value < min => Some(min),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn number_value_keeps_integers_and_falls_back_to_text() {
        assert_eq!(number_value(" 53 "), Some(json!(53)));
        assert_eq!(number_value("0.5"), Some(json!(0.5)));
        assert_eq!(number_value("fast"), Some(json!("fast")));
        assert_eq!(number_value("NaN"), Some(json!("NaN")));
        assert_eq!(number_value("   "), None);
    }

    #[test]
    fn split_list_trims_and_drops_blanks() {
        assert_eq!(split_list(" a, b ,,c "), vec!["a", "b", "c"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn arrays_render_as_comma_joined_text() {
        assert_eq!(value_to_string(&json!(["10.0.0.0/8", 7, true])), "10.0.0.0/8, 7, true");
        assert_eq!(value_to_string(&json!({"a": 1})), "");
    }

    #[test]
    fn adjusts_integers_and_floats() {
        let unbounded = FieldKind::Number { min: None, max: None };
        let mut buffer = "41".to_string();
        assert!(adjust_numeric_value(&mut buffer, &unbounded, 1.0));
        assert_eq!(buffer, "42");
        let mut buffer = "1.5".to_string();
        adjust_numeric_value(&mut buffer, &unbounded, -1.0);
        assert_eq!(buffer, "0.5");
        let mut buffer = String::new();
        adjust_numeric_value(&mut buffer, &unbounded, 1.0);
        assert_eq!(buffer, "1");
        assert!(!adjust_numeric_value(&mut buffer, &FieldKind::String, 1.0));
    }

    #[test]
    fn stepping_stops_at_field_bounds() {
        let ttl = FieldKind::Number {
            min: Some(0.0),
            max: Some(10.0),
        };
        let mut buffer = "9".to_string();
        assert!(adjust_numeric_value(&mut buffer, &ttl, 5.0));
        assert_eq!(buffer, "10");
        assert!(!adjust_numeric_value(&mut buffer, &ttl, 1.0));
        assert_eq!(buffer, "10");

        let mut buffer = "0.5".to_string();
        assert!(adjust_numeric_value(&mut buffer, &ttl, -1.0));
        assert_eq!(buffer, "0");
        assert!(!adjust_numeric_value(&mut buffer, &ttl, -1.0));
    }
}
