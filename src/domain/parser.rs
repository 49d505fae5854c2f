use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::schema::{
    AppSchema, ArrayField, FieldKind, FieldSchema, KeyValueField, ObjectField, ObjectListField,
    SelectOption,
};

#[derive(Debug, Error)]
pub enum SchemaParseError {
    #[error("malformed schema document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("schema document is missing required metadata (id, name)")]
    MissingMetadata,
}

#[derive(Debug, Deserialize)]
struct RawAppSchema {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default, rename = "type")]
    field_type: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    help: Option<String>,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    rows: Option<u16>,
    #[serde(default)]
    options: Vec<RawOption>,
    #[serde(default)]
    item_type: Option<String>,
    #[serde(default)]
    item_label: Option<String>,
    #[serde(default)]
    properties: Vec<RawField>,
    #[serde(default)]
    is_key_value_map: bool,
    #[serde(default)]
    key_label: Option<String>,
    #[serde(default)]
    value_label: Option<String>,
    #[serde(default)]
    key_placeholder: Option<String>,
    #[serde(default)]
    value_placeholder: Option<String>,
    #[serde(default)]
    value_is_array: bool,
    #[serde(default)]
    item_properties: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    value: Value,
    #[serde(default)]
    label: Option<String>,
}

/// Parse a full schema document (`{id, name, description, fields}`).
pub fn parse_app_schema(value: &Value) -> Result<AppSchema, SchemaParseError> {
    let raw = RawAppSchema::deserialize(value)?;
    let (Some(id), Some(name)) = (raw.id, raw.name) else {
        return Err(SchemaParseError::MissingMetadata);
    };
    if id.is_empty() || name.is_empty() {
        return Err(SchemaParseError::MissingMetadata);
    }
    Ok(AppSchema {
        id,
        name,
        description: raw.description.unwrap_or_default(),
        fields: raw.fields.into_iter().map(convert_field).collect(),
    })
}

/// Parse a bare list of field descriptors.
pub fn parse_fields(value: &Value) -> Result<Vec<FieldSchema>, SchemaParseError> {
    let raw = Vec::<RawField>::deserialize(value)?;
    Ok(raw.into_iter().map(convert_field).collect())
}

fn convert_field(raw: RawField) -> FieldSchema {
    let field_type = raw.field_type.as_deref().unwrap_or("string");
    let kind = match field_type {
        "boolean" => FieldKind::Boolean,
        "number" => FieldKind::Number {
            min: raw.min,
            max: raw.max,
        },
        "string" => FieldKind::String,
        "url" => FieldKind::Url,
        "textarea" => FieldKind::Textarea { rows: raw.rows },
        "select" => FieldKind::Select(raw.options.into_iter().map(convert_option).collect()),
        "array" => FieldKind::Array(ArrayField {
            item_type: raw.item_type.unwrap_or_else(|| "string".to_string()),
            item_label: raw.item_label,
        }),
        "object" if raw.is_key_value_map => FieldKind::Object(ObjectField::KeyValue(KeyValueField {
            key_label: raw.key_label,
            value_label: raw.value_label,
            key_placeholder: raw.key_placeholder,
            value_placeholder: raw.value_placeholder,
            value_is_array: raw.value_is_array,
        })),
        "object" => FieldKind::Object(ObjectField::Properties(
            raw.properties.into_iter().map(convert_field).collect(),
        )),
        "array-of-objects" => FieldKind::ArrayOfObjects(ObjectListField {
            item_label: raw.item_label,
            item_properties: raw.item_properties.into_iter().map(convert_field).collect(),
        }),
        other => {
            tracing::debug!(field = %raw.name, field_type = other, "unknown field type, rendering as string");
            FieldKind::String
        }
    };

    FieldSchema {
        label: raw.label.unwrap_or_else(|| raw.name.clone()),
        name: raw.name,
        required: raw.required,
        help: raw.help.filter(|help| !help.is_empty()),
        default: raw.default,
        placeholder: raw.placeholder,
        kind,
    }
}

fn convert_option(raw: RawOption) -> SelectOption {
    let value = match raw.value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    };
    SelectOption {
        label: raw.label.unwrap_or_else(|| value.clone()),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_nested_field_kinds() {
        let doc = json!({
            "id": "split-horizon",
            "name": "Split Horizon",
            "fields": [
                {"name": "enableBlocking", "label": "Enable", "type": "boolean", "default": true},
                {"name": "networks", "type": "object", "isKeyValueMap": true, "valueIsArray": true},
                {
                    "name": "groups",
                    "type": "array-of-objects",
                    "itemProperties": [
                        {"name": "name", "type": "string"},
                        {"name": "allowed", "type": "array"}
                    ]
                }
            ]
        });
        let schema = parse_app_schema(&doc).unwrap();
        assert_eq!(schema.description, "");
        assert_eq!(schema.fields.len(), 3);
        assert_eq!(schema.fields[0].kind, FieldKind::Boolean);
        assert_eq!(schema.fields[1].label, "networks");
        match &schema.fields[1].kind {
            FieldKind::Object(ObjectField::KeyValue(map)) => assert!(map.value_is_array),
            other => panic!("unexpected kind {other:?}"),
        }
        match &schema.fields[2].kind {
            FieldKind::ArrayOfObjects(list) => {
                let (simple, complex) = list.partition();
                assert_eq!(simple[0].name, "name");
                assert_eq!(complex[0].name, "allowed");
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn unknown_type_falls_back_to_string() {
        let fields = parse_fields(&json!([{"name": "colour", "type": "color-picker"}])).unwrap();
        assert_eq!(fields[0].kind, FieldKind::String);
    }

    #[test]
    fn select_options_accept_non_string_values() {
        let fields = parse_fields(&json!([{
            "name": "mode",
            "type": "select",
            "options": [{"value": 1, "label": "One"}, {"value": "two"}]
        }]))
        .unwrap();
        let FieldKind::Select(options) = &fields[0].kind else {
            panic!("expected select");
        };
        assert_eq!(options[0].value, "1");
        assert_eq!(options[1].label, "two");
    }

    #[test]
    fn rejects_documents_without_metadata() {
        let err = parse_app_schema(&json!({"name": "No id", "fields": []})).unwrap_err();
        assert!(matches!(err, SchemaParseError::MissingMetadata));
    }
}
