use serde_json::Value;

/// One loadable schema document: app metadata plus its ordered field list.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSchema {
    pub id: String,
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldSchema>,
}

/// Catalog entry identifying one loadable schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub schema_ref: SchemaRef,
}

/// Opaque reference a catalog understands (a file name for directory catalogs).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaRef(pub String);

impl SchemaRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub help: Option<String>,
    pub default: Option<Value>,
    pub placeholder: Option<String>,
    pub kind: FieldKind,
}

/// The nine field kinds a schema may declare.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Boolean,
    Number { min: Option<f64>, max: Option<f64> },
    String,
    Url,
    Textarea { rows: Option<u16> },
    Select(Vec<SelectOption>),
    Array(ArrayField),
    Object(ObjectField),
    ArrayOfObjects(ObjectListField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayField {
    pub item_type: String,
    pub item_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectField {
    Properties(Vec<FieldSchema>),
    KeyValue(KeyValueField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueField {
    pub key_label: Option<String>,
    pub value_label: Option<String>,
    pub key_placeholder: Option<String>,
    pub value_placeholder: Option<String>,
    pub value_is_array: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectListField {
    pub item_label: Option<String>,
    pub item_properties: Vec<FieldSchema>,
}

impl ObjectListField {
    /// Splits item properties into the inline row and the block below it.
    /// Purely a layout concern; collect and populate ignore it.
    pub fn partition(&self) -> (Vec<&FieldSchema>, Vec<&FieldSchema>) {
        self.item_properties
            .iter()
            .partition(|property| property.kind.is_simple())
    }
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::Number { .. } => "number",
            FieldKind::String => "string",
            FieldKind::Url => "url",
            FieldKind::Textarea { .. } => "textarea",
            FieldKind::Select(_) => "select",
            FieldKind::Array(_) => "array",
            FieldKind::Object(_) => "object",
            FieldKind::ArrayOfObjects(_) => "array-of-objects",
        }
    }

    pub fn is_simple(&self) -> bool {
        matches!(
            self,
            FieldKind::Boolean
                | FieldKind::Number { .. }
                | FieldKind::String
                | FieldKind::Url
                | FieldKind::Select(_)
        )
    }

    /// Kinds that render their own collapsible header.
    pub fn has_own_header(&self) -> bool {
        matches!(
            self,
            FieldKind::Array(_) | FieldKind::Object(_) | FieldKind::ArrayOfObjects(_)
        )
    }
}

impl FieldSchema {
    pub fn find_property<'a>(fields: &'a [FieldSchema], name: &str) -> Option<&'a FieldSchema> {
        fields.iter().find(|field| field.name == name)
    }

    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }

    /// Schema-level default that collect falls back to inside array-of-objects items.
    pub fn meaningful_default(&self) -> Option<&Value> {
        match self.default.as_ref() {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text.is_empty() => None,
            Some(other) => Some(other),
        }
    }
}
