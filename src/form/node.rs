use super::{
    array::ScalarArrayState,
    composite::{ObjectListState, ObjectState},
    key_value::KeyValueState,
};

/// One field instance in the form tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FormNode {
    Leaf(LeafValue),
    Array(ScalarArrayState),
    Object(ObjectState),
    KeyValue(KeyValueState),
    ObjectList(ObjectListState),
}

/// Scalar leaves keep the text the user sees; numbers are parsed on collect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafValue {
    Text(String),
    Bool(bool),
}

impl LeafValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            LeafValue::Text(text) => Some(text),
            LeafValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LeafValue::Bool(flag) => Some(*flag),
            LeafValue::Text(_) => None,
        }
    }
}

impl FormNode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FormNode::Leaf(LeafValue::Text(_)) => "text",
            FormNode::Leaf(LeafValue::Bool(_)) => "boolean",
            FormNode::Array(_) => "array",
            FormNode::Object(_) => "object",
            FormNode::KeyValue(_) => "key-value map",
            FormNode::ObjectList(_) => "array-of-objects",
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafValue> {
        match self {
            FormNode::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ScalarArrayState> {
        match self {
            FormNode::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectState> {
        match self {
            FormNode::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_key_value(&self) -> Option<&KeyValueState> {
        match self {
            FormNode::KeyValue(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_list(&self) -> Option<&ObjectListState> {
        match self {
            FormNode::ObjectList(list) => Some(list),
            _ => None,
        }
    }
}
