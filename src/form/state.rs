use crate::domain::{FieldKind, FieldSchema, ObjectField};

use super::{
    composite::ObjectState,
    error::FormError,
    node::FormNode,
    path::{FieldPath, Segment},
};

/// Live form tree for one schema. The schema itself is not owned; every
/// operation that needs field metadata takes it alongside the state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    root: ObjectState,
}

/// A field instance reached through a qualified path. `index` is set when
/// the path ends in an index into the field (array item, map entry or
/// list item).
pub(crate) struct Resolved<'s, 'n> {
    pub field: &'s FieldSchema,
    pub node: &'n mut FormNode,
    pub index: Option<usize>,
}

impl FormState {
    pub fn from_root(root: ObjectState) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &ObjectState {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut ObjectState {
        &mut self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FormNode> {
        self.root.get(name)
    }

    /// Node addressed by `path`. Indices step into array-of-objects items;
    /// a trailing index has no node of its own and yields `None`.
    pub fn node(&self, path: &FieldPath) -> Option<&FormNode> {
        node_in(&self.root, path.segments())
    }

    pub(crate) fn resolve_mut<'s, 'n>(
        &'n mut self,
        schema: &'s [FieldSchema],
        path: &FieldPath,
    ) -> Result<Resolved<'s, 'n>, FormError> {
        resolve(schema, &mut self.root, path.segments(), path)
    }
}

/// Schema of the field addressed by `path`, ignoring any trailing index.
pub fn field_at<'s>(schema: &'s [FieldSchema], path: &FieldPath) -> Option<&'s FieldSchema> {
    let mut fields = schema;
    let mut current = None;
    for segment in path.segments() {
        match segment {
            Segment::Field(name) => {
                if let Some(parent) = current {
                    fields = nested_fields(parent)?;
                }
                current = Some(FieldSchema::find_property(fields, name)?);
            }
            Segment::Index(_) => {}
        }
    }
    current
}

fn node_in<'a>(object: &'a ObjectState, segments: &[Segment]) -> Option<&'a FormNode> {
    let (Segment::Field(name), rest) = segments.split_first()? else {
        return None;
    };
    let node = object.get(name)?;
    match (rest, node) {
        ([], _) => Some(node),
        ([Segment::Field(_), ..], FormNode::Object(inner)) => node_in(inner, rest),
        ([Segment::Index(index), tail @ ..], FormNode::ObjectList(list)) if !tail.is_empty() => {
            node_in(list.get(*index)?, tail)
        }
        _ => None,
    }
}

fn nested_fields(field: &FieldSchema) -> Option<&[FieldSchema]> {
    match &field.kind {
        FieldKind::Object(ObjectField::Properties(properties)) => Some(properties),
        FieldKind::ArrayOfObjects(list) => Some(&list.item_properties),
        _ => None,
    }
}

fn resolve<'s, 'n>(
    fields: &'s [FieldSchema],
    object: &'n mut ObjectState,
    segments: &[Segment],
    path: &FieldPath,
) -> Result<Resolved<'s, 'n>, FormError> {
    let unknown = || FormError::UnknownPath(path.to_string());
    let Some((Segment::Field(name), rest)) = segments.split_first() else {
        return Err(unknown());
    };
    let field = FieldSchema::find_property(fields, name).ok_or_else(unknown)?;
    let node = object.get_mut(name).ok_or_else(unknown)?;
    match rest {
        [] => Ok(Resolved {
            field,
            node,
            index: None,
        }),
        [Segment::Index(index)] => Ok(Resolved {
            field,
            node,
            index: Some(*index),
        }),
        [Segment::Field(_), ..] => match (&field.kind, node) {
            (FieldKind::Object(ObjectField::Properties(properties)), FormNode::Object(inner)) => {
                resolve(properties, inner, rest, path)
            }
            _ => Err(unknown()),
        },
        [Segment::Index(index), tail @ ..] => match (&field.kind, node) {
            (FieldKind::ArrayOfObjects(list_field), FormNode::ObjectList(list)) => {
                let len = list.len();
                let item = list.get_mut(*index).ok_or_else(|| FormError::IndexOutOfRange {
                    path: path.to_string(),
                    index: *index,
                    len,
                })?;
                resolve(&list_field.item_properties, item, tail, path)
            }
            _ => Err(unknown()),
        },
    }
}
