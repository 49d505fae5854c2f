use std::collections::HashSet;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::{
    app::FormOptions,
    domain::{FieldKind, FieldSchema, KeyValueField, ObjectField, ObjectListField},
    form::{FieldPath, FormNode, FormState, KeyValueState, LeafValue, ObjectState, ScalarArrayState},
};

const EXPANDED: &str = "▼";
const COLLAPSED: &str = "▶";

/// Collapsed sections, keyed by qualified path. Everything starts expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    collapsed: HashSet<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, path: &FieldPath) -> bool {
        self.collapsed.contains(&path.to_string())
    }

    /// Flip a section and return whether it is now collapsed.
    pub fn toggle(&mut self, path: &FieldPath) -> bool {
        let key = path.to_string();
        if self.collapsed.remove(&key) {
            false
        } else {
            self.collapsed.insert(key);
            true
        }
    }

    pub fn collapse(&mut self, path: &FieldPath) {
        self.collapsed.insert(path.to_string());
    }

    pub fn expand(&mut self, path: &FieldPath) {
        self.collapsed.remove(&path.to_string());
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }
}

/// Project a form onto styled terminal lines in schema order.
pub fn form_lines(
    state: &FormState,
    schema: &[FieldSchema],
    view: &ViewState,
    options: &FormOptions,
) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    if schema.is_empty() {
        out.push(Line::from(Span::styled(
            "No configuration fields defined for this app.",
            Style::default().fg(Color::DarkGray),
        )));
        return out;
    }
    let mut ctx = LineBuilder {
        view,
        options,
        out: &mut out,
    };
    ctx.fields(schema, state.root(), None, 0);
    out
}

struct LineBuilder<'a> {
    view: &'a ViewState,
    options: &'a FormOptions,
    out: &'a mut Vec<Line<'static>>,
}

impl LineBuilder<'_> {
    fn fields(&mut self, fields: &[FieldSchema], object: &ObjectState, parent: Option<&FieldPath>, depth: usize) {
        for field in fields {
            let Some(node) = object.get(&field.name) else {
                continue;
            };
            let path = match parent {
                Some(parent) => parent.clone().field(&field.name),
                None => FieldPath::root(&field.name),
            };
            self.field(field, node, &path, depth);
        }
    }

    fn field(&mut self, field: &FieldSchema, node: &FormNode, path: &FieldPath, depth: usize) {
        if field.kind.has_own_header() {
            let options = self.options;
            let collapsed = self.view.is_collapsed(path);
            self.header(field, collapsed, depth);
            if collapsed {
                return;
            }
            self.help(field, depth + 1);
            match (&field.kind, node) {
                (FieldKind::Array(array_field), FormNode::Array(array)) => {
                    let label = array_field.item_label.as_deref().unwrap_or(&options.item_label);
                    self.array_items(array, label, depth + 1);
                }
                (FieldKind::Object(ObjectField::Properties(properties)), FormNode::Object(object)) => {
                    self.fields(properties, object, Some(path), depth + 1);
                }
                (FieldKind::Object(ObjectField::KeyValue(kv)), FormNode::KeyValue(map)) => {
                    self.entries(kv, map, depth + 1);
                }
                (FieldKind::ArrayOfObjects(list_field), FormNode::ObjectList(list)) => {
                    for (index, item) in list.items().iter().enumerate() {
                        self.list_item(list_field, item, &path.clone().index(index), index, depth + 1);
                    }
                    let label = list_field.item_label.as_deref().unwrap_or(&options.item_label);
                    self.add_hint(label, depth + 1);
                }
                _ => self.mismatch(depth + 1),
            }
            return;
        }

        let indent = indent(depth);
        match (&field.kind, node) {
            (FieldKind::Boolean, FormNode::Leaf(LeafValue::Bool(flag))) => {
                let mark = if *flag { "[x]" } else { "[ ]" };
                self.out.push(Line::from(vec![
                    Span::raw(format!("{indent}{mark} ")),
                    Span::styled(field.display_label(), label_style()),
                ]));
            }
            (FieldKind::Textarea { rows }, FormNode::Leaf(LeafValue::Text(text))) => {
                self.out.push(Line::from(Span::styled(
                    format!("{indent}{}:", field.display_label()),
                    label_style(),
                )));
                let body = if text.is_empty() { placeholder(field) } else { text.clone() };
                let mut shown = 0;
                for line in body.lines() {
                    self.out.push(Line::from(Span::styled(
                        format!("{indent}  {line}"),
                        value_style(text.is_empty()),
                    )));
                    shown += 1;
                }
                // keep the box at least `rows` tall
                for _ in shown..usize::from(rows.unwrap_or(1)) {
                    self.out.push(Line::from(format!("{indent}  ")));
                }
            }
            (_, FormNode::Leaf(LeafValue::Text(text))) => {
                let shown = match &field.kind {
                    FieldKind::Select(options) => options
                        .iter()
                        .find(|option| &option.value == text)
                        .map(|option| option.label.clone())
                        .unwrap_or_else(|| text.clone()),
                    _ => text.clone(),
                };
                let empty = shown.is_empty();
                let shown = if empty { placeholder(field) } else { shown };
                self.out.push(Line::from(vec![
                    Span::styled(format!("{indent}{}: ", field.display_label()), label_style()),
                    Span::styled(shown, value_style(empty)),
                ]));
            }
            _ => self.mismatch(depth),
        }
        self.help(field, depth + 1);
    }

    fn header(&mut self, field: &FieldSchema, collapsed: bool, depth: usize) {
        let marker = if collapsed { COLLAPSED } else { EXPANDED };
        self.out.push(Line::from(Span::styled(
            format!("{}{marker} {}", indent(depth), field.display_label()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    fn help(&mut self, field: &FieldSchema, depth: usize) {
        let Some(help) = &field.help else {
            return;
        };
        let width = usize::from(self.options.help_width).saturating_sub(depth * 2).max(10);
        for line in wrap(help, width) {
            self.out.push(Line::from(Span::styled(
                format!("{}{}", indent(depth), line),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    fn array_items(&mut self, array: &ScalarArrayState, label: &str, depth: usize) {
        for (index, item) in array.items().iter().enumerate() {
            self.out.push(Line::from(vec![
                Span::styled(format!("{}{label} {}: ", indent(depth), index + 1), label_style()),
                Span::styled(item.clone(), value_style(false)),
            ]));
        }
        self.add_hint(label, depth);
    }

    fn entries(&mut self, kv: &KeyValueField, map: &KeyValueState, depth: usize) {
        let options = self.options;
        let key_label = kv.key_label.as_deref().unwrap_or(&options.key_label);
        let value_label = kv.value_label.as_deref().unwrap_or(&options.value_label);
        let key_width = map
            .entries()
            .iter()
            .map(|entry| UnicodeWidthStr::width(entry.key.as_str()))
            .max()
            .unwrap_or(0);
        for entry in map.entries() {
            let pad = key_width - UnicodeWidthStr::width(entry.key.as_str());
            self.out.push(Line::from(vec![
                Span::styled(format!("{}{key_label} ", indent(depth)), label_style()),
                Span::styled(format!("{}{}  ", entry.key, " ".repeat(pad)), value_style(false)),
                Span::styled(format!("{value_label} "), label_style()),
                Span::styled(entry.value.clone(), value_style(false)),
            ]));
        }
        self.add_hint("Entry", depth);
    }

    fn list_item(
        &mut self,
        list_field: &ObjectListField,
        item: &ObjectState,
        path: &FieldPath,
        index: usize,
        depth: usize,
    ) {
        let options = self.options;
        let label = list_field.item_label.as_deref().unwrap_or(&options.item_label);
        self.out.push(Line::from(Span::styled(
            format!("{}{label} {}", indent(depth), index + 1),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        let (simple, complex) = list_field.partition();
        let mut row = vec![Span::raw(indent(depth + 1))];
        for property in simple {
            let Some(FormNode::Leaf(leaf)) = item.get(&property.name) else {
                continue;
            };
            if row.len() > 1 {
                row.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            match leaf {
                LeafValue::Bool(flag) => {
                    row.push(Span::raw(if *flag { "[x] " } else { "[ ] " }));
                    row.push(Span::styled(property.display_label(), label_style()));
                }
                LeafValue::Text(text) => {
                    row.push(Span::styled(format!("{}: ", property.display_label()), label_style()));
                    row.push(Span::styled(text.clone(), value_style(text.is_empty())));
                }
            }
        }
        if row.len() > 1 {
            self.out.push(Line::from(row));
        }
        for property in complex {
            if let Some(node) = item.get(&property.name) {
                self.field(property, node, &path.clone().field(&property.name), depth + 1);
            }
        }
    }

    fn add_hint(&mut self, label: &str, depth: usize) {
        self.out.push(Line::from(Span::styled(
            format!("{}[+ Add {label}]", indent(depth)),
            Style::default().fg(Color::Green),
        )));
    }

    fn mismatch(&mut self, depth: usize) {
        self.out.push(Line::from(Span::styled(
            format!("{}<unavailable>", indent(depth)),
            Style::default().fg(Color::Red),
        )));
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn placeholder(field: &FieldSchema) -> String {
    field.placeholder.clone().unwrap_or_default()
}

fn label_style() -> Style {
    Style::default().fg(Color::Cyan)
}

fn value_style(placeholder: bool) -> Style {
    if placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    }
}
