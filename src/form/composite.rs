use indexmap::IndexMap;

use super::node::FormNode;

/// Fixed children of a plain object (and of each array-of-objects item),
/// keyed by field name in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectState {
    children: IndexMap<String, FormNode>,
}

impl ObjectState {
    pub fn new(children: IndexMap<String, FormNode>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FormNode> {
        self.children.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FormNode> {
        self.children.get_mut(name)
    }

    pub fn children(&self) -> &IndexMap<String, FormNode> {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut IndexMap<String, FormNode> {
        &mut self.children
    }
}

/// Items of an array-of-objects field. Like scalar arrays, the index of an
/// item is its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectListState {
    items: Vec<ObjectState>,
}

impl ObjectListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<ObjectState>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ObjectState] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&ObjectState> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ObjectState> {
        self.items.get_mut(index)
    }

    pub fn push(&mut self, item: ObjectState) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<ObjectState> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn move_item(&mut self, index: usize, delta: i32) -> bool {
        if self.items.len() < 2 || index >= self.items.len() {
            return false;
        }
        let target = index as i64 + delta as i64;
        if target < 0 || target >= self.items.len() as i64 {
            return false;
        }
        self.items.swap(index, target as usize);
        true
    }
}
