use super::path::FieldPath;

/// User actions against a form, addressed by qualified path. `AddItem` and
/// `AddEntry` take the list's path; the other item and entry commands take
/// the path of the item itself, e.g. `servers[2]`.
#[derive(Debug, Clone, PartialEq)]
pub enum FormCommand {
    SetValue { path: FieldPath, value: String },
    SetBool { path: FieldPath, value: bool },
    AddItem { path: FieldPath },
    RemoveItem { path: FieldPath },
    MoveItem { path: FieldPath, delta: i32 },
    AddEntry { path: FieldPath },
    RemoveEntry { path: FieldPath },
    SetEntryKey { path: FieldPath, key: String },
    SetEntryValue { path: FieldPath, value: String },
}

impl FormCommand {
    pub fn path(&self) -> &FieldPath {
        match self {
            FormCommand::SetValue { path, .. }
            | FormCommand::SetBool { path, .. }
            | FormCommand::AddItem { path }
            | FormCommand::RemoveItem { path }
            | FormCommand::MoveItem { path, .. }
            | FormCommand::AddEntry { path }
            | FormCommand::RemoveEntry { path }
            | FormCommand::SetEntryKey { path, .. }
            | FormCommand::SetEntryValue { path, .. } => path,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormCommand::SetValue { .. } => "set value",
            FormCommand::SetBool { .. } => "set flag",
            FormCommand::AddItem { .. } => "add item",
            FormCommand::RemoveItem { .. } => "remove item",
            FormCommand::MoveItem { .. } => "move item",
            FormCommand::AddEntry { .. } => "add entry",
            FormCommand::RemoveEntry { .. } => "remove entry",
            FormCommand::SetEntryKey { .. } => "set entry key",
            FormCommand::SetEntryValue { .. } => "set entry value",
        }
    }
}
