//!
//! One row of the grid.
//!
use crate::value::Value;
use std::collections::BTreeMap;

static NULL: Value = Value::Null;

/// A keyed record for one row.
///
/// Maps field names to values. Can carry the tag of an
/// editor, which the [RowEditor](crate::composite::RowEditor)
/// uses to choose the editor per row.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    fields: BTreeMap<String, Value>,
    editor: Option<String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style set.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Builder style editor tag.
    pub fn with_editor(mut self, editor: &str) -> Self {
        self.editor = Some(editor.to_string());
        self
    }

    /// Value of a field. Missing fields are Null.
    pub fn get(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Set a field. Returns the old value.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.to_string(), value.into())
    }

    /// Remove a field.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Field exists.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// All fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Editor tag for this row.
    pub fn editor(&self) -> Option<&str> {
        self.editor.as_deref()
    }

    /// Editor tag for this row.
    pub fn set_editor(&mut self, editor: Option<&str>) {
        self.editor = editor.map(|v| v.to_string());
    }
}
