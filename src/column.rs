//!
//! Column configuration as seen by the editors.
//!
use crate::kind::EditorKind;
use crate::validate::Validation;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Custom validation for a column. Gets the raw text of the control.
pub type Validator = Rc<dyn Fn(&str) -> Validation>;

/// One choice for the select editor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct SelectOption {
    /// Stored and matched value.
    pub key: String,
    /// Display text.
    pub label: String,
}

impl SelectOption {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

impl<K: Into<String>, L: Into<String>> From<(K, L)> for SelectOption {
    fn from(value: (K, L)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Column descriptor.
///
/// ```rust
/// use rat_celledit::column::Column;
/// use rat_celledit::kind::EditorKind;
/// use rat_celledit::validate::Validation;
///
/// let col = Column::new("state")
///     .editor(EditorKind::Select)
///     .options([("a", "Alpha"), ("b", "Beta")])
///     .validator(|txt| {
///         if txt.is_empty() {
///             Validation::fail("required")
///         } else {
///             Validation::ok()
///         }
///     });
/// ```
#[derive(Clone, Default)]
pub struct Column {
    /// Field name in the row.
    pub field: String,
    /// Display name.
    pub name: String,
    /// Custom validator. Takes precedence over the editor's checks.
    pub validator: Option<Validator>,
    /// Choices for the select editor.
    pub options: Option<Vec<SelectOption>>,
    /// Editor for this column.
    pub editor: Option<EditorKind>,
    /// Date format for the date editor. Uses chrono's format syntax.
    pub date_format: Option<String>,
}

impl Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("name", &self.name)
            .field("validator", &self.validator.as_ref().map(|_| ".."))
            .field("options", &self.options)
            .field("editor", &self.editor)
            .field("date_format", &self.date_format)
            .finish()
    }
}

/// Default date format of the date editor.
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

impl Column {
    /// New column for the given field.
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            name: field.to_string(),
            ..Default::default()
        }
    }

    /// Display name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Custom validator.
    pub fn validator(mut self, validator: impl Fn(&str) -> Validation + 'static) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }

    /// Choices for the select editor.
    pub fn options<O: Into<SelectOption>>(mut self, options: impl IntoIterator<Item = O>) -> Self {
        self.options = Some(options.into_iter().map(|v| v.into()).collect());
        self
    }

    /// Editor.
    pub fn editor(mut self, editor: EditorKind) -> Self {
        self.editor = Some(editor);
        self
    }

    /// Date format for the date editor.
    pub fn date_format(mut self, format: &str) -> Self {
        self.date_format = Some(format.to_string());
        self
    }

    /// Date format or the default.
    pub fn date_format_or_default(&self) -> &str {
        self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }

    /// Run the custom validator if there is one.
    pub fn run_validator(&self, txt: &str) -> Option<Validation> {
        self.validator.as_ref().map(|v| v(txt))
    }
}
