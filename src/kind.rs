//!
//! The available editors.
//!
use crate::checkbox::CheckboxEditor;
use crate::color::ColorEditor;
use crate::composite::RowEditor;
use crate::date::DateEditor;
use crate::editor::{CellEditor, EditorArgs};
use crate::float::FloatEditor;
use crate::integer::IntegerEditor;
use crate::long_text::LongTextEditor;
use crate::percent_complete::PercentCompleteEditor;
use crate::percentage::PercentageEditor;
use crate::read_only::ReadOnlyEditor;
use crate::select::SelectEditor;
use crate::text::TextEditor;
use crate::yes_no::YesNoEditor;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Editor kinds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum EditorKind {
    #[default]
    Text,
    Integer,
    Float,
    Percentage,
    PercentComplete,
    Date,
    Select,
    YesNo,
    Checkbox,
    LongText,
    Color,
    ReadOnly,
    /// Chooses the editor per row.
    Composite,
}

impl EditorKind {
    /// All kinds.
    pub const ALL: [EditorKind; 13] = [
        EditorKind::Text,
        EditorKind::Integer,
        EditorKind::Float,
        EditorKind::Percentage,
        EditorKind::PercentComplete,
        EditorKind::Date,
        EditorKind::Select,
        EditorKind::YesNo,
        EditorKind::Checkbox,
        EditorKind::LongText,
        EditorKind::Color,
        EditorKind::ReadOnly,
        EditorKind::Composite,
    ];

    /// Tag name.
    pub fn name(&self) -> &'static str {
        match self {
            EditorKind::Text => "Text",
            EditorKind::Integer => "Integer",
            EditorKind::Float => "Float",
            EditorKind::Percentage => "Percentage",
            EditorKind::PercentComplete => "PercentComplete",
            EditorKind::Date => "Date",
            EditorKind::Select => "Select",
            EditorKind::YesNo => "YesNo",
            EditorKind::Checkbox => "Checkbox",
            EditorKind::LongText => "LongText",
            EditorKind::Color => "Color",
            EditorKind::ReadOnly => "ReadOnly",
            EditorKind::Composite => "Composite",
        }
    }

    /// Does the editor use the overlay.
    pub fn is_detached(&self) -> bool {
        matches!(
            self,
            EditorKind::Date | EditorKind::LongText | EditorKind::Color
        )
    }
}

impl Display for EditorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The tag names no editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEditor(pub String);

impl Display for UnknownEditor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown editor {:?}", self.0)
    }
}

impl Error for UnknownEditor {}

impl FromStr for EditorKind {
    type Err = UnknownEditor;

    /// Parses the tag name. Case is ignored, a trailing `Editor`
    /// is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        let tag = match tag.len().checked_sub(6) {
            Some(n) if n > 0 && tag.is_char_boundary(n) && tag[n..].eq_ignore_ascii_case("editor") => {
                &tag[..n]
            }
            _ => tag,
        };
        let tag = tag.to_ascii_lowercase();
        let kind = match tag.as_str() {
            "text" => EditorKind::Text,
            "integer" => EditorKind::Integer,
            "float" => EditorKind::Float,
            "percentage" => EditorKind::Percentage,
            "percentcomplete" => EditorKind::PercentComplete,
            "date" => EditorKind::Date,
            "select" | "combo" => EditorKind::Select,
            "yesno" | "yesnoselect" => EditorKind::YesNo,
            "checkbox" => EditorKind::Checkbox,
            "longtext" => EditorKind::LongText,
            "color" => EditorKind::Color,
            "readonly" => EditorKind::ReadOnly,
            "composite" | "row" | "rowmulti" => EditorKind::Composite,
            _ => return Err(UnknownEditor(s.to_string())),
        };
        Ok(kind)
    }
}

/// Create an editor.
pub fn create_editor(kind: EditorKind, args: &EditorArgs<'_>) -> Box<dyn CellEditor> {
    log::debug!("create editor {} for {:?}", kind, args.field());
    match kind {
        EditorKind::Text => Box::new(TextEditor::new(args)),
        EditorKind::Integer => Box::new(IntegerEditor::new(args)),
        EditorKind::Float => Box::new(FloatEditor::new(args)),
        EditorKind::Percentage => Box::new(PercentageEditor::new(args)),
        EditorKind::PercentComplete => Box::new(PercentCompleteEditor::new(args)),
        EditorKind::Date => Box::new(DateEditor::new(args)),
        EditorKind::Select => Box::new(SelectEditor::new(args)),
        EditorKind::YesNo => Box::new(YesNoEditor::new(args)),
        EditorKind::Checkbox => Box::new(CheckboxEditor::new(args)),
        EditorKind::LongText => Box::new(LongTextEditor::new(args)),
        EditorKind::Color => Box::new(ColorEditor::new(args)),
        EditorKind::ReadOnly => Box::new(ReadOnlyEditor::new(args)),
        EditorKind::Composite => Box::new(RowEditor::new(args)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        for kind in EditorKind::ALL {
            assert_eq!(kind.name().parse::<EditorKind>(), Ok(kind));
        }
        assert_eq!("yesNoSelectEditor".parse(), Ok(EditorKind::YesNo));
        assert_eq!("Combo".parse(), Ok(EditorKind::Select));
        assert_eq!(" longtext ".parse(), Ok(EditorKind::LongText));
        assert_eq!(
            "Sparkline".parse::<EditorKind>(),
            Err(UnknownEditor("Sparkline".into()))
        );
    }
}
