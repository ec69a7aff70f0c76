//!
//! Floating point editor.
//!
use crate::editor::{validate_with, CellEditor, EditorArgs};
use crate::event::{EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::text::CellInput;
use crate::validate::Validation;
use crate::value::{format_number, is_numeric, parse_float_prefix, Value};
use ratatui::buffer::Buffer;

/// Edits a floating point number.
///
/// Empty content stays an empty text, everything else
/// serializes to its float prefix or 0.
#[derive(Debug)]
pub struct FloatEditor {
    cell: CellInput,
    default: String,
}

impl FloatEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        Self {
            cell: CellInput::new(args, "float"),
            default: String::new(),
        }
    }
}

fn validate_float(text: &str) -> Validation {
    if is_numeric(text) {
        Validation::ok()
    } else {
        Validation::fail("Please enter a valid float")
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for FloatEditor {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        self.cell.handle(event)
    }
}

impl CellEditor for FloatEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Float
    }

    fn load_value(&mut self, item: &Row) {
        let value = item.get(self.cell.field());
        self.default = match parse_float_prefix(&value.to_text()) {
            Some(v) => format_number(v),
            None => String::new(),
        };
        self.cell.load_text(self.default.clone());
    }

    fn value(&self) -> String {
        self.cell.text().to_string()
    }

    fn set_value(&mut self, value: &str) {
        self.cell.input.set_text(value);
    }

    fn serialize_value(&self) -> Value {
        let text = self.cell.text();
        if text.is_empty() {
            Value::Text(String::new())
        } else {
            Value::Float(parse_float_prefix(text).unwrap_or(0.0))
        }
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        item.set(self.cell.field(), state);
    }

    fn is_value_changed(&self) -> bool {
        self.cell.text() != self.default
    }

    fn validate(&self) -> Validation {
        validate_with(&self.cell.column, self.cell.text(), validate_float)
    }

    fn focus(&mut self) {
        self.cell.input.focus.set(true);
    }

    fn is_focused(&self) -> bool {
        self.cell.is_focused()
    }

    fn destroy(self: Box<Self>) {
        self.cell.unmount();
    }

    fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        let invalid = !self.validate().valid;
        self.cell.render(buf, style, invalid);
    }

    fn screen_cursor(&self) -> Option<(u16, u16)> {
        self.cell.screen_cursor()
    }
}
