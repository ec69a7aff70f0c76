//!
//! Integer editor.
//!
use crate::editor::{validate_with, CellEditor, EditorArgs};
use crate::event::{EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::text::CellInput;
use crate::validate::Validation;
use crate::value::{is_numeric, parse_int_prefix, Value};
use ratatui::buffer::Buffer;

/// Edits a base-10 integer.
///
/// The field is shown as its integer prefix. Content that is
/// no number at all serializes as 0, but doesn't validate.
#[derive(Debug)]
pub struct IntegerEditor {
    cell: CellInput,
    default: String,
}

impl IntegerEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        Self {
            cell: CellInput::new(args, "integer"),
            default: String::new(),
        }
    }
}

fn validate_integer(text: &str) -> Validation {
    if is_numeric(text) {
        Validation::ok()
    } else {
        Validation::fail("Please enter a valid integer")
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for IntegerEditor {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        self.cell.handle(event)
    }
}

impl CellEditor for IntegerEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Integer
    }

    fn load_value(&mut self, item: &Row) {
        let value = item.get(self.cell.field());
        self.default = match parse_int_prefix(&value.to_text()) {
            Some(v) => v.to_string(),
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
        Value::Int(parse_int_prefix(self.cell.text()).unwrap_or(0))
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        item.set(self.cell.field(), state);
    }

    fn is_value_changed(&self) -> bool {
        self.cell.text() != self.default
    }

    fn validate(&self) -> Validation {
        validate_with(&self.cell.column, self.cell.text(), validate_integer)
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
