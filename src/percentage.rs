//!
//! Percentage editor.
//!
//! The field holds a fraction, the editor shows it as `<n> %`.
//!
//! * A text field that already ends with `%` is shown as is.
//! * Any other number is multiplied by 100.
//!
//! Serializing a text with `%` gives the fraction back, rounded to
//! 3 decimals. A plain number is taken as it is.
//!
use crate::editor::{validate_with, CellEditor, EditorArgs};
use crate::event::{EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::text::CellInput;
use crate::validate::Validation;
use crate::value::{format_number, parse_float_prefix, round_to, Value};
use ratatui::buffer::Buffer;

/// Edits a fraction as percentage.
#[derive(Debug)]
pub struct PercentageEditor {
    cell: CellInput,
    default: String,
}

/// Display text for a percentage.
pub fn format_percent(percent: f64) -> String {
    format!("{} %", format_number(percent))
}

/// Display text for the field value.
fn display_text(value: &Value) -> String {
    match value {
        Value::Text(v) if v.trim_end().ends_with('%') => {
            let num = v.trim_end().trim_end_matches('%');
            match parse_float_prefix(num) {
                Some(p) => format_percent(p),
                None => String::new(),
            }
        }
        v => match v.as_float() {
            Some(f) => format_percent(round_to(f * 100.0, 3)),
            None => String::new(),
        },
    }
}

fn validate_percentage(text: &str) -> Validation {
    if parse_float_prefix(text).is_some() {
        Validation::ok()
    } else {
        Validation::fail("Please enter a valid percentage")
    }
}

impl PercentageEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        Self {
            cell: CellInput::new(args, "percentage"),
            default: String::new(),
        }
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for PercentageEditor {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        self.cell.handle(event)
    }
}

impl CellEditor for PercentageEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Percentage
    }

    fn load_value(&mut self, item: &Row) {
        self.default = display_text(item.get(self.cell.field()));
        self.cell.load_text(self.default.clone());
    }

    fn value(&self) -> String {
        self.cell.text().to_string()
    }

    fn set_value(&mut self, value: &str) {
        self.cell.input.set_text(value);
    }

    fn serialize_value(&self) -> Value {
        let text = self.cell.text().trim();
        if text.is_empty() {
            Value::Text(String::new())
        } else if text.ends_with('%') {
            let num = text.trim_end_matches('%');
            let percent = parse_float_prefix(num).unwrap_or(0.0);
            Value::Float(round_to(percent / 100.0, 3))
        } else {
            Value::Float(parse_float_prefix(text).unwrap_or(0.0))
        }
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        let value = match state.as_float() {
            Some(f) if !matches!(state, Value::Text(_)) => {
                Value::Text(format_percent(round_to(f * 100.0, 1)))
            }
            _ => state,
        };
        item.set(self.cell.field(), value);
    }

    fn is_value_changed(&self) -> bool {
        self.cell.text() != self.default
    }

    fn validate(&self) -> Validation {
        validate_with(&self.cell.column, self.cell.text(), validate_percentage)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(display_text(&Value::Float(0.25)), "25 %");
        assert_eq!(display_text(&Value::from("25%")), "25 %");
        assert_eq!(display_text(&Value::from("12.5 %")), "12.5 %");
        assert_eq!(display_text(&Value::from("0.5")), "50 %");
        assert_eq!(display_text(&Value::Null), "");
        assert_eq!(display_text(&Value::from("abc")), "");
    }

    #[test]
    fn test_validate() {
        assert!(!validate_percentage("").valid);
        assert!(!validate_percentage(" ").valid);
        assert!(validate_percentage("25 %").valid);
        assert!(!validate_percentage("lots").valid);
    }
}
