//!
//! Yes/No editor.
//!
use crate::column::SelectOption;
use crate::editor::{validate_with, CellEditor, EditorArgs};
use crate::event::{EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::row::Row;
use crate::select::Choice;
use crate::session::CellEditStyle;
use crate::validate::Validation;
use crate::value::Value;
use ratatui::buffer::Buffer;

/// Chooses between yes and no. Stores a bool.
#[derive(Debug)]
pub struct YesNoEditor {
    choice: Choice,
    default: bool,
}

impl YesNoEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        let options = vec![SelectOption::new("yes", "Yes"), SelectOption::new("no", "No")];
        Self {
            choice: Choice::new(args, "yes-no", options),
            default: false,
        }
    }

    fn is_yes(&self) -> bool {
        self.choice.key() == "yes"
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for YesNoEditor {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        self.choice.handle(event)
    }
}

impl CellEditor for YesNoEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::YesNo
    }

    fn load_value(&mut self, item: &Row) {
        self.default = item.get(self.choice.field()).loose_bool();
        self.choice
            .select_key(if self.default { "yes" } else { "no" });
    }

    fn value(&self) -> String {
        self.choice.key().to_string()
    }

    fn set_value(&mut self, value: &str) {
        self.choice.select_key(value);
    }

    fn serialize_value(&self) -> Value {
        Value::Bool(self.is_yes())
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        item.set(self.choice.field(), state);
    }

    fn is_value_changed(&self) -> bool {
        self.is_yes() != self.default
    }

    fn validate(&self) -> Validation {
        validate_with(&self.choice.column, self.choice.key(), |_| Validation::ok())
    }

    fn focus(&mut self) {
        self.choice.focus.set(true);
    }

    fn is_focused(&self) -> bool {
        self.choice.focus.get()
    }

    fn destroy(self: Box<Self>) {
        self.choice.unmount();
    }

    fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        self.choice.render(buf, style);
    }
}
