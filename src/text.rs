//!
//! Plain text editor.
//!
use crate::column::Column;
use crate::container::{CellContainer, ControlId};
use crate::editor::{validate_with, CellEditor, EditorArgs};
use crate::event::{EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::validate::Validation;
use crate::value::Value;
use rat_text::text_input::{TextInput, TextInputState};
use rat_text::HasScreenCursor;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;
use std::rc::Rc;

/// Input line mounted into the cell.
///
/// Shared by all editors that edit a line of text.
#[derive(Debug)]
pub(crate) struct CellInput {
    pub(crate) container: CellContainer,
    pub(crate) control: ControlId,
    pub(crate) column: Rc<Column>,
    pub(crate) input: TextInputState,
}

impl CellInput {
    /// Mounts the input and requests the focus.
    pub(crate) fn new(args: &EditorArgs<'_>, name: &str) -> Self {
        let control = args.container.mount(name);
        let input = TextInputState::named(name);
        input.focus.set(true);
        Self {
            container: args.container.clone(),
            control,
            column: args.column.clone(),
            input,
        }
    }

    pub(crate) fn field(&self) -> &str {
        &self.column.field
    }

    /// Show the text with everything selected.
    pub(crate) fn load_text(&mut self, text: impl Into<String>) {
        self.input.set_text(text);
        self.input.select_all();
    }

    pub(crate) fn text(&self) -> &str {
        self.input.text()
    }

    pub(crate) fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle, invalid: bool) {
        self.render_area(self.container.area(), buf, style, invalid);
    }

    pub(crate) fn render_area(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        style: &CellEditStyle,
        invalid: bool,
    ) {
        self.input.set_invalid(invalid);
        let mut widget = TextInput::new()
            .style(style.style)
            .focus_style(style.focus_style())
            .select_style(style.select_style());
        if let Some(invalid) = style.invalid {
            widget = widget.invalid_style(invalid);
        }
        widget.render(area, buf, &mut self.input);
    }

    pub(crate) fn handle(&mut self, event: &crossterm::event::Event) -> EditOutcome {
        self.input.handle(event, Regular).into()
    }

    pub(crate) fn is_focused(&self) -> bool {
        self.input.focus.get()
    }

    pub(crate) fn screen_cursor(&self) -> Option<(u16, u16)> {
        self.input.screen_cursor()
    }

    pub(crate) fn unmount(&self) {
        self.container.unmount(self.control);
    }
}

/// Edits a field as raw text.
#[derive(Debug)]
pub struct TextEditor {
    cell: CellInput,
    default: Value,
}

impl TextEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        Self {
            cell: CellInput::new(args, "text"),
            default: Value::Null,
        }
    }

    /// Value captured by load_value.
    pub fn default_value(&self) -> &Value {
        &self.default
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for TextEditor {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        self.cell.handle(event)
    }
}

impl CellEditor for TextEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Text
    }

    fn load_value(&mut self, item: &Row) {
        self.default = item.get(self.cell.field()).clone();
        self.cell.load_text(self.default.to_text());
    }

    fn value(&self) -> String {
        self.cell.text().to_string()
    }

    fn set_value(&mut self, value: &str) {
        self.cell.input.set_text(value);
    }

    fn serialize_value(&self) -> Value {
        Value::Text(self.cell.text().to_string())
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        item.set(self.cell.field(), state);
    }

    fn is_value_changed(&self) -> bool {
        let text = self.cell.text();
        !(text.is_empty() && self.default.is_null()) && text != self.default.to_text()
    }

    fn validate(&self) -> Validation {
        validate_with(&self.cell.column, self.cell.text(), |_| Validation::ok())
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
