//!
//! Row editor.
//!
//! Chooses the concrete editor per row. The row carries the
//! tag of the editor, see [Row::editor]. Everything is forwarded
//! to that editor.
//!
//! Rows without a tag, unknown tags and the row editor's own tag
//! give a read-only editor.
//!
use crate::editor::{CellEditor, EditorArgs};
use crate::event::{EditOutcome, HandleEvent, Regular};
use crate::kind::{create_editor, EditorKind};
use crate::read_only::ReadOnlyEditor;
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::validate::Validation;
use crate::value::Value;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::str::FromStr;

/// Delegates to the editor named by the row.
#[derive(Debug)]
pub struct RowEditor {
    delegate: Box<dyn CellEditor>,
}

impl RowEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        let delegate: Box<dyn CellEditor> = match args.item.editor() {
            None => Box::new(ReadOnlyEditor::new(args)),
            Some(tag) => match EditorKind::from_str(tag) {
                Ok(EditorKind::Composite) => {
                    log::warn!("row editor can't delegate to itself. using read-only.");
                    Box::new(ReadOnlyEditor::new(args))
                }
                Ok(kind) => create_editor(kind, args),
                Err(e) => {
                    log::warn!("{}. using read-only.", e);
                    Box::new(ReadOnlyEditor::new(args))
                }
            },
        };
        Self { delegate }
    }

    /// The chosen editor.
    pub fn delegate(&self) -> &dyn CellEditor {
        self.delegate.as_ref()
    }

    /// The chosen editor.
    pub fn delegate_mut(&mut self) -> &mut dyn CellEditor {
        self.delegate.as_mut()
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for RowEditor {
    fn handle(&mut self, event: &crossterm::event::Event, qualifier: Regular) -> EditOutcome {
        self.delegate.handle(event, qualifier)
    }
}

impl CellEditor for RowEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Composite
    }

    fn load_value(&mut self, item: &Row) {
        self.delegate.load_value(item);
    }

    fn value(&self) -> String {
        self.delegate.value()
    }

    fn set_value(&mut self, value: &str) {
        self.delegate.set_value(value);
    }

    fn serialize_value(&self) -> Value {
        self.delegate.serialize_value()
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        self.delegate.apply_value(item, state);
    }

    fn is_value_changed(&self) -> bool {
        self.delegate.is_value_changed()
    }

    fn validate(&self) -> Validation {
        self.delegate.validate()
    }

    fn focus(&mut self) {
        self.delegate.focus();
    }

    fn is_focused(&self) -> bool {
        self.delegate.is_focused()
    }

    fn show(&mut self) {
        self.delegate.show();
    }

    fn hide(&mut self) {
        self.delegate.hide();
    }

    fn position(&mut self, area: Rect) {
        self.delegate.position(area);
    }

    fn destroy(self: Box<Self>) {
        self.delegate.destroy();
    }

    fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        self.delegate.render(buf, style);
    }

    fn render_popup(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        self.delegate.render_popup(buf, style);
    }

    fn screen_cursor(&self) -> Option<(u16, u16)> {
        self.delegate.screen_cursor()
    }
}
