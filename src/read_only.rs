//!
//! Read-only display.
//!
use crate::column::Column;
use crate::container::{CellContainer, ControlId};
use crate::editor::{CellEditor, EditorArgs};
use crate::event::{EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::validate::Validation;
use crate::value::Value;
use rat_focus::FocusFlag;
use ratatui::buffer::Buffer;
use ratatui::text::Span;
use ratatui::widgets::Widget;
use std::rc::Rc;

/// Shows the field but doesn't edit it.
///
/// Never reports a change and uses no events. This is the
/// fallback whenever no other editor fits.
#[derive(Debug)]
pub struct ReadOnlyEditor {
    container: CellContainer,
    control: ControlId,
    column: Rc<Column>,
    focus: FocusFlag,
    value: Value,
}

impl ReadOnlyEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        let focus = FocusFlag::named("read-only");
        focus.set(true);
        Self {
            container: args.container.clone(),
            control: args.container.mount("read-only"),
            column: args.column.clone(),
            focus,
            value: Value::Null,
        }
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for ReadOnlyEditor {
    fn handle(&mut self, _event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        EditOutcome::Continue
    }
}

impl CellEditor for ReadOnlyEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::ReadOnly
    }

    fn load_value(&mut self, item: &Row) {
        self.value = item.get(&self.column.field).clone();
    }

    fn value(&self) -> String {
        self.value.to_text()
    }

    fn set_value(&mut self, value: &str) {
        self.value = Value::from(value);
    }

    fn serialize_value(&self) -> Value {
        self.value.clone()
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        item.set(&self.column.field, state);
    }

    fn is_value_changed(&self) -> bool {
        false
    }

    /// Nothing can be edited, so there is nothing to reject.
    fn validate(&self) -> Validation {
        Validation::ok()
    }

    fn focus(&mut self) {
        self.focus.set(true);
    }

    fn is_focused(&self) -> bool {
        self.focus.get()
    }

    fn destroy(self: Box<Self>) {
        self.container.unmount(self.control);
    }

    fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        let area = self.container.area();
        buf.set_style(area, style.style);
        Span::from(self.value.to_text()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popup::OverlayLayer;
    use ratatui::layout::Rect;

    #[test]
    fn test_ignores_validator() {
        let container = CellContainer::new(Rect::new(0, 0, 10, 1));
        let column = Column::new("id").validator(|_| Validation::fail("never"));
        let row = Row::new().with("id", 7);
        let args = EditorArgs::new(
            container.clone(),
            Rc::new(column),
            &row,
            Rc::new(OverlayLayer::new()),
        );
        let mut editor = ReadOnlyEditor::new(&args);
        editor.load_value(&row);
        assert_eq!(editor.validate(), Validation::ok());
        Box::new(editor).destroy();
        assert!(container.is_empty());
    }
}
