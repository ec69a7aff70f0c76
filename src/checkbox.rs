//!
//! Checkbox editor.
//!
use crate::column::Column;
use crate::container::{CellContainer, ControlId};
use crate::editor::{validate_with, CellEditor, EditorArgs};
use crate::event::{ct_event, EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::validate::Validation;
use crate::value::Value;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::text::Span;
use ratatui::widgets::Widget;
use rat_focus::FocusFlag;
use std::rc::Rc;

/// Display text for checked.
pub const CHECKED: &str = "[\u{2714}]";
/// Display text for unchecked.
pub const UNCHECKED: &str = "[ ]";

/// Toggles a boolean.
///
/// The field is read with the loose boolean coercion,
/// see [Value::loose_bool].
#[derive(Debug)]
pub struct CheckboxEditor {
    container: CellContainer,
    control: ControlId,
    column: Rc<Column>,
    /// Current focus state.
    pub focus: FocusFlag,

    checked: bool,
    default: bool,
}

impl CheckboxEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        let focus = FocusFlag::named("checkbox");
        focus.set(true);
        Self {
            container: args.container.clone(),
            control: args.container.mount("checkbox"),
            column: args.column.clone(),
            focus,
            checked: false,
            default: false,
        }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Flip the state.
    pub fn flip_checked(&mut self) -> bool {
        self.checked = !self.checked;
        true
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for CheckboxEditor {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        let r = if self.focus.get() {
            match event {
                ct_event!(key press ' ') | ct_event!(keycode press Enter) => {
                    self.flip_checked().into()
                }
                _ => EditOutcome::Continue,
            }
        } else {
            EditOutcome::Continue
        };
        if r != EditOutcome::Continue {
            return r;
        }

        match event {
            ct_event!(mouse down Left for x, y)
                if self.container.area().contains(Position::new(*x, *y)) =>
            {
                self.flip_checked().into()
            }
            _ => EditOutcome::Continue,
        }
    }
}

impl CellEditor for CheckboxEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Checkbox
    }

    fn load_value(&mut self, item: &Row) {
        self.default = item.get(&self.column.field).loose_bool();
        self.checked = self.default;
    }

    fn value(&self) -> String {
        self.checked.to_string()
    }

    fn set_value(&mut self, value: &str) {
        self.checked = Value::from(value).loose_bool();
    }

    fn serialize_value(&self) -> Value {
        Value::Bool(self.checked)
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        item.set(&self.column.field, state);
    }

    fn is_value_changed(&self) -> bool {
        self.checked != self.default
    }

    fn validate(&self) -> Validation {
        validate_with(&self.column, &self.value(), |_| Validation::ok())
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
        let style = if self.focus.get() {
            style.focus_style()
        } else {
            style.style
        };
        buf.set_style(area, style);
        let text = if self.checked { CHECKED } else { UNCHECKED };
        Span::from(text).render(area, buf);
    }
}
