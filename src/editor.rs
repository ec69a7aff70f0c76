//!
//! The contract every cell editor implements.
//!
//! The host grid creates an editor with [EditorArgs] when a cell
//! enters edit mode. The editor mounts its control into the cell
//! container, the host loads the current value and from then on
//! forwards events and render calls. When the edit ends the host
//! either validates, serializes and applies the value or simply
//! drops the edit. In both cases it calls [CellEditor::destroy].
//!
//! [EditSession](crate::session::EditSession) implements this
//! protocol.
//!
use crate::column::Column;
use crate::container::CellContainer;
use crate::event::{EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::popup::Overlay;
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::validate::Validation;
use crate::value::Value;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::fmt::Debug;
use std::rc::Rc;

/// Construction arguments for an editor.
#[derive(Debug, Clone)]
pub struct EditorArgs<'a> {
    /// Cell region to mount into.
    pub container: CellContainer,
    /// Column of the cell.
    pub column: Rc<Column>,
    /// Row of the cell. Used by the row editor to choose the
    /// concrete editor.
    pub item: &'a Row,
    /// Screen area of the cell.
    pub position: Rect,
    /// Overlay for detached parts.
    pub overlay: Rc<dyn Overlay>,
}

impl<'a> EditorArgs<'a> {
    pub fn new(
        container: CellContainer,
        column: Rc<Column>,
        item: &'a Row,
        overlay: Rc<dyn Overlay>,
    ) -> Self {
        let position = container.area();
        Self {
            container,
            column,
            item,
            position,
            overlay,
        }
    }

    /// Field edited.
    pub fn field(&self) -> &str {
        &self.column.field
    }
}

/// Cell editor.
///
/// An editor lives from construction until [destroy](CellEditor::destroy).
/// Destroy consumes the editor, the host must call it exactly once
/// to release the control and any popups.
pub trait CellEditor: HandleEvent<crossterm::event::Event, Regular, EditOutcome> + Debug {
    /// Which editor.
    fn kind(&self) -> EditorKind;

    /// Read the field from the row and show it.
    ///
    /// This captures the default value. Afterwards
    /// [is_value_changed](CellEditor::is_value_changed) is false.
    fn load_value(&mut self, item: &Row);

    /// Raw content of the control.
    fn value(&self) -> String;

    /// Set the raw content of the control.
    fn set_value(&mut self, value: &str);

    /// Content converted to the type of the field.
    ///
    /// Never fails, unusable content gives a fallback value.
    fn serialize_value(&self) -> Value;

    /// Write the serialized value to the field.
    fn apply_value(&self, item: &mut Row, state: Value);

    /// Content differs from the loaded value.
    fn is_value_changed(&self) -> bool;

    /// Validate the content.
    ///
    /// A validator from the column replaces the built-in checks.
    fn validate(&self) -> Validation;

    /// Focus the control.
    fn focus(&mut self);

    /// Has the focus.
    fn is_focused(&self) -> bool;

    /// Show the detached parts.
    fn show(&mut self) {}

    /// Hide the detached parts.
    fn hide(&mut self) {}

    /// The cell moved.
    fn position(&mut self, _area: Rect) {}

    /// Remove the control and all popups.
    fn destroy(self: Box<Self>);

    /// Render the control into the cell.
    fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle);

    /// Render the detached parts.
    fn render_popup(&mut self, _buf: &mut Buffer, _style: &CellEditStyle) {}

    /// Screen cursor for the terminal.
    fn screen_cursor(&self) -> Option<(u16, u16)> {
        None
    }
}

/// Validates with the column's validator or else with the given check.
pub(crate) fn validate_with(
    column: &Column,
    text: &str,
    check: impl FnOnce(&str) -> Validation,
) -> Validation {
    match column.run_validator(text) {
        Some(v) => v,
        None => check(text),
    }
}
