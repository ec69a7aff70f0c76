//!
//! Drives one edit.
//!
//! [EditSession] is the host side of the editor contract. It
//! allows only one active editor, loads the value on begin and
//! runs validate, serialize, apply and destroy on commit.
//!
//! ```rust ignore
//! let args = EditorArgs::new(container.clone(), column.clone(), &row, overlay.clone());
//! state.session.begin(EditorKind::Integer, &args)?;
//!
//! // ...
//!
//! match state.session.handle(event, Regular) {
//!     EditOutcome::Commit => {
//!         if let Err(e) = state.session.commit(&mut row) {
//!             // show e, the session stays active.
//!         }
//!     }
//!     EditOutcome::Cancel => state.session.cancel()?,
//!     r => { /* repaint */ }
//! }
//!
//! CellEdit::new()
//!     .styles(THEME.cell_edit_style())
//!     .render(cell_area, frame.buffer_mut(), &mut state.session);
//! ```
//!
use crate::_private::NonExhaustive;
use crate::editor::{CellEditor, EditorArgs};
use crate::event::{EditOutcome, HandleEvent, Regular};
use crate::kind::{create_editor, EditorKind};
use crate::row::Row;
use crate::validate::Validation;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::widgets::StatefulWidget;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::mem;

/// Errors of the edit protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Validation failed. Contains the message.
    Invalid(String),
    /// There is already an active edit.
    SessionActive,
    /// There is no active edit.
    NoSession,
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for EditError {}

/// Combined style for all editors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct CellEditStyle {
    /// Base style.
    pub style: Style,
    /// Focused control.
    pub focus: Option<Style>,
    /// Selected text or item.
    pub select: Option<Style>,
    /// Invalid content.
    pub invalid: Option<Style>,
    /// Popups.
    pub popup: Option<Style>,
    /// Border of the popups.
    pub popup_border: Option<Style>,
    /// Buttons.
    pub button: Option<Style>,

    #[cfg_attr(feature = "serde", serde(skip))]
    pub non_exhaustive: NonExhaustive,
}

impl Default for CellEditStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            focus: None,
            select: None,
            invalid: None,
            popup: None,
            popup_border: None,
            button: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl CellEditStyle {
    /// Style of the focused control.
    pub fn focus_style(&self) -> Style {
        self.style.patch(self.focus.unwrap_or_default())
    }

    /// Style for popups. Black on gray if neither popup nor base
    /// style set any colors.
    pub fn popup_style(&self) -> Style {
        let style = self.popup.unwrap_or(self.style);
        if style.fg.is_some() || style.bg.is_some() {
            style
        } else {
            style.black().on_gray()
        }
    }

    /// Style for the popup border.
    pub fn popup_border_style(&self) -> Style {
        self.popup_border.unwrap_or_else(|| self.popup_style())
    }

    /// Selection.
    pub fn select_style(&self) -> Style {
        self.select_style_on(self.style)
    }

    /// Selection on top of some other base style.
    ///
    /// Without an explicit select style fg and bg of the base
    /// are swapped. This is not the same as Style::reversed(),
    /// which leaves it to the terminal.
    pub fn select_style_on(&self, base: Style) -> Style {
        match self.select {
            Some(select) => select,
            None if base.fg.is_some() || base.bg.is_some() => {
                let mut style = base;
                mem::swap(&mut style.fg, &mut style.bg);
                style
            }
            None => base.black().on_white(),
        }
    }

    /// Buttons.
    pub fn button_style(&self) -> Style {
        self.button.unwrap_or_else(|| self.popup_style())
    }
}

/// The active edit.
#[derive(Debug, Default)]
pub struct EditSession {
    editor: Option<Box<dyn CellEditor>>,
    /// Result of the last failed commit.
    pub validation: Option<Validation>,
    /// Cell area.
    /// __read only__. renewed for each render.
    pub area: Rect,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing.
    ///
    /// Creates the editor, loads the value from the row and
    /// focuses the control. Fails if there is already an active edit.
    pub fn begin(&mut self, kind: EditorKind, args: &EditorArgs<'_>) -> Result<(), EditError> {
        if self.editor.is_some() {
            return Err(EditError::SessionActive);
        }
        let mut editor = create_editor(kind, args);
        editor.load_value(args.item);
        editor.focus();
        self.editor = Some(editor);
        self.validation = None;
        Ok(())
    }

    /// Editing.
    pub fn is_active(&self) -> bool {
        self.editor.is_some()
    }

    /// The active editor.
    pub fn editor(&self) -> Option<&dyn CellEditor> {
        self.editor.as_deref()
    }

    /// The active editor.
    pub fn editor_mut(&mut self) -> Option<&mut (dyn CellEditor + 'static)> {
        self.editor.as_deref_mut()
    }

    /// Kind of the active editor.
    pub fn kind(&self) -> Option<EditorKind> {
        self.editor.as_ref().map(|v| v.kind())
    }

    /// Finish the edit.
    ///
    /// Validates the content. If it is invalid the edit stays active
    /// and [EditError::Invalid] is returned. Otherwise a changed value
    /// is written to the row and the editor is destroyed.
    ///
    /// Returns true if the row has been changed.
    pub fn commit(&mut self, item: &mut Row) -> Result<bool, EditError> {
        let Some(editor) = self.editor.as_ref() else {
            return Err(EditError::NoSession);
        };

        let validation = editor.validate();
        if !validation.valid {
            let msg = validation.msg.clone().unwrap_or_default();
            self.validation = Some(validation);
            return Err(EditError::Invalid(msg));
        }

        let changed = editor.is_value_changed();
        if changed {
            let state = editor.serialize_value();
            editor.apply_value(item, state);
        }

        self.validation = None;
        if let Some(editor) = self.editor.take() {
            editor.destroy();
        }
        Ok(changed)
    }

    /// Drop the edit.
    pub fn cancel(&mut self) -> Result<(), EditError> {
        let Some(editor) = self.editor.take() else {
            return Err(EditError::NoSession);
        };
        self.validation = None;
        editor.destroy();
        Ok(())
    }

    /// The cell moved.
    pub fn position(&mut self, area: Rect) {
        if let Some(editor) = self.editor.as_mut() {
            editor.position(area);
        }
    }

    /// Show the detached parts.
    pub fn show(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.show();
        }
    }

    /// Hide the detached parts.
    pub fn hide(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.hide();
        }
    }

    /// Screen cursor.
    pub fn screen_cursor(&self) -> Option<(u16, u16)> {
        self.editor.as_ref().and_then(|v| v.screen_cursor())
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for EditSession {
    fn handle(&mut self, event: &crossterm::event::Event, qualifier: Regular) -> EditOutcome {
        match self.editor.as_mut() {
            Some(editor) => editor.handle(event, qualifier),
            None => EditOutcome::Continue,
        }
    }
}

/// Renders the active editor and its popups.
#[derive(Debug, Default, Clone)]
pub struct CellEdit {
    style: CellEditStyle,
}

impl CellEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the combined style.
    pub fn styles(mut self, styles: CellEditStyle) -> Self {
        self.style = styles;
        self
    }

    /// Base style.
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.style.style = style.into();
        self
    }

    /// Style for the popups.
    pub fn popup_style(mut self, style: impl Into<Style>) -> Self {
        self.style.popup = Some(style.into());
        self
    }
}

impl StatefulWidget for CellEdit {
    type State = EditSession;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

impl StatefulWidget for &CellEdit {
    type State = EditSession;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

fn render_ref(widget: &CellEdit, area: Rect, buf: &mut Buffer, state: &mut EditSession) {
    state.area = area;

    let mut style = widget.style.clone();
    if state.validation.is_some() && style.invalid.is_none() {
        style.invalid = Some(Style::default().red());
    }

    if let Some(editor) = state.editor.as_mut() {
        editor.render(buf, &style);
        editor.render_popup(buf, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::container::CellContainer;
    use crate::popup::OverlayLayer;
    use std::rc::Rc;

    #[test]
    fn test_single_session() {
        let container = CellContainer::new(Rect::new(0, 0, 10, 1));
        let overlay = Rc::new(OverlayLayer::new());
        let column = Rc::new(Column::new("qty"));
        let mut row = Row::new().with("qty", 5);

        let mut session = EditSession::new();
        assert_eq!(session.cancel(), Err(EditError::NoSession));

        let args = EditorArgs::new(container.clone(), column, &row, overlay);
        session.begin(EditorKind::Integer, &args).expect("begin");
        assert_eq!(
            session.begin(EditorKind::Text, &args),
            Err(EditError::SessionActive)
        );
        drop(args);

        session.editor_mut().expect("editor").set_value("12");
        assert_eq!(session.commit(&mut row), Ok(true));
        assert_eq!(row.get("qty"), &crate::value::Value::Int(12));
        assert!(!session.is_active());
        assert!(container.is_empty());
    }
}
