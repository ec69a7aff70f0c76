//!
//! Long text editor.
//!
//! Edits multi-line text in a popover above the cell.
//! The popover lives in the overlay, nothing is mounted into
//! the cell.
//!
//! * Tab/BackTab navigate to the next/previous cell.
//! * Ctrl+Enter or the Save button commit.
//! * Esc or the Cancel button revert and cancel.
//! * Everything else goes to the text-area.
//!
use crate::column::Column;
use crate::container::CellContainer;
use crate::editor::{validate_with, CellEditor, EditorArgs};
use crate::event::{ct_event, EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::popup::{layout_popup, Overlay, Placement, PopupId};
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::validate::Validation;
use crate::value::Value;
use rat_text::text_area::{TextArea, TextAreaState};
use rat_text::HasScreenCursor;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect, Size};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, StatefulWidget, Widget};
use std::cmp::{max, min};
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

const SAVE: &str = "[Save]";
const CANCEL: &str = "[Cancel]";

/// Minimum size of the popover.
const MIN_SIZE: Size = Size {
    width: 40,
    height: 9,
};

/// Edits a long text.
#[derive(Debug)]
pub struct LongTextEditor {
    container: CellContainer,
    column: Rc<Column>,
    overlay: Rc<dyn Overlay>,

    popup: Option<PopupId>,
    default: Value,
    /// Text-area state. Holds the focus flag too.
    pub text: TextAreaState,

    /// Save button.
    /// __read only__. renewed for each render.
    pub save_area: Rect,
    /// Cancel button.
    /// __read only__. renewed for each render.
    pub cancel_area: Rect,
}

impl LongTextEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        let mut text = TextAreaState::named("long-text");
        text.set_newline("\n");
        text.focus.set(true);
        let mut s = Self {
            container: args.container.clone(),
            column: args.column.clone(),
            overlay: args.overlay.clone(),
            popup: None,
            default: Value::Null,
            text,
            save_area: Default::default(),
            cancel_area: Default::default(),
        };
        let area = s.popup_area(args.position);
        s.popup = Some(s.overlay.open("long-text", area));
        s
    }

    fn popup_area(&self, cell: Rect) -> Rect {
        let size = Size {
            width: max(MIN_SIZE.width, cell.width + 2),
            height: MIN_SIZE.height,
        };
        let placement = Placement::Position(cell.x.saturating_sub(1), cell.y.saturating_sub(1));
        layout_popup(placement, cell, size, self.overlay.boundary())
    }

    /// Revert to the loaded value.
    pub fn revert(&mut self) {
        self.text.set_text(self.default.to_text());
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for LongTextEditor {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        if self.text.focus.get() {
            match event {
                ct_event!(keycode press Tab) => return EditOutcome::NavigateNext,
                ct_event!(keycode press BackTab) | ct_event!(keycode press SHIFT-BackTab) => {
                    return EditOutcome::NavigatePrev
                }
                ct_event!(keycode press Esc) => {
                    self.revert();
                    return EditOutcome::Cancel;
                }
                ct_event!(keycode press CONTROL-Enter) => return EditOutcome::Commit,
                _ => {}
            }
        }

        if let ct_event!(mouse down Left for x, y) = event {
            let pos = Position::new(*x, *y);
            if self.save_area.contains(pos) {
                return EditOutcome::Commit;
            } else if self.cancel_area.contains(pos) {
                self.revert();
                return EditOutcome::Cancel;
            } else if self.text.inner.contains(pos) {
                self.text.focus.set(true);
            }
        }

        self.text.handle(event, Regular).into()
    }
}

impl CellEditor for LongTextEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::LongText
    }

    fn load_value(&mut self, item: &Row) {
        self.default = item.get(&self.column.field).clone();
        self.text.set_text(self.default.to_text());
        self.text.select_all();
    }

    fn value(&self) -> String {
        self.text.text()
    }

    fn set_value(&mut self, value: &str) {
        self.text.set_text(value);
    }

    fn serialize_value(&self) -> Value {
        Value::Text(self.text.text())
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        item.set(&self.column.field, state);
    }

    fn is_value_changed(&self) -> bool {
        let text = self.text.text();
        !(text.is_empty() && self.default.is_null()) && text != self.default.to_text()
    }

    fn validate(&self) -> Validation {
        validate_with(&self.column, &self.text.text(), |_| Validation::ok())
    }

    fn focus(&mut self) {
        self.text.focus.set(true);
        self.show();
    }

    fn is_focused(&self) -> bool {
        self.text.focus.get()
    }

    fn show(&mut self) {
        if let Some(id) = self.popup {
            self.overlay.set_visible(id, true);
        }
    }

    fn hide(&mut self) {
        if let Some(id) = self.popup {
            self.overlay.set_visible(id, false);
        }
    }

    fn position(&mut self, area: Rect) {
        if let Some(id) = self.popup {
            self.overlay.position(id, self.popup_area(area));
        }
    }

    fn destroy(self: Box<Self>) {
        if let Some(id) = self.popup {
            self.overlay.close(id);
        }
    }

    fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        // first line as preview.
        let area = self.container.area();
        buf.set_style(area, style.style);
        let text = self.text.text();
        let first = text.lines().next().unwrap_or_default();
        Span::from(first).render(area, buf);
    }

    fn render_popup(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        let Some(id) = self.popup else {
            return;
        };
        if !self.overlay.is_visible(id) {
            return;
        }
        let area = self.overlay.area(id);
        let popup_style = style.popup_style();

        let block = Block::new()
            .borders(Borders::ALL)
            .style(popup_style)
            .border_style(style.popup_border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let text_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(2));
        let button_y = inner.bottom().saturating_sub(1);
        let cancel_width = CANCEL.width() as u16;
        let save_width = SAVE.width() as u16;
        self.cancel_area = Rect::new(
            inner.right().saturating_sub(cancel_width),
            button_y,
            min(cancel_width, inner.width),
            min(1, inner.height),
        );
        self.save_area = Rect::new(
            self.cancel_area.x.saturating_sub(save_width + 1),
            button_y,
            min(save_width, inner.width),
            min(1, inner.height),
        );

        TextArea::new()
            .style(popup_style)
            .focus_style(popup_style.patch(style.focus.unwrap_or_default()))
            .select_style(style.select_style_on(popup_style))
            .render(text_area, buf, &mut self.text);

        let button_style = style.button_style();
        Span::styled(SAVE, button_style).render(self.save_area, buf);
        Span::styled(CANCEL, button_style).render(self.cancel_area, buf);
    }

    fn screen_cursor(&self) -> Option<(u16, u16)> {
        if self.text.inner.is_empty() {
            return None;
        }
        self.text.screen_cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popup::OverlayLayer;
    use ratatui::style::{Color, Style};

    fn editor(text: &str) -> LongTextEditor {
        let container = CellContainer::new(Rect::new(10, 5, 20, 1));
        let overlay = Rc::new(OverlayLayer::with_boundary(Rect::new(0, 0, 80, 24)));
        let row = Row::new().with("notes", text);
        let args = EditorArgs::new(container, Rc::new(Column::new("notes")), &row, overlay);
        let mut editor = LongTextEditor::new(&args);
        editor.load_value(&row);
        editor
    }

    #[test]
    fn crlf_selection() {
        let mut editor = editor("ab\r\ncd");
        let style = CellEditStyle {
            select: Some(Style::new().bg(Color::Yellow)),
            ..Default::default()
        };
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        editor.render_popup(&mut buf, &style);

        // popover at (9, 4), text starts at (10, 5).
        assert_eq!(buf[(10, 5)].symbol(), "a");
        assert_eq!(buf[(11, 5)].symbol(), "b");
        assert_ne!(buf[(12, 5)].symbol(), "\r");
        assert_eq!(buf[(10, 6)].symbol(), "c");
        assert_eq!(buf[(11, 6)].symbol(), "d");
        assert_eq!(buf[(10, 6)].bg, Color::Yellow);
        assert_eq!(buf[(11, 6)].bg, Color::Yellow);
    }

    #[test]
    fn crlf_preview() {
        let mut editor = editor("ab\r\ncd");
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        editor.render(&mut buf, &CellEditStyle::default());
        assert_eq!(buf[(11, 5)].symbol(), "b");
        assert_eq!(buf[(12, 5)].symbol(), " ");
    }
}
