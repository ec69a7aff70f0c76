//!
//! Date editor.
//!
//! The date is edited as text. F4 or Alt+Down opens a calendar
//! in the overlay below the cell. Picking a day writes it with
//! the date format of the column.
//!
use crate::calendar::{Calendar, CalendarOutcome, CalendarState, CALENDAR_SIZE};
use crate::column::DEFAULT_DATE_FORMAT;
use crate::editor::{validate_with, CellEditor, EditorArgs};
use crate::event::{ct_event, EditOutcome, HandleEvent, Popup, Regular};
use crate::kind::EditorKind;
use crate::popup::{layout_popup, Overlay, Placement, PopupId};
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::text::CellInput;
use crate::validate::Validation;
use crate::value::Value;
use chrono::{Local, Locale, NaiveDate};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;
use std::fmt::Write;
use std::rc::Rc;

/// Edits a date.
#[derive(Debug)]
pub struct DateEditor {
    cell: CellInput,
    overlay: Rc<dyn Overlay>,
    default: Value,
    loc: Locale,

    popup: Option<PopupId>,
    /// Calendar state while the popup is open.
    pub calendar: CalendarState,
}

/// Format the date. An unusable format string falls back
/// to the default format.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut s = String::new();
    if write!(s, "{}", date.format(format)).is_err() {
        s.clear();
        let _ = write!(s, "{}", date.format(DEFAULT_DATE_FORMAT));
    }
    s
}

/// Parse the date. Surrounding whitespace is ignored.
pub fn parse_date(text: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), format).ok()
}

impl DateEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        Self {
            cell: CellInput::new(args, "date"),
            overlay: args.overlay.clone(),
            default: Value::Null,
            loc: Locale::POSIX,
            popup: None,
            calendar: CalendarState::new(Local::now().date_naive()),
        }
    }

    /// Locale for the calendar.
    pub fn set_locale(&mut self, loc: Locale) {
        self.loc = loc;
    }

    /// Is the calendar open.
    pub fn is_open(&self) -> bool {
        self.popup.is_some()
    }

    fn popup_area(&self) -> Rect {
        layout_popup(
            Placement::BelowOrAbove,
            self.cell.container.area(),
            CALENDAR_SIZE,
            self.overlay.boundary(),
        )
    }

    /// Open the calendar at the date in the input, or today.
    pub fn open_calendar(&mut self) -> bool {
        if self.popup.is_some() {
            return false;
        }
        let fmt = self.cell.column.date_format_or_default();
        let date = parse_date(self.cell.text(), fmt).unwrap_or_else(|| Local::now().date_naive());
        self.calendar = CalendarState::new(date);
        self.popup = Some(self.overlay.open("calendar", self.popup_area()));
        log::debug!("open calendar {}", date);
        true
    }

    /// Close the calendar.
    pub fn close_calendar(&mut self) -> bool {
        if let Some(id) = self.popup.take() {
            self.overlay.close(id);
            true
        } else {
            false
        }
    }

    /// Take the date and close the calendar.
    pub fn pick(&mut self, date: NaiveDate) {
        let text = format_date(date, self.cell.column.date_format_or_default());
        self.cell.load_text(text);
        self.close_calendar();
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for DateEditor {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        if self.popup.is_some() {
            match self.calendar.handle(event, Popup) {
                CalendarOutcome::Continue => {}
                CalendarOutcome::Unchanged => return EditOutcome::Unchanged,
                CalendarOutcome::Changed => return EditOutcome::Changed,
                CalendarOutcome::Picked(date) => {
                    self.pick(date);
                    return EditOutcome::Changed;
                }
                CalendarOutcome::Close => {
                    self.close_calendar();
                    return EditOutcome::Changed;
                }
            }
        }

        if self.cell.is_focused() {
            match event {
                ct_event!(keycode press F(4)) | ct_event!(keycode press ALT-Down) => {
                    return self.open_calendar().into();
                }
                _ => {}
            }
        }

        self.cell.handle(event)
    }
}

impl CellEditor for DateEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Date
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
        self.show();
    }

    fn is_focused(&self) -> bool {
        self.cell.is_focused()
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
        self.cell.container.set_area(area);
        if let Some(id) = self.popup {
            self.overlay.position(id, self.popup_area());
        }
    }

    fn destroy(mut self: Box<Self>) {
        self.close_calendar();
        self.cell.unmount();
    }

    fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        let invalid = !self.validate().valid;
        self.cell.render(buf, style, invalid);
    }

    fn render_popup(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        let Some(id) = self.popup else {
            return;
        };
        if !self.overlay.is_visible(id) {
            return;
        }
        let area = self.overlay.area(id);
        Calendar::new()
            .style(style.popup_style())
            .border_style(style.popup_border_style())
            .select_style(style.select_style())
            .locale(self.loc)
            .render(area, buf, &mut self.calendar);
    }

    fn screen_cursor(&self) -> Option<(u16, u16)> {
        if self.popup.is_some() {
            None
        } else {
            self.cell.screen_cursor()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 7).expect("date");
        assert_eq!(format_date(d, "%m/%d/%Y"), "03/07/2024");
        assert_eq!(format_date(d, "%Y-%m-%d"), "2024-03-07");
        assert_eq!(parse_date(" 03/07/2024 ", "%m/%d/%Y"), Some(d));
        assert_eq!(parse_date("tomorrow", "%m/%d/%Y"), None);
    }
}
