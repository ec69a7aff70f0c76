//!
//! Month calendar for the date editor.
//!
//! Renders one month with week numbers and weekday names
//! and keeps track of the selected day.
//!
use crate::event::{ct_event, ConsumedEvent, HandleEvent, Popup};
use chrono::{Datelike, Days, Local, Locale, Months, NaiveDate, Weekday};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Style, Stylize};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, StatefulWidget, Widget};

/// Size of the rendered calendar including the border.
pub const CALENDAR_SIZE: Size = Size {
    width: 3 + 7 * 3 + 2,
    height: 1 + 6 + 2,
};

/// Renders a month.
#[derive(Debug, Default, Clone)]
pub struct Calendar {
    style: Style,
    select_style: Option<Style>,
    border_style: Option<Style>,
    loc: Locale,
}

/// State of the calendar.
#[derive(Debug, Clone)]
pub struct CalendarState {
    /// The whole area.
    /// __read only__. renewed for each render.
    pub area: Rect,
    /// Area inside the border.
    /// __read only__. renewed for each render.
    pub inner: Rect,
    /// Area of each day of the month.
    /// __read only__. renewed for each render.
    pub area_days: [Rect; 31],

    /// Selected day.
    pub selected: NaiveDate,
}

/// Result of event-handling for the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarOutcome {
    /// The given event has not been used at all.
    Continue,
    /// The event has been recognized, but the result was nil.
    Unchanged,
    /// The selected day changed.
    Changed,
    /// The day has been picked.
    Picked(NaiveDate),
    /// Close without a pick.
    Close,
}

impl ConsumedEvent for CalendarOutcome {
    fn is_consumed(&self) -> bool {
        *self != CalendarOutcome::Continue
    }
}

impl From<bool> for CalendarOutcome {
    fn from(value: bool) -> Self {
        if value {
            CalendarOutcome::Changed
        } else {
            CalendarOutcome::Unchanged
        }
    }
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Selected day.
    pub fn select_style(mut self, style: Style) -> Self {
        self.select_style = Some(style);
        self
    }

    /// Border.
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = Some(style);
        self
    }

    /// Locale for month and day names.
    pub fn locale(mut self, loc: Locale) -> Self {
        self.loc = loc;
        self
    }
}

impl StatefulWidget for &Calendar {
    type State = CalendarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl StatefulWidget for Calendar {
    type State = CalendarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

/// Weeks of the month, Monday first. Days outside the month are None.
fn month_grid(first: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut day = first;
    while day.month() == first.month() {
        let wd = day.weekday().num_days_from_monday() as usize;
        week[wd] = Some(day);
        if wd == 6 {
            weeks.push(week);
            week = [None; 7];
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if week.iter().any(|v| v.is_some()) {
        weeks.push(week);
    }
    weeks
}

fn render_ref(widget: &Calendar, area: Rect, buf: &mut Buffer, state: &mut CalendarState) {
    state.area = area;
    state.area_days = [Rect::default(); 31];

    let select_style = match widget.select_style {
        Some(style) => style,
        None if widget.style.fg.is_some() || widget.style.bg.is_some() => {
            let mut style = widget.style;
            std::mem::swap(&mut style.fg, &mut style.bg);
            style
        }
        None => widget.style.black().on_white(),
    };
    let border_style = widget.border_style.unwrap_or(widget.style);

    let first = state.first_of_month();
    let block = Block::new()
        .borders(Borders::ALL)
        .style(widget.style)
        .border_style(border_style)
        .title(first.format_localized("%B %Y", widget.loc).to_string())
        .title_alignment(Alignment::Center);
    state.inner = block.inner(area);
    block.render(area, buf);

    let inner = state.inner;
    let column = |i: usize| Rect::new(inner.x + 3 + 3 * i as u16, 0, 2, 1);

    // weekday header
    let monday = first.week(Weekday::Mon).first_day();
    for (i, day) in monday.iter_days().take(7).enumerate() {
        let name: String = day
            .format_localized("%a", widget.loc)
            .to_string()
            .chars()
            .take(2)
            .collect();
        let cell = Rect { y: inner.y, ..column(i) }.intersection(inner);
        Span::from(name).render(cell, buf);
    }

    for (row, week) in month_grid(first).iter().enumerate() {
        let y = inner.y + 1 + row as u16;
        // iso week number of the first day shown in this row.
        if let Some(day) = week.iter().flatten().next() {
            Span::from(day.format_localized("%V", widget.loc).to_string())
                .render(Rect::new(inner.x, y, 2, 1).intersection(inner), buf);
        }
        for (i, day) in week.iter().enumerate() {
            let Some(day) = day else {
                continue;
            };
            let cell = Rect { y, ..column(i) }.intersection(inner);
            state.area_days[day.day0() as usize] = cell;
            let day_style = if *day == state.selected {
                select_style
            } else {
                widget.style
            };
            Span::from(day.format_localized("%e", widget.loc).to_string())
                .style(day_style)
                .render(cell, buf);
        }
    }
}

impl Default for CalendarState {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl CalendarState {
    pub fn new(selected: NaiveDate) -> Self {
        Self {
            area: Default::default(),
            inner: Default::default(),
            area_days: [Rect::default(); 31],
            selected,
        }
    }

    /// First day of the shown month.
    pub fn first_of_month(&self) -> NaiveDate {
        self.selected - Days::new(self.selected.day0() as u64)
    }

    /// Move the selection by n days.
    pub fn move_days(&mut self, n: i64) -> bool {
        let d = if n >= 0 {
            self.selected.checked_add_days(Days::new(n as u64))
        } else {
            self.selected.checked_sub_days(Days::new(n.unsigned_abs()))
        };
        match d {
            Some(d) => {
                self.selected = d;
                true
            }
            None => false,
        }
    }

    /// Move the selection by n months. The day is clamped
    /// to the length of the month.
    pub fn move_months(&mut self, n: i32) -> bool {
        let d = if n >= 0 {
            self.selected.checked_add_months(Months::new(n as u32))
        } else {
            self.selected.checked_sub_months(Months::new(n.unsigned_abs()))
        };
        match d {
            Some(d) => {
                self.selected = d;
                true
            }
            None => false,
        }
    }

    /// Day at the screen position.
    pub fn day_at(&self, pos: Position) -> Option<NaiveDate> {
        let first = self.first_of_month();
        self.area_days
            .iter()
            .position(|v| v.contains(pos))
            .and_then(|i| first.checked_add_days(Days::new(i as u64)))
    }
}

impl HandleEvent<crossterm::event::Event, Popup, CalendarOutcome> for CalendarState {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Popup) -> CalendarOutcome {
        match event {
            ct_event!(keycode press Left) => self.move_days(-1).into(),
            ct_event!(keycode press Right) => self.move_days(1).into(),
            ct_event!(keycode press Up) => self.move_days(-7).into(),
            ct_event!(keycode press Down) => self.move_days(7).into(),
            ct_event!(keycode press PageUp) => self.move_months(-1).into(),
            ct_event!(keycode press PageDown) => self.move_months(1).into(),
            ct_event!(keycode press Enter) => CalendarOutcome::Picked(self.selected),
            ct_event!(keycode press Esc) => CalendarOutcome::Close,
            ct_event!(mouse down Left for x, y) => {
                if let Some(day) = self.day_at(Position::new(*x, *y)) {
                    self.selected = day;
                    CalendarOutcome::Picked(day)
                } else if self.area.contains(Position::new(*x, *y)) {
                    CalendarOutcome::Unchanged
                } else {
                    CalendarOutcome::Continue
                }
            }
            _ => CalendarOutcome::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    #[test]
    fn test_move() {
        let mut s = CalendarState::new(date(2024, 1, 31));
        s.move_months(1);
        assert_eq!(s.selected, date(2024, 2, 29));
        s.move_days(1);
        assert_eq!(s.selected, date(2024, 3, 1));
        s.move_days(-7);
        assert_eq!(s.selected, date(2024, 2, 23));
        assert_eq!(s.first_of_month(), date(2024, 2, 1));
    }

    #[test]
    fn test_grid() {
        // 2024-09-01 is a sunday, the month spans six rows.
        let weeks = month_grid(date(2024, 9, 1));
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0][6], Some(date(2024, 9, 1)));
        assert_eq!(weeks[0][0], None);
        assert_eq!(weeks[5][0], Some(date(2024, 9, 30)));
        assert_eq!(weeks[5][1], None);

        // 2021-02-01 is a monday, exactly four rows.
        assert_eq!(month_grid(date(2021, 2, 1)).len(), 4);
    }

    #[test]
    fn test_render() {
        let area = Rect::new(0, 0, CALENDAR_SIZE.width, CALENDAR_SIZE.height);
        let mut buf = Buffer::empty(area);
        let mut s = CalendarState::new(date(2024, 2, 14));
        Calendar::new().render(area, &mut buf, &mut s);

        // 2024-02-01 is a thursday.
        assert_eq!(s.area_days[0], Rect::new(1 + 3 + 3 * 3, 2, 2, 1));
        assert_eq!(s.day_at(Position::new(13, 2)), Some(date(2024, 2, 1)));
        assert_eq!(s.day_at(Position::new(0, 0)), None);
    }
}
