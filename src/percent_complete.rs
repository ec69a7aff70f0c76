//!
//! Percent-complete editor.
//!
//! An input line for 0..=100, a horizontal slider and three
//! preset buttons, all mounted into the cell. The slider always
//! shows the number in the input line.
//!
//! If the cell has a second row the buttons go there, otherwise
//! they follow the slider as far as there is room.
//!
use crate::container::ControlId;
use crate::editor::{validate_with, CellEditor, EditorArgs};
use crate::event::{ct_event, EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::text::CellInput;
use crate::validate::Validation;
use crate::value::{parse_int_prefix, Value};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Widget;
use std::cmp::min;
use unicode_width::UnicodeWidthStr;

/// The preset buttons.
pub const PRESETS: [(&str, i64); 3] = [("Not started", 0), ("In Progress", 50), ("Complete", 100)];

const INPUT_WIDTH: u16 = 5;

/// Edits a percentage of completion.
#[derive(Debug)]
pub struct PercentCompleteEditor {
    cell: CellInput,
    slider_control: ControlId,
    buttons_control: ControlId,
    default: Value,

    /// Slider track.
    /// __read only__. renewed for each render.
    pub track: Rect,
    /// Preset buttons.
    /// __read only__. renewed for each render.
    pub buttons: [Rect; 3],
}

/// Needs at least a leading integer.
fn validate_percent(text: &str) -> Validation {
    if parse_int_prefix(text).is_some() {
        Validation::ok()
    } else {
        Validation::fail("Please enter a valid positive number")
    }
}

impl PercentCompleteEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        let cell = CellInput::new(args, "percent");
        let slider_control = args.container.mount("slider");
        let buttons_control = args.container.mount("buttons");
        Self {
            cell,
            slider_control,
            buttons_control,
            default: Value::Null,
            track: Default::default(),
            buttons: Default::default(),
        }
    }

    /// Current value of the slider.
    pub fn percent(&self) -> i64 {
        parse_int_prefix(self.cell.text()).unwrap_or(0).clamp(0, 100)
    }

    /// Set the slider and the text.
    pub fn set_percent(&mut self, percent: i64) -> bool {
        let percent = percent.clamp(0, 100);
        let text = percent.to_string();
        if self.cell.text() != text {
            self.cell.input.set_text(text);
            true
        } else {
            false
        }
    }

    /// Step the slider.
    pub fn step(&mut self, n: i64) -> bool {
        self.set_percent(self.percent() + n)
    }

    fn layout(&mut self, area: Rect) -> Rect {
        let input = Rect::new(area.x, area.y, min(INPUT_WIDTH, area.width), min(1, area.height));

        let buttons_width = PRESETS
            .iter()
            .map(|(label, _)| label.width() as u16 + 3)
            .sum::<u16>();

        let (track_width, mut bx, by) = if area.height >= 2 {
            (area.width.saturating_sub(INPUT_WIDTH + 1), area.x, area.y + 1)
        } else {
            let rest = area.width.saturating_sub(INPUT_WIDTH + 1);
            let track_width = if rest >= buttons_width + 10 {
                rest - buttons_width
            } else {
                rest
            };
            (track_width, area.x + INPUT_WIDTH + 1 + track_width, area.y)
        };
        self.track = Rect::new(area.x + INPUT_WIDTH + 1, area.y, track_width, min(1, area.height))
            .intersection(area);

        for (i, (label, _)) in PRESETS.iter().enumerate() {
            let w = label.width() as u16 + 2;
            let b = Rect::new(bx, by, w, 1);
            self.buttons[i] = if area.contains(Position::new(b.x, b.y))
                && b.right() <= area.right()
            {
                b
            } else {
                Rect::new(b.x, b.y, 0, 0)
            };
            bx += w + 1;
        }

        input
    }

    fn clicked_at(&mut self, x: u16) -> bool {
        if self.track.width <= 1 {
            return false;
        }
        let pos = x.saturating_sub(self.track.x) as i64;
        let len = (self.track.width - 1) as i64;
        self.set_percent((pos * 100 + len / 2) / len)
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for PercentCompleteEditor {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        let r = if self.cell.is_focused() {
            match event {
                ct_event!(keycode press Up) => self.step(1).into(),
                ct_event!(keycode press Down) => self.step(-1).into(),
                ct_event!(keycode press PageUp) => self.step(10).into(),
                ct_event!(keycode press PageDown) => self.step(-10).into(),
                _ => EditOutcome::Continue,
            }
        } else {
            EditOutcome::Continue
        };
        if r != EditOutcome::Continue {
            return r;
        }

        let r = match event {
            ct_event!(mouse down Left for x, y) | ct_event!(mouse drag Left for x, y) => {
                let pos = Position::new(*x, *y);
                if self.track.contains(pos) {
                    self.clicked_at(*x).into()
                } else if let Some(i) = self.buttons.iter().position(|v| v.contains(pos)) {
                    self.set_percent(PRESETS[i].1).into()
                } else {
                    EditOutcome::Continue
                }
            }
            _ => EditOutcome::Continue,
        };
        if r != EditOutcome::Continue {
            return r;
        }

        self.cell.handle(event)
    }
}

impl CellEditor for PercentCompleteEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::PercentComplete
    }

    fn load_value(&mut self, item: &Row) {
        self.default = item.get(self.cell.field()).clone();
        let text = match self.default.as_int() {
            Some(v) => v.to_string(),
            None => String::new(),
        };
        self.cell.load_text(text);
    }

    fn value(&self) -> String {
        self.cell.text().to_string()
    }

    fn set_value(&mut self, value: &str) {
        self.cell.input.set_text(value);
    }

    fn serialize_value(&self) -> Value {
        Value::Int(parse_int_prefix(self.cell.text()).unwrap_or(0))
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        item.set(self.cell.field(), state);
    }

    fn is_value_changed(&self) -> bool {
        let text = self.cell.text();
        if text.is_empty() && self.default.is_null() {
            return false;
        }
        let current = parse_int_prefix(text).unwrap_or(0);
        current != self.default.as_int().unwrap_or(0)
    }

    fn validate(&self) -> Validation {
        validate_with(&self.cell.column, self.cell.text(), validate_percent)
    }

    fn focus(&mut self) {
        self.cell.input.focus.set(true);
    }

    fn is_focused(&self) -> bool {
        self.cell.is_focused()
    }

    fn destroy(self: Box<Self>) {
        self.cell.container.unmount(self.buttons_control);
        self.cell.container.unmount(self.slider_control);
        self.cell.unmount();
    }

    fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        let area = self.cell.container.area();
        buf.set_style(area, style.style);

        let input_area = self.layout(area);
        let invalid = !self.validate().valid;
        self.cell.render_area(input_area, buf, style, invalid);

        // slider
        if self.track.width > 0 {
            let track_style = style.style;
            let knob_style = style.select_style_on(if self.is_focused() {
                style.focus_style()
            } else {
                style.style
            });
            for x in self.track.left()..self.track.right() {
                if let Some(cell) = buf.cell_mut((x, self.track.y)) {
                    cell.set_symbol("─");
                    cell.set_style(track_style);
                }
            }
            let len = self.track.width.saturating_sub(1) as i64;
            let knob = self.track.x + ((self.percent() * len + 50) / 100) as u16;
            if let Some(cell) = buf.cell_mut((knob, self.track.y)) {
                cell.set_symbol("█");
                cell.set_style(knob_style);
            }
        }

        // buttons
        let button_style = style.button_style();
        let percent = self.percent();
        for (i, (label, value)) in PRESETS.iter().enumerate() {
            let b = self.buttons[i];
            if b.is_empty() {
                continue;
            }
            let s: Style = if percent == *value {
                style.select_style_on(button_style)
            } else {
                button_style
            };
            Span::styled(format!("[{}]", label), s).render(b, buf);
        }
    }

    fn screen_cursor(&self) -> Option<(u16, u16)> {
        self.cell.screen_cursor()
    }
}
