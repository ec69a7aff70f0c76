//!
//! Color editor.
//!
//! Shows the color as `#rrggbb` in the cell and a palette
//! in the overlay. The palette opens with the editor, typing
//! a hex value works too.
//!
use crate::editor::{validate_with, CellEditor, EditorArgs};
use crate::event::{ct_event, EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::popup::{layout_popup, Overlay, Placement, PopupId};
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::text::CellInput;
use crate::validate::Validation;
use crate::value::Value;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Widget};
use std::rc::Rc;
use std::str::FromStr;

/// Palette of the picker.
pub const PALETTE: [&[u32]; 7] = [
    &[
        0x000000, 0x262626, 0x464646, 0x626262, 0x707070, 0x7D7D7D, 0x898989, 0x959595, 0xA0A0A0,
        0xACACAC, 0xB7B7B7, 0xC2C2C2, 0xD7D7D7, 0xE1E1E1, 0xEBEBEB, 0xFFFFFF,
    ],
    &[
        0xFF0000, 0xFFFF00, 0x00FF00, 0x00FFFF, 0x0000FF, 0xFF00FF, 0xED1C24, 0xFFF200, 0x00A651,
        0x00AEEF, 0x2E3192, 0xEC008C,
    ],
    &[
        0xF7977A, 0xF9AD81, 0xFDC68A, 0xFFF79A, 0xC4DF9B, 0xA2D39C, 0x82CA9D, 0x7BCDC8, 0x6ECFF6,
        0x7EA7D8, 0x8493CA, 0x8882BE, 0xA187BE, 0xBC8DBF, 0xF49AC2, 0xF6989D,
    ],
    &[
        0xF26C4F, 0xF68E55, 0xFBAF5C, 0xFFF467, 0xACD372, 0x7CC576, 0x3BB878, 0x1ABBB4, 0x00BFF3,
        0x438CCA, 0x5574B9, 0x605CA8, 0x855FA8, 0xA763A8, 0xF06EA9, 0xF26D7D,
    ],
    &[
        0xED1C24, 0xF26522, 0xF7941D, 0xFFF200, 0x8DC73F, 0x39B54A, 0x00A651, 0x00A99D, 0x00AEEF,
        0x0072BC, 0x0054A6, 0x2E3192, 0x662D91, 0x92278F, 0xEC008C, 0xED145B,
    ],
    &[
        0x9E0B0F, 0xA0410D, 0xA36209, 0xABA000, 0x598527, 0x1A7B30, 0x007236, 0x00746B, 0x0076A3,
        0x004B80, 0x003471, 0x1B1464, 0x440E62, 0x630460, 0x9E005D, 0x9E0039,
    ],
    &[
        0x790000, 0x7B2E00, 0x7D4900, 0x827B00, 0x406618, 0x005E20, 0x005826, 0x005952, 0x005B7F,
        0x003663, 0x002157, 0x0D004C, 0x32004B, 0x4B0049, 0x7B0046, 0x7A0026,
    ],
];

const SWATCH_WIDTH: u16 = 2;

const PALETTE_SIZE: Size = Size {
    width: 16 * SWATCH_WIDTH + 2,
    height: PALETTE.len() as u16 + 2,
};

/// Hex notation of the color. Only rgb colors have one.
pub fn color_to_hex(color: Color) -> Option<String> {
    match color {
        Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
        _ => None,
    }
}

/// Normalized hex notation for the text. Empty if the
/// text is no rgb color.
pub fn normalize_color(text: &str) -> String {
    Color::from_str(text.trim())
        .ok()
        .and_then(color_to_hex)
        .unwrap_or_default()
}

/// Edits a color.
#[derive(Debug)]
pub struct ColorEditor {
    cell: CellInput,
    overlay: Rc<dyn Overlay>,
    default: Value,
    default_hex: String,

    popup: Option<PopupId>,
    /// Palette cursor as (row, column).
    pub cursor: (usize, usize),
    /// Palette swatches.
    /// __read only__. renewed for each render.
    pub area_swatches: Vec<(Rect, (usize, usize))>,
}

impl ColorEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        let mut s = Self {
            cell: CellInput::new(args, "color"),
            overlay: args.overlay.clone(),
            default: Value::Null,
            default_hex: String::new(),
            popup: None,
            cursor: (0, 0),
            area_swatches: Vec::new(),
        };
        s.show();
        s
    }

    /// Is the palette open.
    pub fn is_open(&self) -> bool {
        self.popup.is_some()
    }

    /// Current color.
    pub fn color(&self) -> Option<Color> {
        Color::from_str(self.cell.text().trim())
            .ok()
            .filter(|v| matches!(v, Color::Rgb(..)))
    }

    fn popup_area(&self) -> Rect {
        layout_popup(
            Placement::BelowOrAbove,
            self.cell.container.area(),
            PALETTE_SIZE,
            self.overlay.boundary(),
        )
    }

    fn move_cursor(&mut self, drow: isize, dcol: isize) -> bool {
        let old = self.cursor;
        let row = self
            .cursor
            .0
            .saturating_add_signed(drow)
            .min(PALETTE.len() - 1);
        let col = self
            .cursor
            .1
            .saturating_add_signed(dcol)
            .min(PALETTE[row].len() - 1);
        self.cursor = (row, col);
        old != self.cursor
    }

    /// Take the color under the palette cursor.
    pub fn pick(&mut self, (row, col): (usize, usize)) -> bool {
        let Some(rgb) = PALETTE.get(row).and_then(|v| v.get(col)) else {
            return false;
        };
        self.cursor = (row, col);
        let hex = color_to_hex(Color::from_u32(*rgb)).unwrap_or_default();
        self.cell.load_text(hex);
        true
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for ColorEditor {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        if self.popup.is_some() && self.cell.is_focused() {
            let r = match event {
                ct_event!(keycode press Left) => self.move_cursor(0, -1).into(),
                ct_event!(keycode press Right) => self.move_cursor(0, 1).into(),
                ct_event!(keycode press Up) => self.move_cursor(-1, 0).into(),
                ct_event!(keycode press Down) => self.move_cursor(1, 0).into(),
                ct_event!(keycode press Enter) => self.pick(self.cursor).into(),
                _ => EditOutcome::Continue,
            };
            if r != EditOutcome::Continue {
                return r;
            }
        }

        if let ct_event!(mouse down Left for x, y) = event {
            let pos = Position::new(*x, *y);
            if let Some((_, idx)) = self.area_swatches.iter().find(|(v, _)| v.contains(pos)) {
                let idx = *idx;
                return self.pick(idx).into();
            }
            if let Some(id) = self.popup {
                let outside = !self.overlay.area(id).contains(pos)
                    && !self.cell.container.area().contains(pos);
                if outside {
                    self.hide();
                    return EditOutcome::Continue;
                }
            }
        }

        self.cell.handle(event)
    }
}

impl CellEditor for ColorEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Color
    }

    fn load_value(&mut self, item: &Row) {
        self.default = item.get(self.cell.field()).clone();
        self.default_hex = normalize_color(&self.default.to_text());
        self.cell.load_text(self.default_hex.clone());
    }

    fn value(&self) -> String {
        normalize_color(self.cell.text())
    }

    fn set_value(&mut self, value: &str) {
        self.cell.input.set_text(value);
    }

    fn serialize_value(&self) -> Value {
        Value::Text(self.value())
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        item.set(self.cell.field(), state);
    }

    fn is_value_changed(&self) -> bool {
        let value = self.value();
        !(value.is_empty() && self.default.is_null()) && value != self.default_hex
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
        match self.popup {
            Some(id) => self.overlay.set_visible(id, true),
            None => self.popup = Some(self.overlay.open("palette", self.popup_area())),
        }
    }

    fn hide(&mut self) {
        if let Some(id) = self.popup.take() {
            self.overlay.close(id);
            self.area_swatches.clear();
        }
    }

    fn position(&mut self, area: Rect) {
        self.cell.container.set_area(area);
        if let Some(id) = self.popup {
            self.overlay.position(id, self.popup_area());
        }
    }

    fn destroy(mut self: Box<Self>) {
        self.hide();
        self.cell.unmount();
    }

    fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        let area = self.cell.container.area();
        let swatch_width = if area.width > 10 { SWATCH_WIDTH } else { 0 };
        let input_area = Rect::new(area.x, area.y, area.width - swatch_width, area.height);
        let invalid = self.color().is_none() && !self.cell.text().is_empty();
        self.cell.render_area(input_area, buf, style, invalid);
        if swatch_width > 0 {
            let swatch = Rect::new(input_area.right(), area.y, swatch_width, area.height.min(1));
            let bg = self.color().unwrap_or(Color::Reset);
            buf.set_style(swatch, Style::default().bg(bg));
        }
    }

    fn render_popup(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        let Some(id) = self.popup else {
            return;
        };
        if !self.overlay.is_visible(id) {
            return;
        }
        let area = self.overlay.area(id);
        let block = Block::new()
            .borders(Borders::ALL)
            .style(style.popup_style())
            .border_style(style.popup_border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        self.area_swatches.clear();
        for (row, colors) in PALETTE.iter().enumerate() {
            for (col, rgb) in colors.iter().enumerate() {
                let swatch = Rect::new(
                    inner.x + col as u16 * SWATCH_WIDTH,
                    inner.y + row as u16,
                    SWATCH_WIDTH,
                    1,
                )
                .intersection(inner);
                if swatch.is_empty() {
                    continue;
                }
                let color = Color::from_u32(*rgb);
                buf.set_style(swatch, Style::default().bg(color));
                if self.cursor == (row, col) {
                    let fg = if ((rgb >> 16) & 0xff) + ((rgb >> 8) & 0xff) + (rgb & 0xff) > 0x180 {
                        Color::Black
                    } else {
                        Color::White
                    };
                    buf.set_string(swatch.x, swatch.y, "[]", Style::default().fg(fg).bg(color));
                }
                self.area_swatches.push((swatch, (row, col)));
            }
        }
    }

    fn screen_cursor(&self) -> Option<(u16, u16)> {
        self.cell.screen_cursor()
    }
}
