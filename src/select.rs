//!
//! Select editor.
//!
//! Chooses one of the options of the column. The cell shows
//! the label of the selected option.
//!
use crate::column::{Column, SelectOption};
use crate::container::{CellContainer, ControlId};
use crate::editor::{validate_with, CellEditor, EditorArgs};
use crate::event::{ct_event, EditOutcome, HandleEvent, Regular};
use crate::kind::EditorKind;
use crate::row::Row;
use crate::session::CellEditStyle;
use crate::validate::Validation;
use crate::value::Value;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::text::Span;
use ratatui::widgets::Widget;
use rat_focus::FocusFlag;
use std::rc::Rc;

/// List of options with a selection.
///
/// Shared by the select and the yes-no editor.
#[derive(Debug)]
pub(crate) struct Choice {
    pub(crate) container: CellContainer,
    pub(crate) control: ControlId,
    pub(crate) column: Rc<Column>,
    pub(crate) focus: FocusFlag,

    pub(crate) options: Vec<SelectOption>,
    pub(crate) selected: Option<usize>,
}

impl Choice {
    pub(crate) fn new(args: &EditorArgs<'_>, name: &str, options: Vec<SelectOption>) -> Self {
        let control = args.container.mount(name);
        let focus = FocusFlag::named(name);
        focus.set(true);
        Self {
            container: args.container.clone(),
            control,
            column: args.column.clone(),
            focus,
            options,
            selected: None,
        }
    }

    pub(crate) fn field(&self) -> &str {
        &self.column.field
    }

    /// Select the option with the key.
    pub(crate) fn select_key(&mut self, key: &str) {
        self.selected = self.options.iter().position(|v| v.key == key);
    }

    pub(crate) fn selected_option(&self) -> Option<&SelectOption> {
        self.selected.and_then(|v| self.options.get(v))
    }

    /// Key of the selection or empty.
    pub(crate) fn key(&self) -> &str {
        self.selected_option().map(|v| v.key.as_str()).unwrap_or("")
    }

    pub(crate) fn select(&mut self, idx: usize) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let idx = idx.min(self.options.len() - 1);
        let old = self.selected.replace(idx);
        old != Some(idx)
    }

    pub(crate) fn prev(&mut self) -> bool {
        match self.selected {
            Some(v) => self.select(v.saturating_sub(1)),
            None => self.select(0),
        }
    }

    pub(crate) fn next(&mut self) -> bool {
        match self.selected {
            Some(v) => self.select(v + 1),
            None => self.select(0),
        }
    }

    /// Jump to the next option whose label starts with c.
    pub(crate) fn jump_to(&mut self, c: char) -> bool {
        let len = self.options.len();
        let start = self.selected.map(|v| v + 1).unwrap_or(0);
        let c = c.to_lowercase().collect::<String>();
        for i in 0..len {
            let idx = (start + i) % len;
            if self.options[idx].label.to_lowercase().starts_with(&c) {
                return self.select(idx);
            }
        }
        false
    }

    pub(crate) fn handle(&mut self, event: &crossterm::event::Event) -> EditOutcome {
        let r = if self.focus.get() {
            match event {
                ct_event!(keycode press Up) => self.prev().into(),
                ct_event!(keycode press Down) => self.next().into(),
                ct_event!(keycode press Home) => self.select(0).into(),
                ct_event!(keycode press End) => self.select(usize::MAX).into(),
                ct_event!(key press c) | ct_event!(key press SHIFT-c) => self.jump_to(*c).into(),
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
                if self.selected.map(|v| v + 1) == Some(self.options.len()) {
                    self.select(0).into()
                } else {
                    self.next().into()
                }
            }
            _ => EditOutcome::Continue,
        }
    }

    pub(crate) fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        let area = self.container.area();
        let style = if self.focus.get() {
            style.focus_style()
        } else {
            style.style
        };
        buf.set_style(area, style);
        if area.is_empty() {
            return;
        }

        let label = self.selected_option().map(|v| v.label.as_str()).unwrap_or("");
        Span::from(label).render(Rect::new(area.x, area.y, area.width.saturating_sub(2), 1), buf);
        if area.width > 2 {
            if let Some(cell) = buf.cell_mut((area.right() - 1, area.y)) {
                cell.set_symbol("▾");
            }
        }
    }

    pub(crate) fn unmount(&self) {
        self.container.unmount(self.control);
    }
}

/// Chooses one of the column's options.
#[derive(Debug)]
pub struct SelectEditor {
    choice: Choice,
    default: Option<String>,
}

impl SelectEditor {
    pub fn new(args: &EditorArgs<'_>) -> Self {
        let options = args.column.options.clone().unwrap_or_default();
        if args.column.options.is_none() {
            log::debug!("select editor without options for {:?}", args.field());
        }
        Self {
            choice: Choice::new(args, "select", options),
            default: None,
        }
    }

    /// The options.
    pub fn options(&self) -> &[SelectOption] {
        &self.choice.options
    }

    /// Index of the selected option.
    pub fn selected(&self) -> Option<usize> {
        self.choice.selected
    }

    /// Label of the selected option.
    pub fn selected_label(&self) -> Option<&str> {
        self.choice.selected_option().map(|v| v.label.as_str())
    }
}

impl HandleEvent<crossterm::event::Event, Regular, EditOutcome> for SelectEditor {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> EditOutcome {
        self.choice.handle(event)
    }
}

impl CellEditor for SelectEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Select
    }

    fn load_value(&mut self, item: &Row) {
        let key = item.get(self.choice.field()).to_text();
        self.choice.select_key(&key);
        self.default = self.choice.selected_option().map(|v| v.key.clone());
    }

    fn value(&self) -> String {
        self.choice.key().to_string()
    }

    fn set_value(&mut self, value: &str) {
        self.choice.select_key(value);
    }

    fn serialize_value(&self) -> Value {
        if self.choice.column.options.is_some() {
            Value::Text(
                self.choice
                    .selected_option()
                    .map(|v| v.label.clone())
                    .unwrap_or_default(),
            )
        } else {
            Value::Bool(self.choice.key() == "yes")
        }
    }

    fn apply_value(&self, item: &mut Row, state: Value) {
        item.set(self.choice.field(), state);
    }

    fn is_value_changed(&self) -> bool {
        self.choice.selected_option().map(|v| v.key.as_str()) != self.default.as_deref()
    }

    fn validate(&self) -> Validation {
        validate_with(&self.choice.column, self.choice.key(), |_| Validation::ok())
    }

    fn focus(&mut self) {
        self.choice.focus.set(true);
    }

    fn is_focused(&self) -> bool {
        self.choice.focus.get()
    }

    fn destroy(self: Box<Self>) {
        self.choice.unmount();
    }

    fn render(&mut self, buf: &mut Buffer, style: &CellEditStyle) {
        self.choice.render(buf, style);
    }
}
