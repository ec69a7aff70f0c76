//!
//! A small grid with one column for each editor.
//!
//! * Arrows move the cell cursor, Enter or F2 starts the edit.
//! * Enter commits, Esc cancels, Tab/BackTab commit and move.
//! * The last row is edited with the row editor, the row
//!   chooses the editor.
//! * Ctrl-Q quits.
//!
use anyhow::anyhow;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{debug, error};
use rat_celledit::column::Column;
use rat_celledit::container::CellContainer;
use rat_celledit::editor::EditorArgs;
use rat_celledit::event::{EditOutcome, HandleEvent, Regular};
use rat_celledit::kind::EditorKind;
use rat_celledit::popup::OverlayLayer;
use rat_celledit::row::Row;
use rat_celledit::validate::Validation;
use rat_celledit::{CellEdit, CellEditStyle, EditSession};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{StatefulWidget, Widget};
use ratatui::Terminal;
use std::fs;
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

const COL_WIDTH: u16 = 14;

fn main() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut state = State::new();
    run_ui(&mut state)
}

struct State {
    columns: Vec<Rc<Column>>,
    rows: Vec<Row>,
    cursor: (usize, usize),

    overlay: Rc<OverlayLayer>,
    session: EditSession,
    /// Grid cells.
    /// __read only__. renewed for each render.
    cells: Vec<Vec<Rect>>,

    status: String,
    quit: bool,
}

impl State {
    fn new() -> Self {
        let columns = vec![
            Column::new("name").name("Name").editor(EditorKind::Text),
            Column::new("qty")
                .name("Qty")
                .editor(EditorKind::Integer)
                .validator(|txt| match txt.trim().parse::<i64>() {
                    Ok(v) if v >= 0 => Validation::ok(),
                    _ => Validation::fail("Quantity must not be negative"),
                }),
            Column::new("price").name("Price").editor(EditorKind::Float),
            Column::new("discount")
                .name("Discount")
                .editor(EditorKind::Percentage),
            Column::new("done")
                .name("Done")
                .editor(EditorKind::PercentComplete),
            Column::new("due").name("Due").editor(EditorKind::Date),
            Column::new("state")
                .name("State")
                .editor(EditorKind::Select)
                .options([("open", "Open"), ("hold", "On hold"), ("closed", "Closed")]),
            Column::new("paid").name("Paid").editor(EditorKind::YesNo),
            Column::new("active")
                .name("Active")
                .editor(EditorKind::Checkbox),
            Column::new("notes")
                .name("Notes")
                .editor(EditorKind::LongText),
            Column::new("color").name("Color").editor(EditorKind::Color),
            Column::new("id").name("Id").editor(EditorKind::ReadOnly),
        ];

        let mut rows = Vec::new();
        for (i, (name, qty)) in [("Carrots", 12), ("Potatoes", 40), ("Onions", 7)]
            .into_iter()
            .enumerate()
        {
            rows.push(
                Row::new()
                    .with("name", name)
                    .with("qty", qty)
                    .with("price", 1.25 * (i + 1) as f64)
                    .with("discount", 0.1)
                    .with("done", 50)
                    .with("due", "03/15/2024")
                    .with("state", "open")
                    .with("paid", i % 2 == 0)
                    .with("active", true)
                    .with("notes", "first line\nsecond line")
                    .with("color", "#ff0000")
                    .with("id", i as i64 + 1),
            );
        }
        // every cell of this row uses the row's editor.
        rows.push(Row::new().with("name", 99).with("qty", 99).with_editor("Integer"));

        Self {
            columns: columns.into_iter().map(Rc::new).collect(),
            rows,
            cursor: (0, 0),
            overlay: Rc::new(OverlayLayer::new()),
            session: EditSession::new(),
            cells: Vec::new(),
            status: String::new(),
            quit: false,
        }
    }

    fn cell_area(&self, (row, col): (usize, usize)) -> Rect {
        self.cells
            .get(row)
            .and_then(|v| v.get(col))
            .copied()
            .unwrap_or_default()
    }

    fn begin_edit(&mut self) -> Result<(), anyhow::Error> {
        let (row, col) = self.cursor;
        let column = self.columns[col].clone();
        let item = &self.rows[row];

        let kind = if item.editor().is_some() {
            EditorKind::Composite
        } else {
            column.editor.unwrap_or_default()
        };

        let mut area = self.cell_area(self.cursor);
        if kind == EditorKind::PercentComplete {
            area.width = 50;
            area.height = 2;
        }

        let container = CellContainer::new(area);
        let args = EditorArgs::new(container, column, item, self.overlay.clone());
        self.session.begin(kind, &args)?;
        debug!("begin edit {:?} at {:?}", kind, self.cursor);
        Ok(())
    }

    fn commit_edit(&mut self) -> bool {
        let row = self.cursor.0;
        match self.session.commit(&mut self.rows[row]) {
            Ok(changed) => {
                self.status = if changed {
                    "Saved.".into()
                } else {
                    "Unchanged.".into()
                };
                true
            }
            Err(e) => {
                self.status = e.to_string();
                false
            }
        }
    }

    fn move_cursor(&mut self, drow: isize, dcol: isize) {
        let row = self
            .cursor
            .0
            .saturating_add_signed(drow)
            .min(self.rows.len() - 1);
        let col = self
            .cursor
            .1
            .saturating_add_signed(dcol)
            .min(self.columns.len() - 1);
        self.cursor = (row, col);
    }
}

fn run_ui(state: &mut State) -> Result<(), anyhow::Error> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    repaint_ui(&mut terminal, state)?;

    let r = 'l: loop {
        let o = match crossterm::event::poll(Duration::from_millis(10)) {
            Ok(true) => {
                let event = match crossterm::event::read() {
                    Ok(v) => v,
                    Err(e) => break 'l Err(anyhow!(e)),
                };
                match handle_event(&event, state) {
                    Ok(v) => v,
                    Err(e) => break 'l Err(e),
                }
            }
            Ok(false) => continue,
            Err(e) => break 'l Err(anyhow!(e)),
        };

        if state.quit {
            break 'l Ok(());
        }

        if o != EditOutcome::Continue {
            if let Err(e) = repaint_ui(&mut terminal, state) {
                break 'l Err(e);
            }
        }
    };

    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;

    r
}

fn repaint_ui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut State,
) -> Result<(), anyhow::Error> {
    terminal.hide_cursor()?;
    terminal.draw(|frame| {
        let area = frame.area();
        if let Err(e) = render(frame.buffer_mut(), area, state) {
            error!("{:?}", e);
        }
        if let Some((x, y)) = state.session.screen_cursor() {
            frame.set_cursor_position(Position::new(x, y));
        }
    })?;
    Ok(())
}

fn render(buf: &mut Buffer, area: Rect, state: &mut State) -> Result<(), anyhow::Error> {
    state.overlay.set_boundary(area);

    let l0 = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    // header
    for (i, c) in state.columns.iter().enumerate() {
        let x = l0[1].x + i as u16 * COL_WIDTH;
        let cell = Rect::new(x, l0[0].y, COL_WIDTH - 1, 1).intersection(l0[0]);
        Span::from(c.name.as_str()).bold().render(cell, buf);
    }

    // grid
    state.cells.clear();
    for (r, row) in state.rows.iter().enumerate() {
        let y = l0[1].y + r as u16 * 2;
        let mut cells = Vec::new();
        for (i, c) in state.columns.iter().enumerate() {
            let x = l0[1].x + i as u16 * COL_WIDTH;
            let cell = Rect::new(x, y, COL_WIDTH - 1, 1).intersection(l0[1]);
            let style = if state.cursor == (r, i) {
                Style::new().black().on_cyan()
            } else {
                Style::new()
            };
            let text = row.get(&c.field).to_text();
            let text = text.lines().next().unwrap_or_default();
            Line::styled(text, style).render(cell, buf);
            cells.push(cell);
        }
        state.cells.push(cells);
    }

    // the active edit on top.
    if state.session.is_active() {
        let cell = state.cell_area(state.cursor);
        let styles = CellEditStyle {
            style: Style::new().white().on_dark_gray(),
            focus: Some(Style::new().black().on_light_cyan()),
            popup: Some(Style::new().white().on_blue()),
            button: Some(Style::new().black().on_white()),
            ..Default::default()
        };
        CellEdit::new()
            .styles(styles)
            .render(cell, buf, &mut state.session);
    }

    Line::from(format!(
        "Ctrl-Q quit | {} popups | {}",
        state.overlay.popups().len(),
        state.status
    ))
    .render(l0[2], buf);

    Ok(())
}

fn handle_event(event: &Event, state: &mut State) -> Result<EditOutcome, anyhow::Error> {
    if let Event::Key(KeyEvent {
        code: KeyCode::Char('q'),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        ..
    }) = event
    {
        state.quit = true;
        return Ok(EditOutcome::Changed);
    }

    if state.session.is_active() {
        let r = state.session.handle(event, Regular);
        let r = match r {
            EditOutcome::Commit => {
                state.commit_edit();
                EditOutcome::Changed
            }
            EditOutcome::Cancel => {
                state.session.cancel()?;
                EditOutcome::Changed
            }
            EditOutcome::NavigateNext => {
                if state.commit_edit() {
                    state.move_cursor(0, 1);
                }
                EditOutcome::Changed
            }
            EditOutcome::NavigatePrev => {
                if state.commit_edit() {
                    state.move_cursor(0, -1);
                }
                EditOutcome::Changed
            }
            EditOutcome::Continue => match event {
                Event::Key(KeyEvent {
                    code: KeyCode::Enter,
                    kind: KeyEventKind::Press,
                    ..
                }) => {
                    state.commit_edit();
                    EditOutcome::Changed
                }
                Event::Key(KeyEvent {
                    code: KeyCode::Esc,
                    kind: KeyEventKind::Press,
                    ..
                }) => {
                    state.session.cancel()?;
                    state.status = "Canceled.".into();
                    EditOutcome::Changed
                }
                Event::Key(KeyEvent {
                    code: code @ (KeyCode::Tab | KeyCode::BackTab),
                    kind: KeyEventKind::Press,
                    ..
                }) => {
                    if state.commit_edit() {
                        if *code == KeyCode::Tab {
                            state.move_cursor(0, 1);
                        } else {
                            state.move_cursor(0, -1);
                        }
                    }
                    EditOutcome::Changed
                }
                _ => EditOutcome::Continue,
            },
            r => r,
        };
        return Ok(r);
    }

    let r = match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Up => {
                state.move_cursor(-1, 0);
                EditOutcome::Changed
            }
            KeyCode::Down => {
                state.move_cursor(1, 0);
                EditOutcome::Changed
            }
            KeyCode::Left => {
                state.move_cursor(0, -1);
                EditOutcome::Changed
            }
            KeyCode::Right | KeyCode::Tab => {
                state.move_cursor(0, 1);
                EditOutcome::Changed
            }
            KeyCode::Enter | KeyCode::F(2) => {
                state.status.clear();
                state.begin_edit()?;
                EditOutcome::Changed
            }
            _ => EditOutcome::Continue,
        },
        Event::Mouse(m) => {
            let pos = Position::new(m.column, m.row);
            let mut r = EditOutcome::Continue;
            for (ri, cells) in state.cells.iter().enumerate() {
                if let Some(ci) = cells.iter().position(|v| v.contains(pos)) {
                    if m.kind == MouseEventKind::Down(MouseButton::Left) {
                        state.cursor = (ri, ci);
                        r = EditOutcome::Changed;
                    }
                    break;
                }
            }
            r
        }
        _ => EditOutcome::Continue,
    };
    Ok(r)
}

fn setup_logging() -> Result<(), anyhow::Error> {
    let log = PathBuf::from("cell_edit1.log");
    if log.exists() {
        fs::remove_file(&log)?;
    }
    fern::Dispatch::new()
        .format(|out, message, _record| out.finish(format_args!("{}", message)))
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(&log)?)
        .apply()?;
    Ok(())
}
