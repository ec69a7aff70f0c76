use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rat_celledit::column::Column;
use rat_celledit::container::CellContainer;
use rat_celledit::editor::{CellEditor, EditorArgs};
use rat_celledit::event::{EditOutcome, HandleEvent, Regular};
use rat_celledit::kind::{create_editor, EditorKind};
use rat_celledit::popup::OverlayLayer;
use rat_celledit::row::Row;
use rat_celledit::session::CellEditStyle;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::rc::Rc;

fn open(kind: EditorKind, column: Column, row: &Row) -> (Box<dyn CellEditor>, Rc<OverlayLayer>) {
    let container = CellContainer::new(Rect::new(10, 5, 20, 1));
    let overlay = Rc::new(OverlayLayer::with_boundary(Rect::new(0, 0, 80, 24)));
    let args = EditorArgs::new(container, Rc::new(column), row, overlay.clone());
    let mut editor = create_editor(kind, &args);
    editor.load_value(row);
    editor.focus();
    (editor, overlay)
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn key_mod(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn text_typing() {
    let row = Row::new().with("name", "ab");
    let (mut editor, _) = open(EditorKind::Text, Column::new("name"), &row);

    // loaded content is selected and gets replaced.
    assert_eq!(
        editor.handle(&key(KeyCode::Char('x')), Regular),
        EditOutcome::Changed
    );
    assert_eq!(editor.value(), "x");
    editor.handle(&key(KeyCode::Char('y')), Regular);
    editor.handle(&key(KeyCode::Left), Regular);
    editor.handle(&key(KeyCode::Backspace), Regular);
    assert_eq!(editor.value(), "y");
    assert!(editor.is_value_changed());

    // commit is up to the host.
    assert_eq!(editor.handle(&key(KeyCode::Enter), Regular), EditOutcome::Continue);
}

#[test]
fn percent_complete_keys() {
    let row = Row::new().with("done", 40);
    let (mut editor, _) = open(EditorKind::PercentComplete, Column::new("done"), &row);

    editor.handle(&key(KeyCode::Up), Regular);
    assert_eq!(editor.value(), "41");
    editor.handle(&key(KeyCode::PageDown), Regular);
    assert_eq!(editor.value(), "31");
    for _ in 0..10 {
        editor.handle(&key(KeyCode::PageUp), Regular);
    }
    assert_eq!(editor.value(), "100");
    assert_eq!(
        editor.handle(&key(KeyCode::PageUp), Regular),
        EditOutcome::Unchanged
    );
}

#[test]
fn percent_complete_buttons() {
    let row = Row::new().with("done", 40);
    let container = CellContainer::new(Rect::new(0, 0, 60, 2));
    let overlay = Rc::new(OverlayLayer::new());
    let args = EditorArgs::new(container, Rc::new(Column::new("done")), &row, overlay);
    let mut editor = create_editor(EditorKind::PercentComplete, &args);
    editor.load_value(&row);

    let mut buf = Buffer::empty(Rect::new(0, 0, 60, 2));
    editor.render(&mut buf, &CellEditStyle::default());

    // buttons on the second row: [Not started] [In Progress] [Complete]
    editor.handle(&click(0, 1), Regular);
    assert_eq!(editor.value(), "0");
    editor.handle(&click(15, 1), Regular);
    assert_eq!(editor.value(), "50");
    editor.handle(&click(30, 1), Regular);
    assert_eq!(editor.value(), "100");

    // slider track starts after the input.
    editor.handle(&click(6, 0), Regular);
    assert_eq!(editor.value(), "0");
    editor.handle(&click(59, 0), Regular);
    assert_eq!(editor.value(), "100");
}

#[test]
fn date_calendar() {
    let row = Row::new().with("due", "03/15/2024");
    let (mut editor, overlay) = open(EditorKind::Date, Column::new("due"), &row);

    assert_eq!(editor.handle(&key(KeyCode::F(4)), Regular), EditOutcome::Changed);
    assert_eq!(overlay.popups().len(), 1);
    assert_eq!(editor.handle(&key(KeyCode::F(4)), Regular), EditOutcome::Unchanged);
    assert_eq!(overlay.popups().len(), 1);

    editor.handle(&key(KeyCode::Right), Regular);
    editor.handle(&key(KeyCode::Down), Regular);
    assert_eq!(editor.handle(&key(KeyCode::Enter), Regular), EditOutcome::Changed);
    assert!(overlay.is_empty());
    assert_eq!(editor.value(), "03/23/2024");
    assert!(editor.is_value_changed());

    editor.handle(&key_mod(KeyCode::Down, KeyModifiers::ALT), Regular);
    assert_eq!(overlay.popups().len(), 1);
    editor.hide();
    assert!(!overlay.popups()[0].visible);
    editor.show();
    assert!(overlay.popups()[0].visible);

    editor.handle(&key(KeyCode::PageDown), Regular);
    editor.handle(&key(KeyCode::Esc), Regular);
    assert!(overlay.is_empty());
    assert_eq!(editor.value(), "03/23/2024");
}

#[test]
fn date_format() {
    let row = Row::new().with("due", "2024-01-31");
    let column = Column::new("due").date_format("%Y-%m-%d");
    let (mut editor, overlay) = open(EditorKind::Date, column, &row);

    editor.handle(&key(KeyCode::F(4)), Regular);
    editor.handle(&key(KeyCode::PageDown), Regular);
    editor.handle(&key(KeyCode::Enter), Regular);
    assert_eq!(editor.value(), "2024-02-29");
    assert!(overlay.is_empty());
}

#[test]
fn long_text_keys() {
    let row = Row::new().with("notes", "a");
    let (mut editor, overlay) = open(EditorKind::LongText, Column::new("notes"), &row);

    editor.handle(&key(KeyCode::End), Regular);
    assert_eq!(editor.handle(&key(KeyCode::Enter), Regular), EditOutcome::Changed);
    editor.handle(&key(KeyCode::Char('b')), Regular);
    assert_eq!(editor.value(), "a\nb");

    assert_eq!(editor.handle(&key(KeyCode::Tab), Regular), EditOutcome::NavigateNext);
    assert_eq!(
        editor.handle(&key_mod(KeyCode::BackTab, KeyModifiers::SHIFT), Regular),
        EditOutcome::NavigatePrev
    );
    assert_eq!(
        editor.handle(&key_mod(KeyCode::Enter, KeyModifiers::CONTROL), Regular),
        EditOutcome::Commit
    );
    assert_eq!(editor.value(), "a\nb");

    assert_eq!(editor.handle(&key(KeyCode::Esc), Regular), EditOutcome::Cancel);
    assert_eq!(editor.value(), "a");
    assert!(!editor.is_value_changed());

    editor.destroy();
    assert!(overlay.is_empty());
}

#[test]
fn long_text_buttons() {
    let row = Row::new().with("notes", "a");
    let (mut editor, _) = open(EditorKind::LongText, Column::new("notes"), &row);

    let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
    editor.render_popup(&mut buf, &CellEditStyle::default());

    // popover at (9, 4) size 40x9; buttons on the last inner line.
    assert_eq!(editor.handle(&click(40, 11), Regular), EditOutcome::Cancel);
    assert_eq!(editor.handle(&click(33, 11), Regular), EditOutcome::Commit);
}

#[test]
fn select_keys() {
    let column = Column::new("state").options([("a", "Alpha"), ("b", "Beta"), ("c", "Charlie")]);
    let row = Row::new().with("state", "a");
    let (mut editor, _) = open(EditorKind::Select, column, &row);

    editor.handle(&key(KeyCode::Down), Regular);
    assert_eq!(editor.value(), "b");
    editor.handle(&key(KeyCode::End), Regular);
    assert_eq!(editor.value(), "c");
    assert_eq!(editor.handle(&key(KeyCode::Down), Regular), EditOutcome::Unchanged);
    editor.handle(&key(KeyCode::Char('a')), Regular);
    assert_eq!(editor.value(), "a");
    editor.handle(&key(KeyCode::Char('c')), Regular);
    assert_eq!(editor.value(), "c");
    editor.handle(&key(KeyCode::Home), Regular);
    assert_eq!(editor.value(), "a");
    assert!(!editor.is_value_changed());
}

#[test]
fn checkbox_toggle() {
    let row = Row::new().with("ok", false);
    let (mut editor, _) = open(EditorKind::Checkbox, Column::new("ok"), &row);

    editor.handle(&key(KeyCode::Char(' ')), Regular);
    assert_eq!(editor.value(), "true");
    assert!(editor.is_value_changed());
    editor.handle(&key(KeyCode::Enter), Regular);
    assert_eq!(editor.value(), "false");
    editor.handle(&click(12, 5), Regular);
    assert_eq!(editor.value(), "true");
    assert_eq!(editor.handle(&click(0, 0), Regular), EditOutcome::Continue);
}

#[test]
fn color_palette() {
    let row = Row::new().with("color", "#000000");
    let (mut editor, overlay) = open(EditorKind::Color, Column::new("color"), &row);

    let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
    editor.render_popup(&mut buf, &CellEditStyle::default());

    editor.handle(&key(KeyCode::Right), Regular);
    editor.handle(&key(KeyCode::Down), Regular);
    assert_eq!(editor.handle(&key(KeyCode::Enter), Regular), EditOutcome::Changed);
    assert_eq!(editor.value(), "#ffff00");

    // palette at (10, 6), first swatch inside the border.
    editor.handle(&click(11, 7), Regular);
    assert_eq!(editor.value(), "#000000");
    assert!(!editor.is_value_changed());

    // click outside cell and palette closes the palette.
    assert_eq!(editor.handle(&click(70, 20), Regular), EditOutcome::Continue);
    assert!(overlay.is_empty());
}

#[test]
fn read_only_ignores() {
    let row = Row::new().with("id", 1);
    let (mut editor, _) = open(EditorKind::ReadOnly, Column::new("id"), &row);
    assert_eq!(
        editor.handle(&key(KeyCode::Char('x')), Regular),
        EditOutcome::Continue
    );
    assert_eq!(editor.handle(&click(12, 5), Regular), EditOutcome::Continue);
    assert_eq!(editor.value(), "1");
}
