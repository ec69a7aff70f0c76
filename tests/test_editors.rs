use rat_celledit::column::Column;
use rat_celledit::container::CellContainer;
use rat_celledit::editor::{CellEditor, EditorArgs};
use rat_celledit::kind::{create_editor, EditorKind};
use rat_celledit::popup::OverlayLayer;
use rat_celledit::row::Row;
use rat_celledit::validate::Validation;
use rat_celledit::value::Value;
use ratatui::layout::Rect;
use std::rc::Rc;

fn open(
    kind: EditorKind,
    column: Column,
    row: &Row,
) -> (Box<dyn CellEditor>, CellContainer, Rc<OverlayLayer>) {
    let container = CellContainer::new(Rect::new(10, 5, 20, 1));
    let overlay = Rc::new(OverlayLayer::with_boundary(Rect::new(0, 0, 80, 24)));
    let args = EditorArgs::new(container.clone(), Rc::new(column), row, overlay.clone());
    let mut editor = create_editor(kind, &args);
    editor.load_value(row);
    (editor, container, overlay)
}

const KINDS: [EditorKind; 13] = EditorKind::ALL;

#[test]
fn unchanged_after_load() {
    let values = [
        Value::Null,
        Value::from(""),
        Value::from("abc"),
        Value::from(42),
        Value::from(0.25),
        Value::from(true),
        Value::from("#ff0000"),
        Value::from("25 %"),
        Value::from("03/15/2024"),
    ];
    for kind in KINDS {
        for value in values.iter() {
            let row = Row::new().with("f", value.clone());
            let (editor, _, _) = open(kind, Column::new("f"), &row);
            assert!(
                !editor.is_value_changed(),
                "{} changed after load of {:?}",
                kind,
                value
            );
            editor.destroy();
        }
    }
}

#[test]
fn focused_after_new() {
    for kind in KINDS {
        let row = Row::new().with("f", "x");
        let (mut editor, _, _) = open(kind, Column::new("f"), &row);
        assert!(editor.is_focused(), "{}", kind);
        editor.focus();
        assert!(editor.is_focused(), "{}", kind);
        editor.destroy();
    }
}

#[test]
fn destroy_cleans_up() {
    for kind in KINDS {
        let row = Row::new().with("f", "x");
        let (mut editor, container, overlay) = open(kind, Column::new("f"), &row);
        editor.show();
        editor.focus();
        editor.position(Rect::new(10, 6, 20, 1));
        editor.destroy();
        assert!(container.is_empty(), "{} left a control", kind);
        assert!(overlay.is_empty(), "{} left a popup", kind);
    }
}

#[test]
fn integer_fallback() {
    let row = Row::new().with("qty", "12 pcs");
    let (mut editor, _, _) = open(EditorKind::Integer, Column::new("qty"), &row);
    assert_eq!(editor.value(), "12");

    editor.set_value("abc");
    assert_eq!(editor.serialize_value(), Value::Int(0));
    assert_eq!(
        editor.validate(),
        Validation::fail("Please enter a valid integer")
    );
    assert!(editor.is_value_changed());

    editor.set_value("");
    assert!(editor.validate().valid);
    assert_eq!(editor.serialize_value(), Value::Int(0));

    let row = Row::new().with("qty", "none");
    let (editor, _, _) = open(EditorKind::Integer, Column::new("qty"), &row);
    assert_eq!(editor.value(), "");
}

#[test]
fn float_fallback() {
    let row = Row::new();
    let (mut editor, _, _) = open(EditorKind::Float, Column::new("price"), &row);
    assert_eq!(editor.value(), "");
    assert_eq!(editor.serialize_value(), Value::Text(String::new()));

    editor.set_value("abc");
    assert_eq!(editor.serialize_value(), Value::Float(0.0));
    assert_eq!(editor.validate(), Validation::fail("Please enter a valid float"));

    editor.set_value("1.5e2");
    assert_eq!(editor.serialize_value(), Value::Float(150.0));
    assert!(editor.validate().valid);
}

#[test]
fn percent_complete_fallback() {
    let row = Row::new().with("done", 40);
    let (mut editor, _, _) = open(EditorKind::PercentComplete, Column::new("done"), &row);
    assert_eq!(editor.value(), "40");

    editor.set_value("lots");
    assert_eq!(editor.serialize_value(), Value::Int(0));
    assert_eq!(
        editor.validate(),
        Validation::fail("Please enter a valid positive number")
    );
    assert!(editor.is_value_changed());

    editor.set_value("40");
    assert!(!editor.is_value_changed());

    editor.set_value("");
    assert_eq!(
        editor.validate(),
        Validation::fail("Please enter a valid positive number")
    );
    editor.set_value("12abc");
    assert!(editor.validate().valid);
    assert_eq!(editor.serialize_value(), Value::Int(12));
}

#[test]
fn round_trip() {
    let cases = [
        (EditorKind::Text, "hello world"),
        (EditorKind::Integer, "17"),
        (EditorKind::Integer, "-3"),
        (EditorKind::Float, "2.5"),
        (EditorKind::Date, "12/24/2024"),
        (EditorKind::Checkbox, "true"),
        (EditorKind::Checkbox, "false"),
        (EditorKind::YesNo, "yes"),
        (EditorKind::YesNo, "no"),
        (EditorKind::LongText, "line 1\nline 2"),
    ];
    for (kind, text) in cases {
        let mut row = Row::new();
        let (mut editor, _, _) = open(kind, Column::new("f"), &row);
        editor.set_value(text);
        let state = editor.serialize_value();
        editor.apply_value(&mut row, state);
        editor.destroy();

        let (editor, _, _) = open(kind, Column::new("f"), &row);
        assert_eq!(editor.value(), text, "{}", kind);
        assert!(!editor.is_value_changed());
        editor.destroy();
    }
}

#[test]
fn percentage() {
    let mut row = Row::new().with("rate", 0.25);
    let (mut editor, _, _) = open(EditorKind::Percentage, Column::new("rate"), &row);
    assert_eq!(editor.value(), "25 %");

    assert_eq!(editor.serialize_value(), Value::Float(0.25));
    editor.set_value("30");
    assert_eq!(editor.serialize_value(), Value::Float(30.0));
    editor.set_value("12.5%");
    assert_eq!(editor.serialize_value(), Value::Float(0.125));
    editor.set_value("");
    assert_eq!(editor.serialize_value(), Value::Text(String::new()));
    assert_eq!(
        editor.validate(),
        Validation::fail("Please enter a valid percentage")
    );

    editor.set_value("plenty");
    assert_eq!(
        editor.validate(),
        Validation::fail("Please enter a valid percentage")
    );

    editor.apply_value(&mut row, Value::Float(0.125));
    assert_eq!(row.get("rate"), &Value::from("12.5 %"));
    editor.apply_value(&mut row, Value::Text(String::new()));
    assert_eq!(row.get("rate"), &Value::from(""));

    let row = Row::new().with("rate", "25%");
    let (editor, _, _) = open(EditorKind::Percentage, Column::new("rate"), &row);
    assert_eq!(editor.value(), "25 %");
}

#[test]
fn checkbox_coercion() {
    let checked = [
        Value::from("true"),
        Value::from("yes"),
        Value::from("TRUE"),
        Value::from(1),
        Value::from(true),
    ];
    let unchecked = [
        Value::from("false"),
        Value::from(0),
        Value::from(""),
        Value::Null,
        Value::from(false),
    ];
    for v in checked {
        let row = Row::new().with("ok", v.clone());
        let (editor, _, _) = open(EditorKind::Checkbox, Column::new("ok"), &row);
        assert_eq!(editor.value(), "true", "{:?}", v);
        assert_eq!(editor.serialize_value(), Value::Bool(true));
    }
    for v in unchecked {
        let row = Row::new().with("ok", v.clone());
        let (editor, _, _) = open(EditorKind::Checkbox, Column::new("ok"), &row);
        assert_eq!(editor.value(), "false", "{:?}", v);
        assert_eq!(editor.serialize_value(), Value::Bool(false));
    }
}

#[test]
fn select() {
    let column = Column::new("state").options([("a", "Alpha"), ("b", "Beta")]);
    let row = Row::new().with("state", "b");
    let (mut editor, _, _) = open(EditorKind::Select, column.clone(), &row);
    assert_eq!(editor.value(), "b");
    assert_eq!(editor.serialize_value(), Value::from("Beta"));
    assert!(!editor.is_value_changed());

    editor.set_value("a");
    assert!(editor.is_value_changed());
    assert_eq!(editor.serialize_value(), Value::from("Alpha"));

    editor.set_value("zz");
    assert_eq!(editor.value(), "");
    assert_eq!(editor.serialize_value(), Value::from(""));

    // no options
    let (editor, _, _) = open(EditorKind::Select, Column::new("state"), &row);
    assert_eq!(editor.value(), "");
    assert_eq!(editor.serialize_value(), Value::Bool(false));
}

#[test]
fn yes_no() {
    let row = Row::new().with("active", "Yes");
    let (mut editor, _, _) = open(EditorKind::YesNo, Column::new("active"), &row);
    assert_eq!(editor.value(), "yes");
    assert_eq!(editor.serialize_value(), Value::Bool(true));

    editor.set_value("no");
    assert!(editor.is_value_changed());
    assert_eq!(editor.serialize_value(), Value::Bool(false));
}

#[test]
fn color() {
    let row = Row::new().with("color", "#FF0000");
    let (mut editor, _, overlay) = open(EditorKind::Color, Column::new("color"), &row);
    assert_eq!(editor.value(), "#ff0000");
    assert!(!editor.is_value_changed());

    // the palette opens with the editor, only once.
    assert_eq!(overlay.popups().len(), 1);
    editor.show();
    editor.focus();
    assert_eq!(overlay.popups().len(), 1);
    editor.hide();
    assert!(overlay.is_empty());
    editor.show();
    assert_eq!(overlay.popups().len(), 1);

    editor.set_value("#00FF00");
    assert!(editor.is_value_changed());
    assert_eq!(editor.serialize_value(), Value::from("#00ff00"));

    editor.set_value("green-ish");
    assert_eq!(editor.value(), "");
}

#[test]
fn date_popup() {
    let row = Row::new().with("due", "03/15/2024");
    let (mut editor, _, overlay) = open(EditorKind::Date, Column::new("due"), &row);
    // show/hide do nothing while the calendar is closed.
    editor.show();
    assert!(overlay.is_empty());
    editor.hide();
    assert!(overlay.is_empty());
    assert_eq!(editor.serialize_value(), Value::from("03/15/2024"));
}

#[test]
fn long_text_popover() {
    let row = Row::new().with("notes", "some\nlines");
    let (mut editor, container, overlay) = open(EditorKind::LongText, Column::new("notes"), &row);
    assert!(container.is_empty());
    let popups = overlay.popups();
    assert_eq!(popups.len(), 1);
    assert!(popups[0].visible);

    editor.hide();
    assert!(!overlay.popups()[0].visible);
    editor.show();
    assert!(overlay.popups()[0].visible);

    editor.position(Rect::new(10, 10, 20, 1));
    assert_eq!(overlay.popups()[0].area, Rect::new(9, 9, 40, 9));
}

#[test]
fn custom_validator() {
    let column = Column::new("qty").validator(|_| Validation::ok());
    let row = Row::new();
    let (mut editor, _, _) = open(EditorKind::Integer, column, &row);
    editor.set_value("abc");
    assert!(editor.validate().valid);

    let column = Column::new("name").validator(|txt| {
        if txt.is_empty() {
            Validation::fail("required")
        } else {
            Validation::ok()
        }
    });
    let (mut editor, _, _) = open(EditorKind::Text, column, &row);
    assert_eq!(editor.validate(), Validation::fail("required"));
    editor.set_value("x");
    assert!(editor.validate().valid);
}

#[test]
fn text_changes() {
    let row = Row::new().with("name", 42);
    let (mut editor, _, _) = open(EditorKind::Text, Column::new("name"), &row);
    assert_eq!(editor.value(), "42");
    editor.set_value("43");
    assert!(editor.is_value_changed());
    assert_eq!(editor.serialize_value(), Value::from("43"));

    let mut row = Row::new().with("other", 1);
    editor.apply_value(&mut row, Value::from("x"));
    assert_eq!(row.get("name"), &Value::from("x"));
    assert_eq!(row.get("other"), &Value::Int(1));
}

#[test]
fn read_only() {
    let row = Row::new().with("id", 7);
    let (mut editor, container, _) = open(EditorKind::ReadOnly, Column::new("id"), &row);
    assert_eq!(editor.value(), "7");
    editor.set_value("8");
    assert!(!editor.is_value_changed());
    assert_eq!(container.controls(), vec![Box::<str>::from("read-only")]);
}
