use rat_celledit::column::SelectOption;
use rat_celledit::kind::EditorKind;
use rat_celledit::value::Value;
use rat_celledit::CellEditStyle;
use ratatui::style::{Color, Style, Stylize};

#[test]
fn test_serde() {
    let style = CellEditStyle {
        style: Style::new().fg(Color::Rgb(192, 172, 152)),
        focus: Some(Style::new().black().on_cyan()),
        popup_border: Some(Style::new().yellow()),
        ..Default::default()
    };

    let s = serde_json::to_string_pretty(&style).unwrap();
    println!("{}", s);
    let v: CellEditStyle = serde_json::from_str(&s).unwrap();
    println!("{:#?}", v);
    assert_eq!(v, style);
}

#[test]
fn test_serde_value() {
    let v = vec![
        Value::Null,
        Value::Bool(true),
        Value::Int(42),
        Value::Float(0.25),
        Value::Text("03/15/2024".into()),
    ];
    let s = serde_json::to_string(&v).unwrap();
    assert_eq!(s, r#"[null,true,42,0.25,"03/15/2024"]"#);
    let w: Vec<Value> = serde_json::from_str(&s).unwrap();
    assert_eq!(w, v);
}

#[test]
fn test_serde_column_parts() {
    let s = serde_json::to_string(&EditorKind::PercentComplete).unwrap();
    assert_eq!(s, r#""PercentComplete""#);
    let k: EditorKind = serde_json::from_str(r#""LongText""#).unwrap();
    assert_eq!(k, EditorKind::LongText);

    let o: Vec<SelectOption> =
        serde_json::from_str(r#"[{"key":"a","label":"Alpha"},{"key":"b","label":"Beta"}]"#)
            .unwrap();
    assert_eq!(o[1], SelectOption::new("b", "Beta"));
}
