#![doc = include_str!("../readme.md")]
//
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::if_same_then_else)]

pub mod calendar;
pub mod checkbox;
pub mod color;
pub mod column;
pub mod composite;
pub mod container;
pub mod date;
pub mod editor;
pub mod event;
pub mod float;
pub mod integer;
pub mod kind;
pub mod long_text;
pub mod percent_complete;
pub mod percentage;
pub mod popup;
pub mod read_only;
pub mod row;
pub mod select;
pub mod session;
pub mod text;
pub mod validate;
pub mod value;
pub mod yes_no;

pub use editor::{CellEditor, EditorArgs};
pub use kind::{create_editor, EditorKind};
pub use session::{CellEdit, CellEditStyle, EditError, EditSession};

mod _private {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
