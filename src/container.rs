//!
//! The cell region an editor renders into.
//!
use ratatui::layout::Rect;
use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Identifies one control mounted in a [CellContainer].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(u32);

/// Host region for an editor.
///
/// The host grid creates one for the cell that enters edit mode
/// and updates the area when the cell moves. The editor mounts its
/// control on construction and unmounts it when destroyed.
///
/// __Note__
///
/// This struct is intended to be cloned and uses a Rc internally
/// to share the state between host and editor.
#[derive(Clone, Default)]
pub struct CellContainer(Rc<ContainerCore>);

#[derive(Default)]
struct ContainerCore {
    area: Cell<Rect>,
    next_id: Cell<u32>,
    controls: RefCell<Vec<(ControlId, Box<str>)>>,
}

impl Debug for CellContainer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellContainer")
            .field("area", &self.area())
            .field("controls", &self.0.controls.borrow())
            .finish()
    }
}

impl CellContainer {
    /// New container covering the given area.
    pub fn new(area: Rect) -> Self {
        let s = Self::default();
        s.0.area.set(area);
        s
    }

    /// Screen area of the cell.
    pub fn area(&self) -> Rect {
        self.0.area.get()
    }

    /// Screen area of the cell.
    pub fn set_area(&self, area: Rect) {
        self.0.area.set(area);
    }

    /// Mount a control.
    pub fn mount(&self, name: &str) -> ControlId {
        let id = ControlId(self.0.next_id.get());
        self.0.next_id.set(id.0 + 1);
        self.0.controls.borrow_mut().push((id, name.into()));
        id
    }

    /// Remove a control. Returns false if it was not mounted.
    pub fn unmount(&self, id: ControlId) -> bool {
        let mut controls = self.0.controls.borrow_mut();
        let len = controls.len();
        controls.retain(|(v, _)| *v != id);
        len != controls.len()
    }

    /// Is the control mounted.
    pub fn is_mounted(&self, id: ControlId) -> bool {
        self.0.controls.borrow().iter().any(|(v, _)| *v == id)
    }

    /// Names of the mounted controls.
    pub fn controls(&self) -> Vec<Box<str>> {
        self.0
            .controls
            .borrow()
            .iter()
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// No controls mounted.
    pub fn is_empty(&self) -> bool {
        self.0.controls.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount() {
        let c = CellContainer::new(Rect::new(2, 3, 10, 1));
        let c2 = c.clone();

        let a = c.mount("input");
        let b = c.mount("slider");
        assert_ne!(a, b);
        assert_eq!(
            c2.controls(),
            vec![Box::<str>::from("input"), Box::<str>::from("slider")]
        );

        assert!(c.unmount(a));
        assert!(!c.unmount(a));
        assert!(!c2.is_mounted(a));
        assert!(c2.is_mounted(b));
        c.unmount(b);
        assert!(c2.is_empty());
        assert_eq!(c2.area(), Rect::new(2, 3, 10, 1));
    }
}
