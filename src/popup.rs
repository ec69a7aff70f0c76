//!
//! Overlay for the detached parts of the editors.
//!
//! Calendar, color palette and the long-text popover don't render
//! into the cell but into an overlay above the grid. The editors
//! only talk to the [Overlay] trait, the host decides how the
//! overlay is realized. [OverlayLayer] is a plain implementation
//! that just keeps book of the open popups.
//!
pub use rat_popup::Placement;
use ratatui::layout::{Rect, Size};
use std::cell::{Cell, RefCell};
use std::cmp::max;
use std::fmt::Debug;

/// Identifies one popup in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupId(u32);

impl PopupId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Capabilities of the overlay as seen by an editor.
pub trait Overlay: Debug {
    /// Outer bounds for all popups. An empty area means no limit.
    fn boundary(&self) -> Rect;

    /// Open a new popup at the given area. The popup starts visible.
    fn open(&self, name: &str, area: Rect) -> PopupId;

    /// Remove the popup.
    fn close(&self, id: PopupId);

    /// Is the popup still open.
    fn is_open(&self, id: PopupId) -> bool;

    /// Show or hide an open popup.
    fn set_visible(&self, id: PopupId, visible: bool);

    /// Is the popup open and visible.
    fn is_visible(&self, id: PopupId) -> bool;

    /// Move the popup.
    fn position(&self, id: PopupId, area: Rect);

    /// Current area of the popup. Empty if not open.
    fn area(&self, id: PopupId) -> Rect;
}

/// Book-keeping overlay.
///
/// The host renders the grid first and then calls `render_popup`
/// of the active editor for all visible popups.
#[derive(Debug, Default)]
pub struct OverlayLayer {
    boundary: Cell<Rect>,
    next_id: Cell<u32>,
    popups: RefCell<Vec<PopupEntry>>,
}

/// One open popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupEntry {
    pub id: PopupId,
    pub name: Box<str>,
    pub area: Rect,
    pub visible: bool,
}

impl OverlayLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay with outer bounds.
    pub fn with_boundary(boundary: Rect) -> Self {
        let s = Self::default();
        s.boundary.set(boundary);
        s
    }

    /// Change the outer bounds.
    pub fn set_boundary(&self, boundary: Rect) {
        self.boundary.set(boundary);
    }

    /// All open popups.
    pub fn popups(&self) -> Vec<PopupEntry> {
        self.popups.borrow().clone()
    }

    /// Nothing open.
    pub fn is_empty(&self) -> bool {
        self.popups.borrow().is_empty()
    }
}

impl Overlay for OverlayLayer {
    fn boundary(&self) -> Rect {
        self.boundary.get()
    }

    fn open(&self, name: &str, area: Rect) -> PopupId {
        let id = PopupId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.popups.borrow_mut().push(PopupEntry {
            id,
            name: name.into(),
            area,
            visible: true,
        });
        id
    }

    fn close(&self, id: PopupId) {
        self.popups.borrow_mut().retain(|v| v.id != id);
    }

    fn is_open(&self, id: PopupId) -> bool {
        self.popups.borrow().iter().any(|v| v.id == id)
    }

    fn set_visible(&self, id: PopupId, visible: bool) {
        if let Some(p) = self.popups.borrow_mut().iter_mut().find(|v| v.id == id) {
            p.visible = visible;
        }
    }

    fn is_visible(&self, id: PopupId) -> bool {
        self.popups
            .borrow()
            .iter()
            .any(|v| v.id == id && v.visible)
    }

    fn position(&self, id: PopupId, area: Rect) {
        if let Some(p) = self.popups.borrow_mut().iter_mut().find(|v| v.id == id) {
            p.area = area;
        }
    }

    fn area(&self, id: PopupId) -> Rect {
        self.popups
            .borrow()
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.area)
            .unwrap_or_default()
    }
}

/// Calculates the area of a popup.
///
/// * placement: relative placement. `Position` places the popup
///   at an absolute position, placements that are not meaningful
///   for a cell fall back to below the cell.
/// * rel_area: the cell.
/// * size: size of the popup.
/// * boundary: outer bounds. An empty boundary means no limit.
///
/// The result is moved to stay within the bounds and shrunk
/// if it is still too big.
pub fn layout_popup(placement: Placement, rel_area: Rect, size: Size, boundary: Rect) -> Rect {
    let below = Rect::new(rel_area.x, rel_area.bottom(), size.width, size.height);
    let above = Rect::new(
        rel_area.x,
        rel_area.y.saturating_sub(size.height),
        size.width,
        size.height,
    );
    let fits_below = boundary.is_empty() || rel_area.bottom() + size.height <= boundary.bottom();
    let fits_above = boundary.is_empty() || rel_area.y >= boundary.top() + size.height;

    let mut area = match placement {
        Placement::Above => above,
        Placement::AboveOrBelow => {
            if fits_above {
                above
            } else {
                below
            }
        }
        Placement::BelowOrAbove => {
            if fits_below {
                below
            } else {
                above
            }
        }
        Placement::Position(x, y) => Rect::new(x, y, size.width, size.height),
        _ => below,
    };

    if boundary.is_empty() {
        return area;
    }

    // keep in sight
    if area.left() < boundary.left() {
        area.x = boundary.left();
    }
    if area.right() >= boundary.right() {
        let corr = area.right().saturating_sub(boundary.right());
        area.x = max(boundary.left(), area.x.saturating_sub(corr));
    }
    if area.top() < boundary.top() {
        area.y = boundary.top();
    }
    if area.bottom() >= boundary.bottom() {
        let corr = area.bottom().saturating_sub(boundary.bottom());
        area.y = max(boundary.top(), area.y.saturating_sub(corr));
    }

    // shrink to size
    if area.right() > boundary.right() {
        let corr = area.right() - boundary.right();
        area.width = area.width.saturating_sub(corr);
    }
    if area.bottom() > boundary.bottom() {
        let corr = area.bottom() - boundary.bottom();
        area.height = area.height.saturating_sub(corr);
    }

    area
}
