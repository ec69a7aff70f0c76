//!
//! Event-handling for the cell editors.
//!
//! Every editor state implements [HandleEvent] from rat-event for
//! crossterm events with the [Regular] qualifier and reports an
//! [EditOutcome]. The detached parts use the [Popup] qualifier.
//!

pub use rat_event::{ct_event, ConsumedEvent, HandleEvent, MouseOnly, Outcome, Popup, Regular};
pub use rat_text::event::TextOutcome;

/// Result of event-handling for a cell editor.
///
/// Besides the usual Continue/Unchanged/Changed the editor can
/// ask the host grid to finish the edit or to move to another cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EditOutcome {
    /// The given event has not been used at all.
    #[default]
    Continue,
    /// The event has been recognized, but the result was nil.
    /// Further processing for this event may stop.
    Unchanged,
    /// The event has been recognized and there is some change
    /// due to it.
    /// Further processing for this event may stop.
    /// Rendering the ui is advised.
    Changed,
    /// Cancel the ongoing edit.
    Cancel,
    /// Commit the current edit.
    Commit,
    /// Move to the previous cell.
    NavigatePrev,
    /// Move to the next cell.
    NavigateNext,
}

impl ConsumedEvent for EditOutcome {
    fn is_consumed(&self) -> bool {
        *self != EditOutcome::Continue
    }
}

impl From<bool> for EditOutcome {
    fn from(value: bool) -> Self {
        if value {
            EditOutcome::Changed
        } else {
            EditOutcome::Unchanged
        }
    }
}

impl From<Outcome> for EditOutcome {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Continue => EditOutcome::Continue,
            Outcome::Unchanged => EditOutcome::Unchanged,
            Outcome::Changed => EditOutcome::Changed,
        }
    }
}

impl From<TextOutcome> for EditOutcome {
    fn from(value: TextOutcome) -> Self {
        match value {
            TextOutcome::Continue => EditOutcome::Continue,
            TextOutcome::Unchanged => EditOutcome::Unchanged,
            TextOutcome::Changed => EditOutcome::Changed,
            TextOutcome::TextChanged => EditOutcome::Changed,
        }
    }
}

impl From<EditOutcome> for Outcome {
    fn from(value: EditOutcome) -> Self {
        match value {
            EditOutcome::Continue => Outcome::Continue,
            EditOutcome::Unchanged => Outcome::Unchanged,
            EditOutcome::Changed
            | EditOutcome::Cancel
            | EditOutcome::Commit
            | EditOutcome::NavigatePrev
            | EditOutcome::NavigateNext => Outcome::Changed,
        }
    }
}
