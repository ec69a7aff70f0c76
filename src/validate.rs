//!
//! Result of validating the content of an editor.
//!
use std::fmt::{Display, Formatter};

/// Validation result.
///
/// A failed validation is a regular value, not an error.
/// The host must not commit an edit that failed validation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Content is acceptable.
    pub valid: bool,
    /// Message for the user if not valid.
    pub msg: Option<String>,
}

impl Validation {
    /// Valid content.
    pub fn ok() -> Self {
        Self {
            valid: true,
            msg: None,
        }
    }

    /// Invalid content with a message.
    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            valid: false,
            msg: Some(msg.into()),
        }
    }

    /// Is valid.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Display for Validation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.valid, &self.msg) {
            (true, _) => write!(f, "valid"),
            (false, Some(msg)) => write!(f, "{}", msg),
            (false, None) => write!(f, "invalid"),
        }
    }
}
