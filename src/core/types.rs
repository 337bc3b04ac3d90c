//! Core data types for desktop-attach
//!
//! The only entity the tool deals with is an opaque window handle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque platform-assigned window identifier.
///
/// Handles are borrowed references into window-manager state. They are never
/// allocated or freed here, and liveness is not checked: a non-zero value may
/// refer to a window that has already been destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(isize);

impl WindowHandle {
    /// The null handle
    pub const NULL: WindowHandle = WindowHandle(0);

    /// Wrap a raw handle value
    pub const fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    /// Raw handle value as passed to the platform
    pub const fn as_raw(self) -> isize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// `None` for the null handle, used to map "not found" platform results
    pub fn non_null(raw: isize) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Reason a string could not be read as a window handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleParseError {
    /// Not a base-10 integer
    NotAnInteger,
    /// An integer, but wider than the platform pointer
    OutOfRange,
}

impl FromStr for WindowHandle {
    type Err = HandleParseError;

    /// Parse a base-10 handle. Surrounding whitespace and a leading sign are
    /// accepted; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| HandleParseError::NotAnInteger)?;
        isize::try_from(value)
            .map(WindowHandle)
            .map_err(|_| HandleParseError::OutOfRange)
    }
}
