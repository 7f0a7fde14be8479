//! Text buffer errors

use core::fmt;

/// Errors from [`TextBuffer`](crate::TextBuffer) operations
///
/// Every failing call returns before touching the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextError {
    /// Character index is not inside the text
    IndexOutOfRange,
    /// A start/length pair or a capacity/length value is out of range
    ArgumentOutOfRange,
    /// The result would be longer than the buffer's maximum capacity
    CapacityExceeded,
    /// Replace was asked to search for an empty string
    EmptyPattern,
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange => write!(f, "index is outside the text"),
            Self::ArgumentOutOfRange => write!(f, "range or size argument out of bounds"),
            Self::CapacityExceeded => write!(f, "maximum capacity exceeded"),
            Self::EmptyPattern => write!(f, "search string is empty"),
        }
    }
}
