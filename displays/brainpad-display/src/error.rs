//! Display error types

use core::fmt;

/// Errors reported by the [`Ssd1306`](crate::Ssd1306) controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// The underlying bus transaction failed
    Bus(E),
    /// A bus operation was requested before `init()` completed
    NotInitialized,
}

impl<E: fmt::Debug> fmt::Display for DisplayError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "display bus error: {:?}", e),
            Self::NotInitialized => write!(f, "display not initialized"),
        }
    }
}

/// Errors constructing an [`Image`](crate::Image)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// Pixel data does not hold exactly `width * height` entries
    DataLength {
        /// `width * height`
        expected: usize,
        /// Length of the slice that was passed in
        actual: usize,
    },
    /// Width or height is zero
    ZeroSize,
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataLength { expected, actual } => {
                write!(f, "image data holds {} pixels, expected {}", actual, expected)
            }
            Self::ZeroSize => write!(f, "image has zero width or height"),
        }
    }
}
