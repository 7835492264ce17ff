//! Error types for the LCD driver.

use core::fmt;

/// Errors that can occur during LCD operations.
#[derive(Debug, PartialEq, Eq)]
pub enum LcdError<E> {
    /// A control or data pin could not be driven.
    Pin(E),
    /// Cursor position outside the display.
    OutOfBounds,
    /// Custom glyph slot outside 0–7.
    InvalidGlyph,
    /// An operation was attempted before [`Hd44780::init()`](crate::Hd44780::init)
    /// was called.
    NotInitialized,
}

impl<E> From<E> for LcdError<E> {
    fn from(e: E) -> Self {
        LcdError::Pin(e)
    }
}

impl<E: fmt::Debug> fmt::Display for LcdError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LcdError::Pin(e) => write!(f, "Pin error: {:?}", e),
            LcdError::OutOfBounds => write!(f, "Cursor position out of bounds"),
            LcdError::InvalidGlyph => write!(f, "Glyph slot out of range (must be 0-7)"),
            LcdError::NotInitialized => write!(f, "Not initialized"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for LcdError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            LcdError::Pin(_e) => defmt::write!(f, "Pin error"),
            LcdError::OutOfBounds => defmt::write!(f, "Cursor out of bounds"),
            LcdError::InvalidGlyph => defmt::write!(f, "Invalid glyph slot"),
            LcdError::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}
