use derive_more::derive::{Display, Error};
use embedded_hal::digital::ErrorKind;

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// Everything except [`Error::CannotSetOutputState`] is a contract violation: the caller passed
/// geometry, an index, or text the hardware cannot represent.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A pin driver reported a failure. `embedded_hal` pins only expose an [`ErrorKind`], so
    /// that is what is kept.
    #[display("Error setting output state: {_0:?}")]
    CannotSetOutputState(#[error(not(source))] ErrorKind),

    #[display("Shift register bit {index} out of bounds (chain holds {len} bits)")]
    ShiftIndexOutOfBounds { index: usize, len: usize },

    #[display("Pin {pin} is not part of this output bank")]
    PinOutOfRange { pin: u8 },

    #[display("Expected 4 digit pins, got {len}")]
    DigitCount { len: usize },

    #[display("Expected 8 segment pins, got {len}")]
    SegmentCount { len: usize },

    #[display("Digit index {index} out of range 0..=3")]
    DigitOutOfRange { index: u8 },

    #[display("Token must be one character, optionally followed by '.'")]
    MalformedToken,

    #[display("No 7-segment glyph for {ch:?}")]
    UnknownCharacter { ch: char },

    #[display("Word needs {len} digits but the display has 4")]
    WordTooLong { len: usize },

    #[display("{number} does not fit in 4 digits")]
    NumberTooWide { number: u16 },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::CannotSetOutputState(kind)
    }
}
