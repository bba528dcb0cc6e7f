//! Capabilities the drivers need from the board.
//!
//! Drivers in this crate never touch hardware directly. They talk to numbered lines through
//! [`OutputPins`] and receive button edges as [`PinEvent`]s, so the same code runs against a
//! microcontroller's GPIO bank, a remote I/O expander, or a test recorder.

use embassy_time::Instant;
use embedded_hal::digital::PinState;

use crate::Result;

/// Numbered digital output lines, e.g. the header of a microcontroller board.
pub trait OutputPins {
    /// Puts `pin` into output mode.
    ///
    /// # Errors
    ///
    /// Returns an error if `pin` does not exist or the board rejects the mode change.
    fn configure_output(&mut self, pin: u8) -> Result<()>;

    /// Drives `pin` to `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pin` does not exist or the line cannot be driven.
    fn write(&mut self, pin: u8, state: PinState) -> Result<()>;
}

impl<T: OutputPins + ?Sized> OutputPins for &mut T {
    #[inline]
    fn configure_output(&mut self, pin: u8) -> Result<()> {
        (**self).configure_output(pin)
    }

    #[inline]
    fn write(&mut self, pin: u8, state: PinState) -> Result<()> {
        (**self).write(pin, state)
    }
}

/// Numbered digital input lines that report level changes.
///
/// The board delivers each change as a [`PinEvent`] to whichever handler the firmware wires up,
/// typically [`ResetButton::on_event`](crate::ResetButton::on_event). Delivery may happen on an
/// interrupt, so handlers take `&self`.
pub trait InputPins {
    /// Puts `pin` into input mode with change notifications enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if `pin` does not exist or the board rejects the mode change.
    fn configure_input(&mut self, pin: u8) -> Result<()>;
}

impl<T: InputPins + ?Sized> InputPins for &mut T {
    #[inline]
    fn configure_input(&mut self, pin: u8) -> Result<()> {
        (**self).configure_input(pin)
    }
}

/// A level change on an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinEvent {
    pub pin: u8,
    /// The line went high.
    pub high: bool,
    pub at: Instant,
}
