//! Where a display's pin writes go.
//!
//! A [`SegmentDisplay`](crate::SegmentDisplay) addresses its twelve lines by id and does not care
//! whether an id is a GPIO on the board ([`DirectPins`]) or an output of a shift register chain
//! ([`ShiftRegister`]). The difference is captured by [`OutputTarget`].

use embedded_hal::digital::PinState;

use crate::Result;
use crate::pins::OutputPins;
use crate::shift_register::ShiftRegister;

/// A sink for display pin writes.
pub trait OutputTarget {
    /// Puts `pin` into output mode if this target manages pin modes itself.
    ///
    /// Returns `Ok(false)` when the target has no per-pin modes (a shift register's outputs
    /// always drive), which callers must accept as success.
    ///
    /// # Errors
    ///
    /// Returns an error if the target supports modes and rejects this one.
    fn try_configure_output(&mut self, pin: u8) -> Result<bool>;

    /// Records the level for `pin`. May not reach the hardware until [`flush`](Self::flush).
    ///
    /// # Errors
    ///
    /// Returns an error if `pin` is not addressable or the transport fails.
    fn write(&mut self, pin: u8, state: PinState) -> Result<()>;

    /// Makes every write so far visible on the hardware.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    fn flush(&mut self) -> Result<()>;
}

impl<T: OutputTarget + ?Sized> OutputTarget for &mut T {
    #[inline]
    fn try_configure_output(&mut self, pin: u8) -> Result<bool> {
        (**self).try_configure_output(pin)
    }

    #[inline]
    fn write(&mut self, pin: u8, state: PinState) -> Result<()> {
        (**self).write(pin, state)
    }

    #[inline]
    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Display lines wired straight to board pins. Writes take effect immediately.
pub struct DirectPins<P>(P);

impl<P: OutputPins> DirectPins<P> {
    pub const fn new(pins: P) -> Self {
        Self(pins)
    }

    pub fn release(self) -> P {
        self.0
    }
}

impl<P: OutputPins> OutputTarget for DirectPins<P> {
    fn try_configure_output(&mut self, pin: u8) -> Result<bool> {
        self.0.configure_output(pin)?;
        Ok(true)
    }

    #[inline]
    fn write(&mut self, pin: u8, state: PinState) -> Result<()> {
        self.0.write(pin, state)
    }

    #[inline]
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Display lines are shift register outputs; pin ids are bit indexes into the chain.
impl<P: OutputPins, const N: usize> OutputTarget for ShiftRegister<P, N> {
    fn try_configure_output(&mut self, _pin: u8) -> Result<bool> {
        Ok(false)
    }

    #[inline]
    fn write(&mut self, pin: u8, state: PinState) -> Result<()> {
        self.set(usize::from(pin), state == PinState::High)
    }

    #[inline]
    fn flush(&mut self) -> Result<()> {
        ShiftRegister::flush(self)
    }
}
