//! A chain of 74HC595-style serial-in, parallel-out shift registers.
//!
//! See [`ShiftRegister`] for the buffering and latching rules.

use embedded_hal::digital::PinState;

#[cfg(feature = "display-trace")]
use defmt::trace;

use crate::Result;
use crate::constants::REGISTER_WIDTH;
use crate::error::Error::ShiftIndexOutOfBounds;
use crate::pins::OutputPins;

/// The three control lines of a shift register chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShiftRegisterPins {
    /// Storage-register clock (RCLK). A rising edge copies the shifted bits to the outputs.
    pub latch: u8,
    /// Serial data in (SER).
    pub data: u8,
    /// Shift-register clock (SRCLK). A rising edge shifts `data` in.
    pub clock: u8,
}

/// `N` daisy-chained 8-bit shift registers behind an in-memory bit buffer.
///
/// Writes only touch the buffer; [`flush`](Self::flush) shifts the whole buffer out and latches
/// it, so the parallel outputs change all at once. Bit `i` ends up on output `i % 8` of register
/// `i / 8`, counting from the register whose data input is wired to the board.
///
/// The first [`set`](Self::set) after a flush drops the latch line, so nothing downstream of the
/// latch can ever observe a half-shifted frame.
pub struct ShiftRegister<P, const N: usize> {
    pins: P,
    lines: ShiftRegisterPins,
    bits: [u8; N],
    latched: bool,
}

impl<P: OutputPins, const N: usize> ShiftRegister<P, N> {
    /// Number of addressable outputs in the chain.
    pub const LEN: usize = N * REGISTER_WIDTH;

    /// Wraps the board lines. Call [`configure`](Self::configure) before use.
    pub const fn new(pins: P, lines: ShiftRegisterPins) -> Self {
        Self {
            pins,
            lines,
            bits: [0; N],
            latched: true,
        }
    }

    /// Makes latch, data and clock outputs, drives them low and clears the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the board rejects any of the three lines.
    pub fn configure(&mut self) -> Result<()> {
        let ShiftRegisterPins { latch, data, clock } = self.lines;
        for pin in [latch, data, clock] {
            self.pins.configure_output(pin)?;
        }
        for pin in [latch, data, clock] {
            self.pins.write(pin, PinState::Low)?;
        }
        self.bits = [0; N];
        self.latched = true;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "shift register: {} x 8 bits on latch={} data={} clock={}",
            N,
            latch,
            data,
            clock
        );
        Ok(())
    }

    /// Stores `value` at `index` without touching the outputs.
    ///
    /// # Errors
    ///
    /// Returns [`ShiftIndexOutOfBounds`] if `index >= Self::LEN`, or a transport error if the
    /// latch line cannot be dropped.
    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        let (byte, mask) = Self::locate(index)?;
        if self.latched {
            self.pins.write(self.lines.latch, PinState::Low)?;
            self.latched = false;
        }
        if let Some(bits) = self.bits.get_mut(byte) {
            if value {
                *bits |= mask;
            } else {
                *bits &= !mask;
            }
        }
        Ok(())
    }

    /// The buffered value at `index`, flushed or not.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        let (byte, mask) = Self::locate(index).ok()?;
        self.bits.get(byte).map(|bits| bits & mask != 0)
    }

    /// Shifts the buffer out, highest index first, then latches it onto the outputs.
    ///
    /// # Errors
    ///
    /// Returns a transport error if any control line cannot be driven. The chain is left
    /// un-latched in that case.
    pub fn flush(&mut self) -> Result<()> {
        let ShiftRegisterPins { latch, data, clock } = self.lines;
        self.pins.write(latch, PinState::Low)?;
        for index in (0..Self::LEN).rev() {
            let bit = self.get(index).unwrap_or_default();
            self.pins.write(data, PinState::from(bit))?;
            self.pins.write(clock, PinState::High)?;
            self.pins.write(clock, PinState::Low)?;
        }
        self.latched = true;
        self.pins.write(latch, PinState::High)?;
        #[cfg(feature = "display-trace")]
        trace!("shift register flushed: {=[u8]:b}", self.bits.as_slice());
        Ok(())
    }

    /// `true` while the outputs show the last flushed buffer.
    #[must_use]
    pub const fn is_latched(&self) -> bool {
        self.latched
    }

    #[must_use]
    pub const fn lines(&self) -> ShiftRegisterPins {
        self.lines
    }

    /// Gives the board lines back.
    pub fn release(self) -> P {
        self.pins
    }

    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Splitting a bit index into byte and bit is the point"
    )]
    fn locate(index: usize) -> Result<(usize, u8)> {
        if index >= Self::LEN {
            return Err(ShiftIndexOutOfBounds {
                index,
                len: Self::LEN,
            });
        }
        Ok((index / REGISTER_WIDTH, 1 << (index % REGISTER_WIDTH)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    /// Counts latch writes and remembers the last one.
    #[derive(Default)]
    struct LatchProbe {
        latch_writes: usize,
        latch_level: Option<PinState>,
    }

    impl OutputPins for LatchProbe {
        fn configure_output(&mut self, _pin: u8) -> Result<()> {
            Ok(())
        }

        fn write(&mut self, pin: u8, state: PinState) -> Result<()> {
            if pin == LINES.latch {
                self.latch_writes += 1;
                self.latch_level = Some(state);
            }
            Ok(())
        }
    }

    const LINES: ShiftRegisterPins = ShiftRegisterPins {
        latch: 4,
        data: 7,
        clock: 2,
    };

    #[test]
    fn test_len_follows_chain_length() {
        assert_eq!(ShiftRegister::<LatchProbe, 1>::LEN, 8);
        assert_eq!(ShiftRegister::<LatchProbe, 3>::LEN, 24);
    }

    #[test]
    fn test_set_and_get() {
        let mut register = ShiftRegister::<_, 2>::new(LatchProbe::default(), LINES);
        register.set(9, true).expect("in range");
        assert_eq!(register.get(9), Some(true));
        assert_eq!(register.get(8), Some(false));
        register.set(9, false).expect("in range");
        assert_eq!(register.get(9), Some(false));
        assert_eq!(register.get(16), None);
    }

    #[test]
    fn test_out_of_range_set_has_no_side_effects() {
        let mut register = ShiftRegister::<_, 1>::new(LatchProbe::default(), LINES);
        assert_eq!(
            register.set(8, true),
            Err(Error::ShiftIndexOutOfBounds { index: 8, len: 8 })
        );
        assert!(register.is_latched());
        assert_eq!(register.release().latch_writes, 0);
    }

    #[test]
    fn test_only_first_set_after_flush_unlatches() {
        let mut register = ShiftRegister::<_, 1>::new(LatchProbe::default(), LINES);
        register.configure().expect("configure");
        register.set(0, true).expect("set");
        register.set(1, true).expect("set");
        assert!(!register.is_latched());
        register.flush().expect("flush");
        assert!(register.is_latched());
        let probe = register.release();
        // configure low, first set low, flush low then high
        assert_eq!(probe.latch_writes, 4);
        assert_eq!(probe.latch_level, Some(PinState::High));
    }
}
