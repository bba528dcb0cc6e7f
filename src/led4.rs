//! A driver for a multiplexed 4-digit, 7-segment LED display.
//!
//! This module renders characters, words and scrolling sentences on a bare display module: four
//! digit (common) lines and eight segment lines, written through an
//! [`OutputTarget`](crate::OutputTarget) so the module can hang off board pins or off a shift
//! register chain.
//!
//! See [`SegmentDisplay`] for the main device abstraction and usage examples.

use core::fmt::Write as _;

use embedded_hal::digital::PinState;

#[cfg(feature = "display-trace")]
use defmt::trace;

use crate::Result;
use crate::constants::{CELL_COUNT, CELL_COUNT_U8, SCROLL_FRAME_REPEATS, SCROLL_TRAILING_FRAMES};
use crate::error::Error::{NumberTooWide, WordTooLong};
use crate::output_target::OutputTarget;

// ============================================================================
// Submodules
// ============================================================================

mod pin_map;
mod segments;
mod token;

pub use pin_map::PinMap;
pub use segments::{Leds, Polarity};
pub use token::{Token, Tokens, scroll_frame};

// ============================================================================
// ScrollConfig
// ============================================================================

/// Pacing for [`SegmentDisplay::scroll_sentence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollConfig {
    /// Full 4-digit refreshes per frame. Higher scrolls slower.
    pub frame_repeats: u16,
    /// Blank frames after the last token has entered.
    pub trailing_frames: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            frame_repeats: SCROLL_FRAME_REPEATS,
            trailing_frames: SCROLL_TRAILING_FRAMES,
        }
    }
}

// ============================================================================
// SegmentDisplay
// ============================================================================

/// A 4-digit, 7-segment LED display module driven one digit at a time.
///
/// Only one digit is ever lit. [`render_word`](Self::render_word) lights each digit in turn and
/// darkens it again before moving on, so the caller must call it over and over (every few
/// milliseconds) for persistence of vision to show the whole word. The driver owns no timing loop.
///
/// When the target is a shift register, every digit is flushed right after it is written.
///
/// # Example
///
/// ```
/// use deadman_kit::{
///     DirectPins, OutputPins, PinMap, Polarity, Result, SegmentDisplay,
///     embedded_hal::digital::PinState,
/// };
///
/// struct Board;
///
/// impl OutputPins for Board {
///     fn configure_output(&mut self, _pin: u8) -> Result<()> {
///         Ok(())
///     }
///
///     fn write(&mut self, _pin: u8, _state: PinState) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// # fn main() -> Result<()> {
/// let mut display =
///     SegmentDisplay::new(DirectPins::new(Board), PinMap::default(), Polarity::ActiveHigh);
/// display.configure()?;
///
/// // Keep calling this from the refresh loop
/// display.render_word("12.5")?;
/// # Ok(())
/// # }
/// ```
pub struct SegmentDisplay<T> {
    target: T,
    pins: PinMap,
    polarity: Polarity,
    scroll: ScrollConfig,
}

impl<T: OutputTarget> SegmentDisplay<T> {
    /// Wraps a target. Call [`configure`](Self::configure) before rendering.
    pub fn new(target: T, pins: PinMap, polarity: Polarity) -> Self {
        Self {
            target,
            pins,
            polarity,
            scroll: ScrollConfig::default(),
        }
    }

    #[must_use]
    pub fn with_scroll(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    /// Puts all twelve lines into output mode where the target has modes, then turns everything
    /// off.
    ///
    /// # Errors
    ///
    /// Returns an error if the target rejects a line.
    pub fn configure(&mut self) -> Result<()> {
        for &pin in self.pins.digits().iter().chain(self.pins.segments()) {
            if !self.target.try_configure_output(pin)? {
                // Shift register outputs: the bus drives its own lines.
                #[cfg(feature = "display-trace")]
                trace!("segment display: line {} has no pin mode", pin);
            }
        }
        self.reset_digit(None)?;
        self.reset_segments()?;
        self.target.flush()?;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "segment display configured: {:?}, {:?}",
            self.polarity,
            self.pins
        );
        Ok(())
    }

    /// Disables the digit at `position`, or all four with `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is not 0 through 3 or the write fails.
    pub fn reset_digit(&mut self, position: Option<u8>) -> Result<()> {
        let off = self.polarity.digit_level(false);
        match position {
            Some(position) => {
                let pin = self.pins.digit(position)?;
                self.target.write(pin, off)
            }
            None => {
                for &pin in self.pins.digits() {
                    self.target.write(pin, off)?;
                }
                Ok(())
            }
        }
    }

    /// Darkens all eight segment lines.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails.
    pub fn reset_segments(&mut self) -> Result<()> {
        let off = self.polarity.segment_level(false);
        for &pin in self.pins.segments() {
            self.target.write(pin, off)?;
        }
        Ok(())
    }

    /// Lights `token` on the digit at `position` (0 = rightmost). Nothing is flushed.
    ///
    /// Segments are cleared, the digit is toggled off and on, then the segment pattern is written.
    /// The digit is enabled before its segments settle, which ghosts the previous digit briefly;
    /// refreshing fast enough hides it.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is out of range, the character has no glyph, or a write
    /// fails. Validation happens before anything is written.
    pub fn render_char(&mut self, token: Token, position: u8) -> Result<()> {
        let digit_pin = self.pins.digit(position)?;
        let mut pattern = Leds::glyph(token.ch)?;
        if token.decimal {
            pattern |= Leds::DECIMAL;
        }

        self.reset_segments()?;
        self.target
            .write(digit_pin, self.polarity.digit_level(false))?;
        self.target.write(digit_pin, self.polarity.digit_level(true))?;
        let mut bits = self.polarity.encode(pattern);
        for &pin in self.pins.segments() {
            self.target.write(pin, PinState::from(bits & 1 == 1))?;
            bits >>= 1;
        }
        Ok(())
    }

    /// Like [`render_char`](Self::render_char), from text such as `"a"` or `"5."`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedToken`](crate::Error::MalformedToken) unless `text` is one character,
    /// optionally followed by `'.'`, plus the errors of `render_char`.
    pub fn render_str(&mut self, text: &str, position: u8) -> Result<()> {
        self.render_char(Token::parse(text)?, position)
    }

    /// Shows `word` right-aligned for one multiplex pass.
    ///
    /// The last token goes to position 0, the one before it to position 1 and so on. Each digit
    /// is rendered, flushed, then disabled again before the next one, so call this repeatedly to
    /// keep the word visible. Unused positions stay dark.
    ///
    /// # Errors
    ///
    /// Returns [`WordTooLong`] if `word` needs more than 4 cells (decimal points ride along with
    /// their character), or any error of [`render_char`](Self::render_char). The whole word is
    /// validated before anything is written.
    pub fn render_word(&mut self, word: &str) -> Result<()> {
        let mut cells = heapless::Vec::<Token, CELL_COUNT>::new();
        for token in Tokens::new(word) {
            Leds::glyph(token.ch)?;
            cells.push(token).map_err(|_| WordTooLong {
                len: Tokens::new(word).count(),
            })?;
        }
        #[cfg(feature = "display-trace")]
        trace!("render_word: {=str} -> {} cells", word, cells.len());

        self.reset_segments()?;
        self.reset_digit(None)?;
        for (&token, position) in cells.iter().rev().zip(0..CELL_COUNT_U8) {
            self.show(token, position)?;
        }
        Ok(())
    }

    /// Shows `number` in decimal, right-aligned, for one multiplex pass.
    ///
    /// # Errors
    ///
    /// Returns [`NumberTooWide`] above 9999, or any error of
    /// [`render_word`](Self::render_word).
    pub fn render_number(&mut self, number: u16) -> Result<()> {
        let mut text = heapless::String::<5>::new();
        write!(text, "{number}").map_err(|_| NumberTooWide { number })?;
        if text.len() > CELL_COUNT {
            return Err(NumberTooWide { number });
        }
        self.render_word(&text)
    }

    /// Scrolls `text` across the display from right to left, then off it.
    ///
    /// Each frame is held for `frame_repeats` refreshes of all four digits, and `trailing_frames`
    /// blank frames follow the last token. Blocks until the whole sentence has gone by.
    ///
    /// # Errors
    ///
    /// Returns an error if a character has no glyph (checked before scrolling starts) or a
    /// write fails.
    pub fn scroll_sentence(&mut self, text: &str) -> Result<()> {
        let mut token_count = 0_usize;
        for token in Tokens::new(text) {
            Leds::glyph(token.ch)?;
            token_count = token_count.saturating_add(1);
        }
        let frame_count = token_count.saturating_add(self.scroll.trailing_frames);
        #[cfg(feature = "display-trace")]
        trace!("scroll_sentence: {=str}, {} frames", text, frame_count);

        for frame in 0..frame_count {
            let cells = scroll_frame(text, frame);
            for _ in 0..self.scroll.frame_repeats {
                for (&token, position) in cells.iter().zip(0..CELL_COUNT_U8) {
                    self.show(token, position)?;
                }
            }
        }
        Ok(())
    }

    /// Turns every digit and segment off and pushes that to the hardware.
    ///
    /// # Errors
    ///
    /// Returns an error if a write or the flush fails.
    pub fn blank(&mut self) -> Result<()> {
        self.reset_digit(None)?;
        self.reset_segments()?;
        self.target.flush()
    }

    #[must_use]
    pub const fn polarity(&self) -> Polarity {
        self.polarity
    }

    #[must_use]
    pub const fn pins(&self) -> &PinMap {
        &self.pins
    }

    pub const fn target(&self) -> &T {
        &self.target
    }

    pub const fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Gives the target back.
    pub fn release(self) -> T {
        self.target
    }

    /// One multiplex step: render, push to the hardware, disable again.
    fn show(&mut self, token: Token, position: u8) -> Result<()> {
        self.render_char(token, position)?;
        self.target.flush()?;
        self.reset_digit(Some(position))
    }
}
