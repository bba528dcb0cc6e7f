//! Segment bit patterns and the wiring polarity they are driven with.

use embedded_hal::digital::PinState;

use crate::Result;
use crate::error::Error::UnknownCharacter;

// ============================================================================
// LED Constants
// ============================================================================

/// Constants for 7-segment LED displays.
///
/// A pattern has one bit per segment line, bit 0 for segment a up to bit 7 for the decimal point,
/// set where the segment is lit.
pub struct Leds;

impl Leds {
    /// Segment A of the 7-segment display.
    pub const SEG_A: u8 = 0b_0000_0001;
    /// Segment B of the 7-segment display.
    pub const SEG_B: u8 = 0b_0000_0010;
    /// Segment C of the 7-segment display.
    pub const SEG_C: u8 = 0b_0000_0100;
    /// Segment D of the 7-segment display.
    pub const SEG_D: u8 = 0b_0000_1000;
    /// Segment E of the 7-segment display.
    pub const SEG_E: u8 = 0b_0001_0000;
    /// Segment F of the 7-segment display.
    pub const SEG_F: u8 = 0b_0010_0000;
    /// Segment G of the 7-segment display.
    pub const SEG_G: u8 = 0b_0100_0000;
    /// Decimal point of the 7-segment display.
    pub const DECIMAL: u8 = 0b_1000_0000;

    /// Representation of a blank space on a 7-segment display.
    pub const SPACE: u8 = 0b_0000_0000;

    /// Patterns for digits 0-9.
    pub const DIGITS: [u8; 10] = [
        0b_0011_1111, // Digit 0
        0b_0000_0110, // Digit 1
        0b_0101_1011, // Digit 2
        0b_0100_1111, // Digit 3
        0b_0110_0110, // Digit 4
        0b_0110_1101, // Digit 5
        0b_0111_1101, // Digit 6
        0b_0000_0111, // Digit 7
        0b_0111_1111, // Digit 8
        0b_0110_1111, // Digit 9
    ];

    /// Patterns for letters a-z. Several letters can only be approximated on seven segments.
    pub const LETTERS: [u8; 26] = [
        0b_0111_0111, // a
        0b_0111_1100, // b
        0b_0011_1001, // c
        0b_0101_1110, // d
        0b_0111_1001, // e
        0b_0111_0001, // f
        0b_0011_1101, // g
        0b_0111_0110, // h
        0b_0011_0000, // i
        0b_0001_1110, // j
        0b_0111_0000, // k
        0b_0011_1000, // l
        0b_0010_0011, // m
        0b_0101_0100, // n
        0b_0101_1100, // o
        0b_0111_0011, // p
        0b_0110_0111, // q
        0b_0101_0000, // r
        0b_0110_1101, // s
        0b_0111_1000, // t
        0b_0001_1100, // u
        0b_0011_1110, // v
        0b_0111_1110, // w
        0b_0111_0110, // x
        0b_0110_1110, // y
        0b_0101_0010, // z
    ];

    /// The lit segments for `ch`, without the decimal point. Uppercase ASCII folds to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCharacter`] for anything but a space, `0-9` and `a-z`.
    pub fn glyph(ch: char) -> Result<u8> {
        let folded = ch.to_ascii_lowercase();
        let pattern = match folded {
            ' ' => Some(Self::SPACE),
            '0'..='9' => Self::DIGITS.get(usize::from(folded as u8 - b'0')).copied(),
            'a'..='z' => Self::LETTERS.get(usize::from(folded as u8 - b'a')).copied(),
            _ => None,
        };
        pattern.ok_or(UnknownCharacter { ch })
    }
}

// ============================================================================
// Polarity
// ============================================================================

/// Which logic level lights a segment.
///
/// The two wirings invert every level relative to each other, including what "digit off" means,
/// so the display carries one of these instead of a second lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Common-cathode module: segment lines source current (high = lit) and a digit is selected
    /// by pulling its common line low.
    #[default]
    ActiveHigh,
    /// Common-anode module: segment lines sink current (low = lit) and a digit is selected by
    /// driving its common line high.
    ActiveLow,
}

impl Polarity {
    /// Level that lights (`true`) or darkens a segment.
    #[must_use]
    pub const fn segment_level(self, lit: bool) -> PinState {
        match self {
            Self::ActiveHigh => level(lit),
            Self::ActiveLow => level(!lit),
        }
    }

    /// Level that selects (`true`) or deselects a digit.
    #[must_use]
    pub const fn digit_level(self, enabled: bool) -> PinState {
        match self {
            Self::ActiveHigh => level(!enabled),
            Self::ActiveLow => level(enabled),
        }
    }

    /// `pattern` as the raw bits written to the segment lines, bit 0 on segment a.
    #[must_use]
    pub const fn encode(self, pattern: u8) -> u8 {
        match self {
            Self::ActiveHigh => pattern,
            Self::ActiveLow => !pattern,
        }
    }
}

const fn level(high: bool) -> PinState {
    if high { PinState::High } else { PinState::Low }
}
