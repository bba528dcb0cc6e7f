use crate::Result;
use crate::constants::{CELL_COUNT, DIGIT_PINS, SEGMENT_COUNT, SEGMENT_PINS};
use crate::error::Error::{DigitCount, DigitOutOfRange, SegmentCount};

/// Which pin (or shift register output) each display line is on.
///
/// Digit pins are given most significant first, the order they appear on the module, but are
/// addressed by position with 0 the rightmost digit. Segment pins run a, b, c, d, e, f, g, then
/// the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    digits: [u8; CELL_COUNT],
    segments: [u8; SEGMENT_COUNT],
}

impl PinMap {
    #[must_use]
    pub const fn new(digits: [u8; CELL_COUNT], segments: [u8; SEGMENT_COUNT]) -> Self {
        Self { digits, segments }
    }

    /// Builds a map from lists whose length is only known at run time.
    ///
    /// # Errors
    ///
    /// Returns [`DigitCount`] unless there are exactly 4 digit pins and [`SegmentCount`] unless
    /// there are exactly 8 segment pins.
    pub fn from_slices(digits: &[u8], segments: &[u8]) -> Result<Self> {
        let digits: [u8; CELL_COUNT] = digits
            .try_into()
            .map_err(|_| DigitCount { len: digits.len() })?;
        let segments: [u8; SEGMENT_COUNT] = segments
            .try_into()
            .map_err(|_| SegmentCount {
                len: segments.len(),
            })?;
        Ok(Self::new(digits, segments))
    }

    /// Pin of the digit at `position`, 0 being the rightmost.
    ///
    /// # Errors
    ///
    /// Returns [`DigitOutOfRange`] if `position` is not 0 through 3.
    pub fn digit(&self, position: u8) -> Result<u8> {
        CELL_COUNT
            .checked_sub(1)
            .and_then(|last| last.checked_sub(usize::from(position)))
            .and_then(|index| self.digits.get(index))
            .copied()
            .ok_or(DigitOutOfRange { index: position })
    }

    /// Digit pins, most significant first.
    #[must_use]
    pub const fn digits(&self) -> &[u8; CELL_COUNT] {
        &self.digits
    }

    /// Segment pins, a through g then the decimal point.
    #[must_use]
    pub const fn segments(&self) -> &[u8; SEGMENT_COUNT] {
        &self.segments
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self::new(DIGIT_PINS, SEGMENT_PINS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_digit_positions_count_from_the_right() {
        let map = PinMap::new([20, 21, 22, 23], SEGMENT_PINS);
        assert_eq!(map.digit(0), Ok(23));
        assert_eq!(map.digit(3), Ok(20));
        assert_eq!(map.digit(4), Err(Error::DigitOutOfRange { index: 4 }));
    }

    #[test]
    fn test_from_slices_checks_arity() {
        assert_eq!(
            PinMap::from_slices(&[2, 3, 4, 5], &SEGMENT_PINS),
            Ok(PinMap::default())
        );
        assert_eq!(
            PinMap::from_slices(&[2, 3, 4], &SEGMENT_PINS),
            Err(Error::DigitCount { len: 3 })
        );
        assert_eq!(
            PinMap::from_slices(&DIGIT_PINS, &[6, 7, 8, 9, 10, 11, 12, 13, 14]),
            Err(Error::SegmentCount { len: 9 })
        );
    }
}
