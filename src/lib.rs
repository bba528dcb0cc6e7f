//! Drivers for a dead-man's switch: a 4-digit, 7-segment display counting down, a buzzer, and a
//! reset button.
//!
//! The display can hang directly off board pins ([`DirectPins`]) or off a chain of 74HC595 shift
//! registers ([`ShiftRegister`]). Either way the board is reached only through the
//! [`OutputPins`] capability, so everything here also runs on the host against a recorder.
#![cfg_attr(not(test), no_std)]

mod button;
mod buzzer;
pub mod constants;
mod countdown;
mod counter;
mod error;
pub mod led4;
mod output_array;
mod output_target;
mod pins;
mod shift_register;

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

// Re-export commonly used items
pub use button::{ButtonConfig, PressOutcome, ResetButton};
pub use buzzer::{Buzzer, Pattern, Pulse};
pub use constants::*;
pub use countdown::{Countdown, CountdownConfig, CountdownState};
pub use counter::Counter;
pub use embedded_hal;
pub use error::{Error, Result};
pub use led4::{Leds, PinMap, Polarity, ScrollConfig, SegmentDisplay, Token, Tokens, scroll_frame};
pub use output_array::OutputArray;
pub use output_target::{DirectPins, OutputTarget};
pub use pins::{InputPins, OutputPins, PinEvent};
pub use shift_register::{ShiftRegister, ShiftRegisterPins};

/// Blocks on `delay` for `duration`, in `u32::MAX` microsecond steps when it is that long.
pub fn pause(delay: &mut impl DelayNs, duration: Duration) {
    let mut remaining = duration.as_micros();
    while remaining > 0 {
        let step = u32::try_from(remaining).unwrap_or(u32::MAX);
        delay.delay_us(step);
        remaining = remaining.saturating_sub(u64::from(step));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct StepDelay {
        steps: Vec<u32>,
    }

    impl DelayNs for StepDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.steps.push(ns / 1_000);
        }

        fn delay_us(&mut self, us: u32) {
            self.steps.push(us);
        }
    }

    #[test]
    fn test_pause_short() {
        let mut delay = StepDelay::default();
        pause(&mut delay, Duration::from_millis(10));
        pause(&mut delay, Duration::from_ticks(0));
        assert_eq!(delay.steps, vec![10_000]);
    }

    #[test]
    fn test_pause_longer_than_one_delay_call() {
        let mut delay = StepDelay::default();
        // Two hours is past what one `delay_us` can express
        pause(&mut delay, Duration::from_secs(7_200));
        let total: u64 = delay.steps.iter().copied().map(u64::from).sum();
        assert_eq!(total, 7_200_000_000);
        assert_eq!(delay.steps, vec![u32::MAX, 2_905_032_705]);
    }
}
