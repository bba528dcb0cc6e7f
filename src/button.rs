use embassy_time::{Duration, Instant};
use portable_atomic::{AtomicU64, Ordering};

use crate::Result;
use crate::constants::{BUTTON_DEBOUNCE_DELAY, RESET_COOLDOWN};
use crate::counter::Counter;
use crate::pins::{InputPins, PinEvent};

// `last_edge` before the first edge arrives.
const NO_EDGE: u64 = u64::MAX;

/// Timing for [`ResetButton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Edges closer than this to the previous edge are ignored.
    pub debounce: Duration,
    /// Presses closer than this to the last accepted reset are ignored.
    pub cooldown: Duration,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce: BUTTON_DEBOUNCE_DELAY,
            cooldown: RESET_COOLDOWN,
        }
    }
}

// Instead of answering "did it reset?" with a `bool`, say why not.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressOutcome {
    /// The counter was put back to its initial value.
    Reset,
    /// The line went low. Never resets.
    Released,
    /// Contact bounce: too soon after the previous edge.
    Bounce,
    /// Too soon after the last reset.
    CoolingDown,
    /// The event came from some other pin.
    OtherPin,
}

/// The dead-man's button: pressing it puts the countdown back to the start.
///
/// [`on_event`](Self::on_event) is the input-change handler and only needs `&self`, so it can be
/// called from an interrupt while the control loop keeps using the same [`Counter`].
pub struct ResetButton<'a> {
    counter: &'a Counter,
    pin: u8,
    config: ButtonConfig,
    last_edge: AtomicU64,
    last_reset: AtomicU64,
}

impl<'a> ResetButton<'a> {
    /// `now` counts as the last reset, so presses in the first `cooldown` are ignored.
    #[must_use]
    pub const fn new(counter: &'a Counter, pin: u8, config: ButtonConfig, now: Instant) -> Self {
        Self {
            counter,
            pin,
            config,
            last_edge: AtomicU64::new(NO_EDGE),
            last_reset: AtomicU64::new(now.as_ticks()),
        }
    }

    /// Makes the line an input with change notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the board rejects the line.
    pub fn configure(&self, inputs: &mut impl InputPins) -> Result<()> {
        inputs.configure_input(self.pin)
    }

    /// Handles one level change on the button line.
    pub fn on_event(&self, event: PinEvent) -> PressOutcome {
        let outcome = self.classify(event);
        #[cfg(feature = "defmt")]
        defmt::info!("button {}: {:?}", self.pin, outcome);
        if outcome == PressOutcome::Reset {
            self.counter.reset();
        }
        outcome
    }

    #[must_use]
    pub const fn pin(&self) -> u8 {
        self.pin
    }

    fn classify(&self, event: PinEvent) -> PressOutcome {
        if event.pin != self.pin {
            return PressOutcome::OtherPin;
        }
        let now = event.at.as_ticks();
        let previous_edge = self.last_edge.swap(now, Ordering::AcqRel);
        if !event.high {
            return PressOutcome::Released;
        }
        if previous_edge != NO_EDGE
            && now.saturating_sub(previous_edge) < self.config.debounce.as_ticks()
        {
            return PressOutcome::Bounce;
        }
        let last_reset = self.last_reset.load(Ordering::Acquire);
        if now.saturating_sub(last_reset) < self.config.cooldown.as_ticks() {
            return PressOutcome::CoolingDown;
        }
        self.last_reset.store(now, Ordering::Release);
        PressOutcome::Reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(ms: u64) -> PinEvent {
        PinEvent {
            pin: 14,
            high: true,
            at: Instant::from_millis(ms),
        }
    }

    fn release(ms: u64) -> PinEvent {
        PinEvent {
            high: false,
            ..press(ms)
        }
    }

    fn button(counter: &Counter) -> ResetButton<'_> {
        ResetButton::new(counter, 14, ButtonConfig::default(), Instant::from_millis(0))
    }

    #[test]
    fn test_press_after_cooldown_resets() {
        let counter = Counter::new(10);
        counter.decrement();
        let button = button(&counter);
        assert_eq!(button.on_event(press(6_000)), PressOutcome::Reset);
        assert_eq!(counter.count(), 10);
    }

    #[test]
    fn test_press_during_cooldown_is_ignored() {
        let counter = Counter::new(10);
        counter.decrement();
        let button = button(&counter);
        assert_eq!(button.on_event(press(1_000)), PressOutcome::CoolingDown);
        assert_eq!(counter.count(), 9);
    }

    #[test]
    fn test_bounce_and_release() {
        let counter = Counter::new(10);
        let button = button(&counter);
        assert_eq!(button.on_event(press(10_000)), PressOutcome::Reset);
        assert_eq!(button.on_event(release(10_500)), PressOutcome::Released);
        // Contact chatter right after the release
        assert_eq!(button.on_event(press(10_520)), PressOutcome::Bounce);
        assert_eq!(button.on_event(release(10_540)), PressOutcome::Released);
        // Second press inside the cooldown of the first
        assert_eq!(button.on_event(press(12_000)), PressOutcome::CoolingDown);
        assert_eq!(button.on_event(press(16_000)), PressOutcome::Reset);
    }

    #[test]
    fn test_first_edge_at_tick_zero_still_debounces() {
        let counter = Counter::new(10);
        let config = ButtonConfig {
            cooldown: Duration::from_ticks(0),
            ..ButtonConfig::default()
        };
        let button = ResetButton::new(&counter, 14, config, Instant::from_ticks(0));
        assert_eq!(button.on_event(press(0)), PressOutcome::Reset);
        assert_eq!(button.on_event(press(10)), PressOutcome::Bounce);
        assert_eq!(button.on_event(press(500)), PressOutcome::Reset);
    }

    #[test]
    fn test_other_pins_are_ignored() {
        let counter = Counter::new(10);
        let button = button(&counter);
        let event = PinEvent { pin: 3, ..press(9_000) };
        assert_eq!(button.on_event(event), PressOutcome::OtherPin);
    }
}
