//! An active buzzer on one output line, played with fixed on/off patterns.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::Result;
use crate::pause;
use crate::pins::OutputPins;

/// One step of a pattern: drive the line, then hold for a while.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulse {
    pub level: PinState,
    pub hold: Duration,
}

impl Pulse {
    #[must_use]
    pub const fn on(hold_ms: u64) -> Self {
        Self {
            level: PinState::High,
            hold: Duration::from_millis(hold_ms),
        }
    }

    #[must_use]
    pub const fn off(hold_ms: u64) -> Self {
        Self {
            level: PinState::Low,
            hold: Duration::from_millis(hold_ms),
        }
    }
}

/// A named sequence of pulses. The buzzer is always left off afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern {
    pub name: &'static str,
    pub pulses: &'static [Pulse],
}

impl Pattern {
    /// Two slow beeps. Played just before the controller resets itself.
    pub const LONG_PULSE_ALERT: Self = Self {
        name: "long-pulse alert",
        pulses: &[Pulse::on(500), Pulse::off(500), Pulse::on(500)],
    };

    /// Two quick chirps. Played at start-up and as the alarm.
    pub const RAMP_UP: Self = Self {
        name: "ramp-up",
        pulses: &[Pulse::on(50), Pulse::off(50), Pulse::on(50)],
    };

    /// Three chirps, slightly faster than [`RAMP_UP`](Self::RAMP_UP).
    pub const RAMP_DOWN: Self = Self {
        name: "ramp-down",
        pulses: &[
            Pulse::on(40),
            Pulse::off(40),
            Pulse::on(40),
            Pulse::off(40),
            Pulse::on(40),
        ],
    };

    /// Time the pattern takes to play.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.pulses
            .iter()
            .fold(Duration::from_ticks(0), |total, pulse| total + pulse.hold)
    }
}

/// An active buzzer: high is sound, low is silence.
pub struct Buzzer<P> {
    pins: P,
    pin: u8,
}

impl<P: OutputPins> Buzzer<P> {
    pub const fn new(pins: P, pin: u8) -> Self {
        Self { pins, pin }
    }

    /// Makes the line an output and silences it.
    ///
    /// # Errors
    ///
    /// Returns an error if the board rejects the line.
    pub fn configure(&mut self) -> Result<()> {
        self.pins.configure_output(self.pin)?;
        self.pins.write(self.pin, PinState::Low)
    }

    /// Plays `pattern`, blocking on `delay` for each pulse, and ends silent.
    ///
    /// # Errors
    ///
    /// Returns an error if the line cannot be driven.
    pub fn play(&mut self, pattern: &Pattern, delay: &mut impl DelayNs) -> Result<()> {
        #[cfg(feature = "defmt")]
        defmt::debug!("buzzer: {=str}", pattern.name);
        for pulse in pattern.pulses {
            self.pins.write(self.pin, pulse.level)?;
            pause(delay, pulse.hold);
        }
        self.pins.write(self.pin, PinState::Low)
    }

    #[must_use]
    pub const fn pin(&self) -> u8 {
        self.pin
    }

    pub fn release(self) -> P {
        self.pins
    }
}
