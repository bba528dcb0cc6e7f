//! The dead-man's switch itself: count down once a second on the display, sound the alarm at zero.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

use crate::Result;
use crate::buzzer::{Buzzer, Pattern};
use crate::constants::{ALARM_GAP, ALARM_REPEATS, ALARM_TEXT, MULTIPLEX_SLEEP, ONE_SECOND};
use crate::counter::Counter;
use crate::led4::SegmentDisplay;
use crate::output_target::OutputTarget;
use crate::pause;
use crate::pins::OutputPins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownState {
    /// Seconds left, never zero.
    Running(u16),
    /// The count is at zero but the alarm has not been raised yet.
    Expired,
    /// The count reached zero and the alarm has been raised. Terminal.
    Alarm,
}

/// Pacing and alarm behavior for [`Countdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownConfig {
    /// Time between decrements.
    pub tick: Duration,
    /// How long the count stays lit in one refresh cycle.
    pub refresh_on: Duration,
    /// How long the display stays dark in one refresh cycle.
    pub refresh_off: Duration,
    /// Scrolled once the count reaches zero.
    pub alarm_text: &'static str,
    pub alarm_pattern: Pattern,
    pub alarm_repeats: u16,
    /// Silence between two alarm patterns.
    pub alarm_gap: Duration,
    /// Played once by [`Countdown::configure`].
    pub startup_pattern: Option<Pattern>,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick: ONE_SECOND,
            refresh_on: MULTIPLEX_SLEEP,
            refresh_off: MULTIPLEX_SLEEP,
            alarm_text: ALARM_TEXT,
            alarm_pattern: Pattern::RAMP_UP,
            alarm_repeats: ALARM_REPEATS,
            alarm_gap: ALARM_GAP,
            startup_pattern: Some(Pattern::RAMP_UP),
        }
    }
}

impl CountdownConfig {
    /// Refresh cycles that fit in one tick, at least one.
    #[must_use]
    pub fn refresh_cycles(&self) -> u64 {
        let cycle = (self.refresh_on + self.refresh_off).as_ticks();
        self.tick
            .as_ticks()
            .checked_div(cycle)
            .unwrap_or(1)
            .max(1)
    }
}

/// Owns the display, the buzzer and the pacing. The [`Counter`] is borrowed so a
/// [`ResetButton`](crate::ResetButton) can share it.
///
/// ```text
/// Running(n) --tick--> Running(n - 1) --tick--> ... --tick--> Alarm
///      ^                     |                                 ^
///      +------ button -------+                                 |
/// Expired (started at 0) ----------------tick------------------+
/// ```
pub struct Countdown<'a, T, P, D> {
    display: SegmentDisplay<T>,
    buzzer: Buzzer<P>,
    counter: &'a Counter,
    delay: D,
    config: CountdownConfig,
    state: CountdownState,
}

impl<'a, T, P, D> Countdown<'a, T, P, D>
where
    T: OutputTarget,
    P: OutputPins,
    D: DelayNs,
{
    pub fn new(
        display: SegmentDisplay<T>,
        buzzer: Buzzer<P>,
        counter: &'a Counter,
        delay: D,
        config: CountdownConfig,
    ) -> Self {
        Self {
            display,
            buzzer,
            counter,
            delay,
            config,
            state: Self::state_for(counter.count()),
        }
    }

    /// Configures the display and buzzer, then plays the startup pattern if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if either device rejects its lines.
    pub fn configure(&mut self) -> Result<()> {
        self.display.configure()?;
        self.buzzer.configure()?;
        if let Some(pattern) = self.config.startup_pattern {
            self.buzzer.play(&pattern, &mut self.delay)?;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("countdown: starting from {}", self.counter.count());
        Ok(())
    }

    /// Shows the current count for one tick, then takes one off.
    ///
    /// Reaching zero raises the alarm before returning [`CountdownState::Alarm`]. A count that is
    /// already zero raises it at once without showing anything. Ticking in `Alarm` does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the display or the buzzer cannot be driven.
    pub fn tick(&mut self) -> Result<CountdownState> {
        if self.state == CountdownState::Alarm {
            return Ok(CountdownState::Alarm);
        }

        // A reset may have restored the count since the last tick.
        let count = self.counter.count();
        if count == 0 {
            self.raise_alarm()?;
            self.state = CountdownState::Alarm;
            return Ok(self.state);
        }

        for _ in 0..self.config.refresh_cycles() {
            self.display.render_number(count)?;
            pause(&mut self.delay, self.config.refresh_on);
            self.display.reset_digit(None)?;
            self.display.target_mut().flush()?;
            pause(&mut self.delay, self.config.refresh_off);
        }

        let remaining = self.counter.decrement();
        #[cfg(feature = "defmt")]
        defmt::debug!("countdown: {} -> {}", count, remaining);
        self.state = if remaining == 0 {
            self.raise_alarm()?;
            CountdownState::Alarm
        } else {
            CountdownState::Running(remaining)
        };
        Ok(self.state)
    }

    /// Ticks until the alarm has gone off.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`tick`](Self::tick).
    pub fn run(&mut self) -> Result<()> {
        while self.tick()? != CountdownState::Alarm {}
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> CountdownState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &CountdownConfig {
        &self.config
    }

    pub const fn display_mut(&mut self) -> &mut SegmentDisplay<T> {
        &mut self.display
    }

    pub const fn delay(&self) -> &D {
        &self.delay
    }

    /// Gives the display, the buzzer and the delay back.
    pub fn release(self) -> (SegmentDisplay<T>, Buzzer<P>, D) {
        (self.display, self.buzzer, self.delay)
    }

    fn raise_alarm(&mut self) -> Result<()> {
        #[cfg(feature = "defmt")]
        defmt::warn!("countdown expired: {=str}", self.config.alarm_text);
        self.display.scroll_sentence(self.config.alarm_text)?;
        self.display.blank()?;
        for repeat in 0..self.config.alarm_repeats {
            if repeat > 0 {
                pause(&mut self.delay, self.config.alarm_gap);
            }
            self.buzzer.play(&self.config.alarm_pattern, &mut self.delay)?;
        }
        Ok(())
    }

    const fn state_for(count: u16) -> CountdownState {
        if count == 0 {
            CountdownState::Expired
        } else {
            CountdownState::Running(count)
        }
    }
}
