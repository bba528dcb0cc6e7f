use portable_atomic::{AtomicU16, Ordering};

/// Seconds left on the dead-man's switch.
///
/// The control loop decrements it while the reset button's handler may put it back to the initial
/// value from an interrupt, so every operation takes `&self`.
#[derive(Debug)]
pub struct Counter {
    initial: u16,
    count: AtomicU16,
}

impl Counter {
    #[must_use]
    pub const fn new(initial: u16) -> Self {
        Self {
            initial,
            count: AtomicU16::new(initial),
        }
    }

    #[must_use]
    pub fn count(&self) -> u16 {
        self.count.load(Ordering::Acquire)
    }

    #[must_use]
    pub const fn initial(&self) -> u16 {
        self.initial
    }

    /// Takes one off, stopping at zero. Returns the new count.
    pub fn decrement(&self) -> u16 {
        let previous = self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                Some(count.saturating_sub(1))
            })
            .unwrap_or_else(|count| count);
        previous.saturating_sub(1)
    }

    /// Back to the initial value.
    pub fn reset(&self) {
        self.count.store(self.initial, Ordering::Release);
    }
}
