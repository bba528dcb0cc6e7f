//! Host-side stand-ins for the board: a pin recorder, a simulated 74HC595 chain and a delay that
//! only keeps count.
#![allow(dead_code, reason = "Each test binary uses a different subset")]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use deadman_kit::embedded_hal::delay::DelayNs;
use deadman_kit::embedded_hal::digital::PinState;
use deadman_kit::{OutputPins, OutputTarget, Result, ShiftRegisterPins};

/// Every write, in order, shared between clones.
pub type Journal = Rc<RefCell<Vec<(u8, PinState)>>>;

/// Board pins that remember their modes, levels and every write.
#[derive(Clone, Default)]
pub struct RecordingPins {
    pub journal: Journal,
    pub outputs: Rc<RefCell<Vec<u8>>>,
    pub levels: Rc<RefCell<BTreeMap<u8, PinState>>>,
}

impl RecordingPins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, pin: u8) -> Option<PinState> {
        self.levels.borrow().get(&pin).copied()
    }

    pub fn writes(&self) -> Vec<(u8, PinState)> {
        self.journal.borrow().clone()
    }

    pub fn writes_to(&self, pin: u8) -> Vec<PinState> {
        self.journal
            .borrow()
            .iter()
            .filter(|(written, _)| *written == pin)
            .map(|(_, state)| *state)
            .collect()
    }

    pub fn clear(&self) {
        self.journal.borrow_mut().clear();
    }
}

impl OutputPins for RecordingPins {
    fn configure_output(&mut self, pin: u8) -> Result<()> {
        self.outputs.borrow_mut().push(pin);
        Ok(())
    }

    fn write(&mut self, pin: u8, state: PinState) -> Result<()> {
        self.journal.borrow_mut().push((pin, state));
        self.levels.borrow_mut().insert(pin, state);
        Ok(())
    }
}

/// `N` chained 74HC595s as seen from their three control lines.
///
/// A rising clock edge shifts the data line into output 0 of the first register; a rising
/// latch edge copies the shift stage to the outputs.
pub struct SimulatedChain<const N: usize> {
    lines: ShiftRegisterPins,
    levels: BTreeMap<u8, PinState>,
    stage: Vec<bool>,
    pub outputs: Vec<bool>,
    pub latch_count: usize,
}

impl<const N: usize> SimulatedChain<N> {
    pub fn new(lines: ShiftRegisterPins) -> Self {
        Self {
            lines,
            levels: BTreeMap::new(),
            stage: vec![false; N * 8],
            outputs: vec![false; N * 8],
            latch_count: 0,
        }
    }

    fn rising(&self, pin: u8, state: PinState) -> bool {
        state == PinState::High && self.levels.get(&pin).copied() != Some(PinState::High)
    }
}

impl<const N: usize> OutputPins for SimulatedChain<N> {
    fn configure_output(&mut self, _pin: u8) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, pin: u8, state: PinState) -> Result<()> {
        if pin == self.lines.clock && self.rising(pin, state) {
            let data = self.levels.get(&self.lines.data).copied() == Some(PinState::High);
            self.stage.pop();
            self.stage.insert(0, data);
        }
        if pin == self.lines.latch && self.rising(pin, state) {
            self.outputs.clone_from(&self.stage);
            self.latch_count += 1;
        }
        self.levels.insert(pin, state);
        Ok(())
    }
}

/// A delay that returns at once and adds up what it was asked to wait.
#[derive(Debug, Default)]
pub struct VirtualDelay {
    pub elapsed_ns: u64,
    pub calls: usize,
}

impl VirtualDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for VirtualDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
        self.calls += 1;
    }

    fn delay_us(&mut self, us: u32) {
        self.elapsed_ns += u64::from(us) * 1_000;
        self.calls += 1;
    }
}

/// An output target that only counts flushes and keeps the latest levels.
#[derive(Debug, Default)]
pub struct CountingTarget {
    pub levels: BTreeMap<u8, PinState>,
    pub writes: usize,
    pub flushes: usize,
}

impl OutputTarget for CountingTarget {
    fn try_configure_output(&mut self, _pin: u8) -> Result<bool> {
        Ok(false)
    }

    fn write(&mut self, pin: u8, state: PinState) -> Result<()> {
        self.levels.insert(pin, state);
        self.writes += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
