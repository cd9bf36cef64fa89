//! Recording bus for driver tests
//!
//! Logs every clock edge, data sample and delay the driver issues. Data
//! reads taken with the clock low are status polls; reads taken with the
//! clock high consume scripted data bits.

use std::collections::VecDeque;
use std::vec::Vec;

use crate::ports::bus::AdcBus;

/// One bus interaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusEvent {
    Clock(bool),
    Read(bool),
    Delay(u16),
}

/// Error returned once the configured fault point is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

#[derive(Debug, Default)]
pub struct RecordingBus {
    events: Vec<BusEvent>,
    clock_high: bool,
    /// DOUT level while the clock is low, once busy polls are used up
    idle_level: bool,
    busy_polls: usize,
    bits: VecDeque<bool>,
    /// Pin operations allowed before every pin access fails
    fail_after: Option<usize>,
    pin_ops: usize,
}

impl RecordingBus {
    /// DOUT idles at `level`; data bits (if read) also return `level`
    pub fn idle(level: bool) -> Self {
        Self {
            idle_level: level,
            ..Self::default()
        }
    }

    /// Ready chip that shifts out the low 24 bits of `word` (MSB first)
    pub fn with_bits(word: u32, idle_level: bool) -> Self {
        let mut bus = Self::idle(idle_level);
        bus.push_word(word);
        bus
    }

    /// Ready chip that shifts out each word in turn
    pub fn with_words(words: &[u32]) -> Self {
        let mut bus = Self::idle(false);
        for &word in words {
            bus.push_word(word);
        }
        bus
    }

    /// Report busy for the first `polls` status reads
    pub fn with_busy_polls(mut self, polls: usize) -> Self {
        self.busy_polls = polls;
        self
    }

    /// Fail every pin access after `ops` successful ones
    pub fn failing_after(mut self, ops: usize) -> Self {
        self.fail_after = Some(ops);
        self
    }

    pub fn push_word(&mut self, word: u32) {
        for i in (0..24).rev() {
            self.bits.push_back((word >> i) & 1 == 1);
        }
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.events.clone()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn clock_edges(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Clock(level) => Some(*level),
                _ => None,
            })
            .collect()
    }

    pub fn rising_edges(&self) -> usize {
        count_rising(&self.events)
    }

    pub fn rising_edges_after_last_read(&self) -> usize {
        let start = self
            .events
            .iter()
            .rposition(|e| matches!(e, BusEvent::Read(_)))
            .map_or(0, |i| i + 1);
        count_rising(&self.events[start..])
    }

    pub fn reads(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BusEvent::Read(_)))
            .count()
    }

    pub fn delays_of(&self, us: u16) -> usize {
        self.events
            .iter()
            .filter(|e| **e == BusEvent::Delay(us))
            .count()
    }

    fn pin_op(&mut self) -> Result<(), MockPinError> {
        if let Some(limit) = self.fail_after {
            if self.pin_ops >= limit {
                return Err(MockPinError);
            }
        }
        self.pin_ops += 1;
        Ok(())
    }
}

// Every high write in the driver follows a low one, so highs are rising edges
fn count_rising(events: &[BusEvent]) -> usize {
    events
        .iter()
        .filter(|e| **e == BusEvent::Clock(true))
        .count()
}

impl AdcBus for RecordingBus {
    type Error = MockPinError;

    fn read_data_pin(&mut self) -> Result<bool, Self::Error> {
        self.pin_op()?;

        let level = if self.clock_high {
            self.bits.pop_front().unwrap_or(self.idle_level)
        } else if self.busy_polls > 0 {
            self.busy_polls -= 1;
            true
        } else {
            self.idle_level
        };

        self.events.push(BusEvent::Read(level));
        Ok(level)
    }

    fn write_clock_pin(&mut self, high: bool) -> Result<(), Self::Error> {
        self.pin_op()?;
        self.clock_high = high;
        self.events.push(BusEvent::Clock(high));
        Ok(())
    }

    fn delay_us(&mut self, us: u16) {
        self.events.push(BusEvent::Delay(us));
    }
}
