//! Simulated HX711
//!
//! A software model of the chip side of the two-wire protocol, usable as
//! an [`AdcBus`] on the host or on a board without a load cell attached.
//!
//! The model:
//! - reports busy for a configurable number of polls, then presents the
//!   next queued conversion by pulling DOUT low
//! - shifts the conversion out MSB first, one bit per rising SCK edge
//! - counts pulses past the 24th and latches the gain they select once
//!   the host polls DOUT again with SCK low
//! - powers down after SCK has been held high for 60 µs and wakes at gain
//!   128 on the next falling edge
//!
//! Like the real chip it needs a status poll between conversions.

use core::convert::Infallible;

use heapless::Deque;

use crate::domain::decode::DATA_MASK;
use crate::domain::{Gain, DATA_BITS, POWER_DOWN_HOLD_US};
use crate::ports::bus::AdcBus;

/// Conversions that can be queued ahead
pub const SIM_QUEUE_DEPTH: usize = 16;

/// Software HX711
pub struct SimulatedHx711 {
    samples: Deque<u32, SIM_QUEUE_DEPTH>,
    /// Conversion presented on DOUT (ready or being shifted out)
    current: Option<u32>,
    busy_polls: u32,
    clock_high: bool,
    /// Rising edges since `current` was presented
    pulses: u8,
    latched_gain: Gain,
    converting_gain: Gain,
    high_hold_us: u32,
    powered_down: bool,
    rising_edges: u32,
    elapsed_us: u64,
}

impl Default for SimulatedHx711 {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedHx711 {
    /// Powered-up chip at gain 128 with nothing queued
    pub const fn new() -> Self {
        Self {
            samples: Deque::new(),
            current: None,
            busy_polls: 0,
            clock_high: false,
            pulses: 0,
            latched_gain: Gain::Gain128,
            converting_gain: Gain::Gain128,
            high_hold_us: 0,
            powered_down: false,
            rising_edges: 0,
            elapsed_us: 0,
        }
    }

    /// Queue a conversion result (low 24 bits are shifted out)
    ///
    /// Gives the sample back if the queue is full.
    pub fn push_sample(&mut self, raw: u32) -> Result<(), u32> {
        self.samples.push_back(raw & DATA_MASK)
    }

    /// Report busy for the next `polls` status reads before presenting a
    /// queued conversion
    pub fn set_busy_polls(&mut self, polls: u32) {
        self.busy_polls = polls;
    }

    /// Queued conversions not yet presented
    pub fn pending(&self) -> usize {
        self.samples.len()
    }

    /// Gain selected by the last complete set of gain pulses
    pub fn latched_gain(&self) -> Gain {
        self.latched_gain
    }

    /// Gain the presented conversion was taken with
    pub fn converting_gain(&self) -> Gain {
        self.converting_gain
    }

    /// Whether SCK has been held high long enough to power down
    pub fn is_powered_down(&self) -> bool {
        self.powered_down
    }

    /// Total rising SCK edges seen
    pub fn rising_edges(&self) -> u32 {
        self.rising_edges
    }

    /// Total time spent in `delay_us`
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    fn in_data_phase(&self) -> bool {
        (1..=DATA_BITS).contains(&self.pulses)
    }

    fn data_bit(&self) -> bool {
        match self.current {
            Some(sample) if self.in_data_phase() => {
                (sample >> (DATA_BITS - self.pulses)) & 1 == 1
            }
            // DOUT returns high after the 24th bit (or with nothing to send)
            _ => true,
        }
    }

    fn finish_transfer(&mut self) {
        if let Some(gain) = Gain::from_code(self.pulses - DATA_BITS) {
            self.latched_gain = gain;
        }
        self.current = None;
        self.pulses = 0;
    }

    fn power_down(&mut self) {
        self.powered_down = true;
        self.current = None;
        self.pulses = 0;
    }

    fn wake(&mut self) {
        self.powered_down = false;
        self.latched_gain = Gain::Gain128;
        self.high_hold_us = 0;
    }
}

impl AdcBus for SimulatedHx711 {
    type Error = Infallible;

    fn read_data_pin(&mut self) -> Result<bool, Self::Error> {
        if self.powered_down {
            return Ok(true);
        }
        if self.clock_high || self.in_data_phase() {
            return Ok(self.data_bit());
        }

        if self.pulses > DATA_BITS {
            self.finish_transfer();
        }
        if self.current.is_some() {
            return Ok(false);
        }
        if self.busy_polls > 0 {
            self.busy_polls -= 1;
            return Ok(true);
        }

        match self.samples.pop_front() {
            Some(sample) => {
                self.current = Some(sample);
                self.converting_gain = self.latched_gain;
                Ok(false)
            }
            None => Ok(true),
        }
    }

    fn write_clock_pin(&mut self, high: bool) -> Result<(), Self::Error> {
        if high && !self.clock_high {
            self.rising_edges += 1;
            self.high_hold_us = 0;
            if !self.powered_down {
                self.pulses = self.pulses.saturating_add(1);
            }
        } else if !high && self.powered_down {
            self.wake();
        }

        self.clock_high = high;
        Ok(())
    }

    fn delay_us(&mut self, us: u16) {
        self.elapsed_us += u64::from(us);

        if self.clock_high && !self.powered_down {
            self.high_hold_us += u32::from(us);
            if self.high_hold_us >= u32::from(POWER_DOWN_HOLD_US) {
                self.power_down();
            }
        }
    }
}
