//! Chip configuration domain types
//!
//! Gain, output rate and input channel selection for the HX711, plus the
//! per-handle driver configuration.

use super::calibration::Calibration;
use super::reading::SensorId;

/// Number of data bits shifted out per conversion
pub const DATA_BITS: u8 = 24;

/// Default bound on readiness polls (1 µs apart) before `init` gives up
pub const READY_TIMEOUT_POLLS: u32 = 10_000;

/// Clock high/low half period used for every pulse (µs)
pub const PULSE_HALF_PERIOD_US: u16 = 1;

/// Clock-high hold that powers the chip down (µs)
pub const POWER_DOWN_HOLD_US: u16 = 60;

/// Amplifier gain selection
///
/// The discriminant is the number of extra clock pulses that follow the
/// 24 data bits. The chip latches it for the *next* conversion.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// Channel A, gain 128 (25 pulses)
    #[default]
    Gain128 = 1,
    /// Channel B, gain 32 (26 pulses)
    Gain32 = 2,
    /// Channel A, gain 64 (27 pulses)
    Gain64 = 3,
}

impl Gain {
    /// Map a raw gain code (1, 2 or 3) to a gain
    ///
    /// Returns `None` for any other value.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Gain128),
            2 => Some(Self::Gain32),
            3 => Some(Self::Gain64),
            _ => None,
        }
    }

    /// Extra clock pulses after the data bits
    #[inline]
    pub const fn pulses(self) -> u8 {
        self as u8
    }

    /// Amplification factor
    pub const fn factor(self) -> u8 {
        match self {
            Self::Gain128 => 128,
            Self::Gain32 => 32,
            Self::Gain64 => 64,
        }
    }

    /// Input channel sampled at this gain
    pub const fn channel(self) -> Channel {
        match self {
            Self::Gain128 | Self::Gain64 => Channel::A,
            Self::Gain32 => Channel::B,
        }
    }
}

/// Output data rate
///
/// Set by the RATE pin on the board; the driver only records it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rate {
    /// 10 samples per second
    #[default]
    Hz10,
    /// 80 samples per second
    Hz80,
}

impl Rate {
    /// Conversions per second at this rate
    pub const fn samples_per_second(self) -> u8 {
        match self {
            Self::Hz10 => 10,
            Self::Hz80 => 80,
        }
    }
}

/// Differential input channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    A,
    B,
}

/// Chip readiness, as signalled on the data line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Data line low: a conversion result is available
    Ready,
    /// Data line high: conversion in progress (or powered down)
    Busy,
}

impl Status {
    /// Interpret a data-line level
    #[inline]
    pub const fn from_data_level(high: bool) -> Self {
        if high {
            Self::Busy
        } else {
            Self::Ready
        }
    }
}

/// Configuration for one HX711 handle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcConfig {
    /// Output data rate (informational)
    pub rate: Rate,
    /// Gain applied to the next conversion
    pub gain: Gain,
    /// Raw and zero-point offsets
    pub calibration: Calibration,
    /// Readiness polls before `init` reports a timeout
    pub ready_timeout_polls: u32,
    /// Reads averaged per `SensorPort::read`
    pub averaging_samples: u8,
    /// Identifies this chip among several
    pub sensor_id: SensorId,
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AdcConfig {
    /// Gain 128, 10 Hz, no offsets, default timeout, single-sample reads
    pub const fn new() -> Self {
        Self {
            rate: Rate::Hz10,
            gain: Gain::Gain128,
            calibration: Calibration::NONE,
            ready_timeout_polls: READY_TIMEOUT_POLLS,
            averaging_samples: 1,
            sensor_id: SensorId::PRIMARY,
        }
    }

    /// Use `gain` for conversions after `init`
    pub const fn with_gain(mut self, gain: Gain) -> Self {
        self.gain = gain;
        self
    }

    /// Record the board's RATE pin setting
    pub const fn with_rate(mut self, rate: Rate) -> Self {
        self.rate = rate;
        self
    }

    /// Set the raw-domain bias and the zero point
    pub const fn with_offsets(mut self, calibration_offset: u32, zeroing_offset: i32) -> Self {
        self.calibration = Calibration::new(calibration_offset, zeroing_offset);
        self
    }

    /// Override the readiness poll bound
    pub const fn with_ready_timeout(mut self, polls: u32) -> Self {
        self.ready_timeout_polls = polls;
        self
    }

    /// Samples averaged per port read (0 is rejected at read time)
    pub const fn with_averaging(mut self, samples: u8) -> Self {
        self.averaging_samples = samples;
        self
    }

    /// Tag readings from this handle
    pub const fn with_sensor_id(mut self, sensor_id: SensorId) -> Self {
        self.sensor_id = sensor_id;
        self
    }
}
