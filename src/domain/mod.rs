//! Domain layer - pure protocol logic independent of hardware
//!
//! This module contains the configuration types, the offset calibration
//! and the sample decoding rules of the HX711. Nothing here touches a pin.

pub mod calibration;
pub mod config;
pub mod decode;
pub mod reading;

pub use calibration::Calibration;
pub use config::{
    AdcConfig, Channel, Gain, Rate, Status, DATA_BITS, POWER_DOWN_HOLD_US, PULSE_HALF_PERIOD_US,
    READY_TIMEOUT_POLLS,
};
pub use reading::{AdcReading, SensorId};
