//! Sensor port - abstraction for reading conversion results
//!
//! This trait lets the application read HX711 chips (or anything else that
//! produces signed 24-bit samples) without knowing how the bits arrive.

use crate::domain::{AdcReading, SensorId};

/// Error type for sensor operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Chip did not pull the data line low within the poll bound
    InitTimeout,
    /// Argument outside its valid range (zero sample count, bad gain code)
    InvalidArgument,
    /// A pin hook reported an error
    PinFault,
}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorError::InitTimeout => f.write_str("HX711 did not become ready in time"),
            SensorError::InvalidArgument => f.write_str("invalid argument"),
            SensorError::PinFault => f.write_str("pin access failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SensorError {}

/// Port for reading sensor data
///
/// Reads are blocking: the HX711 is clocked by the caller and every call
/// runs its whole pulse sequence before returning.
pub trait SensorPort {
    /// Read a single (possibly averaged) value
    fn read(&mut self) -> Result<AdcReading, SensorError>;

    /// Get the sensor identifier
    fn sensor_id(&self) -> SensorId;

    /// Get the last raw accumulator value (for diagnostics)
    ///
    /// Returns `None` if the sensor doesn't expose raw values or has not
    /// been read yet.
    fn last_raw_value(&self) -> Option<u32> {
        None
    }
}
