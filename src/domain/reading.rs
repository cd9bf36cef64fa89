//! ADC reading domain entity
//!
//! A decoded conversion result, tagged with the chip it came from.

use super::config::Gain;

/// A single (possibly averaged) conversion result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcReading {
    /// Decoded signed value, zero point removed
    pub value: i32,
    /// Raw accumulator of the last sample, raw bias removed
    pub raw: u32,
    /// Gain the sample was converted with
    pub gain: Gain,
    /// Number of samples averaged into `value`
    pub samples: u8,
    /// Chip identifier
    pub sensor_id: SensorId,
}

impl AdcReading {
    pub const fn new(value: i32, raw: u32, gain: Gain, samples: u8, sensor_id: SensorId) -> Self {
        Self {
            value,
            raw,
            gain,
            samples,
            sensor_id,
        }
    }
}

/// Chip identifier
///
/// A single byte distinguishes HX711 instances sharing one firmware, e.g.
/// the four corners of a platform scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorId(pub u8);

impl SensorId {
    /// First (or only) chip
    pub const PRIMARY: SensorId = SensorId(0);

    /// Second chip
    pub const SECONDARY: SensorId = SensorId(1);

    /// Simulated chip
    pub const SIMULATED: SensorId = SensorId(254);

    /// Test/mock chip
    pub const TEST: SensorId = SensorId(255);

    /// Create a new sensor ID from a raw value
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the string representation of this sensor ID
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            0 => "primary",
            1 => "secondary",
            254 => "simulated",
            255 => "test",
            _ => "unknown",
        }
    }

    /// Get the raw ID value
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl Default for SensorId {
    fn default() -> Self {
        Self::PRIMARY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_id_names() {
        assert_eq!(SensorId::PRIMARY.as_str(), "primary");
        assert_eq!(SensorId::SECONDARY.as_str(), "secondary");
        assert_eq!(SensorId::SIMULATED.as_str(), "simulated");
        assert_eq!(SensorId::TEST.as_str(), "test");
        assert_eq!(SensorId::new(7).as_str(), "unknown");
        assert_eq!(SensorId::default().value(), 0);
    }
}
