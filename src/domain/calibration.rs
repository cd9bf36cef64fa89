//! Offset calibration
//!
//! The HX711 needs two corrections: a bias removed in the raw (unsigned,
//! pre-decode) domain and a zero point removed from the signed result.

/// Offset pair applied to every conversion
///
/// `calibration_offset` is subtracted from the raw accumulator with
/// wrapping arithmetic before decoding; `zeroing_offset` is subtracted
/// from the decoded signed value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Raw-domain bias (wraps on underflow)
    pub calibration_offset: u32,
    /// Zero point of the decoded value
    pub zeroing_offset: i32,
}

impl Calibration {
    /// No correction
    pub const NONE: Self = Self {
        calibration_offset: 0,
        zeroing_offset: 0,
    };

    /// Create a calibration with custom offsets
    pub const fn new(calibration_offset: u32, zeroing_offset: i32) -> Self {
        Self {
            calibration_offset,
            zeroing_offset,
        }
    }

    /// Remove the raw-domain bias from a shifted accumulator
    #[inline]
    pub const fn apply_raw(&self, accumulator: u32) -> u32 {
        accumulator.wrapping_sub(self.calibration_offset)
    }

    /// Remove the zero point from a decoded value
    #[inline]
    pub const fn apply_zero(&self, value: i32) -> i32 {
        value.wrapping_sub(self.zeroing_offset)
    }

    /// Same raw bias, new zero point
    pub const fn with_zeroing_offset(self, zeroing_offset: i32) -> Self {
        Self {
            calibration_offset: self.calibration_offset,
            zeroing_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_offset_wraps() {
        let cal = Calibration::new(5, 0);
        assert_eq!(cal.apply_raw(3), u32::MAX - 1);
        assert_eq!(cal.apply_raw(10), 5);
    }

    #[test]
    fn test_zero_offset_signed() {
        let cal = Calibration::new(0, -100);
        assert_eq!(cal.apply_zero(50), 150);
        assert_eq!(Calibration::NONE.apply_zero(i32::MIN), i32::MIN);
    }

    #[test]
    fn test_with_zeroing_offset_keeps_raw_bias() {
        let cal = Calibration::new(0x40, 7).with_zeroing_offset(-3);
        assert_eq!(cal, Calibration::new(0x40, -3));
        assert_eq!(cal.apply_raw(0x50), 0x10);
        assert_eq!(cal.apply_zero(0), 3);
    }
}
