//! embedded-hal bus adapter
//!
//! Implements [`AdcBus`] on top of embedded-hal 1.0 digital pins and a
//! [`DelayNs`] provider, so any HAL that implements those traits can drive
//! the HX711 directly.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::ports::bus::AdcBus;

/// Pin error from either line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError<DE, CE> {
    /// DOUT read failed
    Data(DE),
    /// PD_SCK write failed
    Clock(CE),
}

/// embedded-hal pins as an HX711 bus
pub struct EmbeddedHalBus<DOUT, SCK, D> {
    dout: DOUT,
    sck: SCK,
    delay: D,
}

impl<DOUT, SCK, D> EmbeddedHalBus<DOUT, SCK, D>
where
    DOUT: InputPin,
    SCK: OutputPin,
    D: DelayNs,
{
    /// Create a new bus
    ///
    /// `dout` should be a floating (or pulled-up) input; `sck` a push-pull
    /// output.
    pub fn new(dout: DOUT, sck: SCK, delay: D) -> Self {
        Self { dout, sck, delay }
    }

    /// Release the pins and the delay provider
    pub fn release(self) -> (DOUT, SCK, D) {
        (self.dout, self.sck, self.delay)
    }
}

impl<DOUT, SCK, D> AdcBus for EmbeddedHalBus<DOUT, SCK, D>
where
    DOUT: InputPin,
    SCK: OutputPin,
    D: DelayNs,
{
    type Error = PinError<DOUT::Error, SCK::Error>;

    fn read_data_pin(&mut self) -> Result<bool, Self::Error> {
        self.dout.is_high().map_err(PinError::Data)
    }

    fn write_clock_pin(&mut self, high: bool) -> Result<(), Self::Error> {
        self.sck
            .set_state(PinState::from(high))
            .map_err(PinError::Clock)
    }

    fn delay_us(&mut self, us: u16) {
        self.delay.delay_us(u32::from(us));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    struct FixedInput(bool);

    impl ErrorType for FixedInput {
        type Error = Infallible;
    }

    impl InputPin for FixedInput {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    #[derive(Debug, PartialEq)]
    struct Broken;

    impl Error for Broken {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    #[derive(Default)]
    struct TestOutput {
        high: bool,
        broken: bool,
    }

    impl ErrorType for TestOutput {
        type Error = Broken;
    }

    impl OutputPin for TestOutput {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(Broken);
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(Broken);
            }
            self.high = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    #[test]
    fn test_levels_and_delay() {
        let mut bus = EmbeddedHalBus::new(
            FixedInput(true),
            TestOutput::default(),
            CountingDelay::default(),
        );

        assert_eq!(bus.read_data_pin(), Ok(true));
        bus.write_clock_pin(true).unwrap();
        bus.delay_us(60);

        let (_, sck, delay) = bus.release();
        assert!(sck.high);
        assert!(delay.total_ns >= 60_000);
    }

    #[test]
    fn test_clock_error_is_tagged() {
        let sck = TestOutput {
            high: false,
            broken: true,
        };
        let mut bus = EmbeddedHalBus::new(FixedInput(false), sck, CountingDelay::default());

        assert!(matches!(
            bus.write_clock_pin(false),
            Err(PinError::Clock(Broken))
        ));
    }
}
