//! Bus port - pin and timing capability for one chip
//!
//! The driver never touches hardware directly. Every clock edge, data
//! sample and busy-wait goes through this trait, so one driver serves any
//! number of chips and any HAL (or a simulation).

/// Port for the two-wire bit-banged interface
///
/// # Example Implementation
///
/// ```ignore
/// struct RpBus<'d> {
///     dout: Input<'d>,
///     sck: Output<'d>,
/// }
///
/// impl AdcBus for RpBus<'_> {
///     type Error = core::convert::Infallible;
///
///     fn read_data_pin(&mut self) -> Result<bool, Self::Error> {
///         Ok(self.dout.is_high())
///     }
///
///     fn write_clock_pin(&mut self, high: bool) -> Result<(), Self::Error> {
///         self.sck.set_level(high.into());
///         Ok(())
///     }
///
///     fn delay_us(&mut self, us: u16) {
///         embassy_time::block_for(Duration::from_micros(us as u64));
///     }
/// }
/// ```
pub trait AdcBus {
    /// Error reported by the pin hooks
    type Error: core::fmt::Debug;

    /// Current level of the data (DOUT) line
    ///
    /// `true` = high = busy, `false` = low = ready.
    fn read_data_pin(&mut self) -> Result<bool, Self::Error>;

    /// Drive the clock (PD_SCK) line
    ///
    /// Must take effect before the next delay elapses.
    fn write_clock_pin(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u16);
}

impl<T: AdcBus + ?Sized> AdcBus for &mut T {
    type Error = T::Error;

    #[inline]
    fn read_data_pin(&mut self) -> Result<bool, Self::Error> {
        T::read_data_pin(self)
    }

    #[inline]
    fn write_clock_pin(&mut self, high: bool) -> Result<(), Self::Error> {
        T::write_clock_pin(self, high)
    }

    #[inline]
    fn delay_us(&mut self, us: u16) {
        T::delay_us(self, us)
    }
}
