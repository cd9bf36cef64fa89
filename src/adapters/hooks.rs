//! Closure bus adapter
//!
//! Builds an [`AdcBus`] from three plain functions or closures, for boards
//! where the pins are reached through vendor calls rather than a HAL.

use core::convert::Infallible;

use crate::ports::bus::AdcBus;

/// Bus made of caller-supplied hooks
///
/// ```ignore
/// fn dout() -> bool { unsafe { GPIOA.idr.read() & (1 << 3) != 0 } }
/// fn sck(high: bool) { unsafe { GPIOA.bsrr.write(if high { 1 << 4 } else { 1 << 20 }) } }
/// fn delay(us: u16) { cortex_m::asm::delay(us as u32 * CYCLES_PER_US) }
///
/// let bus = HookBus::new(dout, sck, delay);
/// ```
pub struct HookBus<R, W, D> {
    read_data: R,
    write_clock: W,
    delay: D,
}

impl<R, W, D> HookBus<R, W, D>
where
    R: FnMut() -> bool,
    W: FnMut(bool),
    D: FnMut(u16),
{
    /// Wrap the data-pin read, clock-pin write and delay hooks
    pub fn new(read_data: R, write_clock: W, delay: D) -> Self {
        Self {
            read_data,
            write_clock,
            delay,
        }
    }

    /// Give the hooks back
    pub fn into_inner(self) -> (R, W, D) {
        (self.read_data, self.write_clock, self.delay)
    }
}

impl<R, W, D> AdcBus for HookBus<R, W, D>
where
    R: FnMut() -> bool,
    W: FnMut(bool),
    D: FnMut(u16),
{
    type Error = Infallible;

    #[inline]
    fn read_data_pin(&mut self) -> Result<bool, Self::Error> {
        Ok((self.read_data)())
    }

    #[inline]
    fn write_clock_pin(&mut self, high: bool) -> Result<(), Self::Error> {
        (self.write_clock)(high);
        Ok(())
    }

    #[inline]
    fn delay_us(&mut self, us: u16) {
        (self.delay)(us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn test_hooks_are_forwarded() {
        let level = Cell::new(true);
        let clock = Cell::new(false);
        let waited = Cell::new(0u32);

        let mut bus = HookBus::new(
            || level.get(),
            |high| clock.set(high),
            |us| waited.set(waited.get() + u32::from(us)),
        );

        assert_eq!(bus.read_data_pin(), Ok(true));
        level.set(false);
        assert_eq!(bus.read_data_pin(), Ok(false));
        bus.write_clock_pin(true).unwrap();
        assert!(clock.get());
        bus.delay_us(60);
        bus.delay_us(1);
        assert_eq!(waited.get(), 61);
    }

    #[test]
    fn test_plain_fn_pointers() {
        fn low() -> bool {
            false
        }
        fn ignore(_: bool) {}
        fn no_wait(_: u16) {}

        let mut bus = HookBus::new(low as fn() -> bool, ignore as fn(bool), no_wait as fn(u16));
        assert_eq!(bus.read_data_pin(), Ok(false));
    }

    #[test]
    fn test_into_inner_returns_hooks() {
        let mut reads = 0;
        let mut bus = HookBus::new(
            || {
                reads += 1;
                true
            },
            |_| {},
            |_| {},
        );
        bus.read_data_pin().unwrap();
        bus.read_data_pin().unwrap();

        let (mut read, _, _) = bus.into_inner();
        assert!(read());
        drop(read);
        assert_eq!(reads, 3);
    }
}
