//! HX711 driver
//!
//! Bit-bangs the HX711 two-wire protocol over any [`AdcBus`] and implements
//! the [`SensorPort`] trait on top of it.
//!
//! # Protocol
//!
//! ```text
//!  DOUT ‾‾‾‾\___/ b23 \/ b22 \ ... / b0 \/‾‾‾‾‾‾‾‾‾‾‾‾‾‾
//!  SCK  _____/‾\_/‾\_ ... _/‾\_/‾\_/‾\_ (1-3 gain pulses)
//!            1   2          24  25  26  27
//! ```
//!
//! The chip pulls DOUT low when a conversion is ready. Each rising SCK edge
//! shifts out one bit, MSB first. One to three extra pulses after the 24th
//! select channel and gain for the *next* conversion. Holding SCK high for
//! 60 µs powers the chip down; pulling it low again wakes it at gain 128.

use core::num::NonZeroU8;

use crate::domain::decode::{accumulate_bit, decode, truncating_mean};
use crate::domain::{
    AdcConfig, AdcReading, Calibration, Gain, Rate, SensorId, Status, DATA_BITS,
    POWER_DOWN_HOLD_US, PULSE_HALF_PERIOD_US,
};
use crate::ports::bus::AdcBus;
use crate::ports::sensor::{SensorError, SensorPort};

/// HX711 driver handle
///
/// One handle per physical chip. The handle owns its bus, so two protocol
/// sequences can never interleave on the same chip.
pub struct Hx711Adc<B: AdcBus> {
    bus: B,
    config: AdcConfig,
    /// Gain the chip will use for the conversion currently in progress
    active_gain: Gain,
    /// Last raw accumulator (for diagnostics)
    last_raw: Option<u32>,
}

impl<B: AdcBus> Hx711Adc<B> {
    /// Create a new driver handle
    ///
    /// Nothing is sent to the chip until [`init`](Self::init) is called.
    pub fn new(bus: B, config: AdcConfig) -> Self {
        Self {
            bus,
            config,
            active_gain: Gain::Gain128,
            last_raw: None,
        }
    }

    /// Create a handle from raw field values
    ///
    /// Fails with [`SensorError::InvalidArgument`] unless `gain_code` is
    /// 1 (gain 128), 2 (gain 32) or 3 (gain 64).
    pub fn from_raw_parts(
        bus: B,
        rate: Rate,
        gain_code: u8,
        calibration_offset: u32,
        zeroing_offset: i32,
    ) -> Result<Self, SensorError> {
        let gain = Gain::from_code(gain_code).ok_or(SensorError::InvalidArgument)?;
        let config = AdcConfig::new()
            .with_rate(rate)
            .with_gain(gain)
            .with_offsets(calibration_offset, zeroing_offset);
        Ok(Self::new(bus, config))
    }

    /// Current configuration
    pub fn config(&self) -> &AdcConfig {
        &self.config
    }

    /// Gain that the next gain pulses will select
    pub fn gain(&self) -> Gain {
        self.config.gain
    }

    /// Gain the chip is converting with right now
    pub fn active_gain(&self) -> Gain {
        self.active_gain
    }

    /// Select the gain for the conversion after the next read
    pub fn set_gain(&mut self, gain: Gain) {
        debug!(
            "hx711[{}]: gain {} -> {}",
            self.config.sensor_id.value(),
            self.config.gain.factor(),
            gain.factor()
        );
        self.config.gain = gain;
    }

    /// Get current calibration
    pub fn calibration(&self) -> Calibration {
        self.config.calibration
    }

    /// Update calibration parameters
    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.config.calibration = calibration;
    }

    /// Replace the raw-domain bias, keeping the zero point
    pub fn set_calibration_offset(&mut self, calibration_offset: u32) {
        self.config.calibration.calibration_offset = calibration_offset;
    }

    /// Replace the zero point, keeping the raw-domain bias
    pub fn set_zeroing_offset(&mut self, zeroing_offset: i32) {
        self.config.calibration.zeroing_offset = zeroing_offset;
    }

    /// Get the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Get mutable access to the underlying bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Release the underlying bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Sample the data line once
    pub fn status(&mut self) -> Result<Status, SensorError> {
        let high = self
            .bus
            .read_data_pin()
            .map_err(|_| SensorError::PinFault)?;
        Ok(Status::from_data_level(high))
    }

    /// Wake the chip and prime its gain latch
    ///
    /// Drives SCK low, waits for DOUT to go low (see
    /// [`wait_ready`](Self::wait_ready)) and then clocks out one full
    /// conversion plus the gain pulses, discarding the data. On timeout SCK
    /// is left low.
    pub fn init(&mut self) -> Result<(), SensorError> {
        self.clock(false)?;

        let polls = self.wait_ready()?;
        debug!(
            "hx711[{}]: ready after {} polls",
            self.config.sensor_id.value(),
            polls
        );

        for _ in 0..DATA_BITS + self.config.gain.pulses() {
            self.pulse()?;
        }
        self.active_gain = self.config.gain;

        Ok(())
    }

    /// Poll DOUT until the chip reports ready
    ///
    /// Polls are 1 µs apart and bounded by `ready_timeout_polls`. Returns
    /// the number of busy polls seen before the chip became ready.
    pub fn wait_ready(&mut self) -> Result<u32, SensorError> {
        let limit = self.config.ready_timeout_polls;
        let mut polls: u32 = 0;

        loop {
            if self.status()? == Status::Ready {
                return Ok(polls);
            }
            if polls >= limit {
                warn!(
                    "hx711[{}]: not ready after {} polls",
                    self.config.sensor_id.value(),
                    polls
                );
                return Err(SensorError::InitTimeout);
            }
            polls += 1;
            self.bus.delay_us(PULSE_HALF_PERIOD_US);
        }
    }

    /// Read one conversion as a signed value
    ///
    /// Does not wait for DOUT: call this only once the chip is ready.
    pub fn read(&mut self) -> Result<i32, SensorError> {
        let raw = self.read_raw()?;
        Ok(self.config.calibration.apply_zero(decode(raw)))
    }

    /// Truncating average of `count` back-to-back reads
    ///
    /// Fails with [`SensorError::InvalidArgument`] for `count == 0` without
    /// touching the bus.
    pub fn read_average(&mut self, count: u8) -> Result<i32, SensorError> {
        let count = NonZeroU8::new(count).ok_or(SensorError::InvalidArgument)?;
        truncating_mean(count, || self.read())
    }

    /// Make the current load the zero point
    ///
    /// Clears the zeroing offset, averages `count` reads and stores the
    /// average as the new zeroing offset, which is returned. On error the
    /// previous offset is kept.
    pub fn tare(&mut self, count: u8) -> Result<i32, SensorError> {
        let count = NonZeroU8::new(count).ok_or(SensorError::InvalidArgument)?;
        let previous = self.config.calibration.zeroing_offset;

        self.config.calibration = self.config.calibration.with_zeroing_offset(0);
        match truncating_mean(count, || self.read()) {
            Ok(zero) => {
                debug!("hx711[{}]: tare {}", self.config.sensor_id.value(), zero);
                self.config.calibration = self.config.calibration.with_zeroing_offset(zero);
                Ok(zero)
            }
            Err(e) => {
                self.config.calibration.zeroing_offset = previous;
                Err(e)
            }
        }
    }

    /// Power the chip down
    ///
    /// SCK low, SCK high, then hold for 60 µs. The next [`init`](Self::init)
    /// wakes it.
    pub fn deinit(&mut self) -> Result<(), SensorError> {
        self.clock(false)?;
        self.clock(true)?;
        self.bus.delay_us(POWER_DOWN_HOLD_US);
        self.active_gain = Gain::Gain128;

        debug!("hx711[{}]: powered down", self.config.sensor_id.value());
        Ok(())
    }

    /// Shift in 24 bits and send the gain pulses
    ///
    /// Returns the accumulator with the raw bias removed.
    fn read_raw(&mut self) -> Result<u32, SensorError> {
        let mut acc: u32 = 0;

        for _ in 0..DATA_BITS {
            self.clock(true)?;
            self.bus.delay_us(PULSE_HALF_PERIOD_US);
            let bit = self
                .bus
                .read_data_pin()
                .map_err(|_| SensorError::PinFault)?;
            acc = accumulate_bit(acc, bit);
            self.bus.delay_us(PULSE_HALF_PERIOD_US);
            self.clock(false)?;
            self.bus.delay_us(PULSE_HALF_PERIOD_US);
        }

        // Latch gain for the next conversion
        for _ in 0..self.config.gain.pulses() {
            self.pulse()?;
        }
        self.active_gain = self.config.gain;

        let raw = self.config.calibration.apply_raw(acc);
        self.last_raw = Some(raw);
        trace!("hx711[{}]: raw {}", self.config.sensor_id.value(), raw);

        Ok(raw)
    }

    fn pulse(&mut self) -> Result<(), SensorError> {
        self.clock(true)?;
        self.bus.delay_us(PULSE_HALF_PERIOD_US);
        self.clock(false)?;
        self.bus.delay_us(PULSE_HALF_PERIOD_US);
        Ok(())
    }

    #[inline]
    fn clock(&mut self, high: bool) -> Result<(), SensorError> {
        self.bus
            .write_clock_pin(high)
            .map_err(|_| SensorError::PinFault)
    }
}

impl<B: AdcBus> SensorPort for Hx711Adc<B> {
    /// Wait for each conversion, then average `averaging_samples` of them
    ///
    /// After a gain change the conversion in progress still uses the old
    /// gain, so it is read and dropped first.
    fn read(&mut self) -> Result<AdcReading, SensorError> {
        let count =
            NonZeroU8::new(self.config.averaging_samples).ok_or(SensorError::InvalidArgument)?;

        if self.active_gain != self.config.gain {
            self.wait_ready()?;
            Hx711Adc::read(self)?;
        }
        let gain = self.active_gain;

        let value = truncating_mean(count, || {
            self.wait_ready()?;
            Hx711Adc::read(self)
        })?;

        Ok(AdcReading::new(
            value,
            self.last_raw.unwrap_or_default(),
            gain,
            count.get(),
            self.config.sensor_id,
        ))
    }

    fn sensor_id(&self) -> SensorId {
        self.config.sensor_id
    }

    fn last_raw_value(&self) -> Option<u32> {
        self.last_raw
    }
}
