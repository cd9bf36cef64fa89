//! HX711 24-bit ADC driver
//!
//! This library drives one or more HX711 load-cell ADCs over the chip's
//! two-wire bit-banged interface. All pin and timing access goes through a
//! caller-supplied bus, so one driver serves any number of chips and any HAL.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - Gain / Rate / Status / AdcConfig                              │
//! │  - Calibration offsets                                           │
//! │  - Sample decoding (bit accumulation, sign extension, mean)      │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - AdcBus: data pin, clock pin, microsecond delay                │
//! │  - SensorPort: read a tagged reading                             │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters                                     │
//! │  - Hx711Adc: the protocol driver                                 │
//! │  - HookBus: three closures as a bus                              │
//! │  - EmbeddedHalBus: embedded-hal 1.0 pins as a bus                │
//! │  - SimulatedHx711: software chip model                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let bus = EmbeddedHalBus::new(dout, sck, delay);
//! let mut scale = Hx711Adc::new(bus, AdcConfig::new().with_gain(Gain::Gain128));
//!
//! scale.init()?;
//! scale.tare(16)?;
//! loop {
//!     scale.wait_ready()?;
//!     let counts = scale.read()?;
//! }
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

/// Domain layer - pure protocol logic
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Adapters - concrete implementations
pub mod adapters;

// Re-export key domain types
pub use domain::{AdcConfig, AdcReading, Calibration, Channel, Gain, Rate, SensorId, Status};

// Re-export key port traits
pub use ports::{AdcBus, SensorError, SensorPort};

// Re-export adapters
pub use adapters::{EmbeddedHalBus, HookBus, Hx711Adc, PinError, SimulatedHx711};
