//! Adapters - concrete implementations of ports
//!
//! # Available Adapters
//!
//! - **hx711**: the HX711 driver, implementing `SensorPort` over any `AdcBus`
//! - **hooks**: `AdcBus` from three caller-supplied functions
//! - **hal_bus**: `AdcBus` from embedded-hal 1.0 pins and delay
//! - **simulated**: software model of the chip, usable as an `AdcBus`

pub mod hal_bus;
pub mod hooks;
pub mod hx711;
pub mod simulated;

#[cfg(test)]
pub(crate) mod mock;

pub use hal_bus::{EmbeddedHalBus, PinError};
pub use hooks::HookBus;
pub use hx711::Hx711Adc;
pub use simulated::SimulatedHx711;
