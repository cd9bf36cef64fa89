//! Ports (interfaces) defining the boundaries of the driver
//!
//! - **AdcBus**: how the driver reaches the pins and the clock (HAL,
//!   closures, simulation)
//! - **SensorPort**: how the application obtains readings

pub mod bus;
pub mod sensor;

pub use bus::AdcBus;
pub use sensor::{SensorError, SensorPort};
