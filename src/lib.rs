//! INA219 Rust Driver
//!
//! Minimal no-std driver for the TI INA219 high-side current/bus voltage monitor.
//! Blocking I2C via `embedded-hal`, optional async via `embedded-hal-async`,
//! optional defmt logging and formatting.

#![no_std]

pub mod data_types;
pub mod driver;
pub mod error;
pub mod registers;

pub use data_types::SensorConfig;
pub use driver::Ina219;
pub use error::Error;
pub use registers::{DEFAULT_CALIBRATION, DEFAULT_I2C_ADDRESS};
