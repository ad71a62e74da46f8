#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

//! Driver for the Sensirion SDP3x and SDP8xx digital differential pressure
//! sensors, built on the `embedded-hal` 1.0 I2C traits.
//!
//! ```no_run
//! # fn demo<I2C: embedded_hal::i2c::I2c>(i2c: I2C) -> Result<(), sdp_sensors::Error<I2C::Error>> {
//! use sdp_sensors::sdp::Sdp;
//!
//! let mut sensor = Sdp::sdp3x(i2c);
//! sensor.begin()?;
//! sensor.start_continuous(true)?;
//! let measurement = sensor.read_measurement(true, false)?;
//! let _pa = measurement.pressure_pa();
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod fmt;

#[cfg(test)]
mod debug_utils;
pub mod sdp;
mod sensirion;

pub use sensirion::{Cmd, Error, crc, verify};
