//! Sensirion SDP3x (SDP31, SDP32) and SDP8xx differential pressure sensors.
//!
//! Both families share one command set. The family only decides the default
//! bus address, so a single driver type covers them; pick it with
//! [`Sdp::sdp3x`], [`Sdp::sdp8xx`] or an explicit [`Config`].

use embedded_hal::i2c::I2c;

use crate::sensirion::*;

pub mod asynch;
pub mod commands;
mod measurement;
mod model;
mod session;

pub use measurement::{Measurement, ProductInfo};
pub use model::*;
pub use session::{Compensation, Config, State};

use session::Session;

#[derive(Debug)]
pub struct Sdp<I2C> {
    sensor: Sensor<I2C>,
    session: Session,
}

impl<I2C> Sdp<I2C> {
    pub fn new(i2c: I2C, config: Config) -> Self {
        Self {
            sensor: Sensor::new(i2c, config.address),
            session: Session::new(config),
        }
    }

    /// SDP31/SDP32 at the default address 0x21.
    pub fn sdp3x(i2c: I2C) -> Self {
        Self::new(i2c, Config::new(Family::Sdp3x))
    }

    /// SDP8xx at the default address 0x25.
    pub fn sdp8xx(i2c: I2C) -> Self {
        Self::new(i2c, Config::new(Family::Sdp8xx))
    }

    pub fn config(&self) -> &Config {
        self.session.config()
    }

    pub fn state(&self) -> State {
        self.session.state()
    }

    /// Model detected by [`Sdp::begin`].
    pub fn model(&self) -> Option<Model> {
        self.session.model()
    }

    /// `NotAvailable` until [`Sdp::begin`] succeeded.
    pub fn pressure_range(&self) -> PressureRange {
        self.session.pressure_range()
    }

    /// Fixed pressure scale of the detected model, in 1/Pa.
    pub fn pressure_scale(&self) -> Option<u16> {
        self.session.scales().map(|s| s.pressure)
    }

    /// Temperature scale, in 1/°C.
    pub fn temperature_scale(&self) -> Option<u16> {
        self.session.scales().map(|s| s.temperature)
    }

    pub fn release(self) -> I2C {
        self.sensor.release()
    }
}

impl<I2C: I2c> Sdp<I2C> {
    /// Identifies the sensor and resolves its scale factors. Measurements are
    /// refused until this succeeded. On failure the session stays
    /// uninitialized; calling it again is allowed.
    pub fn begin(&mut self) -> Result<PressureRange, Error<I2C::Error>> {
        self.session.begin_started()?;
        let info = self.read_info(false)?;
        self.session.begin_finished(info.product_id)
    }

    /// Starts continuous measurement. With `averaging` the sensor averages all
    /// samples until the next read, otherwise each read returns the latest
    /// sample.
    pub fn start_continuous(&mut self, averaging: bool) -> Result<(), Error<I2C::Error>> {
        let cmd = self.session.start_command(averaging)?;
        self.sensor.send_command(&cmd)?;
        self.session.started(averaging);
        Ok(())
    }

    /// Stops continuous measurement. Harmless when none is running: the
    /// command is sent anyway and the state stays as it is.
    pub fn stop_continuous(&mut self) -> Result<(), Error<I2C::Error>> {
        self.sensor.send_command(&commands::STOP_CONT)?;
        self.session.stopped();
        Ok(())
    }

    /// Starts a one-shot measurement.
    ///
    /// With `stretching` the sensor holds the clock on the following read
    /// until the result is ready. Without it, reading before the measurement
    /// finished (about 45 ms) fails; the driver does not wait or retry.
    pub fn trigger_measurement(&mut self, stretching: bool) -> Result<(), Error<I2C::Error>> {
        let cmd = self.session.trigger_command(stretching)?;
        self.sensor.send_command(&cmd)?;
        Ok(())
    }

    /// Reads the differential pressure only. This is the shortest transfer.
    pub fn read_pressure(&mut self) -> Result<i16, Error<I2C::Error>> {
        Ok(self.read_measurement(false, false)?.pressure)
    }

    /// Reads a pending measurement. Only the words needed for the requested
    /// fields are transferred, so leave `want_temp` and `want_scale` off when
    /// not needed.
    pub fn read_measurement(
        &mut self,
        want_temp: bool,
        want_scale: bool,
    ) -> Result<Measurement, Error<I2C::Error>> {
        let scales = self.session.measurement_scales()?;
        let mut words = [0u16; 3];
        let words = &mut words[..Measurement::word_count(want_temp, want_scale)];

        self.sensor.read_words(words)?;
        Measurement::decode(words, want_temp, want_scale, scales)
    }

    /// Reads the 32-bit product id and, if asked for, the 64-bit serial
    /// number.
    pub fn read_product_id(&mut self, want_serial: bool) -> Result<ProductInfo, Error<I2C::Error>> {
        self.session.check_read_info()?;
        self.read_info(want_serial)
    }

    fn read_info(&mut self, want_serial: bool) -> Result<ProductInfo, Error<I2C::Error>> {
        let mut words = [0u16; MAX_WORDS];
        let words = &mut words[..ProductInfo::word_count(want_serial)];

        self.sensor.send_command(&commands::READ_INFO_1)?;
        self.sensor.send_command(&commands::READ_INFO_2)?;
        self.sensor.read_words(words)?;

        Ok(ProductInfo::decode(words))
    }

    /// Soft reset through the general call address.
    ///
    /// Every device on the bus that honours the general call resets too, not
    /// just this sensor.
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.sensor
            .send_command_to(GENERAL_CALL_ADDR, &commands::SOFT_RESET)?;
        self.session.reset_done();
        Ok(())
    }
}
