//! Async flavour of [`super::Sdp`] on top of `embedded-hal-async`.
//!
//! A clock-stretched read is a suspension point: the future stays pending for
//! as long as the HAL holds the transfer. No timeout is added here.

use embedded_hal_async::i2c::I2c;

use crate::sensirion::*;

use super::*;

use super::session::Session;

/// Async SDP3x/SDP8xx driver.
///
/// Operations are not cancel-safe. Dropping a future after its command went
/// out but before it completed leaves the session state behind the device,
/// e.g. still Idle while the sensor already measures continuously.
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

    pub fn sdp3x(i2c: I2C) -> Self {
        Self::new(i2c, Config::new(Family::Sdp3x))
    }

    pub fn sdp8xx(i2c: I2C) -> Self {
        Self::new(i2c, Config::new(Family::Sdp8xx))
    }

    pub fn config(&self) -> &Config {
        self.session.config()
    }

    pub fn state(&self) -> State {
        self.session.state()
    }

    pub fn model(&self) -> Option<Model> {
        self.session.model()
    }

    pub fn pressure_range(&self) -> PressureRange {
        self.session.pressure_range()
    }

    pub fn pressure_scale(&self) -> Option<u16> {
        self.session.scales().map(|s| s.pressure)
    }

    pub fn temperature_scale(&self) -> Option<u16> {
        self.session.scales().map(|s| s.temperature)
    }

    pub fn release(self) -> I2C {
        self.sensor.release()
    }
}

impl<I2C: I2c> Sdp<I2C> {
    pub async fn begin(&mut self) -> Result<PressureRange, Error<I2C::Error>> {
        self.session.begin_started()?;
        let info = self.read_info(false).await?;
        self.session.begin_finished(info.product_id)
    }

    pub async fn start_continuous(&mut self, averaging: bool) -> Result<(), Error<I2C::Error>> {
        let cmd = self.session.start_command(averaging)?;
        self.sensor.send_command_async(&cmd).await?;
        self.session.started(averaging);
        Ok(())
    }

    pub async fn stop_continuous(&mut self) -> Result<(), Error<I2C::Error>> {
        self.sensor.send_command_async(&commands::STOP_CONT).await?;
        self.session.stopped();
        Ok(())
    }

    pub async fn trigger_measurement(&mut self, stretching: bool) -> Result<(), Error<I2C::Error>> {
        let cmd = self.session.trigger_command(stretching)?;
        self.sensor.send_command_async(&cmd).await
    }

    pub async fn read_pressure(&mut self) -> Result<i16, Error<I2C::Error>> {
        Ok(self.read_measurement(false, false).await?.pressure)
    }

    pub async fn read_measurement(
        &mut self,
        want_temp: bool,
        want_scale: bool,
    ) -> Result<Measurement, Error<I2C::Error>> {
        let scales = self.session.measurement_scales()?;
        let mut words = [0u16; 3];
        let words = &mut words[..Measurement::word_count(want_temp, want_scale)];

        self.sensor.read_words_async(words).await?;
        Measurement::decode(words, want_temp, want_scale, scales)
    }

    pub async fn read_product_id(
        &mut self,
        want_serial: bool,
    ) -> Result<ProductInfo, Error<I2C::Error>> {
        self.session.check_read_info()?;
        self.read_info(want_serial).await
    }

    async fn read_info(&mut self, want_serial: bool) -> Result<ProductInfo, Error<I2C::Error>> {
        let mut words = [0u16; MAX_WORDS];
        let words = &mut words[..ProductInfo::word_count(want_serial)];

        self.sensor
            .send_command_async(&commands::READ_INFO_1)
            .await?;
        self.sensor
            .send_command_async(&commands::READ_INFO_2)
            .await?;
        self.sensor.read_words_async(words).await?;

        Ok(ProductInfo::decode(words))
    }

    /// General call reset, see [`super::Sdp::reset`].
    pub async fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.sensor
            .send_command_to_async(GENERAL_CALL_ADDR, &commands::SOFT_RESET)
            .await?;
        self.session.reset_done();
        Ok(())
    }
}
