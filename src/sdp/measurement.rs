use core::fmt;

use crate::sensirion::Error;

use super::{Model, ScaleFactors};

/// One reading as delivered by the sensor. Values stay raw; divide by the
/// scales (or use the helpers) to get Pa and °C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    pub pressure: i16,
    pub temperature: Option<i16>,
    /// Scale factor word sent by the device, if requested.
    pub scale_factor: Option<i16>,
    /// Pressure divisor for this reading: the device's scale factor word when
    /// present, otherwise the model's fixed scale.
    pub pressure_scale: u16,
    pub temperature_scale: u16,
}

impl Measurement {
    /// Number of words to read for the requested fields. The scale factor is
    /// the third word, so asking for it also transfers the temperature.
    pub const fn word_count(want_temp: bool, want_scale: bool) -> usize {
        if want_scale {
            3
        } else if want_temp {
            2
        } else {
            1
        }
    }

    pub(crate) fn decode<E>(
        words: &[u16],
        want_temp: bool,
        want_scale: bool,
        scales: ScaleFactors,
    ) -> Result<Self, Error<E>> {
        let pressure = *words.first().ok_or(Error::InvalidResponse)? as i16;
        let temperature = words.get(1).filter(|_| want_temp).map(|w| *w as i16);
        let scale_factor = words.get(2).filter(|_| want_scale).map(|w| *w as i16);

        let pressure_scale = match scale_factor {
            Some(scale) if scale > 0 => scale as u16,
            Some(_) => return Err(Error::InvalidResponse),
            None => scales.pressure,
        };

        Ok(Self {
            pressure,
            temperature,
            scale_factor,
            pressure_scale,
            temperature_scale: scales.temperature,
        })
    }

    pub fn pressure_pa(&self) -> f32 {
        self.pressure as f32 / self.pressure_scale as f32
    }

    pub fn temperature_celsius(&self) -> Option<f32> {
        self.temperature
            .map(|t| t as f32 / self.temperature_scale as f32)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2} Pa", self.pressure_pa())?;
        if let Some(t) = self.temperature_celsius() {
            write!(f, ", {:.1}°C", t)?;
        }
        Ok(())
    }
}

/// Identification block read with the two product info commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProductInfo {
    pub product_id: u32,
    pub serial: Option<u64>,
}

impl ProductInfo {
    pub const fn word_count(want_serial: bool) -> usize {
        if want_serial { 6 } else { 2 }
    }

    pub(crate) fn decode(words: &[u16]) -> Self {
        let product_id = (words[0] as u32) << 16 | words[1] as u32;
        let serial = (words.len() >= 6).then(|| {
            (words[2] as u64) << 48
                | (words[3] as u64) << 32
                | (words[4] as u64) << 16
                | (words[5] as u64)
        });

        Self { product_id, serial }
    }

    pub fn model(&self) -> Option<Model> {
        Model::from_product_id(self.product_id)
    }
}
