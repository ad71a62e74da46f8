use core::fmt;

/// General call address. Only used for the soft reset.
pub const GENERAL_CALL_ADDR: u8 = 0x00;

// SDP31, SDP32
pub const ADDR_SDP3X_1: u8 = 0x21;
pub const ADDR_SDP3X_2: u8 = 0x22;
pub const ADDR_SDP3X_3: u8 = 0x23;
// SDP8x0
pub const ADDR_SDP8X0: u8 = 0x25;
// SDP8x1
pub const ADDR_SDP8X1: u8 = 0x26;

/// Pressure scale of the 500 Pa parts, in 1/Pa.
pub const DIFF_SCALE_500PA: u16 = 60;
/// Pressure scale of the 125 Pa parts, in 1/Pa.
pub const DIFF_SCALE_125PA: u16 = 240;
/// Temperature scale shared by all parts, in 1/°C.
pub const TEMP_SCALE: u16 = 200;

/// Hardware family. Both speak the same protocol and differ in bus address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Family {
    Sdp3x,
    Sdp8xx,
}

impl Family {
    pub const fn default_address(self) -> u8 {
        match self {
            Family::Sdp3x => ADDR_SDP3X_1,
            Family::Sdp8xx => ADDR_SDP8X0,
        }
    }

    pub const fn addresses(self) -> &'static [u8] {
        match self {
            Family::Sdp3x => &[ADDR_SDP3X_1, ADDR_SDP3X_2, ADDR_SDP3X_3],
            Family::Sdp8xx => &[ADDR_SDP8X0, ADDR_SDP8X1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Model {
    Sdp31Pa500,
    Sdp32Pa125,
    Sdp800Pa500,
    Sdp810Pa500,
    Sdp801Pa500,
    Sdp811Pa500,
    Sdp800Pa125,
    Sdp810Pa125,
}

impl Model {
    pub const ALL: [Model; 8] = [
        Model::Sdp31Pa500,
        Model::Sdp32Pa125,
        Model::Sdp800Pa500,
        Model::Sdp810Pa500,
        Model::Sdp801Pa500,
        Model::Sdp811Pa500,
        Model::Sdp800Pa125,
        Model::Sdp810Pa125,
    ];

    /// Exact match against the known product ids.
    pub fn from_product_id(pid: u32) -> Option<Model> {
        Model::ALL
            .into_iter()
            .find(|model| model.product_id() == pid)
    }

    pub const fn product_id(self) -> u32 {
        match self {
            Model::Sdp31Pa500 => 0x0301_0100,
            Model::Sdp32Pa125 => 0x0301_0200,
            Model::Sdp800Pa500 => 0x0302_0100,
            Model::Sdp810Pa500 => 0x0302_0a00,
            Model::Sdp801Pa500 => 0x0302_0400,
            Model::Sdp811Pa500 => 0x0302_0d00,
            Model::Sdp800Pa125 => 0x0302_0200,
            Model::Sdp810Pa125 => 0x0302_0b00,
        }
    }

    pub const fn family(self) -> Family {
        match self {
            Model::Sdp31Pa500 | Model::Sdp32Pa125 => Family::Sdp3x,
            _ => Family::Sdp8xx,
        }
    }

    pub const fn pressure_range(self) -> PressureRange {
        match self {
            Model::Sdp32Pa125 | Model::Sdp800Pa125 | Model::Sdp810Pa125 => {
                PressureRange::Pa125
            }
            _ => PressureRange::Pa500,
        }
    }

    pub const fn scale_factors(self) -> ScaleFactors {
        let pressure = match self.pressure_range() {
            PressureRange::Pa125 => DIFF_SCALE_125PA,
            _ => DIFF_SCALE_500PA,
        };
        ScaleFactors {
            pressure,
            temperature: TEMP_SCALE,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Nominal full scale of a sensor.
///
/// `Pa250` is kept for parts that may appear later; no known product id maps
/// to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressureRange {
    #[default]
    NotAvailable,
    Pa125,
    Pa250,
    Pa500,
}

impl PressureRange {
    pub const fn pascals(self) -> Option<u16> {
        match self {
            PressureRange::NotAvailable => None,
            PressureRange::Pa125 => Some(125),
            PressureRange::Pa250 => Some(250),
            PressureRange::Pa500 => Some(500),
        }
    }
}

/// Divisors turning raw readings into physical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleFactors {
    /// 1/Pa
    pub pressure: u16,
    /// 1/°C
    pub temperature: u16,
}
