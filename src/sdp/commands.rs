use crate::sensirion::Cmd;

use super::Compensation;

// Continuous measurement
pub const START_CONT_MASS_FLOW_AVG: Cmd = [0x36, 0x03];
pub const START_CONT_MASS_FLOW: Cmd = [0x36, 0x08];
pub const START_CONT_DIFF_PRESSURE_AVG: Cmd = [0x36, 0x15];
pub const START_CONT_DIFF_PRESSURE: Cmd = [0x36, 0x1e];
pub const STOP_CONT: Cmd = [0x3f, 0xf9];

// Triggered measurement
pub const TRIG_MASS_FLOW: Cmd = [0x36, 0x24];
pub const TRIG_MASS_FLOW_STRETCH: Cmd = [0x37, 0x26];
pub const TRIG_DIFF_PRESSURE: Cmd = [0x36, 0x2f];
pub const TRIG_DIFF_PRESSURE_STRETCH: Cmd = [0x37, 0x2d];

// Product identifier, sent as two separate writes
pub const READ_INFO_1: Cmd = [0x36, 0x7c];
pub const READ_INFO_2: Cmd = [0xe1, 0x02];

// Sent to the general call address
pub const SOFT_RESET: Cmd = [0x00, 0x06];

pub(crate) fn start_continuous(compensation: Compensation, averaging: bool) -> Cmd {
    match (compensation, averaging) {
        (Compensation::MassFlow, true) => START_CONT_MASS_FLOW_AVG,
        (Compensation::MassFlow, false) => START_CONT_MASS_FLOW,
        (Compensation::DiffPressure, true) => START_CONT_DIFF_PRESSURE_AVG,
        (Compensation::DiffPressure, false) => START_CONT_DIFF_PRESSURE,
    }
}

pub(crate) fn trigger(compensation: Compensation, stretching: bool) -> Cmd {
    match (compensation, stretching) {
        (Compensation::MassFlow, true) => TRIG_MASS_FLOW_STRETCH,
        (Compensation::MassFlow, false) => TRIG_MASS_FLOW,
        (Compensation::DiffPressure, true) => TRIG_DIFF_PRESSURE_STRETCH,
        (Compensation::DiffPressure, false) => TRIG_DIFF_PRESSURE,
    }
}
