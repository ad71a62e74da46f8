use crate::sensirion::{Cmd, Error};

use super::{Family, Model, PressureRange, ScaleFactors, commands};

/// Temperature compensation applied by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Compensation {
    /// For mass flow applications.
    MassFlow,
    /// For differential pressure applications, where absolute pressure matters.
    #[default]
    DiffPressure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    #[default]
    Uninitialized,
    Idle,
    ContinuousAveraging,
    ContinuousLastValue,
}

impl State {
    pub const fn is_continuous(self) -> bool {
        matches!(
            self,
            State::ContinuousAveraging | State::ContinuousLastValue
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub address: u8,
    pub family: Family,
    pub compensation: Compensation,
}

impl Config {
    pub const fn new(family: Family) -> Self {
        Self {
            address: family.default_address(),
            family,
            compensation: Compensation::DiffPressure,
        }
    }

    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub const fn with_compensation(mut self, compensation: Compensation) -> Self {
        self.compensation = compensation;
        self
    }
}

/// Bus-independent half of a sensor session. The blocking and async drivers
/// ask it which command to send and report back once the bus transfer
/// succeeded; state only moves on success.
#[derive(Debug)]
pub(crate) struct Session {
    config: Config,
    state: State,
    detected: Option<(Model, ScaleFactors)>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: State::Uninitialized,
            detected: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn model(&self) -> Option<Model> {
        self.detected.map(|(model, _)| model)
    }

    pub fn scales(&self) -> Option<ScaleFactors> {
        self.detected.map(|(_, scales)| scales)
    }

    pub fn pressure_range(&self) -> PressureRange {
        self.model()
            .map_or(PressureRange::NotAvailable, Model::pressure_range)
    }

    fn require_initialized<E>(&self) -> Result<ScaleFactors, Error<E>> {
        self.scales().ok_or(Error::NotInitialized)
    }

    fn require_not_continuous<E>(&self) -> Result<(), Error<E>> {
        if self.state.is_continuous() {
            debug!("refused in state {}", self.state);
            Err(Error::InvalidState)
        } else {
            Ok(())
        }
    }

    /// Checked before any product info transfer.
    pub fn check_read_info<E>(&self) -> Result<(), Error<E>> {
        self.require_not_continuous()
    }

    /// Drops any earlier detection so a failed `begin` leaves nothing behind.
    pub fn begin_started<E>(&mut self) -> Result<(), Error<E>> {
        self.require_not_continuous()?;
        self.state = State::Uninitialized;
        self.detected = None;
        Ok(())
    }

    pub fn begin_finished<E>(&mut self, product_id: u32) -> Result<PressureRange, Error<E>> {
        let model = Model::from_product_id(product_id)
            .ok_or(Error::UnknownProductId(product_id))?;
        debug!("detected {} (product id {=u32:#x})", model, product_id);
        if model.family() != self.config.family {
            warn!(
                "{} found where {} was configured",
                model.family(),
                self.config.family
            );
        }

        self.detected = Some((model, model.scale_factors()));
        self.state = State::Idle;
        Ok(model.pressure_range())
    }

    pub fn start_command<E>(&self, averaging: bool) -> Result<Cmd, Error<E>> {
        self.require_initialized()?;
        self.require_not_continuous()?;
        Ok(commands::start_continuous(
            self.config.compensation,
            averaging,
        ))
    }

    pub fn started(&mut self, averaging: bool) {
        self.transition(if averaging {
            State::ContinuousAveraging
        } else {
            State::ContinuousLastValue
        });
    }

    pub fn stopped(&mut self) {
        if self.state.is_continuous() {
            self.transition(State::Idle);
        }
    }

    pub fn trigger_command<E>(&self, stretching: bool) -> Result<Cmd, Error<E>> {
        self.require_initialized()?;
        self.require_not_continuous()?;
        Ok(commands::trigger(self.config.compensation, stretching))
    }

    pub fn measurement_scales<E>(&self) -> Result<ScaleFactors, Error<E>> {
        self.require_initialized()
    }

    /// The general call reset ends continuous mode but keeps the detection.
    pub fn reset_done(&mut self) {
        if self.state != State::Uninitialized {
            self.transition(State::Idle);
        }
    }

    fn transition(&mut self, next: State) {
        debug!("state {} -> {}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::{Compensation, Config, Session, State};

    use crate::debug_utils::DummyError;
    use crate::sdp::{Family, Model, PressureRange, commands};
    use crate::sensirion::Error;

    type Result<T> = core::result::Result<T, Error<DummyError>>;

    fn initialized(family: Family) -> Session {
        let mut session = Session::new(Config::new(family));
        session.begin_started::<DummyError>().unwrap();
        session
            .begin_finished::<DummyError>(Model::Sdp31Pa500.product_id())
            .unwrap();
        session
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::new(Family::Sdp8xx);
        assert_eq!(config.address, 0x25);
        assert_eq!(config.compensation, Compensation::DiffPressure);

        let config = config
            .with_address(0x26)
            .with_compensation(Compensation::MassFlow);
        assert_eq!(config.address, 0x26);
        assert_eq!(config.compensation, Compensation::MassFlow);
    }

    #[test]
    fn test_uninitialized_refuses_measurement_commands() {
        let session = Session::new(Config::new(Family::Sdp3x));
        assert_eq!(
            session.start_command::<DummyError>(true),
            Err(Error::NotInitialized)
        );
        assert_eq!(
            session.trigger_command::<DummyError>(true),
            Err(Error::NotInitialized)
        );
        assert_eq!(
            session.measurement_scales::<DummyError>(),
            Err(Error::NotInitialized)
        );
        assert_eq!(session.pressure_range(), PressureRange::NotAvailable);
    }

    #[test]
    fn test_unknown_product_id_keeps_uninitialized() {
        let mut session = Session::new(Config::new(Family::Sdp3x));
        session.begin_started::<DummyError>().unwrap();
        let result: Result<_> = session.begin_finished(0x1234_5678);
        assert_eq!(result, Err(Error::UnknownProductId(0x1234_5678)));
        assert_eq!(session.state(), State::Uninitialized);
        assert_eq!(session.model(), None);
    }

    #[test]
    fn test_continuous_transitions() {
        let mut session = initialized(Family::Sdp3x);
        assert_eq!(session.state(), State::Idle);

        let cmd: Result<_> = session.start_command(true);
        assert_eq!(cmd, Ok(commands::START_CONT_DIFF_PRESSURE_AVG));
        session.started(true);
        assert_eq!(session.state(), State::ContinuousAveraging);

        let cmd: Result<_> = session.start_command(false);
        assert_eq!(cmd, Err(Error::InvalidState));
        let cmd: Result<_> = session.trigger_command(true);
        assert_eq!(cmd, Err(Error::InvalidState));
        let begin: Result<_> = session.begin_started();
        assert_eq!(begin, Err(Error::InvalidState));
        assert_eq!(session.state(), State::ContinuousAveraging);

        session.stopped();
        assert_eq!(session.state(), State::Idle);
        session.stopped();
        assert_eq!(session.state(), State::Idle);
    }

    #[test]
    fn test_mass_flow_commands() {
        let config = Config::new(Family::Sdp8xx)
            .with_compensation(Compensation::MassFlow);
        let mut session = Session::new(config);
        session.begin_started::<DummyError>().unwrap();
        session
            .begin_finished::<DummyError>(Model::Sdp810Pa500.product_id())
            .unwrap();

        let start: Result<_> = session.start_command(false);
        assert_eq!(start, Ok(commands::START_CONT_MASS_FLOW));
        let trigger: Result<_> = session.trigger_command(true);
        assert_eq!(trigger, Ok(commands::TRIG_MASS_FLOW_STRETCH));
        let trigger: Result<_> = session.trigger_command(false);
        assert_eq!(trigger, Ok(commands::TRIG_MASS_FLOW));
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = initialized(Family::Sdp3x);
        session.started(false);
        session.reset_done();
        assert_eq!(session.state(), State::Idle);
        assert_eq!(session.model(), Some(Model::Sdp31Pa500));

        let mut session = Session::new(Config::new(Family::Sdp3x));
        session.reset_done();
        assert_eq!(session.state(), State::Uninitialized);
    }

    #[test]
    fn test_family_mismatch_still_detects() {
        let mut session = initialized(Family::Sdp8xx);
        assert_eq!(session.model(), Some(Model::Sdp31Pa500));
        assert_eq!(session.state(), State::Idle);
        session.begin_started::<DummyError>().unwrap();
        assert_eq!(session.model(), None);
    }
}
