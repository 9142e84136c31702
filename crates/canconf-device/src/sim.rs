//! Simulated controllers and bus.
//!
//! [`SimulatedController`] records every accepted setting into a
//! [`DeviceState`] and applies the same acceptance rules the firmware does:
//! calls for capabilities the family lacks return
//! [`StatusCode::GeneralError`], out-of-range values return
//! [`StatusCode::InvalidParameter`]. A rejected or faulted call leaves the
//! state untouched.

use std::collections::{BTreeSet, HashMap};

use tracing::trace;

use crate::capability::{ControllerBackend, MotorController, Operation};
use crate::ids::DeviceId;
use crate::state::DeviceState;
use crate::status::StatusCode;
use crate::types::{
    DeviceFamily, FeedbackContinuity, FeedbackSensorSelection, FrameKind, IdleMode,
    SensorInitializationStrategy, SoftLimits, VELOCITY_WINDOWS, VelocityMeasurement,
    VoltageCompensation,
};

/// In-memory controller that behaves like firmware for configuration calls.
#[derive(Debug, Clone)]
pub struct SimulatedController {
    id: DeviceId,
    family: DeviceFamily,
    state: DeviceState,
    // Keyed by operation name so both voltage compensation calls share a fault.
    faults: HashMap<&'static str, StatusCode>,
    offline: bool,
    calls: Vec<(Operation, StatusCode)>,
    factory_resets: u32,
}

impl SimulatedController {
    pub fn new(id: DeviceId, family: DeviceFamily) -> Self {
        Self {
            id,
            family,
            state: DeviceState::default(),
            faults: HashMap::new(),
            offline: false,
            calls: Vec::new(),
            factory_resets: 0,
        }
    }

    /// Make every future call of `operation` return `status`.
    pub fn fail_operation(&mut self, operation: Operation, status: StatusCode) {
        self.faults.insert(operation.name(), status);
    }

    /// Simulate a controller missing from the bus: every call times out.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn recorded_state(&self) -> &DeviceState {
        &self.state
    }

    /// Every call received, with the status returned.
    pub fn calls(&self) -> &[(Operation, StatusCode)] {
        &self.calls
    }

    pub fn factory_resets(&self) -> u32 {
        self.factory_resets
    }

    fn call(
        &mut self,
        operation: Operation,
        check: impl FnOnce(DeviceFamily) -> StatusCode,
        record: impl FnOnce(&mut DeviceState),
    ) -> StatusCode {
        let status = if self.offline {
            StatusCode::CanTimeout
        } else if let Some(status) = self.faults.get(operation.name()) {
            *status
        } else if !self.family.supports(operation.field()) {
            StatusCode::GeneralError
        } else {
            check(self.family)
        };

        if status.is_ok() {
            record(&mut self.state);
        }
        trace!(
            device_id = %self.id,
            family = %self.family,
            operation = operation.name(),
            status = %status,
            "simulated capability call"
        );
        self.calls.push((operation, status));
        status
    }
}

fn valid_ramp(seconds: f64) -> StatusCode {
    if seconds.is_finite() && seconds >= 0.0 {
        StatusCode::Ok
    } else {
        StatusCode::InvalidParameter
    }
}

fn accept_if(valid: bool) -> StatusCode {
    if valid {
        StatusCode::Ok
    } else {
        StatusCode::InvalidParameter
    }
}

impl MotorController for SimulatedController {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn family(&self) -> DeviceFamily {
        self.family
    }

    fn config_factory_default(&mut self) -> StatusCode {
        let status = self.call(
            Operation::ConfigFactoryDefault,
            |_| StatusCode::Ok,
            |state| *state = DeviceState::default(),
        );
        if status.is_ok() {
            self.factory_resets += 1;
        }
        status
    }

    fn set_sensor_phase(&mut self, inverted: bool) -> StatusCode {
        self.call(
            Operation::SetSensorPhase,
            |_| StatusCode::Ok,
            |state| state.sensor_phase = Some(inverted),
        )
    }

    fn config_selected_feedback_sensor(
        &mut self,
        selection: FeedbackSensorSelection,
    ) -> StatusCode {
        self.call(
            Operation::ConfigSelectedFeedbackSensor,
            |family| {
                if family.accepts_feedback_sensor(selection.sensor) {
                    StatusCode::Ok
                } else {
                    StatusCode::SensorNotPresent
                }
            },
            |state| state.feedback_sensor = Some(selection),
        )
    }

    fn config_feedback_not_continuous(&mut self, continuity: FeedbackContinuity) -> StatusCode {
        self.call(
            Operation::ConfigFeedbackNotContinuous,
            |_| StatusCode::Ok,
            |state| state.feedback_continuity = Some(continuity),
        )
    }

    fn set_open_loop_ramp_rate(&mut self, seconds: f64) -> StatusCode {
        self.call(
            Operation::SetOpenLoopRampRate,
            |_| valid_ramp(seconds),
            |state| state.open_loop_ramp = Some(seconds),
        )
    }

    fn set_closed_loop_ramp_rate(&mut self, seconds: f64) -> StatusCode {
        self.call(
            Operation::SetClosedLoopRampRate,
            |_| valid_ramp(seconds),
            |state| state.closed_loop_ramp = Some(seconds),
        )
    }

    fn config_integrated_sensor_initialization_strategy(
        &mut self,
        strategy: SensorInitializationStrategy,
    ) -> StatusCode {
        self.call(
            Operation::ConfigIntegratedSensorInitializationStrategy,
            |_| StatusCode::Ok,
            |state| state.sensor_initialization = Some(strategy),
        )
    }

    fn set_idle_mode(&mut self, mode: IdleMode) -> StatusCode {
        self.call(
            Operation::SetIdleMode,
            |_| StatusCode::Ok,
            |state| state.idle_mode = Some(mode),
        )
    }

    fn set_inverted(&mut self, inverted: bool) -> StatusCode {
        self.call(
            Operation::SetInverted,
            |_| StatusCode::Ok,
            |state| state.inverted = Some(inverted),
        )
    }

    fn config_neutral_deadband(&mut self, deadband: f64) -> StatusCode {
        self.call(
            Operation::ConfigNeutralDeadband,
            |_| accept_if((0.0..1.0).contains(&deadband)),
            |state| state.neutral_deadband = Some(deadband),
        )
    }

    fn set_periodic_frame_period(&mut self, kind: FrameKind, period_ms: u16) -> StatusCode {
        self.call(
            Operation::SetPeriodicFramePeriod(kind),
            |family| {
                if !family.supports_frame(kind) {
                    StatusCode::GeneralError
                } else {
                    accept_if(family.frame_period_range().contains(&period_ms))
                }
            },
            |state| state.status_frames.set(kind, period_ms),
        )
    }

    fn config_velocity_measurement(&mut self, measurement: VelocityMeasurement) -> StatusCode {
        self.call(
            Operation::ConfigVelocityMeasurement,
            |_| accept_if(VELOCITY_WINDOWS.contains(&measurement.rolling_average_window)),
            |state| state.velocity_measurement = Some(measurement),
        )
    }

    fn config_soft_limits(&mut self, limits: SoftLimits) -> StatusCode {
        self.call(
            Operation::ConfigSoftLimits,
            |_| accept_if(limits.forward >= limits.reverse),
            |state| state.soft_limits = Some(limits),
        )
    }

    fn enable_current_limit(&mut self, enabled: bool) -> StatusCode {
        self.call(
            Operation::EnableCurrentLimit,
            |_| StatusCode::Ok,
            |state| state.current_limit_enabled = Some(enabled),
        )
    }

    fn override_limit_switches_enable(&mut self, enabled: bool) -> StatusCode {
        self.call(
            Operation::OverrideLimitSwitchesEnable,
            |_| StatusCode::Ok,
            |state| state.limit_switches_enabled = Some(enabled),
        )
    }

    fn enable_voltage_compensation(&mut self, nominal_voltage: f64) -> StatusCode {
        self.call(
            Operation::EnableVoltageCompensation,
            |_| accept_if(nominal_voltage.is_finite() && nominal_voltage > 0.0),
            |state| {
                state.voltage_compensation = Some(VoltageCompensation::enabled(nominal_voltage));
            },
        )
    }

    fn disable_voltage_compensation(&mut self) -> StatusCode {
        self.call(
            Operation::DisableVoltageCompensation,
            |_| StatusCode::Ok,
            |state| state.voltage_compensation = Some(VoltageCompensation::DISABLED),
        )
    }
}

/// Backend that opens [`SimulatedController`]s.
///
/// Faults registered per address are installed on every controller opened at
/// that address.
#[derive(Debug, Default)]
pub struct SimulatedBus {
    faults: HashMap<DeviceId, Vec<(Operation, StatusCode)>>,
    absent: BTreeSet<DeviceId>,
    opened: Vec<(DeviceId, DeviceFamily)>,
}

impl SimulatedBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&mut self, id: DeviceId, operation: Operation, status: StatusCode) {
        self.faults.entry(id).or_default().push((operation, status));
    }

    /// Fail `operation` on every address.
    pub fn fail_everywhere(&mut self, operation: Operation, status: StatusCode) {
        for raw in 0..=crate::ids::MAX_DEVICE_ID {
            if let Ok(id) = DeviceId::new(raw) {
                self.fail_on(id, operation, status);
            }
        }
    }

    /// Mark `id` as not present; controllers opened there time out.
    pub fn remove_device(&mut self, id: DeviceId) {
        self.absent.insert(id);
    }

    /// Addresses opened so far, in order, with their family.
    pub fn opened(&self) -> &[(DeviceId, DeviceFamily)] {
        &self.opened
    }
}

impl ControllerBackend for SimulatedBus {
    type Controller = SimulatedController;

    fn open(&mut self, id: DeviceId, family: DeviceFamily) -> SimulatedController {
        let mut controller = SimulatedController::new(id, family);
        if let Some(faults) = self.faults.get(&id) {
            for (operation, status) in faults {
                controller.fail_operation(*operation, *status);
            }
        }
        controller.set_offline(self.absent.contains(&id));
        self.opened.push((id, family));
        controller
    }
}
