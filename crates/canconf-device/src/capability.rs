//! Device Capability Interface.
//!
//! [`MotorController`] is the seam between the configuration core and a
//! vendor driver. Every call returns a [`StatusCode`]; none of them panic or
//! return `Result`, matching how the vendor libraries report failures.

use crate::capabilities::ProfileField;
use crate::ids::DeviceId;
use crate::status::StatusCode;
use crate::types::{
    DeviceFamily, FeedbackContinuity, FeedbackSensorSelection, FrameKind, IdleMode,
    SensorInitializationStrategy, SoftLimits, VelocityMeasurement,
};

/// A single capability call, used to name failures in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ConfigFactoryDefault,
    SetSensorPhase,
    ConfigSelectedFeedbackSensor,
    ConfigFeedbackNotContinuous,
    SetOpenLoopRampRate,
    SetClosedLoopRampRate,
    ConfigIntegratedSensorInitializationStrategy,
    SetIdleMode,
    SetInverted,
    ConfigNeutralDeadband,
    SetPeriodicFramePeriod(FrameKind),
    ConfigVelocityMeasurement,
    ConfigSoftLimits,
    EnableCurrentLimit,
    OverrideLimitSwitchesEnable,
    EnableVoltageCompensation,
    DisableVoltageCompensation,
}

impl Operation {
    /// Operator-facing name used in diagnostic messages.
    pub fn name(self) -> &'static str {
        match self {
            Operation::ConfigFactoryDefault => "factory default",
            Operation::SetSensorPhase => "set sensor phase",
            Operation::ConfigSelectedFeedbackSensor => "select feedback sensor",
            Operation::ConfigFeedbackNotContinuous => "feedback continuity",
            Operation::SetOpenLoopRampRate => "set open loop ramp",
            Operation::SetClosedLoopRampRate => "set closed loop ramp",
            Operation::ConfigIntegratedSensorInitializationStrategy => {
                "sensor initialization strategy"
            }
            Operation::SetIdleMode => "set neutral",
            Operation::SetInverted => "set inverted",
            Operation::ConfigNeutralDeadband => "neutral deadband",
            Operation::SetPeriodicFramePeriod(kind) => kind.operation_name(),
            Operation::ConfigVelocityMeasurement => "velocity measurement",
            Operation::ConfigSoftLimits => "soft limits",
            Operation::EnableCurrentLimit => "current limit",
            Operation::OverrideLimitSwitchesEnable => "limit switch enable",
            Operation::EnableVoltageCompensation | Operation::DisableVoltageCompensation => {
                "voltage compensation"
            }
        }
    }

    /// The profile field this call configures.
    pub fn field(self) -> ProfileField {
        match self {
            Operation::ConfigFactoryDefault => ProfileField::FactoryReset,
            Operation::SetSensorPhase => ProfileField::SensorPhase,
            Operation::ConfigSelectedFeedbackSensor => ProfileField::FeedbackSensor,
            Operation::ConfigFeedbackNotContinuous => ProfileField::FeedbackContinuity,
            Operation::SetOpenLoopRampRate => ProfileField::OpenLoopRamp,
            Operation::SetClosedLoopRampRate => ProfileField::ClosedLoopRamp,
            Operation::ConfigIntegratedSensorInitializationStrategy => {
                ProfileField::SensorInitialization
            }
            Operation::SetIdleMode => ProfileField::IdleBehavior,
            Operation::SetInverted => ProfileField::Inverted,
            Operation::ConfigNeutralDeadband => ProfileField::NeutralDeadband,
            Operation::SetPeriodicFramePeriod(_) => ProfileField::StatusFrames,
            Operation::ConfigVelocityMeasurement => ProfileField::VelocityMeasurement,
            Operation::ConfigSoftLimits => ProfileField::SoftLimits,
            Operation::EnableCurrentLimit => ProfileField::CurrentLimit,
            Operation::OverrideLimitSwitchesEnable => ProfileField::LimitSwitch,
            Operation::EnableVoltageCompensation | Operation::DisableVoltageCompensation => {
                ProfileField::VoltageCompensation
            }
        }
    }

    /// Parse the operator-facing name back into an operation.
    ///
    /// `"voltage compensation"` resolves to the enable call; both voltage
    /// compensation calls share that name.
    pub fn from_name(name: &str) -> Option<Self> {
        const SIMPLE: [Operation; 15] = [
            Operation::ConfigFactoryDefault,
            Operation::SetSensorPhase,
            Operation::ConfigSelectedFeedbackSensor,
            Operation::ConfigFeedbackNotContinuous,
            Operation::SetOpenLoopRampRate,
            Operation::SetClosedLoopRampRate,
            Operation::ConfigIntegratedSensorInitializationStrategy,
            Operation::SetIdleMode,
            Operation::SetInverted,
            Operation::ConfigNeutralDeadband,
            Operation::ConfigVelocityMeasurement,
            Operation::ConfigSoftLimits,
            Operation::EnableCurrentLimit,
            Operation::OverrideLimitSwitchesEnable,
            Operation::EnableVoltageCompensation,
        ];
        SIMPLE
            .into_iter()
            .chain(FrameKind::ALL.into_iter().map(Operation::SetPeriodicFramePeriod))
            .find(|op| op.name() == name)
    }
}

/// Capability calls a motor controller handle exposes.
///
/// Implementations wrap a vendor driver (or a simulator). Each call is
/// expected to return promptly, bounded by the driver's own bus timeout.
pub trait MotorController {
    fn id(&self) -> DeviceId;

    fn family(&self) -> DeviceFamily;

    fn config_factory_default(&mut self) -> StatusCode;

    fn set_sensor_phase(&mut self, inverted: bool) -> StatusCode;

    fn config_selected_feedback_sensor(&mut self, selection: FeedbackSensorSelection)
    -> StatusCode;

    fn config_feedback_not_continuous(&mut self, continuity: FeedbackContinuity) -> StatusCode;

    fn set_open_loop_ramp_rate(&mut self, seconds: f64) -> StatusCode;

    fn set_closed_loop_ramp_rate(&mut self, seconds: f64) -> StatusCode;

    fn config_integrated_sensor_initialization_strategy(
        &mut self,
        strategy: SensorInitializationStrategy,
    ) -> StatusCode;

    fn set_idle_mode(&mut self, mode: IdleMode) -> StatusCode;

    fn set_inverted(&mut self, inverted: bool) -> StatusCode;

    fn config_neutral_deadband(&mut self, deadband: f64) -> StatusCode;

    fn set_periodic_frame_period(&mut self, kind: FrameKind, period_ms: u16) -> StatusCode;

    fn config_velocity_measurement(&mut self, measurement: VelocityMeasurement) -> StatusCode;

    fn config_soft_limits(&mut self, limits: SoftLimits) -> StatusCode;

    fn enable_current_limit(&mut self, enabled: bool) -> StatusCode;

    fn override_limit_switches_enable(&mut self, enabled: bool) -> StatusCode;

    fn enable_voltage_compensation(&mut self, nominal_voltage: f64) -> StatusCode;

    fn disable_voltage_compensation(&mut self) -> StatusCode;
}

/// Constructs controller handles bound to a bus address.
///
/// Each `open` returns a fresh handle; backends never pool or share them.
pub trait ControllerBackend {
    type Controller: MotorController;

    fn open(&mut self, id: DeviceId, family: DeviceFamily) -> Self::Controller;
}
