//! Observable configuration state of one controller.

use serde::{Deserialize, Serialize};

use crate::types::{
    FeedbackContinuity, FeedbackSensorSelection, IdleMode, SensorInitializationStrategy,
    SoftLimits, StatusFramePeriods, VelocityMeasurement, VoltageCompensation,
};

/// Settings a controller currently holds. `None` means the setting was never
/// written since power-on or the last factory reset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceState {
    pub sensor_phase: Option<bool>,
    pub feedback_sensor: Option<FeedbackSensorSelection>,
    pub feedback_continuity: Option<FeedbackContinuity>,
    pub open_loop_ramp: Option<f64>,
    pub closed_loop_ramp: Option<f64>,
    pub sensor_initialization: Option<SensorInitializationStrategy>,
    pub idle_mode: Option<IdleMode>,
    pub inverted: Option<bool>,
    pub neutral_deadband: Option<f64>,
    pub status_frames: StatusFramePeriods,
    pub velocity_measurement: Option<VelocityMeasurement>,
    pub soft_limits: Option<SoftLimits>,
    pub current_limit_enabled: Option<bool>,
    pub limit_switches_enabled: Option<bool>,
    pub voltage_compensation: Option<VoltageCompensation>,
}

impl DeviceState {
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}
