//! The configuration profile value type.

use std::borrow::Cow;

use canconf_device::{
    DeviceFamily, DeviceState, FeedbackContinuity, FeedbackSensorSelection, FrameKind, IdleMode,
    ProfileField, SensorInitializationStrategy, SoftLimits, StatusFramePeriods,
    VelocityMeasurement, VoltageCompensation,
};
use serde::{Deserialize, Serialize};

use crate::CURRENT_SCHEMA_VERSION;

/// A named bundle of desired controller settings.
///
/// Every setting is optional; an absent setting issues no capability call.
/// Presets are constants and are never edited in place. To derive a variant,
/// clone and override with the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationProfile {
    pub name: Cow<'static, str>,

    #[serde(default)]
    pub schema_version: u32,

    /// Restore factory defaults before anything else is written.
    #[serde(default)]
    pub factory_reset: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_phase: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_sensor: Option<FeedbackSensorSelection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_continuity: Option<FeedbackContinuity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_loop_ramp: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_loop_ramp: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_initialization: Option<SensorInitializationStrategy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_mode: Option<IdleMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverted: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral_deadband: Option<f64>,

    #[serde(default, skip_serializing_if = "StatusFramePeriods::is_empty")]
    pub status_frames: StatusFramePeriods,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_measurement: Option<VelocityMeasurement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft_limits: Option<SoftLimits>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_limit_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_switches_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_compensation: Option<VoltageCompensation>,
}

impl ConfigurationProfile {
    /// A profile that sets nothing.
    pub const fn empty(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            schema_version: CURRENT_SCHEMA_VERSION,
            factory_reset: false,
            sensor_phase: None,
            feedback_sensor: None,
            feedback_continuity: None,
            open_loop_ramp: None,
            closed_loop_ramp: None,
            sensor_initialization: None,
            idle_mode: None,
            inverted: None,
            neutral_deadband: None,
            status_frames: StatusFramePeriods::EMPTY,
            velocity_measurement: None,
            soft_limits: None,
            current_limit_enabled: None,
            limit_switches_enabled: None,
            voltage_compensation: None,
        }
    }

    /// Whether this profile carries a value for `field`.
    pub fn sets(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::FactoryReset => self.factory_reset,
            ProfileField::SensorPhase => self.sensor_phase.is_some(),
            ProfileField::FeedbackSensor => self.feedback_sensor.is_some(),
            ProfileField::FeedbackContinuity => self.feedback_continuity.is_some(),
            ProfileField::OpenLoopRamp => self.open_loop_ramp.is_some(),
            ProfileField::ClosedLoopRamp => self.closed_loop_ramp.is_some(),
            ProfileField::SensorInitialization => self.sensor_initialization.is_some(),
            ProfileField::IdleBehavior => self.idle_mode.is_some(),
            ProfileField::Inverted => self.inverted.is_some(),
            ProfileField::NeutralDeadband => self.neutral_deadband.is_some(),
            ProfileField::StatusFrames => !self.status_frames.is_empty(),
            ProfileField::VelocityMeasurement => self.velocity_measurement.is_some(),
            ProfileField::SoftLimits => self.soft_limits.is_some(),
            ProfileField::CurrentLimit => self.current_limit_enabled.is_some(),
            ProfileField::LimitSwitch => self.limit_switches_enabled.is_some(),
            ProfileField::VoltageCompensation => self.voltage_compensation.is_some(),
        }
    }

    /// Fields this profile sets that `family` has no capability for.
    pub fn unsupported_fields(&self, family: DeviceFamily) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|field| self.sets(*field) && !family.supports(*field))
            .collect()
    }

    /// The state a fresh controller of `family` ends in once this profile
    /// has been applied without failures.
    pub fn expected_state(&self, family: DeviceFamily) -> DeviceState {
        fn keep<T>(family: DeviceFamily, field: ProfileField, value: Option<T>) -> Option<T> {
            value.filter(|_| family.supports(field))
        }

        DeviceState {
            sensor_phase: keep(family, ProfileField::SensorPhase, self.sensor_phase),
            feedback_sensor: keep(family, ProfileField::FeedbackSensor, self.feedback_sensor),
            feedback_continuity: keep(
                family,
                ProfileField::FeedbackContinuity,
                self.feedback_continuity,
            ),
            open_loop_ramp: keep(family, ProfileField::OpenLoopRamp, self.open_loop_ramp),
            closed_loop_ramp: keep(family, ProfileField::ClosedLoopRamp, self.closed_loop_ramp),
            sensor_initialization: keep(
                family,
                ProfileField::SensorInitialization,
                self.sensor_initialization,
            ),
            idle_mode: keep(family, ProfileField::IdleBehavior, self.idle_mode),
            inverted: keep(family, ProfileField::Inverted, self.inverted),
            neutral_deadband: keep(family, ProfileField::NeutralDeadband, self.neutral_deadband),
            status_frames: self.status_frames.restricted_to(family.supported_frames()),
            velocity_measurement: keep(
                family,
                ProfileField::VelocityMeasurement,
                self.velocity_measurement,
            ),
            soft_limits: keep(family, ProfileField::SoftLimits, self.soft_limits),
            current_limit_enabled: keep(
                family,
                ProfileField::CurrentLimit,
                self.current_limit_enabled,
            ),
            limit_switches_enabled: keep(
                family,
                ProfileField::LimitSwitch,
                self.limit_switches_enabled,
            ),
            // A disabled compensation is recorded without its nominal voltage.
            voltage_compensation: keep(
                family,
                ProfileField::VoltageCompensation,
                self.voltage_compensation,
            )
            .map(|vc| if vc.enabled { vc } else { VoltageCompensation::DISABLED }),
        }
    }

    /// Bring-up sequence for sensor-bearing controllers: factory reset,
    /// normalized sensor phase, the family's feedback sensor on slot 0,
    /// continuous feedback, both ramps set to `ramp_seconds`, boot to the
    /// absolute position, and coast.
    ///
    /// Brushless smart controllers have no sensor sequence; they get the
    /// default preset carrying the ramp instead.
    pub fn sensored_bootstrap(family: DeviceFamily, ramp_seconds: f64) -> Self {
        let Some(sensor) = family.default_feedback_sensor() else {
            return Self::DEFAULT.with_ramps(ramp_seconds, ramp_seconds);
        };

        Self {
            factory_reset: true,
            sensor_phase: Some(false),
            feedback_sensor: Some(FeedbackSensorSelection {
                sensor,
                slot: 0,
                timeout_ms: 50,
            }),
            feedback_continuity: Some(FeedbackContinuity {
                not_continuous: false,
                timeout_ms: 4,
            }),
            open_loop_ramp: Some(ramp_seconds),
            closed_loop_ramp: Some(ramp_seconds),
            sensor_initialization: Some(SensorInitializationStrategy::BootToAbsolutePosition),
            idle_mode: Some(IdleMode::Coast),
            ..Self::empty("sensored-bootstrap")
        }
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_factory_reset(mut self, factory_reset: bool) -> Self {
        self.factory_reset = factory_reset;
        self
    }

    pub fn with_idle_mode(mut self, mode: IdleMode) -> Self {
        self.idle_mode = Some(mode);
        self
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = Some(inverted);
        self
    }

    pub fn with_ramps(mut self, open_loop: f64, closed_loop: f64) -> Self {
        self.open_loop_ramp = Some(open_loop);
        self.closed_loop_ramp = Some(closed_loop);
        self
    }

    pub fn with_frame_period(mut self, kind: FrameKind, period_ms: u16) -> Self {
        self.status_frames.set(kind, period_ms);
        self
    }

    pub fn with_voltage_compensation(mut self, compensation: VoltageCompensation) -> Self {
        self.voltage_compensation = Some(compensation);
        self
    }

    pub fn with_neutral_deadband(mut self, deadband: f64) -> Self {
        self.neutral_deadband = Some(deadband);
        self
    }

    pub fn with_sensor_phase(mut self, inverted: bool) -> Self {
        self.sensor_phase = Some(inverted);
        self
    }

    pub fn with_velocity_measurement(mut self, measurement: VelocityMeasurement) -> Self {
        self.velocity_measurement = Some(measurement);
        self
    }

    pub fn with_soft_limits(mut self, limits: SoftLimits) -> Self {
        self.soft_limits = Some(limits);
        self
    }

    pub fn with_current_limit(mut self, enabled: bool) -> Self {
        self.current_limit_enabled = Some(enabled);
        self
    }

    pub fn with_limit_switches(mut self, enabled: bool) -> Self {
        self.limit_switches_enabled = Some(enabled);
        self
    }
}
