//! Capability table: which profile fields each device family accepts, and
//! in which order they are applied.
//!
//! This table is the single source of truth for the applier's dispatch. A
//! field missing from a family's order is skipped as a no-op for that family,
//! never reported as an error.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::types::{DeviceFamily, FeedbackSensor, FrameKind};

/// One configurable field of a configuration profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileField {
    FactoryReset,
    SensorPhase,
    FeedbackSensor,
    FeedbackContinuity,
    OpenLoopRamp,
    ClosedLoopRamp,
    SensorInitialization,
    IdleBehavior,
    Inverted,
    NeutralDeadband,
    StatusFrames,
    VelocityMeasurement,
    SoftLimits,
    CurrentLimit,
    LimitSwitch,
    VoltageCompensation,
}

impl ProfileField {
    pub const ALL: [ProfileField; 16] = [
        ProfileField::FactoryReset,
        ProfileField::SensorPhase,
        ProfileField::FeedbackSensor,
        ProfileField::FeedbackContinuity,
        ProfileField::OpenLoopRamp,
        ProfileField::ClosedLoopRamp,
        ProfileField::SensorInitialization,
        ProfileField::IdleBehavior,
        ProfileField::Inverted,
        ProfileField::NeutralDeadband,
        ProfileField::StatusFrames,
        ProfileField::VelocityMeasurement,
        ProfileField::SoftLimits,
        ProfileField::CurrentLimit,
        ProfileField::LimitSwitch,
        ProfileField::VoltageCompensation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProfileField::FactoryReset => "factory-reset",
            ProfileField::SensorPhase => "sensor-phase",
            ProfileField::FeedbackSensor => "feedback-sensor",
            ProfileField::FeedbackContinuity => "feedback-continuity",
            ProfileField::OpenLoopRamp => "open-loop-ramp",
            ProfileField::ClosedLoopRamp => "closed-loop-ramp",
            ProfileField::SensorInitialization => "sensor-initialization",
            ProfileField::IdleBehavior => "idle-behavior",
            ProfileField::Inverted => "inverted",
            ProfileField::NeutralDeadband => "neutral-deadband",
            ProfileField::StatusFrames => "status-frames",
            ProfileField::VelocityMeasurement => "velocity-measurement",
            ProfileField::SoftLimits => "soft-limits",
            ProfileField::CurrentLimit => "current-limit",
            ProfileField::LimitSwitch => "limit-switch",
            ProfileField::VoltageCompensation => "voltage-compensation",
        }
    }
}

const BRUSHLESS_SMART_ORDER: &[ProfileField] = &[
    ProfileField::FactoryReset,
    ProfileField::StatusFrames,
    ProfileField::IdleBehavior,
    ProfileField::Inverted,
    ProfileField::OpenLoopRamp,
    ProfileField::ClosedLoopRamp,
    ProfileField::VoltageCompensation,
];

const INTEGRATED_SENSOR_ORDER: &[ProfileField] = &[
    ProfileField::FactoryReset,
    ProfileField::SensorPhase,
    ProfileField::FeedbackSensor,
    ProfileField::FeedbackContinuity,
    ProfileField::OpenLoopRamp,
    ProfileField::ClosedLoopRamp,
    ProfileField::SensorInitialization,
    ProfileField::IdleBehavior,
    ProfileField::Inverted,
    ProfileField::NeutralDeadband,
    ProfileField::StatusFrames,
    ProfileField::VelocityMeasurement,
    ProfileField::SoftLimits,
    ProfileField::CurrentLimit,
    ProfileField::LimitSwitch,
    ProfileField::VoltageCompensation,
];

const EXTERNAL_SENSOR_ORDER: &[ProfileField] = &[
    ProfileField::FactoryReset,
    ProfileField::SensorPhase,
    ProfileField::FeedbackSensor,
    ProfileField::FeedbackContinuity,
    ProfileField::OpenLoopRamp,
    ProfileField::ClosedLoopRamp,
    ProfileField::IdleBehavior,
    ProfileField::Inverted,
    ProfileField::NeutralDeadband,
    ProfileField::StatusFrames,
    ProfileField::VelocityMeasurement,
    ProfileField::SoftLimits,
    ProfileField::CurrentLimit,
    ProfileField::LimitSwitch,
    ProfileField::VoltageCompensation,
];

const BRUSHLESS_SMART_FRAMES: &[FrameKind] =
    &[FrameKind::Status0, FrameKind::Status1, FrameKind::Status2];

const SENSOR_FAMILY_FRAMES: &[FrameKind] = &[
    FrameKind::Control,
    FrameKind::MotionControl,
    FrameKind::General,
    FrameKind::Feedback0,
    FrameKind::QuadEncoder,
    FrameKind::AnalogTempVbat,
    FrameKind::PulseWidth,
];

impl DeviceFamily {
    /// Fields this family accepts, in the order the applier issues them.
    ///
    /// Factory reset is always first so it cannot wipe later settings.
    pub fn application_order(self) -> &'static [ProfileField] {
        match self {
            DeviceFamily::BrushlessSmart => BRUSHLESS_SMART_ORDER,
            DeviceFamily::IntegratedSensor => INTEGRATED_SENSOR_ORDER,
            DeviceFamily::ExternalSensor => EXTERNAL_SENSOR_ORDER,
        }
    }

    pub fn supports(self, field: ProfileField) -> bool {
        self.application_order().contains(&field)
    }

    /// Periodic frame kinds this family exposes, in application order.
    pub fn supported_frames(self) -> &'static [FrameKind] {
        match self {
            DeviceFamily::BrushlessSmart => BRUSHLESS_SMART_FRAMES,
            DeviceFamily::IntegratedSensor | DeviceFamily::ExternalSensor => SENSOR_FAMILY_FRAMES,
        }
    }

    pub fn supports_frame(self, kind: FrameKind) -> bool {
        self.supported_frames().contains(&kind)
    }

    /// Frame periods the firmware accepts, in milliseconds.
    ///
    /// Brushless smart controllers accept `0`, which disables the frame.
    /// Sensor-bearing families cap periods at 255 ms and reject `0`.
    pub fn frame_period_range(self) -> RangeInclusive<u16> {
        match self {
            DeviceFamily::BrushlessSmart => 0..=u16::MAX,
            DeviceFamily::IntegratedSensor | DeviceFamily::ExternalSensor => 1..=255,
        }
    }

    /// Feedback sensor the sensored bootstrap selects for this family.
    pub fn default_feedback_sensor(self) -> Option<FeedbackSensor> {
        match self {
            DeviceFamily::BrushlessSmart => None,
            DeviceFamily::IntegratedSensor => Some(FeedbackSensor::Integrated),
            DeviceFamily::ExternalSensor => Some(FeedbackSensor::QuadEncoder),
        }
    }

    pub fn accepts_feedback_sensor(self, sensor: FeedbackSensor) -> bool {
        match self {
            DeviceFamily::BrushlessSmart => false,
            DeviceFamily::IntegratedSensor => true,
            DeviceFamily::ExternalSensor => sensor != FeedbackSensor::Integrated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_sensor_is_one_the_family_accepts() {
        assert_eq!(
            DeviceFamily::ExternalSensor.default_feedback_sensor(),
            Some(FeedbackSensor::QuadEncoder)
        );
        for family in DeviceFamily::ALL {
            assert_eq!(family.has_sensor(), family.default_feedback_sensor().is_some());
            if let Some(sensor) = family.default_feedback_sensor() {
                assert!(family.accepts_feedback_sensor(sensor), "{family} rejects {sensor:?}");
            }
        }
    }

    #[test]
    fn test_factory_reset_is_first_everywhere() {
        for family in DeviceFamily::ALL {
            assert_eq!(
                family.application_order().first(),
                Some(&ProfileField::FactoryReset)
            );
        }
    }

    #[test]
    fn test_orders_have_no_duplicates() {
        for family in DeviceFamily::ALL {
            let order = family.application_order();
            let mut sorted = order.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), order.len(), "{family} order repeats a field");
        }
    }

    #[test]
    fn test_brushless_smart_subset() {
        let family = DeviceFamily::BrushlessSmart;
        assert!(family.supports(ProfileField::IdleBehavior));
        assert!(family.supports(ProfileField::VoltageCompensation));
        assert!(!family.supports(ProfileField::SensorPhase));
        assert!(!family.supports(ProfileField::NeutralDeadband));
        assert!(!family.supports(ProfileField::VelocityMeasurement));
        assert_eq!(family.supported_frames().len(), 3);
    }

    #[test]
    fn test_only_integrated_sensor_sets_initialization_strategy() {
        assert!(DeviceFamily::IntegratedSensor.supports(ProfileField::SensorInitialization));
        assert!(!DeviceFamily::ExternalSensor.supports(ProfileField::SensorInitialization));
        assert!(!DeviceFamily::BrushlessSmart.supports(ProfileField::SensorInitialization));
    }

    #[test]
    fn test_frame_sets_are_disjoint_between_spark_and_sensor_families() {
        for kind in DeviceFamily::BrushlessSmart.supported_frames() {
            assert!(!DeviceFamily::IntegratedSensor.supports_frame(*kind));
        }
    }

    #[test]
    fn test_every_field_supported_by_some_family() {
        for field in ProfileField::ALL {
            assert!(
                DeviceFamily::ALL.iter().any(|f| f.supports(field)),
                "{} unsupported everywhere",
                field.name()
            );
        }
    }
}
