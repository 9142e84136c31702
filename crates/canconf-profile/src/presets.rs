//! Built-in profile presets.
//!
//! Each preset is a constant. The statics below give them a fixed address so
//! lookups by name can hand out `&'static` references.

use std::borrow::Cow;

use canconf_device::{
    FrameKind, IdleMode, StatusFramePeriods, VelocityMeasPeriod, VelocityMeasurement,
    VoltageCompensation,
};

use crate::CURRENT_SCHEMA_VERSION;
use crate::types::ConfigurationProfile;

const BASE_FRAMES: StatusFramePeriods = StatusFramePeriods::EMPTY
    .with(FrameKind::Status0, 10)
    .with(FrameKind::Status1, 1000)
    .with(FrameKind::Status2, 1000)
    .with(FrameKind::Control, 10)
    .with(FrameKind::MotionControl, 100)
    .with(FrameKind::General, 10)
    .with(FrameKind::Feedback0, 20)
    .with(FrameKind::QuadEncoder, 255)
    .with(FrameKind::AnalogTempVbat, 255)
    .with(FrameKind::PulseWidth, 255);

// Followers mirror their leader, so their telemetry runs at the slowest rates.
const FOLLOWER_FRAMES: StatusFramePeriods = BASE_FRAMES
    .with(FrameKind::Status0, 1000)
    .with(FrameKind::General, 255)
    .with(FrameKind::Feedback0, 255);

const LOW_LATENCY_FRAMES: StatusFramePeriods = BASE_FRAMES
    .with(FrameKind::Status0, 5)
    .with(FrameKind::Status1, 20)
    .with(FrameKind::Status2, 20)
    .with(FrameKind::Control, 5)
    .with(FrameKind::General, 5)
    .with(FrameKind::Feedback0, 10);

const fn base(name: &'static str) -> ConfigurationProfile {
    ConfigurationProfile {
        name: Cow::Borrowed(name),
        schema_version: CURRENT_SCHEMA_VERSION,
        factory_reset: false,
        sensor_phase: Some(false),
        feedback_sensor: None,
        feedback_continuity: None,
        open_loop_ramp: Some(0.0),
        closed_loop_ramp: Some(0.0),
        sensor_initialization: None,
        idle_mode: Some(IdleMode::Coast),
        inverted: Some(false),
        neutral_deadband: Some(0.04),
        status_frames: BASE_FRAMES,
        velocity_measurement: Some(VelocityMeasurement {
            period: VelocityMeasPeriod::Period100Ms,
            rolling_average_window: 64,
        }),
        soft_limits: None,
        current_limit_enabled: Some(false),
        limit_switches_enabled: Some(false),
        voltage_compensation: Some(VoltageCompensation::DISABLED),
    }
}

impl ConfigurationProfile {
    /// Coast, no inversion, no ramp, slow status frames, no voltage compensation.
    pub const DEFAULT: Self = base("default");

    /// Drivetrain leader: brakes when idle and measures velocity over a short window.
    pub const DRIVE: Self = {
        let mut profile = base("drive");
        profile.idle_mode = Some(IdleMode::Brake);
        profile.velocity_measurement = Some(VelocityMeasurement {
            period: VelocityMeasPeriod::Period25Ms,
            rolling_average_window: 8,
        });
        profile
    };

    /// Drivetrain follower.
    pub const SLAVE: Self = {
        let mut profile = base("slave");
        profile.status_frames = FOLLOWER_FRAMES;
        profile
    };

    /// Fast frames, tighter deadband and a narrow velocity window.
    pub const HIGH_PERFORMANCE: Self = {
        let mut profile = base("high-performance");
        profile.status_frames = LOW_LATENCY_FRAMES;
        profile.neutral_deadband = Some(0.02);
        profile.velocity_measurement = Some(VelocityMeasurement {
            period: VelocityMeasPeriod::Period10Ms,
            rolling_average_window: 32,
        });
        profile
    };
}

pub static DEFAULT: ConfigurationProfile = ConfigurationProfile::DEFAULT;
pub static DRIVE: ConfigurationProfile = ConfigurationProfile::DRIVE;
pub static SLAVE: ConfigurationProfile = ConfigurationProfile::SLAVE;
pub static HIGH_PERFORMANCE: ConfigurationProfile = ConfigurationProfile::HIGH_PERFORMANCE;

/// All presets, in the order they are listed to operators.
pub static ALL: [&ConfigurationProfile; 4] = [&DEFAULT, &DRIVE, &SLAVE, &HIGH_PERFORMANCE];

/// Look up a preset by its name (`default`, `drive`, `slave`, `high-performance`).
pub fn by_name(name: &str) -> Option<&'static ConfigurationProfile> {
    ALL.iter().copied().find(|preset| preset.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    ["default", "drive", "slave", "high-performance"].into_iter()
}
