//! Value types carried by capability calls.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A class of motor controller hardware with a specific capability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceFamily {
    /// Brushless smart controller (SPARK MAX class).
    BrushlessSmart,
    /// Controller with an integrated rotor sensor (Talon FX class).
    IntegratedSensor,
    /// Brushed controller with an external sensor port (Talon SRX class).
    ExternalSensor,
}

impl DeviceFamily {
    pub const ALL: [DeviceFamily; 3] = [
        DeviceFamily::BrushlessSmart,
        DeviceFamily::IntegratedSensor,
        DeviceFamily::ExternalSensor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DeviceFamily::BrushlessSmart => "brushless smart controller",
            DeviceFamily::IntegratedSensor => "integrated sensor controller",
            DeviceFamily::ExternalSensor => "external sensor controller",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "brushless-smart" => Some(DeviceFamily::BrushlessSmart),
            "integrated-sensor" => Some(DeviceFamily::IntegratedSensor),
            "external-sensor" => Some(DeviceFamily::ExternalSensor),
            _ => None,
        }
    }

    /// Families that carry a feedback sensor and the sensor-related fields.
    pub fn has_sensor(self) -> bool {
        !matches!(self, DeviceFamily::BrushlessSmart)
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output behavior when no command is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdleMode {
    #[default]
    Coast,
    Brake,
}

/// Periodic frame kinds across all families.
///
/// `Status0..Status2` belong to brushless smart controllers; the rest belong
/// to the sensor-bearing families. Which kinds a family accepts is listed by
/// [`DeviceFamily::supported_frames`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameKind {
    Status0,
    Status1,
    Status2,
    Control,
    MotionControl,
    General,
    Feedback0,
    QuadEncoder,
    AnalogTempVbat,
    PulseWidth,
}

impl FrameKind {
    pub const COUNT: usize = 10;

    pub const ALL: [FrameKind; FrameKind::COUNT] = [
        FrameKind::Status0,
        FrameKind::Status1,
        FrameKind::Status2,
        FrameKind::Control,
        FrameKind::MotionControl,
        FrameKind::General,
        FrameKind::Feedback0,
        FrameKind::QuadEncoder,
        FrameKind::AnalogTempVbat,
        FrameKind::PulseWidth,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name of the capability call that sets this frame's period.
    pub fn operation_name(self) -> &'static str {
        match self {
            FrameKind::Status0 => "set status0 rate",
            FrameKind::Status1 => "set status1 rate",
            FrameKind::Status2 => "set status2 rate",
            FrameKind::Control => "set control frame period",
            FrameKind::MotionControl => "set motion control frame period",
            FrameKind::General => "set general status rate",
            FrameKind::Feedback0 => "set feedback status rate",
            FrameKind::QuadEncoder => "set quadrature status rate",
            FrameKind::AnalogTempVbat => "set analog/temp/vbat status rate",
            FrameKind::PulseWidth => "set pulse width status rate",
        }
    }
}

/// Period in milliseconds for each frame kind a profile sets.
///
/// Backed by a fixed array so presets can be built in `const` context.
/// Serializes as a `frame-kind -> ms` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<FrameKind, u16>", into = "BTreeMap<FrameKind, u16>")]
pub struct StatusFramePeriods {
    periods: [Option<u16>; FrameKind::COUNT],
}

impl StatusFramePeriods {
    pub const EMPTY: Self = Self {
        periods: [None; FrameKind::COUNT],
    };

    /// Return a copy with `kind` set to `period_ms`.
    pub const fn with(mut self, kind: FrameKind, period_ms: u16) -> Self {
        self.periods[kind.index()] = Some(period_ms);
        self
    }

    /// Return a copy with `kind` removed.
    pub const fn without(mut self, kind: FrameKind) -> Self {
        self.periods[kind.index()] = None;
        self
    }

    pub fn get(&self, kind: FrameKind) -> Option<u16> {
        self.periods.get(kind.index()).copied().flatten()
    }

    pub fn set(&mut self, kind: FrameKind, period_ms: u16) {
        if let Some(slot) = self.periods.get_mut(kind.index()) {
            *slot = Some(period_ms);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.periods.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.periods.iter().filter(|p| p.is_some()).count()
    }

    /// Entries in [`FrameKind`] declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameKind, u16)> + '_ {
        FrameKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|period| (kind, period)))
    }

    /// Keep only the kinds in `kinds`.
    pub fn restricted_to(&self, kinds: &[FrameKind]) -> Self {
        let mut out = Self::EMPTY;
        for (kind, period) in self.iter() {
            if kinds.contains(&kind) {
                out.set(kind, period);
            }
        }
        out
    }
}

impl From<BTreeMap<FrameKind, u16>> for StatusFramePeriods {
    fn from(map: BTreeMap<FrameKind, u16>) -> Self {
        let mut out = Self::EMPTY;
        for (kind, period) in map {
            out.set(kind, period);
        }
        out
    }
}

impl From<StatusFramePeriods> for BTreeMap<FrameKind, u16> {
    fn from(periods: StatusFramePeriods) -> Self {
        periods.iter().collect()
    }
}

/// Feedback device selectable on sensor-bearing controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackSensor {
    Integrated,
    QuadEncoder,
    Analog,
    PulseWidth,
}

/// How the integrated sensor seeds its position at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SensorInitializationStrategy {
    BootToZero,
    BootToAbsolutePosition,
}

/// Velocity measurement sample period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VelocityMeasPeriod {
    Period1Ms,
    Period2Ms,
    Period5Ms,
    Period10Ms,
    Period20Ms,
    Period25Ms,
    Period50Ms,
    Period100Ms,
}

/// Rolling-average window sizes accepted by sensor-bearing controllers.
pub const VELOCITY_WINDOWS: [u8; 7] = [1, 2, 4, 8, 16, 32, 64];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VelocityMeasurement {
    pub period: VelocityMeasPeriod,
    pub rolling_average_window: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageCompensation {
    pub enabled: bool,
    pub nominal_voltage: f64,
}

impl VoltageCompensation {
    pub const DISABLED: Self = Self {
        enabled: false,
        nominal_voltage: 12.0,
    };

    pub const fn enabled(nominal_voltage: f64) -> Self {
        Self {
            enabled: true,
            nominal_voltage,
        }
    }
}

/// Forward/reverse soft limits in raw sensor ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoftLimits {
    pub forward: i32,
    pub reverse: i32,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedbackSensorSelection {
    pub sensor: FeedbackSensor,
    pub slot: u8,
    pub timeout_ms: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedbackContinuity {
    pub not_continuous: bool,
    pub timeout_ms: u16,
}
