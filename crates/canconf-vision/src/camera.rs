//! Vision camera readings and settings.

use std::borrow::Cow;

use canconf_errors::ValidationError;
use tracing::debug;

use crate::table::NetworkTable;

/// Table the camera publishes into unless told otherwise.
pub const DEFAULT_TABLE: &str = "limelight";

/// Highest pipeline index the camera stores.
pub const MAX_PIPELINE: u8 = 9;

const HORIZONTAL_OFFSET: &str = "tx";
const VERTICAL_OFFSET: &str = "ty";
const TARGET_AREA: &str = "ta";
const TARGET_SKEW: &str = "ts";
const LATENCY: &str = "tl";
const TARGET_VALID: &str = "tv";
const LED_MODE: &str = "ledMode";
const CAMERA_MODE: &str = "camMode";
const PIPELINE: &str = "pipeline";

/// State of the camera's LED ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightMode {
    On,
    Off,
    Blink,
}

impl LightMode {
    pub const ALL: [LightMode; 3] = [LightMode::On, LightMode::Off, LightMode::Blink];

    /// Integer written to the `ledMode` entry.
    pub fn code(self) -> u8 {
        match self {
            LightMode::On => 0,
            LightMode::Off => 1,
            LightMode::Blink => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.code() == code)
    }
}

/// Whether the camera runs its vision pipeline or streams a plain driver view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMode {
    Vision,
    Driver,
}

impl CameraMode {
    pub const ALL: [CameraMode; 2] = [CameraMode::Vision, CameraMode::Driver];

    /// Integer written to the `camMode` entry.
    pub fn code(self) -> u8 {
        match self {
            CameraMode::Vision => 0,
            CameraMode::Driver => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.code() == code)
    }
}

/// One read of every target measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetReading {
    /// Horizontal offset from crosshair to target, degrees.
    pub horizontal_offset: f64,
    /// Vertical offset from crosshair to target, degrees.
    pub vertical_offset: f64,
    /// Share of the image the target covers, percent.
    pub area: f64,
    /// Target rotation, degrees.
    pub skew: f64,
    /// Pipeline latency, milliseconds.
    pub latency_ms: f64,
    pub has_target: bool,
}

/// A vision camera reached through a network table.
///
/// Measurements the camera has not published yet read as `0.0`.
#[derive(Debug, Clone)]
pub struct VisionCamera<T> {
    table: T,
    name: Cow<'static, str>,
}

impl<T: NetworkTable> VisionCamera<T> {
    /// Camera publishing into [`DEFAULT_TABLE`].
    pub fn new(table: T) -> Self {
        Self::with_table_name(table, DEFAULT_TABLE)
    }

    pub fn with_table_name(table: T, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            table,
            name: name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    fn number(&self, key: &str) -> f64 {
        self.table.get_number(&self.name, key).unwrap_or(0.0)
    }

    fn publish(&self, key: &str, value: u8) {
        debug!(table = %self.name, key, value, "Publishing vision setting");
        self.table.set_number(&self.name, key, f64::from(value));
    }

    fn code(&self, key: &str) -> Option<u8> {
        let value = self.table.get_number(&self.name, key)?;
        if value.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&value) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let code = value as u8;
        Some(code)
    }

    /// Horizontal offset from crosshair to target, -27 to 27 degrees.
    pub fn horizontal_offset(&self) -> f64 {
        self.number(HORIZONTAL_OFFSET)
    }

    /// Vertical offset from crosshair to target, -20.5 to 20.5 degrees.
    pub fn vertical_offset(&self) -> f64 {
        self.number(VERTICAL_OFFSET)
    }

    /// Share of the image the target covers, 0 to 100 percent.
    pub fn target_area(&self) -> f64 {
        self.number(TARGET_AREA)
    }

    /// Target rotation, -90 to 90 degrees.
    pub fn target_skew(&self) -> f64 {
        self.number(TARGET_SKEW)
    }

    pub fn latency_ms(&self) -> f64 {
        self.number(LATENCY)
    }

    pub fn has_target(&self) -> bool {
        self.number(TARGET_VALID) >= 1.0
    }

    pub fn reading(&self) -> TargetReading {
        TargetReading {
            horizontal_offset: self.horizontal_offset(),
            vertical_offset: self.vertical_offset(),
            area: self.target_area(),
            skew: self.target_skew(),
            latency_ms: self.latency_ms(),
            has_target: self.has_target(),
        }
    }

    pub fn set_light_mode(&self, mode: LightMode) {
        self.publish(LED_MODE, mode.code());
    }

    /// Light mode last published, if it holds a known code.
    pub fn light_mode(&self) -> Option<LightMode> {
        self.code(LED_MODE).and_then(LightMode::from_code)
    }

    pub fn set_camera_mode(&self, mode: CameraMode) {
        self.publish(CAMERA_MODE, mode.code());
    }

    pub fn camera_mode(&self) -> Option<CameraMode> {
        self.code(CAMERA_MODE).and_then(CameraMode::from_code)
    }

    /// Select pipeline `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when `index` exceeds
    /// [`MAX_PIPELINE`]. Nothing is published in that case.
    pub fn set_pipeline(&self, index: u8) -> Result<(), ValidationError> {
        if index > MAX_PIPELINE {
            return Err(ValidationError::out_of_range(
                PIPELINE,
                index,
                0,
                MAX_PIPELINE,
            ));
        }
        self.publish(PIPELINE, index);
        Ok(())
    }

    pub fn pipeline(&self) -> Option<u8> {
        self.code(PIPELINE).filter(|index| *index <= MAX_PIPELINE)
    }
}
