//! Profile files.
//!
//! A profile file is JSON or YAML, chosen by extension. It may name a preset
//! in `base`; the remaining keys then override that preset's values:
//!
//! ```yaml
//! schema_version: 1
//! name: intake
//! base: drive
//! inverted: true
//! status_frames:
//!   status0: 20
//! ```
//!
//! Without `base` the file describes a profile from scratch. Saved profiles
//! use the same keys, so a saved file loads back unchanged.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use canconf_device::{
    FeedbackContinuity, FeedbackSensorSelection, IdleMode, SensorInitializationStrategy,
    SoftLimits, StatusFramePeriods, VelocityMeasurement, VoltageCompensation,
};
use canconf_errors::ProfileError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::ConfigurationProfile;
use crate::validation::validate_profile;
use crate::{ProfileResult, migrate_profile, presets};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// # Errors
    ///
    /// Returns [`ProfileError::UnsupportedFormat`] for extensions other than
    /// `.json`, `.yaml` and `.yml`.
    pub fn from_path(path: &Path) -> ProfileResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(FileFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(FileFormat::Yaml)
            }
            _ => Err(ProfileError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    pub(crate) fn parse<T: for<'de> Deserialize<'de>>(
        self,
        content: &str,
        source: &str,
    ) -> ProfileResult<T> {
        match self {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ProfileError::invalid_format(source, e.to_string())),
            FileFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ProfileError::invalid_format(source, e.to_string())),
        }
    }

    fn render<T: Serialize>(self, value: &T, profile: &str) -> ProfileResult<String> {
        let rendered = match self {
            FileFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
            FileFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        };
        rendered.map_err(|reason| ProfileError::SaveFailed {
            profile: profile.to_string(),
            reason,
        })
    }
}

/// On-disk profile document before preset resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileDocument {
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub name: Option<String>,
    /// Preset the document overrides.
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub factory_reset: Option<bool>,
    #[serde(default)]
    pub sensor_phase: Option<bool>,
    #[serde(default)]
    pub feedback_sensor: Option<FeedbackSensorSelection>,
    #[serde(default)]
    pub feedback_continuity: Option<FeedbackContinuity>,
    #[serde(default)]
    pub open_loop_ramp: Option<f64>,
    #[serde(default)]
    pub closed_loop_ramp: Option<f64>,
    #[serde(default)]
    pub sensor_initialization: Option<SensorInitializationStrategy>,
    #[serde(default)]
    pub idle_mode: Option<IdleMode>,
    #[serde(default)]
    pub inverted: Option<bool>,
    #[serde(default)]
    pub neutral_deadband: Option<f64>,
    #[serde(default)]
    pub status_frames: Option<StatusFramePeriods>,
    #[serde(default)]
    pub velocity_measurement: Option<VelocityMeasurement>,
    #[serde(default)]
    pub soft_limits: Option<SoftLimits>,
    #[serde(default)]
    pub current_limit_enabled: Option<bool>,
    #[serde(default)]
    pub limit_switches_enabled: Option<bool>,
    #[serde(default)]
    pub voltage_compensation: Option<VoltageCompensation>,
}

fn pick<T>(over: Option<T>, base: Option<T>) -> Option<T> {
    over.or(base)
}

impl ProfileDocument {
    /// Resolve the document into a validated profile.
    ///
    /// `fallback_name` names the profile when the document does not.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::UnknownPreset`] for an unknown `base`,
    /// [`ProfileError::UnsupportedVersion`] for documents from a newer
    /// release, and [`ProfileError::Invalid`] when the result fails
    /// validation.
    pub fn resolve(mut self, fallback_name: &str) -> ProfileResult<ConfigurationProfile> {
        migrate_profile(&mut self)?;

        let base = match self.base.as_deref() {
            Some(name) => presets::by_name(name)
                .cloned()
                .ok_or_else(|| ProfileError::unknown_preset(name))?,
            None => ConfigurationProfile::empty(""),
        };

        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string());

        let mut status_frames = base.status_frames;
        if let Some(overrides) = self.status_frames {
            for (kind, period) in overrides.iter() {
                status_frames.set(kind, period);
            }
        }

        let profile = ConfigurationProfile {
            name: Cow::Owned(name),
            schema_version: self.schema_version,
            factory_reset: self.factory_reset.unwrap_or(base.factory_reset),
            sensor_phase: pick(self.sensor_phase, base.sensor_phase),
            feedback_sensor: pick(self.feedback_sensor, base.feedback_sensor),
            feedback_continuity: pick(self.feedback_continuity, base.feedback_continuity),
            open_loop_ramp: pick(self.open_loop_ramp, base.open_loop_ramp),
            closed_loop_ramp: pick(self.closed_loop_ramp, base.closed_loop_ramp),
            sensor_initialization: pick(self.sensor_initialization, base.sensor_initialization),
            idle_mode: pick(self.idle_mode, base.idle_mode),
            inverted: pick(self.inverted, base.inverted),
            neutral_deadband: pick(self.neutral_deadband, base.neutral_deadband),
            status_frames,
            velocity_measurement: pick(self.velocity_measurement, base.velocity_measurement),
            soft_limits: pick(self.soft_limits, base.soft_limits),
            current_limit_enabled: pick(self.current_limit_enabled, base.current_limit_enabled),
            limit_switches_enabled: pick(
                self.limit_switches_enabled,
                base.limit_switches_enabled,
            ),
            voltage_compensation: pick(self.voltage_compensation, base.voltage_compensation),
        };

        validate_profile(&profile).map_err(|e| ProfileError::invalid(profile.name.to_string(), e))?;
        Ok(profile)
    }
}

/// Parse profile text in the given format.
///
/// # Errors
///
/// See [`ProfileDocument::resolve`]; malformed text yields
/// [`ProfileError::InvalidFormat`] naming `source`.
pub fn parse_profile(
    content: &str,
    format: FileFormat,
    source: &str,
    fallback_name: &str,
) -> ProfileResult<ConfigurationProfile> {
    let document: ProfileDocument = format.parse(content, source)?;
    document.resolve(fallback_name)
}

/// Load a profile file. The file stem names the profile if the file does not.
///
/// # Errors
///
/// Returns [`ProfileError::LoadFailed`] if the file cannot be read, plus any
/// error from [`parse_profile`].
pub fn load_profile(path: &Path) -> ProfileResult<ConfigurationProfile> {
    let format = FileFormat::from_path(path)?;
    let source = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| ProfileError::load_failed(&source, e.to_string()))?;
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("profile");

    let profile = parse_profile(&content, format, &source, stem)?;
    debug!(path = %source, profile = %profile.name, "loaded profile");
    Ok(profile)
}

/// Render a profile in the given format.
///
/// # Errors
///
/// Returns [`ProfileError::SaveFailed`] if serialization fails.
pub fn render_profile(profile: &ConfigurationProfile, format: FileFormat) -> ProfileResult<String> {
    format.render(profile, &profile.name)
}

/// Write a profile to `path` in the format its extension names.
///
/// # Errors
///
/// Returns [`ProfileError::UnsupportedFormat`] for unknown extensions and
/// [`ProfileError::SaveFailed`] if the file cannot be written.
pub fn save_profile(profile: &ConfigurationProfile, path: &Path) -> ProfileResult<()> {
    let format = FileFormat::from_path(path)?;
    let rendered = render_profile(profile, format)?;
    fs::write(path, rendered).map_err(|e| ProfileError::SaveFailed {
        profile: profile.name.to_string(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), profile = %profile.name, "saved profile");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canconf_device::FrameKind;

    #[test]
    fn test_format_from_extension() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(FileFormat::from_path(Path::new("a.json"))?, FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("a.YML"))?, FileFormat::Yaml);
        assert!(FileFormat::from_path(Path::new("a.toml")).is_err());
        assert!(FileFormat::from_path(Path::new("noext")).is_err());
        Ok(())
    }

    #[test]
    fn test_override_on_preset() -> Result<(), Box<dyn std::error::Error>> {
        let yaml = "schema_version: 1\nname: intake\nbase: drive\ninverted: true\nstatus_frames:\n  status0: 20\n";
        let profile = parse_profile(yaml, FileFormat::Yaml, "inline", "fallback")?;

        assert_eq!(profile.name, "intake");
        assert_eq!(profile.inverted, Some(true));
        assert_eq!(profile.idle_mode, Some(IdleMode::Brake));
        assert_eq!(profile.status_frames.get(FrameKind::Status0), Some(20));
        assert_eq!(profile.status_frames.get(FrameKind::Status1), Some(1000));
        assert_eq!(presets::DRIVE.status_frames.get(FrameKind::Status0), Some(10));
        Ok(())
    }

    #[test]
    fn test_unknown_base_rejected() {
        let result = parse_profile(r#"{"base":"turbo"}"#, FileFormat::Json, "inline", "x");
        assert!(matches!(result, Err(ProfileError::UnknownPreset(name)) if name == "turbo"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = parse_profile(r#"{"invertd":true}"#, FileFormat::Json, "inline", "x");
        assert!(matches!(result, Err(ProfileError::InvalidFormat { .. })));
    }

    #[test]
    fn test_future_version_rejected() {
        let result = parse_profile(r#"{"schema_version":99}"#, FileFormat::Json, "inline", "x");
        assert!(matches!(
            result,
            Err(ProfileError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_invalid_values_rejected_after_merge() {
        let result = parse_profile(
            r#"{"base":"default","neutral_deadband":1.5}"#,
            FileFormat::Json,
            "inline",
            "x",
        );
        assert!(matches!(result, Err(ProfileError::Invalid { .. })));
    }

    #[test]
    fn test_fallback_name_used() -> Result<(), Box<dyn std::error::Error>> {
        let profile = parse_profile("inverted: false\n", FileFormat::Yaml, "inline", "shooter")?;
        assert_eq!(profile.name, "shooter");
        assert_eq!(profile.schema_version, crate::CURRENT_SCHEMA_VERSION);
        Ok(())
    }
}
