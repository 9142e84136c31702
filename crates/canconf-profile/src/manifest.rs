//! Robot manifests: which controller sits at which bus address, and how to
//! configure it.
//!
//! ```yaml
//! devices:
//!   - id: 1
//!     family: integrated-sensor
//!     preset: drive
//!   - id: 2
//!     family: integrated-sensor
//!     preset: slave
//!   - id: 7
//!     family: external-sensor
//!     ramp_seconds: 0.25
//!   - id: 9
//!     family: brushless-smart
//!     profile: profiles/shooter.yaml
//! ```
//!
//! An entry names a preset or a profile file, not both. A `ramp_seconds`
//! alone selects the sensored bootstrap; next to a preset or profile it
//! overrides both ramps. An entry with neither uses the default preset.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use canconf_device::{DeviceFamily, DeviceId};
use canconf_errors::{ProfileError, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::file::{FileFormat, load_profile};
use crate::types::ConfigurationProfile;
use crate::{CURRENT_SCHEMA_VERSION, ProfileResult, presets};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceEntry {
    pub id: DeviceId,
    pub family: DeviceFamily,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Profile file, relative to the manifest's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ramp_seconds: Option<f64>,
}

impl DeviceEntry {
    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.family.name(), self.id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobotManifest {
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
}

/// How one manifest entry is to be configured.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceSetup {
    Profile(ConfigurationProfile),
    Sensored { ramp_seconds: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDevice {
    pub id: DeviceId,
    pub family: DeviceFamily,
    pub label: String,
    pub setup: DeviceSetup,
}

fn check_ramp(label: &str, seconds: f64) -> ProfileResult<()> {
    if !seconds.is_finite() {
        return Err(ProfileError::invalid(label, ValidationError::not_finite("ramp_seconds")));
    }
    if seconds < 0.0 {
        return Err(ProfileError::invalid(
            label,
            ValidationError::out_of_range("ramp_seconds", seconds, 0.0, f64::INFINITY),
        ));
    }
    Ok(())
}

impl RobotManifest {
    /// Structural checks: schema version, unique bus addresses, one profile
    /// source per entry.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::UnsupportedVersion`],
    /// [`ProfileError::DuplicateDevice`] or [`ProfileError::Invalid`].
    pub fn validate(&self) -> ProfileResult<()> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(ProfileError::UnsupportedVersion {
                found: self.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }

        let mut seen = BTreeSet::new();
        for entry in &self.devices {
            if !seen.insert(entry.id) {
                return Err(ProfileError::DuplicateDevice(entry.id.get()));
            }
            if entry.preset.is_some() && entry.profile.is_some() {
                return Err(ProfileError::invalid(
                    entry.label(),
                    ValidationError::constraint("set either preset or profile, not both"),
                ));
            }
            if let Some(seconds) = entry.ramp_seconds {
                check_ramp(&entry.label(), seconds)?;
            }
        }
        Ok(())
    }

    /// Resolve every entry into a concrete setup, loading profile files
    /// relative to `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns the first validation, lookup or load failure.
    pub fn resolve(&self, base_dir: &Path) -> ProfileResult<Vec<ResolvedDevice>> {
        self.validate()?;

        self.devices
            .iter()
            .map(|entry| -> ProfileResult<ResolvedDevice> {
                let label = entry.label();
                let profile = match (&entry.preset, &entry.profile) {
                    (Some(name), _) => Some(
                        presets::by_name(name)
                            .cloned()
                            .ok_or_else(|| ProfileError::unknown_preset(name))?,
                    ),
                    (None, Some(path)) => Some(load_profile(&base_dir.join(path))?),
                    (None, None) => None,
                };

                let setup = match (profile, entry.ramp_seconds) {
                    (Some(profile), Some(ramp)) => {
                        let name = format!("{}+ramp", profile.name);
                        DeviceSetup::Profile(profile.with_ramps(ramp, ramp).named(name))
                    }
                    (Some(profile), None) => DeviceSetup::Profile(profile),
                    (None, Some(ramp_seconds)) => DeviceSetup::Sensored { ramp_seconds },
                    (None, None) => DeviceSetup::Profile(ConfigurationProfile::DEFAULT),
                };

                debug!(
                    device_id = %entry.id,
                    family = %entry.family,
                    label = %label,
                    "resolved manifest entry"
                );
                Ok(ResolvedDevice {
                    id: entry.id,
                    family: entry.family,
                    label,
                    setup,
                })
            })
            .collect()
    }
}

/// Load and validate a manifest file.
///
/// # Errors
///
/// Returns [`ProfileError::LoadFailed`] if the file cannot be read,
/// [`ProfileError::InvalidFormat`] if it does not parse, and any error from
/// [`RobotManifest::validate`].
pub fn load_manifest(path: &Path) -> ProfileResult<RobotManifest> {
    let format = FileFormat::from_path(path)?;
    let source = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| ProfileError::load_failed(&source, e.to_string()))?;
    let manifest: RobotManifest = format.parse(&content, &source)?;
    manifest.validate()?;
    debug!(path = %source, devices = manifest.devices.len(), "loaded manifest");
    Ok(manifest)
}
