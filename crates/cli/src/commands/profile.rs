//! Profile management commands

use std::borrow::Cow;
use std::path::Path;

use anyhow::Result;
use canconf_device::DeviceFamily;
use canconf_profile::{
    ConfigurationProfile, ProfileError, load_profile, presets, validate_for_family,
};
use tracing::debug;

use crate::commands::ProfileCommands;
use crate::error::CliError;
use crate::output;

/// Execute profile command
pub fn execute(cmd: &ProfileCommands, json: bool) -> Result<()> {
    match cmd {
        ProfileCommands::List => list_profiles(json),
        ProfileCommands::Show { profile } => show_profile(profile, json),
        ProfileCommands::Validate { path, family } => {
            validate_profile(path, family.as_deref(), json)
        }
    }
}

fn list_profiles(json: bool) -> Result<()> {
    output::print_profile_list(&presets::ALL, json)
}

fn show_profile(profile: &str, json: bool) -> Result<()> {
    let profile = resolve_profile(profile)?;
    output::print_profile(&profile, json)
}

/// A preset by name, or else a profile file by path.
fn resolve_profile(reference: &str) -> Result<Cow<'static, ConfigurationProfile>, CliError> {
    if let Some(preset) = presets::by_name(reference) {
        return Ok(Cow::Borrowed(preset));
    }

    let path = Path::new(reference);
    if !path.is_file() {
        return Err(CliError::ProfileNotFound(reference.to_string()));
    }
    debug!(path = %path.display(), "Loading profile file");
    Ok(Cow::Owned(load_profile(path)?))
}

fn validate_profile(path: &Path, family: Option<&str>, json: bool) -> Result<()> {
    if !path.is_file() {
        return Err(CliError::ProfileNotFound(path.display().to_string()).into());
    }
    let profile = load_profile(path).map_err(CliError::from)?;

    let Some(family) = family else {
        output::print_success(&format!("Profile '{}' is valid", profile.name), json);
        return Ok(());
    };

    let family = parse_family(family)?;
    validate_for_family(&profile, family)
        .map_err(|e| CliError::from(ProfileError::invalid(profile.name.to_string(), e)))?;

    let skipped = profile.unsupported_fields(family);
    if skipped.is_empty() {
        output::print_success(
            &format!("Profile '{}' is valid for {family}", profile.name),
            json,
        );
    } else {
        let names: Vec<&str> = skipped.iter().map(|field| field.name()).collect();
        output::print_warning(
            &format!(
                "Profile '{}' is valid for {family}; ignored settings: {}",
                profile.name,
                names.join(", ")
            ),
            json,
        );
    }
    Ok(())
}

pub(crate) fn parse_family(name: &str) -> Result<DeviceFamily, CliError> {
    DeviceFamily::from_name(name).ok_or_else(|| CliError::UnknownFamily(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_preset_by_name() -> Result<(), CliError> {
        let profile = resolve_profile("slave")?;
        assert_eq!(profile.name, "slave");
        assert!(matches!(profile, Cow::Borrowed(_)));
        Ok(())
    }

    #[test]
    fn test_resolve_missing_reference() {
        let result = resolve_profile("no-such-profile.yaml");
        assert!(matches!(result, Err(CliError::ProfileNotFound(_))));
    }

    #[test]
    fn test_parse_family() {
        assert!(matches!(
            parse_family("integrated-sensor"),
            Ok(DeviceFamily::IntegratedSensor)
        ));
        assert!(matches!(parse_family("victor"), Err(CliError::UnknownFamily(_))));
    }
}
