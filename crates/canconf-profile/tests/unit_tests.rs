//! File and manifest tests against a real filesystem.

use std::fs;

use canconf_device::{FrameKind, IdleMode};
use canconf_profile::{
    ConfigurationProfile, DeviceSetup, ProfileError, load_manifest, load_profile, presets,
    save_profile,
};
use tempfile::TempDir;

#[test]
fn test_save_then_load_yaml_and_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let profile = presets::HIGH_PERFORMANCE
        .clone()
        .named("turret")
        .with_inverted(true);

    for file in ["turret.yaml", "turret.json"] {
        let path = dir.path().join(file);
        save_profile(&profile, &path)?;
        let loaded = load_profile(&path)?;
        assert_eq!(loaded, profile, "{file} did not load back unchanged");
    }
    Ok(())
}

#[test]
fn test_unnamed_file_takes_stem() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("climber.yml");
    fs::write(&path, "base: slave\nidle_mode: brake\n")?;

    let profile = load_profile(&path)?;
    assert_eq!(profile.name, "climber");
    assert_eq!(profile.idle_mode, Some(IdleMode::Brake));
    assert_eq!(profile.status_frames.get(FrameKind::Status0), Some(1000));
    Ok(())
}

#[test]
fn test_missing_file_is_load_failure() {
    let result = load_profile(std::path::Path::new("/nonexistent/drive.yaml"));
    assert!(matches!(result, Err(ref e) if e.is_storage_error()));
}

#[test]
fn test_unsupported_extension() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("drive.toml");
    fs::write(&path, "")?;
    assert!(matches!(
        load_profile(&path),
        Err(ProfileError::UnsupportedFormat { .. })
    ));
    Ok(())
}

#[test]
fn test_manifest_loads_profile_relative_to_itself() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::create_dir(dir.path().join("profiles"))?;
    fs::write(
        dir.path().join("profiles/shooter.yaml"),
        "base: high-performance\ninverted: true\n",
    )?;
    let manifest_path = dir.path().join("robot.yaml");
    fs::write(
        &manifest_path,
        "schema_version: 1\ndevices:\n  - id: 9\n    family: brushless-smart\n    profile: profiles/shooter.yaml\n  - id: 1\n    family: integrated-sensor\n    preset: drive\n",
    )?;

    let manifest = load_manifest(&manifest_path)?;
    let resolved = manifest.resolve(dir.path())?;
    assert_eq!(resolved.len(), 2);

    let Some(DeviceSetup::Profile(shooter)) = resolved.first().map(|d| &d.setup) else {
        return Err("expected a profile for the shooter".into());
    };
    assert_eq!(shooter.name, "shooter");
    assert_eq!(shooter.inverted, Some(true));
    assert_eq!(shooter.neutral_deadband, Some(0.02));
    Ok(())
}

#[test]
fn test_manifest_rejects_future_version() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("robot.json");
    fs::write(&path, r#"{"schema_version": 7, "devices": []}"#)?;
    assert!(matches!(
        load_manifest(&path),
        Err(ProfileError::UnsupportedVersion { found: 7, supported: 1 })
    ));
    Ok(())
}

#[test]
fn test_presets_are_distinct_values() {
    let all: Vec<&ConfigurationProfile> = presets::ALL.to_vec();
    for (i, a) in all.iter().enumerate() {
        for b in all.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}
