//! Snapshot tests for rendered profile files and operator-visible errors.

use canconf_device::{FrameKind, IdleMode};
use canconf_profile::{ConfigurationProfile, FileFormat, parse_profile, render_profile};

fn arm() -> ConfigurationProfile {
    ConfigurationProfile::empty("arm")
        .with_idle_mode(IdleMode::Brake)
        .with_inverted(true)
        .with_frame_period(FrameKind::Status0, 20)
}

#[test]
fn snapshot_profile_json() -> Result<(), Box<dyn std::error::Error>> {
    let rendered = render_profile(&arm(), FileFormat::Json)?;
    insta::assert_snapshot!(rendered, @r#"
    {
      "name": "arm",
      "schema_version": 1,
      "factory_reset": false,
      "idle_mode": "brake",
      "inverted": true,
      "status_frames": {
        "status0": 20
      }
    }
    "#);
    Ok(())
}

#[test]
fn snapshot_profile_yaml() -> Result<(), Box<dyn std::error::Error>> {
    let rendered = render_profile(&arm(), FileFormat::Yaml)?;
    insta::assert_snapshot!(rendered, @r"
    name: arm
    schema_version: 1
    factory_reset: false
    idle_mode: brake
    inverted: true
    status_frames:
      status0: 20
    ");
    Ok(())
}

#[test]
fn snapshot_unknown_base_message() {
    let err = parse_profile("base: turbo\n", FileFormat::Yaml, "arm.yaml", "arm")
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default();
    insta::assert_snapshot!(err, @"Unknown preset: turbo");
}

#[test]
fn snapshot_invalid_deadband_message() {
    let err = parse_profile("neutral_deadband: 2.0\n", FileFormat::Yaml, "arm.yaml", "arm")
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default();
    insta::assert_snapshot!(err, @"Profile 'arm' is invalid: neutral_deadband value 2.0 is out of range [0.0, 1.0]");
}
