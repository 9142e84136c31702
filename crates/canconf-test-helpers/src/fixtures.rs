//! Sample documents for file and CLI tests.

/// A manifest covering every family and every kind of entry.
pub const ROBOT_MANIFEST_YAML: &str = "\
schema_version: 1
devices:
  - id: 1
    family: integrated-sensor
    label: left-drive-leader
    preset: drive
  - id: 2
    family: integrated-sensor
    label: left-drive-follower
    preset: slave
  - id: 5
    family: brushless-smart
    label: shooter
  - id: 7
    family: external-sensor
    label: arm
    ramp_seconds: 0.25
";

/// A profile document overriding the drive preset.
pub const INTAKE_PROFILE_YAML: &str = "\
schema_version: 1
name: intake
base: drive
inverted: true
status_frames:
  status0: 20
";

/// A profile document that fails validation.
pub const INVALID_PROFILE_JSON: &str = r#"{"name":"bad","neutral_deadband":1.5}"#;
