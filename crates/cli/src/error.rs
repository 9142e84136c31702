//! Error types and exit codes for canconfctl

use canconf_errors::ProfileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Unknown controller family: {0} (expected brushless-smart, integrated-sensor or external-sensor)")]
    UnknownFamily(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Invalid fault {0}")]
    InvalidFault(String),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("{failures} capability call(s) failed on {devices} device(s)")]
    ConfigurationFailed { devices: usize, failures: usize },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::UnknownFamily(_) | CliError::InvalidFault(_) => 2,
            CliError::ProfileNotFound(_) => 3,
            CliError::Profile(err) if err.is_storage_error() => 3,
            CliError::Profile(ProfileError::UnknownPreset(_)) => 3,
            CliError::Profile(_) => 4,
            CliError::ConfigurationFailed { .. } => 5,
            CliError::JsonError(_) => 1,
        }
    }
}

/// Exit code for a failed command.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<CliError>() {
        Some(err) => err.exit_code(),
        None => match error.downcast_ref::<ProfileError>() {
            Some(err) => CliError::Profile(err.clone()).exit_code(),
            None => 1,
        },
    }
}

/// Whether the command output already describes this failure.
pub fn already_reported(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<CliError>(),
        Some(CliError::ConfigurationFailed { .. })
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::UnknownFamily("x".into()).exit_code(), 2);
        assert_eq!(CliError::ProfileNotFound("x".into()).exit_code(), 3);
        assert_eq!(
            CliError::Profile(ProfileError::unknown_preset("turbo")).exit_code(),
            3
        );
        assert_eq!(
            CliError::Profile(ProfileError::UnsupportedVersion {
                found: 4,
                supported: 1
            })
            .exit_code(),
            4
        );
        assert_eq!(
            CliError::ConfigurationFailed {
                devices: 1,
                failures: 2
            }
            .exit_code(),
            5
        );
    }

    #[test]
    fn test_exit_code_through_anyhow() {
        let err = anyhow::Error::from(ProfileError::unknown_preset("turbo"));
        assert_eq!(exit_code(&err), 3);
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code(&err), 1);
    }
}
