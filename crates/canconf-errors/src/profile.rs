//! Profile and manifest error types.
//!
//! These cover loading, parsing and validating profile and robot manifest
//! files. They belong to the tooling around the configuration core.

use crate::severity::ErrorSeverity;
use crate::validation::ValidationError;

/// Profile and manifest errors.
///
/// # Examples
///
/// ```
/// use canconf_errors::{ProfileError, ErrorSeverity};
///
/// let err = ProfileError::unknown_preset("turbo");
/// assert_eq!(err.severity(), ErrorSeverity::Error);
///
/// let err = ProfileError::UnsupportedVersion { found: 9, supported: 1 };
/// assert!(err.to_string().contains('9'));
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileError {
    /// No preset with this name
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// File extension does not map to a known format
    #[error("Unsupported profile format for {path}: expected .json, .yaml or .yml")]
    UnsupportedFormat {
        /// File path
        path: String,
    },

    /// Invalid profile format
    #[error("Invalid profile format in {path}: {reason}")]
    InvalidFormat {
        /// File path or profile source
        path: String,
        /// Reason for the format error
        reason: String,
    },

    /// Profile load failed
    #[error("Failed to load profile from {path}: {reason}")]
    LoadFailed {
        /// File path or source
        path: String,
        /// Failure reason
        reason: String,
    },

    /// Profile save failed
    #[error("Failed to save profile {profile}: {reason}")]
    SaveFailed {
        /// Profile identifier
        profile: String,
        /// Failure reason
        reason: String,
    },

    /// Schema version newer than this build understands
    #[error("Unsupported schema version {found}: maximum supported is {supported}")]
    UnsupportedVersion {
        /// Version found in the file
        found: u32,
        /// Highest version this build can read
        supported: u32,
    },

    /// Profile validation failed
    #[error("Profile '{profile}' is invalid: {source}")]
    Invalid {
        /// Profile identifier
        profile: String,
        /// Underlying validation failure
        #[source]
        source: ValidationError,
    },

    /// Two manifest entries share a bus address
    #[error("Duplicate bus address {0} in manifest")]
    DuplicateDevice(u8),
}

impl ProfileError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProfileError::UnknownPreset(_) => ErrorSeverity::Error,
            ProfileError::UnsupportedFormat { .. } => ErrorSeverity::Error,
            ProfileError::InvalidFormat { .. } => ErrorSeverity::Error,
            ProfileError::LoadFailed { .. } => ErrorSeverity::Error,
            ProfileError::SaveFailed { .. } => ErrorSeverity::Warning,
            ProfileError::UnsupportedVersion { .. } => ErrorSeverity::Error,
            ProfileError::Invalid { .. } => ErrorSeverity::Error,
            ProfileError::DuplicateDevice(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error is related to file storage.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            ProfileError::SaveFailed { .. } | ProfileError::LoadFailed { .. }
        )
    }

    /// Create an unknown preset error.
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        ProfileError::UnknownPreset(name.into())
    }

    /// Create an invalid format error.
    pub fn invalid_format(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ProfileError::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a load failure error.
    pub fn load_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ProfileError::LoadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a validation failure for the named profile.
    pub fn invalid(profile: impl Into<String>, source: ValidationError) -> Self {
        ProfileError::Invalid {
            profile: profile.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_error_severity() {
        assert_eq!(
            ProfileError::unknown_preset("x").severity(),
            ErrorSeverity::Error
        );
        assert_eq!(
            ProfileError::SaveFailed {
                profile: "drive".into(),
                reason: "read-only".into()
            }
            .severity(),
            ErrorSeverity::Warning
        );
    }

    #[test]
    fn test_profile_error_is_storage_error() {
        assert!(ProfileError::load_failed("a.yaml", "missing").is_storage_error());
        assert!(!ProfileError::unknown_preset("x").is_storage_error());
    }

    #[test]
    fn test_invalid_keeps_source() {
        use std::error::Error as _;

        let err = ProfileError::invalid("drive", ValidationError::required("name"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("drive"));
    }
}
