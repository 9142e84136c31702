//! Configuration profiles for CAN motor controllers
//!
//! This crate provides the [`ConfigurationProfile`] value type, the built-in
//! presets, validation, profile files and robot manifests.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod file;
pub mod manifest;
pub mod presets;
pub mod types;
pub mod validation;

pub use file::{
    FileFormat, ProfileDocument, load_profile, parse_profile, render_profile, save_profile,
};
pub use manifest::{DeviceEntry, DeviceSetup, ResolvedDevice, RobotManifest, load_manifest};
pub use types::ConfigurationProfile;
pub use validation::{validate_for_family, validate_profile};

pub use canconf_errors::ProfileError;

/// Current profile and manifest schema version.
/// Increment this when the document structure changes incompatibly.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

pub type ProfileResult<T> = Result<T, ProfileError>;

/// Migrate a profile document to the current schema version.
///
/// Returns `Ok(true)` if migration was performed, `Ok(false)` if the document
/// was already at the current version.
///
/// # Errors
///
/// Returns [`ProfileError::UnsupportedVersion`] if `document.schema_version`
/// is greater than [`CURRENT_SCHEMA_VERSION`].
pub fn migrate_profile(document: &mut ProfileDocument) -> ProfileResult<bool> {
    if document.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(ProfileError::UnsupportedVersion {
            found: document.schema_version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    if document.schema_version == CURRENT_SCHEMA_VERSION {
        return Ok(false);
    }

    // v0 documents predate the version field and share the v1 layout.
    document.schema_version = CURRENT_SCHEMA_VERSION;
    Ok(true)
}
