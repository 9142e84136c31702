//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use canconf_test_helpers::prelude::*;
//! ```

pub use crate::must::{device_id, must, must_some, must_with};

#[cfg(feature = "faults")]
pub use crate::faults::FaultScript;

#[cfg(feature = "strategies")]
pub use crate::strategies::{failure_status, family, family_and_profile, profile_for};

#[cfg(feature = "fixtures")]
pub use crate::fixtures::{INTAKE_PROFILE_YAML, INVALID_PROFILE_JSON, ROBOT_MANIFEST_YAML};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
