//! Centralized error types for CAN motor controller configuration.
//!
//! The configuration core has exactly one failure kind: a capability call on a
//! device returned a non-OK status ([`DeviceConfigError`]). Those failures are
//! reported, never propagated. The remaining types cover the layers around the
//! core: profile files, manifests and input validation.
//!
//! - [`device`]: Device configuration failures
//! - [`profile`]: Profile and manifest file errors
//! - [`validation`]: Input validation errors
//! - [`severity`]: Severity levels used when reporting
//!
//! # Example
//!
//! ```
//! use canconf_errors::ValidationError;
//!
//! fn check_deadband(value: f64) -> Result<f64, ValidationError> {
//!     if !(0.0..1.0).contains(&value) {
//!         return Err(ValidationError::out_of_range("neutral_deadband", value, 0.0, 1.0));
//!     }
//!     Ok(value)
//! }
//!
//! assert!(check_deadband(0.04).is_ok());
//! assert!(check_deadband(1.5).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod device;
pub mod profile;
pub mod severity;
pub mod validation;

pub use device::DeviceConfigError;
pub use profile::ProfileError;
pub use severity::ErrorSeverity;
pub use validation::ValidationError;
