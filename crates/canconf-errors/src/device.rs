//! Device configuration failures.
//!
//! A [`DeviceConfigError`] describes one capability call that returned a
//! non-OK status. The configuration core builds these only to hand them to an
//! error reporter; they never abort a configuration sequence.

use crate::severity::ErrorSeverity;

/// A capability call on a motor controller returned a non-OK status.
///
/// # Examples
///
/// ```
/// use canconf_errors::{DeviceConfigError, ErrorSeverity};
///
/// let err = DeviceConfigError::new(5, "brushless smart controller", "set status0 rate", "CAN timeout", -2);
/// assert_eq!(err.severity(), ErrorSeverity::Error);
/// assert_eq!(
///     err.to_string(),
///     "Could not configure brushless smart controller id: 5 error: CAN timeout set status0 rate"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Could not configure {family} id: {device_id} error: {status} {operation}")]
pub struct DeviceConfigError {
    /// CAN bus address of the device
    pub device_id: u8,
    /// Human-readable device family name
    pub family: &'static str,
    /// Name of the capability call that failed
    pub operation: &'static str,
    /// Human-readable status returned by the device
    pub status: &'static str,
    /// Raw numeric status code
    pub code: i16,
}

impl DeviceConfigError {
    /// Create a device configuration error.
    pub fn new(
        device_id: u8,
        family: &'static str,
        operation: &'static str,
        status: &'static str,
        code: i16,
    ) -> Self {
        Self {
            device_id,
            family,
            operation,
            status,
            code,
        }
    }

    /// Get the error severity. Configuration failures are never `Critical`.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}
