//! Status codes returned by capability calls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a single capability call, drawn from a small closed set.
///
/// Numeric codes follow the vendor convention of `0` for success and negative
/// values for failures.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusCode {
    #[default]
    Ok,
    GeneralError,
    CanTimeout,
    CanMessageStale,
    InvalidParameter,
    SensorNotPresent,
    FirmwareTooOld,
    TxFailed,
}

impl StatusCode {
    pub const ALL: [StatusCode; 8] = [
        StatusCode::Ok,
        StatusCode::GeneralError,
        StatusCode::CanTimeout,
        StatusCode::CanMessageStale,
        StatusCode::InvalidParameter,
        StatusCode::SensorNotPresent,
        StatusCode::FirmwareTooOld,
        StatusCode::TxFailed,
    ];

    pub fn is_ok(self) -> bool {
        matches!(self, StatusCode::Ok)
    }

    pub fn code(self) -> i16 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::GeneralError => -1,
            StatusCode::CanTimeout => -2,
            StatusCode::CanMessageStale => -3,
            StatusCode::InvalidParameter => -4,
            StatusCode::SensorNotPresent => -5,
            StatusCode::FirmwareTooOld => -6,
            StatusCode::TxFailed => -7,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::GeneralError => "general error",
            StatusCode::CanTimeout => "CAN timeout",
            StatusCode::CanMessageStale => "CAN message stale",
            StatusCode::InvalidParameter => "invalid parameter",
            StatusCode::SensorNotPresent => "sensor not present",
            StatusCode::FirmwareTooOld => "firmware too old",
            StatusCode::TxFailed => "transmit failed",
        }
    }

    /// Parse the kebab-case name used in manifests and on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ok" => Some(StatusCode::Ok),
            "general-error" => Some(StatusCode::GeneralError),
            "can-timeout" => Some(StatusCode::CanTimeout),
            "can-message-stale" => Some(StatusCode::CanMessageStale),
            "invalid-parameter" => Some(StatusCode::InvalidParameter),
            "sensor-not-present" => Some(StatusCode::SensorNotPresent),
            "firmware-too-old" => Some(StatusCode::FirmwareTooOld),
            "tx-failed" => Some(StatusCode::TxFailed),
            _ => None,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
