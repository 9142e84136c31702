//! CAN bus addressing.

use canconf_errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest device number a controller can be assigned on one CAN segment.
pub const MAX_DEVICE_ID: u8 = 62;

/// Bus address of one motor controller. Unique per CAN segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DeviceId(u8);

impl DeviceId {
    /// Create a bus address, rejecting ids above [`MAX_DEVICE_ID`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when `id > 62`.
    pub fn new(id: u8) -> Result<Self, ValidationError> {
        if id > MAX_DEVICE_ID {
            return Err(ValidationError::out_of_range("can id", id, 0, MAX_DEVICE_ID));
        }
        Ok(Self(id))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DeviceId {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for u8 {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
