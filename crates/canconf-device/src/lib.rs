//! Motor controller device layer
//!
//! This crate provides the Device Capability Interface the configuration core
//! drives, the value types its calls carry, the per-family capability table
//! and an in-memory simulated controller for tests and dry runs.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod capabilities;
pub mod capability;
pub mod ids;
pub mod sim;
pub mod state;
pub mod status;
pub mod types;

pub use capabilities::ProfileField;
pub use capability::{ControllerBackend, MotorController, Operation};
pub use ids::{DeviceId, MAX_DEVICE_ID};
pub use sim::{SimulatedBus, SimulatedController};
pub use state::DeviceState;
pub use status::StatusCode;
pub use types::*;
