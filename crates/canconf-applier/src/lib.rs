//! Profile application for CAN motor controllers
//!
//! This crate provides the configuration core:
//!
//! - [`ConfigurationApplier`] issues a profile's capability calls in the
//!   device family's order and keeps going when a call fails
//! - [`ErrorReporter`] turns failed calls into diagnostics on a
//!   [`DiagnosticSink`]
//! - [`ControllerFactory`] opens controllers through a backend and returns
//!   configured [`DeviceHandle`]s
//!
//! # Example
//!
//! ```
//! use canconf_applier::{ConfigurationApplier, ControllerFactory};
//! use canconf_device::{DeviceFamily, DeviceId, SimulatedBus};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut factory = ControllerFactory::new(SimulatedBus::new(), ConfigurationApplier::default());
//! let handle = factory.create_default(DeviceId::new(5)?, DeviceFamily::BrushlessSmart);
//! assert_eq!(handle.last_profile(), Some("default"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod applier;
pub mod factory;
pub mod handle;
pub mod reporter;
pub mod sink;

pub use applier::{ApplyResult, ConfigurationApplier};
pub use factory::ControllerFactory;
pub use handle::DeviceHandle;
pub use reporter::ErrorReporter;
pub use sink::{DiagnosticSink, MemorySink, TracingSink};
