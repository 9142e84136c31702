//! Vision camera peer interface.
//!
//! A vision camera publishes target measurements into a key-value network
//! table and reads its LED, camera and pipeline settings from the same table.
//! [`VisionCamera`] wraps that exchange. The table itself is injected through
//! the [`NetworkTable`] trait, so one camera is built during robot wiring and
//! handed to whatever needs it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use canconf_vision::{InMemoryTable, LightMode, NetworkTable, VisionCamera};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = Arc::new(InMemoryTable::new());
//! let camera = VisionCamera::new(table.clone());
//!
//! table.set_number("limelight", "tx", -4.5);
//! assert_eq!(camera.horizontal_offset(), -4.5);
//! assert_eq!(camera.vertical_offset(), 0.0);
//!
//! camera.set_light_mode(LightMode::Blink);
//! camera.set_pipeline(3)?;
//! assert_eq!(table.get_number("limelight", "ledMode"), Some(2.0));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod camera;
pub mod table;

pub use camera::{
    CameraMode, DEFAULT_TABLE, LightMode, MAX_PIPELINE, TargetReading, VisionCamera,
};
pub use table::{InMemoryTable, NetworkTable};
