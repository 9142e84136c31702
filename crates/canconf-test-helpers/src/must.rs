//! Unwrap helpers with good error messages.
//!
//! These helpers replace `unwrap()` and `expect()` in test code, providing
//! better error messages with `#[track_caller]` for accurate panic locations.

use std::fmt::Debug;

use canconf_device::DeviceId;

/// Unwrap a `Result`, panicking with context on error.
///
/// # Example
///
/// ```rust
/// use canconf_test_helpers::must;
/// use canconf_device::DeviceId;
///
/// let id = must(DeviceId::new(5));
/// assert_eq!(id.get(), 5);
/// ```
///
/// # Panics
///
/// Panics if the result is `Err`, with a message including the error value.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap an `Option`, panicking with a custom message if `None`.
///
/// # Example
///
/// ```rust
/// use canconf_test_helpers::must_some;
/// use canconf_profile::presets;
///
/// let drive = must_some(presets::by_name("drive"), "drive preset");
/// assert_eq!(drive.name, "drive");
/// ```
///
/// # Panics
///
/// Panics if the option is `None`, with the provided message.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}

/// Unwrap a `Result` with a custom context message.
///
/// # Panics
///
/// Panics if the result is `Err`, with the context and error value.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with: {context}: {e:?}"),
    }
}

/// Build a bus address that is known to be valid.
///
/// # Panics
///
/// Panics if `raw` is above the highest bus address.
#[track_caller]
pub fn device_id(raw: u8) -> DeviceId {
    match DeviceId::new(raw) {
        Ok(id) => id,
        Err(e) => panic!("device_id: {raw} is not a bus address: {e}"),
    }
}
