//! Custom assertion macros for testing.

/// Assert that two floating-point values are approximately equal.
///
/// # Example
///
/// ```rust
/// use canconf_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(0.25_f64, 0.2500001, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if diff > tolerance {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
}

/// Assert that a slice of `(operation, status)` failures names exactly the
/// given operations, in order.
///
/// # Example
///
/// ```rust
/// use canconf_test_helpers::assert_failed_operations;
/// use canconf_device::{Operation, StatusCode};
///
/// let failures = vec![(Operation::SetInverted, StatusCode::CanTimeout)];
/// assert_failed_operations!(&failures, ["set inverted"]);
/// ```
#[macro_export]
macro_rules! assert_failed_operations {
    ($failures:expr, [$($name:expr),* $(,)?]) => {
        let names: ::std::vec::Vec<&str> = $failures.iter().map(|(op, _)| op.name()).collect();
        let expected: ::std::vec::Vec<&str> = ::std::vec![$($name),*];
        if names != expected {
            panic!(
                "assertion failed: failed operations differ\n  actual: `{:?}`,\n  expected: `{:?}`",
                names, expected
            );
        }
    };
}
