//! Panicking unwrap for test setup.
//!
//! Workspace lints deny `unwrap()` and `expect()` everywhere, tests included.

use std::fmt::Debug;

/// Take the `Ok` value or fail the test at the caller's line.
///
/// ```rust
/// use rumble_test_helpers::must;
///
/// let parsed: Result<f64, std::num::ParseFloatError> = "0.25".parse();
/// assert!((must(parsed) - 0.25).abs() < 1e-12);
/// ```
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| panic!("test setup failed: {e:?}"))
}
