//! Float assertions for signal values.
//!
//! The macros forward to `#[track_caller]` functions so a failure points at
//! the test line, and NaN always fails.

use core::fmt;
use core::ops::RangeInclusive;

#[doc(hidden)]
#[track_caller]
pub fn check_close(left: f64, right: f64, tolerance: f64, note: Option<fmt::Arguments<'_>>) {
    let diff = (left - right).abs();
    if diff.is_nan() || diff > tolerance {
        panic!(
            "signal mismatch: {left:?} vs {right:?} (diff {diff:?} > {tolerance:?}){}",
            Note(note)
        );
    }
}

#[doc(hidden)]
#[track_caller]
pub fn check_within(value: f64, range: RangeInclusive<f64>, note: Option<fmt::Arguments<'_>>) {
    if !range.contains(&value) {
        panic!("signal {value:?} outside {range:?}{}", Note(note));
    }
}

struct Note<'a>(Option<fmt::Arguments<'a>>);

impl fmt::Display for Note<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(args) => write!(f, ": {args}"),
            None => Ok(()),
        }
    }
}

/// Assert `|left - right| <= tolerance`; a tolerance of `0.0` demands equality.
///
/// ```rust
/// use rumble_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(1.0, 1.0001, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        $crate::assertions::check_close($left, $right, $tolerance, None)
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {
        $crate::assertions::check_close($left, $right, $tolerance, Some(format_args!($($arg)+)))
    };
}

/// Assert a value lies in an inclusive `f64` range.
///
/// ```rust
/// use rumble_test_helpers::assert_in_range;
///
/// assert_in_range!(-0.25, -1.0..=1.0);
/// ```
#[macro_export]
macro_rules! assert_in_range {
    ($value:expr, $range:expr $(,)?) => {
        $crate::assertions::check_within($value, $range, None)
    };
    ($value:expr, $range:expr, $($arg:tt)+) => {
        $crate::assertions::check_within($value, $range, Some(format_args!($($arg)+)))
    };
}

/// Assert a signal value is in `[0, 1]`.
#[macro_export]
macro_rules! assert_unit {
    ($value:expr $(,)?) => {
        $crate::assert_in_range!($value, 0.0..=1.0)
    };
    ($value:expr, $($arg:tt)+) => {
        $crate::assert_in_range!($value, 0.0..=1.0, $($arg)+)
    };
}
