//! Convenience re-exports for common test utilities.

pub use crate::fixtures::SampleBuilder;
pub use crate::must::must;
pub use crate::scenario::{init_test_tracing, lerp_ticks, run_ticks};
pub use crate::{assert_approx_eq, assert_in_range, assert_unit};
