//! Property tests for range checks.

use proptest::prelude::*;
use rumble_errors::prelude::*;

proptest! {
    #[test]
    fn in_range_values_pass_unchanged(value in 0.0f64..=4.0) {
        prop_assert_eq!(ValidationError::ensure_within("gain", value, 0.0, 4.0), Ok(value));
    }

    #[test]
    fn out_of_range_values_name_the_field(value in 4.000_001f64..1e6) {
        let err: RumbleError = match ValidationError::ensure_within("gains.road_feel", value, 0.0, 4.0) {
            Ok(_) => return Err(TestCaseError::fail("value accepted")),
            Err(e) => e.into(),
        };
        prop_assert_eq!(err.category(), ErrorCategory::Validation);
        prop_assert!(err.to_string().contains("gains.road_feel"));
    }
}
