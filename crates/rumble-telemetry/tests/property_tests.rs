//! Property tests for telemetry acquisition.

use proptest::prelude::*;
use rumble_telemetry::{
    CoreTelemetry, MapSource, TelemetrySample, TelemetrySource, Wheels, channels, parse_gear,
};

fn any_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>(),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        -1000.0f64..1000.0,
    ]
}

proptest! {
    #[test]
    fn prop_read_or_is_always_finite(value in any_f64(), fallback in -10.0f64..10.0) {
        let source: MapSource = [("X", value)].into_iter().collect();
        let read = source.read_or("X", fallback);
        prop_assert!(read.is_finite());
        if !value.is_finite() {
            prop_assert_eq!(read, fallback);
        }
    }

    #[test]
    fn prop_sanitized_sample_is_finite(
        rpm in any_f64(),
        speed in any_f64(),
        travel in any_f64(),
        steer in any_f64(),
    ) {
        let sample = TelemetrySample {
            rpm,
            speed_kmh: speed,
            suspension_travel: Wheels::splat(travel),
            steering: steer,
            ..TelemetrySample::default()
        }
        .sanitized();
        prop_assert!(sample.rpm.is_finite());
        prop_assert!(sample.speed_kmh.is_finite());
        prop_assert!(sample.suspension_travel.into_array().iter().all(|v| v.is_finite()));
        prop_assert!(sample.steering.is_finite());
    }

    #[test]
    fn prop_gear_text_never_panics(text in ".{0,8}") {
        let _ = parse_gear(&text);
    }

    #[test]
    fn prop_integer_gear_round_trips(gear in -1i32..10) {
        prop_assert_eq!(parse_gear(&gear.to_string()), gear);
    }

    #[test]
    fn prop_clutch_is_clamped(value in -5.0f64..5.0) {
        let source: MapSource = [(channels::CLUTCH[0], value)].into_iter().collect();
        let sample = TelemetrySample::from_source(&CoreTelemetry::default(), &source);
        prop_assert!((0.0..=1.0).contains(&sample.clutch));
    }
}
