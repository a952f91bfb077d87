//! Property-Based Tests for Primitives and Followers

use proptest::prelude::*;
use rumble_filters::prelude::*;

fn any_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1e6f64..1e6,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(0.0),
        Just(1.0),
    ]
}

proptest! {
    #[test]
    fn clamp01_is_total(v in any_f64()) {
        let out = clamp01(v);
        prop_assert!((0.0..=1.0).contains(&out));
        if !v.is_finite() {
            prop_assert_eq!(out, 0.0);
        }
    }

    #[test]
    fn normalize_range_is_total(v in any_f64(), min in any_f64(), max in any_f64()) {
        let out = normalize_range(v, min, max);
        prop_assert!((0.0..=1.0).contains(&out));
        if !v.is_finite() {
            prop_assert_eq!(out, 0.0);
        }
    }

    #[test]
    fn clamp_signed_is_total(v in any_f64()) {
        let out = clamp_signed(v);
        prop_assert!((-1.0..=1.0).contains(&out));
    }

    #[test]
    fn smooth_endpoints(prev in -100.0f64..100.0, target in -100.0f64..100.0) {
        prop_assert_eq!(smooth(prev, target, 0.0), prev);
        prop_assert_eq!(smooth(prev, target, 1.0), target);
    }

    #[test]
    fn smooth_lies_strictly_between(
        prev in -100.0f64..100.0,
        target in -100.0f64..100.0,
        alpha in 0.01f64..0.99,
    ) {
        prop_assume!((prev - target).abs() > 1e-6);
        let out = smooth(prev, target, alpha);
        let (lo, hi) = if prev < target { (prev, target) } else { (target, prev) };
        prop_assert!(out > lo && out < hi);
    }

    #[test]
    fn limit_rise_never_exceeds_step(prev in 0.0f64..1.0, desired in 0.0f64..1.0, step in 0.0f64..0.2) {
        let out = limit_rise(prev, desired, step);
        prop_assert!(out <= prev + step + 1e-12);
        prop_assert!(out <= desired);
    }

    #[test]
    fn envelope_follower_stays_in_unit_range(
        targets in prop::collection::vec(any_f64(), 1..64),
        alpha in 0.0f64..1.0,
        decay in 0.5f64..1.0,
    ) {
        let mut env = EnvelopeFollower::new(alpha, decay);
        for t in targets {
            let out = env.update(clamp01(t));
            prop_assert!((0.0..=1.0).contains(&out));
        }
    }

    #[test]
    fn asymmetric_follower_stays_in_unit_range(
        targets in prop::collection::vec(0.0f64..1.0, 1..64),
        attack in 0.0f64..1.0,
        decay in 0.0f64..1.0,
    ) {
        let mut env = AsymmetricFollower::new(attack, decay);
        for t in targets {
            let out = env.update(t);
            prop_assert!((0.0..=1.0).contains(&out));
        }
    }

    #[test]
    fn smoothstep_is_monotonic(a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(smoothstep(lo) <= smoothstep(hi) + 1e-12);
    }
}
