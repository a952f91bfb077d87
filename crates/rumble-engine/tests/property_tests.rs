//! Property-Based Tests for the Pipeline and Slip Learners

use proptest::prelude::*;
use rumble_engine::prelude::*;
use rumble_engine::slip::learner::{AxleSlipLearner, LearnerInputs, MAX_TO_BASE_RATIO};
use rumble_telemetry::{TelemetrySample, Wheels};

fn any_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -1e4f64..1e4,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

fn any_wheels() -> impl Strategy<Value = Wheels<f64>> {
    (any_f64(), any_f64(), any_f64(), any_f64()).prop_map(|(fl, fr, rl, rr)| Wheels::new(fl, fr, rl, rr))
}

prop_compose! {
    fn any_sample()(
        (rpm, max_rpm, speed_kmh, raw_speed_kmh) in (any_f64(), any_f64(), any_f64(), any_f64()),
        (throttle, brake, clutch, steering) in (any_f64(), any_f64(), any_f64(), any_f64()),
        (surge, sway, heave) in (any_f64(), any_f64(), any_f64()),
        gear in -1i32..8,
        (tyre_temp, suspension_travel, damper_velocity) in (any_wheels(), any_wheels(), any_wheels()),
        (slip_ratio, sim_slip) in (any_wheels(), any_wheels()),
        (wheel_angular_speed, wheel_linear_speed) in (any_wheels(), any_wheels()),
    ) -> TelemetrySample {
        TelemetrySample {
            rpm,
            max_rpm,
            speed_kmh,
            raw_speed_kmh,
            throttle,
            brake,
            clutch,
            tyre_temp,
            suspension_travel,
            damper_velocity,
            slip_ratio,
            sim_slip,
            wheel_angular_speed,
            wheel_linear_speed,
            steering,
            gear,
            surge,
            sway,
            heave,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_signal_finite_and_in_range(samples in prop::collection::vec(any_sample(), 1..40)) {
        let mut state = PipelineState::default();
        for sample in &samples {
            state = step(state, sample);
            let bank = SignalBank::from_state(&state);
            for (signal, value) in bank.iter() {
                prop_assert!(value.is_finite(), "{:?} = {}", signal, value);
                let range = match signal.range() {
                    RangeClass::Signed => -1.0..=1.0,
                    RangeClass::Unit | RangeClass::Diagnostic => 0.0..=1.0,
                };
                prop_assert!(range.contains(&value), "{:?} = {}", signal, value);
            }
        }
    }

    #[test]
    fn gains_only_scale_publication(
        samples in prop::collection::vec(any_sample(), 1..20),
        global in 0.0f64..=4.0,
        road in 0.0f64..=4.0,
    ) {
        let mut config = PipelineConfig::default();
        config.gains.global = global;
        config.gains.road_feel = road;

        let reference = HapticPipeline::new(PipelineConfig::default());
        let scaled = HapticPipeline::new(config);
        prop_assert!(reference.is_ok() && scaled.is_ok());
        if let (Ok(mut reference), Ok(mut scaled)) = (reference, scaled) {
            for sample in &samples {
                reference.update(sample);
                scaled.update(sample);
            }
            prop_assert_eq!(reference.state(), scaled.state());
        }
    }

    #[test]
    fn learner_keeps_max_above_base(
        spins in prop::collection::vec(0.0f64..3.0, 1..200),
        throttle in 0.0f64..=1.0,
        rpm_norm in 0.0f64..=1.0,
    ) {
        let mut learner = AxleSlipLearner::default();
        let inputs = LearnerInputs { rpm_norm, throttle, ..LearnerInputs::default() };
        for spin in spins {
            let out = learner.update(spin, inputs);
            prop_assert!((0.0..=1.0).contains(&out));
            prop_assert!(learner.max_slip >= learner.base_slip * MAX_TO_BASE_RATIO - 1e-12);
        }
    }

    #[test]
    fn brake_silent_below_crawl_speed(
        history in prop::collection::vec(any_sample(), 0..20),
        crawl in prop::collection::vec((any_sample(), 0.0f64..2.0), 1..20),
    ) {
        let mut state = PipelineState::default();
        for sample in &history {
            state = step(state, sample);
        }
        for (mut sample, speed) in crawl {
            sample.speed_kmh = speed;
            state = step(state, &sample);
            let bank = SignalBank::from_state(&state);
            for signal in [
                Signal::BrakeFeelFront,
                Signal::BrakeFeelRear,
                Signal::BrakeLockFront,
                Signal::BrakeLockRear,
                Signal::BrakeNSlipFront,
                Signal::BrakeNSlipRear,
            ] {
                let value = bank.get(signal);
                prop_assert!(value.abs() <= 0.0, "{:?} = {} at {} km/h", signal, value, speed);
            }
        }
    }

    #[test]
    fn steering_norm_is_unit(steer in prop::collection::vec(any_f64(), 1..100)) {
        let mut state = PipelineState::default();
        for s in steer {
            let sample = TelemetrySample { steering: s, ..TelemetrySample::default() };
            state = step(state, &sample);
            prop_assert!((0.0..=1.0).contains(&state.steering.norm));
            prop_assert!(state.steering.lock >= 15.0);
        }
    }
}
