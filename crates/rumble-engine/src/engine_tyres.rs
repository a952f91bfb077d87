//! Engine & Tyres: the corner-phase chassis wave per axle.
//!
//! Opens whenever the car is turning at speed without heavy braking, or in a
//! burnout. Sums steering preload, throttle-biased slip, an exit-settle term
//! for tyres re-gripping after a slide, a scrub hint and a torque-load term,
//! then punches into an asymmetric follower that bleeds out geometrically.

use rumble_filters::{AsymmetricFollower, Envelope, EnvelopeFollower, clamp01, shape};

use crate::basic::{DriverInputs, TyreState};
use crate::steering::SteeringState;
use crate::types::{Axle, AxlePair, Dominance};

pub const MOVING_SPEED_KMH: f64 = 3.5;
pub const LOW_BRAKE: f64 = 0.55;
pub const OUTPUT_EXPONENT: f64 = 0.90;
pub const SCRUB_HINT_EXPONENT: f64 = 0.70;
/// Traction activity above which the rear wave is tightened.
pub const TC_DAMPING_THRESHOLD: f64 = 0.05;

/// Per-axle weights and shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxleTuning {
    /// Share of the steering-rate boost reaching this axle.
    rate_boost: f64,
    load_base: f64,
    slip_base: f64,
    preload: f64,
    slip: f64,
    exit: f64,
    scrub: f64,
    torque: f64,
    burnout: f64,
}

const FRONT: AxleTuning = AxleTuning {
    rate_boost: 1.0,
    load_base: 0.35,
    slip_base: 0.40,
    preload: 0.55,
    slip: 1.05,
    exit: 0.75,
    scrub: 0.40,
    torque: 0.35,
    burnout: 1.20,
};

const REAR: AxleTuning = AxleTuning {
    rate_boost: 0.8,
    load_base: 0.30,
    slip_base: 0.45,
    preload: 0.55,
    slip: 1.15,
    exit: 0.85,
    scrub: 0.50,
    torque: 0.45,
    burnout: 1.30,
};

const fn tuning(axle: Axle) -> &'static AxleTuning {
    match axle {
        Axle::Front => &FRONT,
        Axle::Rear => &REAR,
    }
}

/// Front/rear slip multipliers for the dominant axle.
pub fn axle_bias(dominance: Dominance) -> AxlePair<f64> {
    match dominance {
        Dominance::Front => AxlePair::new(1.35, 0.80),
        Dominance::Rear => AxlePair::new(0.75, 1.40),
        Dominance::Balanced => AxlePair::splat(1.0),
    }
}

/// Everything the corner-phase wave reads from upstream modules.
#[derive(Debug, Clone, Copy)]
pub struct CornerContext<'a> {
    pub inputs: &'a DriverInputs,
    pub steering: &'a SteeringState,
    pub tyres: &'a TyreState,
    pub learned_slip: AxlePair<f64>,
    pub scrub: AxlePair<f64>,
    pub traction: AxlePair<f64>,
    pub dominance: Dominance,
    pub burnout: bool,
}

fn exit_follower() -> EnvelopeFollower {
    EnvelopeFollower::new(0.55, 0.90).without_snap()
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineTyresState {
    prev_slip: AxlePair<f64>,
    pub exit: AxlePair<EnvelopeFollower>,
    pub envelope: AxlePair<AsymmetricFollower>,
    pub corner_phase: bool,
}

impl Default for EngineTyresState {
    fn default() -> Self {
        Self {
            prev_slip: AxlePair::default(),
            exit: AxlePair::splat(exit_follower()),
            envelope: AxlePair::new(
                AsymmetricFollower::new(0.55, 0.68),
                AsymmetricFollower::new(0.60, 0.68),
            ),
            corner_phase: false,
        }
    }
}

impl EngineTyresState {
    pub fn update(&mut self, ctx: &CornerContext<'_>) {
        let inputs = ctx.inputs;
        let steer = ctx.steering.norm;
        let steer_rate = ctx.steering.speed();

        let moving = inputs.speed_kmh > MOVING_SPEED_KMH;
        let low_brake = inputs.brake < LOW_BRAKE;
        let turning_soft = steer > 0.01 || steer_rate > 0.02;
        let turning_medium = steer > 0.03 || steer_rate > 0.04;

        self.corner_phase = (turning_soft && moving && low_brake) || ctx.burnout;

        let preload_base = steer * (0.40 + 0.60 * inputs.speed_norm);
        let rate_boost = clamp01(steer_rate / 30.0) * 0.6;
        let torque_load = clamp01(inputs.throttle * 0.85 + inputs.brake * 0.35);
        let bias = axle_bias(ctx.dominance);

        for axle in [Axle::Front, Axle::Rear] {
            let t = tuning(axle);
            let slip = *ctx.learned_slip.get(axle);
            let tyre = match axle {
                Axle::Front => ctx.tyres.front,
                Axle::Rear => ctx.tyres.rear,
            };

            let prev = self.prev_slip.get_mut(axle);
            let slip_drop = *prev - slip;
            *prev = slip;

            let exit_raw = if slip_drop > 0.0 && turning_medium && moving {
                slip_drop * steer * (0.30 + 0.70 * inputs.speed_norm) * (0.20 + 0.80 * tyre)
            } else {
                0.0
            };
            let exit = self.exit.get_mut(axle).update(clamp01(exit_raw));

            let mut target = 0.0;
            if self.corner_phase {
                let preload = (preload_base + rate_boost * t.rate_boost)
                    * (t.load_base + (1.0 - t.load_base) * tyre);
                let slip_shaped = slip * (t.slip_base + (1.0 - t.slip_base) * (inputs.throttle + 0.2));
                let scrub_hint = shape(clamp01(*ctx.scrub.get(axle)), SCRUB_HINT_EXPONENT);

                target = preload * t.preload
                    + slip_shaped * *bias.get(axle) * t.slip
                    + exit * t.exit
                    + scrub_hint * t.scrub
                    + slip * torque_load * t.torque;

                if ctx.burnout && ctx.dominance.is(axle) {
                    target *= t.burnout;
                }
            }

            if axle == Axle::Rear && self.corner_phase && ctx.traction.rear > TC_DAMPING_THRESHOLD {
                let tc = clamp01(ctx.traction.rear * 1.2);
                target *= 0.90 + 0.10 * (1.0 - tc);
            }

            let shaped = shape(clamp01(target), OUTPUT_EXPONENT);
            self.envelope.get_mut(axle).update(shaped);
        }
    }

    pub fn level(&self) -> AxlePair<f64> {
        AxlePair::new(self.envelope.front.value(), self.envelope.rear.value())
    }
}
