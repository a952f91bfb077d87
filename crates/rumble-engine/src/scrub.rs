//! Tyre scrub per axle.
//!
//! Learned slip gated by pedal presence and speed, with small slip cut off
//! and larger slip emphasised. Loaded (warm) tyres speak a little louder.

use rumble_filters::{Envelope, EnvelopeFollower, clamp01, ramp, shape};

use crate::basic::{DriverInputs, TyreState};
use crate::types::AxlePair;

pub const PEDAL_GATE_START: f64 = 0.10;
pub const PEDAL_GATE_WIDTH: f64 = 0.20;
/// Drive gate while coasting with no pedal.
pub const COAST_FLOOR: f64 = 0.35;
pub const NOISE_FLOOR: f64 = 0.03;
pub const SCRUB_EXPONENT: f64 = 1.35;
pub const MAX_RISE: f64 = 0.06;

fn scrub_follower() -> EnvelopeFollower {
    EnvelopeFollower::new(0.65, 0.99).with_max_rise(MAX_RISE)
}

/// `0.35` with no pedal, `1.0` once either pedal passes 30%.
pub fn drive_gate(inputs: &DriverInputs) -> f64 {
    let throttle = ramp(inputs.throttle, PEDAL_GATE_START, PEDAL_GATE_WIDTH);
    let brake = ramp(inputs.brake, PEDAL_GATE_START, PEDAL_GATE_WIDTH);
    COAST_FLOOR + (1.0 - COAST_FLOOR) * throttle.max(brake)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrubState {
    pub envelope: AxlePair<EnvelopeFollower>,
}

impl Default for ScrubState {
    fn default() -> Self {
        Self {
            envelope: AxlePair::new(scrub_follower(), scrub_follower()),
        }
    }
}

impl ScrubState {
    pub fn update(&mut self, inputs: &DriverInputs, tyres: &TyreState, learned_slip: AxlePair<f64>) {
        let gate = drive_gate(inputs) * ramp(inputs.speed_norm, 0.02, 0.25);
        let load = AxlePair::new(tyres.front, tyres.rear).map(|t| 0.5 + 0.5 * t);

        let base = learned_slip.map(|slip| {
            let base = clamp01(slip) * gate;
            if base < NOISE_FLOOR { 0.0 } else { base }
        });

        self.envelope
            .front
            .update(shape(base.front, SCRUB_EXPONENT) * load.front);
        self.envelope
            .rear
            .update(shape(base.rear, SCRUB_EXPONENT) * load.rear);
    }

    pub fn level(&self) -> AxlePair<f64> {
        AxlePair::new(self.envelope.front.value(), self.envelope.rear.value())
    }
}
