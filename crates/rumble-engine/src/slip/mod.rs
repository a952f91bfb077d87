//! Wheel slip: multi-source fusion and the adaptive per-axle learners.
//!
//! Fusion produces an unsmoothed per-wheel estimate. Axle spin (the mean of
//! the two unsmoothed wheels) classifies dominance and burnout and feeds one
//! [`AxleSlipLearner`] per axle; downstream modules read the learned
//! intensities from [`SlipState::learned`].

pub mod fusion;
pub mod learner;

pub use fusion::{
    AngularSpeedDeviation, DirectSlipRatio, LinearSpeedDeviation, RawSimSlip, SlipEstimator,
    SlipFusion,
};
pub use learner::{AxleSlipLearner, LearnerInputs};

use rumble_filters::{clamp01, smooth};
use rumble_telemetry::{TelemetrySample, Wheels};
use tracing::debug;

use crate::basic::DriverInputs;
use crate::types::{Axle, AxlePair, Dominance};

/// Smoothing applied to the exported per-wheel slip.
pub const WHEEL_SLIP_ALPHA: f64 = 0.5;
pub const BURNOUT_MAX_SPEED_KMH: f64 = 20.0;
pub const BURNOUT_MIN_THROTTLE: f64 = 0.40;
pub const BURNOUT_MIN_SPIN: f64 = 0.35;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlipState {
    /// Smoothed per-wheel slip, exported for diagnostics only.
    pub wheels: Wheels<f64>,
    /// Axle means of the unsmoothed fused estimate.
    pub spin: AxlePair<f64>,
    pub dominance: Dominance,
    pub burnout: bool,
    pub learners: AxlePair<AxleSlipLearner>,
}

impl SlipState {
    pub fn update(&mut self, sample: &TelemetrySample, inputs: &DriverInputs, fusion: &SlipFusion) {
        let raw = fusion.fuse(sample);

        self.wheels = self
            .wheels
            .zip_with(raw, |prev, fused| smooth(prev, clamp01(fused), WHEEL_SLIP_ALPHA));
        self.spin = AxlePair::new(raw.front_mean(), raw.rear_mean());
        self.dominance = Dominance::classify(self.spin.front, self.spin.rear);
        self.burnout = inputs.speed_kmh < BURNOUT_MAX_SPEED_KMH
            && inputs.throttle > BURNOUT_MIN_THROTTLE
            && (self.spin.front > BURNOUT_MIN_SPIN || self.spin.rear > BURNOUT_MIN_SPIN);

        for axle in [Axle::Front, Axle::Rear] {
            let learner_inputs = LearnerInputs {
                own_dominant: self.dominance.is(axle),
                other_dominant: self.dominance.is(axle.other()),
                burnout: self.burnout,
                rpm_norm: inputs.rpm_norm,
                throttle: inputs.throttle,
            };
            let spin = *self.spin.get(axle);
            let learner = self.learners.get_mut(axle);
            let was_seeded = learner.is_seeded();
            learner.update(spin, learner_inputs);
            if !was_seeded && learner.is_seeded() {
                debug!(
                    axle = axle.as_str(),
                    base = learner.base_slip,
                    max = learner.max_slip,
                    "Seeded slip learner"
                );
            }
        }
    }

    /// Learned drive intensity per axle.
    pub fn learned(&self) -> AxlePair<f64> {
        self.learners.map(|learner| learner.intensity())
    }

    /// Mean of the two smoothed wheels on each axle.
    pub fn wheel_means(&self) -> AxlePair<f64> {
        AxlePair::new(self.wheels.front_mean(), self.wheels.rear_mean())
    }
}
