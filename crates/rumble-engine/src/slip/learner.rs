//! Adaptive per-axle slip learner.
//!
//! Self-calibrates a quiescent baseline and a working maximum for one axle's
//! spin, measures how noisy the signal is, and turns the spin into a drive
//! intensity whose thresholds and smoothing adapt to that noise. Clean signals
//! get sharper, lower-set detection and forget faster; noisy signals are
//! smoothed harder and forget slower.

use rumble_filters::{attack_decay, clamp01, lerp, smoothstep};

pub const JITTER_ALPHA: f64 = 0.15;
/// Baseline used for the stability estimate before one has been learned.
pub const UNSEEDED_BASE: f64 = 0.1;
pub const SEED_BASE_FACTOR: f64 = 0.7;
pub const SEED_MAX_FACTOR: f64 = 1.4;
pub const BASE_BLEND: f64 = 0.06;
pub const MAX_BLEND: f64 = 0.30;
/// `max_slip` never falls below this multiple of `base_slip`.
pub const MAX_TO_BASE_RATIO: f64 = 1.4;
pub const OWN_DOMINANT_BIAS: f64 = 1.6;
pub const OTHER_DOMINANT_BIAS: f64 = 0.7;
pub const BURNOUT_BOOST: f64 = 1.45;
pub const HEADROOM_GAIN: f64 = 1.25;

/// Per-tick context for one axle's learner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LearnerInputs {
    pub own_dominant: bool,
    pub other_dominant: bool,
    pub burnout: bool,
    pub rpm_norm: f64,
    pub throttle: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxleSlipLearner {
    pub base_slip: f64,
    pub max_slip: f64,
    pub envelope: f64,
    /// Attack/decay state behind [`AxleSlipLearner::intensity`], in `[0, 1]`.
    pub drive: f64,
    pub last_spin: f64,
    pub jitter: f64,
}

impl AxleSlipLearner {
    /// `1` for a clean signal, `0` for one whose jitter dwarfs its baseline.
    pub fn stability(&self) -> f64 {
        let denom = if self.base_slip > 1e-4 {
            self.base_slip
        } else {
            UNSEEDED_BASE
        };
        1.0 - clamp01(self.jitter / (denom * 1.5))
    }

    /// Published drive intensity.
    pub fn intensity(&self) -> f64 {
        clamp01(self.drive.powf(0.95))
    }

    pub fn is_seeded(&self) -> bool {
        self.base_slip > 0.0
    }

    /// Feed one tick of axle spin and return the new published intensity.
    pub fn update(&mut self, spin: f64, inputs: LearnerInputs) -> f64 {
        let spin = if spin.is_finite() { spin.max(0.0) } else { 0.0 };

        self.jitter = self.jitter * (1.0 - JITTER_ALPHA) + (spin - self.last_spin).abs() * JITTER_ALPHA;
        self.last_spin = spin;
        let stability = self.stability();

        self.learn_range(spin, inputs);

        let inst = self.instant_slip(spin, stability);

        let inst_weight = lerp(0.35, 0.80, stability);
        self.envelope = self.envelope * (1.0 - inst_weight) + inst * inst_weight;
        self.envelope *= lerp(0.99, 0.88, stability);

        let slip_env = (self.envelope.powf(1.25) * (1.0 + (1.0 - stability) * 0.35)).min(1.0);

        let bias = if inputs.own_dominant {
            OWN_DOMINANT_BIAS
        } else if inputs.other_dominant {
            OTHER_DOMINANT_BIAS
        } else {
            1.0
        };
        let mut target = slip_env * bias;
        if inputs.burnout {
            target *= BURNOUT_BOOST;
        }
        target *= HEADROOM_GAIN;

        self.drive = clamp01(attack_decay(
            self.drive,
            target,
            lerp(0.35, 0.75, stability),
            lerp(0.75, 0.32, stability),
        ));
        self.intensity()
    }

    fn learn_range(&mut self, spin: f64, inputs: LearnerInputs) {
        if self.base_slip <= 0.0 && spin > 0.0 {
            self.base_slip = spin * SEED_BASE_FACTOR;
            self.max_slip = spin * SEED_MAX_FACTOR;
        }

        // Baseline tracks the quiescent floor: engine running, light throttle.
        if inputs.rpm_norm > 0.08 && inputs.throttle < 0.40 && spin > 0.0 {
            self.base_slip = self.base_slip * (1.0 - BASE_BLEND) + spin * BASE_BLEND;
        }

        if inputs.throttle > 0.20 && spin > self.base_slip * 1.10 {
            self.max_slip = self.max_slip * (1.0 - MAX_BLEND) + spin * 1.20 * MAX_BLEND;
        }

        self.max_slip = self.max_slip.max(self.base_slip * MAX_TO_BASE_RATIO);
    }

    /// Soft-kneed position of `spin` inside the adaptive detection window.
    fn instant_slip(&self, spin: f64, stability: f64) -> f64 {
        let effective_base = self.base_slip * lerp(1.0, 0.75, stability);
        let span = self.max_slip - effective_base;
        let slip_min = effective_base + span * lerp(0.30, 0.04, stability);
        let slip_cap = (effective_base + span * lerp(0.98, 0.80, stability)).max(slip_min + 1e-4);
        smoothstep((spin - slip_min) / (slip_cap - slip_min))
    }
}
