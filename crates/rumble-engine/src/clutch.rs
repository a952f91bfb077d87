//! Clutch freewheel detector.
//!
//! Fires when the engine is revved with the clutch pedal down: the faster the
//! revs climb, the stronger the kick. The fastest-decaying signal in the bank.

use rumble_filters::{DualRateSmoother, Envelope, clamp01};

use crate::basic::DriverInputs;

pub const CLUTCH_DOWN: f64 = 0.75;
pub const MIN_THROTTLE: f64 = 0.15;
pub const MIN_RPM_NORM: f64 = 0.15;
/// Per-tick rpm-norm rise that counts as revving.
pub const RPM_RISE_THRESHOLD: f64 = 0.01;
pub const RPM_RISE_GAIN: f64 = 40.0;
/// Extra decay whenever the free-rev condition is not met.
pub const IDLE_DECAY: f64 = 0.90;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClutchState {
    last_rpm_norm: f64,
    pub free_rev: bool,
    pub envelope: DualRateSmoother,
}

impl Default for ClutchState {
    fn default() -> Self {
        Self {
            last_rpm_norm: 0.0,
            free_rev: false,
            envelope: DualRateSmoother::new(0.8, 0.25),
        }
    }
}

impl ClutchState {
    pub fn update(&mut self, inputs: &DriverInputs) {
        let rpm = inputs.rpm_norm;
        let rpm_delta = rpm - self.last_rpm_norm;
        self.last_rpm_norm = rpm;

        self.free_rev = inputs.clutch > CLUTCH_DOWN
            && inputs.throttle > MIN_THROTTLE
            && rpm_delta > RPM_RISE_THRESHOLD
            && rpm > MIN_RPM_NORM;

        let target = if self.free_rev {
            let violence = clamp01((rpm_delta - RPM_RISE_THRESHOLD) * RPM_RISE_GAIN);
            clamp01(rpm * 1.2 * violence)
        } else {
            0.0
        };

        self.envelope.update(target);
        if !self.free_rev {
            self.envelope.decay(IDLE_DECAY);
        }
    }

    pub fn level(&self) -> f64 {
        clamp01(self.envelope.value())
    }
}
