//! Body motion: unsigned road norms and signed motion DOFs.

use rumble_filters::{clamp_signed, clamp01, smooth};
use rumble_telemetry::TelemetrySample;

/// Acceleration (G) that maps to full scale.
pub const G_SCALE: f64 = 3.0;
pub const ROAD_ALPHA: f64 = 0.30;
pub const MOTION_ALPHA: f64 = 0.45;

/// Surge, sway and heave triple.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dof3 {
    pub surge: f64,
    pub sway: f64,
    pub heave: f64,
}

impl Dof3 {
    fn from_sample(sample: &TelemetrySample) -> Self {
        Self {
            surge: sample.surge,
            sway: sample.sway,
            heave: sample.heave,
        }
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            surge: f(self.surge),
            sway: f(self.sway),
            heave: f(self.heave),
        }
    }

    fn smooth_toward(self, target: Self, alpha: f64) -> Self {
        Self {
            surge: smooth(self.surge, target.surge, alpha),
            sway: smooth(self.sway, target.sway, alpha),
            heave: smooth(self.heave, target.heave, alpha),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    initialized: bool,
    /// `|g| / 3` in `[0, 1]`, seeded on the first tick.
    pub road: Dof3,
    /// `g / 3` in `[-1, 1]`.
    pub dof: Dof3,
}

impl MotionState {
    pub fn update(&mut self, sample: &TelemetrySample) {
        let g = Dof3::from_sample(sample);

        let road_raw = g.map(|v| clamp01(v.abs() / G_SCALE));
        if self.initialized {
            self.road = self.road.smooth_toward(road_raw, ROAD_ALPHA);
        } else {
            self.road = road_raw;
            self.initialized = true;
        }

        let dof_raw = g.map(|v| clamp_signed(v / G_SCALE));
        self.dof = self.dof.smooth_toward(dof_raw, MOTION_ALPHA);
    }
}
