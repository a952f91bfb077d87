//! Surface and grip diagnostics.
//!
//! Slow averages of quantities computed elsewhere in the pipeline. Nothing
//! downstream reads them; they are exported for dashboards and logging.

use rumble_filters::{clamp01, smooth};

use crate::motion::Dof3;
use crate::types::AxlePair;

pub const GRAIN_ALPHA: f64 = 0.20;
pub const HARSHNESS_ALPHA: f64 = 0.20;
pub const IMPACT_BIAS_ALPHA: f64 = 0.25;
pub const LOAD_ALPHA: f64 = 0.25;
pub const GRIP_ALPHA: f64 = 0.25;

/// Upstream levels read by the diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceInputs {
    pub dof: Dof3,
    /// Unsigned road heave norm.
    pub heave_norm: f64,
    pub speed_norm: f64,
    pub tyres: AxlePair<f64>,
    pub vibration: AxlePair<f64>,
    pub impact: AxlePair<f64>,
    pub learned_slip: AxlePair<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceState {
    pub grain: f64,
    pub harshness: f64,
    pub impact_bias: f64,
    pub load: AxlePair<f64>,
    /// Remaining grip, `1.0` when nothing is slipping.
    pub grip_budget: AxlePair<f64>,
}

impl SurfaceState {
    pub fn update(&mut self, input: &SurfaceInputs) {
        let dof = &input.dof;
        let grain_raw = clamp01(
            dof.heave.abs() * 0.60
                + dof.sway.abs() * 0.30
                + dof.surge.abs() * 0.20
                + input.vibration.front * 0.40
                + input.vibration.rear * 0.40,
        );
        self.grain = smooth(self.grain, grain_raw, GRAIN_ALPHA);

        let harsh_raw =
            clamp01(input.impact.front * 0.50 + input.impact.rear * 0.50 + grain_raw * 0.20);
        self.harshness = smooth(self.harshness, harsh_raw, HARSHNESS_ALPHA);

        let bias_raw = clamp01((input.impact.front + input.impact.rear) * 0.50);
        self.impact_bias = smooth(self.impact_bias, bias_raw, IMPACT_BIAS_ALPHA);

        let heave = input.heave_norm.abs();
        self.load = AxlePair::new(
            smooth(self.load.front, clamp01(input.tyres.front * 0.70 + heave * 0.30), LOAD_ALPHA),
            smooth(self.load.rear, clamp01(input.tyres.rear * 0.70 + heave * 0.30), LOAD_ALPHA),
        );

        let speed_scale = 0.40 + 0.60 * input.speed_norm;
        self.grip_budget = AxlePair::new(
            smooth(
                self.grip_budget.front,
                clamp01(1.0 - input.learned_slip.front * speed_scale),
                GRIP_ALPHA,
            ),
            smooth(
                self.grip_budget.rear,
                clamp01(1.0 - input.learned_slip.rear * speed_scale),
                GRIP_ALPHA,
            ),
        );
    }
}
