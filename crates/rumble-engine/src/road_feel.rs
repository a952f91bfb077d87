//! Road feel: the contact-patch baseline per axle.
//!
//! Body micro-motion, suspension vibration and a little slip grain, shaped by
//! speed and tyre load, with a speed floor so coasting still feels alive.

use rumble_filters::{Envelope, EnvelopeFollower, clamp01, shape};

use crate::basic::{DriverInputs, TyreState};
use crate::motion::Dof3;
use crate::types::AxlePair;

pub const ROAD_GAIN: f64 = 2.4;
pub const ROAD_EXPONENT: f64 = 0.80;
pub const GRAIN_EXPONENT: f64 = 0.38;
pub const GRAIN_WEIGHT: f64 = 0.22;
/// Minimum level once speed-norm passes [`MOVING_SPEED_NORM`].
pub const MOVING_FLOOR: f64 = 0.05;
pub const MOVING_SPEED_NORM: f64 = 0.06;

/// Weighted body motion: heave matters most, surge least.
pub fn body_motion(dof: &Dof3) -> f64 {
    clamp01(dof.heave.abs() * 1.50 + dof.sway.abs() * 1.10 + dof.surge.abs() * 0.90)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadFeelState {
    pub envelope: AxlePair<EnvelopeFollower>,
}

impl Default for RoadFeelState {
    fn default() -> Self {
        Self {
            envelope: AxlePair::splat(EnvelopeFollower::ema(0.45)),
        }
    }
}

impl RoadFeelState {
    pub fn update(
        &mut self,
        inputs: &DriverInputs,
        dof: &Dof3,
        tyres: &TyreState,
        vibration: AxlePair<f64>,
        learned_slip: AxlePair<f64>,
    ) {
        let speed_norm = inputs.speed_norm;
        let motion = body_motion(dof) * 0.90;
        let speed_shape = clamp01(0.30 + 0.90 * speed_norm);

        let axle_raw = |vib: f64, slip: f64, tyre: f64| {
            let mut raw = motion + vib * 0.90 + shape(slip, GRAIN_EXPONENT) * GRAIN_WEIGHT;
            raw *= speed_shape * (0.35 + 0.65 * tyre).min(1.0);
            raw += 0.75 * speed_norm;
            let mut raw = shape(clamp01(raw * ROAD_GAIN), ROAD_EXPONENT);
            if speed_norm > MOVING_SPEED_NORM {
                raw = raw.max(MOVING_FLOOR);
            }
            raw
        };

        self.envelope
            .front
            .update(axle_raw(vibration.front, learned_slip.front, tyres.front));
        self.envelope
            .rear
            .update(axle_raw(vibration.rear, learned_slip.rear, tyres.rear));
    }

    pub fn level(&self) -> AxlePair<f64> {
        AxlePair::new(self.envelope.front.value(), self.envelope.rear.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_speed(speed_norm: f64) -> DriverInputs {
        DriverInputs {
            speed_norm,
            speed_kmh: speed_norm * 350.0,
            ..DriverInputs::default()
        }
    }

    #[test]
    fn test_standstill_is_silent() {
        let mut road = RoadFeelState::default();
        road.update(
            &DriverInputs::default(),
            &Dof3::default(),
            &TyreState::default(),
            AxlePair::default(),
            AxlePair::default(),
        );
        assert_eq!(road.level(), AxlePair::splat(0.0));
    }

    #[test]
    fn test_moving_floor_applies() {
        let mut road = RoadFeelState::default();
        for _ in 0..60 {
            road.update(
                &at_speed(0.07),
                &Dof3::default(),
                &TyreState::default(),
                AxlePair::default(),
                AxlePair::default(),
            );
        }
        // 0.07 * 0.75 * 2.4 = 0.126, above the floor after shaping
        let expected = 0.126_f64.powf(ROAD_EXPONENT);
        assert!((road.level().front - expected).abs() < 1e-9);
    }

    #[test]
    fn test_vibration_lifts_its_axle() {
        let mut road = RoadFeelState::default();
        for _ in 0..30 {
            road.update(
                &at_speed(0.1),
                &Dof3::default(),
                &TyreState::default(),
                AxlePair::new(0.0, 0.5),
                AxlePair::default(),
            );
        }
        let level = road.level();
        assert!(level.rear > level.front);
    }

    #[test]
    fn test_body_motion_weights() {
        let dof = Dof3 {
            surge: -0.1,
            sway: 0.1,
            heave: -0.1,
        };
        assert!((body_motion(&dof) - 0.35).abs() < 1e-12);
    }
}
