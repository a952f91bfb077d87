//! Straight-line traction activity per axle.
//!
//! Reads the unsmoothed axle spin while accelerating in a straight line, so
//! it behaves like a traction-control light rather than a cornering cue.

use rumble_filters::{Envelope, EnvelopeFollower, clamp01};

use crate::basic::DriverInputs;
use crate::steering::SteeringState;
use crate::types::AxlePair;

pub const STRAIGHT_MAX_NORM: f64 = 0.08;
pub const STRAIGHT_MAX_RATE: f64 = 2.0;
pub const SPIN_GAIN: f64 = 1.5;

fn traction_follower() -> EnvelopeFollower {
    EnvelopeFollower::new(0.55, 0.92)
}

/// Steering close to centre and not moving much.
pub fn is_straight_line(steering: &SteeringState) -> bool {
    steering.norm < STRAIGHT_MAX_NORM && steering.speed() < STRAIGHT_MAX_RATE
}

pub fn is_accelerating(inputs: &DriverInputs) -> bool {
    inputs.throttle > 0.35 && inputs.brake < 0.05 && inputs.rpm_norm > 0.15 && inputs.speed_kmh > 10.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct TractionState {
    pub activity: AxlePair<EnvelopeFollower>,
}

impl Default for TractionState {
    fn default() -> Self {
        Self {
            activity: AxlePair::new(traction_follower(), traction_follower()),
        }
    }
}

impl TractionState {
    pub fn update(&mut self, inputs: &DriverInputs, steering: &SteeringState, spin: AxlePair<f64>) {
        let raw = if is_straight_line(steering) && is_accelerating(inputs) {
            let throttle_shape = 0.50 + 0.50 * inputs.throttle;
            let speed_shape = 0.40 + 0.60 * inputs.speed_norm;
            spin.map(|s| clamp01(s * SPIN_GAIN) * throttle_shape * speed_shape)
        } else {
            AxlePair::default()
        };

        self.activity.front.update(raw.front);
        self.activity.rear.update(raw.rear);
    }

    pub fn level(&self) -> AxlePair<f64> {
        AxlePair::new(self.activity.front.value(), self.activity.rear.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch() -> DriverInputs {
        DriverInputs {
            rpm_norm: 0.6,
            speed_norm: 0.2,
            speed_kmh: 70.0,
            throttle: 1.0,
            ..DriverInputs::default()
        }
    }

    #[test]
    fn test_rear_spin_on_the_straight_lights_rear() {
        let mut tc = TractionState::default();
        let steering = SteeringState::default();
        for _ in 0..20 {
            tc.update(&launch(), &steering, AxlePair::new(0.0, 0.6));
        }
        let level = tc.level();
        assert_eq!(level.front, 0.0);
        assert!(level.rear > 0.2);
    }

    #[test]
    fn test_cornering_suppresses_activity() {
        let mut tc = TractionState::default();
        let mut steering = SteeringState::default();
        steering.update(0.5);
        for _ in 0..20 {
            tc.update(&launch(), &steering, AxlePair::splat(0.8));
        }
        assert_eq!(tc.level(), AxlePair::splat(0.0));
    }

    #[test]
    fn test_braking_is_not_accelerating() {
        let inputs = DriverInputs {
            brake: 0.2,
            ..launch()
        };
        assert!(!is_accelerating(&inputs));
        assert!(is_accelerating(&launch()));
    }
}
