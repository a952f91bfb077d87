//! Behaviour-based steering normalization.
//!
//! A slow amplitude tracker decides whether the source already reports a
//! normalized `[-1, 1]` value or an angle. Angles are divided by a running
//! lock estimate that jumps to 1.05x any new extreme and otherwise drifts
//! down towards a 15 degree floor.

use rumble_filters::clamp01;
use tracing::debug;

pub const INITIAL_LOCK: f64 = 45.0;
pub const LOCK_FLOOR: f64 = 15.0;
pub const LOCK_HEADROOM: f64 = 1.05;
pub const LOCK_DECAY: f64 = 0.999;
pub const TRACKER_DECAY: f64 = 0.995;
/// Tracked amplitude below which the source counts as normalized.
pub const NORMALIZED_AMPLITUDE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteeringMode {
    Normalized,
    Angle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringState {
    last: f64,
    pub tracker: f64,
    /// Running lock estimate in source units.
    pub lock: f64,
    pub mode: SteeringMode,
    /// `|steer| / lock` in `[0, 1]`.
    pub norm: f64,
    /// Signed change since the previous tick, in source units.
    pub velocity: f64,
}

impl Default for SteeringState {
    fn default() -> Self {
        Self {
            last: 0.0,
            tracker: 0.0,
            lock: INITIAL_LOCK,
            mode: SteeringMode::Normalized,
            norm: 0.0,
            velocity: 0.0,
        }
    }
}

impl SteeringState {
    pub fn update(&mut self, steer: f64) {
        self.velocity = steer - self.last;
        self.last = steer;

        let magnitude = steer.abs();
        self.tracker = self.tracker * TRACKER_DECAY + magnitude * (1.0 - TRACKER_DECAY);

        let mode = if self.tracker < NORMALIZED_AMPLITUDE {
            SteeringMode::Normalized
        } else {
            SteeringMode::Angle
        };
        if mode != self.mode {
            debug!(?mode, tracker = self.tracker, "Steering source mode switched");
            self.mode = mode;
        }

        self.norm = match mode {
            SteeringMode::Normalized => magnitude.min(1.0),
            SteeringMode::Angle => self.angle_norm(magnitude),
        };
    }

    fn angle_norm(&mut self, magnitude: f64) -> f64 {
        if magnitude > self.lock {
            self.lock = magnitude * LOCK_HEADROOM;
        } else {
            self.lock = (self.lock * LOCK_DECAY).max(LOCK_FLOOR);
        }

        if self.lock < 1.0 {
            0.0
        } else {
            clamp01(magnitude / self.lock)
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_source_passes_through() {
        let mut steering = SteeringState::default();
        for _ in 0..100 {
            steering.update(-0.4);
        }
        assert_eq!(steering.mode, SteeringMode::Normalized);
        assert!((steering.norm - 0.4).abs() < 1e-12);
        assert_eq!(steering.lock, INITIAL_LOCK);
    }

    #[test]
    fn test_angle_source_switches_mode() {
        let mut steering = SteeringState::default();
        steering.update(1000.0);
        assert_eq!(steering.mode, SteeringMode::Angle);
        assert!((steering.lock - 1050.0).abs() < 1e-9);
        assert!((steering.norm - 1000.0 / 1050.0).abs() < 1e-9);
    }

    #[test]
    fn test_lock_decays_to_floor() {
        let mut steering = SteeringState::default();
        for _ in 0..50 {
            steering.update(100.0);
        }
        assert!((100.0..=105.0).contains(&steering.lock));

        for _ in 0..5000 {
            steering.update(5.0);
        }
        assert_eq!(steering.mode, SteeringMode::Angle);
        assert_eq!(steering.lock, LOCK_FLOOR);
        assert!((steering.norm - 5.0 / LOCK_FLOOR).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_tracks_change() {
        let mut steering = SteeringState::default();
        steering.update(10.0);
        steering.update(7.5);
        assert!((steering.velocity + 2.5).abs() < 1e-12);
        assert!((steering.speed() - 2.5).abs() < 1e-12);
    }
}
