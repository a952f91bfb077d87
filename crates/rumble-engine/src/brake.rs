//! Brake feel, lock and the brake-and-slip hybrid, per axle.
//!
//! All three follow the pedal through a progressive base curve while braking
//! at speed. Learned axle slip boosts the feel, blends into the hybrid and,
//! above a high threshold, drives the lock envelope.

use rumble_filters::{Envelope, EnvelopeFollower, clamp01, ramp, shape};

use crate::basic::DriverInputs;
use crate::types::AxlePair;

/// Pedal and speed (km/h) that open the braking phase.
pub const PEDAL_THRESHOLD: f64 = 0.02;
pub const PHASE_MIN_SPEED_KMH: f64 = 5.0;
/// Below this speed every brake envelope is held at zero.
pub const CRAWL_SPEED_KMH: f64 = 2.0;

pub const PEDAL_EXPONENT: f64 = 1.8;
pub const PEDAL_TRIM: f64 = 0.97;

pub const SLIP_KNEE: f64 = 0.20;
pub const SLIP_WEIGHT: f64 = 0.65;

pub const LOCK_START: f64 = 0.78;
pub const LOCK_RANGE: f64 = 0.17;
pub const LOCK_GAIN: f64 = 1.3;
pub const LOCK_MIN_PEDAL: f64 = 0.40;
pub const LOCK_MIN_SPEED_KMH: f64 = 20.0;

pub const FEEL_MAX_RISE: f64 = 0.03;
pub const HYBRID_MAX_RISE: f64 = 0.05;
pub const BRAKE_ALPHA: f64 = 0.55;

fn feel_follower() -> EnvelopeFollower {
    EnvelopeFollower::ema(BRAKE_ALPHA).with_max_rise(FEEL_MAX_RISE)
}

fn hybrid_follower() -> EnvelopeFollower {
    EnvelopeFollower::ema(BRAKE_ALPHA).with_max_rise(HYBRID_MAX_RISE)
}

fn lock_follower() -> EnvelopeFollower {
    EnvelopeFollower::ema(BRAKE_ALPHA)
}

/// Pedal position remapped past the dead zone, shaped and trimmed.
pub fn pedal_curve(brake: f64) -> f64 {
    let t = clamp01((brake - PEDAL_THRESHOLD) / (1.0 - PEDAL_THRESHOLD));
    clamp01(t.powf(PEDAL_EXPONENT) * PEDAL_TRIM)
}

/// Mid/high slip emphasis above the knee.
fn slip_shape(slip: f64) -> f64 {
    if slip > SLIP_KNEE {
        shape(clamp01((slip - SLIP_KNEE) / (1.0 - SLIP_KNEE)), PEDAL_EXPONENT)
    } else {
        0.0
    }
}

/// Raw (pre-envelope) brake targets for one axle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct BrakeTargets {
    feel: f64,
    hybrid: f64,
    lock: f64,
}

impl BrakeTargets {
    fn compute(base: f64, slip: f64, slip_gates: f64, lock_armed: bool) -> Self {
        let slip = clamp01(slip);
        let focus = slip_gates * slip_shape(slip);

        let lock_excess = slip - LOCK_START;
        let lock = if lock_armed && lock_excess > 0.0 {
            clamp01(lock_excess / LOCK_RANGE) * base
        } else {
            0.0
        };

        Self {
            feel: clamp01(base + SLIP_WEIGHT * focus),
            hybrid: clamp01(0.55 * base + 0.45 * focus),
            lock: clamp01(lock * LOCK_GAIN),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrakeState {
    pub feel: AxlePair<EnvelopeFollower>,
    pub hybrid: AxlePair<EnvelopeFollower>,
    pub lock: AxlePair<EnvelopeFollower>,
}

impl Default for BrakeState {
    fn default() -> Self {
        Self {
            feel: AxlePair::new(feel_follower(), feel_follower()),
            hybrid: AxlePair::new(hybrid_follower(), hybrid_follower()),
            lock: AxlePair::new(lock_follower(), lock_follower()),
        }
    }
}

impl BrakeState {
    pub fn update(&mut self, inputs: &DriverInputs, learned_slip: AxlePair<f64>) {
        let speed = inputs.speed_kmh;
        if speed < CRAWL_SPEED_KMH {
            self.reset();
            return;
        }

        let brake = inputs.brake;
        let braking = brake > PEDAL_THRESHOLD && speed > PHASE_MIN_SPEED_KMH;
        let targets = if braking {
            let base = pedal_curve(brake);
            let gates = ramp(brake, 0.30, 0.50) * ramp(speed, 20.0, 80.0);
            let lock_armed = brake > LOCK_MIN_PEDAL && speed > LOCK_MIN_SPEED_KMH;
            learned_slip.map(|slip| BrakeTargets::compute(base, slip, gates, lock_armed))
        } else {
            AxlePair::default()
        };

        self.feel.front.update(targets.front.feel);
        self.feel.rear.update(targets.rear.feel);
        self.hybrid.front.update(targets.front.hybrid);
        self.hybrid.rear.update(targets.rear.hybrid);
        self.lock.front.update(targets.front.lock);
        self.lock.rear.update(targets.rear.lock);
    }

    pub fn reset(&mut self) {
        for env in [
            &mut self.feel.front,
            &mut self.feel.rear,
            &mut self.hybrid.front,
            &mut self.hybrid.rear,
            &mut self.lock.front,
            &mut self.lock.rear,
        ] {
            env.reset();
        }
    }

    pub fn feel_level(&self) -> AxlePair<f64> {
        AxlePair::new(self.feel.front.value(), self.feel.rear.value())
    }

    pub fn hybrid_level(&self) -> AxlePair<f64> {
        AxlePair::new(self.hybrid.front.value(), self.hybrid.rear.value())
    }

    pub fn lock_level(&self) -> AxlePair<f64> {
        AxlePair::new(self.lock.front.value(), self.lock.rear.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn braking(brake: f64, speed_kmh: f64) -> DriverInputs {
        DriverInputs {
            brake,
            speed_kmh,
            ..DriverInputs::default()
        }
    }

    #[test]
    fn test_pedal_curve_endpoints() {
        assert_eq!(pedal_curve(0.0), 0.0);
        assert_eq!(pedal_curve(0.02), 0.0);
        assert!((pedal_curve(1.0) - 0.97).abs() < 1e-12);
    }

    #[test]
    fn test_feel_is_rate_limited() {
        let mut brake = BrakeState::default();
        brake.update(&braking(1.0, 120.0), AxlePair::splat(0.0));
        let first = brake.feel_level().front;
        assert!((first - FEEL_MAX_RISE * BRAKE_ALPHA).abs() < 1e-12);

        let hybrid = brake.hybrid_level().front;
        assert!((hybrid - HYBRID_MAX_RISE * BRAKE_ALPHA).abs() < 1e-12);
    }

    #[test]
    fn test_lock_needs_high_slip() {
        let mut brake = BrakeState::default();
        for _ in 0..20 {
            brake.update(&braking(0.9, 120.0), AxlePair::new(0.95, 0.5));
        }
        let lock = brake.lock_level();
        assert!(lock.front > 0.5);
        assert_eq!(lock.rear, 0.0);
    }

    #[test]
    fn test_slip_boosts_feel_on_the_slipping_axle() {
        let mut brake = BrakeState::default();
        for _ in 0..100 {
            brake.update(&braking(0.6, 120.0), AxlePair::new(0.9, 0.0));
        }
        let feel = brake.feel_level();
        assert!(feel.front > feel.rear);
        let hybrid = brake.hybrid_level();
        assert!(hybrid.front > hybrid.rear);
    }

    #[test]
    fn test_crawling_zeroes_everything_immediately() {
        let mut brake = BrakeState::default();
        for _ in 0..50 {
            brake.update(&braking(1.0, 120.0), AxlePair::splat(1.0));
        }
        assert!(brake.feel_level().front > 0.5);

        brake.update(&braking(1.0, 1.0), AxlePair::splat(1.0));
        assert_eq!(brake.feel_level(), AxlePair::splat(0.0));
        assert_eq!(brake.hybrid_level(), AxlePair::splat(0.0));
        assert_eq!(brake.lock_level(), AxlePair::splat(0.0));
    }

    #[test]
    fn test_releasing_pedal_decays_to_zero() {
        let mut brake = BrakeState::default();
        for _ in 0..50 {
            brake.update(&braking(1.0, 120.0), AxlePair::splat(0.0));
        }
        for _ in 0..30 {
            brake.update(&braking(0.0, 120.0), AxlePair::splat(0.0));
        }
        assert_eq!(brake.feel_level().front, 0.0);
    }
}
