//! Suspension: per-corner hybrid intensity, axle vibration and impact detection.
//!
//! Travel deltas are the primary signal; damper velocity adds up to 70% on top
//! when the simulator exposes it and fades out entirely when it does not.

use rumble_filters::{Envelope, EnvelopeFollower, clamp01, lerp, ramp, smooth};
use rumble_telemetry::{TelemetrySample, Wheels};
use tracing::trace;

use crate::types::AxlePair;

/// Travel delta (m) to normalized intensity.
pub const TRAVEL_SCALE: f64 = 8.0;
/// Damper velocity (m/s) to normalized intensity.
pub const DAMPER_SCALE: f64 = 4.0;
/// Maximum extra weight the damper channel may add.
pub const MAX_DAMPER_WEIGHT: f64 = 0.7;
pub const CORNER_ALPHA: f64 = 0.50;

pub const IMPACT_TRAVEL_THRESHOLD: f64 = 0.06;
pub const IMPACT_TRAVEL_RANGE: f64 = 0.18;
pub const IMPACT_DAMPER_THRESHOLD: f64 = 0.20;
pub const IMPACT_DAMPER_RANGE: f64 = 0.80;

/// Vibration speed gate: ramps over speed-norm 0.01 to 0.11.
const VIBRATION_GATE: (f64, f64) = (0.01, 0.10);
/// Impact speed gate: ramps over speed-norm 0.01 to 0.07.
const IMPACT_GATE: (f64, f64) = (0.01, 0.06);

fn vibration_follower() -> EnvelopeFollower {
    EnvelopeFollower::new(0.45, 0.97)
}

fn impact_follower() -> EnvelopeFollower {
    EnvelopeFollower::new(0.65, 0.82)
}

/// `clamp01(travel + damper * weight)`.
#[inline]
fn hybrid(travel_n: f64, damper_n: f64, damper_weight: f64) -> f64 {
    clamp01(travel_n + damper_n * damper_weight)
}

/// Ramp a spike above `threshold` to full scale over `range`.
#[inline]
fn spike(value: f64, threshold: f64, range: f64) -> f64 {
    if value > threshold {
        clamp01((value - threshold) / range)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuspensionState {
    prev_travel: Option<Wheels<f64>>,
    /// Absolute travel deltas from the last tick.
    pub deltas: Wheels<f64>,
    /// Smoothed per-corner hybrid intensity.
    pub corners: Wheels<f64>,
    pub vibration: AxlePair<EnvelopeFollower>,
    pub impact: AxlePair<EnvelopeFollower>,
}

impl Default for SuspensionState {
    fn default() -> Self {
        Self {
            prev_travel: None,
            deltas: Wheels::default(),
            corners: Wheels::default(),
            vibration: AxlePair::new(vibration_follower(), vibration_follower()),
            impact: AxlePair::new(impact_follower(), impact_follower()),
        }
    }
}

impl SuspensionState {
    pub fn update(&mut self, sample: &TelemetrySample, speed_norm: f64) {
        let travel = sample.suspension_travel;
        let prev = match self.prev_travel {
            Some(prev) => prev,
            None => {
                trace!("Seeded suspension travel");
                travel
            }
        };
        self.prev_travel = Some(travel);

        let deltas = travel.zip_with(prev, |now, before| (now - before).abs());
        let damper = sample.damper_velocity.map(f64::abs);
        self.deltas = deltas;

        self.update_corners(&deltas, &damper);

        let travel_axle = AxlePair::new(deltas.front_mean(), deltas.rear_mean());
        let damper_axle = AxlePair::new(damper.front_mean(), damper.rear_mean());

        let vibration_gate = ramp(speed_norm, VIBRATION_GATE.0, VIBRATION_GATE.1);
        let impact_gate = ramp(speed_norm, IMPACT_GATE.0, IMPACT_GATE.1);

        for (travel, damper, vibration, impact) in [
            (
                travel_axle.front,
                damper_axle.front,
                &mut self.vibration.front,
                &mut self.impact.front,
            ),
            (
                travel_axle.rear,
                damper_axle.rear,
                &mut self.vibration.rear,
                &mut self.impact.rear,
            ),
        ] {
            let travel_n = clamp01(travel * TRAVEL_SCALE);
            let damper_n = clamp01(damper * DAMPER_SCALE);
            let weight = lerp(0.0, MAX_DAMPER_WEIGHT, damper_n);
            vibration.update(hybrid(travel_n, damper_n, weight) * vibration_gate);

            let travel_spike = spike(travel, IMPACT_TRAVEL_THRESHOLD, IMPACT_TRAVEL_RANGE);
            let damper_spike = spike(damper, IMPACT_DAMPER_THRESHOLD, IMPACT_DAMPER_RANGE);
            impact.update(travel_spike.max(damper_spike) * impact_gate);
        }
    }

    fn update_corners(&mut self, deltas: &Wheels<f64>, damper: &Wheels<f64>) {
        let travel_n = deltas.map(|d| clamp01(d * TRAVEL_SCALE));
        let damper_n = damper.map(|d| clamp01(d * DAMPER_SCALE));

        let front_weight = lerp(0.0, MAX_DAMPER_WEIGHT, clamp01(damper_n.front_mean()));
        let rear_weight = lerp(0.0, MAX_DAMPER_WEIGHT, clamp01(damper_n.rear_mean()));

        let raw = Wheels::new(
            hybrid(travel_n.fl, damper_n.fl, front_weight),
            hybrid(travel_n.fr, damper_n.fr, front_weight),
            hybrid(travel_n.rl, damper_n.rl, rear_weight),
            hybrid(travel_n.rr, damper_n.rr, rear_weight),
        );
        self.corners = self
            .corners
            .zip_with(raw, |prev, target| smooth(prev, target, CORNER_ALPHA));
    }

    pub fn vibration_level(&self) -> AxlePair<f64> {
        AxlePair::new(self.vibration.front.value(), self.vibration.rear.value())
    }

    pub fn impact_level(&self) -> AxlePair<f64> {
        AxlePair::new(self.impact.front.value(), self.impact.rear.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn travel(front: f64, rear: f64) -> TelemetrySample {
        TelemetrySample {
            suspension_travel: Wheels::new(front, front, rear, rear),
            ..TelemetrySample::default()
        }
    }

    #[test]
    fn test_first_tick_has_no_delta() {
        let mut susp = SuspensionState::default();
        susp.update(&travel(0.3, 0.3), 0.5);
        assert_eq!(susp.deltas, Wheels::default());
        assert!(susp.impact_level().front.abs() < 1e-12);
    }

    #[test]
    fn test_travel_spike_fires_impact_then_releases() {
        let mut susp = SuspensionState::default();
        susp.update(&travel(0.0, 0.0), 0.5);
        susp.update(&travel(0.24, 0.0), 0.5);

        // (0.24 - 0.06) / 0.18 = 1.0 -> smooth 0.65 -> x0.82
        let fired = susp.impact_level().front;
        assert!((fired - 0.65 * 0.82).abs() < 1e-12);
        assert!(susp.impact_level().rear.abs() < 1e-12);

        let mut ticks = 0;
        while susp.impact_level().front > 0.0 {
            susp.update(&travel(0.24, 0.0), 0.5);
            ticks += 1;
            assert!(ticks <= 35, "impact did not release");
        }
    }

    #[test]
    fn test_impact_is_gated_at_standstill() {
        let mut susp = SuspensionState::default();
        susp.update(&travel(0.0, 0.0), 0.0);
        susp.update(&travel(0.5, 0.5), 0.0);
        assert!(susp.impact_level().front.abs() < 1e-12);
        assert!(susp.vibration_level().front.abs() < 1e-12);
    }

    #[test]
    fn test_damper_alone_drives_vibration() {
        let mut susp = SuspensionState::default();
        let sample = TelemetrySample {
            damper_velocity: Wheels::splat(0.1),
            ..TelemetrySample::default()
        };
        susp.update(&sample, 0.5);
        // damper_n = 0.4, weight = 0.28, hybrid = 0.112
        let expected = 0.112 * 0.45 * 0.97;
        assert!((susp.vibration_level().rear - expected).abs() < 1e-12);
    }

    #[test]
    fn test_sustained_flat_input_goes_silent() {
        let mut susp = SuspensionState::default();
        for i in 0..400 {
            let offset = if i % 2 == 0 { 0.0 } else { 0.01 };
            let sample = travel(offset, offset);
            susp.update(&sample, 0.5);
        }
        // Constant alternating delta converges to a bounded fixed point.
        assert!(susp.vibration_level().front < 0.6);
        for _ in 0..400 {
            susp.update(&travel(0.0, 0.0), 0.5);
        }
        assert!(susp.vibration_level().front.abs() < 1e-12);
    }
}
