//! Multi-source slip fusion.
//!
//! Each estimator turns one family of channels into a per-wheel slip
//! estimate; the fusion keeps the element-wise maximum so whichever source is
//! alive and loudest wins. Estimators whose channels are silent yield zeros.

use std::fmt;
use std::sync::Arc;

use rumble_telemetry::{TelemetrySample, Wheels};

/// Cap applied to the direct and raw slip channels.
pub const SLIP_CHANNEL_CAP: f64 = 1.5;

/// One source of per-wheel slip evidence.
pub trait SlipEstimator: fmt::Debug + Send + Sync {
    /// Short identifier for logging.
    fn name(&self) -> &'static str;

    /// Non-negative slip estimate per wheel.
    fn estimate(&self, sample: &TelemetrySample) -> Wheels<f64>;
}

/// Computed longitudinal slip ratio, scaled and capped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectSlipRatio {
    pub scale: f64,
}

impl Default for DirectSlipRatio {
    fn default() -> Self {
        Self { scale: 1.2 }
    }
}

impl SlipEstimator for DirectSlipRatio {
    fn name(&self) -> &'static str {
        "slip_ratio"
    }

    fn estimate(&self, sample: &TelemetrySample) -> Wheels<f64> {
        sample
            .slip_ratio
            .map(|v| (v.abs() * self.scale).min(SLIP_CHANNEL_CAP))
    }
}

/// Raw simulator slip channel, capped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawSimSlip;

impl SlipEstimator for RawSimSlip {
    fn name(&self) -> &'static str {
        "sim_slip"
    }

    fn estimate(&self, sample: &TelemetrySample) -> Wheels<f64> {
        sample.sim_slip.map(|v| v.abs().min(SLIP_CHANNEL_CAP))
    }
}

/// Deviation of each wheel's angular speed from the four-wheel average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularSpeedDeviation {
    /// Relative deviation that reads as slip `1.0`.
    pub deviation_scale: f64,
}

impl Default for AngularSpeedDeviation {
    fn default() -> Self {
        Self {
            deviation_scale: 0.6,
        }
    }
}

impl SlipEstimator for AngularSpeedDeviation {
    fn name(&self) -> &'static str {
        "angular_speed"
    }

    fn estimate(&self, sample: &TelemetrySample) -> Wheels<f64> {
        let speeds = sample.wheel_angular_speed.map(f64::abs);
        let avg = speeds.mean();
        let denom = avg.max(1.0) * self.deviation_scale;
        speeds.map(|w| (w - avg).abs() / denom)
    }
}

/// Wheel linear speed against vehicle speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSpeedDeviation {
    /// Speed difference (km/h) that reads as slip `1.0`.
    pub range_kmh: f64,
}

impl Default for LinearSpeedDeviation {
    fn default() -> Self {
        Self { range_kmh: 40.0 }
    }
}

impl SlipEstimator for LinearSpeedDeviation {
    fn name(&self) -> &'static str {
        "linear_speed"
    }

    fn estimate(&self, sample: &TelemetrySample) -> Wheels<f64> {
        let vehicle = sample.reference_speed_kmh();
        sample.wheel_linear_speed.map(|ws| {
            let ws = ws.abs();
            if ws > 0.01 && vehicle > 0.01 {
                (ws - vehicle).abs() / self.range_kmh
            } else {
                0.0
            }
        })
    }
}

/// Ordered list of estimators combined by maximum.
#[derive(Debug, Clone)]
pub struct SlipFusion {
    estimators: Vec<Arc<dyn SlipEstimator>>,
}

impl Default for SlipFusion {
    fn default() -> Self {
        Self::standard()
    }
}

impl SlipFusion {
    /// Fusion with no sources; always reads zero.
    pub fn empty() -> Self {
        Self {
            estimators: Vec::new(),
        }
    }

    /// Direct ratio, raw channel, angular and linear speed deviation.
    pub fn standard() -> Self {
        Self::empty()
            .with(DirectSlipRatio::default())
            .with(RawSimSlip)
            .with(AngularSpeedDeviation::default())
            .with(LinearSpeedDeviation::default())
    }

    /// Append an estimator.
    pub fn with(mut self, estimator: impl SlipEstimator + 'static) -> Self {
        self.estimators.push(Arc::new(estimator));
        self
    }

    pub fn estimator_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.estimators.iter().map(|e| e.name())
    }

    pub fn len(&self) -> usize {
        self.estimators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimators.is_empty()
    }

    /// Element-wise maximum over every estimator; non-finite estimates are ignored.
    pub fn fuse(&self, sample: &TelemetrySample) -> Wheels<f64> {
        self.estimators
            .iter()
            .fold(Wheels::splat(0.0), |acc, estimator| {
                acc.zip_with(estimator.estimate(sample), |best, v| {
                    if v.is_finite() { best.max(v) } else { best }
                })
            })
    }
}
