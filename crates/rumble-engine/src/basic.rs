//! Basic normalization: rpm, speed, pedals and tyre temperature.

use rumble_filters::{clamp01, normalize_range, smooth};
use rumble_telemetry::{DEFAULT_MAX_RPM, TelemetrySample, Wheels};
use tracing::trace;

/// Speed that maps to `1.0` on the normalized scale.
pub const SPEED_SCALE_KMH: f64 = 350.0;
/// Tyre temperature window mapped onto `[0, 1]`.
pub const TYRE_TEMP_RANGE: (f64, f64) = (50.0, 110.0);
pub const TYRE_ALPHA: f64 = 0.30;

/// Normalized driver and engine inputs for the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriverInputs {
    pub rpm_norm: f64,
    pub speed_norm: f64,
    /// Vehicle speed as reported, used by the km/h thresholds.
    pub speed_kmh: f64,
    pub throttle: f64,
    pub brake: f64,
    pub clutch: f64,
    pub gear: i32,
}

impl DriverInputs {
    pub fn from_sample(sample: &TelemetrySample) -> Self {
        let max_rpm = if sample.max_rpm > 0.0 {
            sample.max_rpm
        } else {
            DEFAULT_MAX_RPM
        };
        Self {
            rpm_norm: clamp01(sample.rpm / max_rpm),
            speed_norm: clamp01(sample.speed_kmh / SPEED_SCALE_KMH),
            speed_kmh: sample.speed_kmh,
            throttle: clamp01(sample.throttle),
            brake: clamp01(sample.brake),
            clutch: clamp01(sample.clutch),
            gear: sample.gear,
        }
    }
}

/// Smoothed tyre temperature intensities.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TyreState {
    initialized: bool,
    pub wheels: Wheels<f64>,
    pub front: f64,
    pub rear: f64,
    pub all: f64,
}

impl TyreState {
    /// Normalize temperatures; the first tick seeds the envelopes directly.
    pub fn update(&mut self, temps: &Wheels<f64>) {
        let (min, max) = TYRE_TEMP_RANGE;
        let raw = temps.map(|t| normalize_range(t, min, max));

        if !self.initialized {
            self.wheels = raw;
            self.front = raw.front_mean();
            self.rear = raw.rear_mean();
            self.all = raw.mean();
            self.initialized = true;
            trace!(all = self.all, "Seeded tyre intensities");
            return;
        }

        self.wheels = self
            .wheels
            .zip_with(raw, |prev, target| smooth(prev, target, TYRE_ALPHA));
        self.front = smooth(self.front, raw.front_mean(), TYRE_ALPHA);
        self.rear = smooth(self.rear, raw.rear_mean(), TYRE_ALPHA);
        self.all = smooth(self.all, raw.mean(), TYRE_ALPHA);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
