//! Per-tick telemetry snapshot.

use serde::{Deserialize, Serialize};

use crate::channels;
use crate::source::TelemetrySource;

/// One value per wheel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Wheels<T> {
    pub fl: T,
    pub fr: T,
    pub rl: T,
    pub rr: T,
}

impl<T> Wheels<T> {
    pub const fn new(fl: T, fr: T, rl: T, rr: T) -> Self {
        Self { fl, fr, rl, rr }
    }

    /// Apply `f` to every wheel.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Wheels<U> {
        Wheels {
            fl: f(self.fl),
            fr: f(self.fr),
            rl: f(self.rl),
            rr: f(self.rr),
        }
    }

    /// Combine two per-wheel sets element-wise.
    pub fn zip_with<U, V>(self, other: Wheels<U>, mut f: impl FnMut(T, U) -> V) -> Wheels<V> {
        Wheels {
            fl: f(self.fl, other.fl),
            fr: f(self.fr, other.fr),
            rl: f(self.rl, other.rl),
            rr: f(self.rr, other.rr),
        }
    }

    /// Wheels in FL, FR, RL, RR order.
    pub fn into_array(self) -> [T; 4] {
        [self.fl, self.fr, self.rl, self.rr]
    }
}

impl Wheels<f64> {
    /// Same value on every wheel.
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn front_mean(&self) -> f64 {
        0.5 * (self.fl + self.fr)
    }

    pub fn rear_mean(&self) -> f64 {
        0.5 * (self.rl + self.rr)
    }

    pub fn mean(&self) -> f64 {
        0.25 * (self.fl + self.fr + self.rl + self.rr)
    }
}

/// Typed per-tick values every host exposes directly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoreTelemetry<'a> {
    pub rpm: f64,
    /// Redline; zero or negative means unknown.
    pub max_rpm: f64,
    pub speed_kmh: f64,
    pub throttle: f64,
    pub brake: f64,
    /// Tyre temperatures in degrees.
    pub tyre_temp: Wheels<f64>,
    /// Gear as reported by the host ("1", "N", "R", ...).
    pub gear: &'a str,
}

/// Immutable inputs for one physics tick.
///
/// Optional channels that a simulator does not expose are simply zero; every
/// consumer tolerates silent channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySample {
    pub rpm: f64,
    pub max_rpm: f64,
    pub speed_kmh: f64,
    /// Raw simulator speed, used where the typed speed reads zero.
    pub raw_speed_kmh: f64,
    pub throttle: f64,
    pub brake: f64,
    pub clutch: f64,
    pub tyre_temp: Wheels<f64>,
    pub suspension_travel: Wheels<f64>,
    pub damper_velocity: Wheels<f64>,
    pub slip_ratio: Wheels<f64>,
    pub sim_slip: Wheels<f64>,
    pub wheel_angular_speed: Wheels<f64>,
    pub wheel_linear_speed: Wheels<f64>,
    /// Steering, either normalized or an angle depending on the simulator.
    pub steering: f64,
    /// 0 is neutral; reverse and unknown gears also read 0.
    pub gear: i32,
    pub surge: f64,
    pub sway: f64,
    pub heave: f64,
}

impl TelemetrySample {
    /// Build a snapshot from typed host values plus named channels.
    pub fn from_source<S: TelemetrySource + ?Sized>(core: &CoreTelemetry<'_>, source: &S) -> Self {
        Self {
            rpm: core.rpm,
            max_rpm: core.max_rpm,
            speed_kmh: core.speed_kmh,
            raw_speed_kmh: source.read_or(channels::RAW_SPEED_KMH, 0.0),
            throttle: core.throttle,
            brake: core.brake,
            clutch: source.read_first(&channels::CLUTCH).clamp(0.0, 1.0),
            tyre_temp: core.tyre_temp,
            suspension_travel: source.read_wheels(&channels::SUSPENSION_TRAVEL),
            damper_velocity: source.read_wheels(&channels::DAMPER_VELOCITY),
            slip_ratio: source.read_wheels(&channels::SLIP_RATIO),
            sim_slip: source.read_wheels(&channels::SIM_SLIP),
            wheel_angular_speed: source.read_wheels(&channels::WHEEL_ANGULAR_SPEED),
            wheel_linear_speed: source.read_wheels(&channels::WHEEL_LINEAR_SPEED),
            steering: source.read_first(&channels::STEERING),
            gear: parse_gear(core.gear),
            surge: source.read_or(channels::SURGE, 0.0),
            sway: source.read_or(channels::SWAY, 0.0),
            heave: source.read_or(channels::HEAVE, 0.0),
        }
    }

    /// Copy with every non-finite field replaced by zero.
    pub fn sanitized(self) -> Self {
        let f = |v: f64| if v.is_finite() { v } else { 0.0 };
        let w = |w: Wheels<f64>| w.map(f);
        Self {
            rpm: f(self.rpm),
            max_rpm: f(self.max_rpm),
            speed_kmh: f(self.speed_kmh),
            raw_speed_kmh: f(self.raw_speed_kmh),
            throttle: f(self.throttle),
            brake: f(self.brake),
            clutch: f(self.clutch),
            tyre_temp: w(self.tyre_temp),
            suspension_travel: w(self.suspension_travel),
            damper_velocity: w(self.damper_velocity),
            slip_ratio: w(self.slip_ratio),
            sim_slip: w(self.sim_slip),
            wheel_angular_speed: w(self.wheel_angular_speed),
            wheel_linear_speed: w(self.wheel_linear_speed),
            steering: f(self.steering),
            gear: self.gear,
            surge: f(self.surge),
            sway: f(self.sway),
            heave: f(self.heave),
        }
    }

    /// Speed used to compare against wheel linear speed.
    pub fn reference_speed_kmh(&self) -> f64 {
        if self.speed_kmh > 0.0 {
            self.speed_kmh
        } else {
            self.raw_speed_kmh
        }
    }
}

/// Parse the host's gear text; anything that is not an integer is neutral.
///
/// ```
/// use rumble_telemetry::parse_gear;
///
/// assert_eq!(parse_gear(" 3 "), 3);
/// assert_eq!(parse_gear("N"), 0);
/// assert_eq!(parse_gear("R"), 0);
/// ```
pub fn parse_gear(text: &str) -> i32 {
    text.trim().parse().unwrap_or(0)
}
