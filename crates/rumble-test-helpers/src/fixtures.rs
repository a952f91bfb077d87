//! Telemetry sample builders for pipeline tests.

use rumble_telemetry::{TelemetrySample, Wheels};

/// Fluent builder over [`TelemetrySample`].
///
/// Starts from an all-zero sample with a 9000 rpm redline.
///
/// ```rust
/// use rumble_test_helpers::SampleBuilder;
///
/// let sample = SampleBuilder::new().speed(120.0).throttle(0.8).gear(4).build();
/// assert_eq!(sample.gear, 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SampleBuilder {
    sample: TelemetrySample,
}

impl Default for SampleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleBuilder {
    pub fn new() -> Self {
        Self {
            sample: TelemetrySample {
                max_rpm: 9000.0,
                ..TelemetrySample::default()
            },
        }
    }

    /// Start from an existing sample.
    pub fn from_sample(sample: TelemetrySample) -> Self {
        Self { sample }
    }

    /// Steady straight-line cruise: 120 km/h, 4th gear, light throttle, warm tyres.
    pub fn cruising() -> Self {
        Self::new()
            .rpm_norm(0.55)
            .speed(120.0)
            .throttle(0.35)
            .gear(4)
            .tyre_temp(85.0)
    }

    /// Standing start with both rear wheels spinning up.
    pub fn wheelspin_launch() -> Self {
        Self::new()
            .rpm_norm(0.8)
            .speed(10.0)
            .throttle(1.0)
            .gear(1)
            .tyre_temp(70.0)
            .sim_slip(Wheels::new(0.05, 0.05, 0.9, 0.9))
    }

    /// Threshold braking at speed with the fronts starting to lock.
    pub fn hard_braking() -> Self {
        Self::new()
            .rpm_norm(0.6)
            .speed(160.0)
            .brake(0.95)
            .gear(4)
            .tyre_temp(90.0)
            .sim_slip(Wheels::new(0.95, 0.95, 0.3, 0.3))
    }

    pub fn rpm(mut self, rpm: f64) -> Self {
        self.sample.rpm = rpm;
        self
    }

    /// Set rpm as a fraction of the current redline.
    pub fn rpm_norm(mut self, norm: f64) -> Self {
        self.sample.rpm = norm * self.sample.max_rpm;
        self
    }

    pub fn max_rpm(mut self, max_rpm: f64) -> Self {
        self.sample.max_rpm = max_rpm;
        self
    }

    pub fn speed(mut self, kmh: f64) -> Self {
        self.sample.speed_kmh = kmh;
        self
    }

    pub fn raw_speed(mut self, kmh: f64) -> Self {
        self.sample.raw_speed_kmh = kmh;
        self
    }

    pub fn throttle(mut self, throttle: f64) -> Self {
        self.sample.throttle = throttle;
        self
    }

    pub fn brake(mut self, brake: f64) -> Self {
        self.sample.brake = brake;
        self
    }

    pub fn clutch(mut self, clutch: f64) -> Self {
        self.sample.clutch = clutch;
        self
    }

    pub fn gear(mut self, gear: i32) -> Self {
        self.sample.gear = gear;
        self
    }

    pub fn steering(mut self, steering: f64) -> Self {
        self.sample.steering = steering;
        self
    }

    /// Same temperature on every tyre.
    pub fn tyre_temp(mut self, degrees: f64) -> Self {
        self.sample.tyre_temp = Wheels::splat(degrees);
        self
    }

    pub fn motion(mut self, surge: f64, sway: f64, heave: f64) -> Self {
        self.sample.surge = surge;
        self.sample.sway = sway;
        self.sample.heave = heave;
        self
    }

    pub fn suspension_travel(mut self, travel: Wheels<f64>) -> Self {
        self.sample.suspension_travel = travel;
        self
    }

    pub fn damper_velocity(mut self, velocity: Wheels<f64>) -> Self {
        self.sample.damper_velocity = velocity;
        self
    }

    pub fn slip_ratio(mut self, slip: Wheels<f64>) -> Self {
        self.sample.slip_ratio = slip;
        self
    }

    pub fn sim_slip(mut self, slip: Wheels<f64>) -> Self {
        self.sample.sim_slip = slip;
        self
    }

    pub fn wheel_angular_speed(mut self, speed: Wheels<f64>) -> Self {
        self.sample.wheel_angular_speed = speed;
        self
    }

    pub fn wheel_linear_speed(mut self, speed: Wheels<f64>) -> Self {
        self.sample.wheel_linear_speed = speed;
        self
    }

    pub fn build(self) -> TelemetrySample {
        self.sample
    }
}
