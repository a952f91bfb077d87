//! Envelope followers
//!
//! Recursive exponential filters that turn abrupt per-tick estimates into
//! non-jittery intensities. All followers hold their output in `[0, 1]`.

use crate::primitives::{smooth, snap_to_zero};
use crate::slew_rate::limit_rise;

/// Common interface for stateful followers.
pub trait Envelope {
    /// Feed one tick's target and return the new envelope level.
    fn update(&mut self, target: f64) -> f64;

    /// Current envelope level.
    fn value(&self) -> f64;

    /// Reset the follower to silence.
    fn reset(&mut self);
}

/// Smoothing follower with a structural per-tick decay.
///
/// Each tick: optional upward rate limit, smooth toward the target with
/// `alpha`, multiply by `decay`, snap to zero below `0.001`, cap at `1`.
/// A decay below one guarantees the envelope falls silent under sustained
/// flat input.
///
/// # Example
///
/// ```
/// use rumble_filters::{Envelope, EnvelopeFollower};
///
/// let mut impact = EnvelopeFollower::new(0.65, 0.82);
/// impact.update(1.0);
/// for _ in 0..10 {
///     impact.update(0.0);
/// }
/// assert_eq!(impact.value(), 0.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EnvelopeFollower {
    /// Smoothing coefficient toward the target
    pub alpha: f64,
    /// Multiplicative decay applied after smoothing
    pub decay: f64,
    /// Maximum upward step per tick, applied before smoothing
    pub max_rise: Option<f64>,
    /// Whether sub-epsilon levels are snapped to zero
    pub snap: bool,
    value: f64,
}

impl EnvelopeFollower {
    /// Create a snapping follower with the given smoothing and decay.
    pub const fn new(alpha: f64, decay: f64) -> Self {
        Self {
            alpha,
            decay,
            max_rise: None,
            snap: true,
            value: 0.0,
        }
    }

    /// Plain exponential moving average (no decay).
    pub const fn ema(alpha: f64) -> Self {
        Self::new(alpha, 1.0)
    }

    /// Limit how far the target may sit above the current level.
    pub const fn with_max_rise(mut self, step: f64) -> Self {
        self.max_rise = Some(step);
        self
    }

    /// Keep tiny residual levels instead of snapping them to zero.
    pub const fn without_snap(mut self) -> Self {
        self.snap = false;
        self
    }

    /// Jump straight to `value`, used to seed an envelope on its first sample.
    pub fn seed(&mut self, value: f64) {
        self.value = if value.is_finite() { value.min(1.0) } else { 0.0 };
    }
}

impl Envelope for EnvelopeFollower {
    #[inline]
    fn update(&mut self, target: f64) -> f64 {
        let target = match self.max_rise {
            Some(step) => limit_rise(self.value, target, step),
            None => target,
        };
        let mut next = smooth(self.value, target, self.alpha) * self.decay;
        if self.snap {
            next = snap_to_zero(next);
        }
        self.value = if next.is_finite() { next.min(1.0) } else { 0.0 };
        self.value
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Instant-blend attack, pure geometric decay.
///
/// Rising targets are blended in with weight `attack`; otherwise the
/// previous level is multiplied by `decay`, never dropping below the target.
/// Shared by the slip learner's drive stage and the corner-phase envelopes.
#[inline]
pub fn attack_decay(prev: f64, target: f64, attack: f64, decay: f64) -> f64 {
    if target > prev {
        prev + (target - prev) * attack
    } else {
        (prev * decay).max(target)
    }
}

/// Follower that punches in fast and bleeds out geometrically.
///
/// ```
/// use rumble_filters::{AsymmetricFollower, Envelope};
///
/// let mut env = AsymmetricFollower::new(0.55, 0.68);
/// let up = env.update(1.0);
/// assert!((up - 0.55).abs() < 1e-12);
/// let down = env.update(0.0);
/// assert!((down - 0.55 * 0.68).abs() < 1e-12);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AsymmetricFollower {
    /// Blend weight toward a rising target
    pub attack: f64,
    /// Per-tick multiplier when the target is not rising
    pub decay: f64,
    value: f64,
}

impl AsymmetricFollower {
    /// Create a follower with the given attack blend and decay factor.
    pub const fn new(attack: f64, decay: f64) -> Self {
        Self {
            attack,
            decay,
            value: 0.0,
        }
    }
}

impl Envelope for AsymmetricFollower {
    #[inline]
    fn update(&mut self, target: f64) -> f64 {
        let next = snap_to_zero(attack_decay(self.value, target, self.attack, self.decay));
        self.value = if next.is_finite() { next.min(1.0) } else { 0.0 };
        self.value
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Exponential smoother with separate rise and fall coefficients.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DualRateSmoother {
    /// Smoothing coefficient while the target is above the level
    pub rise: f64,
    /// Smoothing coefficient otherwise
    pub fall: f64,
    value: f64,
}

impl DualRateSmoother {
    /// Create a smoother with the given rise and fall coefficients.
    pub const fn new(rise: f64, fall: f64) -> Self {
        Self {
            rise,
            fall,
            value: 0.0,
        }
    }

    /// Apply an extra multiplicative decay to the current level.
    #[inline]
    pub fn decay(&mut self, factor: f64) {
        self.value *= factor;
    }
}

impl Envelope for DualRateSmoother {
    #[inline]
    fn update(&mut self, target: f64) -> f64 {
        let alpha = if target > self.value { self.rise } else { self.fall };
        let next = smooth(self.value, target, alpha);
        self.value = if next.is_finite() { next } else { 0.0 };
        self.value
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn reset(&mut self) {
        self.value = 0.0;
    }
}
