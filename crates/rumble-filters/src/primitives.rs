//! Normalization primitives
//!
//! Every function here is total: it accepts any `f64`, including NaN and the
//! infinities, and never produces a non-finite result from the clamping family.

/// Envelopes below this level are snapped to exactly zero.
pub const SNAP_EPSILON: f64 = 0.001;

/// Clamp to `[0, 1]`, mapping NaN and the infinities to `0`.
///
/// ```
/// use rumble_filters::clamp01;
///
/// assert_eq!(clamp01(1.5), 1.0);
/// assert_eq!(clamp01(f64::NAN), 0.0);
/// assert_eq!(clamp01(f64::INFINITY), 0.0);
/// ```
#[inline]
pub fn clamp01(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    v.clamp(0.0, 1.0)
}

/// Clamp to `[-1, 1]`, mapping NaN and the infinities to `0`.
#[inline]
pub fn clamp_signed(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    v.clamp(-1.0, 1.0)
}

/// Map `value` from `[min, max]` onto `[0, 1]`.
///
/// Returns `0` for non-finite input or a degenerate range (`max <= min`).
///
/// ```
/// use rumble_filters::normalize_range;
///
/// assert_eq!(normalize_range(80.0, 50.0, 110.0), 0.5);
/// assert_eq!(normalize_range(1.0, 2.0, 2.0), 0.0);
/// ```
#[inline]
pub fn normalize_range(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() || max <= min {
        return 0.0;
    }
    clamp01((value - min) / (max - min))
}

/// Exponential smoothing step: `prev + (target - prev) * alpha`.
///
/// `alpha <= 0` holds the previous value, `alpha >= 1` jumps to the target.
///
/// ```
/// use rumble_filters::smooth;
///
/// assert_eq!(smooth(0.2, 0.8, 0.0), 0.2);
/// assert_eq!(smooth(0.2, 0.8, 1.0), 0.8);
/// assert!((smooth(0.0, 1.0, 0.3) - 0.3).abs() < 1e-12);
/// ```
#[inline]
pub fn smooth(prev: f64, target: f64, alpha: f64) -> f64 {
    if alpha <= 0.0 {
        return prev;
    }
    if alpha >= 1.0 {
        return target;
    }
    prev + (target - prev) * alpha
}

/// Linear interpolation with `t` saturated to `[0, 1]`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }
    a + (b - a) * t
}

/// Gate that ramps from 0 at `start` to 1 at `start + width`.
#[inline]
pub fn ramp(value: f64, start: f64, width: f64) -> f64 {
    clamp01((value - start) / width)
}

/// Cubic smoothstep knee `s²(3 - 2s)` on a clamped input.
#[inline]
pub fn smoothstep(s: f64) -> f64 {
    let s = clamp01(s);
    s * s * (3.0 - 2.0 * s)
}

/// Raise a positive value to `exponent`; zero and negative inputs give zero.
#[inline]
pub fn shape(value: f64, exponent: f64) -> f64 {
    if value > 0.0 { value.powf(exponent) } else { 0.0 }
}

/// Replace values below [`SNAP_EPSILON`] with exactly zero.
#[inline]
pub fn snap_to_zero(value: f64) -> f64 {
    if value < SNAP_EPSILON { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_signed_bounds() {
        assert_eq!(clamp_signed(-4.0), -1.0);
        assert_eq!(clamp_signed(0.25), 0.25);
        assert_eq!(clamp_signed(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_normalize_range_clamps_both_ends() {
        assert_eq!(normalize_range(20.0, 50.0, 110.0), 0.0);
        assert_eq!(normalize_range(140.0, 50.0, 110.0), 1.0);
        assert_eq!(normalize_range(f64::NAN, 50.0, 110.0), 0.0);
        assert_eq!(normalize_range(5.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_lerp_saturates() {
        assert_eq!(lerp(0.30, 0.04, -1.0), 0.30);
        assert_eq!(lerp(0.30, 0.04, 2.0), 0.04);
        assert!((lerp(0.35, 0.80, 0.5) - 0.575).abs() < 1e-12);
    }

    #[test]
    fn test_ramp_midpoint() {
        assert!((ramp(55.0, 20.0, 70.0) - 0.5).abs() < 1e-12);
        assert_eq!(ramp(10.0, 20.0, 80.0), 0.0);
    }

    #[test]
    fn test_smoothstep_endpoints_and_symmetry() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-12);
        assert!((smoothstep(0.25) + smoothstep(0.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_shape_ignores_non_positive() {
        assert_eq!(shape(0.0, 0.38), 0.0);
        assert_eq!(shape(-0.5, 1.8), 0.0);
        assert!((shape(0.25, 0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_snap_to_zero() {
        assert_eq!(snap_to_zero(0.0009), 0.0);
        assert_eq!(snap_to_zero(0.001), 0.001);
        assert_eq!(snap_to_zero(-0.2), 0.0);
    }
}
