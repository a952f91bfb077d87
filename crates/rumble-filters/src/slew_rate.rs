//! Upward slew rate limiting
//!
//! Haptic envelopes may fall as fast as they like but may only climb by a
//! bounded step per tick, so a one-tick telemetry glitch reads as a ramp.

/// Limit `desired` to at most `max_step` above `prev`. Downward motion is free.
///
/// # Example
///
/// ```
/// use rumble_filters::limit_rise;
///
/// assert!((limit_rise(0.10, 1.0, 0.03) - 0.13).abs() < 1e-12);
/// assert_eq!(limit_rise(0.50, 0.0, 0.03), 0.0);
/// ```
#[inline]
pub fn limit_rise(prev: f64, desired: f64, max_step: f64) -> f64 {
    let ceiling = prev + max_step;
    if desired > ceiling { ceiling } else { desired }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_rise_step_response() {
        let mut value = 0.0;
        for _ in 0..10 {
            value = limit_rise(value, 1.0, 0.05);
        }
        assert!((value - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_limit_rise_no_change_needed() {
        assert_eq!(limit_rise(0.5, 0.52, 0.05), 0.52);
    }

    #[test]
    fn test_limit_rise_zero_step_holds() {
        assert_eq!(limit_rise(0.4, 0.9, 0.0), 0.4);
    }
}
