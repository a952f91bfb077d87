//! Multi-tick drivers and test logging.

use std::sync::Once;

use rumble_telemetry::TelemetrySample;
use tracing_subscriber::EnvFilter;

/// Feed `ticks` samples, produced per tick index, to `on_tick`.
///
/// ```rust
/// use rumble_test_helpers::{SampleBuilder, run_ticks};
///
/// let mut seen = 0;
/// run_ticks(5, |_| SampleBuilder::new().build(), |_, _| seen += 1);
/// assert_eq!(seen, 5);
/// ```
pub fn run_ticks<S, F>(ticks: usize, mut sample_at: S, mut on_tick: F)
where
    S: FnMut(usize) -> TelemetrySample,
    F: FnMut(usize, &TelemetrySample),
{
    for tick in 0..ticks {
        let sample = sample_at(tick);
        on_tick(tick, &sample);
    }
}

/// Linear ramp from `from` (tick 0) to `to` (tick `ticks - 1`).
pub fn lerp_ticks(from: f64, to: f64, ticks: usize, tick: usize) -> f64 {
    if ticks <= 1 {
        return to;
    }
    let t = tick.min(ticks - 1) as f64 / (ticks - 1) as f64;
    from + (to - from) * t
}

static TRACING: Once = Once::new();

/// Install a test subscriber honouring `RUST_LOG`; safe to call repeatedly.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
