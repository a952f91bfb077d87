//! Telemetry capabilities consumed and exposed by the haptic pipeline.
//!
//! The pipeline never talks to a simulator directly. It depends on two small
//! capabilities defined here:
//!
//! - [`TelemetrySource`]: read a named scalar, with a fallback, never failing
//! - [`SignalSink`]: publish a named scalar once per tick
//!
//! ## Modules
//! - `channels` - names of every external channel the pipeline reads
//! - `source` - the read capability and a map-backed implementation
//! - `sample` - the immutable per-tick [`TelemetrySample`] snapshot
//! - `sink` - the publish capability and a map-backed implementation

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod channels;
pub mod sample;
pub mod sink;
pub mod source;

pub use sample::{CoreTelemetry, TelemetrySample, Wheels, parse_gear};
pub use sink::{MapSink, SignalSink};
pub use source::{ChannelValue, MapSource, TelemetrySource};

/// RPM ceiling assumed when the host does not report one.
pub const DEFAULT_MAX_RPM: f64 = 9000.0;
