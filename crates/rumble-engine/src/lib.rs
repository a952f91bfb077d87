//! Haptic Telemetry Pipeline for Rumble
//!
//! This crate turns one telemetry snapshot per physics tick into a catalogue of
//! normalized haptic signals: slip, brake feel and lock, traction, tyre scrub,
//! road feel, suspension, clutch free-rev and gearshift kicks.
//!
//! # Overview
//!
//! - **Pipeline**: [`HapticPipeline`] owns the state, the signal bank, the
//!   configuration and the optional diagnostic log
//! - **Pure step**: [`step`] advances a [`PipelineState`] without any I/O
//! - **Slip fusion**: pluggable [`SlipEstimator`]s feed per-axle learners that
//!   adapt to each car's slip range
//! - **Signals**: [`Signal`] enumerates every published value with its range
//!   and gain family
//!
//! # RT Safety Guarantees
//!
//! - **No heap allocations** in [`PipelineState::advance`]
//! - **Infallible ticks**: non-finite telemetry is zeroed before any module runs
//! - **Bounded outputs**: every signal is clamped to its declared range
//!
//! # Architecture
//!
//! ```text
//! TelemetrySource → TelemetrySample → PipelineState::advance → SignalBank
//!                                            ↓                      ↓
//!                                    DiagnosticRecorder      publish(SignalSink)
//! ```
//!
//! # Example
//!
//! ```
//! use rumble_engine::prelude::*;
//! use rumble_telemetry::{MapSink, TelemetrySample};
//!
//! let mut pipeline = HapticPipeline::new(PipelineConfig::default())?;
//! pipeline.update(&TelemetrySample {
//!     rpm: 4500.0,
//!     max_rpm: 9000.0,
//!     ..TelemetrySample::default()
//! });
//!
//! let mut sink = MapSink::new();
//! pipeline.publish(&mut sink);
//! assert_eq!(sink.get("Rumble.Engine.RpmNorm"), Some(0.5));
//! # Ok::<(), rumble_errors::RumbleError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_debug_implementations)]

pub mod basic;
pub mod brake;
pub mod clutch;
pub mod config;
pub mod diagnostics;
pub mod engine_tyres;
pub mod gearshift;
pub mod motion;
pub mod pipeline;
pub mod prelude;
pub mod road_feel;
pub mod scrub;
pub mod signals;
pub mod slip;
pub mod steering;
pub mod surface;
pub mod suspension;
pub mod traction;
pub mod types;

pub use config::{DebugConfig, GainConfig, PipelineConfig};
pub use diagnostics::{DiagnosticRecorder, RecorderStatus};
pub use pipeline::{HapticPipeline, PipelineState, step, step_with};
pub use signals::{GainFamily, RangeClass, Signal, SignalBank};
pub use slip::{
    AngularSpeedDeviation, AxleSlipLearner, DirectSlipRatio, LinearSpeedDeviation, RawSimSlip,
    SlipEstimator, SlipFusion,
};
pub use types::{Axle, AxlePair, Dominance};
