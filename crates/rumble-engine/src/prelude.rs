//! Prelude for rumble-engine
//!
//! This module provides convenient re-exports of commonly used types.
//!
//! # Example
//!
//! ```
//! use rumble_engine::prelude::*;
//!
//! let state = step(PipelineState::default(), &Default::default());
//! assert_eq!(state.tick, 1);
//! assert_eq!(SignalBank::from_state(&state).get(Signal::GearShift), 0.0);
//! ```

pub use crate::config::{DebugConfig, GainConfig, PipelineConfig};
pub use crate::diagnostics::{DiagnosticRecorder, RecorderStatus};
pub use crate::pipeline::{HapticPipeline, PipelineState, step, step_with};
pub use crate::signals::{GainFamily, RangeClass, Signal, SignalBank};
pub use crate::slip::{SlipEstimator, SlipFusion};
pub use crate::types::{Axle, AxlePair, Dominance};
