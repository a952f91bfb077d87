//! Shared test utilities for Rumble.
//!
//! # Modules
//!
//! - [`mod@must`] - `#[track_caller]` unwrap for test setup
//! - [`assertions`] - Float and range assertion macros
//! - [`fixtures`] - [`SampleBuilder`] and canned driving situations
//! - [`scenario`] - Multi-tick drivers
//! - [`prelude`] - Convenience re-exports
//!
//! ```rust,ignore
//! use rumble_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod assertions;
pub mod fixtures;
pub mod must;
pub mod prelude;
pub mod scenario;

pub use fixtures::SampleBuilder;
pub use must::must;
pub use scenario::{init_test_tracing, lerp_ticks, run_ticks};
