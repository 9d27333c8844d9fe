//! # Utility Modules
//!
//! Configuration, logger setup and constants used by the binary and the
//! demo router.
//!
//! ## Available Utilities
//!
//! - **Config** (`config`) - environment driven settings
//! - **Constants** (`constant`) - defaults
//! - **Telemetry** (`telemetry`) - global `tracing` subscriber setup

pub mod config;
pub mod constant;
pub mod telemetry;
