//! Shared types for the gridsim backtesting workspace.
//!
//! This crate provides the pieces every other crate builds on:
//! - Labeled [time, security] grids (`Frame`)
//! - The fixed security universe with label lookup (`Universe`)
//! - Timestamp conventions and helpers
//! - Common error types

pub mod error;
pub mod frame;
pub mod types;

pub use error::{Error, Result};
pub use frame::Frame;
pub use types::{ts_to_datetime, TimestampMs, Universe, UNLIMITED_SIZE};
