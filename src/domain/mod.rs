//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - quantity kinds and series identity (`QuantityKind`, `SeriesKey`)
//! - loaded sample tables (`Series`) and their scores (`Score`)
//! - run configuration (`CompareConfig`, `SampleConfig`)

pub mod types;

pub use types::*;
