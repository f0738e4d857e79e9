//! `gauss-compare` library crate.
//!
//! The binary (`gcmp`) is a thin wrapper around this library so that:
//!
//! - loading, scoring and figure building are testable without spawning processes
//! - the CLI and the terminal viewer share one pipeline

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
