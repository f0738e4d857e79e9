//! Input/output helpers.
//!
//! - sample table ingest + validation (`ingest`)
//! - score exports (CSV/JSON) and sample table writing (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
