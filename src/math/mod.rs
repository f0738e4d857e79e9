//! Mathematical utilities: the Gaussian family and error metrics.

pub mod gaussian;
pub mod rmse;

pub use gaussian::*;
pub use rmse::*;
