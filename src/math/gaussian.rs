//! Closed-form Gaussian and its first two derivatives.
//!
//! With `u = x - b`:
//!
//! - `g(x)   = exp(-a u^2)`
//! - `g'(x)  = -2a u exp(-a u^2)`
//! - `g''(x) = -2a (1 - 2a u^2) exp(-a u^2)`

use crate::domain::{GaussianParams, QuantityKind};

pub fn value(x: f64, params: GaussianParams) -> f64 {
    let u = x - params.b;
    (-params.a * u * u).exp()
}

pub fn first_derivative(x: f64, params: GaussianParams) -> f64 {
    let u = x - params.b;
    -2.0 * params.a * u * (-params.a * u * u).exp()
}

pub fn second_derivative(x: f64, params: GaussianParams) -> f64 {
    let u = x - params.b;
    -2.0 * params.a * (1.0 - 2.0 * params.a * u * u) * (-params.a * u * u).exp()
}

/// Evaluate the family member matching `kind` at `x`.
pub fn evaluate(kind: QuantityKind, x: f64, params: GaussianParams) -> f64 {
    match kind {
        QuantityKind::Value => value(x, params),
        QuantityKind::FirstDerivative => first_derivative(x, params),
        QuantityKind::SecondDerivative => second_derivative(x, params),
    }
}

/// Reference curve over `xs`, same order and length.
pub fn reference(kind: QuantityKind, xs: &[f64], params: GaussianParams) -> Vec<f64> {
    xs.iter().map(|&x| evaluate(kind, x, params)).collect()
}
