// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Tolerant comparisons of electrical quantities.

/// Absolute tolerance used when comparing powers and voltages.
pub(crate) const EPSILON: f64 = 1e-6;

pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

pub(crate) fn approx_zero(a: f64) -> bool {
    approx_eq(a, 0.0)
}

/// `a >= b`, with equality checked within [`EPSILON`].
pub(crate) fn approx_ge(a: f64, b: f64) -> bool {
    a > b || approx_eq(a, b)
}

/// `a <= b`, with equality checked within [`EPSILON`].
pub(crate) fn approx_le(a: f64, b: f64) -> bool {
    a < b || approx_eq(a, b)
}
