//! The Styblinski–Tang benchmark function.
//!
//! `f(p) = 0.5 * Σ (pᵢ⁴ - 16 pᵢ² + 5 pᵢ)`, separable over its inputs.

/// Coordinate of the global minimum along every axis.
pub const MINIMUM_COORD: f64 = -2.903534;

/// Value of one axis term at [`MINIMUM_COORD`]. The global minimum in
/// `d` dimensions is `d * MINIMUM_PER_DIM`.
pub const MINIMUM_PER_DIM: f64 = -39.16616570377142;

/// One axis term `g(t) = 0.5 (t⁴ - 16t² + 5t)`.
#[inline]
pub fn term(t: f64) -> f64 {
    let t2 = t * t;
    0.5 * (t2 * t2 - 16.0 * t2 + 5.0 * t)
}

/// `f(x, y) = g(x) + g(y)`
#[inline]
pub fn styblinski_tang_2d(x: f64, y: f64) -> f64 {
    term(x) + term(y)
}

pub fn styblinski_tang(point: &[f64]) -> f64 {
    point.iter().map(|&t| term(t)).sum()
}
