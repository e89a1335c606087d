//! Shared numerical primitives for complex field arithmetic.

use std::f64::consts::TAU;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for optical fields and transfer values.
pub type CScalar = num_complex::Complex<Scalar>;

/// Returns the complex exponential `e^(j * theta)` using `Scalar` precision.
#[must_use]
pub fn phasor(theta: Scalar) -> CScalar {
    CScalar::from_polar(1.0, theta)
}

/// Reduces an angle to its principal value in `[0, 2π)`.
#[must_use]
pub fn wrap_phase(theta: Scalar) -> Scalar {
    let wrapped = theta.rem_euclid(TAU);
    if wrapped == TAU { 0.0 } else { wrapped }
}
