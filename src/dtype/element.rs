//! Element trait abstracting the two numeric domains
//!
//! Kernels and runners are generic over [`Element`] so every factorization
//! and solve is written once and instantiated for real and complex data,
//! mirroring the d-/z- pairing of the underlying LAPACK-style contracts.

use super::complex::Complex64;
use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Numeric element of a terminal buffer: `f64` or [`Complex64`]
pub trait Element:
    Copy
    + Debug
    + Display
    + PartialEq
    + Default
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + 'static
{
    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Lift a real value into this domain
    fn from_real(v: f64) -> Self;

    /// Complex conjugate (identity for reals)
    fn conj(self) -> Self;

    /// Magnitude as a real value
    fn abs_val(self) -> f64;

    /// Real part
    fn real(self) -> f64;

    /// True when every component is finite
    fn is_finite_val(self) -> bool;

    /// True when exactly zero
    fn is_zero(self) -> bool {
        self == Self::zero()
    }
}

impl Element for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_real(v: f64) -> Self {
        v
    }

    fn conj(self) -> Self {
        self
    }

    fn abs_val(self) -> f64 {
        self.abs()
    }

    fn real(self) -> f64 {
        self
    }

    fn is_finite_val(self) -> bool {
        self.is_finite()
    }
}

impl Element for Complex64 {
    fn zero() -> Self {
        Complex64::ZERO
    }

    fn one() -> Self {
        Complex64::ONE
    }

    fn from_real(v: f64) -> Self {
        Complex64::new(v, 0.0)
    }

    fn conj(self) -> Self {
        Complex64::conj(self)
    }

    fn abs_val(self) -> f64 {
        Complex64::abs(self)
    }

    fn real(self) -> f64 {
        self.re
    }

    fn is_finite_val(self) -> bool {
        Complex64::is_finite(self)
    }
}
