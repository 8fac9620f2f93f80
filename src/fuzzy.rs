//! Bitwise and tolerance-based ("fuzzy") comparison utilities
//!
//! Used by runners for structure probes and by tests for mathematical
//! equality of results. Tolerance comparison has two thresholds: an
//! absolute error floor for values of tiny magnitude and a relative error
//! bound that is invariant of magnitude.

use crate::dtype::Complex64;

/// Default absolute tolerance used by mathematical-equality checks
pub const DEFAULT_MAX_ABS_ERROR: f64 = 1e-14;

/// Default relative tolerance used by mathematical-equality checks
pub const DEFAULT_MAX_REL_ERROR: f64 = 1e-14;

/// Compare two doubles for approximate equality.
///
/// NaN is never equal to anything (IEEE 754 "unordered"). Infinities are
/// equal only to infinities of the same sign. Otherwise the values are
/// equal when their difference passes the absolute threshold, or failing
/// that, the relative threshold scaled by the larger magnitude.
pub fn single_fuzzy_equals(val1: f64, val2: f64, maxabserror: f64, maxrelerror: f64) -> bool {
    if val1.is_nan() || val2.is_nan() {
        return false;
    }
    if val1.is_infinite() || val2.is_infinite() {
        return val1 == val2;
    }
    let diff = (val1 - val2).abs();
    if diff <= maxabserror {
        return true;
    }
    let scale = val1.abs().max(val2.abs());
    diff / scale <= maxrelerror
}

/// Complex variant of [`single_fuzzy_equals`]: both components must pass
pub fn single_fuzzy_equals_complex(
    val1: Complex64,
    val2: Complex64,
    maxabserror: f64,
    maxrelerror: f64,
) -> bool {
    single_fuzzy_equals(val1.re, val2.re, maxabserror, maxrelerror)
        && single_fuzzy_equals(val1.im, val2.im, maxabserror, maxrelerror)
}

/// Elementwise fuzzy comparison of two real arrays
pub fn array_fuzzy_equals(arr1: &[f64], arr2: &[f64], maxabserror: f64, maxrelerror: f64) -> bool {
    arr1.len() == arr2.len()
        && arr1
            .iter()
            .zip(arr2)
            .all(|(&a, &b)| single_fuzzy_equals(a, b, maxabserror, maxrelerror))
}

/// Elementwise fuzzy comparison of two complex arrays
pub fn array_fuzzy_equals_complex(
    arr1: &[Complex64],
    arr2: &[Complex64],
    maxabserror: f64,
    maxrelerror: f64,
) -> bool {
    arr1.len() == arr2.len()
        && arr1
            .iter()
            .zip(arr2)
            .all(|(&a, &b)| single_fuzzy_equals_complex(a, b, maxabserror, maxrelerror))
}

/// Bitwise equality of two real arrays (NaN payloads and signed zeros
/// distinguish)
pub fn array_bit_equals(arr1: &[f64], arr2: &[f64]) -> bool {
    arr1.len() == arr2.len()
        && arr1
            .iter()
            .zip(arr2)
            .all(|(a, b)| a.to_bits() == b.to_bits())
}

/// Bitwise equality of two complex arrays
pub fn array_bit_equals_complex(arr1: &[Complex64], arr2: &[Complex64]) -> bool {
    arr1.len() == arr2.len()
        && arr1.iter().zip(arr2).all(|(a, b)| {
            a.re.to_bits() == b.re.to_bits() && a.im.to_bits() == b.im.to_bits()
        })
}
