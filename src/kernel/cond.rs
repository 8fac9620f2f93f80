//! Reciprocal condition number estimation in the 1-norm
//!
//! Hager's method estimates `||A^-1||_1` from a handful of solves with
//! the factorized matrix and its conjugate transpose, the same contract
//! as the LAPACK `*con` family. `rcond = 1 / (||A||_1 * ||A^-1||_1)`.

use super::cholesky::potrs;
use super::lu::getrs;
use super::triangular::solve_triangular;
use super::Trans;
use crate::dtype::Element;
use crate::error::Result;

const MAX_ITERS: usize = 5;

/// Estimate `||A^-1||_1` given a solver for `A x = b` and `A^H x = b`.
/// The closure overwrites its argument with the solution.
fn inv_onenorm_estimate<T, F>(n: usize, mut solve: F) -> Result<f64>
where
    T: Element,
    F: FnMut(&mut [T], Trans) -> Result<()>,
{
    let mut x = vec![T::from_real(1.0 / n as f64); n];
    let mut est = 0.0f64;
    for _ in 0..MAX_ITERS {
        solve(&mut x, Trans::No)?;
        est = x.iter().map(|v| v.abs_val()).sum();
        // steepest-ascent direction: the sign pattern of the solution
        let mut xi: Vec<T> = x
            .iter()
            .map(|&v| {
                let a = v.abs_val();
                if a == 0.0 {
                    T::one()
                } else {
                    v * T::from_real(1.0 / a)
                }
            })
            .collect();
        solve(&mut xi, Trans::Conj)?;
        let (mut jmax, mut zmax) = (0usize, 0.0f64);
        for (j, z) in xi.iter().enumerate() {
            if z.abs_val() > zmax {
                zmax = z.abs_val();
                jmax = j;
            }
        }
        // stationary when no unit vector improves on the current estimate
        let dot: f64 = xi
            .iter()
            .zip(x.iter())
            .map(|(z, xv)| (z.conj() * *xv).real())
            .sum();
        if zmax <= dot.abs() {
            break;
        }
        x = vec![T::zero(); n];
        x[jmax] = T::one();
    }
    Ok(est)
}

fn rcond_from(anorm: f64, inv_est: f64) -> f64 {
    if anorm == 0.0 || inv_est == 0.0 {
        return 0.0;
    }
    let r = 1.0 / (anorm * inv_est);
    // a non-finite estimate must read as numerically singular, never as
    // a passing condition number
    if r.is_finite() {
        r
    } else {
        0.0
    }
}

/// Reciprocal condition estimate from an LU factorization ([`getrs`] form)
pub fn gecon<T: Element>(n: usize, lu: &[T], ipiv: &[usize], anorm: f64) -> Result<f64> {
    let est = inv_onenorm_estimate(n, |b: &mut [T], t| getrs(n, 1, lu, ipiv, t, b))?;
    Ok(rcond_from(anorm, est))
}

/// Reciprocal condition estimate from a Cholesky factor ([`potrs`] form);
/// the factorized matrix is Hermitian so both solve directions coincide
pub fn pocon<T: Element>(n: usize, l: &[T], anorm: f64) -> Result<f64> {
    let est = inv_onenorm_estimate(n, |b: &mut [T], _t| potrs(n, 1, l, b))?;
    Ok(rcond_from(anorm, est))
}

/// Reciprocal condition estimate of a triangular matrix
pub fn trcon<T: Element>(
    n: usize,
    a: &[T],
    upper: bool,
    unit: bool,
    anorm: f64,
) -> Result<f64> {
    let est =
        inv_onenorm_estimate(n, |b: &mut [T], t| solve_triangular(n, 1, a, upper, unit, t, b))?;
    Ok(rcond_from(anorm, est))
}
