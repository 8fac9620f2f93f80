//! MLDIVIDE: cascading left-division solve of `a * x = b`
//!
//! The cascade probes the structure of `a` and takes the cheapest
//! numerically trustworthy route: triangular back-substitution (with row
//! permutation detection), Cholesky for Hermitian input, LU with partial
//! pivoting, QR least squares, and finally an SVD minimum-norm solve.
//! Every factorization is gated by a reciprocal 1-norm condition
//! estimate; an estimate indistinguishable from zero in floating point
//! (`1 + rcond == 1`) rejects the route and advances the cascade.
//! Degenerate kernel outcomes advance the cascade with a warning; illegal
//! kernel arguments abort the tree run.
//!
//! A square route that was structurally applicable but condition-rejected
//! marks the matrix singular: its failure transition goes straight to
//! `TryQr`, skipping Cholesky and LU, so the skip rule lives in the
//! transition graph rather than a flag.

use super::{push, push_complex_dense, push_real_dense, scalar_of};
use crate::convert;
use crate::dtype::{Complex64, Element};
use crate::error::{Error, Result};
use crate::graph::register::RegContainer;
use crate::kernel::cholesky::{potrf, potrs};
use crate::kernel::lu::{getrf, getrs};
use crate::kernel::qr::gels;
use crate::kernel::svd::svd_lstsq;
use crate::kernel::triangular::{
    is_hermitian, is_zero_matrix, permute_rows, probe_triangular, solve_triangular, TriangularForm,
};
use crate::kernel::{blas, cond, Degeneracy, KernelError, Trans};
use crate::terminal::Terminal;

/// Solve `a * x = b`, choosing the cheapest trustworthy route
pub fn run(regs: &RegContainer, a: &Terminal, b: &Terminal) -> Result<()> {
    // left-division convention: mldivide(a, b) = b / a for scalars
    if let (Some(av), Some(bv)) = (scalar_of(a), scalar_of(b)) {
        // a 1x1 zero divisor is the zero-matrix case and fills with +Inf,
        // same as the dense route below
        let x = if av.abs() == 0.0 {
            log::warn!("mldivide: matrix is entirely zero, result is +Inf");
            Complex64::new(f64::INFINITY, 0.0)
        } else {
            bv / av
        };
        if a.is_complex() || b.is_complex() {
            push(regs, Terminal::ComplexScalar(x));
        } else {
            push(regs, Terminal::RealScalar(x.re));
        }
        return Ok(());
    }
    if a.rows() != b.rows() {
        return Err(Error::ShapeMismatch {
            op: "mldivide",
            lhs_rows: a.rows(),
            lhs_cols: a.cols(),
            rhs_rows: b.rows(),
            rhs_cols: b.cols(),
        });
    }
    let (m, n, nrhs) = (a.rows(), a.cols(), b.cols());
    if a.is_complex() || b.is_complex() {
        let x = solve::<Complex64>(
            m,
            n,
            nrhs,
            &convert::to_complex_dense(a)?.data(),
            &convert::to_complex_dense(b)?.data(),
        )?;
        push_complex_dense(regs, x, n, nrhs)
    } else {
        let x = solve::<f64>(
            m,
            n,
            nrhs,
            &convert::to_real_dense(a)?.data(),
            &convert::to_real_dense(b)?.data(),
        )?;
        push_real_dense(regs, x, n, nrhs)
    }
}

/// Cascade states, attempted strictly in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    TryTriangular,
    TryCholesky,
    TryLu,
    TryQr,
    TrySvd,
}

/// The accepted-rcond gate: an estimate this small is numerically zero
fn rcond_ok(rcond: f64) -> bool {
    1.0 + rcond != 1.0
}

/// Solve `a x = b` for dense `a` (`m x n`) and `b` (`m x nrhs`); the
/// result is `n x nrhs`. `a` and `b` stay pristine; every state works on
/// its own copy, so a failed route restores nothing.
fn solve<T: Element>(m: usize, n: usize, nrhs: usize, a: &[T], b: &[T]) -> Result<Vec<T>> {
    if is_zero_matrix(a) {
        log::warn!("mldivide: matrix is entirely zero, result is +Inf");
        return Ok(vec![T::from_real(f64::INFINITY); n * nrhs]);
    }

    // condition-rejected square routes transition straight to TryQr,
    // see the module header
    let mut state = if m == n { State::TryTriangular } else { State::TryQr };

    loop {
        match state {
            State::TryTriangular => {
                match probe_triangular(n, a) {
                    TriangularForm::Lower { unit } => {
                        log::debug!("mldivide: lower triangular form detected (unit={unit})");
                        let rcond = cond::trcon(n, a, false, unit, blas::onenorm(n, n, a))?;
                        if rcond_ok(rcond) {
                            let mut x = b.to_vec();
                            solve_triangular(n, nrhs, a, false, unit, Trans::No, &mut x)?;
                            return Ok(x);
                        }
                        log::warn!("mldivide: triangular matrix singular to working precision (rcond={rcond:e})");
                        state = State::TryQr;
                    }
                    TriangularForm::Upper { unit } => {
                        log::debug!("mldivide: upper triangular form detected (unit={unit})");
                        let rcond = cond::trcon(n, a, true, unit, blas::onenorm(n, n, a))?;
                        if rcond_ok(rcond) {
                            let mut x = b.to_vec();
                            solve_triangular(n, nrhs, a, true, unit, Trans::No, &mut x)?;
                            return Ok(x);
                        }
                        log::warn!("mldivide: triangular matrix singular to working precision (rcond={rcond:e})");
                        state = State::TryQr;
                    }
                    TriangularForm::PermutedUpper { perm, unit } => {
                        log::debug!("mldivide: row-permuted upper triangular form detected (unit={unit})");
                        let mut ap = a.to_vec();
                        permute_rows(n, n, &perm, &mut ap);
                        let rcond = cond::trcon(n, &ap, true, unit, blas::onenorm(n, n, &ap))?;
                        if rcond_ok(rcond) {
                            let mut x = b.to_vec();
                            permute_rows(n, nrhs, &perm, &mut x);
                            solve_triangular(n, nrhs, &ap, true, unit, Trans::No, &mut x)?;
                            return Ok(x);
                        }
                        // the permuted working copy is dropped here; later
                        // states always start over from the original a
                        log::warn!("mldivide: permuted triangular matrix singular to working precision (rcond={rcond:e})");
                        state = State::TryQr;
                    }
                    TriangularForm::None => state = State::TryCholesky,
                }
            }
            State::TryCholesky => {
                if !is_hermitian(n, a) {
                    state = State::TryLu;
                    continue;
                }
                log::debug!("mldivide: input is Hermitian, attempting Cholesky");
                let mut l = a.to_vec();
                match potrf(n, &mut l) {
                    Ok(()) => {
                        let rcond = cond::pocon(n, &l, blas::onenorm(n, n, a))?;
                        if rcond_ok(rcond) {
                            let mut x = b.to_vec();
                            potrs(n, nrhs, &l, &mut x)?;
                            return Ok(x);
                        }
                        log::warn!("mldivide: Cholesky factor singular to working precision (rcond={rcond:e})");
                        state = State::TryQr;
                    }
                    Err(KernelError::Degenerate(Degeneracy::NotPositiveDefinite)) => {
                        log::debug!("mldivide: matrix not positive definite, falling back to LU");
                        state = State::TryLu;
                    }
                    Err(KernelError::Degenerate(_)) => state = State::TryLu,
                    Err(KernelError::Fatal(e)) => return Err(e),
                }
            }
            State::TryLu => {
                log::debug!("mldivide: attempting LU with partial pivoting");
                let anorm = blas::onenorm(n, n, a);
                let mut lu = a.to_vec();
                let (ipiv, zero_pivot) = getrf(n, n, &mut lu)?;
                if zero_pivot.is_some() {
                    log::warn!("mldivide: exact zero pivot, matrix is singular");
                    state = State::TryQr;
                    continue;
                }
                let rcond = cond::gecon(n, &lu, &ipiv, anorm)?;
                if rcond_ok(rcond) {
                    let mut x = b.to_vec();
                    getrs(n, nrhs, &lu, &ipiv, Trans::No, &mut x)?;
                    return Ok(x);
                }
                log::warn!("mldivide: LU factor singular to working precision (rcond={rcond:e})");
                state = State::TryQr;
            }
            State::TryQr => {
                log::debug!("mldivide: attempting QR least squares");
                let ldb = m.max(n);
                let mut aw = a.to_vec();
                // pad the right-hand side when the system is wide so the
                // solution rows fit in place
                let mut bw = vec![T::zero(); ldb * nrhs];
                for j in 0..nrhs {
                    bw[j * ldb..j * ldb + m].copy_from_slice(&b[j * m..(j + 1) * m]);
                }
                match gels(m, n, nrhs, &mut aw, &mut bw) {
                    Ok(()) => {
                        let mut x = vec![T::zero(); n * nrhs];
                        for j in 0..nrhs {
                            x[j * n..(j + 1) * n].copy_from_slice(&bw[j * ldb..j * ldb + n]);
                        }
                        return Ok(x);
                    }
                    Err(KernelError::Degenerate(Degeneracy::RankDeficient)) => {
                        log::warn!("mldivide: rank deficient system, falling back to SVD");
                        state = State::TrySvd;
                    }
                    Err(KernelError::Degenerate(_)) => state = State::TrySvd,
                    Err(KernelError::Fatal(e)) => return Err(e),
                }
            }
            State::TrySvd => {
                log::debug!("mldivide: SVD minimum-norm solve");
                return svd_lstsq(m, n, nrhs, a, b);
            }
        }
    }
}
