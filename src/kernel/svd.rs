//! One-sided Jacobi singular value decomposition and SVD least squares

use super::{blas, EPS};
use crate::dtype::Element;
use crate::error::{Error, Result};

const MAX_SWEEPS: usize = 30;

/// Thin SVD of an `m x n` column-major buffer: `a = u * diag(s) * v^H`
/// with `u` `m x k`, `s` descending, `v` `n x k`, `k = min(m, n)`.
///
/// One-sided Jacobi orthogonalizes the columns of a working copy; a
/// complex column pair is phase-rotated to make its Gram off-diagonal
/// real before the plane rotation. Failure to converge within the sweep
/// limit is fatal.
pub fn jacobi_svd<T: Element>(
    m: usize,
    n: usize,
    a: &[T],
) -> Result<(Vec<T>, Vec<f64>, Vec<T>)> {
    if m == 0 || n == 0 || a.len() != m * n {
        return Err(Error::IllegalKernelArgument {
            kernel: "jacobi_svd",
            reason: format!("bad dimensions m={m} n={n} len={}", a.len()),
        });
    }
    if m < n {
        // factor the adjoint and swap the side factors
        let mut ah = vec![T::zero(); n * m];
        for j in 0..n {
            for i in 0..m {
                ah[j + i * n] = a[i + j * m].conj();
            }
        }
        let (u2, s, v2) = jacobi_svd(n, m, &ah)?;
        return Ok((v2, s, u2));
    }

    let mut b = a.to_vec();
    let mut v = vec![T::zero(); n * n];
    for k in 0..n {
        v[k + k * n] = T::one();
    }

    let mut converged = false;
    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;
        for p in 0..n {
            for q in (p + 1)..n {
                let mut app = 0.0f64;
                let mut aqq = 0.0f64;
                let mut apq = T::zero();
                for i in 0..m {
                    let bp = b[i + p * m];
                    let bq = b[i + q * m];
                    app += bp.abs_val() * bp.abs_val();
                    aqq += bq.abs_val() * bq.abs_val();
                    apq += bp.conj() * bq;
                }
                let off = apq.abs_val();
                if off <= EPS * (app * aqq).sqrt() || off == 0.0 {
                    continue;
                }
                rotated = true;
                // rotate column q by the conjugate phase so the Gram
                // off-diagonal becomes real, then apply a real rotation
                let phase = apq * T::from_real(1.0 / off);
                let pc = phase.conj();
                let zeta = (aqq - app) / (2.0 * off);
                let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;
                let (cs, ss) = (T::from_real(c), T::from_real(s));
                for i in 0..m {
                    let bp = b[i + p * m];
                    let bq = b[i + q * m] * pc;
                    b[i + p * m] = cs * bp - ss * bq;
                    b[i + q * m] = ss * bp + cs * bq;
                }
                for i in 0..n {
                    let vp = v[i + p * n];
                    let vq = v[i + q * n] * pc;
                    v[i + p * n] = cs * vp - ss * vq;
                    v[i + q * n] = ss * vp + cs * vq;
                }
            }
        }
        if !rotated {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(Error::ConvergenceFailure {
            kernel: "jacobi_svd",
        });
    }

    // singular values are the column norms; normalize to get U
    let mut order: Vec<usize> = (0..n).collect();
    let norms: Vec<f64> = (0..n).map(|j| blas::nrm2(&b[j * m..(j + 1) * m])).collect();
    order.sort_by(|&x, &y| norms[y].partial_cmp(&norms[x]).unwrap_or(std::cmp::Ordering::Equal));

    let mut u = vec![T::zero(); m * n];
    let mut s = vec![0.0f64; n];
    let mut vs = vec![T::zero(); n * n];
    for (dst, &src) in order.iter().enumerate() {
        s[dst] = norms[src];
        if norms[src] > 0.0 {
            let inv = T::from_real(1.0 / norms[src]);
            for i in 0..m {
                u[i + dst * m] = b[i + src * m] * inv;
            }
        }
        for i in 0..n {
            vs[i + dst * n] = v[i + src * n];
        }
    }
    Ok((u, s, vs))
}

/// Extend `k` orthonormal columns of length `m` (zero columns allowed) to
/// a full `m x m` orthonormal basis by Gram-Schmidt against unit vectors
pub fn complete_basis<T: Element>(m: usize, k: usize, thin: &[T]) -> Vec<T> {
    let mut full = vec![T::zero(); m * m];
    let mut have = 0usize;
    for j in 0..k.min(m) {
        let col = &thin[j * m..(j + 1) * m];
        if blas::nrm2(col) > 0.5 {
            full[have * m..(have + 1) * m].copy_from_slice(col);
            have += 1;
        }
    }
    let mut cand = 0usize;
    while have < m && cand < m {
        let mut w = vec![T::zero(); m];
        w[cand] = T::one();
        for j in 0..have {
            let mut dot = T::zero();
            for i in 0..m {
                dot += full[i + j * m].conj() * w[i];
            }
            for i in 0..m {
                let f = full[i + j * m];
                w[i] -= dot * f;
            }
        }
        let norm = blas::nrm2(&w);
        if norm > 1e-8 {
            let inv = T::from_real(1.0 / norm);
            for i in 0..m {
                full[i + have * m] = w[i] * inv;
            }
            have += 1;
        }
        cand += 1;
    }
    full
}

/// Minimum-norm least-squares solve via the SVD, the gelsd-shaped driver.
///
/// Singular values at or below `max(m, n) * eps * s_max` are treated as
/// zero. Returns the `n x nrhs` solution.
pub fn svd_lstsq<T: Element>(
    m: usize,
    n: usize,
    nrhs: usize,
    a: &[T],
    b: &[T],
) -> Result<Vec<T>> {
    if b.len() != m * nrhs {
        return Err(Error::IllegalKernelArgument {
            kernel: "svd_lstsq",
            reason: format!("rhs length {} does not match m={m} nrhs={nrhs}", b.len()),
        });
    }
    let (u, s, v) = jacobi_svd(m, n, a)?;
    let k = m.min(n);
    let smax = s.first().copied().unwrap_or(0.0);
    let cutoff = (m.max(n) as f64) * EPS * smax;
    let mut x = vec![T::zero(); n * nrhs];
    for j in 0..nrhs {
        for l in 0..k {
            if s[l] <= cutoff || s[l] == 0.0 {
                continue;
            }
            let mut coeff = T::zero();
            for i in 0..m {
                coeff += u[i + l * m].conj() * b[i + j * m];
            }
            coeff = coeff * T::from_real(1.0 / s[l]);
            for i in 0..n {
                let vi = v[i + l * n];
                x[i + j * n] += vi * coeff;
            }
        }
    }
    Ok(x)
}
