//! Householder QR factorization and QR-based least squares

use super::{blas, Degeneracy, KernelError, KernelResult, EPS};
use crate::dtype::Element;
use crate::error::{Error, Result};

/// One Householder reflector per factored column.
///
/// With the scaling used here (`v[0] = 1`, `tau = (norm + |alpha|)/norm`)
/// the coefficient is always real, so each reflector is Hermitian and
/// `H = H^H`, which keeps the complex case free of conjugation bookkeeping
/// when assembling Q.
#[derive(Debug)]
pub struct Reflectors<T: Element> {
    tau: Vec<T>,
}

/// In-place Householder QR of an `m x n` column-major buffer.
///
/// On return the upper triangle of `a` holds R and the columns below the
/// diagonal hold the reflector tails (`v[0] = 1` implicit).
pub fn geqrf<T: Element>(m: usize, n: usize, a: &mut [T]) -> Result<Reflectors<T>> {
    if m == 0 || n == 0 || a.len() != m * n {
        return Err(Error::IllegalKernelArgument {
            kernel: "geqrf",
            reason: format!("bad dimensions m={m} n={n} len={}", a.len()),
        });
    }
    let mn = m.min(n);
    let mut tau = vec![T::zero(); mn];
    for k in 0..mn {
        let alpha = a[k + k * m];
        let tail_norm = blas::nrm2(&a[(k + 1 + k * m)..(m + k * m)]);
        let norm = (alpha.abs_val().powi(2) + tail_norm * tail_norm).sqrt();
        if norm == 0.0 {
            continue; // column already zero below and on the diagonal
        }
        let phase = if alpha.is_zero() {
            T::one()
        } else {
            alpha * T::from_real(1.0 / alpha.abs_val())
        };
        let beta = -phase * T::from_real(norm);
        let t = T::from_real((norm + alpha.abs_val()) / norm);
        tau[k] = t;
        let denom = alpha - beta;
        for i in (k + 1)..m {
            a[i + k * m] = a[i + k * m] / denom;
        }
        a[k + k * m] = beta;
        // apply H = I - tau v v^H to the trailing columns
        for j in (k + 1)..n {
            let mut w = a[k + j * m];
            for i in (k + 1)..m {
                w += a[i + k * m].conj() * a[i + j * m];
            }
            let tw = t * w;
            a[k + j * m] -= tw;
            for i in (k + 1)..m {
                let v = a[i + k * m];
                a[i + j * m] -= tw * v;
            }
        }
    }
    Ok(Reflectors { tau })
}

/// Apply the reflectors (in factored order) to an `m x nrhs` buffer,
/// computing `Q^H b` in place. Reflectors are Hermitian here, so this also
/// serves as `Q b` when applied in reverse by [`assemble_q`].
pub fn apply_q_conj<T: Element>(
    m: usize,
    nrhs: usize,
    packed: &[T],
    refl: &Reflectors<T>,
    b: &mut [T],
) {
    for k in 0..refl.tau.len() {
        let t = refl.tau[k];
        if t.is_zero() {
            continue;
        }
        for j in 0..nrhs {
            let mut w = b[k + j * m];
            for i in (k + 1)..m {
                w += packed[i + k * m].conj() * b[i + j * m];
            }
            let tw = t * w;
            b[k + j * m] -= tw;
            for i in (k + 1)..m {
                let v = packed[i + k * m];
                b[i + j * m] -= tw * v;
            }
        }
    }
}

/// Materialize the full `m x m` unitary factor from a packed
/// factorization
pub fn assemble_q<T: Element>(m: usize, packed: &[T], refl: &Reflectors<T>) -> Vec<T> {
    let mut q = vec![T::zero(); m * m];
    for k in 0..m {
        q[k + k * m] = T::one();
    }
    // Q = H_0 H_1 ... H_{mn-1}, built by applying reflectors in reverse
    for k in (0..refl.tau.len()).rev() {
        let t = refl.tau[k];
        if t.is_zero() {
            continue;
        }
        for j in 0..m {
            let mut w = q[k + j * m];
            for i in (k + 1)..m {
                w += packed[i + k * m].conj() * q[i + j * m];
            }
            let tw = t * w;
            q[k + j * m] -= tw;
            for i in (k + 1)..m {
                let v = packed[i + k * m];
                q[i + j * m] -= tw * v;
            }
        }
    }
    q
}

/// QR least-squares solve of `a * x = b`, the dgels-shaped driver.
///
/// `a` is `m x n` and is overwritten by its factorization. `b` has leading
/// dimension `max(m, n)` with the right-hand sides in its top `m` rows; on
/// success the solution occupies the top `n` rows. A rank-deficient R
/// (diagonal entry at or below `eps * max |R diag|`) reports
/// [`Degeneracy::RankDeficient`] with both buffers clobbered; the caller
/// keeps pristine copies if it intends to fall back.
pub fn gels<T: Element>(
    m: usize,
    n: usize,
    nrhs: usize,
    a: &mut [T],
    b: &mut [T],
) -> KernelResult<()> {
    let ldb = m.max(n);
    if m == 0 || n == 0 || nrhs == 0 || a.len() != m * n || b.len() != ldb * nrhs {
        return Err(KernelError::Fatal(Error::IllegalKernelArgument {
            kernel: "gels",
            reason: format!("bad dimensions m={m} n={n} nrhs={nrhs}"),
        }));
    }
    if m >= n {
        let refl = geqrf(m, n, a)?;
        check_full_rank(m, n, a)?;
        apply_q_conj(m, nrhs, a, &refl, b);
        // R x = (Q^H b)[0..n]
        for j in 0..nrhs {
            for k in (0..n).rev() {
                let mut s = b[k + j * ldb];
                for i in (k + 1)..n {
                    s -= a[k + i * m] * b[i + j * ldb];
                }
                b[k + j * ldb] = s / a[k + k * m];
            }
        }
    } else {
        // minimum-norm solution through the factorization of a^H
        let mut ah = vec![T::zero(); n * m];
        for j in 0..n {
            for i in 0..m {
                ah[j + i * n] = a[i + j * m].conj();
            }
        }
        let refl = geqrf(n, m, &mut ah)?;
        check_full_rank(n, m, &ah)?;
        // a = R^H Q^H, so solve R^H y = b then x = Q [y; 0]
        for j in 0..nrhs {
            for k in 0..m {
                let mut s = b[k + j * ldb];
                for i in 0..k {
                    s -= ah[i + k * n].conj() * b[i + j * ldb];
                }
                b[k + j * ldb] = s / ah[k + k * n].conj();
            }
            for k in m..n {
                b[k + j * ldb] = T::zero();
            }
        }
        // x = Q y: apply reflectors in reverse order
        for k in (0..refl.tau.len()).rev() {
            let t = refl.tau[k];
            if t.is_zero() {
                continue;
            }
            for j in 0..nrhs {
                let mut w = b[k + j * ldb];
                for i in (k + 1)..n {
                    w += ah[i + k * n].conj() * b[i + j * ldb];
                }
                let tw = t * w;
                b[k + j * ldb] -= tw;
                for i in (k + 1)..n {
                    let v = ah[i + k * n];
                    b[i + j * ldb] -= tw * v;
                }
            }
        }
    }
    Ok(())
}

fn check_full_rank<T: Element>(m: usize, n: usize, packed: &[T]) -> KernelResult<()> {
    let mn = m.min(n);
    let maxdiag = (0..mn)
        .map(|k| packed[k + k * m].abs_val())
        .fold(0.0f64, f64::max);
    if maxdiag == 0.0 {
        return Err(KernelError::Degenerate(Degeneracy::RankDeficient));
    }
    for k in 0..mn {
        if packed[k + k * m].abs_val() <= EPS * maxdiag {
            return Err(KernelError::Degenerate(Degeneracy::RankDeficient));
        }
    }
    Ok(())
}
