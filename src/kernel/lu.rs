//! Partial-pivot LU factorization and its solves

use super::Trans;
use crate::dtype::Element;
use crate::error::{Error, Result};

/// In-place packed LU with partial pivoting of an `m x n` column-major
/// buffer.
///
/// On return `a` holds U in its upper triangle and the unit-lower factor's
/// multipliers below the diagonal; `ipiv[k]` is the row swapped with row
/// `k` at step `k`. A column with no usable pivot leaves an exact zero on
/// the diagonal; the factorization still completes and the first such
/// column is reported so callers can treat the matrix as singular.
pub fn getrf<T: Element>(m: usize, n: usize, a: &mut [T]) -> Result<(Vec<usize>, Option<usize>)> {
    if m == 0 || n == 0 || a.len() != m * n {
        return Err(Error::IllegalKernelArgument {
            kernel: "getrf",
            reason: format!("bad dimensions m={m} n={n} len={}", a.len()),
        });
    }
    let mn = m.min(n);
    let mut ipiv = vec![0usize; mn];
    let mut first_zero_pivot = None;
    for k in 0..mn {
        // pivot: largest magnitude on or below the diagonal of column k
        let mut p = k;
        let mut best = a[k + k * m].abs_val();
        for i in (k + 1)..m {
            let v = a[i + k * m].abs_val();
            if v > best {
                best = v;
                p = i;
            }
        }
        ipiv[k] = p;
        if p != k {
            for j in 0..n {
                a.swap(k + j * m, p + j * m);
            }
        }
        let pivot = a[k + k * m];
        if pivot.is_zero() {
            if first_zero_pivot.is_none() {
                first_zero_pivot = Some(k);
            }
            continue;
        }
        for i in (k + 1)..m {
            let mult = a[i + k * m] / pivot;
            a[i + k * m] = mult;
            for j in (k + 1)..n {
                let u = a[k + j * m];
                a[i + j * m] -= mult * u;
            }
        }
    }
    Ok((ipiv, first_zero_pivot))
}

/// Solve `a * x = b` (or the conjugate-transpose system) from a packed
/// square factorization produced by [`getrf`]. `b` is `n x nrhs` and is
/// overwritten with the solution.
pub fn getrs<T: Element>(
    n: usize,
    nrhs: usize,
    lu: &[T],
    ipiv: &[usize],
    trans: Trans,
    b: &mut [T],
) -> Result<()> {
    if n == 0 || nrhs == 0 || lu.len() != n * n || ipiv.len() != n || b.len() != n * nrhs {
        return Err(Error::IllegalKernelArgument {
            kernel: "getrs",
            reason: format!("bad dimensions n={n} nrhs={nrhs}"),
        });
    }
    match trans {
        Trans::No => {
            // apply P, then L y = Pb, then U x = y
            for k in 0..n {
                if ipiv[k] != k {
                    for j in 0..nrhs {
                        b.swap(k + j * n, ipiv[k] + j * n);
                    }
                }
            }
            for j in 0..nrhs {
                for k in 0..n {
                    let bk = b[k + j * n];
                    for i in (k + 1)..n {
                        let l = lu[i + k * n];
                        b[i + j * n] -= l * bk;
                    }
                }
                for k in (0..n).rev() {
                    b[k + j * n] = b[k + j * n] / lu[k + k * n];
                    let bk = b[k + j * n];
                    for i in 0..k {
                        let u = lu[i + k * n];
                        b[i + j * n] -= u * bk;
                    }
                }
            }
        }
        Trans::Conj => {
            // solve U^H y = b, then L^H z = y, then x = P^T z
            for j in 0..nrhs {
                for k in 0..n {
                    let mut sum = b[k + j * n];
                    for i in 0..k {
                        sum -= lu[i + k * n].conj() * b[i + j * n];
                    }
                    b[k + j * n] = sum / lu[k + k * n].conj();
                }
                for k in (0..n).rev() {
                    let mut sum = b[k + j * n];
                    for i in (k + 1)..n {
                        sum -= lu[i + k * n].conj() * b[i + j * n];
                    }
                    b[k + j * n] = sum;
                }
            }
            for k in (0..n).rev() {
                if ipiv[k] != k {
                    for j in 0..nrhs {
                        b.swap(k + j * n, ipiv[k] + j * n);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Expand a packed rectangular factorization into explicit factors.
///
/// Returns (`l`, `u`) where `l` is `m x min(m,n)` with the row permutation
/// already applied (so `l * u` reconstructs the original matrix) and `u`
/// is `min(m,n) x n` upper trapezoidal.
pub fn unpack_lu<T: Element>(
    m: usize,
    n: usize,
    lu: &[T],
    ipiv: &[usize],
) -> (Vec<T>, Vec<T>) {
    let mn = m.min(n);
    let mut l = vec![T::zero(); m * mn];
    let mut u = vec![T::zero(); mn * n];
    for j in 0..mn {
        l[j + j * m] = T::one();
        for i in (j + 1)..m {
            l[i + j * m] = lu[i + j * m];
        }
    }
    for j in 0..n {
        for i in 0..mn.min(j + 1) {
            u[i + j * mn] = lu[i + j * m];
        }
    }
    // undo the pivoting on L: apply the recorded swaps in reverse
    for k in (0..mn).rev() {
        if ipiv[k] != k {
            for j in 0..mn {
                l.swap(k + j * m, ipiv[k] + j * m);
            }
        }
    }
    (l, u)
}
