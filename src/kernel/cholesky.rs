//! Cholesky factorization of Hermitian positive-definite matrices

use super::{Degeneracy, KernelError, KernelResult};
use crate::dtype::Element;
use crate::error::Error;

/// In-place lower Cholesky of an `n x n` Hermitian buffer.
///
/// On success the lower triangle holds L with `a = L * L^H`; the strict
/// upper triangle is zeroed. A non-positive (or non-finite) pivot reports
/// [`Degeneracy::NotPositiveDefinite`], leaving `a` partially overwritten.
pub fn potrf<T: Element>(n: usize, a: &mut [T]) -> KernelResult<()> {
    if n == 0 || a.len() != n * n {
        return Err(KernelError::Fatal(Error::IllegalKernelArgument {
            kernel: "potrf",
            reason: format!("bad dimensions n={n} len={}", a.len()),
        }));
    }
    for j in 0..n {
        let mut s = a[j + j * n];
        for k in 0..j {
            let l = a[j + k * n];
            s -= l * l.conj();
        }
        let djj = s.real();
        if !(djj > 0.0) || !djj.is_finite() {
            return Err(KernelError::Degenerate(Degeneracy::NotPositiveDefinite));
        }
        let ljj = T::from_real(djj.sqrt());
        a[j + j * n] = ljj;
        for i in (j + 1)..n {
            let mut s = a[i + j * n];
            for k in 0..j {
                let li = a[i + k * n];
                let lj = a[j + k * n];
                s -= li * lj.conj();
            }
            a[i + j * n] = s / ljj;
        }
        for i in 0..j {
            a[i + j * n] = T::zero();
        }
    }
    Ok(())
}

/// Solve `(L * L^H) x = b` from a factor produced by [`potrf`]. `b` is
/// `n x nrhs`, overwritten with the solution.
pub fn potrs<T: Element>(n: usize, nrhs: usize, l: &[T], b: &mut [T]) -> crate::error::Result<()> {
    if n == 0 || nrhs == 0 || l.len() != n * n || b.len() != n * nrhs {
        return Err(Error::IllegalKernelArgument {
            kernel: "potrs",
            reason: format!("bad dimensions n={n} nrhs={nrhs}"),
        });
    }
    for j in 0..nrhs {
        // L y = b
        for k in 0..n {
            let mut s = b[k + j * n];
            for i in 0..k {
                s -= l[k + i * n] * b[i + j * n];
            }
            b[k + j * n] = s / l[k + k * n];
        }
        // L^H x = y
        for k in (0..n).rev() {
            let mut s = b[k + j * n];
            for i in (k + 1)..n {
                s -= l[i + k * n].conj() * b[i + j * n];
            }
            b[k + j * n] = s / l[k + k * n].conj();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::blas::gemm;

    #[test]
    fn spd_factor_solves() {
        // [4 2; 2 3]
        let src = [4.0, 2.0, 2.0, 3.0];
        let mut a = src;
        potrf(2, &mut a).unwrap();
        let mut b = [6.0, 5.0];
        potrs(2, 1, &a, &mut b).unwrap();
        let mut check = [0.0; 2];
        gemm(2, 1, 2, &src, &b, &mut check).unwrap();
        assert!((check[0] - 6.0).abs() < 1e-12);
        assert!((check[1] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn indefinite_is_degenerate() {
        let mut a = [1.0, 2.0, 2.0, 1.0];
        assert!(matches!(
            potrf(2, &mut a),
            Err(KernelError::Degenerate(Degeneracy::NotPositiveDefinite))
        ));
    }
}
