//! Level 1-3 primitives: products, norms, finiteness scan

use crate::dtype::Element;
use crate::error::{Error, Result};

fn check_dims(kernel: &'static str, m: usize, n: usize, k: usize) -> Result<()> {
    if m == 0 || n == 0 || k == 0 {
        return Err(Error::IllegalKernelArgument {
            kernel,
            reason: format!("dimensions must be nonzero, got m={m} n={n} k={k}"),
        });
    }
    Ok(())
}

/// `c = a * b` with `a` `m x k`, `b` `k x n`, `c` `m x n`, all column-major.
/// `c` is overwritten.
pub fn gemm<T: Element>(
    m: usize,
    n: usize,
    k: usize,
    a: &[T],
    b: &[T],
    c: &mut [T],
) -> Result<()> {
    check_dims("gemm", m, n, k)?;
    if a.len() != m * k || b.len() != k * n || c.len() != m * n {
        return Err(Error::IllegalKernelArgument {
            kernel: "gemm",
            reason: format!(
                "buffer lengths {}/{}/{} do not match m={m} n={n} k={k}",
                a.len(),
                b.len(),
                c.len()
            ),
        });
    }
    for x in c.iter_mut() {
        *x = T::zero();
    }
    // jki loop order keeps the inner stride unit over columns of c
    for j in 0..n {
        for l in 0..k {
            let blj = b[l + j * k];
            if blj.is_zero() {
                continue;
            }
            for i in 0..m {
                c[i + j * m] += a[i + l * m] * blj;
            }
        }
    }
    Ok(())
}

/// Euclidean norm of `x`, accumulated with scaling against overflow
pub fn nrm2<T: Element>(x: &[T]) -> f64 {
    let mut scale = 0.0f64;
    let mut ssq = 1.0f64;
    for &v in x {
        let a = v.abs_val();
        if a != 0.0 {
            if scale < a {
                ssq = 1.0 + ssq * (scale / a).powi(2);
                scale = a;
            } else {
                ssq += (a / scale).powi(2);
            }
        }
    }
    scale * ssq.sqrt()
}

/// Matrix 1-norm (maximum absolute column sum) of an `m x n` buffer
pub fn onenorm<T: Element>(m: usize, n: usize, a: &[T]) -> f64 {
    let mut best = 0.0f64;
    for j in 0..n {
        let col: f64 = a[j * m..(j + 1) * m].iter().map(|v| v.abs_val()).sum();
        if col > best {
            best = col;
        }
    }
    best
}

/// True when every element is finite in all components
pub fn all_finite<T: Element>(a: &[T]) -> bool {
    a.iter().all(|v| v.is_finite_val())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex64;

    #[test]
    fn gemm_matches_hand_product() {
        // a = [1 3; 2 4], b = [5 7; 6 8] column-major
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut c = [0.0; 4];
        gemm(2, 2, 2, &a, &b, &mut c).unwrap();
        assert_eq!(c, [23.0, 34.0, 31.0, 46.0]);
    }

    #[test]
    fn gemm_rejects_bad_lengths() {
        let a = [1.0; 4];
        let b = [1.0; 3];
        let mut c = [0.0; 4];
        assert!(gemm(2, 2, 2, &a, &b, &mut c).is_err());
    }

    #[test]
    fn nrm2_is_scale_safe() {
        let x = [3.0e200, 4.0e200];
        assert!((nrm2(&x) - 5.0e200).abs() < 1e186);
        let z = [Complex64::new(3.0, 4.0)];
        assert!((nrm2(&z) - 5.0).abs() < 1e-14);
    }

    #[test]
    fn onenorm_takes_max_column_sum() {
        // [1 -4; 2 5; 3 -6]
        let a = [1.0, 2.0, 3.0, -4.0, 5.0, -6.0];
        assert_eq!(onenorm(3, 2, &a), 15.0);
    }
}
