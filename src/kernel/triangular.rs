//! Triangular solves and structure probes

use super::Trans;
use crate::dtype::Element;
use crate::error::{Error, Result};

/// Outcome of probing a square matrix for triangular structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriangularForm {
    /// Exactly lower triangular
    Lower {
        /// Diagonal is all ones, enabling the non-scaling solve path
        unit: bool,
    },
    /// Exactly upper triangular
    Upper {
        /// Diagonal is all ones
        unit: bool,
    },
    /// Upper triangular after a row permutation: moving row `r` to row
    /// `perm[r]` yields an upper triangular matrix
    PermutedUpper {
        /// Destination row for each source row
        perm: Vec<usize>,
        /// Permuted diagonal is all ones
        unit: bool,
    },
    /// No triangular structure detected
    None,
}

/// Probe an `n x n` column-major buffer for triangular structure.
///
/// Lower form requires an exactly zero strict upper triangle. Upper form
/// is detected up to a row permutation: if the map from each row to its
/// first nonzero column is a bijection onto the row indices, permuting
/// row `r` to row `first_nonzero(r)` produces an upper triangular matrix.
/// A matrix whose first-nonzero columns collide is classified as
/// [`TriangularForm::None`] even if it looks "almost" triangular.
pub fn probe_triangular<T: Element>(n: usize, a: &[T]) -> TriangularForm {
    // lower: nothing above the diagonal
    let mut lower = true;
    'lo: for j in 1..n {
        for i in 0..j {
            if !a[i + j * n].is_zero() {
                lower = false;
                break 'lo;
            }
        }
    }
    if lower {
        let unit = (0..n).all(|k| a[k + k * n] == T::one());
        return TriangularForm::Lower { unit };
    }

    // permuted upper: first-nonzero-column map must be a bijection
    let mut perm = vec![0usize; n];
    let mut seen = vec![false; n];
    for r in 0..n {
        let mut first = None;
        for j in 0..n {
            if !a[r + j * n].is_zero() {
                first = Some(j);
                break;
            }
        }
        match first {
            Some(c) if !seen[c] => {
                seen[c] = true;
                perm[r] = c;
            }
            _ => return TriangularForm::None,
        }
    }
    let unit = (0..n).all(|r| a[r + perm[r] * n] == T::one());
    if perm.iter().enumerate().all(|(r, &c)| r == c) {
        TriangularForm::Upper { unit }
    } else {
        TriangularForm::PermutedUpper { perm, unit }
    }
}

/// Apply a row permutation in place: row `r` of the `m x n` buffer moves
/// to row `perm[r]`
pub fn permute_rows<T: Element>(m: usize, n: usize, perm: &[usize], a: &mut [T]) {
    let mut out = vec![T::zero(); m * n];
    for r in 0..m {
        for j in 0..n {
            out[perm[r] + j * m] = a[r + j * m];
        }
    }
    a.copy_from_slice(&out);
}

/// Solve a triangular system `a * x = b` (or its conjugate transpose).
/// `a` is `n x n`, `b` is `n x nrhs` and is overwritten. `unit` skips the
/// diagonal scaling.
pub fn solve_triangular<T: Element>(
    n: usize,
    nrhs: usize,
    a: &[T],
    upper: bool,
    unit: bool,
    trans: Trans,
    b: &mut [T],
) -> Result<()> {
    if n == 0 || nrhs == 0 || a.len() != n * n || b.len() != n * nrhs {
        return Err(Error::IllegalKernelArgument {
            kernel: "trsm",
            reason: format!("bad dimensions n={n} nrhs={nrhs}"),
        });
    }
    // conjugate-transposing flips the triangle orientation
    let effective_upper = match trans {
        Trans::No => upper,
        Trans::Conj => !upper,
    };
    let elem = |i: usize, j: usize| -> T {
        match trans {
            Trans::No => a[i + j * n],
            Trans::Conj => a[j + i * n].conj(),
        }
    };
    for j in 0..nrhs {
        if effective_upper {
            for k in (0..n).rev() {
                let mut s = b[k + j * n];
                for i in (k + 1)..n {
                    s -= elem(k, i) * b[i + j * n];
                }
                b[k + j * n] = if unit { s } else { s / elem(k, k) };
            }
        } else {
            for k in 0..n {
                let mut s = b[k + j * n];
                for i in 0..k {
                    s -= elem(k, i) * b[i + j * n];
                }
                b[k + j * n] = if unit { s } else { s / elem(k, k) };
            }
        }
    }
    Ok(())
}

/// Exact Hermitian test: `a[i][j] == conj(a[j][i])` for every pair
pub fn is_hermitian<T: Element>(n: usize, a: &[T]) -> bool {
    for j in 0..n {
        for i in 0..=j {
            if a[i + j * n] != a[j + i * n].conj() {
                return false;
            }
        }
    }
    true
}

/// True when every element is exactly zero
pub fn is_zero_matrix<T: Element>(a: &[T]) -> bool {
    a.iter().all(|v| v.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_lower_and_unit_flag() {
        // [1 0; 5 1]
        let a = [1.0, 5.0, 0.0, 1.0];
        assert_eq!(probe_triangular(2, &a), TriangularForm::Lower { unit: true });
        let b = [2.0, 5.0, 0.0, 3.0];
        assert_eq!(probe_triangular(2, &b), TriangularForm::Lower { unit: false });
    }

    #[test]
    fn detects_permuted_upper() {
        // rows of an upper [1 2; 0 3] swapped: [0 3; 1 2]
        let a = [0.0, 1.0, 3.0, 2.0];
        match probe_triangular(2, &a) {
            TriangularForm::PermutedUpper { perm, unit } => {
                assert_eq!(perm, vec![1, 0]);
                assert!(!unit);
            }
            other => panic!("expected permuted upper, got {other:?}"),
        }
    }

    #[test]
    fn out_of_place_entry_is_not_triangular() {
        // upper with one stray below-diagonal nonzero sharing a first
        // column: [1 2; 1 3] has first-nonzero columns [0, 0]
        let a = [1.0, 1.0, 2.0, 3.0];
        assert_eq!(probe_triangular(2, &a), TriangularForm::None);
    }

    #[test]
    fn solve_upper_matches() {
        // [2 1; 0 4] x = [5; 8] -> x = [1.5, 2]
        let a = [2.0, 0.0, 1.0, 4.0];
        let mut b = [5.0, 8.0];
        solve_triangular(2, 1, &a, true, false, Trans::No, &mut b).unwrap();
        assert!((b[0] - 1.5).abs() < 1e-14);
        assert!((b[1] - 2.0).abs() < 1e-14);
    }
}
