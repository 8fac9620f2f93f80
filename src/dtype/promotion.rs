//! Implicit-conversion (promotion) rules between terminal kinds
//!
//! Operators are implemented for a curated set of concrete type
//! combinations; anything else is widened to a covering kind first.
//! Promotion never narrows: a complex value never silently loses its
//! imaginary part and dense never degrades to a structured format.

use crate::graph::NodeKind;

/// Promote two terminal kinds to the common covering kind for a binary
/// operation.
///
/// The structure ladder is dense > sparse > diagonal > logical > scalar;
/// the numeric domain widens to complex when either side is complex.
pub fn promote(lhs: NodeKind, rhs: NodeKind) -> NodeKind {
    use NodeKind::*;

    if lhs == rhs {
        return lhs;
    }

    // Structure priority (higher = wins)
    let priority = |k: NodeKind| -> u8 {
        match k {
            RealDense | ComplexDense | Logical => 40,
            RealSparse | ComplexSparse => 30,
            RealDiagonal | ComplexDiagonal => 20,
            RealScalar | ComplexScalar | IntegerScalar => 10,
            _ => 0, // expression kinds never reach promotion
        }
    };

    let complex = is_complex_kind(lhs) || is_complex_kind(rhs);
    let structure = if priority(lhs) >= priority(rhs) { lhs } else { rhs };

    match (structure, complex) {
        (RealDense | ComplexDense | Logical, false) => RealDense,
        (RealDense | ComplexDense | Logical, true) => ComplexDense,
        (RealSparse | ComplexSparse, false) => RealSparse,
        (RealSparse | ComplexSparse, true) => ComplexSparse,
        (RealDiagonal | ComplexDiagonal, false) => RealDiagonal,
        (RealDiagonal | ComplexDiagonal, true) => ComplexDiagonal,
        (RealScalar | IntegerScalar, false) => RealScalar,
        (_, true) => ComplexScalar,
        (k, _) => k,
    }
}

/// True for kinds whose data lives in the complex domain
pub fn is_complex_kind(k: NodeKind) -> bool {
    matches!(
        k,
        NodeKind::ComplexScalar
            | NodeKind::ComplexDense
            | NodeKind::ComplexDiagonal
            | NodeKind::ComplexSparse
    )
}

/// Fixed widening table: can `from` be implicitly converted to `to`?
///
/// Narrowing (complex to real, dense to structured) is never implicit;
/// taking a real part is an explicit operation, not promotion.
pub fn can_convert(from: NodeKind, to: NodeKind) -> bool {
    use NodeKind::*;

    if from == to {
        return true;
    }

    match from {
        RealScalar | IntegerScalar => matches!(
            to,
            RealScalar
                | ComplexScalar
                | RealDiagonal
                | ComplexDiagonal
                | Logical
                | RealSparse
                | ComplexSparse
                | RealDense
                | ComplexDense
        ),
        ComplexScalar => matches!(to, ComplexDiagonal | ComplexSparse | ComplexDense),
        RealDiagonal => matches!(
            to,
            ComplexDiagonal | RealSparse | ComplexSparse | RealDense | ComplexDense
        ),
        ComplexDiagonal => matches!(to, ComplexSparse | ComplexDense),
        RealSparse => matches!(to, ComplexSparse | RealDense | ComplexDense),
        ComplexSparse => matches!(to, ComplexDense),
        Logical => matches!(to, RealDense | ComplexDense),
        RealDense => matches!(to, ComplexDense),
        ComplexDense => false,
        _ => false,
    }
}
