//! Common test utilities
#![allow(dead_code)]

use numdag::dtype::Complex64;
use numdag::graph::{run_tree, Node};
use numdag::terminal::{DenseMatrix, Terminal};
use std::rc::Rc;

/// Build a real dense terminal from row-major literals
pub fn real_dense(rows: &[Vec<f64>]) -> Terminal {
    Terminal::RealDense(DenseMatrix::from_rows(rows).unwrap())
}

/// Build a complex dense terminal from row-major `(re, im)` literals
pub fn complex_dense(rows: &[Vec<(f64, f64)>]) -> Terminal {
    let converted: Vec<Vec<Complex64>> = rows
        .iter()
        .map(|r| r.iter().map(|&(re, im)| Complex64::new(re, im)).collect())
        .collect();
    Terminal::ComplexDense(DenseMatrix::from_rows(&converted).unwrap())
}

/// Build a complex dense terminal whose every entry is `scale` times the
/// matching real entry, with `scale` complex. Most complex fixtures are
/// real fixtures scaled by `1 + 10i`.
pub fn complex_scaled(rows: &[Vec<f64>], scale: Complex64) -> Terminal {
    let converted: Vec<Vec<Complex64>> = rows
        .iter()
        .map(|r| r.iter().map(|&v| Complex64::from(v) * scale).collect())
        .collect();
    Terminal::ComplexDense(DenseMatrix::from_rows(&converted).unwrap())
}

/// Terminal node from row-major real literals
pub fn real_node(rows: &[Vec<f64>]) -> Rc<Node> {
    Node::term(real_dense(rows))
}

/// Terminal node from row-major complex literals
pub fn complex_node(rows: &[Vec<(f64, f64)>]) -> Rc<Node> {
    Node::term(complex_dense(rows))
}

/// Real scalar terminal node
pub fn rscalar(v: f64) -> Rc<Node> {
    Node::term(Terminal::RealScalar(v))
}

/// Complex scalar terminal node
pub fn cscalar(re: f64, im: f64) -> Rc<Node> {
    Node::term(Terminal::ComplexScalar(Complex64::new(re, im)))
}

/// Capture cascade diagnostics when `RUST_LOG` is set
pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Evaluate a tree, panicking on any fatal error
pub fn eval(node: &Rc<Node>) -> Rc<Terminal> {
    run_tree(node).unwrap()
}

/// Assert two terminals are mathematically equal within tolerance
pub fn assert_terms_close(got: &Terminal, want: &Terminal, maxabs: f64, maxrel: f64, msg: &str) {
    assert!(
        got.maths_equals(want, maxabs, maxrel),
        "{}: got {:?}, want {:?}",
        msg,
        got,
        want
    );
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}
