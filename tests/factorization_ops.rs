//! LU, QR, SVD, INV, PINV and SELECTRESULT behaviour

mod common;

use common::*;
use numdag::graph::run_tree;
use numdag::terminal::Terminal;
use numdag::{Error, Node, NodeKind};
use std::rc::Rc;

fn reconstruct_two(op: &Rc<Node>) -> Rc<Node> {
    Node::mtimes(Node::select_result(op.clone(), 0), Node::select_result(op.clone(), 1))
}

#[test]
fn lu_factors_reconstruct_square_input() {
    let a = real_node(&[
        vec![10.0, 2.0, 1.0],
        vec![2.0, 3.0, 10.0],
        vec![4.0, 10.0, 1.0],
    ]);
    let got = eval(&reconstruct_two(&Node::lu(a.clone())));
    assert_terms_close(&got, a.as_term().unwrap(), 1e-13, 1e-13, "L*U square");
}

#[test]
fn lu_factors_reconstruct_rectangular_input() {
    let tall = real_node(&[
        vec![1.0, 2.0],
        vec![3.0, 4.0],
        vec![5.0, 7.0],
    ]);
    let op = Node::lu(tall.clone());
    let l = eval(&Node::select_result(op.clone(), 0));
    let u = eval(&Node::select_result(op.clone(), 1));
    assert_eq!((l.rows(), l.cols()), (3, 2));
    assert_eq!((u.rows(), u.cols()), (2, 2));
    let got = eval(&reconstruct_two(&op));
    assert_terms_close(&got, tall.as_term().unwrap(), 1e-13, 1e-13, "L*U tall");

    let wide = real_node(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 7.0]]);
    let got = eval(&reconstruct_two(&Node::lu(wide.clone())));
    assert_terms_close(&got, wide.as_term().unwrap(), 1e-13, 1e-13, "L*U wide");
}

#[test]
fn lu_completes_on_singular_input() {
    // all rows equal: a zero pivot appears but both factors still come back
    let a = real_node(&[
        vec![1.0, 2.0, 3.0],
        vec![1.0, 2.0, 3.0],
        vec![1.0, 2.0, 3.0],
    ]);
    let got = eval(&reconstruct_two(&Node::lu(a.clone())));
    assert_terms_close(&got, a.as_term().unwrap(), 1e-13, 1e-13, "L*U singular");
}

#[test]
fn lu_of_scalar_is_unit_l_and_the_value() {
    let op = Node::lu(rscalar(6.0));
    let l = eval(&Node::select_result(op.clone(), 0));
    let u = eval(&Node::select_result(op, 1));
    assert_terms_close(&l, &Terminal::RealScalar(1.0), 0.0, 0.0, "scalar L");
    assert_terms_close(&u, &Terminal::RealScalar(6.0), 0.0, 0.0, "scalar U");
}

#[test]
fn qr_factors_reconstruct_and_q_is_unitary() {
    let a = real_node(&[
        vec![1.0, 2.0],
        vec![3.0, 4.0],
        vec![5.0, 6.0],
    ]);
    let op = Node::qr(a.clone());
    let q = Node::select_result(op.clone(), 0);
    let r = Node::select_result(op.clone(), 1);
    assert_eq!((eval(&q).rows(), eval(&q).cols()), (3, 3));
    assert_eq!((eval(&r).rows(), eval(&r).cols()), (3, 2));
    let got = eval(&reconstruct_two(&op));
    assert_terms_close(&got, a.as_term().unwrap(), 1e-13, 1e-13, "Q*R");
    let qtq = eval(&Node::mtimes(Node::ctranspose(q.clone()), q));
    let eye = real_dense(&[
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ]);
    assert_terms_close(&qtq, &eye, 1e-13, 1e-13, "Q'Q");
}

#[test]
fn qr_of_complex_matrix_reconstructs() {
    let a = complex_node(&[
        vec![(1.0, 1.0), (2.0, -1.0)],
        vec![(0.0, 3.0), (4.0, 0.0)],
    ]);
    let got = eval(&reconstruct_two(&Node::qr(a.clone())));
    assert_terms_close(&got, a.as_term().unwrap(), 1e-13, 1e-13, "complex Q*R");
}

#[test]
fn svd_factors_reconstruct_real_input() {
    let a = real_node(&[
        vec![1.0, 2.0, 3.0],
        vec![4.0, 5.0, 6.0],
        vec![7.0, 8.0, 10.0],
    ]);
    let op = Node::svd(a.clone());
    let u = Node::select_result(op.clone(), 0);
    let s = Node::select_result(op.clone(), 1);
    let v = Node::select_result(op.clone(), 2);
    let s_term = eval(&s);
    assert_eq!(s_term.kind(), NodeKind::RealDiagonal);
    let got = eval(&Node::mtimes(u, Node::mtimes(s, Node::ctranspose(v))));
    assert_terms_close(&got, a.as_term().unwrap(), 1e-12, 1e-12, "U*S*V'");
}

#[test]
fn svd_factors_reconstruct_rectangular_complex_input() {
    let a = complex_node(&[
        vec![(1.0, 2.0), (3.0, 0.0), (0.0, -1.0)],
        vec![(2.0, -1.0), (0.0, 1.0), (4.0, 4.0)],
    ]);
    let op = Node::svd(a.clone());
    let u = Node::select_result(op.clone(), 0);
    let s = Node::select_result(op.clone(), 1);
    let v = Node::select_result(op.clone(), 2);
    assert_eq!((eval(&u).rows(), eval(&u).cols()), (2, 2));
    assert_eq!((eval(&s).rows(), eval(&s).cols()), (2, 3));
    assert_eq!((eval(&v).rows(), eval(&v).cols()), (3, 3));
    let got = eval(&Node::mtimes(u, Node::mtimes(s, Node::ctranspose(v))));
    assert_terms_close(&got, a.as_term().unwrap(), 1e-12, 1e-12, "complex U*S*V'");
}

#[test]
fn svd_singular_values_sorted_descending() {
    let a = real_node(&[vec![1.0, 0.0], vec![0.0, 5.0]]);
    let s = eval(&Node::select_result(Node::svd(a), 1));
    let dense = s.to_complex_values();
    assert!((dense[0].re - 5.0).abs() < 1e-13);
    assert!((dense[3].re - 1.0).abs() < 1e-13);
}

#[test]
fn svd_of_scalar_splits_phase_and_magnitude() {
    let op = Node::svd(cscalar(0.0, -3.0));
    let u = eval(&Node::select_result(op.clone(), 0));
    let s = eval(&Node::select_result(op.clone(), 1));
    let v = eval(&Node::select_result(op, 2));
    assert_terms_close(
        &u,
        &Terminal::ComplexScalar(numdag::Complex64::new(0.0, -1.0)),
        1e-14,
        1e-14,
        "scalar U",
    );
    assert_terms_close(&s, &Terminal::RealScalar(3.0), 1e-14, 1e-14, "scalar S");
    assert_terms_close(&v, &Terminal::RealScalar(1.0), 1e-14, 1e-14, "scalar V");
}

#[test]
fn selectresult_rejects_terminal_argument_and_bad_indices() {
    let term_arg = Node::select_result(rscalar(1.0), 0);
    assert!(matches!(
        run_tree(&term_arg),
        Err(Error::UnsupportedKind { op: "selectresult", .. })
    ));

    let a = real_node(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
    let past_end = Node::select_result(Node::lu(a.clone()), 2);
    assert!(matches!(
        run_tree(&past_end),
        Err(Error::ResultIndexOutOfRange { index: 2, len: 2 })
    ));

    let negative = Node::select_result(Node::lu(a), -1);
    assert!(matches!(
        run_tree(&negative),
        Err(Error::InvalidArgument { arg: "index", .. })
    ));
}

#[test]
fn selectresult_copies_rather_than_aliases() {
    let op = Node::lu(real_node(&[vec![2.0, 0.0], vec![0.0, 2.0]]));
    let sel = Node::select_result(op.clone(), 1);
    let picked = eval(&sel);
    let producer_slot = op.as_expr().unwrap().regs().get(1).unwrap();
    assert!(!Rc::ptr_eq(&picked, &producer_slot));
    assert!(picked.maths_equals(&producer_slot, 0.0, 0.0));
}

#[test]
fn inv_of_scalar_and_singular_scalar() {
    let got = eval(&Node::inv(rscalar(4.0)));
    assert_terms_close(&got, &Terminal::RealScalar(0.25), 1e-14, 1e-14, "1/4");
    let got = eval(&Node::inv(rscalar(0.0)));
    assert_terms_close(
        &got,
        &Terminal::RealScalar(f64::INFINITY),
        0.0,
        0.0,
        "1/0",
    );
}

#[test]
fn inv_of_singular_matrix_fills_with_infinity() {
    let a = real_node(&[
        vec![1.0, 2.0, 3.0],
        vec![1.0, 2.0, 3.0],
        vec![1.0, 2.0, 3.0],
    ]);
    let got = eval(&Node::inv(a));
    let inf = f64::INFINITY;
    let want = real_dense(&[
        vec![inf, inf, inf],
        vec![inf, inf, inf],
        vec![inf, inf, inf],
    ]);
    assert_terms_close(&got, &want, 0.0, 0.0, "inv singular");
}

#[test]
fn inv_rejects_rectangular_input() {
    let a = real_node(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    assert!(matches!(
        run_tree(&Node::inv(a)),
        Err(Error::NotSquare { op: "inv", .. })
    ));
}

#[test]
fn inv_of_complex_matrix_gives_identity_product() {
    let a = complex_node(&[
        vec![(2.0, 1.0), (0.0, -1.0)],
        vec![(1.0, 0.0), (3.0, 2.0)],
    ]);
    let got = eval(&Node::mtimes(Node::inv(a.clone()), a));
    let eye = complex_dense(&[
        vec![(1.0, 0.0), (0.0, 0.0)],
        vec![(0.0, 0.0), (1.0, 0.0)],
    ]);
    assert_terms_close(&got, &eye, 1e-13, 1e-13, "inv(A) * A");
}

#[test]
fn pinv_satisfies_moore_penrose_reconstruction() {
    let a = real_node(&[
        vec![1.0, 2.0],
        vec![3.0, 4.0],
        vec![5.0, 6.0],
    ]);
    let p = Node::pinv(a.clone());
    let got = eval(&p);
    assert_eq!((got.rows(), got.cols()), (2, 3));
    let round = eval(&Node::mtimes(a.clone(), Node::mtimes(p, a.clone())));
    assert_terms_close(&round, a.as_term().unwrap(), 1e-12, 1e-12, "A * pinv(A) * A");
}

#[test]
fn pinv_of_zero_scalar_is_zero() {
    let got = eval(&Node::pinv(rscalar(0.0)));
    assert_terms_close(&got, &Terminal::RealScalar(0.0), 0.0, 0.0, "pinv(0)");
}
