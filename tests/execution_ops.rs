//! Execution list ordering and register lifecycle behaviour

mod common;

use common::*;
use numdag::graph::register::Register;
use numdag::graph::{run_tree, ExecutionList, Node};
use numdag::{Error, NodeKind};
use std::rc::Rc;

#[test]
fn single_terminal_list_has_one_entry() {
    let a = rscalar(7.0);
    let list = ExecutionList::new(&a);
    assert_eq!(list.len(), 1);
    assert!(Rc::ptr_eq(list.last().unwrap(), &a));
}

#[test]
fn unary_chain_has_depth_plus_one_entries() {
    // a chain of k unary operators over one terminal linearizes to k + 1 nodes
    let k = 7;
    let mut node = real_node(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
    for _ in 0..k {
        node = Node::negate(node);
    }
    let list = ExecutionList::new(&node);
    assert_eq!(list.len(), k + 1);
    assert!(Rc::ptr_eq(list.last().unwrap(), &node));
}

#[test]
fn arguments_precede_consumers() {
    let a = rscalar(1.0);
    let b = rscalar(2.0);
    let tree = Node::mtimes(Node::negate(a), b);
    let list = ExecutionList::new(&tree);
    let order: Vec<&Rc<Node>> = list.iter().collect();
    for (i, node) in order.iter().enumerate() {
        for arg in node.args() {
            let pos = order
                .iter()
                .position(|n| Rc::ptr_eq(n, arg))
                .unwrap_or_else(|| panic!("argument missing from list"));
            assert!(pos < i, "argument scheduled after its consumer");
        }
    }
}

#[test]
fn shared_node_listed_once_per_edge_but_computed_once() {
    // NEGATE(x) referenced twice: the list visits it per edge, the
    // dispatcher computes it once and no-ops the revisit
    let x = rscalar(3.0);
    let shared = Node::negate(x);
    let tree = Node::plus(shared.clone(), shared.clone());
    let list = ExecutionList::new(&tree);
    let hits = list.iter().filter(|n| Rc::ptr_eq(n, &shared)).count();
    assert_eq!(hits, 2);

    let result = run_tree(&tree).unwrap();
    assert_eq!(shared.as_expr().unwrap().regs().len(), 1);
    assert!(result.maths_equals(
        &numdag::Terminal::RealScalar(-6.0),
        1e-14,
        1e-14
    ));
}

#[test]
fn rerunning_a_tree_reuses_cached_registers() {
    let tree = Node::plus(rscalar(1.0), rscalar(2.0));
    let first = run_tree(&tree).unwrap();
    let cached = tree.as_expr().unwrap().regs().get(0).unwrap();
    let second = run_tree(&tree).unwrap();
    // second run is the revisit no-op path: same cached terminal comes back
    assert!(Rc::ptr_eq(&first, &second));
    assert!(Rc::ptr_eq(&cached, &second));
    assert_eq!(tree.as_expr().unwrap().regs().len(), 1);
}

#[test]
fn register_allocates_on_first_reference_and_frees_on_last() {
    let reg: Register<f64> = Register::new(4);
    assert!(!reg.is_allocated());
    assert_eq!(reg.inc_ref(), 1);
    assert!(reg.is_allocated());
    assert_eq!(reg.data().len(), 4);
    assert_eq!(reg.inc_ref(), 2);
    assert_eq!(reg.dec_ref().unwrap(), 1);
    assert!(reg.is_allocated());
    assert_eq!(reg.dec_ref().unwrap(), 0);
    assert!(!reg.is_allocated());
}

#[test]
fn register_underflow_is_fatal() {
    let reg: Register<f64> = Register::new(2);
    assert!(matches!(reg.dec_ref(), Err(Error::RegisterUnderflow)));
    // a full cycle leaves the register deallocated and reusable
    reg.inc_ref();
    reg.dec_ref().unwrap();
    assert!(!reg.is_allocated());
    assert!(matches!(reg.dec_ref(), Err(Error::RegisterUnderflow)));
}

#[test]
fn expression_kinds_carry_the_expr_bit() {
    let tree = Node::lu(real_node(&[vec![1.0, 2.0], vec![3.0, 4.0]]));
    assert!(tree.kind().is_expr());
    assert_eq!(tree.kind(), NodeKind::Lu);
    assert!(!tree.args()[0].kind().is_expr());
}
