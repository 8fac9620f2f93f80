//! DAG nodes: kind tags, expression nodes, typed constructors
//!
//! Nodes are shared as `Rc<Node>` so a subtree can appear as an argument
//! of several parents. Expression nodes are immutable after construction
//! apart from their result cache.

use crate::graph::register::RegContainer;
use crate::terminal::Terminal;
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::rc::Rc;

/// Bit set on every expression (operator) kind tag
pub const EXPR_KIND_MASK: u16 = 0x0100;

/// Closed set of node kinds. Terminal kinds occupy the low byte;
/// expression kinds carry [`EXPR_KIND_MASK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeKind {
    /// Real scalar terminal
    RealScalar = 0x0001,
    /// Complex scalar terminal
    ComplexScalar = 0x0002,
    /// Integer scalar terminal
    IntegerScalar = 0x0003,
    /// Real dense matrix terminal
    RealDense = 0x0004,
    /// Complex dense matrix terminal
    ComplexDense = 0x0005,
    /// Real diagonal matrix terminal
    RealDiagonal = 0x0006,
    /// Complex diagonal matrix terminal
    ComplexDiagonal = 0x0007,
    /// Real sparse matrix terminal
    RealSparse = 0x0008,
    /// Complex sparse matrix terminal
    ComplexSparse = 0x0009,
    /// Logical (0/1) matrix terminal
    Logical = 0x000A,
    /// Elementwise addition
    Plus = 0x0101,
    /// Elementwise negation
    Negate = 0x0102,
    /// Transpose
    Transpose = 0x0103,
    /// Conjugate transpose
    Ctranspose = 0x0104,
    /// Matrix multiply
    Mtimes = 0x0105,
    /// LU decomposition, outputs L then U
    Lu = 0x0106,
    /// QR decomposition, outputs Q then R
    Qr = 0x0107,
    /// Singular value decomposition, outputs U, S, V
    Svd = 0x0108,
    /// Matrix inverse
    Inv = 0x0109,
    /// Moore-Penrose pseudo-inverse
    Pinv = 0x010A,
    /// Left division, `mldivide(a, b)` solves `a * x = b`
    Mldivide = 0x010B,
    /// 2-norm
    Norm2 = 0x010C,
    /// Row-axis reduction to an `m x 1` column
    SumRows = 0x010D,
    /// Column-axis reduction to a `1 x n` row
    SumCols = 0x010E,
    /// Pick one output of a multi-output upstream node
    SelectResult = 0x010F,
}

impl NodeKind {
    /// Raw tag value
    pub fn tag(self) -> u16 {
        self as u16
    }

    /// True for operator kinds
    pub fn is_expr(self) -> bool {
        self.tag() & EXPR_KIND_MASK != 0
    }

    /// Fixed argument count for operator kinds; terminals take none
    pub fn arity(self) -> usize {
        match self {
            NodeKind::Plus
            | NodeKind::Mtimes
            | NodeKind::Mldivide
            | NodeKind::SelectResult => 2,
            NodeKind::Negate
            | NodeKind::Transpose
            | NodeKind::Ctranspose
            | NodeKind::Lu
            | NodeKind::Qr
            | NodeKind::Svd
            | NodeKind::Inv
            | NodeKind::Pinv
            | NodeKind::Norm2
            | NodeKind::SumRows
            | NodeKind::SumCols => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::RealScalar => "RealScalar",
            NodeKind::ComplexScalar => "ComplexScalar",
            NodeKind::IntegerScalar => "IntegerScalar",
            NodeKind::RealDense => "RealDense",
            NodeKind::ComplexDense => "ComplexDense",
            NodeKind::RealDiagonal => "RealDiagonal",
            NodeKind::ComplexDiagonal => "ComplexDiagonal",
            NodeKind::RealSparse => "RealSparse",
            NodeKind::ComplexSparse => "ComplexSparse",
            NodeKind::Logical => "Logical",
            NodeKind::Plus => "PLUS",
            NodeKind::Negate => "NEGATE",
            NodeKind::Transpose => "TRANSPOSE",
            NodeKind::Ctranspose => "CTRANSPOSE",
            NodeKind::Mtimes => "MTIMES",
            NodeKind::Lu => "LU",
            NodeKind::Qr => "QR",
            NodeKind::Svd => "SVD",
            NodeKind::Inv => "INV",
            NodeKind::Pinv => "PINV",
            NodeKind::Mldivide => "MLDIVIDE",
            NodeKind::Norm2 => "NORM2",
            NodeKind::SumRows => "SUMROWS",
            NodeKind::SumCols => "SUMCOLS",
            NodeKind::SelectResult => "SELECTRESULT",
        };
        f.write_str(name)
    }
}

/// An operator application: kind, fixed-arity arguments, result cache
#[derive(Debug)]
pub struct ExprNode {
    kind: NodeKind,
    args: SmallVec<[Rc<Node>; 2]>,
    regs: RegContainer,
}

impl ExprNode {
    fn new(kind: NodeKind, args: SmallVec<[Rc<Node>; 2]>) -> Self {
        debug_assert_eq!(args.len(), kind.arity());
        Self {
            kind,
            args,
            regs: RegContainer::new(),
        }
    }

    /// Operator kind
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Argument nodes, in operator order
    pub fn args(&self) -> &[Rc<Node>] {
        &self.args
    }

    /// Result cache; empty until the node has been dispatched
    pub fn regs(&self) -> &RegContainer {
        &self.regs
    }
}

/// A DAG node: either a data leaf or an operator application
#[derive(Debug)]
pub enum Node {
    /// Leaf carrying concrete data
    Term(Rc<Terminal>),
    /// Operator over argument nodes
    Expr(ExprNode),
}

impl Node {
    /// Kind tag, used for dispatch
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Term(t) => t.kind(),
            Node::Expr(e) => e.kind(),
        }
    }

    /// Argument nodes; empty for terminals
    pub fn args(&self) -> &[Rc<Node>] {
        match self {
            Node::Term(_) => &[],
            Node::Expr(e) => e.args(),
        }
    }

    /// The expression payload, if this is an operator node
    pub fn as_expr(&self) -> Option<&ExprNode> {
        match self {
            Node::Term(_) => None,
            Node::Expr(e) => Some(e),
        }
    }

    /// The terminal payload, if this is a leaf
    pub fn as_term(&self) -> Option<&Rc<Terminal>> {
        match self {
            Node::Term(t) => Some(t),
            Node::Expr(_) => None,
        }
    }

    /// Wrap a terminal as a shareable leaf node
    pub fn term(t: Terminal) -> Rc<Node> {
        Rc::new(Node::Term(Rc::new(t)))
    }

    fn expr(kind: NodeKind, args: SmallVec<[Rc<Node>; 2]>) -> Rc<Node> {
        Rc::new(Node::Expr(ExprNode::new(kind, args)))
    }

    /// `a + b`
    pub fn plus(a: Rc<Node>, b: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Plus, smallvec![a, b])
    }

    /// `-a`
    pub fn negate(a: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Negate, smallvec![a])
    }

    /// `a'` without conjugation
    pub fn transpose(a: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Transpose, smallvec![a])
    }

    /// Conjugate transpose
    pub fn ctranspose(a: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Ctranspose, smallvec![a])
    }

    /// `a * b`
    pub fn mtimes(a: Rc<Node>, b: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Mtimes, smallvec![a, b])
    }

    /// LU decomposition of `a`; results L then U
    pub fn lu(a: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Lu, smallvec![a])
    }

    /// QR decomposition of `a`; results Q then R
    pub fn qr(a: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Qr, smallvec![a])
    }

    /// Singular value decomposition of `a`; results U, S, V
    pub fn svd(a: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Svd, smallvec![a])
    }

    /// Matrix inverse of `a`
    pub fn inv(a: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Inv, smallvec![a])
    }

    /// Pseudo-inverse of `a`
    pub fn pinv(a: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Pinv, smallvec![a])
    }

    /// Solve `a * x = b` for `x`
    pub fn mldivide(a: Rc<Node>, b: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Mldivide, smallvec![a, b])
    }

    /// 2-norm of `a`
    pub fn norm2(a: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::Norm2, smallvec![a])
    }

    /// Sum along rows of `a`, yielding an `m x 1` column
    pub fn sumrows(a: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::SumRows, smallvec![a])
    }

    /// Sum along columns of `a`, yielding a `1 x n` row
    pub fn sumcols(a: Rc<Node>) -> Rc<Node> {
        Self::expr(NodeKind::SumCols, smallvec![a])
    }

    /// Select output `index` of multi-output node `a`
    pub fn select_result(a: Rc<Node>, index: i32) -> Rc<Node> {
        let idx = Node::term(Terminal::IntegerScalar(index));
        Self::expr(NodeKind::SelectResult, smallvec![a, idx])
    }

    /// Structural deep copy: terminals copy their buffers, expression
    /// nodes are rebuilt with fresh, empty result caches.
    pub fn deep_copy(node: &Rc<Node>) -> Rc<Node> {
        match node.as_ref() {
            Node::Term(t) => Node::term(t.deep_copy()),
            Node::Expr(e) => {
                let args = e.args().iter().map(Node::deep_copy).collect();
                Self::expr(e.kind(), args)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expr_mask_splits_kinds() {
        assert!(!NodeKind::RealDense.is_expr());
        assert!(NodeKind::Mldivide.is_expr());
        assert_eq!(NodeKind::Plus.tag(), 0x0101);
        assert_eq!(NodeKind::SelectResult.tag(), 0x010F);
    }

    #[test]
    fn constructors_fix_arity() {
        let a = Node::term(Terminal::RealScalar(1.0));
        let b = Node::term(Terminal::RealScalar(2.0));
        let sum = Node::plus(a, Rc::clone(&b));
        assert_eq!(sum.args().len(), 2);
        assert_eq!(Node::negate(b).args().len(), 1);
        assert_eq!(sum.kind().arity(), 2);
    }

    #[test]
    fn deep_copy_is_reference_distinct() {
        let a = Node::term(Terminal::RealScalar(3.0));
        let tree = Node::negate(Rc::clone(&a));
        let copy = Node::deep_copy(&tree);
        assert_eq!(copy.kind(), NodeKind::Negate);
        assert!(!Rc::ptr_eq(&copy.args()[0], &a));
        let orig_term = tree.args()[0].as_term().unwrap();
        let copy_term = copy.args()[0].as_term().unwrap();
        assert_eq!(**orig_term, **copy_term);
    }
}
