//! Expression DAG: nodes, registers, linearization, dispatch

pub mod dispatch;
pub mod execution;
pub mod node;
pub mod register;
pub mod runtree;

pub use execution::ExecutionList;
pub use node::{ExprNode, Node, NodeKind, EXPR_KIND_MASK};
pub use register::{RegContainer, Register, RegisterHandle};
pub use runtree::run_tree;
