//! Top-level tree evaluation

use crate::error::{Error, Result};
use crate::graph::dispatch::dispatch;
use crate::graph::execution::ExecutionList;
use crate::graph::node::Node;
use crate::terminal::Terminal;
use std::rc::Rc;

/// Evaluate the DAG rooted at `root` and return its result terminal.
///
/// Builds the execution list, dispatches each entry in order, then reads
/// the root's result: a terminal root is returned as-is, an expression
/// root returns its register's first slot. The list is scoped to this
/// call and dropped on every exit path.
pub fn run_tree(root: &Rc<Node>) -> Result<Rc<Terminal>> {
    let list = ExecutionList::new(root);
    for node in list.iter() {
        dispatch(node)?;
    }
    match root.as_ref() {
        Node::Term(t) => Ok(Rc::clone(t)),
        Node::Expr(e) => e
            .regs()
            .get(0)
            .ok_or_else(|| Error::Internal("root register empty after evaluation".to_string())),
    }
}
