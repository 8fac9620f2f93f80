//! Execution-list builder: DAG to dependency-respecting sequence
//!
//! The walk is an explicit-stack depth-first traversal so arbitrarily deep
//! trees never exhaust the call stack. Shared nodes are intentionally NOT
//! deduplicated; a node reached through several parents appears once per
//! traversal edge and its later dispatches are no-op reads of the already
//! populated register.

use crate::graph::node::Node;
use std::rc::Rc;

/// Ordered visit sequence for one tree run. Every node appears after all
/// of its arguments. This is a view; it owns no node data beyond the
/// shared `Rc` handles.
#[derive(Debug)]
pub struct ExecutionList {
    order: Vec<Rc<Node>>,
}

impl ExecutionList {
    /// Linearize the DAG rooted at `root`
    pub fn new(root: &Rc<Node>) -> Self {
        let mut order = Vec::new();
        // frame: (node, index of the next argument to descend into)
        let mut stack: Vec<(Rc<Node>, usize)> = vec![(Rc::clone(root), 0)];
        while let Some((node, next_arg)) = stack.pop() {
            let args = node.args();
            if next_arg < args.len() {
                let child = Rc::clone(&args[next_arg]);
                stack.push((node, next_arg + 1));
                stack.push((child, 0));
            } else {
                order.push(node);
            }
        }
        Self { order }
    }

    /// Nodes in dispatch order
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Node>> {
        self.order.iter()
    }

    /// Number of visit completions (shared nodes counted per edge)
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True only for a degenerate empty list
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The final entry, which is always the root
    pub fn last(&self) -> Option<&Rc<Node>> {
        self.order.last()
    }
}
