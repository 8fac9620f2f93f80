//! SELECTRESULT: pick one output of a multi-output upstream node

use crate::error::{Error, Result};
use crate::graph::node::{ExprNode, Node};
use crate::terminal::Terminal;
use std::rc::Rc;

/// Unlike the other runners this one reads its first argument's register
/// directly (not just slot 0), so it receives the expression node itself.
pub fn run(expr: &ExprNode) -> Result<()> {
    let producer = match expr.args()[0].as_ref() {
        Node::Expr(e) => e,
        Node::Term(t) => {
            return Err(Error::UnsupportedKind {
                kind: t.kind(),
                op: "selectresult",
            })
        }
    };
    let index = match expr.args()[1].as_ref() {
        Node::Term(t) => match t.as_ref() {
            Terminal::IntegerScalar(i) => *i,
            other => {
                return Err(Error::UnsupportedKind {
                    kind: other.kind(),
                    op: "selectresult",
                })
            }
        },
        Node::Expr(_) => {
            return Err(Error::InvalidArgument {
                arg: "index",
                reason: "selectresult index must be a literal integer".to_string(),
            })
        }
    };
    let len = producer.regs().len();
    if index < 0 {
        return Err(Error::InvalidArgument {
            arg: "index",
            reason: format!("selectresult index must be non-negative, got {index}"),
        });
    }
    let idx = index as usize;
    let picked = producer.regs().get(idx).ok_or(Error::ResultIndexOutOfRange {
        index: idx,
        len,
    })?;
    expr.regs().push(Rc::new(picked.deep_copy()));
    Ok(())
}
