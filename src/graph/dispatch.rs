//! Node dispatch: route a ready node to its operator runner
//!
//! A terminal is a no-op (its data is already present), and so is an
//! expression node whose register is already populated from an earlier
//! visit through another parent. The kind set is closed, so there can be
//! no unrecognized tag at runtime; exhaustive matching stands in for the
//! dispatch-table-gap failure of a more open design.

use crate::error::{Error, Result};
use crate::graph::node::{Node, NodeKind};
use crate::runners;
use crate::runners::sum::Axis;
use crate::terminal::Terminal;
use std::rc::Rc;

/// Compute `node`'s result into its register. Arguments must already be
/// evaluated (guaranteed by execution-list order).
pub fn dispatch(node: &Rc<Node>) -> Result<()> {
    let expr = match node.as_ref() {
        Node::Term(_) => return Ok(()),
        Node::Expr(e) => e,
    };
    if !expr.regs().is_empty() {
        // revisit of a shared node
        return Ok(());
    }
    if expr.kind() == NodeKind::SelectResult {
        return runners::selectresult::run(expr);
    }

    let args: Vec<Rc<Terminal>> = expr
        .args()
        .iter()
        .map(arg_terminal)
        .collect::<Result<_>>()?;
    let regs = expr.regs();
    match expr.kind() {
        NodeKind::Plus => runners::plus::run(regs, &args[0], &args[1]),
        NodeKind::Negate => runners::negate::run(regs, &args[0]),
        NodeKind::Transpose => runners::transpose::run(regs, &args[0], false),
        NodeKind::Ctranspose => runners::transpose::run(regs, &args[0], true),
        NodeKind::Mtimes => runners::mtimes::run(regs, &args[0], &args[1]),
        NodeKind::Lu => runners::lu::run(regs, &args[0]),
        NodeKind::Qr => runners::qr::run(regs, &args[0]),
        NodeKind::Svd => runners::svd::run(regs, &args[0]),
        NodeKind::Inv => runners::inv::run(regs, &args[0]),
        NodeKind::Pinv => runners::pinv::run(regs, &args[0]),
        NodeKind::Mldivide => runners::mldivide::run(regs, &args[0], &args[1]),
        NodeKind::Norm2 => runners::norm2::run(regs, &args[0]),
        NodeKind::SumRows => runners::sum::run(regs, &args[0], Axis::Rows),
        NodeKind::SumCols => runners::sum::run(regs, &args[0], Axis::Cols),
        kind => Err(Error::Internal(format!(
            "terminal kind {kind} reached expression dispatch"
        ))),
    }
}

/// Materialize an argument: terminals directly, expression arguments from
/// their register's first slot
fn arg_terminal(arg: &Rc<Node>) -> Result<Rc<Terminal>> {
    match arg.as_ref() {
        Node::Term(t) => Ok(Rc::clone(t)),
        Node::Expr(e) => e.regs().get(0).ok_or_else(|| {
            Error::Internal(format!(
                "{} argument dispatched before its result was computed",
                e.kind()
            ))
        }),
    }
}
