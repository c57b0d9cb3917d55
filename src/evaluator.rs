use std::collections::HashMap;

use crate::{ast::Node, error::ComputeError};

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, ComputeError>;

/// Evaluates an expression tree against a set of variable bindings.
///
/// The recursion follows the node variant: a constant yields its value, a
/// variable is looked up in `bindings` (a missing name is an error, never
/// an implicit zero), and an operator evaluates its children left to right
/// and applies its fixed function to the results.
///
/// Evaluation is pure: the same tree and the same bindings always produce
/// the same value.
///
/// # Parameters
/// - `node`: Root of the (sub)tree to evaluate.
/// - `bindings`: Mapping from variable name to its value for this pass.
///
/// # Errors
/// Returns [`ComputeError::UnboundVariable`] when the tree references a
/// name absent from `bindings`.
pub fn evaluate(node: &Node, bindings: &HashMap<String, f64>) -> EvalResult<f64> {
    match node {
        Node::Constant(value) => Ok(*value),

        Node::Variable(name) => {
            bindings.get(name)
                    .copied()
                    .ok_or_else(|| ComputeError::UnboundVariable { name: name.clone() })
        },

        Node::Operator { kind, children } => {
            let mut args = Vec::with_capacity(children.len());
            for child in children {
                args.push(evaluate(child, bindings)?);
            }
            Ok(kind.apply(&args))
        },
    }
}
