use std::collections::HashMap;

use crate::{error::ComputeError, evaluator};

/// The closed set of operator kinds an expression may use.
///
/// Every kind is a pure mapping from a fixed number of floating-point
/// operands to one floating-point result. The kind-to-name, kind-to-arity
/// and kind-to-function associations are fixed at build time; there is no
/// way to register additional operators at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// Binary addition, `add`/`+`.
    Add,
    /// Binary subtraction, `sub`/`-`.
    Sub,
    /// Binary multiplication, `mul`/`*`.
    Mul,
    /// Binary division, `div`/`/`. Division by zero follows IEEE-754
    /// (infinities and NaN), it is not an error.
    Div,
    /// Binary exponentiation, `pow`/`^`.
    Pow,
    /// Unary negation, `neg`.
    Neg,
    /// Unary square root, `sqrt`.
    Sqrt,
    /// Unary absolute value, `abs`.
    Abs,
    /// Binary minimum, `min`.
    Min,
    /// Binary maximum, `max`.
    Max,
}

/// The operator lookup table, keyed by every accepted spelling.
///
/// Symbol spellings (`+`, `-`, ...) and word spellings (`add`, `sub`, ...)
/// name the same kinds; the parser consults this table whenever a call
/// head is seen.
const OPERATORS: &[(&str, OpKind)] = &[("add", OpKind::Add),
                                       ("+", OpKind::Add),
                                       ("sub", OpKind::Sub),
                                       ("-", OpKind::Sub),
                                       ("mul", OpKind::Mul),
                                       ("*", OpKind::Mul),
                                       ("div", OpKind::Div),
                                       ("/", OpKind::Div),
                                       ("pow", OpKind::Pow),
                                       ("^", OpKind::Pow),
                                       ("neg", OpKind::Neg),
                                       ("sqrt", OpKind::Sqrt),
                                       ("abs", OpKind::Abs),
                                       ("min", OpKind::Min),
                                       ("max", OpKind::Max)];

impl OpKind {
    /// Looks up an operator kind by one of its accepted spellings.
    ///
    /// # Parameters
    /// - `name`: The spelling found at the head of a call, e.g. `"add"` or
    ///   `"+"`.
    ///
    /// # Returns
    /// - `Some(OpKind)`: If the spelling names a known operator.
    /// - `None`: If it does not; callers report this as an unknown-operator
    ///   parse error.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        OPERATORS.iter()
                 .find(|(alias, _)| *alias == name)
                 .map(|(_, kind)| *kind)
    }

    /// Returns the canonical name of this operator kind, used in error
    /// messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Pow => "pow",
            Self::Neg => "neg",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Returns the fixed number of operands this operator kind consumes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Neg | Self::Sqrt | Self::Abs => 1,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Pow | Self::Min | Self::Max => 2,
        }
    }

    /// Applies this operator's function to its operands.
    ///
    /// The caller must supply exactly [`arity`](Self::arity) values; the
    /// parser enforces this when the tree is built.
    #[must_use]
    pub fn apply(self, args: &[f64]) -> f64 {
        match self {
            Self::Add => args[0] + args[1],
            Self::Sub => args[0] - args[1],
            Self::Mul => args[0] * args[1],
            Self::Div => args[0] / args[1],
            Self::Pow => args[0].powf(args[1]),
            Self::Neg => -args[0],
            Self::Sqrt => args[0].sqrt(),
            Self::Abs => args[0].abs(),
            Self::Min => args[0].min(args[1]),
            Self::Max => args[0].max(args[1]),
        }
    }
}

/// One node of a parsed expression tree.
///
/// A node is immutable once built and exclusively owned by the tree that
/// contains it; there is no sharing between trees and no cycles. The
/// variant set is closed, so evaluation can exhaustively match on it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal floating-point value.
    Constant(f64),
    /// A reference to a variable, resolved against the bindings supplied
    /// at evaluation time.
    Variable(String),
    /// An operator application. `children` always holds exactly
    /// `kind.arity()` nodes, in argument order.
    Operator {
        /// Which operator is applied.
        kind:     OpKind,
        /// The operand subtrees, in argument order.
        children: Vec<Node>,
    },
}

/// A parsed expression: the original text plus the root of its tree.
///
/// An `Expression` holds no evaluation state; it can be evaluated any
/// number of times against different bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root:   Node,
}

impl Expression {
    /// Wraps a root node together with the text it was parsed from.
    #[must_use]
    pub fn new(source: impl Into<String>, root: Node) -> Self {
        Self { source: source.into(),
               root }
    }

    /// The text this expression was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The root node of the expression tree.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Evaluates this expression against the given variable bindings.
    ///
    /// # Errors
    /// Returns [`ComputeError::UnboundVariable`] if the tree references a
    /// variable absent from `bindings`.
    pub fn evaluate(&self, bindings: &HashMap<String, f64>) -> Result<f64, ComputeError> {
        evaluator::evaluate(&self.root, bindings)
    }
}
