#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while parsing an expression's
/// text. Offsets are byte positions within that text.
pub enum ParseError {
    /// Found a token that cannot start or continue an expression.
    UnexpectedToken {
        /// The offending text.
        text: String,
        /// Byte offset of the token.
        at:   usize,
    },
    /// Reached the end of the expression text unexpectedly.
    UnexpectedEndOfInput,
    /// An argument list was not closed with `)`.
    ExpectedClosingParen {
        /// The token found instead.
        found: String,
        /// Byte offset of the token.
        at:    usize,
    },
    /// An operator symbol was not followed by an argument list.
    ExpectedArgumentList {
        /// The operator spelling.
        name: String,
        /// Byte offset of the operator.
        at:   usize,
    },
    /// A call named an operator outside the closed table.
    UnknownOperator {
        /// The unrecognized spelling.
        name: String,
        /// Byte offset of the name.
        at:   usize,
    },
    /// A call supplied the wrong number of arguments for its operator.
    WrongArity {
        /// Canonical operator name.
        name:     &'static str,
        /// The operator's fixed arity.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// Byte offset of the call head.
        at:       usize,
    },
    /// A complete expression was parsed but input remained.
    TrailingInput {
        /// The first unconsumed token.
        text: String,
        /// Byte offset of that token.
        at:   usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { text, at } => {
                write!(f, "Unexpected token '{text}' at offset {at}.")
            },

            Self::UnexpectedEndOfInput => write!(f, "Unexpected end of expression."),

            Self::ExpectedClosingParen { found, at } => write!(f,
                                                               "Expected ',' or ')' in argument list but found '{found}' at offset {at}."),

            Self::ExpectedArgumentList { name, at } => write!(f,
                                                              "Operator '{name}' at offset {at} must be followed by an argument list."),

            Self::UnknownOperator { name, at } => {
                write!(f, "Unknown operator '{name}' at offset {at}.")
            },

            Self::WrongArity { name,
                               expected,
                               found,
                               at, } => write!(f,
                                               "Operator '{name}' at offset {at} takes {expected} argument(s) but {found} were supplied."),

            Self::TrailingInput { text, at } => write!(f,
                                                       "Extra input after expression: '{text}' at offset {at}."),
        }
    }
}

impl std::error::Error for ParseError {}
