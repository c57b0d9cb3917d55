use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while decoding a request line.
pub enum RequestError {
    /// The line matches neither a stat keyword nor the computation shape.
    UnrecognizedRequest,
    /// The kind/mode head is not one of `MIN|MAX|AVG|COUNT` joined with
    /// `GRID|LIST`.
    InvalidKind {
        /// The head field as received.
        text: String,
    },
    /// A range field did not have the `name:lower:step:upper` shape.
    RangeFieldCount {
        /// The range field as received.
        text: String,
    },
    /// A variable name did not match `[a-z][a-z0-9]*`.
    InvalidVariableName {
        /// The rejected name.
        name: String,
    },
    /// A range bound or step was not a number.
    InvalidBound {
        /// The rejected bound text.
        text: String,
    },
    /// The same variable was declared more than once.
    DuplicateVariable {
        /// The repeated name.
        name: String,
    },
    /// An expression in the request failed to parse.
    Expression(ParseError),
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedRequest => write!(f, "Invalid request format."),

            Self::InvalidKind { text } => write!(f,
                                                 "Invalid computation kind '{text}': expected MIN|MAX|AVG|COUNT joined with GRID|LIST."),

            Self::RangeFieldCount { text } => write!(f,
                                                     "Variable range '{text}' should be of the form name:lower:step:upper."),

            Self::InvalidVariableName { name } => {
                write!(f, "Invalid variable name '{name}'.")
            },

            Self::InvalidBound { text } => {
                write!(f, "Invalid number '{text}' in variable range.")
            },

            Self::DuplicateVariable { name } => {
                write!(f, "Variable '{name}' is declared more than once.")
            },

            Self::Expression(inner) => write!(f, "Failed to parse expression: {inner}"),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Expression(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<ParseError> for RequestError {
    fn from(inner: ParseError) -> Self {
        Self::Expression(inner)
    }
}
