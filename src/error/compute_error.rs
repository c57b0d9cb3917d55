#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while computing a request's
/// result: range generation, tuple combination, evaluation and
/// aggregation.
pub enum ComputeError {
    /// A range declared a step that is not strictly positive.
    StepNotPositive {
        /// The variable whose range is invalid.
        name: String,
        /// The declared step.
        step: f64,
    },
    /// An expression referenced a variable with no bound value.
    UnboundVariable {
        /// The unbound variable's name.
        name: String,
    },
    /// LIST mode was used with ranges of different generated lengths.
    RangeLengthMismatch {
        /// Length of the first range's sequence.
        expected: usize,
        /// The variable whose sequence differs.
        name:     String,
        /// That variable's sequence length.
        found:    usize,
    },
    /// An aggregate was requested but no values were produced, e.g. a
    /// grid over an empty range.
    EmptyAggregation {
        /// The aggregate kind, lowercase (`min`, `max`, `avg`).
        kind: &'static str,
    },
}

impl std::fmt::Display for ComputeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StepNotPositive { name, step } => write!(f,
                                                           "Step for variable '{name}' should be greater than 0, got {step}."),

            Self::UnboundVariable { name } => write!(f, "Unvalued variable '{name}'."),

            Self::RangeLengthMismatch { expected,
                                        name,
                                        found, } => write!(f,
                                                           "All variable ranges must have the same length for element-wise merging: '{name}' has {found} value(s), expected {expected}."),

            Self::EmptyAggregation { kind } => write!(f,
                                                      "Failed to compute {kind}: no values were produced."),
        }
    }
}

impl std::error::Error for ComputeError {}
