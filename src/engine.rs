use std::collections::HashMap;

use crate::{ast::Expression, error::ComputeError, range::VariableRange};

/// Which aggregate a computation request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputationKind {
    /// Minimum of all produced values.
    Min,
    /// Maximum of all produced values.
    Max,
    /// Arithmetic mean of all produced values.
    Avg,
    /// Number of tuples; no expression is evaluated.
    Count,
}

impl ComputationKind {
    /// Maps the wire keyword (`MIN`, `MAX`, `AVG`, `COUNT`) to a kind.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "MIN" => Some(Self::Min),
            "MAX" => Some(Self::Max),
            "AVG" => Some(Self::Avg),
            "COUNT" => Some(Self::Count),
            _ => None,
        }
    }

    /// Lowercase name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Avg => "avg",
            Self::Count => "count",
        }
    }
}

/// How the declared ranges are combined into tuples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinationMode {
    /// Full Cartesian product of all value sequences.
    Grid,
    /// Element-wise pairing across sequences of equal length.
    List,
}

impl CombinationMode {
    /// Maps the wire keyword (`GRID`, `LIST`) to a mode.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "GRID" => Some(Self::Grid),
            "LIST" => Some(Self::List),
            _ => None,
        }
    }
}

/// One decoded computation request: the aggregate kind, the combination
/// mode, the declared variable ranges and the expressions to evaluate.
///
/// A request is built once per incoming line, never mutated, and
/// discarded after producing one result.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputationRequest {
    kind:        ComputationKind,
    mode:        CombinationMode,
    ranges:      Vec<VariableRange>,
    expressions: Vec<Expression>,
}

impl ComputationRequest {
    /// Assembles a request from its decoded parts. Variable names are
    /// assumed distinct; the request decoder enforces this.
    #[must_use]
    pub fn new(kind: ComputationKind,
               mode: CombinationMode,
               ranges: Vec<VariableRange>,
               expressions: Vec<Expression>)
               -> Self {
        Self { kind,
               mode,
               ranges,
               expressions }
    }

    /// Computes this request's scalar result.
    ///
    /// Every range is generated into its value sequence (declaration
    /// order is preserved throughout), the sequences are combined into
    /// tuples per the mode, and then either the tuples are counted
    /// (`COUNT`) or every expression is evaluated against every tuple
    /// (tuples outer, expressions inner) and the flat value sequence is
    /// aggregated.
    ///
    /// # Errors
    /// - [`ComputeError::StepNotPositive`] from range generation.
    /// - [`ComputeError::RangeLengthMismatch`] in LIST mode when the
    ///   generated sequences differ in length.
    /// - [`ComputeError::UnboundVariable`] when an expression references
    ///   an undeclared variable.
    /// - [`ComputeError::EmptyAggregation`] when MIN/MAX/AVG is requested
    ///   but no value was produced.
    pub fn compute(&self) -> Result<f64, ComputeError> {
        let mut names = Vec::with_capacity(self.ranges.len());
        let mut sequences = Vec::with_capacity(self.ranges.len());
        for range in &self.ranges {
            sequences.push(range.generate()?);
            names.push(range.name());
        }

        let tuples = match self.mode {
            CombinationMode::Grid => cartesian_product(&sequences),
            CombinationMode::List => element_wise_merge(&names, &sequences)?,
        };

        #[allow(clippy::cast_precision_loss)]
        let tuple_count = tuples.len() as f64;
        if self.kind == ComputationKind::Count {
            return Ok(tuple_count);
        }

        let mut results = Vec::with_capacity(tuples.len() * self.expressions.len());
        let mut bindings: HashMap<String, f64> = HashMap::with_capacity(names.len());
        for tuple in &tuples {
            bindings.clear();
            for (name, value) in names.iter().zip(tuple) {
                bindings.insert((*name).to_string(), *value);
            }
            for expression in &self.expressions {
                results.push(expression.evaluate(&bindings)?);
            }
        }

        if results.is_empty() {
            return Err(ComputeError::EmptyAggregation { kind: self.kind.name() });
        }

        #[allow(clippy::cast_precision_loss)]
        let aggregate = match self.kind {
            ComputationKind::Min => results.iter().copied().fold(f64::INFINITY, f64::min),
            ComputationKind::Max => results.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            ComputationKind::Avg => results.iter().sum::<f64>() / results.len() as f64,
            ComputationKind::Count => tuple_count,
        };

        Ok(aggregate)
    }
}

/// Renders a computed scalar for the wire: exactly 6 digits after the
/// decimal point.
#[must_use]
pub fn format_result(value: f64) -> String {
    format!("{value:.6}")
}

/// Builds the full Cartesian product of the value sequences.
///
/// The first sequence varies slowest and the last varies fastest, i.e.
/// standard nested iteration order. The product of any empty sequence is
/// empty.
fn cartesian_product(sequences: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if sequences.iter().any(Vec::is_empty) {
        return Vec::new();
    }

    let count: usize = sequences.iter().map(Vec::len).product();
    let mut tuples = Vec::with_capacity(count);
    let mut indices = vec![0usize; sequences.len()];

    for _ in 0..count {
        tuples.push(indices.iter()
                           .zip(sequences)
                           .map(|(&i, sequence)| sequence[i])
                           .collect());

        // Advance the odometer, last axis fastest.
        for axis in (0..indices.len()).rev() {
            indices[axis] += 1;
            if indices[axis] < sequences[axis].len() {
                break;
            }
            indices[axis] = 0;
        }
    }

    tuples
}

/// Zips the value sequences element-wise into tuples.
///
/// Every sequence must have the same length as the first; a mismatch is a
/// hard error. Produces one tuple per position.
fn element_wise_merge(names: &[&str],
                      sequences: &[Vec<f64>])
                      -> Result<Vec<Vec<f64>>, ComputeError> {
    let expected = sequences.first().map_or(0, Vec::len);
    for (name, sequence) in names.iter().zip(sequences) {
        if sequence.len() != expected {
            return Err(ComputeError::RangeLengthMismatch { expected,
                                                           name: (*name).to_string(),
                                                           found: sequence.len(), });
        }
    }

    let tuples = (0..expected).map(|position| {
                                  sequences.iter()
                                           .map(|sequence| sequence[position])
                                           .collect()
                              })
                              .collect();

    Ok(tuples)
}
