use crate::error::{ComputeError, RequestError};

/// Number of decimal digits each generated value is rounded to.
///
/// Advancing a binary float by a decimal step accumulates representation
/// error; without rounding, ranges like `0:0.1:1` can miss or gain their
/// final value.
const PRECISION: i32 = 12;

/// A declared range of values for one variable: name, lower bound, step
/// and upper bound.
///
/// The name must match `[a-z][a-z0-9]*`. The step must be positive for
/// generation to succeed; an empty sequence (e.g. `lower > upper`) is
/// valid.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRange {
    name:  String,
    lower: f64,
    step:  f64,
    upper: f64,
}

impl VariableRange {
    /// Creates a range declaration, validating the variable name.
    ///
    /// # Errors
    /// Returns [`RequestError::InvalidVariableName`] if `name` does not
    /// match `[a-z][a-z0-9]*`.
    pub fn new(name: impl Into<String>,
               lower: f64,
               step: f64,
               upper: f64)
               -> Result<Self, RequestError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(RequestError::InvalidVariableName { name });
        }
        Ok(Self { name,
                  lower,
                  step,
                  upper })
    }

    /// The variable's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generates the ordered sequence of values this range declares.
    ///
    /// Starts at `lower` and, while the running value does not exceed
    /// `upper`, appends it and advances by `step`, rounding the running
    /// value to 12 decimal digits after each advance.
    ///
    /// # Examples
    /// ```
    /// use exprserver::range::VariableRange;
    ///
    /// let range = VariableRange::new("x", 0.0, 0.5, 1.0).unwrap();
    /// assert_eq!(range.generate().unwrap(), vec![0.0, 0.5, 1.0]);
    /// ```
    ///
    /// # Errors
    /// Returns [`ComputeError::StepNotPositive`] if `step <= 0`. An empty
    /// sequence is not an error.
    pub fn generate(&self) -> Result<Vec<f64>, ComputeError> {
        if self.step <= 0.0 {
            return Err(ComputeError::StepNotPositive { name: self.name.clone(),
                                                       step: self.step, });
        }

        let mut values = Vec::new();
        let mut value = self.lower;
        while value <= self.upper {
            values.push(value);
            value = round_to_precision(value + self.step);
        }

        Ok(values)
    }
}

/// Checks a variable name against the `[a-z][a-z0-9]*` pattern.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        },
        _ => false,
    }
}

/// Rounds a value to [`PRECISION`] decimal digits.
fn round_to_precision(value: f64) -> f64 {
    let factor = 10f64.powi(PRECISION);
    (value * factor).round() / factor
}
