use crate::{
    engine::{CombinationMode, ComputationKind, ComputationRequest},
    error::RequestError,
    parser,
    range::VariableRange,
};

/// Which server statistic a stat request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Total number of OK responses served, `STAT_REQS`.
    Reqs,
    /// Average elapsed time of OK responses, `STAT_AVG_TIME`.
    AvgTime,
    /// Maximum elapsed time of OK responses, `STAT_MAX_TIME`.
    MaxTime,
}

/// One decoded request line: either a statistics query or a computation.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// A query for one of the server statistics.
    Stat(StatKind),
    /// A computation over variable ranges and expressions.
    Computation(ComputationRequest),
}

/// Decodes one trimmed request line.
///
/// The wire grammar accepts three fixed stat keywords or a computation of
/// the form `KIND_MODE;ranges;expressions`, where `ranges` is a
/// comma-separated list of `name:lower:step:upper` fields and
/// `expressions` is a semicolon-separated list of expression texts.
///
/// # Errors
/// Returns a [`RequestError`]: the generic unrecognized-format error when
/// the line matches no grammar, or a more specific field-level error
/// (invalid kind, malformed range field, bad variable name, non-numeric
/// bound, duplicate variable, expression parse failure).
pub fn parse_request(line: &str) -> Result<Request, RequestError> {
    let line = line.trim();

    match line {
        "STAT_REQS" => return Ok(Request::Stat(StatKind::Reqs)),
        "STAT_AVG_TIME" => return Ok(Request::Stat(StatKind::AvgTime)),
        "STAT_MAX_TIME" => return Ok(Request::Stat(StatKind::MaxTime)),
        _ => {},
    }

    let (head, rest) = line.split_once(';').ok_or(RequestError::UnrecognizedRequest)?;
    let (kind, mode) = parse_kind(head)?;
    let (ranges_text, expressions_text) =
        rest.split_once(';').ok_or(RequestError::UnrecognizedRequest)?;
    if ranges_text.is_empty() || expressions_text.is_empty() {
        return Err(RequestError::UnrecognizedRequest);
    }

    let ranges = parse_ranges(ranges_text)?;
    let expressions = expressions_text.split(';')
                                      .map(parser::parse_expression)
                                      .collect::<Result<Vec<_>, _>>()?;

    Ok(Request::Computation(ComputationRequest::new(kind, mode, ranges, expressions)))
}

/// Decodes the `KIND_MODE` head field, e.g. `AVG_GRID`.
fn parse_kind(head: &str) -> Result<(ComputationKind, CombinationMode), RequestError> {
    let invalid = || RequestError::InvalidKind { text: head.to_string() };

    let (kind, mode) = head.split_once('_').ok_or_else(invalid)?;
    let kind = ComputationKind::from_keyword(kind).ok_or_else(invalid)?;
    let mode = CombinationMode::from_keyword(mode).ok_or_else(invalid)?;

    Ok((kind, mode))
}

/// Decodes the comma-separated range declarations, rejecting duplicate
/// variable names.
fn parse_ranges(text: &str) -> Result<Vec<VariableRange>, RequestError> {
    let mut ranges: Vec<VariableRange> = Vec::new();

    for field in text.split(',') {
        let parts: Vec<&str> = field.split(':').collect();
        let [name, lower, step, upper] = parts[..] else {
            return Err(RequestError::RangeFieldCount { text: field.to_string() });
        };

        let lower = parse_bound(lower)?;
        let step = parse_bound(step)?;
        let upper = parse_bound(upper)?;

        if ranges.iter().any(|range| range.name() == name) {
            return Err(RequestError::DuplicateVariable { name: name.to_string() });
        }

        ranges.push(VariableRange::new(name, lower, step, upper)?);
    }

    Ok(ranges)
}

/// Decodes one numeric bound field.
fn parse_bound(text: &str) -> Result<f64, RequestError> {
    text.parse()
        .map_err(|_| RequestError::InvalidBound { text: text.to_string() })
}
