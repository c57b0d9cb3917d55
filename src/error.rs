/// Expression parsing errors.
///
/// Defines all error types that can occur while turning an expression's
/// text into a tree: unexpected or trailing tokens, unknown operator
/// names, wrong argument counts.
pub mod parse_error;
/// Computation errors.
///
/// Contains all error types that can be raised while generating range
/// values, combining them into tuples, evaluating expressions and
/// aggregating the results.
pub mod compute_error;
/// Request decoding errors.
///
/// Covers every way a request line can fail to match the wire grammar,
/// from an unrecognized overall shape down to a single malformed range
/// field.
pub mod request_error;

pub use compute_error::ComputeError;
pub use parse_error::ParseError;
pub use request_error::RequestError;
