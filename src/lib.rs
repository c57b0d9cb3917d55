//! # exprserver
//!
//! exprserver is a line-protocol TCP server that evaluates arithmetic
//! expressions over declared variable ranges and answers with one
//! aggregate (minimum, maximum, average or count) per request.
//!
//! A request like `AVG_GRID;x:0:1:1,y:0:1:1;add(x,y)` declares two
//! variable ranges, combines them into tuples (here the Cartesian
//! product), evaluates every expression against every tuple and averages
//! the results. The core that does this is stateless; every connection is
//! served on its own thread and shares nothing but the response
//! statistics.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the `Node` tree, the closed `OpKind` operator
/// table (fixed names, fixed arities, pure functions) and the
/// `Expression` wrapper that owns a parsed tree.
pub mod ast;
/// Combines variable ranges into tuples and aggregates evaluation
/// results.
///
/// The engine builds the tuple set for a request (Cartesian product in
/// GRID mode, element-wise merge in LIST mode), evaluates every
/// expression against every tuple and reduces the values to one scalar.
pub mod engine;
/// Provides error types for every failure domain.
///
/// One enum per domain: expression parsing, computation, request
/// decoding. Every error renders a self-contained message; all errors are
/// per-request and none is fatal to the server.
pub mod error;
/// Walks an expression tree against one set of variable bindings.
pub mod evaluator;
/// Tokenizes expression text.
pub mod lexer;
/// Parses expression text into trees.
///
/// Recursive descent over the token stream; prefix/function-call syntax
/// only, one tree per call, trailing input rejected.
pub mod parser;
/// Declares and generates variable value ranges.
pub mod range;
/// Decodes request lines into stat or computation requests.
pub mod request;
/// The TCP boundary: listener, per-connection handler threads, response
/// envelope.
pub mod server;
/// Shared statistics over successful responses.
pub mod stats;
