use std::collections::HashMap;

use exprserver::{
    error::{ComputeError, ParseError},
    parser::parse_expression,
};

fn eval(text: &str, bindings: &[(&str, f64)]) -> f64 {
    let expression =
        parse_expression(text).unwrap_or_else(|e| panic!("Failed to parse '{text}': {e}"));
    let map: HashMap<String, f64> = bindings.iter()
                                            .map(|(name, value)| ((*name).to_string(), *value))
                                            .collect();
    expression.evaluate(&map)
              .unwrap_or_else(|e| panic!("Failed to evaluate '{text}': {e}"))
}

fn parse_failure(text: &str) -> ParseError {
    match parse_expression(text) {
        Ok(_) => panic!("Parsing '{text}' succeeded but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn literal_constants() {
    assert_eq!(eval("3", &[]), 3.0);
    assert_eq!(eval("2.5", &[]), 2.5);
    assert_eq!(eval("-4", &[]), -4.0);
    assert_eq!(eval(".5", &[]), 0.5);
    assert_eq!(eval("1e3", &[]), 1000.0);
    assert_eq!(eval("2.1e-10", &[]), 2.1e-10);
}

#[test]
fn variable_references() {
    assert_eq!(eval("x", &[("x", 7.0)]), 7.0);
    assert_eq!(eval("x2", &[("x2", -1.5)]), -1.5);
}

#[test]
fn word_operators() {
    assert_eq!(eval("add(2, 3)", &[]), 5.0);
    assert_eq!(eval("sub(8, 5)", &[]), 3.0);
    assert_eq!(eval("mul(7, 9)", &[]), 63.0);
    assert_eq!(eval("div(1, 4)", &[]), 0.25);
    assert_eq!(eval("pow(2, 10)", &[]), 1024.0);
    assert_eq!(eval("neg(5)", &[]), -5.0);
    assert_eq!(eval("sqrt(9)", &[]), 3.0);
    assert_eq!(eval("abs(-5)", &[]), 5.0);
    assert_eq!(eval("abs(neg(5))", &[]), 5.0);
    assert_eq!(eval("min(2, 3)", &[]), 2.0);
    assert_eq!(eval("max(2, 3)", &[]), 3.0);
}

#[test]
fn symbol_operators() {
    assert_eq!(eval("+(2, 3)", &[]), 5.0);
    assert_eq!(eval("-(8, 5)", &[]), 3.0);
    assert_eq!(eval("*(7, 9)", &[]), 63.0);
    assert_eq!(eval("/(1, 4)", &[]), 0.25);
    assert_eq!(eval("^(2, 10)", &[]), 1024.0);
}

#[test]
fn nested_calls_and_bindings() {
    assert_eq!(eval("add(x, mul(2, y))", &[("x", 1.0), ("y", 3.0)]), 7.0);
    assert_eq!(eval("pow(add(1, 1), 3)", &[]), 8.0);
    assert_eq!(eval("max(x, max(y, z))", &[("x", 1.0), ("y", 5.0), ("z", 2.0)]), 5.0);
    assert_eq!(eval("min(1, -2)", &[]), -2.0);
}

#[test]
fn whitespace_is_ignored() {
    assert_eq!(eval("  add( x ,\t2 )  ", &[("x", 1.0)]), 3.0);
}

#[test]
fn evaluation_is_deterministic() {
    let expression = parse_expression("div(pow(x, 3), add(y, 0.1))").unwrap();
    let bindings: HashMap<String, f64> =
        [("x".to_string(), 1.7), ("y".to_string(), 2.3)].into_iter().collect();

    let first = expression.evaluate(&bindings).unwrap();
    for _ in 0..10 {
        assert_eq!(expression.evaluate(&bindings).unwrap().to_bits(), first.to_bits());
    }
}

#[test]
fn unknown_operator_is_rejected() {
    assert!(matches!(parse_failure("foo(1)"), ParseError::UnknownOperator { .. }));
    assert!(matches!(parse_failure("sin(1)"), ParseError::UnknownOperator { .. }));
}

#[test]
fn wrong_arity_is_rejected() {
    assert!(matches!(parse_failure("add(1)"),
                     ParseError::WrongArity { name: "add",
                                              expected: 2,
                                              found: 1,
                                              .. }));
    assert!(matches!(parse_failure("sqrt(2, 3)"),
                     ParseError::WrongArity { name: "sqrt",
                                              expected: 1,
                                              found: 2,
                                              .. }));
    assert!(matches!(parse_failure("min(1, 2, 3)"), ParseError::WrongArity { .. }));
}

#[test]
fn malformed_text_is_rejected() {
    assert!(matches!(parse_failure("1 2"), ParseError::TrailingInput { .. }));
    assert!(matches!(parse_failure("x + y"), ParseError::TrailingInput { .. }));
    assert!(matches!(parse_failure("add(1, 2"), ParseError::UnexpectedEndOfInput));
    assert!(matches!(parse_failure(""), ParseError::UnexpectedEndOfInput));
    assert!(matches!(parse_failure(")"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_failure("X"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_failure("ADD(x, y)"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_failure("+"), ParseError::ExpectedArgumentList { .. }));
    assert!(matches!(parse_failure("add()"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_failure("add(1; 2)"), ParseError::UnexpectedToken { .. }));
}

#[test]
fn unbound_variable_fails_evaluation() {
    let expression = parse_expression("add(x, z)").unwrap();
    let bindings: HashMap<String, f64> = [("x".to_string(), 1.0)].into_iter().collect();

    match expression.evaluate(&bindings) {
        Err(ComputeError::UnboundVariable { name }) => assert_eq!(name, "z"),
        other => panic!("Expected an unbound variable error, got {other:?}"),
    }
}
