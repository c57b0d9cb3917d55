use std::{iter::Peekable, ops::Range};

use logos::Logos;

use crate::{
    ast::{Expression, Node, OpKind},
    error::ParseError,
    lexer::Token,
};

/// Result type used by the expression parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Byte range of a token within the expression text.
type Span = Range<usize>;

/// Parses one expression text into an [`Expression`].
///
/// This is the entry point for expression parsing. Exactly one tree is
/// built per call; input with trailing tokens after a complete expression
/// is rejected. The parser performs no evaluation and holds no state
/// beyond the current parse.
///
/// Grammar:
/// ```text
///     expr := NUMBER | IDENT | op '(' expr (',' expr)* ')'
///     op   := IDENT | '+' | '-' | '*' | '/' | '^'
/// ```
///
/// # Examples
/// ```
/// use exprserver::parser::parse_expression;
///
/// assert!(parse_expression("add(x, mul(2, y))").is_ok());
/// assert!(parse_expression("sqrt(2, 3)").is_err()); // wrong arity
/// ```
///
/// # Errors
/// Returns a [`ParseError`] identifying the offending token and its byte
/// offset when the text is malformed, names an unknown operator, supplies
/// a wrong argument count, or leaves input unconsumed.
pub fn parse_expression(text: &str) -> ParseResult<Expression> {
    let tokens = tokenize(text)?;
    let mut iter = tokens.iter().peekable();

    let root = parse_node(&mut iter)?;

    if let Some((token, span)) = iter.next() {
        return Err(ParseError::TrailingInput { text: render(token),
                                               at:   span.start, });
    }

    Ok(Expression::new(text, root))
}

/// Runs the lexer over the whole text, collecting tokens with their spans.
fn tokenize(text: &str) -> ParseResult<Vec<(Token, Span)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(text);

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.span())),
            Err(()) => {
                return Err(ParseError::UnexpectedToken { text: lexer.slice().to_string(),
                                                         at:   lexer.span().start, })
            },
        }
    }

    Ok(tokens)
}

/// Parses a single node: a constant, a variable, or an operator call.
fn parse_node<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let Some((token, span)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput);
    };

    match token {
        Token::Number(value) => Ok(Node::Constant(*value)),

        Token::Ident(name) => {
            // An identifier followed by '(' heads a call, otherwise it is
            // a variable leaf.
            if matches!(tokens.peek(), Some((Token::LParen, _))) {
                parse_call(tokens, name, span.start)
            } else {
                Ok(Node::Variable(name.clone()))
            }
        },

        Token::Plus | Token::Minus | Token::Star | Token::Slash | Token::Caret => {
            let spelling = token.operator_spelling().unwrap_or_default().to_string();
            if matches!(tokens.peek(), Some((Token::LParen, _))) {
                parse_call(tokens, &spelling, span.start)
            } else {
                Err(ParseError::ExpectedArgumentList { name: spelling,
                                                       at:   span.start, })
            }
        },

        other => Err(ParseError::UnexpectedToken { text: render(other),
                                                   at:   span.start, }),
    }
}

/// Parses an operator call `name(arg1, arg2, ...)`.
///
/// The stream is positioned at the opening parenthesis. The operator
/// spelling is resolved against the closed table, the argument list is
/// parsed, and the supplied argument count is checked against the kind's
/// fixed arity.
fn parse_call<'a, I>(tokens: &mut Peekable<I>, spelling: &str, at: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let Some(kind) = OpKind::lookup(spelling) else {
        return Err(ParseError::UnknownOperator { name: spelling.to_string(),
                                                 at });
    };

    // Consume the '(' the caller peeked.
    tokens.next();

    let mut children = vec![parse_node(tokens)?];
    loop {
        match tokens.next() {
            Some((Token::Comma, _)) => children.push(parse_node(tokens)?),
            Some((Token::RParen, _)) => break,
            Some((other, span)) => {
                return Err(ParseError::ExpectedClosingParen { found: render(other),
                                                              at:    span.start, })
            },
            None => return Err(ParseError::UnexpectedEndOfInput),
        }
    }

    if children.len() != kind.arity() {
        return Err(ParseError::WrongArity { name: kind.name(),
                                            expected: kind.arity(),
                                            found: children.len(),
                                            at });
    }

    Ok(Node::Operator { kind, children })
}

/// Renders a token for error messages.
fn render(token: &Token) -> String {
    match token {
        Token::Number(value) => value.to_string(),
        Token::Ident(name) => name.clone(),
        Token::Plus => "+".to_string(),
        Token::Minus => "-".to_string(),
        Token::Star => "*".to_string(),
        Token::Slash => "/".to_string(),
        Token::Caret => "^".to_string(),
        Token::LParen => "(".to_string(),
        Token::RParen => ")".to_string(),
        Token::Comma => ",".to_string(),
        Token::Ignored => " ".to_string(),
    }
}
