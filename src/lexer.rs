use logos::Logos;

/// Represents a lexical token in an expression's text.
///
/// Expressions use a prefix, function-call style syntax, so the token set
/// is small: numeric literals, identifiers, operator symbols and the
/// punctuation of argument lists.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5`, `-2` or `2.1e-10`.
    /// A leading minus sign is part of the literal; it can never be an
    /// operator here because the grammar has no infix forms.
    #[regex(r"-?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"-?\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"-?[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Identifier tokens: variable names or word-spelled operators such as
    /// `x` or `sqrt`. Lowercase letter first, lowercase letters and digits
    /// after.
    #[regex(r"[a-z][a-z0-9]*", |lex| lex.slice().to_string())]
    Ident(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// Spaces and tabs.
    #[regex(r"[ \t]+", logos::skip)]
    Ignored,
}

impl Token {
    /// The operator spelling this token stands for, if it can head a call.
    #[must_use]
    pub fn operator_spelling(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name),
            Self::Plus => Some("+"),
            Self::Minus => Some("-"),
            Self::Star => Some("*"),
            Self::Slash => Some("/"),
            Self::Caret => Some("^"),
            _ => None,
        }
    }
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
