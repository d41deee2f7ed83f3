//! Tokenization, driven by the pest grammar in `grammar.pest`.

use pest::{iterators::Pair, Parser};
use pest_derive::Parser;

use super::{Diagnostic, Location, Range};

#[derive(Parser)]
#[grammar = "lang/grammar.pest"]
struct PrologLexer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TokenKind {
    Symbol,
    Variable,
    Neck,
    LeftParen,
    RightParen,
    Comma,
    Period,
    Unknown,
    Eof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: Range,
}

impl<'a> Token<'a> {
    fn from_pair(pair: Pair<'a, Rule>) -> Option<Self> {
        let kind = match pair.as_rule() {
            Rule::symbol => TokenKind::Symbol,
            Rule::variable => TokenKind::Variable,
            Rule::neck => TokenKind::Neck,
            Rule::left_paren => TokenKind::LeftParen,
            Rule::right_paren => TokenKind::RightParen,
            Rule::comma => TokenKind::Comma,
            Rule::period => TokenKind::Period,
            Rule::unknown => TokenKind::Unknown,
            Rule::EOI => TokenKind::Eof,
            _ => return None,
        };
        let span = pair.as_span();
        Some(Self {
            kind,
            text: span.as_str(),
            range: Range::from_span(&span),
        })
    }
}

/// Splits `source` into tokens. The last token is always [`TokenKind::Eof`],
/// positioned after any trailing whitespace or comment.
///
/// The grammar accepts any input, so the error branch only guards against a
/// grammar regression; it is reported as a diagnostic at the failing position.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, Diagnostic> {
    let mut pairs = PrologLexer::parse(Rule::tokens, source).map_err(|err| {
        let offset = match err.location {
            pest::error::InputLocation::Pos(offset) => offset,
            pest::error::InputLocation::Span((start, _)) => start,
        };
        let (line, column) = match err.line_col {
            pest::error::LineColLocation::Pos(line_col) => line_col,
            pest::error::LineColLocation::Span(line_col, _) => line_col,
        };
        let location = Location::new(line, column, offset);
        Diagnostic::new("unexpected input", Range::new(location, location))
    })?;
    let tokens = pairs
        .next()
        .map(|pair| pair.into_inner().filter_map(Token::from_pair).collect())
        .unwrap_or_default();
    Ok(tokens)
}
