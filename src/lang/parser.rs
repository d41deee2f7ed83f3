//! Recursive-descent parser over the token stream.
//!
//! Errors do not stop the parser. The first error puts it in panic mode:
//! later errors are suppressed until it resynchronizes on a token that can
//! start or continue a construct, so one pass reports every independent
//! mistake in the source.

use std::collections::HashMap;

use log::trace;

use super::{
    lexer::{tokenize, Token, TokenKind},
    Diagnostic, Range, SyntaxError,
};
use crate::{
    clause::{Clause, Query},
    term::{Structure, Term, Variable},
};

pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
    diagnostics: Vec<Diagnostic>,
    panic_mode: bool,
    // Variables of the clause or query being parsed, so that every occurrence
    // of a name shares one `Variable`.
    scope: HashMap<&'a str, Variable>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let (tokens, diagnostics) = match tokenize(source) {
            Ok(tokens) => (tokens, Vec::new()),
            Err(diagnostic) => {
                let eof = Token {
                    kind: TokenKind::Eof,
                    text: "",
                    range: diagnostic.range,
                };
                (vec![eof], vec![diagnostic])
            }
        };
        Self {
            tokens,
            position: 0,
            diagnostics,
            panic_mode: false,
            scope: HashMap::new(),
        }
    }

    /// Parses a sequence of clauses.
    pub fn parse_program(mut self) -> Result<Vec<Clause>, SyntaxError> {
        let mut clauses = Vec::new();
        while self.peek().kind != TokenKind::Eof {
            if let Some(clause) = self.parse_clause() {
                trace!("parsed clause {}", clause);
                clauses.push(clause);
            }
            self.synchronize(&[TokenKind::Symbol]);
        }
        self.finish(clauses)
    }

    /// Parses a conjunction of goals terminated by a period.
    pub fn parse_query(mut self) -> Result<Query, SyntaxError> {
        self.scope.clear();
        let goals = self.parse_list(Self::parse_structure, TokenKind::Period);
        self.consume(TokenKind::Period, "expect a '.' at the end of a query");
        self.finish(Query::new(goals))
    }

    fn finish<T>(self, value: T) -> Result<T, SyntaxError> {
        if self.diagnostics.is_empty() {
            Ok(value)
        } else {
            Err(SyntaxError::new(self.diagnostics))
        }
    }

    fn parse_clause(&mut self) -> Option<Clause> {
        self.scope.clear();
        let head = self.parse_structure()?;
        let body = if self.peek().kind == TokenKind::Neck {
            self.advance();
            self.parse_list(Self::parse_structure, TokenKind::Period)
        } else {
            Vec::new()
        };
        self.consume(TokenKind::Period, "expect a '.' at the end of a clause");
        Some(Clause::new(head, body))
    }

    fn parse_term(&mut self) -> Option<Term> {
        match self.peek().kind {
            TokenKind::Symbol => self.parse_structure().map(Term::Structure),
            TokenKind::Variable => self.parse_variable().map(Term::Variable),
            _ => {
                let range = self.peek().range;
                self.emit("expect a Prolog term", range);
                None
            }
        }
    }

    fn parse_structure(&mut self) -> Option<Structure> {
        let symbol = self.consume(TokenKind::Symbol, "expect a symbol")?.text;
        let mut arguments = Vec::new();
        if self.peek().kind == TokenKind::LeftParen {
            self.advance();
            arguments = self.parse_list(Self::parse_term, TokenKind::RightParen);
            self.consume(
                TokenKind::RightParen,
                "expect a ')' at the end of a structure's arguments list",
            );
        }
        Some(Structure::new(symbol, arguments))
    }

    fn parse_variable(&mut self) -> Option<Variable> {
        let name = self.consume(TokenKind::Variable, "expect a variable")?.text;
        let variable = self
            .scope
            .entry(name)
            .or_insert_with(|| Variable::new(name))
            .clone();
        Some(variable)
    }

    /// Parses comma-separated elements up to (not including) `terminator`.
    fn parse_list<T>(
        &mut self,
        parse_element: fn(&mut Self) -> Option<T>,
        terminator: TokenKind,
    ) -> Vec<T> {
        let mut elements = Vec::new();
        while self.peek().kind != terminator {
            if let Some(element) = parse_element(self) {
                elements.push(element);
            }
            self.synchronize(&[TokenKind::Comma, terminator]);
            if self.peek().kind == TokenKind::Comma {
                self.advance();
            } else {
                break;
            }
        }
        elements
    }

    fn peek(&self) -> &Token<'a> {
        &self.tokens[self.position]
    }

    /// Moves past the next token, never past the end of input.
    fn advance(&mut self) -> Token<'a> {
        let token = self.tokens[self.position].clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Option<Token<'a>> {
        if self.peek().kind == kind {
            return Some(self.advance());
        }
        trace!("expected {}, found {}", kind, self.peek().kind);
        let range = self.peek().range;
        self.emit(message, range);
        None
    }

    fn emit(&mut self, message: &str, range: Range) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        self.diagnostics.push(Diagnostic::new(message, range));
    }

    /// Leaves panic mode, first skipping tokens until one of `kinds` (or the
    /// end of input) is next.
    fn synchronize(&mut self, kinds: &[TokenKind]) {
        if !self.panic_mode {
            return;
        }
        while self.peek().kind != TokenKind::Eof && !kinds.contains(&self.peek().kind) {
            self.advance();
        }
        self.panic_mode = false;
    }
}
