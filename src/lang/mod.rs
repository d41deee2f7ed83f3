//! Prolog source text: tokens, clauses and queries.
//!
//! The grammar is deliberately small: structures (`f(a, X)`), atoms,
//! variables, facts, rules (`head :- goal, goal.`) and `%` line comments.
//!
//! - [`parse_program`]: a sequence of clauses.
//! - [`parse_query`]: goals separated by commas, terminated by a period.
//!
//! Both collect every diagnostic found in the source before failing with a
//! [`SyntaxError`].

pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;

pub use diagnostics::{Diagnostic, Location, Range};
pub use error::SyntaxError;
pub use parser::Parser;

use crate::clause::{Clause, Query};

pub fn parse_program(source: &str) -> Result<Vec<Clause>, SyntaxError> {
    Parser::new(source).parse_program()
}

pub fn parse_query(source: &str) -> Result<Query, SyntaxError> {
    Parser::new(source).parse_query()
}
