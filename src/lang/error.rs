use std::fmt;

use super::Diagnostic;

/// A source that could not be parsed, with every diagnostic collected while
/// parsing it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub struct SyntaxError {
    pub diagnostics: Vec<Diagnostic>,
}

impl SyntaxError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Syntax errors in input:")?;
        for diagnostic in &self.diagnostics {
            write!(f, "\n\t- {}", diagnostic)?;
        }
        Ok(())
    }
}
