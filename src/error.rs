use std::path::PathBuf;

use crate::{
    lang::SyntaxError,
    term::{Term, Variable},
};

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Only reachable through a broken unifier or renamer, never through user input.
    #[error("variable {variable} is already bound to {bound}, cannot rebind it to {attempted}")]
    BindingConflict {
        variable: Variable,
        bound: Term,
        attempted: Term,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn binding_conflict(variable: Variable, bound: Term, attempted: Term) -> Self {
        Self::BindingConflict {
            variable,
            bound,
            attempted,
        }
    }
}
