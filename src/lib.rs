//! prologue: a small Prolog interpreter.
//!
//! Programs are sets of definite clauses. Queries are answered by depth-first,
//! left-to-right SLD resolution, and the answers are enumerated lazily.
//!
//! ```
//! use prologue::{KnowledgeBase, Query};
//!
//! let knowledge_base: KnowledgeBase = "parent(tom, lucy). parent(lucy, james)."
//!     .parse()
//!     .unwrap();
//! let query: Query = "parent(X, james).".parse().unwrap();
//! let solution = knowledge_base.solve(&query).next().unwrap();
//! assert_eq!(solution.to_string(), "X = lucy");
//! ```

pub mod clause;
mod error;
pub use error::{Error, Result};
pub mod knowledge_base;
pub mod lang;
pub mod solver;
pub mod term;

pub use clause::{Clause, Query};
pub use knowledge_base::{ClauseSource, KnowledgeBase};
pub use lang::{Diagnostic, SyntaxError};
pub use solver::{Solution, Solutions, Substitution};
pub use term::{Functor, Structure, Term, Variable};
