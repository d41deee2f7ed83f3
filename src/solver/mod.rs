//! SLD resolution: substitutions, unification and the proof search itself.

pub mod resolution;
pub mod substitution;
pub mod unify;

#[cfg(test)]
mod tests;

pub use resolution::{Solution, Solutions};
pub use substitution::Substitution;
pub use unify::{mgu, unify, unify_structures};
