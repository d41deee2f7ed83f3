//! First-order syntactic unification, without occurs-check.
//!
//! Unifying `X` with `f(X)` therefore succeeds and binds `X` to a term that
//! mentions `X` itself.

use crate::{
    solver::Substitution,
    term::{Structure, Term, Variable},
};

/// Extends `substitution` with the most general unifier of `lhs` and `rhs`.
///
/// Returns `false` when the terms do not unify. In that case `substitution`
/// may hold some of the bindings made before the mismatch was found, and must
/// be discarded by the caller.
pub fn unify(lhs: &Term, rhs: &Term, substitution: &mut Substitution) -> bool {
    let lhs = substitution.resolve(lhs);
    let rhs = substitution.resolve(rhs);
    // Also covers an unbound variable unified with itself.
    if lhs == rhs {
        return true;
    }
    match (lhs, rhs) {
        (Term::Variable(variable), term) | (term, Term::Variable(variable)) => {
            bind(substitution, variable, term);
            true
        }
        (Term::Structure(lhs), Term::Structure(rhs)) => {
            unify_structures(&lhs, &rhs, substitution)
        }
    }
}

/// [`unify`] for two structures: their functors must match, then their
/// arguments are unified pairwise from left to right.
pub fn unify_structures(
    lhs: &Structure,
    rhs: &Structure,
    substitution: &mut Substitution,
) -> bool {
    if lhs.functor() != rhs.functor() {
        return false;
    }
    for (lhs, rhs) in lhs.arguments().iter().zip(rhs.arguments()) {
        if !unify(lhs, rhs, substitution) {
            return false;
        }
    }
    substitution.normalize();
    true
}

/// The most general unifier of `lhs` and `rhs`, if any, as a new substitution.
pub fn mgu(lhs: &Term, rhs: &Term) -> Option<Substitution> {
    let mut substitution = Substitution::new();
    unify(lhs, rhs, &mut substitution).then_some(substitution)
}

fn bind(substitution: &mut Substitution, variable: Variable, term: Term) {
    // `variable` comes out of `resolve`, so it cannot be bound yet.
    if let Err(err) = substitution.bind(variable.clone(), term) {
        panic!("unifier invariant violated: {err}");
    }
    substitution.propagate(&variable);
}
