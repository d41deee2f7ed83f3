use std::{collections::HashMap, fmt};

use itertools::Itertools;

use crate::{
    error::{Error, Result},
    term::{Term, Variable},
};

/// A mapping from variables to the terms they are bound to.
///
/// Each variable is bound at most once. After [`Substitution::normalize`] no
/// bound value mentions a variable that is itself bound, so looking a variable
/// up yields its final value in a single step. The exception is a variable
/// whose value mentions the variable itself (`X = f(X)`, possible without an
/// occurs-check): such a binding has no finite resolved form and is kept as is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: HashMap<Variable, Term>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: &Variable) -> Option<&Term> {
        self.bindings.get(variable)
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.bindings.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.bindings.iter()
    }

    /// Records `variable = term`. Binding an already bound variable is a
    /// [`Error::BindingConflict`].
    pub fn bind(&mut self, variable: Variable, term: Term) -> Result<()> {
        match self.bindings.get(&variable) {
            Some(bound) => Err(Error::binding_conflict(variable, bound.clone(), term)),
            None => {
                self.bindings.insert(variable, term);
                Ok(())
            }
        }
    }

    /// Dereferences `term` through the current bindings.
    pub fn resolve(&self, term: &Term) -> Term {
        term.apply(self)
    }

    /// Re-applies the substitution to its own values, removing chains such as
    /// `X = f(Y), Y = a` (which becomes `X = f(a), Y = a`).
    ///
    /// Self-referential bindings are not expanded: substituting `X = f(X)`
    /// into a value only makes it deeper without resolving anything.
    pub fn normalize(&mut self) {
        let acyclic = Substitution {
            bindings: self
                .bindings
                .iter()
                .filter(|(variable, term)| !term.mentions(variable))
                .map(|(variable, term)| (variable.clone(), term.clone()))
                .collect(),
        };
        for term in self.bindings.values_mut() {
            if !term.is_ground() {
                *term = term.apply(&acyclic);
            }
        }
    }

    /// Replaces `variable` by its value inside every other bound value.
    ///
    /// Called right after binding `variable` to an already resolved term, this
    /// keeps every binding resolved without re-applying the whole substitution.
    pub fn propagate(&mut self, variable: &Variable) {
        let Some(term) = self.bindings.get(variable).cloned() else {
            return;
        };
        let single = Substitution {
            bindings: HashMap::from([(variable.clone(), term)]),
        };
        for (bound, value) in self.bindings.iter_mut() {
            if bound != variable && value.mentions(variable) {
                *value = value.apply(&single);
            }
        }
    }

    /// The composition `self` then `other`: applying the result to a term is
    /// the same as applying `self` and then `other`.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut bindings: HashMap<Variable, Term> = self
            .bindings
            .iter()
            .map(|(variable, term)| (variable.clone(), term.apply(other)))
            .collect();
        for (variable, term) in &other.bindings {
            bindings
                .entry(variable.clone())
                .or_insert_with(|| term.clone());
        }
        Substitution { bindings }
    }

    /// Keeps only the bindings of `variables`.
    pub fn restrict<'a>(
        &self,
        variables: impl IntoIterator<Item = &'a Variable>,
    ) -> Substitution {
        let bindings = variables
            .into_iter()
            .filter_map(|variable| {
                self.bindings
                    .get(variable)
                    .map(|term| (variable.clone(), term.clone()))
            })
            .collect();
        Substitution { bindings }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self
            .bindings
            .iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(variable, term)| format!("{} = {}", variable, term))
            .join(", ");
        write!(f, "{{{}}}", bindings)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn var(name: &str) -> Variable {
        Variable::new(name)
    }

    #[test]
    fn test_bind_twice_is_a_conflict() {
        let mut substitution = Substitution::new();
        substitution.bind(var("X"), Term::atom("a")).unwrap();
        let err = substitution.bind(var("X"), Term::atom("b")).unwrap_err();
        assert!(matches!(err, Error::BindingConflict { .. }));
        assert_eq!(
            err.to_string(),
            "variable X is already bound to a, cannot rebind it to b"
        );
        assert_eq!(substitution.get(&var("X")), Some(&Term::atom("a")));
    }

    #[test]
    fn test_normalize_removes_chains() {
        let mut substitution = Substitution::new();
        substitution
            .bind(var("X"), Term::structure("f", vec![Term::variable("Y")]))
            .unwrap();
        substitution.bind(var("Y"), Term::atom("a")).unwrap();
        substitution.normalize();

        assert_eq!(
            substitution.get(&var("X")),
            Some(&Term::structure("f", vec![Term::atom("a")]))
        );
        assert_eq!(substitution.to_string(), "{X = f(a), Y = a}");
    }

    #[test]
    fn test_apply_is_idempotent_once_normalized() {
        let mut substitution = Substitution::new();
        substitution.bind(var("X"), Term::variable("Y")).unwrap();
        substitution
            .bind(var("Y"), Term::structure("g", vec![Term::variable("Z")]))
            .unwrap();
        substitution.normalize();

        let term = Term::structure(
            "p",
            vec![Term::variable("X"), Term::variable("Y"), Term::variable("W")],
        );
        let once = term.apply(&substitution);
        assert_eq!(once.apply(&substitution), once);
        assert_eq!(once.to_string(), "p(g(Z), g(Z), W)");
    }

    #[test]
    fn test_propagate_updates_only_mentioning_values() {
        let mut substitution = Substitution::new();
        substitution
            .bind(var("X"), Term::structure("f", vec![Term::variable("Y")]))
            .unwrap();
        substitution.bind(var("Z"), Term::atom("c")).unwrap();
        substitution.bind(var("Y"), Term::atom("a")).unwrap();
        substitution.propagate(&var("Y"));
        assert_eq!(substitution.to_string(), "{X = f(a), Y = a, Z = c}");

        // Unbound variables are a no-op.
        substitution.propagate(&var("W"));
        assert_eq!(substitution.len(), 3);
    }

    #[test]
    fn test_normalize_keeps_self_referential_bindings() {
        let f = |term| Term::structure("f", vec![term]);
        let mut substitution = Substitution::new();
        substitution.bind(var("X"), f(Term::variable("X"))).unwrap();
        substitution.bind(var("Y"), f(Term::variable("X"))).unwrap();
        for _ in 0..10 {
            substitution.normalize();
        }
        assert_eq!(substitution.to_string(), "{X = f(X), Y = f(X)}");
    }

    #[test]
    fn test_compose() {
        let mut first = Substitution::new();
        first
            .bind(var("X"), Term::structure("f", vec![Term::variable("Y")]))
            .unwrap();
        let mut second = Substitution::new();
        second.bind(var("Y"), Term::atom("b")).unwrap();
        second.bind(var("X"), Term::atom("ignored")).unwrap();

        let composed = first.compose(&second);
        let term = Term::structure("p", vec![Term::variable("X"), Term::variable("Y")]);
        assert_eq!(
            term.apply(&composed),
            term.apply(&first).apply(&second)
        );
        assert_eq!(composed.to_string(), "{X = f(b), Y = b}");
    }

    #[test]
    fn test_restrict() {
        let mut substitution = Substitution::new();
        substitution.bind(var("X"), Term::atom("a")).unwrap();
        substitution.bind(var("Y"), Term::atom("b")).unwrap();
        let restricted = substitution.restrict([&var("Y"), &var("Z")]);
        assert_eq!(restricted.len(), 1);
        assert_eq!(restricted.to_string(), "{Y = b}");
    }
}
