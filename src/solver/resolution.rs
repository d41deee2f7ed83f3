//! Depth-first, left-to-right SLD resolution.
//!
//! The search is driven by [`Solutions`], an iterator holding an explicit
//! stack of choice points. Each call to `next` resumes the search where the
//! previous solution was produced, so consumers can take as many solutions as
//! they need and drop the iterator at any time.

use std::{fmt, slice, sync::Arc};

use itertools::Itertools;
use log::{debug, trace};

use crate::{
    clause::{Clause, Query},
    knowledge_base::ClauseSource,
    solver::{unify_structures, Substitution},
    term::{Structure, Term, Variable},
};

/// Renaming index of the query's own variables. Clauses are renamed with
/// indices starting right after it.
const QUERY_INDEX: usize = 0;

/// An answer to a query: the bindings of the query's variables, in order of
/// first appearance in the query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    bindings: Vec<(Variable, Term)>,
}

impl Solution {
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.bindings
            .iter()
            .find(|(variable, _)| variable.name() == name)
            .map(|(_, term)| term)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.bindings.iter().map(|(variable, term)| (variable, term))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bindings.is_empty() {
            return write!(f, "true");
        }
        let bindings = self
            .bindings
            .iter()
            .map(|(variable, term)| format!("{} = {}", variable, term))
            .join(", ");
        write!(f, "{}", bindings)
    }
}

/// The goals left to prove, as a persistent list so that choice points can
/// share their tails.
#[derive(Clone, Default)]
struct Resolvent(Option<Arc<Link>>);

struct Link {
    goal: Structure,
    rest: Resolvent,
}

impl Resolvent {
    fn push(self, goal: Structure) -> Self {
        Self(Some(Arc::new(Link { goal, rest: self })))
    }

    /// `goals` followed by the goals of `self`.
    fn prepend(&self, goals: &[Structure]) -> Self {
        goals
            .iter()
            .rev()
            .fold(self.clone(), |rest, goal| rest.push(goal.clone()))
    }

    fn split_first(&self) -> Option<(&Structure, &Resolvent)> {
        self.0.as_deref().map(|link| (&link.goal, &link.rest))
    }
}

/// A goal together with the clauses that have not been tried against it yet.
#[derive(Clone)]
struct ChoicePoint<'a> {
    goal: Structure,
    rest: Resolvent,
    // Bindings at the time the goal was selected, copied for each attempt.
    substitution: Substitution,
    depth: usize,
    candidates: slice::Iter<'a, Clause>,
}

/// The lazily computed solutions of a query.
///
/// Solutions come in SLD order: goals are proven left to right, the clauses
/// of a predicate are tried in declaration order, and the search is depth
/// first. The sequence may be infinite if the knowledge base has
/// non-terminating recursive predicates.
pub struct Solutions<'a, K: ClauseSource + ?Sized> {
    knowledge_base: &'a K,
    // Each original query variable with its renamed counterpart.
    variables: Vec<(Variable, Variable)>,
    choice_points: Vec<ChoicePoint<'a>>,
}

impl<'a, K: ClauseSource + ?Sized> Solutions<'a, K> {
    pub fn new(knowledge_base: &'a K, query: &Query) -> Self {
        let goals: Vec<Structure> = query
            .goals()
            .iter()
            .map(|goal| goal.rename(QUERY_INDEX))
            .collect();
        let variables = query
            .variables()
            .iter()
            .map(|variable| (variable.clone(), variable.rename(QUERY_INDEX)))
            .collect();
        let mut solutions = Self {
            knowledge_base,
            variables,
            choice_points: Vec::new(),
        };
        // An empty query has no solutions, so it gets no choice point at all.
        let resolvent = Resolvent::default().prepend(&goals);
        if let Some((goal, rest)) = resolvent.split_first() {
            solutions.select(goal, rest, Substitution::new(), QUERY_INDEX + 1);
        }
        solutions
    }

    /// Pushes a choice point for `goal` over every clause of its predicate.
    fn select(
        &mut self,
        goal: &Structure,
        rest: &Resolvent,
        substitution: Substitution,
        depth: usize,
    ) {
        let knowledge_base = self.knowledge_base;
        let candidates = knowledge_base.clauses_for(goal.functor());
        trace!(
            "depth {}: selected {} ({} candidate clauses)",
            depth,
            goal,
            candidates.len()
        );
        self.choice_points.push(ChoicePoint {
            goal: goal.clone(),
            rest: rest.clone(),
            substitution,
            depth,
            candidates: candidates.iter(),
        });
    }

    /// Restricts a final substitution to the query's original variables.
    fn project(&self, substitution: &Substitution) -> Solution {
        let bindings = self
            .variables
            .iter()
            .map(|(original, renamed)| {
                let term = substitution.resolve(&Term::Variable(renamed.clone()));
                (original.clone(), term)
            })
            .collect();
        Solution { bindings }
    }
}

impl<K: ClauseSource + ?Sized> Iterator for Solutions<'_, K> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        while let Some(choice_point) = self.choice_points.last_mut() {
            let Some(clause) = choice_point.candidates.next() else {
                trace!(
                    "depth {}: no more clauses for {}",
                    choice_point.depth,
                    choice_point.goal
                );
                self.choice_points.pop();
                continue;
            };

            let renamed = clause.rename(choice_point.depth);
            let mut substitution = choice_point.substitution.clone();
            if !unify_structures(&choice_point.goal, renamed.head(), &mut substitution) {
                trace!(
                    "depth {}: {} does not unify with {}",
                    choice_point.depth,
                    choice_point.goal,
                    renamed.head()
                );
                continue;
            }

            let resolvent = choice_point.rest.prepend(renamed.body());
            let depth = choice_point.depth + 1;
            match resolvent.split_first() {
                Some((goal, rest)) => self.select(goal, rest, substitution, depth),
                None => {
                    let solution = self.project(&substitution);
                    debug!("depth {}: found solution {}", depth - 1, solution);
                    return Some(solution);
                }
            }
        }
        None
    }
}

impl<K: ClauseSource + ?Sized> Clone for Solutions<'_, K> {
    fn clone(&self) -> Self {
        Self {
            knowledge_base: self.knowledge_base,
            variables: self.variables.clone(),
            choice_points: self.choice_points.clone(),
        }
    }
}
