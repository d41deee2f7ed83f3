//! Clause storage, keyed by the functor of the clauses' heads.

use std::{collections::HashMap, fmt, fs, path::Path, str::FromStr};

use log::debug;

use crate::{
    clause::{Clause, Query},
    error::{Error, Result},
    lang::{self, SyntaxError},
    solver::Solutions,
    term::Functor,
};

/// Where the solver looks up the clauses that may prove a goal.
pub trait ClauseSource {
    /// The clauses whose head has `functor`, in declaration order. Unknown
    /// functors have no clauses.
    fn clauses_for(&self, functor: &Functor) -> &[Clause];
}

/// A Prolog program: its clauses grouped by predicate.
///
/// Both the predicates and the clauses of each predicate keep the order in
/// which they were added, since that order decides the order of solutions.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeBase {
    predicates: HashMap<Functor, Vec<Clause>>,
    // Functors in order of first declaration.
    functors: Vec<Functor>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a whole program.
    pub fn parse(source: &str) -> Result<Self, SyntaxError> {
        let knowledge_base: Self = lang::parse_program(source)?.into_iter().collect();
        debug!(
            "loaded {} clauses for {} predicates",
            knowledge_base.len(),
            knowledge_base.functors.len()
        );
        Ok(knowledge_base)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        debug!("loading knowledge base from {}", path.display());
        Ok(Self::parse(&source)?)
    }

    /// Appends `clause` after the clauses already stored for its predicate.
    pub fn add(&mut self, clause: Clause) {
        match self.predicates.get_mut(clause.functor()) {
            Some(clauses) => clauses.push(clause),
            None => {
                self.functors.push(clause.functor().clone());
                self.predicates.insert(clause.functor().clone(), vec![clause]);
            }
        }
    }

    pub fn clauses_for(&self, functor: &Functor) -> &[Clause] {
        self.predicates
            .get(functor)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The predicates, in order of first declaration.
    pub fn functors(&self) -> &[Functor] {
        &self.functors
    }

    /// The number of clauses.
    pub fn len(&self) -> usize {
        self.predicates.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.functors.is_empty()
    }

    /// The solutions of `query`, computed lazily.
    pub fn solve(&self, query: &Query) -> Solutions<'_, Self> {
        Solutions::new(self, query)
    }
}

impl ClauseSource for KnowledgeBase {
    fn clauses_for(&self, functor: &Functor) -> &[Clause] {
        KnowledgeBase::clauses_for(self, functor)
    }
}

impl Extend<Clause> for KnowledgeBase {
    fn extend<T: IntoIterator<Item = Clause>>(&mut self, clauses: T) {
        for clause in clauses {
            self.add(clause);
        }
    }
}

impl FromIterator<Clause> for KnowledgeBase {
    fn from_iter<T: IntoIterator<Item = Clause>>(clauses: T) -> Self {
        let mut knowledge_base = Self::new();
        knowledge_base.extend(clauses);
        knowledge_base
    }
}

impl FromStr for KnowledgeBase {
    type Err = SyntaxError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for functor in &self.functors {
            for clause in self.clauses_for(functor) {
                writeln!(f, "{}", clause)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
