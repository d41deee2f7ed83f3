//! The term model: logic variables, structures and functors.
//!
//! Terms are immutable and cheap to clone. A [`Structure`] shares its
//! arguments behind an [`Arc`], so applying a substitution or renaming only
//! rebuilds the parts of a term that actually contain variables.

use std::{collections::BTreeSet, fmt, hash, sync::Arc};

use itertools::Itertools;

use crate::solver::Substitution;

/// A logic variable, identified by its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(Arc<str>);

impl Variable {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns the variable named `<name>_<index>`.
    ///
    /// The index is a plain integer, so the original name and the index can
    /// always be recovered by splitting at the last `_`: distinct
    /// `(name, index)` pairs never produce the same variable.
    pub fn rename(&self, index: usize) -> Self {
        Self::new(format!("{}_{}", self.0, index))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity of a structure: its symbol and its arity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Functor {
    symbol: Arc<str>,
    arity: usize,
}

impl Functor {
    pub fn new(symbol: impl Into<Arc<str>>, arity: usize) -> Self {
        Self {
            symbol: symbol.into(),
            arity,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for Functor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.symbol, self.arity)
    }
}

#[derive(Debug)]
struct StructureData {
    functor: Functor,
    arguments: Vec<Term>,
    // Cached at construction, derived from the arguments.
    variables: BTreeSet<Variable>,
}

/// A compound term `symbol(arg1, ..., argN)`. With no arguments it is an atom.
///
/// The functor's arity is always the number of arguments.
#[derive(Clone)]
pub struct Structure(Arc<StructureData>);

impl Structure {
    pub fn new(symbol: impl Into<Arc<str>>, arguments: Vec<Term>) -> Self {
        let functor = Functor::new(symbol, arguments.len());
        let mut variables = BTreeSet::new();
        for argument in &arguments {
            match argument {
                Term::Variable(variable) => {
                    variables.insert(variable.clone());
                }
                Term::Structure(structure) => {
                    variables.extend(structure.variables().iter().cloned());
                }
            }
        }
        Self(Arc::new(StructureData {
            functor,
            arguments,
            variables,
        }))
    }

    pub fn atom(symbol: impl Into<Arc<str>>) -> Self {
        Self::new(symbol, Vec::new())
    }

    pub fn functor(&self) -> &Functor {
        &self.0.functor
    }

    pub fn symbol(&self) -> &str {
        self.0.functor.symbol()
    }

    pub fn arity(&self) -> usize {
        self.0.functor.arity()
    }

    pub fn arguments(&self) -> &[Term] {
        &self.0.arguments
    }

    pub fn is_atom(&self) -> bool {
        self.0.arguments.is_empty()
    }

    /// The variables occurring anywhere in this structure.
    pub fn variables(&self) -> &BTreeSet<Variable> {
        &self.0.variables
    }

    pub fn is_ground(&self) -> bool {
        self.0.variables.is_empty()
    }

    /// Replaces every bound variable by its value in `substitution`.
    ///
    /// When none of the structure's variables is bound (in particular when it
    /// is ground) the structure itself is returned, sharing its storage.
    pub fn apply(&self, substitution: &Substitution) -> Structure {
        if !self
            .variables()
            .iter()
            .any(|variable| substitution.contains(variable))
        {
            return self.clone();
        }
        let arguments = self
            .arguments()
            .iter()
            .map(|argument| argument.apply(substitution))
            .collect();
        Structure::new(self.0.functor.symbol.clone(), arguments)
    }

    /// Renames every variable `V` of the structure to `V_<index>`.
    pub fn rename(&self, index: usize) -> Structure {
        if self.is_ground() {
            return self.clone();
        }
        let arguments = self
            .arguments()
            .iter()
            .map(|argument| argument.rename(index))
            .collect();
        Structure::new(self.0.functor.symbol.clone(), arguments)
    }
}

impl PartialEq for Structure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.functor == other.0.functor && self.0.arguments == other.0.arguments)
    }
}

impl Eq for Structure {}

impl hash::Hash for Structure {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.functor.hash(state);
        self.0.arguments.hash(state);
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_atom() {
            write!(f, "{}", self.symbol())
        } else {
            write!(f, "{}({})", self.symbol(), self.arguments().iter().join(", "))
        }
    }
}

impl fmt::Debug for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A Prolog term.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(Variable),
    Structure(Structure),
}

impl Term {
    pub fn variable(name: impl Into<Arc<str>>) -> Self {
        Term::Variable(Variable::new(name))
    }

    pub fn atom(symbol: impl Into<Arc<str>>) -> Self {
        Term::Structure(Structure::atom(symbol))
    }

    pub fn structure(symbol: impl Into<Arc<str>>, arguments: Vec<Term>) -> Self {
        Term::Structure(Structure::new(symbol, arguments))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(variable) => Some(variable),
            Term::Structure(_) => None,
        }
    }

    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Term::Variable(_) => None,
            Term::Structure(structure) => Some(structure),
        }
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Structure(structure) => structure.is_ground(),
        }
    }

    /// Whether `variable` occurs anywhere in the term.
    pub fn mentions(&self, variable: &Variable) -> bool {
        match self {
            Term::Variable(other) => other == variable,
            Term::Structure(structure) => structure.variables().contains(variable),
        }
    }

    pub fn variables(&self) -> BTreeSet<Variable> {
        match self {
            Term::Variable(variable) => BTreeSet::from([variable.clone()]),
            Term::Structure(structure) => structure.variables().clone(),
        }
    }

    /// Replaces every bound variable by its value in `substitution`.
    ///
    /// This is a single pass: the value of a bound variable is inserted as is.
    /// Substitutions keep their values resolved, so one pass is enough.
    pub fn apply(&self, substitution: &Substitution) -> Term {
        match self {
            Term::Variable(variable) => substitution
                .get(variable)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Term::Structure(structure) => Term::Structure(structure.apply(substitution)),
        }
    }

    pub fn rename(&self, index: usize) -> Term {
        match self {
            Term::Variable(variable) => Term::Variable(variable.rename(index)),
            Term::Structure(structure) => Term::Structure(structure.rename(index)),
        }
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Self {
        Term::Variable(variable)
    }
}

impl From<Structure> for Term {
    fn from(structure: Structure) -> Self {
        Term::Structure(structure)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(variable) => write!(f, "{}", variable),
            Term::Structure(structure) => write!(f, "{}", structure),
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
