use std::{fmt, str::FromStr};

use itertools::Itertools;

use crate::{
    lang::{self, SyntaxError},
    term::{Functor, Structure, Term, Variable},
};

/// A definite clause `head :- body`. A clause with an empty body is a fact.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Clause {
    head: Structure,
    body: Vec<Structure>,
}

impl Clause {
    pub fn new(head: Structure, body: Vec<Structure>) -> Self {
        Self { head, body }
    }

    pub fn fact(head: Structure) -> Self {
        Self::new(head, Vec::new())
    }

    pub fn head(&self) -> &Structure {
        &self.head
    }

    pub fn body(&self) -> &[Structure] {
        &self.body
    }

    pub fn functor(&self) -> &Functor {
        self.head.functor()
    }

    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }

    /// A fresh instance of the clause, every variable `V` becoming `V_<index>`.
    ///
    /// The same index is used for the head and the whole body, so a variable
    /// keeps denoting the same thing across the instance, while instances
    /// made with different indices share no variables.
    pub fn rename(&self, index: usize) -> Clause {
        Clause {
            head: self.head.rename(index),
            body: self.body.iter().map(|goal| goal.rename(index)).collect(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fact() {
            write!(f, "{}.", self.head)
        } else {
            write!(f, "{} :- {}.", self.head, self.body.iter().join(", "))
        }
    }
}

/// A conjunction of goals to prove.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    goals: Vec<Structure>,
    // In order of first appearance.
    variables: Vec<Variable>,
}

impl Query {
    pub fn new(goals: Vec<Structure>) -> Self {
        let mut variables = Vec::new();
        for goal in &goals {
            collect_variables(goal, &mut variables);
        }
        Self { goals, variables }
    }

    pub fn goals(&self) -> &[Structure] {
        &self.goals
    }

    /// The variables the user wrote in the query, in order of first appearance.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

fn collect_variables(structure: &Structure, variables: &mut Vec<Variable>) {
    if structure.is_ground() {
        return;
    }
    for argument in structure.arguments() {
        match argument {
            Term::Variable(variable) => {
                if !variables.contains(variable) {
                    variables.push(variable.clone());
                }
            }
            Term::Structure(structure) => collect_variables(structure, variables),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.goals.is_empty() {
            return Ok(());
        }
        write!(f, "?- {}.", self.goals.iter().join(", "))
    }
}

impl FromStr for Query {
    type Err = SyntaxError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        lang::parse_query(source)
    }
}
