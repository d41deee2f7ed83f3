use pretty_assertions::assert_eq;

use crate::{Clause, ClauseSource, Functor, KnowledgeBase, Query, Solution, Term};

const FAMILY: &str = "
    parent(tom, lucy).
    parent(laura, lucy).
    parent(lucy, james).
    parent(james, anne).
    ancestor(X, Y) :- parent(X, Y).
    ancestor(X, Y) :- parent(X, Z), ancestor(Z, Y).
";

fn kb(source: &str) -> KnowledgeBase {
    source.parse().expect("knowledge base should parse")
}

fn query(source: &str) -> Query {
    source.parse().expect("query should parse")
}

fn answers(knowledge_base: &KnowledgeBase, source: &str) -> Vec<String> {
    knowledge_base
        .solve(&query(source))
        .map(|solution| solution.to_string())
        .collect()
}

#[test]
fn test_ancestor_solutions_in_sld_order() {
    let knowledge_base = kb(FAMILY);
    let solutions: Vec<Solution> = knowledge_base.solve(&query("ancestor(X, anne).")).collect();

    assert_eq!(solutions.len(), 4);
    let xs: Vec<String> = solutions
        .iter()
        .map(|solution| solution.get("X").unwrap().to_string())
        .collect();
    assert_eq!(xs, vec!["james", "tom", "laura", "lucy"]);
}

#[test]
fn test_solution_counts() {
    let knowledge_base = kb(FAMILY);
    assert_eq!(knowledge_base.solve(&query("ancestor(X, Y).")).count(), 9);
    assert_eq!(knowledge_base.solve(&query("ancestor(X, tom).")).count(), 0);
}

#[test]
fn test_all_ancestor_pairs() {
    let knowledge_base = kb(FAMILY);
    assert_eq!(
        answers(&knowledge_base, "ancestor(X, Y)."),
        vec![
            "X = tom, Y = lucy",
            "X = laura, Y = lucy",
            "X = lucy, Y = james",
            "X = james, Y = anne",
            "X = tom, Y = james",
            "X = tom, Y = anne",
            "X = laura, Y = james",
            "X = laura, Y = anne",
            "X = lucy, Y = anne",
        ]
    );
}

#[test]
fn test_unknown_predicate_has_no_solutions() {
    let knowledge_base = kb(FAMILY);
    assert_eq!(knowledge_base.solve(&query("a.")).count(), 0);
    assert_eq!(knowledge_base.solve(&query("sibling(X, Y).")).count(), 0);
    // Same symbol, different arity.
    assert_eq!(knowledge_base.solve(&query("parent(tom).")).count(), 0);
}

#[test]
fn test_empty_query_has_no_solutions() {
    let knowledge_base = kb(FAMILY);
    assert_eq!(knowledge_base.solve(&Query::new(Vec::new())).count(), 0);
    assert_eq!(knowledge_base.solve(&query(".")).count(), 0);
}

#[test]
fn test_ground_query() {
    let knowledge_base = kb(FAMILY);
    assert_eq!(answers(&knowledge_base, "ancestor(tom, anne)."), vec!["true"]);
    assert!(answers(&knowledge_base, "ancestor(anne, tom).").is_empty());
}

#[test]
fn test_conjunction_shares_bindings_between_goals() {
    let knowledge_base = kb(FAMILY);
    assert_eq!(
        answers(&knowledge_base, "parent(X, lucy), parent(lucy, Y)."),
        vec!["X = tom, Y = james", "X = laura, Y = james"]
    );
}

#[test]
fn test_recursive_clause_instances_do_not_capture_variables() {
    let knowledge_base = kb("
        nat(zero).
        nat(s(X)) :- nat(X).
        plus(zero, Y, Y).
        plus(s(X), Y, s(Z)) :- plus(X, Y, Z).
    ");
    assert_eq!(
        answers(&knowledge_base, "plus(s(s(zero)), s(zero), Z)."),
        vec!["Z = s(s(s(zero)))"]
    );
    assert_eq!(
        answers(&knowledge_base, "plus(X, Y, s(s(zero)))."),
        vec![
            "X = zero, Y = s(s(zero))",
            "X = s(zero), Y = s(zero)",
            "X = s(s(zero)), Y = zero",
        ]
    );
}

#[test]
fn test_take_first_solutions_of_an_infinite_sequence() {
    let knowledge_base = kb("nat(zero). nat(s(X)) :- nat(X).");
    let first: Vec<String> = knowledge_base
        .solve(&query("nat(X)."))
        .take(3)
        .map(|solution| solution.to_string())
        .collect();
    assert_eq!(first, vec!["X = zero", "X = s(zero)", "X = s(s(zero))"]);
}

#[test]
fn test_solutions_can_be_resumed_from_a_copy() {
    let knowledge_base = kb(FAMILY);
    let q = query("ancestor(X, anne).");
    let mut solutions = knowledge_base.solve(&q);
    assert_eq!(solutions.next().unwrap().to_string(), "X = james");

    let copy = solutions.clone();
    let rest: Vec<Solution> = solutions.collect();
    let rest_of_copy: Vec<Solution> = copy.collect();
    assert_eq!(rest.len(), 3);
    assert_eq!(rest, rest_of_copy);
}

#[test]
fn test_unbound_answer_variables() {
    let knowledge_base = kb("same(X, X).");
    let solution = knowledge_base.solve(&query("same(A, B).")).next().unwrap();
    assert_eq!(solution.len(), 2);
    assert_eq!(solution.get("A"), solution.get("B"));
    assert!(solution.get("A").unwrap().as_variable().is_some());

    assert_eq!(answers(&knowledge_base, "same(a, B)."), vec!["B = a"]);
}

#[test]
fn test_no_occurs_check_in_resolution() {
    let knowledge_base = kb("same(X, X).");
    let solutions: Vec<Solution> = knowledge_base.solve(&query("same(Y, f(Y)).")).collect();
    assert_eq!(solutions.len(), 1);
    let y = solutions[0].get("Y").unwrap();
    assert_eq!(y.as_structure().map(|structure| structure.symbol()), Some("f"));
}

fn depth(term: &Term) -> usize {
    match term {
        Term::Variable(_) => 1,
        Term::Structure(structure) => {
            1 + structure.arguments().iter().map(depth).max().unwrap_or(0)
        }
    }
}

#[test]
fn test_cyclic_binding_survives_later_goals() {
    let names: Vec<String> = (1..=20).map(|i| format!("A{}", i)).collect();
    let symbols: Vec<String> = ('a'..='t').map(String::from).collect();
    let knowledge_base = kb(&format!("same(X, X). p({}).", symbols.join(", ")));
    let source = format!("same(Y, f(Y)), p({}).", names.join(", "));

    let solutions: Vec<Solution> = knowledge_base.solve(&query(&source)).collect();
    assert_eq!(solutions.len(), 1);
    let y = solutions[0].get("Y").unwrap();
    assert_eq!(y.to_string(), "f(X_1)");
    assert_eq!(depth(y), 2);
    assert_eq!(solutions[0].get("A20"), Some(&Term::atom("t")));
}

#[test]
fn test_failed_alternatives_do_not_leak_bindings() {
    // The first `p` clause binds X before failing on `b`; the second must
    // still see X unbound.
    let knowledge_base = kb("
        p(X) :- q(X, b).
        p(X) :- q(X, c).
        q(a, c).
        q(d, c).
    ");
    assert_eq!(answers(&knowledge_base, "p(X)."), vec!["X = a", "X = d"]);
}

/// A clause source that is not a `KnowledgeBase`.
struct Facts(Vec<Clause>);

impl ClauseSource for Facts {
    fn clauses_for(&self, functor: &Functor) -> &[Clause] {
        let start = self.0.iter().position(|clause| clause.functor() == functor);
        match start {
            Some(start) => {
                let len = self.0[start..]
                    .iter()
                    .take_while(|clause| clause.functor() == functor)
                    .count();
                &self.0[start..start + len]
            }
            None => &[],
        }
    }
}

#[test]
fn test_custom_clause_source() {
    let clauses = crate::lang::parse_program("color(red). color(green). size(big).").unwrap();
    let facts = Facts(clauses);
    let colors: Vec<Term> = crate::Solutions::new(&facts, &query("color(C)."))
        .filter_map(|solution| solution.get("C").cloned())
        .collect();
    assert_eq!(colors, vec![Term::atom("red"), Term::atom("green")]);
}
