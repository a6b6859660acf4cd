use std::fmt::Debug;
use std::hash::Hash;

use super::ac3;
use super::heuristics::{order_domain_values, select_unassigned_variable};
use super::mac::mac;
use crate::csp::{Assignment, Csp};

/// Finds one solution, or the null assignment if none exists.
///
/// Runs AC-3 once up front to prune domains destructively, then
/// searches with MRV+Degree variable ordering, LCV value ordering, and
/// MAC after each tentative assignment.
pub fn backtrack<T: Clone + Eq + Hash + Debug>(csp: &mut Csp<T>) -> Assignment<T> {
    if !ac3::ac3(csp) {
        log::debug!("backtrack: inconsistent before search began");
        return Assignment::null();
    }
    search(csp, &Assignment::new())
}

/// Finds every solution, up to `limit` (unbounded if `None`).
pub fn all_solutions<T: Clone + Eq + Hash + Debug>(
    csp: &mut Csp<T>,
    limit: Option<usize>,
) -> Vec<Assignment<T>> {
    if !ac3::ac3(csp) {
        return Vec::new();
    }
    let mut solutions = Vec::new();
    collect(csp, &Assignment::new(), limit, &mut solutions);
    solutions
}

/// Counts solutions, stopping early once `limit` is reached if given.
pub fn count_solutions<T: Clone + Eq + Hash + Debug>(csp: &mut Csp<T>, limit: Option<usize>) -> usize {
    all_solutions(csp, limit).len()
}

fn search<T: Clone + Eq + Hash + Debug>(csp: &Csp<T>, assignment: &Assignment<T>) -> Assignment<T> {
    if assignment.is_complete(csp.num_variables()) {
        return assignment.clone();
    }
    let Some(var) = select_unassigned_variable(csp, assignment) else {
        return Assignment::null();
    };
    for value in order_domain_values(csp, assignment, var) {
        let mut candidate = assignment.clone();
        candidate.assign(csp.variable(var).unwrap(), value).unwrap();
        if !csp.assignment_consistency_for_var(&candidate, var) {
            continue;
        }
        if !mac(csp, &mut candidate, var) {
            continue;
        }
        let result = search(csp, &candidate);
        if !result.is_null() {
            return result;
        }
    }
    log::trace!("search: exhausted domain of {var}, backtracking");
    Assignment::null()
}

fn collect<T: Clone + Eq + Hash + Debug>(
    csp: &Csp<T>,
    assignment: &Assignment<T>,
    limit: Option<usize>,
    solutions: &mut Vec<Assignment<T>>,
) {
    if limit.is_some_and(|limit| solutions.len() >= limit) {
        return;
    }
    if assignment.is_complete(csp.num_variables()) {
        solutions.push(assignment.clone());
        return;
    }
    let Some(var) = select_unassigned_variable(csp, assignment) else {
        return;
    };
    for value in order_domain_values(csp, assignment, var) {
        if limit.is_some_and(|limit| solutions.len() >= limit) {
            return;
        }
        let mut candidate = assignment.clone();
        candidate.assign(csp.variable(var).unwrap(), value).unwrap();
        if !csp.assignment_consistency_for_var(&candidate, var) {
            continue;
        }
        if !mac(csp, &mut candidate, var) {
            continue;
        }
        collect(csp, &candidate, limit, solutions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::{different, Variable};
    use std::collections::HashSet;

    #[test]
    fn backtrack_solves_a_trivially_satisfiable_csp() {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1, 2]);
        let b = Variable::new("b", [1, 2]);
        let (a_id, b_id) = (a.id(), b.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_binary_constraint(a_id, different("ab"), b_id, false).unwrap();

        let solution = backtrack(&mut csp);
        assert!(!solution.is_null());
        assert_ne!(solution.get(a_id), solution.get(b_id));
    }

    #[test]
    fn backtrack_returns_null_for_an_unsatisfiable_chain() {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1]);
        let b = Variable::new("b", [1]);
        let (a_id, b_id) = (a.id(), b.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_binary_constraint(a_id, different("ab"), b_id, false).unwrap();

        assert!(backtrack(&mut csp).is_null());
    }

    #[test]
    fn all_solutions_finds_every_permutation_of_a_small_all_different() {
        let mut csp = Csp::new();
        let ids: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|name| {
                let v = Variable::new(*name, [1, 2, 3]);
                let id = v.id();
                csp.add_variable(v);
                id
            })
            .collect();
        csp.add_all_different();

        let solutions = all_solutions(&mut csp, None);
        assert_eq!(solutions.len(), 6);
        for solution in &solutions {
            let values: HashSet<i32> = ids.iter().map(|&id| *solution.get(id).unwrap()).collect();
            assert_eq!(values.len(), 3);
        }
    }

    #[test]
    fn count_solutions_respects_a_limit() {
        let mut csp = Csp::new();
        for name in ["a", "b", "c"] {
            csp.add_variable(Variable::new(name, [1, 2, 3]));
        }
        csp.add_all_different();

        assert_eq!(count_solutions(&mut csp, Some(2)), 2);
    }
}
