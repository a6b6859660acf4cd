use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;

use super::ac3;
use super::heuristics::{order_domain_values, select_unassigned_variable};
use super::mac::mac;
use super::tree::tree_solver;
use crate::csp::{Assignment, Csp, CspWorkingCopy, VariableId};

/// True iff the variables and edges visible through `working` form a
/// single connected, acyclic graph.
///
/// `edges()` reports each undirected edge twice (once per direction);
/// a tree on `n` nodes has exactly `n - 1` undirected edges, so
/// `n <= e / 2` is a cheap fast-reject before walking the graph.
pub fn is_a_tree<T: Clone + Eq + Hash + Debug>(working: &CspWorkingCopy<T>) -> bool {
    let vars = working.variables();
    let n = vars.len();
    if n <= 1 {
        return true;
    }
    let edges = working.edges();
    let e = edges.len();
    // A tree on n nodes has n-1 undirected edges, i.e. n-1 > e/2 is false
    // only when e/2 >= n-1, which already holds for any tree; the
    // contrapositive `n <= e/2` rules out trees outright as a fast path.
    if n <= e / 2 {
        return false;
    }
    is_connected_acyclic(&vars, &edges)
}

fn is_connected_acyclic(
    vars: &HashSet<VariableId>,
    edges: &HashSet<(VariableId, VariableId)>,
) -> bool {
    let mut adjacency: HashMap<VariableId, Vec<VariableId>> = HashMap::new();
    for &(from, to) in edges {
        adjacency.entry(from).or_default().push(to);
    }

    let Some(&root) = vars.iter().next() else {
        return true;
    };
    let mut visited = HashSet::new();
    let mut parent: HashMap<VariableId, VariableId> = HashMap::new();
    let mut queue = VecDeque::new();
    visited.insert(root);
    queue.push_back(root);

    while let Some(v) = queue.pop_front() {
        for &w in adjacency.get(&v).map(Vec::as_slice).unwrap_or(&[]) {
            if !vars.contains(&w) {
                continue;
            }
            if visited.contains(&w) {
                if parent.get(&v) != Some(&w) {
                    return false;
                }
                continue;
            }
            visited.insert(w);
            parent.insert(w, v);
            queue.push_back(w);
        }
    }
    visited.len() == vars.len()
}

/// Solves `csp` by conditioning variables one at a time (via backtracking
/// with MAC) until the residual graph — tracked through a
/// [`CspWorkingCopy`] that hides conditioned variables without mutating
/// `csp` — collapses to a tree, then solving that residual in linear time
/// with [`tree_solver`]. Returns the solution (or the null assignment)
/// alongside the variable count of the residual tree the successful
/// branch bottomed out into.
///
/// `heuristic=true` selects the next variable to condition by MRV+Degree;
/// `heuristic=false` chooses uniformly at random via `rng`, matching the
/// two selection modes `spec.md` §4.7 describes. Candidate values are
/// always ordered by LCV.
///
/// As in the source this is ported from, `residual_tree_size` records
/// the *last* residual reached, not the minimum across backtracked
/// branches — see `SPEC_FULL.md`'s note on Open Question (c).
///
/// Mirrors `backtrack`'s entry behavior by running AC-3 once up front.
/// Since `cutset` takes `csp` by shared reference (the working copy only
/// ever hides variables, never mutates domains), the destructive AC-3
/// pass runs against a full clone of `csp` rather than `csp` itself; the
/// clone preserves every variable's identity, so the returned assignment
/// is keyed exactly as callers expect.
pub fn cutset<T: Clone + Eq + Hash + Debug, R: Rng + ?Sized>(
    csp: &Csp<T>,
    heuristic: bool,
    rng: &mut R,
) -> (Assignment<T>, usize) {
    let mut prepared = csp.subproblem(&Assignment::new(), false);
    if !ac3::ac3(&mut prepared) {
        log::debug!("cutset: inconsistent before search began");
        return (Assignment::null(), 0);
    }
    let mut working = CspWorkingCopy::new(&prepared);
    let mut residual_tree_size = 0;
    let solution = search(&prepared, &mut working, &Assignment::new(), heuristic, rng, &mut residual_tree_size);
    (solution, residual_tree_size)
}

/// Convenience wrapper over [`cutset`] for callers that only want the
/// assignment: MRV+Degree variable selection, discarding the residual
/// tree size.
pub fn cutset_solve<T: Clone + Eq + Hash + Debug, R: Rng + ?Sized>(
    csp: &Csp<T>,
    rng: &mut R,
) -> Assignment<T> {
    cutset(csp, true, rng).0
}

fn search<T: Clone + Eq + Hash + Debug, R: Rng + ?Sized>(
    csp: &Csp<T>,
    working: &mut CspWorkingCopy<T>,
    assignment: &Assignment<T>,
    heuristic: bool,
    rng: &mut R,
    residual_tree_size: &mut usize,
) -> Assignment<T> {
    if is_a_tree(working) {
        let sub = csp.subproblem(assignment, false);
        *residual_tree_size = sub.num_variables();
        log::debug!("cutset: residual is a tree with {} variables", sub.num_variables());
        return match tree_solver(&sub) {
            Ok(solution) if !solution.is_null() => assignment.clone() + solution,
            _ => Assignment::null(),
        };
    }

    let Some(var) = select_variable(csp, working, assignment, heuristic, rng) else {
        return Assignment::null();
    };
    let variable = csp.variable(var).unwrap();

    for value in order_domain_values(csp, assignment, var) {
        let mut candidate = assignment.clone();
        candidate.assign(variable, value).unwrap();
        if !csp.assignment_consistency_for_var(&candidate, var) {
            continue;
        }
        if !mac(csp, &mut candidate, var) {
            continue;
        }
        working.hide_var(var).unwrap();
        let result = search(csp, working, &candidate, heuristic, rng, residual_tree_size);
        if !result.is_null() {
            return result;
        }
        working.unhide_var(var).unwrap();
    }
    log::trace!("cutset: exhausted domain of {var}, backtracking");
    Assignment::null()
}

/// MRV+Degree when `heuristic` is set, otherwise a uniform random choice
/// among the still-visible (unconditioned) variables.
fn select_variable<T: Clone + Eq + Hash + Debug, R: Rng + ?Sized>(
    csp: &Csp<T>,
    working: &CspWorkingCopy<T>,
    assignment: &Assignment<T>,
    heuristic: bool,
    rng: &mut R,
) -> Option<VariableId> {
    if heuristic {
        return select_unassigned_variable(csp, assignment);
    }
    let remaining: Vec<VariableId> = working.variables().into_iter().collect();
    if remaining.is_empty() {
        return None;
    }
    Some(remaining[rng.gen_range(0..remaining.len())])
}
