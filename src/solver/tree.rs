use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use crate::csp::{Assignment, Csp, VariableId};
use crate::error::TreeError;

/// Breadth-first topological order over a connected, acyclic binary
/// constraint graph, plus each variable's parent (`None` for the root).
///
/// Errs if the graph isn't a tree: a repeated non-parent neighbour means
/// a cycle, and fewer visited variables than the CSP holds means the
/// graph is disconnected.
pub fn top_sort<T: Clone + Eq + Hash + Debug>(
    csp: &Csp<T>,
) -> Result<(Vec<VariableId>, HashMap<VariableId, Option<VariableId>>), TreeError> {
    let mut order = Vec::new();
    let mut parent: HashMap<VariableId, Option<VariableId>> = HashMap::new();
    let mut visited = HashSet::new();

    let Some(root) = csp.variable_ids().next() else {
        return Ok((order, parent));
    };
    let mut queue = VecDeque::new();
    queue.push_back(root);
    visited.insert(root);
    parent.insert(root, None);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        if let Some(neighbours) = csp.binary_constraints_for(v) {
            for &w in neighbours.keys() {
                if visited.contains(&w) {
                    if parent.get(&v) != Some(&Some(w)) {
                        let name = csp.variable(w).map(|v| v.name().to_string()).unwrap_or_default();
                        return Err(TreeError::Cycle(name));
                    }
                    continue;
                }
                visited.insert(w);
                parent.insert(w, Some(v));
                queue.push_back(w);
            }
        }
    }

    if visited.len() != csp.num_variables() {
        return Err(TreeError::Disconnected {
            visited: visited.len(),
            total: csp.num_variables(),
        });
    }
    Ok((order, parent))
}

/// Solves a CSP whose binary constraint graph is a tree in linear time:
/// directional arc consistency (each node's parent pruned against it,
/// processed leaf-to-root so a parent is only pruned once every one of
/// its children has already been pruned) followed by a greedy
/// root-to-leaf assignment pass. Errs if the graph isn't a tree.
pub fn tree_solver<T: Clone + Eq + Hash + Debug>(csp: &Csp<T>) -> Result<Assignment<T>, TreeError> {
    let (order, parent) = top_sort(csp)?;
    if order.is_empty() {
        return Ok(Assignment::new());
    }

    let mut domains: HashMap<VariableId, HashSet<T>> = order
        .iter()
        .map(|&id| (id, csp.variable(id).unwrap().actual_domain()))
        .collect();

    for &child in order.iter().rev() {
        let Some(Some(par)) = parent.get(&child) else {
            continue;
        };
        let par = *par;
        let Some(constraint) = csp.find_binary_constraint(par, child) else {
            continue;
        };
        let child_domain = domains[&child].clone();
        let parent_domain = domains.get_mut(&par).unwrap();
        parent_domain.retain(|value| child_domain.iter().any(|child_value| constraint.apply(value, child_value)));
    }

    let mut assignment = Assignment::new();
    for &var_id in &order {
        let variable = csp.variable(var_id).unwrap();
        let mut assigned = false;
        for value in &domains[&var_id] {
            let mut trial = assignment.clone();
            trial.assign(variable, value.clone()).unwrap();
            if csp.assignment_consistency_for_var(&trial, var_id) {
                assignment = trial;
                assigned = true;
                break;
            }
        }
        if !assigned {
            log::debug!("tree_solver: variable {var_id} has no value consistent with its ancestors");
            return Ok(Assignment::null());
        }
    }
    Ok(assignment)
}
