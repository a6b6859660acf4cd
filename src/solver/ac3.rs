use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use crate::csp::Csp;

/// Destructively enforces arc consistency on `csp` by hiding every value
/// that can never participate in a solution. Returns `false` (the CSP
/// is unsatisfiable) if any variable's actual domain becomes empty.
///
/// Also runs a one-off unary pass first: any value violating a unary
/// constraint on its own variable is hidden before the binary worklist
/// starts.
pub fn ac3<T: Clone + Eq + Hash + Debug>(csp: &mut Csp<T>) -> bool {
    for var_id in csp.variable_ids().collect::<Vec<_>>() {
        let values: Vec<T> = csp.variable(var_id).unwrap().actual_domain().into_iter().collect();
        for value in values {
            let violates = csp
                .unary_constraints_for(var_id)
                .is_some_and(|constraints| {
                    constraints
                        .iter()
                        .any(|(unary_value, constraint)| !constraint.apply(&value, unary_value))
                });
            if violates {
                csp.variable_mut(var_id).unwrap().hide_value(&value).unwrap();
            }
        }
        if csp.variable(var_id).unwrap().actual_domain_size() == 0 {
            log::debug!("ac3: variable {var_id} emptied by its own unary constraints");
            return false;
        }
    }

    let mut worklist: VecDeque<(crate::csp::VariableId, crate::csp::VariableId)> =
        csp.edges().into_iter().collect();
    let mut queued: HashSet<(crate::csp::VariableId, crate::csp::VariableId)> =
        worklist.iter().copied().collect();

    while let Some((xi, xj)) = worklist.pop_front() {
        queued.remove(&(xi, xj));
        if revise(csp, xi, xj) {
            if csp.variable(xi).unwrap().actual_domain_size() == 0 {
                log::debug!("ac3: arc ({xi}, {xj}) emptied domain of {xi}");
                return false;
            }
            for (xk, _) in csp.neighbours(xi) {
                if xk != xj && queued.insert((xk, xi)) {
                    worklist.push_back((xk, xi));
                }
            }
        }
    }
    true
}

/// Hides every value of `xi` that has no supporting value of `xj` under
/// the binary constraint between them. Returns whether anything was
/// hidden.
fn revise<T: Clone + Eq + Hash + Debug>(
    csp: &mut Csp<T>,
    xi: crate::csp::VariableId,
    xj: crate::csp::VariableId,
) -> bool {
    let Some(constraint) = csp.find_binary_constraint(xi, xj).cloned() else {
        return false;
    };
    let xi_domain = csp.variable(xi).unwrap().actual_domain();
    let xj_domain = csp.variable(xj).unwrap().actual_domain();

    let mut revised = false;
    for xi_value in xi_domain {
        let has_support = xj_domain.iter().any(|xj_value| constraint.apply(&xi_value, xj_value));
        if !has_support {
            csp.variable_mut(xi).unwrap().hide_value(&xi_value).unwrap();
            revised = true;
        }
    }
    revised
}
