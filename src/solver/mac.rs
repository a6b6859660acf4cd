use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use crate::csp::{Assignment, Csp, VariableId};

/// Maintains arc consistency against the branch's bindings and
/// inferences after `start` has just been bound, without mutating any
/// `Variable`'s domain. Prunes are recorded as tentative inferences on
/// `assignment`, so a failed branch can backtrack for free by dropping
/// the `Assignment` clone.
///
/// Returns `false` if this branch is now unsatisfiable (some variable's
/// effective domain became empty).
pub fn mac<T: Clone + Eq + Hash + Debug>(
    csp: &Csp<T>,
    assignment: &mut Assignment<T>,
    start: VariableId,
) -> bool {
    let mut worklist: VecDeque<(VariableId, VariableId)> = csp
        .neighbours(start)
        .into_iter()
        .filter(|&(_, into)| into == start)
        .collect();
    let mut queued: HashSet<(VariableId, VariableId)> = worklist.iter().copied().collect();

    while let Some((xi, xj)) = worklist.pop_front() {
        queued.remove(&(xi, xj));
        // An arc between two already-bound variables has nothing left
        // to prune; skip it rather than re-deriving a no-op revise.
        if assignment.is_assigned(xi) && assignment.is_assigned(xj) {
            continue;
        }
        if revise(csp, assignment, xi, xj) {
            if assignment.effective_domain(csp.variable(xi).unwrap()).is_empty() {
                log::debug!("mac: variable {xi} emptied while propagating from {start}");
                return false;
            }
            for (from, into) in csp.neighbours(xi) {
                if into == xi && from != xj && queued.insert((from, xi)) {
                    worklist.push_back((from, xi));
                }
            }
        }
    }
    true
}

/// Hides (as a tentative inference) every value of `xi`'s effective
/// domain with no support in `xj`'s effective domain. Returns whether
/// anything was hidden.
fn revise<T: Clone + Eq + Hash + Debug>(
    csp: &Csp<T>,
    assignment: &mut Assignment<T>,
    xi: VariableId,
    xj: VariableId,
) -> bool {
    let Some(constraint) = csp.find_binary_constraint(xi, xj).cloned() else {
        return false;
    };
    let var_i = csp.variable(xi).unwrap();
    let var_j = csp.variable(xj).unwrap();
    let di = assignment.effective_domain(var_i);
    let dj = assignment.effective_domain(var_j);

    let mut revised = false;
    for value in di {
        let has_support = dj.iter().any(|other| constraint.apply(&value, other));
        if !has_support {
            assignment.add_inference(var_i, value).unwrap();
            revised = true;
        }
    }
    revised
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::{different, Variable};

    #[test]
    fn mac_records_inferences_instead_of_mutating_the_variable() {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1, 2]);
        let b = Variable::new("b", [1, 2]);
        let (a_id, b_id) = (a.id(), b.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_binary_constraint(a_id, different("ab"), b_id, false).unwrap();

        let mut assignment = Assignment::new();
        assignment.assign(csp.variable(a_id).unwrap(), 1).unwrap();

        assert!(mac(&csp, &mut assignment, a_id));
        assert_eq!(assignment.effective_domain(csp.variable(b_id).unwrap()).len(), 1);
        // the underlying variable is untouched
        assert_eq!(csp.variable(b_id).unwrap().actual_domain_size(), 2);
    }

    #[test]
    fn mac_detects_unsatisfiability_without_mutating_anything() {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1]);
        let b = Variable::new("b", [1]);
        let (a_id, b_id) = (a.id(), b.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_binary_constraint(a_id, different("ab"), b_id, false).unwrap();

        let mut assignment = Assignment::new();
        assignment.assign(csp.variable(a_id).unwrap(), 1).unwrap();

        assert!(!mac(&csp, &mut assignment, a_id));
        assert_eq!(csp.variable(b_id).unwrap().actual_domain_size(), 1);
    }
}
