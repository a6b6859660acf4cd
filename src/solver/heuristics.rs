use std::fmt::Debug;
use std::hash::Hash;

use crate::csp::{Assignment, Csp, VariableId};

/// Picks the next variable to branch on: minimum remaining values
/// first, breaking ties by maximum degree (most binary-constraint
/// neighbours), breaking further ties by insertion order.
pub fn select_unassigned_variable<T: Clone + Eq + Hash + Debug>(
    csp: &Csp<T>,
    assignment: &Assignment<T>,
) -> Option<VariableId> {
    csp.variable_ids()
        .filter(|&id| !assignment.is_assigned(id))
        .min_by_key(|&id| {
            let remaining = assignment.effective_domain(csp.variable(id).unwrap()).len();
            (remaining, std::cmp::Reverse(csp.degree(id)))
        })
}

/// Orders `var`'s effective domain values least-constraining first: the
/// value ruling out the fewest candidate values of `var`'s binary
/// neighbours comes first. The crossout count sums over every binary
/// neighbour's actual domain, assigned or not, per spec.
pub fn order_domain_values<T: Clone + Eq + Hash + Debug>(
    csp: &Csp<T>,
    assignment: &Assignment<T>,
    var: VariableId,
) -> Vec<T> {
    let variable = csp.variable(var).unwrap();
    let mut values: Vec<T> = assignment.effective_domain(variable).into_iter().collect();

    values.sort_by_key(|value| {
        let Some(neighbours) = csp.binary_constraints_for(var) else {
            return 0;
        };
        let mut eliminated = 0usize;
        for (&other_id, constraint) in neighbours {
            let other = csp.variable(other_id).unwrap();
            for other_value in other.actual_domain() {
                if !constraint.apply(value, &other_value) {
                    eliminated += 1;
                }
            }
        }
        eliminated
    });
    values
}
