use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Add;

use super::variable::{Variable, VariableId};
use crate::error::AssignmentError;

/// A partial mapping from variables to values, plus the *tentative*
/// values MAC has hidden for this search branch, plus a `null` flag
/// signalling unsatisfiability.
///
/// `Assignment` is value-typed: every descent into a new search branch
/// clones it, leaving the parent intact for backtracking.
#[derive(Debug, Clone, Default)]
pub struct Assignment<T> {
    assignment: HashMap<VariableId, T>,
    inferences: HashMap<VariableId, HashSet<T>>,
    null: bool,
}

impl<T: Clone + Eq + Hash + Debug> Assignment<T> {
    /// An empty, non-null assignment.
    pub fn new() -> Self {
        Assignment {
            assignment: HashMap::new(),
            inferences: HashMap::new(),
            null: false,
        }
    }

    /// The sentinel signalling unsatisfiability. Distinct from an empty
    /// partial assignment.
    pub fn null() -> Self {
        Assignment {
            assignment: HashMap::new(),
            inferences: HashMap::new(),
            null: true,
        }
    }

    pub fn is_null(&self) -> bool {
        self.null
    }

    /// Binds `var` to `value`. Errors if this assignment is null or if
    /// `value` is outside `var`'s initial domain.
    pub fn assign(&mut self, var: &Variable<T>, value: T) -> Result<(), AssignmentError> {
        if self.null {
            return Err(AssignmentError::NullAssignment);
        }
        if !var.valid_value(&value) {
            return Err(AssignmentError::ValueNotInDomain {
                name: var.name().to_string(),
            });
        }
        self.assignment.insert(var.id(), value);
        Ok(())
    }

    pub fn unassign(&mut self, var: VariableId) {
        self.assignment.remove(&var);
    }

    pub fn is_assigned(&self, var: VariableId) -> bool {
        self.assignment.contains_key(&var)
    }

    pub fn get(&self, var: VariableId) -> Option<&T> {
        self.assignment.get(&var)
    }

    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    pub fn is_complete(&self, total_variables: usize) -> bool {
        self.assignment.len() == total_variables
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.assignment.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &T)> + '_ {
        self.assignment.iter().map(|(k, v)| (*k, v))
    }

    /// Records `value` as tentatively hidden on `var` for this branch,
    /// without mutating `var` itself. Errors if this assignment is null
    /// or if `value` is outside `var`'s initial domain.
    pub fn add_inference(&mut self, var: &Variable<T>, value: T) -> Result<(), AssignmentError> {
        if self.null {
            return Err(AssignmentError::NullAssignment);
        }
        if !var.valid_value(&value) {
            return Err(AssignmentError::ValueNotInDomain {
                name: var.name().to_string(),
            });
        }
        self.inferences.entry(var.id()).or_default().insert(value);
        Ok(())
    }

    /// The values tentatively hidden on `var` in this branch.
    pub fn inferences_for(&self, var: VariableId) -> HashSet<T> {
        self.inferences.get(&var).cloned().unwrap_or_default()
    }

    /// The effective domain of `var` under this assignment: the value
    /// it's bound to, or its actual domain minus this branch's
    /// inferences.
    pub fn effective_domain(&self, var: &Variable<T>) -> HashSet<T> {
        if let Some(value) = self.get(var.id()) {
            let mut single = HashSet::with_capacity(1);
            single.insert(value.clone());
            return single;
        }
        let mut domain = var.actual_domain();
        if let Some(hidden) = self.inferences.get(&var.id()) {
            domain.retain(|v| !hidden.contains(v));
        }
        domain
    }
}

/// Unions the bindings of two assignments; inferences are dropped, as
/// in the source's `Assignment.__add__`. Used to splice a tree solver's
/// sub-solution back into the partial assignment that produced it.
impl<T: Clone + Eq + Hash + Debug> Add for Assignment<T> {
    type Output = Assignment<T>;

    fn add(self, other: Assignment<T>) -> Assignment<T> {
        let mut merged = self.assignment;
        merged.extend(other.assignment);
        Assignment {
            assignment: merged,
            inferences: HashMap::new(),
            null: false,
        }
    }
}
