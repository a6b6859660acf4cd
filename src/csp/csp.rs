use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use super::assignment::Assignment;
use super::constraint::{different, Constraint};
use super::variable::{Variable, VariableId};
use crate::error::CspError;

/// Owns a set of [`Variable`]s plus unary and binary constraint
/// adjacency. Binary constraints are stored symmetrically: inserting
/// `c` at `(v1, v2)` also stores `c.dual()` at `(v2, v1)`.
pub struct Csp<T> {
    variables: HashMap<VariableId, Variable<T>>,
    order: Vec<VariableId>,
    unary: HashMap<VariableId, HashMap<T, Constraint<T>>>,
    binary: HashMap<VariableId, HashMap<VariableId, Constraint<T>>>,
}

impl<T: Clone + Eq + Hash + Debug> Csp<T> {
    pub fn new() -> Self {
        Csp {
            variables: HashMap::new(),
            order: Vec::new(),
            unary: HashMap::new(),
            binary: HashMap::new(),
        }
    }

    /// Adds `var` to the CSP. A no-op if a variable with this identity
    /// is already present.
    pub fn add_variable(&mut self, var: Variable<T>) {
        let id = var.id();
        if self.variables.contains_key(&id) {
            return;
        }
        self.order.push(id);
        self.variables.insert(id, var);
    }

    /// Returns the first variable (in insertion order) with this name,
    /// if any.
    pub fn get_variable(&self, name: &str) -> Option<&Variable<T>> {
        self.order
            .iter()
            .map(|id| &self.variables[id])
            .find(|v| v.name() == name)
    }

    pub fn variable(&self, id: VariableId) -> Option<&Variable<T>> {
        self.variables.get(&id)
    }

    pub fn variable_mut(&mut self, id: VariableId) -> Option<&mut Variable<T>> {
        self.variables.get_mut(&id)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable<T>> + '_ {
        self.order.iter().map(move |id| &self.variables[id])
    }

    pub fn variable_ids(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.order.iter().copied()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Stores `constraint` at `unary[var][value]`. A no-op if a
    /// constraint already occupies that slot and `override_` is false.
    pub fn add_unary_constraint(
        &mut self,
        var: VariableId,
        constraint: Constraint<T>,
        value: T,
        override_: bool,
    ) -> Result<(), CspError> {
        if !self.variables.contains_key(&var) {
            return Err(CspError::UnknownVariable(var));
        }
        let slot = self.unary.entry(var).or_default();
        if slot.contains_key(&value) && !override_ {
            log::warn!("add_unary_constraint: slot ({var}, {value:?}) already occupied, discarding {}", constraint.name());
            return Ok(());
        }
        slot.insert(value, constraint);
        Ok(())
    }

    /// Stores `constraint` at `binary[v1][v2]` and its dual at
    /// `binary[v2][v1]`. A no-op if a constraint already occupies that
    /// slot and `override_` is false.
    pub fn add_binary_constraint(
        &mut self,
        v1: VariableId,
        constraint: Constraint<T>,
        v2: VariableId,
        override_: bool,
    ) -> Result<(), CspError> {
        if !self.variables.contains_key(&v1) {
            return Err(CspError::UnknownVariable(v1));
        }
        if !self.variables.contains_key(&v2) {
            return Err(CspError::UnknownVariable(v2));
        }
        let exists = self
            .binary
            .get(&v1)
            .is_some_and(|neighbours| neighbours.contains_key(&v2));
        if exists && !override_ {
            log::warn!("add_binary_constraint: slot ({v1}, {v2}) already occupied, discarding {}", constraint.name());
            return Ok(());
        }
        let dual = constraint.dual();
        self.binary.entry(v1).or_default().insert(v2, constraint);
        self.binary.entry(v2).or_default().insert(v1, dual);
        Ok(())
    }

    pub fn unary_constraints_for(&self, var: VariableId) -> Option<&HashMap<T, Constraint<T>>> {
        self.unary.get(&var)
    }

    pub fn binary_constraints_for(
        &self,
        var: VariableId,
    ) -> Option<&HashMap<VariableId, Constraint<T>>> {
        self.binary.get(&var)
    }

    pub fn find_binary_constraint(&self, v1: VariableId, v2: VariableId) -> Option<&Constraint<T>> {
        self.binary.get(&v1)?.get(&v2)
    }

    pub fn find_unary_constraint(&self, var: VariableId, value: &T) -> Option<&Constraint<T>> {
        self.unary.get(&var)?.get(value)
    }

    /// The number of binary-constraint neighbours of `var`.
    pub fn degree(&self, var: VariableId) -> usize {
        self.binary.get(&var).map_or(0, HashMap::len)
    }

    /// Every ordered pair with a binary constraint between them.
    pub fn edges(&self) -> HashSet<(VariableId, VariableId)> {
        let mut edges = HashSet::new();
        for (&v1, neighbours) in &self.binary {
            for &v2 in neighbours.keys() {
                edges.insert((v1, v2));
            }
        }
        edges
    }

    /// Both `(var, w)` and `(w, var)` for every binary-constraint
    /// neighbour `w` of `var`.
    pub fn neighbours(&self, var: VariableId) -> HashSet<(VariableId, VariableId)> {
        let mut result = HashSet::new();
        if let Some(neighbours) = self.binary.get(&var) {
            for &w in neighbours.keys() {
                result.insert((var, w));
                result.insert((w, var));
            }
        }
        result
    }

    /// True iff `var`'s bound value (under `a`) is in its actual
    /// domain, satisfies every unary constraint on it, and satisfies
    /// every binary constraint against an already-bound neighbour.
    pub fn assignment_consistency_for_var(&self, a: &Assignment<T>, var: VariableId) -> bool {
        let Some(variable) = self.variables.get(&var) else {
            return false;
        };
        let Some(value) = a.get(var) else {
            return false;
        };
        if !variable.actual_domain().contains(value) {
            return false;
        }
        if let Some(unary) = self.unary.get(&var) {
            for (unary_value, constraint) in unary {
                if !constraint.apply(value, unary_value) {
                    return false;
                }
            }
        }
        if let Some(neighbours) = self.binary.get(&var) {
            for (other, constraint) in neighbours {
                if let Some(other_value) = a.get(*other) {
                    if !constraint.apply(value, other_value) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// True iff every bound variable in `a` passes
    /// [`assignment_consistency_for_var`].
    pub fn assignment_consistency(&self, a: &Assignment<T>) -> bool {
        a.variables().all(|var| self.assignment_consistency_for_var(a, var))
    }

    /// A new CSP containing the unassigned variables of `a`, their
    /// mutual binary constraints, and their original unary constraints.
    /// When `cheap` is false, also injects the unary constraints
    /// described in [`complete_subproblem`](Csp::complete_subproblem).
    pub fn subproblem(&self, a: &Assignment<T>, cheap: bool) -> Csp<T> {
        let mut sub = Csp::new();
        for id in &self.order {
            if !a.is_assigned(*id) {
                sub.add_variable(self.variables[id].clone());
            }
        }
        for (&id, constraints) in &self.unary {
            if sub.variables.contains_key(&id) {
                for (value, constraint) in constraints {
                    let _ = sub.add_unary_constraint(id, constraint.clone(), value.clone(), false);
                }
            }
        }
        for (&v1, neighbours) in &self.binary {
            if !sub.variables.contains_key(&v1) {
                continue;
            }
            for (&v2, constraint) in neighbours {
                if sub.variables.contains_key(&v2) {
                    let _ = sub.add_binary_constraint(v1, constraint.clone(), v2, false);
                }
            }
        }
        if !cheap {
            self.complete_subproblem(a, &mut sub);
        }
        sub
    }

    /// For every binary constraint `(v, w)` where `v` is bound (to
    /// `value`) in `a` and `w` is present in `sub`, injects the unary
    /// constraint "`w` satisfies `c.dual()` against `value`" into `sub`.
    /// Used to complete a subproblem previously built with `cheap=true`.
    pub fn complete_subproblem(&self, a: &Assignment<T>, sub: &mut Csp<T>) {
        for (assigned, value) in a.iter() {
            if let Some(neighbours) = self.binary.get(&assigned) {
                for (&other, constraint) in neighbours {
                    if sub.variables.contains_key(&other) {
                        let _ = sub.add_unary_constraint(
                            other,
                            constraint.dual(),
                            value.clone(),
                            false,
                        );
                    }
                }
            }
        }
    }

    /// Destructively removes `var` from the CSP. For each neighbour `w`:
    /// when `cheap` is false, injects the unary constraint induced by
    /// binding `var` to `value`; always removes the now-dangling binary
    /// edge.
    pub fn adapt(&mut self, var: VariableId, value: T, cheap: bool) -> Result<(), CspError> {
        if !self.variables.contains_key(&var) {
            return Err(CspError::UnknownVariable(var));
        }
        self.variables.remove(&var);
        self.order.retain(|id| *id != var);
        self.unary.remove(&var);
        if let Some(neighbours) = self.binary.remove(&var) {
            for (other, constraint) in neighbours {
                if !cheap {
                    let _ = self.add_unary_constraint(other, constraint.dual(), value.clone(), false);
                }
                if let Some(other_map) = self.binary.get_mut(&other) {
                    other_map.remove(&var);
                }
            }
        }
        Ok(())
    }
}

impl<T: Clone + Eq + Hash + Debug + 'static> Csp<T> {
    /// Inserts `different` between every ordered pair of distinct
    /// variables.
    pub fn add_all_different(&mut self) {
        let ids = self.order.clone();
        for &v1 in &ids {
            for &v2 in &ids {
                if v1 != v2 {
                    let name = format!("different({v1}-{v2})");
                    let _ = self.add_binary_constraint(v1, different(name), v2, false);
                }
            }
        }
    }
}

impl<T: Clone + Eq + Hash + Debug> Default for Csp<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash + Debug> Display for Csp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "CSP with {} variables, {} binary edges:",
            self.num_variables(),
            self.edges().len() / 2
        )?;
        for var in self.variables() {
            writeln!(
                f,
                "  {} ({:?}) actual domain size {}",
                var.name(),
                var.actual_domain(),
                var.actual_domain_size()
            )?;
        }
        Ok(())
    }
}

/// A read-only view of a [`Csp`] plus a mutable *hidden variables* set,
/// letting the cutset solver test "is the residual graph a tree?"
/// without mutating the underlying CSP.
pub struct CspWorkingCopy<'a, T> {
    csp: &'a Csp<T>,
    hidden: HashSet<VariableId>,
}

impl<'a, T: Clone + Eq + Hash + Debug> CspWorkingCopy<'a, T> {
    pub fn new(csp: &'a Csp<T>) -> Self {
        CspWorkingCopy {
            csp,
            hidden: HashSet::new(),
        }
    }

    pub fn hide_var(&mut self, var: VariableId) -> Result<(), CspError> {
        if !self.csp.variables.contains_key(&var) {
            return Err(CspError::UnknownVariable(var));
        }
        self.hidden.insert(var);
        Ok(())
    }

    pub fn unhide_var(&mut self, var: VariableId) -> Result<(), CspError> {
        if !self.csp.variables.contains_key(&var) {
            return Err(CspError::UnknownVariable(var));
        }
        self.hidden.remove(&var);
        Ok(())
    }

    /// Every binary-constraint edge between two variables neither of
    /// which is hidden.
    pub fn edges(&self) -> HashSet<(VariableId, VariableId)> {
        self.csp
            .edges()
            .into_iter()
            .filter(|(v1, v2)| !self.hidden.contains(v1) && !self.hidden.contains(v2))
            .collect()
    }

    pub fn count_neighbours(&self, var: VariableId) -> usize {
        self.csp
            .binary
            .get(&var)
            .map(|neighbours| neighbours.keys().filter(|w| !self.hidden.contains(w)).count())
            .unwrap_or(0)
    }

    pub fn variables(&self) -> HashSet<VariableId> {
        self.csp
            .variable_ids()
            .filter(|id| !self.hidden.contains(id))
            .collect()
    }

    pub fn csp(&self) -> &'a Csp<T> {
        self.csp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::constraint::{different, lesser};

    #[test]
    fn binary_constraint_is_stored_symmetrically_with_dual() {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1, 2]);
        let b = Variable::new("b", [1, 2]);
        let (a_id, b_id) = (a.id(), b.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_binary_constraint(a_id, lesser("a<b"), b_id, false).unwrap();

        let forward = csp.find_binary_constraint(a_id, b_id).unwrap();
        let backward = csp.find_binary_constraint(b_id, a_id).unwrap();
        assert!(forward.apply(&1, &2));
        assert!(backward.apply(&2, &1));
    }

    #[test]
    fn override_false_is_a_no_op_on_an_existing_slot() {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1, 2]);
        let b = Variable::new("b", [1, 2]);
        let (a_id, b_id) = (a.id(), b.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_binary_constraint(a_id, lesser("first"), b_id, false).unwrap();
        csp.add_binary_constraint(a_id, different("second"), b_id, false).unwrap();

        assert_eq!(csp.find_binary_constraint(a_id, b_id).unwrap().name(), "first");
    }

    #[test]
    fn override_true_replaces_the_slot() {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1, 2]);
        let b = Variable::new("b", [1, 2]);
        let (a_id, b_id) = (a.id(), b.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_binary_constraint(a_id, lesser("first"), b_id, false).unwrap();
        csp.add_binary_constraint(a_id, different("second"), b_id, true).unwrap();

        assert_eq!(csp.find_binary_constraint(a_id, b_id).unwrap().name(), "second");
    }

    #[test]
    fn adding_a_constraint_on_an_unknown_variable_errors() {
        let mut csp = Csp::<i32>::new();
        let ghost = Variable::new("ghost", [1]).id();
        let a = Variable::new("a", [1]);
        csp.add_variable(a);
        assert!(matches!(
            csp.add_unary_constraint(ghost, crate::csp::constraint::equals("eq"), 1, false),
            Err(CspError::UnknownVariable(_))
        ));
    }

    #[test]
    fn edges_and_neighbours_both_expose_both_directions() {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1, 2]);
        let b = Variable::new("b", [1, 2]);
        let (a_id, b_id) = (a.id(), b.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_binary_constraint(a_id, different("ab"), b_id, false).unwrap();

        let edges = csp.edges();
        assert!(edges.contains(&(a_id, b_id)));
        assert!(edges.contains(&(b_id, a_id)));

        let neighbours = csp.neighbours(a_id);
        assert!(neighbours.contains(&(a_id, b_id)));
        assert!(neighbours.contains(&(b_id, a_id)));
    }

    #[test]
    fn subproblem_drops_assigned_variables_and_injects_induced_unaries() {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1, 2, 3]);
        let b = Variable::new("b", [1, 2, 3]);
        let (a_id, b_id) = (a.id(), b.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_binary_constraint(a_id, different("ab"), b_id, false).unwrap();

        let mut assignment = Assignment::new();
        assignment.assign(csp.variable(a_id).unwrap(), 1).unwrap();

        let sub = csp.subproblem(&assignment, false);
        assert_eq!(sub.num_variables(), 1);
        assert!(sub.variable(b_id).is_some());

        let induced = sub.find_unary_constraint(b_id, &1).unwrap();
        // induced unary should reject b==1 (mirrors the original `different`)
        assert!(!induced.apply(&1, &1));
        assert!(induced.apply(&2, &1));
    }

    #[test]
    fn adapt_removes_variable_and_injects_unary_on_neighbours() {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1, 2, 3]);
        let b = Variable::new("b", [1, 2, 3]);
        let (a_id, b_id) = (a.id(), b.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_binary_constraint(a_id, different("ab"), b_id, false).unwrap();

        csp.adapt(a_id, 1, false).unwrap();

        assert_eq!(csp.num_variables(), 1);
        assert!(csp.variable(a_id).is_none());
        assert!(csp.binary_constraints_for(b_id).is_none_or(|m| !m.contains_key(&a_id)));
        let induced = csp.find_unary_constraint(b_id, &1).unwrap();
        assert!(!induced.apply(&1, &1));
    }

    #[test]
    fn add_all_different_links_every_pair() {
        let mut csp = Csp::new();
        let ids: Vec<_> = (0..3)
            .map(|i| {
                let v = Variable::new(format!("v{i}"), [1, 2, 3]);
                let id = v.id();
                csp.add_variable(v);
                id
            })
            .collect();
        csp.add_all_different();
        for &i in &ids {
            for &j in &ids {
                if i != j {
                    assert!(csp.find_binary_constraint(i, j).is_some());
                }
            }
        }
    }

    #[test]
    fn working_copy_hides_variables_without_mutating_the_csp() {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1, 2]);
        let b = Variable::new("b", [1, 2]);
        let (a_id, b_id) = (a.id(), b.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_binary_constraint(a_id, different("ab"), b_id, false).unwrap();

        let mut working = CspWorkingCopy::new(&csp);
        assert_eq!(working.variables().len(), 2);
        working.hide_var(a_id).unwrap();
        assert_eq!(working.variables().len(), 1);
        assert_eq!(csp.num_variables(), 2);
    }
}
