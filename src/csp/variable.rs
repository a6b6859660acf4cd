use std::collections::HashSet;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::VariableError;

static NEXT_VARIABLE_ID: AtomicUsize = AtomicUsize::new(0);

/// A process-unique handle identifying a [`Variable`].
///
/// Two variables built from the same name and domain are still distinct:
/// `VariableId` is minted fresh by `Variable::new`, giving variables
/// reference identity without needing shared/interior-mutable pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A named, finite-domain variable with a reversible hidden set.
///
/// The *initial domain* is fixed at construction. The *actual domain* is
/// `initial \ hidden`; only `hidden` ever mutates, via `hide_value`,
/// `unhide_value`, and `reset_domain`.
#[derive(Debug, Clone)]
pub struct Variable<T> {
    id: VariableId,
    name: String,
    initial: HashSet<T>,
    hidden: HashSet<T>,
}

impl<T: Clone + Eq + Hash + Debug> Variable<T> {
    /// Creates a new variable with a fresh, process-unique identity.
    pub fn new(name: impl Into<String>, domain: impl IntoIterator<Item = T>) -> Self {
        let id = VariableId(NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed));
        Variable {
            id,
            name: name.into(),
            initial: domain.into_iter().collect(),
            hidden: HashSet::new(),
        }
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The domain as fixed at construction, including hidden values.
    pub fn initial_domain(&self) -> &HashSet<T> {
        &self.initial
    }

    /// A snapshot of `initial \ hidden`. Callers must assume this may be
    /// invalidated by any subsequent mutation of the variable.
    pub fn actual_domain(&self) -> HashSet<T> {
        self.initial.difference(&self.hidden).cloned().collect()
    }

    pub fn actual_domain_size(&self) -> usize {
        self.initial.len() - self.hidden.len()
    }

    pub fn valid_value(&self, value: &T) -> bool {
        self.initial.contains(value)
    }

    /// Hides `value`, removing it from the actual domain.
    pub fn hide_value(&mut self, value: &T) -> Result<(), VariableError> {
        if !self.initial.contains(value) {
            return Err(VariableError::ValueNotInDomain {
                name: self.name.clone(),
                value: format!("{value:?}"),
            });
        }
        self.hidden.insert(value.clone());
        Ok(())
    }

    /// Reveals a previously hidden value.
    pub fn unhide_value(&mut self, value: &T) -> Result<(), VariableError> {
        if !self.hidden.remove(value) {
            return Err(VariableError::ValueNotHidden {
                name: self.name.clone(),
                value: format!("{value:?}"),
            });
        }
        Ok(())
    }

    /// Unhides every hidden value, restoring the actual domain to the
    /// initial one.
    pub fn reset_domain(&mut self) {
        self.hidden.clear();
    }
}

impl<T> Display for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actual_domain_excludes_hidden_values() {
        let mut v = Variable::new("x", [1, 2, 3]);
        v.hide_value(&2).unwrap();
        let mut actual: Vec<_> = v.actual_domain().into_iter().collect();
        actual.sort();
        assert_eq!(actual, vec![1, 3]);
        assert_eq!(v.actual_domain_size(), 2);
    }

    #[test]
    fn hiding_a_value_outside_the_domain_is_an_error() {
        let mut v = Variable::new("x", [1, 2, 3]);
        assert!(v.hide_value(&99).is_err());
    }

    #[test]
    fn unhiding_a_value_not_hidden_is_an_error() {
        let mut v = Variable::new("x", [1, 2, 3]);
        assert!(v.unhide_value(&1).is_err());
    }

    #[test]
    fn reset_domain_restores_all_values() {
        let mut v = Variable::new("x", [1, 2, 3]);
        v.hide_value(&1).unwrap();
        v.hide_value(&2).unwrap();
        v.reset_domain();
        assert_eq!(v.actual_domain_size(), 3);
    }

    #[test]
    fn distinct_variables_with_identical_name_and_domain_have_distinct_identity() {
        let a = Variable::new("x", [1, 2]);
        let b = Variable::new("x", [1, 2]);
        assert_ne!(a.id(), b.id());
    }
}
