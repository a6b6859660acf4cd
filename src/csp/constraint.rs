use std::fmt::{self, Debug};
use std::rc::Rc;

/// A binary predicate over two values, with an optional dual (reversed)
/// view.
///
/// `apply(a, b)` computes `predicate(a, b)` when not dual, or
/// `predicate(b, a)` when dual. `Constraint` is immutable after
/// construction; `dual()` returns a new, independent flagged wrapper
/// around the same predicate.
pub struct Constraint<T> {
    name: String,
    predicate: Rc<dyn Fn(&T, &T) -> bool>,
    dual: bool,
}

impl<T> Constraint<T> {
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        Constraint {
            name: name.into(),
            predicate: Rc::new(predicate),
            dual: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dual(&self) -> bool {
        self.dual
    }

    /// Evaluates the constraint, swapping the arguments first if this is
    /// the dual view.
    pub fn apply(&self, a: &T, b: &T) -> bool {
        if self.dual {
            (self.predicate)(b, a)
        } else {
            (self.predicate)(a, b)
        }
    }

    /// Returns a new constraint wrapping the same predicate with the
    /// dual flag toggled.
    pub fn dual(&self) -> Self {
        Constraint {
            name: self.name.clone(),
            predicate: Rc::clone(&self.predicate),
            dual: !self.dual,
        }
    }
}

impl<T> Clone for Constraint<T> {
    fn clone(&self) -> Self {
        Constraint {
            name: self.name.clone(),
            predicate: Rc::clone(&self.predicate),
            dual: self.dual,
        }
    }
}

/// Two constraints are equivalent when they wrap the same predicate
/// (by reference) and carry the same dual flag.
impl<T> PartialEq for Constraint<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.predicate, &other.predicate) && self.dual == other.dual
    }
}

impl<T> Eq for Constraint<T> {}

impl<T> Debug for Constraint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("name", &self.name)
            .field("dual", &self.dual)
            .finish()
    }
}

/// Named built-in predicates, matching `spec.md` §4.1/§6.
pub fn equals<T: PartialEq + 'static>(name: impl Into<String>) -> Constraint<T> {
    Constraint::new(name, |a: &T, b: &T| a == b)
}

pub fn different<T: PartialEq + 'static>(name: impl Into<String>) -> Constraint<T> {
    Constraint::new(name, |a: &T, b: &T| a != b)
}

pub fn greater<T: PartialOrd + 'static>(name: impl Into<String>) -> Constraint<T> {
    Constraint::new(name, |a: &T, b: &T| a > b)
}

pub fn greater_or_equal<T: PartialOrd + 'static>(name: impl Into<String>) -> Constraint<T> {
    Constraint::new(name, |a: &T, b: &T| a >= b)
}

pub fn lesser<T: PartialOrd + 'static>(name: impl Into<String>) -> Constraint<T> {
    Constraint::new(name, |a: &T, b: &T| a < b)
}

pub fn lesser_or_equal<T: PartialOrd + 'static>(name: impl Into<String>) -> Constraint<T> {
    Constraint::new(name, |a: &T, b: &T| a <= b)
}
