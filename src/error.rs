use thiserror::Error;

use crate::csp::VariableId;

/// Misuse of a [`Variable`](crate::csp::Variable)'s reversible hidden set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VariableError {
    #[error("value {value:?} is not in the initial domain of variable `{name}`")]
    ValueNotInDomain { name: String, value: String },
    #[error("value {value:?} is not currently hidden on variable `{name}`")]
    ValueNotHidden { name: String, value: String },
}

/// Misuse of [`Csp`](crate::csp::Csp)'s variable/constraint bookkeeping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CspError {
    #[error("variable {0:?} is not registered in this CSP")]
    UnknownVariable(VariableId),
}

/// Misuse of an [`Assignment`](crate::csp::Assignment).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("cannot bind variable `{name}` to a value outside its initial domain")]
    ValueNotInDomain { name: String },
    #[error("cannot mutate a null assignment")]
    NullAssignment,
}

/// Graph-shape contract violation in the tree solver: the binary
/// constraint graph handed to it is not a tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("constraint graph is not a tree: variable `{0}` was reached twice")]
    Cycle(String),
    #[error("constraint graph is not a tree: {visited} of {total} variables are reachable from the root")]
    Disconnected { visited: usize, total: usize },
}

/// Umbrella over every component error, for callers that don't care
/// which part of the engine raised it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CspSolverError {
    #[error(transparent)]
    Variable(#[from] VariableError),
    #[error(transparent)]
    Csp(#[from] CspError),
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
    #[error(transparent)]
    Tree(#[from] TreeError),
}
