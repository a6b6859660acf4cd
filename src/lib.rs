pub mod csp;
pub mod demos;
pub mod error;
pub mod solver;

pub use csp::{Assignment, Constraint, Csp, CspWorkingCopy, Variable, VariableId};
pub use error::{AssignmentError, CspError, CspSolverError, TreeError, VariableError};
