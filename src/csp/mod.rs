pub mod assignment;
pub mod constraint;
pub mod csp;
pub mod variable;

pub use assignment::Assignment;
pub use constraint::{different, equals, greater, greater_or_equal, lesser, lesser_or_equal, Constraint};
pub use csp::{Csp, CspWorkingCopy};
pub use variable::{Variable, VariableId};
