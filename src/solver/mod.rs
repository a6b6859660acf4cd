pub mod ac3;
pub mod backtracking;
pub mod cutset;
pub mod heuristics;
pub mod mac;
pub mod tree;

pub use ac3::ac3;
pub use backtracking::{all_solutions, backtrack, count_solutions};
pub use cutset::{cutset, cutset_solve, is_a_tree};
pub use heuristics::{order_domain_values, select_unassigned_variable};
pub use mac::mac;
pub use tree::{top_sort, tree_solver};
