use crate::csp::{Assignment, Constraint, Csp, Variable};

/// The N-Queens CSP: one variable per column holding the row of its
/// queen, with a pairwise constraint forbidding shared rows and
/// diagonals.
pub fn create_queens_csp(size: usize) -> Csp<usize> {
    let mut csp = Csp::new();
    let ids: Vec<_> = (0..size)
        .map(|col| {
            let var = Variable::new(format!("Q{col}"), 0..size);
            let id = var.id();
            csp.add_variable(var);
            id
        })
        .collect();

    for i in 0..size {
        for j in (i + 1)..size {
            let col_diff = (j - i) as isize;
            let name = format!("non-attacking-{i}-{j}");
            let constraint = Constraint::new(name, move |row_i: &usize, row_j: &usize| {
                if row_i == row_j {
                    return false;
                }
                (*row_j as isize - *row_i as isize).abs() != col_diff
            });
            csp.add_binary_constraint(ids[i], constraint, ids[j], false).unwrap();
        }
    }
    csp
}

pub fn print_queens_board(csp: &Csp<usize>, size: usize, assignment: Option<&Assignment<usize>>) {
    println!("{size}x{size} Queens Problem:");

    print!("  ");
    for col in 0..size {
        print!(" {col} ");
    }
    println!();
    print!("  +");
    for _ in 0..size {
        print!("---+");
    }
    println!();

    for row in 0..size {
        print!("{row} |");
        for col in 0..size {
            let has_queen = assignment.is_some_and(|assignment| {
                csp.get_variable(&format!("Q{col}"))
                    .and_then(|var| assignment.get(var.id()))
                    .is_some_and(|r| *r == row)
            });
            print!("{}", if has_queen { " Q |" } else { "   |" });
        }
        println!();
        print!("  +");
        for _ in 0..size {
            print!("---+");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::backtrack;

    #[test]
    fn eight_queens_has_a_solution() {
        let mut csp = create_queens_csp(8);
        let solution = backtrack(&mut csp);
        assert!(!solution.is_null());
    }

    #[test]
    fn two_queens_is_unsatisfiable() {
        let mut csp = create_queens_csp(2);
        let solution = backtrack(&mut csp);
        assert!(solution.is_null());
    }
}
