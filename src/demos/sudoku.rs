use crate::csp::{different, Assignment, Csp, VariableId};

/// 4x4 Sudoku: values 1-4, `different` across each row, column, and
/// 2x2 box.
pub fn create_sudoku_csp(initial_values: &[(usize, usize, usize)]) -> Csp<usize> {
    let mut csp = Csp::new();
    let mut ids: Vec<Vec<VariableId>> = Vec::with_capacity(4);

    for row in 0..4 {
        let mut row_ids = Vec::with_capacity(4);
        for col in 0..4 {
            let name = format!("C{row}{col}");
            let fixed = initial_values.iter().find(|&&(r, c, _)| r == row && c == col);
            let var = match fixed {
                Some(&(_, _, value)) => crate::csp::Variable::new(name, [value]),
                None => crate::csp::Variable::new(name, [1, 2, 3, 4]),
            };
            row_ids.push(var.id());
            csp.add_variable(var);
        }
        ids.push(row_ids);
    }

    for (row, row_ids) in ids.iter().enumerate() {
        add_different_among(&mut csp, &format!("row{row}"), row_ids);
    }
    for col in 0..4 {
        let members: Vec<_> = (0..4).map(|row| ids[row][col]).collect();
        add_different_among(&mut csp, &format!("col{col}"), &members);
    }
    for box_row in 0..2 {
        for box_col in 0..2 {
            let members: Vec<_> = (0..2)
                .flat_map(|r| (0..2).map(move |c| (box_row * 2 + r, box_col * 2 + c)))
                .map(|(row, col)| ids[row][col])
                .collect();
            add_different_among(&mut csp, &format!("box{box_row}{box_col}"), &members);
        }
    }
    csp
}

fn add_different_among(csp: &mut Csp<usize>, group: &str, members: &[VariableId]) {
    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            let name = format!("{group}-{i}-{j}");
            csp.add_binary_constraint(members[i], different(name), members[j], false).unwrap();
        }
    }
}

pub fn print_sudoku_board(csp: &Csp<usize>, assignment: Option<&Assignment<usize>>) {
    println!("4x4 Sudoku:");
    println!("+-----------+");
    for row in 0..4 {
        print!("|");
        for col in 0..4 {
            let value = assignment
                .and_then(|assignment| {
                    csp.get_variable(&format!("C{row}{col}"))
                        .and_then(|var| assignment.get(var.id()))
                })
                .map(|v| v.to_string())
                .unwrap_or_else(|| " ".to_string());
            print!(" {value}");
            if col % 2 == 1 {
                print!(" |");
            }
        }
        println!();
        if row % 2 == 1 {
            println!("+-----------+");
        }
    }
}

pub fn create_sample_sudoku() -> Csp<usize> {
    let initial_values = [(0, 0, 1), (0, 3, 4), (1, 2, 3), (2, 1, 1), (3, 0, 4), (3, 3, 2)];
    create_sudoku_csp(&initial_values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::backtrack;

    #[test]
    fn sample_sudoku_is_solvable() {
        let mut csp = create_sample_sudoku();
        let solution = backtrack(&mut csp);
        assert!(!solution.is_null());
    }
}
