use std::collections::HashSet;

use csp_engine::csp::{different, equals, Csp, Variable};
use csp_engine::demos::australia;
use csp_engine::solver::{ac3, all_solutions, backtrack, cutset_solve, mac, select_unassigned_variable, tree_solver};

fn square_equals_csp() -> Csp<i32> {
    let mut csp = Csp::new();
    let a = Variable::new("a", 1..10);
    let b = Variable::new("b", 1..10);
    let (a_id, b_id) = (a.id(), b.id());
    csp.add_variable(a);
    csp.add_variable(b);
    let square = csp_engine::Constraint::new("a^2==b", |a: &i32, b: &i32| a * a == *b);
    csp.add_binary_constraint(a_id, square, b_id, false).unwrap();
    csp
}

/// 1. Soundness: any non-null solution binds every variable and is
/// consistent.
#[test]
fn soundness_of_backtrack_on_australia() {
    let mut csp = australia::create_australia_csp();
    let solution = backtrack(&mut csp);
    assert!(!solution.is_null());
    assert!(csp.assignment_consistency(&solution));
    assert_eq!(solution.len(), csp.num_variables());
}

/// 2. Completeness: backtrack and the all_solutions oracle agree on
/// satisfiability.
#[test]
fn completeness_backtrack_agrees_with_all_solutions() {
    let mut satisfiable = square_equals_csp();
    let mut oracle_copy = square_equals_csp();
    let backtrack_result = backtrack(&mut satisfiable);
    let oracle_result = all_solutions(&mut oracle_copy, None);
    assert_eq!(backtrack_result.is_null(), oracle_result.is_empty());

    let build_unsat = || {
        let mut csp = Csp::new();
        let u = Variable::new("u", [1]);
        let v = Variable::new("v", [1]);
        let (u_id, v_id) = (u.id(), v.id());
        csp.add_variable(u);
        csp.add_variable(v);
        csp.add_binary_constraint(u_id, different("uv"), v_id, false).unwrap();
        csp
    };
    let mut unsat = build_unsat();
    let mut unsat_oracle = build_unsat();
    assert!(backtrack(&mut unsat).is_null());
    assert!(all_solutions(&mut unsat_oracle, None).is_empty());
}

/// 3. AC-3 preserves solutions: the complete consistent assignments
/// before and after running AC-3 are identical.
#[test]
fn ac3_preserves_the_solution_set() {
    let mut before = square_equals_csp();
    let solutions_before = all_solutions(&mut before, None);

    let mut after = square_equals_csp();
    ac3(&mut after);
    let solutions_after = all_solutions(&mut after, None);

    let set = |v: &[csp_engine::Assignment<i32>], a_id, b_id| -> HashSet<(i32, i32)> {
        v.iter().map(|s| (*s.get(a_id).unwrap(), *s.get(b_id).unwrap())).collect()
    };
    let a_id = before.get_variable("a").unwrap().id();
    let b_id = before.get_variable("b").unwrap().id();
    assert_eq!(set(&solutions_before, a_id, b_id), set(&solutions_after, a_id, b_id));
}

/// 4. MAC non-destructiveness: a variable's actual domain is unchanged
/// by MAC; only the assignment's inferences may have grown.
#[test]
fn mac_never_mutates_variable_domains() {
    let mut csp = Csp::new();
    let a = Variable::new("a", [1, 2]);
    let b = Variable::new("b", [1, 2]);
    let (a_id, b_id) = (a.id(), b.id());
    csp.add_variable(a);
    csp.add_variable(b);
    csp.add_binary_constraint(a_id, different("ab"), b_id, false).unwrap();

    let before = csp.variable(b_id).unwrap().actual_domain();
    let mut assignment = csp_engine::Assignment::new();
    assignment.assign(csp.variable(a_id).unwrap(), 1).unwrap();
    mac(&csp, &mut assignment, a_id);
    let after = csp.variable(b_id).unwrap().actual_domain();
    assert_eq!(before, after);
    assert!(!assignment.inferences_for(b_id).is_empty());
}

/// 5. Dual symmetry: `c.dual().apply(x, y) == c.apply(y, x)`.
#[test]
fn dual_symmetry_holds_for_a_named_constraint() {
    let c = equals::<i32>("eq");
    for (x, y) in [(1, 1), (1, 2), (3, 3)] {
        assert_eq!(c.dual().apply(&x, &y), c.apply(&y, &x));
    }
}

/// 6. Tree solver is correct on trees: null iff unsatisfiable.
#[test]
fn tree_solver_correctness_on_satisfiable_and_unsatisfiable_trees() {
    let mut satisfiable = Csp::new();
    let a = Variable::new("a", [1, 2, 3]);
    let b = Variable::new("b", [1, 2, 3]);
    let (a_id, b_id) = (a.id(), b.id());
    satisfiable.add_variable(a);
    satisfiable.add_variable(b);
    satisfiable.add_binary_constraint(a_id, csp_engine::csp::lesser("a<b"), b_id, false).unwrap();
    assert!(!tree_solver(&satisfiable).unwrap().is_null());

    let mut unsatisfiable = Csp::new();
    let x = Variable::new("x", [1]);
    let y = Variable::new("y", [1]);
    let (x_id, y_id) = (x.id(), y.id());
    unsatisfiable.add_variable(x);
    unsatisfiable.add_variable(y);
    unsatisfiable.add_binary_constraint(x_id, different("xy"), y_id, false).unwrap();
    assert!(tree_solver(&unsatisfiable).unwrap().is_null());
}

/// 7. Cutset equivalence: cutset and backtrack agree on satisfiability.
#[test]
fn cutset_agrees_with_backtrack_on_satisfiability() {
    let build = || {
        let mut csp = Csp::new();
        let a = Variable::new("a", [1, 2, 3]);
        let b = Variable::new("b", [1, 2, 3]);
        let c = Variable::new("c", [1, 2, 3]);
        let (a_id, b_id, c_id) = (a.id(), b.id(), c.id());
        csp.add_variable(a);
        csp.add_variable(b);
        csp.add_variable(c);
        csp.add_binary_constraint(a_id, different("ab"), b_id, false).unwrap();
        csp.add_binary_constraint(b_id, different("bc"), c_id, false).unwrap();
        csp.add_binary_constraint(c_id, different("ca"), a_id, false).unwrap();
        csp
    };

    let mut for_backtrack = build();
    let for_cutset = build();
    let mut rng = rand::thread_rng();

    let backtrack_result = backtrack(&mut for_backtrack);
    let cutset_result = cutset_solve(&for_cutset, &mut rng);
    assert_eq!(backtrack_result.is_null(), cutset_result.is_null());
    if !cutset_result.is_null() {
        assert!(for_cutset.assignment_consistency(&cutset_result));
    }
}

/// 8. Heuristic stability: on the Australia map after initial AC-3, the
/// first variable MRV+Degree picks is SA (degree 5, tied on domain
/// size with everything else).
#[test]
fn heuristic_stability_picks_sa_first_on_australia() {
    let mut csp = australia::create_australia_csp();
    ac3(&mut csp);
    let sa_id = csp.get_variable("SA").unwrap().id();
    let chosen = select_unassigned_variable(&csp, &csp_engine::Assignment::new()).unwrap();
    assert_eq!(chosen, sa_id);
}
