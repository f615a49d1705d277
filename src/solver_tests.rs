//! Scenarios exercising all six solvers together: they must agree on
//! solvability of every input and every returned completion must be a valid
//! solution extending that input.

use crate::{BinairoGrid, BinairoState};
use crate::constraint;
use crate::generator::Generator;
use crate::solver::{
    Ac3Solver,
    Ac4Solver,
    BacktrackingSolver,
    ForwardCheckingSolver,
    HeuristicSolver,
    MacSolver,
    Solver
};

use rand::SeedableRng;
use rand::rngs::StdRng;

fn all_solvers() -> Vec<Box<dyn Solver>> {
    vec![
        Box::new(BacktrackingSolver::new()),
        Box::new(ForwardCheckingSolver::new()),
        Box::new(Ac3Solver::new()),
        Box::new(Ac4Solver::new()),
        Box::new(HeuristicSolver::new()),
        Box::new(MacSolver::new())
    ]
}

fn assert_all_solve(grid: &BinairoGrid) {
    let state = BinairoState::from_grid(grid);

    for mut solver in all_solvers() {
        let solution = solver.solve_with_timing(&state)
            .unwrap_or_else(|| panic!("{} found no solution", solver.name()));

        assert!(constraint::is_solution(solution.grid()),
            "{} returned an invalid completion", solver.name());
        assert!(grid.is_subset(solution.grid()).unwrap(),
            "{} changed a given clue", solver.name());
        assert!(solver.stats().solution_found);
        assert!(solver.stats().nodes_explored > 0);
    }
}

fn assert_none_solve(grid: &BinairoGrid) {
    let state = BinairoState::from_grid(grid);

    for mut solver in all_solvers() {
        assert!(solver.solve_with_timing(&state).is_none(),
            "{} claimed a solution for an unsolvable grid", solver.name());
        assert!(!solver.stats().solution_found);
    }
}

#[test]
fn all_solvers_complete_the_4x4_stub() {
    let grid = BinairoGrid::parse("4\n\
        0 . 1 .\n\
        . 1 . .\n\
        . . . 0\n\
        . . . .").unwrap();

    assert_all_solve(&grid);
}

#[test]
fn all_solvers_complete_a_6x6_puzzle() {
    let grid = BinairoGrid::parse("6\n\
        . 0 . . . .\n\
        1 . . . 0 .\n\
        . . 1 . . .\n\
        . . . 0 . .\n\
        . 1 . . . .\n\
        . . . . 1 .").unwrap();

    assert_all_solve(&grid);
}

#[test]
fn all_solvers_complete_an_empty_4x4_grid() {
    assert_all_solve(&BinairoGrid::new(4).unwrap());
}

#[test]
fn all_solvers_agree_on_generated_puzzle() {
    let mut generator = Generator::new(StdRng::seed_from_u64(7));
    let puzzle = generator.generate(8, 0.5).unwrap();

    assert_all_solve(&puzzle);
}

#[test]
fn all_solvers_reject_dead_cell_grid() {
    let grid = BinairoGrid::parse("6\n\
        0 0 . 1 1 .\n\
        . . . . . .\n\
        . . . . . .\n\
        . . . . . .\n\
        . . . . . .\n\
        . . . . . .").unwrap();

    assert_none_solve(&grid);
}

#[test]
fn all_solvers_reject_duplicate_rows() {
    let grid = BinairoGrid::parse("4\n\
        0 1 0 1\n\
        0 1 0 1\n\
        . . . .\n\
        . . . .").unwrap();

    assert_none_solve(&grid);
}

#[test]
fn mac_explores_no_more_nodes_than_backtracking() {
    let mut generator = Generator::new(StdRng::seed_from_u64(11));
    let puzzle = generator.generate(10, 0.6).unwrap();
    let state = BinairoState::from_grid(&puzzle);

    let mut backtracking = BacktrackingSolver::new();
    let mut mac = MacSolver::new();

    backtracking.solve_with_timing(&state)
        .expect("backtracking found no solution");
    mac.solve_with_timing(&state).expect("MAC found no solution");

    assert!(mac.stats().nodes_explored
        <= backtracking.stats().nodes_explored,
        "MAC explored {} nodes, backtracking only {}",
        mac.stats().nodes_explored, backtracking.stats().nodes_explored);
}
