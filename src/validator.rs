//! This module contains the validation and hint facilities built on top of
//! the [constraint](crate::constraint) predicates and the
//! [solver](crate::solver)s.
//!
//! A [Validator] answers the questions a front-end typically asks about a
//! grid: does it respect the rules, can it still be completed, which cells
//! participate in a violation, and is there an obvious next move. It is a
//! read-only consumer: no operation modifies the grid it is given.

use crate::{Bit, BinairoGrid, BinairoState};
use crate::constraint::{
    self,
    balanced,
    possible_values,
    BalanceConstraint,
    Constraint,
    TripletConstraint
};
use crate::solver::{HeuristicSolver, Solver};

/// The different ways a cell can participate in a rule violation, as
/// reported by [Validator::find_violations].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ViolationKind {

    /// The cell is part of three equal digits next to each other in its row.
    HorizontalTriplet,

    /// The cell is part of three equal digits on top of each other in its
    /// column.
    VerticalTriplet,

    /// The cell is filled and its row violates the balance rule.
    UnbalancedRow,

    /// The cell is filled and its column violates the balance rule.
    UnbalancedColumn
}

/// A single cell-level rule violation, locating one cell that participates
/// in a broken rule. Intended for display by an external front-end.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Violation {

    /// The row of the violating cell.
    pub row: usize,

    /// The column of the violating cell.
    pub column: usize,

    /// The way the cell participates in a violation.
    pub kind: ViolationKind
}

/// The answer of [Validator::suggest_value] for a single cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Hint {

    /// Exactly one digit is consistent for the cell, so it is forced.
    Forced(Bit),

    /// The cell is filled, has both digits available, or has none, so no
    /// single digit can be suggested.
    Ambiguous
}

/// The structured result of [Validator::validate].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationReport {

    /// Whether the grid respects all three rules in its current state.
    pub constraints_valid: bool,

    /// Whether the solver found a completion. Always `false` when the
    /// constraints are already violated; solving is not even attempted then.
    pub solvable: bool,

    /// The completion found by the solver, if any.
    pub solution: Option<BinairoGrid>,

    /// Human-readable descriptions of the violated rules, empty if the grid
    /// is fine.
    pub violations: Vec<String>
}

impl ValidationReport {

    /// Indicates whether the grid passed the validation entirely, i.e. it
    /// respects the rules and has at least one completion.
    pub fn is_ok(&self) -> bool {
        self.constraints_valid && self.solvable
    }
}

/// A validator inspects Binairo grids using the rule predicates and a
/// [Solver] for solvability questions. The solver also defines how expensive
/// [Validator::validate] and [Validator::is_solvable] are;
/// [Validator::new_default] picks the [HeuristicSolver].
pub struct Validator<S: Solver> {
    solver: S
}

impl Validator<HeuristicSolver> {

    /// Creates a new validator that answers solvability questions with a
    /// [HeuristicSolver].
    pub fn new_default() -> Validator<HeuristicSolver> {
        Validator::new(HeuristicSolver::new())
    }
}

impl<S: Solver> Validator<S> {

    /// Creates a new validator that answers solvability questions with the
    /// given solver.
    pub fn new(solver: S) -> Validator<S> {
        Validator {
            solver
        }
    }

    /// Indicates whether the grid respects all three rules in its current,
    /// possibly partial state. Equivalent to
    /// [is_valid](crate::constraint::is_valid).
    pub fn is_valid(&self, grid: &BinairoGrid) -> bool {
        constraint::is_valid(grid)
    }

    /// Indicates whether the grid has at least one completion satisfying all
    /// rules, determined by running this validator's solver.
    pub fn is_solvable(&mut self, grid: &BinairoGrid) -> bool {
        self.solver.solve(&BinairoState::from_grid(grid))
            .map_or(false, |solution| solution.is_solved())
    }

    /// Validates the grid: checks all three rules, enumerates the violated
    /// ones in message form, and, if the rules hold, searches for a
    /// completion. See [ValidationReport] for the exact contents of the
    /// result.
    pub fn validate(&mut self, grid: &BinairoGrid) -> ValidationReport {
        let mut violations = Vec::new();

        if !TripletConstraint.check(grid) {
            violations.push(String::from(
                "three equal digits are consecutive in a row or column"));
        }

        if !BalanceConstraint.check(grid) {
            violations.push(String::from(
                "the digits of a row or column are out of balance"));
        }

        if !constraint::unique_rows(grid) {
            violations.push(String::from("two rows are identical"));
        }

        if !constraint::unique_columns(grid) {
            violations.push(String::from("two columns are identical"));
        }

        let constraints_valid = violations.is_empty();

        if !constraints_valid {
            return ValidationReport {
                constraints_valid,
                solvable: false,
                solution: None,
                violations
            };
        }

        let solution = self.solver.solve(&BinairoState::from_grid(grid))
            .filter(BinairoState::is_solved)
            .map(|solution| solution.grid().clone());

        ValidationReport {
            constraints_valid,
            solvable: solution.is_some(),
            solution,
            violations
        }
    }

    /// Lists every cell participating in a rule violation: all three cells
    /// of every triplet and every filled cell of every unbalanced row or
    /// column. Cells may be reported several times if they participate in
    /// several violations.
    pub fn find_violations(&self, grid: &BinairoGrid) -> Vec<Violation> {
        let size = grid.size();
        let mut violations = Vec::new();

        for row in 0..size {
            for column in 0..size - 2 {
                let first = grid.get_cell(row, column).unwrap();

                if first.is_some()
                        && first == grid.get_cell(row, column + 1).unwrap()
                        && first == grid.get_cell(row, column + 2).unwrap() {
                    for offset in 0..3 {
                        violations.push(Violation {
                            row,
                            column: column + offset,
                            kind: ViolationKind::HorizontalTriplet
                        });
                    }
                }
            }
        }

        for column in 0..size {
            for row in 0..size - 2 {
                let first = grid.get_cell(row, column).unwrap();

                if first.is_some()
                        && first == grid.get_cell(row + 1, column).unwrap()
                        && first == grid.get_cell(row + 2, column).unwrap() {
                    for offset in 0..3 {
                        violations.push(Violation {
                            row: row + offset,
                            column,
                            kind: ViolationKind::VerticalTriplet
                        });
                    }
                }
            }
        }

        for row in 0..size {
            if !balanced(&grid.row(row).unwrap()) {
                for column in 0..size {
                    if !grid.is_cell_empty(row, column).unwrap() {
                        violations.push(Violation {
                            row,
                            column,
                            kind: ViolationKind::UnbalancedRow
                        });
                    }
                }
            }
        }

        for column in 0..size {
            if !balanced(&grid.column(column).unwrap()) {
                for row in 0..size {
                    if !grid.is_cell_empty(row, column).unwrap() {
                        violations.push(Violation {
                            row,
                            column,
                            kind: ViolationKind::UnbalancedColumn
                        });
                    }
                }
            }
        }

        violations
    }

    /// Suggests a digit for the cell at the given position:
    /// [Hint::Forced] if exactly one digit is consistent there, and
    /// [Hint::Ambiguous] for filled cells and cells with zero or two
    /// consistent digits.
    pub fn suggest_value(&self, grid: &BinairoGrid, row: usize,
            column: usize) -> Hint {
        let mut grid = grid.clone();

        if !grid.is_cell_empty(row, column).unwrap() {
            return Hint::Ambiguous;
        }

        match possible_values(&mut grid, row, column).unique() {
            Some(bit) => Hint::Forced(bit),
            None => Hint::Ambiguous
        }
    }

    /// Finds the first empty cell, in row-major order, whose domain is a
    /// singleton, together with its forced digit. `None` if no empty cell is
    /// forced.
    pub fn find_obvious_move(&self, grid: &BinairoGrid)
            -> Option<(usize, usize, Bit)> {
        let size = grid.size();
        let mut grid = grid.clone();

        for row in 0..size {
            for column in 0..size {
                if !grid.is_cell_empty(row, column).unwrap() {
                    continue;
                }

                if let Some(bit) =
                        possible_values(&mut grid, row, column).unique() {
                    return Some((row, column, bit));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn stub_4x4() -> BinairoGrid {
        BinairoGrid::parse("4\n\
            0 . 1 .\n\
            . 1 . .\n\
            . . . 0\n\
            . . . .").unwrap()
    }

    #[test]
    fn valid_solvable_grid_passes() {
        let grid = stub_4x4();
        let mut validator = Validator::new_default();

        let report = validator.validate(&grid);

        assert!(report.is_ok());
        assert!(report.constraints_valid);
        assert!(report.solvable);
        assert!(report.violations.is_empty());

        let solution = report.solution.expect("report without solution");
        assert!(constraint::is_solution(&solution));
        assert!(grid.is_subset(&solution).unwrap());
    }

    #[test]
    fn triplet_reported() {
        let grid = BinairoGrid::parse("6\n\
            0 0 0 . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .").unwrap();
        let mut validator = Validator::new_default();

        let report = validator.validate(&grid);

        assert!(!report.is_ok());
        assert!(!report.constraints_valid);
        assert!(!report.solvable);
        assert_eq!(None, report.solution);
        assert_eq!(1, report.violations.len());
        assert!(report.violations[0].contains("three equal digits"));
    }

    #[test]
    fn all_violation_messages_collected() {
        // a full row of 0s breaks the triplet and the balance rule at once
        let grid = BinairoGrid::parse("4\n\
            0 0 0 0\n\
            . . . .\n\
            . . . .\n\
            . . . .").unwrap();
        let mut validator = Validator::new_default();

        let report = validator.validate(&grid);

        assert_eq!(2, report.violations.len());
    }

    #[test]
    fn duplicate_lines_reported() {
        let grid = BinairoGrid::parse("4\n\
            0 1 0 1\n\
            0 1 0 1\n\
            . . . .\n\
            . . . .").unwrap();
        let mut validator = Validator::new_default();

        let report = validator.validate(&grid);

        assert!(!report.constraints_valid);
        assert_eq!(vec![String::from("two rows are identical")],
            report.violations);
    }

    #[test]
    fn violating_cells_located() {
        let grid = BinairoGrid::parse("6\n\
            0 0 0 . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .").unwrap();
        let validator = Validator::new_default();

        let violations = validator.find_violations(&grid);

        assert_eq!(3, violations.len());

        for column in 0..3 {
            assert!(violations.contains(&Violation {
                row: 0,
                column,
                kind: ViolationKind::HorizontalTriplet
            }));
        }
    }

    #[test]
    fn unbalanced_line_cells_located() {
        // three 1s among four cells of column 1
        let grid = BinairoGrid::parse("4\n\
            . 1 . .\n\
            . 1 . .\n\
            . . . .\n\
            . 1 . .").unwrap();
        let validator = Validator::new_default();

        let violations = validator.find_violations(&grid);

        assert_eq!(3, violations.len());
        assert!(violations.iter().all(|violation|
            violation.column == 1
                && violation.kind == ViolationKind::UnbalancedColumn));
    }

    #[test]
    fn suggest_value_detects_forced_cell() {
        let grid = BinairoGrid::parse("4\n\
            1 1 . .\n\
            . . . .\n\
            . . . .\n\
            . . . .").unwrap();
        let validator = Validator::new_default();

        assert_eq!(Hint::Forced(Bit::Zero),
            validator.suggest_value(&grid, 0, 2));
        assert_eq!(Hint::Ambiguous, validator.suggest_value(&grid, 3, 3));
        // filled cells get no suggestion
        assert_eq!(Hint::Ambiguous, validator.suggest_value(&grid, 0, 0));
    }

    #[test]
    fn obvious_move_skips_ambiguous_cells() {
        let grid = BinairoGrid::parse("6\n\
            . . 1 1 . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .").unwrap();
        let validator = Validator::new_default();

        // (0, 0) is open, but (0, 1) may not complete the triplet
        assert_eq!(Some((0, 1, Bit::Zero)),
            validator.find_obvious_move(&grid));
    }

    #[test]
    fn no_obvious_move_in_open_position() {
        let grid = stub_4x4();
        let validator = Validator::new_default();

        assert_eq!(None, validator.find_obvious_move(&grid));

        // consistently, every empty cell is ambiguous
        for row in 0..4 {
            for column in 0..4 {
                if grid.is_cell_empty(row, column).unwrap() {
                    assert_eq!(Hint::Ambiguous,
                        validator.suggest_value(&grid, row, column));
                }
            }
        }
    }

    #[test]
    fn is_solvable_matches_solver_outcome() {
        let mut validator = Validator::new_default();

        assert!(validator.is_solvable(&stub_4x4()));

        let dead = BinairoGrid::parse("6\n\
            0 0 . 1 1 .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .").unwrap();
        assert!(!validator.is_solvable(&dead));
    }
}
