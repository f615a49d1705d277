//! This module defines the constraints of the Binairo puzzle, that is, the
//! three rules every completed grid has to satisfy.
//!
//! Besides the definition of the [Constraint](trait.Constraint.html) trait,
//! this module contains one struct per rule as well as
//! [DefaultConstraint](struct.DefaultConstraint.html), which is their
//! conjunction and defines the full rule set.
//!
//! # The three rules
//!
//! * [TripletConstraint]: no three equal digits are consecutive in any row or
//! column.
//! * [BalanceConstraint]: no row or column holds more 0s or more 1s than half
//! its length, and a completed row or column holds exactly as many 0s as 1s.
//! * [UniquenessConstraint]: no two completed rows are identical, and no two
//! completed columns are identical.
//!
//! All three are usable both as global checks on an entire grid and as local
//! checks around a single cell, the latter being the form the solvers use
//! after every tentative assignment.
//!
//! ```
//! use binairo::BinairoGrid;
//! use binairo::constraint::{Constraint, TripletConstraint};
//!
//! let grid = BinairoGrid::parse("6\n\
//!     0 0 0 . . .\n\
//!     . . . . . .\n\
//!     . . . . . .\n\
//!     . . . . . .\n\
//!     . . . . . .\n\
//!     . . . . . .").unwrap();
//! assert!(!TripletConstraint.check(&grid));
//! ```
//!
//! # Pruning predicates
//!
//! [is_consistent_at] is the predicate every search strategy calls after a
//! tentative assignment: it combines the local triplet check with the balance
//! of the affected row and column. Uniqueness is deliberately not part of it,
//! since it only activates on completed lines and is covered by the final
//! [is_valid] check. Once `is_consistent_at` fails for a cell, it keeps
//! failing no matter which digits are filled into other cells, so search
//! branches can be cut without losing solutions.
//!
//! [possible_values] and [degree] are the domain and degree oracles used by
//! the heuristics and the propagation-based solvers.

use crate::{Bit, BinairoGrid};
use crate::util::ValueSet;

/// A constraint defines some property on a Binairo grid. The three rules of
/// the puzzle are each expressed as one implementor, and
/// [DefaultConstraint] combines them.
///
/// Implementors provide `check_cell`, which verifies the constraint as far as
/// the cell at a given position is concerned. `check` verifies the entire
/// grid and is default-implemented by checking every cell, however most
/// constraints provide a specialized implementation that avoids redundant
/// work.
pub trait Constraint {

    /// Checks whether the given [BinairoGrid](../struct.BinairoGrid.html)
    /// matches this constraint, that is, every cell matches this constraint.
    /// By default, this runs `check_cell` on every cell of the grid, which
    /// may be inefficient, so custom implementations may be advantageous.
    fn check(&self, grid: &BinairoGrid) -> bool {
        let size = grid.size();

        for row in 0..size {
            for column in 0..size {
                if !self.check_cell(grid, row, column) {
                    return false;
                }
            }
        }

        true
    }

    /// Checks whether the cell at the given position in the
    /// [BinairoGrid](../struct.BinairoGrid.html) fulfills the constraint. An
    /// empty cell never violates a constraint, so this function returns
    /// `true` for empty cells.
    fn check_cell(&self, grid: &BinairoGrid, row: usize, column: usize)
        -> bool;
}

/// A `Constraint` which requires that no three equal digits are consecutive
/// in any row or column.
#[derive(Clone)]
pub struct TripletConstraint;

impl Constraint for TripletConstraint {
    fn check(&self, grid: &BinairoGrid) -> bool {
        let size = grid.size();

        // every window of length 3, horizontal and vertical
        for row in 0..size {
            for column in 0..size - 2 {
                let first = grid.get_cell(row, column).unwrap();

                if first.is_some()
                        && first == grid.get_cell(row, column + 1).unwrap()
                        && first == grid.get_cell(row, column + 2).unwrap() {
                    return false;
                }
            }
        }

        for column in 0..size {
            for row in 0..size - 2 {
                let first = grid.get_cell(row, column).unwrap();

                if first.is_some()
                        && first == grid.get_cell(row + 1, column).unwrap()
                        && first == grid.get_cell(row + 2, column).unwrap() {
                    return false;
                }
            }
        }

        true
    }

    fn check_cell(&self, grid: &BinairoGrid, row: usize, column: usize)
            -> bool {
        let bit = match grid.get_cell(row, column).unwrap() {
            Some(bit) => bit,
            None => return true
        };
        let size = grid.size();

        // the three horizontal windows containing (row, column)

        if column >= 2 && grid.has_bit(row, column - 1, bit).unwrap()
                && grid.has_bit(row, column - 2, bit).unwrap() {
            return false;
        }

        if column >= 1 && column + 1 < size
                && grid.has_bit(row, column - 1, bit).unwrap()
                && grid.has_bit(row, column + 1, bit).unwrap() {
            return false;
        }

        if column + 2 < size && grid.has_bit(row, column + 1, bit).unwrap()
                && grid.has_bit(row, column + 2, bit).unwrap() {
            return false;
        }

        // the three vertical windows

        if row >= 2 && grid.has_bit(row - 1, column, bit).unwrap()
                && grid.has_bit(row - 2, column, bit).unwrap() {
            return false;
        }

        if row >= 1 && row + 1 < size
                && grid.has_bit(row - 1, column, bit).unwrap()
                && grid.has_bit(row + 1, column, bit).unwrap() {
            return false;
        }

        if row + 2 < size && grid.has_bit(row + 1, column, bit).unwrap()
                && grid.has_bit(row + 2, column, bit).unwrap() {
            return false;
        }

        true
    }
}

/// Indicates whether a single row or column satisfies the balance rule. For
/// a partially filled line this is the case as long as neither digit occurs
/// more than ⌈len/2⌉ times. A completely filled line of even length must
/// contain exactly as many 0s as 1s; for odd lengths, which can occur when
/// the predicate is reused on slices, the counts may differ by at most one.
pub fn balanced(line: &[Option<Bit>]) -> bool {
    let size = line.len();
    let mut zeros = 0;
    let mut ones = 0;
    let mut empty = 0;

    for cell in line {
        match cell {
            Some(Bit::Zero) => zeros += 1,
            Some(Bit::One) => ones += 1,
            None => empty += 1
        }
    }

    let max_allowed = (size + 1) / 2;

    if zeros > max_allowed || ones > max_allowed {
        return false;
    }

    if empty == 0 {
        if size % 2 == 0 {
            zeros == size / 2 && ones == size / 2
        }
        else {
            let diff = if zeros > ones { zeros - ones } else { ones - zeros };
            diff <= 1
        }
    }
    else {
        true
    }
}

/// A `Constraint` which requires every row and every column to be
/// [balanced].
#[derive(Clone)]
pub struct BalanceConstraint;

impl Constraint for BalanceConstraint {
    fn check(&self, grid: &BinairoGrid) -> bool {
        let size = grid.size();

        (0..size).all(|row| balanced(&grid.row(row).unwrap()))
            && (0..size).all(|column| balanced(&grid.column(column).unwrap()))
    }

    fn check_cell(&self, grid: &BinairoGrid, row: usize, column: usize)
            -> bool {
        balanced(&grid.row(row).unwrap())
            && balanced(&grid.column(column).unwrap())
    }
}

fn complete(line: &[Option<Bit>]) -> bool {
    line.iter().all(|cell| cell.is_some())
}

// Conservative comparison: an empty position matches anything, so no
// violation is ever reported that further digits could still avert.
fn lines_match(line_1: &[Option<Bit>], line_2: &[Option<Bit>]) -> bool {
    line_1.iter()
        .zip(line_2.iter())
        .all(|cells| match cells {
            (Some(bit_1), Some(bit_2)) => bit_1 == bit_2,
            _ => true
        })
}

fn unique_lines(lines: &[Vec<Option<Bit>>]) -> bool {
    for (i, line_1) in lines.iter().enumerate() {
        if !complete(line_1) {
            continue;
        }

        for line_2 in lines.iter().skip(i + 1) {
            if complete(line_2) && lines_match(line_1, line_2) {
                return false;
            }
        }
    }

    true
}

/// A `Constraint` which requires that no two rows and no two columns are
/// identical. Only completely filled lines are compared; a line containing
/// any empty cell can never participate in a violation.
#[derive(Clone)]
pub struct UniquenessConstraint;

fn rows(grid: &BinairoGrid) -> Vec<Vec<Option<Bit>>> {
    (0..grid.size()).map(|row| grid.row(row).unwrap()).collect()
}

fn columns(grid: &BinairoGrid) -> Vec<Vec<Option<Bit>>> {
    (0..grid.size()).map(|column| grid.column(column).unwrap()).collect()
}

/// Indicates whether all completely filled rows of the grid are pairwise
/// distinct. Rows containing empty cells are skipped.
pub fn unique_rows(grid: &BinairoGrid) -> bool {
    unique_lines(&rows(grid))
}

/// Indicates whether all completely filled columns of the grid are pairwise
/// distinct. Columns containing empty cells are skipped.
pub fn unique_columns(grid: &BinairoGrid) -> bool {
    unique_lines(&columns(grid))
}

impl Constraint for UniquenessConstraint {
    fn check(&self, grid: &BinairoGrid) -> bool {
        unique_rows(grid) && unique_columns(grid)
    }

    fn check_cell(&self, grid: &BinairoGrid, row: usize, column: usize)
            -> bool {
        let size = grid.size();
        let this_row = grid.row(row).unwrap();

        if complete(&this_row) {
            for other in 0..size {
                if other == row {
                    continue;
                }

                let other_row = grid.row(other).unwrap();

                if complete(&other_row) && lines_match(&this_row, &other_row) {
                    return false;
                }
            }
        }

        let this_column = grid.column(column).unwrap();

        if complete(&this_column) {
            for other in 0..size {
                if other == column {
                    continue;
                }

                let other_column = grid.column(other).unwrap();

                if complete(&other_column)
                        && lines_match(&this_column, &other_column) {
                    return false;
                }
            }
        }

        true
    }
}

/// The default Binairo `Constraint` which is a logical conjunction of
/// [TripletConstraint], [BalanceConstraint], and [UniquenessConstraint].
#[derive(Clone)]
pub struct DefaultConstraint;

impl Constraint for DefaultConstraint {
    fn check(&self, grid: &BinairoGrid) -> bool {
        TripletConstraint.check(grid)
            && BalanceConstraint.check(grid)
            && UniquenessConstraint.check(grid)
    }

    fn check_cell(&self, grid: &BinairoGrid, row: usize, column: usize)
            -> bool {
        TripletConstraint.check_cell(grid, row, column)
            && BalanceConstraint.check_cell(grid, row, column)
            && UniquenessConstraint.check_cell(grid, row, column)
    }
}

/// Checks whether the cell at the given position is consistent with the
/// pruning constraints, i.e. it participates in no triplet and its row and
/// column are balanced. This is the predicate every search strategy calls
/// after a tentative assignment. Uniqueness is not included; it only
/// activates on completed lines and is enforced by [is_valid] on the full
/// grid.
pub fn is_consistent_at(grid: &BinairoGrid, row: usize, column: usize)
        -> bool {
    TripletConstraint.check_cell(grid, row, column)
        && BalanceConstraint.check_cell(grid, row, column)
}

/// Checks whether the entire grid satisfies all three Binairo rules. Empty
/// cells do not cause violations, so a partially filled grid can be valid.
pub fn is_valid(grid: &BinairoGrid) -> bool {
    DefaultConstraint.check(grid)
}

/// Checks whether the grid is a solution, i.e. completely filled and
/// [is_valid].
pub fn is_solution(grid: &BinairoGrid) -> bool {
    grid.is_full() && is_valid(grid)
}

/// Computes the domain of the empty cell at the given position: the set of
/// digits whose placement would keep [is_consistent_at] satisfied. Each digit
/// is tried by temporary placement; the grid is left exactly as it was found.
/// For a filled cell, the returned set is empty.
pub fn possible_values(grid: &mut BinairoGrid, row: usize, column: usize)
        -> ValueSet {
    let mut possible = ValueSet::EMPTY;

    if !grid.is_cell_empty(row, column).unwrap() {
        return possible;
    }

    for bit in ValueSet::ALL {
        grid.set_cell(row, column, bit).unwrap();

        if is_consistent_at(grid, row, column) {
            possible.insert(bit);
        }
    }

    grid.clear_cell(row, column).unwrap();
    possible
}

/// Counts the empty cells which share a row or column with the given cell,
/// excluding the cell itself. This is the number of unassigned variables a
/// placement at this cell constrains, used by the degree heuristic.
pub fn degree(grid: &BinairoGrid, row: usize, column: usize) -> usize {
    let size = grid.size();
    let mut degree = 0;

    for c in 0..size {
        if c != column && grid.is_cell_empty(row, c).unwrap() {
            degree += 1;
        }
    }

    for r in 0..size {
        if r != row && grid.is_cell_empty(r, column).unwrap() {
            degree += 1;
        }
    }

    degree
}

#[cfg(test)]
mod tests {

    use super::*;

    fn grid_6x6_triplet() -> BinairoGrid {
        BinairoGrid::parse("6\n\
            0 0 0 . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .").unwrap()
    }

    #[test]
    fn triplet_detected_locally_and_globally() {
        let grid = grid_6x6_triplet();

        assert!(!TripletConstraint.check_cell(&grid, 0, 2));
        assert!(!TripletConstraint.check_cell(&grid, 0, 1));
        assert!(!TripletConstraint.check_cell(&grid, 0, 0));
        assert!(!TripletConstraint.check(&grid));

        // cells outside the triplet are fine
        assert!(TripletConstraint.check_cell(&grid, 0, 3));
        assert!(TripletConstraint.check_cell(&grid, 1, 0));
    }

    #[test]
    fn vertical_triplet_detected() {
        let grid = BinairoGrid::parse("4\n\
            . 1 . .\n\
            . 1 . .\n\
            . 1 . .\n\
            . . . .").unwrap();

        assert!(!TripletConstraint.check_cell(&grid, 1, 1));
        assert!(!TripletConstraint.check(&grid));
    }

    #[test]
    fn pair_is_no_triplet() {
        let grid = BinairoGrid::parse("4\n\
            0 0 1 .\n\
            . . . .\n\
            . . . .\n\
            . . . .").unwrap();

        assert!(TripletConstraint.check(&grid));
        assert!(TripletConstraint.check_cell(&grid, 0, 1));
    }

    #[test]
    fn balance_violated_by_full_line_of_zeros() {
        let grid = BinairoGrid::parse("4\n\
            0 0 0 0\n\
            . . . .\n\
            . . . .\n\
            . . . .").unwrap();

        assert!(!balanced(&grid.row(0).unwrap()));
        assert!(!BalanceConstraint.check_cell(&grid, 0, 0));
        assert!(!BalanceConstraint.check(&grid));
    }

    #[test]
    fn balance_violated_by_excess_before_completion() {
        // three 1s in a row of four already exceed the maximum of two
        let grid = BinairoGrid::parse("4\n\
            1 1 . 1\n\
            . . . .\n\
            . . . .\n\
            . . . .").unwrap();

        assert!(!balanced(&grid.row(0).unwrap()));
        assert!(balanced(&grid.column(0).unwrap()));
    }

    #[test]
    fn balance_accepts_partial_and_even_lines() {
        assert!(balanced(&[Some(Bit::Zero), None, Some(Bit::One), None]));
        assert!(balanced(&[
            Some(Bit::Zero), Some(Bit::One), Some(Bit::One), Some(Bit::Zero)
        ]));
        assert!(!balanced(&[
            Some(Bit::Zero), Some(Bit::One), Some(Bit::Zero), Some(Bit::Zero)
        ]));
    }

    #[test]
    fn balance_on_odd_slices() {
        // reused on odd-length slices, a difference of one is acceptable
        assert!(balanced(&[Some(Bit::Zero), Some(Bit::One), Some(Bit::Zero)]));
        assert!(!balanced(&[
            Some(Bit::Zero), Some(Bit::Zero), Some(Bit::Zero)
        ]));
    }

    #[test]
    fn duplicate_rows_detected() {
        let grid = BinairoGrid::parse("4\n\
            0 1 0 1\n\
            0 1 0 1\n\
            . . . .\n\
            . . . .").unwrap();

        assert!(!UniquenessConstraint.check(&grid));
        assert!(!UniquenessConstraint.check_cell(&grid, 0, 0));
        assert!(!UniquenessConstraint.check_cell(&grid, 1, 3));
    }

    #[test]
    fn duplicate_columns_detected() {
        let grid = BinairoGrid::parse("4\n\
            0 0 . .\n\
            1 1 . .\n\
            0 0 . .\n\
            1 1 . .").unwrap();

        assert!(!UniquenessConstraint.check(&grid));
        assert!(!UniquenessConstraint.check_cell(&grid, 2, 1));
    }

    #[test]
    fn incomplete_lines_never_violate_uniqueness() {
        let grid = BinairoGrid::parse("4\n\
            0 1 0 1\n\
            0 1 0 .\n\
            . . . .\n\
            . . . .").unwrap();

        assert!(UniquenessConstraint.check(&grid));
        assert!(UniquenessConstraint.check_cell(&grid, 0, 0));
    }

    #[test]
    fn default_constraint_on_valid_solution() {
        let grid = BinairoGrid::parse("4\n\
            0 1 0 1\n\
            1 0 1 0\n\
            0 1 1 0\n\
            1 0 0 1").unwrap();

        assert!(DefaultConstraint.check(&grid));
        assert!(is_valid(&grid));
        assert!(is_solution(&grid));
    }

    #[test]
    fn full_but_invalid_grid_is_no_solution() {
        // rows 0 and 2 are identical
        let grid = BinairoGrid::parse("4\n\
            0 1 0 1\n\
            1 0 1 0\n\
            0 1 0 1\n\
            1 0 1 0").unwrap();

        assert!(grid.is_full());
        assert!(!is_valid(&grid));
        assert!(!is_solution(&grid));
    }

    #[test]
    fn partial_valid_grid_is_no_solution() {
        let grid = BinairoGrid::parse("4\n\
            0 . 1 .\n\
            . 1 . .\n\
            . . . 0\n\
            . . . .").unwrap();

        assert!(is_valid(&grid));
        assert!(!is_solution(&grid));
    }

    #[test]
    fn possible_values_forced_by_triplet() {
        let mut grid = BinairoGrid::parse("4\n\
            1 1 . .\n\
            . . . .\n\
            . . . .\n\
            . . . .").unwrap();

        let possible = possible_values(&mut grid, 0, 2);

        assert_eq!(Some(Bit::Zero), possible.unique());
    }

    #[test]
    fn possible_values_empty_for_dead_cell() {
        // a 0 completes the triplet on the left, a 1 the one on the right
        let mut grid = BinairoGrid::parse("6\n\
            0 0 . 1 1 .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .").unwrap();

        let possible = possible_values(&mut grid, 0, 2);

        assert!(possible.is_empty());
    }

    #[test]
    fn possible_values_restores_grid() {
        let original = BinairoGrid::parse("4\n\
            1 1 . .\n\
            . . . .\n\
            . . . .\n\
            . . . .").unwrap();
        let mut grid = original.clone();

        possible_values(&mut grid, 0, 2);
        possible_values(&mut grid, 3, 3);

        assert_eq!(original, grid);
    }

    #[test]
    fn possible_values_of_filled_cell_is_empty() {
        let mut grid = BinairoGrid::parse("4\n\
            1 . . .\n\
            . . . .\n\
            . . . .\n\
            . . . .").unwrap();

        assert!(possible_values(&mut grid, 0, 0).is_empty());
    }

    #[test]
    fn degree_counts_empty_line_neighbours() {
        let grid = BinairoGrid::parse("4\n\
            0 . 1 .\n\
            . 1 . .\n\
            . . . 0\n\
            . . . .").unwrap();

        // one empty cell remains in row 0, two in column 1
        assert_eq!(3, degree(&grid, 0, 1));
        // the cell itself being filled does not matter for the count
        assert_eq!(5, degree(&grid, 3, 3));
    }

    #[test]
    fn inconsistency_is_permanent() {
        let mut grid = BinairoGrid::parse("4\n\
            1 1 1 .\n\
            . . . .\n\
            . . . .\n\
            . . . .").unwrap();

        assert!(!is_consistent_at(&grid, 0, 1));

        // filling further cells must not cure the violation
        grid.set_cell(0, 3, Bit::Zero).unwrap();
        grid.set_cell(1, 1, Bit::Zero).unwrap();
        assert!(!is_consistent_at(&grid, 0, 1));
    }
}
