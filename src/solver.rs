//! This module contains the logic for solving Binairo grids.
//!
//! Most importantly, this module contains the definition of the
//! [Solver](trait.Solver.html) trait and six implementations of increasing
//! sophistication:
//!
//! * [BacktrackingSolver]: plain depth-first search, the reference.
//! * [ForwardCheckingSolver]: fails fast when a neighbour's domain empties.
//! * [Ac3Solver]: AC-3 domain reduction before backtracking.
//! * [Ac4Solver]: AC-4 support counters before backtracking.
//! * [HeuristicSolver]: MRV + degree + LCV + forward checking. The
//! recommended default.
//! * [MacSolver]: maintains arc consistency after every assignment.
//!
//! All six agree on solvability: whenever one of them completes a grid, all
//! of them do, though not necessarily with the same completion if the puzzle
//! has several solutions.
//!
//! Every solver records [SolverStats] which allow comparing the strategies on
//! the same input.

mod ac3;
mod ac4;
mod backtracking;
mod domains;
mod forward_checking;
mod heuristic;
mod mac;

pub use ac3::Ac3Solver;
pub use ac4::Ac4Solver;
pub use backtracking::BacktrackingSolver;
pub use forward_checking::ForwardCheckingSolver;
pub use heuristic::HeuristicSolver;
pub use mac::MacSolver;

use crate::{Bit, BinairoGrid, BinairoState};
use crate::constraint::{self, possible_values};
use crate::util::ValueSet;

use serde::Serialize;

use std::time::{Duration, Instant};

/// Counters and timing recorded during one solver run. The statistics are
/// reset at the start of every [Solver::solve_with_timing] call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SolverStats {

    /// The number of entries into the recursive search step.
    pub nodes_explored: u64,

    /// The number of undone value assignments.
    pub backtrack_count: u64,

    /// The wall-clock duration of the last timed solver run.
    pub solving_time: Duration,

    /// Whether the last timed solver run produced a completed state.
    pub solution_found: bool
}

impl SolverStats {

    /// Resets all counters to their initial values.
    pub fn reset(&mut self) {
        *self = SolverStats::default();
    }
}

/// A trait for structs which have the ability to solve Binairo grids. A
/// solver searches for any completion of the input state that satisfies all
/// three rules. The absence of a solution is an ordinary result, expressed as
/// `None`.
pub trait Solver {

    /// A short human-readable name identifying the strategy.
    fn name(&self) -> &'static str;

    /// Solves, or attempts to solve, the provided state. The input is not
    /// modified; a completed copy is returned on success and `None` if no
    /// completion satisfies the rules. Counters in [Solver::stats] are
    /// incremented but not reset by this method.
    fn solve(&mut self, state: &BinairoState) -> Option<BinairoState>;

    /// Grants read access to the statistics of this solver.
    fn stats(&self) -> &SolverStats;

    /// Grants write access to the statistics of this solver. Mainly intended
    /// for the default implementation of [Solver::solve_with_timing].
    fn stats_mut(&mut self) -> &mut SolverStats;

    /// Solves the provided state while recording statistics: all counters are
    /// reset, the wall-clock time of the [Solver::solve] call is measured,
    /// and `solution_found` is set according to the outcome.
    fn solve_with_timing(&mut self, state: &BinairoState)
            -> Option<BinairoState> {
        self.stats_mut().reset();

        let start = Instant::now();
        let solution = self.solve(state);
        let stats = self.stats_mut();

        stats.solving_time = start.elapsed();
        stats.solution_found =
            solution.as_ref().map_or(false, BinairoState::is_solved);

        solution
    }
}

/// Finds the lexicographically first empty cell of the grid in row-major
/// order, or `None` if the grid is full.
pub fn first_empty_cell(grid: &BinairoGrid) -> Option<(usize, usize)> {
    let size = grid.size();

    for row in 0..size {
        for column in 0..size {
            if grid.is_cell_empty(row, column).unwrap() {
                return Some((row, column));
            }
        }
    }

    None
}

/// Finds the empty cell with the smallest domain (Minimum Remaining Values),
/// or `None` if the grid is full. If any empty cell has an empty domain, that
/// cell is returned immediately, so the caller detects the dead end when it
/// computes the domain itself.
pub fn mrv_cell(grid: &mut BinairoGrid) -> Option<(usize, usize)> {
    let size = grid.size();
    let mut best = None;
    let mut min_domain_size = usize::MAX;

    for row in 0..size {
        for column in 0..size {
            if !grid.is_cell_empty(row, column).unwrap() {
                continue;
            }

            let domain_size = possible_values(grid, row, column).len();

            if domain_size == 0 {
                return Some((row, column));
            }

            if domain_size < min_domain_size {
                min_domain_size = domain_size;
                best = Some((row, column));
            }
        }
    }

    best
}

/// Finds the empty cell with the smallest domain, breaking ties by the
/// maximum [degree](crate::constraint::degree), i.e. the cell constraining
/// the most other empty cells. Like [mrv_cell], a cell with an empty domain
/// is returned immediately.
pub fn mrv_degree_cell(grid: &mut BinairoGrid) -> Option<(usize, usize)> {
    let size = grid.size();
    let mut best = None;
    let mut min_domain_size = usize::MAX;
    let mut max_degree = 0;

    for row in 0..size {
        for column in 0..size {
            if !grid.is_cell_empty(row, column).unwrap() {
                continue;
            }

            let domain_size = possible_values(grid, row, column).len();

            if domain_size == 0 {
                return Some((row, column));
            }

            if domain_size < min_domain_size {
                min_domain_size = domain_size;
                max_degree = constraint::degree(grid, row, column);
                best = Some((row, column));
            }
            else if domain_size == min_domain_size {
                let degree = constraint::degree(grid, row, column);

                if degree > max_degree {
                    max_degree = degree;
                    best = Some((row, column));
                }
            }
        }
    }

    best
}

// The number of value choices a placement at (row, column) eliminates in the
// empty cells sharing its row or column.
fn count_eliminated(grid: &mut BinairoGrid, row: usize, column: usize)
        -> usize {
    let size = grid.size();
    let mut eliminated = 0;

    for c in 0..size {
        if c != column && grid.is_cell_empty(row, c).unwrap() {
            eliminated += 2 - possible_values(grid, row, c).len();
        }
    }

    for r in 0..size {
        if r != row && grid.is_cell_empty(r, column).unwrap() {
            eliminated += 2 - possible_values(grid, r, column).len();
        }
    }

    eliminated
}

/// Orders the values of the given domain by the Least Constraining Value
/// heuristic: the value which eliminates the fewest choices in the empty
/// cells of the same row and column comes first. Each candidate is evaluated
/// by temporary placement; the grid is left exactly as it was found.
pub fn order_values_lcv(grid: &mut BinairoGrid, row: usize, column: usize,
        domain: ValueSet) -> Vec<Bit> {
    let mut constraining: Vec<(Bit, usize)> = domain.iter()
        .map(|bit| {
            grid.set_cell(row, column, bit).unwrap();
            let eliminated = count_eliminated(grid, row, column);
            grid.clear_cell(row, column).unwrap();
            (bit, eliminated)
        })
        .collect();

    constraining.sort_by_key(|&(_, eliminated)| eliminated);
    constraining.into_iter().map(|(bit, _)| bit).collect()
}

/// Checks that every empty cell sharing a row or column with the given cell
/// still has a non-empty domain. Returns `false` as soon as one domain is
/// wiped out, which lets a solver reject an assignment without recursing.
pub fn forward_check(grid: &mut BinairoGrid, row: usize, column: usize)
        -> bool {
    let size = grid.size();

    for c in 0..size {
        if grid.is_cell_empty(row, c).unwrap()
                && possible_values(grid, row, c).is_empty() {
            return false;
        }
    }

    for r in 0..size {
        if grid.is_cell_empty(r, column).unwrap()
                && possible_values(grid, r, column).is_empty() {
            return false;
        }
    }

    true
}

// Backtracking over pre-reduced domains, shared by the AC-3 and AC-4
// preprocessing solvers.
pub(crate) fn backtrack_over_domains(state: &mut BinairoState,
        domains: &domains::DomainGrid, stats: &mut SolverStats) -> bool {
    stats.nodes_explored += 1;

    if state.grid().is_full() {
        return constraint::is_valid(state.grid());
    }

    let (row, column) = first_empty_cell(state.grid()).unwrap();

    for bit in domains.get(row, column) {
        state.grid_mut().set_cell(row, column, bit).unwrap();

        if constraint::is_consistent_at(state.grid(), row, column)
                && backtrack_over_domains(state, domains, stats) {
            return true;
        }

        state.grid_mut().clear_cell(row, column).unwrap();
        stats.backtrack_count += 1;
    }

    false
}
