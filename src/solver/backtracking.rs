use crate::BinairoState;
use crate::constraint;
use crate::solver::{first_empty_cell, Solver, SolverStats};
use crate::util::ValueSet;

/// The baseline [Solver]: depth-first search which fills the first empty
/// cell with 0, then 1, keeps an assignment if
/// [is_consistent_at](crate::constraint::is_consistent_at) holds, and undoes
/// it otherwise. Correct on every input, but slow on grids of size 8 and
/// above; it serves as the reference the optimized strategies are compared
/// against.
pub struct BacktrackingSolver {
    stats: SolverStats
}

impl BacktrackingSolver {

    /// Creates a new backtracking solver with fresh statistics.
    pub fn new() -> BacktrackingSolver {
        BacktrackingSolver {
            stats: SolverStats::default()
        }
    }

    fn backtrack(&mut self, state: &mut BinairoState) -> bool {
        self.stats.nodes_explored += 1;

        if state.grid().is_full() {
            return constraint::is_valid(state.grid());
        }

        let (row, column) = first_empty_cell(state.grid()).unwrap();

        for bit in ValueSet::ALL {
            state.grid_mut().set_cell(row, column, bit).unwrap();

            if constraint::is_consistent_at(state.grid(), row, column)
                    && self.backtrack(state) {
                return true;
            }

            state.grid_mut().clear_cell(row, column).unwrap();
            self.stats.backtrack_count += 1;
        }

        false
    }
}

impl Default for BacktrackingSolver {
    fn default() -> BacktrackingSolver {
        BacktrackingSolver::new()
    }
}

impl Solver for BacktrackingSolver {
    fn name(&self) -> &'static str {
        "Backtracking"
    }

    fn solve(&mut self, state: &BinairoState) -> Option<BinairoState> {
        let mut state = state.clone();

        if self.backtrack(&mut state) {
            Some(state)
        }
        else {
            None
        }
    }

    fn stats(&self) -> &SolverStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut SolverStats {
        &mut self.stats
    }
}
