use crate::BinairoState;
use crate::constraint;
use crate::solver::{first_empty_cell, forward_check, Solver, SolverStats};
use crate::util::ValueSet;

/// A [Solver] with the skeleton of the
/// [BacktrackingSolver](super::BacktrackingSolver), extended by forward
/// checking: after an assignment passes the local consistency check, the
/// domains of all empty cells in the affected row and column are inspected,
/// and the assignment is rejected without recursing if any of them is wiped
/// out. This detects failures before descending into doomed branches.
pub struct ForwardCheckingSolver {
    stats: SolverStats
}

impl ForwardCheckingSolver {

    /// Creates a new forward checking solver with fresh statistics.
    pub fn new() -> ForwardCheckingSolver {
        ForwardCheckingSolver {
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
                    && forward_check(state.grid_mut(), row, column)
                    && self.backtrack(state) {
                return true;
            }

            state.grid_mut().clear_cell(row, column).unwrap();
            self.stats.backtrack_count += 1;
        }

        false
    }
}

impl Default for ForwardCheckingSolver {
    fn default() -> ForwardCheckingSolver {
        ForwardCheckingSolver::new()
    }
}

impl Solver for ForwardCheckingSolver {
    fn name(&self) -> &'static str {
        "Forward Checking"
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
