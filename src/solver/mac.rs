use crate::BinairoState;
use crate::constraint;
use crate::solver::{mrv_degree_cell, Solver, SolverStats};
use crate::solver::domains::{
    all_arcs,
    arcs_into,
    propagate,
    DomainGrid
};
use crate::util::ValueSet;

/// The strongest [Solver] of this crate: backtracking which maintains arc
/// consistency (MAC). The domains of all cells are made arc consistent once
/// up front, and again after every single assignment, seeded with the arcs
/// incident to the assigned cell. This detects inconsistencies as early as
/// possible, at the price of a snapshot of all domains per branch, which is
/// required to roll back the shrinking done by propagation when the branch
/// fails. With the dense [DomainGrid] representation, the snapshot is a
/// plain memory copy.
pub struct MacSolver {
    stats: SolverStats
}

impl MacSolver {

    /// Creates a new MAC solver with fresh statistics.
    pub fn new() -> MacSolver {
        MacSolver {
            stats: SolverStats::default()
        }
    }

    fn backtrack(&mut self, state: &mut BinairoState,
            domains: &mut DomainGrid) -> bool {
        self.stats.nodes_explored += 1;

        if state.grid().is_full() {
            return constraint::is_valid(state.grid());
        }

        let (row, column) = mrv_degree_cell(state.grid_mut()).unwrap();
        let domain = domains.get(row, column);

        if domain.is_empty() {
            self.stats.backtrack_count += 1;
            return false;
        }

        for bit in domain {
            // full rollback of the propagation requires all domains
            let snapshot = domains.clone();

            state.grid_mut().set_cell(row, column, bit).unwrap();

            if constraint::is_consistent_at(state.grid(), row, column) {
                domains.set(row, column, ValueSet::singleton(bit));

                let seed = arcs_into((row, column), state.size())
                    .into_iter()
                    .collect();

                if propagate(state.grid_mut(), domains, seed)
                        && self.backtrack(state, domains) {
                    return true;
                }
            }

            state.grid_mut().clear_cell(row, column).unwrap();
            *domains = snapshot;
            self.stats.backtrack_count += 1;
        }

        false
    }
}

impl Default for MacSolver {
    fn default() -> MacSolver {
        MacSolver::new()
    }
}

impl Solver for MacSolver {
    fn name(&self) -> &'static str {
        "MAC"
    }

    fn solve(&mut self, state: &BinairoState) -> Option<BinairoState> {
        let mut state = state.clone();
        let mut domains = DomainGrid::from_grid(state.grid());
        let queue = all_arcs(state.size());

        if !propagate(state.grid_mut(), &mut domains, queue) {
            return None;
        }

        if self.backtrack(&mut state, &mut domains) {
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
