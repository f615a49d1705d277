use crate::BinairoState;
use crate::solver::{backtrack_over_domains, Solver, SolverStats};
use crate::solver::domains::{all_arcs, propagate, DomainGrid};

/// A [Solver] which establishes arc consistency with the AC-3 algorithm
/// before searching. All directed arcs between cells of one row or column
/// are revised until a fixpoint is reached; values without support in a
/// neighbouring domain are discarded. If a domain runs empty, the grid is
/// unsolvable without any search. Otherwise singleton domains are committed
/// to the grid and a plain backtracking search runs over the reduced
/// domains.
pub struct Ac3Solver {
    stats: SolverStats
}

impl Ac3Solver {

    /// Creates a new AC-3 solver with fresh statistics.
    pub fn new() -> Ac3Solver {
        Ac3Solver {
            stats: SolverStats::default()
        }
    }
}

impl Default for Ac3Solver {
    fn default() -> Ac3Solver {
        Ac3Solver::new()
    }
}

impl Solver for Ac3Solver {
    fn name(&self) -> &'static str {
        "AC-3"
    }

    fn solve(&mut self, state: &BinairoState) -> Option<BinairoState> {
        let mut state = state.clone();
        let mut domains = DomainGrid::from_grid(state.grid());
        let queue = all_arcs(state.size());

        if !propagate(state.grid_mut(), &mut domains, queue) {
            return None;
        }

        domains.commit_singletons(state.grid_mut());

        if backtrack_over_domains(&mut state, &domains, &mut self.stats) {
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
