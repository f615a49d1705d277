use crate::{Bit, BinairoState};
use crate::solver::{backtrack_over_domains, Solver, SolverStats};
use crate::solver::domains::{arc_consistent, DomainGrid};

use std::collections::VecDeque;

// A (cell, value) pair, the unit AC-4 reasons about.
type Label = (usize, usize, Bit);

fn label_index(row: usize, column: usize, bit: Bit, size: usize) -> usize {
    (row * size + column) * 2 + bit.index()
}

/// A [Solver] which establishes arc consistency with the AC-4 algorithm
/// before searching. Where AC-3 re-revises whole arcs whenever a domain
/// changes, AC-4 counts for every (cell, value) pair how many supporting
/// values its neighbours offer and tracks the reverse dependencies in
/// support lists. A pair whose counter drops to zero is removed and its
/// removal is propagated by decrementing the counters of every pair it
/// supported. This gives a better asymptotic bound at the cost of the
/// initialization pass over all neighbour-value pairs. After propagation,
/// singleton domains are committed and a plain backtracking search runs over
/// the reduced domains.
pub struct Ac4Solver {
    stats: SolverStats
}

impl Ac4Solver {

    /// Creates a new AC-4 solver with fresh statistics.
    pub fn new() -> Ac4Solver {
        Ac4Solver {
            stats: SolverStats::default()
        }
    }

    fn ac4(state: &mut BinairoState, domains: &mut DomainGrid) -> bool {
        let size = state.size();
        let mut counters = vec![0i32; size * size * 2];
        let mut support_lists: Vec<Vec<Label>> =
            vec![Vec::new(); size * size * 2];
        let mut queue: VecDeque<Label> = VecDeque::new();

        // initialization: count the supports of every (cell, value) pair

        for row in 0..size {
            for column in 0..size {
                for bit in domains.get(row, column) {
                    let mut count = 0;

                    for c in 0..size {
                        if c != column {
                            count += count_supports(state, domains,
                                (row, column), bit, (row, c),
                                &mut support_lists);
                        }
                    }

                    for r in 0..size {
                        if r != row {
                            count += count_supports(state, domains,
                                (row, column), bit, (r, column),
                                &mut support_lists);
                        }
                    }

                    counters[label_index(row, column, bit, size)] = count;

                    if count == 0 {
                        queue.push_back((row, column, bit));
                    }
                }
            }
        }

        // propagation: remove unsupported pairs and follow the dependencies

        while let Some((row, column, bit)) = queue.pop_front() {
            domains.remove(row, column, bit);

            if domains.get(row, column).is_empty() {
                return false;
            }

            for &(dep_row, dep_column, dep_bit)
                    in &support_lists[label_index(row, column, bit, size)] {
                let index = label_index(dep_row, dep_column, dep_bit, size);
                counters[index] -= 1;

                if counters[index] == 0 {
                    queue.push_back((dep_row, dep_column, dep_bit));
                }
            }
        }

        true
    }
}

// Counts how many values of the neighbour's domain support `bit` at `cell`
// and records the reverse dependency for each of them.
fn count_supports(state: &mut BinairoState, domains: &DomainGrid,
        cell: (usize, usize), bit: Bit, neighbour: (usize, usize),
        support_lists: &mut Vec<Vec<Label>>) -> i32 {
    let size = domains.size();
    let mut count = 0;

    for neighbour_bit in domains.get(neighbour.0, neighbour.1) {
        if arc_consistent(state.grid_mut(), cell, bit, neighbour,
                neighbour_bit) {
            count += 1;
            support_lists[
                label_index(neighbour.0, neighbour.1, neighbour_bit, size)]
                .push((cell.0, cell.1, bit));
        }
    }

    count
}

impl Default for Ac4Solver {
    fn default() -> Ac4Solver {
        Ac4Solver::new()
    }
}

impl Solver for Ac4Solver {
    fn name(&self) -> &'static str {
        "AC-4"
    }

    fn solve(&mut self, state: &BinairoState) -> Option<BinairoState> {
        let mut state = state.clone();
        let mut domains = DomainGrid::from_grid(state.grid());

        if !Ac4Solver::ac4(&mut state, &mut domains) {
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

#[cfg(test)]
mod tests {

    use super::*;

    use crate::BinairoGrid;
    use crate::constraint;

    #[test]
    fn solves_simple_grid() {
        let grid = BinairoGrid::parse("4\n\
            0 . 1 .\n\
            . 1 . .\n\
            . . . 0\n\
            . . . .").unwrap();
        let mut solver = Ac4Solver::new();

        let solution = solver.solve(&BinairoState::from_grid(&grid)).unwrap();

        assert!(constraint::is_solution(solution.grid()));
        assert!(grid.is_subset(solution.grid()).unwrap());
    }

    #[test]
    fn detects_unsolvable_grid_without_search() {
        let grid = BinairoGrid::parse("6\n\
            0 0 . 1 1 .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .").unwrap();
        let mut solver = Ac4Solver::new();

        assert_eq!(None, solver.solve(&BinairoState::from_grid(&grid)));
        assert_eq!(0, solver.stats().nodes_explored);
    }

    #[test]
    fn agrees_with_ac3() {
        let grid = BinairoGrid::parse("6\n\
            . 0 . . . .\n\
            1 . . . 0 .\n\
            . . 1 . . .\n\
            . . . 0 . .\n\
            . 1 . . . .\n\
            . . . . 1 .").unwrap();
        let state = BinairoState::from_grid(&grid);

        let ac3_solution = super::super::Ac3Solver::new().solve(&state);
        let ac4_solution = Ac4Solver::new().solve(&state);

        assert!(ac3_solution.is_some());
        assert!(ac4_solution.is_some());
        assert!(constraint::is_solution(ac4_solution.unwrap().grid()));
    }
}
