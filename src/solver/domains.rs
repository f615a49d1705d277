//! Domain bookkeeping for the propagation-based solvers: a dense grid of
//! per-cell [ValueSet]s, directed arcs between cells of one line, and the
//! AC-3 revision loop shared by [Ac3Solver](super::Ac3Solver) and
//! [MacSolver](super::MacSolver).

use crate::{Bit, BinairoGrid};
use crate::constraint;
use crate::util::ValueSet;

use std::collections::VecDeque;

/// The domains of all cells of a grid, stored as a dense row-major array of
/// two-bit masks. Cloning the whole structure is a plain memory copy, which
/// is what makes the per-branch snapshots of the MAC solver affordable.
#[derive(Clone)]
pub(crate) struct DomainGrid {
    size: usize,
    domains: Vec<ValueSet>
}

impl DomainGrid {

    /// Initializes the domains from a partially filled grid: a singleton for
    /// every filled cell, both digits for every empty cell.
    pub(crate) fn from_grid(grid: &BinairoGrid) -> DomainGrid {
        let size = grid.size();
        let domains = grid.cells()
            .iter()
            .map(|cell| match cell {
                Some(bit) => ValueSet::singleton(*bit),
                None => ValueSet::ALL
            })
            .collect();

        DomainGrid {
            size,
            domains
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn get(&self, row: usize, column: usize) -> ValueSet {
        self.domains[crate::index(row, column, self.size)]
    }

    pub(crate) fn set(&mut self, row: usize, column: usize, set: ValueSet) {
        self.domains[crate::index(row, column, self.size)] = set;
    }

    pub(crate) fn remove(&mut self, row: usize, column: usize, bit: Bit)
            -> bool {
        self.domains[crate::index(row, column, self.size)].remove(bit)
    }

    /// Writes every singleton domain of an empty cell into the grid.
    pub(crate) fn commit_singletons(&self, grid: &mut BinairoGrid) {
        for row in 0..self.size {
            for column in 0..self.size {
                if !grid.is_cell_empty(row, column).unwrap() {
                    continue;
                }

                if let Some(bit) = self.get(row, column).unique() {
                    grid.set_cell(row, column, bit).unwrap();
                }
            }
        }
    }
}

/// A directed binary constraint between two distinct cells sharing a row or
/// a column. Revising the arc removes values from the domain of `from` which
/// have no support in the domain of `to`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Arc {
    pub(crate) from: (usize, usize),
    pub(crate) to: (usize, usize)
}

/// All arcs pointing at the given cell, i.e. one arc from every other cell
/// of its row and its column.
pub(crate) fn arcs_into(cell: (usize, usize), size: usize) -> Vec<Arc> {
    let (row, column) = cell;
    let mut arcs = Vec::with_capacity(2 * (size - 1));

    for c in 0..size {
        if c != column {
            arcs.push(Arc {
                from: (row, c),
                to: cell
            });
        }
    }

    for r in 0..size {
        if r != row {
            arcs.push(Arc {
                from: (r, column),
                to: cell
            });
        }
    }

    arcs
}

/// Every directed arc of the grid: for each cell, the arcs pointing at it
/// from all cells of the same row and column.
pub(crate) fn all_arcs(size: usize) -> VecDeque<Arc> {
    let mut queue = VecDeque::new();

    for row in 0..size {
        for column in 0..size {
            queue.extend(arcs_into((row, column), size));
        }
    }

    queue
}

/// Checks whether the two assignments are simultaneously consistent: both
/// values are placed temporarily and [is_consistent_at](constraint::is_consistent_at)
/// is evaluated at both positions. The grid is restored exactly.
pub(crate) fn arc_consistent(grid: &mut BinairoGrid, cell_1: (usize, usize),
        bit_1: Bit, cell_2: (usize, usize), bit_2: Bit) -> bool {
    let old_1 = grid.get_cell(cell_1.0, cell_1.1).unwrap();
    let old_2 = grid.get_cell(cell_2.0, cell_2.1).unwrap();

    grid.set_cell(cell_1.0, cell_1.1, bit_1).unwrap();
    grid.set_cell(cell_2.0, cell_2.1, bit_2).unwrap();

    let consistent = constraint::is_consistent_at(grid, cell_1.0, cell_1.1)
        && constraint::is_consistent_at(grid, cell_2.0, cell_2.1);

    restore(grid, cell_1, old_1);
    restore(grid, cell_2, old_2);

    consistent
}

fn restore(grid: &mut BinairoGrid, cell: (usize, usize), old: Option<Bit>) {
    match old {
        Some(bit) => grid.set_cell(cell.0, cell.1, bit).unwrap(),
        None => grid.clear_cell(cell.0, cell.1).unwrap()
    }
}

/// Revises the given arc: removes every value from the domain of `arc.from`
/// that has no supporting value in the domain of `arc.to`. Returns whether
/// the domain changed.
pub(crate) fn revise(grid: &mut BinairoGrid, domains: &mut DomainGrid,
        arc: Arc) -> bool {
    let from_domain = domains.get(arc.from.0, arc.from.1);
    let to_domain = domains.get(arc.to.0, arc.to.1);
    let mut revised = false;

    for x in from_domain {
        let supported = to_domain.iter()
            .any(|y| arc_consistent(grid, arc.from, x, arc.to, y));

        if !supported {
            domains.remove(arc.from.0, arc.from.1, x);
            revised = true;
        }
    }

    revised
}

/// The AC-3 work loop: pops arcs off the queue, revises them, and re-enqueues
/// the arcs pointing at every cell whose domain shrank. Returns `false` as
/// soon as some domain becomes empty, meaning the grid has no solution under
/// the current domains.
pub(crate) fn propagate(grid: &mut BinairoGrid, domains: &mut DomainGrid,
        mut queue: VecDeque<Arc>) -> bool {
    let size = domains.size();

    while let Some(arc) = queue.pop_front() {
        if revise(grid, domains, arc) {
            if domains.get(arc.from.0, arc.from.1).is_empty() {
                return false;
            }

            queue.extend(arcs_into(arc.from, size));
        }
    }

    true
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn domain_grid_initialization() {
        let grid = BinairoGrid::parse("4\n\
            0 . 1 .\n\
            . 1 . .\n\
            . . . 0\n\
            . . . .").unwrap();
        let domains = DomainGrid::from_grid(&grid);

        assert_eq!(ValueSet::singleton(Bit::Zero), domains.get(0, 0));
        assert_eq!(ValueSet::singleton(Bit::One), domains.get(0, 2));
        assert_eq!(ValueSet::ALL, domains.get(0, 1));
        assert_eq!(ValueSet::ALL, domains.get(3, 3));
    }

    #[test]
    fn arcs_into_covers_row_and_column() {
        let arcs = arcs_into((1, 2), 4);

        assert_eq!(6, arcs.len());
        assert!(arcs.iter().all(|arc| arc.to == (1, 2)));
        assert!(arcs.contains(&Arc { from: (1, 0), to: (1, 2) }));
        assert!(arcs.contains(&Arc { from: (3, 2), to: (1, 2) }));
        assert!(!arcs.iter().any(|arc| arc.from == (1, 2)));
    }

    #[test]
    fn all_arcs_count() {
        // every cell has 2 * (size - 1) incoming arcs
        let size = 4;
        assert_eq!(size * size * 2 * (size - 1), all_arcs(size).len());
    }

    #[test]
    fn arc_consistent_restores_grid() {
        let original = BinairoGrid::parse("4\n\
            0 . 1 .\n\
            . 1 . .\n\
            . . . 0\n\
            . . . .").unwrap();
        let mut grid = original.clone();

        arc_consistent(&mut grid, (0, 1), Bit::One, (0, 3), Bit::Zero);
        arc_consistent(&mut grid, (0, 0), Bit::One, (1, 0), Bit::One);

        assert_eq!(original, grid);
    }

    #[test]
    fn propagation_removes_forced_values() {
        // (0, 2) cannot be 1: it would complete the triplet with the two 1s
        let mut grid = BinairoGrid::parse("4\n\
            1 1 . .\n\
            . . . .\n\
            . . . .\n\
            . . . .").unwrap();
        let mut domains = DomainGrid::from_grid(&grid);
        let queue = all_arcs(4);

        assert!(propagate(&mut grid, &mut domains, queue));
        assert_eq!(Some(Bit::Zero), domains.get(0, 2).unique());
    }

    #[test]
    fn propagation_detects_dead_end() {
        let mut grid = BinairoGrid::parse("6\n\
            0 0 . 1 1 .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .\n\
            . . . . . .").unwrap();
        let mut domains = DomainGrid::from_grid(&grid);
        let queue = all_arcs(6);

        assert!(!propagate(&mut grid, &mut domains, queue));
    }

    #[test]
    fn commit_singletons_fills_grid() {
        let mut grid = BinairoGrid::parse("4\n\
            1 1 . .\n\
            . . . .\n\
            . . . .\n\
            . . . .").unwrap();
        let mut domains = DomainGrid::from_grid(&grid);

        assert!(propagate(&mut grid, &mut domains, all_arcs(4)));
        domains.commit_singletons(&mut grid);

        assert_eq!(Some(Bit::Zero), grid.get_cell(0, 2).unwrap());
    }
}
