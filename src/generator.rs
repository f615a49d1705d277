//! This module contains logic for generating random Binairo puzzles.
//!
//! Generation follows a seed + solve + remove strategy: a few random digits
//! are placed as seeds, a [solver](crate::solver) completes them into a full
//! valid grid, and cells are then removed until the requested share of the
//! grid is empty. The difficulty of a puzzle is expressed as exactly that
//! share; whether the puzzle has a unique solution is not checked.

use crate::{Bit, BinairoGrid, BinairoState};
use crate::constraint;
use crate::error::{BinairoError, BinairoResult};
use crate::solver::{HeuristicSolver, Solver};

use rand::Rng;
use rand::rngs::ThreadRng;

/// The lowest accepted difficulty, i.e. share of empty cells.
pub const MIN_DIFFICULTY: f64 = 0.1;

/// The highest accepted difficulty, i.e. share of empty cells.
pub const MAX_DIFFICULTY: f64 = 0.9;

const EASY_DIFFICULTY: f64 = 0.3;
const MEDIUM_DIFFICULTY: f64 = 0.5;
const HARD_DIFFICULTY: f64 = 0.7;

/// A generator randomly generates Binairo puzzles: partially filled
/// [BinairoGrid]s every one of whose clues agrees with at least one full
/// valid solution. It uses a random number generator to decide the content.
/// For most cases, sensible defaults are provided by
/// [Generator::new_default].
pub struct Generator<R: Rng> {
    rng: R,
    solver: HeuristicSolver
}

impl Generator<ThreadRng> {

    /// Creates a new generator that uses a [ThreadRng] to generate the
    /// random digits.
    pub fn new_default() -> Generator<ThreadRng> {
        Generator::new(rand::thread_rng())
    }
}

fn shuffle<T>(rng: &mut impl Rng, values: impl Iterator<Item = T>) -> Vec<T> {
    let mut vec: Vec<T> = values.collect();
    let len = vec.len();

    for i in 0..(len - 1) {
        let j = rng.gen_range(i..len);
        vec.swap(i, j);
    }

    vec
}

impl<R: Rng> Generator<R> {

    /// Creates a new generator that uses the given random number generator
    /// to generate random digits. Handing over a seeded RNG makes generation
    /// reproducible.
    pub fn new(rng: R) -> Generator<R> {
        Generator {
            rng,
            solver: HeuristicSolver::new()
        }
    }

    // Seeds an empty grid with size / 2 random digits, rolling back every
    // placement that breaks local consistency, and completes it with the
    // solver. None if the seeded grid turned out unsolvable.
    fn generate_complete_solution(&mut self, size: usize)
            -> Option<BinairoGrid> {
        let mut grid = BinairoGrid::new(size).unwrap();

        for _ in 0..(size / 2) {
            let row = self.rng.gen_range(0..size);
            let column = self.rng.gen_range(0..size);
            let bit = if self.rng.gen_range(0..2) == 0 {
                Bit::Zero
            }
            else {
                Bit::One
            };

            grid.set_cell(row, column, bit).unwrap();

            if !constraint::is_consistent_at(&grid, row, column) {
                grid.clear_cell(row, column).unwrap();
            }
        }

        self.solver.solve(&BinairoState::from_grid(&grid))
            .filter(BinairoState::is_solved)
            .map(|solution| solution.grid().clone())
    }

    // Removes ⌊size² · difficulty⌋ randomly chosen cells from a copy of the
    // solution.
    fn create_puzzle(&mut self, solution: &BinairoGrid, difficulty: f64)
            -> BinairoGrid {
        let mut puzzle = solution.clone();
        let size = solution.size();
        let cells_to_remove =
            ((size * size) as f64 * difficulty) as usize;
        let positions = (0..size)
            .flat_map(|row| (0..size).map(move |column| (row, column)));

        for (row, column) in shuffle(&mut self.rng, positions)
                .into_iter()
                .take(cells_to_remove) {
            puzzle.clear_cell(row, column).unwrap();
        }

        puzzle
    }

    /// Generates a new random Binairo puzzle with the given parameters.
    ///
    /// It is guaranteed that the result has the requested size, that
    /// `⌊size² · difficulty⌋` of its cells are empty, and that every filled
    /// cell agrees with at least one full valid solution. Uniqueness of that
    /// solution is *not* guaranteed.
    ///
    /// # Arguments
    ///
    /// * `size`: The side length of the generated grid. Must be at least 4
    /// and even.
    /// * `difficulty`: The share of cells left empty, in the range
    /// `[` [MIN_DIFFICULTY] `,` [MAX_DIFFICULTY] `]`.
    ///
    /// # Errors
    ///
    /// * `BinairoError::InvalidSize` If `size` is less than 4 or odd.
    /// * `BinairoError::InvalidDifficulty` If `difficulty` is outside the
    /// accepted range.
    pub fn generate(&mut self, size: usize, difficulty: f64)
            -> BinairoResult<BinairoGrid> {
        if size < 4 || size % 2 != 0 {
            return Err(BinairoError::InvalidSize);
        }

        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(BinairoError::InvalidDifficulty);
        }

        // unlucky seeds can produce an unsolvable grid; retry until one
        // works out
        let solution = loop {
            if let Some(solution) = self.generate_complete_solution(size) {
                break solution;
            }
        };

        Ok(self.create_puzzle(&solution, difficulty))
    }

    /// Generates an easy puzzle: 30% of the cells are empty.
    ///
    /// # Errors
    ///
    /// `BinairoError::InvalidSize` If `size` is less than 4 or odd.
    pub fn generate_easy(&mut self, size: usize)
            -> BinairoResult<BinairoGrid> {
        self.generate(size, EASY_DIFFICULTY)
    }

    /// Generates a medium puzzle: 50% of the cells are empty.
    ///
    /// # Errors
    ///
    /// `BinairoError::InvalidSize` If `size` is less than 4 or odd.
    pub fn generate_medium(&mut self, size: usize)
            -> BinairoResult<BinairoGrid> {
        self.generate(size, MEDIUM_DIFFICULTY)
    }

    /// Generates a hard puzzle: 70% of the cells are empty.
    ///
    /// # Errors
    ///
    /// `BinairoError::InvalidSize` If `size` is less than 4 or odd.
    pub fn generate_hard(&mut self, size: usize)
            -> BinairoResult<BinairoGrid> {
        self.generate(size, HARD_DIFFICULTY)
    }
}

/// Builds a grid from a pattern string read row-major: `'0'` and `'1'` fill
/// the cell with the respective digit, any other character leaves it empty.
/// A pattern shorter than the grid leaves the remaining cells empty; excess
/// characters are ignored. Mainly useful for tests and hand-crafted puzzles.
///
/// # Errors
///
/// `BinairoError::InvalidSize` If `size` is less than 4 or odd.
pub fn generate_with_pattern(size: usize, pattern: &str)
        -> BinairoResult<BinairoGrid> {
    let mut grid = BinairoGrid::new(size)?;
    let mut chars = pattern.chars();

    'rows: for row in 0..size {
        for column in 0..size {
            let c = match chars.next() {
                Some(c) => c,
                None => break 'rows
            };

            match c {
                '0' => grid.set_cell(row, column, Bit::Zero).unwrap(),
                '1' => grid.set_cell(row, column, Bit::One).unwrap(),
                _ => { }
            }
        }
    }

    Ok(grid)
}
