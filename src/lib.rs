// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]

//! This crate implements an easy-to-understand and flexible Binairo (also
//! known as Takuzu) engine. It supports the following key features:
//!
//! * Parsing and printing Binairo grids
//! * Checking validity of grids and solutions according to the three Binairo
//! rules
//! * Solving grids with six different constraint-satisfaction strategies,
//! from plain backtracking to MAC (Maintaining Arc Consistency)
//! * Generating puzzles of a configurable size and difficulty
//! * Validating puzzles and computing hints for a front-end
//!
//! Binairo is played on a square grid of even side length whose cells hold
//! the digits 0 and 1. A completed grid must satisfy three rules: no three
//! equal digits may be consecutive in any row or column, every row and column
//! contains as many 0s as 1s, and no two rows and no two columns are
//! identical.
//!
//! # Parsing and printing grids
//!
//! See [BinairoGrid::parse] for the exact format of a grid code.
//!
//! Codes can be used to exchange grids, while pretty prints can be used to
//! display a grid in a clearer manner. An example of how to parse and display
//! a grid is provided below.
//!
//! ```
//! use binairo::BinairoGrid;
//!
//! let grid = BinairoGrid::parse("4\n0 . 1 .\n. 1 . .\n. . . 0\n. . . .")
//!     .unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Checking validity
//!
//! The three rules are available as individual [constraint]s as well as
//! composed into [DefaultConstraint](constraint::DefaultConstraint) and the
//! convenience predicates [is_valid](constraint::is_valid) and
//! [is_solution](constraint::is_solution).
//!
//! ```
//! use binairo::BinairoGrid;
//! use binairo::constraint;
//!
//! // Three consecutive 1s violate the triplet rule.
//! let grid = BinairoGrid::parse("4\n1 1 1 .\n. . . .\n. . . .\n. . . .")
//!     .unwrap();
//! assert!(!constraint::is_valid(&grid));
//! ```
//!
//! # Solving grids
//!
//! This crate offers a [Solver](solver::Solver) trait implemented by six
//! search strategies of increasing sophistication. The
//! [HeuristicSolver](solver::HeuristicSolver) is the recommended default.
//!
//! ```
//! use binairo::{BinairoGrid, BinairoState};
//! use binairo::constraint;
//! use binairo::solver::{HeuristicSolver, Solver};
//!
//! let grid = BinairoGrid::parse("4\n0 . 1 .\n. 1 . .\n. . . 0\n. . . .")
//!     .unwrap();
//! let mut solver = HeuristicSolver::new();
//! let solution = solver.solve_with_timing(&BinairoState::from_grid(&grid))
//!     .unwrap();
//!
//! assert!(constraint::is_solution(solution.grid()));
//! assert!(solver.stats().solution_found);
//! ```
//!
//! # Generating puzzles
//!
//! The [Generator](generator::Generator) first synthesizes a full solution
//! with a solver and then removes cells to reach the requested share of empty
//! cells. It uses the `Rng` trait from the
//! [rand](https://rust-random.github.io/rand/rand/index.html) crate, so runs
//! can be made reproducible with a seeded RNG.
//!
//! ```
//! use binairo::generator::Generator;
//! use binairo::validator::Validator;
//!
//! let mut generator = Generator::new_default();
//! let puzzle = generator.generate(6, 0.5).unwrap();
//!
//! assert_eq!(6, puzzle.size());
//! assert!(Validator::new_default().is_solvable(&puzzle));
//! ```
//!
//! # Note regarding performance
//!
//! Solving large grids with the plain
//! [BacktrackingSolver](solver::BacktrackingSolver) can be slow. It is
//! strongly recommended to use at least `opt-level = 2`, even in tests that
//! solve or generate grids of size 8 and above.

pub mod constraint;
pub mod error;
pub mod generator;
pub mod solver;
pub mod util;
pub mod validator;

#[cfg(test)]
mod solver_tests;

use error::{
    BinairoError,
    BinairoParseError,
    BinairoParseResult,
    BinairoResult
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error as DeserializeError;

use std::fmt::{self, Display, Formatter};

/// The content of a filled Binairo cell: a single binary digit. Empty cells
/// are expressed as `None` in an `Option<Bit>`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Bit {

    /// The digit 0.
    Zero,

    /// The digit 1.
    One
}

impl Bit {

    /// The other digit, i.e. 1 for 0 and 0 for 1.
    pub fn flip(self) -> Bit {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero
        }
    }

    /// The numeric index of this digit (0 or 1), usable for dense tables
    /// indexed by cell value.
    pub fn index(self) -> usize {
        match self {
            Bit::Zero => 0,
            Bit::One => 1
        }
    }
}

impl Display for Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Bit::Zero => write!(f, "0"),
            Bit::One => write!(f, "1")
        }
    }
}

/// A Binairo grid is a square arrangement of cells which may or may not be
/// occupied by a [Bit]. The side length is even and at least 4 by
/// construction. Cells are addressed by `(row, column)` with both indices
/// starting at 0 in the top-left corner.
///
/// `BinairoGrid` implements `Display`, rendering a box-drawing image of the
/// grid, and [BinairoGrid::parse] / [BinairoGrid::to_parseable_string] for a
/// plain-text exchange format.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BinairoGrid {
    size: usize,
    cells: Vec<Option<Bit>>
}

pub(crate) fn index(row: usize, column: usize, size: usize) -> usize {
    row * size + column
}

fn to_char(cell: Option<Bit>) -> char {
    match cell {
        Some(Bit::Zero) => '0',
        Some(Bit::One) => '1',
        None => ' '
    }
}

fn line(grid: &BinairoGrid, start: char, sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let size = grid.size();
    let mut result = String::new();

    for column in 0..size {
        if column == 0 {
            result.push(start);
        }
        else {
            result.push(sep);
        }

        result.push(pad);
        result.push(segment(column));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row(grid: &BinairoGrid) -> String {
    line(grid, '┌', '┬', |_| '─', '─', '┐', true)
}

fn separator_line(grid: &BinairoGrid) -> String {
    line(grid, '├', '┼', |_| '─', '─', '┤', true)
}

fn bottom_row(grid: &BinairoGrid) -> String {
    line(grid, '└', '┴', |_| '─', '─', '┘', false)
}

fn content_row(grid: &BinairoGrid, row: usize) -> String {
    line(grid, '│', '│',
        |column| to_char(grid.get_cell(row, column).unwrap()), ' ', '│', true)
}

impl Display for BinairoGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let separator_line = separator_line(self);

        for row in 0..self.size() {
            if row == 0 {
                f.write_str(top_row(self).as_str())?;
            }
            else {
                f.write_str(separator_line.as_str())?;
            }

            f.write_str(content_row(self, row).as_str())?;
        }

        f.write_str(bottom_row(self).as_str())
    }
}

fn token_of(cell: &Option<Bit>) -> &'static str {
    match cell {
        Some(Bit::Zero) => "0",
        Some(Bit::One) => "1",
        None => "."
    }
}

impl BinairoGrid {

    /// Creates a new, empty Binairo grid with the given side length.
    ///
    /// # Arguments
    ///
    /// * `size`: The number of rows and columns of the grid. Must be at least
    /// 4 and even.
    ///
    /// # Errors
    ///
    /// If `size` is invalid (less than 4 or odd). In that case,
    /// `BinairoError::InvalidSize` is returned.
    pub fn new(size: usize) -> BinairoResult<BinairoGrid> {
        if size < 4 || size % 2 != 0 {
            return Err(BinairoError::InvalidSize);
        }

        Ok(BinairoGrid {
            size,
            cells: vec![None; size * size]
        })
    }

    /// Parses a code encoding a Binairo grid. The first line holds the side
    /// length; it is followed by one line per row, each containing `size`
    /// tokens separated by whitespace, where a token is `"."` for an empty
    /// cell, `"0"`, or `"1"`. Lines starting with `#` as well as blank lines
    /// are ignored, so files carrying comment headers parse as well.
    ///
    /// As an example, the code below parses to a 4x4 grid with four clues:
    ///
    /// ```text
    /// # an example puzzle
    /// 4
    /// 0 . 1 .
    /// . 1 . .
    /// . . . 0
    /// . . . .
    /// ```
    ///
    /// # Errors
    ///
    /// Any specialization of `BinairoParseError` (see that documentation).
    pub fn parse(code: &str) -> BinairoParseResult<BinairoGrid> {
        let mut lines = code.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'));
        let size_line = lines.next()
            .ok_or(BinairoParseError::MissingSize)?;
        let size = size_line.parse::<usize>()?;

        if size < 4 || size % 2 != 0 {
            return Err(BinairoParseError::InvalidSize);
        }

        let mut grid = BinairoGrid::new(size).unwrap();

        for row in 0..size {
            let row_line = lines.next()
                .ok_or(BinairoParseError::MissingRow(row))?;
            let tokens: Vec<&str> = row_line.split_whitespace().collect();

            if tokens.len() != size {
                return Err(
                    BinairoParseError::WrongTokenCount(row, tokens.len()));
            }

            for (column, &token) in tokens.iter().enumerate() {
                let cell = match token {
                    "." => None,
                    "0" => Some(Bit::Zero),
                    "1" => Some(Bit::One),
                    _ => return Err(
                        BinairoParseError::InvalidToken(row, column))
                };

                grid.cells[index(row, column, size)] = cell;
            }
        }

        Ok(grid)
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [BinairoGrid::parse]. That is, a grid that is converted to a string
    /// and parsed again will not change, as is illustrated below.
    ///
    /// ```
    /// use binairo::{BinairoGrid, Bit};
    ///
    /// let mut grid = BinairoGrid::new(4).unwrap();
    ///
    /// // Just some arbitrary changes to create some content.
    /// grid.set_cell(1, 1, Bit::One).unwrap();
    /// grid.set_cell(2, 0, Bit::Zero).unwrap();
    ///
    /// let grid_str = grid.to_parseable_string();
    /// let grid_parsed = BinairoGrid::parse(grid_str.as_str()).unwrap();
    /// assert_eq!(grid, grid_parsed);
    /// ```
    pub fn to_parseable_string(&self) -> String {
        let mut s = format!("{}\n", self.size);

        for row in 0..self.size {
            let tokens = self.cells[index(row, 0, self.size)..
                    index(row, self.size, self.size)].iter()
                .map(token_of)
                .collect::<Vec<&str>>()
                .join(" ");
            s.push_str(tokens.as_str());
            s.push('\n');
        }

        s
    }

    /// Gets the side length of the grid, i.e. the number of rows and columns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the content of the cell at the specified position, where `None`
    /// represents an empty cell.
    ///
    /// # Arguments
    ///
    /// * `row`: The row (y-coordinate) of the desired cell. Must be in the
    /// range `[0, size[`.
    /// * `column`: The column (x-coordinate) of the desired cell. Must be in
    /// the range `[0, size[`.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the specified range. In that
    /// case, `BinairoError::OutOfBounds` is returned.
    pub fn get_cell(&self, row: usize, column: usize)
            -> BinairoResult<Option<Bit>> {
        if row >= self.size || column >= self.size {
            Err(BinairoError::OutOfBounds)
        }
        else {
            Ok(self.cells[index(row, column, self.size)])
        }
    }

    /// Indicates whether the cell at the specified position holds the given
    /// digit. This will return `false` if the cell holds the other digit or
    /// is empty.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the range `[0, size[`. In that
    /// case, `BinairoError::OutOfBounds` is returned.
    pub fn has_bit(&self, row: usize, column: usize, bit: Bit)
            -> BinairoResult<bool> {
        Ok(self.get_cell(row, column)? == Some(bit))
    }

    /// Sets the content of the cell at the specified position to the given
    /// digit. If the cell was not empty, the old digit will be overwritten.
    ///
    /// # Arguments
    ///
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, size[`.
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be in
    /// the range `[0, size[`.
    /// * `bit`: The digit to assign to the specified cell.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the specified range. In that
    /// case, `BinairoError::OutOfBounds` is returned.
    pub fn set_cell(&mut self, row: usize, column: usize, bit: Bit)
            -> BinairoResult<()> {
        if row >= self.size || column >= self.size {
            return Err(BinairoError::OutOfBounds);
        }

        self.cells[index(row, column, self.size)] = Some(bit);
        Ok(())
    }

    /// Clears the content of the cell at the specified position, that is, if
    /// it contains a digit, that digit is removed. If the cell is already
    /// empty, it will be left that way.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the range `[0, size[`. In that
    /// case, `BinairoError::OutOfBounds` is returned.
    pub fn clear_cell(&mut self, row: usize, column: usize)
            -> BinairoResult<()> {
        if row >= self.size || column >= self.size {
            return Err(BinairoError::OutOfBounds);
        }

        self.cells[index(row, column, self.size)] = None;
        Ok(())
    }

    /// Indicates whether the cell at the specified position is empty.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the range `[0, size[`. In that
    /// case, `BinairoError::OutOfBounds` is returned.
    pub fn is_cell_empty(&self, row: usize, column: usize)
            -> BinairoResult<bool> {
        Ok(self.get_cell(row, column)?.is_none())
    }

    /// Gets an independent copy of the given row, top to bottom indexed. The
    /// entries are in left-to-right order.
    ///
    /// # Errors
    ///
    /// If `row` is not in the range `[0, size[`. In that case,
    /// `BinairoError::OutOfBounds` is returned.
    pub fn row(&self, row: usize) -> BinairoResult<Vec<Option<Bit>>> {
        if row >= self.size {
            return Err(BinairoError::OutOfBounds);
        }

        Ok(self.cells[index(row, 0, self.size)..
            index(row, self.size, self.size)].to_vec())
    }

    /// Gets an independent copy of the given column. The entries are in
    /// top-to-bottom order.
    ///
    /// # Errors
    ///
    /// If `column` is not in the range `[0, size[`. In that case,
    /// `BinairoError::OutOfBounds` is returned.
    pub fn column(&self, column: usize) -> BinairoResult<Vec<Option<Bit>>> {
        if column >= self.size {
            return Err(BinairoError::OutOfBounds);
        }

        Ok((0..self.size)
            .map(|row| self.cells[index(row, column, self.size)])
            .collect())
    }

    /// Counts the number of empty cells in this grid.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Indicates whether this grid is full, i.e. every cell is filled with a
    /// digit. In this case, [BinairoGrid::count_empty] returns 0.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|c| c.is_none())
    }

    /// Indicates whether this grid is empty, i.e. no cell is filled with a
    /// digit. In this case, [BinairoGrid::count_empty] returns the square of
    /// [BinairoGrid::size].
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Indicates whether this grid configuration is a subset of another one.
    /// That is, all cells filled in this grid with some digit must be filled
    /// in `other` with the same digit. If this condition is met, `true` is
    /// returned, and `false` otherwise.
    ///
    /// # Errors
    ///
    /// If the sizes of this and the `other` grid are not the same. In that
    /// case, `BinairoError::InvalidSize` is returned.
    pub fn is_subset(&self, other: &BinairoGrid) -> BinairoResult<bool> {
        if self.size != other.size {
            return Err(BinairoError::InvalidSize);
        }

        Ok(self.cells.iter()
            .zip(other.cells.iter())
            .all(|(self_cell, other_cell)| match self_cell {
                Some(bit) => other_cell == &Some(*bit),
                None => true
            }))
    }

    /// Indicates whether this grid configuration is a superset of another
    /// one. That is, all cells filled in the `other` grid with some digit
    /// must be filled in this one with the same digit.
    ///
    /// # Errors
    ///
    /// If the sizes of this and the `other` grid are not the same. In that
    /// case, `BinairoError::InvalidSize` is returned.
    pub fn is_superset(&self, other: &BinairoGrid) -> BinairoResult<bool> {
        other.is_subset(self)
    }

    /// Gets a reference to the vector which holds the cells. They are in
    /// left-to-right, top-to-bottom order, where rows are together.
    pub fn cells(&self) -> &Vec<Option<Bit>> {
        &self.cells
    }
}

impl Serialize for BinairoGrid {
    fn serialize<S: Serializer>(&self, serializer: S)
            -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_parseable_string().as_str())
    }
}

impl<'de> Deserialize<'de> for BinairoGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D)
            -> Result<BinairoGrid, D::Error> {
        let code = String::deserialize(deserializer)?;
        BinairoGrid::parse(code.as_str())
            .map_err(|e| D::Error::custom(format!("{:?}", e)))
    }
}

/// A state of a Binairo search: a [BinairoGrid] together with a flag that
/// distinguishes the initial, fixed state handed to a solver from states
/// derived during search. Solvers copy the state once on entry and mutate the
/// copy in place.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BinairoState {
    grid: BinairoGrid,
    fixed: bool
}

impl BinairoState {

    /// Creates a new state with an empty grid of the given size. The state is
    /// marked as fixed.
    ///
    /// # Errors
    ///
    /// If `size` is invalid (less than 4 or odd). In that case,
    /// `BinairoError::InvalidSize` is returned.
    pub fn new(size: usize) -> BinairoResult<BinairoState> {
        Ok(BinairoState {
            grid: BinairoGrid::new(size)?,
            fixed: true
        })
    }

    /// Creates a state wrapping a copy of the given grid. The state is
    /// marked as derived.
    pub fn from_grid(grid: &BinairoGrid) -> BinairoState {
        BinairoState {
            grid: grid.clone(),
            fixed: false
        }
    }

    /// Gets a reference to the grid of this state.
    pub fn grid(&self) -> &BinairoGrid {
        &self.grid
    }

    /// Gets a mutable reference to the grid of this state.
    pub fn grid_mut(&mut self) -> &mut BinairoGrid {
        &mut self.grid
    }

    /// Gets the side length of the wrapped grid.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Indicates whether this is the initial, fixed state as opposed to one
    /// derived during search.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Indicates whether the wrapped grid is completely filled.
    pub fn is_solved(&self) -> bool {
        self.grid.is_full()
    }
}

impl Display for BinairoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.grid, f)
    }
}
