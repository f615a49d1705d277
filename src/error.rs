//! This module contains some error and result definitions used in this crate.

use std::num::ParseIntError;

/// Miscellaneous errors that can occur on some methods in the
/// [root module](../index.html). This does not exclude errors that occur when
/// parsing grids, see [BinairoParseError](enum.BinairoParseError.html) for
/// that.
#[derive(Debug, Eq, PartialEq)]
pub enum BinairoError {

    /// Indicates that the size specified for a created grid is invalid. This
    /// is the case if it is less than 4 or odd.
    InvalidSize,

    /// Indicates that the specified coordinates (row and column) lie outside
    /// the grid in question. This is the case if they are greater than or
    /// equal to the size.
    OutOfBounds,

    /// Indicates that a difficulty handed to the generator is outside the
    /// accepted range of 0.1 to 0.9.
    InvalidDifficulty
}

/// Syntactic sugar for `Result<V, BinairoError>`.
pub type BinairoResult<V> = Result<V, BinairoError>;

/// An enumeration of the errors that may occur when parsing a `BinairoGrid`
/// from its textual form.
#[derive(Debug, Eq, PartialEq)]
pub enum BinairoParseError {

    /// Indicates that the code contains no size header, i.e. it is empty or
    /// consists only of comment lines and blank lines.
    MissingSize,

    /// Indicates that the size header could not be parsed as an integer.
    NumberFormatError,

    /// Indicates that the parsed size is invalid (less than 4 or odd).
    InvalidSize,

    /// Indicates that the code ends before all rows announced by the size
    /// header have been read. Carries the index of the first missing row.
    MissingRow(usize),

    /// Indicates that a row does not contain exactly `size` tokens. Carries
    /// the index of the offending row and the number of tokens found.
    WrongTokenCount(usize, usize),

    /// Indicates that a cell token is neither `"."` nor `"0"` nor `"1"`.
    /// Carries the row and column of the offending token.
    InvalidToken(usize, usize)
}

/// Syntactic sugar for `Result<V, BinairoParseError>`.
pub type BinairoParseResult<V> = Result<V, BinairoParseError>;

impl From<ParseIntError> for BinairoParseError {
    fn from(_: ParseIntError) -> Self {
        BinairoParseError::NumberFormatError
    }
}
