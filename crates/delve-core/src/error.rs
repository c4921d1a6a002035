//! Generation errors.

use thiserror::Error;

/// Errors surfaced by map generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// A sampling range collapsed to nothing: the grid cannot fit the
    /// requested shape. Fatal for the whole generation run.
    #[error("empty sampling range [{lo}, {hi}) for {what}")]
    EmptyRange {
        what: &'static str,
        lo: i64,
        hi: i64,
    },

    /// Bounds-checked grid access outside the grid.
    #[error("tile ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}
