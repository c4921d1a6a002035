//! Tile classification and the owned tile grid.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::GenError;

/// Per-cell classification
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileState {
    #[default]
    Empty = 0,
    Wall = 1,
    Floor = 2,
}

impl TileState {
    /// Check if a corridor search may pass through this tile.
    /// Walls do not exist yet at routing time, so Empty counts.
    pub const fn is_traversable(&self) -> bool {
        matches!(self, TileState::Empty | TileState::Floor)
    }

    /// Get the display character for this tile
    pub const fn symbol(&self) -> char {
        match self {
            TileState::Empty => ' ',
            TileState::Wall => '#',
            TileState::Floor => '.',
        }
    }
}

/// A fixed-size grid of classified tiles, indexed `[x][y]`.
///
/// Dimensions are immutable after construction; the generation
/// pipeline owns the grid exclusively for the duration of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Vec<TileState>>,
}

impl TileGrid {
    /// Create a new all-Empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![TileState::Empty; height]; width],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if coordinates fall inside the grid
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Read one tile, failing out of bounds
    pub fn get(&self, x: usize, y: usize) -> Result<TileState, GenError> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(self.tiles[x][y])
    }

    /// Write one tile, failing out of bounds
    pub fn set(&mut self, x: usize, y: usize, state: TileState) -> Result<(), GenError> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        self.tiles[x][y] = state;
        Ok(())
    }

    /// Reset every tile to Empty
    pub fn reset(&mut self) {
        for column in &mut self.tiles {
            column.fill(TileState::Empty);
        }
    }

    /// Check if a tile can be crossed by the corridor search.
    /// Out-of-bounds tiles are not traversable.
    pub fn is_traversable(&self, x: usize, y: usize) -> bool {
        self.in_bounds(x, y) && self.tiles[x][y].is_traversable()
    }

    /// Promote every Empty tile with a 4-adjacent Floor neighbor to Wall.
    ///
    /// Idempotent: Floor and Wall tiles are never touched, so a second
    /// pass finds nothing left to promote.
    pub fn derive_walls(&mut self) {
        for x in 0..self.width {
            for y in 0..self.height {
                if self.tiles[x][y] == TileState::Empty && self.adjacent_to_floor(x, y) {
                    self.tiles[x][y] = TileState::Wall;
                }
            }
        }
    }

    fn adjacent_to_floor(&self, x: usize, y: usize) -> bool {
        (x > 0 && self.tiles[x - 1][y] == TileState::Floor)
            || (x + 1 < self.width && self.tiles[x + 1][y] == TileState::Floor)
            || (y > 0 && self.tiles[x][y - 1] == TileState::Floor)
            || (y + 1 < self.height && self.tiles[x][y + 1] == TileState::Floor)
    }

    /// Iterate every cell as `(x, y, state)`, column-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, TileState)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(y, &state)| (x, y, state))
        })
    }

    /// Count tiles in the given state
    pub fn count(&self, state: TileState) -> usize {
        self.cells().filter(|&(_, _, s)| s == state).count()
    }

    /// Render the grid as one text row per y line
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.tiles[x][y].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> GenError {
        GenError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}
