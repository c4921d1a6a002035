//! Rendering seam: visual handles, per-run tints, and the draw loop.
//!
//! The core never touches a draw backend. A backend implements
//! [`DrawTarget`] over whatever its cells or sprites are, and the level
//! pushes one draw call per tile through it.

use serde::{Deserialize, Serialize};

use crate::dungeon::{self, TileGrid, TileState};
use crate::error::GenError;
use crate::rng::MapRng;

/// RGB tint with channels in [0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Tint {
    fn sample(rng: &mut MapRng) -> Self {
        Self {
            r: rng.unit_f32(),
            g: rng.unit_f32(),
            b: rng.unit_f32(),
        }
    }

    /// The accent keeps the base red and green and re-rolls blue
    fn accent_of(base: Tint, rng: &mut MapRng) -> Self {
        Self {
            b: rng.unit_f32(),
            ..base
        }
    }
}

/// The three opaque visual handles a level binds, one per classification
#[derive(Debug, Clone)]
pub struct TileSet<T> {
    pub empty: T,
    pub wall: T,
    pub floor: T,
}

impl<T> TileSet<T> {
    pub fn handle(&self, state: TileState) -> &T {
        match state {
            TileState::Empty => &self.empty,
            TileState::Wall => &self.wall,
            TileState::Floor => &self.floor,
        }
    }
}

/// Draw seam to the rendering collaborator: one call per tile
pub trait DrawTarget<T> {
    fn draw(&mut self, handle: &T, x: usize, y: usize, tile_size: u32, tint: Tint);
}

/// A fully generated level: the classified grid plus the visual
/// bindings chosen for this run.
#[derive(Debug)]
pub struct Level<T> {
    grid: TileGrid,
    tiles: TileSet<T>,
    base: Tint,
    accent: Tint,
}

impl<T> Level<T> {
    /// Generate a level for a grid of the given dimensions.
    ///
    /// Both tints are sampled up front, then the whole generation
    /// pipeline runs to completion. Fails only on configuration errors
    /// (a grid too small for the room shapes).
    pub fn generate(
        width: usize,
        height: usize,
        tiles: TileSet<T>,
        rng: &mut MapRng,
    ) -> Result<Self, GenError> {
        let base = Tint::sample(rng);
        let accent = Tint::accent_of(base, rng);
        let grid = dungeon::generate_map(width, height, rng)?;

        Ok(Self {
            grid,
            tiles,
            base,
            accent,
        })
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn base(&self) -> Tint {
        self.base
    }

    pub fn accent(&self) -> Tint {
        self.accent
    }

    /// Issue one draw call per tile.
    ///
    /// Floor tiles take the accent tint; Wall and Empty take the base.
    pub fn render(&self, target: &mut impl DrawTarget<T>, tile_size: u32) {
        for (x, y, state) in self.grid.cells() {
            let tint = match state {
                TileState::Floor => self.accent,
                TileState::Empty | TileState::Wall => self.base,
            };
            target.draw(self.tiles.handle(state), x, y, tile_size, tint);
        }
    }
}
