//! Room shapes: synthesis and carving.
//!
//! Three shape variants share one bounding-box room type. Position
//! sampling always accounts for the full carved extent of a shape, so
//! carving can never leave the one-tile margin around the grid edge.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use strum::Display;

use super::tile::{TileGrid, TileState};
use crate::error::GenError;
use crate::rng::MapRng;

/// Corridor endpoints per room are capped at this many
pub const MAX_CONNECTIONS: u8 = 2;

/// Rectangular rooms sample both dimensions from [RECT_MIN, RECT_MAX)
const RECT_MIN: usize = 4;
const RECT_MAX: usize = 10;

/// L-shaped rooms are a fixed 5x4 primary box with a 4x3 wing
const L_MAIN_WIDTH: usize = 5;
const L_MAIN_HEIGHT: usize = 4;
const L_WING_WIDTH: usize = 4;
const L_WING_HEIGHT: usize = 3;

/// Polygon rooms sample [POLY_MIN_VERTICES, POLY_MAX_VERTICES) vertices
/// at radius [POLY_MIN_RADIUS, POLY_MAX_RADIUS) from the anchor
const POLY_MIN_VERTICES: usize = 3;
const POLY_MAX_VERTICES: usize = 8;
const POLY_MIN_RADIUS: f64 = 3.0;
const POLY_MAX_RADIUS: f64 = 6.0;

/// Which edge of the primary box an L-shaped room's wing extends from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Orientation {
    Left,
    Right,
    Up,
    Down,
}

impl Orientation {
    fn sample(rng: &mut MapRng) -> Self {
        match rng.rn2(4) {
            0 => Orientation::Left,
            1 => Orientation::Right,
            2 => Orientation::Up,
            _ => Orientation::Down,
        }
    }
}

/// Shape-specific payload of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoomShape {
    Rect,
    LShaped {
        wing_width: usize,
        wing_height: usize,
        orientation: Orientation,
    },
    Polygon {
        vertices: Vec<(i64, i64)>,
    },
}

/// A placed room: integer bounding box, connection cap, shape payload.
///
/// Rooms only live in the accepted-room list for the duration of the
/// connection phase; the finished grid does not retain them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub connections: u8,
    pub shape: RoomShape,
}

impl Room {
    /// Synthesize one candidate room, uniformly choosing a shape variant.
    ///
    /// Fails with [`GenError::EmptyRange`] when the grid cannot fit the
    /// chosen shape inside the one-tile margin.
    pub fn sample(grid_width: usize, grid_height: usize, rng: &mut MapRng) -> Result<Self, GenError> {
        match rng.rn2(3) {
            1 => Self::sample_lshaped(grid_width, grid_height, rng),
            2 => Self::sample_polygon(grid_width, grid_height, rng),
            _ => Self::sample_rect(grid_width, grid_height, rng),
        }
    }

    fn sample_rect(grid_width: usize, grid_height: usize, rng: &mut MapRng) -> Result<Self, GenError> {
        let width = rng.span(RECT_MIN, RECT_MAX);
        let height = rng.span(RECT_MIN, RECT_MAX);
        let x = span_checked(rng, "rect room x", 1, grid_width as i64 - width as i64 - 1)?;
        let y = span_checked(rng, "rect room y", 1, grid_height as i64 - height as i64 - 1)?;

        Ok(Self {
            x: x as usize,
            y: y as usize,
            width,
            height,
            connections: 0,
            shape: RoomShape::Rect,
        })
    }

    fn sample_lshaped(
        grid_width: usize,
        grid_height: usize,
        rng: &mut MapRng,
    ) -> Result<Self, GenError> {
        let orientation = Orientation::sample(rng);
        let (extent_w, extent_h) = l_shape_extent(orientation);
        let x = span_checked(rng, "l-room x", 1, grid_width as i64 - extent_w as i64 - 1)?;
        let y = span_checked(rng, "l-room y", 1, grid_height as i64 - extent_h as i64 - 1)?;

        Ok(Self {
            x: x as usize,
            y: y as usize,
            width: L_MAIN_WIDTH,
            height: L_MAIN_HEIGHT,
            connections: 0,
            shape: RoomShape::LShaped {
                wing_width: L_WING_WIDTH,
                wing_height: L_WING_HEIGHT,
                orientation,
            },
        })
    }

    fn sample_polygon(
        grid_width: usize,
        grid_height: usize,
        rng: &mut MapRng,
    ) -> Result<Self, GenError> {
        let count = rng.span(POLY_MIN_VERTICES, POLY_MAX_VERTICES);
        let mut offsets = Vec::with_capacity(count);
        for _ in 0..count {
            let angle = rng.span_f64(0.0, TAU);
            let radius = rng.span_f64(POLY_MIN_RADIUS, POLY_MAX_RADIUS);
            offsets.push((
                (radius * angle.cos()) as i64,
                (radius * angle.sin()) as i64,
            ));
        }

        let (mut min_x, mut max_x) = (i64::MAX, i64::MIN);
        let (mut min_y, mut max_y) = (i64::MAX, i64::MIN);
        for &(vx, vy) in &offsets {
            min_x = min_x.min(vx);
            max_x = max_x.max(vx);
            min_y = min_y.min(vy);
            max_y = max_y.max(vy);
        }

        // Translate so the vertex bounding box sits inside the margin.
        let tx = span_checked(rng, "polygon room x", 1 - min_x, grid_width as i64 - 1 - max_x)?;
        let ty = span_checked(rng, "polygon room y", 1 - min_y, grid_height as i64 - 1 - max_y)?;
        let vertices: Vec<(i64, i64)> = offsets
            .into_iter()
            .map(|(vx, vy)| (vx + tx, vy + ty))
            .collect();

        Ok(Self {
            x: (min_x + tx) as usize,
            y: (min_y + ty) as usize,
            width: (max_x - min_x) as usize,
            height: (max_y - min_y) as usize,
            connections: 0,
            shape: RoomShape::Polygon { vertices },
        })
    }

    /// Strict AABB overlap test against another room's bounding box
    pub fn intersects(&self, other: &Room) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Center of the bounding box
    pub fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Carve this room's floor cells into the grid
    pub fn carve(&self, grid: &mut TileGrid) -> Result<(), GenError> {
        match &self.shape {
            RoomShape::Rect => self.carve_rect(grid),
            RoomShape::LShaped {
                wing_width,
                wing_height,
                orientation,
            } => self.carve_lshape(grid, *wing_width, *wing_height, *orientation),
            RoomShape::Polygon { vertices } => self.carve_polygon(grid, vertices),
        }
    }

    fn carve_rect(&self, grid: &mut TileGrid) -> Result<(), GenError> {
        fill_floor(grid, self.x..self.x + self.width, self.y..self.y + self.height)
    }

    fn carve_lshape(
        &self,
        grid: &mut TileGrid,
        wing_w: usize,
        wing_h: usize,
        orientation: Orientation,
    ) -> Result<(), GenError> {
        fill_floor(grid, self.x..self.x + self.width, self.y..self.y + self.height)?;

        match orientation {
            Orientation::Left => fill_floor(
                grid,
                self.x..self.x + wing_w,
                self.y + self.height..self.y + self.height + wing_h,
            ),
            Orientation::Right => fill_floor(
                grid,
                self.x + self.height..self.x + self.width + wing_w,
                self.y..self.y + self.height + wing_h,
            ),
            Orientation::Up => fill_floor(
                grid,
                self.x..self.x + self.width + wing_w,
                self.y + self.height..self.y + self.height + wing_h,
            ),
            Orientation::Down => fill_floor(
                grid,
                self.x..self.x + self.width,
                self.y..self.y + self.height + wing_h,
            ),
        }
    }

    fn carve_polygon(&self, grid: &mut TileGrid, vertices: &[(i64, i64)]) -> Result<(), GenError> {
        for x in self.x..self.x + self.width {
            for y in self.y..self.y + self.height {
                if point_in_polygon(x as i64, y as i64, vertices) {
                    grid.set(x, y, TileState::Floor)?;
                }
            }
        }
        Ok(())
    }
}

/// Total carved extent of an L room for a given orientation
fn l_shape_extent(orientation: Orientation) -> (usize, usize) {
    match orientation {
        Orientation::Left => (L_MAIN_WIDTH.max(L_WING_WIDTH), L_MAIN_HEIGHT + L_WING_HEIGHT),
        Orientation::Right | Orientation::Up => {
            (L_MAIN_WIDTH + L_WING_WIDTH, L_MAIN_HEIGHT + L_WING_HEIGHT)
        }
        Orientation::Down => (L_MAIN_WIDTH, L_MAIN_HEIGHT + L_WING_HEIGHT),
    }
}

fn fill_floor(
    grid: &mut TileGrid,
    xs: std::ops::Range<usize>,
    ys: std::ops::Range<usize>,
) -> Result<(), GenError> {
    for x in xs {
        for y in ys.clone() {
            grid.set(x, y, TileState::Floor)?;
        }
    }
    Ok(())
}

/// Even-odd ray cast: count edges crossing the horizontal ray at `py`
/// strictly left of `px`
fn point_in_polygon(px: i64, py: i64, vertices: &[(i64, i64)]) -> bool {
    let Some(mut j) = vertices.len().checked_sub(1) else {
        return false;
    };

    let mut inside = false;
    for i in 0..vertices.len() {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi < py && yj >= py) || (yj < py && yi >= py) {
            let t = (py - yi) as f64 / (yj - yi) as f64;
            if (xi as f64 + t * (xj - xi) as f64) < px as f64 {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Uniform sample from [lo, hi), failing on an empty range
fn span_checked(
    rng: &mut MapRng,
    what: &'static str,
    lo: i64,
    hi: i64,
) -> Result<i64, GenError> {
    if hi <= lo {
        return Err(GenError::EmptyRange { what, lo, hi });
    }
    Ok(rng.span_i64(lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounding_box_in_margin(room: &Room, grid_w: usize, grid_h: usize) -> bool {
        room.x >= 1
            && room.y >= 1
            && room.x + room.width <= grid_w - 1
            && room.y + room.height <= grid_h - 1
    }

    #[test]
    fn test_sampled_rooms_respect_margin() {
        for seed in 0..200 {
            let mut rng = MapRng::new(seed);
            let room = Room::sample(40, 30, &mut rng).expect("40x30 fits every shape");
            assert!(
                bounding_box_in_margin(&room, 40, 30),
                "seed {seed}: {room:?}"
            );
        }
    }

    #[test]
    fn test_carving_stays_in_margin() {
        for seed in 0..200 {
            let mut rng = MapRng::new(seed);
            let mut grid = TileGrid::new(40, 30);
            let room = Room::sample(40, 30, &mut rng).expect("40x30 fits every shape");
            room.carve(&mut grid).expect("carve stays in bounds");

            for (x, y, state) in grid.cells() {
                if state == TileState::Floor {
                    assert!(
                        (1..39).contains(&x) && (1..29).contains(&y),
                        "seed {seed}: floor at ({x}, {y})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_rect_sampling_fails_on_tiny_grid() {
        let mut rng = MapRng::new(42);
        let err = Room::sample_rect(6, 6, &mut rng).expect_err("6x6 cannot fit a 4-wide room");
        assert!(matches!(err, GenError::EmptyRange { .. }));
    }

    #[test]
    fn test_lshape_sampling_fails_on_short_grid() {
        // Every orientation needs 7 rows of extent plus margins.
        let mut rng = MapRng::new(42);
        let err = Room::sample_lshaped(40, 9, &mut rng).expect_err("9 rows is too short");
        assert!(matches!(err, GenError::EmptyRange { .. }));
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = Room {
            x: 2,
            y: 2,
            width: 4,
            height: 4,
            connections: 0,
            shape: RoomShape::Rect,
        };
        // Shares the x=6 edge: not an overlap under strict inequalities.
        let touching = Room { x: 6, ..a.clone() };
        assert!(!a.intersects(&touching));
        assert!(!touching.intersects(&a));

        let overlapping = Room { x: 5, y: 5, ..a.clone() };
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));

        let distant = Room { x: 20, y: 20, ..a.clone() };
        assert!(!a.intersects(&distant));
    }

    #[test]
    fn test_lshape_down_carve() {
        let mut grid = TileGrid::new(20, 20);
        let room = Room {
            x: 3,
            y: 3,
            width: L_MAIN_WIDTH,
            height: L_MAIN_HEIGHT,
            connections: 0,
            shape: RoomShape::LShaped {
                wing_width: L_WING_WIDTH,
                wing_height: L_WING_HEIGHT,
                orientation: Orientation::Down,
            },
        };
        room.carve(&mut grid).expect("carve in bounds");

        // Down extends the primary column block by the wing height.
        assert_eq!(grid.count(TileState::Floor), L_MAIN_WIDTH * (L_MAIN_HEIGHT + L_WING_HEIGHT));
        assert_eq!(grid.get(3, 9), Ok(TileState::Floor));
        assert_eq!(grid.get(3, 10), Ok(TileState::Empty));
    }

    #[test]
    fn test_lshape_left_carve() {
        let mut grid = TileGrid::new(20, 20);
        let room = Room {
            x: 3,
            y: 3,
            width: L_MAIN_WIDTH,
            height: L_MAIN_HEIGHT,
            connections: 0,
            shape: RoomShape::LShaped {
                wing_width: L_WING_WIDTH,
                wing_height: L_WING_HEIGHT,
                orientation: Orientation::Left,
            },
        };
        room.carve(&mut grid).expect("carve in bounds");

        assert_eq!(
            grid.count(TileState::Floor),
            L_MAIN_WIDTH * L_MAIN_HEIGHT + L_WING_WIDTH * L_WING_HEIGHT
        );
        // Wing hangs below the primary box, flush with its left edge.
        assert_eq!(grid.get(3, 7), Ok(TileState::Floor));
        assert_eq!(grid.get(6, 7), Ok(TileState::Floor));
        assert_eq!(grid.get(7, 7), Ok(TileState::Empty));
    }

    #[test]
    fn test_polygon_vertex_count() {
        for seed in 0..100 {
            let mut rng = MapRng::new(seed);
            let room = Room::sample_polygon(40, 30, &mut rng).expect("40x30 fits polygons");
            let RoomShape::Polygon { vertices } = &room.shape else {
                panic!("expected a polygon");
            };
            assert!((POLY_MIN_VERTICES..POLY_MAX_VERTICES).contains(&vertices.len()));
        }
    }

    #[test]
    fn test_point_in_polygon_square() {
        let square = [(2, 2), (8, 2), (8, 8), (2, 8)];
        assert!(point_in_polygon(5, 5, &square));
        assert!(!point_in_polygon(1, 5, &square));
        assert!(!point_in_polygon(9, 5, &square));
        assert!(!point_in_polygon(5, 9, &square));
    }

    #[test]
    fn test_center() {
        let room = Room {
            x: 10,
            y: 10,
            width: 5,
            height: 5,
            connections: 0,
            shape: RoomShape::Rect,
        };
        assert_eq!(room.center(), (12, 12));
    }
}
