//! Room placement: candidate synthesis with overlap rejection.

use super::room::Room;
use super::tile::TileGrid;
use crate::error::GenError;
use crate::rng::MapRng;

/// Target room count is sampled from [MIN_ROOMS, MAX_ROOMS)
pub const MIN_ROOMS: usize = 5;
pub const MAX_ROOMS: usize = 11;

/// Plan the accepted-room list for a grid of the given dimensions.
///
/// Samples a target count, then makes exactly that many attempts: a
/// candidate whose bounding box strictly overlaps an accepted room is
/// discarded with no retry, so the final count may fall short of the
/// target. Accepted rooms never overlap pairwise.
pub fn plan_rooms(
    grid_width: usize,
    grid_height: usize,
    rng: &mut MapRng,
) -> Result<Vec<Room>, GenError> {
    let target = rng.span(MIN_ROOMS, MAX_ROOMS);
    let mut accepted: Vec<Room> = Vec::with_capacity(target);

    for _ in 0..target {
        let candidate = Room::sample(grid_width, grid_height, rng)?;
        if accepted.iter().any(|room| candidate.intersects(room)) {
            continue;
        }
        accepted.push(candidate);
    }

    Ok(accepted)
}

/// Carve every accepted room's floor into the grid
pub fn carve_rooms(grid: &mut TileGrid, rooms: &[Room]) -> Result<(), GenError> {
    for room in rooms {
        room.carve(grid)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::tile::TileState;

    #[test]
    fn test_planned_rooms_never_overlap() {
        for seed in 0..50 {
            let mut rng = MapRng::new(seed);
            let rooms = plan_rooms(80, 24, &mut rng).expect("80x24 fits every shape");

            assert!(!rooms.is_empty());
            assert!(rooms.len() < MAX_ROOMS);
            for (i, a) in rooms.iter().enumerate() {
                for b in rooms.iter().skip(i + 1) {
                    assert!(!a.intersects(b), "seed {seed}: {a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_planned_rooms_respect_margin() {
        for seed in 0..50 {
            let mut rng = MapRng::new(seed);
            let rooms = plan_rooms(80, 24, &mut rng).expect("80x24 fits every shape");
            for room in &rooms {
                assert!(room.x >= 1 && room.y >= 1, "seed {seed}: {room:?}");
                assert!(
                    room.x + room.width <= 79 && room.y + room.height <= 23,
                    "seed {seed}: {room:?}"
                );
            }
        }
    }

    #[test]
    fn test_carve_rooms_floors_grid() {
        let mut rng = MapRng::new(42);
        let mut grid = TileGrid::new(80, 24);
        let rooms = plan_rooms(80, 24, &mut rng).expect("80x24 fits every shape");
        carve_rooms(&mut grid, &rooms).expect("accepted rooms carve in bounds");
        assert!(grid.count(TileState::Floor) > 0);
    }

    #[test]
    fn test_carve_rooms_empty_list_is_noop() {
        let mut grid = TileGrid::new(20, 20);
        carve_rooms(&mut grid, &[]).expect("nothing to carve");
        assert_eq!(grid.count(TileState::Empty), 400);
    }

    #[test]
    fn test_too_small_grid_is_fatal() {
        let mut rng = MapRng::new(42);
        let err = plan_rooms(6, 6, &mut rng).expect_err("6x6 cannot fit any shape");
        assert!(matches!(err, GenError::EmptyRange { .. }));
    }
}
