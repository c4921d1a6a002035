//! Phased generation pipeline: fill, placement, corridor routing with
//! concurrent connectivity audits, then wall derivation.
//!
//! Phase barriers are structured joins: `rayon::join` for the fill and
//! planning fan-out, one `rayon::scope` spanning both corridor passes so
//! every audit is collected before walls are derived. Audits read the
//! grid while later corridors are still being carved; their verdict is a
//! best-effort snapshot and is only ever logged.

use std::sync::{Mutex, PoisonError, RwLock};

use super::path::{self, CorridorPath};
use super::placement;
use super::room::{MAX_CONNECTIONS, Room};
use super::tile::{TileGrid, TileState};
use crate::error::GenError;
use crate::rng::MapRng;

/// Generate a fully classified map.
///
/// Runs the whole pipeline: parallel fill + room planning, room
/// carving, the primary and densification corridor passes with
/// concurrent audits, and finally wall derivation once every carve and
/// audit has been joined.
pub fn generate_map(width: usize, height: usize, rng: &mut MapRng) -> Result<TileGrid, GenError> {
    let mut grid = TileGrid::new(width, height);

    // Phase 1: fill and candidate planning fan out; the join is the barrier.
    let mut rooms = {
        let (_, planned) = rayon::join(
            || grid.reset(),
            || placement::plan_rooms(width, height, rng),
        );
        planned?
    };
    placement::carve_rooms(&mut grid, &rooms)?;

    // Phases 2-4: corridor carving and audits need shared access.
    if rooms.len() >= 2 {
        let shared = RwLock::new(grid);
        connect_rooms(&shared, &mut rooms);
        grid = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
    }

    // Phase 5: walls only after every carve and audit has been joined.
    grid.derive_walls();
    Ok(grid)
}

/// Link rooms with corridors; all audits are joined before returning.
pub fn connect_rooms(grid: &RwLock<TileGrid>, rooms: &mut [Room]) {
    let verdicts: Mutex<Vec<bool>> = Mutex::new(Vec::new());

    rayon::scope(|scope| {
        // Primary pass: each later room joins the first already-connected
        // partner with spare capacity. Room 0 is the connectivity root.
        let mut connected: Vec<usize> = vec![0];
        for i in 1..rooms.len() {
            if rooms[i].connections >= MAX_CONNECTIONS {
                continue;
            }
            let Some(&partner) = connected
                .iter()
                .find(|&&j| j != i && rooms[j].connections < MAX_CONNECTIONS)
            else {
                continue;
            };

            carve_corridor(grid, rooms[partner].center(), rooms[i].center());
            rooms[partner].connections += 1;
            rooms[i].connections += 1;
            connected.push(i);
            spawn_audit(scope, grid, rooms, &verdicts);
        }

        // Densification pass: every ordered pair of connected rooms with
        // spare capacity gets an extra corridor. Quadratic on purpose;
        // redundant corridors are part of the map texture.
        for &a in &connected {
            for &b in &connected {
                if a == b
                    || rooms[a].connections >= MAX_CONNECTIONS
                    || rooms[b].connections >= MAX_CONNECTIONS
                {
                    continue;
                }
                carve_corridor(grid, rooms[a].center(), rooms[b].center());
                rooms[a].connections += 1;
                rooms[b].connections += 1;
                spawn_audit(scope, grid, rooms, &verdicts);
            }
        }
    });

    // The scope exit joined every audit; surface the tally.
    let verdicts = verdicts.into_inner().unwrap_or_else(PoisonError::into_inner);
    let failed = verdicts.iter().filter(|&&ok| !ok).count();
    if failed > 0 {
        log::warn!(
            "{failed}/{} connectivity audits saw unreachable rooms",
            verdicts.len()
        );
    } else {
        log::debug!("{} connectivity audits passed", verdicts.len());
    }
}

/// Route between two centers and carve the result as floor.
///
/// An empty route carves nothing; that is a silent no-op, not an error.
fn carve_corridor(grid: &RwLock<TileGrid>, from: (usize, usize), to: (usize, usize)) {
    let corridor: CorridorPath = {
        let snapshot = grid.read().unwrap_or_else(PoisonError::into_inner);
        path::route(&snapshot, from, to)
    };
    if corridor.is_empty() {
        return;
    }

    let mut cells = grid.write().unwrap_or_else(PoisonError::into_inner);
    for &(x, y) in &corridor {
        if let Err(err) = cells.set(x, y, TileState::Floor) {
            log::error!("corridor carve skipped a cell: {err}");
        }
    }
}

/// Dispatch one connectivity audit into the scope.
///
/// The audit captures a snapshot of the current room centers and runs
/// concurrently with later carving, so its verdict may be stale.
fn spawn_audit<'s>(
    scope: &rayon::Scope<'s>,
    grid: &'s RwLock<TileGrid>,
    rooms: &[Room],
    verdicts: &'s Mutex<Vec<bool>>,
) {
    let centers: Vec<(usize, usize)> = rooms.iter().map(Room::center).collect();
    scope.spawn(move |_| {
        let ok = audit_connectivity(grid, &centers);
        if !ok {
            log::debug!("connectivity audit: not every room reachable from the root");
        }
        verdicts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ok);
    });
}

/// Route from the root room's center to every center; passes when all
/// routes are non-empty
fn audit_connectivity(grid: &RwLock<TileGrid>, centers: &[(usize, usize)]) -> bool {
    let Some(&root) = centers.first() else {
        return true;
    };
    let snapshot = grid.read().unwrap_or_else(PoisonError::into_inner);
    centers
        .iter()
        .all(|&center| !path::route(&snapshot, root, center).is_empty())
}
