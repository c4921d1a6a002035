//! Dungeon generation
//!
//! Tile grid, room shapes, placement, corridor routing, and the phased
//! connectivity pipeline.

mod connect;
mod path;
mod placement;
mod room;
mod tile;

pub use connect::{connect_rooms, generate_map};
pub use path::{CorridorPath, route};
pub use placement::{MAX_ROOMS, MIN_ROOMS, carve_rooms, plan_rooms};
pub use room::{MAX_CONNECTIONS, Orientation, Room, RoomShape};
pub use tile::{TileGrid, TileState};
