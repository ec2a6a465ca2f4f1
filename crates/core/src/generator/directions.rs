//! Which walls of a prospective room may still open onto a new neighbour.

use crate::config::DungeonConfig;
use crate::room::{Room, RoomRect};
use crate::types::{Direction, Pos, Wall};

/// Walls whose neighbour slot holds no placed room, minus the wall excluded by the path bias.
///
/// Only exact origin matches are checked. Every origin is reached from the seed room by whole
/// room spans, so distinct origins never produce overlapping footprints.
pub(crate) fn available_walls(origin: Pos, placed: &[Room], config: &DungeonConfig) -> Vec<Wall> {
    let rect = RoomRect::new(origin, config.room_width, config.room_height);
    let excluded = config.path_bias.excluded_wall();
    Wall::ALL
        .into_iter()
        .filter(|&wall| wall != excluded)
        .filter(|&wall| {
            let neighbour = rect.neighbour_origin(wall, config.distance_between_rooms);
            !placed.iter().any(|room| room.origin == neighbour)
        })
        .collect()
}

/// Side of `previous` that `origin` lies on, checking x before y.
pub(crate) fn entrance_direction(previous: Pos, origin: Pos) -> Direction {
    if origin.x > previous.x {
        Direction::East
    } else if origin.x < previous.x {
        Direction::West
    } else if origin.y > previous.y {
        Direction::North
    } else if origin.y < previous.y {
        Direction::South
    } else {
        Direction::None
    }
}
