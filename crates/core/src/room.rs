//! Room records and the rectangle geometry shared by placement, validation and props.

use serde::{Deserialize, Serialize};

use crate::types::{Direction, Pos, Wall};

/// Rectangle of a room. Edges are inclusive, so a room of width `w` covers `w + 1` columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoomRect {
    pub origin: Pos,
    pub width: i32,
    pub height: i32,
}

impl RoomRect {
    pub fn new(origin: Pos, width: i32, height: i32) -> Self {
        Self { origin, width, height }
    }

    pub fn right(self) -> i32 {
        self.origin.x + self.width
    }

    pub fn top(self) -> i32 {
        self.origin.y + self.height
    }

    pub fn center(self) -> Pos {
        self.origin.offset(self.width / 2, self.height / 2)
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.origin.x <= other.right()
            && self.right() >= other.origin.x
            && self.origin.y <= other.top()
            && self.top() >= other.origin.y
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.origin.x && pos.x <= self.right() && pos.y >= self.origin.y && pos.y <= self.top()
    }

    pub fn is_edge(self, pos: Pos) -> bool {
        self.contains(pos)
            && (pos.x == self.origin.x
                || pos.x == self.right()
                || pos.y == self.origin.y
                || pos.y == self.top())
    }

    pub fn wall_midpoint(self, wall: Wall) -> Pos {
        let Pos { x, y } = self.origin;
        match wall {
            Wall::Top => Pos::new(x + self.width / 2, y + self.height),
            Wall::Bottom => Pos::new(x + self.width / 2, y),
            Wall::Left => Pos::new(x, y + self.height / 2),
            Wall::Right => Pos::new(x + self.width, y + self.height / 2),
        }
    }

    /// Origin of the same-sized room that a door on `wall` leads to.
    pub fn neighbour_origin(self, wall: Wall, distance_between_rooms: i32) -> Pos {
        match wall {
            Wall::Top => self.origin.offset(0, self.height + distance_between_rooms),
            Wall::Bottom => self.origin.offset(0, -self.height - distance_between_rooms),
            Wall::Left => self.origin.offset(-self.width - distance_between_rooms, 0),
            Wall::Right => self.origin.offset(self.width + distance_between_rooms, 0),
        }
    }

    /// Door cell used to enter a room from its predecessor.
    pub fn entrance_door(self, entrance: Direction) -> Pos {
        self.wall_midpoint(entrance_wall(entrance))
    }

    /// Perimeter cells that are not doors, then floor cells clear of the double-height walls.
    pub fn walls_and_floor(self, door_positions: &[Pos]) -> (Vec<Pos>, Vec<Pos>) {
        let mut walls = Vec::new();
        let mut floor = Vec::new();
        for j in 0..=self.height {
            for k in 0..=self.width {
                let pos = self.origin.offset(k, j);
                if j == 0 || j == self.height || k == 0 || k == self.width {
                    if !door_positions.contains(&pos) {
                        walls.push(pos);
                    }
                } else if j > 1 && j < self.height - 1 {
                    floor.push(pos);
                }
            }
        }
        (walls, floor)
    }
}

/// Wall holding the entrance door for a given entrance direction.
///
/// A room entered from the east sits east of its predecessor, so its door is on the left.
pub fn entrance_wall(entrance: Direction) -> Wall {
    match entrance {
        Direction::North => Wall::Bottom,
        Direction::South => Wall::Top,
        Direction::East | Direction::None => Wall::Left,
        Direction::West => Wall::Right,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub width: i32,
    pub height: i32,
    pub origin: Pos,
    pub door_positions: Vec<Pos>,
    pub wall_positions: Vec<Pos>,
    pub entrance: Direction,
    pub sequence_index: usize,
    pub is_branch: bool,
    pub stranded: bool,
}

impl Room {
    pub fn rect(&self) -> RoomRect {
        RoomRect::new(self.origin, self.width, self.height)
    }

    pub fn door_count(&self) -> usize {
        self.door_positions.len()
    }

    pub fn center(&self) -> Pos {
        self.rect().center()
    }

    pub fn floor_positions(&self) -> Vec<Pos> {
        self.rect().walls_and_floor(&self.door_positions).1
    }

    pub fn entrance_door(&self) -> Pos {
        self.rect().entrance_door(self.entrance)
    }
}
