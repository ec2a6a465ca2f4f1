//! Finished build report: committed rooms plus whatever the frontier never consumed.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::room::Room;
use crate::types::{Direction, LogEvent, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonLayout {
    /// Storage order. Branch rooms are spliced in, so use `sequence_index` for generation order.
    pub rooms: Vec<Room>,
    pub pending_frontier: Vec<Pos>,
    /// Sequence indices of rooms placed after the frontier ran dry.
    pub stranded: Vec<usize>,
    pub log: Vec<LogEvent>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyGaps {
    pub unconsumed_origins: usize,
    pub stranded_rooms: usize,
}

impl TopologyGaps {
    pub fn is_empty(&self) -> bool {
        self.unconsumed_origins == 0 && self.stranded_rooms == 0
    }
}

impl DungeonLayout {
    pub fn room_by_sequence(&self, sequence_index: usize) -> Option<&Room> {
        self.rooms.iter().find(|room| room.sequence_index == sequence_index)
    }

    pub fn rooms_in_generation_order(&self) -> Vec<&Room> {
        let mut ordered: Vec<&Room> = self.rooms.iter().collect();
        ordered.sort_by_key(|room| room.sequence_index);
        ordered
    }

    pub fn topology_gaps(&self) -> TopologyGaps {
        TopologyGaps {
            unconsumed_origins: self.pending_frontier.len(),
            stranded_rooms: self.stranded.len(),
        }
    }

    /// Stable byte encoding of the geometry. The log is not included.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend((room.sequence_index as u32).to_le_bytes());
            bytes.extend(room.width.to_le_bytes());
            bytes.extend(room.height.to_le_bytes());
            push_pos(&mut bytes, room.origin);
            bytes.push(match room.entrance {
                Direction::North => 0,
                Direction::East => 1,
                Direction::South => 2,
                Direction::West => 3,
                Direction::None => 4,
            });
            bytes.push(u8::from(room.is_branch));
            bytes.push(u8::from(room.stranded));
            bytes.extend((room.door_positions.len() as u32).to_le_bytes());
            for &door in &room.door_positions {
                push_pos(&mut bytes, door);
            }
            bytes.extend((room.wall_positions.len() as u32).to_le_bytes());
            for &wall in &room.wall_positions {
                push_pos(&mut bytes, wall);
            }
        }

        bytes.extend((self.pending_frontier.len() as u32).to_le_bytes());
        for &origin in &self.pending_frontier {
            push_pos(&mut bytes, origin);
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_pos(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.x.to_le_bytes());
    bytes.extend(pos.y.to_le_bytes());
}
