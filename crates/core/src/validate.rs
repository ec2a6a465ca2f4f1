//! Structural checks over a finished layout, shared by the fuzz tool and the test suite.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::layout::DungeonLayout;
use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutViolation {
    RoomCountMismatch { expected: usize, actual: usize },
    SequenceOutOfRange { sequence_index: usize },
    DuplicateSequenceIndex { sequence_index: usize },
    /// The first door is not the midpoint implied by the entrance direction.
    MissingEntranceDoor { sequence_index: usize },
    DuplicateDoor { sequence_index: usize, position: Pos },
    WallCoversDoor { sequence_index: usize, position: Pos },
    TooManyDoors { sequence_index: usize, door_count: usize },
    DuplicateOrigin { origin: Pos },
    OffLattice { sequence_index: usize, origin: Pos },
    OverlappingFootprints { first: usize, second: usize },
}

impl fmt::Display for LayoutViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoomCountMismatch { expected, actual } => {
                write!(f, "expected {expected} rooms, found {actual}")
            }
            Self::SequenceOutOfRange { sequence_index } => {
                write!(f, "sequence index {sequence_index} is out of range")
            }
            Self::DuplicateSequenceIndex { sequence_index } => {
                write!(f, "sequence index {sequence_index} is used twice")
            }
            Self::MissingEntranceDoor { sequence_index } => {
                write!(f, "room {sequence_index} has no door facing its entrance")
            }
            Self::DuplicateDoor { sequence_index, position } => {
                write!(f, "room {sequence_index} repeats door ({}, {})", position.x, position.y)
            }
            Self::WallCoversDoor { sequence_index, position } => {
                write!(f, "room {sequence_index} has a wall on door ({}, {})", position.x, position.y)
            }
            Self::TooManyDoors { sequence_index, door_count } => {
                write!(f, "room {sequence_index} has {door_count} doors")
            }
            Self::DuplicateOrigin { origin } => {
                write!(f, "two rooms share origin ({}, {})", origin.x, origin.y)
            }
            Self::OffLattice { sequence_index, origin } => {
                let Pos { x, y } = origin;
                write!(f, "room {sequence_index} origin ({x}, {y}) is off the room lattice")
            }
            Self::OverlappingFootprints { first, second } => {
                write!(f, "rooms {first} and {second} overlap")
            }
        }
    }
}

pub fn check_layout(layout: &DungeonLayout, config: &DungeonConfig) -> Vec<LayoutViolation> {
    let mut violations = Vec::new();
    let expected = config.target_room_count;

    if layout.rooms.len() != expected {
        violations.push(LayoutViolation::RoomCountMismatch {
            expected,
            actual: layout.rooms.len(),
        });
    }

    let mut sequence_indices = BTreeSet::new();
    let mut origins = BTreeSet::new();
    for room in &layout.rooms {
        let sequence_index = room.sequence_index;
        if sequence_index >= expected {
            violations.push(LayoutViolation::SequenceOutOfRange { sequence_index });
        }
        if !sequence_indices.insert(sequence_index) {
            violations.push(LayoutViolation::DuplicateSequenceIndex { sequence_index });
        }
        if !origins.insert(room.origin) {
            violations.push(LayoutViolation::DuplicateOrigin { origin: room.origin });
        }
        if !on_lattice(room.origin, config) {
            violations.push(LayoutViolation::OffLattice { sequence_index, origin: room.origin });
        }

        if sequence_index != 0 && room.door_positions.first() != Some(&room.entrance_door()) {
            violations.push(LayoutViolation::MissingEntranceDoor { sequence_index });
        }
        if room.door_count() > config.max_doors_per_room {
            violations.push(LayoutViolation::TooManyDoors {
                sequence_index,
                door_count: room.door_count(),
            });
        }

        let mut doors = BTreeSet::new();
        for &position in &room.door_positions {
            if !doors.insert(position) {
                violations.push(LayoutViolation::DuplicateDoor { sequence_index, position });
            }
        }
        for &position in &room.wall_positions {
            if doors.contains(&position) {
                violations.push(LayoutViolation::WallCoversDoor { sequence_index, position });
            }
        }
    }

    for (i, room) in layout.rooms.iter().enumerate() {
        for other in &layout.rooms[i + 1..] {
            if room.rect().intersects(&other.rect()) {
                violations.push(LayoutViolation::OverlappingFootprints {
                    first: room.sequence_index.min(other.sequence_index),
                    second: room.sequence_index.max(other.sequence_index),
                });
            }
        }
    }

    violations
}

fn on_lattice(origin: Pos, config: &DungeonConfig) -> bool {
    let seed = config.seed_origin;
    (origin.x - seed.x).rem_euclid(config.span_x()) == 0
        && (origin.y - seed.y).rem_euclid(config.span_y()) == 0
}
