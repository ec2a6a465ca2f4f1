use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Side through which a room connects to its predecessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
    None,
}

/// Side of a room that can hold an extra door leading to a queued neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Bottom,
    Left,
    Right,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Top, Wall::Bottom, Wall::Left, Wall::Right];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathBias {
    #[default]
    Rightward,
    Leftward,
}

impl PathBias {
    pub fn excluded_wall(self) -> Wall {
        match self {
            Self::Rightward => Wall::Left,
            Self::Leftward => Wall::Right,
        }
    }
}

/// Which row of the door-count table produced a room's door plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorRule {
    FinalRoom,
    FrontierPressure,
    AbsorbPreviousBranching,
    SecondToLast,
    Random,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    GenerationAlreadyStarted,
    DirectionsEvaluated { origin: Pos, available: Vec<Wall> },
    DoorPlanChosen { sequence_index: usize, door_count: usize, is_branch: bool, rule: DoorRule },
    FrontierQueued { origin: Pos },
    DuplicateFrontierOrigin { origin: Pos },
    FrontierExhausted { sequence_index: usize, placed_at: Pos },
    ExtraDoorsSkipped { sequence_index: usize, requested: usize, placed: usize },
    RoomCommitted { sequence_index: usize, origin: Pos, storage_index: usize, is_branch: bool },
    NavigationRebuildRequested,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    InvalidConfig(ConfigError),
    NotStarted,
    AlreadyStarted,
    AwaitingAcknowledgement { sequence_index: usize },
    UnexpectedAcknowledgement { expected: usize, received: usize },
    NoRoomInFlight,
    AlreadyComplete,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(err) => write!(f, "invalid dungeon config: {err}"),
            Self::NotStarted => write!(f, "generation has not been started"),
            Self::AlreadyStarted => write!(f, "dungeon generation already started"),
            Self::AwaitingAcknowledgement { sequence_index } => {
                write!(f, "room {sequence_index} has not been acknowledged by the presenter")
            }
            Self::UnexpectedAcknowledgement { expected, received } => {
                write!(f, "acknowledged room {received} while room {expected} is in flight")
            }
            Self::NoRoomInFlight => write!(f, "no room is waiting for acknowledgement"),
            Self::AlreadyComplete => write!(f, "generation is already complete"),
        }
    }
}

impl Error for BuildError {}

impl From<ConfigError> for BuildError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err)
    }
}
