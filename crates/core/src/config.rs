//! Generation parameters fixed for the lifetime of one build.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{PathBias, Pos};

pub const MIN_ROOM_SIDE: i32 = 4;
pub const MAX_ROOM_SIDE: i32 = 256;
pub const MAX_CORRIDOR: i32 = 64;
pub const MAX_ROOM_COUNT: usize = 1_000;
/// Bound on either seed coordinate. With the other maxima every reachable origin, stranded rooms
/// included, stays well inside `i32`.
pub const MAX_SEED_COORD: i32 = 1_000_000;
pub const MIN_DOORS_PER_ROOM: usize = 2;
pub const MAX_DOORS_PER_ROOM: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub target_room_count: usize,
    pub room_width: i32,
    pub room_height: i32,
    pub distance_between_rooms: i32,
    pub max_doors_per_room: usize,
    pub path_bias: PathBias,
    pub seed_origin: Pos,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            target_room_count: 3,
            room_width: 19,
            room_height: 12,
            distance_between_rooms: 2,
            max_doors_per_room: 3,
            path_bias: PathBias::Rightward,
            seed_origin: Pos::new(-10, -8),
        }
    }
}

impl DungeonConfig {
    pub fn with_room_count(mut self, target_room_count: usize) -> Self {
        self.target_room_count = target_room_count;
        self
    }

    pub fn with_path_bias(mut self, path_bias: PathBias) -> Self {
        self.path_bias = path_bias;
        self
    }

    /// Horizontal distance between the origins of side-by-side rooms.
    pub fn span_x(&self) -> i32 {
        self.room_width + self.distance_between_rooms
    }

    /// Vertical distance between the origins of stacked rooms.
    pub fn span_y(&self) -> i32 {
        self.room_height + self.distance_between_rooms
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_room_count == 0 {
            return Err(ConfigError::NoRooms);
        }
        if self.room_width < MIN_ROOM_SIDE || self.room_height < MIN_ROOM_SIDE {
            return Err(ConfigError::RoomTooSmall {
                width: self.room_width,
                height: self.room_height,
            });
        }
        if self.target_room_count > MAX_ROOM_COUNT {
            return Err(ConfigError::TooManyRooms { count: self.target_room_count });
        }
        if self.room_width > MAX_ROOM_SIDE || self.room_height > MAX_ROOM_SIDE {
            return Err(ConfigError::RoomTooLarge {
                width: self.room_width,
                height: self.room_height,
            });
        }
        if self.distance_between_rooms < 1 {
            return Err(ConfigError::NoCorridor { distance: self.distance_between_rooms });
        }
        if self.distance_between_rooms > MAX_CORRIDOR {
            return Err(ConfigError::CorridorTooLong { distance: self.distance_between_rooms });
        }
        let Pos { x, y } = self.seed_origin;
        if x.unsigned_abs() > MAX_SEED_COORD.unsigned_abs()
            || y.unsigned_abs() > MAX_SEED_COORD.unsigned_abs()
        {
            return Err(ConfigError::SeedOriginOutOfRange { origin: self.seed_origin });
        }
        if !(MIN_DOORS_PER_ROOM..=MAX_DOORS_PER_ROOM).contains(&self.max_doors_per_room) {
            return Err(ConfigError::DoorCapOutOfRange { max_doors: self.max_doors_per_room });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NoRooms,
    TooManyRooms { count: usize },
    RoomTooSmall { width: i32, height: i32 },
    RoomTooLarge { width: i32, height: i32 },
    NoCorridor { distance: i32 },
    CorridorTooLong { distance: i32 },
    SeedOriginOutOfRange { origin: Pos },
    DoorCapOutOfRange { max_doors: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRooms => write!(f, "target room count must be at least 1"),
            Self::RoomTooSmall { width, height } => write!(
                f,
                "room size {width}x{height} is below the minimum of {MIN_ROOM_SIDE}x{MIN_ROOM_SIDE}"
            ),
            Self::TooManyRooms { count } => {
                write!(f, "target room count {count} exceeds {MAX_ROOM_COUNT}")
            }
            Self::RoomTooLarge { width, height } => write!(
                f,
                "room size {width}x{height} is above the maximum of {MAX_ROOM_SIDE}x{MAX_ROOM_SIDE}"
            ),
            Self::NoCorridor { distance } => {
                write!(f, "distance between rooms must be positive, got {distance}")
            }
            Self::CorridorTooLong { distance } => {
                write!(f, "distance between rooms {distance} exceeds {MAX_CORRIDOR}")
            }
            Self::SeedOriginOutOfRange { origin } => write!(
                f,
                "seed origin ({}, {}) is outside +/-{MAX_SEED_COORD}",
                origin.x, origin.y
            ),
            Self::DoorCapOutOfRange { max_doors } => write!(
                f,
                "max doors per room must be within {MIN_DOORS_PER_ROOM}..={MAX_DOORS_PER_ROOM}, got {max_doors}"
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;

    #[test]
    fn default_config_matches_reference_room_size() {
        let config = DungeonConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.span_x(), 21);
        assert_eq!(config.span_y(), 14);
    }

    #[test]
    fn rejects_zero_rooms_and_tiny_rooms() {
        assert_eq!(DungeonConfig::default().with_room_count(0).validate(), Err(ConfigError::NoRooms));

        let tiny = DungeonConfig { room_height: 3, ..DungeonConfig::default() };
        assert_eq!(tiny.validate(), Err(ConfigError::RoomTooSmall { width: 19, height: 3 }));
    }

    #[test]
    fn rejects_touching_rooms_and_door_caps_outside_wall_count() {
        let touching = DungeonConfig { distance_between_rooms: 0, ..DungeonConfig::default() };
        assert_eq!(touching.validate(), Err(ConfigError::NoCorridor { distance: 0 }));

        for max_doors in [0, 1, 5] {
            let config = DungeonConfig { max_doors_per_room: max_doors, ..DungeonConfig::default() };
            assert_eq!(config.validate(), Err(ConfigError::DoorCapOutOfRange { max_doors }));
        }
    }

    #[test]
    fn rejects_room_counts_above_the_cap() {
        let at_cap = DungeonConfig::default().with_room_count(MAX_ROOM_COUNT);
        assert_eq!(at_cap.validate(), Ok(()));

        let over = DungeonConfig::default().with_room_count(MAX_ROOM_COUNT + 1);
        assert_eq!(over.validate(), Err(ConfigError::TooManyRooms { count: MAX_ROOM_COUNT + 1 }));
    }

    #[test]
    fn rejects_rooms_too_large_to_allocate() {
        let huge = DungeonConfig { room_width: i32::MAX - 4, ..DungeonConfig::default() };
        assert_eq!(
            huge.validate(),
            Err(ConfigError::RoomTooLarge { width: i32::MAX - 4, height: 12 })
        );

        let tall = DungeonConfig { room_height: MAX_ROOM_SIDE + 1, ..DungeonConfig::default() };
        assert!(matches!(tall.validate(), Err(ConfigError::RoomTooLarge { .. })));

        let widest = DungeonConfig {
            room_width: MAX_ROOM_SIDE,
            room_height: MAX_ROOM_SIDE,
            ..DungeonConfig::default()
        };
        assert_eq!(widest.validate(), Ok(()));
    }

    #[test]
    fn rejects_corridors_that_would_overflow_neighbour_origins() {
        let far = DungeonConfig { distance_between_rooms: i32::MAX - 100, ..DungeonConfig::default() };
        assert_eq!(far.validate(), Err(ConfigError::CorridorTooLong { distance: i32::MAX - 100 }));

        let longest = DungeonConfig { distance_between_rooms: MAX_CORRIDOR, ..DungeonConfig::default() };
        assert_eq!(longest.validate(), Ok(()));
    }

    #[test]
    fn rejects_seed_origins_near_the_integer_edge() {
        for origin in [Pos::new(i32::MIN, 0), Pos::new(0, MAX_SEED_COORD + 1)] {
            let config = DungeonConfig { seed_origin: origin, ..DungeonConfig::default() };
            assert_eq!(config.validate(), Err(ConfigError::SeedOriginOutOfRange { origin }));
        }
        let corner = DungeonConfig {
            seed_origin: Pos::new(-MAX_SEED_COORD, MAX_SEED_COORD),
            ..DungeonConfig::default()
        };
        assert_eq!(corner.validate(), Ok(()));
    }

    #[test]
    fn largest_accepted_config_generates_without_overflow() {
        let config = DungeonConfig {
            target_room_count: 60,
            room_width: MAX_ROOM_SIDE,
            room_height: MAX_ROOM_SIDE,
            distance_between_rooms: MAX_CORRIDOR,
            max_doors_per_room: MAX_DOORS_PER_ROOM,
            seed_origin: Pos::new(MAX_SEED_COORD, -MAX_SEED_COORD),
            ..DungeonConfig::default()
        };
        let layout = generate(config, 3).expect("build");
        assert_eq!(layout.rooms.len(), 60);
    }

    #[test]
    fn error_messages_name_the_offending_value() {
        let err = ConfigError::DoorCapOutOfRange { max_doors: 7 };
        assert!(err.to_string().contains('7'), "message should include the value: {err}");
    }
}
