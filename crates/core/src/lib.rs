pub mod config;
pub mod content;
pub mod generator;
pub mod layout;
pub mod presenter;
pub mod rng;
pub mod room;
pub mod types;
pub mod validate;

pub use config::{ConfigError, DungeonConfig};
pub use content::{PropTemplate, plan_props};
pub use generator::{DoorPlan, PolicyInput, RoomGraphBuilder, decide_door_plan, generate};
pub use layout::{DungeonLayout, TopologyGaps};
pub use presenter::{BuildStep, NullPresenter, Presenter, RoomReady};
pub use rng::{RoomRng, derive_layout_seed, layout_rng};
pub use room::{Room, RoomRect};
pub use types::*;
pub use validate::{LayoutViolation, check_layout};
