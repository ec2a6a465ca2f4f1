//! Room-graph generation split into the builder and the pure pieces it drives.

pub mod policy;

mod builder;
mod directions;
mod frontier;

pub use builder::RoomGraphBuilder;
pub use policy::{DoorPlan, PolicyInput, decide_door_plan};

use crate::config::DungeonConfig;
use crate::layout::DungeonLayout;
use crate::presenter::NullPresenter;
use crate::types::BuildError;

pub fn generate(config: DungeonConfig, run_seed: u64) -> Result<DungeonLayout, BuildError> {
    RoomGraphBuilder::from_seed(config, run_seed)?.build(&mut NullPresenter)
}
