//! Door-count table balancing the room budget against the frontier.
//!
//! Rows are evaluated in order and the first match wins. The goal is that the frontier drains
//! exactly as the room budget runs out while side branches stay one room deep.

use serde::{Deserialize, Serialize};

use crate::rng::RoomRng;
use crate::types::DoorRule;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyInput {
    /// Rooms stored before the one being planned, seed room included.
    pub committed: usize,
    pub target: usize,
    /// Frontier length after this room's origin was taken from it.
    pub frontier_len: usize,
    pub previous_door_count: usize,
    pub available_walls: usize,
    pub max_doors: usize,
}

impl PolicyInput {
    fn remaining(&self) -> usize {
        self.target.saturating_sub(self.committed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorPlan {
    pub door_count: usize,
    pub is_branch: bool,
    pub rule: DoorRule,
}

impl DoorPlan {
    fn new(door_count: usize, is_branch: bool, rule: DoorRule) -> Self {
        Self { door_count, is_branch, rule }
    }
}

pub fn decide_door_plan(input: &PolicyInput, rng: &mut impl RoomRng) -> DoorPlan {
    let remaining = input.remaining();

    if input.committed + 1 == input.target {
        return DoorPlan::new(1, false, DoorRule::FinalRoom);
    }

    if input.frontier_len >= 2 {
        return DoorPlan::new(1, true, DoorRule::FrontierPressure);
    }

    if input.previous_door_count == input.max_doors {
        return if remaining >= 1 && input.frontier_len == 0 {
            DoorPlan::new(2, false, DoorRule::AbsorbPreviousBranching)
        } else {
            DoorPlan::new(1, true, DoorRule::AbsorbPreviousBranching)
        };
    }

    if input.committed + 2 == input.target {
        return if input.frontier_len >= 1 {
            DoorPlan::new(1, true, DoorRule::SecondToLast)
        } else {
            DoorPlan::new(2, false, DoorRule::SecondToLast)
        };
    }

    let cap = random_door_cap(input);
    let mut door_count = if cap >= 2 { rng.between(2, cap) } else { 2 };
    if remaining == 2 {
        door_count = 2;
    }
    DoorPlan::new(door_count, false, DoorRule::Random)
}

/// Upper bound for a random draw: the free walls plus the entrance, and never more doors than
/// rooms left to fill them.
fn random_door_cap(input: &PolicyInput) -> usize {
    let mut cap = input.max_doors;
    if input.available_walls != 0 && cap > input.available_walls {
        cap = input.available_walls + 1;
    }
    let remaining = input.remaining();
    if remaining < cap {
        cap = remaining.saturating_sub(1);
    }
    cap
}
