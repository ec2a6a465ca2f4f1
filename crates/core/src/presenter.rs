//! Hand-off between the builder and the collaborators that draw and decorate rooms.
//!
//! The builder emits one [`BuildStep::RoomReady`] at a time and will not produce the next room
//! until that room is acknowledged. [`Presenter`] is the synchronous form of the same protocol:
//! returning from a method is the collaborator's completion signal.

use serde::{Deserialize, Serialize};

use crate::room::Room;
use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomReady {
    pub room: Room,
    pub floor_positions: Vec<Pos>,
    pub label_position: Pos,
}

impl RoomReady {
    pub fn new(room: Room) -> Self {
        let floor_positions = room.floor_positions();
        let label_position = room.center();
        Self { room, floor_positions, label_position }
    }

    pub fn sequence_index(&self) -> usize {
        self.room.sequence_index
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildStep {
    RoomReady(RoomReady),
    /// Every room is placed. The navigation mesh should be rebuilt once.
    Complete,
}

pub trait Presenter {
    /// Paint walls, floor, doorways and corridor stubs.
    fn draw_room(&mut self, _room: &RoomReady) {}

    /// Scatter props. `room.room.is_branch` marks side rooms.
    fn place_content(&mut self, _room: &RoomReady) {}

    fn label_room(&mut self, _position: Pos, _sequence_index: usize) {}

    fn rebuild_navigation(&mut self) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}
