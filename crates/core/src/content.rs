//! Prop placement inside a finished room.
//!
//! The first anchor is random but kept out of the door lanes. Later anchors mirror earlier ones
//! across the room so decorations come out roughly symmetric.

use serde::{Deserialize, Serialize};

use crate::rng::RoomRng;
use crate::room::Room;
use crate::types::Pos;

pub const MAX_PROPS_PER_ROOM: usize = 4;

/// Footprint and placement margins of a prop, in cells.
///
/// `min_*` margins are measured from the room origin, `max_*` margins from the far edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropTemplate {
    pub width: i32,
    pub height: i32,
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl PropTemplate {
    pub const WELL: Self = Self { width: 3, height: 3, min_x: 4, min_y: 2, max_x: 4, max_y: 5 };

    pub fn footprint(self, anchor: Pos) -> impl Iterator<Item = Pos> {
        (0..self.height).flat_map(move |dy| (0..self.width).map(move |dx| anchor.offset(dx, dy)))
    }
}

impl Default for PropTemplate {
    fn default() -> Self {
        Self::WELL
    }
}

/// Anchor cells for 1 to [`MAX_PROPS_PER_ROOM`] copies of `template`. Mirrored anchors that
/// would leave the floor are dropped, so the result can be shorter than the drawn count.
pub fn plan_props(room: &Room, template: PropTemplate, rng: &mut impl RoomRng) -> Vec<Pos> {
    let count = rng.between(1, MAX_PROPS_PER_ROOM);
    let Some(first) = first_anchor(room, template, rng) else {
        return Vec::new();
    };

    let mut anchors = vec![first];
    for i in 1..count {
        let candidate = match i {
            1 => mirror_x(room, first),
            2 => mirror_y(room, template, anchors[anchors.len() - 1]),
            _ => mirror_y(room, template, first),
        };
        if anchor_fits(room, template, &anchors, candidate) {
            anchors.push(candidate);
        }
    }
    anchors
}

fn first_anchor(room: &Room, template: PropTemplate, rng: &mut impl RoomRng) -> Option<Pos> {
    let Pos { x: ox, y: oy } = room.origin;
    let mid_x = ox + room.width / 2;
    let mid_y = oy + room.height / 2;

    let xs: Vec<i32> = (ox + template.min_x..=ox + room.width - template.max_x)
        .filter(|x| !(mid_x - 2..=mid_x + 3).contains(x))
        .collect();
    let ys: Vec<i32> = (oy + template.min_y..=oy + room.height - template.max_y)
        .filter(|y| !(mid_y - 2..=mid_y + 1).contains(y))
        .collect();
    if xs.is_empty() || ys.is_empty() {
        return None;
    }

    let x = rng.pick(&xs)?;
    let y = rng.pick(&ys)?;
    Some(Pos::new(x, y))
}

fn mirror_x(room: &Room, anchor: Pos) -> Pos {
    Pos::new(2 * room.origin.x + room.width - anchor.x, anchor.y)
}

fn mirror_y(room: &Room, template: PropTemplate, anchor: Pos) -> Pos {
    let oy = room.origin.y;
    let top = oy + room.height;
    let y = if anchor.y - oy < top - anchor.y {
        top - (anchor.y - oy) - template.height
    } else {
        oy + (top - anchor.y)
    };
    Pos::new(anchor.x, y)
}

fn anchor_fits(room: &Room, template: PropTemplate, placed: &[Pos], anchor: Pos) -> bool {
    let rect = room.rect();
    rect.contains(anchor)
        && !placed.contains(&anchor)
        && template
            .footprint(anchor)
            .all(|cell| !rect.is_edge(cell) && !room.door_positions.contains(&cell))
}
