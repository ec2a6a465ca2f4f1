//! ASCII rendering of a layout, driven through the same presenter calls a game would receive.

use std::collections::BTreeMap;

use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use roomgraph::{Pos, Presenter, PropTemplate, RoomReady, plan_props};

const WALL: char = '#';
const DOOR: char = '+';
const FLOOR: char = '.';
const PROP: char = 'o';

pub struct PreviewPresenter {
    cells: BTreeMap<Pos, char>,
    props_rng: ChaCha8Rng,
    template: PropTemplate,
    skipped: Vec<usize>,
    navigation_rebuilt: bool,
}

impl PreviewPresenter {
    pub fn new(run_seed: u64) -> Self {
        Self {
            cells: BTreeMap::new(),
            props_rng: ChaCha8Rng::seed_from_u64(run_seed ^ 0xA076_1D64_78BD_642F),
            template: PropTemplate::WELL,
            skipped: Vec::new(),
            navigation_rebuilt: false,
        }
    }

    /// Sequence indices of stranded rooms left out of the drawing.
    pub fn skipped(&self) -> &[usize] {
        &self.skipped
    }

    pub fn navigation_rebuilt(&self) -> bool {
        self.navigation_rebuilt
    }

    /// Rows from north to south, trimmed to the drawn cells.
    pub fn render(&self) -> String {
        let Some((min, max)) = self.bounds() else {
            return String::new();
        };

        let mut out = String::new();
        for y in (min.y..=max.y).rev() {
            let row: String =
                (min.x..=max.x).map(|x| *self.cells.get(&Pos::new(x, y)).unwrap_or(&' ')).collect();
            out.push_str(row.trim_end());
            out.push('\n');
        }
        out
    }

    fn bounds(&self) -> Option<(Pos, Pos)> {
        let mut cells = self.cells.keys();
        let first = *cells.next()?;
        let (mut min, mut max) = (first, first);
        for pos in cells {
            min = Pos::new(min.x.min(pos.x), min.y.min(pos.y));
            max = Pos::new(max.x.max(pos.x), max.y.max(pos.y));
        }
        Some((min, max))
    }
}

impl Presenter for PreviewPresenter {
    fn draw_room(&mut self, room: &RoomReady) {
        // Stranded rooms sit thousands of cells away and would blow up the canvas.
        if room.room.stranded {
            self.skipped.push(room.sequence_index());
            return;
        }
        for &pos in &room.room.wall_positions {
            self.cells.insert(pos, WALL);
        }
        for &pos in &room.room.door_positions {
            self.cells.insert(pos, DOOR);
        }
        for &pos in &room.floor_positions {
            self.cells.insert(pos, FLOOR);
        }
    }

    fn place_content(&mut self, room: &RoomReady) {
        if room.room.stranded {
            return;
        }
        for anchor in plan_props(&room.room, self.template, &mut self.props_rng) {
            for cell in self.template.footprint(anchor) {
                self.cells.insert(cell, PROP);
            }
        }
    }

    fn label_room(&mut self, position: Pos, sequence_index: usize) {
        if !self.cells.contains_key(&position) {
            return;
        }
        let digits = sequence_index.to_string();
        for (offset, digit) in (0_i32..).zip(digits.chars()) {
            self.cells.insert(position.offset(offset, 0), digit);
        }
    }

    fn rebuild_navigation(&mut self) {
        self.navigation_rebuilt = true;
    }
}
