//! Room-by-room growth of the dungeon graph.

use rand_chacha::ChaCha8Rng;

use crate::config::DungeonConfig;
use crate::layout::DungeonLayout;
use crate::presenter::{BuildStep, Presenter, RoomReady};
use crate::rng::{RoomRng, layout_rng};
use crate::room::{Room, RoomRect};
use crate::types::{BuildError, Direction, LogEvent, Pos, Wall};

use super::directions::{available_walls, entrance_direction};
use super::frontier::Frontier;
use super::policy::{DoorPlan, PolicyInput, decide_door_plan};

/// Where rooms go when the frontier is empty, far from the main cluster.
const STRANDED_ANCHOR: Pos = Pos::new(5000, -8000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Generating,
    AwaitingAck { sequence_index: usize },
    Complete,
}

pub struct RoomGraphBuilder<R: RoomRng> {
    config: DungeonConfig,
    rng: R,
    rooms: Vec<Room>,
    frontier: Frontier,
    stranded: Vec<usize>,
    log: Vec<LogEvent>,
    phase: Phase,
    generated: usize,
}

impl RoomGraphBuilder<ChaCha8Rng> {
    pub fn from_seed(config: DungeonConfig, run_seed: u64) -> Result<Self, BuildError> {
        let rng = layout_rng(run_seed, &config);
        Self::new(config, rng)
    }
}

impl<R: RoomRng> RoomGraphBuilder<R> {
    /// Validates `config` and places the seed room as sequence 0.
    pub fn new(config: DungeonConfig, rng: R) -> Result<Self, BuildError> {
        config.validate()?;
        let seed_room = seed_room(&config);
        Ok(Self {
            config,
            rng,
            rooms: vec![seed_room],
            frontier: Frontier::default(),
            stranded: Vec::new(),
            log: Vec::new(),
            phase: Phase::Idle,
            generated: 0,
        })
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn pending_frontier(&self) -> Vec<Pos> {
        self.frontier.pending()
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Begins generation. A builder that already started, or already holds generated rooms,
    /// ignores the request.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle || self.rooms.len() > 1 {
            self.log.push(LogEvent::GenerationAlreadyStarted);
            return false;
        }
        self.phase = Phase::Generating;
        true
    }

    pub fn advance(&mut self) -> Result<BuildStep, BuildError> {
        match self.phase {
            Phase::Idle => Err(BuildError::NotStarted),
            Phase::AwaitingAck { sequence_index } => {
                Err(BuildError::AwaitingAcknowledgement { sequence_index })
            }
            Phase::Complete => Err(BuildError::AlreadyComplete),
            Phase::Generating => {
                // The seed room counts toward the target.
                if self.generated + 1 >= self.config.target_room_count {
                    self.phase = Phase::Complete;
                    self.log.push(LogEvent::NavigationRebuildRequested);
                    return Ok(BuildStep::Complete);
                }
                let room = self.generate_room();
                self.generated += 1;
                self.phase = Phase::AwaitingAck { sequence_index: room.sequence_index };
                Ok(BuildStep::RoomReady(RoomReady::new(room)))
            }
        }
    }

    pub fn acknowledge(&mut self, sequence_index: usize) -> Result<(), BuildError> {
        match self.phase {
            Phase::AwaitingAck { sequence_index: expected } if expected == sequence_index => {
                self.phase = Phase::Generating;
                Ok(())
            }
            Phase::AwaitingAck { sequence_index: expected } => {
                Err(BuildError::UnexpectedAcknowledgement { expected, received: sequence_index })
            }
            _ => Err(BuildError::NoRoomInFlight),
        }
    }

    /// Runs the whole build, handing each room to `presenter` before generating the next.
    pub fn build(&mut self, presenter: &mut impl Presenter) -> Result<DungeonLayout, BuildError> {
        if !self.start() {
            return Err(BuildError::AlreadyStarted);
        }
        loop {
            match self.advance()? {
                BuildStep::RoomReady(ready) => {
                    presenter.draw_room(&ready);
                    presenter.label_room(ready.label_position, ready.sequence_index());
                    presenter.place_content(&ready);
                    self.acknowledge(ready.sequence_index())?;
                }
                BuildStep::Complete => {
                    presenter.rebuild_navigation();
                    return Ok(self.layout());
                }
            }
        }
    }

    pub fn layout(&self) -> DungeonLayout {
        DungeonLayout {
            rooms: self.rooms.clone(),
            pending_frontier: self.frontier.pending(),
            stranded: self.stranded.clone(),
            log: self.log.clone(),
        }
    }

    fn generate_room(&mut self) -> Room {
        let sequence_index = self.rooms.len();
        let (origin, entrance, stranded) = self.next_origin(sequence_index);

        let available = available_walls(origin, &self.rooms, &self.config);
        self.log.push(LogEvent::DirectionsEvaluated { origin, available: available.clone() });

        let plan = decide_door_plan(
            &PolicyInput {
                committed: sequence_index,
                target: self.config.target_room_count,
                frontier_len: self.frontier.len(),
                previous_door_count: self.rooms.last().map_or(0, Room::door_count),
                available_walls: available.len(),
                max_doors: self.config.max_doors_per_room,
            },
            &mut self.rng,
        );
        self.log.push(LogEvent::DoorPlanChosen {
            sequence_index,
            door_count: plan.door_count,
            is_branch: plan.is_branch,
            rule: plan.rule,
        });

        let rect = RoomRect::new(origin, self.config.room_width, self.config.room_height);
        let mut door_positions = vec![rect.entrance_door(entrance)];
        self.place_extra_doors(rect, sequence_index, &plan, &available, &mut door_positions);
        let (wall_positions, _) = rect.walls_and_floor(&door_positions);

        let room = Room {
            width: rect.width,
            height: rect.height,
            origin,
            door_positions,
            wall_positions,
            entrance,
            sequence_index,
            is_branch: plan.is_branch,
            stranded,
        };
        self.commit(room.clone());
        room
    }

    fn next_origin(&mut self, sequence_index: usize) -> (Pos, Direction, bool) {
        if self.rooms.len() == 1 {
            let seed = RoomRect::new(
                self.config.seed_origin,
                self.config.room_width,
                self.config.room_height,
            );
            let origin = seed.neighbour_origin(Wall::Right, self.config.distance_between_rooms);
            return (origin, Direction::East, false);
        }

        if let Some(origin) = self.frontier.pop() {
            let previous = self.rooms.last().map_or(origin, |room| room.origin);
            return (origin, entrance_direction(previous, origin), false);
        }

        let placed_at = self.stranded_origin();
        self.log.push(LogEvent::FrontierExhausted { sequence_index, placed_at });
        (placed_at, Direction::None, true)
    }

    /// First free slot east of the anchor, snapped to the seed room's lattice.
    fn stranded_origin(&self) -> Pos {
        let seed = self.config.seed_origin;
        let span_x = self.config.span_x();
        let span_y = self.config.span_y();
        let mut origin = Pos::new(
            seed.x + (STRANDED_ANCHOR.x - seed.x).div_euclid(span_x) * span_x,
            seed.y + (STRANDED_ANCHOR.y - seed.y).div_euclid(span_y) * span_y,
        );
        while self.rooms.iter().any(|room| room.origin == origin) {
            origin = origin.offset(span_x, 0);
        }
        origin
    }

    fn place_extra_doors(
        &mut self,
        rect: RoomRect,
        sequence_index: usize,
        plan: &DoorPlan,
        available: &[Wall],
        door_positions: &mut Vec<Pos>,
    ) {
        let requested = plan.door_count.saturating_sub(1);
        if requested == 0 {
            return;
        }

        // The first generated room must not open back toward the seed room.
        let first_generated = sequence_index == 1;
        for _ in 0..requested {
            let candidates: Vec<Wall> = available
                .iter()
                .copied()
                .filter(|&wall| !(first_generated && wall == Wall::Left))
                .filter(|&wall| !door_positions.contains(&rect.wall_midpoint(wall)))
                .collect();
            let Some(wall) = self.rng.pick(&candidates) else {
                break;
            };

            door_positions.push(rect.wall_midpoint(wall));
            let origin = rect.neighbour_origin(wall, self.config.distance_between_rooms);
            if self.frontier.push(origin) {
                self.log.push(LogEvent::FrontierQueued { origin });
            } else {
                self.log.push(LogEvent::DuplicateFrontierOrigin { origin });
            }
        }

        let placed = door_positions.len() - 1;
        if placed < requested {
            self.log.push(LogEvent::ExtraDoorsSkipped { sequence_index, requested, placed });
        }
    }

    fn commit(&mut self, room: Room) {
        // A branch becomes second to last so the main-path room stays at the tail. Indexing at
        // `len - 2` instead would put it ahead of the seed room when only two rooms exist.
        let storage_index =
            if room.is_branch { self.rooms.len().saturating_sub(1) } else { self.rooms.len() };
        self.log.push(LogEvent::RoomCommitted {
            sequence_index: room.sequence_index,
            origin: room.origin,
            storage_index,
            is_branch: room.is_branch,
        });
        if room.stranded {
            self.stranded.push(room.sequence_index);
        }
        self.rooms.insert(storage_index, room);
    }
}

/// The pre-placed starting room, opening east toward the first generated room.
fn seed_room(config: &DungeonConfig) -> Room {
    let rect = RoomRect::new(config.seed_origin, config.room_width, config.room_height);
    let door_positions = vec![rect.wall_midpoint(Wall::Right)];
    let (wall_positions, _) = rect.walls_and_floor(&door_positions);
    Room {
        width: rect.width,
        height: rect.height,
        origin: rect.origin,
        door_positions,
        wall_positions,
        entrance: Direction::None,
        sequence_index: 0,
        is_branch: false,
        stranded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::NullPresenter;
    use crate::rng::test_support::ScriptedRng;
    use crate::types::{DoorRule, PathBias};

    fn builder(config: DungeonConfig, draws: &[usize]) -> RoomGraphBuilder<ScriptedRng> {
        RoomGraphBuilder::new(config, ScriptedRng::new(draws)).expect("valid config")
    }

    #[derive(Default)]
    struct RecordingPresenter {
        calls: Vec<String>,
    }

    impl Presenter for RecordingPresenter {
        fn draw_room(&mut self, room: &RoomReady) {
            self.calls.push(format!("draw {}", room.sequence_index()));
        }

        fn place_content(&mut self, room: &RoomReady) {
            self.calls.push(format!("content {} branch={}", room.sequence_index(), room.room.is_branch));
        }

        fn label_room(&mut self, position: Pos, sequence_index: usize) {
            self.calls.push(format!("label {sequence_index} at {},{}", position.x, position.y));
        }

        fn rebuild_navigation(&mut self) {
            self.calls.push("navmesh".to_string());
        }
    }

    #[test]
    fn three_room_reference_dungeon() {
        let mut builder = builder(DungeonConfig::default(), &[0]);
        let layout = builder.build(&mut NullPresenter).expect("build");

        assert_eq!(layout.rooms.len(), 3);
        let seed = &layout.rooms[0];
        assert_eq!(seed.origin, Pos::new(-10, -8));
        assert_eq!(seed.door_positions, vec![Pos::new(9, -2)]);

        let second = &layout.rooms[1];
        assert_eq!(second.origin, Pos::new(11, -8));
        assert_eq!(second.entrance, Direction::East);
        assert_eq!(second.door_positions, vec![Pos::new(11, -2), Pos::new(20, 4)]);

        let last = &layout.rooms[2];
        assert_eq!(last.origin, Pos::new(11, 6));
        assert_eq!(last.entrance, Direction::North);
        assert_eq!(last.door_positions, vec![Pos::new(20, 6)]);

        assert!(layout.pending_frontier.is_empty());
        assert!(layout.stranded.is_empty());
        assert!(layout.log.contains(&LogEvent::DoorPlanChosen {
            sequence_index: 1,
            door_count: 2,
            is_branch: false,
            rule: DoorRule::SecondToLast,
        }));
    }

    #[test]
    fn room_after_three_doors_is_spliced_in_as_a_branch() {
        let config = DungeonConfig::default().with_room_count(5);
        // Room 1 draws three doors (Top, then Right); room 3 opens its Bottom wall.
        let mut builder = builder(config, &[1, 0, 1, 1]);
        let layout = builder.build(&mut NullPresenter).expect("build");

        let order: Vec<usize> = layout.rooms.iter().map(|room| room.sequence_index).collect();
        assert_eq!(order, vec![0, 2, 1, 3, 4]);

        let first = layout.room_by_sequence(1).expect("room 1");
        assert_eq!(first.door_count(), 3);

        let branch = layout.room_by_sequence(2).expect("room 2");
        assert!(branch.is_branch);
        assert_eq!(branch.door_count(), 1);
        assert_eq!(branch.origin, Pos::new(11, 6));
        assert_eq!(branch.entrance, Direction::North);

        let third = layout.room_by_sequence(3).expect("room 3");
        assert_eq!(third.origin, Pos::new(32, -8));
        assert_eq!(third.entrance, Direction::East);
        assert!(!third.is_branch);

        let last = layout.room_by_sequence(4).expect("room 4");
        assert_eq!(last.origin, Pos::new(32, -22));
        assert_eq!(last.entrance, Direction::South);
        assert_eq!(last.door_positions, vec![Pos::new(41, -10)]);

        assert!(layout.pending_frontier.is_empty());
        assert_eq!(builder.rng.remaining(), 0);
    }

    #[test]
    fn exhausted_frontier_strands_the_room_on_the_lattice() {
        let mut builder = builder(DungeonConfig::default().with_room_count(4), &[0, 0]);
        assert!(builder.start());
        let BuildStep::RoomReady(first) = builder.advance().expect("first room") else {
            panic!("expected a room");
        };
        builder.acknowledge(first.sequence_index()).expect("ack");
        builder.frontier = Frontier::default();

        let BuildStep::RoomReady(stranded) = builder.advance().expect("second room") else {
            panic!("expected a room");
        };
        assert!(stranded.room.stranded);
        assert_eq!(stranded.room.entrance, Direction::None);
        assert_eq!(stranded.room.origin, Pos::new(4988, -8002));
        assert_eq!(stranded.room.door_positions[0], stranded.room.rect().wall_midpoint(Wall::Left));
        assert!(builder.log().contains(&LogEvent::FrontierExhausted {
            sequence_index: 2,
            placed_at: Pos::new(4988, -8002),
        }));
        assert_eq!(builder.layout().stranded, vec![2]);
    }

    fn step(builder: &mut RoomGraphBuilder<ScriptedRng>) -> Room {
        let BuildStep::RoomReady(ready) = builder.advance().expect("advance") else {
            panic!("expected a room");
        };
        builder.acknowledge(ready.sequence_index()).expect("ack");
        ready.room
    }

    #[test]
    fn two_rooms_opening_onto_one_slot_queue_it_once() {
        let config = DungeonConfig { max_doors_per_room: 4, ..DungeonConfig::default() }
            .with_room_count(10);
        // Room 1: three doors (Top, Right). Room 2: Right. Room 3: Top, onto the same slot.
        let mut builder = builder(config, &[1, 0, 1, 0, 1, 0, 0]);
        assert!(builder.start());

        let first = step(&mut builder);
        assert_eq!(first.door_count(), 3);
        let second = step(&mut builder);
        assert_eq!(second.origin, Pos::new(11, 6));
        assert_eq!(second.door_positions[1], Pos::new(30, 12));
        let third = step(&mut builder);
        assert_eq!(third.origin, Pos::new(32, -8));
        assert_eq!(third.door_positions[1], Pos::new(41, 4));

        let shared = Pos::new(32, 6);
        assert!(builder.log().contains(&LogEvent::DuplicateFrontierOrigin { origin: shared }));
        assert_eq!(builder.pending_frontier(), vec![shared]);
        assert_eq!(builder.rng.remaining(), 0);
    }

    #[test]
    fn door_plan_larger_than_free_walls_is_cut_short() {
        let config = DungeonConfig { max_doors_per_room: 4, ..DungeonConfig::default() }
            .with_room_count(10)
            .with_path_bias(PathBias::Leftward);
        // Room 1 opens Top. The stranded room draws four doors, but its Left wall already holds
        // the entrance and Right is excluded, leaving Top and Bottom.
        let mut builder = builder(config, &[0, 0, 2, 0, 0]);
        assert!(builder.start());
        step(&mut builder);
        builder.frontier = Frontier::default();

        let stranded = step(&mut builder);
        assert!(stranded.stranded);
        assert!(builder.log().contains(&LogEvent::DoorPlanChosen {
            sequence_index: 2,
            door_count: 4,
            is_branch: false,
            rule: DoorRule::Random,
        }));
        assert!(builder.log().contains(&LogEvent::ExtraDoorsSkipped {
            sequence_index: 2,
            requested: 3,
            placed: 2,
        }));
        assert_eq!(stranded.door_count(), 2 + 1);
        let rect = stranded.rect();
        assert_eq!(
            stranded.door_positions,
            vec![
                rect.wall_midpoint(Wall::Left),
                rect.wall_midpoint(Wall::Top),
                rect.wall_midpoint(Wall::Bottom),
            ]
        );
    }

    #[test]
    fn single_room_target_completes_without_generating() {
        let mut builder = builder(DungeonConfig::default().with_room_count(1), &[]);
        let mut presenter = RecordingPresenter::default();
        let layout = builder.build(&mut presenter).expect("build");
        assert_eq!(layout.rooms.len(), 1);
        assert_eq!(presenter.calls, vec!["navmesh".to_string()]);
    }

    #[test]
    fn presenter_sees_each_room_before_the_next_is_generated() {
        let mut builder = builder(DungeonConfig::default(), &[0]);
        let mut presenter = RecordingPresenter::default();
        builder.build(&mut presenter).expect("build");

        assert_eq!(
            presenter.calls,
            vec![
                "draw 1".to_string(),
                "label 1 at 20,-2".to_string(),
                "content 1 branch=false".to_string(),
                "draw 2".to_string(),
                "label 2 at 20,12".to_string(),
                "content 2 branch=false".to_string(),
                "navmesh".to_string(),
            ]
        );
    }

    #[test]
    fn protocol_rejects_out_of_order_calls() {
        let mut builder = builder(DungeonConfig::default(), &[0]);
        assert_eq!(builder.advance(), Err(BuildError::NotStarted));
        assert_eq!(builder.acknowledge(1), Err(BuildError::NoRoomInFlight));
        assert!(builder.start());

        let BuildStep::RoomReady(first) = builder.advance().expect("room") else {
            panic!("expected a room");
        };
        assert_eq!(first.sequence_index(), 1);
        assert_eq!(
            builder.advance(),
            Err(BuildError::AwaitingAcknowledgement { sequence_index: 1 })
        );
        assert_eq!(
            builder.acknowledge(2),
            Err(BuildError::UnexpectedAcknowledgement { expected: 1, received: 2 })
        );
        builder.acknowledge(1).expect("ack");

        let BuildStep::RoomReady(second) = builder.advance().expect("room") else {
            panic!("expected a room");
        };
        builder.acknowledge(second.sequence_index()).expect("ack");
        assert_eq!(builder.advance(), Ok(BuildStep::Complete));
        assert!(builder.is_complete());
        assert_eq!(builder.advance(), Err(BuildError::AlreadyComplete));
    }

    #[test]
    fn repeated_start_is_a_logged_no_op() {
        let mut builder = builder(DungeonConfig::default(), &[0]);
        let first = builder.build(&mut NullPresenter).expect("build");
        assert_eq!(builder.build(&mut NullPresenter), Err(BuildError::AlreadyStarted));
        assert_eq!(builder.rooms(), first.rooms.as_slice());
        assert_eq!(builder.log().last(), Some(&LogEvent::GenerationAlreadyStarted));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = DungeonConfig { room_width: 2, ..DungeonConfig::default() };
        let err = RoomGraphBuilder::new(config, ScriptedRng::new(&[])).err();
        assert!(matches!(err, Some(BuildError::InvalidConfig(_))));
    }
}
