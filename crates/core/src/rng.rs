//! Injectable random source and seed mixing for reproducible layouts.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

use crate::config::DungeonConfig;
use crate::types::PathBias;

/// Random draws consumed by the door-count policy, wall selection and prop planning.
pub trait RoomRng {
    /// Uniform value in `0..upper`. Callers never pass zero.
    fn below(&mut self, upper: usize) -> usize;

    fn between(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        min_value + self.below(max_value - min_value + 1)
    }

    fn pick<T: Copy>(&mut self, options: &[T]) -> Option<T>
    where
        Self: Sized,
    {
        if options.is_empty() {
            return None;
        }
        Some(options[self.below(options.len())])
    }
}

impl RoomRng for ChaCha8Rng {
    fn below(&mut self, upper: usize) -> usize {
        (self.next_u64() % upper as u64) as usize
    }
}

impl<R: RoomRng + ?Sized> RoomRng for &mut R {
    fn below(&mut self, upper: usize) -> usize {
        (**self).below(upper)
    }
}

pub fn layout_rng(run_seed: u64, config: &DungeonConfig) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_layout_seed(run_seed, config))
}

/// Folds every parameter that shapes the room graph into the run seed, so two configs sharing a
/// seed still draw independent layouts.
pub fn derive_layout_seed(run_seed: u64, config: &DungeonConfig) -> u64 {
    let shape = [
        config.target_room_count as u64,
        bias_code(config.path_bias),
        u64::from(config.room_width.unsigned_abs()),
        u64::from(config.room_height.unsigned_abs()),
        u64::from(config.distance_between_rooms.unsigned_abs()),
        config.max_doors_per_room as u64,
    ];
    shape.iter().fold(splitmix64(run_seed), |state, &word| splitmix64(state ^ word))
}

fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn bias_code(path_bias: PathBias) -> u64 {
    match path_bias {
        PathBias::Rightward => 1,
        PathBias::Leftward => 2,
    }
}
