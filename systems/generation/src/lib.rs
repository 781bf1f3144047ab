#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded piece and terrain generation for Track Builder boards.

use log::debug;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use track_builder_core::{CellCoord, Terrain, TrackGenerator, TrackShape};

/// Probabilities controlling how interior cells are laid out.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainTuning {
    /// Obstacle probability before any level scaling.
    pub obstacle_base: f64,
    /// Obstacle probability added per level.
    pub obstacle_per_level: f64,
    /// Probability of a bonus cell, drawn above the obstacle band.
    pub bonus_chance: f64,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            obstacle_base: 0.05,
            obstacle_per_level: 0.02,
            bonus_chance: 0.08,
        }
    }
}

impl TerrainTuning {
    /// Probability that an interior cell becomes a rock or tree at the level.
    #[must_use]
    pub fn obstacle_chance(&self, level: u32) -> f64 {
        (self.obstacle_base + f64::from(level) * self.obstacle_per_level).clamp(0.0, 1.0)
    }
}

/// Deterministic generator driven by a ChaCha stream.
#[derive(Clone, Debug)]
pub struct SeededGenerator {
    rng: ChaCha8Rng,
    tuning: TerrainTuning,
}

impl SeededGenerator {
    /// Creates a generator with default tuning from the provided seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, TerrainTuning::default())
    }

    /// Creates a generator with explicit terrain tuning.
    #[must_use]
    pub fn with_tuning(seed: u64, tuning: TerrainTuning) -> Self {
        debug!("seeded generator created with seed {seed}");
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            tuning,
        }
    }
}

impl TrackGenerator for SeededGenerator {
    fn next_shape(&mut self) -> TrackShape {
        TrackShape::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(TrackShape::Horizontal)
    }

    fn terrain(&mut self, _cell: CellCoord, level: u32) -> Terrain {
        let obstacle = self.tuning.obstacle_chance(level);
        let roll: f64 = self.rng.gen();

        if roll < obstacle {
            if self.rng.gen_bool(0.5) {
                Terrain::Rock
            } else {
                Terrain::Tree
            }
        } else if roll < obstacle + self.tuning.bonus_chance {
            Terrain::Bonus
        } else {
            Terrain::Open
        }
    }
}
