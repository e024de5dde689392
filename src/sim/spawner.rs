//! Wave manager
//!
//! Holds the active level's waves and emits the next one whenever the
//! controller reports an empty field.

use rand::Rng;

use super::entity::Enemy;
use super::level::{EnemySpawn, Wave};
use super::state::IdAllocator;
use crate::config::GameConfig;

/// What a cleared field produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// Wave `index` materialized with `count` enemies
    Spawned { index: usize, count: usize },
    /// Enemies are still live; nothing emitted
    Busy,
    /// No waves left: the level is done
    Exhausted,
}

#[derive(Debug, Clone, Default)]
pub struct Spawner {
    waves: Vec<Wave>,
    next: usize,
}

impl Spawner {
    pub fn new(waves: Vec<Wave>) -> Self {
        Self { waves, next: 0 }
    }

    /// Index of the next wave to emit
    pub fn next_index(&self) -> usize {
        self.next
    }

    pub fn waves_remaining(&self) -> usize {
        self.waves.len() - self.next
    }

    /// Emit the next wave into `enemies` if the field is clear.
    ///
    /// The wave index advances in the same call that materializes the wave,
    /// so a second call before the new enemies die reports `Busy`.
    pub fn on_enemies_cleared(
        &mut self,
        enemies: &mut Vec<Enemy>,
        ids: &mut IdAllocator,
        config: &GameConfig,
        rng: &mut impl Rng,
    ) -> SpawnOutcome {
        if !enemies.is_empty() {
            return SpawnOutcome::Busy;
        }
        let Some(wave) = self.waves.get(self.next) else {
            return SpawnOutcome::Exhausted;
        };
        let index = self.next;
        self.next += 1;
        let count = materialize(&wave.spawns, enemies, ids, config, rng);
        log::info!("Wave {} spawned ({} enemies)", index + 1, count);
        SpawnOutcome::Spawned { index, count }
    }
}

/// Turn spawn descriptors into live enemies; returns how many were added
pub fn materialize(
    spawns: &[EnemySpawn],
    enemies: &mut Vec<Enemy>,
    ids: &mut IdAllocator,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> usize {
    enemies.extend(
        spawns
            .iter()
            .map(|spawn| Enemy::spawn(ids.next(), spawn, config, rng)),
    );
    spawns.len()
}
