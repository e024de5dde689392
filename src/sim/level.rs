//! Level layouts and the level progression state machine

use serde::{Deserialize, Serialize};

use super::entity::EnemyKind;

/// Where and what to spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    /// Overrides the variant's default health
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
}

impl EnemySpawn {
    pub fn new(kind: EnemyKind, x: f32, y: f32) -> Self {
        Self { kind, x, y, health: None }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Some(health);
        self
    }
}

/// One batch of enemies materialized together once the field is clear
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    pub spawns: Vec<EnemySpawn>,
}

impl Wave {
    /// `count` enemies in a row, `spacing` pixels apart starting at `x`
    pub fn row(kind: EnemyKind, count: usize, x: f32, spacing: f32, y: f32) -> Self {
        Self {
            spawns: (0..count)
                .map(|i| EnemySpawn::new(kind, x + spacing * i as f32, y))
                .collect(),
        }
    }
}

/// A squad that joins once, a fixed time into the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reinforcement {
    pub at_ms: u64,
    pub spawns: Vec<EnemySpawn>,
}

/// Static description of a level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    /// Present from the start (bosses, escorts); not part of any wave
    #[serde(default)]
    pub persistent: Vec<EnemySpawn>,
    /// Emitted in order, each once the live enemy set is empty
    #[serde(default)]
    pub waves: Vec<Wave>,
    /// Level fails if enemies remain once this much level time has passed
    #[serde(default)]
    pub time_budget_ms: Option<u64>,
    #[serde(default)]
    pub reinforcement: Option<Reinforcement>,
}

impl LevelDef {
    pub fn has_boss(&self) -> bool {
        self.persistent
            .iter()
            .chain(self.waves.iter().flat_map(|w| w.spawns.iter()))
            .chain(self.reinforcement.iter().flat_map(|r| r.spawns.iter()))
            .any(|s| s.kind == EnemyKind::Boss)
    }
}

/// The three stock levels: a ground rush, a boss fight, then a timed
/// flying assault.
///
/// `ground_y` is the player's standing top edge; ground dragons share it.
pub fn default_levels(width: f32, height: f32, ground_y: f32) -> Vec<LevelDef> {
    vec![
        LevelDef {
            waves: vec![Wave::row(EnemyKind::Ground, 6, width, 100.0, ground_y)],
            ..Default::default()
        },
        LevelDef {
            persistent: vec![EnemySpawn::new(EnemyKind::Boss, width, height - 150.0).with_health(150)],
            waves: vec![Wave::row(EnemyKind::Ground, 7, width, 80.0, ground_y)],
            ..Default::default()
        },
        LevelDef {
            persistent: {
                let mut spawns = Wave::row(EnemyKind::Flying, 3, width, 180.0, height - 150.0).spawns;
                spawns.push(EnemySpawn::new(EnemyKind::Boss, width, height - 150.0).with_health(200));
                spawns
            },
            waves: vec![Wave::row(EnemyKind::Ground, 4, width, 120.0, ground_y)],
            time_budget_ms: Some(crate::consts::FINAL_LEVEL_BUDGET_MS),
            reinforcement: Some(Reinforcement {
                at_ms: 5000,
                spawns: {
                    let mut spawns = Wave::row(EnemyKind::Flying, 7, width, 90.0, height - 80.0).spawns;
                    // Weakened escorts riding with the flyers
                    spawns.extend(
                        Wave::row(EnemyKind::Boss, 7, width, 120.0, height - 150.0)
                            .spawns
                            .into_iter()
                            .map(|s| s.with_health(30)),
                    );
                    spawns
                },
            }),
        },
    ]
}

/// Level progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelState {
    /// About to (re)build the level on the next tick
    Starting,
    /// Enemies live, clock running
    InProgress,
    /// All waves cleared; banner shown for `hold_ms` before moving on
    Complete { hold_ms: u64 },
    /// Time ran out; banner shown for `hold_ms`, then the retry prompt
    Failed { hold_ms: u64 },
    /// Every level cleared (terminal)
    Win,
    /// Out of lives (terminal)
    GameOver,
}

/// Level time accounting (ms of unpaused play since level start)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelClock {
    pub elapsed_ms: u64,
    pub budget_ms: Option<u64>,
}

impl LevelClock {
    pub fn arm(budget_ms: Option<u64>) -> Self {
        Self {
            elapsed_ms: 0,
            budget_ms,
        }
    }

    pub fn accrue(&mut self, elapsed_ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
    }

    /// Budget strictly exceeded
    pub fn expired(&self) -> bool {
        self.budget_ms.is_some_and(|b| self.elapsed_ms > b)
    }

    pub fn remaining_ms(&self) -> Option<u64> {
        self.budget_ms.map(|b| b.saturating_sub(self.elapsed_ms))
    }
}
