//! Game configuration and balance
//!
//! Startup constants only: the simulation never mutates a config after the
//! session is built. Defaults mirror [`crate::consts`]; any subset can be
//! overridden from JSON.

use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::level::{LevelDef, default_levels};

/// Inclusive integer range used for random rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Constant value (min == max)
    pub const fn fixed(value: i32) -> Self {
        Self { min: value, max: value }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

/// Player movement and vitality
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub size: f32,
    pub start_x: f32,
    /// Distance from the bottom of the screen to the player's top edge when grounded
    pub ground_offset: f32,
    pub max_health: i32,
    pub start_lives: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            size: PLAYER_SIZE,
            start_x: PLAYER_START_X,
            ground_offset: GROUND_OFFSET,
            max_health: MAX_HEALTH,
            start_lives: START_LIVES,
        }
    }
}

/// Player bullets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub damage: i32,
    /// Score awarded per hit
    pub reward: u64,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            damage: PROJECTILE_DAMAGE,
            reward: HIT_REWARD,
        }
    }
}

/// Fireballs emitted by flying enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    pub speed: f32,
    pub size: f32,
    pub damage: i32,
    /// Ticks before a flying enemy's first fireball
    pub first_cooldown: IntRange,
    /// Ticks between subsequent fireballs
    pub cooldown: IntRange,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            speed: HAZARD_SPEED,
            size: HAZARD_SIZE,
            damage: HAZARD_DAMAGE,
            first_cooldown: IntRange::new(60, 120),
            cooldown: IntRange::new(90, 150),
        }
    }
}

/// Stats shared by every enemy variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: i32,
    pub width: f32,
    pub height: f32,
    /// Leftward speed in pixels/tick
    pub speed: IntRange,
}

/// Flying enemy oscillation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlyingStats {
    #[serde(flatten)]
    pub stats: EnemyStats,
    pub amplitude: f32,
    pub frequency: f32,
}

/// Per-variant enemy balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub ground: EnemyStats,
    pub flying: FlyingStats,
    pub boss: EnemyStats,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            ground: EnemyStats {
                health: 10,
                width: 50.0,
                height: 50.0,
                speed: IntRange::fixed(2),
            },
            flying: FlyingStats {
                stats: EnemyStats {
                    health: 30,
                    width: 60.0,
                    height: 40.0,
                    speed: IntRange::new(2, 4),
                },
                amplitude: 10.0,
                frequency: 0.12,
            },
            boss: EnemyStats {
                health: 150,
                width: 120.0,
                height: 120.0,
                speed: IntRange::new(1, 3),
            },
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub frame_rate: u32,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub hazard: HazardConfig,
    pub enemies: EnemyConfig,
    /// Damage dealt by an enemy touching the player (the enemy is removed)
    pub melee_damage: i32,
    /// "Level Complete" banner duration
    pub complete_hold_ms: u64,
    /// "Time's up" banner duration before the retry prompt
    pub failed_hold_ms: u64,
    pub levels: Vec<LevelDef>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let screen = ScreenConfig::default();
        Self {
            screen,
            frame_rate: FPS,
            player: PlayerConfig::default(),
            projectile: ProjectileConfig::default(),
            hazard: HazardConfig::default(),
            enemies: EnemyConfig::default(),
            melee_damage: MELEE_DAMAGE,
            complete_hold_ms: LEVEL_COMPLETE_HOLD_MS,
            failed_hold_ms: LEVEL_FAILED_HOLD_MS,
            levels: default_levels(screen.width, screen.height, screen.height - GROUND_OFFSET),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take defaults.
    ///
    /// Without an explicit `levels` list the stock layouts are rebuilt for
    /// the configured screen and ground line.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json).context("invalid game config JSON")?;
        let has_levels = value.get("levels").is_some();
        let mut config: Self = serde_json::from_value(value).context("invalid game config JSON")?;
        if !has_levels {
            config.levels = config.stock_levels();
        }
        config.validate()?;
        Ok(config)
    }

    /// The default three levels laid out for this screen
    pub fn stock_levels(&self) -> Vec<LevelDef> {
        default_levels(self.screen.width, self.screen.height, self.ground_y())
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&json).with_context(|| format!("loading {}", path.display()))?;
        log::info!(
            "Loaded config from {} ({} levels)",
            path.display(),
            config.levels.len()
        );
        Ok(config)
    }

    /// Milliseconds per tick at the configured frame rate
    pub fn frame_ms(&self) -> u64 {
        1000 / u64::from(self.frame_rate.max(1))
    }

    /// Y coordinate of the player's top edge when standing
    pub fn ground_y(&self) -> f32 {
        self.screen.height - self.player.ground_offset
    }

    /// Reject configs the simulation can't run
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.screen.width > 0.0 && self.screen.height > 0.0,
            "screen dimensions must be positive ({}x{})",
            self.screen.width,
            self.screen.height
        );
        ensure!(self.frame_rate > 0, "frame_rate must be non-zero");
        ensure!(self.player.max_health > 0, "player.max_health must be positive");
        ensure!(self.player.start_lives > 0, "player.start_lives must be at least 1");
        ensure!(!self.levels.is_empty(), "at least one level is required");

        let ranges = [
            ("hazard.first_cooldown", self.hazard.first_cooldown),
            ("hazard.cooldown", self.hazard.cooldown),
            ("enemies.ground.speed", self.enemies.ground.speed),
            ("enemies.flying.speed", self.enemies.flying.stats.speed),
            ("enemies.boss.speed", self.enemies.boss.speed),
        ];
        for (name, range) in ranges {
            if !range.is_valid() {
                bail!("{name}: min {} exceeds max {}", range.min, range.max);
            }
        }

        for (i, level) in self.levels.iter().enumerate() {
            if level.time_budget_ms == Some(0) {
                bail!("level {}: time budget must be non-zero", i + 1);
            }
        }
        Ok(())
    }
}
