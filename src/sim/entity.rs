//! Entity model: player, bullets, fireballs and dragons
//!
//! Entities never reference each other. Damage and removal are applied by
//! the combat resolver; entities only mark themselves spent and the session
//! sweeps expired ones once per tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Body};
use super::level::EnemySpawn;
use crate::config::{GameConfig, HazardConfig, IntRange};

/// Anything the session sweeps at the end of a tick
pub trait Entity: Body {
    /// Pure removal predicate (health, spent flag, or off-playfield)
    fn is_expired(&self, playfield_width: f32) -> bool;
}

/// Result of applying damage to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vitality {
    /// Still standing
    Alive,
    /// Health ran out, one life spent, health refilled
    LifeLost,
    /// Last life spent
    Dead,
}

/// The rabbit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Set by a jump, cleared on landing
    pub airborne: bool,
    pub health: i32,
    pub lives: u8,
    pub score: u64,
    /// Held movement intents
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let p = &config.player;
        Self {
            pos: Vec2::new(p.start_x, config.ground_y()),
            vel: Vec2::ZERO,
            size: Vec2::splat(p.size),
            airborne: false,
            health: p.max_health,
            lives: p.start_lives,
            score: 0,
            moving_left: false,
            moving_right: false,
        }
    }

    /// Back to the start position with full health (lives and score kept)
    pub fn reset_for_level(&mut self, config: &GameConfig) {
        self.pos = Vec2::new(config.player.start_x, config.ground_y());
        self.vel = Vec2::ZERO;
        self.airborne = false;
        self.health = config.player.max_health;
    }

    /// Single jump only; ignored while airborne
    pub fn jump(&mut self, jump_velocity: f32) -> bool {
        if self.airborne {
            return false;
        }
        self.vel.y = jump_velocity;
        self.airborne = true;
        true
    }

    /// Integrate one tick of motion
    pub fn advance(&mut self, config: &GameConfig) {
        let p = &config.player;
        let dir = (self.moving_right as i32 - self.moving_left as i32) as f32;
        self.vel.x = dir * p.speed;

        self.pos.x += self.vel.x;
        self.vel.y += p.gravity;
        self.pos.y += self.vel.y;

        let ground = config.ground_y();
        if self.pos.y > ground {
            self.pos.y = ground;
            self.vel.y = 0.0;
            self.airborne = false;
        }

        let max_x = (config.screen.width - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    /// Apply damage and resolve life loss immediately
    pub fn take_damage(&mut self, amount: i32, max_health: i32) -> Vitality {
        self.health = (self.health - amount).clamp(0, max_health);
        if self.health > 0 {
            return Vitality::Alive;
        }
        self.lives = self.lives.saturating_sub(1);
        self.health = max_health;
        if self.lives == 0 {
            Vitality::Dead
        } else {
            Vitality::LifeLost
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

impl Body for Player {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A player bullet flying right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Consumed by a hit; removed at cleanup
    pub spent: bool,
}

impl Projectile {
    pub fn new(id: u32, center: Vec2, config: &GameConfig) -> Self {
        let c = &config.projectile;
        let size = Vec2::new(c.width, c.height);
        Self {
            id,
            pos: Aabb::centered(center, size).min,
            size,
            vel: Vec2::new(c.speed, 0.0),
            spent: false,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

impl Body for Projectile {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

impl Entity for Projectile {
    fn is_expired(&self, playfield_width: f32) -> bool {
        self.spent || self.bounds().exited_right(playfield_width)
    }
}

/// A fireball flying left toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub spent: bool,
}

impl Hazard {
    pub fn new(id: u32, center: Vec2, config: &HazardConfig) -> Self {
        let size = Vec2::splat(config.size);
        Self {
            id,
            pos: Aabb::centered(center, size).min,
            size,
            vel: Vec2::new(config.speed, 0.0),
            damage: config.damage,
            spent: false,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

impl Body for Hazard {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

impl Entity for Hazard {
    fn is_expired(&self, _playfield_width: f32) -> bool {
        self.spent || self.bounds().exited_left()
    }
}

/// Enemy variant tag (used in level layouts and sprite selection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Ground,
    Flying,
    Boss,
}

/// Per-variant motion state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Behavior {
    /// Constant leftward walk
    Ground,
    /// Leftward flight with a sinusoidal bob; breathes fireballs
    Flying {
        base_y: f32,
        amplitude: f32,
        frequency: f32,
        tick: u32,
        fire_timer: i32,
    },
    /// Speed re-rolled every tick for an irregular advance
    Boss { speed_range: IntRange },
}

/// A dragon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed (pixels/tick)
    pub speed: f32,
    pub health: i32,
    /// Removed by contact with the player
    pub despawned: bool,
    pub behavior: Behavior,
}

impl Enemy {
    /// Materialize a spawn descriptor, clamping it into the playfield
    pub fn spawn(id: u32, spawn: &EnemySpawn, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let enemies = &config.enemies;
        let stats = match spawn.kind {
            EnemyKind::Ground => &enemies.ground,
            EnemyKind::Flying => &enemies.flying.stats,
            EnemyKind::Boss => &enemies.boss,
        };
        let size = Vec2::new(stats.width, stats.height);

        let max_y = (config.screen.height - size.y).max(0.0);
        let pos = Vec2::new(spawn.x.max(0.0), spawn.y.clamp(0.0, max_y));
        if pos.x != spawn.x || pos.y != spawn.y {
            log::warn!(
                "Clamped {:?} spawn ({}, {}) -> ({}, {})",
                spawn.kind,
                spawn.x,
                spawn.y,
                pos.x,
                pos.y
            );
        }

        let behavior = match spawn.kind {
            EnemyKind::Ground => Behavior::Ground,
            EnemyKind::Flying => Behavior::Flying {
                base_y: pos.y,
                amplitude: enemies.flying.amplitude,
                frequency: enemies.flying.frequency,
                tick: 0,
                fire_timer: roll(rng, config.hazard.first_cooldown),
            },
            EnemyKind::Boss => Behavior::Boss {
                speed_range: stats.speed,
            },
        };

        Self {
            id,
            pos,
            size,
            speed: roll(rng, stats.speed) as f32,
            health: spawn.health.unwrap_or(stats.health),
            despawned: false,
            behavior,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self.behavior {
            Behavior::Ground => EnemyKind::Ground,
            Behavior::Flying { .. } => EnemyKind::Flying,
            Behavior::Boss { .. } => EnemyKind::Boss,
        }
    }

    /// Can still be hit or hurt the player this tick
    pub fn is_live(&self) -> bool {
        self.health > 0 && !self.despawned
    }

    /// Advance one tick. Returns the center of a fireball to spawn, if any.
    pub fn advance(&mut self, hazard: &HazardConfig, rng: &mut impl Rng) -> Option<Vec2> {
        match self.behavior {
            Behavior::Ground => {
                advance_ground(self);
                None
            }
            Behavior::Flying { .. } => advance_flying(self, hazard, rng),
            Behavior::Boss { speed_range } => {
                advance_boss(self, speed_range, rng);
                None
            }
        }
    }
}

fn advance_ground(enemy: &mut Enemy) {
    enemy.pos.x -= enemy.speed;
}

fn advance_boss(enemy: &mut Enemy, speed_range: IntRange, rng: &mut impl Rng) {
    enemy.speed = roll(rng, speed_range) as f32;
    enemy.pos.x -= enemy.speed;
}

fn advance_flying(enemy: &mut Enemy, hazard: &HazardConfig, rng: &mut impl Rng) -> Option<Vec2> {
    enemy.pos.x -= enemy.speed;
    let center_x = enemy.pos.x + enemy.size.x / 2.0;
    let half_h = enemy.size.y / 2.0;

    let Behavior::Flying {
        base_y,
        amplitude,
        frequency,
        ref mut tick,
        ref mut fire_timer,
    } = enemy.behavior
    else {
        return None;
    };

    enemy.pos.y = base_y + amplitude * (frequency * *tick as f32).sin();
    *tick += 1;

    *fire_timer -= 1;
    if *fire_timer <= 0 {
        *fire_timer = roll(rng, hazard.cooldown);
        return Some(Vec2::new(center_x, enemy.pos.y + half_h));
    }
    None
}

fn roll(rng: &mut impl Rng, range: IntRange) -> i32 {
    if range.min >= range.max {
        range.min
    } else {
        rng.random_range(range.min..=range.max)
    }
}

impl Body for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

impl Entity for Enemy {
    fn is_expired(&self, _playfield_width: f32) -> bool {
        !self.is_live() || self.bounds().exited_left()
    }
}
