//! Render/HUD feed
//!
//! A flat, serializable view of the session for whatever draws the frame.

use serde::Serialize;

use super::collision::{Aabb, Body};
use super::entity::EnemyKind;
use super::level::LevelState;
use super::state::{MenuKind, Session};

/// Sprite to draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteKind {
    Player,
    Projectile,
    Fireball,
    GroundDragon,
    FlyingDragon,
    BossDragon,
}

impl From<EnemyKind> for SpriteKind {
    fn from(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Ground => SpriteKind::GroundDragon,
            EnemyKind::Flying => SpriteKind::FlyingDragon,
            EnemyKind::Boss => SpriteKind::BossDragon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    /// 0 for the player
    pub id: u32,
    pub kind: SpriteKind,
    pub bounds: Aabb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub lives: u8,
    pub score: u64,
    pub level: u32,
    /// Only for levels with a time budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_left_ms: Option<u64>,
}

/// Which screen the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Title,
    Playing,
    Paused,
    LevelComplete,
    Failed,
    Win,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    pub options: Vec<&'static str>,
    pub selected: usize,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: Phase,
    pub hud: Hud,
    pub sprites: Vec<Sprite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<MenuView>,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let world = &session.world;
        let player = &world.player;

        let mut sprites = Vec::with_capacity(
            1 + world.enemies.len() + world.projectiles.len() + world.hazards.len(),
        );
        sprites.push(Sprite {
            id: 0,
            kind: SpriteKind::Player,
            bounds: player.bounds(),
            health: Some(player.health),
        });
        sprites.extend(world.enemies.iter().map(|e| Sprite {
            id: e.id,
            kind: e.kind().into(),
            bounds: e.bounds(),
            health: Some(e.health),
        }));
        sprites.extend(world.projectiles.iter().map(|p| Sprite {
            id: p.id,
            kind: SpriteKind::Projectile,
            bounds: p.bounds(),
            health: None,
        }));
        sprites.extend(world.hazards.iter().map(|h| Sprite {
            id: h.id,
            kind: SpriteKind::Fireball,
            bounds: h.bounds(),
            health: None,
        }));

        let time_left_ms = match session.level_state {
            LevelState::InProgress => session.clock.remaining_ms(),
            _ => None,
        };

        Self {
            tick: session.time_ticks,
            phase: phase_of(session),
            hud: Hud {
                health: player.health,
                max_health: session.config.player.max_health,
                lives: player.lives,
                score: player.score,
                level: session.level(),
                time_left_ms,
            },
            sprites,
            menu: session.menu.map(|m| MenuView {
                options: m.kind.options().iter().map(|o| o.label()).collect(),
                selected: m.selected,
            }),
        }
    }
}

fn phase_of(session: &Session) -> Phase {
    match session.menu.map(|m| m.kind) {
        Some(MenuKind::Title) => return Phase::Title,
        Some(MenuKind::Pause) => return Phase::Paused,
        _ => {}
    }
    match session.level_state {
        LevelState::Starting | LevelState::InProgress => Phase::Playing,
        LevelState::Complete { .. } => Phase::LevelComplete,
        LevelState::Failed { .. } => Phase::Failed,
        LevelState::Win => Phase::Win,
        LevelState::GameOver => Phase::GameOver,
    }
}
