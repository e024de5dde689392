//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod combat;
pub mod entity;
pub mod level;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Body};
pub use combat::{Resolution, resolve};
pub use entity::{Behavior, Enemy, EnemyKind, Entity, Hazard, Player, Projectile, Vitality};
pub use level::{EnemySpawn, LevelClock, LevelDef, LevelState, Reinforcement, Wave};
pub use snapshot::{Phase, Snapshot, SpriteKind};
pub use spawner::{SpawnOutcome, Spawner};
pub use state::{GameEvent, Menu, MenuKind, MenuOption, Session, World};
pub use tick::{Command, Press, tick};
