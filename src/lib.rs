//! Rabbit Hero - side-scrolling rabbit vs dragon shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, combat, waves, levels, session)
//! - `config`: Data-driven game balance and level layouts

pub mod config;
pub mod sim;

pub use config::GameConfig;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Playfield dimensions in pixels
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Fixed simulation rate
    pub const FPS: u32 = 60;
    /// Milliseconds per simulation tick at [`FPS`]
    pub const FRAME_MS: u64 = 1000 / FPS as u64;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 1.0;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -15.0;
    /// Horizontal walk speed (pixels/tick)
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_START_X: f32 = 100.0;
    /// Player's top edge when standing on the ground
    pub const GROUND_OFFSET: f32 = 70.0;
    pub const MAX_HEALTH: i32 = 100;
    pub const START_LIVES: u8 = 3;

    /// Player bullets
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 5.0;
    pub const PROJECTILE_DAMAGE: i32 = 10;
    pub const HIT_REWARD: u64 = 10;

    /// Dragon fireballs
    pub const HAZARD_SPEED: f32 = -6.0;
    pub const HAZARD_SIZE: f32 = 10.0;
    pub const HAZARD_DAMAGE: i32 = 10;

    /// Damage taken when an enemy touches the player
    pub const MELEE_DAMAGE: i32 = 20;

    /// Banner hold durations (ms)
    pub const LEVEL_COMPLETE_HOLD_MS: u64 = 2000;
    pub const LEVEL_FAILED_HOLD_MS: u64 = 3000;

    /// Time budget of the final level (ms)
    pub const FINAL_LEVEL_BUDGET_MS: u64 = 60_000;
}
