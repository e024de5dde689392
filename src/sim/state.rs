//! Session state
//!
//! The session owns every entity collection, the level state and the RNG.
//! Nothing else holds game state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, EnemyKind, Hazard, Player, Projectile};
use super::level::{LevelClock, LevelState, Reinforcement};
use super::spawner::{SpawnOutcome, Spawner, materialize};
use crate::config::GameConfig;

/// Discrete signals for the presentation layer (sounds, banners, HUD pops)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    WaveSpawned { wave: u32, count: u32 },
    ReinforcementsArrived { count: u32 },
    ShotFired { id: u32 },
    EnemyHit { id: u32 },
    EnemyKilled { id: u32, kind: EnemyKind },
    PlayerHit { damage: i32 },
    LifeLost { lives_left: u8 },
    LevelComplete { level: u32 },
    LevelFailed { level: u32 },
    GameOver,
    Win,
}

/// Menu screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuKind {
    /// Title screen before the first level
    Title,
    /// In-game pause
    Pause,
    /// After a failed level
    Retry,
    /// After win or game over
    Restart,
}

/// A selectable menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuOption {
    StartGame,
    Resume,
    Retry,
    Restart,
    Quit,
}

impl MenuOption {
    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::StartGame => "Start Game",
            MenuOption::Resume => "Resume",
            MenuOption::Retry => "Retry",
            MenuOption::Restart => "Restart",
            MenuOption::Quit => "Quit",
        }
    }
}

impl MenuKind {
    pub fn options(&self) -> &'static [MenuOption] {
        match self {
            MenuKind::Title => &[MenuOption::StartGame, MenuOption::Quit],
            MenuKind::Pause => &[MenuOption::Resume, MenuOption::Quit],
            MenuKind::Retry => &[MenuOption::Retry, MenuOption::Quit],
            MenuKind::Restart => &[MenuOption::Restart, MenuOption::Quit],
        }
    }
}

/// An open menu and its highlighted entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub kind: MenuKind,
    pub selected: usize,
}

impl Menu {
    pub fn new(kind: MenuKind) -> Self {
        Self { kind, selected: 0 }
    }

    pub fn up(&mut self) {
        let n = self.kind.options().len();
        self.selected = (self.selected + n - 1) % n;
    }

    pub fn down(&mut self) {
        let n = self.kind.options().len();
        self.selected = (self.selected + 1) % n;
    }

    pub fn current(&self) -> MenuOption {
        self.kind.options()[self.selected]
    }
}

/// Monotonic entity id source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        // 0 is reserved for the player in snapshots
        Self { next: 1 }
    }
}

impl IdAllocator {
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Live entities, partitioned by group
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub hazards: Vec<Hazard>,
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            player: Player::new(config),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            hazards: Vec::new(),
        }
    }

    /// Drop everything but the player
    pub fn clear_entities(&mut self) {
        self.projectiles.clear();
        self.enemies.clear();
        self.hazards.clear();
    }

    /// Ids only grow, so sorting by id keeps iteration order stable
    pub fn normalize_order(&mut self) {
        self.projectiles.sort_by_key(|p| p.id);
        self.enemies.sort_by_key(|e| e.id);
        self.hazards.sort_by_key(|h| h.id);
    }
}

/// A complete game session (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub rng: Pcg32,
    /// 0-based index into `config.levels`
    pub level_index: usize,
    pub level_state: LevelState,
    pub clock: LevelClock,
    pub spawner: Spawner,
    /// Pending timed squad for the current level
    pub reinforcement: Option<Reinforcement>,
    pub world: World,
    pub ids: IdAllocator,
    /// Open menu; gameplay is suspended while one is shown
    pub menu: Option<Menu>,
    /// Set by a quit command; the driver loop should stop
    pub quit: bool,
    /// Simulation ticks executed (excludes paused/menu ticks)
    pub time_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl Session {
    /// Validate `config`, then open a session on the title screen
    pub fn try_new(seed: u64, config: GameConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::new(seed, config))
    }

    /// New session on the title screen, level 1 pending.
    ///
    /// `config` must already pass [`GameConfig::validate`]; use
    /// [`Session::try_new`] for configs from outside the crate.
    pub fn new(seed: u64, config: GameConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "session built from an invalid config");
        let world = World::new(&config);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level_index: 0,
            level_state: LevelState::Starting,
            clock: LevelClock::default(),
            spawner: Spawner::default(),
            reinforcement: None,
            world,
            ids: IdAllocator::default(),
            menu: Some(Menu::new(MenuKind::Title)),
            quit: false,
            time_ticks: 0,
            events: Vec::new(),
            config,
        }
    }

    /// 1-based level number
    pub fn level(&self) -> u32 {
        self.level_index as u32 + 1
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.menu, Some(Menu { kind: MenuKind::Pause, .. }))
    }

    /// Player input reaches the world only while a level is live and no menu is up
    pub fn accepts_gameplay_input(&self) -> bool {
        self.menu.is_none() && self.level_state == LevelState::InProgress
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Build the current level from scratch (the `Starting` transition).
    ///
    /// Lives and score carry over; health and position reset.
    pub fn start_level(&mut self) {
        let level = self.level();
        let def = self.config.levels[self.level_index].clone();

        self.world.clear_entities();
        self.world.player.reset_for_level(&self.config);
        self.spawner = Spawner::new(def.waves);
        self.clock = LevelClock::arm(def.time_budget_ms);
        self.reinforcement = def.reinforcement;

        materialize(
            &def.persistent,
            &mut self.world.enemies,
            &mut self.ids,
            &self.config,
            &mut self.rng,
        );
        log::info!(
            "Level {} starting: {} persistent enemies, {} waves, budget {:?} ms",
            level,
            def.persistent.len(),
            self.spawner.waves_remaining(),
            def.time_budget_ms
        );
        self.events.push(GameEvent::LevelStarted { level });
        self.level_state = LevelState::InProgress;

        if self.world.enemies.is_empty() {
            self.request_wave();
        }
    }

    /// Ask the spawner for the next wave; completes the level when exhausted
    pub(crate) fn request_wave(&mut self) {
        let outcome = self.spawner.on_enemies_cleared(
            &mut self.world.enemies,
            &mut self.ids,
            &self.config,
            &mut self.rng,
        );
        match outcome {
            SpawnOutcome::Spawned { index, count } => {
                self.events.push(GameEvent::WaveSpawned {
                    wave: index as u32 + 1,
                    count: count as u32,
                });
            }
            SpawnOutcome::Exhausted => {
                let level = self.level();
                log::info!("Level {} complete (score {})", level, self.world.player.score);
                self.events.push(GameEvent::LevelComplete { level });
                self.level_state = LevelState::Complete {
                    hold_ms: self.config.complete_hold_ms,
                };
            }
            SpawnOutcome::Busy => {}
        }
    }

    /// Move past a completed level: build the next one or declare victory
    pub(crate) fn advance_level(&mut self) {
        if self.level_index + 1 < self.config.levels.len() {
            self.level_index += 1;
            self.start_level();
        } else {
            log::info!("All levels cleared! Final score {}", self.world.player.score);
            self.events.push(GameEvent::Win);
            self.level_state = LevelState::Win;
            self.menu = Some(Menu::new(MenuKind::Restart));
        }
    }

    /// Fresh session at level 1 (keeps seed and config), skipping the title
    pub fn restart(&mut self) {
        log::info!("Restarting session (seed {})", self.seed);
        let mut fresh = Session::new(self.seed, self.config.clone());
        fresh.menu = None;
        *self = fresh;
    }
}
