//! Rabbit Hero entry point
//!
//! Runs the simulation headless at a fixed rate. Rendering, audio and
//! input polling live in a front end; this runner drives the session with
//! the autopilot and reports progress through the log.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::Result;
    use clap::Parser;

    use rabbit_hero::GameConfig;
    use rabbit_hero::sim::{Command, GameEvent, Session, Snapshot, autopilot, tick};

    #[derive(Parser, Debug)]
    #[command(about = "Run the Rabbit Hero simulation headless", version)]
    pub struct Args {
        /// JSON config overriding the default balance and levels
        #[arg(long)]
        pub config: Option<PathBuf>,
        /// RNG seed for the run
        #[arg(long, default_value_t = 42)]
        pub seed: u64,
        /// Maximum ticks to simulate
        #[arg(long, default_value_t = 60 * 60 * 5)]
        pub ticks: u64,
        /// Print the final snapshot as JSON
        #[arg(long)]
        pub json: bool,
        /// Don't play; just tick the title screen
        #[arg(long)]
        pub no_autopilot: bool,
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        autopilot: bool,
        frame_ms: u64,
    }

    impl Game {
        fn new(seed: u64, config: GameConfig, autopilot: bool) -> Result<Self> {
            let frame_ms = config.frame_ms();
            Ok(Self {
                session: Session::try_new(seed, config)?,
                autopilot,
                frame_ms,
            })
        }

        /// Run one simulation tick and report what happened
        fn update(&mut self) {
            let commands: Vec<Command> = if self.autopilot {
                autopilot::plan(&self.session)
            } else {
                Vec::new()
            };
            tick(&mut self.session, &commands, self.frame_ms);

            for event in self.session.drain_events() {
                match event {
                    GameEvent::LifeLost { lives_left } => {
                        log::info!("Life lost ({} left)", lives_left)
                    }
                    GameEvent::WaveSpawned { wave, count } => {
                        log::debug!("Wave {wave}: {count} dragons")
                    }
                    GameEvent::EnemyKilled { id, kind } => log::debug!("{kind:?} dragon {id} down"),
                    GameEvent::GameOver => log::warn!("GAME OVER"),
                    GameEvent::Win => log::info!("You win!"),
                    _ => log::trace!("{event:?}"),
                }
            }
        }

        fn log_hud(&self) {
            let snap = Snapshot::capture(&self.session);
            log::info!(
                "tick {} level {} {:?}: health {} lives {} score {} sprites {}",
                snap.tick,
                snap.hud.level,
                snap.phase,
                snap.hud.health,
                snap.hud.lives,
                snap.hud.score,
                snap.sprites.len()
            );
        }
    }

    pub fn run(args: Args) -> Result<()> {
        let config = match &args.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        let fps = u64::from(config.frame_rate);
        log::info!("Rabbit Hero starting (seed {})", args.seed);

        let mut game = Game::new(args.seed, config, !args.no_autopilot)?;
        for n in 0..args.ticks {
            game.update();
            if n % (fps * 5) == 0 {
                game.log_hud();
            }
            if game.session.quit {
                break;
            }
        }
        game.log_hud();

        if args.json {
            let snap = Snapshot::capture(&game.session);
            println!("{}", serde_json::to_string_pretty(&snap)?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    native::run(native::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser front end drives `sim::tick` itself
}
