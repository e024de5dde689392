//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically:
//! input-apply → entity-advance → collision-resolve → expiry-cleanup →
//! level-state-check.

use serde::{Deserialize, Serialize};

use super::combat;
use super::entity::{Hazard, Projectile};
use super::level::LevelState;
use super::spawner::materialize;
use super::state::{GameEvent, Menu, MenuKind, MenuOption, Session};

/// Key press edge for held movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Press {
    Start,
    Stop,
}

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft(Press),
    MoveRight(Press),
    Jump,
    Shoot,
    TogglePause,
    MenuUp,
    MenuDown,
    MenuConfirm,
    Quit,
}

/// Advance the session by one tick.
///
/// `elapsed_ms` is the simulated time this tick covers. It only accrues
/// while a level is live and unpaused, so pausing freezes every countdown.
pub fn tick(session: &mut Session, commands: &[Command], elapsed_ms: u64) {
    if session.quit {
        return;
    }

    for &command in commands {
        apply_command(session, command);
        if session.quit {
            return;
        }
    }

    // Menus (title, pause, retry, restart) suspend the simulation entirely
    if session.menu.is_some() {
        return;
    }

    session.time_ticks += 1;

    match session.level_state {
        LevelState::Starting => session.start_level(),
        LevelState::InProgress => step_level(session, elapsed_ms),
        LevelState::Complete { hold_ms } => {
            let hold_ms = hold_ms.saturating_sub(elapsed_ms);
            if hold_ms == 0 {
                session.advance_level();
            } else {
                session.level_state = LevelState::Complete { hold_ms };
            }
        }
        LevelState::Failed { hold_ms } => {
            let hold_ms = hold_ms.saturating_sub(elapsed_ms);
            session.level_state = LevelState::Failed { hold_ms };
            if hold_ms == 0 {
                session.menu = Some(Menu::new(MenuKind::Retry));
            }
        }
        LevelState::Win | LevelState::GameOver => {
            if session.menu.is_none() {
                session.menu = Some(Menu::new(MenuKind::Restart));
            }
        }
    }
}

fn apply_command(session: &mut Session, command: Command) {
    match command {
        Command::Quit => {
            log::info!("Quit requested");
            session.quit = true;
        }
        Command::TogglePause => toggle_pause(session),
        Command::MenuUp => {
            if let Some(menu) = session.menu.as_mut() {
                menu.up();
            }
        }
        Command::MenuDown => {
            if let Some(menu) = session.menu.as_mut() {
                menu.down();
            }
        }
        Command::MenuConfirm => {
            if let Some(menu) = session.menu {
                confirm(session, menu.current());
            }
        }
        Command::MoveLeft(press) => {
            // Releases always register so no key sticks across a pause
            if press == Press::Stop || session.accepts_gameplay_input() {
                session.world.player.moving_left = press == Press::Start;
            }
        }
        Command::MoveRight(press) => {
            if press == Press::Stop || session.accepts_gameplay_input() {
                session.world.player.moving_right = press == Press::Start;
            }
        }
        Command::Jump => {
            if session.accepts_gameplay_input() {
                let jump_velocity = session.config.player.jump_velocity;
                session.world.player.jump(jump_velocity);
            }
        }
        Command::Shoot => {
            if session.accepts_gameplay_input() {
                let id = session.ids.next();
                let center = session.world.player.center();
                let projectile = Projectile::new(id, center, &session.config);
                session.world.projectiles.push(projectile);
                session.push_event(GameEvent::ShotFired { id });
            }
        }
    }
}

fn toggle_pause(session: &mut Session) {
    if session.is_paused() {
        session.menu = None;
        log::info!("Resumed");
    } else if session.accepts_gameplay_input() {
        session.menu = Some(Menu::new(MenuKind::Pause));
        log::info!("Paused at level {}", session.level());
    }
}

fn confirm(session: &mut Session, option: MenuOption) {
    match option {
        MenuOption::StartGame | MenuOption::Resume => session.menu = None,
        MenuOption::Retry => {
            log::info!("Retrying level {}", session.level());
            session.menu = None;
            session.level_state = LevelState::Starting;
        }
        MenuOption::Restart => session.restart(),
        MenuOption::Quit => {
            log::info!("Quit from menu");
            session.quit = true;
        }
    }
}

/// One `InProgress` tick
fn step_level(session: &mut Session, elapsed_ms: u64) {
    session.clock.accrue(elapsed_ms);

    let Session {
        config,
        rng,
        world,
        ids,
        clock,
        reinforcement,
        events,
        ..
    } = session;

    // Advance every entity
    world.player.advance(config);
    for projectile in &mut world.projectiles {
        projectile.advance();
    }
    let mut fireballs = Vec::new();
    for enemy in &mut world.enemies {
        if let Some(center) = enemy.advance(&config.hazard, rng) {
            fireballs.push(center);
        }
    }
    for hazard in &mut world.hazards {
        hazard.advance();
    }
    // Fireballs join the hazard set before the resolver sees it
    for center in fireballs {
        world.hazards.push(Hazard::new(ids.next(), center, &config.hazard));
    }

    if reinforcement
        .as_ref()
        .is_some_and(|r| clock.elapsed_ms >= r.at_ms)
    {
        if let Some(squad) = reinforcement.take() {
            let count = materialize(&squad.spawns, &mut world.enemies, ids, config, rng);
            log::info!("Reinforcements arrived ({count} enemies)");
            events.push(GameEvent::ReinforcementsArrived {
                count: count as u32,
            });
        }
    }

    let resolution = combat::resolve(world, config, events);
    world.normalize_order();

    // Game over beats every other outcome this tick
    if resolution.game_over {
        log::info!(
            "Game over at level {} (score {})",
            session.level(),
            session.world.player.score
        );
        session.push_event(GameEvent::GameOver);
        session.level_state = LevelState::GameOver;
        session.menu = Some(Menu::new(MenuKind::Restart));
        return;
    }

    if session.clock.expired() && !session.world.enemies.is_empty() {
        let level = session.level();
        log::info!(
            "Level {} failed: time's up with {} enemies left",
            level,
            session.world.enemies.len()
        );
        session.push_event(GameEvent::LevelFailed { level });
        session.level_state = LevelState::Failed {
            hold_ms: session.config.failed_hold_ms,
        };
        return;
    }

    if session.world.enemies.is_empty() {
        session.request_wave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::FRAME_MS;

    fn started() -> Session {
        let mut session = Session::new(12345, GameConfig::default());
        tick(&mut session, &[Command::MenuConfirm], FRAME_MS);
        assert_eq!(session.level_state, LevelState::InProgress);
        session
    }

    #[test]
    fn test_title_to_playing() {
        let mut session = Session::new(12345, GameConfig::default());

        // Title menu blocks everything
        tick(&mut session, &[Command::Shoot], FRAME_MS);
        assert_eq!(session.level_state, LevelState::Starting);
        assert!(session.world.projectiles.is_empty());
        assert_eq!(session.time_ticks, 0);

        tick(&mut session, &[Command::MenuConfirm], FRAME_MS);
        assert!(session.menu.is_none());
        assert_eq!(session.level_state, LevelState::InProgress);
        assert_eq!(session.world.enemies.len(), 6);
    }

    #[test]
    fn test_title_quit() {
        let mut session = Session::new(1, GameConfig::default());
        tick(&mut session, &[Command::MenuDown, Command::MenuConfirm], FRAME_MS);
        assert!(session.quit);
        assert_eq!(session.level_state, LevelState::Starting);
    }

    #[test]
    fn test_tick_pause() {
        let mut session = started();
        tick(&mut session, &[], FRAME_MS);
        let x = session.world.enemies[0].pos.x;
        let elapsed = session.clock.elapsed_ms;

        tick(&mut session, &[Command::TogglePause], FRAME_MS);
        assert!(session.is_paused());
        for _ in 0..100 {
            tick(&mut session, &[], FRAME_MS);
        }
        assert_eq!(session.world.enemies[0].pos.x, x);
        assert_eq!(session.clock.elapsed_ms, elapsed);

        // Gameplay input is swallowed while paused
        tick(&mut session, &[Command::Shoot, Command::Jump], FRAME_MS);
        assert!(session.world.projectiles.is_empty());
        assert!(!session.world.player.airborne);

        // Unpause via the menu
        tick(&mut session, &[Command::MenuConfirm], FRAME_MS);
        assert!(!session.is_paused());
        assert!(session.world.enemies[0].pos.x < x);
        assert_eq!(session.clock.elapsed_ms, elapsed + FRAME_MS);
    }

    #[test]
    fn test_pause_menu_quit() {
        let mut session = started();
        tick(
            &mut session,
            &[Command::TogglePause, Command::MenuUp, Command::MenuConfirm],
            FRAME_MS,
        );
        assert!(session.quit);
    }

    #[test]
    fn test_shoot_and_move() {
        let mut session = started();
        let x0 = session.world.player.pos.x;
        tick(&mut session, &[Command::MoveRight(Press::Start), Command::Shoot], FRAME_MS);
        assert_eq!(session.world.projectiles.len(), 1);
        assert!(session.world.player.pos.x > x0);
        assert!(session.drain_events().iter().any(|e| matches!(e, GameEvent::ShotFired { .. })));

        tick(&mut session, &[Command::MoveRight(Press::Stop)], FRAME_MS);
        let x1 = session.world.player.pos.x;
        tick(&mut session, &[], FRAME_MS);
        assert_eq!(session.world.player.pos.x, x1);
    }

    #[test]
    fn test_release_registers_while_paused() {
        let mut session = started();
        tick(&mut session, &[Command::MoveLeft(Press::Start)], FRAME_MS);
        tick(
            &mut session,
            &[Command::TogglePause, Command::MoveLeft(Press::Stop), Command::TogglePause],
            FRAME_MS,
        );
        assert!(!session.world.player.moving_left);
    }

    #[test]
    fn test_quit_stops_ticking() {
        let mut session = started();
        let ticks = session.time_ticks;
        tick(&mut session, &[Command::Quit], FRAME_MS);
        tick(&mut session, &[], FRAME_MS);
        assert!(session.quit);
        assert_eq!(session.time_ticks, ticks);
    }

    #[test]
    fn test_complete_hold_then_next_level() {
        let mut session = started();
        session.world.enemies.clear();
        tick(&mut session, &[], FRAME_MS);
        assert_eq!(
            session.level_state,
            LevelState::Complete {
                hold_ms: session.config.complete_hold_ms
            }
        );

        for _ in 0..200 {
            tick(&mut session, &[], FRAME_MS);
            if session.level() == 2 {
                break;
            }
        }
        // The next level is built on the tick the banner runs out
        assert_eq!(session.level(), 2);
        assert_eq!(session.level_state, LevelState::InProgress);
        assert_eq!(session.world.enemies.len(), 1);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut a = Session::new(99999, GameConfig::default());
        let mut b = Session::new(99999, GameConfig::default());
        a.level_index = 2;
        b.level_index = 2;

        let script = [
            vec![Command::MenuConfirm],
            vec![Command::Shoot],
            vec![Command::Jump, Command::MoveRight(Press::Start)],
            vec![],
        ];
        for step in 0..600 {
            let commands = &script[step % script.len()];
            tick(&mut a, commands, FRAME_MS);
            tick(&mut b, commands, FRAME_MS);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.world.player.score, b.world.player.score);
        assert_eq!(a.world.enemies.len(), b.world.enemies.len());
        for (ea, eb) in a.world.enemies.iter().zip(&b.world.enemies) {
            assert_eq!(ea.id, eb.id);
            assert_eq!(ea.pos, eb.pos);
        }
        assert_eq!(a.world.hazards.len(), b.world.hazards.len());
    }
}
