//! Idle/demo mode - a simple AI that plays the game
//!
//! Reads the session and produces the commands a player would send this
//! tick. Pure function of session state, so runs stay reproducible.

use super::collision::Body;
use super::level::LevelState;
use super::state::{MenuKind, MenuOption, Session};
use super::tick::Command;

/// Fire every N ticks while a target is lined up
const FIRE_INTERVAL_TICKS: u64 = 6;
/// Jump when a threat is this close in front of the player
const JUMP_TRIGGER_DISTANCE: f32 = 90.0;

/// Commands for the next tick
pub fn plan(session: &Session) -> Vec<Command> {
    if let Some(menu) = session.menu {
        let wanted = match menu.kind {
            MenuKind::Title => MenuOption::StartGame,
            MenuKind::Pause => MenuOption::Resume,
            MenuKind::Retry => MenuOption::Retry,
            // The demo ends after one run
            MenuKind::Restart => MenuOption::Quit,
        };
        return if menu.current() == wanted {
            vec![Command::MenuConfirm]
        } else {
            vec![Command::MenuDown]
        };
    }

    if session.level_state != LevelState::InProgress {
        return Vec::new();
    }

    let mut commands = Vec::new();
    let player = session.world.player.bounds();
    let front = player.max().x;

    // Anything ahead sharing the player's rows can be shot
    let target_in_lane = session.world.enemies.iter().any(|e| {
        let b = e.bounds();
        e.is_live() && b.min.x > player.min.x && b.min.y < player.max().y && player.min.y < b.max().y
    });
    if target_in_lane && session.time_ticks % FIRE_INTERVAL_TICKS == 0 {
        commands.push(Command::Shoot);
    }

    let threat_close = session
        .world
        .hazards
        .iter()
        .map(|h| h.bounds())
        .chain(session.world.enemies.iter().map(|e| e.bounds()))
        .any(|b| {
            let gap = b.min.x - front;
            (0.0..JUMP_TRIGGER_DISTANCE).contains(&gap) && b.max().y > player.min.y
        });
    if threat_close && !session.world.player.airborne {
        commands.push(Command::Jump);
    }

    commands
}
