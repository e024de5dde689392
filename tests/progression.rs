//! End-to-end level progression through the public tick API

use glam::Vec2;
use rabbit_hero::GameConfig;
use rabbit_hero::consts::FRAME_MS;
use rabbit_hero::sim::{
    Command, EnemyKind, EnemySpawn, GameEvent, Hazard, LevelDef, LevelState, MenuKind, Phase,
    Projectile, Session, Snapshot, Wave, tick,
};

/// Session past the title screen with the given level live
fn session_at(level_index: usize, config: GameConfig) -> Session {
    let mut session = Session::new(2024, config);
    session.level_index = level_index;
    tick(&mut session, &[Command::MenuConfirm], FRAME_MS);
    assert_eq!(session.level_state, LevelState::InProgress);
    session
}

fn run(session: &mut Session, ticks: usize, elapsed_ms: u64) {
    for _ in 0..ticks {
        tick(session, &[], elapsed_ms);
    }
}

#[test]
fn level_one_cleared_by_six_shots() {
    let mut session = session_at(0, GameConfig::default());
    assert_eq!(session.world.enemies.len(), 6);
    assert!(session.world.enemies.iter().all(|e| e.kind() == EnemyKind::Ground));

    // One bullet on top of each dragon
    let centers: Vec<Vec2> = session
        .world
        .enemies
        .iter()
        .map(|e| e.pos + e.size / 2.0)
        .collect();
    for center in centers {
        let id = session.ids.next();
        let projectile = Projectile::new(id, center, &session.config);
        session.world.projectiles.push(projectile);
    }

    tick(&mut session, &[], FRAME_MS);

    assert_eq!(session.world.player.score, 60);
    assert!(session.world.enemies.is_empty());
    assert!(session.world.projectiles.is_empty());
    assert!(matches!(session.level_state, LevelState::Complete { .. }));

    let kills = session
        .drain_events()
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        .count();
    assert_eq!(kills, 6);
    assert_eq!(Snapshot::capture(&session).phase, Phase::LevelComplete);
}

#[test]
fn time_budget_fails_level_and_retry_restarts_it() {
    let mut session = session_at(2, GameConfig::default());
    assert_eq!(session.clock.budget_ms, Some(60_000));

    session.clock.elapsed_ms = 59_999;
    tick(&mut session, &[], 1);
    // Exactly at the budget is still fine
    assert_eq!(session.level_state, LevelState::InProgress);

    tick(&mut session, &[], 1);
    assert_eq!(session.clock.elapsed_ms, 60_001);
    assert_eq!(
        session.level_state,
        LevelState::Failed {
            hold_ms: session.config.failed_hold_ms
        }
    );
    assert!(session.drain_events().contains(&GameEvent::LevelFailed { level: 3 }));

    // Banner holds, then the retry prompt appears
    run(&mut session, 2, 1000);
    assert!(session.menu.is_none());
    run(&mut session, 1, 1000);
    assert_eq!(session.menu.map(|m| m.kind), Some(MenuKind::Retry));

    // Confirming rebuilds the level within the same tick
    tick(&mut session, &[Command::MenuConfirm], FRAME_MS);
    assert_eq!(session.level(), 3);
    assert_eq!(session.level_state, LevelState::InProgress);
    assert_eq!(session.clock.elapsed_ms, 0);
    assert_eq!(session.world.player.health, 100);
}

#[test]
fn next_wave_waits_for_field_to_clear() {
    let mut config = GameConfig::default();
    config.levels = vec![LevelDef {
        waves: vec![
            Wave::row(EnemyKind::Ground, 2, 600.0, 100.0, 530.0),
            Wave::row(EnemyKind::Ground, 3, 800.0, 100.0, 530.0),
        ],
        ..Default::default()
    }];
    let mut session = session_at(0, config);
    let first_wave: Vec<u32> = session.world.enemies.iter().map(|e| e.id).collect();
    assert_eq!(first_wave.len(), 2);

    // Kill one of two; the second wave must not appear
    session.world.enemies[0].health = 0;
    tick(&mut session, &[], FRAME_MS);
    assert_eq!(session.world.enemies.len(), 1);
    assert_eq!(session.spawner.next_index(), 1);

    session.world.enemies[0].health = 0;
    tick(&mut session, &[], FRAME_MS);
    assert_eq!(session.world.enemies.len(), 3);
    assert!(session.world.enemies.iter().all(|e| !first_wave.contains(&e.id)));
    assert!(
        session
            .drain_events()
            .contains(&GameEvent::WaveSpawned { wave: 2, count: 3 })
    );
}

#[test]
fn enemies_walking_off_screen_count_as_cleared() {
    let mut config = GameConfig::default();
    config.levels = vec![LevelDef {
        waves: vec![Wave {
            spawns: vec![EnemySpawn::new(EnemyKind::Ground, 400.0, 100.0)],
        }],
        ..Default::default()
    }];
    let mut session = session_at(0, config);
    // 450 px to cover at 2 px/tick, well above the player
    run(&mut session, 230, FRAME_MS);
    assert!(matches!(
        session.level_state,
        LevelState::Complete { .. }
    ));
    assert_eq!(session.world.player.score, 0);
}

#[test]
fn melee_overflow_costs_one_life() {
    let mut session = session_at(0, GameConfig::default());
    let pos = session.world.player.pos;
    let config = session.config.clone();
    for _ in 0..5 {
        let id = session.ids.next();
        session.world.enemies.push(rabbit_hero::sim::Enemy::spawn(
            id,
            &EnemySpawn::new(EnemyKind::Ground, pos.x, pos.y),
            &config,
            &mut session.rng,
        ));
    }
    tick(&mut session, &[], FRAME_MS);

    assert_eq!(session.world.player.lives, 2);
    assert_eq!(session.world.player.health, 100);
    let events = session.drain_events();
    let hits = events
        .iter()
        .filter(|e| matches!(e, GameEvent::PlayerHit { damage: 20 }))
        .count();
    assert_eq!(hits, 5);
    assert!(events.contains(&GameEvent::LifeLost { lives_left: 2 }));
}

#[test]
fn game_over_is_terminal_until_restart() {
    let mut session = session_at(0, GameConfig::default());
    session.world.player.lives = 1;
    session.world.player.health = 10;
    session.world.player.score = 70;
    let center = session.world.player.center();
    let id = session.ids.next();
    session
        .world
        .hazards
        .push(Hazard::new(id, center, &session.config.hazard));
    // Clearing the field the same tick must not mask the death
    session.world.enemies.clear();

    tick(&mut session, &[], FRAME_MS);
    assert_eq!(session.level_state, LevelState::GameOver);
    assert_eq!(session.world.player.lives, 0);
    assert_eq!(session.menu.map(|m| m.kind), Some(MenuKind::Restart));
    assert!(session.drain_events().contains(&GameEvent::GameOver));

    let ticks = session.time_ticks;
    run(&mut session, 10, FRAME_MS);
    assert_eq!(session.time_ticks, ticks);
    assert_eq!(session.level_state, LevelState::GameOver);

    tick(&mut session, &[Command::MenuConfirm], FRAME_MS);
    assert!(session.menu.is_none());
    assert_eq!(session.level(), 1);
    assert_eq!(session.world.player.score, 0);
    assert_eq!(session.world.player.lives, 3);
    assert_eq!(session.level_state, LevelState::InProgress);
    assert_eq!(session.world.enemies.len(), 6);
}

#[test]
fn clearing_last_level_wins() {
    let mut config = GameConfig::default();
    config.levels = vec![LevelDef::default(), LevelDef::default()];
    config.complete_hold_ms = 32;
    // Empty levels complete the moment they are built
    let mut session = Session::new(2024, config);
    tick(&mut session, &[Command::MenuConfirm], FRAME_MS);
    assert_eq!(session.level_state, LevelState::Complete { hold_ms: 32 });

    run(&mut session, 2, 16);
    assert_eq!(session.level(), 2);
    assert_eq!(session.level_state, LevelState::Complete { hold_ms: 32 });
    assert!(session.menu.is_none());

    run(&mut session, 1, 16);
    assert_eq!(session.level_state, LevelState::Complete { hold_ms: 16 });
    run(&mut session, 1, 16);
    assert_eq!(session.level_state, LevelState::Win);
    assert_eq!(Snapshot::capture(&session).phase, Phase::Win);
    assert!(session.drain_events().contains(&GameEvent::Win));
}

#[test]
fn reinforcements_join_level_three() {
    let mut session = session_at(2, GameConfig::default());
    let before = session.world.enemies.len();
    run(&mut session, 4999 / FRAME_MS as usize, FRAME_MS);
    assert!(session.reinforcement.is_some());

    run(&mut session, 2, FRAME_MS);
    assert!(session.reinforcement.is_none());
    let flying = session
        .world
        .enemies
        .iter()
        .filter(|e| e.kind() == EnemyKind::Flying)
        .count();
    assert!(flying >= 7);
    assert!(session.world.enemies.len() > before);
}

#[test]
fn pause_and_resume_in_one_batch_changes_nothing() {
    let mut a = session_at(2, GameConfig::default());
    let mut b = a.clone();
    run(&mut a, 30, FRAME_MS);
    run(&mut b, 30, FRAME_MS);

    tick(&mut a, &[Command::TogglePause, Command::TogglePause], FRAME_MS);
    tick(&mut b, &[], FRAME_MS);

    assert_eq!(Snapshot::capture(&a), Snapshot::capture(&b));
    assert_eq!(a.clock.elapsed_ms, b.clock.elapsed_ms);
}
