//! Combat resolution
//!
//! Runs once per tick after every entity advanced. Order matters:
//! bullets vs dragons, fireballs vs player, dragons vs player, then the
//! expiry sweep. Player death is resolved right after each damage
//! application so an overflowing hit costs exactly one life.

use super::collision::{Body, first_hit};
use super::entity::{Entity, Player, Vitality};
use super::state::{GameEvent, World};
use crate::config::GameConfig;

/// Tally of one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    pub enemy_hits: u32,
    pub enemy_kills: u32,
    pub player_hits: u32,
    pub lives_lost: u32,
    /// Last life spent; the session must stop simulating
    pub game_over: bool,
}

/// Apply all collisions for this tick, then drop expired entities
pub fn resolve(world: &mut World, config: &GameConfig, events: &mut Vec<GameEvent>) -> Resolution {
    let mut res = Resolution::default();

    resolve_projectiles(world, config, events, &mut res);
    if !res.game_over {
        resolve_hazards(world, config, events, &mut res);
    }
    if !res.game_over {
        resolve_melee(world, config, events, &mut res);
    }

    sweep_expired(world, config.screen.width);
    res
}

/// Each bullet hits at most the first live dragon it overlaps (id order)
fn resolve_projectiles(
    world: &mut World,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
    res: &mut Resolution,
) {
    let damage = config.projectile.damage;
    let reward = config.projectile.reward;

    for projectile in world.projectiles.iter_mut() {
        if projectile.spent {
            continue;
        }
        let Some(idx) = first_hit(&projectile.bounds(), &world.enemies, |e| e.is_live()) else {
            continue;
        };
        let enemy = &mut world.enemies[idx];
        projectile.spent = true;
        enemy.health -= damage;
        world.player.score += reward;
        res.enemy_hits += 1;
        events.push(GameEvent::EnemyHit { id: enemy.id });

        if enemy.health <= 0 {
            res.enemy_kills += 1;
            events.push(GameEvent::EnemyKilled {
                id: enemy.id,
                kind: enemy.kind(),
            });
        }
    }
}

fn resolve_hazards(
    world: &mut World,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
    res: &mut Resolution,
) {
    let player_box = world.player.bounds();
    for hazard in world.hazards.iter_mut() {
        if hazard.spent || !hazard.bounds().intersects(&player_box) {
            continue;
        }
        hazard.spent = true;
        if hurt_player(&mut world.player, hazard.damage, config, events, res) {
            return;
        }
    }
}

/// Contact costs the player a lump of health and removes the dragon
fn resolve_melee(
    world: &mut World,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
    res: &mut Resolution,
) {
    let player_box = world.player.bounds();
    for enemy in world.enemies.iter_mut() {
        if !enemy.is_live() || !enemy.bounds().intersects(&player_box) {
            continue;
        }
        enemy.despawned = true;
        if hurt_player(&mut world.player, config.melee_damage, config, events, res) {
            return;
        }
    }
}

/// Returns true on game over
fn hurt_player(
    player: &mut Player,
    amount: i32,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
    res: &mut Resolution,
) -> bool {
    res.player_hits += 1;
    events.push(GameEvent::PlayerHit { damage: amount });

    match player.take_damage(amount, config.player.max_health) {
        Vitality::Alive => false,
        Vitality::LifeLost => {
            res.lives_lost += 1;
            log::debug!("Life lost, {} remaining", player.lives);
            events.push(GameEvent::LifeLost {
                lives_left: player.lives,
            });
            false
        }
        Vitality::Dead => {
            res.lives_lost += 1;
            res.game_over = true;
            events.push(GameEvent::LifeLost { lives_left: 0 });
            true
        }
    }
}

/// Remove everything whose removal condition was met this tick
pub fn sweep_expired(world: &mut World, playfield_width: f32) {
    sweep(&mut world.projectiles, playfield_width);
    sweep(&mut world.enemies, playfield_width);
    sweep(&mut world.hazards, playfield_width);
}

fn sweep<T: Entity>(items: &mut Vec<T>, playfield_width: f32) {
    items.retain(|e| !e.is_expired(playfield_width));
}
