//! Per-frame scene tick
//!
//! Order within a frame: input events, enemies, projectiles, spawners,
//! popups. Collections are never shrunk while being walked; removals are
//! applied by filtering once each pass is complete.

use glam::Vec2;
use rand::Rng;

use super::enemy::Enemy;
use super::projectile::Projectile;
use super::state::{GameEvent, GamePhase, GameState, off_screen};
use crate::consts::{DIRECTION_FLIP_CHANCE, MIN_KILL_SCORE};

/// An input event polled from the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed
    Quit,
    /// Fire at the given screen point
    Click { x: f32, y: f32 },
    /// The external once-per-second behavior timer elapsed
    DirectionTick,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self { events }
    }

    pub fn click(x: f32, y: f32) -> Self {
        Self::new(vec![InputEvent::Click { x, y }])
    }
}

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Advance the scene by one frame at clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) -> TickOutcome {
    if state.phase == GamePhase::Stopped {
        return TickOutcome::Quit;
    }

    state.events.clear();
    // The clock never runs backwards
    state.now_ms = state.now_ms.max(now_ms);

    for event in &input.events {
        match *event {
            InputEvent::Quit => {
                log::info!("Quit received at frame {}", state.frame);
                state.phase = GamePhase::Stopped;
                return TickOutcome::Quit;
            }
            InputEvent::Click { x, y } => state.fire(Vec2::new(x, y)),
            InputEvent::DirectionTick => flip_directions(state),
        }
    }

    update_enemies(state);
    update_projectiles(state);
    update_spawners(state);
    update_popups(state);

    state.frame += 1;
    TickOutcome::Continue
}

/// Each wandering enemy turns around with a fixed chance
fn flip_directions(state: &mut GameState) {
    let GameState { enemies, rng, .. } = state;
    for enemy in enemies.iter_mut() {
        if rng.random_bool(DIRECTION_FLIP_CHANCE) {
            enemy.change_direction();
        }
    }
}

fn update_enemies(state: &mut GameState) {
    let now = state.now_ms;
    {
        let GameState {
            enemies,
            corpses,
            obstacles,
            config,
            rng,
            ..
        } = &mut *state;
        for enemy in enemies.iter_mut() {
            enemy.update(now, obstacles, &config.enemy, rng);
        }
        for corpse in corpses.iter_mut() {
            corpse.update(now, obstacles, &config.enemy, rng);
        }
    }

    // Dead enemies leave the live set but keep falling as corpses
    let (dead, alive): (Vec<Enemy>, Vec<Enemy>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|e| e.body.is_removed());
    state.enemies = alive;
    state.corpses.extend(dead);

    let bounds = state.config.screen_bounds;
    let mut culled = Vec::new();
    state.enemies.retain(|e| {
        let keep = !off_screen(&e.body, bounds);
        if !keep {
            culled.push(e.id);
        }
        keep
    });
    state.corpses.retain(|c| {
        let keep = !off_screen(&c.body, bounds) && c.body.pos.y <= bounds.y;
        if !keep {
            culled.push(c.id);
        }
        keep
    });

    for id in culled {
        log::debug!("Culled enemy {} off screen", id);
        state.events.push(GameEvent::EnemyCulled { id });
    }
}

fn update_projectiles(state: &mut GameState) {
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut remaining = Vec::with_capacity(projectiles.len());
    for mut projectile in projectiles {
        projectile.advance();
        if !resolve_projectile(state, &projectile) {
            remaining.push(projectile);
        }
    }
    state.projectiles = remaining;
}

/// Returns true when the projectile is spent
fn resolve_projectile(state: &mut GameState, projectile: &Projectile) -> bool {
    if projectile.traveled() > state.config.max_projectile_range {
        return true;
    }

    // Cover absorbs point shots landing on it and area shots centered near it
    if !projectile.check_for_hit(&state.obstacles, true).is_empty() {
        return true;
    }

    // Enemies already out of hit points are waiting to be removed; skip them
    let live: Vec<usize> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.body.is_depleted())
        .map(|(i, _)| i)
        .collect();
    let hits = projectile.check_for_hit(live.iter().map(|&i| &state.enemies[i].body), true);
    if hits.is_empty() {
        return false;
    }

    let mut total_damage = 0.0;
    let mut kills = 0u32;
    for hit in hits {
        let enemy = &mut state.enemies[live[hit]];
        let damage = projectile.damage_against(&enemy.body);
        let applied = damage.round() as i32;
        enemy.body.apply_damage(applied);
        total_damage += damage;
        state.events.push(GameEvent::EnemyHit {
            id: enemy.id,
            damage: applied,
        });
        log::debug!("Enemy {} hit for {} (hp {})", enemy.id, applied, enemy.body.hp);

        if enemy.body.is_depleted() {
            kills += 1;
            state.events.push(GameEvent::EnemyKilled { id: enemy.id });
        }
    }

    if kills > 0 {
        let points = shot_score(total_damage, kills);
        state.score += points;
        state.kills += kills;
        state.events.push(GameEvent::ShotScored { points, kills });
        state.spawn_popup(format!("+{points}"), projectile.pos);
        log::debug!("Shot killed {} for {} points (score {})", kills, points, state.score);
    }
    true
}

/// Points for a shot that killed `kills` enemies: damage dealt, doubled for
/// every kill beyond the first, never less than the minimum award
pub fn shot_score(total_damage: f32, kills: u32) -> u64 {
    if kills == 0 {
        return 0;
    }
    let base = total_damage.max(0.0).round() as u64;
    let award = base.saturating_mul(2u64.saturating_pow(kills - 1));
    award.max(MIN_KILL_SCORE)
}

fn update_spawners(state: &mut GameState) {
    let now = state.now_ms;
    let mut due = Vec::new();
    {
        let GameState { spawners, rng, .. } = &mut *state;
        for spawner in spawners.iter_mut() {
            if spawner.update(now, rng) {
                due.push(spawner.point);
            }
        }
    }
    for point in due {
        state.spawn_enemy(point);
    }
}

fn update_popups(state: &mut GameState) {
    let now = state.now_ms;
    state.popups.retain_mut(|p| p.update(now));
}
