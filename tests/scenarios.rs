use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use pooper_hunt::GameConfig;
use pooper_hunt::settings::EnemyTuning;
use pooper_hunt::sim::*;

fn crate_at(x: f32, y: f32) -> Body {
    Body::new(Vec2::new(x, y), Vec2::splat(100.0), 0, -1)
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    let body = Body::new(Vec2::new(x, y), Vec2::splat(50.0), 100, 100);
    Enemy::new(7, body, Vec2::new(2.0, 0.0), 2.0)
}

fn dead_center_shot(enemy: &Enemy, damage: f32) -> Projectile {
    let mut shot = Projectile::new(enemy.body.center(), 1000.0, damage);
    shot.advance();
    shot
}

// ── Scenario A: wounding shot ───────────────────────────────────────────────

#[test]
fn wounding_shot_leaves_enemy_alive_and_panicking() {
    let tuning = EnemyTuning::default();
    let obstacles = [crate_at(100.0, 400.0), crate_at(200.0, 300.0)];
    let mut rng = Pcg32::seed_from_u64(1);
    let mut enemy = enemy_at(450.0, 300.0);

    let shot = dead_center_shot(&enemy, 80.0);
    assert_eq!(shot.check_for_hit([&enemy.body], true), vec![0]);
    assert_eq!(enemy.body.radius(), 25.0);
    assert_eq!(shot.direct_multiplier(&enemy.body), 1.0);

    let damage = shot.damage_against(&enemy.body);
    enemy.body.apply_damage(damage.round() as i32);
    assert_eq!(enemy.body.hp, 20);
    assert_eq!(enemy.body.max_hp(), 100);

    let removed = enemy.update(1_000, &obstacles, &tuning, &mut rng);
    assert!(!removed);
    assert!(!enemy.is_dead());
    assert_eq!(enemy.mode(), Mode::Panic);
    assert_eq!(enemy.comfort_hp(), 20);
}

// ── Scenario B: lethal follow-up ────────────────────────────────────────────

#[test]
fn lethal_shot_starts_single_fall_and_freezes_facing() {
    let tuning = EnemyTuning::default();
    let obstacles = [crate_at(100.0, 400.0)];
    let mut rng = Pcg32::seed_from_u64(2);
    let mut enemy = enemy_at(450.0, 300.0);

    enemy.body.apply_damage(80);
    enemy.update(1_000, &obstacles, &tuning, &mut rng);
    let facing = enemy.facing();
    enemy.schedule(ScheduledAction::new(5_000, 400, Vec2::new(4.0, 0.0)));

    let shot = dead_center_shot(&enemy, 80.0);
    enemy.body.apply_damage(shot.damage_against(&enemy.body).round() as i32);
    assert!(enemy.body.hp <= 0);

    assert!(enemy.update(1_016, &obstacles, &tuning, &mut rng));
    assert!(enemy.is_dead());
    assert_eq!(enemy.actions().len(), 1);
    let fall = enemy.actions().iter().next().unwrap();
    assert_eq!(fall.start_ms, 1_016);
    assert!(fall.accel_y > 0.0);
    assert_eq!(enemy.facing(), facing);

    // Later updates never re-trigger death or change facing
    assert!(!enemy.update(1_032, &obstacles, &tuning, &mut rng));
    assert_eq!(enemy.actions().len(), 1);
    assert_eq!(enemy.facing(), facing);
}

// ── Scenario C: area radius excludes distant enemy ──────────────────────────

#[test]
fn area_shot_misses_enemy_outside_radius() {
    let obstacle = crate_at(100.0, 100.0);
    let impact = Vec2::new(300.0, 100.0);
    assert_eq!(distance(obstacle.pos, impact), 200.0);

    // Enemy center 60 units right of the impact point
    let enemy = Body::new(Vec2::new(335.0, 75.0), Vec2::splat(50.0), 0, 100);
    assert_eq!(distance(enemy.center(), impact), 60.0);

    let mut shot = Projectile::new(impact, 1000.0, 80.0).with_area(80.0, 50.0, true);
    shot.advance();
    assert!(shot.check_for_hit([&obstacle], true).is_empty());
    assert!(shot.check_for_hit([&enemy], true).is_empty());
    assert_eq!(shot.damage_against(&enemy), 0.0);
}

// ── Scenario D: degenerate steering ─────────────────────────────────────────

#[test]
fn velocity_toward_own_position_is_zero() {
    let p = Vec2::new(450.0, 300.0);
    assert_eq!(velocity_toward(4.0, p, p), Vec2::ZERO);
}

// ── Whole-scene flows ───────────────────────────────────────────────────────

#[test]
fn struck_enemy_runs_for_cover_and_hides() {
    let mut config = GameConfig::default();
    config.obstacles.truncate(1);
    let mut state = GameState::new(config, 99).unwrap();
    state.spawners.clear();
    let id = state.spawn_enemy(Vec2::new(400.0, 400.0));

    // Wound it: it panics and heads for the crate at (100, 400)
    let now = 16;
    tick(&mut state, &TickInput::click(427.0, 425.0), now);
    assert_eq!(state.enemy(id).unwrap().body.hp, 20);

    let mut t = now;
    let mut hidden_at = None;
    for _ in 0..400 {
        t += 16;
        tick(&mut state, &TickInput::default(), t);
        if state.enemy(id).unwrap().mode() == Mode::Hide {
            hidden_at = Some(t);
            break;
        }
    }

    let hidden_at = hidden_at.expect("enemy never reached cover");
    let enemy = state.enemy(id).unwrap();
    assert_eq!(enemy.body.vel, Vec2::ZERO);
    assert!(state.obstacles[0].encloses(&enemy.body));
    let recovery = enemy.recovery_at_ms().unwrap();
    assert!((hidden_at + 8_000..=hidden_at + 18_000).contains(&recovery));
}

#[test]
fn same_seed_same_inputs_same_scene() {
    let run = || {
        let mut state = GameState::new(GameConfig::default(), 2024).unwrap();
        for frame in 0..600u64 {
            let mut events = Vec::new();
            if frame % 60 == 0 {
                events.push(InputEvent::DirectionTick);
            }
            if frame % 45 == 0 {
                if let Some(e) = state.enemies.first() {
                    let c = e.body.center();
                    events.push(InputEvent::Click { x: c.x, y: c.y });
                }
            }
            tick(&mut state, &TickInput::new(events), frame * 16);
        }
        let positions: Vec<Vec2> = state.enemies.iter().map(|e| e.body.pos).collect();
        (state.score, state.kills, positions)
    };
    assert_eq!(run(), run());
}
