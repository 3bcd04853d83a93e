//! Scene state and the long-lived types the tick mutates

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::Body;
use super::enemy::Enemy;
use super::projectile::Projectile;
use crate::consts::INVULNERABLE_HP;
use crate::error::ConfigError;
use crate::settings::{GameConfig, MsRange};

/// Whether the scene is still being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    /// A quit event was received
    Stopped,
}

/// Something notable that happened during the last tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    EnemyHit { id: u32, damage: i32 },
    EnemyKilled { id: u32 },
    /// A shot that killed at least one enemy
    ShotScored { points: u64, kills: u32 },
    /// An enemy or corpse left the playable area
    EnemyCulled { id: u32 },
}

/// Periodically emits enemies at a fixed point
#[derive(Debug, Clone)]
pub struct Spawner {
    pub point: Vec2,
    pub interval_ms: MsRange,
    /// `None` until the first spawn, so the first check always fires
    last_spawn_ms: Option<u64>,
    next_delay_ms: u64,
}

impl Spawner {
    pub fn new<R: Rng + ?Sized>(point: Vec2, interval_ms: MsRange, rng: &mut R) -> Self {
        Self {
            point,
            interval_ms,
            last_spawn_ms: None,
            next_delay_ms: interval_ms.sample(rng),
        }
    }

    /// Returns true when an enemy should be spawned at `now_ms`
    pub fn update<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> bool {
        let due = match self.last_spawn_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.next_delay_ms,
        };
        if due {
            self.next_delay_ms = self.interval_ms.sample(rng);
            self.last_spawn_ms = Some(now_ms);
        }
        due
    }

    pub fn next_delay_ms(&self) -> u64 {
        self.next_delay_ms
    }
}

/// Floating text, e.g. the points a shot earned
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub body: Body,
    pub text: String,
    pub expires_at_ms: u64,
}

impl Popup {
    pub fn new(text: String, pos: Vec2, rise_speed: f32, expires_at_ms: u64) -> Self {
        let mut body = Body::new(pos, Vec2::ZERO, 0, INVULNERABLE_HP);
        body.vel = Vec2::new(0.0, -rise_speed);
        Self {
            body,
            text,
            expires_at_ms,
        }
    }

    /// Drift one frame; returns false once expired
    pub fn update(&mut self, now_ms: u64) -> bool {
        self.body.update();
        now_ms < self.expires_at_ms
    }
}

/// Complete scene state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Clock value of the latest tick
    pub now_ms: u64,
    /// Simulated frame counter
    pub frame: u64,
    pub score: u64,
    pub kills: u32,
    /// Invulnerable cover, in configuration order
    pub obstacles: Vec<Body>,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Dead enemies still falling off screen; drawn but never hit
    pub corpses: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub spawners: Vec<Spawner>,
    pub popups: Vec<Popup>,
    /// Events from the latest tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a scene from a validated configuration
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let obstacles = config.obstacles.iter().map(Body::obstacle).collect();
        let spawners = vec![Spawner::new(
            config.spawn_point,
            config.spawn_interval_ms,
            &mut rng,
        )];

        log::info!(
            "Scene created with seed {} ({} obstacles, {} spawners)",
            seed,
            config.obstacles.len(),
            spawners.len()
        );

        Ok(Self {
            config,
            seed,
            rng,
            phase: GamePhase::Running,
            now_ms: 0,
            frame: 0,
            score: 0,
            kills: 0,
            obstacles,
            enemies: Vec::new(),
            corpses: Vec::new(),
            projectiles: Vec::new(),
            spawners,
            popups: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy at `point` with the configured spawn tuning
    pub fn spawn_enemy(&mut self, point: Vec2) -> u32 {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, point, &self.config.spawn, &self.config.enemy);
        self.enemies.push(enemy);
        self.events.push(GameEvent::EnemySpawned { id });
        log::info!("Spawned enemy {} at ({}, {})", id, point.x, point.y);
        id
    }

    /// Fire the configured weapon at `target`
    pub fn fire(&mut self, target: Vec2) {
        self.projectiles
            .push(Projectile::fire(target, &self.config.weapon));
    }

    /// Show `text` at `pos` for the configured popup lifetime
    pub fn spawn_popup(&mut self, text: String, pos: Vec2) {
        let expires = self.now_ms + self.config.popup.lifetime_ms;
        self.popups
            .push(Popup::new(text, pos, self.config.popup.rise_speed, expires));
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Fully left or right of the screen
    pub fn is_off_screen(&self, body: &Body) -> bool {
        off_screen(body, self.config.screen_bounds)
    }
}

/// Fully left of zero or right of `bounds.x`
pub fn off_screen(body: &Body, bounds: Vec2) -> bool {
    body.right() < 0.0 || body.pos.x > bounds.x
}
