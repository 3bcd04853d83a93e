//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module is deterministic for a given
//! seed and sequence of inputs:
//! - Velocities are per frame, schedules use absolute clock milliseconds
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod enemy;
pub mod geometry;
pub mod projectile;
pub mod schedule;
pub mod state;
pub mod tick;

pub use body::Body;
pub use enemy::{Enemy, Facing, Mode, ModeEvent};
pub use geometry::{distance, find_nearest, velocity_toward};
pub use projectile::Projectile;
pub use schedule::{ActionQueue, ScheduledAction};
pub use state::{GameEvent, GamePhase, GameState, Popup, Spawner};
pub use tick::{InputEvent, TickInput, TickOutcome, shot_score, tick};
