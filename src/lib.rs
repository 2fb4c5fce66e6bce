//! Edge Swarm - A top-down arena shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, spawning, collisions, game state)
//! - `input`: Normalized pointer/touch signal shared with the host
//! - `renderer`: WebGPU rendering pipeline and HUD view
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use input::{InputSignal, PointerEvent, PointerSnapshot};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 18.0;
    /// Units per tick, not scaled by frame time
    pub const PLAYER_SPEED: f32 = 3.2;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    /// Pointer closer than this does not move the player
    pub const DEAD_ZONE: f32 = 4.0;

    /// Auto-fire interval (ms)
    pub const FIRE_INTERVAL_MS: f32 = 120.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 8.0;
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_DAMAGE: f32 = 12.0;
    /// Bullets further than this outside the arena are dropped
    pub const BULLET_DESPAWN_MARGIN: f32 = 50.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 16.0;
    pub const ENEMY_SPEED_MIN: f32 = 1.2;
    pub const ENEMY_SPEED_MAX: f32 = 2.4;
    pub const ENEMY_HEALTH: f32 = 25.0;
    /// Max bearing perturbation per tick (radians, either side)
    pub const ENEMY_JITTER: f32 = 0.2;
    /// Health drained from the player per touching enemy per tick
    pub const CONTACT_DAMAGE: f32 = 0.6;

    /// Spawn policy
    pub const SPAWN_INTERVAL_MS: f32 = 1100.0;
    pub const MAX_ENEMIES: usize = 8;
    pub const SPAWN_MARGIN: f32 = 30.0;
    pub const INITIAL_ENEMIES: usize = 3;
}

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike `f32::clamp` this never panics: when the bounds cross (arena
/// narrower than the body) `lo` wins.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Unit vector from `from` toward `to`.
///
/// A zero-length offset is divided by 1 instead, yielding `Vec2::ZERO`.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let len = delta.length();
    if len > 0.0 { delta / len } else { delta }
}
