//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One owned `GameState` per session, mutated only by `tick`
//! - Seeded RNG only
//! - Entities stored oldest first; hit resolution walks them newest first

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, resolve_bullet_hits, touching_player};
pub use state::{Arena, Body, Bullet, Enemy, GameEvent, GameState, Owner, Player};
pub use tick::{apply_spawn_policy, tick};
