//! Scene assembly: turns a read-only view of the session into triangles
//!
//! Output is in arena pixels (origin top-left, y down); the pipeline maps it
//! to clip space. Building a scene never touches simulation state, so calling
//! it twice between ticks yields the same vertices.

use glam::Vec2;

use super::shapes::{body_disc, circle, rect};
use super::vertex::{Vertex, colors};
use crate::input::PointerSnapshot;
use crate::sim::GameState;

/// Aim dot radius
const AIM_INDICATOR_RADIUS: f32 = 5.0;
/// How far along the player→pointer line the aim dot sits
const AIM_INDICATOR_REACH: f32 = 0.08;

/// Build the full frame for `state`, with the aim dot following `pointer`
pub fn build_scene(state: &GameState, pointer: PointerSnapshot) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let player = &state.player;

    if player.alive {
        vertices.extend(body_disc(player, colors::PLAYER));
        vertices.extend(circle(
            aim_indicator_pos(player.pos, pointer.pos),
            AIM_INDICATOR_RADIUS,
            colors::AIM_INDICATOR,
            12,
        ));
    } else {
        let arena = state.arena;
        vertices.extend(rect(
            Vec2::ZERO,
            Vec2::new(arena.width, arena.height),
            colors::DEATH_WASH,
        ));
    }

    for bullet in &state.bullets {
        vertices.extend(body_disc(bullet, colors::BULLET));
    }
    for enemy in &state.enemies {
        vertices.extend(body_disc(enemy, colors::ENEMY));
    }

    vertices
}

/// Where the aim dot is drawn
pub fn aim_indicator_pos(player: Vec2, pointer: Vec2) -> Vec2 {
    player + (pointer - player) * AIM_INDICATOR_REACH
}
