//! Collision detection and combat resolution
//!
//! Everything is a circle, so overlap is a strict distance test between
//! centres against the sum of radii.

use super::state::{Body, Bullet, Enemy, Owner, Player};
use crate::distance;

/// Strict overlap between two circular bodies (touching is not a hit)
#[inline]
pub fn circles_overlap(a: &impl Body, b: &impl Body) -> bool {
    distance(a.pos(), b.pos()) < a.radius() + b.radius()
}

/// Resolve player bullets against enemies, returning the IDs of enemies
/// killed in kill order.
///
/// Bullets are resolved newest first, and each player bullet hits at most
/// the newest overlapping enemy. A bullet is consumed whether or not the hit
/// was lethal. Enemies that drop to zero health are removed immediately, so
/// later bullets in the same pass never see them.
pub fn resolve_bullet_hits(
    bullets: &mut Vec<Bullet>,
    enemies: &mut Vec<Enemy>,
    damage: f32,
) -> Vec<u32> {
    let mut killed = Vec::new();

    for idx in (0..bullets.len()).rev() {
        let bullet = &bullets[idx];
        if bullet.owner != Owner::Player {
            continue;
        }
        let Some(target) = enemies
            .iter()
            .rposition(|enemy| enemy.alive && circles_overlap(bullet, enemy))
        else {
            continue;
        };

        // Lower indices are untouched, so the reverse walk stays valid
        bullets.remove(idx);
        if enemies[target].take_hit(damage) {
            killed.push(enemies.remove(target).id);
        }
    }

    killed
}

/// Number of enemies currently touching the player
pub fn touching_player(player: &Player, enemies: &[Enemy]) -> usize {
    enemies
        .iter()
        .filter(|enemy| circles_overlap(*enemy, player))
        .count()
}
