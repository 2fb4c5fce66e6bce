//! Frame-driven simulation tick
//!
//! Core game loop that advances one session by one rendered frame.
//!
//! Movement is a fixed displacement per tick (player, bullets and enemies
//! alike); only the fire and spawn timers consume the frame delta. A slower
//! frame rate slows the whole game down.

use super::collision::{resolve_bullet_hits, touching_player};
use super::state::{GameEvent, GameState};
use crate::input::PointerSnapshot;

/// Advance the session by one frame of `dt_ms` milliseconds.
///
/// Reads the pointer exactly once (the snapshot passed in) and returns what
/// happened. A dead player freezes the world: nothing moves, no timers run.
pub fn tick(state: &mut GameState, input: &PointerSnapshot, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !state.player.alive {
        return events;
    }
    state.time_ticks += 1;

    // Chase the pointer, then keep inside the (possibly resized) arena
    if input.engaged {
        let dead_zone = state.tuning.dead_zone;
        state.player.chase(input.pos, dead_zone);
    }
    state.player.pos = state
        .arena
        .clamp_inside(state.player.pos, state.player.radius);

    // Auto-fire toward the pointer while engaged
    state.shot_timer += dt_ms;
    if input.engaged && state.shot_timer > state.tuning.fire_interval_ms {
        let bullet_id = state.fire_at(input.pos);
        state.shot_timer = 0.0;
        log::debug!("Shot fired (bullet {})", bullet_id);
        events.push(GameEvent::ShotFired { bullet_id });
    }

    // Move bullets, drop the ones that left the arena
    let arena = state.arena;
    let margin = state.tuning.bullet_despawn_margin;
    state.bullets.retain_mut(|bullet| {
        bullet.advance();
        !arena.is_far_outside(bullet.pos, margin)
    });

    // Bullets vs enemies
    let killed = resolve_bullet_hits(
        &mut state.bullets,
        &mut state.enemies,
        state.tuning.bullet_damage,
    );
    for id in killed {
        state.player.kills += 1;
        log::debug!("Enemy {} killed (kills: {})", id, state.player.kills);
        events.push(GameEvent::EnemyKilled { id });
    }

    // Enemies close in, each with its own bearing jitter
    let target = state.player.pos;
    for idx in 0..state.enemies.len() {
        let jitter = state.roll_jitter();
        state.enemies[idx].advance(target, jitter);
    }

    // Contact damage stacks per touching enemy
    let touching = touching_player(&state.player, &state.enemies);
    let contact_damage = state.tuning.contact_damage;
    for _ in 0..touching {
        if state.player.take_damage(contact_damage) {
            let kills = state.player.kills;
            log::info!("Player died with {} kills", kills);
            events.push(GameEvent::PlayerDied { kills });
            break;
        }
    }

    if let Some(id) = apply_spawn_policy(state, dt_ms) {
        events.push(GameEvent::EnemySpawned { id });
    }

    events
}

/// Spawn one enemy once the spawn timer has elapsed and the cap allows it.
///
/// The timer keeps accumulating while the arena is full, so a spawn follows
/// as soon as a slot frees up.
pub fn apply_spawn_policy(state: &mut GameState, dt_ms: f32) -> Option<u32> {
    state.spawn_timer += dt_ms;
    if state.spawn_timer > state.tuning.spawn_interval_ms
        && state.enemies.len() < state.tuning.max_enemies
    {
        let id = state.spawn_enemy();
        state.spawn_timer = 0.0;
        log::debug!("Enemy {} spawned ({} alive)", id, state.enemies.len());
        return Some(id);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, Bullet, Enemy, Owner};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    const FRAME_MS: f32 = 16.0;

    /// Session with no enemies and the player at arena centre (400, 300)
    fn empty_state() -> GameState {
        let mut state = GameState::new(12345, Arena::new(800.0, 600.0), Tuning::default());
        state.enemies.clear();
        state
    }

    fn idle(state: &GameState) -> PointerSnapshot {
        PointerSnapshot::idle(state.player.pos)
    }

    fn place_enemy(state: &mut GameState, pos: Vec2, health: f32) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            radius: 16.0,
            speed: 0.0,
            health,
            alive: true,
        });
        id
    }

    fn place_bullet(state: &mut GameState, pos: Vec2, dir: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos,
            dir,
            speed: 8.0,
            radius: 4.0,
            owner: Owner::Player,
        });
        id
    }

    #[test]
    fn test_engaged_pointer_moves_player() {
        let mut state = empty_state();
        let input = PointerSnapshot::engaged_at(Vec2::new(700.0, 300.0));
        tick(&mut state, &input, FRAME_MS);
        assert!((state.player.pos.x - 403.2).abs() < 1e-4);
        assert_eq!(state.player.pos.y, 300.0);
    }

    #[test]
    fn test_disengaged_pointer_does_not_move_or_fire() {
        let mut state = empty_state();
        let input = PointerSnapshot::idle(Vec2::new(700.0, 300.0));
        for _ in 0..20 {
            tick(&mut state, &input, FRAME_MS);
        }
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_movement_ignores_frame_time() {
        let mut fast = empty_state();
        let mut slow = empty_state();
        let input = PointerSnapshot::engaged_at(Vec2::new(700.0, 300.0));
        tick(&mut fast, &input, 8.0);
        tick(&mut slow, &input, 100.0);
        assert_eq!(fast.player.pos, slow.player.pos);
    }

    #[test]
    fn test_dead_zone() {
        let mut state = empty_state();
        let input = PointerSnapshot::engaged_at(Vec2::new(403.0, 300.0));
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_resize_clamps_on_next_tick() {
        let mut state = empty_state();
        state.resize(200.0, 100.0);
        let input = idle(&state);
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.player.pos, Vec2::new(182.0, 82.0));
    }

    #[test]
    fn test_auto_fire_interval() {
        let mut state = empty_state();
        let input = PointerSnapshot::engaged_at(Vec2::new(400.0, 100.0));

        // 7 * 16 = 112ms, not yet past the threshold
        for _ in 0..7 {
            let events = tick(&mut state, &input, FRAME_MS);
            assert!(events.is_empty());
        }
        assert!(state.bullets.is_empty());

        // 128ms > 120ms
        let events = tick(&mut state, &input, FRAME_MS);
        assert!(matches!(events.as_slice(), [GameEvent::ShotFired { .. }]));
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.shot_timer, 0.0);

        let bullet = &state.bullets[0];
        assert!((bullet.dir - Vec2::new(0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_fire_at_own_position_has_finite_direction() {
        let mut state = empty_state();
        state.shot_timer = 130.0;
        let input = PointerSnapshot::engaged_at(state.player.pos);
        tick(&mut state, &input, FRAME_MS);

        assert_eq!(state.bullets.len(), 1);
        let bullet = &state.bullets[0];
        assert!(bullet.dir.x.is_finite() && bullet.dir.y.is_finite());
        assert_eq!(bullet.dir, Vec2::ZERO);
        // A zero direction bullet stays put
        assert_eq!(bullet.pos, state.player.pos);
    }

    #[test]
    fn test_bullets_leave_arena() {
        let mut state = empty_state();
        // One step (8 units) carries this bullet past the 50 unit margin
        let gone = place_bullet(&mut state, Vec2::new(845.0, 300.0), Vec2::X);
        // Still within the margin after moving
        let kept = place_bullet(&mut state, Vec2::new(-40.0, 300.0), Vec2::NEG_X);
        let input = idle(&state);
        tick(&mut state, &input, FRAME_MS);

        assert!(state.bullets.iter().all(|b| b.id != gone));
        assert!(state.bullets.iter().any(|b| b.id == kept));
    }

    #[test]
    fn test_enemy_health_25_13_1_then_dead() {
        let mut state = empty_state();
        let enemy_pos = Vec2::new(600.0, 100.0);
        place_enemy(&mut state, enemy_pos, 25.0);

        let fire_once = |state: &mut GameState| {
            let id = place_bullet(state, enemy_pos - Vec2::new(10.0, 0.0), Vec2::X);
            let input = idle(state);
            let events = tick(state, &input, FRAME_MS);
            assert!(state.bullets.iter().all(|b| b.id != id), "hit bullet must be removed");
            events
        };

        fire_once(&mut state);
        assert_eq!(state.enemies[0].health, 13.0);
        fire_once(&mut state);
        assert_eq!(state.enemies[0].health, 1.0);
        assert!(state.enemies[0].alive);
        assert_eq!(state.player.kills, 0);

        let events = fire_once(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.kills, 1);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        );
    }

    #[test]
    fn test_contact_damage_drains_health() {
        let mut state = empty_state();
        let pos = state.player.pos;
        place_enemy(&mut state, pos + Vec2::new(10.0, 0.0), 25.0);
        let input = idle(&state);
        tick(&mut state, &input, FRAME_MS);
        assert!((state.player.health - 99.4).abs() < 1e-4);
    }

    #[test]
    fn test_contact_damage_is_additive() {
        let mut state = empty_state();
        let pos = state.player.pos;
        place_enemy(&mut state, pos + Vec2::new(10.0, 0.0), 25.0);
        place_enemy(&mut state, pos - Vec2::new(10.0, 0.0), 25.0);
        place_enemy(&mut state, pos + Vec2::new(0.0, 10.0), 25.0);
        let input = idle(&state);
        tick(&mut state, &input, FRAME_MS);
        assert!((state.player.health - 98.2).abs() < 1e-4);
    }

    #[test]
    fn test_last_hit_point_kills_player() {
        let mut state = empty_state();
        state.player.health = 1.0;
        let pos = state.player.pos;
        place_enemy(&mut state, pos, 25.0);
        place_enemy(&mut state, pos, 25.0);

        let input = idle(&state);
        let events = tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.player.health, 0.0);
        assert!(!state.player.alive);
        assert!(events.contains(&GameEvent::PlayerDied { kills: 0 }));
    }

    #[test]
    fn test_single_enemy_at_one_health() {
        let mut state = empty_state();
        state.player.health = 1.0;
        let pos = state.player.pos;
        place_enemy(&mut state, pos, 25.0);

        // 1.0 - 0.6 = 0.4, still alive
        let input = idle(&state);
        tick(&mut state, &input, FRAME_MS);
        assert!(state.player.alive);
        assert!((state.player.health - 0.4).abs() < 1e-5);

        // 0.4 - 0.6 < 0, clamped to exactly zero
        let input = idle(&state);
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.player.health, 0.0);
        assert!(!state.player.alive);
    }

    #[test]
    fn test_dead_world_is_frozen() {
        let mut state = empty_state();
        state.player.health = 0.0;
        state.player.alive = false;
        let enemy_pos = Vec2::new(100.0, 100.0);
        place_enemy(&mut state, enemy_pos, 25.0);
        state.enemies[0].speed = 2.0;
        place_bullet(&mut state, Vec2::new(300.0, 300.0), Vec2::X);
        let ticks_before = state.time_ticks;

        let input = PointerSnapshot::engaged_at(Vec2::new(0.0, 0.0));
        for _ in 0..200 {
            assert!(tick(&mut state, &input, 50.0).is_empty());
        }
        assert_eq!(state.time_ticks, ticks_before);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos, enemy_pos);
        assert_eq!(state.bullets[0].pos, Vec2::new(300.0, 300.0));
        assert!(!state.player.alive);
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut state = GameState::new(9, Arena::new(800.0, 600.0), Tuning::default());
        assert_eq!(state.enemies.len(), 3);
        state.spawn_timer = 1099.0;

        let spawned = apply_spawn_policy(&mut state, 2.0);
        assert!(spawned.is_some());
        assert_eq!(state.enemies.len(), 4);
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut state = empty_state();
        state.spawn_timer = 1000.0;
        assert!(apply_spawn_policy(&mut state, 100.0).is_none());
        assert_eq!(state.spawn_timer, 1100.0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut state = empty_state();
        for i in 0..8 {
            place_enemy(&mut state, Vec2::new(50.0 * i as f32, 0.0), 25.0);
        }
        state.spawn_timer = 5000.0;
        assert!(apply_spawn_policy(&mut state, 16.0).is_none());
        assert_eq!(state.enemies.len(), 8);
        // Timer keeps running while full
        assert_eq!(state.spawn_timer, 5016.0);

        state.enemies.pop();
        assert!(apply_spawn_policy(&mut state, 16.0).is_some());
        assert_eq!(state.enemies.len(), 8);
    }

    #[test]
    fn test_determinism() {
        // Same seed, inputs and frame times produce identical sessions
        let arena = Arena::new(640.0, 480.0);
        let mut state1 = GameState::new(99999, arena, Tuning::default());
        let mut state2 = GameState::new(99999, arena, Tuning::default());

        for i in 0..600 {
            let angle = i as f32 * 0.05;
            let input = PointerSnapshot::engaged_at(
                Vec2::new(320.0, 240.0) + Vec2::from_angle(angle) * 150.0,
            );
            let dt = 12.0 + (i % 7) as f32;
            let e1 = tick(&mut state1, &input, dt);
            let e2 = tick(&mut state2, &input, dt);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.player.kills, state2.player.kills);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.pos, b.pos);
        }
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            seed in any::<u64>(),
            width in 60.0f32..2000.0,
            height in 60.0f32..2000.0,
            frames in prop::collection::vec((-500.0f32..2500.0, -500.0f32..2500.0, any::<bool>(), 0.0f32..250.0), 1..120),
        ) {
            let mut state = GameState::new(seed, Arena::new(width, height), Tuning::default());
            let r = state.player.radius;
            for (x, y, engaged, dt) in frames {
                let input = PointerSnapshot { pos: Vec2::new(x, y), engaged };
                tick(&mut state, &input, dt);
                if state.player.alive {
                    let p = state.player.pos;
                    prop_assert!(p.x >= r && p.x <= width - r, "x out of bounds: {}", p.x);
                    prop_assert!(p.y >= r && p.y <= height - r, "y out of bounds: {}", p.y);
                }
            }
        }

        #[test]
        fn prop_enemy_cap_holds(
            seed in any::<u64>(),
            dts in prop::collection::vec(0.0f32..5000.0, 1..200),
        ) {
            let mut state = GameState::new(seed, Arena::new(800.0, 600.0), Tuning::default());
            let input = PointerSnapshot::idle(Vec2::new(400.0, 300.0));
            for dt in dts {
                tick(&mut state, &input, dt);
                prop_assert!(state.enemies.len() <= 8);
                prop_assert!(state.enemies.iter().all(|e| e.alive));
                prop_assert!(state.player.health >= 0.0);
            }
        }
    }
}
