//! Game state and core simulation types
//!
//! One [`GameState`] is one session: created at startup or restart, mutated
//! only by [`super::tick`], read by the renderer and HUD.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::Tuning;

/// Anything with a position and a collision/draw radius
pub trait Body {
    fn pos(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// Visible arena bounds in pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a body of radius `r` so it stays fully inside
    pub fn clamp_inside(&self, pos: Vec2, r: f32) -> Vec2 {
        Vec2::new(
            crate::clamp(pos.x, r, self.width - r),
            crate::clamp(pos.y, r, self.height - r),
        )
    }

    /// True when `pos` lies further than `margin` outside any edge
    pub fn is_far_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}

/// The player's circle
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Displacement per tick while chasing the pointer
    pub speed: f32,
    pub health: f32,
    pub alive: bool,
    pub kills: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            health: tuning.player_max_health,
            alive: true,
            kills: 0,
        }
    }

    /// Step toward `target` unless already within `dead_zone`
    pub fn chase(&mut self, target: Vec2, dead_zone: f32) {
        let delta = target - self.pos;
        let len = delta.length();
        if len > dead_zone {
            self.pos += delta / len * self.speed;
        }
    }

    /// Apply contact damage; returns true if this hit was fatal
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            return true;
        }
        false
    }

    /// Health as the HUD should show it
    pub fn display_health(&self) -> f32 {
        self.health.max(0.0)
    }
}

impl Body for Player {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    /// Never produced; such bullets fly but never hit anything
    Enemy,
}

/// A projectile moving in a straight line
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Unit vector, or zero when fired at the player's own position
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub owner: Owner,
}

impl Bullet {
    /// Move one tick along `dir`
    pub fn advance(&mut self) {
        self.pos += self.dir * self.speed;
    }
}

impl Body for Bullet {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A chaser closing in on the player
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub alive: bool,
}

impl Enemy {
    /// Move one tick toward `target`, bearing perturbed by `jitter` radians
    pub fn advance(&mut self, target: Vec2, jitter: f32) {
        let to_target = target - self.pos;
        let bearing = to_target.y.atan2(to_target.x) + jitter;
        self.pos += Vec2::from_angle(bearing) * self.speed;
    }

    /// Apply bullet damage; returns true if the enemy died
    pub fn take_hit(&mut self, damage: f32) -> bool {
        self.health -= damage;
        if self.health <= 0.0 {
            self.alive = false;
        }
        !self.alive
    }
}

impl Body for Enemy {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired { bullet_id: u32 },
    EnemySpawned { id: u32 },
    EnemyKilled { id: u32 },
    /// Terminal: the session is over
    PlayerDied { kills: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub arena: Arena,
    pub player: Player,
    /// Live bullets, oldest first
    pub bullets: Vec<Bullet>,
    /// Live enemies, oldest first
    pub enemies: Vec<Enemy>,
    /// Time since the last shot (ms)
    pub shot_timer: f32,
    /// Time since the last spawn (ms)
    pub spawn_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start a fresh session: player centred at full health, a few enemies
    /// already closing in from the edges
    pub fn new(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        let player = Player::new(arena.center(), &tuning);
        let mut state = Self {
            seed,
            arena,
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            shot_timer: 0.0,
            spawn_timer: 0.0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        };

        for _ in 0..state.tuning.initial_enemies {
            state.spawn_enemy();
        }

        log::info!(
            "Session started (seed {}, arena {}x{}, {} enemies)",
            seed,
            arena.width,
            arena.height,
            state.enemies.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Track a new arena size; positions are re-clamped on the next tick
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Arena::new(width, height);
    }

    /// Fire one player bullet toward `target`
    pub fn fire_at(&mut self, target: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos: self.player.pos,
            dir: crate::direction_to(self.player.pos, target),
            speed: self.tuning.bullet_speed,
            radius: self.tuning.bullet_radius,
            owner: Owner::Player,
        });
        id
    }

    /// Add one enemy just beyond a random arena edge
    pub fn spawn_enemy(&mut self) -> u32 {
        let Arena { width, height } = self.arena;
        let margin = self.tuning.spawn_margin;

        let side = self.rng.random_range(0..4u8);
        let along: f32 = self.rng.random();
        let pos = match side {
            0 => Vec2::new(along * width, -margin),
            1 => Vec2::new(along * width, height + margin),
            2 => Vec2::new(-margin, along * height),
            _ => Vec2::new(width + margin, along * height),
        };

        // Half-open [min, max); a collapsed range is a fixed speed. Float
        // sampling can round up to `max`, so cap one ulp below it.
        let (min, max) = (self.tuning.enemy_speed_min, self.tuning.enemy_speed_max);
        let speed = if max > min {
            self.rng.random_range(min..max).min(max.next_down())
        } else {
            min
        };

        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            radius: self.tuning.enemy_radius,
            speed,
            health: self.tuning.enemy_health,
            alive: true,
        });
        id
    }

    /// Uniform jitter for one enemy's bearing this tick
    pub(crate) fn roll_jitter(&mut self) -> f32 {
        let max = self.tuning.enemy_jitter;
        self.rng.random_range(-max..=max)
    }
}
