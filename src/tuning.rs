//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults reproduce the
//! shipped balance; JSON overrides are partial, missing keys keep defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_radius: f32,
    pub player_speed: f32,
    pub player_max_health: f32,
    pub dead_zone: f32,

    pub fire_interval_ms: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub bullet_damage: f32,
    pub bullet_despawn_margin: f32,

    pub enemy_radius: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub enemy_health: f32,
    pub enemy_jitter: f32,
    pub contact_damage: f32,

    pub spawn_interval_ms: f32,
    pub max_enemies: usize,
    pub spawn_margin: f32,
    pub initial_enemies: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            dead_zone: DEAD_ZONE,

            fire_interval_ms: FIRE_INTERVAL_MS,
            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            bullet_damage: BULLET_DAMAGE,
            bullet_despawn_margin: BULLET_DESPAWN_MARGIN,

            enemy_radius: ENEMY_RADIUS,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            enemy_health: ENEMY_HEALTH,
            enemy_jitter: ENEMY_JITTER,
            contact_damage: CONTACT_DAMAGE,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            max_enemies: MAX_ENEMIES,
            spawn_margin: SPAWN_MARGIN,
            initial_enemies: INITIAL_ENEMIES,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_radius", self.player_radius),
            ("bullet_radius", self.bullet_radius),
            ("enemy_radius", self.enemy_radius),
            ("player_max_health", self.player_max_health),
            ("enemy_health", self.enemy_health),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }

        let non_negative = [
            ("player_speed", self.player_speed),
            ("dead_zone", self.dead_zone),
            ("fire_interval_ms", self.fire_interval_ms),
            ("bullet_speed", self.bullet_speed),
            ("bullet_damage", self.bullet_damage),
            ("bullet_despawn_margin", self.bullet_despawn_margin),
            ("enemy_speed_min", self.enemy_speed_min),
            ("enemy_jitter", self.enemy_jitter),
            ("contact_damage", self.contact_damage),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("spawn_margin", self.spawn_margin),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be zero or greater",
                });
            }
        }

        if !(self.enemy_speed_max >= self.enemy_speed_min) {
            return Err(TuningError::Invalid {
                field: "enemy_speed_max",
                reason: "must not be below enemy_speed_min",
            });
        }
        if self.initial_enemies > self.max_enemies {
            return Err(TuningError::Invalid {
                field: "initial_enemies",
                reason: "must not exceed max_enemies",
            });
        }
        Ok(())
    }
}
