//! Text-facing view of the session for the HUD and the end-of-session screen

use serde::Serialize;

use crate::sim::GameState;

/// What the HUD shows after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudSnapshot {
    /// Whole health points, never negative
    pub health: u32,
    pub kills: u32,
    pub dead: bool,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            health: state.player.display_health().floor() as u32,
            kills: state.player.kills,
            dead: !state.player.alive,
        }
    }

    /// Lines of the end-of-session banner, `None` while alive
    pub fn death_banner(&self) -> Option<[String; 2]> {
        self.dead
            .then(|| ["You Died".to_string(), format!("Kills: {}", self.kills)])
    }
}
