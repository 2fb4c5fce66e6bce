//! Normalized pointer/touch input
//!
//! The host publishes pointer events as they arrive; the simulation reads a
//! single [`PointerSnapshot`] per tick. Every event overwrites position and
//! engaged flag together, so a reader never sees half an update.

use std::cell::Cell;

use glam::Vec2;

/// Host pointer events after mouse/touch differences are folded away
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// mousedown / touchstart
    Down { x: f32, y: f32 },
    /// mousemove / touchmove
    Move { x: f32, y: f32 },
    /// mouseup / touchend
    Up,
}

/// Latest pointer state as seen by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSnapshot {
    pub pos: Vec2,
    /// Pointer is pressed / touching
    pub engaged: bool,
}

impl PointerSnapshot {
    /// Disengaged pointer resting at `pos`
    pub fn idle(pos: Vec2) -> Self {
        Self {
            pos,
            engaged: false,
        }
    }

    /// Engaged pointer at `pos`
    pub fn engaged_at(pos: Vec2) -> Self {
        Self { pos, engaged: true }
    }

    /// Fold one event into the snapshot (last write wins)
    pub fn apply(self, event: PointerEvent) -> Self {
        match event {
            PointerEvent::Down { x, y } | PointerEvent::Move { x, y } => Self {
                pos: Vec2::new(x, y),
                engaged: true,
            },
            PointerEvent::Up => Self {
                engaged: false,
                ..self
            },
        }
    }
}

/// Single-writer/single-reader pointer record shared between the host's
/// event callbacks and the frame loop
#[derive(Debug)]
pub struct InputSignal {
    current: Cell<PointerSnapshot>,
}

impl InputSignal {
    /// Start disengaged with the pointer at `pos` (usually arena centre)
    pub fn new(pos: Vec2) -> Self {
        Self {
            current: Cell::new(PointerSnapshot::idle(pos)),
        }
    }

    /// Record a host event
    pub fn publish(&self, event: PointerEvent) {
        self.current.set(self.current.get().apply(event));
    }

    /// Read the latest state
    pub fn snapshot(&self) -> PointerSnapshot {
        self.current.get()
    }

    /// Forget everything and rest at `pos` (session reset)
    pub fn reset(&self, pos: Vec2) {
        self.current.set(PointerSnapshot::idle(pos));
    }
}
