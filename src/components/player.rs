//! Player (caretaker) actor and its call circle.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::collisionmask::CollisionMask;
use crate::components::indicator::Indicator;
use crate::geometry::Rect;

/// Area of effect of a call, centred on the player.
#[derive(Debug, Clone)]
pub struct CallCircle {
    pub radius: f32,
    pub center: Vec2,
    pub mask: CollisionMask,
    pub dirty: bool,
}

impl CallCircle {
    pub fn new(radius: f32, center: Vec2) -> Self {
        let radius = radius.max(1.0);
        Self {
            radius,
            center,
            mask: CollisionMask::circle(radius.round() as usize),
            dirty: true,
        }
    }

    /// Bounding square of the circle.
    pub fn rect(&self) -> Rect {
        let side = self.mask.width as f32;
        Rect::new(0.0, 0.0, side, side).with_center(self.center)
    }

    pub fn follow(&mut self, center: Vec2) {
        if self.center != center {
            self.center = center;
            self.dirty = true;
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Player {
    /// Logical units per 100 ms.
    pub speed: f32,
    pub calling: bool,
    /// World time (ms) the current call started.
    pub call_started_at: f32,
    /// How long a call stays active, in ms.
    pub call_duration_ms: f32,
    /// Speech bubble naming the called species.
    pub bubble: Indicator,
    pub circle: CallCircle,
    /// True when the player moved during the last update.
    pub moved: bool,
}

impl Player {
    pub fn new(speed: f32, call_duration_ms: f32, bubble: Indicator, circle: CallCircle) -> Self {
        Self {
            speed,
            calling: false,
            call_started_at: 0.0,
            call_duration_ms,
            bubble,
            circle,
            moved: false,
        }
    }

    pub fn is_calling(&self) -> bool {
        self.calling
    }
}
