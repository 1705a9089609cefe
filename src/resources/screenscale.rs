//! Logical-to-display scale resource.
//!
//! The simulation always runs in logical coordinates; only display
//! rectangles are scaled. The factor is derived from the logical size every
//! time instead of being multiplied onto previous results, so any sequence of
//! resizes ends in the same state as a single resize to the final size.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::geometry::{Rect, scale_factor};

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ScreenScale {
    /// Logical screen size the simulation runs in.
    pub logical: Vec2,
    /// Current display size in pixels.
    pub display: Vec2,
    /// Relative factor applied by the last resize (new / old display size).
    pub last_factor: Vec2,
}

impl ScreenScale {
    pub fn new(logical: Vec2, display: Vec2) -> Self {
        Self {
            logical,
            display,
            last_factor: Vec2::ONE,
        }
    }

    /// Display pixels per logical unit.
    pub fn factor(&self) -> Vec2 {
        scale_factor(self.logical, self.display)
    }

    /// Record a new display size. Returns the relative factor from the old one.
    pub fn resize(&mut self, display: Vec2) -> Vec2 {
        self.last_factor = scale_factor(self.display, display);
        self.display = display;
        self.last_factor
    }

    pub fn to_display(&self, logical: &Rect) -> Rect {
        logical.scaled(self.factor())
    }
}
