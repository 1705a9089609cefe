//! Level layout in logical coordinates.
//!
//! Everything that used to be derived from the screen size on the fly (the
//! play area, the gate's exit region and the gate's travel limits) is computed
//! once per level from the logical screen size and kept here.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::geometry::Rect;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayField {
    /// Logical screen size.
    pub screen: Vec2,
    /// Rectangle animals and the player are confined to.
    pub play_area: Rect,
    /// Region an animal's leading edge must reach to try the gate.
    pub gate_region: Rect,
    /// Initial top-left corner of the drawn gate.
    pub gate_start: Vec2,
    /// The gate is closed once its top is at or above this y.
    pub gate_closed_top: f32,
    /// The gate is open once its vertical center is at or below this y.
    pub gate_open_center_y: f32,
}

impl PlayField {
    /// Standard layout for a screen of the given logical size.
    pub fn for_screen(screen: Vec2) -> Self {
        let (w, h) = (screen.x, screen.y);
        let play_area = Rect::new(0.05 * w, 0.2 * h, 0.72 * w, 0.73 * h);
        Self {
            screen,
            play_area,
            gate_region: Rect::new(0.74 * w, 0.42 * h, 0.05 * w, 0.36 * h),
            gate_start: Vec2::new(0.81 * w, 0.35 * h),
            gate_closed_top: 0.35 * h,
            gate_open_center_y: 0.82 * h,
        }
    }

    pub fn screen_rect(&self) -> Rect {
        Rect::from_pos_size(Vec2::ZERO, self.screen)
    }

    /// Horizontal center of the strip right of the play area, where owners walk.
    pub fn owner_lane_x(&self) -> f32 {
        (self.screen.x - self.play_area.right()) / 2.0 + self.play_area.right()
    }
}
