//! Axis-aligned rectangles and scale helpers.
//!
//! All simulation geometry lives in logical screen coordinates: origin at
//! the top-left corner, x grows right, y grows down. [`Rect`] is the common
//! currency between the components, the collision checks and whatever
//! renderer sits on top of the crate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle from its top-left corner and size.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.top())
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn mid_top(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.top())
    }

    pub fn mid_bottom(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.bottom())
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// True when `other` lies completely within `self` (edges may touch).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Move the rectangle so it lies inside `bounds`. A rectangle larger than
    /// `bounds` is pinned to its top-left corner.
    pub fn clamp_inside(&self, bounds: &Rect) -> Rect {
        let max_x = (bounds.right() - self.w).max(bounds.left());
        let max_y = (bounds.bottom() - self.h).max(bounds.top());
        Rect::new(
            self.x.clamp(bounds.left(), max_x),
            self.y.clamp(bounds.top(), max_y),
            self.w,
            self.h,
        )
    }

    /// Scale position and size together.
    pub fn scaled(&self, scale: Vec2) -> Rect {
        Rect::new(
            self.x * scale.x,
            self.y * scale.y,
            self.w * scale.x,
            self.h * scale.y,
        )
    }

    /// Return a copy whose top-left corner sits at `pos`.
    pub fn with_pos(&self, pos: Vec2) -> Rect {
        Rect::new(pos.x, pos.y, self.w, self.h)
    }

    /// Return a copy whose bottom-center sits at `anchor`.
    pub fn with_mid_bottom(&self, anchor: Vec2) -> Rect {
        Rect::new(anchor.x - self.w * 0.5, anchor.y - self.h, self.w, self.h)
    }

    /// Return a copy whose center sits at `anchor`.
    pub fn with_center(&self, anchor: Vec2) -> Rect {
        Rect::new(
            anchor.x - self.w * 0.5,
            anchor.y - self.h * 0.5,
            self.w,
            self.h,
        )
    }
}

/// Relative factor between a new and an old size, per axis.
///
/// A zero old size yields a factor of 1.0 on that axis.
pub fn scale_factor(old: Vec2, new: Vec2) -> Vec2 {
    let fx = if old.x.abs() > f32::EPSILON {
        new.x / old.x
    } else {
        1.0
    };
    let fy = if old.y.abs() > f32::EPSILON {
        new.y / old.y
    } else {
        1.0
    };
    Vec2::new(fx, fy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.top_right(), Vec2::new(40.0, 20.0));
        assert_eq!(r.bottom_right(), Vec2::new(40.0, 60.0));
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
        assert_eq!(r.mid_bottom(), Vec2::new(25.0, 60.0));
    }

    #[test]
    fn clamp_inside_keeps_rect_in_bounds() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let r = Rect::new(95.0, -3.0, 10.0, 10.0).clamp_inside(&bounds);
        assert_eq!(r, Rect::new(90.0, 0.0, 10.0, 10.0));
        assert!(bounds.contains_rect(&r));
    }

    #[test]
    fn anchors_place_rect() {
        let r = Rect::new(0.0, 0.0, 10.0, 20.0).with_mid_bottom(Vec2::new(50.0, 100.0));
        assert_eq!(r, Rect::new(45.0, 80.0, 10.0, 20.0));
        let c = r.with_center(Vec2::new(0.0, 0.0));
        assert_eq!(c.center(), Vec2::ZERO);
    }

    #[test]
    fn scale_factor_handles_zero() {
        assert_eq!(
            scale_factor(Vec2::new(0.0, 100.0), Vec2::new(50.0, 200.0)),
            Vec2::new(1.0, 2.0)
        );
    }
}
