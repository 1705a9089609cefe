use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        (p0.min(p1), p0.max(p1))
    }

    /// The collider as a [`Rect`] for a given entity position.
    pub fn rect(&self, position: Vec2) -> Rect {
        let (min, max) = self.aabb(position);
        Rect::from_pos_size(min, max - min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_size_is_normalized() {
        let c = BoxCollider::new(-10.0, 20.0);
        let r = c.rect(Vec2::new(50.0, 0.0));
        assert_eq!(r, Rect::new(40.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn offset_moves_the_box() {
        let c = BoxCollider {
            offset: Vec2::new(2.0, 2.0),
            ..BoxCollider::new(4.0, 4.0)
        };
        assert_eq!(c.rect(Vec2::new(1.0, 0.0)), Rect::new(3.0, 2.0, 4.0, 4.0));
    }
}
