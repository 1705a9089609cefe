//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity of an entity and the
//! constant speed its direction is normalised to. There are no forces and no
//! friction: bodies move in straight lines until something turns or reflects
//! them.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Constant-speed velocity holder.
///
/// # Fields
/// - `velocity` - Current velocity in logical units per 100 ms
/// - `speed` - Magnitude `velocity` is kept at when it is turned
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec2,
    pub speed: f32,
}

impl RigidBody {
    pub fn new(velocity: Vec2) -> Self {
        Self {
            velocity,
            speed: velocity.length(),
        }
    }

    /// Body moving at `speed` in the direction of `angle` radians.
    pub fn with_direction(speed: f32, angle: f32) -> Self {
        Self {
            velocity: Vec2::from_angle(angle) * speed,
            speed,
        }
    }

    /// Point the velocity from `from` towards `to`, keeping `speed`.
    ///
    /// Returns `true` when the horizontal direction changed sign so callers
    /// can mirror the sprite. A zero-length direction leaves the body as is.
    pub fn turn_towards(&mut self, from: Vec2, to: Vec2) -> bool {
        let direction = to - from;
        if direction.length() < f32::EPSILON {
            return false;
        }
        let old_x = self.velocity.x;
        self.velocity = direction.normalize() * self.speed;
        old_x * self.velocity.x < 0.0
    }

    pub fn reflect_x(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    pub fn reflect_y(&mut self) {
        self.velocity.y = -self.velocity.y;
    }

    /// Displacement over `dt_ms` milliseconds.
    pub fn step(&self, dt_ms: f32) -> Vec2 {
        self.velocity * (dt_ms / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn turn_towards_keeps_speed() {
        let mut rb = RigidBody::new(Vec2::new(5.0, 0.0));
        let flipped = rb.turn_towards(Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0));
        assert!(flipped);
        assert!((rb.velocity.length() - 5.0).abs() < EPSILON);
        assert!(rb.velocity.x < 0.0);
    }

    #[test]
    fn turn_towards_same_point_is_ignored() {
        let mut rb = RigidBody::new(Vec2::new(3.0, 4.0));
        let p = Vec2::new(7.0, 7.0);
        assert!(!rb.turn_towards(p, p));
        assert_eq!(rb.velocity, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn step_scales_with_delta() {
        let rb = RigidBody::new(Vec2::new(10.0, -5.0));
        assert_eq!(rb.step(50.0), Vec2::new(5.0, -2.5));
    }
}
