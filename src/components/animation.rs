use bevy_ecs::prelude::Component;

/// Frame cycling for sprite-sheet creatures.
///
/// The renderer maps `frame_index` and `flip_h` onto its own images; this
/// component only keeps time.
#[derive(Debug, Clone, Copy, Component, PartialEq)]
pub struct SpriteAnimation {
    pub frame_index: usize,
    pub frame_count: usize,
    pub elapsed_time: f32,
    /// Milliseconds each frame stays on screen.
    pub frame_ms: f32,
    /// Mirror horizontally (facing left).
    pub flip_h: bool,
}

impl SpriteAnimation {
    pub fn new(frame_count: usize, frame_ms: f32) -> Self {
        Self {
            frame_index: 0,
            frame_count: frame_count.max(1),
            elapsed_time: 0.0,
            frame_ms,
            flip_h: false,
        }
    }

    /// Advance by `dt_ms`. Returns true when the frame changed.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        self.elapsed_time += dt_ms;
        if self.frame_ms <= 0.0 || self.elapsed_time < self.frame_ms {
            return false;
        }
        while self.elapsed_time >= self.frame_ms {
            self.elapsed_time -= self.frame_ms;
            self.frame_index = (self.frame_index + 1) % self.frame_count;
        }
        true
    }

    pub fn flip(&mut self) {
        self.flip_h = !self.flip_h;
    }
}
