use bevy_ecs::prelude::Component;

use crate::geometry::Rect;

/// Render-facing state of an entity.
///
/// `screen_rect` is the entity's logical rectangle scaled to the current
/// display size. `frame` and `flip_h` mirror the entity's animation, if it
/// has one. Renderers draw visible entities and clear `dirty`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub visible: bool,
    pub dirty: bool,
    pub screen_rect: Rect,
    pub flip_h: bool,
    pub frame: usize,
}

impl Visual {
    pub fn new(screen_rect: Rect) -> Self {
        Self {
            visible: true,
            dirty: true,
            screen_rect,
            flip_h: false,
            frame: 0,
        }
    }
}
