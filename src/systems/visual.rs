//! Display rectangle refresh.
use bevy_ecs::prelude::*;

use crate::components::animation::SpriteAnimation;
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::visual::Visual;
use crate::resources::screenscale::ScreenScale;

/// Re-derive each display rectangle from the entity's logical rectangle,
/// copy the animation frame and facing, and mark the visuals that changed.
pub fn refresh_visuals(
    scale: Res<ScreenScale>,
    mut visuals: Query<(
        &MapPosition,
        &BoxCollider,
        &mut Visual,
        Option<&SpriteAnimation>,
    )>,
) {
    for (pos, collider, mut visual, animation) in visuals.iter_mut() {
        let screen_rect = scale.to_display(&collider.rect(pos.pos));
        let (frame, flip_h) = animation
            .map(|a| (a.frame_index, a.flip_h))
            .unwrap_or((visual.frame, visual.flip_h));
        if visual.screen_rect != screen_rect || visual.frame != frame || visual.flip_h != flip_h
        {
            visual.screen_rect = screen_rect;
            visual.frame = frame;
            visual.flip_h = flip_h;
            visual.dirty = true;
        }
    }
}
