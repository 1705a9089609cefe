//! Display resize event and observer.
//!
//! The host triggers a [`ResizeEvent`] on the level world when the window
//! changes size. [`observe_resize_event`] records the new display size and
//! re-derives every display rectangle from the logical one, so the
//! simulation itself never sees the resize.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::visual::Visual;
use crate::resources::levelstatus::LevelStatus;
use crate::resources::screenscale::ScreenScale;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    pub width: f32,
    pub height: f32,
}

pub fn observe_resize_event(
    trigger: On<ResizeEvent>,
    mut scale: ResMut<ScreenScale>,
    status: Option<ResMut<LevelStatus>>,
    mut visuals: Query<(&MapPosition, &BoxCollider, &mut Visual)>,
) {
    let event = trigger.event();
    let factor = scale.resize(Vec2::new(event.width, event.height));
    info!(
        "Resized display to {}x{} (factor {:.3}, {:.3})",
        event.width, event.height, factor.x, factor.y
    );
    for (pos, collider, mut visual) in visuals.iter_mut() {
        visual.screen_rect = scale.to_display(&collider.rect(pos.pos));
        visual.dirty = true;
    }
    if let Some(mut status) = status {
        status.redraw_all = true;
    }
}
