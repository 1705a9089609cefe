//! Player movement and call timing.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::animation::SpriteAnimation;
use crate::components::boxcollider::BoxCollider;
use crate::components::indicator::{Anchor, Indicator};
use crate::components::mapposition::MapPosition;
use crate::components::player::{CallCircle, Player};
use crate::components::visual::Visual;
use crate::geometry::Rect;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::playfield::PlayField;
use crate::resources::worldtime::WorldTime;

/// Spawn the player in the middle of the play area.
pub fn spawn_player(world: &mut World, config: &GameConfig, field: &PlayField) -> Entity {
    let size = config.player_size;
    let rect = Rect::from_pos_size(Vec2::ZERO, size).with_center(field.play_area.center());
    let circle = CallCircle::new(config.call_radius_factor * size.x, rect.center());
    let bubble = Indicator::new(config.bubble_size, Anchor::TopRight, None);
    world
        .spawn((
            Player::new(config.player_speed, config.speech_bubble_ms, bubble, circle),
            MapPosition::from_vec(rect.pos()),
            BoxCollider::new(size.x, size.y),
            SpriteAnimation::new(
                config.animation_frames as usize,
                config.animation_frame_ms,
            ),
            Visual::new(rect),
        ))
        .id()
}

/// Move the player from the held arrow keys and end finished calls.
///
/// Position is clamped to the play area. The call circle and speech bubble
/// follow the player only on frames where it actually moved.
pub fn player_update(
    time: Res<WorldTime>,
    field: Res<PlayField>,
    input: Res<InputState>,
    mut players: Query<(
        &mut Player,
        &mut MapPosition,
        &BoxCollider,
        &mut SpriteAnimation,
    )>,
) {
    let dt = time.delta;
    let now = time.elapsed;
    let (dx, dy) = input.direction();

    for (mut player, mut pos, collider, mut animation) in players.iter_mut() {
        player.moved = false;
        if dx != 0.0 || dy != 0.0 {
            let step = Vec2::new(dx, dy) * player.speed * (dt / 100.0);
            let rect = collider
                .rect(pos.pos + step)
                .clamp_inside(&field.play_area);
            let new_pos = rect.pos() - collider.offset;
            if new_pos != pos.pos {
                pos.pos = new_pos;
                player.moved = true;
            }
            animation.advance(dt);
            if dx != 0.0 {
                animation.flip_h = dx < 0.0;
            }
        }

        let rect = collider.rect(pos.pos);
        if player.moved {
            player.circle.follow(rect.center());
            player.bubble.follow(&rect);
        }

        if player.calling && now - player.call_started_at >= player.call_duration_ms {
            player.calling = false;
            player.bubble.hide();
        }
    }
}
