//! Animal behavior.
//!
//! - [`animal_update`] runs the routine of each animal's current
//!   [`AnimalState`] and keeps its markers in place.
//! - [`move_in_play_area`], [`move_to_owner`] and [`go_to_owner`] are the
//!   per-state routines, usable without a schedule.
//! - [`spawn_animal`] builds a fresh animal for a level.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::animal::{Animal, AnimalState};
use crate::components::animation::SpriteAnimation;
use crate::components::boxcollider::BoxCollider;
use crate::components::collisionmask::CollisionMask;
use crate::components::indicator::{Anchor, Indicator};
use crate::components::mapposition::MapPosition;
use crate::components::owner::Owner;
use crate::components::phase::Phase;
use crate::components::rigidbody::RigidBody;
use crate::components::species::Species;
use crate::components::visual::Visual;
use crate::geometry::Rect;
use crate::resources::gameconfig::GameConfig;
use crate::resources::levelrng::LevelRng;
use crate::resources::playfield::PlayField;
use crate::resources::worldtime::WorldTime;

/// Spawn an animal of `species` at a random spot of the play area, heading
/// in a random direction.
pub fn spawn_animal(
    world: &mut World,
    species: Species,
    config: &GameConfig,
    field: &PlayField,
    rng: &mut LevelRng,
) -> Entity {
    let size = config.animal_size;
    let area = field.play_area;
    let pos = Vec2::new(
        rng.range_f32(area.left(), area.right() - size.x),
        rng.range_f32(area.top(), area.bottom() - size.y),
    );
    let angle = rng.range_f32(0.0, std::f32::consts::TAU);
    let body = RigidBody::with_direction(config.animal_speed, angle);
    let mut animation = SpriteAnimation::new(
        config.animation_frames as usize,
        config.animation_frame_ms,
    );
    animation.flip_h = body.velocity.x < 0.0;

    let animal = Animal::new(
        species,
        Indicator::new(config.marker_size, Anchor::TopRight, Some(config.exclamation_ms)),
        Indicator::new(config.marker_size, Anchor::MidTop, Some(config.heard_ms)),
    );
    let rect = Rect::from_pos_size(pos, size);
    let entity = world
        .spawn((
            animal,
            Phase::new(AnimalState::MoveInPlayArea),
            MapPosition::from_vec(pos),
            BoxCollider::new(size.x, size.y),
            body,
            animation,
            CollisionMask::filled(size.x.round() as usize, size.y.round() as usize),
            Visual::new(rect),
        ))
        .id();
    debug!("Spawned {} {:?} at {:?}", species, entity, pos);
    entity
}

/// Free roaming step.
///
/// The candidate position is tested before it is taken. When both right-hand
/// corners of the candidate land in the gate region while heading right, the
/// animal flags `hit_gate` and turns back. Leaving the play area reflects
/// the offending axis. Any of these keeps the previous position, so the
/// animal never leaves the play area.
pub fn move_in_play_area(
    animal: &mut Animal,
    pos: &mut Vec2,
    collider: &BoxCollider,
    body: &mut RigidBody,
    animation: &mut SpriteAnimation,
    field: &PlayField,
    dt: f32,
) {
    animal.hit_gate = false;
    animation.advance(dt);

    let candidate_pos = *pos + body.step(dt);
    let candidate = collider.rect(candidate_pos);
    let area = &field.play_area;
    let mut blocked = false;
    let mut reflected_x = false;

    if body.velocity.x > 0.0
        && field.gate_region.contains_point(candidate.top_right())
        && field.gate_region.contains_point(candidate.bottom_right())
    {
        animal.hit_gate = true;
        body.reflect_x();
        reflected_x = true;
        blocked = true;
    }

    if !reflected_x && (candidate.left() < area.left() || candidate.right() > area.right()) {
        body.reflect_x();
        blocked = true;
    }

    if candidate.top() < area.top() || candidate.bottom() > area.bottom() {
        body.reflect_y();
        blocked = true;
    }

    if !blocked {
        *pos = candidate_pos;
    }
    animation.flip_h = body.velocity.x < 0.0;
}

/// Turn towards `target`, keeping the animal's speed and mirroring its facing.
pub fn turn_towards_point(
    body: &mut RigidBody,
    animation: &mut SpriteAnimation,
    from: Vec2,
    target: Vec2,
) {
    if body.turn_towards(from, target) {
        animation.flip_h = body.velocity.x < 0.0;
    }
}

/// Head for the owner that accepted the animal.
pub fn go_to_owner(
    animal: &mut Animal,
    phase: &mut Phase<AnimalState>,
    body: &mut RigidBody,
    animation: &mut SpriteAnimation,
    animal_rect: &Rect,
    owner: Entity,
    owner_rect: Rect,
) {
    animal.owner = Some(owner);
    animal.target = Some(owner_rect);
    turn_towards_point(body, animation, animal_rect.center(), owner_rect.center());
    phase.set(AnimalState::MoveToOwner);
}

/// Walk towards the target until the animal's x reaches the target's center.
///
/// Returns true once the animal has arrived (or cannot make progress to the
/// right any more).
pub fn move_to_owner(
    pos: &mut Vec2,
    body: &RigidBody,
    animation: &mut SpriteAnimation,
    target: Option<Rect>,
    dt: f32,
) -> bool {
    animation.advance(dt);
    let Some(target) = target else {
        return true;
    };
    if pos.x < target.center_x() && body.velocity.x > f32::EPSILON {
        *pos += body.step(dt);
        false
    } else {
        true
    }
}

/// Per-tick animal update.
pub fn animal_update(
    time: Res<WorldTime>,
    field: Res<PlayField>,
    mut animals: Query<
        (
            &mut Animal,
            &mut Phase<AnimalState>,
            &mut MapPosition,
            &BoxCollider,
            &mut RigidBody,
            &mut SpriteAnimation,
        ),
        Without<Owner>,
    >,
    owners: Query<(&MapPosition, &BoxCollider), (With<Owner>, Without<Animal>)>,
) {
    let dt = time.delta;
    let now = time.elapsed;

    for (mut animal, mut phase, mut pos, collider, mut body, mut animation) in animals.iter_mut() {
        let owner_rect = animal
            .owner
            .and_then(|owner| owners.get(owner).ok())
            .map(|(owner_pos, owner_collider)| owner_collider.rect(owner_pos.pos));

        match phase.current() {
            AnimalState::MoveInPlayArea => {
                move_in_play_area(
                    &mut animal,
                    &mut pos.pos,
                    collider,
                    &mut body,
                    &mut animation,
                    &field,
                    dt,
                );
            }
            AnimalState::MoveToOwner => {
                if owner_rect.is_some() {
                    animal.target = owner_rect;
                }
                let target = animal.target;
                if move_to_owner(&mut pos.pos, &body, &mut animation, target, dt) {
                    phase.set(AnimalState::MoveWithOwner);
                }
            }
            AnimalState::MoveWithOwner => {
                animation.advance(dt);
                if let Some(owner_rect) = owner_rect {
                    let placed = collider
                        .rect(pos.pos)
                        .with_mid_bottom(owner_rect.mid_bottom());
                    pos.pos = placed.pos() - collider.offset;
                }
            }
        }

        let rect = collider.rect(pos.pos);
        animal.exclamation.expire(now);
        animal.heard.expire(now);
        animal.exclamation.follow(&rect);
        animal.heard.follow(&rect);
    }
}
