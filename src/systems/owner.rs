//! Owner behavior.
//!
//! Owners walk up the lane right of the play area, stop level with its
//! middle to ask for an animal, and walk off the top of the screen once they
//! have it. Leaving the screen removes the owner together with its animal.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;

use crate::components::boxcollider::BoxCollider;
use crate::components::indicator::{Anchor, Indicator};
use crate::components::mapposition::MapPosition;
use crate::components::owner::{Owner, OwnerState};
use crate::components::phase::Phase;
use crate::components::species::Species;
use crate::components::visual::Visual;
use crate::geometry::Rect;
use crate::resources::gameconfig::GameConfig;
use crate::resources::playfield::PlayField;
use crate::resources::speciesgroups::SpeciesGroups;
use crate::resources::worldtime::WorldTime;

/// Components of a new owner asking for `wanted`, placed one owner height
/// below the bottom of the screen in the owners' lane.
pub fn owner_bundle(
    wanted: Species,
    config: &GameConfig,
    field: &PlayField,
) -> (Owner, Phase<OwnerState>, MapPosition, BoxCollider, Visual) {
    let size = config.owner_size;
    let center = Vec2::new(field.owner_lane_x(), field.screen.y + size.y);
    let rect = Rect::from_pos_size(Vec2::ZERO, size).with_center(center);
    (
        Owner::new(
            wanted,
            config.owner_speed,
            Indicator::new(config.bubble_size, Anchor::TopLeft, None),
            Indicator::new(config.marker_size, Anchor::MidTop, Some(config.exclamation_ms)),
        ),
        Phase::new(OwnerState::WalkToGate),
        MapPosition::from_vec(rect.pos()),
        BoxCollider::new(size.x, size.y),
        Visual::new(rect),
    )
}

/// The owner got its animal: drop the request and leave.
pub fn get_animal(owner: &mut Owner, phase: &mut Phase<OwnerState>) {
    owner.request.hide();
    phase.set(OwnerState::WalkAway);
}

pub fn owner_update(
    mut commands: Commands,
    time: Res<WorldTime>,
    field: Res<PlayField>,
    mut groups: ResMut<SpeciesGroups>,
    mut owners: Query<(
        Entity,
        &mut Owner,
        &mut Phase<OwnerState>,
        &mut MapPosition,
        &BoxCollider,
    )>,
) {
    let now = time.elapsed;

    for (entity, mut owner, mut phase, mut pos, collider) in owners.iter_mut() {
        match phase.current() {
            OwnerState::WalkToGate => {
                let rect = collider.rect(pos.pos);
                if rect.center_y() > field.play_area.center_y() {
                    pos.pos.y -= owner.speed;
                } else {
                    let wanted = owner.wanted;
                    owner.request.show_with_text(now, &rect, wanted.as_str());
                    phase.set(OwnerState::WaitForAnimal);
                    info!("Owner {:?} asks for a {}", entity, wanted);
                }
            }
            OwnerState::WaitForAnimal => {}
            OwnerState::WalkAway => {
                pos.pos.y -= owner.speed;
                if collider.rect(pos.pos).top() < -collider.size.y {
                    commands.entity(entity).try_despawn();
                    if let Some(animal) = owner.received {
                        commands.entity(animal).try_despawn();
                        groups.remove(animal);
                    }
                    info!("Owner {:?} left with {:?}", entity, owner.received);
                    continue;
                }
            }
        }

        let rect = collider.rect(pos.pos);
        owner.exclamation.expire(now);
        owner.request.follow(&rect);
        owner.exclamation.follow(&rect);
    }
}
