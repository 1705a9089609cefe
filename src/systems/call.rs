//! The call mechanic.
//!
//! [`call_animal`] observes [`CallEvent`]. A call shows the player's speech
//! bubble and turns every free-roaming animal of the called species whose
//! mask touches the call circle towards the player. While a call is in
//! progress further calls are ignored.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::animal::{Animal, AnimalState};
use crate::components::animation::SpriteAnimation;
use crate::components::boxcollider::BoxCollider;
use crate::components::collisionmask::CollisionMask;
use crate::components::mapposition::MapPosition;
use crate::components::phase::Phase;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::events::call::CallEvent;
use crate::resources::speciesgroups::SpeciesGroups;
use crate::resources::worldtime::WorldTime;
use crate::systems::animal::turn_towards_point;

pub fn call_animal(
    trigger: On<CallEvent>,
    time: Res<WorldTime>,
    groups: Res<SpeciesGroups>,
    mut players: Query<(&mut Player, &MapPosition, &BoxCollider), Without<Animal>>,
    mut animals: Query<
        (
            &mut Animal,
            &Phase<AnimalState>,
            &MapPosition,
            &BoxCollider,
            &CollisionMask,
            &mut RigidBody,
            &mut SpriteAnimation,
        ),
        Without<Player>,
    >,
) {
    let species = trigger.event().species;
    let now = time.elapsed;
    let Ok((mut player, player_pos, player_collider)) = players.single_mut() else {
        return;
    };
    if player.calling {
        debug!("Call for {} ignored, a call is in progress", species);
        return;
    }

    let player_rect = player_collider.rect(player_pos.pos);
    player.bubble.show_with_text(now, &player_rect, species.as_str());
    player.calling = true;
    player.call_started_at = now;

    let caller = player_rect.center();
    let circle_rect = player.circle.rect();
    let mut heard = 0;

    for entity in groups.members(species) {
        let Ok((mut animal, phase, pos, collider, mask, mut body, mut animation)) =
            animals.get_mut(*entity)
        else {
            continue;
        };
        if !phase.is(AnimalState::MoveInPlayArea) {
            continue;
        }
        let rect = collider.rect(pos.pos);
        let dx = (rect.x - circle_rect.x).round() as i32;
        let dy = (rect.y - circle_rect.y).round() as i32;
        if !player.circle.mask.overlaps(mask, dx, dy) {
            continue;
        }
        turn_towards_point(&mut body, &mut animation, rect.center(), caller);
        animal.heard.show(now, &rect);
        heard += 1;
    }

    info!("Called {}: {} animal(s) heard it", species, heard);
}
