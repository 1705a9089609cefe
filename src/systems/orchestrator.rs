//! Level orchestration.
//!
//! The systems here run once per tick in a fixed order, before the entity
//! updates (see [`crate::states::level::build_level_schedule`]):
//!
//! 1. [`win_check`] – no animals and no owner left ends the level
//! 2. [`owner_spawn`] – bring in a new owner when none is around
//! 3. [`gate_choreography`] – open the gate for a waiting owner
//! 4. [`gate_collision`] – resolve deliveries and wrong animals (gate open only)
//! 5. [`call_sync`] – exchange the calling flag and recognized calls with the
//!    voice collaborator
//!
//! Every system is gated by [`level_in_progress`], so once the level is won,
//! lost or has a pending state change, nothing else happens in it.
use bevy_ecs::prelude::*;
use log::info;
use smallvec::SmallVec;

use crate::components::animal::{Animal, AnimalState};
use crate::components::animation::SpriteAnimation;
use crate::components::boxcollider::BoxCollider;
use crate::components::gate::{Gate, GateState};
use crate::components::mapposition::MapPosition;
use crate::components::owner::{Owner, OwnerState};
use crate::components::phase::Phase;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::species::Species;
use crate::events::call::CallEvent;
use crate::events::gamestate::StateRequestEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{NextGameState, StateEntry, StateRequest};
use crate::resources::levelrng::LevelRng;
use crate::resources::levelstatus::{LevelOutcome, LevelStatus};
use crate::resources::playfield::PlayField;
use crate::resources::voice::CallInterface;
use crate::resources::worldtime::WorldTime;
use crate::systems::animal::go_to_owner;
use crate::systems::gate::{close_gate, open_gate};
use crate::systems::owner::{get_animal, owner_bundle};

pub const GAME_ENDED_MENU: &str = "game_ended_menu";
pub const NEXT_LEVEL_MENU: &str = "next_level_menu";
pub const PAUSE_MENU: &str = "pause_menu";
pub const GAME_WON_TEXT: &str = "Game won!";
pub const GAME_OVER_TEXT: &str = "Game over!";

/// Run condition: the level is still being played and no state change is pending.
pub fn level_in_progress(status: Res<LevelStatus>, next: Res<NextGameState>) -> bool {
    status.in_progress() && !next.is_pending()
}

/// Run condition: the gate is fully open.
pub fn gate_is_open(gates: Query<&Phase<GateState>, With<Gate>>) -> bool {
    gates
        .single()
        .map(|phase| phase.is(GateState::Open))
        .unwrap_or(false)
}

pub fn win_check(
    mut commands: Commands,
    call: Res<CallInterface>,
    mut status: ResMut<LevelStatus>,
    animals: Query<(), With<Animal>>,
    owners: Query<(), With<Owner>>,
) {
    if !animals.is_empty() || !owners.is_empty() {
        return;
    }
    call.0.stop();
    status.outcome = LevelOutcome::Won;
    info!("Level {} finished", status.name);

    let entry = StateEntry::from_previous(status.name.clone());
    let request = if status.is_final {
        StateRequest::set(GAME_ENDED_MENU, entry.with_message(GAME_WON_TEXT))
    } else {
        StateRequest::set(NEXT_LEVEL_MENU, entry)
    };
    commands.trigger(StateRequestEvent { request });
}

/// Spawn an owner when none exists, asking for a species picked uniformly
/// among the species of the animals still in the level.
pub fn owner_spawn(
    mut commands: Commands,
    config: Res<GameConfig>,
    field: Res<PlayField>,
    mut rng: ResMut<LevelRng>,
    owners: Query<(), With<Owner>>,
    animals: Query<&Animal>,
) {
    if !owners.is_empty() {
        return;
    }
    let mut present: SmallVec<[Species; 5]> = animals.iter().map(|a| a.species).collect();
    present.sort();
    present.dedup();
    if present.is_empty() {
        return;
    }
    let wanted = present[rng.0.usize(..present.len())];
    let bundle = owner_bundle(wanted, &config, &field);
    let entity = commands.spawn(bundle).id();
    info!("Owner {:?} arrives, wants a {}", entity, wanted);
}

pub fn gate_choreography(
    mut gates: Query<&mut Phase<GateState>, With<Gate>>,
    owners: Query<&Phase<OwnerState>, With<Owner>>,
) {
    let Ok(mut gate) = gates.single_mut() else {
        return;
    };
    let Ok(owner) = owners.single() else {
        return;
    };
    if gate.is(GateState::Closed) && owner.is(OwnerState::WaitForAnimal) {
        open_gate(&mut gate);
    }
}

/// Deliveries and wrong animals at the open gate.
#[allow(clippy::too_many_arguments)]
pub fn gate_collision(
    mut commands: Commands,
    time: Res<WorldTime>,
    call: Res<CallInterface>,
    mut status: ResMut<LevelStatus>,
    mut gates: Query<&mut Phase<GateState>, With<Gate>>,
    mut owners: Query<
        (
            Entity,
            &mut Owner,
            &mut Phase<OwnerState>,
            &MapPosition,
            &BoxCollider,
        ),
        Without<Animal>,
    >,
    mut animals: Query<
        (
            Entity,
            &mut Animal,
            &mut Phase<AnimalState>,
            &MapPosition,
            &BoxCollider,
            &mut RigidBody,
            &mut SpriteAnimation,
        ),
        Without<Owner>,
    >,
    mut players: Query<&mut Player>,
) {
    let now = time.elapsed;
    let Ok((owner_entity, mut owner, mut owner_phase, owner_pos, owner_collider)) =
        owners.single_mut()
    else {
        return;
    };
    let owner_rect = owner_collider.rect(owner_pos.pos);

    for (entity, mut animal, mut phase, pos, collider, mut body, mut animation) in
        animals.iter_mut()
    {
        // the delivered animal has reached its owner
        if phase.is(AnimalState::MoveWithOwner) && owner_phase.is(OwnerState::WaitForAnimal) {
            if let Ok(mut gate) = gates.single_mut() {
                close_gate(&mut gate);
            }
            get_animal(&mut owner, &mut owner_phase);
            continue;
        }

        if !(animal.hit_gate
            && phase.is(AnimalState::MoveInPlayArea)
            && owner_phase.is(OwnerState::WaitForAnimal))
        {
            continue;
        }

        let rect = collider.rect(pos.pos);
        if animal.species == owner.wanted {
            if !owner.receive(entity) {
                continue;
            }
            info!("{} {:?} accepted by owner {:?}", animal.species, entity, owner_entity);
            go_to_owner(
                &mut animal,
                &mut phase,
                &mut body,
                &mut animation,
                &rect,
                owner_entity,
                owner_rect,
            );
            animal.hide_markers();
            if let Ok(mut player) = players.single_mut() {
                player.circle.dirty = true;
            }
        } else {
            animal.exclamation.show(now, &rect);
            owner.exclamation.show(now, &owner_rect);
            if status.lose_life() {
                status.redraw_all = true;
                status.outcome = LevelOutcome::GameOver;
                call.0.stop();
                info!("Level {}: game over", status.name);
                let entry = StateEntry::from_previous(status.name.clone())
                    .with_message(GAME_OVER_TEXT);
                commands.trigger(StateRequestEvent {
                    request: StateRequest::set(GAME_ENDED_MENU, entry),
                });
                return;
            }
        }
    }
}

/// Mirror the player's calling flag into the voice collaborator and forward
/// a recognized call while the player is idle.
pub fn call_sync(mut commands: Commands, call: Res<CallInterface>, players: Query<&Player>) {
    let Ok(player) = players.single() else {
        return;
    };
    call.0.set_calling(player.is_calling());
    if player.is_calling() {
        return;
    }
    if let Some(species) = call.0.recognized_call() {
        commands.trigger(CallEvent { species });
    }
}
