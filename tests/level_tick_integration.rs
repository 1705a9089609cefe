//! Level tick integration tests: movement bounds, calls, deliveries, lives,
//! the end of a level, pausing and resizing.

use bevy_ecs::prelude::*;
use glam::Vec2;
use std::sync::Arc;

use animaldaycare::components::animal::{Animal, AnimalState};
use animaldaycare::components::boxcollider::BoxCollider;
use animaldaycare::components::gate::{Gate, GateState};
use animaldaycare::components::mapposition::MapPosition;
use animaldaycare::components::owner::{Owner, OwnerState};
use animaldaycare::components::phase::Phase;
use animaldaycare::components::player::Player;
use animaldaycare::components::rigidbody::RigidBody;
use animaldaycare::components::species::Species;
use animaldaycare::components::visual::Visual;
use animaldaycare::events::call::CallEvent;
use animaldaycare::events::resize::ResizeEvent;
use animaldaycare::resources::gameconfig::GameConfig;
use animaldaycare::resources::gamestate::{NextGameState, StateEntry, StateRequest};
use animaldaycare::resources::input::{InputState, Key};
use animaldaycare::resources::levelstatus::{LevelOutcome, LevelStatus};
use animaldaycare::resources::levelstore::LevelDef;
use animaldaycare::resources::playfield::PlayField;
use animaldaycare::resources::speciesgroups::SpeciesGroups;
use animaldaycare::resources::voice::{CallSource, ScriptedCalls};
use animaldaycare::resources::worldtime::WorldTime;
use animaldaycare::states::GameState;
use animaldaycare::states::level::{GameLevel, build_level_schedule, build_level_world};
use animaldaycare::systems::orchestrator::{
    GAME_ENDED_MENU, GAME_OVER_TEXT, GAME_WON_TEXT, NEXT_LEVEL_MENU, PAUSE_MENU,
};
use animaldaycare::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;
const DT: f32 = 16.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(species: &[Species], seed: u64) -> (World, Schedule, Arc<ScriptedCalls>) {
    make_level("level_1", species, false, seed)
}

fn make_level(
    name: &str,
    species: &[Species],
    is_final: bool,
    seed: u64,
) -> (World, Schedule, Arc<ScriptedCalls>) {
    let calls = Arc::new(ScriptedCalls::new());
    let def = LevelDef {
        name: name.to_string(),
        species: species.to_vec(),
    };
    let config = GameConfig::new();
    let world = build_level_world(
        &def,
        is_final,
        &config,
        calls.clone(),
        config.screen_size(),
        seed,
    );
    calls.start();
    (world, build_level_schedule(), calls)
}

fn tick(world: &mut World, schedule: &mut Schedule) {
    update_world_time(world, DT);
    schedule.run(world);
}

fn animal_of(world: &mut World, species: Species) -> Entity {
    let mut query = world.query::<(Entity, &Animal)>();
    query
        .iter(world)
        .find(|(_, animal)| animal.species == species)
        .map(|(entity, _)| entity)
        .unwrap()
}

fn player(world: &mut World) -> Entity {
    let mut query = world.query_filtered::<Entity, With<Player>>();
    query.single(world).unwrap()
}

fn gate_state(world: &mut World) -> GateState {
    let mut query = world.query_filtered::<&Phase<GateState>, With<Gate>>();
    query.single(world).unwrap().current()
}

fn owner(world: &mut World) -> Option<(Entity, Species, OwnerState)> {
    let mut query = world.query::<(Entity, &Owner, &Phase<OwnerState>)>();
    query
        .single(world)
        .ok()
        .map(|(entity, owner, phase)| (entity, owner.wanted, phase.current()))
}

/// Stop every animal where it is.
fn freeze_animals(world: &mut World) {
    let mut query = world.query_filtered::<&mut RigidBody, With<Animal>>();
    for mut body in query.iter_mut(world) {
        body.velocity = Vec2::ZERO;
    }
}

/// Tick until an owner waits at the open gate.
fn wait_for_open_gate(world: &mut World, schedule: &mut Schedule) -> Species {
    for _ in 0..2000 {
        tick(world, schedule);
        if let Some((_, wanted, OwnerState::WaitForAnimal)) = owner(world) {
            if gate_state(world) == GateState::Open {
                return wanted;
            }
        }
    }
    panic!("owner never waited at an open gate");
}

fn animal_state(world: &World, entity: Entity) -> Option<AnimalState> {
    world
        .get::<Phase<AnimalState>>(entity)
        .map(|phase| phase.current())
}

/// Deliver `entity` to the waiting owner and tick until a state change is
/// requested. Returns the ticks at which the animal reached its owner and
/// the gate started closing.
fn deliver(world: &mut World, schedule: &mut Schedule, entity: Entity) -> (usize, usize) {
    send_to_gate(world, entity);
    let mut with_owner = None;
    let mut closing = None;
    for n in 1..2000 {
        tick(world, schedule);
        if with_owner.is_none() && animal_state(world, entity) == Some(AnimalState::MoveWithOwner) {
            with_owner = Some(n);
        }
        if closing.is_none() && gate_state(world) == GateState::MoveUp {
            closing = Some(n);
        }
        if world.resource::<NextGameState>().is_pending() {
            break;
        }
    }
    (with_owner.unwrap(), closing.unwrap())
}

/// Put an animal just left of the gate region, heading right.
fn send_to_gate(world: &mut World, entity: Entity) {
    let field = *world.resource::<PlayField>();
    let size = world.get::<BoxCollider>(entity).unwrap().size;
    world.get_mut::<MapPosition>(entity).unwrap().pos =
        Vec2::new(field.gate_region.left() - size.x - 0.5, field.gate_region.top() + 40.0);
    let mut body = world.get_mut::<RigidBody>(entity).unwrap();
    body.velocity = Vec2::new(body.speed.max(10.0), 0.0);
}

#[test]
fn animals_stay_inside_play_area() {
    let species = [Species::Dog, Species::Cat, Species::Pig, Species::Sheep, Species::Cow];
    let (mut world, mut schedule, _calls) = make_world(&species, 11);
    let area = world.resource::<PlayField>().play_area;

    for _ in 0..3000 {
        tick(&mut world, &mut schedule);
        let mut query = world.query::<(&Phase<AnimalState>, &MapPosition, &BoxCollider)>();
        for (phase, pos, collider) in query.iter(&world) {
            if phase.is(AnimalState::MoveInPlayArea) {
                assert!(
                    area.contains_rect(&collider.rect(pos.pos)),
                    "animal left the play area at {:?}",
                    pos.pos
                );
            }
        }
    }
}

#[test]
fn call_turns_nearby_animal_towards_player() {
    let (mut world, mut schedule, _calls) = make_world(&[Species::Dog], 3);
    let dog = animal_of(&mut world, Species::Dog);
    let player = player(&mut world);
    let center = world
        .get::<BoxCollider>(player)
        .unwrap()
        .rect(world.get::<MapPosition>(player).unwrap().pos)
        .center();

    // dog sits just left of the player, walking up
    world.get_mut::<MapPosition>(dog).unwrap().pos = center - Vec2::new(54.0, 18.0);
    world.get_mut::<RigidBody>(dog).unwrap().velocity = Vec2::new(0.0, -10.0);

    world.trigger(CallEvent {
        species: Species::Dog,
    });

    let body = world.get::<RigidBody>(dog).unwrap();
    assert!(body.velocity.x > 0.0);
    assert!(approx_eq(body.velocity.length(), body.speed));
    assert!(world.get::<Animal>(dog).unwrap().heard.visible);
    let player_ref = world.get::<Player>(player).unwrap();
    assert!(player_ref.calling);
    assert!(player_ref.bubble.visible);
    assert_eq!(player_ref.bubble.text.as_deref(), Some("dog"));

    tick(&mut world, &mut schedule);
    assert_eq!(
        world.get::<Phase<AnimalState>>(dog).unwrap().current(),
        AnimalState::MoveInPlayArea
    );
}

#[test]
fn call_far_away_is_not_heard() {
    let (mut world, _schedule, _calls) = make_world(&[Species::Cat], 3);
    let cat = animal_of(&mut world, Species::Cat);
    let area = world.resource::<PlayField>().play_area;
    world.get_mut::<MapPosition>(cat).unwrap().pos = area.pos();
    let before = world.get::<RigidBody>(cat).unwrap().velocity;

    world.trigger(CallEvent {
        species: Species::Cat,
    });

    assert_eq!(world.get::<RigidBody>(cat).unwrap().velocity, before);
    assert!(!world.get::<Animal>(cat).unwrap().heard.visible);
}

#[test]
fn call_while_calling_is_ignored_and_not_consumed() {
    let (mut world, mut schedule, calls) = make_world(&[Species::Dog], 5);
    freeze_animals(&mut world);
    let player = player(&mut world);

    calls.push(Species::Dog);
    tick(&mut world, &mut schedule);
    let started = world.get::<Player>(player).unwrap().call_started_at;
    assert!(world.get::<Player>(player).unwrap().calling);

    // a second call arrives during the first one
    calls.push(Species::Cow);
    tick(&mut world, &mut schedule);
    assert_eq!(calls.pending(), 1);
    assert!(calls.calling());
    world.trigger(CallEvent {
        species: Species::Pig,
    });
    let player_ref = world.get::<Player>(player).unwrap();
    assert_eq!(player_ref.call_started_at, started);
    assert_eq!(player_ref.bubble.text.as_deref(), Some("dog"));

    // once the call is over the queued one is picked up
    let ticks = (GameConfig::new().speech_bubble_ms / DT) as usize + 3;
    for _ in 0..ticks {
        tick(&mut world, &mut schedule);
    }
    assert_eq!(calls.pending(), 0);
    assert_eq!(
        world.get::<Player>(player).unwrap().bubble.text.as_deref(),
        Some("cow")
    );
}

#[test]
fn matching_delivery_closes_gate_and_wins_level() {
    let (mut world, mut schedule, calls) = make_world(&[Species::Dog], 9);
    freeze_animals(&mut world);
    let wanted = wait_for_open_gate(&mut world, &mut schedule);
    assert_eq!(wanted, Species::Dog);

    let dog = animal_of(&mut world, Species::Dog);
    let (owner_entity, _, _) = owner(&mut world).unwrap();

    let (with_owner, closing) = deliver(&mut world, &mut schedule, dog);
    // the gate closes on the tick after the animal reaches its owner
    assert_eq!(closing, with_owner + 1);
    assert!(world.get_entity(dog).is_err());
    assert!(world.get_entity(owner_entity).is_err());
    assert!(world.resource::<SpeciesGroups>().is_empty());
    let status = world.resource::<LevelStatus>();
    assert_eq!(status.outcome, LevelOutcome::Won);
    assert_eq!(status.active_lives(), 2);
    assert!(calls.stops() >= 1);

    let request = world.resource_mut::<NextGameState>().take();
    assert_eq!(
        request,
        Some(StateRequest::set(
            NEXT_LEVEL_MENU,
            StateEntry::from_previous("level_1")
        ))
    );

    // nothing further happens in a finished level
    for _ in 0..10 {
        tick(&mut world, &mut schedule);
    }
    assert!(!world.resource::<NextGameState>().is_pending());
}

#[test]
fn winning_final_level_ends_the_game() {
    let (mut world, mut schedule, calls) = make_level("level_4", &[Species::Dog], true, 9);
    freeze_animals(&mut world);
    wait_for_open_gate(&mut world, &mut schedule);
    let dog = animal_of(&mut world, Species::Dog);
    deliver(&mut world, &mut schedule, dog);

    assert_eq!(world.resource::<LevelStatus>().outcome, LevelOutcome::Won);
    assert!(calls.stops() >= 1);
    assert_eq!(
        world.resource_mut::<NextGameState>().take(),
        Some(StateRequest::set(
            GAME_ENDED_MENU,
            StateEntry::from_previous("level_4").with_message(GAME_WON_TEXT)
        ))
    );
}

#[test]
fn owner_wish_is_uniform_over_present_species() {
    let mut dogs = 0;
    let mut cats = 0;
    for seed in 0..200 {
        let (mut world, mut schedule, _calls) = make_world(&[Species::Dog, Species::Cat], seed);
        tick(&mut world, &mut schedule);
        match owner(&mut world).unwrap().1 {
            Species::Dog => dogs += 1,
            Species::Cat => cats += 1,
            other => panic!("owner wants a {} nobody brought", other),
        }
    }
    assert_eq!(dogs + cats, 200);
    assert!(dogs > 60 && cats > 60, "dogs={} cats={}", dogs, cats);
}

#[test]
fn owner_wants_the_only_species_left() {
    for seed in 0..20 {
        let (mut world, mut schedule, _calls) =
            make_world(&[Species::Dog, Species::Cat], seed);
        let cat = animal_of(&mut world, Species::Cat);
        world.despawn(cat);
        world.resource_mut::<SpeciesGroups>().remove(cat);

        tick(&mut world, &mut schedule);
        assert_eq!(owner(&mut world).unwrap().1, Species::Dog);
    }
}

#[test]
fn wrong_animal_costs_one_life() {
    let (mut world, mut schedule, _calls) = make_world(&[Species::Dog, Species::Cat], 21);
    freeze_animals(&mut world);
    let wanted = wait_for_open_gate(&mut world, &mut schedule);
    let wrong = if wanted == Species::Dog {
        Species::Cat
    } else {
        Species::Dog
    };
    let entity = animal_of(&mut world, wrong);
    send_to_gate(&mut world, entity);
    let start = world.get::<MapPosition>(entity).unwrap().pos;

    tick(&mut world, &mut schedule);
    // the step into the gate is refused
    assert_eq!(world.get::<MapPosition>(entity).unwrap().pos, start);
    assert!(world.get::<Animal>(entity).unwrap().hit_gate);

    tick(&mut world, &mut schedule);
    let status = world.resource::<LevelStatus>();
    assert_eq!(status.active_lives(), 1);
    assert!(status.lives[0].active);
    assert!(!status.lives[1].active);
    assert_eq!(status.outcome, LevelOutcome::Playing);

    assert!(world.get::<Animal>(entity).unwrap().exclamation.visible);
    assert!(world.get::<RigidBody>(entity).unwrap().velocity.x < 0.0);
    let (owner_entity, _, state) = owner(&mut world).unwrap();
    assert_eq!(state, OwnerState::WaitForAnimal);
    assert!(world.get::<Owner>(owner_entity).unwrap().exclamation.visible);
    assert_eq!(
        world.get::<Phase<AnimalState>>(entity).unwrap().current(),
        AnimalState::MoveInPlayArea
    );
}

#[test]
fn second_wrong_animal_ends_game_once() {
    let (mut world, mut schedule, calls) = make_world(&[Species::Pig, Species::Sheep], 4);
    freeze_animals(&mut world);
    let wanted = wait_for_open_gate(&mut world, &mut schedule);
    let wrong = if wanted == Species::Pig {
        Species::Sheep
    } else {
        Species::Pig
    };
    let entity = animal_of(&mut world, wrong);

    send_to_gate(&mut world, entity);
    tick(&mut world, &mut schedule);
    tick(&mut world, &mut schedule);
    assert_eq!(world.resource::<LevelStatus>().active_lives(), 1);
    let stops = calls.stops();

    send_to_gate(&mut world, entity);
    tick(&mut world, &mut schedule);
    tick(&mut world, &mut schedule);

    let status = world.resource::<LevelStatus>();
    assert_eq!(status.outcome, LevelOutcome::GameOver);
    assert_eq!(status.active_lives(), 0);
    assert_eq!(status.remaining_lives, 0);
    assert!(status.redraw_all);
    assert_eq!(calls.stops(), stops + 1);

    let request = world.resource_mut::<NextGameState>().take();
    assert_eq!(
        request,
        Some(StateRequest::set(
            GAME_ENDED_MENU,
            StateEntry::from_previous("level_1").with_message(GAME_OVER_TEXT)
        ))
    );

    // the level is frozen from here on
    let pos = world.get::<MapPosition>(entity).unwrap().pos;
    for _ in 0..20 {
        tick(&mut world, &mut schedule);
    }
    assert_eq!(world.get::<MapPosition>(entity).unwrap().pos, pos);
    assert!(!world.resource::<NextGameState>().is_pending());
    assert_eq!(calls.stops(), stops + 1);
}

#[test]
fn pause_key_pushes_pause_menu() {
    let (mut world, mut schedule, calls) = make_world(&[Species::Cow], 8);
    tick(&mut world, &mut schedule);
    let cow = animal_of(&mut world, Species::Cow);
    let pos = world.get::<MapPosition>(cow).unwrap().pos;
    let elapsed = world.resource::<WorldTime>().elapsed;

    world.resource_mut::<InputState>().press(Key::Escape);
    schedule.run(&mut world);

    assert_eq!(world.get::<MapPosition>(cow).unwrap().pos, pos);
    assert!(!calls.is_listening());
    assert_eq!(
        world.resource_mut::<NextGameState>().take(),
        Some(StateRequest::push(
            PAUSE_MENU,
            StateEntry::from_previous("level_1")
        ))
    );
    assert_eq!(world.resource::<WorldTime>().elapsed, elapsed);
}

#[test]
fn pausing_frame_does_not_advance_level_clock() {
    let calls = Arc::new(ScriptedCalls::new());
    let def = LevelDef {
        name: "level_1".to_string(),
        species: vec![Species::Pig],
    };
    let mut level = GameLevel::new(def, false, GameConfig::new(), calls.clone(), 8);
    level.start_new(&StateEntry::default());

    let mut input = InputState::default();
    assert_eq!(level.update(DT, &input), None);
    let elapsed = level.world().resource::<WorldTime>().elapsed;
    assert!(approx_eq(elapsed, DT));

    input.press(Key::Escape);
    assert_eq!(
        level.update(DT, &input),
        Some(StateRequest::push(
            PAUSE_MENU,
            StateEntry::from_previous("level_1")
        ))
    );
    assert_eq!(level.world().resource::<WorldTime>().elapsed, elapsed);
    assert!(!calls.is_listening());
}

#[test]
fn call_shortcut_acts_like_a_recognized_call() {
    let (mut world, mut schedule, _calls) = make_world(&[Species::Sheep], 8);
    freeze_animals(&mut world);
    let player = player(&mut world);
    world.resource_mut::<InputState>().press(Key::G);
    tick(&mut world, &mut schedule);
    let player_ref = world.get::<Player>(player).unwrap();
    assert!(player_ref.calling);
    assert_eq!(player_ref.bubble.text.as_deref(), Some("sheep"));
}

#[test]
fn resize_to_same_size_keeps_rectangles() {
    let (mut world, mut schedule, _calls) = make_world(&[Species::Dog, Species::Cow], 2);
    tick(&mut world, &mut schedule);

    let mut query = world.query::<(Entity, &Visual)>();
    let before: Vec<_> = query
        .iter(&world)
        .map(|(entity, visual)| (entity, visual.screen_rect))
        .collect();

    world.trigger(ResizeEvent {
        width: 1000.0,
        height: 600.0,
    });

    for (entity, rect) in &before {
        assert_eq!(world.get::<Visual>(*entity).unwrap().screen_rect, *rect);
    }
    assert!(world.resource::<LevelStatus>().redraw_all);
}

#[test]
fn resize_scales_display_but_not_simulation() {
    let (mut world, mut schedule, _calls) = make_world(&[Species::Dog], 2);
    freeze_animals(&mut world);
    tick(&mut world, &mut schedule);
    let dog = animal_of(&mut world, Species::Dog);
    let pos = world.get::<MapPosition>(dog).unwrap().pos;
    let logical = world.get::<BoxCollider>(dog).unwrap().rect(pos);

    world.trigger(ResizeEvent {
        width: 500.0,
        height: 300.0,
    });
    let screen = world.get::<Visual>(dog).unwrap().screen_rect;
    assert!(approx_eq(screen.x, logical.x * 0.5));
    assert!(approx_eq(screen.y, logical.y * 0.5));
    assert!(approx_eq(screen.w, logical.w * 0.5));

    // back to the logical size restores the first rectangle
    world.trigger(ResizeEvent {
        width: 1000.0,
        height: 600.0,
    });
    let screen = world.get::<Visual>(dog).unwrap().screen_rect;
    assert!(approx_eq(screen.x, logical.x));
    assert!(approx_eq(screen.h, logical.h));
    assert_eq!(world.get::<MapPosition>(dog).unwrap().pos, pos);
}
