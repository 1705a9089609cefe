//! A playable level.
//!
//! Every [`GameLevel`] owns its own ECS [`World`] and [`Schedule`]. Starting
//! the level rebuilds the world from its [`LevelDef`]; suspending it simply
//! stops ticking the world, so its clock, timers and entities are untouched
//! until it is resumed.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{info, warn};
use std::sync::Arc;

use crate::components::animal::{Animal, AnimalState};
use crate::components::gate::GateState;
use crate::components::owner::OwnerState;
use crate::components::visual::Visual;
use crate::events::gamestate::observe_state_request_event;
use crate::events::resize::{ResizeEvent, observe_resize_event};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{NextGameState, StateEntry, StateRequest};
use crate::resources::input::InputState;
use crate::resources::levelrng::LevelRng;
use crate::resources::levelstatus::LevelStatus;
use crate::resources::levelstore::LevelDef;
use crate::resources::playfield::PlayField;
use crate::resources::screenscale::ScreenScale;
use crate::resources::speciesgroups::SpeciesGroups;
use crate::resources::voice::{CallInterface, CallSource};
use crate::resources::worldtime::WorldTime;
use crate::states::GameState;
use crate::systems::animal::{animal_update, spawn_animal};
use crate::systems::call::call_animal;
use crate::systems::gate::{gate_update, spawn_gate};
use crate::systems::input::level_input;
use crate::systems::orchestrator::{
    call_sync, gate_choreography, gate_collision, gate_is_open, level_in_progress, owner_spawn,
    win_check,
};
use crate::systems::owner::owner_update;
use crate::systems::phase::advance_phase_time;
use crate::systems::player::{player_update, spawn_player};
use crate::systems::time::update_world_time;
use crate::systems::visual::refresh_visuals;

/// The per-tick protocol of a level, in order.
pub fn build_level_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            level_input,
            win_check,
            owner_spawn,
            gate_choreography,
            gate_collision.run_if(gate_is_open),
            call_sync,
            animal_update,
            player_update,
            owner_update,
            gate_update,
            advance_phase_time::<AnimalState>,
            advance_phase_time::<OwnerState>,
            advance_phase_time::<GateState>,
            refresh_visuals,
        )
            .chain()
            .distributive_run_if(level_in_progress),
    );
    schedule
}

/// Build a fresh level world: resources, observers and the level's entities.
pub fn build_level_world(
    def: &LevelDef,
    is_final: bool,
    config: &GameConfig,
    call: Arc<dyn CallSource>,
    display: Vec2,
    seed: u64,
) -> World {
    let mut world = World::new();
    let field = PlayField::for_screen(config.screen_size());
    let mut rng = LevelRng::with_seed(seed);

    world.insert_resource(WorldTime::default());
    world.insert_resource(field);
    world.insert_resource(config.clone());
    world.insert_resource(ScreenScale::new(config.screen_size(), display));
    world.insert_resource(InputState::default());
    world.insert_resource(NextGameState::new());
    world.insert_resource(CallInterface::new(call));
    world.insert_resource(LevelStatus::new(
        def.name.clone(),
        def.species.clone(),
        is_final,
        config.lives,
    ));

    world.add_observer(observe_state_request_event);
    world.add_observer(call_animal);
    world.add_observer(observe_resize_event);

    let mut groups = SpeciesGroups::default();
    for species in &def.species {
        let entity = spawn_animal(&mut world, *species, config, &field, &mut rng);
        groups.insert(*species, entity);
    }
    world.insert_resource(groups);
    world.insert_resource(rng);

    spawn_player(&mut world, config, &field);
    spawn_gate(&mut world, config, &field);

    // display rectangles start out at the current scale
    if world.resource::<ScreenScale>().factor() != Vec2::ONE {
        world.trigger(ResizeEvent {
            width: display.x,
            height: display.y,
        });
    }
    world
}

pub struct GameLevel {
    def: LevelDef,
    is_final: bool,
    config: GameConfig,
    call: Arc<dyn CallSource>,
    seed: u64,
    starts: u64,
    display: Vec2,
    world: World,
    schedule: Schedule,
    started: bool,
}

impl GameLevel {
    pub fn new(
        def: LevelDef,
        is_final: bool,
        config: GameConfig,
        call: Arc<dyn CallSource>,
        seed: u64,
    ) -> Self {
        let display = config.window_size();
        Self {
            def,
            is_final,
            config,
            call,
            seed,
            starts: 0,
            display,
            world: World::new(),
            schedule: build_level_schedule(),
            started: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn status(&self) -> Option<&LevelStatus> {
        self.world.get_resource::<LevelStatus>()
    }
}

impl GameState for GameLevel {
    fn start_new(&mut self, _entry: &StateEntry) {
        let seed = self.seed.wrapping_add(self.starts);
        self.starts += 1;
        self.world = build_level_world(
            &self.def,
            self.is_final,
            &self.config,
            self.call.clone(),
            self.display,
            seed,
        );
        self.schedule = build_level_schedule();
        self.started = true;
        self.call.start();
        info!(
            "Level {} started with {:?} (seed {})",
            self.def.name, self.def.species, seed
        );
    }

    fn update(&mut self, dt: f32, input: &InputState) -> Option<StateRequest> {
        if !self.started {
            warn!("Level {} updated before it was started", self.def.name);
            return None;
        }
        self.world.insert_resource(input.clone());
        // the frame that pauses the level does not count towards its clock
        let pausing =
            input.pause_pressed() && self.status().is_some_and(LevelStatus::in_progress);
        if !pausing {
            update_world_time(&mut self.world, dt);
        }
        self.schedule.run(&mut self.world);
        self.world.resource_mut::<NextGameState>().take()
    }

    fn resume(&mut self) {
        if !self.started {
            return;
        }
        self.call.start();
        let mut visuals = self.world.query_filtered::<&mut Visual, Without<Animal>>();
        for mut visual in visuals.iter_mut(&mut self.world) {
            visual.dirty = true;
        }
        if let Some(mut status) = self.world.get_resource_mut::<LevelStatus>() {
            status.redraw_all = true;
        }
        info!("Level {} resumed", self.def.name);
    }

    fn rescale(&mut self, width: f32, height: f32) {
        self.display = Vec2::new(width, height);
        if self.started {
            self.world.trigger(ResizeEvent { width, height });
        }
    }

    fn as_level(&self) -> Option<&GameLevel> {
        Some(self)
    }
}
