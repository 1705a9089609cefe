//! Level input system.
//!
//! [`level_input`] turns the frame's [`InputState`] into level actions: a
//! pause key suspends the level under the pause menu, a call shortcut
//! triggers a [`CallEvent`] exactly like a recognized voice call.
use bevy_ecs::prelude::*;
use log::info;

use crate::events::call::CallEvent;
use crate::events::gamestate::StateRequestEvent;
use crate::resources::gamestate::{StateEntry, StateRequest};
use crate::resources::input::InputState;
use crate::resources::levelstatus::LevelStatus;
use crate::resources::voice::CallInterface;
use crate::systems::orchestrator::PAUSE_MENU;

pub fn level_input(
    mut commands: Commands,
    input: Res<InputState>,
    status: Res<LevelStatus>,
    call: Res<CallInterface>,
) {
    if input.pause_pressed() {
        info!("Level {} paused", status.name);
        call.0.stop();
        commands.trigger(StateRequestEvent {
            request: StateRequest::push(PAUSE_MENU, StateEntry::from_previous(status.name.clone())),
        });
        return;
    }
    if let Some(species) = input.call_shortcut() {
        commands.trigger(CallEvent { species });
    }
}
