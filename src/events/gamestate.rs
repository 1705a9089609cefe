//! State transition request event and observer.
//!
//! Systems inside a level's schedule ask for a change of game state by
//! triggering a [`StateRequestEvent`]. The observer in this module latches
//! the first request into the level's [`NextGameState`]; the level hands it
//! to the [`StateManager`](crate::states::StateManager) once its update
//! returns.
//!
//! This decouples the intent to change state from the mechanics of starting
//! and suspending states, and guarantees a single transition per frame.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::resources::gamestate::{NextGameState, StateRequest};

#[derive(Event, Debug, Clone)]
pub struct StateRequestEvent {
    pub request: StateRequest,
}

/// Observer that records a requested transition.
///
/// Contract
/// - If nothing is pending yet, stores the request in [`NextGameState`].
/// - If a request is already pending, the new one is dropped with a warning.
/// - If the resource is missing, logs a diagnostic and returns.
pub fn observe_state_request_event(
    trigger: On<StateRequestEvent>,
    next_game_state: Option<ResMut<NextGameState>>,
) {
    let request = trigger.event().request.clone();
    let Some(mut next_game_state) = next_game_state else {
        warn!("NextGameState missing, dropping request {:?}", request);
        return;
    };
    info!("State change requested: {:?}", request);
    if !next_game_state.set(request) {
        warn!(
            "A state change is already pending ({:?}), ignoring new request",
            next_game_state.get()
        );
    }
}
