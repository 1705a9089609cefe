//! State transition requests.
//!
//! States never switch the game themselves. A level or menu records a
//! [`StateRequest`] in its [`NextGameState`] resource (or returns one from
//! its update) and the [`StateManager`](crate::states::StateManager) applies
//! it after the update returns. See
//! `crate::events::gamestate::observe_state_request_event` for how requests
//! raised inside a level's schedule are latched.

use bevy_ecs::prelude::Resource;

/// Context handed to a state when it is started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateEntry {
    /// Name of the state the request came from (the level that was paused,
    /// finished or lost).
    pub previous: Option<String>,
    /// Text shown by menus ("Game over!", "Game won!").
    pub message: Option<String>,
}

impl StateEntry {
    pub fn from_previous(previous: impl Into<String>) -> Self {
        Self {
            previous: Some(previous.into()),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A transition asked for by the running state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateRequest {
    /// Replace the current state and start it fresh.
    Set { name: String, entry: StateEntry },
    /// Suspend the current state and start `name` on top of it.
    Push { name: String, entry: StateEntry },
    /// Resume the most recently suspended state.
    Pop,
    /// Drop every suspended state, then behave like `Set`.
    Reset { name: String, entry: StateEntry },
    /// Leave the game loop.
    Quit,
}

impl StateRequest {
    pub fn set(name: impl Into<String>, entry: StateEntry) -> Self {
        StateRequest::Set {
            name: name.into(),
            entry,
        }
    }

    pub fn push(name: impl Into<String>, entry: StateEntry) -> Self {
        StateRequest::Push {
            name: name.into(),
            entry,
        }
    }

    pub fn reset(name: impl Into<String>, entry: StateEntry) -> Self {
        StateRequest::Reset {
            name: name.into(),
            entry,
        }
    }
}

/// Representation of a requested next state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(StateRequest),
}

/// Intent to change to a new game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    /// Create a new value initialized to [`NextGameStates::Unchanged`].
    pub fn new() -> Self {
        NextGameState {
            next: NextGameStates::Unchanged,
        }
    }

    /// Get the current transition request.
    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.next, NextGameStates::Pending(_))
    }

    /// Request a transition by marking it as pending.
    ///
    /// The first request of a frame wins; later ones are dropped and `false`
    /// is returned.
    pub fn set(&mut self, request: StateRequest) -> bool {
        if self.is_pending() {
            return false;
        }
        self.next = NextGameStates::Pending(request);
        true
    }

    /// Take the pending request, leaving [`NextGameStates::Unchanged`].
    pub fn take(&mut self) -> Option<StateRequest> {
        match std::mem::take(&mut self.next) {
            NextGameStates::Pending(request) => Some(request),
            NextGameStates::Unchanged => None,
        }
    }
}
