//! Game states and the manager that switches between them.
//!
//! A game state is anything that can be on screen on its own: a level, a
//! menu, the instructions page. The [`StateManager`] keeps every state under
//! a name, runs the current one, and keeps a stack of suspended states so a
//! paused level comes back exactly as it was left.
//!
//! States do not switch themselves. Their [`GameState::update`] returns a
//! [`StateRequest`] which the manager applies right after.

pub mod level;
pub mod menu;

use log::{error, info, warn};
use rustc_hash::FxHashMap;

use crate::resources::gamestate::{StateEntry, StateRequest};
use crate::resources::input::InputState;

/// Behaviour shared by every state the manager can run.
pub trait GameState {
    /// (Re)start the state from scratch.
    fn start_new(&mut self, entry: &StateEntry);

    /// Advance one frame. `dt` is in milliseconds.
    fn update(&mut self, dt: f32, input: &InputState) -> Option<StateRequest>;

    /// Called when the state comes back from the suspended stack.
    fn resume(&mut self) {}

    /// Called when another state is pushed on top of this one.
    fn suspend(&mut self) {}

    /// The display size changed. Every registered state is told, running or not.
    fn rescale(&mut self, _width: f32, _height: f32) {}

    fn as_level(&self) -> Option<&level::GameLevel> {
        None
    }
}

/// Named registry of states with a stack of suspended ones.
#[derive(Default)]
pub struct StateManager {
    states: FxHashMap<String, Box<dyn GameState>>,
    stack: Vec<String>,
    current: Option<String>,
    quit: bool,
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, name: impl Into<String>, state: Box<dyn GameState>) {
        let name = name.into();
        if self.states.insert(name.clone(), state).is_some() {
            warn!("State '{}' replaced", name);
        }
    }

    /// Look a state up by name. Unknown names are logged and yield `None`.
    pub fn get_state(&self, name: &str) -> Option<&dyn GameState> {
        let state = self.states.get(name).map(|s| s.as_ref());
        if state.is_none() {
            error!("No state with name '{}'", name);
        }
        state
    }

    pub fn get_state_mut(&mut self, name: &str) -> Option<&mut (dyn GameState + 'static)> {
        match self.states.get_mut(name) {
            Some(state) => Some(state.as_mut()),
            None => {
                error!("No state with name '{}'", name);
                None
            }
        }
    }

    pub fn current_state_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Names of the suspended states, bottom first.
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Switch to `name` and start it fresh. Unknown names are ignored.
    pub fn set_state(&mut self, name: &str, entry: &StateEntry) {
        let Some(state) = self.get_state_mut(name) else {
            return;
        };
        state.start_new(entry);
        info!("State set to '{}'", name);
        self.current = Some(name.to_string());
    }

    /// Suspend the current state and start `name` on top of it.
    pub fn push_state(&mut self, name: &str, entry: &StateEntry) {
        if self.get_state(name).is_none() {
            return;
        }
        if let Some(current) = self.current.take() {
            if let Some(state) = self.states.get_mut(&current) {
                state.suspend();
            }
            self.stack.push(current);
        }
        if let Some(state) = self.states.get_mut(name) {
            state.start_new(entry);
        }
        info!("State '{}' pushed (stack depth {})", name, self.stack.len());
        self.current = Some(name.to_string());
    }

    /// Resume the most recently suspended state.
    pub fn pop_state(&mut self) {
        let Some(name) = self.stack.pop() else {
            warn!("pop_state called with an empty stack");
            return;
        };
        if let Some(state) = self.states.get_mut(&name) {
            state.resume();
        }
        info!("State '{}' resumed", name);
        self.current = Some(name);
    }

    pub fn empty_level_stack(&mut self) {
        self.stack.clear();
    }

    pub fn apply(&mut self, request: StateRequest) {
        match request {
            StateRequest::Set { name, entry } => self.set_state(&name, &entry),
            StateRequest::Push { name, entry } => self.push_state(&name, &entry),
            StateRequest::Pop => self.pop_state(),
            StateRequest::Reset { name, entry } => {
                self.empty_level_stack();
                self.set_state(&name, &entry);
            }
            StateRequest::Quit => {
                info!("Quit requested");
                self.quit = true;
            }
        }
    }

    /// Update the current state and apply whatever it asked for.
    pub fn update(&mut self, dt: f32, input: &InputState) {
        let Some(name) = self.current.clone() else {
            return;
        };
        let request = match self.states.get_mut(&name) {
            Some(state) => state.update(dt, input),
            None => None,
        };
        if let Some(request) = request {
            self.apply(request);
        }
    }

    /// Tell every registered state about a new display size.
    pub fn rescale(&mut self, width: f32, height: f32) {
        for state in self.states.values_mut() {
            state.rescale(width, height);
        }
    }
}
