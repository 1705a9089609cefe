//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the game cares about and exposes it
//! to systems via the [`InputState`] resource. The host feeds key presses and
//! releases in through [`InputState::press`] / [`InputState::release`] and
//! calls [`InputState::end_frame`] after every update. Arrow keys move the
//! player; A/S/D/F/G are the call shortcuts.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::species::Species;

/// Keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Null,
    Up,
    Down,
    Left,
    Right,
    Escape,
    Space,
    Enter,
    A,
    S,
    D,
    F,
    G,
}

impl Key {
    /// Parse a key name as typed by a driver ("up", "enter", "a", ...).
    pub fn from_name(name: &str) -> Option<Key> {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "escape" | "esc" => Some(Key::Escape),
            "space" => Some(Key::Space),
            "enter" | "return" => Some(Key::Enter),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            "f" => Some(Key::F),
            "g" => Some(Key::G),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: Key,
}

impl BoolState {
    fn bound(key_binding: Key) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }

    fn press(&mut self) {
        if !self.active {
            self.just_pressed = true;
        }
        self.active = true;
    }

    fn release(&mut self) {
        if self.active {
            self.just_released = true;
        }
        self.active = false;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: Key::Null,
        }
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
///
/// Fields are grouped by purpose: movement (arrow keys), actions
/// (escape/space/enter) and the call shortcuts.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub direction_up: BoolState,
    pub direction_down: BoolState,
    pub direction_left: BoolState,
    pub direction_right: BoolState,
    // Action keys
    pub action_back: BoolState,
    pub action_1: BoolState,
    pub action_2: BoolState,
    // Call shortcuts
    pub call_cat: BoolState,
    pub call_cow: BoolState,
    pub call_dog: BoolState,
    pub call_pig: BoolState,
    pub call_sheep: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            direction_up: BoolState::bound(Key::Up),
            direction_down: BoolState::bound(Key::Down),
            direction_left: BoolState::bound(Key::Left),
            direction_right: BoolState::bound(Key::Right),
            action_back: BoolState::bound(Key::Escape),
            action_1: BoolState::bound(Key::Space),
            action_2: BoolState::bound(Key::Enter),
            call_cat: BoolState::bound(Key::A),
            call_cow: BoolState::bound(Key::S),
            call_dog: BoolState::bound(Key::D),
            call_pig: BoolState::bound(Key::F),
            call_sheep: BoolState::bound(Key::G),
        }
    }
}

impl InputState {
    fn states_mut(&mut self) -> [&mut BoolState; 12] {
        [
            &mut self.direction_up,
            &mut self.direction_down,
            &mut self.direction_left,
            &mut self.direction_right,
            &mut self.action_back,
            &mut self.action_1,
            &mut self.action_2,
            &mut self.call_cat,
            &mut self.call_cow,
            &mut self.call_dog,
            &mut self.call_pig,
            &mut self.call_sheep,
        ]
    }

    /// Mark every action bound to `key` as held.
    pub fn press(&mut self, key: Key) {
        debug!("key pressed: {:?}", key);
        for state in self.states_mut() {
            if state.key_binding == key {
                state.press();
            }
        }
    }

    /// Mark every action bound to `key` as released.
    pub fn release(&mut self, key: Key) {
        for state in self.states_mut() {
            if state.key_binding == key {
                state.release();
            }
        }
    }

    /// Clear the edge flags once a frame has consumed them.
    pub fn end_frame(&mut self) {
        for state in self.states_mut() {
            state.just_pressed = false;
            state.just_released = false;
        }
    }

    /// Any of the pause keys went down this frame.
    pub fn pause_pressed(&self) -> bool {
        self.action_back.just_pressed || self.action_1.just_pressed || self.action_2.just_pressed
    }

    /// Movement direction from the held arrow keys, each axis in `-1..=1`.
    pub fn direction(&self) -> (f32, f32) {
        let axis = |neg: &BoolState, pos: &BoolState| match (neg.active, pos.active) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        (
            axis(&self.direction_left, &self.direction_right),
            axis(&self.direction_up, &self.direction_down),
        )
    }

    /// Species whose shortcut went down this frame, if any.
    pub fn call_shortcut(&self) -> Option<Species> {
        [
            (&self.call_cat, Species::Cat),
            (&self.call_cow, Species::Cow),
            (&self.call_dog, Species::Dog),
            (&self.call_pig, Species::Pig),
            (&self.call_sheep, Species::Sheep),
        ]
        .into_iter()
        .find(|(state, _)| state.just_pressed)
        .map(|(_, species)| species)
    }
}
