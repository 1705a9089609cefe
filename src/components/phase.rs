//! State machine component for controlling entity behavior.
//!
//! The [`Phase`] component holds the current state of an actor as a value of
//! an enum implementing [`PhaseLabel`]. Each actor's update system matches
//! exhaustively on [`Phase::current`], so every state has exactly one update
//! routine and a forgotten state fails to compile.
//!
//! # Architecture
//!
//! - **Phases are enum labels** – one enum per actor kind
//!   (`AnimalState`, `OwnerState`, `GateState`)
//! - **Transitions are immediate** – [`Phase::set`] overwrites the state en
//!   bloc; the next update runs the new state's routine
//! - **Time tracking** – `time_in_phase` tracks how long the entity has been in
//!   the current phase, in milliseconds
//!
//! # Example
//!
//! ```ignore
//! let mut phase = Phase::new(GateState::Closed);
//! match phase.current() {
//!     GateState::Closed => phase.set(GateState::MoveDown),
//!     _ => {}
//! }
//! ```
//!
//! # Related
//!
//! - [`crate::systems::phase`] – system advancing `time_in_phase`

use bevy_ecs::prelude::*;
use log::debug;
use std::fmt;

/// A state label usable inside a [`Phase`].
pub trait PhaseLabel: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Human readable name used in logs.
    fn name(&self) -> &'static str;
}

/// State machine component for controlling entity behavior through phases.
///
/// # Fields
///
/// - `current` – the active phase label
/// - `previous` – the phase before the last transition (if any)
/// - `time_in_phase` – milliseconds elapsed since entering the current phase
#[derive(Component, Clone, Debug)]
pub struct Phase<S: PhaseLabel> {
    /// The current phase label.
    pub current: S,
    /// The phase before the last transition, if any.
    pub previous: Option<S>,
    /// Milliseconds elapsed since entering the current phase.
    pub time_in_phase: f32,
}

impl<S: PhaseLabel> Phase<S> {
    /// Create a new `Phase` component with the given initial phase.
    pub fn new(initial_phase: S) -> Self {
        Self {
            current: initial_phase,
            previous: None,
            time_in_phase: 0.0,
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn is(&self, phase: S) -> bool {
        self.current == phase
    }

    /// Replace the current phase.
    ///
    /// Takes effect immediately. Setting the phase the entity is already in
    /// restarts `time_in_phase`.
    pub fn set(&mut self, next: S) {
        debug!("Phase {} -> {}", self.current.name(), next.name());
        self.previous = Some(self.current);
        self.current = next;
        self.time_in_phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
    }

    impl PhaseLabel for Light {
        fn name(&self) -> &'static str {
            match self {
                Light::Red => "red",
                Light::Green => "green",
            }
        }
    }

    #[test]
    fn set_records_previous_and_resets_time() {
        let mut phase = Phase::new(Light::Red);
        phase.time_in_phase = 120.0;
        phase.set(Light::Green);
        assert!(phase.is(Light::Green));
        assert_eq!(phase.previous, Some(Light::Red));
        assert_eq!(phase.time_in_phase, 0.0);
    }

    #[test]
    fn new_phase_has_no_previous() {
        let phase = Phase::new(Light::Green);
        assert_eq!(phase.current(), Light::Green);
        assert!(phase.previous.is_none());
    }
}
