use bevy_ecs::prelude::*;

use crate::components::indicator::Indicator;
use crate::components::phase::PhaseLabel;
use crate::components::species::Species;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerState {
    WalkToGate,
    WaitForAnimal,
    /// Leaving the screen; despawns (with its animal) once off the top edge.
    WalkAway,
}

impl PhaseLabel for OwnerState {
    fn name(&self) -> &'static str {
        match self {
            OwnerState::WalkToGate => "walk_to_gate",
            OwnerState::WaitForAnimal => "wait_for_animal",
            OwnerState::WalkAway => "walk_away",
        }
    }
}

/// Character that comes to collect one animal of `wanted` species.
#[derive(Component, Debug, Clone)]
pub struct Owner {
    pub wanted: Species,
    /// Accepted animal. Written once.
    pub received: Option<Entity>,
    /// Bubble showing the wanted species while waiting.
    pub request: Indicator,
    pub exclamation: Indicator,
    /// Logical units per tick.
    pub speed: f32,
}

impl Owner {
    pub fn new(wanted: Species, speed: f32, request: Indicator, exclamation: Indicator) -> Self {
        Self {
            wanted,
            received: None,
            request,
            exclamation,
            speed,
        }
    }

    /// Accept `animal` unless one was already received. Returns whether it was taken.
    pub fn receive(&mut self, animal: Entity) -> bool {
        if self.received.is_some() {
            return false;
        }
        self.received = Some(animal);
        true
    }
}
