//! Animal actor.
//!
//! Animals wander inside the play area, bounce off its edges and, when they
//! bump into the gate while an owner is waiting, are either accepted (and walk
//! off with the owner) or rejected with an exclamation mark.

use bevy_ecs::prelude::*;

use crate::components::indicator::Indicator;
use crate::components::phase::PhaseLabel;
use crate::components::species::Species;
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalState {
    /// Free roaming inside the play area. Initial state.
    MoveInPlayArea,
    /// Walking towards the owner that accepted it.
    MoveToOwner,
    /// Pinned to the owner's feet until both leave the screen.
    MoveWithOwner,
}

impl PhaseLabel for AnimalState {
    fn name(&self) -> &'static str {
        match self {
            AnimalState::MoveInPlayArea => "move_in_play_area",
            AnimalState::MoveToOwner => "move_to_owner",
            AnimalState::MoveWithOwner => "move_with_owner",
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Animal {
    pub species: Species,
    /// Set during the current frame when the animal's leading edge reached
    /// the gate region.
    pub hit_gate: bool,
    /// Owner that accepted this animal.
    pub owner: Option<Entity>,
    /// Owner rectangle at acceptance time, used as walking target.
    pub target: Option<Rect>,
    pub exclamation: Indicator,
    pub heard: Indicator,
}

impl Animal {
    pub fn new(species: Species, exclamation: Indicator, heard: Indicator) -> Self {
        Self {
            species,
            hit_gate: false,
            owner: None,
            target: None,
            exclamation,
            heard,
        }
    }

    pub fn hide_markers(&mut self) {
        self.exclamation.hide();
        self.heard.hide();
    }
}
