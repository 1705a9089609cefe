use bevy_ecs::prelude::*;

use crate::components::phase::PhaseLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Closed,
    /// Opening.
    MoveDown,
    Open,
    /// Closing.
    MoveUp,
}

impl PhaseLabel for GateState {
    fn name(&self) -> &'static str {
        match self {
            GateState::Closed => "closed",
            GateState::MoveDown => "move_down",
            GateState::Open => "open",
            GateState::MoveUp => "move_up",
        }
    }
}

/// Sliding gate between the play area and the owners' strip.
#[derive(Component, Debug, Clone, Copy)]
pub struct Gate {
    /// Logical units per tick.
    pub speed: f32,
}
