//! Gate movement.
//!
//! The orchestrator decides when the gate opens or closes with
//! [`open_gate`] / [`close_gate`]; [`gate_update`] slides it until it
//! reaches the matching limit of the [`PlayField`].
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::gate::{Gate, GateState};
use crate::components::mapposition::MapPosition;
use crate::components::phase::Phase;
use crate::components::visual::Visual;
use crate::geometry::Rect;
use crate::resources::gameconfig::GameConfig;
use crate::resources::playfield::PlayField;

pub fn spawn_gate(world: &mut World, config: &GameConfig, field: &PlayField) -> Entity {
    let size = config.gate_size;
    world
        .spawn((
            Gate {
                speed: config.gate_speed,
            },
            Phase::new(GateState::Closed),
            MapPosition::from_vec(field.gate_start),
            BoxCollider::new(size.x, size.y),
            Visual::new(Rect::from_pos_size(field.gate_start, size)),
        ))
        .id()
}

/// Start opening. Ignored while already open or opening.
pub fn open_gate(phase: &mut Phase<GateState>) {
    if !matches!(phase.current(), GateState::Open | GateState::MoveDown) {
        phase.set(GateState::MoveDown);
    }
}

/// Start closing. Ignored while already closed or closing.
pub fn close_gate(phase: &mut Phase<GateState>) {
    if !matches!(phase.current(), GateState::Closed | GateState::MoveUp) {
        phase.set(GateState::MoveUp);
    }
}

pub fn gate_update(
    field: Res<PlayField>,
    mut gates: Query<(&Gate, &mut Phase<GateState>, &mut MapPosition, &BoxCollider)>,
) {
    for (gate, mut phase, mut pos, collider) in gates.iter_mut() {
        let rect = collider.rect(pos.pos);
        match phase.current() {
            GateState::Closed | GateState::Open => {}
            GateState::MoveDown => {
                if rect.center_y() < field.gate_open_center_y {
                    pos.pos.y += gate.speed;
                } else {
                    phase.set(GateState::Open);
                }
            }
            GateState::MoveUp => {
                if rect.top() > field.gate_closed_top {
                    pos.pos.y -= gate.speed;
                } else {
                    phase.set(GateState::Closed);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_close_ignore_repeats() {
        let mut phase = Phase::new(GateState::Closed);
        close_gate(&mut phase);
        assert!(phase.is(GateState::Closed));
        open_gate(&mut phase);
        assert!(phase.is(GateState::MoveDown));
        phase.time_in_phase = 50.0;
        open_gate(&mut phase);
        assert_eq!(phase.time_in_phase, 50.0);
        close_gate(&mut phase);
        assert!(phase.is(GateState::MoveUp));
    }
}
