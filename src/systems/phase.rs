//! Phase timing system.
//!
//! Transitions themselves happen inside each actor's update via
//! [`Phase::set`](crate::components::phase::Phase::set); this system only
//! accumulates `time_in_phase` for every phase type it is registered for.
use bevy_ecs::prelude::*;

use crate::components::phase::{Phase, PhaseLabel};
use crate::resources::worldtime::WorldTime;

pub fn advance_phase_time<S: PhaseLabel>(time: Res<WorldTime>, mut query: Query<&mut Phase<S>>) {
    for mut phase in query.iter_mut() {
        phase.time_in_phase += time.delta;
    }
}
