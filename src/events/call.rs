//! Call event.
//!
//! Both the call shortcuts and the voice collaborator end up triggering a
//! [`CallEvent`]; [`crate::systems::call::observe_call_event`] performs the
//! call against the level's animals.
use bevy_ecs::prelude::*;

use crate::components::species::Species;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallEvent {
    pub species: Species,
}
