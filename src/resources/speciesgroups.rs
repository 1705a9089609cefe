use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::components::species::Species;

/// Live animals grouped by species, for call targeting and owner requests.
///
/// Handles can go stale between a despawn command and its application;
/// consumers look each entity up in a query and skip the ones that fail.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpeciesGroups {
    groups: FxHashMap<Species, SmallVec<[Entity; 4]>>,
}

impl SpeciesGroups {
    pub fn insert(&mut self, species: Species, entity: Entity) {
        self.groups.entry(species).or_default().push(entity);
    }

    pub fn remove(&mut self, entity: Entity) {
        for members in self.groups.values_mut() {
            members.retain(|e| *e != entity);
        }
        self.groups.retain(|_, members| !members.is_empty());
    }

    pub fn members(&self, species: Species) -> &[Entity] {
        self.groups.get(&species).map(|m| m.as_slice()).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
