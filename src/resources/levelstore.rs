//! Level definitions.
//!
//! Levels are an ordered list of `{ name, species }` records. The last entry
//! is the final level; finishing it wins the game. Definitions can be read
//! from a JSON file:
//!
//! ```json
//! [
//!   { "name": "level_1", "species": ["dog", "cat"] },
//!   { "name": "level_2", "species": ["dog", "cat", "pig"] }
//! ]
//! ```

use bevy_ecs::prelude::Resource;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::species::Species;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    pub species: Vec<Species>,
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LevelStore {
    levels: Vec<LevelDef>,
}

impl Default for LevelStore {
    fn default() -> Self {
        let tiers = [
            vec![Species::Dog, Species::Cat],
            vec![Species::Dog, Species::Cat, Species::Pig],
            vec![Species::Dog, Species::Cat, Species::Pig, Species::Sheep],
            vec![
                Species::Dog,
                Species::Cat,
                Species::Pig,
                Species::Sheep,
                Species::Cow,
            ],
        ];
        Self {
            levels: tiers
                .into_iter()
                .enumerate()
                .map(|(i, species)| LevelDef {
                    name: format!("level_{}", i + 1),
                    species,
                })
                .collect(),
        }
    }
}

impl LevelStore {
    pub fn new(levels: Vec<LevelDef>) -> Result<Self, String> {
        if levels.is_empty() {
            return Err("Level list is empty".to_string());
        }
        if let Some(level) = levels.iter().find(|l| l.species.is_empty()) {
            return Err(format!("Level '{}' has no species", level.name));
        }
        Ok(Self { levels })
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let levels: Vec<LevelDef> =
            serde_json::from_str(text).map_err(|e| format!("Invalid level file: {}", e))?;
        Self::new(levels)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read level file {:?}: {}", path, e))?;
        let store = Self::from_json(&text)?;
        info!("Loaded {} levels from {:?}", store.levels.len(), path);
        Ok(store)
    }

    pub fn levels(&self) -> &[LevelDef] {
        &self.levels
    }

    pub fn first(&self) -> &LevelDef {
        &self.levels[0]
    }

    pub fn get(&self, name: &str) -> Option<&LevelDef> {
        let found = self.levels.iter().find(|l| l.name == name);
        if found.is_none() {
            error!("Level '{}' is not defined", name);
        }
        found
    }

    pub fn is_final(&self, name: &str) -> bool {
        self.levels.last().is_some_and(|l| l.name == name)
    }

    /// The level played after `name`, if any.
    pub fn next_after(&self, name: &str) -> Option<&LevelDef> {
        let index = self.levels.iter().position(|l| l.name == name)?;
        self.levels.get(index + 1)
    }
}
