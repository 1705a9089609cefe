//! Per-level bookkeeping: lives, outcome and redraw requests.

use bevy_ecs::prelude::Resource;
use log::info;

use crate::components::species::Species;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Playing,
    Won,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeIndicator {
    pub active: bool,
    pub dirty: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct LevelStatus {
    pub name: String,
    pub species: Vec<Species>,
    pub is_final: bool,
    pub remaining_lives: u32,
    pub lives: Vec<LifeIndicator>,
    pub outcome: LevelOutcome,
    /// Set when every visual must be redrawn (game over, resume, resize).
    pub redraw_all: bool,
}

impl LevelStatus {
    /// Status for a fresh level. One of `max_lives` is kept as a buffer, so
    /// the level starts with `max_lives - 1` remaining lives and one active
    /// indicator per remaining life.
    pub fn new(name: impl Into<String>, species: Vec<Species>, is_final: bool, max_lives: u32) -> Self {
        let remaining_lives = max_lives.saturating_sub(1);
        Self {
            name: name.into(),
            species,
            is_final,
            remaining_lives,
            lives: vec![
                LifeIndicator {
                    active: true,
                    dirty: true,
                };
                remaining_lives as usize
            ],
            outcome: LevelOutcome::Playing,
            redraw_all: true,
        }
    }

    pub fn in_progress(&self) -> bool {
        self.outcome == LevelOutcome::Playing
    }

    pub fn active_lives(&self) -> usize {
        self.lives.iter().filter(|l| l.active).count()
    }

    /// Deactivate the highest active life indicator.
    ///
    /// Returns true when this exhausted the lives.
    pub fn lose_life(&mut self) -> bool {
        if let Some(life) = self.lives.iter_mut().rev().find(|l| l.active) {
            life.active = false;
            life.dirty = true;
        }
        self.remaining_lives = self.remaining_lives.saturating_sub(1);
        info!(
            "Level {}: wrong animal, {} lives left",
            self.name, self.remaining_lives
        );
        self.remaining_lives == 0
    }
}
