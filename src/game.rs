//! Game assembly.
//!
//! [`Game`] registers every menu and one [`GameLevel`] per level definition
//! with a [`StateManager`], owns the frame's [`InputState`] and drives one
//! update per host frame. The host (see `main.rs`) only forwards key events,
//! window resizes and the time elapsed since the previous frame.
use log::{info, warn};
use std::sync::Arc;

use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::StateEntry;
use crate::resources::input::{InputState, Key};
use crate::resources::levelstore::LevelStore;
use crate::resources::voice::CallSource;
use crate::states::StateManager;
use crate::states::level::GameLevel;
use crate::states::menu::{GameMenu, INSTRUCTIONS, Instructions, MAIN_MENU};
use crate::systems::orchestrator::{GAME_ENDED_MENU, NEXT_LEVEL_MENU, PAUSE_MENU};

/// Frames longer than this many frame budgets are skipped.
const MAX_BUDGETS_PER_FRAME: f32 = 3.0;

pub struct Game {
    config: GameConfig,
    levels: LevelStore,
    manager: StateManager,
    input: InputState,
    call: Arc<dyn CallSource>,
    frames: u64,
    skipped: u64,
}

impl Game {
    /// Register all states. `seed` drives every level; level `i` uses
    /// `seed + i` so levels do not share their random layout.
    pub fn new(config: GameConfig, levels: LevelStore, call: Arc<dyn CallSource>, seed: u64) -> Self {
        let mut manager = StateManager::new();
        manager.add_state(MAIN_MENU, Box::new(GameMenu::main_menu(levels.clone())));
        manager.add_state(PAUSE_MENU, Box::new(GameMenu::pause_menu(levels.clone())));
        manager.add_state(
            GAME_ENDED_MENU,
            Box::new(GameMenu::game_ended_menu(levels.clone())),
        );
        manager.add_state(
            NEXT_LEVEL_MENU,
            Box::new(GameMenu::next_level_menu(levels.clone())),
        );
        manager.add_state(INSTRUCTIONS, Box::new(Instructions::default()));

        for (index, def) in levels.levels().iter().enumerate() {
            let level = GameLevel::new(
                def.clone(),
                levels.is_final(&def.name),
                config.clone(),
                call.clone(),
                seed.wrapping_add(index as u64),
            );
            manager.add_state(def.name.clone(), Box::new(level));
        }
        info!("Registered {} levels", levels.levels().len());

        Self {
            config,
            levels,
            manager,
            input: InputState::default(),
            call,
            frames: 0,
            skipped: 0,
        }
    }

    /// Enter the first state, usually the main menu.
    pub fn start(&mut self, state: &str) {
        self.manager.set_state(state, &StateEntry::default());
        if self.manager.current_state_name().is_none() {
            warn!("Unknown start state '{}', using {}", state, MAIN_MENU);
            self.manager.set_state(MAIN_MENU, &StateEntry::default());
        }
    }

    /// Run one frame. Returns false once the game asked to quit.
    ///
    /// A frame that took more than three frame budgets (the window was
    /// dragged, the process was stopped) is dropped instead of fed to the
    /// simulation in one huge step.
    pub fn run_frame(&mut self, dt: f32) -> bool {
        if self.manager.should_quit() {
            return false;
        }
        let budget = self.config.frame_budget_ms();
        if dt > MAX_BUDGETS_PER_FRAME * budget {
            warn!("Frame of {:.1} ms skipped (budget {:.1} ms)", dt, budget);
            self.skipped += 1;
            self.input.end_frame();
            return true;
        }
        self.manager.update(dt, &self.input);
        self.input.end_frame();
        self.frames += 1;
        !self.manager.should_quit()
    }

    pub fn press(&mut self, key: Key) {
        self.input.press(key);
    }

    pub fn release(&mut self, key: Key) {
        self.input.release(key);
    }

    /// The display changed size. Every state rescales, running or suspended.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.manager.rescale(width, height);
        info!("Display resized to {}x{}", width, height);
    }

    /// Stop listening for calls before the host shuts the recognizer down.
    pub fn stop(&mut self) {
        self.call.stop();
        info!(
            "Game stopped after {} frames ({} skipped)",
            self.frames, self.skipped
        );
    }

    pub fn manager(&self) -> &StateManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut StateManager {
        &mut self.manager
    }

    pub fn levels(&self) -> &LevelStore {
        &self.levels
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn skipped_frames(&self) -> u64 {
        self.skipped
    }

    pub fn current_state_name(&self) -> Option<&str> {
        self.manager.current_state_name()
    }

    /// The registered level called `name`, running or not.
    pub fn level(&self, name: &str) -> Option<&GameLevel> {
        self.manager.get_state(name).and_then(|state| state.as_level())
    }
}
