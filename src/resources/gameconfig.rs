//! Game configuration resource.
//!
//! Manages the gameplay tunables loaded from an INI configuration file.
//! Provides defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [screen]
//! width = 1000
//! height = 600
//!
//! [window]
//! width = 1000
//! height = 600
//! target_fps = 60
//!
//! [game]
//! lives = 3
//!
//! [speed]
//! animal = 10
//! player = 30
//! owner = 2
//! gate = 3
//!
//! [timing]
//! exclamation_ms = 1000
//! heard_ms = 1500
//! speech_bubble_ms = 1000
//! animation_frame_ms = 90
//!
//! [sizes]
//! animal_width = 48
//! call_radius_factor = 1.5
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec2;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_SCREEN_WIDTH: u32 = 1000;
const DEFAULT_SCREEN_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_LIVES: u32 = 3;
const DEFAULT_ANIMAL_SPEED: f32 = 10.0;
const DEFAULT_PLAYER_SPEED: f32 = 30.0;
const DEFAULT_OWNER_SPEED: f32 = 2.0;
const DEFAULT_GATE_SPEED: f32 = 3.0;
const DEFAULT_EXCLAMATION_MS: f32 = 1000.0;
const DEFAULT_HEARD_MS: f32 = 1500.0;
const DEFAULT_SPEECH_BUBBLE_MS: f32 = 1000.0;
const DEFAULT_ANIMATION_FRAME_MS: f32 = 90.0;
const DEFAULT_ANIMATION_FRAMES: u32 = 8;
const DEFAULT_CALL_RADIUS_FACTOR: f32 = 1.5;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores the logical screen size, window settings, speeds, indicator
/// timings and sprite sizes. Every level world gets a copy inserted as a
/// resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Logical screen width the simulation runs in.
    pub screen_width: u32,
    /// Logical screen height the simulation runs in.
    pub screen_height: u32,
    /// Initial window width in pixels.
    pub window_width: u32,
    /// Initial window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Configured maximum lives; one is kept as buffer.
    pub lives: u32,
    /// Logical units per 100 ms.
    pub animal_speed: f32,
    /// Logical units per 100 ms.
    pub player_speed: f32,
    /// Logical units per tick.
    pub owner_speed: f32,
    /// Logical units per tick.
    pub gate_speed: f32,
    pub exclamation_ms: f32,
    pub heard_ms: f32,
    pub speech_bubble_ms: f32,
    pub animation_frame_ms: f32,
    pub animation_frames: u32,
    pub animal_size: Vec2,
    pub player_size: Vec2,
    pub owner_size: Vec2,
    pub gate_size: Vec2,
    pub marker_size: Vec2,
    pub bubble_size: Vec2,
    /// Call radius as a multiple of the player's width.
    pub call_radius_factor: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            window_width: DEFAULT_SCREEN_WIDTH,
            window_height: DEFAULT_SCREEN_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            lives: DEFAULT_LIVES,
            animal_speed: DEFAULT_ANIMAL_SPEED,
            player_speed: DEFAULT_PLAYER_SPEED,
            owner_speed: DEFAULT_OWNER_SPEED,
            gate_speed: DEFAULT_GATE_SPEED,
            exclamation_ms: DEFAULT_EXCLAMATION_MS,
            heard_ms: DEFAULT_HEARD_MS,
            speech_bubble_ms: DEFAULT_SPEECH_BUBBLE_MS,
            animation_frame_ms: DEFAULT_ANIMATION_FRAME_MS,
            animation_frames: DEFAULT_ANIMATION_FRAMES,
            animal_size: Vec2::new(48.0, 36.0),
            player_size: Vec2::new(40.0, 56.0),
            owner_size: Vec2::new(44.0, 80.0),
            gate_size: Vec2::new(20.0, 150.0),
            marker_size: Vec2::new(16.0, 24.0),
            bubble_size: Vec2::new(56.0, 40.0),
            call_radius_factor: DEFAULT_CALL_RADIUS_FACTOR,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Milliseconds one frame is expected to take at `target_fps`.
    pub fn frame_budget_ms(&self) -> f32 {
        1000.0 / self.target_fps.max(1) as f32
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width as f32, self.screen_height as f32)
    }

    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_width as f32, self.window_height as f32)
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} logical, {}x{} window, fps={}, lives={}",
            self.screen_width,
            self.screen_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.lives
        );

        Ok(())
    }

    /// Parse configuration from INI text, keeping defaults for missing keys.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };

        // [screen] section
        if let Some(width) = uint("screen", "width") {
            self.screen_width = width as u32;
        }
        if let Some(height) = uint("screen", "height") {
            self.screen_height = height as u32;
        }

        // [window] section
        if let Some(width) = uint("window", "width") {
            self.window_width = width as u32;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height as u32;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps as u32;
        }

        // [game] section
        if let Some(lives) = uint("game", "lives") {
            self.lives = lives as u32;
        }

        // [speed] section
        if let Some(v) = float("speed", "animal") {
            self.animal_speed = v;
        }
        if let Some(v) = float("speed", "player") {
            self.player_speed = v;
        }
        if let Some(v) = float("speed", "owner") {
            self.owner_speed = v;
        }
        if let Some(v) = float("speed", "gate") {
            self.gate_speed = v;
        }

        // [timing] section
        if let Some(v) = float("timing", "exclamation_ms") {
            self.exclamation_ms = v;
        }
        if let Some(v) = float("timing", "heard_ms") {
            self.heard_ms = v;
        }
        if let Some(v) = float("timing", "speech_bubble_ms") {
            self.speech_bubble_ms = v;
        }
        if let Some(v) = float("timing", "animation_frame_ms") {
            self.animation_frame_ms = v;
        }
        if let Some(v) = uint("timing", "animation_frames") {
            self.animation_frames = v as u32;
        }

        // [sizes] section
        if let Some(v) = float("sizes", "animal_width") {
            self.animal_size.x = v;
        }
        if let Some(v) = float("sizes", "animal_height") {
            self.animal_size.y = v;
        }
        if let Some(v) = float("sizes", "player_width") {
            self.player_size.x = v;
        }
        if let Some(v) = float("sizes", "player_height") {
            self.player_size.y = v;
        }
        if let Some(v) = float("sizes", "owner_width") {
            self.owner_size.x = v;
        }
        if let Some(v) = float("sizes", "owner_height") {
            self.owner_size.y = v;
        }
        if let Some(v) = float("sizes", "call_radius_factor") {
            self.call_radius_factor = v;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [screen] section
        config.set("screen", "width", Some(self.screen_width.to_string()));
        config.set("screen", "height", Some(self.screen_height.to_string()));

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [game] section
        config.set("game", "lives", Some(self.lives.to_string()));

        // [speed] section
        config.set("speed", "animal", Some(self.animal_speed.to_string()));
        config.set("speed", "player", Some(self.player_speed.to_string()));
        config.set("speed", "owner", Some(self.owner_speed.to_string()));
        config.set("speed", "gate", Some(self.gate_speed.to_string()));

        // [timing] section
        config.set("timing", "exclamation_ms", Some(self.exclamation_ms.to_string()));
        config.set("timing", "heard_ms", Some(self.heard_ms.to_string()));
        config.set(
            "timing",
            "speech_bubble_ms",
            Some(self.speech_bubble_ms.to_string()),
        );
        config.set(
            "timing",
            "animation_frame_ms",
            Some(self.animation_frame_ms.to_string()),
        );
        config.set(
            "timing",
            "animation_frames",
            Some(self.animation_frames.to_string()),
        );

        // [sizes] section
        config.set("sizes", "animal_width", Some(self.animal_size.x.to_string()));
        config.set("sizes", "animal_height", Some(self.animal_size.y.to_string()));
        config.set("sizes", "player_width", Some(self.player_size.x.to_string()));
        config.set("sizes", "player_height", Some(self.player_size.y.to_string()));
        config.set("sizes", "owner_width", Some(self.owner_size.x.to_string()));
        config.set("sizes", "owner_height", Some(self.owner_size.y.to_string()));
        config.set(
            "sizes",
            "call_radius_factor",
            Some(self.call_radius_factor.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let mut cfg = GameConfig::new();
        cfg.load_from_str("[game]\nlives = 5\n[speed]\nanimal = 12.5\n")
            .unwrap();
        assert_eq!(cfg.lives, 5);
        assert_eq!(cfg.animal_speed, 12.5);
        assert_eq!(cfg.player_speed, DEFAULT_PLAYER_SPEED);
        assert_eq!(cfg.screen_width, DEFAULT_SCREEN_WIDTH);
    }

    #[test]
    fn frame_budget_follows_fps() {
        let mut cfg = GameConfig::new();
        cfg.target_fps = 50;
        assert!((cfg.frame_budget_ms() - 20.0).abs() < 1e-4);
        cfg.target_fps = 0;
        assert!((cfg.frame_budget_ms() - 1000.0).abs() < 1e-4);
    }

    #[test]
    fn saved_config_loads_back() {
        let path = std::env::temp_dir().join(format!(
            "animaldaycare-config-{}.ini",
            std::process::id()
        ));
        let mut cfg = GameConfig::with_path(&path);
        cfg.lives = 7;
        cfg.window_width = 1280;
        cfg.animal_speed = 9.5;
        cfg.speech_bubble_ms = 1750.0;
        cfg.owner_size = Vec2::new(52.0, 70.0);
        cfg.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.lives, 7);
        assert_eq!(loaded.window_width, 1280);
        assert_eq!(loaded.animal_speed, 9.5);
        assert_eq!(loaded.speech_bubble_ms, 1750.0);
        assert_eq!(loaded.owner_size, Vec2::new(52.0, 70.0));
        assert_eq!(loaded.screen_width, DEFAULT_SCREEN_WIDTH);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut cfg = GameConfig::with_path("/nonexistent/animaldaycare.ini");
        assert!(cfg.load_from_file().is_err());
        assert_eq!(cfg.lives, DEFAULT_LIVES);
    }
}
