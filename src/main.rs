//! Animal Daycare main entry point.
//!
//! A small 2D game about returning animals to their owners, written in Rust
//! using:
//! - **bevy_ecs** for the entity-component-system simulation of each level
//! - **crossbeam-channel** to talk to the background call recognizer
//! - **configparser** / **serde_json** for settings and level definitions
//!
//! Rendering and audio capture live outside this crate. The binary drives a
//! headless game from standard input, one command per line:
//!
//! ```text
//! press <key>      key down (up, down, left, right, esc, space, enter, a..g)
//! release <key>    key up
//! tap <key>        key down, one frame, key up
//! say <species>    the recognizer heard a call (cat, cow, dog, pig, sheep)
//! resize <w> <h>   the display changed size
//! quit
//! ```
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and the level definitions (defaults on failure)
//! 2. Spawn the voice recognizer thread
//! 3. Register every state and enter the start state
//! 4. Run frames at the configured rate until a state asks to quit,
//!    `--frames` is reached or stdin says `quit`
//! 5. Shut the recognizer thread down
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --seed 42
//! cargo run --release -- --save-config   # write config.ini with the defaults
//! ```

use clap::Parser;
use crossbeam_channel::{Receiver, unbounded};
use log::{info, warn};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use animaldaycare::components::species::Species;
use animaldaycare::game::Game;
use animaldaycare::resources::gameconfig::GameConfig;
use animaldaycare::resources::input::Key;
use animaldaycare::resources::levelstore::LevelStore;
use animaldaycare::resources::voice::VoiceBridge;
use animaldaycare::states::menu::MAIN_MENU;

/// Animal Daycare
#[derive(Parser)]
#[command(version, about = "Bring every animal back to its owner.")]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "config.ini")]
    config: PathBuf,

    /// Level definitions (JSON). Built-in levels are used when omitted.
    #[arg(long, value_name = "PATH")]
    levels: Option<PathBuf>,

    /// Seed for animal placement and owner wishes.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the settings in effect back to the configuration file.
    #[arg(long)]
    save_config: bool,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// State to start in.
    #[arg(long, default_value = MAIN_MENU)]
    start: String,
}

/// A line read from stdin, already parsed.
enum HostCmd {
    Press(Key),
    Release(Key),
    Tap(Key),
    Say(Species),
    Resize(f32, f32),
    Quit,
}

fn parse_command(line: &str) -> Result<HostCmd, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or_else(|| "empty command".to_string())?;
    let arg = words.next();
    let key = |arg: Option<&str>| {
        arg.and_then(Key::from_name)
            .ok_or_else(|| format!("'{}' needs a key", verb))
    };
    match verb {
        "press" => Ok(HostCmd::Press(key(arg)?)),
        "release" => Ok(HostCmd::Release(key(arg)?)),
        "tap" => Ok(HostCmd::Tap(key(arg)?)),
        "say" => arg
            .ok_or_else(|| "'say' needs a species".to_string())?
            .parse::<Species>()
            .map(HostCmd::Say),
        "resize" => {
            let width = arg.and_then(|w| w.parse::<f32>().ok());
            let height = words.next().and_then(|h| h.parse::<f32>().ok());
            match (width, height) {
                (Some(w), Some(h)) => Ok(HostCmd::Resize(w, h)),
                _ => Err("'resize' needs a width and a height".to_string()),
            }
        }
        "quit" | "exit" => Ok(HostCmd::Quit),
        other => Err(format!("unknown command '{}'", other)),
    }
}

fn spawn_stdin_reader() -> Receiver<HostCmd> {
    let (tx, rx) = unbounded::<HostCmd>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("{}", e),
            }
        }
    });
    rx
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    log::info!("Hello! This is Animal Daycare!");
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using default settings", e);
    }
    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            warn!("{}", e);
        }
    }

    let levels = match &cli.levels {
        Some(path) => LevelStore::load_from_file(path).unwrap_or_else(|e| {
            warn!("{}; using built-in levels", e);
            LevelStore::default()
        }),
        None => LevelStore::default(),
    };

    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));
    info!("Seed {}", seed);

    let bridge = Arc::new(VoiceBridge::spawn());
    let mut game = Game::new(config.clone(), levels, bridge.clone(), seed);
    game.start(&cli.start);

    let commands = spawn_stdin_reader();
    let budget = Duration::from_secs_f32(config.frame_budget_ms() / 1000.0);
    let mut last = Instant::now();
    let mut frame: u64 = 0;
    let mut pending_release: Vec<Key> = Vec::new();

    'main: loop {
        for key in pending_release.drain(..) {
            game.release(key);
        }
        for cmd in commands.try_iter() {
            match cmd {
                HostCmd::Press(key) => game.press(key),
                HostCmd::Release(key) => game.release(key),
                HostCmd::Tap(key) => {
                    game.press(key);
                    pending_release.push(key);
                }
                HostCmd::Say(species) => bridge.hear(species),
                HostCmd::Resize(w, h) => game.resize(w, h),
                HostCmd::Quit => break 'main,
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32() * 1000.0;
        last = now;
        if !game.run_frame(dt) {
            break;
        }

        frame += 1;
        if cli.frames.is_some_and(|max| frame >= max) {
            info!("Frame limit {} reached", frame);
            break;
        }

        let spent = now.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
    }

    game.stop();
    bridge.shutdown();
    info!("Bye!");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_config_flag() {
        let cli = Cli::parse_from(["animaldaycare", "--save-config", "--seed", "3"]);
        assert!(cli.save_config);
        assert_eq!(cli.seed, Some(3));
        assert!(!Cli::parse_from(["animaldaycare"]).save_config);
    }

    #[test]
    fn parses_host_commands() {
        assert!(matches!(parse_command("press up"), Ok(HostCmd::Press(Key::Up))));
        assert!(matches!(parse_command("say pig"), Ok(HostCmd::Say(Species::Pig))));
        assert!(matches!(
            parse_command("resize 800 480"),
            Ok(HostCmd::Resize(w, h)) if w == 800.0 && h == 480.0
        ));
        assert!(parse_command("press nothing").is_err());
        assert!(parse_command("resize 800").is_err());
        assert!(parse_command("dance").is_err());
    }
}
