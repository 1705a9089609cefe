//! State flow integration tests: menus, levels, pausing and the stack.

use std::sync::Arc;

use animaldaycare::game::Game;
use animaldaycare::resources::gameconfig::GameConfig;
use animaldaycare::resources::gamestate::{StateEntry, StateRequest};
use animaldaycare::resources::input::Key;
use animaldaycare::resources::levelstore::LevelStore;
use animaldaycare::resources::voice::ScriptedCalls;
use animaldaycare::resources::worldtime::WorldTime;
use animaldaycare::states::menu::{INSTRUCTIONS, MAIN_MENU};
use animaldaycare::systems::orchestrator::{
    GAME_ENDED_MENU, GAME_WON_TEXT, NEXT_LEVEL_MENU, PAUSE_MENU,
};

const DT: f32 = 16.0;

fn make_game() -> (Game, Arc<ScriptedCalls>) {
    let calls = Arc::new(ScriptedCalls::new());
    let mut game = Game::new(GameConfig::new(), LevelStore::default(), calls.clone(), 1);
    game.start(MAIN_MENU);
    (game, calls)
}

/// Press a key for one frame, then release it on a second frame.
fn tap(game: &mut Game, key: Key) {
    game.press(key);
    game.run_frame(DT);
    game.release(key);
    game.run_frame(DT);
}

fn level_elapsed(game: &Game, name: &str) -> f32 {
    game.level(name).unwrap().world().resource::<WorldTime>().elapsed
}

#[test]
fn start_pause_and_continue() {
    let (mut game, calls) = make_game();

    tap(&mut game, Key::Enter);
    assert_eq!(game.current_state_name(), Some("level_1"));
    assert_eq!(calls.starts(), 1);
    assert!(calls.is_listening());

    for _ in 0..10 {
        game.run_frame(DT);
    }
    tap(&mut game, Key::Escape);
    assert_eq!(game.current_state_name(), Some(PAUSE_MENU));
    assert_eq!(game.manager().stack(), &["level_1".to_string()]);
    assert!(!calls.is_listening());

    // the suspended level does not advance
    let paused_at = level_elapsed(&game, "level_1");
    for _ in 0..30 {
        game.run_frame(DT);
    }
    assert_eq!(level_elapsed(&game, "level_1"), paused_at);

    // Continue
    tap(&mut game, Key::Enter);
    assert_eq!(game.current_state_name(), Some("level_1"));
    assert!(game.manager().stack().is_empty());
    assert_eq!(calls.starts(), 2);
    assert!(calls.is_listening());
    let status = game.level("level_1").unwrap().status().unwrap();
    assert!(status.redraw_all);

    game.run_frame(DT);
    assert!(level_elapsed(&game, "level_1") > paused_at);
}

#[test]
fn instructions_from_pause_return_to_pause() {
    let (mut game, _calls) = make_game();
    tap(&mut game, Key::Enter);
    tap(&mut game, Key::Space);
    assert_eq!(game.current_state_name(), Some(PAUSE_MENU));

    tap(&mut game, Key::Down);
    tap(&mut game, Key::Enter);
    assert_eq!(game.current_state_name(), Some(INSTRUCTIONS));
    assert_eq!(game.manager().stack().len(), 2);

    tap(&mut game, Key::Enter);
    assert_eq!(game.current_state_name(), Some(PAUSE_MENU));
    assert_eq!(game.manager().stack(), &["level_1".to_string()]);
}

#[test]
fn main_menu_from_pause_empties_stack() {
    let (mut game, _calls) = make_game();
    tap(&mut game, Key::Enter);
    tap(&mut game, Key::Escape);

    // Continue, Instructions, Main menu
    tap(&mut game, Key::Up);
    tap(&mut game, Key::Enter);
    assert_eq!(game.current_state_name(), Some(MAIN_MENU));
    assert!(game.manager().stack().is_empty());
}

#[test]
fn next_level_menu_starts_following_level() {
    let (mut game, calls) = make_game();
    game.manager_mut().apply(StateRequest::set(
        NEXT_LEVEL_MENU,
        StateEntry::from_previous("level_2"),
    ));
    tap(&mut game, Key::Enter);
    assert_eq!(game.current_state_name(), Some("level_3"));
    assert!(calls.is_listening());
    let status = game.level("level_3").unwrap().status().unwrap();
    assert_eq!(status.species.len(), 4);
    assert!(!status.is_final);
}

#[test]
fn game_ended_menu_offers_new_game() {
    let (mut game, _calls) = make_game();
    assert!(game.levels().is_final("level_4"));
    game.manager_mut().apply(StateRequest::set(
        GAME_ENDED_MENU,
        StateEntry::from_previous("level_4").with_message(GAME_WON_TEXT),
    ));
    tap(&mut game, Key::Enter);
    assert_eq!(game.current_state_name(), Some("level_1"));
    assert!(game.manager().stack().is_empty());
}

#[test]
fn restarting_a_level_builds_a_fresh_world() {
    let (mut game, _calls) = make_game();
    tap(&mut game, Key::Enter);
    for _ in 0..20 {
        game.run_frame(DT);
    }
    assert!(level_elapsed(&game, "level_1") > 0.0);

    tap(&mut game, Key::Escape);
    tap(&mut game, Key::Up);
    tap(&mut game, Key::Enter);
    assert_eq!(game.current_state_name(), Some(MAIN_MENU));

    // Start again from the main menu
    tap(&mut game, Key::Enter);
    assert_eq!(game.current_state_name(), Some("level_1"));
    // one frame ran in the new world (the release half of the tap)
    assert_eq!(level_elapsed(&game, "level_1"), DT);
}

#[test]
fn resize_reaches_suspended_level() {
    let (mut game, _calls) = make_game();
    tap(&mut game, Key::Enter);
    tap(&mut game, Key::Escape);
    game.resize(500.0, 300.0);

    let level = game.level("level_1").unwrap();
    let scale = level
        .world()
        .resource::<animaldaycare::resources::screenscale::ScreenScale>();
    assert_eq!(scale.factor(), glam::Vec2::splat(0.5));
}

#[test]
fn quit_ends_the_run() {
    let (mut game, calls) = make_game();
    tap(&mut game, Key::Up);
    game.press(Key::Enter);
    assert!(!game.run_frame(DT));
    assert!(!game.run_frame(DT));
    game.stop();
    assert!(calls.stops() >= 1);
}
