//! Menus and the instructions page.
//!
//! A [`GameMenu`] is a vertical list of items. Up/Down move the selection
//! (wrapping around), Enter activates the selected item. Items map to
//! [`MenuAction`]s which become [`StateRequest`]s for the manager.
use log::{debug, warn};

use crate::resources::gamestate::{StateEntry, StateRequest};
use crate::resources::input::InputState;
use crate::resources::levelstore::LevelStore;
use crate::states::GameState;

pub const MAIN_MENU: &str = "main_menu";
pub const INSTRUCTIONS: &str = "instructions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Start the first level with an empty stack.
    NewGame,
    /// Push the instructions page.
    Instructions,
    /// Resume the suspended level.
    Continue,
    /// Back to the main menu with an empty stack.
    MainMenu,
    /// Start the level after the one remembered by the menu.
    NextLevel,
    Quit,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
}

pub struct GameMenu {
    pub items: Vec<MenuItem>,
    pub selected_index: usize,
    /// Text shown above the items.
    pub message: Option<String>,
    /// State that opened the menu.
    pub previous: Option<String>,
    levels: LevelStore,
    /// Set whenever the menu must be drawn again.
    pub dirty: bool,
}

impl GameMenu {
    pub fn new(items: &[(&str, MenuAction)], levels: LevelStore) -> Self {
        Self {
            items: items
                .iter()
                .map(|(label, action)| MenuItem {
                    label: label.to_string(),
                    action: action.clone(),
                })
                .collect(),
            selected_index: 0,
            message: None,
            previous: None,
            levels,
            dirty: true,
        }
    }

    pub fn main_menu(levels: LevelStore) -> Self {
        Self::new(
            &[
                ("Start", MenuAction::NewGame),
                ("Instructions", MenuAction::Instructions),
                ("Quit", MenuAction::Quit),
            ],
            levels,
        )
    }

    pub fn pause_menu(levels: LevelStore) -> Self {
        Self::new(
            &[
                ("Continue", MenuAction::Continue),
                ("Instructions", MenuAction::Instructions),
                ("Main menu", MenuAction::MainMenu),
            ],
            levels,
        )
    }

    pub fn game_ended_menu(levels: LevelStore) -> Self {
        Self::new(
            &[
                ("New game", MenuAction::NewGame),
                ("Main menu", MenuAction::MainMenu),
            ],
            levels,
        )
    }

    pub fn next_level_menu(levels: LevelStore) -> Self {
        Self::new(
            &[
                ("Next level", MenuAction::NextLevel),
                ("Main menu", MenuAction::MainMenu),
            ],
            levels,
        )
    }

    pub fn selected(&self) -> Option<&MenuItem> {
        self.items.get(self.selected_index)
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.selected_index = if down {
            (self.selected_index + 1) % len
        } else {
            (self.selected_index + len - 1) % len
        };
        self.dirty = true;
    }

    fn activate(&self) -> Option<StateRequest> {
        let item = self.selected()?;
        debug!("Menu item '{}' activated", item.label);
        match item.action {
            MenuAction::NewGame => Some(StateRequest::reset(
                self.levels.first().name.clone(),
                StateEntry::default(),
            )),
            MenuAction::Instructions => Some(StateRequest::push(
                INSTRUCTIONS,
                StateEntry {
                    previous: self.previous.clone(),
                    message: None,
                },
            )),
            MenuAction::Continue => Some(StateRequest::Pop),
            MenuAction::MainMenu => Some(StateRequest::reset(MAIN_MENU, StateEntry::default())),
            MenuAction::NextLevel => {
                let Some(previous) = self.previous.as_deref() else {
                    warn!("Next level requested without a finished level");
                    return None;
                };
                match self.levels.next_after(previous) {
                    Some(next) => Some(StateRequest::reset(
                        next.name.clone(),
                        StateEntry::from_previous(previous),
                    )),
                    None => {
                        warn!("No level after '{}'", previous);
                        None
                    }
                }
            }
            MenuAction::Quit => Some(StateRequest::Quit),
        }
    }
}

impl GameState for GameMenu {
    fn start_new(&mut self, entry: &StateEntry) {
        self.selected_index = 0;
        self.previous = entry.previous.clone();
        self.message = entry.message.clone();
        self.dirty = true;
    }

    fn update(&mut self, _dt: f32, input: &InputState) -> Option<StateRequest> {
        if input.direction_up.just_pressed {
            self.move_selection(false);
        }
        if input.direction_down.just_pressed {
            self.move_selection(true);
        }
        if input.action_2.just_pressed {
            return self.activate();
        }
        None
    }

    fn resume(&mut self) {
        self.dirty = true;
    }
}

/// Static help page. Enter goes back to whatever opened it.
pub struct Instructions {
    pub lines: Vec<String>,
    pub dirty: bool,
}

impl Default for Instructions {
    fn default() -> Self {
        let lines = [
            "Guide the animal the owner asks for to the gate,",
            "but be careful not to let wrong animals go there.",
            "",
            "Move the caretaker using the arrow keys.",
            "",
            "Animals can be controlled by calling them.",
            "Calling is done by imitating the animal.",
            "If an animal inside the call radius is called,",
            "it turns towards the player.",
            "",
            "Calls:",
            "Cat: \"MEOW\"  (shortcut A)",
            "Cow: \"MOO\"   (shortcut S)",
            "Dog: \"WOOF\"  (shortcut D)",
            "Pig: \"OINK\"  (shortcut F)",
            "Sheep: \"BAA\" (shortcut G)",
            "",
            "Pause the game and open a menu by pressing Esc, Enter, or Space.",
        ];
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            dirty: true,
        }
    }
}

impl GameState for Instructions {
    fn start_new(&mut self, _entry: &StateEntry) {
        self.dirty = true;
    }

    fn update(&mut self, _dt: f32, input: &InputState) -> Option<StateRequest> {
        input.action_2.just_pressed.then_some(StateRequest::Pop)
    }
}
