use std::collections::HashMap;

use slotgrid_core::{Command, Direction};
use tracing::warn;

use crate::config::HostConfig;

/// Key-bound actions. Slot clicks are pointer input and never bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Hotbar(u8),
    Close,
    Navigate(Direction),
    Activate,
    Reload,
    Exit,
}

impl Action {
    pub fn command(self) -> Command {
        match self {
            Action::Hotbar(digit) => Command::HotbarDigit(digit),
            Action::Close => Command::Close,
            Action::Navigate(direction) => Command::Directional(direction),
            Action::Activate => Command::ActivateFocused,
            Action::Reload => Command::Reload,
            Action::Exit => Command::Exit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bindings {
    keys: HashMap<String, Action>,
}

impl Bindings {
    pub fn from_config(config: &HostConfig) -> Self {
        let mut keys = HashMap::new();
        for (action, key_names) in default_bindings() {
            for key in key_names {
                keys.insert(key.to_string(), action);
            }
        }

        let mut bindings = Self { keys };
        bindings.apply_overrides(&config.bindings);
        bindings
    }

    /// Action bound to `key`, if any. Accepts `KeyE`-style names or bare characters.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.keys.get(&normalize_key(key)).copied()
    }

    fn apply_overrides(&mut self, overrides: &HashMap<String, Vec<String>>) {
        for (action_name, key_names) in overrides {
            let Some(action) = parse_action(action_name) else {
                warn!("Unknown action '{}' in bindings", action_name);
                continue;
            };
            self.keys.retain(|_, bound| *bound != action);
            for key in key_names {
                self.keys.insert(normalize_key(key), action);
            }
        }
    }
}

fn default_bindings() -> Vec<(Action, Vec<&'static str>)> {
    vec![
        (Action::Hotbar(1), vec!["Digit1"]),
        (Action::Hotbar(2), vec!["Digit2"]),
        (Action::Hotbar(3), vec!["Digit3"]),
        (Action::Hotbar(4), vec!["Digit4"]),
        (Action::Hotbar(5), vec!["Digit5"]),
        (Action::Hotbar(6), vec!["Digit6"]),
        (Action::Hotbar(7), vec!["Digit7"]),
        (Action::Hotbar(8), vec!["Digit8"]),
        (Action::Hotbar(9), vec!["Digit9"]),
        (Action::Close, vec!["KeyE"]),
        (Action::Navigate(Direction::Up), vec!["ArrowUp"]),
        (Action::Navigate(Direction::Down), vec!["ArrowDown"]),
        (Action::Navigate(Direction::Left), vec!["ArrowLeft"]),
        (Action::Navigate(Direction::Right), vec!["ArrowRight"]),
        (Action::Activate, vec!["Enter"]),
        (Action::Reload, vec!["F5"]),
        (Action::Exit, vec!["Escape"]),
    ]
}

/// Map bare characters onto key codes: `e`/`E` -> `KeyE`, `3` -> `Digit3`.
fn normalize_key(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        (Some(c), None) if c.is_ascii_digit() => format!("Digit{c}"),
        _ => key.to_string(),
    }
}

fn parse_action(name: &str) -> Option<Action> {
    match name {
        "Close" => Some(Action::Close),
        "NavigateUp" => Some(Action::Navigate(Direction::Up)),
        "NavigateDown" => Some(Action::Navigate(Direction::Down)),
        "NavigateLeft" => Some(Action::Navigate(Direction::Left)),
        "NavigateRight" => Some(Action::Navigate(Direction::Right)),
        "Activate" => Some(Action::Activate),
        "Reload" => Some(Action::Reload),
        "Exit" => Some(Action::Exit),
        _ => {
            if let Some(rest) = name.strip_prefix("Hotbar") {
                if let Ok(digit) = rest.parse::<u8>() {
                    if (1..=9).contains(&digit) {
                        return Some(Action::Hotbar(digit));
                    }
                }
            }
            None
        }
    }
}
