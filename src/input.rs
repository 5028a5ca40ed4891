//! Key bindings
//!
//! Maps device key names to abstract [`Control`]s. Names are matched
//! case-insensitively; anything unbound is ignored.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::sim::{Control, Team};

/// Key name → control table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    map: BTreeMap<String, Control>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        // Blue: W forward, A/D turn
        bindings.bind("W", Control::Advance(Team::Blue));
        bindings.bind("A", Control::RotateLeft(Team::Blue));
        bindings.bind("D", Control::RotateRight(Team::Blue));
        // Red: I forward, J/L turn
        bindings.bind("I", Control::Advance(Team::Red));
        bindings.bind("J", Control::RotateLeft(Team::Red));
        bindings.bind("L", Control::RotateRight(Team::Red));

        bindings.bind("P", Control::PauseToggle);
        bindings.bind("R", Control::Restart);
        bindings.bind("ESCAPE", Control::Quit);
        bindings.bind("+", Control::VolumeUp);
        bindings.bind("=", Control::VolumeUp);
        bindings.bind("-", Control::VolumeDown);
        bindings.bind("M", Control::MusicToggle);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self { map: BTreeMap::new() }
    }

    /// Bind `key` to `control`, replacing any previous binding for that key
    pub fn bind(&mut self, key: &str, control: Control) {
        self.map.insert(key.to_uppercase(), control);
    }

    pub fn unbind(&mut self, key: &str) -> Option<Control> {
        self.map.remove(&key.to_uppercase())
    }

    pub fn control_for(&self, key: &str) -> Option<Control> {
        self.map.get(&key.to_uppercase()).copied()
    }

    /// All keys bound to `control`, for help screens
    pub fn keys_for(&self, control: Control) -> Vec<&str> {
        self.map
            .iter()
            .filter(|(_, c)| **c == control)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Controls held, given the names of the keys currently down
    pub fn resolve<S: AsRef<str>>(&self, keys: &[S]) -> HashSet<Control> {
        let mut held = HashSet::new();
        for key in keys {
            match self.control_for(key.as_ref()) {
                Some(control) => {
                    held.insert(control);
                }
                None => log::debug!("Ignoring unbound key {:?}", key.as_ref()),
            }
        }
        held
    }
}
