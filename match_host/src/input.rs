use std::collections::HashSet;

use game_core::{Direction, PlayerId};

/// Keys held down during one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pressed: HashSet<String>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pressed<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pressed: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn set(&mut self, key: &str, down: bool) {
        if down {
            self.pressed.insert(key.to_string());
        } else {
            self.pressed.remove(key);
        }
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    player: PlayerId,
    up: String,
    down: String,
}

/// Maps key identifiers to per-player up/down signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: Vec<Binding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self { bindings: Vec::new() };
        bindings.bind(PlayerId::ONE, "w", "s");
        bindings.bind(PlayerId::TWO, "ArrowUp", "ArrowDown");
        bindings.bind(PlayerId::THREE, "t", "g");
        bindings.bind(PlayerId::FOUR, "i", "k");
        bindings
    }
}

impl KeyBindings {
    /// Replace the keys for `player`
    pub fn bind(&mut self, player: PlayerId, up: &str, down: &str) {
        self.bindings.retain(|b| b.player != player);
        self.bindings.push(Binding {
            player,
            up: up.to_string(),
            down: down.to_string(),
        });
    }

    pub fn direction(&self, player: PlayerId, input: &InputSnapshot) -> Direction {
        self.bindings
            .iter()
            .find(|b| b.player == player)
            .map(|b| Direction::from_keys(input.is_pressed(&b.up), input.is_pressed(&b.down)))
            .unwrap_or(Direction::Stop)
    }
}
