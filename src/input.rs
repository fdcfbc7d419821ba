/// DELVE Project
/// `File` input.rs
/// `Description` Input impementation module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use std::collections::BTreeMap;

use crate::state::Intents;

/// Single key state
#[derive(Copy, Clone, PartialEq, Eq)]
struct KeyState {
    /// Is key pressed
    pub pressed: bool,
    /// Is key state changed during previous frame
    pub changed: bool,
} // struct KeyState

/// Keycode representation structure
pub type KeyCode = winit::keyboard::KeyCode;

/// Input state representation structure
pub struct State {
    keys: BTreeMap<KeyCode, KeyState>,
} // struct State

impl State {
    /// Key state getting function
    /// * `key` - keycode to get state of
    /// * Returns key state
    fn get_key_state(&self, key: KeyCode) -> KeyState {
        if let Some(state) = self.keys.get(&key) {
            *state
        } else {
            KeyState { pressed: false, changed: false }
        }
    } // fn get_key_state

    /// Is key pressed checking function
    /// * `key` - key to check state of
    /// * Returns true if key is pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.get_key_state(key).pressed
    } // fn is_key_pressed

    /// Is key clicked checking function
    /// * `key` - key to check state of
    /// * Returns true if key's clicked
    pub fn is_key_clicked(&self, key: KeyCode) -> bool {
        let state = self.get_key_state(key);
        state.pressed && state.changed
    } // fn is_key_clicked

    fn is_any_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.is_key_pressed(*key))
    }

    /// Frame intents getting function
    /// * Returns held movement intents and clicked toggle intents
    pub fn intents(&self) -> Intents {
        Intents {
            forward: self.is_any_pressed(&[KeyCode::KeyW, KeyCode::ArrowUp]),
            backward: self.is_any_pressed(&[KeyCode::KeyS, KeyCode::ArrowDown]),
            rotate_left: self.is_any_pressed(&[KeyCode::KeyA, KeyCode::ArrowLeft]),
            rotate_right: self.is_any_pressed(&[KeyCode::KeyD, KeyCode::ArrowRight]),
            interact: self.is_key_pressed(KeyCode::Space),
            toggle_debug: self.is_key_clicked(KeyCode::KeyI),
            toggle_minimap: self.is_key_clicked(KeyCode::KeyM),
            toggle_pause: self.is_key_clicked(KeyCode::KeyP),
            increase_resolution: self.is_key_clicked(KeyCode::Equal),
            decrease_resolution: self.is_key_clicked(KeyCode::Minus),
            widen_fov: self.is_key_clicked(KeyCode::PageUp),
            narrow_fov: self.is_key_clicked(KeyCode::PageDown),
        }
    } // fn intents
} // impl State

// Input getting function
pub struct Input {
    state: State,
} // struct Input

impl Input {
    /// New input construction function
    /// * Returns newly-created input
    pub fn new() -> Self {
        Self {
            state: State {
                keys: BTreeMap::new(),
            },
        }
    } // fn new

    /// Key state change callback
    /// * `key` - keycode
    /// * `is_pressed` - changed key state
    pub fn on_key_state_change(&mut self, key: KeyCode, is_pressed: bool) {
        if let Some(key_state) = self.state.keys.get_mut(&key) {
            // Repeated press events are not state changes
            key_state.changed = key_state.pressed != is_pressed;
            key_state.pressed = is_pressed;
        } else {
            self.state.keys.insert(key, KeyState { pressed: is_pressed, changed: true });
        }
    } // fn on_key_state_change

    // Changed parameters clearing function
    pub fn clear_changed(&mut self) {
        for state in self.state.keys.values_mut() {
            state.changed = false;
        }
    } // fn clear_changed

    /// State getting function
    /// * Returns input state reference
    pub fn get_state(&self) -> &State {
        &self.state
    } // fn get_state
} // impl Input

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_and_clicked_keys() {
        let mut input = Input::new();
        input.on_key_state_change(KeyCode::KeyW, true);
        input.on_key_state_change(KeyCode::KeyM, true);

        let intents = input.get_state().intents();
        assert!(intents.forward);
        assert!(intents.toggle_minimap);

        input.clear_changed();
        let intents = input.get_state().intents();
        assert!(intents.forward);
        assert!(!intents.toggle_minimap);

        // key repeat
        input.on_key_state_change(KeyCode::KeyM, true);
        assert!(!input.get_state().intents().toggle_minimap);
    }
}

// file input.rs
