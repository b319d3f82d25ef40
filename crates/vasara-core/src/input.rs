//! Input state tracking for pointer and keyboard events.

use std::cell::Cell;
use std::collections::{BTreeSet, HashMap};

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::chord::Chord;

/// Pointer button identifiers, following DOM `MouseEvent.button` numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl MouseButton {
    /// Map a DOM button id to a button.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

impl PointerEvent {
    /// Position carried by the event.
    pub fn position(&self) -> Point {
        match *self {
            Self::Down { position, .. } | Self::Up { position, .. } | Self::Move { position } => {
                position
            }
        }
    }
}

/// Keyboard event delivered to chord handlers.
#[derive(Debug, Clone, Default)]
pub struct KeyEvent {
    /// Key identifier as reported by the platform (`KeyboardEvent.key`).
    pub key: String,
    /// Whether this key-down is an auto-repeat.
    pub repeat: bool,
    default_prevented: Cell<bool>,
}

impl KeyEvent {
    /// Create a non-repeating key event.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            repeat: false,
            default_prevented: Cell::new(false),
        }
    }

    /// Mark the event as an auto-repeat.
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Ask the shell to cancel the platform's default action.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether a handler called [`KeyEvent::prevent_default`].
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Current pointer and keyboard state.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer_position: Point,
    buttons: HashMap<MouseButton, bool>,
    /// Held keys, lowercase.
    held_keys: BTreeSet<String>,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.pointer_position = event.position();
        match event {
            PointerEvent::Down { button, .. } => {
                self.buttons.insert(button, true);
            }
            PointerEvent::Up { button, .. } => {
                self.buttons.insert(button, false);
            }
            PointerEvent::Move { .. } => {}
        }
    }

    /// Record a key as held.
    pub fn key_down(&mut self, key: &str) {
        self.held_keys.insert(key.to_lowercase());
    }

    /// Record a key as released.
    pub fn key_up(&mut self, key: &str) {
        self.held_keys.remove(&key.to_lowercase());
    }

    /// Forget all held keys (focus left the window, so releases are lost).
    pub fn blur(&mut self) {
        if !self.held_keys.is_empty() {
            log::debug!("Clearing {} held keys on blur", self.held_keys.len());
        }
        self.held_keys.clear();
    }

    /// Last known pointer position.
    pub fn pointer_position(&self) -> Point {
        self.pointer_position
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.get(&button).copied().unwrap_or(false)
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: &str) -> bool {
        self.held_keys.contains(&key.to_lowercase())
    }

    /// All held keys in sorted order.
    pub fn held_keys(&self) -> &BTreeSet<String> {
        &self.held_keys
    }

    /// The chord formed by every held key.
    pub fn held_chord(&self) -> Chord {
        Chord::from_keys(self.held_keys.iter())
    }
}
