//! The toolkit runtime: routes raw input events to the chord dispatcher and
//! the window manager.

use std::cell::RefCell;
use std::rc::Rc;

use crate::chord::ChordDispatcher;
use crate::config::ToolkitConfig;
use crate::input::{InputState, KeyEvent, PointerEvent};
use crate::manager::ModalWindowManager;
use crate::style::{DEFAULT_STYLESHEET, StyleResult, StyleSink, inject_styles};
use crate::surface::WindowSurface;

/// One toolkit instance: input state, chord bindings and windows.
///
/// Constructed once by the host and passed to whatever needs it. Cloning
/// yields another handle to the same instance.
#[derive(Clone)]
pub struct Vasara {
    config: Rc<ToolkitConfig>,
    input: Rc<RefCell<InputState>>,
    chords: ChordDispatcher,
    windows: ModalWindowManager,
}

impl Vasara {
    /// Create a runtime whose windows render to `surface`.
    pub fn new(config: ToolkitConfig, surface: Box<dyn WindowSurface>) -> Self {
        let windows = ModalWindowManager::with_surface(config.manager.clone(), surface);
        Self {
            config: Rc::new(config),
            input: Rc::new(RefCell::new(InputState::new())),
            chords: ChordDispatcher::new(),
            windows,
        }
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Insert the toolkit stylesheet into `sink`, if enabled.
    ///
    /// Call once during initialization.
    pub fn init_styles(&self, sink: &mut dyn StyleSink) -> StyleResult<()> {
        if !self.config.inject_styles {
            log::debug!("Stylesheet injection disabled");
            return Ok(());
        }
        inject_styles(sink, DEFAULT_STYLESHEET)
    }

    pub fn chords(&self) -> &ChordDispatcher {
        &self.chords
    }

    pub fn windows(&self) -> &ModalWindowManager {
        &self.windows
    }

    /// Snapshot of the current input state.
    pub fn input(&self) -> InputState {
        self.input.borrow().clone()
    }

    /// Document-level pointer event.
    pub fn handle_pointer_event(&self, event: PointerEvent) {
        self.input.borrow_mut().handle_pointer_event(event);
        self.windows.handle_pointer_event(event);
    }

    /// Key pressed: update held keys and dispatch the chord they form.
    ///
    /// Auto-repeat events are not dispatched. Returns the number of
    /// handlers invoked.
    pub fn handle_key_down(&self, event: &KeyEvent) -> usize {
        let chord = {
            let mut input = self.input.borrow_mut();
            input.key_down(&event.key);
            input.held_chord()
        };
        if event.repeat {
            return 0;
        }
        self.chords.dispatch(&chord, event)
    }

    /// Key released.
    pub fn handle_key_up(&self, event: &KeyEvent) {
        self.input.borrow_mut().key_up(&event.key);
    }

    /// Focus left the document; held keys are forgotten.
    pub fn handle_blur(&self) {
        self.input.borrow_mut().blur();
    }
}

impl Default for Vasara {
    fn default() -> Self {
        Self::new(ToolkitConfig::default(), Box::new(crate::surface::NullSurface))
    }
}
