//! A single floating modal window.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::element::{ClickHandler, Element, InputEvent, InputHandler, InputKind};
use crate::manager::{ManagerShared, ModalWindowManager};

/// Unique identifier for windows.
pub type WindowId = Uuid;

/// Lifecycle phase of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowPhase {
    /// Live and not being dragged.
    Idle,
    /// Header grabbed; `last` is the pointer position of the previous step.
    Dragging { last: Point },
    /// Detached. Terminal.
    Removed,
}

/// Read-only view of a window's presentation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub id: WindowId,
    /// Title as displayed, including any duplicate suffix.
    pub title: String,
    pub original_title: String,
    pub tag: Option<String>,
    pub size: Size,
    /// Top/left offset in client coordinates.
    pub position: Point,
    pub z_index: i32,
    pub resizable: bool,
    pub ghosted: bool,
    pub ghost_button: bool,
    pub close_button: bool,
}

#[derive(Debug)]
pub(crate) struct WindowState {
    pub(crate) snapshot: WindowSnapshot,
    /// Whether the window takes part in duplicate-title counting.
    pub(crate) stacks: bool,
    pub(crate) phase: WindowPhase,
    pub(crate) content: Vec<Element>,
}

/// Handle to a modal window.
///
/// Clones refer to the same window. Builder methods append to the
/// content area and return the same handle for chaining.
#[derive(Clone)]
pub struct ModalWindow {
    state: Rc<RefCell<WindowState>>,
    manager: Weak<ManagerShared>,
}

/// Non-owning window handle, for listeners that must not keep a window alive.
#[derive(Clone)]
pub struct WeakModalWindow {
    state: Weak<RefCell<WindowState>>,
    manager: Weak<ManagerShared>,
}

impl WeakModalWindow {
    /// Recover the window if it still exists.
    pub fn upgrade(&self) -> Option<ModalWindow> {
        Some(ModalWindow {
            state: self.state.upgrade()?,
            manager: self.manager.clone(),
        })
    }
}

impl ModalWindow {
    pub(crate) fn new(state: WindowState, manager: Weak<ManagerShared>) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            manager,
        }
    }

    /// Create a non-owning handle.
    pub fn downgrade(&self) -> WeakModalWindow {
        WeakModalWindow {
            state: Rc::downgrade(&self.state),
            manager: self.manager.clone(),
        }
    }

    /// The manager that owns this window, while it exists.
    pub fn manager(&self) -> Option<ModalWindowManager> {
        self.manager.upgrade().map(ModalWindowManager::from_shared)
    }

    /// Whether two handles refer to the same window.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    pub fn id(&self) -> WindowId {
        self.state.borrow().snapshot.id
    }

    /// Displayed title.
    pub fn title(&self) -> String {
        self.state.borrow().snapshot.title.clone()
    }

    /// Title as requested, before any duplicate suffix.
    pub fn original_title(&self) -> String {
        self.state.borrow().snapshot.original_title.clone()
    }

    pub fn tag(&self) -> Option<String> {
        self.state.borrow().snapshot.tag.clone()
    }

    pub fn size(&self) -> Size {
        self.state.borrow().snapshot.size
    }

    pub fn position(&self) -> Point {
        self.state.borrow().snapshot.position
    }

    pub fn z_index(&self) -> i32 {
        self.state.borrow().snapshot.z_index
    }

    pub fn is_ghosted(&self) -> bool {
        self.state.borrow().snapshot.ghosted
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state.borrow().phase, WindowPhase::Dragging { .. })
    }

    pub fn is_removed(&self) -> bool {
        self.state.borrow().phase == WindowPhase::Removed
    }

    pub fn phase(&self) -> WindowPhase {
        self.state.borrow().phase
    }

    /// Current presentation state.
    pub fn snapshot(&self) -> WindowSnapshot {
        self.state.borrow().snapshot.clone()
    }

    /// The content area's elements, in order.
    pub fn content(&self) -> Vec<Element> {
        self.state.borrow().content.clone()
    }

    pub(crate) fn stacks(&self) -> bool {
        self.state.borrow().stacks
    }

    /// Append a label bound to the input with id `html_for`.
    pub fn generate_label(&self, text: impl Into<String>, html_for: impl Into<String>) -> &Self {
        self.append(Element::label(text, html_for))
    }

    /// Append a number input. The handler receives the raw text.
    pub fn generate_number_input(
        &self,
        id: impl Into<String>,
        value: f64,
        on_input: impl Into<Option<InputHandler>>,
    ) -> &Self {
        self.append(Element::input(
            InputKind::Number,
            id,
            value.to_string(),
            on_input.into(),
        ))
    }

    /// Append a color input.
    pub fn generate_color_input(
        &self,
        id: impl Into<String>,
        value: impl Into<String>,
        on_input: impl Into<Option<InputHandler>>,
    ) -> &Self {
        self.append(Element::input(InputKind::Color, id, value, on_input.into()))
    }

    /// Append a text input.
    pub fn generate_string_input(
        &self,
        id: impl Into<String>,
        value: impl Into<String>,
        on_input: impl Into<Option<InputHandler>>,
    ) -> &Self {
        self.append(Element::input(InputKind::Text, id, value, on_input.into()))
    }

    /// Append a button.
    pub fn generate_button(
        &self,
        text: impl Into<String>,
        on_click: impl Into<Option<ClickHandler>>,
    ) -> &Self {
        self.append(Element::button(text, on_click.into()))
    }

    /// Append a line break.
    pub fn put_newline(&self) -> &Self {
        self.append(Element::Newline)
    }

    /// Append caller-built content verbatim.
    pub fn append_element(&self, element: Element) -> &Self {
        self.append(element)
    }

    fn append(&self, element: Element) -> &Self {
        let index = {
            let mut state = self.state.borrow_mut();
            if state.phase == WindowPhase::Removed {
                log::warn!(
                    "Ignoring <{}> appended to removed window '{}'",
                    element.tag_name(),
                    state.snapshot.title
                );
                return self;
            }
            state.content.push(element.clone());
            state.content.len() - 1
        };
        self.with_surface(|surface| surface.element_appended(self, index, &element));
        self
    }

    /// Toggle the reduced-opacity look.
    pub fn toggle_ghost(&self) -> &Self {
        {
            let mut state = self.state.borrow_mut();
            if state.phase == WindowPhase::Removed {
                return self;
            }
            state.snapshot.ghosted = !state.snapshot.ghosted;
        }
        self.notify_changed();
        self
    }

    /// Deliver a value change to the input at `index` of the content area.
    ///
    /// Returns false when there is no live input at that index.
    pub fn input(&self, index: usize, value: impl Into<String>) -> bool {
        let value = value.into();
        let (handler, event) = {
            let mut state = self.state.borrow_mut();
            if state.phase == WindowPhase::Removed {
                return false;
            }
            match state.content.get_mut(index) {
                Some(Element::Input {
                    id,
                    value: current,
                    on_input,
                    ..
                }) => {
                    current.clone_from(&value);
                    let event = InputEvent {
                        id: id.clone(),
                        value,
                    };
                    (on_input.clone(), event)
                }
                _ => return false,
            }
        };
        if let Some(handler) = handler {
            handler.call_logged(&event, "Input handler");
        }
        true
    }

    /// Activate the button at `index` of the content area.
    ///
    /// Returns false when there is no live button at that index.
    pub fn click_button(&self, index: usize) -> bool {
        let handler = {
            let state = self.state.borrow();
            if state.phase == WindowPhase::Removed {
                return false;
            }
            match state.content.get(index) {
                Some(Element::Button { on_click, .. }) => on_click.clone(),
                _ => return false,
            }
        };
        if let Some(handler) = handler {
            handler.call_logged(&(), "Button handler");
        }
        true
    }

    /// Detach the window. Removing twice is a no-op.
    pub fn remove(&self) {
        match self.manager.upgrade() {
            Some(shared) => shared.remove(self),
            None => {
                self.mark_removed();
            }
        }
    }

    /// Enter the dragging phase at `position`.
    pub(crate) fn begin_drag(&self, position: Point) -> bool {
        let mut state = self.state.borrow_mut();
        if state.phase == WindowPhase::Removed {
            return false;
        }
        state.phase = WindowPhase::Dragging { last: position };
        true
    }

    /// Move by the pointer delta since the last step, if dragging.
    pub(crate) fn drag_to(&self, position: Point) {
        {
            let mut state = self.state.borrow_mut();
            let WindowPhase::Dragging { last } = state.phase else {
                return;
            };
            let delta = position - last;
            state.snapshot.position += delta;
            state.phase = WindowPhase::Dragging { last: position };
        }
        self.notify_changed();
    }

    pub(crate) fn end_drag(&self) {
        let mut state = self.state.borrow_mut();
        if matches!(state.phase, WindowPhase::Dragging { .. }) {
            state.phase = WindowPhase::Idle;
        }
    }

    /// Set the stacking order, returning whether it changed.
    pub(crate) fn set_z_index(&self, z_index: i32) -> bool {
        let mut state = self.state.borrow_mut();
        if state.snapshot.z_index == z_index {
            return false;
        }
        state.snapshot.z_index = z_index;
        true
    }

    pub(crate) fn mark_removed(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.phase == WindowPhase::Removed {
            return false;
        }
        state.phase = WindowPhase::Removed;
        true
    }

    pub(crate) fn notify_changed(&self) {
        self.with_surface(|surface| surface.window_changed(self));
    }

    fn with_surface(&self, f: impl FnOnce(&mut dyn crate::surface::WindowSurface)) {
        if let Some(shared) = self.manager.upgrade() {
            shared.with_surface(f);
        }
    }
}

impl PartialEq for ModalWindow {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ModalWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ModalWindow")
            .field("id", &state.snapshot.id)
            .field("title", &state.snapshot.title)
            .field("phase", &state.phase)
            .field("elements", &state.content.len())
            .finish()
    }
}
