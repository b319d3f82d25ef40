//! Modal window manager: creation, stacking order, titles and removal.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::input::{MouseButton, PointerEvent};
use crate::modal::window::{WindowPhase, WindowState};
use crate::modal::{ModalDescriptor, ModalWindow, WindowId, WindowSnapshot};
use crate::surface::{NullSurface, WindowSurface};

/// Stacking and placement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagerConfig {
    /// Viewport size; new windows open at its centre.
    pub viewport: Size,
    /// Stacking order of every window except the front one.
    pub base_z_index: i32,
    /// Stacking order of the front window.
    pub front_z_index: i32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1280.0, 800.0),
            base_z_index: 0,
            front_z_index: 1,
        }
    }
}

impl ManagerConfig {
    /// Where new windows are placed.
    pub fn initial_position(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }
}

/// Part of a window that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Anywhere not covered by the other targets.
    Body,
    GhostButton,
    CloseButton,
    /// The button at this index of the content area.
    ContentButton(usize),
}

struct ManagerState {
    config: ManagerConfig,
    /// Live windows in creation order.
    windows: Vec<ModalWindow>,
    /// Per original title, the number handed out since the title was last
    /// absent from the live set.
    title_counts: HashMap<String, usize>,
}

impl ManagerState {
    fn next_title(&mut self, title: &str) -> String {
        let live = self
            .windows
            .iter()
            .filter(|w| w.stacks() && w.original_title() == title)
            .count();
        let count = self.title_counts.entry(title.to_string()).or_insert(0);
        if live == 0 {
            *count = 0;
        }
        *count += 1;
        if *count > 1 {
            format!("{} ({})", title, count)
        } else {
            title.to_string()
        }
    }

    fn contains(&self, window: &ModalWindow) -> bool {
        self.windows.iter().any(|w| w.ptr_eq(window))
    }
}

pub(crate) struct ManagerShared {
    state: RefCell<ManagerState>,
    surface: RefCell<Box<dyn WindowSurface>>,
}

impl ManagerShared {
    pub(crate) fn with_surface(&self, f: impl FnOnce(&mut dyn WindowSurface)) {
        match self.surface.try_borrow_mut() {
            Ok(mut surface) => f(&mut **surface),
            Err(_) => log::warn!("Surface is busy; dropping a presentation update"),
        }
    }

    pub(crate) fn remove(&self, window: &ModalWindow) {
        let was_live = {
            let mut state = self.state.borrow_mut();
            match state.windows.iter().position(|w| w.ptr_eq(window)) {
                Some(index) => {
                    state.windows.remove(index);
                    true
                }
                None => false,
            }
        };
        window.end_drag();
        if window.mark_removed() && was_live {
            log::debug!("Removed window '{}'", window.title());
            let id = window.id();
            self.with_surface(|surface| surface.window_removed(id));
        }
    }
}

/// Tracks every live modal window.
///
/// Cloning yields another handle to the same manager, so callbacks can
/// capture it and open further windows.
#[derive(Clone)]
pub struct ModalWindowManager {
    shared: Rc<ManagerShared>,
}

/// Non-owning manager handle.
#[derive(Clone)]
pub struct WeakModalWindowManager(Weak<ManagerShared>);

impl WeakModalWindowManager {
    pub fn upgrade(&self) -> Option<ModalWindowManager> {
        self.0.upgrade().map(|shared| ModalWindowManager { shared })
    }
}

impl ModalWindowManager {
    /// Create a manager that renders nowhere.
    pub fn new(config: ManagerConfig) -> Self {
        Self::with_surface(config, Box::new(NullSurface))
    }

    /// Create a manager that reports changes to `surface`.
    pub fn with_surface(config: ManagerConfig, surface: Box<dyn WindowSurface>) -> Self {
        Self {
            shared: Rc::new(ManagerShared {
                state: RefCell::new(ManagerState {
                    config,
                    windows: Vec::new(),
                    title_counts: HashMap::new(),
                }),
                surface: RefCell::new(surface),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Rc<ManagerShared>) -> Self {
        Self { shared }
    }

    pub fn downgrade(&self) -> WeakModalWindowManager {
        WeakModalWindowManager(Rc::downgrade(&self.shared))
    }

    pub fn config(&self) -> ManagerConfig {
        self.shared.state.borrow().config.clone()
    }

    /// Update the viewport used to place new windows.
    pub fn set_viewport(&self, viewport: Size) {
        self.shared.state.borrow_mut().config.viewport = viewport;
    }

    /// Create a window and bring it to front.
    ///
    /// With `descriptor.unique` set and a live window of the same title
    /// present, that window is brought to front and returned instead.
    pub fn create(&self, descriptor: ModalDescriptor) -> ModalWindow {
        if descriptor.unique {
            if let Some(existing) = self.find_by_title(&descriptor.title) {
                self.bring_to_front(&existing);
                return existing;
            }
        }
        self.open(descriptor)
    }

    /// Create a window unless one with the same title is live.
    ///
    /// When one is live it is brought to front and `None` is returned.
    pub fn create_unique(&self, descriptor: ModalDescriptor) -> Option<ModalWindow> {
        if let Some(existing) = self.find_by_title(&descriptor.title) {
            log::debug!("Window '{}' already open", descriptor.title);
            self.bring_to_front(&existing);
            return None;
        }
        Some(self.open(descriptor))
    }

    fn open(&self, descriptor: ModalDescriptor) -> ModalWindow {
        let window = {
            let mut state = self.shared.state.borrow_mut();
            let stacks = !descriptor.disable_title_stacking;
            let title = if stacks {
                state.next_title(&descriptor.title)
            } else {
                descriptor.title.clone()
            };
            let snapshot = WindowSnapshot {
                id: Uuid::new_v4(),
                title,
                original_title: descriptor.title.clone(),
                tag: descriptor.tag.clone(),
                size: descriptor.size(),
                position: state.config.initial_position(),
                z_index: state.config.base_z_index,
                resizable: descriptor.resizable,
                ghosted: false,
                ghost_button: descriptor.enable_ghost_button,
                close_button: descriptor.enable_close_button,
            };
            let window = ModalWindow::new(
                WindowState {
                    snapshot,
                    stacks,
                    phase: WindowPhase::Idle,
                    content: descriptor.content.into_iter().collect(),
                },
                Rc::downgrade(&self.shared),
            );
            state.windows.push(window.clone());
            window
        };
        log::debug!("Created window '{}'", window.title());
        self.shared
            .with_surface(|surface| surface.window_created(&window));
        self.bring_to_front(&window);
        window
    }

    /// Raise `window` above every other live window.
    pub fn bring_to_front(&self, window: &ModalWindow) {
        let (windows, base, front) = {
            let state = self.shared.state.borrow();
            if !state.contains(window) {
                return;
            }
            (
                state.windows.clone(),
                state.config.base_z_index,
                state.config.front_z_index,
            )
        };
        for w in &windows {
            let z_index = if w.ptr_eq(window) { front } else { base };
            if w.set_z_index(z_index) {
                w.notify_changed();
            }
        }
    }

    /// Detach `window`. Removing an already removed window is a no-op.
    pub fn remove(&self, window: &ModalWindow) {
        self.shared.remove(window);
    }

    /// Live windows in creation order.
    pub fn windows(&self) -> Vec<ModalWindow> {
        self.shared.state.borrow().windows.clone()
    }

    pub fn len(&self) -> usize {
        self.shared.state.borrow().windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, window: &ModalWindow) -> bool {
        self.shared.state.borrow().contains(window)
    }

    /// The live window with this id.
    pub fn window(&self, id: WindowId) -> Option<ModalWindow> {
        self.windows().into_iter().find(|w| w.id() == id)
    }

    /// Live windows created with `tag`.
    pub fn find_by_tag(&self, tag: &str) -> Vec<ModalWindow> {
        self.windows()
            .into_iter()
            .filter(|w| w.tag().as_deref() == Some(tag))
            .collect()
    }

    /// The oldest live window with this original title.
    pub fn find_by_title(&self, title: &str) -> Option<ModalWindow> {
        self.windows()
            .into_iter()
            .find(|w| w.original_title() == title)
    }

    /// The window currently stacked on top.
    pub fn front_window(&self) -> Option<ModalWindow> {
        let front = self.shared.state.borrow().config.front_z_index;
        self.windows().into_iter().find(|w| w.z_index() == front)
    }

    /// Route a click inside `window`.
    ///
    /// Stacking is updated before any content callback runs. A close click
    /// only removes the window. Returns false for windows that are not live.
    pub fn click(&self, window: &ModalWindow, target: ClickTarget) -> bool {
        if !self.contains(window) {
            return false;
        }
        match target {
            ClickTarget::Body => self.bring_to_front(window),
            ClickTarget::GhostButton => {
                self.bring_to_front(window);
                window.toggle_ghost();
            }
            ClickTarget::CloseButton => self.remove(window),
            ClickTarget::ContentButton(index) => {
                self.bring_to_front(window);
                window.click_button(index);
            }
        }
        true
    }

    /// Pointer pressed on `window`'s header: start dragging and raise it.
    pub fn header_pointer_down(&self, window: &ModalWindow, position: Point, button: MouseButton) {
        if button != MouseButton::Primary || !self.contains(window) {
            return;
        }
        if window.begin_drag(position) {
            self.bring_to_front(window);
        }
    }

    /// Document-level pointer events: move dragged windows, end drags.
    pub fn handle_pointer_event(&self, event: PointerEvent) {
        match event {
            PointerEvent::Move { position } => {
                for window in self.windows() {
                    window.drag_to(position);
                }
            }
            PointerEvent::Up {
                button: MouseButton::Primary,
                ..
            } => {
                for window in self.windows() {
                    window.end_drag();
                }
            }
            _ => {}
        }
    }
}

impl Default for ModalWindowManager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}
