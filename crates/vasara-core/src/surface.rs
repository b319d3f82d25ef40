//! Rendering surface abstraction.
//!
//! The manager and its windows report every visible change to a
//! [`WindowSurface`]. The web shell mirrors these into the DOM; tests and
//! the headless shell record them.

use std::cell::RefCell;
use std::rc::Rc;

use crate::modal::{Element, ModalWindow, WindowId, WindowSnapshot};

/// Receiver of window presentation changes.
///
/// Calls happen synchronously, after the state change, with no window
/// state borrowed, so implementations may read the window handle freely.
/// Implementations must not call back into the manager.
pub trait WindowSurface {
    /// A window was created with its initial content.
    fn window_created(&mut self, window: &ModalWindow);

    /// `element` was appended at `index` of the window's content area.
    fn element_appended(&mut self, window: &ModalWindow, index: usize, element: &Element);

    /// Title, position, stacking or ghosting changed.
    fn window_changed(&mut self, window: &ModalWindow);

    /// The window was detached.
    fn window_removed(&mut self, id: WindowId);
}

/// Surface that ignores all changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl WindowSurface for NullSurface {
    fn window_created(&mut self, _window: &ModalWindow) {}
    fn element_appended(&mut self, _window: &ModalWindow, _index: usize, _element: &Element) {}
    fn window_changed(&mut self, _window: &ModalWindow) {}
    fn window_removed(&mut self, _id: WindowId) {}
}

/// A recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Created(WindowSnapshot),
    Appended {
        id: WindowId,
        index: usize,
        tag: &'static str,
    },
    Changed(WindowSnapshot),
    Removed(WindowId),
}

/// Surface that records every operation into a shared log.
///
/// Clones share the log, so a test can keep one clone and hand the other
/// to the manager.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    ops: Rc<RefCell<Vec<SurfaceOp>>>,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations so far.
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.borrow().clone()
    }

    /// Drain the recorded operations.
    pub fn take(&self) -> Vec<SurfaceOp> {
        std::mem::take(&mut *self.ops.borrow_mut())
    }
}

impl WindowSurface for RecordingSurface {
    fn window_created(&mut self, window: &ModalWindow) {
        log::trace!("surface: created '{}'", window.title());
        self.ops.borrow_mut().push(SurfaceOp::Created(window.snapshot()));
    }

    fn element_appended(&mut self, window: &ModalWindow, index: usize, element: &Element) {
        self.ops.borrow_mut().push(SurfaceOp::Appended {
            id: window.id(),
            index,
            tag: element.tag_name(),
        });
    }

    fn window_changed(&mut self, window: &ModalWindow) {
        self.ops.borrow_mut().push(SurfaceOp::Changed(window.snapshot()));
    }

    fn window_removed(&mut self, id: WindowId) {
        self.ops.borrow_mut().push(SurfaceOp::Removed(id));
    }
}

/// Surface that logs every operation, for the headless shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSurface;

impl WindowSurface for LogSurface {
    fn window_created(&mut self, window: &ModalWindow) {
        let snapshot = window.snapshot();
        log::info!(
            "[window {}] opened '{}' ({}x{})",
            short_id(snapshot.id),
            snapshot.title,
            snapshot.size.width,
            snapshot.size.height
        );
    }

    fn element_appended(&mut self, window: &ModalWindow, index: usize, element: &Element) {
        log::info!(
            "[window {}] #{} <{}>{}",
            short_id(window.id()),
            index,
            element.tag_name(),
            describe(element)
        );
    }

    fn window_changed(&mut self, window: &ModalWindow) {
        let snapshot = window.snapshot();
        log::debug!(
            "[window {}] at ({:.0}, {:.0}) z={} ghosted={}",
            short_id(snapshot.id),
            snapshot.position.x,
            snapshot.position.y,
            snapshot.z_index,
            snapshot.ghosted
        );
    }

    fn window_removed(&mut self, id: WindowId) {
        log::info!("[window {}] closed", short_id(id));
    }
}

fn short_id(id: WindowId) -> String {
    id.simple().to_string()[..8].to_string()
}

fn describe(element: &Element) -> String {
    match element {
        Element::Label { text, .. } | Element::Button { text, .. } => format!(" {}", text),
        Element::Input { kind, id, .. } => format!(" {} #{}", kind.html_type(), id),
        Element::Newline => String::new(),
        Element::Html(markup) => format!(" {} bytes", markup.len()),
    }
}
