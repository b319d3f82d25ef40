//! Modal windows: floating, draggable panels with a header and a content area.
//!
//! - [`ModalDescriptor`] configures a window at creation time
//! - [`ModalWindow`] is a handle with a fluent builder for content
//! - [`Element`] is the content model rendered by a surface

mod descriptor;
mod element;
pub(crate) mod window;

pub use descriptor::{DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH, ModalDescriptor};
pub use element::{ClickHandler, Element, InputEvent, InputHandler, InputKind};
pub use window::{ModalWindow, WeakModalWindow, WindowId, WindowPhase, WindowSnapshot};
