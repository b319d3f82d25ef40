//! Vasara Core Library
//!
//! Platform-agnostic window manager and keyboard chord dispatcher for the
//! Vasara in-page toolkit. The web shell mirrors the state kept here into
//! the DOM through a [`WindowSurface`].

pub mod callback;
pub mod chord;
pub mod class_name;
pub mod config;
pub mod input;
pub mod manager;
pub mod modal;
pub mod runtime;
pub mod style;
pub mod surface;

pub use callback::{Callback, HandlerError, HandlerResult};
pub use chord::{Chord, ChordDispatcher, ChordHandler};
pub use class_name::{class, hash_class_name, obfuscate_class_list};
pub use config::{ConfigError, ToolkitConfig};
pub use input::{InputState, KeyEvent, MouseButton, PointerEvent};
pub use manager::{ClickTarget, ManagerConfig, ModalWindowManager, WeakModalWindowManager};
pub use modal::{
    ClickHandler, Element, InputEvent, InputHandler, InputKind, ModalDescriptor, ModalWindow,
    WeakModalWindow, WindowId, WindowSnapshot,
};
pub use runtime::Vasara;
pub use style::{DEFAULT_STYLESHEET, StyleError, StyleSink, inject_styles, rewrite_selectors};
pub use surface::{LogSurface, NullSurface, RecordingSurface, SurfaceOp, WindowSurface};
