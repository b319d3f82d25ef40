//! Vasara demo application
//!
//! Hosts the toolkit in a page (WASM) or headless (native) and wires up the
//! demo scene and its keyboard shortcuts.

pub mod demo;
mod shortcuts;

pub use demo::{Scene, SceneHandle};
pub use shortcuts::{Shortcut, ShortcutRegistry};

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
