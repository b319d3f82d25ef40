//! DOM rendering for modal windows.
//!
//! [`DomSurface`] mirrors window state into the document. Every window root
//! carries a `data-vasara-window` attribute holding its id; chrome buttons,
//! content buttons and inputs carry their own data attributes so the
//! document-level listeners in `web.rs` can route events back to the manager.

use std::collections::HashMap;

use thiserror::Error;
use vasara_core::{
    Element, ModalWindow, StyleError, StyleSink, WindowId, WindowSnapshot, WindowSurface, class,
    hash_class_name, obfuscate_class_list,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

pub const WINDOW_ATTR: &str = "data-vasara-window";
pub const ACTION_ATTR: &str = "data-vasara-action";
pub const BUTTON_ATTR: &str = "data-vasara-button";
pub const INPUT_ATTR: &str = "data-vasara-index";
pub const TAG_ATTR: &str = "data-vasara-tag";

pub const ACTION_GHOST: &str = "ghost";
pub const ACTION_CLOSE: &str = "close";

/// DOM errors.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("No document available")]
    NoDocument,
    #[error("Document has no body")]
    NoBody,
    #[error("Unknown window {0}")]
    UnknownWindow(WindowId),
    #[error("DOM operation failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        let message = match value.dyn_ref::<js_sys::Error>() {
            Some(error) => String::from(error.message()),
            None => format!("{:?}", value),
        };
        DomError::Js(message)
    }
}

/// Result type for DOM operations.
pub type DomResult<T> = Result<T, DomError>;

/// The current page's document.
pub fn document() -> DomResult<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(DomError::NoDocument)
}

struct DomWindow {
    root: HtmlElement,
    title: web_sys::Element,
    content: web_sys::Element,
}

/// Surface that renders windows as `<div>` trees under the document body.
pub struct DomSurface {
    document: Document,
    windows: HashMap<WindowId, DomWindow>,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            windows: HashMap::new(),
        }
    }

    fn create_elem(&self, tag: &str, classes: &str) -> DomResult<web_sys::Element> {
        let elem = self.document.create_element(tag)?;
        if !classes.is_empty() {
            elem.set_class_name(&obfuscate_class_list(classes));
        }
        Ok(elem)
    }

    fn build(&mut self, window: &ModalWindow) -> DomResult<()> {
        let snapshot = window.snapshot();
        let body = self.document.body().ok_or(DomError::NoBody)?;

        let root: HtmlElement = self.create_elem("div", class::MODAL_WINDOW)?.unchecked_into();
        root.set_attribute(WINDOW_ATTR, &snapshot.id.to_string())?;
        if let Some(tag) = &snapshot.tag {
            root.set_attribute(TAG_ATTR, tag)?;
        }

        let header = self.create_elem("div", class::HEADER)?;
        let title = self.create_elem("span", class::HEADER_TITLE)?;
        header.append_child(&title)?;

        let buttons = self.create_elem("div", class::HEADER_BUTTONS)?;
        if snapshot.ghost_button {
            let ghost = self.create_elem(
                "div",
                &format!("{} {}", class::HEADER_BUTTON, class::GHOST_BUTTON),
            )?;
            ghost.set_attribute(ACTION_ATTR, ACTION_GHOST)?;
            buttons.append_child(&ghost)?;
        }
        if snapshot.close_button {
            let close = self.create_elem(
                "div",
                &format!("{} {}", class::HEADER_BUTTON, class::CLOSE_BUTTON),
            )?;
            close.set_attribute(ACTION_ATTR, ACTION_CLOSE)?;
            buttons.append_child(&close)?;
        }
        header.append_child(&buttons)?;
        root.append_child(&header)?;

        let content = self.create_elem("div", class::CONTENT)?;
        root.append_child(&content)?;

        for (index, element) in window.content().iter().enumerate() {
            self.render_element(&content, index, element)?;
        }

        let dom = DomWindow {
            root,
            title,
            content,
        };
        apply(&dom, &snapshot)?;
        body.append_child(&dom.root)?;
        self.windows.insert(snapshot.id, dom);
        Ok(())
    }

    fn render_element(
        &self,
        content: &web_sys::Element,
        index: usize,
        element: &Element,
    ) -> DomResult<()> {
        let node = match element {
            Element::Label { text, html_for } => {
                let label = self.create_elem("label", "")?;
                label.set_attribute("for", html_for)?;
                label.set_text_content(Some(text));
                label
            }
            Element::Input {
                kind, id, value, ..
            } => {
                let input = self.create_elem("input", "")?;
                input.set_attribute("type", kind.html_type())?;
                input.set_id(id);
                input.set_attribute("value", value)?;
                input.set_attribute(INPUT_ATTR, &index.to_string())?;
                input
            }
            Element::Button { text, .. } => {
                let button = self.create_elem("button", "")?;
                button.set_text_content(Some(text));
                button.set_attribute(BUTTON_ATTR, &index.to_string())?;
                button
            }
            Element::Newline => self.create_elem("br", "")?,
            Element::Html(markup) => {
                content.insert_adjacent_html("beforeend", markup)?;
                return Ok(());
            }
        };
        content.append_child(&node)?;
        Ok(())
    }

    fn append(&self, id: WindowId, index: usize, element: &Element) -> DomResult<()> {
        let dom = self.windows.get(&id).ok_or(DomError::UnknownWindow(id))?;
        self.render_element(&dom.content, index, element)
    }

    fn update(&self, snapshot: &WindowSnapshot) -> DomResult<()> {
        let dom = self
            .windows
            .get(&snapshot.id)
            .ok_or(DomError::UnknownWindow(snapshot.id))?;
        apply(dom, snapshot)
    }
}

/// Copy presentation state onto a window's DOM.
fn apply(dom: &DomWindow, snapshot: &WindowSnapshot) -> DomResult<()> {
    dom.title.set_text_content(Some(&snapshot.title));

    let style = dom.root.style();
    style.set_property("width", &format!("{}px", snapshot.size.width))?;
    style.set_property("height", &format!("{}px", snapshot.size.height))?;
    style.set_property("left", &format!("{}px", snapshot.position.x))?;
    style.set_property("top", &format!("{}px", snapshot.position.y))?;
    style.set_property("z-index", &snapshot.z_index.to_string())?;

    let classes = dom.root.class_list();
    classes.toggle_with_force(&hash_class_name(class::RESIZABLE), snapshot.resizable)?;
    classes.toggle_with_force(&hash_class_name(class::GHOSTED), snapshot.ghosted)?;
    Ok(())
}

impl WindowSurface for DomSurface {
    fn window_created(&mut self, window: &ModalWindow) {
        if let Err(e) = self.build(window) {
            log::error!("Failed to render window '{}': {}", window.title(), e);
        }
    }

    fn element_appended(&mut self, window: &ModalWindow, index: usize, element: &Element) {
        if let Err(e) = self.append(window.id(), index, element) {
            log::error!("Failed to render <{}>: {}", element.tag_name(), e);
        }
    }

    fn window_changed(&mut self, window: &ModalWindow) {
        if let Err(e) = self.update(&window.snapshot()) {
            log::error!("Failed to update window '{}': {}", window.title(), e);
        }
    }

    fn window_removed(&mut self, id: WindowId) {
        if let Some(dom) = self.windows.remove(&id) {
            dom.root.remove();
        }
    }
}

/// Inserts stylesheets as `<style>` nodes in the document head.
pub struct DomStyleSink {
    document: Document,
}

impl DomStyleSink {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl StyleSink for DomStyleSink {
    fn insert_stylesheet(&mut self, css: &str) -> Result<(), StyleError> {
        let head = self.document.head().ok_or(StyleError::NoHead)?;
        let style = self
            .document
            .create_element("style")
            .map_err(|e| StyleError::Insert(DomError::from(e).to_string()))?;
        style.set_text_content(Some(css));
        head.append_child(&style)
            .map_err(|e| StyleError::Insert(DomError::from(e).to_string()))?;
        Ok(())
    }
}
