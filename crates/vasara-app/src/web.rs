//! WebAssembly entry point and document-level event wiring.
//!
//! Listeners are installed once on the document and live for the page's
//! lifetime. Events inside windows are routed by the data attributes that
//! [`DomSurface`] puts on the rendered nodes.

use kurbo::{Point, Size};
use vasara_core::{
    ClickTarget, KeyEvent, ModalWindow, MouseButton, PointerEvent, ToolkitConfig, Vasara,
    class, hash_class_name,
};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlInputElement, KeyboardEvent, MouseEvent};

use crate::dom::{
    self, ACTION_ATTR, ACTION_CLOSE, ACTION_GHOST, BUTTON_ATTR, DomError, DomStyleSink,
    DomSurface, INPUT_ATTR, WINDOW_ATTR,
};

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub fn run_wasm() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let mut config = ToolkitConfig::default();
    console_log::init_with_level(config.log_level())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    log::info!("Starting Vasara (WASM)");

    let document = dom::document().map_err(to_js)?;
    if let Some(viewport) = viewport() {
        config.manager.viewport = viewport;
    }

    let vasara = Vasara::new(config, Box::new(DomSurface::new(document.clone())));
    if let Err(e) = vasara.init_styles(&mut DomStyleSink::new(document.clone())) {
        log::error!("Failed to inject styles: {}", e);
    }

    install_listeners(&vasara, &document)?;
    crate::demo::install(&vasara);
    Ok(())
}

fn to_js(error: DomError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn viewport() -> Option<Size> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Size::new(width, height))
}

/// Add `handler` as a listener on `target` for the page's lifetime.
fn listen(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn install_listeners(vasara: &Vasara, document: &Document) -> Result<(), JsValue> {
    let v = vasara.clone();
    listen(document, "mousemove", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            v.handle_pointer_event(PointerEvent::Move {
                position: client_point(mouse),
            });
        }
    })?;

    let v = vasara.clone();
    listen(document, "mousedown", move |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let position = client_point(mouse);
        let button = MouseButton::from_dom(mouse.button());
        v.handle_pointer_event(PointerEvent::Down { position, button });
        if let Some(window) = header_window(&v, &event) {
            v.windows().header_pointer_down(&window, position, button);
        }
    })?;

    let v = vasara.clone();
    listen(document, "mouseup", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            v.handle_pointer_event(PointerEvent::Up {
                position: client_point(mouse),
                button: MouseButton::from_dom(mouse.button()),
            });
        }
    })?;

    let v = vasara.clone();
    listen(document, "click", move |event| {
        let Some((window, target)) = target_window(&v, &event) else {
            return;
        };
        let click = match closest_attr(&target, ACTION_ATTR).as_deref() {
            Some(ACTION_GHOST) => ClickTarget::GhostButton,
            Some(ACTION_CLOSE) => ClickTarget::CloseButton,
            _ => match closest_attr(&target, BUTTON_ATTR).and_then(|i| i.parse().ok()) {
                Some(index) => ClickTarget::ContentButton(index),
                None => ClickTarget::Body,
            },
        };
        v.windows().click(&window, click);
    })?;

    let v = vasara.clone();
    listen(document, "input", move |event| {
        let Some((window, target)) = target_window(&v, &event) else {
            return;
        };
        let Some(index) = closest_attr(&target, INPUT_ATTR).and_then(|i| i.parse().ok()) else {
            return;
        };
        if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
            window.input(index, input.value());
        }
    })?;

    let v = vasara.clone();
    listen(document, "keydown", move |event| {
        let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = KeyEvent::new(keyboard.key()).with_repeat(keyboard.repeat());
        v.handle_key_down(&key);
        if key.is_default_prevented() {
            event.prevent_default();
        }
    })?;

    let v = vasara.clone();
    listen(document, "keyup", move |event| {
        if let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() {
            v.handle_key_up(&KeyEvent::new(keyboard.key()));
        }
    })?;

    if let Some(window) = web_sys::window() {
        let v = vasara.clone();
        listen(&window, "blur", move |_| v.handle_blur())?;

        let v = vasara.clone();
        listen(&window, "resize", move |_| {
            if let Some(size) = viewport() {
                v.windows().set_viewport(size);
            }
        })?;
    }

    log::debug!("Document listeners installed");
    Ok(())
}

fn client_point(mouse: &MouseEvent) -> Point {
    Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()))
}

/// The event's target element and the live window containing it.
fn target_window(vasara: &Vasara, event: &Event) -> Option<(ModalWindow, web_sys::Element)> {
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    let id = closest_attr(&target, WINDOW_ATTR)?.parse().ok()?;
    let window = vasara.windows().window(id)?;
    Some((window, target))
}

/// The window whose header (excluding its buttons) is under the event.
fn header_window(vasara: &Vasara, event: &Event) -> Option<ModalWindow> {
    let (window, target) = target_window(vasara, event)?;
    if closest_attr(&target, ACTION_ATTR).is_some() {
        return None;
    }
    let header = format!(".{}", hash_class_name(class::HEADER));
    target.closest(&header).ok()??;
    Some(window)
}

/// Value of `attr` on `elem` or its nearest ancestor carrying it.
fn closest_attr(elem: &web_sys::Element, attr: &str) -> Option<String> {
    elem.closest(&format!("[{}]", attr))
        .ok()
        .flatten()?
        .get_attribute(attr)
}
