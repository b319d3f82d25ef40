//! Demo scene: a list of lines and boxes edited through modal forms.
//!
//! Drawing is out of scope; the scene only records shapes and logs them.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Line, Point, Rect};
use vasara_core::{
    Callback, ClickHandler, InputEvent, InputHandler, KeyEvent, ModalDescriptor, ModalWindow,
    Vasara,
};

use crate::shortcuts::{self, ShortcutRegistry};

pub const MAIN_MENU_TITLE: &str = "Main Menu";
pub const LINE_FORM_TITLE: &str = "Add New Line";
pub const BOX_FORM_TITLE: &str = "Add New Box";
pub const HELP_TITLE: &str = "Keyboard Shortcuts";

/// A colored line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLine {
    pub line: Line,
    pub color: String,
}

/// A filled, colored box.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBox {
    pub rect: Rect,
    pub color: String,
}

/// Shapes added through the forms.
#[derive(Debug, Default)]
pub struct Scene {
    pub lines: Vec<SceneLine>,
    pub boxes: Vec<SceneBox>,
}

impl Scene {
    fn log_summary(&self) {
        log::info!(
            "Scene: {} lines, {} boxes",
            self.lines.len(),
            self.boxes.len()
        );
    }
}

/// Shared handle to the scene.
pub type SceneHandle = Rc<RefCell<Scene>>;

/// Mirror of a form's inputs. Blank or malformed numbers read as `NaN`.
#[derive(Debug, Clone)]
struct Draft {
    numbers: [f64; 4],
    color: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            numbers: [0.0; 4],
            color: "#000000".to_string(),
        }
    }
}

/// Bind the demo shortcuts and return the scene they edit.
pub fn install(vasara: &Vasara) -> SceneHandle {
    let scene: SceneHandle = Rc::default();

    let menu_vasara = vasara.clone();
    let menu_scene = Rc::clone(&scene);
    vasara.chords().register(
        shortcuts::MAIN_MENU,
        Callback::new(move |event: &KeyEvent| {
            event.prevent_default();
            open_main_menu(&menu_vasara, &menu_scene);
            Ok(())
        }),
    );

    let help_vasara = vasara.clone();
    vasara.chords().register(
        shortcuts::HELP,
        Callback::new(move |event: &KeyEvent| {
            event.prevent_default();
            help_vasara.windows().create(
                ModalDescriptor::new(HELP_TITLE)
                    .with_size(360.0, 200.0)
                    .with_html(ShortcutRegistry::as_html())
                    .unique(true),
            );
            Ok(())
        }),
    );

    let close_vasara = vasara.clone();
    vasara.chords().register(
        shortcuts::CLOSE_FRONT,
        Callback::new(move |_: &KeyEvent| {
            if let Some(window) = close_vasara.windows().front_window() {
                window.remove();
            }
            Ok(())
        }),
    );

    log::info!("Demo scene installed");
    scene
}

/// Open the main menu, or raise it if already open.
pub fn open_main_menu(vasara: &Vasara, scene: &SceneHandle) -> Option<ModalWindow> {
    let menu = vasara.windows().create_unique(
        ModalDescriptor::new(MAIN_MENU_TITLE)
            .with_size(500.0, 300.0)
            .resizable(true),
    )?;

    let line_vasara = vasara.clone();
    let line_scene = Rc::clone(scene);
    let box_vasara = vasara.clone();
    let box_scene = Rc::clone(scene);
    menu.generate_button(
        LINE_FORM_TITLE,
        ClickHandler::new(move |_| {
            open_line_form(&line_vasara, &line_scene);
            Ok(())
        }),
    )
    .generate_button(
        BOX_FORM_TITLE,
        ClickHandler::new(move |_| {
            open_box_form(&box_vasara, &box_scene);
            Ok(())
        }),
    );
    Some(menu)
}

/// Open a form that adds a line to the scene.
pub fn open_line_form(vasara: &Vasara, scene: &SceneHandle) -> ModalWindow {
    let (form, draft) = open_form(
        vasara,
        LINE_FORM_TITLE,
        [("X1:", "line-x1"), ("Y1:", "line-y1"), ("X2:", "line-x2"), ("Y2:", "line-y2")],
        "line-color",
    );

    let scene = Rc::clone(scene);
    let form_ref = form.downgrade();
    form.generate_button(
        "Add",
        ClickHandler::new(move |_| {
            let Draft { numbers: [x1, y1, x2, y2], color } = draft.borrow().clone();
            let mut scene = scene.borrow_mut();
            scene.lines.push(SceneLine {
                line: Line::new(Point::new(x1, y1), Point::new(x2, y2)),
                color,
            });
            scene.log_summary();
            if let Some(form) = form_ref.upgrade() {
                form.remove();
            }
            Ok(())
        }),
    );
    form
}

/// Open a form that adds a box to the scene.
pub fn open_box_form(vasara: &Vasara, scene: &SceneHandle) -> ModalWindow {
    let (form, draft) = open_form(
        vasara,
        BOX_FORM_TITLE,
        [("X:", "box-x"), ("Y:", "box-y"), ("W:", "box-w"), ("H:", "box-h")],
        "box-color",
    );

    let scene = Rc::clone(scene);
    let form_ref = form.downgrade();
    form.generate_button(
        "Add",
        ClickHandler::new(move |_| {
            let Draft { numbers: [x, y, w, h], color } = draft.borrow().clone();
            let mut scene = scene.borrow_mut();
            scene.boxes.push(SceneBox {
                rect: Rect::new(x, y, x + w, y + h),
                color,
            });
            scene.log_summary();
            if let Some(form) = form_ref.upgrade() {
                form.remove();
            }
            Ok(())
        }),
    );
    form
}

/// Four labelled number fields and a color field, all writing into one draft.
///
/// Numbers are taken as typed, so a cleared field puts `NaN` in the shape.
fn open_form(
    vasara: &Vasara,
    title: &str,
    fields: [(&str, &str); 4],
    color_id: &str,
) -> (ModalWindow, Rc<RefCell<Draft>>) {
    let form = vasara.windows().create(
        ModalDescriptor::new(title)
            .with_size(500.0, 400.0)
            .resizable(true),
    );
    let draft = Rc::new(RefCell::new(Draft::default()));

    for (slot, (label, id)) in fields.into_iter().enumerate() {
        let draft = Rc::clone(&draft);
        form.generate_label(label, id)
            .generate_number_input(
                id,
                0.0,
                InputHandler::new(move |event: &InputEvent| {
                    draft.borrow_mut().numbers[slot] = event.number();
                    Ok(())
                }),
            )
            .put_newline();
    }

    let color_draft = Rc::clone(&draft);
    form.generate_label("Color:", color_id)
        .generate_color_input(
            color_id,
            "#000000",
            InputHandler::new(move |event: &InputEvent| {
                color_draft.borrow_mut().color = event.raw().to_string();
                Ok(())
            }),
        )
        .put_newline();

    (form, draft)
}

/// Index of the input with `id` in a window's content area.
pub fn input_index(window: &ModalWindow, id: &str) -> Option<usize> {
    window.content().iter().position(|element| {
        matches!(element, vasara_core::Element::Input { id: input_id, .. } if input_id == id)
    })
}

/// Index of the button labelled `text` in a window's content area.
pub fn button_index(window: &ModalWindow, text: &str) -> Option<usize> {
    window.content().iter().position(|element| {
        matches!(element, vasara_core::Element::Button { text: label, .. } if label == text)
    })
}
