//! Headless demo entry point (native).
//!
//! Runs a scripted session against a logging surface:
//! `vasara-demo [config.json]`.

#[cfg(feature = "native")]
fn main() {
    use vasara_app::ShortcutRegistry;
    use vasara_app::demo;
    use vasara_core::style::MemoryStyleSink;
    use vasara_core::{ClickTarget, KeyEvent, LogSurface, ModalWindow, ToolkitConfig, Vasara};

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| ToolkitConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => ToolkitConfig::default(),
    };

    env_logger::Builder::new()
        .filter_level(config.log_level().to_level_filter())
        .parse_default_env()
        .init();
    log::info!("Starting Vasara demo (headless)");

    ShortcutRegistry::print_all();

    let vasara = Vasara::new(config, Box::new(LogSurface));
    let mut styles = MemoryStyleSink::new();
    if let Err(e) = vasara.init_styles(&mut styles) {
        log::error!("Failed to inject styles: {}", e);
    }
    let scene = demo::install(&vasara);

    let press = |keys: &[&str]| {
        for key in keys {
            vasara.handle_key_down(&KeyEvent::new(*key));
        }
        for key in keys.iter().rev() {
            vasara.handle_key_up(&KeyEvent::new(*key));
        }
    };
    let click = |window: &ModalWindow, text: &str| {
        if let Some(index) = demo::button_index(window, text) {
            vasara.windows().click(window, ClickTarget::ContentButton(index));
        }
    };
    let fill = |window: &ModalWindow, values: &[(&str, &str)]| {
        for (id, value) in values {
            if let Some(index) = demo::input_index(window, id) {
                window.input(index, *value);
            }
        }
    };

    press(&["Alt", "w"]);
    let Some(menu) = vasara.windows().find_by_title(demo::MAIN_MENU_TITLE) else {
        log::error!("Main menu did not open");
        return;
    };

    click(&menu, demo::LINE_FORM_TITLE);
    if let Some(form) = vasara.windows().front_window() {
        fill(
            &form,
            &[("line-x1", "10"), ("line-y1", "10"), ("line-x2", "200"), ("line-y2", "120"), ("line-color", "#3366ff")],
        );
        click(&form, "Add");
    }

    click(&menu, demo::BOX_FORM_TITLE);
    if let Some(form) = vasara.windows().front_window() {
        fill(&form, &[("box-x", "40"), ("box-y", "40"), ("box-w", "80"), ("box-h", "")]);
        click(&form, "Add");
    }

    press(&["Alt", "h"]);
    press(&["Escape"]);
    press(&["Escape"]);

    let scene = scene.borrow();
    for line in &scene.lines {
        log::info!("line {:?} {}", line.line, line.color);
    }
    for shape in &scene.boxes {
        log::info!("box {:?} {}", shape.rect, shape.color);
    }
    log::info!("{} windows still open", vasara.windows().len());
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
