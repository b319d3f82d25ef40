//! Keyboard shortcut registry and documentation.

/// Opens the main menu.
pub const MAIN_MENU: &str = "alt+w";
/// Opens the shortcut reference window.
pub const HELP: &str = "alt+h";
/// Closes the front window.
pub const CLOSE_FRONT: &str = "escape";

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub chord: &'static str,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(chord: &'static str, description: &'static str) -> Self {
        Self { chord, description }
    }

    /// Format the shortcut for display (e.g., "Alt+W").
    pub fn format(&self) -> String {
        self.chord
            .split('+')
            .map(|key| {
                let mut chars = key.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new(MAIN_MENU, "Open the main menu"),
            Shortcut::new(HELP, "Show keyboard shortcuts"),
            Shortcut::new(CLOSE_FRONT, "Close the front window"),
        ]
    }

    /// Shortcut reference as table rows, for the help window.
    pub fn as_html() -> String {
        let rows: String = Self::all()
            .iter()
            .map(|s| format!("<tr><td><kbd>{}</kbd></td><td>{}</td></tr>", s.format(), s.description))
            .collect();
        format!("<table>{}</table>", rows)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("alt+w", "").format(), "Alt+W");
        assert_eq!(Shortcut::new("escape", "").format(), "Escape");
    }

    #[test]
    fn test_html_lists_every_shortcut() {
        let html = ShortcutRegistry::as_html();
        for shortcut in ShortcutRegistry::all() {
            assert!(html.contains(&shortcut.format()));
        }
    }
}
