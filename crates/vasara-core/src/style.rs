//! Stylesheet rewriting and injection.
//!
//! Class selectors in the stylesheet template are rewritten through
//! [`hash_class_name`] so they only ever match toolkit-generated elements.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::class_name::hash_class_name;

/// The toolkit's stylesheet template, written with readable class names.
pub const DEFAULT_STYLESHEET: &str = include_str!("style.css");

static CLASS_SELECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.([a-zA-Z][a-zA-Z0-9_-]*)").expect("class selector pattern is valid")
});

/// Stylesheet injection errors.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("No document available")]
    NoDocument,
    #[error("Document has no head element")]
    NoHead,
    #[error("Stylesheet insertion failed: {0}")]
    Insert(String),
}

/// Result type for stylesheet operations.
pub type StyleResult<T> = Result<T, StyleError>;

/// Destination for a rewritten stylesheet (the document head on the web).
pub trait StyleSink {
    /// Insert a single stylesheet node containing `css`.
    fn insert_stylesheet(&mut self, css: &str) -> StyleResult<()>;
}

/// Rewrite every `.identifier` selector through the class name hash.
pub fn rewrite_selectors(css: &str) -> String {
    CLASS_SELECTOR
        .replace_all(css, |caps: &Captures<'_>| format!(".{}", hash_class_name(&caps[1])))
        .into_owned()
}

/// Rewrite `template` and insert it into `sink`.
///
/// Each call inserts a new node; callers run this once at initialization.
pub fn inject_styles(sink: &mut dyn StyleSink, template: &str) -> StyleResult<()> {
    let css = rewrite_selectors(template);
    sink.insert_stylesheet(&css)?;
    log::debug!("Injected toolkit stylesheet ({} bytes)", css.len());
    Ok(())
}

/// Sink that keeps inserted stylesheets in memory.
#[derive(Debug, Default)]
pub struct MemoryStyleSink {
    pub sheets: Vec<String>,
}

impl MemoryStyleSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StyleSink for MemoryStyleSink {
    fn insert_stylesheet(&mut self, css: &str) -> StyleResult<()> {
        self.sheets.push(css.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_name::class;

    #[test]
    fn test_rewrite_class_selectors() {
        let css = ".ghosted { opacity: 0.4; }";
        let rewritten = rewrite_selectors(css);
        assert_eq!(
            rewritten,
            format!(".{} {{ opacity: 0.4; }}", hash_class_name(class::GHOSTED))
        );
    }

    #[test]
    fn test_rewrite_compound_selectors() {
        let rewritten = rewrite_selectors(".modal-window-content button:hover {}");
        assert!(rewritten.starts_with(&format!(".{} button:hover", hash_class_name(class::CONTENT))));
    }

    #[test]
    fn test_numbers_untouched() {
        let css = "box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1);";
        assert_eq!(rewrite_selectors(css), css);
    }

    #[test]
    fn test_default_stylesheet_has_no_plain_classes() {
        let rewritten = rewrite_selectors(DEFAULT_STYLESHEET);
        for name in class::ALL {
            assert!(!rewritten.contains(&format!(".{} ", name)));
            assert!(rewritten.contains(&hash_class_name(name)));
        }
    }

    #[test]
    fn test_inject_inserts_once_per_call() {
        let mut sink = MemoryStyleSink::new();
        inject_styles(&mut sink, DEFAULT_STYLESHEET).unwrap();
        assert_eq!(sink.sheets.len(), 1);
        assert!(sink.sheets[0].contains(&hash_class_name(class::MODAL_WINDOW)));
    }
}
