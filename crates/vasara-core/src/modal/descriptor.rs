//! Creation-time configuration of a modal window.

use kurbo::Size;
use serde::{Deserialize, Deserializer, Serialize};

use super::element::Element;

/// Title used when none is given.
pub const DEFAULT_TITLE: &str = "Modal Window";
/// Default window width in pixels.
pub const DEFAULT_WIDTH: f64 = 400.0;
/// Default window height in pixels.
pub const DEFAULT_HEIGHT: f64 = 300.0;

/// Options for creating a modal window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalDescriptor {
    pub title: String,
    /// Initial content, placed before anything the builder appends.
    /// In JSON this is a markup string.
    #[serde(skip_serializing, deserialize_with = "markup_content")]
    pub content: Option<Element>,
    pub width: f64,
    pub height: f64,
    pub resizable: bool,
    /// Always show the bare title and stay out of duplicate counting.
    pub disable_title_stacking: bool,
    pub enable_ghost_button: bool,
    pub enable_close_button: bool,
    /// Caller tag for later lookup.
    pub tag: Option<String>,
    /// Reuse a live window with the same title instead of opening another.
    pub unique: bool,
}

fn markup_content<'de, D>(deserializer: D) -> Result<Option<Element>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(Element::Html))
}

impl Default for ModalDescriptor {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            content: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            resizable: false,
            disable_title_stacking: false,
            enable_ghost_button: true,
            enable_close_button: true,
            tag: None,
            unique: false,
        }
    }
}

impl ModalDescriptor {
    /// Create a descriptor with the given title and default options.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_content(mut self, content: Element) -> Self {
        self.content = Some(content);
        self
    }

    /// Use markup as the initial content.
    pub fn with_html(self, markup: impl Into<String>) -> Self {
        self.with_content(Element::html(markup))
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn disable_title_stacking(mut self, disable: bool) -> Self {
        self.disable_title_stacking = disable;
        self
    }

    pub fn ghost_button(mut self, enable: bool) -> Self {
        self.enable_ghost_button = enable;
        self
    }

    pub fn close_button(mut self, enable: bool) -> Self {
        self.enable_close_button = enable;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Window size in pixels.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let descriptor = ModalDescriptor::default();
        assert_eq!(descriptor.title, "Modal Window");
        assert_eq!(descriptor.size(), Size::new(400.0, 300.0));
        assert!(!descriptor.resizable);
        assert!(!descriptor.disable_title_stacking);
        assert!(descriptor.enable_ghost_button);
        assert!(descriptor.enable_close_button);
        assert_eq!(descriptor.tag, None);
    }

    #[test]
    fn test_deserialize_partial() {
        let descriptor: ModalDescriptor =
            serde_json::from_str(r#"{"title": "Main Menu", "width": 500, "resizable": true}"#)
                .unwrap();
        assert_eq!(descriptor.title, "Main Menu");
        assert_eq!(descriptor.width, 500.0);
        assert_eq!(descriptor.height, 300.0);
        assert!(descriptor.resizable);
        assert!(descriptor.enable_close_button);
    }

    #[test]
    fn test_deserialize_markup_content() {
        let descriptor: ModalDescriptor =
            serde_json::from_str(r#"{"title": "Help", "content": "<p>Press Alt+W</p>"}"#)
                .unwrap();
        assert_eq!(descriptor.content, Some(Element::html("<p>Press Alt+W</p>")));

        let descriptor: ModalDescriptor = serde_json::from_str(r#"{"content": null}"#).unwrap();
        assert_eq!(descriptor.content, None);

        let json = serde_json::to_string(&ModalDescriptor::new("Help").with_html("<p/>")).unwrap();
        assert!(!json.contains("content"));
    }

    #[test]
    fn test_builder_setters() {
        let descriptor = ModalDescriptor::new("Settings")
            .with_size(500.0, 400.0)
            .disable_title_stacking(true)
            .close_button(false)
            .with_tag("config");
        assert_eq!(descriptor.size(), Size::new(500.0, 400.0));
        assert!(descriptor.disable_title_stacking);
        assert!(!descriptor.enable_close_button);
        assert_eq!(descriptor.tag.as_deref(), Some("config"));
    }
}
