//! Content elements appended to a modal window.

use serde::{Deserialize, Serialize};

use crate::callback::Callback;

/// Handler for input value changes.
pub type InputHandler = Callback<InputEvent>;

/// Handler for button activation.
pub type ClickHandler = Callback<()>;

/// Kind of an input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    Number,
    Color,
    Text,
}

impl InputKind {
    /// Value of the HTML `type` attribute.
    pub fn html_type(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Color => "color",
            Self::Text => "text",
        }
    }
}

/// A raw input change, as delivered by the platform.
///
/// The value is the input's text; number inputs are not parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    /// Id of the input element.
    pub id: String,
    /// Current text of the input.
    pub value: String,
}

impl InputEvent {
    /// The raw text value.
    pub fn raw(&self) -> &str {
        &self.value
    }

    /// The value parsed as a number.
    ///
    /// Blank or malformed text yields `NaN`; validation is up to the caller.
    pub fn number(&self) -> f64 {
        self.value.trim().parse().unwrap_or(f64::NAN)
    }
}

/// A piece of modal window content.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A label bound to the input with id `html_for`.
    Label { text: String, html_for: String },
    /// An input field.
    Input {
        kind: InputKind,
        id: String,
        value: String,
        on_input: Option<InputHandler>,
    },
    /// A clickable button.
    Button {
        text: String,
        on_click: Option<ClickHandler>,
    },
    /// A line break.
    Newline,
    /// Caller-supplied markup, inserted verbatim.
    Html(String),
}

impl Element {
    /// Create a label element.
    pub fn label(text: impl Into<String>, html_for: impl Into<String>) -> Self {
        Self::Label {
            text: text.into(),
            html_for: html_for.into(),
        }
    }

    /// Create an input element.
    pub fn input(
        kind: InputKind,
        id: impl Into<String>,
        value: impl Into<String>,
        on_input: Option<InputHandler>,
    ) -> Self {
        Self::Input {
            kind,
            id: id.into(),
            value: value.into(),
            on_input,
        }
    }

    /// Create a button element.
    pub fn button(text: impl Into<String>, on_click: Option<ClickHandler>) -> Self {
        Self::Button {
            text: text.into(),
            on_click,
        }
    }

    /// Create a verbatim markup element.
    pub fn html(markup: impl Into<String>) -> Self {
        Self::Html(markup.into())
    }

    /// HTML tag name used to render the element.
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Label { .. } => "label",
            Self::Input { .. } => "input",
            Self::Button { .. } => "button",
            Self::Newline => "br",
            Self::Html(_) => "div",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(value: &str) -> InputEvent {
        InputEvent {
            id: "x1".to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_number_parsing() {
        assert_eq!(event("42").number(), 42.0);
        assert_eq!(event(" -3.5 ").number(), -3.5);
    }

    #[test]
    fn test_blank_number_is_nan() {
        assert!(event("").number().is_nan());
        assert!(event("abc").number().is_nan());
        assert_eq!(event("").raw(), "");
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(Element::label("X1:", "x1").tag_name(), "label");
        assert_eq!(Element::Newline.tag_name(), "br");
        assert_eq!(InputKind::Color.html_type(), "color");
    }
}
