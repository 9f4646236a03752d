use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::errors::ConfigurationError;

/// One selectable option of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub display: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display: display.into(),
        }
    }
}

impl<V: Into<String>, D: Into<String>> From<(V, D)> for Choice {
    fn from((value, display): (V, D)) -> Self {
        Self::new(value, display)
    }
}

/// Rendering hint for text fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    #[default]
    Text,
    Textarea,
    Hidden,
    Email,
    Number,
    Search,
}

impl Widget {
    /// The `type` attribute of the `<input>` element, `None` for textareas.
    pub fn input_type(&self) -> Option<&'static str> {
        match self {
            Widget::Text => Some("text"),
            Widget::Textarea => None,
            Widget::Hidden => Some("hidden"),
            Widget::Email => Some("email"),
            Widget::Number => Some("number"),
            Widget::Search => Some("search"),
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Widget::Hidden)
    }
}

impl FromStr for Widget {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "textinput" => Ok(Widget::Text),
            "textarea" => Ok(Widget::Textarea),
            "hidden" | "hiddeninput" => Ok(Widget::Hidden),
            "email" | "emailinput" => Ok(Widget::Email),
            "number" | "numberinput" => Ok(Widget::Number),
            "search" | "searchinput" => Ok(Widget::Search),
            _ => Err(ConfigurationError::UnknownWidget(s.to_string())),
        }
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Widget::Text => "text",
            Widget::Textarea => "textarea",
            Widget::Hidden => "hidden",
            Widget::Email => "email",
            Widget::Number => "number",
            Widget::Search => "search",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_parse() {
        assert_eq!("textarea".parse::<Widget>(), Ok(Widget::Textarea));
        assert_eq!("HiddenInput".parse::<Widget>(), Ok(Widget::Hidden));
        assert_eq!(
            "slider".parse::<Widget>(),
            Err(ConfigurationError::UnknownWidget("slider".to_string()))
        );
    }

    #[test]
    fn test_widget_input_type() {
        assert_eq!(Widget::default().input_type(), Some("text"));
        assert_eq!(Widget::Textarea.input_type(), None);
        assert!(Widget::Hidden.is_hidden());
    }

    #[test]
    fn test_choice_from_pair() {
        let choice = Choice::from(("m", "Male"));
        assert_eq!(choice.value, "m");
        assert_eq!(choice.display, "Male");
    }
}
