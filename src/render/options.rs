//! Rendering options and configuration.

use super::JsonFormat;
use crate::output::OutputFormat;

/// Options applied while assembling and serializing a contract.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Number of spaces a tab character expands to
    pub tab_width: usize,

    /// Line spacing multiplier overriding the template's value
    pub line_spacing: Option<f64>,

    /// Document title stored in the package properties
    pub title: Option<String>,

    /// Output format
    pub format: OutputFormat,

    /// Layout of JSON output
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tab expansion width.
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Override the template line spacing. Non-finite or non-positive
    /// values are ignored.
    pub fn with_line_spacing(mut self, spacing: f64) -> Self {
        self.line_spacing = (spacing.is_finite() && spacing > 0.0).then_some(spacing);
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Tab replacement text.
    pub(crate) fn tab_spaces(&self) -> String {
        " ".repeat(self.tab_width)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tab_width: 4,
            line_spacing: None,
            title: Some("Sale Agreement".to_string()),
            format: OutputFormat::Docx,
            json_format: JsonFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_tab_width(2)
            .with_title("Puppy Contract")
            .with_format(OutputFormat::Text)
            .with_json_format(JsonFormat::Compact);

        assert_eq!(options.tab_width, 2);
        assert_eq!(options.title.as_deref(), Some("Puppy Contract"));
        assert_eq!(options.format, OutputFormat::Text);
        assert_eq!(options.json_format, JsonFormat::Compact);
        assert_eq!(options.tab_spaces(), "  ");
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.tab_width, 4);
        assert_eq!(options.line_spacing, None);
        assert_eq!(options.format, OutputFormat::Docx);
    }

    #[test]
    fn test_invalid_line_spacing_ignored() {
        assert_eq!(RenderOptions::new().with_line_spacing(1.5).line_spacing, Some(1.5));
        assert_eq!(RenderOptions::new().with_line_spacing(0.0).line_spacing, None);
        assert_eq!(RenderOptions::new().with_line_spacing(f64::NAN).line_spacing, None);
    }
}
