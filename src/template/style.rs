//! Style resolution with fallback to the `normal` style.

use super::geometry::points_to_half_points;
use super::model::{StyleSpec, Template};
use crate::model::{Alignment, ParagraphStyle, TextStyle};

/// Name of the style every template has and unknown names fall back to.
pub const NORMAL_STYLE: &str = "normal";

/// A style with every attribute filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    /// Font family
    pub font_family: String,
    /// Font size in half-points
    pub font_size: u32,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underline
    pub underline: bool,
    /// Paragraph alignment
    pub alignment: Alignment,
}

impl ResolvedStyle {
    /// Run formatting for this style.
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            font_name: Some(self.font_family.clone()),
            font_size: Some(self.font_size),
        }
    }

    /// Paragraph formatting for this style at the given line spacing.
    pub fn paragraph_style(&self, line_spacing: u32) -> ParagraphStyle {
        ParagraphStyle {
            alignment: self.alignment,
            line_spacing: Some(line_spacing),
        }
    }
}

impl Template {
    /// Raw style spec for `name`, or the `normal` style when the name is
    /// unknown.
    pub fn style(&self, name: &str) -> &StyleSpec {
        if let Some(style) = self.styles().get(name) {
            return style;
        }
        log::debug!("Unknown style '{}', using '{}'", name, NORMAL_STYLE);
        self.styles()
            .get(NORMAL_STYLE)
            .unwrap_or(&FALLBACK_STYLE)
    }

    /// Resolve `name` to concrete formatting. Never fails: unknown names use
    /// `normal`, and absent attributes inherit the page defaults.
    pub fn resolve_style(&self, name: &str) -> ResolvedStyle {
        let spec = self.style(name);
        let layout = self.layout();

        ResolvedStyle {
            font_family: spec
                .font_family
                .clone()
                .filter(|family| !family.trim().is_empty())
                .unwrap_or_else(|| layout.default_font.clone()),
            font_size: spec
                .font_size
                .map(points_to_half_points)
                .unwrap_or(layout.default_font_size),
            bold: spec.bold.unwrap_or(false),
            italic: spec.italic.unwrap_or(false),
            underline: spec.underline.unwrap_or(false),
            alignment: spec
                .alignment
                .as_deref()
                .map(Alignment::from_name)
                .unwrap_or_default(),
        }
    }
}

static FALLBACK_STYLE: StyleSpec = StyleSpec {
    font_family: None,
    font_size: None,
    bold: None,
    italic: None,
    underline: None,
    alignment: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Template {
        Template::from_json(
            r#"{
                "page_settings": { "default_font": "Garamond", "default_font_size": 11 },
                "styles": {
                    "normal": { "alignment": "justify" },
                    "heading": { "font_family": "Arial", "font_size": 14, "bold": true, "underline": true, "alignment": "center" },
                    "odd": { "alignment": "sideways", "italic": true }
                },
                "blocks": []
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_named_style() {
        let style = template().resolve_style("heading");
        assert_eq!(style.font_family, "Arial");
        assert_eq!(style.font_size, 28);
        assert!(style.bold);
        assert!(style.underline);
        assert!(!style.italic);
        assert_eq!(style.alignment, Alignment::Center);
    }

    #[test]
    fn test_unknown_style_falls_back_to_normal() {
        let template = template();
        assert_eq!(template.resolve_style("missing"), template.resolve_style("normal"));
        let style = template.resolve_style("missing");
        assert_eq!(style.font_family, "Garamond");
        assert_eq!(style.font_size, 22);
        assert_eq!(style.alignment, Alignment::Justify);
    }

    #[test]
    fn test_unrecognized_alignment_is_left() {
        let style = template().resolve_style("odd");
        assert_eq!(style.alignment, Alignment::Left);
        assert!(style.italic);
    }

    #[test]
    fn test_text_and_paragraph_styles() {
        let style = template().resolve_style("heading");
        let text = style.text_style();
        assert_eq!(text.font_name.as_deref(), Some("Arial"));
        assert_eq!(text.font_size, Some(28));
        assert!(text.bold);

        let para = style.paragraph_style(276);
        assert_eq!(para.alignment, Alignment::Center);
        assert_eq!(para.line_spacing, Some(276));
    }
}
