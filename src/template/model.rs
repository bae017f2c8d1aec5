//! Template schema and loading.

use super::geometry::PageLayout;
use super::style::NORMAL_STYLE;
use crate::error::{Error, Result};
use crate::model::Orientation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

const BUNDLED_TEMPLATE_JSON: &str = include_str!("../../assets/contract_template.json");

static BUNDLED: OnceLock<Template> = OnceLock::new();

/// Page settings as written in the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSettings {
    /// Named paper size ("letter", "legal", "a4", "a5")
    #[serde(default = "default_page_size")]
    pub page_size: String,

    /// Explicit page width in inches; overrides `page_size`
    #[serde(default)]
    pub page_width: Option<f64>,

    /// Explicit page height in inches; overrides `page_size`
    #[serde(default)]
    pub page_height: Option<f64>,

    /// Page orientation
    #[serde(default)]
    pub orientation: Orientation,

    /// Margins in inches
    #[serde(default)]
    pub margins: MarginSettings,

    /// Document default font family
    #[serde(default = "default_font")]
    pub default_font: String,

    /// Document default font size in points
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// Line spacing multiplier (1.0 = single)
    #[serde(default)]
    pub line_spacing: Option<f64>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_width: None,
            page_height: None,
            orientation: Orientation::Portrait,
            margins: MarginSettings::default(),
            default_font: default_font(),
            default_font_size: default_font_size(),
            line_spacing: None,
        }
    }
}

fn default_page_size() -> String {
    "letter".to_string()
}

fn default_font() -> String {
    "Times New Roman".to_string()
}

fn default_font_size() -> f64 {
    12.0
}

fn default_margin() -> f64 {
    1.0
}

fn default_style_name() -> String {
    NORMAL_STYLE.to_string()
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginSettings {
    /// Top margin
    #[serde(default = "default_margin")]
    pub top: f64,
    /// Right margin
    #[serde(default = "default_margin")]
    pub right: f64,
    /// Bottom margin
    #[serde(default = "default_margin")]
    pub bottom: f64,
    /// Left margin
    #[serde(default = "default_margin")]
    pub left: f64,
}

impl Default for MarginSettings {
    fn default() -> Self {
        Self {
            top: 1.0,
            right: 1.0,
            bottom: 1.0,
            left: 1.0,
        }
    }
}

/// A named style. Absent attributes inherit the document defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSpec {
    /// Font family
    #[serde(default, alias = "fontFamily")]
    pub font_family: Option<String>,

    /// Font size in points
    #[serde(default, alias = "fontSize", alias = "font_size_pt")]
    pub font_size: Option<f64>,

    /// Bold
    #[serde(default)]
    pub bold: Option<bool>,

    /// Italic
    #[serde(default)]
    pub italic: Option<bool>,

    /// Underline
    #[serde(default)]
    pub underline: Option<bool>,

    /// Alignment name; resolved to the closed alignment set
    #[serde(default)]
    pub alignment: Option<String>,
}

/// One structural unit of the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemplateBlock {
    /// A paragraph of literal text
    Paragraph {
        /// Style name
        #[serde(default = "default_style_name", alias = "styleName")]
        style: String,
        /// Literal template text
        #[serde(default, alias = "literal_text")]
        text: String,
    },

    /// A table of literal cell texts
    Table {
        /// Style name applied to every cell
        #[serde(default = "default_style_name", alias = "styleName")]
        style: String,
        /// Rows of cell texts
        #[serde(default)]
        rows: Vec<Vec<String>>,
    },
}

impl TemplateBlock {
    /// Style name of the block.
    pub fn style_name(&self) -> &str {
        match self {
            TemplateBlock::Paragraph { style, .. } | TemplateBlock::Table { style, .. } => style,
        }
    }
}

/// Raw JSON shape. Unknown fields are ignored for forward compatibility.
#[derive(Debug, Deserialize)]
struct TemplateSource {
    #[serde(default)]
    version: Option<serde_json::Value>,
    #[serde(default)]
    page_settings: PageSettings,
    #[serde(default)]
    styles: BTreeMap<String, StyleSpec>,
    #[serde(default)]
    blocks: Vec<TemplateBlock>,
}

/// A loaded, validated template with its derived page layout.
#[derive(Debug, Clone)]
pub struct Template {
    version: Option<String>,
    page_settings: PageSettings,
    styles: BTreeMap<String, StyleSpec>,
    blocks: Vec<TemplateBlock>,
    layout: PageLayout,
}

impl Template {
    /// Parse and validate a template from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let source: TemplateSource = serde_json::from_str(json)?;
        Self::from_source(source)
    }

    /// Parse a template from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let source: TemplateSource = serde_json::from_reader(reader)?;
        Self::from_source(source)
    }

    /// Load a template file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The contract template shipped with the crate, parsed once per
    /// process.
    pub fn bundled() -> Result<&'static Template> {
        if let Some(template) = BUNDLED.get() {
            return Ok(template);
        }
        let template = Self::from_json(BUNDLED_TEMPLATE_JSON)?;
        Ok(BUNDLED.get_or_init(|| template))
    }

    fn from_source(source: TemplateSource) -> Result<Self> {
        let TemplateSource {
            version,
            page_settings,
            mut styles,
            blocks,
        } = source;

        validate_page_settings(&page_settings)?;
        for (name, style) in &styles {
            if let Some(size) = style.font_size {
                if !size.is_finite() || size <= 0.0 {
                    return Err(Error::InvalidTemplate(format!(
                        "style '{}' has invalid font size {}",
                        name, size
                    )));
                }
            }
        }

        if !styles.contains_key(NORMAL_STYLE) {
            log::warn!("Template has no '{}' style; using page defaults", NORMAL_STYLE);
            styles.insert(NORMAL_STYLE.to_string(), StyleSpec::default());
        }

        let version = version.map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
        let layout = PageLayout::from_settings(&page_settings);

        log::debug!(
            "Loaded template version {:?}: {} styles, {} blocks",
            version,
            styles.len(),
            blocks.len()
        );

        Ok(Self {
            version,
            page_settings,
            styles,
            blocks,
            layout,
        })
    }

    /// Informational template version.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Page settings as written.
    pub fn page_settings(&self) -> &PageSettings {
        &self.page_settings
    }

    /// Derived page layout in document units.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// All named styles.
    pub fn styles(&self) -> &BTreeMap<String, StyleSpec> {
        &self.styles
    }

    /// Ordered content blocks.
    pub fn blocks(&self) -> &[TemplateBlock] {
        &self.blocks
    }
}

fn validate_page_settings(settings: &PageSettings) -> Result<()> {
    let margins = &settings.margins;
    for (side, value) in [
        ("top", margins.top),
        ("right", margins.right),
        ("bottom", margins.bottom),
        ("left", margins.left),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidTemplate(format!(
                "{} margin must be a non-negative number of inches, got {}",
                side, value
            )));
        }
    }

    for (name, value) in [
        ("page_width", settings.page_width),
        ("page_height", settings.page_height),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v <= 0.0 {
                return Err(Error::InvalidTemplate(format!(
                    "{} must be positive, got {}",
                    name, v
                )));
            }
        }
    }

    if !settings.default_font_size.is_finite() || settings.default_font_size <= 0.0 {
        return Err(Error::InvalidTemplate(format!(
            "default_font_size must be positive, got {}",
            settings.default_font_size
        )));
    }

    if let Some(spacing) = settings.line_spacing {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(Error::InvalidTemplate(format!(
                "line_spacing must be positive, got {}",
                spacing
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "version": "2.1",
        "page_settings": { "page_size": "letter", "margins": { "top": 0.5 } },
        "styles": {
            "normal": { "font_family": "Georgia", "font_size": 11 },
            "title": { "bold": true, "alignment": "center", "font_size": 16 }
        },
        "blocks": [
            { "type": "paragraph", "style": "title", "text": "CONTRACT OF SALE" },
            { "type": "table", "style": "normal", "rows": [["Buyer", "Breeder"]] }
        ]
    }"#;

    #[test]
    fn test_parse_minimal_template() {
        let template = Template::from_json(MINIMAL).unwrap();
        assert_eq!(template.version(), Some("2.1"));
        assert_eq!(template.blocks().len(), 2);
        assert_eq!(template.styles().len(), 2);
        assert_eq!(template.page_settings().margins.top, 0.5);
        assert_eq!(template.page_settings().margins.left, 1.0);
        assert_eq!(template.blocks()[0].style_name(), "title");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r##"{
            "version": 3,
            "generator": "template-editor",
            "page_settings": { "page_size": "a4", "watermark": "DRAFT" },
            "styles": { "normal": { "font_size": 10, "color": "#333333" } },
            "blocks": [ { "type": "paragraph", "text": "Hi", "id": "b1" } ]
        }"##;
        let template = Template::from_json(json).unwrap();
        assert_eq!(template.version(), Some("3"));
        assert_eq!(template.blocks()[0].style_name(), NORMAL_STYLE);
    }

    #[test]
    fn test_missing_normal_style_is_synthesized() {
        let json = r#"{ "styles": { "heading": { "bold": true } }, "blocks": [] }"#;
        let template = Template::from_json(json).unwrap();
        assert!(template.styles().contains_key(NORMAL_STYLE));
    }

    #[test]
    fn test_negative_margin_rejected() {
        let json = r#"{ "page_settings": { "margins": { "left": -1 } } }"#;
        let err = Template::from_json(json).unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate(_)));
    }

    #[test]
    fn test_zero_line_spacing_rejected() {
        let json = r#"{ "page_settings": { "line_spacing": 0 } }"#;
        assert!(matches!(
            Template::from_json(json),
            Err(Error::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Template::from_json("{ not json"),
            Err(Error::TemplateParse(_))
        ));
    }

    #[test]
    fn test_bundled_template_loads_once() {
        let first = Template::bundled().unwrap();
        let second = Template::bundled().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(!first.blocks().is_empty());
    }
}
