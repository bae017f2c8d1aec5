//! Page layout values derived once from the template's page settings.

use super::model::PageSettings;
use crate::model::{inches_to_twips, Margins, Orientation, PageGeometry};
use serde::Serialize;

/// Line spacing multiplier used when the template does not set one.
pub const DEFAULT_LINE_SPACING: f64 = 1.15;

/// Line units per single-spaced line.
const LINE_UNITS: f64 = 240.0;

/// Portrait dimensions in inches for a named paper size.
pub fn page_size_inches(name: &str) -> Option<(f64, f64)> {
    match name.trim().to_ascii_lowercase().as_str() {
        "letter" | "us-letter" => Some((8.5, 11.0)),
        "legal" | "us-legal" => Some((8.5, 14.0)),
        "a4" => Some((8.27, 11.69)),
        "a5" => Some((5.83, 8.27)),
        _ => None,
    }
}

/// Immutable layout derived from [`PageSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLayout {
    /// Page geometry in twips, width/height swapped for landscape
    pub geometry: PageGeometry,

    /// Line spacing in 240ths of a line
    pub line_spacing: u32,

    /// Default font family
    pub default_font: String,

    /// Default font size in half-points
    pub default_font_size: u32,
}

impl PageLayout {
    /// Compute the layout for validated page settings.
    pub fn from_settings(settings: &PageSettings) -> Self {
        let (named_width, named_height) = page_size_inches(&settings.page_size)
            .unwrap_or_else(|| {
                log::warn!(
                    "Unknown page size '{}', using letter",
                    settings.page_size
                );
                (8.5, 11.0)
            });
        let width = settings.page_width.unwrap_or(named_width);
        let height = settings.page_height.unwrap_or(named_height);

        let (width, height) = match settings.orientation {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        };

        let margins = Margins {
            top: inches_to_twips(settings.margins.top),
            right: inches_to_twips(settings.margins.right),
            bottom: inches_to_twips(settings.margins.bottom),
            left: inches_to_twips(settings.margins.left),
        };

        let multiplier = settings.line_spacing.unwrap_or(DEFAULT_LINE_SPACING);

        Self {
            geometry: PageGeometry {
                width: inches_to_twips(width),
                height: inches_to_twips(height),
                orientation: settings.orientation,
                margins,
            },
            line_spacing: line_spacing_units(multiplier),
            default_font: settings.default_font.clone(),
            default_font_size: points_to_half_points(settings.default_font_size),
        }
    }
}

/// Line spacing multiplier to 240ths of a line.
pub fn line_spacing_units(multiplier: f64) -> u32 {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return LINE_UNITS as u32;
    }
    (multiplier * LINE_UNITS).round() as u32
}

/// Font size in points to half-points.
pub(crate) fn points_to_half_points(points: f64) -> u32 {
    if !points.is_finite() || points <= 0.0 {
        return 0;
    }
    (points * 2.0).round() as u32
}
