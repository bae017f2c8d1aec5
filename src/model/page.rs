//! Page geometry and top-level blocks.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// Native length units per inch (twips).
pub const TWIPS_PER_INCH: f64 = 1440.0;

/// Convert inches to twips, rounding to the nearest unit.
///
/// Negative and non-finite lengths clamp to zero.
pub fn inches_to_twips(inches: f64) -> u32 {
    if !inches.is_finite() || inches <= 0.0 {
        return 0;
    }
    (inches * TWIPS_PER_INCH).round() as u32
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide (default)
    #[default]
    Portrait,
    /// Wider than tall
    Landscape,
}

/// Page margins in twips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: u32,
    /// Right margin
    pub right: u32,
    /// Bottom margin
    pub bottom: u32,
    /// Left margin
    pub left: u32,
}

impl Margins {
    /// Equal margins on all four sides.
    pub fn uniform(twips: u32) -> Self {
        Self {
            top: twips,
            right: twips,
            bottom: twips,
            left: twips,
        }
    }
}

/// Page size, orientation and margins, all in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width as laid out (already swapped for landscape)
    pub width: u32,

    /// Page height as laid out
    pub height: u32,

    /// Page orientation
    pub orientation: Orientation,

    /// Page margins
    pub margins: Margins,
}

impl PageGeometry {
    /// US Letter portrait with one-inch margins.
    pub fn letter() -> Self {
        Self {
            width: 12240,  // 8.5in
            height: 15840, // 11in
            orientation: Orientation::Portrait,
            margins: Margins::uniform(1440),
        }
    }

    /// Width available to text between the side margins.
    pub fn content_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margins.left)
            .saturating_sub(self.margins.right)
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.orientation == Orientation::Landscape
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

/// A top-level content node. Each template block yields exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of styled runs
    Paragraph(Paragraph),

    /// A table of paragraphs
    Table(Table),
}

impl Block {
    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Plain text of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.plain_text(),
            Block::Table(t) => t.plain_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_twips() {
        assert_eq!(inches_to_twips(1.0), 1440);
        assert_eq!(inches_to_twips(0.75), 1080);
        assert_eq!(inches_to_twips(8.5), 12240);
        assert_eq!(inches_to_twips(-1.0), 0);
        assert_eq!(inches_to_twips(f64::NAN), 0);
    }

    #[test]
    fn test_letter_geometry() {
        let page = PageGeometry::letter();
        assert!(!page.is_landscape());
        assert_eq!(page.content_width(), 12240 - 2880);
    }

    #[test]
    fn test_block_variants() {
        let block = Block::Paragraph(Paragraph::with_text("Sire: Duke"));
        assert!(block.is_paragraph());
        assert!(!block.is_table());
        assert_eq!(block.plain_text(), "Sire: Duke");
    }
}
