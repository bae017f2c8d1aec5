//! Document-level types.

use super::{Block, PageGeometry};
use serde::{Deserialize, Serialize};

/// An assembled contract document, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document properties (title, subject, etc.)
    pub metadata: Metadata,

    /// Page size, orientation and margins
    pub geometry: PageGeometry,

    /// Default font family for the whole document
    pub default_font: String,

    /// Default font size in half-points
    pub default_font_size: u32,

    /// Line spacing applied to every paragraph, in 240ths of a line
    pub line_spacing: u32,

    /// Content blocks in template order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document with Letter geometry.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            geometry: PageGeometry::default(),
            default_font: "Times New Roman".to_string(),
            default_font_size: 24,
            line_spacing: 276,
            blocks: Vec::new(),
        }
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any content.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document properties written into the package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Creating party (kennel or breeder)
    pub creator: Option<String>,

    /// Keywords
    pub keywords: Option<String>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}
