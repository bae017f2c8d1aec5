//! Assembled document model.
//!
//! This module defines the write-once document tree produced by the
//! assembler and consumed by the renderers. Lengths are expressed in twips
//! (1/1440 inch) and font sizes in half-points, matching the units of the
//! word-processor output.

mod document;
mod page;
mod paragraph;
mod table;

pub use document::{Document, Metadata};
pub use page::{inches_to_twips, Block, Margins, Orientation, PageGeometry, TWIPS_PER_INCH};
pub use paragraph::{Alignment, InlineContent, Paragraph, ParagraphStyle, TextRun, TextStyle};
pub use table::{Table, TableCell, TableRow};
