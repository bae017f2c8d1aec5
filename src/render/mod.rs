//! Rendering assembled documents to output formats.

mod docx;
mod json;
mod options;
mod text;

pub use docx::to_docx;
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use text::to_text;

use crate::error::Result;
use crate::model::Document;
use crate::output::OutputFormat;

/// Serialize a document in the given format.
pub fn render(doc: &Document, format: OutputFormat, options: &RenderOptions) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Docx => to_docx(doc),
        OutputFormat::Json => to_json(doc, options.json_format).map(String::into_bytes),
        OutputFormat::Text => Ok(to_text(doc).into_bytes()),
    }
}
