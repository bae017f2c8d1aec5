//! Document assembly: resolved template blocks to the styled document tree.

use crate::data::ContractData;
use crate::error::{Error, Result};
use crate::model::{Block, Document, Metadata, Paragraph, Table, TableCell, TableRow, TextRun};
use crate::render::RenderOptions;
use crate::resolve::ContentResolver;
use crate::template::{line_spacing_units, ResolvedStyle, Template, TemplateBlock};

/// Builds a [`Document`] from a template and a contract record.
///
/// The assembler borrows everything it needs; one instance can assemble any
/// number of records, from any number of threads.
#[derive(Debug, Clone)]
pub struct DocumentAssembler<'a> {
    template: &'a Template,
    resolver: &'a ContentResolver,
    options: &'a RenderOptions,
}

impl<'a> DocumentAssembler<'a> {
    /// Create an assembler.
    pub fn new(
        template: &'a Template,
        resolver: &'a ContentResolver,
        options: &'a RenderOptions,
    ) -> Self {
        Self {
            template,
            resolver,
            options,
        }
    }

    /// Assemble the document for `data`.
    ///
    /// Every template block yields exactly one block in the output, in the
    /// same order. A table with no rows, or a row with no cells, fails the
    /// whole assembly.
    pub fn assemble(&self, data: &ContractData) -> Result<Document> {
        let layout = self.template.layout();
        let line_spacing = self
            .options
            .line_spacing
            .map(line_spacing_units)
            .unwrap_or(layout.line_spacing);

        let mut doc = Document {
            metadata: self.metadata(data),
            geometry: layout.geometry,
            default_font: layout.default_font.clone(),
            default_font_size: layout.default_font_size,
            line_spacing,
            blocks: Vec::with_capacity(self.template.blocks().len()),
        };

        for (index, block) in self.template.blocks().iter().enumerate() {
            let style = self.template.resolve_style(block.style_name());
            let node = match block {
                TemplateBlock::Paragraph { text, .. } => {
                    let resolved = self.resolver.resolve(text, data);
                    Block::Paragraph(self.paragraph(&resolved, &style, line_spacing))
                }
                TemplateBlock::Table { rows, .. } => {
                    Block::Table(self.table(index, rows, data, &style, line_spacing)?)
                }
            };
            doc.add_block(node);
        }

        log::debug!("Assembled {} blocks", doc.block_count());
        Ok(doc)
    }

    fn metadata(&self, data: &ContractData) -> Metadata {
        let subject = match (data.buyer_name.trim(), data.puppy_name.trim()) {
            ("", _) => None,
            (buyer, "") => Some(format!("Sale to {}", buyer)),
            (buyer, puppy) => Some(format!("Sale of {} to {}", puppy, buyer)),
        };
        Metadata {
            title: self.options.title.clone(),
            subject,
            creator: non_empty(&data.kennel_name),
            keywords: non_empty(&data.sale_id),
        }
    }

    /// One paragraph; newlines become line breaks inside it.
    fn paragraph(&self, text: &str, style: &ResolvedStyle, line_spacing: u32) -> Paragraph {
        let mut paragraph = Paragraph {
            content: Vec::new(),
            style: style.paragraph_style(line_spacing),
        };
        let run_style = style.text_style();
        let tab = self.options.tab_spaces();

        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                paragraph.add_line_break();
            }
            let line = line.trim_end_matches('\r');
            if !line.is_empty() {
                paragraph.add_run(TextRun::styled(line.replace('\t', &tab), run_style.clone()));
            }
        }
        paragraph
    }

    fn table(
        &self,
        index: usize,
        rows: &[Vec<String>],
        data: &ContractData,
        style: &ResolvedStyle,
        line_spacing: u32,
    ) -> Result<Table> {
        if rows.is_empty() {
            return Err(Error::Serialization(format!(
                "table block {} has no rows",
                index
            )));
        }

        let mut table = Table::new();
        for (row_index, row) in rows.iter().enumerate() {
            if row.is_empty() {
                return Err(Error::Serialization(format!(
                    "table block {} row {} has no cells",
                    index, row_index
                )));
            }
            let cells = row
                .iter()
                .map(|text| self.cell(&self.resolver.resolve(text, data), style, line_spacing))
                .collect();
            table.add_row(TableRow::new(cells));
        }
        Ok(table)
    }

    /// One paragraph per line of the cell text, at least one per cell.
    fn cell(&self, text: &str, style: &ResolvedStyle, line_spacing: u32) -> TableCell {
        let mut paragraphs: Vec<Paragraph> = text
            .lines()
            .map(|line| self.paragraph(line, style, line_spacing))
            .collect();
        if paragraphs.is_empty() {
            paragraphs.push(self.paragraph("", style, line_spacing));
        }
        TableCell::with_content(paragraphs)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
