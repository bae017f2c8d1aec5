//! Plain text preview of an assembled contract.

use crate::model::{Block, Document, Table};

/// Convert a document to plain text.
///
/// Paragraphs are separated by a blank line. Table columns are padded to a
/// common width and separated by two spaces; multi-line cells spread over
/// several text lines.
pub fn to_text(doc: &Document) -> String {
    let mut output = String::new();
    for block in &doc.blocks {
        let text = match block {
            Block::Paragraph(p) => p.plain_text(),
            Block::Table(t) => table_text(t),
        };
        if !output.is_empty() {
            output.push_str("\n\n");
        }
        output.push_str(text.trim_end());
    }
    output.trim().to_string()
}

fn table_text(table: &Table) -> String {
    let columns = table.column_count();
    let cells: Vec<Vec<Vec<String>>> = table
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| cell.plain_text().lines().map(str::to_string).collect())
                .collect()
        })
        .collect();

    let mut widths = vec![0usize; columns];
    for row in &cells {
        for (col, lines) in row.iter().enumerate() {
            let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            widths[col] = widths[col].max(widest);
        }
    }

    let mut lines = Vec::new();
    for row in &cells {
        let height = row.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for i in 0..height {
            let line = row
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let text = cell.get(i).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", text, width = widths[col])
                })
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(line.trim_end().to_string());
        }
    }
    lines.join("\n")
}
