//! Office Open XML (.docx) serialization.
//!
//! The package holds the minimum part set Word and LibreOffice need: the
//! main document, a style sheet with document defaults, core properties and
//! the relationship parts tying them together. Entry timestamps are fixed
//! and no creation dates are written, so the same document always produces
//! the same bytes.

use crate::error::{Error, Result};
use crate::model::{
    Alignment, Block, Document, InlineContent, Metadata, Orientation, Paragraph, Table,
    TextStyle,
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const NS_DC: &str = "http://purl.org/dc/elements/1.1/";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";

/// Space after each paragraph, in twips.
const PARAGRAPH_SPACING_AFTER: u32 = 120;

/// Serialize a document to .docx bytes.
pub fn to_docx(doc: &Document) -> Result<Vec<u8>> {
    let parts: [(&str, Vec<u8>); 6] = [
        ("[Content_Types].xml", content_types_xml()?),
        ("_rels/.rels", package_rels_xml()?),
        ("docProps/core.xml", core_xml(&doc.metadata)?),
        ("word/_rels/document.xml.rels", document_rels_xml()?),
        ("word/styles.xml", styles_xml(doc)?),
        ("word/document.xml", document_xml(doc)?),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in parts {
        zip.start_file(name, entry_options())?;
        zip.write_all(&bytes)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Deflated entries stamped with the fixed DOS epoch.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

/// Thin wrapper over the quick-xml writer that maps its errors.
struct Xml {
    writer: Writer<Vec<u8>>,
}

impl Xml {
    fn new() -> Result<Self> {
        let mut xml = Self {
            writer: Writer::new(Vec::new()),
        };
        xml.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(xml)
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::Serialization(format!("XML write error: {}", e)))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Start(element(name, attrs)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Empty(element(name, attrs)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.write(Event::Text(BytesText::new(text)))
    }

    /// `<name attrs>text</name>`
    fn leaf(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut el = BytesStart::new(name);
    for &(key, value) in attrs {
        el.push_attribute((key, value));
    }
    el
}

/// Drop characters XML 1.0 cannot carry.
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

fn content_types_xml() -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    for (part, content_type) in [
        ("/word/document.xml", CT_DOCUMENT),
        ("/word/styles.xml", CT_STYLES),
        ("/docProps/core.xml", CT_CORE),
    ] {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    xml.end("Types")?;
    Ok(xml.finish())
}

fn relationships_xml(rels: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start("Relationships", &[("xmlns", NS_PKG_REL)])?;
    for &(id, kind, target) in rels {
        xml.empty(
            "Relationship",
            &[("Id", id), ("Type", kind), ("Target", target)],
        )?;
    }
    xml.end("Relationships")?;
    Ok(xml.finish())
}

fn package_rels_xml() -> Result<Vec<u8>> {
    relationships_xml(&[
        ("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
        ("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
    ])
}

fn document_rels_xml() -> Result<Vec<u8>> {
    relationships_xml(&[("rId1", REL_STYLES, "styles.xml")])
}

fn core_xml(metadata: &Metadata) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start("cp:coreProperties", &[("xmlns:cp", NS_CORE), ("xmlns:dc", NS_DC)])?;
    let fields = [
        ("dc:title", &metadata.title),
        ("dc:subject", &metadata.subject),
        ("dc:creator", &metadata.creator),
        ("cp:keywords", &metadata.keywords),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            xml.leaf(name, &[], &xml_safe(value))?;
        }
    }
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

fn styles_xml(doc: &Document) -> Result<Vec<u8>> {
    let size = doc.default_font_size.to_string();
    let line = doc.line_spacing.to_string();
    let after = PARAGRAPH_SPACING_AFTER.to_string();
    let font = doc.default_font.as_str();

    let mut xml = Xml::new()?;
    xml.start("w:styles", &[("xmlns:w", NS_MAIN)])?;

    xml.start("w:docDefaults", &[])?;
    xml.start("w:rPrDefault", &[])?;
    xml.start("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[("w:ascii", font), ("w:hAnsi", font), ("w:eastAsia", font), ("w:cs", font)],
    )?;
    xml.empty("w:sz", &[("w:val", size.as_str())])?;
    xml.empty("w:szCs", &[("w:val", size.as_str())])?;
    xml.end("w:rPr")?;
    xml.end("w:rPrDefault")?;
    xml.start("w:pPrDefault", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty(
        "w:spacing",
        &[("w:after", after.as_str()), ("w:line", line.as_str()), ("w:lineRule", "auto")],
    )?;
    xml.end("w:pPr")?;
    xml.end("w:pPrDefault")?;
    xml.end("w:docDefaults")?;

    xml.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.empty("w:name", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;
    xml.end("w:style")?;

    xml.start(
        "w:style",
        &[("w:type", "table"), ("w:default", "1"), ("w:styleId", "TableNormal")],
    )?;
    xml.empty("w:name", &[("w:val", "Normal Table")])?;
    xml.start("w:tblPr", &[])?;
    xml.start("w:tblCellMar", &[])?;
    for (side, width) in [("w:top", "0"), ("w:left", "108"), ("w:bottom", "0"), ("w:right", "108")] {
        xml.empty(side, &[("w:w", width), ("w:type", "dxa")])?;
    }
    xml.end("w:tblCellMar")?;
    xml.end("w:tblPr")?;
    xml.end("w:style")?;

    xml.end("w:styles")?;
    Ok(xml.finish())
}

fn document_xml(doc: &Document) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start("w:document", &[("xmlns:w", NS_MAIN), ("xmlns:r", NS_REL)])?;
    xml.start("w:body", &[])?;

    let content_width = doc.geometry.content_width();
    for block in &doc.blocks {
        match block {
            Block::Paragraph(p) => write_paragraph(&mut xml, p)?,
            Block::Table(t) => write_table(&mut xml, t, content_width)?,
        }
    }

    write_section(&mut xml, doc)?;
    xml.end("w:body")?;
    xml.end("w:document")?;
    Ok(xml.finish())
}

fn jc_value(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

fn write_paragraph(xml: &mut Xml, paragraph: &Paragraph) -> Result<()> {
    xml.start("w:p", &[])?;

    xml.start("w:pPr", &[])?;
    if let Some(line) = paragraph.style.line_spacing {
        xml.empty(
            "w:spacing",
            &[("w:line", line.to_string().as_str()), ("w:lineRule", "auto")],
        )?;
    }
    xml.empty("w:jc", &[("w:val", jc_value(paragraph.style.alignment))])?;
    xml.end("w:pPr")?;

    // Line breaks carry the style of the run before them so the break keeps
    // the line height of the surrounding text.
    let mut last_style: Option<&TextStyle> = None;
    for item in &paragraph.content {
        match item {
            InlineContent::Text(run) => {
                xml.start("w:r", &[])?;
                write_run_properties(xml, &run.style)?;
                xml.leaf("w:t", &[("xml:space", "preserve")], &xml_safe(&run.text))?;
                xml.end("w:r")?;
                last_style = Some(&run.style);
            }
            InlineContent::LineBreak => {
                xml.start("w:r", &[])?;
                if let Some(style) = last_style {
                    write_run_properties(xml, style)?;
                }
                xml.empty("w:br", &[])?;
                xml.end("w:r")?;
            }
        }
    }

    xml.end("w:p")
}

fn write_run_properties(xml: &mut Xml, style: &TextStyle) -> Result<()> {
    if !style.has_styling() && style.font_name.is_none() && style.font_size.is_none() {
        return Ok(());
    }
    xml.start("w:rPr", &[])?;
    if let Some(font) = style.font_name.as_deref() {
        xml.empty(
            "w:rFonts",
            &[("w:ascii", font), ("w:hAnsi", font), ("w:cs", font)],
        )?;
    }
    if style.bold {
        xml.empty("w:b", &[])?;
    }
    if style.italic {
        xml.empty("w:i", &[])?;
    }
    if let Some(size) = style.font_size {
        let size = size.to_string();
        xml.empty("w:sz", &[("w:val", size.as_str())])?;
        xml.empty("w:szCs", &[("w:val", size.as_str())])?;
    }
    if style.underline {
        xml.empty("w:u", &[("w:val", "single")])?;
    }
    xml.end("w:rPr")
}

fn write_table(xml: &mut Xml, table: &Table, content_width: u32) -> Result<()> {
    let columns = table.column_count();
    if columns == 0 {
        return Err(Error::Serialization("table has no cells".to_string()));
    }
    let column_width = content_width / columns as u32;
    let column_width_text = column_width.to_string();

    xml.start("w:tbl", &[])?;

    xml.start("w:tblPr", &[])?;
    xml.empty(
        "w:tblW",
        &[("w:w", (column_width * columns as u32).to_string().as_str()), ("w:type", "dxa")],
    )?;
    xml.start("w:tblBorders", &[])?;
    for side in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        xml.empty(
            side,
            &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", "auto")],
        )?;
    }
    xml.end("w:tblBorders")?;
    xml.empty("w:tblLayout", &[("w:type", "fixed")])?;
    xml.end("w:tblPr")?;

    xml.start("w:tblGrid", &[])?;
    for _ in 0..columns {
        xml.empty("w:gridCol", &[("w:w", column_width_text.as_str())])?;
    }
    xml.end("w:tblGrid")?;

    for row in &table.rows {
        if row.cells.is_empty() {
            return Err(Error::Serialization("table row has no cells".to_string()));
        }
        xml.start("w:tr", &[])?;
        let last = row.cells.len() - 1;
        for (i, cell) in row.cells.iter().enumerate() {
            // A short row's last cell spans the remaining grid columns.
            let span = if i == last { columns - last } else { 1 };
            xml.start("w:tc", &[])?;
            xml.start("w:tcPr", &[])?;
            xml.empty(
                "w:tcW",
                &[("w:w", (column_width * span as u32).to_string().as_str()), ("w:type", "dxa")],
            )?;
            if span > 1 {
                xml.empty("w:gridSpan", &[("w:val", span.to_string().as_str())])?;
            }
            xml.end("w:tcPr")?;
            if cell.content.is_empty() {
                write_paragraph(xml, &Paragraph::new())?;
            }
            for paragraph in &cell.content {
                write_paragraph(xml, paragraph)?;
            }
            xml.end("w:tc")?;
        }
        xml.end("w:tr")?;
    }

    xml.end("w:tbl")
}

fn write_section(xml: &mut Xml, doc: &Document) -> Result<()> {
    let geometry = &doc.geometry;
    let width = geometry.width.to_string();
    let height = geometry.height.to_string();
    let margins = &geometry.margins;

    xml.start("w:sectPr", &[])?;
    let mut size: Vec<(&str, &str)> = vec![("w:w", width.as_str()), ("w:h", height.as_str())];
    if geometry.orientation == Orientation::Landscape {
        size.push(("w:orient", "landscape"));
    }
    xml.empty("w:pgSz", &size)?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", margins.top.to_string().as_str()),
            ("w:right", margins.right.to_string().as_str()),
            ("w:bottom", margins.bottom.to_string().as_str()),
            ("w:left", margins.left.to_string().as_str()),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.end("w:sectPr")
}
