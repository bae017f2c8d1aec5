//! # saledoc
//!
//! Sale agreement generation for dog-breeding records.
//!
//! A contract is produced from two inputs: a declarative JSON template
//! describing page settings, named styles and an ordered list of blocks,
//! and a flat [`ContractData`] record built from the breeder, client, dog
//! and sale records. Each block's literal text is resolved against the
//! record, assembled into a styled [`Document`] and serialized, normally as
//! a `.docx` file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use saledoc::{ContractGenerator, ContractInput};
//!
//! fn main() -> saledoc::Result<()> {
//!     let input = ContractInput::from_json(&std::fs::read_to_string("sale.json")?)?;
//!     let date = chrono::NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
//!
//!     let contract = ContractGenerator::new()?.generate_input(&input, date)?;
//!     std::fs::write(&contract.filename, &contract.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Dynamic clauses**: known clause openings are rewritten from the record
//! - **Inline tokens**: `((KENNEL NAME))`, `(____)` and `{fieldName}` markers
//! - **Legal formatting**: prices in words, ordinal signing dates
//! - **Deterministic output**: the same input always yields the same bytes
//! - **Batch generation**: many contracts in parallel over one template

pub mod assemble;
pub mod data;
pub mod error;
pub mod format;
pub mod model;
pub mod output;
pub mod render;
pub mod resolve;
pub mod template;

pub use assemble::DocumentAssembler;
pub use data::{
    build_contract_data, Address, BreederSettings, Client, ContractData, ContractInput, Dog,
    FieldValue, ParentDog, RegistrationType, SaleTerms,
};
pub use error::{Error, Result};
pub use model::{
    Alignment, Block, Document, InlineContent, Metadata, Orientation, PageGeometry, Paragraph,
    ParagraphStyle, Table, TableCell, TableRow, TextRun, TextStyle,
};
pub use output::{contract_filename, ContractSink, DirectorySink, GeneratedContract, OutputFormat};
pub use render::{JsonFormat, RenderOptions};
pub use resolve::{ContentResolver, DynamicRule, Matcher};
pub use template::{Template, TemplateBlock};

use chrono::NaiveDate;
use rayon::prelude::*;

/// Generate a `.docx` contract from a record using the bundled template.
///
/// # Example
///
/// ```no_run
/// use saledoc::{generate_document, ContractData};
///
/// let data = ContractData {
///     buyer_name: "Sam Lee".to_string(),
///     ..Default::default()
/// };
/// let bytes = generate_document(&data)?;
/// assert!(bytes.starts_with(b"PK"));
/// # Ok::<(), saledoc::Error>(())
/// ```
pub fn generate_document(data: &ContractData) -> Result<Vec<u8>> {
    generate_document_with_template(Template::bundled()?, data)
}

/// Generate a `.docx` contract from a record using `template`.
pub fn generate_document_with_template(template: &Template, data: &ContractData) -> Result<Vec<u8>> {
    let doc = ContractGenerator::with_template(template).assemble(data)?;
    render::to_docx(&doc)
}

/// Builder-style contract generator.
///
/// Holds a shared, read-only template together with the resolver and render
/// options. A generator is `Sync`; one instance can serve any number of
/// requests.
///
/// # Example
///
/// ```no_run
/// use saledoc::{ContractGenerator, ContractData, OutputFormat, RenderOptions};
///
/// let generator = ContractGenerator::new()?
///     .with_options(RenderOptions::new().with_format(OutputFormat::Text));
/// let preview = generator.render(&ContractData::default())?;
/// println!("{}", String::from_utf8_lossy(&preview));
/// # Ok::<(), saledoc::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ContractGenerator<'a> {
    template: &'a Template,
    resolver: ContentResolver,
    options: RenderOptions,
}

impl ContractGenerator<'static> {
    /// Create a generator for the bundled template.
    pub fn new() -> Result<Self> {
        Ok(Self::with_template(Template::bundled()?))
    }
}

impl<'a> ContractGenerator<'a> {
    /// Create a generator for `template`.
    pub fn with_template(template: &'a Template) -> Self {
        Self {
            template,
            resolver: ContentResolver::new(),
            options: RenderOptions::default(),
        }
    }

    /// Set render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the content resolver.
    pub fn with_resolver(mut self, resolver: ContentResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.options = self.options.with_format(format);
        self
    }

    /// The template in use.
    pub fn template(&self) -> &Template {
        self.template
    }

    /// The content resolver in use.
    pub fn resolver(&self) -> &ContentResolver {
        &self.resolver
    }

    /// The render options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Assemble the document tree for `data`.
    pub fn assemble(&self, data: &ContractData) -> Result<Document> {
        DocumentAssembler::new(self.template, &self.resolver, &self.options).assemble(data)
    }

    /// Assemble and serialize `data` in the configured format.
    pub fn render(&self, data: &ContractData) -> Result<Vec<u8>> {
        let doc = self.assemble(data)?;
        render::render(&doc, self.options.format, &self.options)
    }

    /// Render `data` and name the result. `date` goes into the filename.
    pub fn generate(&self, data: &ContractData, date: NaiveDate) -> Result<GeneratedContract> {
        let bytes = self.render(data)?;
        let sale_id = Some(data.sale_id.as_str()).filter(|id| !id.is_empty());
        Ok(GeneratedContract {
            filename: contract_filename(&data.buyer_name, sale_id, date, self.options.format),
            bytes,
            format: self.options.format,
        })
    }

    /// Build the record from domain input, then [`generate`](Self::generate).
    pub fn generate_input(&self, input: &ContractInput, date: NaiveDate) -> Result<GeneratedContract> {
        self.generate(&input.to_contract_data(), date)
    }

    /// Generate one contract per input in parallel.
    ///
    /// Results keep the input order; a failure affects only its own entry.
    pub fn generate_batch(
        &self,
        inputs: &[ContractInput],
        date: NaiveDate,
    ) -> Vec<Result<GeneratedContract>> {
        inputs
            .par_iter()
            .map(|input| self.generate_input(input, date))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()
    }

    fn data() -> ContractData {
        ContractData {
            buyer_name: "Sam Lee".to_string(),
            kennel_name: "Iron Bully Kennels".to_string(),
            sale_id: "abc12345-ffff".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_generator_builder() {
        let generator = ContractGenerator::new()
            .unwrap()
            .with_format(OutputFormat::Json)
            .with_options(RenderOptions::new().with_tab_width(2));

        // with_options replaces the whole option set, format included
        assert_eq!(generator.options().format, OutputFormat::Docx);
        assert_eq!(generator.options().tab_width, 2);
        assert!(!generator.resolver().rules().is_empty());
    }

    #[test]
    fn test_generate_names_contract() {
        let generator = ContractGenerator::new().unwrap();
        let contract = generator.generate(&data(), date()).unwrap();
        assert_eq!(contract.filename, "Contract_Sam_Lee-abc12345_2025-12-10.docx");
        assert!(contract.bytes.starts_with(b"PK"));
        assert_eq!(contract.format, OutputFormat::Docx);
    }

    #[test]
    fn test_text_format() {
        let generator = ContractGenerator::new().unwrap().with_format(OutputFormat::Text);
        let contract = generator.generate(&data(), date()).unwrap();
        assert!(contract.filename.ends_with(".txt"));
        let text = String::from_utf8(contract.bytes).unwrap();
        assert!(text.contains("IRON BULLY KENNELS"));
    }

    #[test]
    fn test_generate_document_matches_generator() {
        let bytes = generate_document(&data()).unwrap();
        let again = ContractGenerator::new().unwrap().render(&data()).unwrap();
        assert_eq!(bytes, again);
    }

    #[test]
    fn test_batch_preserves_order() {
        let inputs: Vec<ContractInput> = ["Ann", "Ben", "Cy"]
            .iter()
            .map(|name| ContractInput {
                client: Client {
                    name: Some(name.to_string()),
                    ..Default::default()
                },
                ..Default::default()
            })
            .collect();

        let results = ContractGenerator::new().unwrap().generate_batch(&inputs, date());
        let names: Vec<String> = results
            .into_iter()
            .map(|r| r.unwrap().filename)
            .collect();
        assert_eq!(
            names,
            [
                "Contract_Ann_2025-12-10.docx",
                "Contract_Ben_2025-12-10.docx",
                "Contract_Cy_2025-12-10.docx"
            ]
        );
    }
}
