//! End-to-end tests: sale records in, contract files out.

use chrono::NaiveDate;
use saledoc::{
    generate_document, Block, ContractData, ContractGenerator, ContractInput, ContractSink,
    DirectorySink, Error, OutputFormat, RenderOptions, Template, TemplateBlock,
};
use std::io::{Cursor, Read};

const SALE_JSON: &str = r#"{
    "breeder": {
        "breeder_name": "Jo Smith",
        "kennel_name": "Iron Bully Kennels",
        "address_line1": "12 Kennel Rd",
        "city": "Austin",
        "state": "TX",
        "jurisdiction_state": "Texas",
        "jurisdiction_county": "Travis"
    },
    "client": {
        "name": "Sam Lee",
        "address_line1": "1 Elm St",
        "city": "Dallas",
        "state": "TX",
        "postal_code": "75001",
        "email": "sam@example.com"
    },
    "dog": { "name": "Tank", "sex": "M", "date_of_birth": "2025-09-01" },
    "terms": {
        "sale_id": "a1b2c3d4-e5f6-7890",
        "sale_date": "2025-12-10",
        "price": 2500,
        "deposit": 500,
        "male_count": 1,
        "female_count": 0,
        "registration_type": "pet"
    },
    "sire": { "name": "Duke" },
    "dam": { "name": "Daisy" }
}"#;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()
}

fn input() -> ContractInput {
    ContractInput::from_json(SALE_JSON).unwrap()
}

fn document_xml(docx: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut part = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn test_consideration_scenario() {
    let data = input().to_contract_data();
    assert_eq!(data.sale_price_amount, "2500.00");
    assert_eq!(data.puppy_count, 1);

    let bytes = generate_document(&data).unwrap();
    assert!(bytes.starts_with(b"PK"));

    let xml = document_xml(&bytes);
    assert!(xml.contains("$2500.00"));
    assert!(xml.contains("Two Thousand Five Hundred Dollars and no cents"));
    assert!(xml.contains("1 male 0 female"));
    assert!(xml.contains("Born on September 1, 2025"));
    assert!(xml.contains("State of Texas, County of Travis"));
    assert!(xml.contains("IRON BULLY KENNELS"));
}

#[test]
fn test_generation_is_idempotent() {
    let data = input().to_contract_data();
    let generator = ContractGenerator::new().unwrap();
    assert_eq!(generator.render(&data).unwrap(), generator.render(&data).unwrap());
    assert_eq!(generator.assemble(&data).unwrap(), generator.assemble(&data).unwrap());
}

#[test]
fn test_one_node_per_template_block() {
    let generator = ContractGenerator::new().unwrap();
    let template = generator.template();
    let doc = generator.assemble(&input().to_contract_data()).unwrap();

    assert_eq!(doc.block_count(), template.blocks().len());
    for (block, node) in template.blocks().iter().zip(&doc.blocks) {
        match block {
            TemplateBlock::Paragraph { .. } => assert!(matches!(node, Block::Paragraph(_))),
            TemplateBlock::Table { .. } => assert!(matches!(node, Block::Table(_))),
        }
    }
}

#[test]
fn test_empty_record_produces_complete_document() {
    let generator = ContractGenerator::new().unwrap();
    let doc = generator.assemble(&ContractData::default()).unwrap();
    assert_eq!(doc.block_count(), generator.template().blocks().len());
    assert!(generate_document(&ContractData::default()).is_ok());
}

#[test]
fn test_pet_and_full_rights_clauses() {
    let generator = ContractGenerator::new()
        .unwrap()
        .with_format(OutputFormat::Text);

    let pet = String::from_utf8(generator.render(&input().to_contract_data()).unwrap()).unwrap();
    assert!(pet.contains("The puppy is sold as a pet"));
    assert!(!pet.contains("The puppy is sold with breeding rights"));

    let json = SALE_JSON.replace("\"pet\"", "\"full_rights\"");
    let full = ContractInput::from_json(&json).unwrap().to_contract_data();
    let full = String::from_utf8(generator.render(&full).unwrap()).unwrap();
    assert!(!full.contains("The puppy is sold as a pet"));
    assert!(full.contains("The puppy is sold with breeding rights"));
}

#[test]
fn test_payment_clause_amounts() {
    let generator = ContractGenerator::new()
        .unwrap()
        .with_format(OutputFormat::Text);
    let text = String::from_utf8(generator.render(&input().to_contract_data()).unwrap()).unwrap();

    assert!(text.contains(
        "A non-refundable deposit of $500.00 holds the puppy. \
         The remaining balance of $2,000.00 is due at or before pickup."
    ));
    assert!(text.contains("leaves the care of Iron Bully Kennels."));
    assert!(!text.contains("$$"));
}

#[test]
fn test_custom_template_landscape() {
    let template = Template::from_json(
        r#"{
            "page_settings": { "page_size": "letter", "orientation": "landscape" },
            "styles": { "normal": { "font_size": 11 } },
            "blocks": [
                { "type": "paragraph", "text": "Sire: ____" },
                { "type": "table", "rows": [["Buyer: {buyerName}", ""]] }
            ]
        }"#,
    )
    .unwrap();

    let generator = ContractGenerator::with_template(&template);
    let doc = generator.assemble(&input().to_contract_data()).unwrap();
    assert_eq!(doc.geometry.width, 15840);
    assert_eq!(doc.geometry.height, 12240);
    assert_eq!(doc.blocks[0].plain_text(), "Sire: Duke");
    assert_eq!(doc.blocks[1].plain_text(), "Buyer: Sam Lee\t");
}

#[test]
fn test_structural_violation_is_fatal() {
    let template = Template::from_json(
        r#"{ "blocks": [ { "type": "paragraph", "text": "ok" }, { "type": "table", "rows": [[]] } ] }"#,
    )
    .unwrap();
    let err = ContractGenerator::with_template(&template)
        .render(&ContractData::default())
        .unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
    assert!(!err.is_retryable());
}

#[test]
fn test_generate_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let contract = ContractGenerator::new()
        .unwrap()
        .generate_input(&input(), date())
        .unwrap();
    assert_eq!(contract.filename, "Contract_Sam_Lee-a1b2c3d4_2025-12-10.docx");

    let path = DirectorySink::new(dir.path()).save(&contract).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), contract.bytes);
}

#[test]
fn test_json_and_text_outputs() {
    let data = input().to_contract_data();
    let json = ContractGenerator::new()
        .unwrap()
        .with_options(RenderOptions::new().with_format(OutputFormat::Json))
        .generate(&data, date())
        .unwrap();
    assert!(json.filename.ends_with(".json"));
    let value: serde_json::Value = serde_json::from_slice(&json.bytes).unwrap();
    assert!(value["blocks"].is_array());

    let text = ContractGenerator::new()
        .unwrap()
        .with_format(OutputFormat::Text)
        .render(&data)
        .unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.starts_with("CONTRACT OF SALE"));
}

#[test]
fn test_batch_generation() {
    let json = format!("[{}, {}]", SALE_JSON, SALE_JSON.replace("Sam Lee", "Ann Roe"));
    let inputs = ContractInput::list_from_json(&json).unwrap();
    let results = ContractGenerator::new().unwrap().generate_batch(&inputs, date());

    assert_eq!(results.len(), 2);
    let names: Vec<_> = results.iter().map(|r| r.as_ref().unwrap().filename.clone()).collect();
    assert_eq!(names[0], "Contract_Sam_Lee-a1b2c3d4_2025-12-10.docx");
    assert_eq!(names[1], "Contract_Ann_Roe-a1b2c3d4_2025-12-10.docx");
}
