//! Benchmarks for contract generation.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure resolution, assembly and serialization against
//! the bundled template.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use saledoc::{ContractData, ContractGenerator, ContractInput, OutputFormat};

/// Creates a sale input with a distinct client name.
fn create_test_input(index: usize) -> ContractInput {
    let json = format!(
        r#"{{
            "breeder": {{ "breeder_name": "Jo Smith", "kennel_name": "Iron Bully Kennels",
                          "jurisdiction_state": "Texas", "jurisdiction_county": "Travis" }},
            "client": {{ "name": "Client {}", "address_line1": "1 Elm St", "city": "Dallas" }},
            "dog": {{ "name": "Tank", "sex": "M", "date_of_birth": "2025-09-01" }},
            "terms": {{ "sale_id": "sale-{:08}", "sale_date": "2025-12-10", "price": 2500,
                        "deposit": 500, "male_count": 1 }},
            "sire": {{ "name": "Duke" }},
            "dam": {{ "name": "Daisy" }}
        }}"#,
        index, index
    );
    ContractInput::from_json(&json).unwrap()
}

/// Benchmark building the flat record.
fn bench_contract_data(c: &mut Criterion) {
    let input = create_test_input(0);

    c.bench_function("build_contract_data", |b| {
        b.iter(|| black_box(&input).to_contract_data());
    });
}

/// Benchmark assembly alone and with each serializer.
fn bench_generation(c: &mut Criterion) {
    let data: ContractData = create_test_input(0).to_contract_data();
    let mut group = c.benchmark_group("generation");

    let generator = ContractGenerator::new().unwrap();
    group.bench_function("assemble", |b| {
        b.iter(|| generator.assemble(black_box(&data)).unwrap());
    });

    for format in [OutputFormat::Docx, OutputFormat::Json, OutputFormat::Text] {
        let generator = ContractGenerator::new().unwrap().with_format(format);
        group.bench_function(format.extension(), |b| {
            b.iter(|| generator.render(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark parallel batch generation.
fn bench_batch(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
    let generator = ContractGenerator::new().unwrap();
    let mut group = c.benchmark_group("batch");

    for count in [10, 50].iter() {
        let inputs: Vec<_> = (0..*count).map(create_test_input).collect();

        group.bench_function(format!("{}_contracts", count), |b| {
            b.iter(|| generator.generate_batch(black_box(&inputs), date));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_contract_data, bench_generation, bench_batch);
criterion_main!(benches);
