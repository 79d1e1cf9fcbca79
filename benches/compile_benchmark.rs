//! Benchmarks for slidegen compilation performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks compile synthetic decks that mix every layout and the
//! common content kinds.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

/// Creates a synthetic deck with the given number of pages.
fn create_test_deck(page_count: usize) -> String {
    let layouts = ["grid", "two-column", "three-column", "component-grid", "full-width"];

    let pages: Vec<_> = (0..page_count)
        .map(|i| {
            json!({
                "title": format!("Slide {}", i + 1),
                "subtitle": "Benchmark content",
                "layout": layouts[i % layouts.len()],
                "gridConfig": { "columns": 12 },
                "content": [
                    {
                        "type": "text",
                        "content": {
                            "text": "Benchmark test content for slidegen layout measurement.\n\nSecond paragraph.",
                            "gridArea": { "columnStart": 1, "columnEnd": 6, "rowStart": 1, "rowEnd": 2 },
                            "position": "left"
                        }
                    },
                    {
                        "type": "table",
                        "content": {
                            "headers": ["Quarter", "Revenue", "Growth"],
                            "rows": [["Q1", 120, "4%"], ["Q2", 135, "12%"], ["Q3", 150, "11%"]],
                            "gridArea": { "columnStart": 7, "columnEnd": 12, "rowStart": 1, "rowEnd": 2 },
                            "position": "right"
                        }
                    },
                    {
                        "type": "chart",
                        "content": {
                            "chartData": { "type": "bar", "labels": ["a", "b", "c"], "values": [1, 2, 3] },
                            "gridArea": { "columnStart": 1, "columnEnd": 12, "rowStart": 3, "rowEnd": 4 }
                        }
                    },
                    { "type": "component", "content": { "componentId": "footer" } }
                ]
            })
        })
        .collect();

    json!({
        "presentation": {
            "metadata": { "title": "Benchmark", "author": "bench", "theme": "corporate" },
            "components": [
                { "id": "footer", "type": "text", "content": { "text": "ACME Corp" }, "style": { "fontSize": 10 } }
            ],
            "pages": pages
        }
    })
    .to_string()
}

/// Benchmark document parsing alone.
fn bench_document_parsing(c: &mut Criterion) {
    let json = create_test_deck(10);

    c.bench_function("parse_10_pages", |b| {
        b.iter(|| slidegen::Presentation::from_json_str(black_box(&json)).unwrap());
    });
}

/// Benchmark full compilation at various sizes.
fn bench_deck_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("deck_compilation");

    for page_count in [1, 10, 50].iter() {
        let json = create_test_deck(*page_count);
        let presentation = slidegen::Presentation::from_json_str(&json).unwrap();

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let compiler = slidegen::DeckCompiler::new(
                    black_box(&presentation),
                    slidegen::CompileOptions::default(),
                );
                compiler.compile()
            });
        });
    }

    group.finish();
}

/// Benchmark compilation plus JSON encoding.
fn bench_generate_json(c: &mut Criterion) {
    let json = create_test_deck(10);
    let presentation = slidegen::Presentation::from_json_str(&json).unwrap();
    let options = slidegen::CompileOptions::default();

    c.bench_function("generate_json_10_pages", |b| {
        b.iter(|| {
            let mut encoder = slidegen::JsonEncoder::compact();
            slidegen::generate(black_box(&presentation), &options, &mut encoder).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_document_parsing,
    bench_deck_compilation,
    bench_generate_json,
);
criterion_main!(benches);
