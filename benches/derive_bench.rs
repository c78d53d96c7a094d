use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::{json, Value};

use bioc_corpus_server::corpus::RawCorpus;
use bioc_corpus_server::derive::{extract_dashboard, AuthorName};
use bioc_corpus_server::index::build_publication_index;
use bioc_corpus_server::store::CorpusSnapshot;

fn sample_document(i: usize) -> Value {
    json!({
        "id": format!("D{}", i),
        "infons": {"article-id_pmc": format!("PMC{}", i)},
        "passages": [
            {"offset": 0, "text": format!("Title {}", i), "infons": {
                "section_type": "TITLE",
                "year": format!("{}", 2000 + i % 20),
                "journal-title": format!("Journal {}", i % 7),
                "name_0": format!("surname:Author{};given-names:A.", i % 50),
                "name_1": "surname:Lee;given-names:B.",
            }},
            {"offset": 20, "text": "An abstract.", "infons": {"section_type": "ABSTRACT"}},
            {"offset": 40, "text": "Introduction text.", "infons": {"section_type": "INTRO"}},
            {"offset": 80, "text": "Methods text.", "infons": {"section_type": "METHODS"}},
        ]
    })
}

fn sample_corpus(files: usize, docs_per_file: usize) -> RawCorpus {
    let mut raw = RawCorpus::new();
    for f in 0..files {
        let docs: Vec<Value> = (0..docs_per_file)
            .map(|d| sample_document(f * docs_per_file + d))
            .collect();
        raw.insert(format!("file{}.json", f), json!([{"documents": docs}]));
    }
    raw
}

fn bench_author_parse(c: &mut Criterion) {
    let samples = vec![
        "surname:Lee;given-names:A.",
        "given-names:Maria José;surname:García",
        "surname:OnlySurname",
        "collab:Consortium",
    ];

    let mut group = c.benchmark_group("authors");
    group.throughput(Throughput::Elements(samples.len() as u64));
    group.bench_function("parse", |b| {
        b.iter(|| {
            for sample in &samples {
                black_box(AuthorName::parse(sample).display());
            }
        })
    });
    group.finish();
}

fn bench_derivation(c: &mut Criterion) {
    let raw = sample_corpus(8, 500);
    let one_file = raw.values().next().cloned().unwrap_or(Value::Null);

    let mut group = c.benchmark_group("derive");
    group.sample_size(20);

    group.bench_function("dashboard_one_file", |b| {
        b.iter(|| black_box(extract_dashboard(&one_file)))
    });

    group.bench_function("publication_index", |b| {
        b.iter(|| black_box(build_publication_index(&raw)))
    });

    group.bench_function("full_snapshot", |b| {
        b.iter(|| black_box(CorpusSnapshot::build(raw.clone(), 1)))
    });

    group.finish();
}

criterion_group!(benches, bench_author_parse, bench_derivation);
criterion_main!(benches);
