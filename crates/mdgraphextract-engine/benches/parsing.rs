use criterion::{Criterion, criterion_group, criterion_main};
use mdgraphextract_engine::{ExtractOptions, MdParser, extract_str};
mod common;

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    group.bench_function("md_parser", |b| {
        b.iter(|| {
            let parser = MdParser::from_text(std::hint::black_box(content.as_str()));
            let events: Vec<_> = parser.collect();
            std::hint::black_box(events);
        });
    });

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    group.sample_size(10);

    let content = common::generate_linked_sections(200);
    let auto = ExtractOptions::default();
    let dotex = ExtractOptions::dotex();

    group.bench_function("autograph", |b| {
        b.iter(|| std::hint::black_box(extract_str(std::hint::black_box(&content), &auto)));
    });
    group.bench_function("dotex", |b| {
        b.iter(|| std::hint::black_box(extract_str(std::hint::black_box(&content), &dotex)));
    });

    group.finish();
}

criterion_group!(benches, bench_parser, bench_extract);
criterion_main!(benches);
