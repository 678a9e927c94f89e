use criterion::{Criterion, criterion_group, criterion_main};
use markdown_semdata_engine::{SemanticDataOptions, SemanticDataProcessor, to_html};
use pulldown_cmark::{Parser, html};
mod common;

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(10);

    let processor = SemanticDataProcessor::new(SemanticDataOptions::default()).unwrap();
    let annotated = common::generate_annotated_markdown(100);
    let plain = common::generate_plain_markdown(100);

    group.bench_function("pulldown_cmark_baseline", |b| {
        b.iter(|| {
            let mut out = String::new();
            html::push_html(&mut out, Parser::new(std::hint::black_box(&plain)));
            std::hint::black_box(out);
        });
    });

    group.bench_function("plain_document", |b| {
        b.iter(|| to_html(std::hint::black_box(&plain), &processor).unwrap());
    });

    group.bench_function("annotated_document", |b| {
        b.iter(|| to_html(std::hint::black_box(&annotated), &processor).unwrap());
    });

    group.finish();
}

fn bench_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    let processor = SemanticDataProcessor::new(SemanticDataOptions::default()).unwrap();
    let line = "%%dc:author :: Sherry Turkle | Turkle's%% %%dc:title::Second Self%% was an early book.";

    group.bench_function("process_inline", |b| {
        b.iter(|| processor.process_inline(0, std::hint::black_box(line)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_render, bench_inline);
criterion_main!(benches);
