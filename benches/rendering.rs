//! Benchmarks for slide rendering and the resize cache rebuild.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use topdeck::app::{Message, Model, update};
use topdeck::document::Document;
use topdeck::highlight::Background;
use topdeck::render::{MarkdownRenderer, SlideRenderer};

fn fixture() -> Document {
    Document::parse(include_bytes!("../tests/fixtures/deck.md")).unwrap()
}

fn bench_render_slide(c: &mut Criterion) {
    let doc = fixture();
    let renderer = MarkdownRenderer::new(Background::Dark, None).unwrap();
    let slide = doc.slide(1).unwrap().content().to_string();

    c.bench_function("render_code_slide", |b| {
        b.iter(|| renderer.render(black_box(&slide), black_box(72)).unwrap())
    });
}

fn bench_rebuild_cache(c: &mut Criterion) {
    let doc = std::sync::Arc::new(fixture());

    c.bench_function("rebuild_cache_on_resize", |b| {
        b.iter(|| {
            let renderer = MarkdownRenderer::new(Background::Dark, None).unwrap();
            let model = Model::new(std::sync::Arc::clone(&doc)).with_renderer(Some(Box::new(renderer)));
            update(model, Message::Resize(black_box(100), 30))
        })
    });
}

criterion_group!(benches, bench_render_slide, bench_rebuild_cache);
criterion_main!(benches);
