//! Frame rendering benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gilo::document::{Document, Row};
use gilo::editor::ViewState;
use gilo::render::render_frame;
use gilo::terminal::WindowSize;

fn full_document(rows: usize, cols: usize) -> Document {
    (0..rows)
        .map(|i| Row::new(format!("{:>width$}", i, width = cols + 10).into_bytes()))
        .collect()
}

fn bench_render_empty(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for (cols, rows) in [(80u16, 24u16), (200, 60)] {
        let view = ViewState::new(WindowSize::new(cols, rows));
        let document = Document::empty();
        group.throughput(Throughput::Elements(u64::from(rows)));

        group.bench_function(format!("banner_{}x{}", cols, rows), |b| {
            b.iter(|| black_box(render_frame(black_box(&view), black_box(&document))))
        });
    }

    group.finish();
}

fn bench_render_full(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    // Every row filled and wider than the viewport, so each one is truncated
    for (cols, rows) in [(80u16, 24u16), (200, 60)] {
        let view = ViewState::new(WindowSize::new(cols, rows));
        let document = full_document(usize::from(rows), usize::from(cols));
        group.throughput(Throughput::Elements(u64::from(rows)));

        group.bench_function(format!("full_{}x{}", cols, rows), |b| {
            b.iter(|| black_box(render_frame(black_box(&view), black_box(&document))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render_empty, bench_render_full);

criterion_main!(benches);
