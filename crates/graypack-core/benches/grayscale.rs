//! Benchmarks for the Graypack conversion pipeline.
//!
//! Run with: cargo bench -p graypack-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use graypack_core::{pipeline::grayscale, PixelBuffer, PngCodec};

fn rgba_buffer(width: u32, height: u32) -> PixelBuffer {
    let data: Vec<u8> = (0..width as usize * height as usize * 4)
        .map(|i| (i % 251) as u8)
        .collect();
    PixelBuffer::new(width, height, data).unwrap()
}

fn benchmark_grayscale_transform(c: &mut Criterion) {
    let buffer = rgba_buffer(1920, 1080);

    c.bench_function("grayscale_1080p", |b| {
        b.iter_batched(
            || buffer.clone(),
            |mut buf| grayscale::apply(black_box(&mut buf)),
            criterion::BatchSize::LargeInput,
        )
    });
}

fn benchmark_codec_round_trip(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.png");
    PngCodec::encode(&rgba_buffer(512, 512), &path).unwrap();

    c.bench_function("decode_512", |b| {
        b.iter(|| {
            let _ = PngCodec::decode(black_box(&path));
        })
    });
}

criterion_group!(
    benches,
    benchmark_grayscale_transform,
    benchmark_codec_round_trip
);
criterion_main!(benches);
