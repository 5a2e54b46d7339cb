//! Benchmarks for stain normalization.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use stain_color::convert::{encode_perceptual, to_display, to_perceptual};
use stain_color::lab::{lab8_to_rgb8, rgb8_to_lab8};
use stain_core::ImageData;
use stain_norm::remap::{quantize, remap_channels};
use stain_norm::{ChannelStats, StainNormalization};

fn tile(size: u32) -> ImageData {
    let data: Vec<u8> = (0..size * size * 3)
        .map(|i| (128 + (i * 37) % 120) as u8)
        .collect();
    ImageData::from_u8(size, size, 3, data).unwrap()
}

/// Benchmark per-pixel Lab conversion.
fn bench_pixel(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixel");

    group.bench_function("rgb8_to_lab8", |b| {
        b.iter(|| rgb8_to_lab8(black_box([180, 90, 160])))
    });

    group.bench_function("lab8_to_rgb8", |b| {
        b.iter(|| lab8_to_rgb8(black_box([131, 174, 106])))
    });

    group.finish();
}

/// Benchmark whole-buffer conversion.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for size in [64u32, 256, 1024] {
        let rgb = tile(size).as_u8().unwrap().to_vec();
        let lab = encode_perceptual(&rgb);

        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("to_perceptual", size), &rgb, |b, v| {
            b.iter(|| to_perceptual(black_box(v)))
        });

        group.bench_with_input(BenchmarkId::new("to_display", size), &lab, |b, v| {
            b.iter(|| to_display(black_box(v)))
        });
    }

    group.finish();
}

/// Benchmark statistics and remapping on perceptual buffers.
fn bench_remap(c: &mut Criterion) {
    let mut group = c.benchmark_group("remap");

    let lab = to_perceptual(tile(512).as_u8().unwrap());
    let source = ChannelStats::compute(&lab);
    let target = ChannelStats {
        mean: [180.0, 155.5, 114.5],
        std: [49.0, 18.5, 8.5],
    };
    group.throughput(Throughput::Elements((lab.len() / 3) as u64));

    group.bench_function("channel_stats", |b| {
        b.iter(|| ChannelStats::compute(black_box(&lab)))
    });

    group.bench_function("remap_quantize", |b| {
        b.iter(|| quantize(&remap_channels(black_box(&lab), &source, &target)))
    });

    group.finish();
}

/// Benchmark the full transform.
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    group.sample_size(20);

    let normalizer = StainNormalization::new(&tile(256)).unwrap();

    for size in [256u32, 1024] {
        let image = tile(size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("reinhard", size), &image, |b, img| {
            b.iter(|| normalizer.transform(black_box(img)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pixel, bench_convert, bench_remap, bench_transform);
criterion_main!(benches);
