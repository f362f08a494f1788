//! Benchmarks for the pooled codec.
//!
//! Run with:
//!     cargo bench -p codec-core

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use codec_core::{Codec, CodecConfig};

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    let codec = Codec::new(CodecConfig::default()).unwrap();

    for size in [64 * 1024, 1024 * 1024, 8 * 1024 * 1024] {
        // Deterministic, mildly compressible data
        let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(format!("pooled_{}kb", size / 1024), &data, |b, data| {
            b.iter(|| {
                let mut out = Vec::with_capacity(data.len() / 2);
                codec.compress(&mut &black_box(data)[..], &mut out).unwrap();
                black_box(out.len())
            });
        });

        // Fresh context per call, for comparison with pooling
        group.bench_with_input(format!("fresh_{}kb", size / 1024), &data, |b, data| {
            b.iter(|| {
                let out = zstd::stream::encode_all(&black_box(data)[..], zstd::DEFAULT_COMPRESSION_LEVEL).unwrap();
                black_box(out.len())
            });
        });
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    let codec = Codec::new(CodecConfig::default()).unwrap();
    let size = 4 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
    let packed = codec.compress_bytes(&data).unwrap();

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("pooled_4mb", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(size);
            codec.decompress(&mut &black_box(&packed)[..], &mut out).unwrap();
            black_box(out.len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
