use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use truernd::{fill, get32, get64, is_supported, try_generate64};

fn bench_scalar(c: &mut Criterion) {
    if !is_supported() {
        eprintln!("hardware RNG not supported, skipping scalar benches");
        return;
    }

    let mut group = c.benchmark_group("scalar");

    group.bench_function("try_generate64", |b| b.iter(|| black_box(try_generate64())));

    group.bench_function("get32", |b| b.iter(|| get32().unwrap()));

    group.bench_function("get64", |b| b.iter(|| get64().unwrap()));

    group.finish();
}

fn bench_fill(c: &mut Criterion) {
    if !is_supported() {
        eprintln!("hardware RNG not supported, skipping fill benches");
        return;
    }

    let mut group = c.benchmark_group("fill");

    for len in [5usize, 256, 4096] {
        let mut buf = vec![0u8; len];
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| fill(black_box(&mut buf)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scalar, bench_fill);
criterion_main!(benches);
