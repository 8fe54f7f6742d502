use criterion::{black_box, criterion_group, criterion_main, Criterion};
use monobox::AsyncBox;
use std::sync::mpsc;
use std::thread;

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("async_box");

    group.bench_function("ready_extract", |b| {
        b.iter(|| {
            let mut boxed = AsyncBox::ready(black_box(42_u64));
            black_box(boxed.extract_value().get().copied());
        })
    });

    group.bench_function("cooperative_extract", |b| {
        b.iter(|| {
            let mut boxed = AsyncBox::from_future(async { black_box(42_u64) });
            black_box(boxed.extract_value().get().copied());
        })
    });

    group.bench_function("worker_spawn_wait", |b| {
        b.iter(|| {
            let mut boxed = AsyncBox::spawn(|| black_box(42_u64));
            boxed.wait();
            black_box(boxed.extract_value().get().copied());
        })
    });

    group.bench_function("std_thread_channel", |b| {
        b.iter(|| {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                let _ = tx.send(black_box(42_u64));
            });
            black_box(rx.recv().ok());
        })
    });

    group.finish();
}

fn bench_memoized_reads(c: &mut Criterion) {
    let mut boxed = AsyncBox::spawn(|| vec![0_u8; 1024]);
    boxed.wait();
    boxed.extract_value();

    c.bench_function("async_box_cached_read", |b| {
        b.iter(|| black_box(boxed.extract_value().get().map(|v| v.len())))
    });
}

criterion_group!(benches, bench_backends, bench_memoized_reads);
criterion_main!(benches);
