use std::fmt::Write;
use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use resolver_flags::{table, to_hex, FlagRegistry, UsageGroup};

fn sample_values(registry: &FlagRegistry) -> Vec<u64> {
    // Every declared value plus a few with unknown bits.
    let mut values: Vec<u64> = registry.list_flags().iter().map(|f| f.value()).collect();
    values.extend([0, 1 << 17, u64::MAX, table::SEARCH_BY_ATTRIBUTES_ALL | (1 << 50)]);
    values
}

fn bench_format(c: &mut Criterion) {
    let registry = FlagRegistry::builtin();
    let values = sample_values(registry);

    let mut group = c.benchmark_group("format");
    group.throughput(Throughput::Elements(values.len() as u64));

    group.bench_function("scoped_to_string", |b| {
        b.iter(|| {
            for &value in &values {
                black_box(registry.format(Some(value), Some(UsageGroup::Search)));
            }
        });
    });

    group.bench_function("unscoped_into_buffer", |b| {
        let mut out = String::with_capacity(1024);
        b.iter(|| {
            for &value in &values {
                out.clear();
                write!(out, "{}", registry.display(Some(value), None)).unwrap();
                black_box(&out);
            }
        });
    });

    group.finish();
}

fn bench_hex(c: &mut Criterion) {
    c.bench_function("hex/to_hex", |b| {
        b.iter(|| black_box(to_hex(black_box(0xdead_beef_cafe_f00d))));
    });
}

fn bench_groups_of_value(c: &mut Criterion) {
    let registry = FlagRegistry::builtin();
    let values = sample_values(registry);

    c.bench_function("groups_of_value", |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                for &value in &values {
                    black_box(registry.groups_of_value(value));
                }
            }
            start.elapsed()
        });
    });
}

fn bench_registry_build(c: &mut Criterion) {
    c.bench_function("registry/build_builtin_table", |b| {
        b.iter(|| black_box(FlagRegistry::try_builtin_table().unwrap()));
    });
}

criterion_group!(
    flags,
    bench_format,
    bench_hex,
    bench_groups_of_value,
    bench_registry_build
);
criterion_main!(flags);
