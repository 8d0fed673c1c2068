//! Benchmarks for breakpoint activation in floem_media.
//!
//! These benchmarks measure the performance of:
//! - Re-resolving every element key when a breakpoint toggles
//! - Activations that leave every effective value unchanged
//! - Print start and end over a populated marshaller
//!
//! Run with: cargo bench --bench update_styles

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use floem_media::{Binding, MediaChange, MediaConfig, MediaMarshaller, PRINT};

const KEYS: [&str; 4] = ["flex-direction", "gap", "grid-columns", "order"];

/// A marshaller with `n` elements, each with every key bound and valued at base, `md` and
/// `gt-sm`.
fn populated(n: usize, config: &MediaConfig) -> MediaMarshaller<u32> {
    let marshaller = MediaMarshaller::new(config);
    for i in 0..n as u32 {
        let el = marshaller.create_element();
        for key in KEYS {
            marshaller
                .init(el, key, Binding::new(|value: &u32| {
                    black_box(value);
                }))
                .unwrap();
            marshaller.set_value(el, key, i, "").unwrap();
            marshaller.set_value(el, key, i + 1, "md").unwrap();
            marshaller.set_value(el, key, i + 2, "gt-sm").unwrap();
        }
    }
    marshaller
}

fn query(marshaller: &MediaMarshaller<u32>, alias: &str) -> String {
    marshaller
        .registry()
        .find_by_alias(alias)
        .unwrap()
        .media_query
        .clone()
}

fn bench_toggle_breakpoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle_breakpoint");

    for size in [10, 100, 1000].iter() {
        let marshaller = populated(*size, &MediaConfig::default());
        let md = query(&marshaller, "md");
        group.bench_with_input(BenchmarkId::new("activate_deactivate", size), size, |b, _| {
            b.iter(|| {
                marshaller.dispatch(MediaChange::activated(md.clone()));
                marshaller.dispatch(MediaChange::deactivated(md.clone()));
            });
        });
    }

    group.finish();
}

fn bench_unchanged_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("unchanged_values");

    for size in [10, 100, 1000].iter() {
        let marshaller = populated(*size, &MediaConfig::default());
        marshaller.dispatch(MediaChange::activated(query(&marshaller, "md")));
        let lt_lg = query(&marshaller, "lt-lg");
        group.bench_with_input(BenchmarkId::new("shadowed_activation", size), size, |b, _| {
            b.iter(|| {
                marshaller.dispatch(MediaChange::activated(lt_lg.clone()));
                marshaller.dispatch(MediaChange::deactivated(lt_lg.clone()));
                black_box(marshaller.stats());
            });
        });
    }

    group.finish();
}

fn bench_print_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("print_cycle");

    for size in [10, 100, 1000].iter() {
        let marshaller = populated(*size, &MediaConfig::new().print_with("md"));
        marshaller.dispatch(MediaChange::activated(query(&marshaller, "gt-sm")));
        group.bench_with_input(BenchmarkId::new("start_stop", size), size, |b, _| {
            b.iter(|| {
                marshaller.dispatch(MediaChange::activated(PRINT));
                marshaller.dispatch(MediaChange::deactivated(PRINT));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_toggle_breakpoint,
    bench_unchanged_values,
    bench_print_cycle,
);
criterion_main!(benches);
