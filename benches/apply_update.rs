use arbitrary::{Arbitrary, Unstructured};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rust_decimal::Decimal;
use ticklobe::{
    book::{BookView, OrderBook},
    common::Side,
    delta::Delta,
    tick,
};

const SAMPLE_SECS: u64 = 5;
const BUFLEN: usize = 256;
const BATCH_LEN: usize = 20;

#[derive(Arbitrary)]
struct RawDelta {
    withdraw: bool,
    lots: u16,
}

/// Diff-depth style batches clustered around a 100.00 mid
fn make_batches(n: usize) -> Vec<(Vec<Delta>, Vec<Delta>)> {
    let mut rng = StdRng::seed_from_u64(42); // Deterministic RNG for reproducibility
    let mut bytes = vec![0u8; BUFLEN];
    let mut delta = |rng: &mut StdRng, ticks: std::ops::Range<i64>| -> Delta {
        rng.fill_bytes(&mut bytes);
        let raw = RawDelta::arbitrary(&mut Unstructured::new(&bytes))
            .expect("Failed to generate instance");
        let quantity = if raw.withdraw {
            Decimal::ZERO
        } else {
            Decimal::new(i64::from(raw.lots) + 1, 3)
        };
        (Decimal::new(rng.gen_range(ticks), 2), quantity)
    };

    (0..n)
        .map(|_| {
            let bids: Vec<Delta> = (0..BATCH_LEN).map(|_| delta(&mut rng, 9_000..10_000)).collect();
            let asks: Vec<Delta> = (0..BATCH_LEN).map(|_| delta(&mut rng, 10_001..11_000)).collect();
            (bids, asks)
        })
        .collect()
}

fn apply_all(batches: &[(Vec<Delta>, Vec<Delta>)], book: &mut OrderBook) {
    for (bids, asks) in batches {
        book.apply_update(bids, asks);
    }
}

fn benchmark_apply_1000(c: &mut Criterion) {
    let batches = make_batches(black_box(1000));

    c.bench_function("apply 1000 batches", |b| {
        b.iter(|| {
            let mut book = OrderBook::new("BENCH");
            apply_all(&batches, &mut book)
        })
    });
}

fn benchmark_derive(c: &mut Criterion) {
    let mut book = OrderBook::new("BENCH");
    apply_all(&make_batches(10_000), &mut book);

    c.bench_function("derive tick", |b| b.iter(|| tick::derive(black_box(&book))));
    c.bench_function("top 10 bids", |b| {
        b.iter(|| black_box(&book).top_n(Side::Bid, 10))
    });
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .measurement_time(std::time::Duration::from_secs(SAMPLE_SECS))
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = benchmark_apply_1000, benchmark_derive,
}
criterion_main!(benches);
