//! Benchmarks for the cross-currency rate helpers.
//!
//! Run with: cargo bench -p xccy-curves

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use xccy_core::prelude::*;
use xccy_curves::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn today() -> Date {
    Date::from_ymd(2024, 1, 15).unwrap()
}

fn flat(rate: f64) -> Arc<dyn Curve> {
    Arc::new(FlatForwardCurve::new(today(), rate))
}

fn create_helper(tenor: Period, basis: f64, mtm: bool) -> CrossCurrencyBasisSwapRateHelper {
    let usd = flat(0.02);
    let usd_libor = Arc::new(
        IborIndex::new("USDLibor", Currency::USD, Period::months(3), 2, Arc::new(WeekendCalendar))
            .with_forecast_curve(Arc::clone(&usd)),
    );
    let euribor = Arc::new(IborIndex::euribor(Period::months(3)).with_forecast_curve(flat(0.03)));

    let mut config = XccyHelperConfig::default().with_tenor(tenor);
    if mtm {
        config.mark_to_market = Some(MarkToMarketConfig::default());
    }
    let spot: Arc<dyn Quote> = Arc::new(SimpleQuote::new(1.1));
    config
        .build(
            Arc::new(SimpleQuote::new(basis)),
            usd_libor,
            euribor,
            usd,
            Some(spot),
        )
        .unwrap()
}

// =============================================================================
// IMPLIED QUOTE BENCHMARKS
// =============================================================================

fn bench_implied_quote(c: &mut Criterion) {
    let mut group = c.benchmark_group("implied_quote");

    for (name, mtm) in [("constant", false), ("mtm", true)] {
        let mut helper = create_helper(Period::years(10), -0.0015, mtm);

        // Rebinding forces a full revaluation of both legs
        group.bench_with_input(BenchmarkId::new("stale", name), &(), |b, ()| {
            b.iter(|| {
                helper.set_term_structure(flat(0.028)).unwrap();
                black_box(helper.implied_quote().unwrap())
            });
        });

        helper.set_term_structure(flat(0.028)).unwrap();
        helper.implied_quote().unwrap();
        group.bench_with_input(BenchmarkId::new("cached", name), &(), |b, ()| {
            b.iter(|| black_box(helper.implied_quote().unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// BOOTSTRAP BENCHMARKS
// =============================================================================

fn bench_bootstrap(c: &mut Criterion) {
    let tenors = [1, 2, 3, 5, 7, 10, 15, 20, 30];
    let bootstrapper = PiecewiseBootstrapper::new(today());

    let mut group = c.benchmark_group("bootstrap");
    group.sample_size(20);

    for mtm in [false, true] {
        let label = if mtm { "mtm" } else { "constant" };
        group.bench_function(label, |b| {
            b.iter_batched(
                || {
                    tenors
                        .iter()
                        .map(|&y| {
                            Box::new(create_helper(Period::years(y), -0.0015, mtm))
                                as Box<dyn RateHelper>
                        })
                        .collect::<Vec<_>>()
                },
                |mut helpers| black_box(bootstrapper.bootstrap(&mut helpers).unwrap()),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(helpers, bench_implied_quote);
criterion_group!(bootstrap, bench_bootstrap);

criterion_main!(helpers, bootstrap);
