//! Dispatch engine benchmarks
//!
//! Measures the cost of the disabled-level short-circuit against full
//! dispatch through processors and a discarding handler.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_log_pipeline::prelude::*;
use std::sync::Arc;

fn bench_disabled_level_short_circuit(c: &mut Criterion) {
    let logger = Logger::new("bench");
    logger.push_handler(Arc::new(NullHandler::with_level(Level::Error)) as Arc<dyn Handler>);
    logger.push_processor(Arc::new(|record: LogRecord| {
        record.with_extra_value("enriched", true)
    }));

    c.bench_function("disabled_level_short_circuit", |b| {
        b.iter(|| {
            black_box(
                logger
                    .log(Level::Debug, black_box("skipped message"), Context::new())
                    .unwrap(),
            )
        })
    });
}

fn bench_full_dispatch(c: &mut Criterion) {
    let logger = Logger::new("bench");
    logger.push_handler(Arc::new(NullHandler::new()) as Arc<dyn Handler>);
    logger.push_processor(Arc::new(|record: LogRecord| {
        record.with_extra_value("enriched", true)
    }));

    c.bench_function("full_dispatch_to_null", |b| {
        b.iter(|| {
            black_box(
                logger
                    .log(Level::Info, black_box("delivered message"), Context::new())
                    .unwrap(),
            )
        })
    });
}

fn bench_fingers_crossed_buffering(c: &mut Criterion) {
    let logger = Logger::new("bench");
    logger.push_handler(Arc::new(FingersCrossedHandler::new(
        Arc::new(NullHandler::new()) as Arc<dyn Handler>,
        64,
    )) as Arc<dyn Handler>);

    c.bench_function("fingers_crossed_buffering", |b| {
        b.iter(|| {
            black_box(
                logger
                    .log(Level::Info, black_box("buffered message"), Context::new())
                    .unwrap(),
            )
        })
    });
}

fn bench_line_formatting(c: &mut Criterion) {
    let formatter = LineFormatter::new();
    let record = LogRecord::new(
        "bench",
        Level::Info,
        "formatted message",
        Context::new(),
        chrono::Utc::now().fixed_offset(),
    )
    .with_context_value("user", "bob")
    .with_extra_value("hostname", "web-1");

    c.bench_function("line_formatting", |b| {
        b.iter(|| black_box(formatter.format(black_box(&record)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_disabled_level_short_circuit,
    bench_full_dispatch,
    bench_fingers_crossed_buffering,
    bench_line_formatting
);
criterion_main!(benches);
