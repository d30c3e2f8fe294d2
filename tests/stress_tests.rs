//! Concurrency tests for shared loggers and stateful handlers
//!
//! These tests verify:
//! - Handlers serialize their own state when shared across threads
//! - Derived loggers (`with_name`) share one handler stack safely
//! - Buffer flush atomicity under concurrent producers

use rust_log_pipeline::prelude::*;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_logging_through_shared_logger() {
    let logger = Logger::new("stress");
    let handler = Arc::new(MemoryHandler::new());
    logger.push_handler(Arc::clone(&handler) as Arc<dyn Handler>);

    let threads: Vec<_> = (0..8)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    logger.info(format!("thread {} message {}", t, i)).unwrap();
                }
            })
        })
        .collect();

    for t in threads {
        t.join().expect("logging thread panicked");
    }

    assert_eq!(handler.len(), 800);
}

#[test]
fn test_derived_loggers_share_one_stack() {
    let base = Logger::new("stress");
    let handler = Arc::new(MemoryHandler::new());
    base.push_handler(Arc::clone(&handler) as Arc<dyn Handler>);

    let threads: Vec<_> = (0..4)
        .map(|t| {
            let derived = base.with_name(format!("stress.worker-{}", t));
            thread::spawn(move || {
                for _ in 0..50 {
                    derived.info("from a derived channel").unwrap();
                }
            })
        })
        .collect();

    for t in threads {
        t.join().expect("logging thread panicked");
    }

    let records = handler.records();
    assert_eq!(records.len(), 200);
    assert!(records.iter().all(|r| r.channel.starts_with("stress.worker-")));
}

#[test]
fn test_fingers_crossed_under_concurrent_producers() {
    let sink = Arc::new(MemoryHandler::new());
    let fingers = Arc::new(FingersCrossedHandler::new(
        Arc::clone(&sink) as Arc<dyn Handler>,
        0,
    ));

    let logger = Logger::new("stress");
    logger.push_handler(Arc::clone(&fingers) as Arc<dyn Handler>);

    let threads: Vec<_> = (0..4)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    if t == 0 && i == 25 {
                        logger.error("trigger").unwrap();
                    } else {
                        logger.info(format!("context {} {}", t, i)).unwrap();
                    }
                }
            })
        })
        .collect();

    for t in threads {
        t.join().expect("logging thread panicked");
    }

    // Exactly one trigger fired, and every record was either buffered then
    // released or passed straight through: nothing may be lost.
    assert!(fingers.is_triggered());
    assert_eq!(sink.len(), 200);
}

#[test]
fn test_buffer_flush_is_atomic_under_concurrent_writes() {
    let sink = Arc::new(MemoryHandler::new());
    let buffer = Arc::new(BufferHandler::new(
        Arc::clone(&sink) as Arc<dyn Handler>,
        0,
    ));

    let logger = Logger::new("stress");
    logger.push_handler(Arc::clone(&buffer) as Arc<dyn Handler>);

    let writer = {
        let logger = logger.clone();
        thread::spawn(move || {
            for i in 0..500 {
                logger.info(format!("{}", i)).unwrap();
            }
        })
    };

    let flusher = {
        let buffer = Arc::clone(&buffer);
        thread::spawn(move || {
            for _ in 0..20 {
                buffer.flush().expect("flush failed");
                thread::yield_now();
            }
        })
    };

    writer.join().expect("writer panicked");
    flusher.join().expect("flusher panicked");
    buffer.flush().unwrap();

    // Every record comes out exactly once, overall order preserved.
    let records = sink.records();
    assert_eq!(records.len(), 500);
    let delivered: Vec<usize> = records
        .iter()
        .map(|r| r.message.parse().expect("numeric message"))
        .collect();
    let mut sorted = delivered.clone();
    sorted.sort_unstable();
    assert_eq!(delivered, sorted);
}
