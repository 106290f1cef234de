//! # Demo: custom_subscriber
//!
//! Demonstrates how to build and attach a custom event subscriber.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait.
//! - Inspect [`LogEvent`] fields for filtering/metrics.
//! - Observe the single-increment counter across multiple subscribers.
//!
//! ## Run
//! ```bash
//! cargo run --example custom_subscriber
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use logmitter::{Emitter, EmitterConfig, LogEvent, Subscribe};

/// Prints warnings and above; in real life you could ship logs or alert.
struct WarnPrinter;

#[async_trait::async_trait]
impl Subscribe for WarnPrinter {
    async fn on_event(&self, ev: &LogEvent) {
        let level = ev.level.as_deref().unwrap_or("?");
        if level == "WARN" || level == "ERROR" {
            println!(
                "[warn-printer] {} {}: {}",
                level,
                ev.logger.as_deref().unwrap_or("<unknown>"),
                ev.message.as_deref().unwrap_or("")
            );
        }
    }

    fn name(&self) -> &'static str {
        "warn-printer"
    }
}

/// Counts every delivered event, level-independent.
struct Counter(AtomicU64);

#[async_trait::async_trait]
impl Subscribe for Counter {
    async fn on_event(&self, _ev: &LogEvent) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    fn name(&self) -> &'static str {
        "counter"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let emitter = Emitter::new(EmitterConfig::default());
    let counter = Arc::new(Counter(AtomicU64::new(0)));
    emitter.add_subscriber(Arc::new(WarnPrinter));
    emitter.add_subscriber(counter.clone());
    emitter.start();

    let events = [
        ("INFO", "request served"),
        ("WARN", "slow query: 1.8s"),
        ("ERROR", "upstream timeout"),
        ("INFO", "request served"),
    ];
    for (seq, (level, msg)) in events.iter().enumerate() {
        emitter
            .emit(
                LogEvent::now(seq as u64 + 1)
                    .with_level(*level)
                    .with_logger("demo.web")
                    .with_message(*msg),
            )
            .expect("emitter is started");
    }

    tokio::time::sleep(Duration::from_millis(100)).await;
    println!(
        "pipeline count: {} / subscriber count: {}",
        emitter.emitted_count(),
        counter.0.load(Ordering::Relaxed)
    );
    emitter.stop();
}
