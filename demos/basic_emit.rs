//! # Demo: basic_emit
//!
//! Minimal end-to-end run of the pipeline with the built-in [`LogWriter`].
//!
//! ## Flow
//! ```text
//! Emitter::start()
//!     ├─► emit(LogEvent) x3 ──► SubmissionPool ──► DeliveryQueue
//!     └─► DispatchWorker ──► LogWriter.on_event() ──► stdout
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_emit --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use logmitter::{Emitter, EmitterConfig, LogEvent, LogWriter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let emitter = Emitter::new(EmitterConfig::default());
    emitter.add_subscriber(Arc::new(LogWriter::new()));
    emitter.start();

    for (seq, msg) in ["service starting", "cache warmed", "ready"].iter().enumerate() {
        emitter
            .emit(
                LogEvent::now(seq as u64 + 1)
                    .with_level("INFO")
                    .with_logger("demo.app")
                    .with_message(*msg),
            )
            .expect("emitter is started");
    }

    // Give the dispatch worker a moment to drain before the hard stop.
    tokio::time::sleep(Duration::from_millis(100)).await;
    println!("emitted: {}", emitter.emitted_count());
    emitter.stop();
}
