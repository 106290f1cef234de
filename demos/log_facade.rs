//! # Demo: log_facade
//!
//! Wires the [`PipelineLogger`] adapter into the global `log` facade so that
//! ordinary `log::info!` calls flow through the pipeline.
//!
//! ## Flow
//! ```text
//! log::warn!(...) ──► PipelineLogger (log::Log) ──► Emitter::emit(LogEvent)
//!                                                       └─► LogWriter → stdout
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example log_facade --features "integration logging"
//! ```

use std::sync::Arc;
use std::time::Duration;

use logmitter::{Emitter, EmitterConfig, LogWriter, PipelineLogger};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let emitter = Arc::new(Emitter::new(EmitterConfig::default()));
    emitter.add_subscriber(Arc::new(LogWriter::new()));
    emitter.start();

    PipelineLogger::new(Arc::clone(&emitter), log::LevelFilter::Info)
        .install()
        .expect("no logger installed yet");

    log::info!(target: "demo.facade", "pipeline wired into the log facade");
    log::warn!(target: "demo.facade", "this warning travels through the queue");
    log::debug!(target: "demo.facade", "debug is filtered out by LevelFilter::Info");

    tokio::time::sleep(Duration::from_millis(100)).await;
    println!("emitted: {}", emitter.emitted_count());
    emitter.stop();
}
