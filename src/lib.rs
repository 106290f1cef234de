//! # logmitter
//!
//! **logmitter** is an asynchronous log-event emission pipeline.
//!
//! Application log records are captured by an adapter, converted into immutable
//! [`LogEvent`]s, and broadcast to a set of subscribers. The pipeline decouples
//! the task that produces a record from the task that delivers it: producers are
//! fire-and-forget, delivery is serialized into a single order by one dispatch
//! task.
//!
//! ## Architecture
//! ### Overview
//! ```text
//! Producers (many):                          Consumer (one):
//!
//!   emit(LogEvent) ──┐
//!   emit(LogEvent) ──┼──► submission channel (unbounded, non-blocking)
//!   emit(LogEvent) ──┘            │
//!                        ┌────────┼────────┐
//!                        ▼        ▼        ▼
//!                     worker1  worker2  workerN      SubmissionPool (default 5)
//!                        │        │        │
//!                        └────────┼────────┘
//!                                 ▼
//!                    ┌─────────────────────────┐
//!                    │     DeliveryQueue       │  min-heap on (timestamp, seq)
//!                    │  (capacity hint: 100)   │  push never blocks producers
//!                    └────────────┬────────────┘
//!                                 ▼
//!                          DispatchWorker        single task: pop in order,
//!                                 │              notify, count exactly once
//!                    ┌────────────┼────────────┐
//!                    ▼            ▼            ▼
//!               sub1.on_event  sub2.on_event  subN.on_event
//!                  (registration order, panic-isolated)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Emitter::new(cfg)
//!   │
//!   ├─► start()   (idempotent, guarded by one lifecycle lock)
//!   │     ├─ fresh DeliveryQueue
//!   │     ├─ fresh SubmissionPool (cfg.pool_size workers)
//!   │     └─ spawn DispatchWorker, record start timestamp
//!   │
//!   ├─► emit(event) ──► Err(EmitError::NotStarted) when stopped
//!   │
//!   └─► stop()    (idempotent, immediate)
//!         ├─ cancel + abort pool workers and dispatch task
//!         └─ queued / in-flight events are dropped (no drain)
//! ```
//!
//! ## Guarantees
//! | Property            | What you get                                                        |
//! |---------------------|---------------------------------------------------------------------|
//! | **Producer path**   | `emit` never blocks beyond an unbounded channel send.               |
//! | **Delivery order**  | Non-decreasing `(timestamp, seq)` among entries resident at pop.    |
//! | **Counting**        | Exactly one increment per dispatched event, any subscriber count.   |
//! | **Isolation**       | A panicking subscriber never stops the worker or other subscribers. |
//! | **Shutdown**        | `stop()` is immediate; undelivered events are discarded.            |
//!
//! Weak ordering: submission workers race to enqueue, so two events with equal
//! or interleaving keys submitted concurrently may be delivered in either
//! relative order. Sustained producer rate above dispatch rate grows the queue
//! without bound; that is a capacity-planning concern, not corrected here.
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//! - `integration`: exports [`PipelineLogger`], a [`log`] facade adapter.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use logmitter::{Emitter, EmitterConfig, LogEvent, Subscribe};
//!
//! struct Console;
//!
//! #[async_trait::async_trait]
//! impl Subscribe for Console {
//!     async fn on_event(&self, ev: &LogEvent) {
//!         println!("[{}] {}", ev.level.as_deref().unwrap_or("?"),
//!                  ev.message.as_deref().unwrap_or(""));
//!     }
//!     fn name(&self) -> &'static str { "console" }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emitter = Emitter::new(EmitterConfig::default());
//!     emitter.add_subscriber(Arc::new(Console));
//!     emitter.start();
//!
//!     emitter.emit(LogEvent::now(1).with_level("INFO").with_message("hello"))?;
//!
//!     tokio::time::sleep(std::time::Duration::from_millis(50)).await;
//!     emitter.stop();
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod report;
mod subscribers;

// ---- Public re-exports ----

pub use config::EmitterConfig;
pub use core::Emitter;
pub use error::EmitError;
pub use events::{DeliveryQueue, LogEvent, OrderingKey, QueueClosed, QueueEntry};
pub use report::{ErrorSink, PipelineFailure, StderrSink};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in stdout subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;

// Optional: expose the `log` facade adapter.
// Enable with: `--features integration`
#[cfg(feature = "integration")]
mod integration;
#[cfg(feature = "integration")]
pub use integration::PipelineLogger;
