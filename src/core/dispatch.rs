//! # Dispatch worker - single consumer, ordered delivery, one count per event.
//!
//! Exactly one dispatch task drains the [`DeliveryQueue`]. That single-consumer
//! shape is what gives the delivery-order guarantee and lets the emitted
//! counter be written without a lock around notification.
//!
//! ```text
//! loop {
//!   ├─► pop next entry (suspends when empty, exits on cancel/close)
//!   ├─► snapshot subscribers
//!   ├─► notify each in registration order
//!   │        └─ panic → caught, reported, loop continues
//!   └─► emitted += 1   (exactly once, even with zero subscribers)
//! }
//! ```
//!
//! ## Panic handling
//! Subscriber calls run under `catch_unwind`:
//! - the panic is converted into a [`PipelineFailure::Notification`] report
//! - remaining subscribers are still notified for the same event
//! - the counter is still incremented and the worker keeps looping
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if a subscriber panics while holding a lock it shares.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::{DeliveryQueue, LogEvent};
use crate::report::{ErrorSink, PipelineFailure};
use crate::subscribers::SubscriberSet;

/// Single-consumer delivery loop.
pub(crate) struct DispatchWorker {
    queue: Arc<DeliveryQueue>,
    subs: Arc<SubscriberSet>,
    emitted: Arc<AtomicU64>,
    sink: Arc<dyn ErrorSink>,
}

impl DispatchWorker {
    pub(crate) fn new(
        queue: Arc<DeliveryQueue>,
        subs: Arc<SubscriberSet>,
        emitted: Arc<AtomicU64>,
        sink: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            queue,
            subs,
            emitted,
            sink,
        }
    }

    /// Spawns the delivery loop. Must be called from within a tokio runtime.
    pub(crate) fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }

    async fn run(self, cancel: CancellationToken) {
        loop {
            let entry = tokio::select! {
                _ = cancel.cancelled() => break,
                popped = self.queue.pop() => match popped {
                    Some(entry) => entry,
                    // Queue closed and drained.
                    None => break,
                },
            };

            self.deliver(&entry.event).await;
            self.emitted.fetch_add(1, AtomicOrdering::Relaxed);
        }
    }

    /// Notifies every registered subscriber, isolating each invocation.
    async fn deliver(&self, event: &LogEvent) {
        for sub in self.subs.snapshot() {
            let fut = sub.on_event(event);

            if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                let info = {
                    let any = &*panic_err;
                    if let Some(msg) = any.downcast_ref::<&'static str>() {
                        (*msg).to_string()
                    } else if let Some(msg) = any.downcast_ref::<String>() {
                        msg.clone()
                    } else {
                        "unknown panic".to_string()
                    }
                };
                self.sink.report(PipelineFailure::Notification {
                    subscriber: sub.name(),
                    reason: info.into(),
                });
            }
        }
    }
}
