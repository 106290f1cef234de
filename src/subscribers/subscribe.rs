//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging event handlers into the
//! pipeline. The single dispatch worker invokes subscribers one at a time, in
//! registration order, for every event it pops.
//!
//! ## Contract
//! - Implementations share the dispatch worker: a slow subscriber delays the
//!   subscribers behind it and the events behind this one. Keep `on_event`
//!   cheap, or hand work off to your own task.
//! - A panic inside `on_event` is caught, reported through the emitter's
//!   [`ErrorSink`](crate::ErrorSink), and does not affect other subscribers,
//!   the counter, or subsequent events.

use async_trait::async_trait;

use crate::events::LogEvent;

/// Contract for event subscribers.
///
/// Called from the dispatch worker. Implementations should avoid blocking the
/// async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single dispatched event.
    ///
    /// # Parameters
    /// - `event`: Reference to the event (does not transfer ownership)
    async fn on_event(&self, event: &LogEvent);

    /// Human-readable name (for failure reports and removal by name).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
