//! # Event model and ordered delivery queue.
//!
//! This module defines the immutable [`LogEvent`] value object, its
//! [`OrderingKey`], and the [`DeliveryQueue`] that buffers events between the
//! submission pool and the dispatch worker.
//!
//! ```text
//! Event flow:
//!   adapter ── LogEvent ──► SubmissionPool ── QueueEntry ──► DeliveryQueue
//!                                                                 │
//!                                                        pop (min-key first)
//!                                                                 ▼
//!                                                          DispatchWorker
//! ```

mod event;
mod queue;

pub use event::{LogEvent, OrderingKey};
pub use queue::{DeliveryQueue, QueueClosed, QueueEntry};
