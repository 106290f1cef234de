//! # Error-reporting hook for non-fatal pipeline failures.
//!
//! Once `emit` returns, the producer is out of the picture: an event that cannot
//! be enqueued or a subscriber that panics has no caller left to report to.
//! Those failures are delivered to an [`ErrorSink`] instead, and the pipeline
//! keeps running.
//!
//! ## Rules
//! - **Never fatal**: a reported failure aborts neither the dispatch worker nor
//!   the submission pool.
//! - **One event / one subscriber scope**: each failure concerns exactly one
//!   dropped event or one subscriber invocation.
//! - **Sink must not block**: `report` is called from pipeline workers; keep
//!   implementations cheap (counter bump, channel send, stderr line).

use std::sync::Arc;

/// Non-fatal failures raised inside the pipeline after the producer returned.
#[derive(Debug, Clone)]
pub enum PipelineFailure {
    /// A queue entry could not be built or enqueued; the event was dropped.
    Submission {
        /// What went wrong (e.g. "delivery queue is closed").
        reason: Arc<str>,
    },
    /// A subscriber panicked while handling an event. Remaining subscribers
    /// were still notified and the emitted counter was still incremented.
    Notification {
        /// Name of the offending subscriber.
        subscriber: &'static str,
        /// Captured panic payload.
        reason: Arc<str>,
    },
}

impl PipelineFailure {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            PipelineFailure::Submission { .. } => "submission_failed",
            PipelineFailure::Notification { .. } => "notification_failed",
        }
    }

    /// Returns a human-readable message with details about the failure.
    pub fn as_message(&self) -> String {
        match self {
            PipelineFailure::Submission { reason } => {
                format!("submission failed, event dropped: {reason}")
            }
            PipelineFailure::Notification { subscriber, reason } => {
                format!("subscriber {subscriber:?} failed during notify: {reason}")
            }
        }
    }
}

/// Contract for receiving pipeline failure reports.
///
/// Called from submission workers and the dispatch worker. Implementations must
/// be `Send + Sync` and should return quickly.
pub trait ErrorSink: Send + Sync + 'static {
    /// Handle a single failure report.
    fn report(&self, failure: PipelineFailure);
}

/// Default sink: writes one line per failure to stderr.
#[derive(Debug, Default)]
pub struct StderrSink;

impl ErrorSink for StderrSink {
    fn report(&self, failure: PipelineFailure) {
        eprintln!("[logmitter] {}: {}", failure.as_label(), failure.as_message());
    }
}
