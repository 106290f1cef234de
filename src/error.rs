//! Error types surfaced to producers by the emission pipeline.
//!
//! Only lifecycle misuse is returned to callers: [`EmitError::NotStarted`] when
//! [`emit`](crate::Emitter::emit) is invoked on a stopped emitter. Failures that
//! occur after the producer has already returned (entry construction, subscriber
//! notification) never propagate back — they are routed to the
//! [`ErrorSink`](crate::ErrorSink) hook instead.

use thiserror::Error;

/// # Errors returned by [`Emitter`](crate::Emitter) operations.
///
/// The pipeline is fire-and-forget past the submission boundary, so this enum
/// stays small: anything that happens after `emit` returns is reported through
/// the error sink, not raised here.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EmitError {
    /// `emit` was called while the emitter is stopped.
    #[error("emitter must be started before emit() can be invoked")]
    NotStarted,
}

impl EmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use logmitter::EmitError;
    ///
    /// assert_eq!(EmitError::NotStarted.as_label(), "emitter_not_started");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitError::NotStarted => "emitter_not_started",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EmitError::NotStarted => "emit() called on a stopped emitter".to_string(),
        }
    }
}
