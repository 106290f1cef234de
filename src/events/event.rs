//! # Log events carried through the emission pipeline.
//!
//! A [`LogEvent`] describes one log occurrence. It is built once by the
//! capture-side adapter and never mutated afterwards: the sequence number and
//! timestamp come from the originating record at construction time, not from
//! dispatch time.
//!
//! ## Ordering
//! Each event exposes an [`OrderingKey`] of `(timestamp_ms, seq)`. The delivery
//! queue pops entries in non-decreasing key order; the sequence number breaks
//! ties between events sharing a timestamp from the same source.
//!
//! ## Example
//! ```rust
//! use logmitter::LogEvent;
//!
//! let ev = LogEvent::new(42, 1_700_000_000_000)
//!     .with_level("WARN")
//!     .with_logger("app.db")
//!     .with_message("connection pool exhausted")
//!     .with_thread("worker-3")
//!     .with_attr("host", "db-1");
//!
//! assert_eq!(ev.seq, 42);
//! assert_eq!(ev.level.as_deref(), Some("WARN"));
//! assert_eq!(ev.key().timestamp_ms, 1_700_000_000_000);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Ordering key for delivery: timestamp first, sequence number as tie-break.
///
/// Derived `Ord` compares fields in declaration order, which is exactly the
/// `(timestamp, seq)` ascending order the queue needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderingKey {
    /// Event timestamp in epoch milliseconds.
    pub timestamp_ms: u64,
    /// Per-source monotonic sequence number.
    pub seq: u64,
}

/// Immutable record of one log occurrence.
///
/// - `seq` / `timestamp_ms` are mandatory and set at construction
/// - string fields use `Arc<str>` so clones along the fan-out path stay cheap
/// - `attrs` carries arbitrary key/value side-data from the originating record
#[derive(Clone, Debug)]
pub struct LogEvent {
    /// Per-source monotonic sequence number, taken from the originating record.
    pub seq: u64,
    /// Wall-clock timestamp of the originating record, epoch milliseconds.
    pub timestamp_ms: u64,

    /// Level name (e.g. "INFO", "SEVERE"), as reported by the source framework.
    pub level: Option<Arc<str>>,
    /// Logger / source name.
    pub logger: Option<Arc<str>>,
    /// Formatted message text.
    pub message: Option<Arc<str>>,
    /// Identity of the producing thread.
    pub thread: Option<Arc<str>>,
    /// Rendered error payload, if the record carried one.
    pub error: Option<Arc<str>>,
    /// Arbitrary key/value side-data.
    pub attrs: BTreeMap<Arc<str>, Arc<str>>,
}

impl LogEvent {
    /// Creates an event with the given sequence number and epoch-millis timestamp.
    pub fn new(seq: u64, timestamp_ms: u64) -> Self {
        Self {
            seq,
            timestamp_ms,
            level: None,
            logger: None,
            message: None,
            thread: None,
            error: None,
            attrs: BTreeMap::new(),
        }
    }

    /// Creates an event stamped with the current wall-clock time.
    pub fn now(seq: u64) -> Self {
        Self::new(seq, epoch_millis(SystemTime::now()))
    }

    /// Attaches a level name.
    #[inline]
    pub fn with_level(mut self, level: impl Into<Arc<str>>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Attaches a logger / source name.
    #[inline]
    pub fn with_logger(mut self, logger: impl Into<Arc<str>>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    /// Attaches the formatted message text.
    #[inline]
    pub fn with_message(mut self, message: impl Into<Arc<str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches the producing thread's identity.
    #[inline]
    pub fn with_thread(mut self, thread: impl Into<Arc<str>>) -> Self {
        self.thread = Some(thread.into());
        self
    }

    /// Attaches a rendered error payload.
    #[inline]
    pub fn with_error(mut self, error: impl Into<Arc<str>>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attaches one key/value attribute.
    #[inline]
    pub fn with_attr(mut self, key: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Returns the delivery ordering key for this event.
    #[inline]
    pub fn key(&self) -> OrderingKey {
        OrderingKey {
            timestamp_ms: self.timestamp_ms,
            seq: self.seq,
        }
    }
}

/// Converts a `SystemTime` to epoch milliseconds, saturating at zero for
/// pre-epoch clocks.
pub(crate) fn epoch_millis(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().min(u128::from(u64::MAX)) as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let ev = LogEvent::new(7, 1000)
            .with_level("INFO")
            .with_logger("app")
            .with_message("hi")
            .with_thread("main")
            .with_error("stacktrace...")
            .with_attr("k", "v");

        assert_eq!(ev.seq, 7);
        assert_eq!(ev.timestamp_ms, 1000);
        assert_eq!(ev.level.as_deref(), Some("INFO"));
        assert_eq!(ev.logger.as_deref(), Some("app"));
        assert_eq!(ev.message.as_deref(), Some("hi"));
        assert_eq!(ev.thread.as_deref(), Some("main"));
        assert_eq!(ev.error.as_deref(), Some("stacktrace..."));
        assert_eq!(ev.attrs.get("k").map(|v| &**v), Some("v"));
    }

    #[test]
    fn test_key_orders_by_timestamp_then_seq() {
        let a = LogEvent::new(2, 100).key();
        let b = LogEvent::new(1, 200).key();
        let c = LogEvent::new(1, 100).key();

        assert!(a < b, "earlier timestamp wins regardless of seq");
        assert!(c < a, "equal timestamp falls back to seq");
    }

    #[test]
    fn test_now_uses_wall_clock() {
        let ev = LogEvent::now(1);
        // Some time well after 2020; guards against a zeroed timestamp.
        assert!(ev.timestamp_ms > 1_577_836_800_000);
    }
}
