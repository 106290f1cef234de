//! # Ordered delivery queue between submission workers and the dispatcher.
//!
//! [`DeliveryQueue`] is a thread-safe min-priority queue keyed by
//! [`OrderingKey`] ascending. Submission workers push concurrently; exactly one
//! dispatch task pops.
//!
//! ## Rules
//! - **Push never blocks**: capacity is a sizing hint, not an admission bound.
//!   Inserting past capacity is accepted; the hint only pre-sizes the heap.
//! - **Pop suspends when empty** and wakes on the next push (or close).
//! - **No total order across racing pushers**: pop order is non-decreasing by
//!   key among entries resident at pop time; entries that tie may come out in
//!   either order.
//! - **Close is terminal**: after [`close`](DeliveryQueue::close), pushes fail
//!   with [`QueueClosed`] and pop returns `None` once drained.
//!
//! ## Capacity behavior
//! A sustained producer rate above the dispatch rate grows the heap without
//! bound. The queue does not shed load; that trade-off favors never blocking
//! or rejecting a producer-side insert.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::Notify;

use super::event::{LogEvent, OrderingKey};

/// Push was attempted on a closed queue; the entry is handed back to the caller.
#[derive(Error, Debug)]
#[error("delivery queue is closed")]
pub struct QueueClosed(pub QueueEntry);

/// An event buffered for delivery, paired with its precomputed ordering key.
///
/// Equality and ordering consider only the key: the heap must not compare
/// event payloads.
#[derive(Debug)]
pub struct QueueEntry {
    /// Delivery ordering key, `(timestamp_ms, seq)`.
    pub key: OrderingKey,
    /// The buffered event.
    pub event: LogEvent,
}

impl QueueEntry {
    /// Wraps an event, deriving the ordering key from its fields.
    pub fn new(event: LogEvent) -> Self {
        Self {
            key: event.key(),
            event,
        }
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

struct HeapState {
    heap: BinaryHeap<Reverse<QueueEntry>>,
    closed: bool,
}

/// Concurrent min-priority queue with a blocking (async) pop.
///
/// ### Properties
/// - **Multi-producer**: any number of tasks may push concurrently.
/// - **Single-consumer by convention**: the dispatch worker is the only popper;
///   the queue itself tolerates more but ordering guarantees assume one.
/// - **Non-blocking push**: a `std` mutex held only for the heap operation.
pub struct DeliveryQueue {
    state: Mutex<HeapState>,
    notify: Notify,
    capacity: usize,
}

impl DeliveryQueue {
    /// Creates a queue with the given capacity hint (min 1, clamped).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(HeapState {
                heap: BinaryHeap::with_capacity(capacity),
                closed: false,
            }),
            notify: Notify::new(),
            capacity,
        }
    }

    /// Inserts an entry.
    ///
    /// Never blocks and never rejects for size; only a closed queue refuses,
    /// returning the entry inside [`QueueClosed`] so the caller can report the
    /// drop.
    pub fn push(&self, entry: QueueEntry) -> Result<(), QueueClosed> {
        {
            let mut st = self.lock();
            if st.closed {
                return Err(QueueClosed(entry));
            }
            st.heap.push(Reverse(entry));
        }
        self.notify.notify_one();
        Ok(())
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// Suspends while the queue is empty and open; returns `None` once the
    /// queue is closed and drained. Cancellation-safe: an entry is only removed
    /// from the heap in the same poll that returns it.
    pub async fn pop(&self) -> Option<QueueEntry> {
        loop {
            // Register for the wakeup before checking the heap, otherwise a
            // push between the check and the await would be lost.
            let notified = self.notify.notified();
            {
                let mut st = self.lock();
                if let Some(Reverse(entry)) = st.heap.pop() {
                    return Some(entry);
                }
                if st.closed {
                    return None;
                }
            }
            notified.await;
        }
    }

    /// Closes the queue: subsequent pushes fail, pop drains then returns `None`.
    pub fn close(&self) {
        self.lock().closed = true;
        self.notify.notify_waiters();
    }

    /// Current number of buffered entries.
    pub fn len(&self) -> usize {
        self.lock().heap.len()
    }

    /// Returns `true` when no entries are buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The capacity hint this queue was created with.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, HeapState> {
        // A panic while holding the lock leaves the heap in a valid state
        // (push/pop are atomic under the guard), so poisoning is ignored.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
