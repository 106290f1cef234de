//! # Submission pool - absorbs producer calls off the emit path.
//!
//! A fixed set of workers drains an unbounded channel of raw events, builds a
//! [`QueueEntry`] for each, and pushes it into the [`DeliveryQueue`]. The
//! producer's only cost is the channel send.
//!
//! ```text
//! emit(event) ── send ──► [unbounded channel] ──► worker 1..N ──► queue.push(entry)
//!                                                       │
//!                                                       └─ push failed → ErrorSink
//! ```
//!
//! ## Rules
//! - **Fire-and-forget**: no result flows back to the producer.
//! - **Unbounded backlog**: a saturated pool queues tasks behind it; the system
//!   favors producer non-blocking over bounded memory.
//! - **Hard cancellation**: `abort()` interrupts workers mid-task; in-flight
//!   events are abandoned, not completed.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::{DeliveryQueue, LogEvent, QueueEntry};
use crate::report::{ErrorSink, PipelineFailure};

/// Fixed-size worker pool feeding the delivery queue.
pub(crate) struct SubmissionPool {
    tx: mpsc::UnboundedSender<LogEvent>,
    workers: Vec<JoinHandle<()>>,
}

impl SubmissionPool {
    /// Spawns `size` workers (min 1) draining a shared submission channel.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(
        size: usize,
        queue: Arc<DeliveryQueue>,
        sink: Arc<dyn ErrorSink>,
        cancel: CancellationToken,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<LogEvent>();
        let rx = Arc::new(Mutex::new(rx));

        let size = size.max(1);
        let mut workers = Vec::with_capacity(size);
        for _ in 0..size {
            let rx = Arc::clone(&rx);
            let queue = Arc::clone(&queue);
            let sink = Arc::clone(&sink);
            let cancel = cancel.clone();

            workers.push(tokio::spawn(async move {
                loop {
                    // The receiver lock is held only across one recv so the
                    // other workers can interleave.
                    let next = {
                        let mut rx = rx.lock().await;
                        tokio::select! {
                            _ = cancel.cancelled() => None,
                            ev = rx.recv() => ev,
                        }
                    };
                    let Some(event) = next else { break };

                    let entry = QueueEntry::new(event);
                    if let Err(closed) = queue.push(entry) {
                        sink.report(PipelineFailure::Submission {
                            reason: closed.to_string().into(),
                        });
                    }
                }
            }));
        }

        Self { tx, workers }
    }

    /// Hands an event to the pool. Returns `false` if the channel is closed
    /// (only possible once the pool is being torn down).
    pub(crate) fn submit(&self, event: LogEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Forcibly terminates every worker. In-flight tasks are abandoned.
    pub(crate) fn abort(&self) {
        for w in &self.workers {
            w.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::StderrSink;
    use std::time::Duration;

    async fn wait_len(queue: &DeliveryQueue, n: usize) {
        for _ in 0..200 {
            if queue.len() >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("queue never reached {n} entries, got {}", queue.len());
    }

    #[tokio::test]
    async fn test_pool_moves_events_into_queue() {
        let queue = Arc::new(DeliveryQueue::new(10));
        let pool = SubmissionPool::spawn(
            3,
            Arc::clone(&queue),
            Arc::new(StderrSink),
            CancellationToken::new(),
        );

        for seq in 0..5 {
            assert!(pool.submit(LogEvent::new(seq, 1000 + seq)));
        }
        wait_len(&queue, 5).await;

        pool.abort();
    }

    #[tokio::test]
    async fn test_closed_queue_reports_and_drops() {
        struct Counting(std::sync::atomic::AtomicUsize);
        impl ErrorSink for Counting {
            fn report(&self, _failure: PipelineFailure) {
                self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            }
        }

        let queue = Arc::new(DeliveryQueue::new(10));
        queue.close();
        let sink = Arc::new(Counting(std::sync::atomic::AtomicUsize::new(0)));
        let pool = SubmissionPool::spawn(
            1,
            Arc::clone(&queue),
            Arc::clone(&sink) as Arc<dyn ErrorSink>,
            CancellationToken::new(),
        );

        assert!(pool.submit(LogEvent::new(1, 1)));
        for _ in 0..200 {
            if sink.0.load(std::sync::atomic::Ordering::Relaxed) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(sink.0.load(std::sync::atomic::Ordering::Relaxed), 1);
        assert!(queue.is_empty());

        pool.abort();
    }
}
