//! # Emitter: pipeline façade and lifecycle owner.
//!
//! The [`Emitter`] is the sole object producers and the external control layer
//! interact with. It owns the submission pool and the dispatch worker, exposes
//! start/stop lifecycle, status accessors, subscriber registration, and the
//! pass-through filter configuration.
//!
//! ## Key responsibilities
//! - linearize `start` / `stop` under a single lifecycle lock
//! - hand `emit` calls to the submission pool without blocking the producer
//! - expose the emitted counter and start timestamp to a control layer
//! - hold opaque level/filter strings the core does not interpret
//!
//! ## State machine
//! ```text
//! STOPPED ──(start)──► STARTED ──(stop)──► STOPPED
//! ```
//! No intermediate state is externally observable. Each `start` builds a fresh
//! queue, pool, and dispatch worker; each `stop` hard-cancels them and discards
//! whatever is still buffered.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::SystemTime;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::EmitterConfig;
use crate::core::{dispatch::DispatchWorker, pool::SubmissionPool};
use crate::error::EmitError;
use crate::events::{DeliveryQueue, LogEvent};
use crate::report::{ErrorSink, PipelineFailure, StderrSink};
use crate::subscribers::{Subscribe, SubscriberSet};

/// Resources owned by a started pipeline; dropped wholesale on `stop`.
struct Running {
    queue: Arc<DeliveryQueue>,
    pool: SubmissionPool,
    dispatch: JoinHandle<()>,
    cancel: CancellationToken,
}

/// Opaque pass-through configuration for an external control layer.
#[derive(Default)]
struct FilterSettings {
    level: Option<String>,
    filter_expression: Option<String>,
    filter_script_file: Option<String>,
}

/// Façade over the emission pipeline.
///
/// Long-lived: create once, `start`/`stop` any number of times. The emitted
/// counter spans restarts; each `start` begins with an empty queue.
///
/// All methods take `&self`; the emitter is meant to be shared behind an
/// `Arc` between producers and the control layer.
pub struct Emitter {
    cfg: EmitterConfig,
    /// Single lifecycle lock: `start`, `stop`, and the `emit` hand-off are
    /// linearized through it. Held only for cheap operations.
    state: Mutex<Option<Running>>,
    /// Lock-free mirror of the lifecycle flag for `is_started` readers.
    started: AtomicBool,
    /// Written only by the dispatch worker; read by anyone.
    emitted: Arc<AtomicU64>,
    /// Last successful start time; survives `stop`.
    started_at: Mutex<Option<SystemTime>>,
    subs: Arc<SubscriberSet>,
    sink: Arc<dyn ErrorSink>,
    filters: RwLock<FilterSettings>,
}

impl Emitter {
    /// Creates a stopped emitter with the default stderr error sink.
    pub fn new(cfg: EmitterConfig) -> Self {
        Self::with_sink(cfg, Arc::new(StderrSink))
    }

    /// Creates a stopped emitter reporting internal failures to `sink`.
    pub fn with_sink(cfg: EmitterConfig, sink: Arc<dyn ErrorSink>) -> Self {
        let filters = FilterSettings {
            level: cfg.level.clone(),
            filter_expression: cfg.filter_expression.clone(),
            filter_script_file: cfg.filter_script_file.clone(),
        };
        Self {
            cfg,
            state: Mutex::new(None),
            started: AtomicBool::new(false),
            emitted: Arc::new(AtomicU64::new(0)),
            started_at: Mutex::new(None),
            subs: Arc::new(SubscriberSet::new()),
            sink,
            filters: RwLock::new(filters),
        }
    }

    // ---- Lifecycle ----

    /// Starts the pipeline. No-op if already started.
    ///
    /// Builds a fresh delivery queue, a fresh submission pool of
    /// `cfg.pool_size` workers, and spawns the dispatch worker. Records the
    /// start timestamp. Safe to call concurrently with other lifecycle calls.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        let mut state = self.lock_state();
        if state.is_some() {
            return;
        }

        let queue = Arc::new(DeliveryQueue::new(self.cfg.queue_capacity_clamped()));
        let cancel = CancellationToken::new();

        let pool = SubmissionPool::spawn(
            self.cfg.pool_size_clamped(),
            Arc::clone(&queue),
            Arc::clone(&self.sink),
            cancel.clone(),
        );
        let dispatch = DispatchWorker::new(
            Arc::clone(&queue),
            Arc::clone(&self.subs),
            Arc::clone(&self.emitted),
            Arc::clone(&self.sink),
        )
        .spawn(cancel.clone());

        *state = Some(Running {
            queue,
            pool,
            dispatch,
            cancel,
        });
        *self.lock_started_at() = Some(SystemTime::now());
        self.started.store(true, AtomicOrdering::Release);
    }

    /// Stops the pipeline immediately. No-op if already stopped.
    ///
    /// Forcibly cancels the submission workers and the dispatch worker; events
    /// still buffered or in a producer's hand are dropped. Stop does not wait
    /// for queue drain.
    pub fn stop(&self) {
        let mut state = self.lock_state();
        let Some(running) = state.take() else {
            return;
        };

        self.started.store(false, AtomicOrdering::Release);
        running.cancel.cancel();
        running.queue.close();
        running.pool.abort();
        running.dispatch.abort();
    }

    /// Returns the current lifecycle flag.
    pub fn is_started(&self) -> bool {
        self.started.load(AtomicOrdering::Acquire)
    }

    // ---- Producer surface ----

    /// Submits an event for delivery.
    ///
    /// Fails with [`EmitError::NotStarted`] while stopped. Otherwise the event
    /// is handed to the submission pool and this call returns immediately: the
    /// producer never waits on queue insertion or dispatch.
    pub fn emit(&self, event: LogEvent) -> Result<(), EmitError> {
        let state = self.lock_state();
        match state.as_ref() {
            Some(running) => {
                if !running.pool.submit(event) {
                    // Channel closed under a live Running only during teardown
                    // races; the event is dropped like any other in-flight one.
                    self.sink.report(PipelineFailure::Submission {
                        reason: "submission channel closed".into(),
                    });
                }
                Ok(())
            }
            None => Err(EmitError::NotStarted),
        }
    }

    // ---- Status ----

    /// Number of events that completed dispatch since this emitter was created.
    ///
    /// Monotonic; incremented exactly once per dispatched event by the single
    /// dispatch worker, regardless of subscriber count. Spans restarts.
    pub fn emitted_count(&self) -> u64 {
        self.emitted.load(AtomicOrdering::Relaxed)
    }

    /// Time of the last successful `start`, or `None` if never started.
    pub fn start_timestamp(&self) -> Option<SystemTime> {
        *self.lock_started_at()
    }

    /// Number of entries currently buffered for delivery (0 while stopped).
    pub fn queue_len(&self) -> usize {
        self.lock_state()
            .as_ref()
            .map(|r| r.queue.len())
            .unwrap_or(0)
    }

    // ---- Subscribers ----

    /// Registers a subscriber; it is notified after all earlier registrations.
    ///
    /// Safe to call while the dispatch worker is delivering: the racing cycle
    /// may or may not include the new subscriber.
    pub fn add_subscriber(&self, sub: Arc<dyn Subscribe>) {
        self.subs.add(sub);
    }

    /// Removes the first subscriber whose `name()` matches; returns whether
    /// one was removed.
    pub fn remove_subscriber(&self, name: &str) -> bool {
        self.subs.remove(name)
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subs.len()
    }

    // ---- Pass-through configuration ----
    //
    // Opaque strings for an external management layer. The core stores them
    // and hands them back; it never interprets them.

    /// Sets the opaque level string.
    pub fn set_level(&self, level: impl Into<String>) {
        self.lock_filters_mut().level = Some(level.into());
    }

    /// Returns the opaque level string.
    pub fn level(&self) -> Option<String> {
        self.lock_filters().level.clone()
    }

    /// Sets the opaque filter expression.
    pub fn set_filter_expression(&self, exp: impl Into<String>) {
        self.lock_filters_mut().filter_expression = Some(exp.into());
    }

    /// Returns the opaque filter expression.
    pub fn filter_expression(&self) -> Option<String> {
        self.lock_filters().filter_expression.clone()
    }

    /// Sets the opaque filter script path.
    pub fn set_filter_script_file(&self, file: impl Into<String>) {
        self.lock_filters_mut().filter_script_file = Some(file.into());
    }

    /// Returns the opaque filter script path.
    pub fn filter_script_file(&self) -> Option<String> {
        self.lock_filters().filter_script_file.clone()
    }

    // ---- Lock helpers (poison-tolerant) ----

    fn lock_state(&self) -> MutexGuard<'_, Option<Running>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_started_at(&self) -> MutexGuard<'_, Option<SystemTime>> {
        self.started_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_filters(&self) -> std::sync::RwLockReadGuard<'_, FilterSettings> {
        self.filters.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_filters_mut(&self) -> std::sync::RwLockWriteGuard<'_, FilterSettings> {
        self.filters.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Emitter {
    fn drop(&mut self) {
        // Dropping a started emitter outside a runtime is fine: abort() on a
        // JoinHandle does not require a runtime context.
        self.stop();
    }
}
