//! # `log` facade adapter.
//!
//! [`PipelineLogger`] implements [`log::Log`], converting each [`log::Record`]
//! into a [`LogEvent`] and forwarding it to a shared [`Emitter`].
//!
//! ## Record mapping
//! ```text
//! log::Record              LogEvent
//! ────────────             ────────
//! (adapter counter)  ──►   seq        (monotonic per adapter)
//! (wall clock)       ──►   timestamp_ms
//! level().as_str()   ──►   level
//! target()           ──►   logger
//! args()             ──►   message
//! (current thread)   ──►   thread
//! ```
//!
//! ## Rules
//! - Records above the configured [`LevelFilter`] are skipped.
//! - Records arriving while the emitter is stopped are silently skipped; the
//!   adapter never surfaces `NotStarted` to the logging macro call site.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use log::{LevelFilter, Metadata, Record};

use crate::core::Emitter;
use crate::events::LogEvent;

/// Forwards `log` facade records into an [`Emitter`].
pub struct PipelineLogger {
    emitter: Arc<Emitter>,
    max_level: LevelFilter,
    seq: AtomicU64,
}

impl PipelineLogger {
    /// Creates an adapter forwarding records at or below `max_level`.
    pub fn new(emitter: Arc<Emitter>, max_level: LevelFilter) -> Self {
        Self {
            emitter,
            max_level,
            seq: AtomicU64::new(0),
        }
    }

    /// Installs this adapter as the global logger.
    ///
    /// Also sets the facade's max level so disabled records are filtered at
    /// the macro call site.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_max_level(self.max_level);
        log::set_boxed_logger(Box::new(self))
    }

    fn build_event(&self, record: &Record<'_>) -> LogEvent {
        let thread = std::thread::current()
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("{:?}", std::thread::current().id()));

        LogEvent::now(self.seq.fetch_add(1, AtomicOrdering::Relaxed))
            .with_level(record.level().as_str())
            .with_logger(record.target().to_string())
            .with_message(record.args().to_string())
            .with_thread(thread)
    }
}

impl log::Log for PipelineLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) || !self.emitter.is_started() {
            return;
        }
        // A stop racing this check loses the record, same as any in-flight drop.
        let _ = self.emitter.emit(self.build_event(record));
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmitterConfig;
    use crate::subscribers::Subscribe;
    use async_trait::async_trait;
    use log::Log;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct Probe(mpsc::UnboundedSender<LogEvent>);

    #[async_trait]
    impl Subscribe for Probe {
        async fn on_event(&self, event: &LogEvent) {
            let _ = self.0.send(event.clone());
        }
        fn name(&self) -> &'static str {
            "probe"
        }
    }

    fn record<'a>(args: std::fmt::Arguments<'a>, level: log::Level) -> Record<'a> {
        Record::builder()
            .args(args)
            .level(level)
            .target("adapter_test")
            .build()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_record_is_forwarded_as_event() {
        let emitter = Arc::new(Emitter::new(EmitterConfig::default()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        emitter.add_subscriber(Arc::new(Probe(tx)));
        emitter.start();

        let adapter = PipelineLogger::new(Arc::clone(&emitter), LevelFilter::Info);
        adapter.log(&record(format_args!("database down"), log::Level::Warn));

        let ev = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out")
            .expect("channel closed");
        assert_eq!(ev.level.as_deref(), Some("WARN"));
        assert_eq!(ev.logger.as_deref(), Some("adapter_test"));
        assert_eq!(ev.message.as_deref(), Some("database down"));
        assert!(ev.thread.is_some());

        emitter.stop();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_levels_above_filter_are_skipped() {
        let emitter = Arc::new(Emitter::new(EmitterConfig::default()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        emitter.add_subscriber(Arc::new(Probe(tx)));
        emitter.start();

        let adapter = PipelineLogger::new(Arc::clone(&emitter), LevelFilter::Warn);
        adapter.log(&record(format_args!("chatter"), log::Level::Debug));
        adapter.log(&record(format_args!("problem"), log::Level::Error));

        let ev = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out")
            .expect("channel closed");
        assert_eq!(ev.message.as_deref(), Some("problem"));
        assert!(rx.try_recv().is_err(), "debug record must not pass the filter");

        emitter.stop();
    }

    #[tokio::test]
    async fn test_stopped_emitter_drops_record_silently() {
        let emitter = Arc::new(Emitter::new(EmitterConfig::default()));
        let adapter = PipelineLogger::new(Arc::clone(&emitter), LevelFilter::Info);

        // Must not panic or error; the record is simply skipped.
        adapter.log(&record(format_args!("ignored"), log::Level::Info));
        assert_eq!(emitter.emitted_count(), 0);
    }

    #[test]
    fn test_adapter_sequence_is_monotonic() {
        let emitter = Arc::new(Emitter::new(EmitterConfig::default()));
        let adapter = PipelineLogger::new(emitter, LevelFilter::Info);

        let a = adapter.seq.fetch_add(0, AtomicOrdering::Relaxed);
        adapter.build_event(&record(format_args!("x"), log::Level::Info));
        adapter.build_event(&record(format_args!("y"), log::Level::Info));
        let b = adapter.seq.fetch_add(0, AtomicOrdering::Relaxed);
        assert_eq!(b, a + 2);
    }
}
