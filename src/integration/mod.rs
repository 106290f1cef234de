//! # Adapters bridging logging frameworks into the pipeline.
//!
//! Capture-side integrations live here: they turn a framework's log record
//! into a [`LogEvent`](crate::LogEvent) and hand it to a shared
//! [`Emitter`](crate::Emitter). The pipeline core knows nothing about them.

mod logger;

pub use logger::PipelineLogger;
