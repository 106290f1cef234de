//! Pipeline core: submission, dispatch, and lifecycle.
//!
//! This module contains the embedded implementation of the emission pipeline.
//! The only public API from this module is [`Emitter`], the façade producers
//! and the external control layer interact with.
//!
//! Internal modules:
//! - [`pool`]: fixed worker pool that absorbs producer calls and enqueues entries;
//! - [`dispatch`]: single consumer task that delivers in order and counts;
//! - [`emitter`]: façade owning lifecycle, counters, and subscriber registration.

mod dispatch;
mod emitter;
mod pool;

pub use emitter::Emitter;
