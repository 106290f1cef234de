//! # Event subscribers for the emission pipeline.
//!
//! Provides the [`Subscribe`] trait, the [`SubscriberSet`] registry shared
//! between the emitter (mutation) and the dispatch worker (iteration), and an
//! optional built-in [`LogWriter`].
//!
//! ```text
//! Event flow:
//!   DispatchWorker ── snapshot() ──► [sub1, sub2, ..., subN]  (registration order)
//!                                        │
//!                                        └─► subX.on_event(&LogEvent)
//!                                               (panic-isolated per call)
//! ```

mod set;
mod subscribe;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogWriter;
