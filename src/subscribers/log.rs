//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints dispatched [`LogEvent`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [INFO] seq=1 logger="app" msg="service up"
//! [WARN] seq=2 logger="app.db" msg="slow query" err="timeout after 5s"
//! ```

use async_trait::async_trait;

use crate::events::LogEvent;
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &LogEvent) {
        let level = e.level.as_deref().unwrap_or("?");
        let logger = e.logger.as_deref().unwrap_or("<unknown>");
        let msg = e.message.as_deref().unwrap_or("");
        match e.error.as_deref() {
            Some(err) => {
                println!("[{level}] seq={} logger={logger:?} msg={msg:?} err={err:?}", e.seq);
            }
            None => {
                println!("[{level}] seq={} logger={logger:?} msg={msg:?}", e.seq);
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
