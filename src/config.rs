//! # Emitter configuration.
//!
//! Provides [`EmitterConfig`], the centralized settings consumed by
//! [`Emitter::new`](crate::Emitter::new).
//!
//! ## Sentinel values
//! - `pool_size = 0` → clamped to 1 (the pool always has at least one worker)
//! - `queue_capacity = 0` → clamped to 1 (used only as an allocation hint)

/// Configuration for the emission pipeline.
///
/// Defines:
/// - **Submission concurrency**: number of pool workers building queue entries
/// - **Queue sizing**: initial capacity hint for the delivery heap
/// - **Pass-through filters**: opaque strings stored for an external control
///   layer; the core never interprets them
///
/// ## Field semantics
/// - `pool_size`: fixed worker count of the submission pool (min 1; clamped)
/// - `queue_capacity`: sizing hint only — insertion beyond it is still accepted;
///   the bound caps steady-state allocation, it does not enforce back-pressure
/// - `level` / `filter_expression` / `filter_script_file`: initial values for
///   the emitter's pass-through configuration accessors
#[derive(Clone, Debug)]
pub struct EmitterConfig {
    /// Number of submission-pool workers that build and enqueue entries.
    pub pool_size: usize,

    /// Delivery queue capacity hint.
    ///
    /// Pushes past this size are still accepted; a sustained producer rate above
    /// the dispatch rate grows the queue without bound.
    pub queue_capacity: usize,

    /// Opaque level string, held for the external control surface.
    pub level: Option<String>,

    /// Opaque filter expression, held for the external control surface.
    pub filter_expression: Option<String>,

    /// Opaque filter script path, held for the external control surface.
    pub filter_script_file: Option<String>,
}

impl EmitterConfig {
    /// Returns the pool size clamped to a minimum of 1.
    #[inline]
    pub fn pool_size_clamped(&self) -> usize {
        self.pool_size.max(1)
    }

    /// Returns the queue capacity hint clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for EmitterConfig {
    /// Default configuration:
    ///
    /// - `pool_size = 5`
    /// - `queue_capacity = 100`
    /// - no pass-through filter values
    fn default() -> Self {
        Self {
            pool_size: 5,
            queue_capacity: 100,
            level: None,
            filter_expression: None,
            filter_script_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EmitterConfig::default();
        assert_eq!(cfg.pool_size, 5);
        assert_eq!(cfg.queue_capacity, 100);
        assert!(cfg.level.is_none());
        assert!(cfg.filter_expression.is_none());
        assert!(cfg.filter_script_file.is_none());
    }

    #[test]
    fn test_zero_values_are_clamped() {
        let cfg = EmitterConfig {
            pool_size: 0,
            queue_capacity: 0,
            ..EmitterConfig::default()
        };
        assert_eq!(cfg.pool_size_clamped(), 1);
        assert_eq!(cfg.queue_capacity_clamped(), 1);
    }
}
