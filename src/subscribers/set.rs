//! # Ordered subscriber registry with snapshot semantics.
//!
//! [`SubscriberSet`] holds the registered subscribers in registration order.
//! The emitter mutates it (`add` / `remove`) while the dispatch worker reads a
//! [`snapshot`](SubscriberSet::snapshot) per delivery cycle.
//!
//! ## Rules
//! - **Registration order is notification order**: the dispatch worker walks
//!   the snapshot front to back.
//! - **Snapshot discipline**: a registration racing an in-progress delivery
//!   cycle may or may not be included in that cycle; it is never skipped
//!   inconsistently and never crashes the cycle.
//! - **Removal is by name**: the first subscriber whose `name()` matches is
//!   dropped from the set.

use std::sync::{Arc, PoisonError, RwLock};

use super::subscribe::Subscribe;

/// Shared, ordered set of subscribers.
#[derive(Default)]
pub struct SubscriberSet {
    subs: RwLock<Vec<Arc<dyn Subscribe>>>,
}

impl SubscriberSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            subs: RwLock::new(Vec::new()),
        }
    }

    /// Appends a subscriber; it will be notified after all earlier ones.
    pub fn add(&self, sub: Arc<dyn Subscribe>) {
        self.subs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sub);
    }

    /// Removes the first subscriber whose `name()` matches.
    ///
    /// Returns `true` if one was removed. An in-progress delivery cycle that
    /// already took its snapshot will still notify the removed subscriber for
    /// that one event.
    pub fn remove(&self, name: &str) -> bool {
        let mut subs = self.subs.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(idx) = subs.iter().position(|s| s.name() == name) {
            subs.remove(idx);
            true
        } else {
            false
        }
    }

    /// Returns a point-in-time copy of the registration list.
    pub fn snapshot(&self) -> Vec<Arc<dyn Subscribe>> {
        self.subs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.subs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when no subscribers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LogEvent;
    use async_trait::async_trait;

    struct Named(&'static str);

    #[async_trait]
    impl Subscribe for Named {
        async fn on_event(&self, _event: &LogEvent) {}
        fn name(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn test_snapshot_preserves_registration_order() {
        let set = SubscriberSet::new();
        set.add(Arc::new(Named("a")));
        set.add(Arc::new(Named("b")));
        set.add(Arc::new(Named("c")));

        let names: Vec<_> = set.snapshot().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_by_name() {
        let set = SubscriberSet::new();
        set.add(Arc::new(Named("a")));
        set.add(Arc::new(Named("b")));

        assert!(set.remove("a"));
        assert!(!set.remove("a"), "second removal finds nothing");
        assert_eq!(set.len(), 1);
        assert_eq!(set.snapshot()[0].name(), "b");
    }

    #[test]
    fn test_snapshot_is_detached_from_later_mutation() {
        let set = SubscriberSet::new();
        set.add(Arc::new(Named("a")));

        let snap = set.snapshot();
        set.add(Arc::new(Named("b")));

        assert_eq!(snap.len(), 1);
        assert_eq!(set.len(), 2);
    }
}
