//! Bounded store of pending callback redirects.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::callback::descriptor::RedirectDescriptor;
use crate::config::CallbackConfig;
use crate::observability::metrics;

/// One registered redirect. It can only be moved out, never read in place.
#[derive(Debug)]
pub struct PendingCallback {
    descriptor: RedirectDescriptor,
    registered_at: Instant,
}

impl PendingCallback {
    fn new(descriptor: RedirectDescriptor) -> Self {
        Self {
            descriptor,
            registered_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.registered_at.elapsed() >= ttl
    }

    fn take(self) -> RedirectDescriptor {
        self.descriptor
    }
}

/// Maps request ids to pending redirects.
///
/// Every entry is delivered at most once: [`CallbackStore::take`] removes it
/// in the same step that reads it. Entries older than the TTL count as absent,
/// and registering beyond capacity evicts the oldest entry.
///
/// Registrations are serialized so the capacity bound holds under concurrent
/// inserts; `take` only removes and never waits on them.
#[derive(Debug)]
pub struct CallbackStore {
    slots: DashMap<String, PendingCallback>,
    insert_lock: Mutex<()>,
    max_entries: usize,
    ttl: Duration,
}

impl CallbackStore {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            slots: DashMap::new(),
            insert_lock: Mutex::new(()),
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    pub fn from_config(config: &CallbackConfig) -> Self {
        Self::new(config.max_entries, Duration::from_secs(config.ttl_secs))
    }

    /// Store `descriptor` under `request_id`, replacing any earlier registration.
    pub fn register(&self, request_id: String, descriptor: RedirectDescriptor) {
        let guard = self
            .insert_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !self.slots.contains_key(&request_id) {
            self.make_room();
        }
        self.slots.insert(request_id, PendingCallback::new(descriptor));
        drop(guard);
        metrics::record_callbacks_pending(self.slots.len());
    }

    /// Remove and return the redirect for `request_id`, if one is live.
    pub fn take(&self, request_id: &str) -> Option<RedirectDescriptor> {
        let (_, pending) = self.slots.remove(request_id)?;
        metrics::record_callbacks_pending(self.slots.len());
        if pending.is_expired(self.ttl) {
            tracing::debug!(request_id = %request_id, "Dropping expired callback");
            return None;
        }
        Some(pending.take())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn make_room(&self) {
        if self.slots.len() < self.max_entries {
            return;
        }
        let ttl = self.ttl;
        self.slots.retain(|_, pending| !pending.is_expired(ttl));

        while self.slots.len() >= self.max_entries {
            let oldest = self
                .slots
                .iter()
                .min_by_key(|entry| entry.value().registered_at)
                .map(|entry| entry.key().clone());
            let Some(oldest) = oldest else { break };
            tracing::warn!(request_id = %oldest, "Callback store full, evicting oldest registration");
            self.slots.remove(&oldest);
        }
    }
}
