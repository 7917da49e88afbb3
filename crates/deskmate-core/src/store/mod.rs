//! Backend-synchronized caches.
//!
//! Both stores follow the same discipline: a mutation calls the backend
//! first and touches the in-memory cache only once the backend has
//! confirmed. A failed call therefore leaves the visible list at its
//! last-confirmed state -- no ghost entries, no partial updates. The cache
//! is mutated only by its owning store.

pub mod loader;
pub mod schedule;
pub mod task;

pub use loader::AppStateLoader;
pub use schedule::ScheduleStore;
pub use task::TaskStore;

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex as AsyncMutex;

/// Per-id mutation gates.
///
/// A later mutation on an id waits for an earlier in-flight one on the same
/// id to resolve; mutations on different ids proceed concurrently. Gates
/// are retained for the store's lifetime -- the registry is bounded by the
/// number of distinct ids ever mutated.
#[derive(Default)]
pub(crate) struct IdLocks {
    gates: StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl IdLocks {
    /// The gate for `id`, created on first use. Callers hold the returned
    /// mutex across the backend round trip.
    pub(crate) fn gate(&self, id: &str) -> Arc<AsyncMutex<()>> {
        let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        gates.entry(id.to_string()).or_default().clone()
    }
}
