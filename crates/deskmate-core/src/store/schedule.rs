//! Schedule/reminder cache synchronized with the backend.
//!
//! Same lifecycle shape as the task cache, minus toggling: entries are
//! created and deleted, never edited in place.

use std::sync::{Arc, Mutex as StdMutex};

use chrono::Utc;
use indexmap::IndexMap;
use tracing::debug;

use super::IdLocks;
use crate::bridge::Bridge;
use crate::error::{BridgeError, Result};
use crate::events::{Event, EventBus};
use crate::model::{NewSchedule, Schedule};

/// Locally authoritative schedule list, mirrored from the backend.
pub struct ScheduleStore {
    bridge: Arc<dyn Bridge>,
    events: Arc<EventBus>,
    cache: StdMutex<IndexMap<String, Schedule>>,
    locks: IdLocks,
}

impl ScheduleStore {
    pub fn new(bridge: Arc<dyn Bridge>, events: Arc<EventBus>) -> Self {
        Self {
            bridge,
            events,
            cache: StdMutex::new(IndexMap::new()),
            locks: IdLocks::default(),
        }
    }

    /// Create a schedule entry. Cached only once the backend confirms.
    pub async fn add(&self, new: NewSchedule) -> Result<Schedule> {
        if new.title.trim().is_empty() {
            return Err(BridgeError::InvalidInput {
                field: "title",
                message: "title must not be empty".to_string(),
            });
        }
        let schedule = self.bridge.add_schedule(new).await?;
        debug!(id = %schedule.id, "schedule confirmed by backend");
        {
            let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            cache.insert(schedule.id.clone(), schedule.clone());
        }
        self.changed();
        Ok(schedule)
    }

    /// Delete a schedule entry. The entry leaves the cache only on backend
    /// confirmation.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let gate = self.locks.gate(id);
        let _in_flight = gate.lock().await;

        self.bridge.delete_schedule(id).await?;
        {
            let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            cache.shift_remove(id);
        }
        self.changed();
        Ok(())
    }

    /// Replace the whole cache with a fresh backend snapshot.
    pub async fn load_all(&self) -> Result<()> {
        let snapshot = self.bridge.get_app_state().await?;
        self.replace(snapshot.schedules);
        Ok(())
    }

    /// Swap in an already-fetched snapshot (startup path).
    pub(crate) fn replace(&self, schedules: Vec<Schedule>) {
        {
            let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            cache.clear();
            for schedule in schedules {
                cache.insert(schedule.id.clone(), schedule);
            }
        }
        self.changed();
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Schedules in display (insertion) order.
    pub fn schedules(&self) -> Vec<Schedule> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.values().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<Schedule> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn changed(&self) {
        self.events.publish(&Event::SchedulesChanged { at: Utc::now() });
    }
}
