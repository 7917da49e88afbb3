//! Task cache synchronized with the backend.

use std::sync::{Arc, Mutex as StdMutex};

use chrono::Utc;
use indexmap::IndexMap;
use tracing::debug;

use super::IdLocks;
use crate::bridge::Bridge;
use crate::error::{BridgeError, Result};
use crate::events::{Event, EventBus};
use crate::model::{NewTask, Task};

/// Locally authoritative task list, mirrored from the backend.
///
/// Keys are backend-assigned ids; insertion order is preserved for
/// display. Mutations on the same id are serialized; mutations on
/// different ids may run concurrently. Every confirmed change publishes
/// [`Event::TasksChanged`] on the bus.
pub struct TaskStore {
    bridge: Arc<dyn Bridge>,
    events: Arc<EventBus>,
    cache: StdMutex<IndexMap<String, Task>>,
    locks: IdLocks,
}

impl TaskStore {
    pub fn new(bridge: Arc<dyn Bridge>, events: Arc<EventBus>) -> Self {
        Self {
            bridge,
            events,
            cache: StdMutex::new(IndexMap::new()),
            locks: IdLocks::default(),
        }
    }

    /// Create a task. Only a confirmed task, carrying its backend-assigned
    /// id, ever enters the cache -- a failed call leaves no ghost entry.
    pub async fn add(&self, new: NewTask) -> Result<Task> {
        if new.title.trim().is_empty() {
            return Err(BridgeError::InvalidInput {
                field: "title",
                message: "title must not be empty".to_string(),
            });
        }
        let task = self.bridge.add_task(new).await?;
        debug!(id = %task.id, "task confirmed by backend");
        {
            let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            cache.insert(task.id.clone(), task.clone());
        }
        self.changed();
        Ok(task)
    }

    /// Flip a task's completion flag through the backend.
    ///
    /// The cached value is set to whatever the backend answered rather than
    /// flipped locally -- a concurrent external mutation may have moved the
    /// flag since we last looked. On failure the cache is untouched.
    pub async fn toggle_completion(&self, id: &str) -> Result<bool> {
        let gate = self.locks.gate(id);
        let _in_flight = gate.lock().await;

        let completed = self.bridge.toggle_task(id).await?;
        {
            let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(task) = cache.get_mut(id) {
                task.completed = completed;
            }
        }
        self.changed();
        Ok(completed)
    }

    /// Delete a task. The entry leaves the cache only on backend
    /// confirmation.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let gate = self.locks.gate(id);
        let _in_flight = gate.lock().await;

        self.bridge.delete_task(id).await?;
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
        self.replace(snapshot.tasks);
        Ok(())
    }

    /// Swap in an already-fetched snapshot (startup path).
    pub(crate) fn replace(&self, tasks: Vec<Task>) {
        {
            let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            cache.clear();
            for task in tasks {
                cache.insert(task.id.clone(), task);
            }
        }
        self.changed();
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Tasks in display (insertion) order.
    pub fn tasks(&self) -> Vec<Task> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.values().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<Task> {
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
        self.events.publish(&Event::TasksChanged { at: Utc::now() });
    }
}
