//! In-process backend with JSON persistence.
//!
//! Stands in for the external persistence process: same operations, same
//! id assignment and not-found behavior, state written to `app_data.json`
//! under the data directory. A failed write is undone in memory so the
//! backend never confirms a change it did not keep.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::Bridge;
use crate::error::{BridgeError, Result};
use crate::model::{AppStateSnapshot, NewSchedule, NewTask, Schedule, Task};
use crate::storage::data_dir;

#[derive(Debug, Default, Serialize, Deserialize)]
struct BackendData {
    #[serde(default)]
    tasks: IndexMap<String, Task>,
    #[serde(default)]
    schedules: IndexMap<String, Schedule>,
}

/// JSON-file backend living in the client process.
pub struct LocalBridge {
    path: PathBuf,
    data: Mutex<BackendData>,
}

impl LocalBridge {
    /// Open against `app_data.json` in the data directory.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("app_data.json");
        Self::with_path(path)
    }

    /// Open against an explicit file (tests point this at a temp dir).
    pub fn with_path(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            BackendData::default()
        };
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    fn persist(&self, data: &BackendData) -> Result<()> {
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[async_trait]
impl Bridge for LocalBridge {
    async fn get_app_state(&self) -> Result<AppStateSnapshot> {
        let data = self.data.lock().await;
        Ok(AppStateSnapshot {
            tasks: data.tasks.values().cloned().collect(),
            schedules: data.schedules.values().cloned().collect(),
        })
    }

    async fn add_task(&self, new: NewTask) -> Result<Task> {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            completed: false,
            created_at: Utc::now(),
            due_date: new.due_date,
        };
        let mut data = self.data.lock().await;
        data.tasks.insert(task.id.clone(), task.clone());
        if let Err(e) = self.persist(&data) {
            data.tasks.shift_remove(&task.id);
            return Err(e);
        }
        debug!(id = %task.id, "task created");
        Ok(task)
    }

    async fn toggle_task(&self, task_id: &str) -> Result<bool> {
        let mut data = self.data.lock().await;
        let task = data
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| BridgeError::not_found(task_id))?;
        task.completed = !task.completed;
        let completed = task.completed;
        if let Err(e) = self.persist(&data) {
            if let Some(task) = data.tasks.get_mut(task_id) {
                task.completed = !completed;
            }
            return Err(e);
        }
        debug!(id = %task_id, completed, "task toggled");
        Ok(completed)
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        let mut data = self.data.lock().await;
        let removed = data
            .tasks
            .shift_remove(task_id)
            .ok_or_else(|| BridgeError::not_found(task_id))?;
        if let Err(e) = self.persist(&data) {
            data.tasks.insert(removed.id.clone(), removed);
            return Err(e);
        }
        debug!(id = %task_id, "task deleted");
        Ok(())
    }

    async fn add_schedule(&self, new: NewSchedule) -> Result<Schedule> {
        let schedule = Schedule {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            start_time: new.start_time,
            end_time: new.end_time,
            is_reminder: new.is_reminder,
        };
        let mut data = self.data.lock().await;
        data.schedules.insert(schedule.id.clone(), schedule.clone());
        if let Err(e) = self.persist(&data) {
            data.schedules.shift_remove(&schedule.id);
            return Err(e);
        }
        debug!(id = %schedule.id, "schedule created");
        Ok(schedule)
    }

    async fn delete_schedule(&self, schedule_id: &str) -> Result<()> {
        let mut data = self.data.lock().await;
        let removed = data
            .schedules
            .shift_remove(schedule_id)
            .ok_or_else(|| BridgeError::not_found(schedule_id))?;
        if let Err(e) = self.persist(&data) {
            data.schedules.insert(removed.id.clone(), removed);
            return Err(e);
        }
        debug!(id = %schedule_id, "schedule deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_wire_time;

    fn temp_bridge(dir: &tempfile::TempDir) -> LocalBridge {
        LocalBridge::with_path(dir.path().join("app_data.json")).unwrap()
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: String::new(),
            due_date: None,
        }
    }

    #[tokio::test]
    async fn create_toggle_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = temp_bridge(&dir);

        let task = bridge.add_task(new_task("Buy milk")).await.unwrap();
        assert!(!task.completed);

        assert!(bridge.toggle_task(&task.id).await.unwrap());
        assert!(!bridge.toggle_task(&task.id).await.unwrap());

        bridge.delete_task(&task.id).await.unwrap();
        let snapshot = bridge.get_app_state().await.unwrap();
        assert!(snapshot.tasks.is_empty());
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = temp_bridge(&dir);

        assert!(matches!(
            bridge.toggle_task("missing").await,
            Err(BridgeError::NotFound { .. })
        ));
        assert!(matches!(
            bridge.delete_task("missing").await,
            Err(BridgeError::NotFound { .. })
        ));
        assert!(matches!(
            bridge.delete_schedule("missing").await,
            Err(BridgeError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_data.json");

        let created = {
            let bridge = LocalBridge::with_path(path.clone()).unwrap();
            bridge
                .add_schedule(NewSchedule {
                    title: "Stand-up".to_string(),
                    description: String::new(),
                    start_time: parse_wire_time("2025-01-06 09:30:00").unwrap(),
                    end_time: None,
                    is_reminder: true,
                })
                .await
                .unwrap()
        };

        let bridge = LocalBridge::with_path(path).unwrap();
        let snapshot = bridge.get_app_state().await.unwrap();
        assert_eq!(snapshot.schedules.len(), 1);
        assert_eq!(snapshot.schedules[0].id, created.id);
        assert_eq!(snapshot.schedules[0].title, "Stand-up");
    }

    #[tokio::test]
    async fn snapshot_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = temp_bridge(&dir);
        for title in ["a", "b", "c"] {
            bridge.add_task(new_task(title)).await.unwrap();
        }
        let snapshot = bridge.get_app_state().await.unwrap();
        let titles: Vec<_> = snapshot.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }
}
