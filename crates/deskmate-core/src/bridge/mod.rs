//! Remote-procedure bridge to the persistence backend.
//!
//! Persistence of tasks and schedules is delegated to a backend process;
//! the client holds only an in-memory mirror. Every backend operation the
//! client consumes goes through this trait, and every call suspends the
//! calling operation until the backend responds -- the event loop stays
//! free to process ticks and other input during the wait.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{AppStateSnapshot, NewSchedule, NewTask, Schedule, Task};

pub mod local;

pub use local::LocalBridge;

/// The backend operations the client consumes.
#[async_trait]
pub trait Bridge: Send + Sync {
    /// Full `{tasks, schedules}` snapshot, fetched once at startup.
    async fn get_app_state(&self) -> Result<AppStateSnapshot>;

    /// Create a task. The backend assigns the id.
    async fn add_task(&self, new: NewTask) -> Result<Task>;

    /// Flip a task's completion flag; the response carries the resulting
    /// value, which is authoritative over any local flip.
    async fn toggle_task(&self, task_id: &str) -> Result<bool>;

    /// Delete a task by id.
    async fn delete_task(&self, task_id: &str) -> Result<()>;

    /// Create a schedule entry. The backend assigns the id.
    async fn add_schedule(&self, new: NewSchedule) -> Result<Schedule>;

    /// Delete a schedule entry by id.
    async fn delete_schedule(&self, schedule_id: &str) -> Result<()>;
}
