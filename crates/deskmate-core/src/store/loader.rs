//! Startup bootstrap.

use std::sync::Arc;

use tracing::info;

use super::{ScheduleStore, TaskStore};
use crate::bridge::Bridge;
use crate::error::Result;

/// Seeds both stores from one `get_app_state` snapshot at startup.
///
/// One fetch, not one per store -- the backend answers both halves in a
/// single round trip.
pub struct AppStateLoader {
    bridge: Arc<dyn Bridge>,
}

impl AppStateLoader {
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    pub async fn load(&self, tasks: &TaskStore, schedules: &ScheduleStore) -> Result<()> {
        let snapshot = self.bridge.get_app_state().await?;
        info!(
            tasks = snapshot.tasks.len(),
            schedules = snapshot.schedules.len(),
            "app state loaded"
        );
        tasks.replace(snapshot.tasks);
        schedules.replace(snapshot.schedules);
        Ok(())
    }
}
