pub mod pomodoro;
pub mod schedule;
pub mod task;
pub mod timer;

use std::sync::Arc;

use deskmate_core::{Bridge, EventBus, LocalBridge};

/// The bridge every command talks through. The CLI always runs against the
/// in-process JSON-file backend; a desktop shell would substitute its own.
pub fn open_bridge() -> Result<Arc<dyn Bridge>, Box<dyn std::error::Error>> {
    Ok(Arc::new(LocalBridge::open()?))
}

/// One shared bus per invocation; commands subscribe printers to it.
pub fn event_bus() -> Arc<EventBus> {
    Arc::new(EventBus::new())
}
