//! # Deskmate Core Library
//!
//! Core logic for the Deskmate personal-productivity client: a plain
//! countdown timer, a Pomodoro work/break timer, and task/schedule lists
//! whose persistence is delegated to a backend process behind a
//! remote-procedure bridge.
//!
//! ## Architecture
//!
//! - **Timer engines**: state machines that own no thread -- the caller
//!   drives them by delivering one tick per second through a [`Ticker`]
//! - **Stores**: in-memory mirrors of the backend's task/schedule state,
//!   mutated only after the backend has confirmed each change
//! - **Bridge**: the async contract the backend process implements;
//!   [`LocalBridge`] is the in-process JSON-file implementation
//! - **Events**: every state change produces an [`Event`]; the rendering
//!   layer subscribes through an [`EventBus`] instead of polling
//!
//! ## Key Components
//!
//! - [`TimerEngine`] / [`PomodoroEngine`]: countdown state machines
//! - [`TaskStore`] / [`ScheduleStore`]: backend-synchronized caches
//! - [`AppStateLoader`]: startup bootstrap from one backend snapshot
//! - [`Config`]: TOML configuration for default durations

pub mod bridge;
pub mod error;
pub mod events;
pub mod model;
pub mod storage;
pub mod store;
pub mod timer;

pub use bridge::{Bridge, LocalBridge};
pub use error::{BridgeError, Result};
pub use events::{Event, EventBus, ObserverHandle};
pub use model::{
    format_wire_time, parse_wire_time, AppStateSnapshot, NewSchedule, NewTask, Schedule, Task,
};
pub use storage::Config;
pub use store::{AppStateLoader, ScheduleStore, TaskStore};
pub use timer::{Cycle, PomodoroDurations, PomodoroEngine, TickHandle, Ticker, TimerEngine, TimerPhase};
