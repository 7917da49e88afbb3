//! Countdown engines and the tick primitive driving them.
//!
//! Neither engine owns a thread. The driver calls [`Ticker::emit`] once per
//! wall-clock second and each engine applies the tick through its own
//! subscription. Ticks are counted, not measured against the wall clock, so
//! modest delivery jitter does not accumulate into state errors.

pub mod engine;
pub mod pomodoro;
pub mod ticker;

pub use engine::{TimerEngine, TimerPhase};
pub use pomodoro::{Cycle, PomodoroDurations, PomodoroEngine};
pub use ticker::{TickHandle, Ticker};
