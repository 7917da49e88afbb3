//! Plain countdown engine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running
//!           |
//!           v (remaining hits zero on a tick)
//!        Expired -> Idle
//! ```
//!
//! `Expired` is held only for the instant of the expiry tick; the engine
//! hands itself back in `Idle` so the next run starts clean. Expiry is
//! observable through the returned [`Event::TimerExpired`].

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Single countdown state machine.
///
/// Owns no thread: wire [`on_tick`] to a [`Ticker`] subscription and the
/// driver delivers one tick per second. Every command is a total function
/// of the current state -- there are no failure conditions.
///
/// [`on_tick`]: TimerEngine::on_tick
/// [`Ticker`]: crate::timer::Ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    phase: TimerPhase,
    /// Whole seconds left. Zero only while idle (and for the instant of
    /// expiry) -- a running countdown always has at least one second left.
    remaining_secs: u64,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Idle,
            remaining_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Zero-padded `MM:SS` face for the display layer.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down, or resume a paused countdown.
    ///
    /// An empty countdown is loaded with `requested_minutes`; a paused one
    /// keeps its remaining time. Starting with zero minutes on an empty
    /// countdown is a no-op, as is starting while already running.
    pub fn start(&mut self, requested_minutes: u64) -> Option<Event> {
        if self.phase == TimerPhase::Running {
            return None;
        }
        if self.remaining_secs == 0 {
            if requested_minutes == 0 {
                return None;
            }
            self.remaining_secs = requested_minutes.saturating_mul(60);
        }
        self.phase = TimerPhase::Running;
        Some(Event::TimerStarted {
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting but keep the remaining time. No-op unless running.
    pub fn pause(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.phase = TimerPhase::Paused;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Unconditionally return to idle with the countdown cleared. Idempotent.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = TimerPhase::Idle;
        self.remaining_secs = 0;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Apply one tick.
    ///
    /// Ignores ticks in any phase but `Running`, so a tick already queued
    /// for a just-paused or just-reset engine cannot move its state.
    pub fn on_tick(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.phase = TimerPhase::Expired;
        let event = Event::TimerExpired { at: Utc::now() };
        // The UI is expected to treat expiry as terminal for this run, so
        // hand the engine back ready for the next one.
        self.phase = TimerPhase::Idle;
        Some(event)
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
