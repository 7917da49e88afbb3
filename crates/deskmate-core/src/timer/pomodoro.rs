//! Pomodoro work/break engine.
//!
//! A compound machine: `cycle` (work or break) crossed with the countdown
//! phase. Keeping the cycle separate makes the duration lookup a pure
//! function of the cycle instead of duplicating countdown logic per side.
//!
//! When a cycle runs down the engine flips to the other cycle, reloads its
//! duration, and parks in `Idle` -- each transition is acknowledged by an
//! explicit `start`, never continued silently.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::engine::TimerPhase;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cycle {
    Work,
    Break,
}

impl Cycle {
    pub fn flipped(self) -> Self {
        match self {
            Cycle::Work => Cycle::Break,
            Cycle::Break => Cycle::Work,
        }
    }
}

/// Work/break durations in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroDurations {
    pub work_secs: u64,
    pub break_secs: u64,
}

impl Default for PomodoroDurations {
    /// The classic 25-minute focus / 5-minute break split.
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            break_secs: 5 * 60,
        }
    }
}

/// Alternating work/break countdown.
///
/// Same driving contract as [`TimerEngine`]: no internal thread, one
/// [`on_tick`] per second from the ticker, commands total in every state.
/// The `Expired` phase is never occupied here -- a cycle flip takes its
/// place.
///
/// [`TimerEngine`]: crate::timer::TimerEngine
/// [`on_tick`]: PomodoroEngine::on_tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroEngine {
    durations: PomodoroDurations,
    cycle: Cycle,
    phase: TimerPhase,
    /// Never exceeds the current cycle's duration.
    remaining_secs: u64,
}

impl PomodoroEngine {
    /// Canonical initial state: work cycle, idle, full work duration loaded.
    /// A zero duration is lifted to one second so the countdown is always
    /// well-formed.
    pub fn new(durations: PomodoroDurations) -> Self {
        let durations = PomodoroDurations {
            work_secs: durations.work_secs.max(1),
            break_secs: durations.break_secs.max(1),
        };
        Self {
            durations,
            cycle: Cycle::Work,
            phase: TimerPhase::Idle,
            remaining_secs: durations.work_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn durations(&self) -> PomodoroDurations {
        self.durations
    }

    /// Duration governing the current cycle.
    pub fn current_cycle_duration(&self) -> u64 {
        match self.cycle {
            Cycle::Work => self.durations.work_secs,
            Cycle::Break => self.durations.break_secs,
        }
    }

    /// Zero-padded `MM:SS` face for the display layer.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the current cycle. No-op while running.
    pub fn start(&mut self) -> Option<Event> {
        if self.phase == TimerPhase::Running {
            return None;
        }
        self.phase = TimerPhase::Running;
        Some(Event::PomodoroStarted {
            cycle: self.cycle,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting but keep cycle and remaining time. No-op unless running.
    pub fn pause(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.phase = TimerPhase::Paused;
        Some(Event::PomodoroPaused {
            cycle: self.cycle,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Return to the canonical initial state. Idempotent.
    pub fn reset(&mut self) -> Option<Event> {
        self.cycle = Cycle::Work;
        self.phase = TimerPhase::Idle;
        self.remaining_secs = self.durations.work_secs;
        Some(Event::PomodoroReset { at: Utc::now() })
    }

    /// Apply one tick. Same stale-tick guard as the plain engine: only the
    /// running phase reacts.
    pub fn on_tick(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        let previous_cycle = self.cycle;
        self.cycle = previous_cycle.flipped();
        self.remaining_secs = self.current_cycle_duration();
        self.phase = TimerPhase::Idle;
        Some(Event::CycleCompleted {
            previous_cycle,
            next_cycle: self.cycle,
            next_remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }
}

impl Default for PomodoroEngine {
    fn default() -> Self {
        Self::new(PomodoroDurations::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn secs(work: u64, brk: u64) -> PomodoroDurations {
        PomodoroDurations {
            work_secs: work,
            break_secs: brk,
        }
    }

    /// Run the engine through exactly `n` ticks while running.
    fn tick_n(engine: &mut PomodoroEngine, n: u64) -> Vec<Event> {
        (0..n).filter_map(|_| engine.on_tick()).collect()
    }

    #[test]
    fn initial_state_is_idle_work_at_full_duration() {
        let engine = PomodoroEngine::new(secs(4, 2));
        assert_eq!(engine.cycle(), Cycle::Work);
        assert_eq!(engine.phase(), TimerPhase::Idle);
        assert_eq!(engine.remaining_secs(), 4);
    }

    #[test]
    fn work_flips_to_break_after_exactly_work_duration_ticks() {
        let mut engine = PomodoroEngine::new(secs(3, 2));
        engine.start();

        assert!(tick_n(&mut engine, 2).is_empty());
        let events = tick_n(&mut engine, 1);
        match events.as_slice() {
            [Event::CycleCompleted {
                previous_cycle,
                next_cycle,
                next_remaining_secs,
                ..
            }] => {
                assert_eq!(*previous_cycle, Cycle::Work);
                assert_eq!(*next_cycle, Cycle::Break);
                assert_eq!(*next_remaining_secs, 2);
            }
            other => panic!("expected one CycleCompleted, got {other:?}"),
        }
        // The next cycle waits for an explicit acknowledgement.
        assert_eq!(engine.phase(), TimerPhase::Idle);
        assert_eq!(engine.cycle(), Cycle::Break);

        // No silent continuation: ticks while idle change nothing.
        assert!(tick_n(&mut engine, 5).is_empty());
        assert_eq!(engine.remaining_secs(), 2);
    }

    #[test]
    fn break_flips_back_to_work() {
        let mut engine = PomodoroEngine::new(secs(2, 3));
        engine.start();
        tick_n(&mut engine, 2);
        engine.start();
        let events = tick_n(&mut engine, 3);
        assert!(matches!(
            events.as_slice(),
            [Event::CycleCompleted {
                previous_cycle: Cycle::Break,
                next_cycle: Cycle::Work,
                ..
            }]
        ));
        assert_eq!(engine.remaining_secs(), 2);
    }

    #[test]
    fn pause_holds_cycle_and_remaining() {
        let mut engine = PomodoroEngine::new(secs(10, 5));
        engine.start();
        tick_n(&mut engine, 4);
        assert!(engine.pause().is_some());
        assert_eq!(engine.phase(), TimerPhase::Paused);

        // Stale tick after the pause.
        assert!(engine.on_tick().is_none());
        assert_eq!(engine.remaining_secs(), 6);

        engine.start();
        assert_eq!(engine.remaining_secs(), 6);
        assert_eq!(engine.cycle(), Cycle::Work);
    }

    #[test]
    fn reset_restores_canonical_state_idempotently() {
        let mut engine = PomodoroEngine::new(secs(2, 4));
        engine.start();
        tick_n(&mut engine, 2); // now in break, idle
        engine.start();
        tick_n(&mut engine, 1);

        engine.reset();
        assert_eq!(engine.cycle(), Cycle::Work);
        assert_eq!(engine.phase(), TimerPhase::Idle);
        assert_eq!(engine.remaining_secs(), 2);

        engine.reset();
        assert_eq!(engine.cycle(), Cycle::Work);
        assert_eq!(engine.remaining_secs(), 2);
    }

    #[test]
    fn zero_durations_are_lifted() {
        let engine = PomodoroEngine::new(secs(0, 0));
        assert_eq!(engine.durations(), secs(1, 1));
    }

    proptest! {
        /// Cycle alternation holds for arbitrary positive durations:
        /// exactly `work` ticks of running flip to break with the break
        /// duration loaded, and `brk` further ticks flip back to work.
        #[test]
        fn alternation_holds_for_arbitrary_durations(work in 1u64..300, brk in 1u64..300) {
            let mut engine = PomodoroEngine::new(secs(work, brk));
            engine.start();

            let events = tick_n(&mut engine, work);
            prop_assert_eq!(events.len(), 1);
            prop_assert_eq!(engine.cycle(), Cycle::Break);
            prop_assert_eq!(engine.remaining_secs(), brk);

            engine.start();
            let events = tick_n(&mut engine, brk);
            prop_assert_eq!(events.len(), 1);
            prop_assert_eq!(engine.cycle(), Cycle::Work);
            prop_assert_eq!(engine.remaining_secs(), work);
        }

        /// The countdown never exceeds the current cycle's duration.
        #[test]
        fn remaining_bounded_by_cycle_duration(work in 1u64..60, brk in 1u64..60, ticks in 0u64..400) {
            let mut engine = PomodoroEngine::new(secs(work, brk));
            engine.start();
            for _ in 0..ticks {
                if engine.phase() == TimerPhase::Idle {
                    engine.start();
                }
                engine.on_tick();
                prop_assert!(engine.remaining_secs() <= engine.current_cycle_duration());
            }
        }
    }
}
