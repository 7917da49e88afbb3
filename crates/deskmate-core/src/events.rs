//! Event types and the observer bus.
//!
//! Every state change in the system produces an [`Event`]. The engines
//! return events from their commands; the stores publish directly on the
//! [`EventBus`]. The rendering/notification layer subscribes to the bus
//! rather than polling component state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::timer::Cycle;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. The engine is back in idle by the time
    /// this is observed.
    TimerExpired {
        at: DateTime<Utc>,
    },
    PomodoroStarted {
        cycle: Cycle,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PomodoroPaused {
        cycle: Cycle,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PomodoroReset {
        at: DateTime<Utc>,
    },
    /// A work or break cycle ran down. The engine has flipped to the other
    /// cycle, reloaded its duration, and waits idle for an explicit start.
    CycleCompleted {
        previous_cycle: Cycle,
        next_cycle: Cycle,
        next_remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The task cache changed (confirmed mutation or snapshot load).
    TasksChanged {
        at: DateTime<Utc>,
    },
    /// The schedule cache changed.
    SchedulesChanged {
        at: DateTime<Utc>,
    },
}

type Observer = Box<dyn Fn(&Event) + Send>;

/// Handle returned by [`EventBus::subscribe`]; pass back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverHandle(usize);

/// Observer registry.
///
/// Events are delivered to observers in subscription order, synchronously
/// on the publishing turn. Slots are never reused, so a stale handle can
/// never detach someone else's observer.
#[derive(Default)]
pub struct EventBus {
    observers: Mutex<Vec<Option<Observer>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: impl Fn(&Event) + Send + 'static) -> ObserverHandle {
        let mut observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        observers.push(Some(Box::new(observer)));
        ObserverHandle(observers.len() - 1)
    }

    pub fn unsubscribe(&self, handle: ObserverHandle) {
        let mut observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(slot) = observers.get_mut(handle.0) {
            *slot = None;
        }
    }

    pub fn publish(&self, event: &Event) {
        let observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        for slot in observers.iter() {
            if let Some(observer) = slot {
                observer(event);
            }
        }
    }

    pub fn observer_count(&self) -> usize {
        let observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        observers.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn collect_into(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> impl Fn(&Event) + Send {
        let log = log.clone();
        move |_event| log.lock().unwrap().push(tag.to_string())
    }

    #[test]
    fn delivers_in_subscription_order() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        bus.subscribe(collect_into(&log, "first"));
        bus.subscribe(collect_into(&log, "second"));

        bus.publish(&Event::TimerReset { at: Utc::now() });

        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribed_observer_stops_receiving() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let handle = bus.subscribe(collect_into(&log, "gone"));
        bus.subscribe(collect_into(&log, "kept"));

        bus.unsubscribe(handle);
        bus.publish(&Event::TimerReset { at: Utc::now() });

        assert_eq!(*log.lock().unwrap(), vec!["kept"]);
        assert_eq!(bus.observer_count(), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let bus = EventBus::new();
        let handle = bus.subscribe(|_| {});
        bus.unsubscribe(handle);
        bus.unsubscribe(handle);
        assert_eq!(bus.observer_count(), 0);
    }
}
