//! One-second tick fan-out.

type TickFn = Box<dyn FnMut() + Send>;

/// Handle returned by [`Ticker::subscribe`]; pass back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle(usize);

/// Delivers one tick per second to every subscriber, however many engines
/// are running.
///
/// The ticker owns no thread or interval -- the driver calls [`emit`] once
/// per wall-clock second. Delivery within one emission follows subscription
/// order. Slots are never reused, so a stale handle can never detach a
/// later subscriber.
///
/// [`emit`]: Ticker::emit
#[derive(Default)]
pub struct Ticker {
    subscribers: Vec<Option<TickFn>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut() + Send + 'static) -> TickHandle {
        self.subscribers.push(Some(Box::new(callback)));
        TickHandle(self.subscribers.len() - 1)
    }

    pub fn unsubscribe(&mut self, handle: TickHandle) {
        if let Some(slot) = self.subscribers.get_mut(handle.0) {
            *slot = None;
        }
    }

    /// Deliver one tick to every live subscriber, in subscription order.
    pub fn emit(&mut self) {
        for slot in &mut self.subscribers {
            if let Some(callback) = slot {
                callback();
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> impl FnMut() + Send {
        let log = log.clone();
        move || log.lock().unwrap().push(tag)
    }

    #[test]
    fn ticks_reach_subscribers_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut ticker = Ticker::new();
        ticker.subscribe(recorder(&log, "a"));
        ticker.subscribe(recorder(&log, "b"));

        ticker.emit();
        ticker.emit();

        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn unsubscribed_callback_gets_no_ticks() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut ticker = Ticker::new();
        let handle = ticker.subscribe(recorder(&log, "gone"));
        ticker.subscribe(recorder(&log, "kept"));

        ticker.unsubscribe(handle);
        ticker.emit();

        assert_eq!(*log.lock().unwrap(), vec!["kept"]);
        assert_eq!(ticker.subscriber_count(), 1);
    }

    #[test]
    fn stale_handle_does_not_touch_later_subscribers() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut ticker = Ticker::new();
        let first = ticker.subscribe(recorder(&log, "first"));
        ticker.unsubscribe(first);
        ticker.subscribe(recorder(&log, "second"));

        ticker.unsubscribe(first); // already vacated
        ticker.emit();

        assert_eq!(*log.lock().unwrap(), vec!["second"]);
    }
}
