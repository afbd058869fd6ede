//! In-process change notification channel.
//!
//! # Responsibility
//! - Hold observer registrations for locator change events.
//! - Publish "locator changed" events synchronously after successful
//!   mutations.
//!
//! # Invariants
//! - Publishing is fire-and-forget: the publisher does not inspect
//!   observer outcomes, but observers run on the publisher's call stack
//!   and therefore see the change before the mutating call returns.
//! - Observers must not re-enter the provider's write path; the backing
//!   store is single-writer.

use crate::locator::Locator;
use log::debug;
use std::sync::Arc;

/// Callback contract for change observers.
///
/// Typical observers re-issue `query` for the published locator; the
/// event carries no data.
pub trait ChangeObserver: Send + Sync {
    fn on_change(&self, locator: &Locator);
}

/// Registry of change observers with synchronous publish.
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Vec<Arc<dyn ChangeObserver>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one observer handle.
    pub fn register(&mut self, observer: Arc<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Publishes a change for `locator` to every registered observer, in
    /// registration order, on the current call stack.
    pub fn publish(&self, locator: &Locator) {
        debug!(
            "event=change_published module=notify locator={} observers={}",
            locator,
            self.observers.len()
        );
        for observer in &self.observers {
            observer.on_change(locator);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeNotifier, ChangeObserver};
    use crate::locator::Locator;
    use std::sync::{Arc, Mutex};

    struct RecordingObserver {
        label: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl ChangeObserver for RecordingObserver {
        fn on_change(&self, locator: &Locator) {
            self.seen
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.label, locator));
        }
    }

    #[test]
    fn publish_reaches_observers_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();
        notifier.register(Arc::new(RecordingObserver {
            label: "first",
            seen: Arc::clone(&seen),
        }));
        notifier.register(Arc::new(RecordingObserver {
            label: "second",
            seen: Arc::clone(&seen),
        }));

        notifier.publish(&Locator::collection("shelter.example"));

        let events = seen.lock().unwrap();
        assert_eq!(
            events.as_slice(),
            [
                "first:shelter.example/pets",
                "second:shelter.example/pets"
            ]
        );
    }

    #[test]
    fn publish_without_observers_is_a_no_op() {
        let notifier = ChangeNotifier::new();
        notifier.publish(&Locator::collection("shelter.example"));
        assert_eq!(notifier.observer_count(), 0);
    }
}
