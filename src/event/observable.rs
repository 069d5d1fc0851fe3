use super::bus::EventBus;
use super::handler::{Callback, TriggerError};

/// Trait for objects that own an [`EventBus`] and expose its surface
///
/// Models, collections and views implement `events` and get `on`/`trigger`
/// by delegation. A model typically calls `trigger("change")` after it has
/// finished mutating its state.
pub trait Observable {
    /// The bus owned by this object
    fn events(&self) -> &EventBus;

    fn on<F>(&self, event_name: &str, f: F)
    where
        F: Fn() + 'static,
        Self: Sized,
    {
        self.events().on(event_name, f);
    }

    fn on_shared(&self, event_name: &str, callback: Callback) {
        self.events().on_shared(event_name, callback);
    }

    fn trigger(&self, event_name: &str) -> Result<(), TriggerError> {
        self.events().trigger(event_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Counter {
        value: Cell<u32>,
        events: EventBus,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                value: Cell::new(0),
                events: EventBus::new(),
            }
        }

        fn increment(&self) -> Result<(), TriggerError> {
            self.value.set(self.value.get() + 1);
            self.trigger("change")
        }
    }

    impl Observable for Counter {
        fn events(&self) -> &EventBus {
            &self.events
        }
    }

    #[test]
    fn test_mutation_notifies_change_subscribers() {
        let counter = Rc::new(Counter::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        // Subscribers re-read state instead of receiving it
        let weak = Rc::downgrade(&counter);
        let log = seen.clone();
        counter.on("change", move || {
            if let Some(counter) = weak.upgrade() {
                log.borrow_mut().push(counter.value.get());
            }
        });

        counter.increment().unwrap();
        counter.increment().unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_owners_do_not_share_buses() {
        let a = Counter::new();
        let b = Counter::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        a.on("change", move || f.set(true));

        b.increment().unwrap();
        assert!(!fired.get());
        assert_eq!(b.events().listener_count("change"), 0);
    }
}
