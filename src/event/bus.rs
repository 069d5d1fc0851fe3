use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tracing::{debug, error, warn};

use super::handler::{callback, Callback, CallbackFailure, TriggerError};
use super::policy::FailurePolicy;

/// Registry of named events to the callbacks subscribed to them
///
/// Each model or collection owns one bus. Cloning a bus yields another handle
/// to the same registry, which is how a callback can subscribe or trigger on
/// the bus that is currently running it. The bus is single-threaded: trigger
/// runs every callback on the caller's thread before returning.
#[derive(Clone, Default)]
pub struct EventBus {
    /// event name -> callbacks in registration order
    callbacks: Rc<RefCell<HashMap<String, Vec<Callback>>>>,
    failure_policy: FailurePolicy,
}

impl EventBus {
    /// Creates an empty event bus that isolates failing callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how a trigger pass reacts to a failing callback
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Subscribe a closure to an event
    ///
    /// The closure is appended after any callbacks already registered under
    /// `event_name`; nothing is ever replaced.
    pub fn on<F>(&self, event_name: impl Into<String>, f: F)
    where
        F: Fn() + 'static,
    {
        self.on_shared(event_name, callback(f));
    }

    /// Subscribe an existing callback handle to an event
    ///
    /// Registering the same handle twice makes it run twice per trigger.
    pub fn on_shared(&self, event_name: impl Into<String>, callback: Callback) {
        let event_name = event_name.into();
        let mut callbacks = self.callbacks.borrow_mut();
        let handlers = callbacks.entry(event_name.clone()).or_default();
        handlers.push(callback);

        debug!(
            event = %event_name,
            listeners = handlers.len(),
            "Callback registered"
        );
    }

    /// Invoke every callback registered under `event_name`, in registration order
    ///
    /// The callback list is snapshotted before the first call, so callbacks
    /// added during this pass only run on the next trigger. A callback fails
    /// by panicking; what happens next depends on the bus's [`FailurePolicy`].
    pub fn trigger(&self, event_name: &str) -> Result<(), TriggerError> {
        let snapshot: Vec<Callback> = match self.callbacks.borrow().get(event_name) {
            Some(handlers) if !handlers.is_empty() => handlers.clone(),
            _ => {
                debug!(event = %event_name, "No callbacks registered - nothing to trigger");
                return Ok(());
            }
        };

        debug!(
            event = %event_name,
            listeners = snapshot.len(),
            policy = %self.failure_policy,
            "Triggering event"
        );

        let mut failures = Vec::new();

        for (index, handler) in snapshot.iter().enumerate() {
            let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| handler())) else {
                continue;
            };

            let failure = CallbackFailure::from_panic(event_name, index, payload);

            match self.failure_policy {
                FailurePolicy::Isolate => {
                    warn!(
                        event = %event_name,
                        index = index,
                        error = %failure.message,
                        "Callback failed, continuing with remaining callbacks"
                    );
                    failures.push(failure);
                }
                FailurePolicy::Abort => {
                    let skipped = snapshot.len() - index - 1;
                    error!(
                        event = %event_name,
                        index = index,
                        skipped = skipped,
                        error = %failure.message,
                        "Callback failed, aborting trigger"
                    );
                    return Err(TriggerError::Aborted { failure, skipped });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            error!(
                event = %event_name,
                failed = failures.len(),
                "Trigger completed with failed callbacks"
            );
            Err(TriggerError::CallbacksFailed {
                event: event_name.to_string(),
                failures,
            })
        }
    }

    /// Number of callbacks registered under `event_name`
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.callbacks
            .borrow()
            .get(event_name)
            .map_or(0, |handlers| handlers.len())
    }

    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.listener_count(event_name) > 0
    }

    /// Names of all events with at least one callback, sorted
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.callbacks.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let callbacks = self.callbacks.borrow();
        let mut counts: Vec<(&String, usize)> = callbacks
            .iter()
            .map(|(name, handlers)| (name, handlers.len()))
            .collect();
        counts.sort();

        f.debug_struct("EventBus")
            .field("events", &counts)
            .field("failure_policy", &self.failure_policy)
            .finish()
    }
}
