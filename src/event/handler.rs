use std::any::Any;
use std::rc::Rc;
use thiserror::Error;

/// A zero-argument callback registered under an event name
///
/// Callbacks are shared handles so the identical closure can be registered
/// more than once, and so a trigger pass can snapshot the list cheaply.
/// State the callback needs is captured by the closure itself; use `Cell` or
/// `RefCell` for anything it mutates.
pub type Callback = Rc<dyn Fn()>;

/// Wraps a closure into a shareable [`Callback`]
pub fn callback<F>(f: F) -> Callback
where
    F: Fn() + 'static,
{
    Rc::new(f)
}

/// A single callback that panicked during a trigger pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("callback #{index} for event '{event}' failed: {message}")]
pub struct CallbackFailure {
    /// Event that was being triggered
    pub event: String,
    /// Position of the callback in registration order
    pub index: usize,
    /// Panic payload, when it was a string
    pub message: String,
}

impl CallbackFailure {
    pub(crate) fn from_panic(event: &str, index: usize, payload: Box<dyn Any + Send>) -> Self {
        Self {
            event: event.to_string(),
            index,
            message: panic_message(payload),
        }
    }
}

/// Errors returned by [`EventBus::trigger`](super::EventBus::trigger)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    /// Every callback ran; some of them failed
    #[error("{} callback(s) failed for event '{event}'", .failures.len())]
    CallbacksFailed {
        event: String,
        failures: Vec<CallbackFailure>,
    },

    /// The pass stopped at the first failure
    #[error("trigger aborted, {skipped} callback(s) skipped: {failure}")]
    Aborted {
        failure: CallbackFailure,
        skipped: usize,
    },
}

impl TriggerError {
    /// All callback failures carried by this error
    pub fn failures(&self) -> &[CallbackFailure] {
        match self {
            TriggerError::CallbacksFailed { failures, .. } => failures,
            TriggerError::Aborted { failure, .. } => std::slice::from_ref(failure),
        }
    }

    /// Name of the event whose trigger failed
    pub fn event(&self) -> &str {
        match self {
            TriggerError::CallbacksFailed { event, .. } => event,
            TriggerError::Aborted { failure, .. } => &failure.event,
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
