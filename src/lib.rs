// Backbone-style eventing for client-side models and collections
// This file exposes the public API for integration tests

pub mod event;

// Re-export commonly used types for easier access in tests
pub use event::{
    callback, Callback, CallbackFailure, ConfigError, EventBus, FailurePolicy, Observable,
    TriggerError,
};
