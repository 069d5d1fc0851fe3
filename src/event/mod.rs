// Event subscription and triggering
//
// Each model or collection owns an EventBus and exposes it through the
// Observable trait. Triggers are synchronous and run callbacks in
// registration order.

// Public API - what other modules can use
pub use bus::EventBus;
pub use handler::{callback, Callback, CallbackFailure, TriggerError};
pub use observable::Observable;
pub use policy::{ConfigError, FailurePolicy};

// Internal modules
mod bus;
mod handler;
mod observable;
mod policy;
