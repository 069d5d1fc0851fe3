mod user;

use eventing::{EventBus, FailurePolicy, Observable};
use std::rc::Rc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user::{User, UserProps};

fn failure_policy_from_env() -> FailurePolicy {
    match std::env::var("EVENTING_FAILURE_POLICY") {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default failure policy");
            FailurePolicy::default()
        }),
        Err(_) => FailurePolicy::default(),
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventing=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let policy = failure_policy_from_env();
    info!(policy = %policy, "Starting eventing demo");

    let user = Rc::new(User::new(
        UserProps {
            name: Some("myname".to_string()),
            age: Some(20),
        },
        EventBus::new().with_failure_policy(policy),
    ));

    user.on("change", || info!("Change#1"));
    user.on("change", || info!("Change#2"));
    user.on("other", || info!("other"));

    // Views re-read the model when it changes
    let weak = Rc::downgrade(&user);
    user.on("change", move || {
        if let Some(user) = weak.upgrade() {
            info!(props = ?user.props(), "Re-rendering user view");
        }
    });

    for event in ["change", "other", "random"] {
        if let Err(e) = user.trigger(event) {
            error!(error = %e, "Trigger failed");
        }
    }

    if let Err(e) = user.set(UserProps {
        name: Some("updated".to_string()),
        age: None,
    }) {
        error!(error = %e, "Update notification failed");
    }

    info!(events = ?user.events(), "Demo finished");
}
