use std::cell::RefCell;
use tracing::info;

use eventing::{EventBus, Observable, TriggerError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProps {
    pub name: Option<String>,
    pub age: Option<u32>,
}

/// Demo model that owns an event bus and triggers "change" on every update
#[derive(Debug)]
pub struct User {
    props: RefCell<UserProps>,
    events: EventBus,
}

impl User {
    pub fn new(props: UserProps, events: EventBus) -> Self {
        Self {
            props: RefCell::new(props),
            events,
        }
    }

    pub fn props(&self) -> UserProps {
        self.props.borrow().clone()
    }

    /// Merge the given fields into the current props, then notify subscribers
    pub fn set(&self, update: UserProps) -> Result<(), TriggerError> {
        {
            let mut props = self.props.borrow_mut();
            if update.name.is_some() {
                props.name = update.name;
            }
            if update.age.is_some() {
                props.age = update.age;
            }
            info!(props = ?*props, "User updated");
        }
        self.trigger("change")
    }
}

impl Observable for User {
    fn events(&self) -> &EventBus {
        &self.events
    }
}
