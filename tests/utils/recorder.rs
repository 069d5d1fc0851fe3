use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// Call recording for callbacks
// ============================================================================

/// Records the order in which tagged callbacks were invoked
#[derive(Clone, Default)]
pub struct CallRecorder {
    calls: Rc<RefCell<Vec<String>>>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that records `tag` each time it runs
    pub fn callback(&self, tag: &str) -> impl Fn() + 'static {
        let calls = self.calls.clone();
        let tag = tag.to_string();
        move || calls.borrow_mut().push(tag.clone())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, tag: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == tag).count()
    }
}
