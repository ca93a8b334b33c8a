//! Subscription handles.

use std::fmt;

/// A live registration of an observer on an atom.
///
/// Dropping the handle unsubscribes. [`unsubscribe`](Subscription::unsubscribe)
/// can be called any number of times; only the first call has an effect.
///
/// # Example
///
/// ```
/// use atomlens::atom::Atom;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let atom = Atom::create(1);
/// let calls = Rc::new(Cell::new(0));
///
/// let counter = Rc::clone(&calls);
/// let mut subscription = atom.subscribe(move |_| counter.set(counter.get() + 1));
/// assert_eq!(calls.get(), 1);
///
/// subscription.unsubscribe();
/// subscription.unsubscribe();
/// atom.set(2);
/// assert_eq!(calls.get(), 1);
/// ```
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A subscription that is already closed.
    pub const fn closed() -> Self {
        Self { teardown: None }
    }

    /// Removes the observer. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    /// Returns `true` once the observer has been removed.
    pub const fn is_closed(&self) -> bool {
        self.teardown.is_none()
    }

    /// Keeps the observer registered for the rest of the program.
    ///
    /// The observer and every atom it depends on are leaked.
    pub fn detach(mut self) {
        std::mem::forget(self.teardown.take());
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
