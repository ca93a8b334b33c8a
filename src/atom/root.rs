//! Root atoms: the only nodes that own their value.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::broadcast::{Broadcast, Observer};
use super::node::{Source, Store};
use super::propagation;
use super::subscription::Subscription;
use crate::warning::warning;

type Equality<T> = Box<dyn Fn(&T, &T) -> bool>;

pub(crate) struct Root<T> {
    value: RefCell<T>,
    equality: Equality<T>,
    observers: Broadcast<T>,
    updating: Cell<bool>,
    version: Cell<u64>,
}

impl<T> Root<T> {
    pub(crate) fn new(initial: T, equality: Equality<T>) -> Self {
        Self {
            value: RefCell::new(initial),
            equality,
            observers: Broadcast::new(),
            updating: Cell::new(false),
            version: Cell::new(0),
        }
    }
}

/// Restores the `updating` flag even if the update function panics.
struct UpdatingGuard<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> UpdatingGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        Self {
            previous: flag.replace(true),
            flag,
        }
    }
}

impl Drop for UpdatingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

impl<T: Clone + 'static> Source<T> for Root<T> {
    fn get(&self) -> T {
        self.value.borrow().clone()
    }

    fn subscribe(self: Rc<Self>, observer: Observer<T>) -> Subscription {
        let slot = self.observers.add(Rc::clone(&observer));
        observer(&self.get());
        Subscription::new(move || {
            self.observers.remove(&slot);
        })
    }

    fn rank(&self) -> usize {
        0
    }

    fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn version(&self) -> u64 {
        self.version.get()
    }
}

impl<T: Clone + 'static> Store<T> for Root<T> {
    fn modify(&self, update: Box<dyn FnOnce(T) -> T + '_>) {
        if self.updating.get() {
            warning(
                "Atom::modify was called on an atom from inside its own update function; \
                 the outer update will overwrite the inner one",
            );
        }

        let current = self.get();
        let next = {
            let _guard = UpdatingGuard::enter(&self.updating);
            update(current)
        };

        if (self.equality)(&self.value.borrow(), &next) {
            return;
        }

        *self.value.borrow_mut() = next.clone();
        self.version.set(self.version.get() + 1);
        tracing::trace!(target: "atomlens", observers = self.observers.len(), "root atom committed");
        propagation::run(|| self.observers.emit(&next));
    }
}
