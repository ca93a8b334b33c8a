//! Observer lists that tolerate mutation during dispatch.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;

/// A subscriber callback.
pub(crate) type Observer<T> = Rc<dyn Fn(&T)>;

/// One registered observer. `active` is cleared on removal so a dispatch
/// already in progress skips it.
pub(crate) struct Slot<T> {
    observer: Observer<T>,
    active: Cell<bool>,
}

/// The observers of one atom.
///
/// `emit` iterates over a snapshot, so observers may subscribe or
/// unsubscribe (themselves or others) while being notified.
pub(crate) struct Broadcast<T> {
    slots: RefCell<SmallVec<[Rc<Slot<T>>; 2]>>,
}

impl<T> Broadcast<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: RefCell::new(SmallVec::new()),
        }
    }

    pub(crate) fn add(&self, observer: Observer<T>) -> Rc<Slot<T>> {
        let slot = Rc::new(Slot {
            observer,
            active: Cell::new(true),
        });
        self.slots.borrow_mut().push(Rc::clone(&slot));
        slot
    }

    /// Removes `slot`; returns `true` if no observers remain.
    pub(crate) fn remove(&self, slot: &Rc<Slot<T>>) -> bool {
        slot.active.set(false);
        let mut slots = self.slots.borrow_mut();
        slots.retain(|candidate| !Rc::ptr_eq(candidate, slot));
        slots.is_empty()
    }

    pub(crate) fn emit(&self, value: &T) {
        let snapshot = self.slots.borrow().clone();
        for slot in snapshot {
            if slot.active.get() {
                (slot.observer)(value);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.borrow().len()
    }
}
