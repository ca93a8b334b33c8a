//! The generic derived node.
//!
//! Views, lensed atoms and combined atoms are all a `Derived`: a compute
//! function over one or more sources. A node is in one of two states:
//!
//! ```text
//!            first subscribe
//!  Detached ─────────────────▶ Attached { cached, upstream, dirty }
//!     ▲                              │
//!     └──────────────────────────────┘
//!            last unsubscribe
//! ```
//!
//! While detached it holds no upstream subscription and every `get`
//! recomputes. While attached it holds exactly one subscription per source,
//! shared by all of its observers, and `get` returns the cached value.
//! During a propagation pass the cache is only trusted once every source is
//! at the version it was computed from; a read that runs ahead of the pass
//! (from another atom's observer) recomputes instead.
//! `Connecting` is the short state during attach in which the sources replay
//! their current value; those replays are ignored.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::broadcast::{Broadcast, Observer, Slot};
use super::node::Source;
use super::propagation::{self, Deferred};
use super::subscription::Subscription;
use crate::equality::{StructEq, equals};

type Connect = Box<dyn Fn(Rc<dyn Fn()>) -> Subscription>;

/// An edge to one source of a derived node.
pub(crate) struct Link {
    rank: usize,
    connect: Connect,
    version: Box<dyn Fn() -> u64>,
    settled: Box<dyn Fn() -> bool>,
}

impl Link {
    pub(crate) fn to<S: 'static>(source: &Rc<dyn Source<S>>) -> Self {
        let source = Rc::clone(source);
        let versioned = Rc::clone(&source);
        let watched = Rc::clone(&source);
        Self {
            rank: source.rank(),
            connect: Box::new(move |notify| {
                Rc::clone(&source).subscribe(Rc::new(move |_: &S| notify()))
            }),
            version: Box::new(move || versioned.version()),
            settled: Box::new(move || watched.is_settled()),
        }
    }
}

enum State<T> {
    Detached,
    Connecting,
    Attached {
        cached: T,
        upstream: Vec<Subscription>,
        dirty: bool,
    },
}

pub(crate) struct Derived<T> {
    this: Weak<Self>,
    compute: Box<dyn Fn() -> T>,
    links: Vec<Link>,
    rank: usize,
    observers: Broadcast<T>,
    state: RefCell<State<T>>,
    queued: Cell<bool>,
    version: Cell<u64>,
    seen: Vec<Cell<u64>>,
}

impl<T: StructEq + Clone + 'static> Derived<T> {
    pub(crate) fn create<F>(links: Vec<Link>, compute: F) -> Rc<Self>
    where
        F: Fn() -> T + 'static,
    {
        let rank = 1 + links.iter().map(|link| link.rank).max().unwrap_or(0);
        let seen = links.iter().map(|_| Cell::new(0)).collect();
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            compute: Box::new(compute),
            links,
            rank,
            observers: Broadcast::new(),
            state: RefCell::new(State::Detached),
            queued: Cell::new(false),
            version: Cell::new(0),
            seen,
        })
    }

    fn is_attached(&self) -> bool {
        matches!(*self.state.borrow(), State::Attached { .. })
    }

    /// Records the source versions the next computation reads.
    fn mark_seen(&self) {
        for (link, seen) in self.links.iter().zip(&self.seen) {
            seen.set((link.version)());
        }
    }

    /// `true` when no source changed since the last computation and none is
    /// waiting on a deferred flush.
    fn sources_settled(&self) -> bool {
        self.links
            .iter()
            .zip(&self.seen)
            .all(|(link, seen)| (link.version)() == seen.get() && (link.settled)())
    }

    fn attach(&self) {
        *self.state.borrow_mut() = State::Connecting;

        let this = self.this.clone();
        let notify: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(node) = this.upgrade() {
                node.on_source_changed();
            }
        });
        let upstream = self
            .links
            .iter()
            .map(|link| (link.connect)(Rc::clone(&notify)))
            .collect();
        self.mark_seen();
        let cached = (self.compute)();

        *self.state.borrow_mut() = State::Attached {
            cached,
            upstream,
            dirty: false,
        };
        tracing::debug!(target: "atomlens", rank = self.rank, sources = self.links.len(), "derived atom attached");
    }

    fn release(&self, slot: &Rc<Slot<T>>) {
        if self.observers.remove(slot) {
            let previous = self.state.replace(State::Detached);
            self.queued.set(false);
            drop(previous);
            tracing::debug!(target: "atomlens", rank = self.rank, "derived atom detached");
        }
    }

    fn on_source_changed(&self) {
        {
            let mut state = self.state.borrow_mut();
            let State::Attached { dirty, .. } = &mut *state else {
                return;
            };
            *dirty = true;
            if self.links.len() > 1 && propagation::in_pass() {
                if !self.queued.replace(true) {
                    let node: Weak<dyn Deferred> = self.this.clone();
                    propagation::defer(self.rank, node);
                }
                return;
            }
        }
        self.refresh();
    }

    fn refresh(&self) {
        self.mark_seen();
        let next = (self.compute)();
        let changed = {
            let mut state = self.state.borrow_mut();
            match &mut *state {
                State::Attached { cached, dirty, .. } => {
                    *dirty = false;
                    if equals(cached, &next) {
                        false
                    } else {
                        *cached = next.clone();
                        self.version.set(self.version.get() + 1);
                        true
                    }
                }
                State::Detached | State::Connecting => false,
            }
        };
        if changed {
            self.observers.emit(&next);
        }
    }
}

impl<T: StructEq + Clone + 'static> Source<T> for Derived<T> {
    fn get(&self) -> T {
        if let State::Attached {
            cached,
            dirty: false,
            ..
        } = &*self.state.borrow()
            && (!propagation::in_pass() || self.sources_settled())
        {
            return cached.clone();
        }
        (self.compute)()
    }

    fn subscribe(self: Rc<Self>, observer: Observer<T>) -> Subscription {
        if !self.is_attached() {
            self.attach();
        }
        let slot = self.observers.add(Rc::clone(&observer));
        observer(&self.get());
        Subscription::new(move || self.release(&slot))
    }

    fn rank(&self) -> usize {
        self.rank
    }

    fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn version(&self) -> u64 {
        self.version.get()
    }

    fn is_settled(&self) -> bool {
        match &*self.state.borrow() {
            State::Attached { dirty: true, .. } => false,
            State::Attached { .. } => self.sources_settled(),
            State::Detached | State::Connecting => {
                self.links.iter().all(|link| (link.settled)())
            }
        }
    }
}

impl<T: StructEq + Clone + 'static> Deferred for Derived<T> {
    fn flush(&self) {
        if self.queued.replace(false) && self.is_attached() {
            self.refresh();
        }
    }

    fn cancel(&self) {
        self.queued.set(false);
    }
}
