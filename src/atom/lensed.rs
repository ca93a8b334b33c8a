//! Writable atoms derived through a lens.

use std::rc::Rc;

use super::broadcast::Observer;
use super::derived::{Derived, Link};
use super::node::{Source, Store};
use super::subscription::Subscription;
use crate::equality::StructEq;
use crate::optics::{Lens, Optic};

/// Reads like any derived node; writes go to the source store as a
/// read-modify-write through the lens, so the root's change detection and
/// propagation handle every write.
pub(crate) struct Lensed<S, T> {
    node: Rc<Derived<T>>,
    source: Rc<dyn Store<S>>,
    lens: Lens<S, T>,
}

impl<S: 'static, T: StructEq + Clone + 'static> Lensed<S, T> {
    pub(crate) fn create(source: Rc<dyn Store<S>>, lens: Lens<S, T>) -> Rc<Self> {
        let upstream: Rc<dyn Source<S>> = Rc::clone(&source) as Rc<dyn Source<S>>;
        let reader = lens.clone();
        let node = Derived::create(vec![Link::to(&upstream)], move || {
            reader.get(&upstream.get())
        });
        Rc::new(Self { node, source, lens })
    }
}

impl<S: 'static, T: StructEq + Clone + 'static> Source<T> for Lensed<S, T> {
    fn get(&self) -> T {
        self.node.get()
    }

    fn subscribe(self: Rc<Self>, observer: Observer<T>) -> Subscription {
        Rc::clone(&self.node).subscribe(observer)
    }

    fn rank(&self) -> usize {
        self.node.rank()
    }

    fn observer_count(&self) -> usize {
        self.node.observer_count()
    }

    fn version(&self) -> u64 {
        self.node.version()
    }

    fn is_settled(&self) -> bool {
        self.node.is_settled()
    }
}

impl<S: 'static, T: StructEq + Clone + 'static> Store<T> for Lensed<S, T> {
    fn modify(&self, update: Box<dyn FnOnce(T) -> T + '_>) {
        let lens = &self.lens;
        self.source
            .modify(Box::new(move |source| lens.modify(source, update)));
    }
}
