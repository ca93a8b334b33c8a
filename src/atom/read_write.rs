//! Writable atom handles.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use super::lensed::Lensed;
use super::node::{Source, Store};
use super::read_only::ReadOnlyAtom;
use super::root::Root;
use crate::equality::{StructEq, equals};
use crate::optics::{Lens, Prism};

/// An observable value that can be read, written and derived from.
///
/// An `Atom` dereferences to [`ReadOnlyAtom`], so every read-side operation
/// (`get`, `subscribe`, `view`, ...) is available on it as well.
///
/// # Example
///
/// ```
/// use atomlens::atom::Atom;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let atom = Atom::create(1);
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let log = Rc::clone(&seen);
/// let _subscription = atom.subscribe(move |value| log.borrow_mut().push(*value));
///
/// atom.set(2);
/// atom.set(2);
/// atom.set(3);
///
/// assert_eq!(*seen.borrow(), [1, 2, 3]);
/// ```
pub struct Atom<T> {
    store: Rc<dyn Store<T>>,
    read: ReadOnlyAtom<T>,
}

impl<T: StructEq + Clone + 'static> Atom<T> {
    /// Creates a root atom holding `initial`.
    ///
    /// Writes that leave the value structurally equal are ignored.
    #[must_use]
    pub fn create(initial: T) -> Self {
        Self::create_with_equality(initial, equals::<T>)
    }

    /// Creates a writable atom focused through `lens`.
    ///
    /// Reads follow the same cached-or-recomputed rule as views. Writes
    /// become a read-modify-write on this atom using the lens's setter.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::atom::Atom;
    /// use atomlens::optics::Lens;
    ///
    /// let pair = Atom::create((1, "one".to_string()));
    /// let number = pair.lens(Lens::new(|pair: &(i32, String)| pair.0, |pair: (i32, String), value| (value, pair.1)));
    ///
    /// number.modify(|value| value + 1);
    /// assert_eq!(pair.get(), (2, "one".to_string()));
    /// ```
    #[must_use]
    pub fn lens<U>(&self, lens: Lens<T, U>) -> Atom<U>
    where
        U: StructEq + Clone + 'static,
    {
        Atom::from_store(Lensed::create(Rc::clone(&self.store), lens))
    }

    /// Creates a writable atom focused through `prism`.
    ///
    /// Its value is `None` while the focus is absent. Writing `Some` sets
    /// the focus (a no-op when the prism cannot reach it); writing `None`
    /// removes it for prisms that support removal.
    #[must_use]
    pub fn lens_prism<U>(&self, prism: Prism<T, U>) -> Atom<Option<U>>
    where
        U: StructEq + Clone + 'static,
    {
        self.lens(prism.into_option_lens())
    }
}

impl<T: Clone + 'static> Atom<T> {
    /// Creates a root atom that compares values with `equality` instead of
    /// structural equality.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::atom::Atom;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// // compare case-insensitively
    /// let atom = Atom::create_with_equality("Hi".to_string(), |a: &String, b: &String| {
    ///     a.eq_ignore_ascii_case(b)
    /// });
    /// let calls = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&calls);
    /// let _subscription = atom.subscribe(move |_| counter.set(counter.get() + 1));
    ///
    /// atom.set("HI".to_string());
    /// assert_eq!(calls.get(), 1);
    /// assert_eq!(atom.get(), "Hi");
    /// ```
    #[must_use]
    pub fn create_with_equality<F>(initial: T, equality: F) -> Self
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        Self::from_store(Rc::new(Root::new(initial, Box::new(equality))))
    }

    fn from_store(store: Rc<dyn Store<T>>) -> Self {
        let source: Rc<dyn Source<T>> = Rc::clone(&store) as Rc<dyn Source<T>>;
        Self {
            store,
            read: ReadOnlyAtom::from_source(source),
        }
    }

    /// Replaces the value. Observers are notified only if the new value
    /// differs from the current one.
    pub fn set(&self, value: T) {
        self.modify(move |_| value);
    }

    /// Replaces the value with `update(current)`.
    ///
    /// All affected observers are notified before this returns.
    pub fn modify<F>(&self, update: F)
    where
        F: FnOnce(T) -> T,
    {
        self.store.modify(Box::new(update));
    }

    /// Returns a read-only handle to this atom.
    #[must_use]
    pub fn read_only(&self) -> ReadOnlyAtom<T> {
        self.read.clone()
    }
}

impl<T> Deref for Atom<T> {
    type Target = ReadOnlyAtom<T>;

    fn deref(&self) -> &Self::Target {
        &self.read
    }
}

impl<T> Clone for Atom<T> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            read: self.read.clone(),
        }
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Atom<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Atom")
            .field("value", &self.get())
            .finish()
    }
}

impl<T: Clone + 'static> From<Atom<T>> for ReadOnlyAtom<T> {
    fn from(atom: Atom<T>) -> Self {
        atom.read
    }
}
