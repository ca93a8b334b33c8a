//! Read-only atom handles.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::derived::{Derived, Link};
use super::node::Source;
use super::subscription::Subscription;
use crate::equality::StructEq;
use crate::optics::{Lens, Optic, Prism};

/// An observable value that can be read and derived from, but not written.
///
/// Cloning the handle is cheap and yields the same atom.
///
/// # Type Parameters
///
/// - `T`: The value type; it must be `Clone` because reads return owned
///   values
///
/// # Example
///
/// ```
/// use atomlens::atom::Atom;
///
/// let celsius = Atom::create(20.0_f64);
/// let fahrenheit = celsius.view(|value| value * 9.0 / 5.0 + 32.0);
///
/// assert!((fahrenheit.get() - 68.0).abs() < f64::EPSILON);
/// celsius.set(100.0);
/// assert!((fahrenheit.get() - 212.0).abs() < f64::EPSILON);
/// ```
pub struct ReadOnlyAtom<T> {
    source: Rc<dyn Source<T>>,
}

impl<T: Clone + 'static> ReadOnlyAtom<T> {
    pub(crate) fn from_source(source: Rc<dyn Source<T>>) -> Self {
        Self { source }
    }

    pub(crate) fn link(&self) -> Link {
        Link::to(&self.source)
    }

    pub(crate) fn source(&self) -> Rc<dyn Source<T>> {
        Rc::clone(&self.source)
    }

    /// Returns the current value.
    ///
    /// A derived atom with at least one subscriber returns its cached value;
    /// otherwise the value is recomputed from the sources on every call.
    pub fn get(&self) -> T {
        self.source.get()
    }

    /// Calls `observer` with the current value now, and again after every
    /// change.
    ///
    /// Observers are only called when the new value is not structurally
    /// equal to the previous one.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        Rc::clone(&self.source).subscribe(Rc::new(observer))
    }

    /// Returns this atom as a read-only handle.
    #[must_use]
    pub fn read_only(&self) -> Self {
        self.clone()
    }

    /// Derives a read-only atom by applying `selector` to this atom's value.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::atom::Atom;
    ///
    /// let name = Atom::create("ann".to_string());
    /// let length = name.view(|name| name.len());
    ///
    /// assert_eq!(length.get(), 3);
    /// ```
    #[must_use]
    pub fn view<U, F>(&self, selector: F) -> ReadOnlyAtom<U>
    where
        U: StructEq + Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        let source = self.source();
        let node = Derived::create(vec![self.link()], move || selector(&source.get()));
        ReadOnlyAtom::from_source(node)
    }

    /// Derives a read-only atom focused through `lens`.
    #[must_use]
    pub fn view_lens<U>(&self, lens: Lens<T, U>) -> ReadOnlyAtom<U>
    where
        U: StructEq + Clone + 'static,
    {
        self.view(move |value| lens.get(value))
    }

    /// Derives a read-only atom focused through `prism`; its value is `None`
    /// while the focus is absent.
    #[must_use]
    pub fn view_prism<U>(&self, prism: Prism<T, U>) -> ReadOnlyAtom<Option<U>>
    where
        U: StructEq + Clone + 'static,
    {
        self.view(move |value| prism.get(value))
    }

    /// Calls `logger(previous, next)` on every change, starting with
    /// `(initial, initial)` right away.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::atom::Atom;
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let atom = Atom::create("bar");
    /// let calls = Rc::new(RefCell::new(Vec::new()));
    ///
    /// let record = Rc::clone(&calls);
    /// let _logging = atom.log_with(move |previous, next| record.borrow_mut().push((*previous, *next)));
    /// atom.set("foo");
    ///
    /// assert_eq!(*calls.borrow(), [("bar", "bar"), ("bar", "foo")]);
    /// ```
    pub fn log_with<F>(&self, logger: F) -> Subscription
    where
        F: Fn(&T, &T) + 'static,
    {
        let previous: RefCell<Option<T>> = RefCell::new(None);
        self.subscribe(move |next| {
            let last = previous.replace(Some(next.clone()));
            logger(last.as_ref().unwrap_or(next), next);
        })
    }

    /// Emits a `tracing` event on target `atomlens` for every change.
    pub fn log(&self, name: &str) -> Subscription
    where
        T: fmt::Debug,
    {
        let name = name.to_string();
        self.log_with(move |previous, next| {
            tracing::info!(target: "atomlens", atom = %name, ?previous, ?next, "atom updated");
        })
    }

    /// Number of observers directly subscribed to this atom.
    ///
    /// Each derived atom with subscribers counts as one observer of its
    /// sources, however many subscribers it has itself.
    pub fn observer_count(&self) -> usize {
        self.source.observer_count()
    }

    /// Returns `true` if both handles refer to the same atom.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.source, &other.source)
    }
}

impl<T> Clone for ReadOnlyAtom<T> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
        }
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for ReadOnlyAtom<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ReadOnlyAtom")
            .field("value", &self.get())
            .finish()
    }
}
