//! The optic abstraction shared by lenses and prisms.
//!
//! An optic is a pair of pure functions: a getter `S -> T` and a setter
//! `(S, U) -> S`. `modify` is always derived from the two and is never
//! written by hand.

use std::fmt;
use std::rc::Rc;

/// A getter/setter pair focusing on part of a source value.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `T`: The type read by [`get`](Optic::get)
/// - `U`: The type written by [`set`](Optic::set)
///
/// A [`Lens`](super::Lens) is an `Optic<S, A, A>` and a
/// [`Prism`](super::Prism) is an `Optic<S, Option<A>, A>`.
pub trait Optic<S, T, U> {
    /// Reads the focus out of `source`.
    fn get(&self, source: &S) -> T;

    /// Writes `value` into the focus of `source`, returning the new source.
    fn set(&self, source: S, value: U) -> S;

    /// Applies `function` to the focus.
    ///
    /// Equivalent to `self.set(source, function(self.get(&source)))`.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::optics::{Lens, Optic};
    ///
    /// let first = Lens::new(|pair: &(i32, i32)| pair.0, |pair: (i32, i32), value| (value, pair.1));
    /// assert_eq!(first.modify((1, 2), |value| value + 10), (11, 2));
    /// ```
    fn modify<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(T) -> U,
    {
        let value = function(self.get(&source));
        self.set(source, value)
    }
}

/// An optic built directly from a getter and a setter.
///
/// Use this when the read and write types differ; [`Lens::new`](super::Lens::new)
/// and [`Prism::new`](super::Prism::new) cover the monomorphic cases.
///
/// # Example
///
/// ```
/// use atomlens::optics::{FunctionOptic, Optic};
///
/// // read a length, write a string
/// let length = FunctionOptic::new(
///     |text: &String| text.len(),
///     |_: String, replacement: &'static str| replacement.to_string(),
/// );
///
/// assert_eq!(length.get(&"four".to_string()), 4);
/// assert_eq!(length.modify("four".to_string(), |_| "x"), "x");
/// ```
pub struct FunctionOptic<S, T, U> {
    getter: Rc<dyn Fn(&S) -> T>,
    setter: Rc<dyn Fn(S, U) -> S>,
}

impl<S, T, U> FunctionOptic<S, T, U> {
    /// Creates a new `FunctionOptic` from a getter and setter.
    #[must_use]
    pub fn new<G, St>(getter: G, setter: St) -> Self
    where
        G: Fn(&S) -> T + 'static,
        St: Fn(S, U) -> S + 'static,
    {
        Self {
            getter: Rc::new(getter),
            setter: Rc::new(setter),
        }
    }
}

impl<S, T, U> Optic<S, T, U> for FunctionOptic<S, T, U> {
    fn get(&self, source: &S) -> T {
        (self.getter)(source)
    }

    fn set(&self, source: S, value: U) -> S {
        (self.setter)(source, value)
    }
}

impl<S, T, U> Clone for FunctionOptic<S, T, U> {
    fn clone(&self) -> Self {
        Self {
            getter: Rc::clone(&self.getter),
            setter: Rc::clone(&self.setter),
        }
    }
}

impl<S, T, U> fmt::Debug for FunctionOptic<S, T, U> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FunctionOptic")
            .finish_non_exhaustive()
    }
}

/// An optic whose focus may be absent, seen uniformly.
///
/// Both lenses (always present) and prisms (maybe present) implement this,
/// which lets [`Prism::compose`](super::Prism::compose) accept either without
/// a separate code path.
pub trait PartialOptic<S, A> {
    /// Reads the focus, if present.
    fn preview(&self, source: &S) -> Option<A>;

    /// Writes the focus. `None` asks the optic to remove its focus; optics
    /// that cannot remove return the source unchanged.
    fn update(&self, source: S, value: Option<A>) -> S;
}
