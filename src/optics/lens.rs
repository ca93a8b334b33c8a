//! Lens optics: a focus that is always present.
//!
//! A Lens provides get/set access to a part of a larger structure. Lenses
//! compose, allowing access to deeply nested values; writes thread through
//! the composed chain back to the outermost source.
//!
//! # Laws
//!
//! Every Lens must satisfy three laws (up to structural equality):
//!
//! 1. **GetPut Law**: Getting and setting back yields the original.
//!    ```text
//!    lens.set(source, lens.get(&source)) == source
//!    ```
//!
//! 2. **PutGet Law**: Setting then getting yields the set value.
//!    ```text
//!    lens.get(&lens.set(source, value)) == value
//!    ```
//!
//! 3. **PutPut Law**: Two consecutive sets is equivalent to the last set.
//!    ```text
//!    lens.set(lens.set(source, v1), v2) == lens.set(source, v2)
//!    ```
//!
//! # Examples
//!
//! ```
//! use atomlens::lens;
//! use atomlens::optics::Optic;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let x_lens = lens!(Point, x);
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(x_lens.get(&point), 10);
//!
//! let updated = x_lens.set(point, 100);
//! assert_eq!(updated.x, 100);
//! ```

use std::fmt;
use std::rc::Rc;

use super::optic::{Optic, PartialOptic};
use super::prism::Prism;
use crate::error::OpticError;

/// A Lens focuses on a value that is always present within a larger structure.
///
/// `Lens` is a cheap handle around a shared getter and setter; cloning it
/// does not clone the functions.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The target type (the focused value)
pub struct Lens<S, A> {
    getter: Rc<dyn Fn(&S) -> A>,
    setter: Rc<dyn Fn(S, A) -> S>,
}

impl<S, A> Lens<S, A> {
    /// Creates a new `Lens` from a getter and setter.
    ///
    /// # Arguments
    ///
    /// * `getter` - A function that extracts the focused value from the source
    /// * `setter` - A function that creates a new source with the value updated
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::optics::{Lens, Optic};
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let x_lens = Lens::new(
    ///     |point: &Point| point.x,
    ///     |point: Point, x: i32| Point { x, ..point },
    /// );
    ///
    /// let point = Point { x: 10, y: 20 };
    /// assert_eq!(x_lens.get(&point), 10);
    /// ```
    #[must_use]
    pub fn new<G, St>(getter: G, setter: St) -> Self
    where
        G: Fn(&S) -> A + 'static,
        St: Fn(S, A) -> S + 'static,
    {
        Self {
            getter: Rc::new(getter),
            setter: Rc::new(setter),
        }
    }
}

impl<S: 'static, A: 'static> Lens<S, A> {
    /// Composes this lens with another lens to focus on a nested value.
    ///
    /// The composed getter is `next.get ∘ self.get`; the composed setter reads
    /// the intermediate value, writes into it with `next`, and writes the
    /// result back with `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::lens;
    /// use atomlens::equality::StructEq;
    /// use atomlens::optics::Optic;
    ///
    /// #[derive(Clone, PartialEq, Debug, StructEq)]
    /// struct Inner { value: i32 }
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Outer { inner: Inner }
    ///
    /// let outer_value = lens!(Outer, inner).compose(lens!(Inner, value));
    ///
    /// let data = Outer { inner: Inner { value: 42 } };
    /// assert_eq!(outer_value.get(&data), 42);
    /// assert_eq!(outer_value.set(data, 7).inner.value, 7);
    /// ```
    #[must_use]
    pub fn compose<B: 'static>(self, next: Lens<A, B>) -> Lens<S, B> {
        let outer = self.clone();
        let inner = next.clone();
        Lens::new(
            move |source: &S| next.get(&self.get(source)),
            move |source: S, value: B| {
                let intermediate = outer.get(&source);
                let updated = inner.set(intermediate, value);
                outer.set(source, updated)
            },
        )
    }

    /// Composes this lens with a prism. The result may miss its focus, so it
    /// is a [`Prism`].
    #[must_use]
    pub fn compose_prism<B: 'static>(self, next: Prism<A, B>) -> Prism<S, B> {
        Prism::from(self).compose(next)
    }
}

impl<S: 'static> Lens<S, S> {
    /// The identity lens: reads the source itself, and `set` replaces it.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::optics::{Lens, Optic};
    ///
    /// let identity = Lens::<i32, i32>::identity();
    /// assert_eq!(identity.get(&5), 5);
    /// assert_eq!(identity.set(5, 6), 6);
    /// ```
    #[must_use]
    pub fn identity() -> Self
    where
        S: Clone,
    {
        Self::new(S::clone, |_: S, value: S| value)
    }

    /// Composes a list of lenses left to right.
    ///
    /// A single lens is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`OpticError::EmptyComposition`] when `lenses` is empty; there
    /// is no sensible lens to return for that case other than
    /// [`Lens::identity`], which the caller should ask for explicitly.
    pub fn compose_all<I>(lenses: I) -> Result<Self, OpticError>
    where
        I: IntoIterator<Item = Self>,
    {
        lenses
            .into_iter()
            .reduce(Self::compose)
            .ok_or(OpticError::EmptyComposition)
    }
}

impl<S, A> Optic<S, A, A> for Lens<S, A> {
    fn get(&self, source: &S) -> A {
        (self.getter)(source)
    }

    fn set(&self, source: S, value: A) -> S {
        (self.setter)(source, value)
    }
}

impl<S, A> PartialOptic<S, A> for Lens<S, A> {
    fn preview(&self, source: &S) -> Option<A> {
        Some(self.get(source))
    }

    fn update(&self, source: S, value: Option<A>) -> S {
        match value {
            Some(value) => self.set(source, value),
            None => source,
        }
    }
}

impl<S, A> Clone for Lens<S, A> {
    fn clone(&self) -> Self {
        Self {
            getter: Rc::clone(&self.getter),
            setter: Rc::clone(&self.setter),
        }
    }
}

impl<S, A> fmt::Debug for Lens<S, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Lens").finish_non_exhaustive()
    }
}

/// Creates a lens for a struct field.
///
/// The setter leaves the source untouched when the new value is structurally
/// equal to the current one, so shared (`Rc`) fields keep their identity.
///
/// # Syntax
///
/// ```text
/// lens!(StructType, field_name)
/// ```
///
/// # Requirements
///
/// The field type must implement `Clone` and
/// [`StructEq`](crate::equality::StructEq).
///
/// # Example
///
/// ```
/// use atomlens::lens;
/// use atomlens::optics::Optic;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = lens!(Point, x);
/// let y_lens = lens!(Point, y);
///
/// let point = Point { x: 10, y: 20 };
///
/// assert_eq!(x_lens.get(&point), 10);
/// assert_eq!(y_lens.get(&point), 20);
///
/// let updated = x_lens.set(point, 100);
/// assert_eq!(updated, Point { x: 100, y: 20 });
///
/// let doubled = x_lens.modify(updated, |x| x * 2);
/// assert_eq!(doubled.x, 200);
/// ```
#[macro_export]
macro_rules! lens {
    ($struct_type:ident, $field:ident) => {
        $crate::optics::Lens::new(
            |source: &$struct_type| ::std::clone::Clone::clone(&source.$field),
            |mut source: $struct_type, value| {
                if !$crate::equality::equals(&source.$field, &value) {
                    source.$field = value;
                }
                source
            },
        )
    };
    ($struct_type:ident < $($generic:tt),+ >, $field:ident) => {
        $crate::optics::Lens::new(
            |source: &$struct_type<$($generic),+>| ::std::clone::Clone::clone(&source.$field),
            |mut source: $struct_type<$($generic),+>, value| {
                if !$crate::equality::equals(&source.$field, &value) {
                    source.$field = value;
                }
                source
            },
        )
    };
    ($struct_type:path, $field:ident) => {
        $crate::optics::Lens::new(
            |source: &$struct_type| ::std::clone::Clone::clone(&source.$field),
            |mut source: $struct_type, value| {
                if !$crate::equality::equals(&source.$field, &value) {
                    source.$field = value;
                }
                source
            },
        )
    };
}
