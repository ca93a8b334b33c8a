//! Prism optics: a focus that may be absent.
//!
//! A Prism reads an `Option<A>` out of its source. Writing a value through a
//! prism whose focus does not exist leaves the source unchanged; this is a
//! defined no-op, not an error.
//!
//! Some prisms can also *remove* their focus (for example a JSON object key).
//! Those are built with [`Prism::with_removal`]; [`Prism::into_option_lens`]
//! exposes the removal as writing `None`.
//!
//! # Laws
//!
//! 1. **GetPut Law**: if `prism.get(&source) == Some(value)` then
//!    `prism.set(source, value) == source`.
//! 2. **PutGet Law**: if the focus exists, `prism.get(&prism.set(source, value)) == Some(value)`.
//! 3. **PutPut Law**: `prism.set(prism.set(source, v1), v2) == prism.set(source, v2)`.
//!
//! # Examples
//!
//! ```
//! use atomlens::prism;
//! use atomlens::optics::Optic;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! enum Shape {
//!     Circle(f64),
//!     Square(f64),
//! }
//!
//! let circle_prism = prism!(Shape, Circle);
//!
//! assert_eq!(circle_prism.get(&Shape::Circle(5.0)), Some(5.0));
//! assert_eq!(circle_prism.get(&Shape::Square(3.0)), None);
//!
//! // writing into the wrong variant is a no-op
//! assert_eq!(circle_prism.set(Shape::Square(3.0), 1.0), Shape::Square(3.0));
//! ```

use std::fmt;
use std::rc::Rc;

use super::lens::Lens;
use super::optic::{Optic, PartialOptic};
use crate::error::OpticError;

/// A Prism focuses on a value that may or may not be present in a structure.
///
/// # Type Parameters
///
/// - `S`: The source type
/// - `A`: The focused type; reads yield `Option<A>`
pub struct Prism<S, A> {
    getter: Rc<dyn Fn(&S) -> Option<A>>,
    setter: Rc<dyn Fn(S, Option<A>) -> S>,
}

impl<S, A> Prism<S, A> {
    /// Creates a new `Prism` from a partial getter and a setter.
    ///
    /// The setter is only consulted with a definite value. It must return the
    /// source unchanged when the focus does not exist.
    ///
    /// # Arguments
    ///
    /// * `getter` - Extracts the focus, or `None` when absent
    /// * `setter` - Writes a value into the focus
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::optics::{Optic, Prism};
    ///
    /// let first = Prism::new(
    ///     |items: &Vec<i32>| items.first().copied(),
    ///     |mut items: Vec<i32>, value| {
    ///         if let Some(slot) = items.first_mut() {
    ///             *slot = value;
    ///         }
    ///         items
    ///     },
    /// );
    ///
    /// assert_eq!(first.get(&vec![1, 2]), Some(1));
    /// assert_eq!(first.set(vec![1, 2], 9), vec![9, 2]);
    /// assert_eq!(first.set(Vec::new(), 9), Vec::<i32>::new());
    /// ```
    #[must_use]
    pub fn new<G, St>(getter: G, setter: St) -> Self
    where
        G: Fn(&S) -> Option<A> + 'static,
        St: Fn(S, A) -> S + 'static,
    {
        Self {
            getter: Rc::new(getter),
            setter: Rc::new(move |source, value| match value {
                Some(value) => setter(source, value),
                None => source,
            }),
        }
    }

    /// Creates a `Prism` whose setter can also remove the focus.
    ///
    /// The setter receives `None` when the focus should be removed.
    #[must_use]
    pub fn with_removal<G, St>(getter: G, setter: St) -> Self
    where
        G: Fn(&S) -> Option<A> + 'static,
        St: Fn(S, Option<A>) -> S + 'static,
    {
        Self {
            getter: Rc::new(getter),
            setter: Rc::new(setter),
        }
    }

    /// Removes the focus from `source`.
    ///
    /// Prisms built with [`Prism::new`] cannot remove and return the source
    /// unchanged.
    #[must_use]
    pub fn remove(&self, source: S) -> S {
        (self.setter)(source, None)
    }

    /// Applies `function` to the focus only when it is present.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::optics::json;
    /// use serde_json::json;
    ///
    /// let a = json::key("a");
    /// assert_eq!(a.modify_present(json!({"a": 1}), |v| json!(v.as_i64().unwrap() + 1)), json!({"a": 2}));
    /// assert_eq!(a.modify_present(json!({}), |_| json!(0)), json!({}));
    /// ```
    pub fn modify_present<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(A) -> A,
    {
        match (self.getter)(&source) {
            Some(value) => (self.setter)(source, Some(function(value))),
            None => source,
        }
    }
}

impl<S: 'static, A: 'static> Prism<S, A> {
    /// A prism that never has a focus: `get` is always `None` and `set`
    /// always returns the source unchanged.
    ///
    /// Used as the "not found" result of search-style prisms.
    #[must_use]
    pub fn nothing() -> Self {
        Self::with_removal(|_: &S| None, |source: S, _: Option<A>| source)
    }

    /// Builds a prism that picks which optic to use by looking at the source.
    ///
    /// `select` is called on every read and every write.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::optics::{Optic, Prism};
    /// use atomlens::optics::vec::index;
    ///
    /// // focus the last element, whatever the length
    /// let last = Prism::choose(|items: &Vec<i32>| match items.len() {
    ///     0 => Prism::nothing(),
    ///     length => index(length - 1),
    /// });
    ///
    /// assert_eq!(last.get(&vec![1, 2, 3]), Some(3));
    /// assert_eq!(last.set(vec![1, 2, 3], 30), vec![1, 2, 30]);
    /// ```
    #[must_use]
    pub fn choose<F>(select: F) -> Self
    where
        F: Fn(&S) -> Self + 'static,
    {
        let select = Rc::new(select);
        let reader = Rc::clone(&select);
        Self::with_removal(
            move |source: &S| reader(source).preview(source),
            move |source: S, value: Option<A>| select(&source).update(source, value),
        )
    }

    /// Composes this prism with a lens or another prism.
    ///
    /// Reads short-circuit to `None` when this prism's focus is absent; writes
    /// are then a no-op. Otherwise the write goes into the focus through
    /// `next` and the result is written back through `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::optics::{json, Optic};
    /// use serde_json::json;
    ///
    /// let a_b = json::key("a").compose(json::key("b"));
    ///
    /// assert_eq!(a_b.get(&json!({"a": {"b": 1}})), Some(json!(1)));
    /// assert_eq!(a_b.get(&json!({})), None);
    /// assert_eq!(a_b.set(json!({"a": {}}), json!(2)), json!({"a": {"b": 2}}));
    /// assert_eq!(a_b.set(json!({}), json!(2)), json!({}));
    /// ```
    #[must_use]
    pub fn compose<B, O>(self, next: O) -> Prism<S, B>
    where
        B: 'static,
        O: PartialOptic<A, B> + 'static,
    {
        let next = Rc::new(next);
        let outer = self.clone();
        let inner = Rc::clone(&next);
        Prism::with_removal(
            move |source: &S| self.preview(source).and_then(|focus| next.preview(&focus)),
            move |source: S, value: Option<B>| match outer.preview(&source) {
                Some(focus) => {
                    let updated = inner.update(focus, value);
                    outer.update(source, Some(updated))
                }
                None => source,
            },
        )
    }

    /// Views this prism as a lens onto `Option<A>`.
    ///
    /// Writing `Some` sets the focus; writing `None` removes it (a no-op for
    /// prisms that cannot remove).
    #[must_use]
    pub fn into_option_lens(self) -> Lens<S, Option<A>> {
        let writer = self.clone();
        Lens::new(
            move |source: &S| self.preview(source),
            move |source: S, value: Option<A>| writer.update(source, value),
        )
    }

    /// Resolves a prism with a lens over its optional focus, typically
    /// [`with_default`](super::with_default), turning it back into a lens.
    ///
    /// When `next` asks to clear the focus and this prism cannot remove it,
    /// the value `next` reads for `None` is stored instead, so a read after
    /// the write still returns what was written.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::optics::{json, with_default, Optic};
    /// use serde_json::json;
    ///
    /// let c = json::key("c").compose_lens(with_default(json!(666)));
    ///
    /// assert_eq!(c.get(&json!({"a": 5})), json!(666));
    /// assert_eq!(c.set(json!({"a": 5}), json!(666)), json!({"a": 5}));
    /// assert_eq!(c.set(json!({"a": 5}), json!(1)), json!({"a": 5, "c": 1}));
    ///
    /// // array slots cannot be removed, so the default is written out
    /// let first = json::index(0).compose_lens(with_default(json!(0)));
    /// assert_eq!(first.set(json!([5]), json!(0)), json!([0]));
    /// ```
    #[must_use]
    pub fn compose_lens(self, next: Lens<Option<A>, A>) -> Lens<S, A> {
        let reader = self.clone();
        let inner = next.clone();
        Lens::new(
            move |source: &S| next.get(&reader.preview(source)),
            move |source: S, value: A| {
                let focus = self.preview(&source);
                match inner.set(focus, value) {
                    Some(resolved) => self.update(source, Some(resolved)),
                    None => {
                        let removed = self.update(source, None);
                        if self.preview(&removed).is_some() {
                            self.update(removed, Some(inner.get(&None)))
                        } else {
                            removed
                        }
                    }
                }
            },
        )
    }
}

impl<S: 'static> Prism<S, S> {
    /// Composes a list of prisms left to right.
    ///
    /// # Errors
    ///
    /// Returns [`OpticError::EmptyComposition`] when `prisms` is empty.
    pub fn compose_all<I>(prisms: I) -> Result<Self, OpticError>
    where
        I: IntoIterator<Item = Self>,
    {
        prisms
            .into_iter()
            .reduce(Self::compose)
            .ok_or(OpticError::EmptyComposition)
    }
}

impl<S, A> Optic<S, Option<A>, A> for Prism<S, A> {
    fn get(&self, source: &S) -> Option<A> {
        (self.getter)(source)
    }

    fn set(&self, source: S, value: A) -> S {
        (self.setter)(source, Some(value))
    }
}

impl<S, A> PartialOptic<S, A> for Prism<S, A> {
    fn preview(&self, source: &S) -> Option<A> {
        (self.getter)(source)
    }

    fn update(&self, source: S, value: Option<A>) -> S {
        (self.setter)(source, value)
    }
}

impl<S: 'static, A: 'static> From<Lens<S, A>> for Prism<S, A> {
    fn from(lens: Lens<S, A>) -> Self {
        let writer = lens.clone();
        Self::with_removal(
            move |source: &S| lens.preview(source),
            move |source: S, value: Option<A>| writer.update(source, value),
        )
    }
}

impl<S, A> Clone for Prism<S, A> {
    fn clone(&self) -> Self {
        Self {
            getter: Rc::clone(&self.getter),
            setter: Rc::clone(&self.setter),
        }
    }
}

impl<S, A> fmt::Debug for Prism<S, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Prism").finish_non_exhaustive()
    }
}

/// Creates a prism for a single-field tuple variant of an enum.
///
/// Setting through the prism replaces the variant's payload when the source
/// is that variant and leaves any other variant untouched.
///
/// # Syntax
///
/// ```text
/// prism!(EnumType, VariantName)
/// ```
///
/// # Example
///
/// ```
/// use atomlens::prism;
/// use atomlens::optics::Optic;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Message {
///     Text(String),
///     Quit,
/// }
///
/// let text = prism!(Message, Text);
///
/// assert_eq!(text.get(&Message::Text("hi".into())), Some("hi".to_string()));
/// assert_eq!(text.set(Message::Quit, "bye".into()), Message::Quit);
/// ```
#[macro_export]
macro_rules! prism {
    ($enum_type:ident, $variant:ident) => {
        $crate::optics::Prism::new(
            |source: &$enum_type| match source {
                $enum_type::$variant(value) => Some(::std::clone::Clone::clone(value)),
                #[allow(unreachable_patterns)]
                _ => None,
            },
            |source: $enum_type, value| match source {
                $enum_type::$variant(current) => {
                    if $crate::equality::equals(&current, &value) {
                        $enum_type::$variant(current)
                    } else {
                        $enum_type::$variant(value)
                    }
                }
                #[allow(unreachable_patterns)]
                other => other,
            },
        )
    };
}
