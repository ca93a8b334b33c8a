//! Value-substituting lenses and the `conservatively` setter wrapper.

use crate::equality::{StructEq, equals};

use super::lens::Lens;

/// Wraps a setter so it returns the *original* source whenever the
/// computed result is structurally equal to it.
///
/// Keeps shared values (`Rc`, JSON subtrees) at their old identity after a
/// write that changed nothing, which downstream identity-based caches rely
/// on.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use atomlens::optics::conservatively;
///
/// let setter = conservatively(|_: &Rc<String>, value: String| Rc::new(value));
///
/// let original = Rc::new("same".to_string());
/// let kept = setter(Rc::clone(&original), "same".to_string());
/// assert!(Rc::ptr_eq(&original, &kept));
/// ```
pub fn conservatively<S, A, F>(setter: F) -> impl Fn(S, A) -> S
where
    S: StructEq,
    F: Fn(&S, A) -> S,
{
    move |source: S, value: A| {
        let next = setter(&source, value);
        if equals(&next, &source) { source } else { next }
    }
}

/// A lens that shows `replacement` wherever the source is `original`, and
/// maps `replacement` back to `original` on write.
///
/// # Example
///
/// ```
/// use atomlens::optics::{replace, Optic};
///
/// let blank_as_dash = replace(String::new(), "-".to_string());
///
/// assert_eq!(blank_as_dash.get(&String::new()), "-");
/// assert_eq!(blank_as_dash.get(&"x".to_string()), "x");
/// assert_eq!(blank_as_dash.set("x".to_string(), "-".to_string()), "");
/// ```
#[must_use]
pub fn replace<T>(original: T, replacement: T) -> Lens<T, T>
where
    T: StructEq + Clone + 'static,
{
    let shown = replacement.clone();
    let hidden = original.clone();
    Lens::new(
        move |value: &T| {
            if equals(value, &original) {
                shown.clone()
            } else {
                value.clone()
            }
        },
        conservatively(move |_: &T, value: T| {
            if equals(&value, &replacement) {
                hidden.clone()
            } else {
                value
            }
        }),
    )
}

/// A lens from an optional value to a definite one, substituting `default`
/// for `None`.
///
/// Writing `default` stores `None`, so setting the default value is the
/// same as clearing it. Compose it after a prism with
/// [`Prism::compose_lens`](super::Prism::compose_lens); prisms that cannot
/// remove their focus store the default instead.
///
/// # Example
///
/// ```
/// use atomlens::optics::{with_default, Optic};
///
/// let lens = with_default(10);
///
/// assert_eq!(lens.get(&None), 10);
/// assert_eq!(lens.get(&Some(3)), 3);
/// assert_eq!(lens.set(Some(3), 10), None);
/// assert_eq!(lens.set(None, 4), Some(4));
/// ```
#[must_use]
pub fn with_default<T>(default: T) -> Lens<Option<T>, T>
where
    T: StructEq + Clone + 'static,
{
    let fallback = default.clone();
    Lens::new(
        move |value: &Option<T>| value.clone().unwrap_or_else(|| fallback.clone()),
        conservatively(move |_: &Option<T>, value: T| {
            if equals(&value, &default) {
                None
            } else {
                Some(value)
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::Optic;
    use std::rc::Rc;

    #[test]
    fn test_conservatively_returns_new_value_when_changed() {
        let setter = conservatively(|_: &Rc<i32>, value: i32| Rc::new(value));
        let original = Rc::new(1);
        let next = setter(Rc::clone(&original), 2);
        assert_eq!(*next, 2);
        assert!(!Rc::ptr_eq(&original, &next));
    }

    #[test]
    fn test_replace_keeps_other_values() {
        let lens = replace(0, 100);
        assert_eq!(lens.get(&0), 100);
        assert_eq!(lens.get(&5), 5);
        assert_eq!(lens.set(5, 100), 0);
        assert_eq!(lens.set(5, 7), 7);
    }

    #[test]
    fn test_with_default_nan_default_clears() {
        let lens = with_default(f64::NAN);
        assert!(lens.get(&None).is_nan());
        assert_eq!(lens.set(Some(1.0), f64::NAN), None);
    }
}
