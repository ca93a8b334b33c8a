//! Prisms into `Vec` elements.
//!
//! # Examples
//!
//! ```
//! use atomlens::optics::vec::{find, index};
//! use atomlens::optics::Optic;
//!
//! let third = index(3);
//! assert_eq!(third.set(vec!["a".to_string()], "x".to_string()), ["a", "", "", "x"]);
//!
//! let ninety_nine = find(|value: &i32| *value == 99);
//! assert_eq!(ninety_nine.set(vec![1, 2, 3], 5), vec![1, 2, 3]);
//! ```

use crate::equality::{StructEq, equals};

use super::prism::Prism;

/// A prism onto the element at `position`.
///
/// Writing past the end pads the vector with `T::default()` up to
/// `position` and then appends the value. Writing a value structurally
/// equal to the current element returns the vector unchanged.
#[must_use]
pub fn index<T>(position: usize) -> Prism<Vec<T>, T>
where
    T: StructEq + Clone + Default + 'static,
{
    Prism::new(
        move |items: &Vec<T>| items.get(position).cloned(),
        move |mut items: Vec<T>, value: T| {
            match items.get_mut(position) {
                Some(slot) => {
                    if !equals(&*slot, &value) {
                        *slot = value;
                    }
                }
                None => {
                    items.resize_with(position, T::default);
                    items.push(value);
                }
            }
            items
        },
    )
}

/// A prism onto the first element matching `predicate`.
///
/// The match is located again on every read and write; when nothing
/// matches, reads yield `None` and writes are a no-op.
#[must_use]
pub fn find<T, P>(predicate: P) -> Prism<Vec<T>, T>
where
    T: StructEq + Clone + Default + 'static,
    P: Fn(&T) -> bool + 'static,
{
    Prism::choose(move |items: &Vec<T>| {
        items
            .iter()
            .position(&predicate)
            .map_or_else(Prism::nothing, index)
    })
}
