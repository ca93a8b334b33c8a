//! Structural equality.
//!
//! Atoms only notify their subscribers when a newly computed value is *not*
//! structurally equal to the previous one. [`StructEq`] is the comparison they
//! use: a deep, symmetric equality with a few deliberate differences from
//! [`PartialEq`]:
//!
//! - Floats use SameValue semantics: `NaN` equals `NaN`, `+0.0` and `-0.0`
//!   are different.
//! - Shared pointers (`Rc`, `Arc`) short-circuit on pointer identity before
//!   comparing their contents.
//! - `Rc<RefCell<T>>`, the way to build cyclic data, is compared with two
//!   parallel visited stacks so that cyclic structures terminate.
//! - [`Opaque`] values are only ever compared by identity.
//!
//! # Examples
//!
//! ```
//! use atomlens::equality::{equals, StructEq};
//!
//! assert!(equals(&vec![1, 2, 3], &vec![1, 2, 3]));
//! assert!(equals(&f64::NAN, &f64::NAN));
//! assert!(!equals(&0.0_f64, &-0.0_f64));
//! ```

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

/// Deep structural equality.
///
/// Implementations must be symmetric and reflexive except where the value is
/// deliberately compared by identity (see [`Opaque`]).
///
/// Implementing this trait by hand is how a type supplies its own notion of
/// equality; `#[derive(StructEq)]` compares named fields pairwise.
pub trait StructEq {
    /// Returns `true` if `self` and `other` are structurally equal.
    fn struct_eq(&self, other: &Self) -> bool;
}

#[cfg(feature = "derive")]
pub use atomlens_derive::StructEq;

/// Returns `true` if `left` and `right` are structurally equal.
///
/// Two references to the same memory are equal without inspecting the value.
///
/// # Examples
///
/// ```
/// use atomlens::equality::equals;
/// use std::collections::HashMap;
///
/// let left: HashMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
/// let right: HashMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
/// assert!(equals(&left, &right));
/// ```
#[inline]
pub fn equals<T: StructEq + ?Sized>(left: &T, right: &T) -> bool {
    std::ptr::addr_eq(left, right) || left.struct_eq(right)
}

/// SameValue comparison for `f64`.
#[inline]
#[must_use]
pub fn same_value(left: f64, right: f64) -> bool {
    if left.is_nan() || right.is_nan() {
        return left.is_nan() && right.is_nan();
    }
    left == right && left.is_sign_negative() == right.is_sign_negative()
}

macro_rules! impl_struct_eq_via_partial_eq {
    ($($type:ty),* $(,)?) => {
        $(
            impl StructEq for $type {
                #[inline]
                fn struct_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_struct_eq_via_partial_eq!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    str,
    String,
    Duration,
    Instant,
    SystemTime,
);

impl StructEq for f32 {
    #[inline]
    fn struct_eq(&self, other: &Self) -> bool {
        same_value(f64::from(*self), f64::from(*other))
    }
}

impl StructEq for f64 {
    #[inline]
    fn struct_eq(&self, other: &Self) -> bool {
        same_value(*self, *other)
    }
}

impl<T: StructEq + ?Sized> StructEq for &T {
    fn struct_eq(&self, other: &Self) -> bool {
        equals(*self, *other)
    }
}

impl<T: StructEq> StructEq for Option<T> {
    fn struct_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(left), Some(right)) => equals(left, right),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: StructEq, E: StructEq> StructEq for Result<T, E> {
    fn struct_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ok(left), Ok(right)) => equals(left, right),
            (Err(left), Err(right)) => equals(left, right),
            _ => false,
        }
    }
}

impl<T: StructEq + ?Sized> StructEq for Box<T> {
    fn struct_eq(&self, other: &Self) -> bool {
        equals(&**self, &**other)
    }
}

impl<T: StructEq + ToOwned + ?Sized> StructEq for Cow<'_, T> {
    fn struct_eq(&self, other: &Self) -> bool {
        equals(&**self, &**other)
    }
}

impl<T: StructEq> StructEq for [T] {
    fn struct_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(left, right)| equals(left, right))
    }
}

impl<T: StructEq, const N: usize> StructEq for [T; N] {
    fn struct_eq(&self, other: &Self) -> bool {
        self.as_slice().struct_eq(other.as_slice())
    }
}

impl<T: StructEq> StructEq for Vec<T> {
    fn struct_eq(&self, other: &Self) -> bool {
        self.as_slice().struct_eq(other.as_slice())
    }
}

impl<T: StructEq> StructEq for VecDeque<T> {
    fn struct_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(left, right)| equals(left, right))
    }
}

impl<K, V, S> StructEq for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: StructEq,
    S: BuildHasher,
{
    fn struct_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, left)| {
                other
                    .get(key)
                    .is_some_and(|right| equals(right, left))
            })
    }
}

impl<K: Ord, V: StructEq> StructEq for BTreeMap<K, V> {
    fn struct_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|((left_key, left), (right_key, right))| {
                    left_key == right_key && equals(left, right)
                })
    }
}

impl<T: Eq + Hash, S: BuildHasher> StructEq for HashSet<T, S> {
    fn struct_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Ord> StructEq for BTreeSet<T> {
    fn struct_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl StructEq for dyn std::error::Error {
    fn struct_eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl<T: StructEq + ?Sized> StructEq for Rc<T> {
    fn struct_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other) || equals(&**self, &**other)
    }
}

impl<T: StructEq + ?Sized> StructEq for Arc<T> {
    fn struct_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other) || equals(&**self, &**other)
    }
}

// Pairs of `RefCell`s currently being compared on this thread.
thread_local! {
    static VISITED: RefCell<(Vec<*const ()>, Vec<*const ()>)> =
        const { RefCell::new((Vec::new(), Vec::new())) };
}

/// Pops the visited pair pushed by the comparison it belongs to, also on unwind.
struct VisitedGuard;

impl Drop for VisitedGuard {
    fn drop(&mut self) {
        VISITED.with(|visited| {
            let mut visited = visited.borrow_mut();
            visited.0.pop();
            visited.1.pop();
        });
    }
}

/// Interior-mutable cells are the only way to build cycles (`Rc<RefCell<T>>`),
/// so this is where revisits are detected: a pair already under comparison is
/// equal exactly when it was entered with the same partner.
impl<T: StructEq + ?Sized> StructEq for RefCell<T> {
    fn struct_eq(&self, other: &Self) -> bool {
        let left = std::ptr::from_ref(self).cast::<()>();
        let right = std::ptr::from_ref(other).cast::<()>();

        let revisited = VISITED.with(|visited| {
            let visited = visited.borrow();
            visited
                .0
                .iter()
                .rposition(|seen| *seen == left)
                .map(|position| visited.1[position] == right)
        });
        if let Some(result) = revisited {
            return result;
        }

        VISITED.with(|visited| {
            let mut visited = visited.borrow_mut();
            visited.0.push(left);
            visited.1.push(right);
        });
        let _guard = VisitedGuard;

        let left_value = self.borrow();
        let right_value = other.borrow();
        equals(&*left_value, &*right_value)
    }
}

/// A value that is compared by identity only.
///
/// Some values cannot be meaningfully deep-compared, such as handles to work
/// in flight. Wrapping them in `Opaque` makes two values equal only when they
/// share the same allocation.
///
/// # Examples
///
/// ```
/// use atomlens::equality::{equals, Opaque};
///
/// let first = Opaque::new(42);
/// let second = Opaque::new(42);
/// assert!(!equals(&first, &second));
/// assert!(equals(&first, &first.clone()));
/// ```
#[derive(Debug, Default)]
pub struct Opaque<T>(Rc<T>);

impl<T> Opaque<T> {
    /// Wraps `value` in a fresh identity.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Returns a reference to the wrapped value.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.0
    }
}

impl<T> Clone for Opaque<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> StructEq for Opaque<T> {
    fn struct_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

macro_rules! impl_struct_eq_for_tuple {
    ($($name:ident $index:tt),+) => {
        impl<$($name: StructEq),+> StructEq for ($($name,)+) {
            fn struct_eq(&self, other: &Self) -> bool {
                $(equals(&self.$index, &other.$index))&&+
            }
        }
    };
}

impl_struct_eq_for_tuple!(A 0);
impl_struct_eq_for_tuple!(A 0, B 1);
impl_struct_eq_for_tuple!(A 0, B 1, C 2);
impl_struct_eq_for_tuple!(A 0, B 1, C 2, D 3);
impl_struct_eq_for_tuple!(A 0, B 1, C 2, D 3, E 4);
impl_struct_eq_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_struct_eq_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);

#[cfg(feature = "json")]
mod json {
    use super::{StructEq, equals, same_value};
    use serde_json::{Number, Value};

    fn numbers_equal(left: &Number, right: &Number) -> bool {
        if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
            return left == right;
        }
        if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
            return left == right;
        }
        match (left.as_f64(), right.as_f64()) {
            (Some(left), Some(right)) => same_value(left, right),
            _ => false,
        }
    }

    impl StructEq for Value {
        fn struct_eq(&self, other: &Self) -> bool {
            match (self, other) {
                (Self::Null, Self::Null) => true,
                (Self::Bool(left), Self::Bool(right)) => left == right,
                (Self::Number(left), Self::Number(right)) => numbers_equal(left, right),
                (Self::String(left), Self::String(right)) => left == right,
                (Self::Array(left), Self::Array(right)) => equals(left, right),
                (Self::Object(left), Self::Object(right)) => {
                    left.len() == right.len()
                        && left.iter().all(|(key, left_value)| {
                            right
                                .get(key)
                                .is_some_and(|right_value| equals(right_value, left_value))
                        })
                }
                _ => false,
            }
        }
    }
}
