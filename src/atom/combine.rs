//! Combining several atoms into one.
//!
//! `combine2` through `combine7` are typed conveniences; they build the same
//! node as [`combine_all`]. While unsubscribed, every `get` re-reads all
//! sources. While subscribed, the combined atom recomputes once per
//! propagation pass, however many of its sources changed in it.

use super::derived::Derived;
use super::read_only::ReadOnlyAtom;
use crate::equality::StructEq;

macro_rules! define_combine {
    ($arity:literal; $($source:ident: $value:ident),+) => {
        paste::paste! {
            #[doc = concat!("Combines ", stringify!($arity), " atoms with `combine`.")]
            ///
            /// The result is recomputed from the current values of all sources and
            /// only notifies when it changes structurally.
            #[must_use]
            #[allow(clippy::too_many_arguments)]
            pub fn [<combine $arity>]<$($value,)+ R, F>(
                $($source: &ReadOnlyAtom<$value>,)+
                combine: F,
            ) -> ReadOnlyAtom<R>
            where
                $($value: Clone + 'static,)+
                R: StructEq + Clone + 'static,
                F: Fn($(&$value),+) -> R + 'static,
            {
                let links = vec![$($source.link()),+];
                $(let $source = $source.source();)+
                let node = Derived::create(links, move || combine($(&$source.get()),+));
                ReadOnlyAtom::from_source(node)
            }
        }
    };
}

define_combine!(2; first: A, second: B);
define_combine!(3; first: A, second: B, third: C);
define_combine!(4; first: A, second: B, third: C, fourth: D);
define_combine!(5; first: A, second: B, third: C, fourth: D, fifth: E);
define_combine!(6; first: A, second: B, third: C, fourth: D, fifth: E, sixth: G);
define_combine!(7; first: A, second: B, third: C, fourth: D, fifth: E, sixth: G, seventh: H);

/// Combines any number of atoms of the same type.
///
/// # Example
///
/// ```
/// use atomlens::atom::{combine_all, Atom};
///
/// let parts: Vec<_> = (1..=3).map(Atom::create).collect();
/// let total = combine_all(parts.iter().map(|part| part.read_only()), |values| values.iter().sum::<i32>());
///
/// assert_eq!(total.get(), 6);
/// parts[0].set(10);
/// assert_eq!(total.get(), 15);
/// ```
#[must_use]
pub fn combine_all<T, R, I, F>(atoms: I, combine: F) -> ReadOnlyAtom<R>
where
    T: Clone + 'static,
    R: StructEq + Clone + 'static,
    I: IntoIterator<Item = ReadOnlyAtom<T>>,
    F: Fn(&[T]) -> R + 'static,
{
    let atoms: Vec<ReadOnlyAtom<T>> = atoms.into_iter().collect();
    let links = atoms.iter().map(ReadOnlyAtom::link).collect();
    let node = Derived::create(links, move || {
        let values: Vec<T> = atoms.iter().map(ReadOnlyAtom::get).collect();
        combine(&values)
    });
    ReadOnlyAtom::from_source(node)
}

/// Combines two to seven atoms; the last argument is the combining function.
///
/// # Example
///
/// ```
/// use atomlens::atom::Atom;
/// use atomlens::combine;
///
/// let width = Atom::create(2);
/// let height = Atom::create(3);
/// let area = combine!(width, height, |width: &i32, height: &i32| width * height);
///
/// assert_eq!(area.get(), 6);
/// ```
#[macro_export]
macro_rules! combine {
    ($a:expr, $b:expr, $combine:expr $(,)?) => {
        $crate::atom::combine2(&$a, &$b, $combine)
    };
    ($a:expr, $b:expr, $c:expr, $combine:expr $(,)?) => {
        $crate::atom::combine3(&$a, &$b, &$c, $combine)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $combine:expr $(,)?) => {
        $crate::atom::combine4(&$a, &$b, &$c, &$d, $combine)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $combine:expr $(,)?) => {
        $crate::atom::combine5(&$a, &$b, &$c, &$d, &$e, $combine)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr, $combine:expr $(,)?) => {
        $crate::atom::combine6(&$a, &$b, &$c, &$d, &$e, &$f, $combine)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr, $g:expr, $combine:expr $(,)?) => {
        $crate::atom::combine7(&$a, &$b, &$c, &$d, &$e, &$f, &$g, $combine)
    };
}
