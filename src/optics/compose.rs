//! Heterogeneous optic composition.
//!
//! The result kind follows from the operands:
//!
//! ```text
//! Lens  + Lens  -> Lens
//! Lens  + Prism -> Prism
//! Prism + Lens  -> Prism
//! Prism + Prism -> Prism
//! ```
//!
//! [`ComposeWith`] encodes that table so the [`compose!`](crate::compose)
//! macro can chain any mix of lenses and prisms.

use super::lens::Lens;
use super::prism::Prism;

/// Composition of an optic with a following optic.
pub trait ComposeWith<Next> {
    /// The optic produced by the composition.
    type Output;

    /// Focuses `next` inside this optic's focus.
    fn compose_with(self, next: Next) -> Self::Output;
}

// =============================================================================
// Lens + _
// =============================================================================

impl<S: 'static, A: 'static, B: 'static> ComposeWith<Lens<A, B>> for Lens<S, A> {
    type Output = Lens<S, B>;

    fn compose_with(self, next: Lens<A, B>) -> Self::Output {
        self.compose(next)
    }
}

impl<S: 'static, A: 'static, B: 'static> ComposeWith<Prism<A, B>> for Lens<S, A> {
    type Output = Prism<S, B>;

    fn compose_with(self, next: Prism<A, B>) -> Self::Output {
        self.compose_prism(next)
    }
}

// =============================================================================
// Prism + _
// =============================================================================

impl<S: 'static, A: 'static, B: 'static> ComposeWith<Lens<A, B>> for Prism<S, A> {
    type Output = Prism<S, B>;

    fn compose_with(self, next: Lens<A, B>) -> Self::Output {
        self.compose(next)
    }
}

impl<S: 'static, A: 'static, B: 'static> ComposeWith<Prism<A, B>> for Prism<S, A> {
    type Output = Prism<S, B>;

    fn compose_with(self, next: Prism<A, B>) -> Self::Output {
        self.compose(next)
    }
}

/// Composes two or more lenses and prisms left to right.
///
/// A single argument is returned unchanged. The result is a `Lens` only when
/// every argument is a `Lens`.
///
/// # Example
///
/// ```
/// use atomlens::{compose, lens};
/// use atomlens::equality::StructEq;
/// use atomlens::optics::{vec, Optic};
///
/// #[derive(Clone, PartialEq, Debug, StructEq)]
/// struct Team { members: Vec<String> }
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Club { team: Team }
///
/// let first_member = compose!(lens!(Club, team), lens!(Team, members), vec::index(0));
///
/// let club = Club { team: Team { members: vec!["ann".to_string()] } };
/// assert_eq!(first_member.get(&club), Some("ann".to_string()));
/// ```
#[macro_export]
macro_rules! compose {
    ($single:expr $(,)?) => {
        $single
    };
    ($first:expr, $second:expr $(, $rest:expr)* $(,)?) => {
        $crate::compose!(
            $crate::optics::ComposeWith::compose_with($first, $second)
            $(, $rest)*
        )
    };
}
