//! Atoms: observable reference cells.
//!
//! A root [`Atom`] owns its value. Everything derived from it (views, lensed
//! atoms, combined atoms) computes its value from its sources and keeps a
//! cached copy only while it has at least one subscriber:
//!
//! - without subscribers, `get` recomputes through the whole derivation chain
//!   and nothing upstream keeps a reference to the derived atom
//! - with subscribers, the atom holds one upstream subscription, shared by
//!   all of its subscribers, and `get` returns the cached value
//!
//! Every atom notifies only when its new value is not structurally equal to
//! the previous one. New subscribers immediately receive the current value.
//!
//! # Propagation
//!
//! `set` and `modify` notify every affected subscriber synchronously, in
//! dependency order, before they return. An atom combined from several
//! sources recomputes once per write even when several of its sources
//! changed:
//!
//! ```
//! use atomlens::atom::{combine2, Atom};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let root = Atom::create((1, 2));
//! let left = root.view(|pair| pair.0);
//! let right = root.view(|pair| pair.1);
//!
//! let runs = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&runs);
//! let sum = combine2(&left, &right, move |left: &i32, right: &i32| {
//!     counter.set(counter.get() + 1);
//!     left + right
//! });
//!
//! let _subscription = sum.subscribe(|_| {});
//! assert_eq!(runs.get(), 1);
//!
//! root.set((10, 20));
//! assert_eq!(runs.get(), 2);
//! assert_eq!(sum.get(), 30);
//! ```
//!
//! Atoms are `!Send` and `!Sync`; the whole graph lives on one thread.

mod broadcast;
mod combine;
mod derived;
#[cfg(feature = "json")]
mod json;
mod lensed;
mod node;
mod propagation;
mod read_only;
mod read_write;
mod root;
#[cfg(feature = "stream")]
mod stream;
mod subscription;

pub use combine::{combine_all, combine2, combine3, combine4, combine5, combine6, combine7};
pub use read_only::ReadOnlyAtom;
pub use read_write::Atom;
#[cfg(feature = "stream")]
pub use stream::Changes;
pub use subscription::Subscription;

static_assertions::assert_not_impl_any!(Atom<i32>: Send, Sync);
static_assertions::assert_not_impl_any!(ReadOnlyAtom<i32>: Send, Sync);
static_assertions::assert_not_impl_any!(Subscription: Send, Sync);
static_assertions::assert_impl_all!(Atom<i32>: Clone, std::fmt::Debug);
