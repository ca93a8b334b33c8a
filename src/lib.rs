//! # atomlens
//!
//! Observable state cells ("atoms") and composable optics for reading and
//! writing nested immutable data.
//!
//! ## Overview
//!
//! - **Structural equality**: [`equality::StructEq`], the deep comparison used
//!   to suppress redundant change notifications
//! - **Optics**: [`Lens`](optics::Lens) and [`Prism`](optics::Prism), with
//!   constructors for struct fields, enum variants, vectors and JSON values
//! - **Atoms**: [`Atom`](atom::Atom) and [`ReadOnlyAtom`](atom::ReadOnlyAtom),
//!   observable cells that can be viewed, lensed and combined into derived
//!   atoms that cache their value only while someone is subscribed
//!
//! Atoms are single-threaded: every `set` notifies all affected subscribers
//! synchronously before it returns.
//!
//! ## Feature Flags
//!
//! - `optics`: Optic traits, lenses, prisms and combinators
//! - `json`: Optics and atom helpers for `serde_json::Value`
//! - `atom`: Atoms, derived atoms and combinators
//! - `derive`: `#[derive(Lenses, Prisms, StructEq)]`
//! - `stream`: Atom changes as a `futures::Stream`
//! - `serde`: `Serialize`/`Deserialize` for JSON path segments
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use atomlens::prelude::*;
//! use serde_json::json;
//!
//! let state = Atom::create(json!({"a": {"b": 5}}));
//! let b = state.lens_path(["a", "b"]).unwrap();
//!
//! let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
//! let log = std::rc::Rc::clone(&seen);
//! let _subscription = b.subscribe(move |value| log.borrow_mut().push(value.clone()));
//!
//! b.set(Some(json!(6)));
//!
//! assert_eq!(state.get(), json!({"a": {"b": 6}}));
//! assert_eq!(*seen.borrow(), [Some(json!(5)), Some(json!(6))]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

extern crate self as atomlens;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use atomlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::equality::{StructEq, equals};

    #[cfg(feature = "optics")]
    pub use crate::optics::*;

    #[cfg(feature = "atom")]
    pub use crate::atom::*;
}

pub mod equality;
pub mod error;
pub mod warning;

#[cfg(feature = "optics")]
pub mod optics;

#[cfg(feature = "atom")]
pub mod atom;
