//! Optics for immutable data manipulation.
//!
//! An optic is a pure getter/setter pair focusing on part of a larger value.
//! Writing through an optic never mutates: it returns a new source with the
//! focus replaced.
//!
//! # Available Optics
//!
//! - [`Lens`]: a focus that is always present
//! - [`Prism`]: a focus that may be absent; writing into a missing focus is
//!   a no-op
//! - [`FunctionOptic`]: a getter/setter pair whose read and write types differ
//!
//! Constructors for common shapes:
//!
//! - [`lens!`](crate::lens) / `#[derive(Lenses)]` for struct fields
//! - [`prism!`](crate::prism) / `#[derive(Prisms)]` for enum variants
//! - [`vec::index`], [`vec::find`] for `Vec` elements
//! - [`json::key`], [`json::index`], [`json::find`], [`json::path`] for
//!   `serde_json::Value`
//! - [`with_default`], [`replace`], [`Lens::identity`], [`Prism::nothing`],
//!   [`Prism::choose`]
//!
//! # Composition
//!
//! ```text
//! Lens  + Lens  -> Lens
//! Lens  + Prism -> Prism
//! Prism + Lens  -> Prism
//! Prism + Prism -> Prism
//! Prism + with_default -> Lens
//! ```
//!
//! # Example
//!
//! ```
//! use atomlens::lens;
//! use atomlens::equality::StructEq;
//! use atomlens::optics::Optic;
//!
//! #[derive(Clone, PartialEq, Debug, StructEq)]
//! struct Address { street: String, city: String }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Person { name: String, address: Address }
//!
//! let person_street = lens!(Person, address).compose(lens!(Address, street));
//!
//! let person = Person {
//!     name: "Alice".to_string(),
//!     address: Address {
//!         street: "Main St".to_string(),
//!         city: "Tokyo".to_string(),
//!     },
//! };
//!
//! assert_eq!(person_street.get(&person), "Main St");
//!
//! let updated = person_street.set(person, "Oak Ave".to_string());
//! assert_eq!(updated.address.street, "Oak Ave");
//! assert_eq!(updated.address.city, "Tokyo");
//! ```
//!
//! # Laws
//!
//! Every lens satisfies, up to [structural equality](crate::equality):
//!
//! 1. **GetPut**: `lens.set(source, lens.get(&source)) == source`
//! 2. **PutGet**: `lens.get(&lens.set(source, value)) == value`
//! 3. **PutPut**: `lens.set(lens.set(source, v1), v2) == lens.set(source, v2)`
//!
//! Prisms satisfy the same laws where their focus exists.

mod combinators;
mod compose;
#[cfg(feature = "json")]
pub mod json;
mod lens;
mod optic;
mod prism;
pub mod vec;

pub use combinators::conservatively;
pub use combinators::replace;
pub use combinators::with_default;

pub use compose::ComposeWith;

pub use lens::Lens;

pub use optic::FunctionOptic;
pub use optic::Optic;
pub use optic::PartialOptic;

pub use prism::Prism;

#[cfg(feature = "derive")]
pub use atomlens_derive::{Lenses, Prisms};
