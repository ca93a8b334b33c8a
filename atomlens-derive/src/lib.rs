//! Derive macros for atomlens.
//!
//! # Available Derive Macros
//!
//! - [`Lenses`]: Generates lens constructors for struct fields
//! - [`Prisms`]: Generates prism constructors for enum variants
//! - [`StructEq`]: Implements field-wise structural equality
//!
//! # Example: Lenses
//!
//! ```rust,ignore
//! use atomlens::equality::StructEq;
//! use atomlens::optics::{Lenses, Optic};
//!
//! #[derive(Clone, Lenses, StructEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! // Generated methods:
//! // - Point::x_lens() -> Lens<Point, i32>
//! // - Point::y_lens() -> Lens<Point, i32>
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(Point::x_lens().get(&point), 10);
//! ```
//!
//! # Example: Prisms
//!
//! ```rust,ignore
//! use atomlens::optics::{Optic, Prisms};
//!
//! #[derive(Clone, Prisms)]
//! enum Shape {
//!     Circle(f64),
//!     Rectangle(f64, f64),
//! }
//!
//! // Generated methods:
//! // - Shape::circle_prism() -> Prism<Shape, f64>
//! // - Shape::rectangle_prism() -> Prism<Shape, (f64, f64)>
//!
//! assert_eq!(Shape::circle_prism().get(&Shape::Circle(5.0)), Some(5.0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod lenses;
mod prisms;
mod struct_eq;

use proc_macro::TokenStream;

/// Derive macro for generating lenses for struct fields.
///
/// For each field `foo` of type `T`, generates:
///
/// ```rust,ignore
/// impl StructName {
///     pub fn foo_lens() -> ::atomlens::optics::Lens<StructName, T> { ... }
/// }
/// ```
///
/// The setter leaves the struct untouched when the new value is
/// structurally equal to the current one.
///
/// # Requirements
///
/// - The struct must be a named struct (not a tuple struct)
/// - A field's lens can only be called when the field type implements
///   `Clone` and `StructEq`; other fields' lenses are unaffected
///
/// # Example
///
/// ```rust,ignore
/// use atomlens::optics::{Lenses, Optic};
///
/// #[derive(Clone, Debug, PartialEq, Lenses)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let person = Person { name: "Alice".to_string(), age: 30 };
///
/// let updated = Person::name_lens().set(person, "Bob".to_string());
/// assert_eq!(updated.name, "Bob");
/// ```
#[proc_macro_derive(Lenses)]
pub fn derive_lenses(input: TokenStream) -> TokenStream {
    lenses::derive_lenses_impl(input)
}

/// Derive macro for generating prisms for enum variants.
///
/// The method name is `{variant_name_snake_case}_prism()`. Setting through a
/// prism whose variant does not match leaves the value unchanged.
///
/// # Variant Types
///
/// - **Unit variants** (e.g., `Empty`): `Prism<Enum, ()>`
/// - **Single-field tuple variants** (e.g., `Some(T)`): `Prism<Enum, T>`
/// - **Multi-field tuple variants** (e.g., `Point(i32, i32)`): `Prism<Enum, (T1, T2, ...)>`
/// - **Struct variants** (e.g., `Click { x: i32, y: i32 }`): `Prism<Enum, (T1, T2, ...)>`,
///   fields in definition order
///
/// # Example
///
/// ```rust,ignore
/// use atomlens::optics::{Optic, Prisms};
///
/// #[derive(Clone, Debug, PartialEq, Prisms)]
/// enum Event {
///     Click { x: i32, y: i32 },
///     Quit,
/// }
///
/// assert_eq!(Event::click_prism().get(&Event::Click { x: 1, y: 2 }), Some((1, 2)));
/// assert_eq!(Event::click_prism().set(Event::Quit, (3, 4)), Event::Quit);
/// ```
#[proc_macro_derive(Prisms)]
pub fn derive_prisms(input: TokenStream) -> TokenStream {
    prisms::derive_prisms_impl(input)
}

/// Derive macro implementing `atomlens::equality::StructEq`.
///
/// Structs compare field by field; enums compare the variant and then its
/// fields. Every type parameter gets a `StructEq` bound.
///
/// # Example
///
/// ```rust,ignore
/// use atomlens::equality::{equals, StructEq};
///
/// #[derive(StructEq)]
/// struct Reading {
///     sensor: String,
///     value: f64,
/// }
///
/// let nan = Reading { sensor: "a".into(), value: f64::NAN };
/// assert!(equals(&nan, &Reading { sensor: "a".into(), value: f64::NAN }));
/// ```
#[proc_macro_derive(StructEq)]
pub fn derive_struct_eq(input: TokenStream) -> TokenStream {
    struct_eq::derive_struct_eq_impl(input)
}
