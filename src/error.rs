//! Error types for optic construction.
//!
//! Only constructors can fail. Reading or writing through an optic never
//! returns an error: writing through a prism whose focus is absent is a
//! defined no-op, not a failure.

use thiserror::Error;

/// Errors raised while constructing an optic.
///
/// These are developer errors at the call site: an empty composition, a
/// negative array index, or a malformed property expression.
///
/// # Examples
///
/// ```
/// use atomlens::error::OpticError;
/// use atomlens::optics::Lens;
///
/// let result = Lens::<i32, i32>::compose_all(Vec::new());
/// assert!(matches!(result, Err(OpticError::EmptyComposition)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpticError {
    /// A composition was requested over an empty list of optics.
    #[error("can not compose zero optics; you probably want `Lens::identity`")]
    EmptyComposition,

    /// An array index was negative.
    #[error("{0} is not a valid array index, expected >= 0")]
    NegativeIndex(i64),

    /// A property expression did not have the form `x.a.b`.
    #[error(
        "expected a property expression, got \"{expression}\" ({reason}); \
         a property expression is a single chain of property accesses such as \"x.some.nested\""
    )]
    InvalidPropertyExpression {
        /// The rejected expression.
        expression: String,
        /// What made the expression invalid.
        reason: &'static str,
    },
}
