//! Key and path shortcuts for atoms holding `serde_json::Value`.

use serde_json::Value;

use super::read_only::ReadOnlyAtom;
use super::read_write::Atom;
use crate::error::OpticError;
use crate::optics::json::{self, PathSegment};

impl Atom<Value> {
    /// A writable atom focused on the property `name`.
    ///
    /// Writing `None` removes the property.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::atom::Atom;
    /// use serde_json::json;
    ///
    /// let state = Atom::create(json!({"a": 1}));
    /// let b = state.lens_key("b");
    ///
    /// b.set(Some(json!(2)));
    /// assert_eq!(state.get(), json!({"a": 1, "b": 2}));
    ///
    /// b.set(None);
    /// assert_eq!(state.get(), json!({"a": 1}));
    /// ```
    #[must_use]
    pub fn lens_key(&self, name: impl Into<String>) -> Atom<Option<Value>> {
        self.lens_prism(json::key(name))
    }

    /// A writable atom focused on a path of keys and positions.
    ///
    /// # Errors
    ///
    /// Returns [`OpticError::EmptyComposition`] when `segments` is empty.
    pub fn lens_path<I, P>(&self, segments: I) -> Result<Atom<Option<Value>>, OpticError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathSegment>,
    {
        json::path(segments).map(|prism| self.lens_prism(prism))
    }
}

impl ReadOnlyAtom<Value> {
    /// A read-only atom focused on the property `name`.
    #[must_use]
    pub fn view_key(&self, name: impl Into<String>) -> ReadOnlyAtom<Option<Value>> {
        self.view_prism(json::key(name))
    }

    /// A read-only atom focused on a path of keys and positions.
    ///
    /// # Errors
    ///
    /// Returns [`OpticError::EmptyComposition`] when `segments` is empty.
    pub fn view_path<I, P>(&self, segments: I) -> Result<ReadOnlyAtom<Option<Value>>, OpticError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathSegment>,
    {
        json::path(segments).map(|prism| self.view_prism(prism))
    }
}
