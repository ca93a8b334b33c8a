//! Optics over untyped JSON (`serde_json::Value`).
//!
//! Every constructor here produces a [`Prism`]: a key may be missing, an
//! index may be out of range, and the source may not even be an object or an
//! array. Writes into a value of the wrong shape return it unchanged.
//!
//! Setters never touch the source when the written value is structurally
//! equal to what is already there.
//!
//! # Examples
//!
//! ```
//! use atomlens::optics::{json, Optic};
//! use serde_json::json;
//!
//! let state = json!({"user": {"name": "ann", "tags": ["a"]}});
//!
//! let name = json::path(["user", "name"]).unwrap();
//! assert_eq!(name.get(&state), Some(json!("ann")));
//!
//! let second_tag = json::key("user").compose(json::key("tags")).compose(json::index(1));
//! let updated = second_tag.set(state, json!("b"));
//! assert_eq!(updated, json!({"user": {"name": "ann", "tags": ["a", "b"]}}));
//! ```

use std::fmt;
use std::sync::atomic::AtomicUsize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::prism::Prism;
use crate::equality::equals;
use crate::error::OpticError;
use crate::warning::warning_limited;

/// How many times the `prop` deprecation warning is emitted per process.
const PROP_WARNING_LIMIT: usize = 10;

static PROP_WARNINGS: AtomicUsize = AtomicUsize::new(0);

/// A single step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// An array position.
    Index(usize),
}

impl PathSegment {
    /// Builds the prism for this step.
    #[must_use]
    pub fn to_prism(&self) -> Prism<Value, Value> {
        match self {
            Self::Key(name) => key(name.clone()),
            Self::Index(position) => index(*position),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Key(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        Self::Key(name)
    }
}

impl From<usize> for PathSegment {
    fn from(position: usize) -> Self {
        Self::Index(position)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(name) => write!(formatter, ".{name}"),
            Self::Index(position) => write!(formatter, "[{position}]"),
        }
    }
}

/// A prism onto an object property.
///
/// Writing adds the property when it is missing. Writing `None` through
/// [`Prism::into_option_lens`] (or calling [`Prism::remove`]) deletes it.
///
/// # Example
///
/// ```
/// use atomlens::optics::{json, Optic};
/// use serde_json::json;
///
/// let a = json::key("a");
///
/// assert_eq!(a.get(&json!({"a": 1})), Some(json!(1)));
/// assert_eq!(a.get(&json!([1])), None);
/// assert_eq!(a.set(json!({"b": 2}), json!(1)), json!({"a": 1, "b": 2}));
/// assert_eq!(a.remove(json!({"a": 1, "b": 2})), json!({"b": 2}));
/// ```
#[must_use]
pub fn key(name: impl Into<String>) -> Prism<Value, Value> {
    let name = name.into();
    let reader = name.clone();
    Prism::with_removal(
        move |source: &Value| source.get(&reader).cloned(),
        move |mut source: Value, value: Option<Value>| {
            if let Value::Object(map) = &mut source {
                match value {
                    Some(value) => {
                        let unchanged = map.get(&name).is_some_and(|current| equals(current, &value));
                        if !unchanged {
                            map.insert(name.clone(), value);
                        }
                    }
                    None => {
                        map.remove(&name);
                    }
                }
            }
            source
        },
    )
}

/// A prism onto an array element.
///
/// Writing past the end pads the array with `null` up to `position` and then
/// appends the value.
///
/// # Example
///
/// ```
/// use atomlens::optics::{json, Optic};
/// use serde_json::json;
///
/// assert_eq!(json::index(3).set(json!(["a"]), json!("x")), json!(["a", null, null, "x"]));
/// ```
#[must_use]
pub fn index(position: usize) -> Prism<Value, Value> {
    Prism::new(
        move |source: &Value| source.get(position).cloned(),
        move |mut source: Value, value: Value| {
            if let Value::Array(items) = &mut source {
                match items.get_mut(position) {
                    Some(slot) => {
                        if !equals(&*slot, &value) {
                            *slot = value;
                        }
                    }
                    None => {
                        items.resize(position, Value::Null);
                        items.push(value);
                    }
                }
            }
            source
        },
    )
}

/// Like [`index`], for positions computed as signed integers.
///
/// # Errors
///
/// Returns [`OpticError::NegativeIndex`] when `position` is negative.
pub fn try_index(position: i64) -> Result<Prism<Value, Value>, OpticError> {
    usize::try_from(position)
        .map(index)
        .map_err(|_| OpticError::NegativeIndex(position))
}

/// A prism onto the first array element matching `predicate`.
///
/// # Example
///
/// ```
/// use atomlens::optics::{json, Optic};
/// use serde_json::json;
///
/// let big = json::find(|value| value.as_i64().is_some_and(|number| number > 10));
///
/// assert_eq!(big.get(&json!([1, 20, 30])), Some(json!(20)));
/// assert_eq!(big.set(json!([1, 2, 3]), json!(5)), json!([1, 2, 3]));
/// ```
#[must_use]
pub fn find<P>(predicate: P) -> Prism<Value, Value>
where
    P: Fn(&Value) -> bool + 'static,
{
    Prism::choose(move |source: &Value| {
        source
            .as_array()
            .and_then(|items| items.iter().position(&predicate))
            .map_or_else(Prism::nothing, index)
    })
}

/// Composes the prisms for a sequence of keys and positions.
///
/// # Errors
///
/// Returns [`OpticError::EmptyComposition`] when `segments` is empty.
///
/// # Example
///
/// ```
/// use atomlens::optics::json::{path, PathSegment};
/// use atomlens::optics::Optic;
/// use serde_json::json;
///
/// let first_id = path([PathSegment::from("items"), PathSegment::Index(0), "id".into()]).unwrap();
/// assert_eq!(first_id.get(&json!({"items": [{"id": 7}]})), Some(json!(7)));
/// ```
pub fn path<I, P>(segments: I) -> Result<Prism<Value, Value>, OpticError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathSegment>,
{
    Prism::compose_all(
        segments
            .into_iter()
            .map(|segment| Into::<PathSegment>::into(segment).to_prism()),
    )
}

/// Builds a key path from a property-access expression such as `x.a.b` or
/// `x => x.a.b`.
///
/// Only a chain of plain property names is accepted: no indexing, no calls
/// and no other operators.
///
/// # Errors
///
/// Returns [`OpticError::InvalidPropertyExpression`] for anything else.
#[deprecated(note = "use `json::key` or `json::path` with explicit keys")]
pub fn prop(expression: &str) -> Result<Prism<Value, Value>, OpticError> {
    let keys = parse_property_expression(expression)?;
    warning_limited(&PROP_WARNINGS, PROP_WARNING_LIMIT, || {
        let quoted = keys
            .iter()
            .map(|name| format!("\"{name}\""))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "json::prop is deprecated and will be removed; \
             replace json::prop(\"{expression}\") with json::path([{quoted}])"
        )
    });
    path(keys)
}

fn parse_property_expression(expression: &str) -> Result<Vec<String>, OpticError> {
    let invalid = |reason| OpticError::InvalidPropertyExpression {
        expression: expression.to_string(),
        reason,
    };

    let (parameter, body) = match expression.split_once("=>") {
        Some((parameter, body)) => (Some(parameter.trim()), body.trim()),
        None => (None, expression.trim()),
    };

    if body.contains('[') {
        return Err(invalid("indexing is not supported"));
    }

    let mut parts = body.split('.');
    let root = parts
        .next()
        .filter(|part| is_identifier(part))
        .ok_or_else(|| invalid("the expression must start with a parameter name"))?;

    if let Some(parameter) = parameter
        && parameter != root
    {
        return Err(invalid("only the parameter itself may be accessed"));
    }

    let keys = parts
        .map(|part| {
            if is_identifier(part) {
                Ok(part.to_string())
            } else {
                Err(invalid("only plain property names may follow a dot"))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if keys.is_empty() {
        return Err(invalid("at least one property access is required"));
    }
    Ok(keys)
}

fn is_identifier(text: &str) -> bool {
    let mut characters = text.chars();
    characters
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && characters.all(|rest| rest.is_alphanumeric() || rest == '_' || rest == '$')
}
