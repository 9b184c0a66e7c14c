//! Path resolution against source values.
//!
//! A path is walked one segment at a time. Absent optionals, missing map keys,
//! out-of-range indices and shapes that cannot be traversed all yield
//! [`Resolution::NotApplicable`], letting the selector move on to the next
//! alternative. Only a missing final member, an unconvertible map key and a
//! failing accessor are errors.

use thiserror::Error;

use crate::reflect::{BoxError, KeyError, Reflect, Shape};
use crate::tag::TagPath;

/// A value produced by resolving a path.
pub enum Resolved<'a> {
    /// A value borrowed from the source.
    Borrowed(&'a dyn Reflect),
    /// A value returned by an accessor.
    ///
    /// An accessor returning `Some(value)` is viewed through the `Some`.
    Owned(Box<dyn Reflect>),
}

impl Resolved<'_> {
    /// The resolved value.
    #[must_use]
    pub fn value(&self) -> &dyn Reflect {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => present(value.as_ref()).unwrap_or(value.as_ref()),
        }
    }

    /// Clones the value out when it is exactly of type `T`.
    #[must_use]
    pub fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.value().as_any().downcast_ref::<T>().cloned()
    }
}

impl std::fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Borrowed(_) => "Borrowed",
            Self::Owned(_) => "Owned",
        };
        f.debug_tuple(kind).field(&self.value().type_name()).finish()
    }
}

/// Outcome of resolving one path alternative.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// The path resolved to a value, possibly a zero value.
    Found(Resolved<'a>),
    /// The path does not apply to this source; try the next alternative.
    NotApplicable,
}

/// Terminal failures raised while walking a path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// The final segment names neither a member nor an accessor.
    #[error("{source_type} has no member or accessor named '{segment}'")]
    NotFound {
        /// The requested name.
        segment: String,
        /// Type name of the record searched.
        source_type: &'static str,
    },

    /// A segment could not be converted to a map key.
    #[error(transparent)]
    InvalidKey(#[from] KeyError),

    /// An accessor returned an error.
    #[error("accessor '{accessor}' on {source_type} failed: {source}")]
    Accessor {
        /// The accessor name.
        accessor: String,
        /// Type name of the record exposing the accessor.
        source_type: &'static str,
        /// The accessor's error.
        #[source]
        source: BoxError,
    },
}

/// Resolves `path` against `source`.
///
/// A path with no segments resolves to `source` itself.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use fieldmerge::{Resolution, TagPath, resolve};
///
/// let data = HashMap::from([(String::from("key"), String::from("value"))]);
/// let found = resolve(&data, &TagPath::new(["key"]))?;
/// assert!(matches!(found, Resolution::Found(_)));
///
/// let missing = resolve(&data, &TagPath::new(["other"]))?;
/// assert!(matches!(missing, Resolution::NotApplicable));
/// # Ok::<(), fieldmerge::ResolveError>(())
/// ```
///
/// # Errors
///
/// Returns [`ResolveError`] when the final segment is missing from a record,
/// when a segment cannot be converted to a map key, or when an accessor fails.
pub fn resolve<'a>(source: &'a dyn Reflect, path: &TagPath) -> Result<Resolution<'a>, ResolveError> {
    if path.is_empty() {
        return Ok(Resolution::Found(Resolved::Borrowed(source)));
    }

    let mut current = source;
    let last = path.len() - 1;
    for (index, segment) in path.segments().iter().enumerate() {
        let Some(node) = present(current) else {
            return Ok(Resolution::NotApplicable);
        };
        match node.shape() {
            Shape::Record(record) => {
                if let Some(member) = record.field(segment) {
                    current = member;
                    continue;
                }
                if let Some(result) = record.call(segment) {
                    let value = result.map_err(|source| ResolveError::Accessor {
                        accessor: segment.clone(),
                        source_type: node.type_name(),
                        source,
                    })?;
                    if present(value.as_ref()).is_none() {
                        return Ok(Resolution::NotApplicable);
                    }
                    return Ok(Resolution::Found(Resolved::Owned(value)));
                }
                if index == last {
                    return Err(ResolveError::NotFound {
                        segment: segment.clone(),
                        source_type: node.type_name(),
                    });
                }
                return Ok(Resolution::NotApplicable);
            }
            Shape::Map(map) => match map.lookup(segment)? {
                Some(value) => current = value,
                None => return Ok(Resolution::NotApplicable),
            },
            Shape::Sequence(items) => {
                match segment.parse::<usize>().ok().and_then(|i| items.element(i)) {
                    Some(item) => current = item,
                    None => return Ok(Resolution::NotApplicable),
                }
            }
            Shape::Optional(_) | Shape::Leaf => return Ok(Resolution::NotApplicable),
        }
    }

    Ok(present(current).map_or(Resolution::NotApplicable, |value| {
        Resolution::Found(Resolved::Borrowed(value))
    }))
}

/// Unwraps one level of optionality; `None` when the value is absent.
fn present(value: &dyn Reflect) -> Option<&dyn Reflect> {
    match value.shape() {
        Shape::Optional(inner) => inner,
        _ => Some(value),
    }
}
