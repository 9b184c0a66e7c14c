//! Capability traits describing how source values can be walked.
//!
//! The resolver never inspects concrete types. Every source value implements
//! [`Reflect`], which reports a [`Shape`]: a record with named members and
//! accessors, a keyed map, an indexed sequence, an optional value, or an opaque
//! leaf. Records are usually implemented with `#[derive(Record)]`; standard
//! library types are covered here.

use std::any::Any;
use std::fmt;

use thiserror::Error;

mod accessor;
#[cfg(any(feature = "serde_json", feature = "toml"))]
mod document;
mod std_impls;

pub use accessor::{AccessorResult, BoxError, fallible_accessor, infallible_accessor};

/// A value the path resolver can inspect.
///
/// Smart pointers such as `Box`, `Rc` and `Arc` delegate to their contents, so
/// indirection is transparent to both traversal and assignment.
pub trait Reflect: Any {
    /// Reports how the value may be traversed.
    fn shape(&self) -> Shape<'_>;

    /// Exposes the value for downcasting during assignment.
    fn as_any(&self) -> &dyn Any;

    /// Whether the value equals its type's zero value.
    ///
    /// Used by the `skipzero` tag option.
    fn is_zero(&self) -> bool;

    /// Returns the text when the value is textual.
    ///
    /// Only textual values are handed to a hydrator.
    fn as_text(&self) -> Option<&str> {
        None
    }

    /// Type name used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => write!(f, "{}({text:?})", self.type_name()),
            None => f.write_str(self.type_name()),
        }
    }
}

/// The traversal shape of a [`Reflect`] value.
#[derive(Clone, Copy)]
pub enum Shape<'a> {
    /// A struct-like value with named members and optional accessors.
    Record(&'a dyn Record),
    /// A map addressed by keys converted from path segments.
    Map(&'a dyn KeyedMap),
    /// A list addressed by zero-based indices.
    Sequence(&'a dyn Sequence),
    /// A value that may be absent, such as `Option<T>`.
    Optional(Option<&'a dyn Reflect>),
    /// Anything that cannot be traversed further.
    Leaf,
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(_) => f.write_str("Record"),
            Self::Map(_) => f.write_str("Map"),
            Self::Sequence(_) => f.write_str("Sequence"),
            Self::Optional(Some(inner)) => write!(f, "Optional(Some({}))", inner.type_name()),
            Self::Optional(None) => f.write_str("Optional(None)"),
            Self::Leaf => f.write_str("Leaf"),
        }
    }
}

/// Struct-like values exposing members by name.
pub trait Record {
    /// Looks up an exposed member by its exact, case-sensitive name.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Invokes a zero-argument accessor registered under `name`.
    ///
    /// Returns `None` when no accessor has that name. The result terminates the
    /// path even when segments remain.
    fn call(&self, _name: &str) -> Option<AccessorResult> {
        None
    }
}

/// Map-like collections addressed by path segments.
pub trait KeyedMap {
    /// Converts `segment` to the key type and looks it up.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] when the segment cannot be converted to the key
    /// type.
    fn lookup(&self, segment: &str) -> Result<Option<&dyn Reflect>, KeyError>;

    /// Whether the map has no entries.
    fn is_empty(&self) -> bool;
}

/// Indexed collections.
pub trait Sequence {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Element at `index`, if in bounds.
    fn element(&self, index: usize) -> Option<&dyn Reflect>;

    /// Whether the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Key types that can be built from a path segment.
pub trait MapKey: Sized {
    /// Converts a path segment into a key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] when the segment does not parse as the key type.
    fn from_segment(segment: &str) -> Result<Self, KeyError>;
}

/// A path segment could not be converted to a map's key type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("segment '{segment}' is not a valid {key_type} map key: {reason}")]
pub struct KeyError {
    segment: String,
    key_type: &'static str,
    reason: String,
}

impl KeyError {
    /// Builds an error for a segment that does not convert to `K`.
    pub fn new<K>(segment: &str, reason: impl fmt::Display) -> Self {
        Self {
            segment: segment.to_owned(),
            key_type: std::any::type_name::<K>(),
            reason: reason.to_string(),
        }
    }

    /// The segment that failed to convert.
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Name of the map's key type.
    #[must_use]
    pub const fn key_type(&self) -> &'static str {
        self.key_type
    }
}
