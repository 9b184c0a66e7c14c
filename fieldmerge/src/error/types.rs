//! Primary error enum for merge flows.

use std::fmt;

use thiserror::Error;

use crate::hydrate::HydrateError;
use crate::reflect::{BoxError, KeyError};
use crate::tag::TagError;

/// Result alias used throughout the crate.
pub type MergeResult<T> = Result<T, MergeError>;

/// Identifies the destination field being merged when an error occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    /// Name of the destination field.
    pub field: &'static str,
    /// The raw tag text attached to the field.
    pub tag: Box<str>,
    /// Type name of the destination field.
    pub destination_type: &'static str,
}

impl fmt::Display for FieldContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "merge field '{}' (tag: {:?}, dst type: {})",
            self.field, self.tag, self.destination_type
        )
    }
}

/// Errors that abort a merge.
///
/// Every variant is terminal: the merge stops at the first failure and fields
/// assigned before it keep their new values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergeError {
    /// The source is not a record or a present reference to one.
    #[error("invalid merge source: expected a record or a present reference to one, found {found}")]
    InvalidSource {
        /// Type name of the rejected source.
        found: &'static str,
    },

    /// A field's tag does not follow the tag grammar.
    #[error("{context}: malformed tag: {source}")]
    Tag {
        /// Destination field being merged.
        context: FieldContext,
        /// Grammar violation reported by the parser.
        #[source]
        source: TagError,
    },

    /// The final segment of a path names a member that does not exist.
    #[error("{context}: path '{path}' names '{segment}', which {source_type} does not define")]
    NotFound {
        /// Destination field being merged.
        context: FieldContext,
        /// The path alternative being resolved.
        path: String,
        /// The missing member or accessor name.
        segment: String,
        /// Type name of the record that lacks the member.
        source_type: &'static str,
    },

    /// A path segment cannot be converted to a map's key type.
    #[error("{context}: path '{path}': {source}")]
    InvalidKey {
        /// Destination field being merged.
        context: FieldContext,
        /// The path alternative being resolved.
        path: String,
        /// Conversion failure.
        #[source]
        source: KeyError,
    },

    /// A fallible accessor returned an error.
    #[error("{context}: accessor '{accessor}' on {source_type} failed: {source}")]
    Accessor {
        /// Destination field being merged.
        context: FieldContext,
        /// Accessor name as written in the path.
        accessor: String,
        /// Type name of the record exposing the accessor.
        source_type: &'static str,
        /// Error returned by the accessor.
        #[source]
        source: BoxError,
    },

    /// The selected value is not of the destination field's type.
    #[error("{context}: source type {source_type} is not assignable to the destination field")]
    TypeMismatch {
        /// Destination field being merged.
        context: FieldContext,
        /// Type name of the selected value.
        source_type: &'static str,
    },

    /// The hydrator failed to convert a textual value.
    #[error("{context}: hydrating from {source_type} failed: {source}")]
    Hydration {
        /// Destination field being merged.
        context: FieldContext,
        /// Type name of the selected value.
        source_type: &'static str,
        /// Failure reported by the hydrator.
        #[source]
        source: HydrateError,
    },
}

/// Broad classification of a [`MergeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The source handle was rejected before any field was processed.
    Validation,
    /// A tag violated the grammar, including empty tags.
    MalformedTag,
    /// A named member or accessor does not exist.
    NotFound,
    /// A segment could not be converted to a map key.
    InvalidKey,
    /// An accessor reported an error.
    Accessor,
    /// The selected value cannot be assigned to the destination field.
    TypeMismatch,
    /// Hydration failed.
    Hydration,
}
