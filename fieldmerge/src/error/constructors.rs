//! Constructors and classification helpers for `MergeError`.

use super::{ErrorKind, FieldContext, MergeError};
use crate::resolve::ResolveError;
use crate::tag::TagPath;

impl MergeError {
    /// Classifies the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldmerge::{ErrorKind, MergeError};
    ///
    /// let err = MergeError::InvalidSource { found: "u8" };
    /// assert_eq!(err.kind(), ErrorKind::Validation);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSource { .. } => ErrorKind::Validation,
            Self::Tag { .. } => ErrorKind::MalformedTag,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidKey { .. } => ErrorKind::InvalidKey,
            Self::Accessor { .. } => ErrorKind::Accessor,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Hydration { .. } => ErrorKind::Hydration,
        }
    }

    /// The destination field the error refers to, if any.
    #[must_use]
    pub const fn context(&self) -> Option<&FieldContext> {
        match self {
            Self::InvalidSource { .. } => None,
            Self::Tag { context, .. }
            | Self::NotFound { context, .. }
            | Self::InvalidKey { context, .. }
            | Self::Accessor { context, .. }
            | Self::TypeMismatch { context, .. }
            | Self::Hydration { context, .. } => Some(context),
        }
    }

    /// Attaches field context to a resolver failure.
    pub(crate) fn resolution(context: FieldContext, path: &TagPath, err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound {
                segment,
                source_type,
            } => Self::NotFound {
                context,
                path: path.to_string(),
                segment,
                source_type,
            },
            ResolveError::InvalidKey(source) => Self::InvalidKey {
                context,
                path: path.to_string(),
                source,
            },
            ResolveError::Accessor {
                accessor,
                source_type,
                source,
            } => Self::Accessor {
                context,
                accessor,
                source_type,
                source,
            },
        }
    }
}
