//! Type reconciliation between a selected value and its destination field.

use thiserror::Error;

use crate::hydrate::{HydrateError, Hydrator};
use crate::resolve::Resolved;

/// Why a selected value could not become a `T`.
#[derive(Debug, Error)]
pub(crate) enum ReconcileError {
    #[error("hydrating from {source_type} failed: {source}")]
    Hydration {
        source_type: &'static str,
        #[source]
        source: HydrateError,
    },
    #[error("{source_type} is not assignable to the destination")]
    TypeMismatch { source_type: &'static str },
}

/// Produces the value to assign to a destination of type `T`.
///
/// Textual values are hydrated into a fresh instance built by `fresh` when
/// `hydrate` is set. Everything else must be exactly a `T`.
pub(crate) fn reconcile<T>(
    value: &Resolved<'_>,
    hydrate: bool,
    hydrator: Option<&dyn Hydrator>,
    fresh: Option<fn() -> T>,
) -> Result<T, ReconcileError>
where
    T: Clone + 'static,
{
    let source_type = value.value().type_name();
    if hydrate && let Some(text) = value.value().as_text() {
        let hydration_error = |source| ReconcileError::Hydration {
            source_type,
            source,
        };
        let convert = hydrator.ok_or_else(|| hydration_error(HydrateError::Missing))?;
        let make = fresh.ok_or_else(|| hydration_error(HydrateError::RequiresDefault))?;
        let mut target = make();
        convert.hydrate(&mut target, text).map_err(hydration_error)?;
        return Ok(target);
    }
    value
        .downcast::<T>()
        .ok_or(ReconcileError::TypeMismatch { source_type })
}
