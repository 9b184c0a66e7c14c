//! Merge orchestration.
//!
//! [`Merger::merge`] validates the source, then hands a [`MergeContext`] to the
//! destination's [`Merge`] implementation. Generated implementations call
//! one [`MergeContext`] method per tagged field, in declaration order, and
//! stop at the first error.

use std::any::type_name;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::error::{FieldContext, MergeError, MergeResult};
use crate::hydrate::Hydrator;
use crate::reconcile::{ReconcileError, reconcile};
use crate::reflect::{Reflect, Shape};
use crate::resolve::{Resolution, resolve};
use crate::select::select;
use crate::tag::TagExpression;

/// Destinations whose fields are filled from tagged source paths.
///
/// Usually derived:
///
/// ```
/// use fieldmerge::{Merge, Record};
///
/// #[derive(Record)]
/// struct Env {
///     pub url: Option<String>,
/// }
///
/// #[derive(Record)]
/// struct Sources {
///     #[fieldmerge(rename = "EV")]
///     pub env: Env,
/// }
///
/// #[derive(Default, Merge)]
/// struct Config {
///     #[fieldmerge(from = "EV.url")]
///     url: String,
///     untouched: u8,
/// }
///
/// let sources = Sources {
///     env: Env { url: Some("http://env".into()) },
/// };
/// let mut config = Config::default();
/// fieldmerge::merge(&mut config, &sources)?;
/// assert_eq!(config.url, "http://env");
/// assert_eq!(config.untouched, 0);
/// # Ok::<(), fieldmerge::MergeError>(())
/// ```
pub trait Merge {
    /// Merges every tagged field from the context's source.
    ///
    /// # Errors
    ///
    /// Returns the first [`MergeError`] raised by a field.
    fn merge_fields(&mut self, ctx: &MergeContext<'_>) -> MergeResult<()>;
}

/// Configures and runs merges.
///
/// The default merger has no hydrator and ignores unknown tag options.
#[derive(Default)]
pub struct Merger {
    hydrator: Option<Box<dyn Hydrator + Send + Sync>>,
    strict_options: bool,
}

impl fmt::Debug for Merger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merger")
            .field("hydrator", &self.hydrator.is_some())
            .field("strict_options", &self.strict_options)
            .finish()
    }
}

impl Merger {
    /// Creates a merger with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `hydrator` for fields tagged with `hydrate`.
    #[must_use]
    pub fn with_hydrator<H>(mut self, hydrator: H) -> Self
    where
        H: Hydrator + Send + Sync + 'static,
    {
        self.hydrator = Some(Box::new(hydrator));
        self
    }

    /// Rejects tags carrying unrecognised options when `strict` is set.
    #[must_use]
    pub const fn strict_options(mut self, strict: bool) -> Self {
        self.strict_options = strict;
        self
    }

    /// Merges `source` into `destination`.
    ///
    /// The source must be a record, or a present optional or pointer holding
    /// one. Fields assigned before a failing field keep their new values.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidSource`] before touching any field when the
    /// source is not a record, and the first field-level error otherwise.
    pub fn merge<D>(&self, destination: &mut D, source: &dyn Reflect) -> MergeResult<()>
    where
        D: Merge + ?Sized,
    {
        let record = validate_source(source)?;
        debug!(
            source_type = record.type_name(),
            destination_type = type_name::<D>(),
            "merging fields"
        );
        destination.merge_fields(&MergeContext {
            source: record,
            merger: self,
        })
    }

    fn hydrator(&self) -> Option<&dyn Hydrator> {
        self.hydrator
            .as_deref()
            .map(|hydrator| hydrator as &dyn Hydrator)
    }
}

/// Merges `source` into `destination` with a default [`Merger`].
///
/// # Errors
///
/// See [`Merger::merge`].
pub fn merge<D>(destination: &mut D, source: &dyn Reflect) -> MergeResult<()>
where
    D: Merge + ?Sized,
{
    Merger::default().merge(destination, source)
}

fn validate_source(source: &dyn Reflect) -> MergeResult<&dyn Reflect> {
    match source.shape() {
        Shape::Record(_) => Ok(source),
        Shape::Optional(Some(inner)) if matches!(inner.shape(), Shape::Record(_)) => Ok(inner),
        _ => Err(MergeError::InvalidSource {
            found: source.type_name(),
        }),
    }
}

/// Per-merge state handed to [`Merge::merge_fields`].
pub struct MergeContext<'a> {
    source: &'a dyn Reflect,
    merger: &'a Merger,
}

impl fmt::Debug for MergeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeContext")
            .field("source", &self.source.type_name())
            .field("merger", self.merger)
            .finish()
    }
}

impl MergeContext<'_> {
    /// The validated source record.
    #[must_use]
    pub fn source(&self) -> &dyn Reflect {
        self.source
    }

    /// Assigns the value selected by `tag` to `slot`.
    ///
    /// `slot` is left untouched when no alternative yields a value.
    ///
    /// # Errors
    ///
    /// Returns a [`MergeError`] naming `field` when the tag is malformed, a
    /// path fails terminally, or the selected value cannot become a `T`.
    /// Tags requesting `hydrate` fail with
    /// [`HydrateError::RequiresDefault`](crate::HydrateError::RequiresDefault)
    /// when the selected value is textual; use
    /// [`MergeContext::hydrated_field`] for those.
    pub fn field<T>(&self, slot: &mut T, field: &'static str, tag: &str) -> MergeResult<()>
    where
        T: Clone + 'static,
    {
        if let Some(value) = self.select_value(field, tag, type_name::<T>(), None)? {
            *slot = value;
        }
        Ok(())
    }

    /// Assigns `Some(value)` to an optional destination field.
    ///
    /// The selected value must be a `T`. When no alternative yields a value
    /// the field is explicitly unset to `None`.
    ///
    /// # Errors
    ///
    /// As [`MergeContext::field`]. `slot` is unchanged on error.
    pub fn optional_field<T>(
        &self,
        slot: &mut Option<T>,
        field: &'static str,
        tag: &str,
    ) -> MergeResult<()>
    where
        T: Clone + 'static,
    {
        *slot = self.select_value(field, tag, type_name::<Option<T>>(), None)?;
        Ok(())
    }

    /// Like [`MergeContext::field`], hydrating textual values into a fresh
    /// `T::default()`.
    ///
    /// # Errors
    ///
    /// As [`MergeContext::field`], plus [`MergeError::Hydration`] when the
    /// hydrator is missing or fails.
    pub fn hydrated_field<T>(&self, slot: &mut T, field: &'static str, tag: &str) -> MergeResult<()>
    where
        T: Clone + Default + 'static,
    {
        if let Some(value) = self.select_value(field, tag, type_name::<T>(), Some(T::default))? {
            *slot = value;
        }
        Ok(())
    }

    /// Like [`MergeContext::optional_field`], hydrating textual values into a
    /// fresh `T::default()`.
    ///
    /// # Errors
    ///
    /// As [`MergeContext::hydrated_field`].
    pub fn hydrated_optional_field<T>(
        &self,
        slot: &mut Option<T>,
        field: &'static str,
        tag: &str,
    ) -> MergeResult<()>
    where
        T: Clone + Default + 'static,
    {
        *slot = self.select_value(field, tag, type_name::<Option<T>>(), Some(T::default))?;
        Ok(())
    }

    fn select_value<T>(
        &self,
        field: &'static str,
        tag: &str,
        destination_type: &'static str,
        fresh: Option<fn() -> T>,
    ) -> MergeResult<Option<T>>
    where
        T: Clone + 'static,
    {
        let context = || FieldContext {
            field,
            tag: tag.into(),
            destination_type,
        };
        let expression = TagExpression::parse(tag).map_err(|source| MergeError::Tag {
            context: context(),
            source,
        })?;
        let options = expression.options();
        if self.merger.strict_options {
            options.ensure_known().map_err(|source| MergeError::Tag {
                context: context(),
                source,
            })?;
        } else if options.unknown().next().is_some() {
            let unknown: Vec<&str> = options.unknown().collect();
            warn!(field, tag, ?unknown, "ignoring unknown tag options");
        }

        debug!(field, tag, "merging field");
        let mut outcomes = Vec::with_capacity(expression.alternatives().len());
        for path in expression.alternatives() {
            let outcome = resolve(self.source, path)
                .map_err(|err| MergeError::resolution(context(), path, err))?;
            trace!(
                field,
                %path,
                found = matches!(outcome, Resolution::Found(_)),
                "resolved alternative"
            );
            outcomes.push(outcome);
        }

        let Some(value) = select(options, outcomes) else {
            debug!(field, "no alternative yielded a value");
            return Ok(None);
        };
        reconcile(&value, options.hydrate(), self.merger.hydrator(), fresh)
            .map(Some)
            .map_err(|err| match err {
                ReconcileError::Hydration {
                    source_type,
                    source,
                } => MergeError::Hydration {
                    context: context(),
                    source_type,
                    source,
                },
                ReconcileError::TypeMismatch { source_type } => MergeError::TypeMismatch {
                    context: context(),
                    source_type,
                },
            })
    }
}
