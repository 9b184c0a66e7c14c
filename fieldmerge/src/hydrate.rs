//! Conversion of textual source values into destination types.
//!
//! Fields tagged with `hydrate` hand textual values to a [`Hydrator`] instead
//! of requiring the source and destination types to match. The hydrator fills a
//! freshly created `T::default()` that is assigned to the field on success.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::reflect::BoxError;

/// Failures reported by a [`Hydrator`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HydrateError {
    /// A field requested hydration but the merger has no hydrator.
    #[error("hydration requested but no hydrator is configured")]
    Missing,

    /// The destination type offers no fresh instance to hydrate into.
    ///
    /// Derived implementations route `hydrate` fields through
    /// [`MergeContext::hydrated_field`](crate::MergeContext::hydrated_field),
    /// which requires `Default`; hand-written ones can reach this variant.
    #[error("hydration requires a destination type implementing Default")]
    RequiresDefault,

    /// The hydrator cannot produce the destination type.
    #[error("hydrator does not support the destination type")]
    Unsupported,

    /// The text could not be converted.
    #[error("cannot convert {text:?}: {source}")]
    Conversion {
        /// The text being converted.
        text: String,
        /// Underlying parse failure.
        #[source]
        source: BoxError,
    },
}

impl HydrateError {
    /// Wraps a conversion failure for `text`.
    pub fn conversion(text: &str, source: impl Into<BoxError>) -> Self {
        Self::Conversion {
            text: text.to_owned(),
            source: source.into(),
        }
    }
}

/// Converts text into a destination value.
///
/// `target` is a freshly created default instance of the destination field's
/// type, or of `T` for an `Option<T>` field. Implementations downcast it, fill
/// it, and return [`HydrateError::Unsupported`] for types they do not handle.
///
/// Closures with the matching signature implement this trait:
///
/// ```
/// use std::any::Any;
/// use fieldmerge::{HydrateError, Hydrator};
///
/// let upper = |target: &mut dyn Any, text: &str| -> Result<(), HydrateError> {
///     let slot = target
///         .downcast_mut::<String>()
///         .ok_or(HydrateError::Unsupported)?;
///     *slot = text.to_uppercase();
///     Ok(())
/// };
///
/// let mut value = String::new();
/// upper.hydrate(&mut value, "shout")?;
/// assert_eq!(value, "SHOUT");
/// # Ok::<(), HydrateError>(())
/// ```
pub trait Hydrator {
    /// Writes the value parsed from `text` into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`HydrateError`] when the type is unsupported or the text does
    /// not convert.
    fn hydrate(&self, target: &mut dyn Any, text: &str) -> Result<(), HydrateError>;
}

impl<F> Hydrator for F
where
    F: Fn(&mut dyn Any, &str) -> Result<(), HydrateError>,
{
    fn hydrate(&self, target: &mut dyn Any, text: &str) -> Result<(), HydrateError> {
        self(target, text)
    }
}

type Converter = Box<dyn Fn(&mut dyn Any, &str) -> Result<(), HydrateError> + Send + Sync>;

/// A hydrator backed by per-type parsers.
///
/// [`ParseHydrator::with_standard_types`] covers `bool`, `char`, the integer
/// and float primitives, `String` and `PathBuf` through their `FromStr`
/// implementations. Further types are added with [`ParseHydrator::register`],
/// [`ParseHydrator::register_with`] or, with the `serde_json` feature,
/// [`ParseHydrator::register_json`].
///
/// ```
/// use std::net::IpAddr;
/// use fieldmerge::{Hydrator, ParseHydrator};
///
/// let hydrator = ParseHydrator::with_standard_types().register::<IpAddr>();
/// let mut port = 0_u16;
/// hydrator.hydrate(&mut port, "8080")?;
/// assert_eq!(port, 8080);
/// # Ok::<(), fieldmerge::HydrateError>(())
/// ```
#[derive(Default)]
pub struct ParseHydrator {
    converters: HashMap<TypeId, Converter>,
}

impl ParseHydrator {
    /// Creates a hydrator with no registered types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hydrator preloaded with the standard scalar types.
    #[must_use]
    pub fn with_standard_types() -> Self {
        Self::new()
            .register::<bool>()
            .register::<char>()
            .register::<i8>()
            .register::<i16>()
            .register::<i32>()
            .register::<i64>()
            .register::<i128>()
            .register::<isize>()
            .register::<u8>()
            .register::<u16>()
            .register::<u32>()
            .register::<u64>()
            .register::<u128>()
            .register::<usize>()
            .register::<f32>()
            .register::<f64>()
            .register::<String>()
            .register::<PathBuf>()
    }

    /// Registers `T` using its `FromStr` implementation.
    #[must_use]
    pub fn register<T>(self) -> Self
    where
        T: FromStr + Any,
        T::Err: Into<BoxError>,
    {
        self.register_with(|text: &str| text.parse::<T>().map_err(Into::into))
    }

    /// Registers `T` with a custom parser, replacing any earlier entry.
    #[must_use]
    pub fn register_with<T, P>(mut self, parse: P) -> Self
    where
        T: Any,
        P: Fn(&str) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let converter: Converter = Box::new(move |target: &mut dyn Any, text: &str| {
            let slot = target
                .downcast_mut::<T>()
                .ok_or(HydrateError::Unsupported)?;
            *slot = parse(text).map_err(|source| HydrateError::conversion(text, source))?;
            Ok(())
        });
        self.converters.insert(TypeId::of::<T>(), converter);
        self
    }

    /// Registers `T` as JSON text, for list and object valued fields.
    #[cfg(feature = "serde_json")]
    #[must_use]
    pub fn register_json<T>(self) -> Self
    where
        T: serde::de::DeserializeOwned + Any,
    {
        self.register_with(|text: &str| serde_json::from_str::<T>(text).map_err(Into::into))
    }

    /// Whether a parser is registered for `T`.
    #[must_use]
    pub fn supports<T: Any>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }
}

impl fmt::Debug for ParseHydrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseHydrator")
            .field("types", &self.converters.len())
            .finish()
    }
}

impl Hydrator for ParseHydrator {
    fn hydrate(&self, target: &mut dyn Any, text: &str) -> Result<(), HydrateError> {
        let converter = self
            .converters
            .get(&(*target).type_id())
            .ok_or(HydrateError::Unsupported)?;
        converter(target, text)
    }
}
